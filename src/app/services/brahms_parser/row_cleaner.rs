//! Row cleaning applied before any field normalisation

/// Strip trailing commas from every cell of a row.
///
/// Upstream exports occasionally embed stray commas at the end of a cell.
/// Cleaning an already clean row returns it unchanged.
pub fn clean_row<S: AsRef<str>>(row: &[S]) -> Vec<String> {
    row.iter()
        .map(|cell| cell.as_ref().trim_end_matches(',').to_string())
        .collect()
}
