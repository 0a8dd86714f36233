//! Image directory remapping
//!
//! The image export stores directories as seen from the machine that runs
//! BRAHMS (typically a mapped network drive such as `B:\`). Hosts that see
//! the same files through a local mirror inject a [`PrefixMapper`] instead of
//! the default [`IdentityMapper`].

use std::path::PathBuf;

/// Maps a directory cell from the export onto a local directory
pub trait PathMapper: Send + Sync + std::fmt::Debug {
    fn map_directory(&self, directory: &str) -> PathBuf;
}

/// Uses the directory cell unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMapper;

impl PathMapper for IdentityMapper {
    fn map_directory(&self, directory: &str) -> PathBuf {
        PathBuf::from(directory)
    }
}

/// Replaces a leading prefix with a local mirror directory.
///
/// The remainder of the directory is split on both `\` and `/` and rebuilt
/// with the host's separator. Directories without the prefix are returned
/// unchanged.
#[derive(Debug, Clone)]
pub struct PrefixMapper {
    from: String,
    to: PathBuf,
}

impl PrefixMapper {
    pub fn new(from: impl Into<String>, to: impl Into<PathBuf>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl PathMapper for PrefixMapper {
    fn map_directory(&self, directory: &str) -> PathBuf {
        match directory.strip_prefix(self.from.as_str()) {
            Some(rest) => {
                let mut mapped = self.to.clone();
                for component in rest.split(['\\', '/']).filter(|c| !c.is_empty()) {
                    mapped.push(component);
                }
                mapped
            }
            None => PathBuf::from(directory),
        }
    }
}
