//! Last-modified filter
//!
//! Rows carry the time BRAHMS last changed them. Only rows changed after the
//! previous run are synced; rows with no timestamp or an unreadable one are
//! always synced.

use chrono::NaiveDateTime;

use crate::app::services::brahms_parser::field_parsers::parse_last_modified;

/// How a row's last-modified cell compares with the previous run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Modified,
    Unmodified,
    NoTimestamp,
    Unparseable,
}

impl Freshness {
    pub fn should_sync(&self) -> bool {
        !matches!(self, Freshness::Unmodified)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifiedFilter {
    since: Option<NaiveDateTime>,
}

impl ModifiedFilter {
    /// Filter against `last_run`, or no filter at all for a full sync
    pub fn new(last_run: NaiveDateTime, full_sync: bool) -> Self {
        Self {
            since: (!full_sync).then_some(last_run),
        }
    }

    /// A filter that lets every row through
    pub fn disabled() -> Self {
        Self { since: None }
    }

    pub fn since(&self) -> Option<NaiveDateTime> {
        self.since
    }

    pub fn classify(&self, cell: Option<&str>) -> Freshness {
        let Some(since) = self.since else {
            return Freshness::Modified;
        };

        match cell {
            None => Freshness::NoTimestamp,
            Some(raw) => match parse_last_modified(raw) {
                Some(modified) if modified > since => Freshness::Modified,
                Some(_) => Freshness::Unmodified,
                None => Freshness::Unparseable,
            },
        }
    }
}
