//! Version metadata embedded by the build script.
use chrono::{DateTime, SecondsFormat, Utc};

use crate::sections::SectionData;

pub const VERSION: &str = env!("PODVIEW_BUILD_VERSION");
pub const REVISION: &str = env!("PODVIEW_BUILD_REVISION");
const LAST_COMMIT: &str = env!("PODVIEW_BUILD_LAST_COMMIT");

/// Formatting of the zero time, used when the commit date is unknown.
const ZERO_TIME: &str = "0001-01-01T00:00:00Z";

/// Commit timestamp normalized to UTC.
pub fn last_commit() -> String {
    normalize_commit_time(LAST_COMMIT)
}

fn normalize_commit_time(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|time| {
            time.with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Secs, true)
        })
        .unwrap_or_else(|_| ZERO_TIME.to_string())
}

pub fn build_info() -> SectionData {
    SectionData::from([
        ("version".to_string(), VERSION.to_string()),
        ("last-commit".to_string(), last_commit()),
        ("revision".to_string(), REVISION.to_string()),
    ])
}
