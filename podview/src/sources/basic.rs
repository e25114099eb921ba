use std::time::{Duration, Instant};

use chrono::{Local, SecondsFormat};

use crate::sections::SectionData;

/// Pod name, current time and process uptime.
pub fn basic_info(pod_name: &str, started_at: Instant) -> SectionData {
    SectionData::from([
        ("podname".to_string(), pod_name.to_string()),
        (
            "podtime".to_string(),
            Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
        ("runtime".to_string(), format_uptime(started_at.elapsed())),
    ])
}

/// Formats a duration truncated to whole seconds, e.g. `1h2m3s`, `4m0s`, `0s`.
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}
