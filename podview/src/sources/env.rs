use crate::sections::SectionData;

/// Snapshot of the full process environment. Nothing is filtered or redacted.
pub fn environment() -> SectionData {
    std::env::vars_os()
        .map(|(name, value)| {
            (
                name.to_string_lossy().into_owned(),
                value.to_string_lossy().into_owned(),
            )
        })
        .collect()
}
