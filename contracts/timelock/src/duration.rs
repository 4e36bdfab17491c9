pub(crate) const HOUR: u64 = 3600;
pub(crate) const DAY: u64 = 24 * HOUR;

/// Parses a free-text time period such as `30 days`, `1 year` or
/// `2 weeks, 3 days` into whole seconds.
///
/// Components may be separated by commas or `and`; units follow humantime,
/// so a month is 30.44 days and a year 365.25 days. Returns `None` when the
/// text is empty, has a component without a known unit, or overflows.
pub fn parse_duration(input: &str) -> Option<u64> {
    let normalized = input.to_lowercase().replace(',', " ");
    let text = normalized
        .split_whitespace()
        .filter(|t| *t != "and")
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return None;
    }

    humantime::parse_duration(&text)
        .ok()
        .map(|duration| duration.as_secs())
}
