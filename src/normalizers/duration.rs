use regex::Regex;
use std::sync::LazyLock;

// Hours and/or minutes only. A zero-day designator (`P0DT...`) is common
// enough in the wild to accept.
static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:0+D)?T(?:([0-9]+)H)?(?:([0-9]+)M)?$").expect("duration pattern is valid")
});

/// Total minutes of an ISO-8601 `PT[n]H[n]M` duration.
///
/// Returns `None` for absent input, input with other components (days,
/// seconds) and anything else that does not match.
pub fn parse_duration_minutes(iso: Option<&str>) -> Option<u32> {
    let iso = iso?.trim();
    let caps = DURATION_PATTERN.captures(iso)?;

    let hours = caps.get(1);
    let minutes = caps.get(2);
    if hours.is_none() && minutes.is_none() {
        return None;
    }

    let hours: u32 = match hours {
        Some(h) => h.as_str().parse().ok()?,
        None => 0,
    };
    let minutes: u32 = match minutes {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    hours.checked_mul(60)?.checked_add(minutes)
}
