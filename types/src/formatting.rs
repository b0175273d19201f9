//! Display formatting for estimator readouts.
//!
//! Tick progress, phase timestamps and cooldown countdowns all go through
//! here so the separators stay consistent (including European-style `.`/`,`
//! swapping).

fn europeanize(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '.' => result.push(','),
            ',' => result.push('.'),
            _ => result.push(c),
        }
    }
    result
}

#[inline]
fn maybe_eu(s: String, european: bool) -> String {
    if european { europeanize(&s) } else { s }
}

/// Format a timestamp or phase (seconds) with the given precision.
///
/// # Examples
/// ```
/// use phasewatch_types::formatting::format_secs;
/// assert_eq!(format_secs(3.05, 2, false), "3.05");
/// assert_eq!(format_secs(3.05, 2, true), "3,05");
/// assert_eq!(format_secs(6.0, 1, false), "6.0");
/// ```
pub fn format_secs(secs: f64, precision: usize, european: bool) -> String {
    maybe_eu(format!("{:.prec$}", secs, prec = precision), european)
}

/// Format a fraction in `[0, 1]` as a percentage with 1 decimal place.
///
/// Values outside the range are clamped, so a stale tick estimate never
/// renders as `130%`.
///
/// # Examples
/// ```
/// use phasewatch_types::formatting::format_progress;
/// assert_eq!(format_progress(0.5, false), "50.0%");
/// assert_eq!(format_progress(0.333, true), "33,3%");
/// assert_eq!(format_progress(1.7, false), "100.0%");
/// ```
pub fn format_progress(fraction: f64, european: bool) -> String {
    let pct = fraction.clamp(0.0, 1.0) * 100.0;
    maybe_eu(format!("{:.1}%", pct), european)
}

/// Format a cooldown countdown.
///
/// - Values >= 60s: `M:SS`
/// - Values >= 10s: whole seconds
/// - Values < 10s: one decimal place
/// - Values <= 0: the provided `zero_label`
///
/// # Examples
/// ```
/// use phasewatch_types::formatting::format_countdown;
/// assert_eq!(format_countdown(75.3, "", "0:00", false), "1:15");
/// assert_eq!(format_countdown(15.7, "", "0:00", false), "16");
/// assert_eq!(format_countdown(3.5, "s", "Ready", true), "3,5s");
/// assert_eq!(format_countdown(0.0, "s", "Ready", false), "Ready");
/// ```
pub fn format_countdown(secs: f32, suffix: &str, zero_label: &str, european: bool) -> String {
    if secs <= 0.0 {
        return zero_label.to_string();
    }
    if secs >= 60.0 {
        let mins = (secs / 60.0).floor() as u32;
        let remaining_secs = (secs % 60.0).floor() as u32;
        format!("{}:{:02}", mins, remaining_secs)
    } else if secs >= 10.0 {
        format!("{:.0}{}", secs, suffix)
    } else {
        maybe_eu(format!("{:.1}{}", secs, suffix), european)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_secs() {
        assert_eq!(format_secs(0.0, 2, false), "0.00");
        assert_eq!(format_secs(6.05, 2, false), "6.05");
        assert_eq!(format_secs(6.05, 2, true), "6,05");
    }

    #[test]
    fn test_format_progress_clamps() {
        assert_eq!(format_progress(-0.2, false), "0.0%");
        assert_eq!(format_progress(0.0, false), "0.0%");
        assert_eq!(format_progress(1.0, false), "100.0%");
        assert_eq!(format_progress(2.0, true), "100,0%");
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(75.3, "", "0:00", false), "1:15");
        assert_eq!(format_countdown(15.7, "", "0:00", false), "16");
        assert_eq!(format_countdown(3.5, "", "0:00", false), "3.5");
        assert_eq!(format_countdown(3.5, "", "0:00", true), "3,5");
        assert_eq!(format_countdown(0.0, "", "0:00", false), "0:00");
        assert_eq!(format_countdown(-1.0, "s", "Ready", false), "Ready");
    }

    #[test]
    fn test_europeanize() {
        assert_eq!(europeanize("42.7%"), "42,7%");
        assert_eq!(europeanize("1,500"), "1.500");
        assert_eq!(europeanize("500"), "500");
    }
}
