//! Time rounding and formatting utilities

/// Round a time in seconds to two decimal places
pub fn round_to_hundredths(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}

/// Format seconds as `m:ss` for compact display
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Parse `12.5`, `2:05` or `2:05.25` into seconds
pub fn parse_seconds(value: &str) -> Option<f64> {
    let value = value.trim();
    if let Ok(seconds) = value.parse::<f64>() {
        return (seconds.is_finite() && seconds >= 0.0).then_some(seconds);
    }

    let (minutes, seconds) = value.split_once(':')?;
    let minutes = minutes.parse::<u32>().ok()?;
    let seconds = seconds.parse::<f64>().ok()?;
    (seconds >= 0.0 && seconds < 60.0).then(|| f64::from(minutes) * 60.0 + seconds)
}
