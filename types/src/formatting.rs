//! Number formatting for overlay messages.
//!
//! Distances and percentages always render with two decimals. European
//! formatting swaps `.` and `,`, the same way the overlay settings do it.

fn europeanize(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '.' => ',',
            ',' => '.',
            _ => c,
        })
        .collect()
}

#[inline]
fn maybe_eu(s: String, european: bool) -> String {
    if european { europeanize(&s) } else { s }
}

/// Format a distance in light years with two decimals.
///
/// # Examples
/// ```
/// use copilot_types::formatting::format_distance;
/// assert_eq!(format_distance(40.0, false), "40.00 ly");
/// assert_eq!(format_distance(1234.567, false), "1234.57 ly");
/// assert_eq!(format_distance(12.5, true), "12,50 ly");
/// ```
pub fn format_distance(ly: f64, european: bool) -> String {
    maybe_eu(format!("{:.2} ly", ly), european)
}

/// Format a percentage with two decimals.
///
/// # Examples
/// ```
/// use copilot_types::formatting::format_percent;
/// assert_eq!(format_percent(60.0, false), "60.00%");
/// assert_eq!(format_percent(33.3333, false), "33.33%");
/// assert_eq!(format_percent(99.5, true), "99,50%");
/// ```
pub fn format_percent(pct: f64, european: bool) -> String {
    maybe_eu(format!("{:.2}%", pct), european)
}
