//! Human-readable formatting for sizes and counts.
//!
//! Both formats are fixed and locale-invariant: the service answers in
//! Portuguese and the counts are shown the same way regardless of `--lang`.

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count with base-1024 units (`Bytes`, `KB`, `MB`, `GB`).
///
/// Picks the largest unit in which the value is at least 1, rounds to two
/// decimals and drops trailing zeros. `0` formats as `"0 Bytes"`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    format!("{} {}", trim_decimals(scaled), SIZE_UNITS[unit])
}

/// Round to two decimals, ties upward, and strip a trailing `.0`/`.x0`.
fn trim_decimals(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let fixed = format!("{rounded:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// Format an integer with `.` between groups of three digits (`1.234.567`).
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
