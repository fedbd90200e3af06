// src/core/fmt.rs

/// `1234567` → `"1,234,567"`, `-1500` → `"-1,500"`.
pub fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Month-over-month annotation: `""` for the first month,
/// then `" (+1,000)"`, `" (-250)"` or `" (No change)"`.
pub fn delta(previous: Option<i64>, current: i64) -> String {
    let Some(prev) = previous else { return s!() };
    let change = current.saturating_sub(prev);
    match change {
        0 => s!(" (No change)"),
        c if c > 0 => format!(" (+{})", thousands(c)),
        c => format!(" ({})", thousands(c)),
    }
}
