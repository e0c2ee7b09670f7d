/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Returns GREY for empty cells ("", "--:--", "0", "-"), RESET otherwise.
pub fn color_for_cell(value: &str) -> &'static str {
    match value.trim() {
        "" | "--:--" | "0" | "-" => GREY,
        _ => RESET,
    }
}

/// Bonus vs deduction colouring:
/// \>0 → green
/// \<0 → red
/// 0 → reset
pub fn color_for_amount(value: i64) -> &'static str {
    if value > 0 {
        GREEN
    } else if value < 0 {
        RED
    } else {
        RESET
    }
}

pub fn colorize_cell(value: &str) -> String {
    format!("{}{}{}", color_for_cell(value), value, RESET)
}
