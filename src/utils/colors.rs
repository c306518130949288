/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Zero durations are greyed out, negative ones (malformed shifts) red.
pub fn color_for_duration(ms: i64) -> &'static str {
    if ms < 0 {
        RED
    } else if ms == 0 {
        GREY
    } else {
        RESET
    }
}

pub fn colorize_duration(value: &str, ms: i64) -> String {
    format!("{}{}{}", color_for_duration(ms), value, RESET)
}
