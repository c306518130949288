//! User-facing console messages. Diagnostics go through `tracing` instead.

use crate::utils::colors::{BLUE, CYAN, GREEN, RED, RESET, YELLOW};
use std::fmt;

const BOLD: &str = "\x1b[1m";

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", YELLOW, BOLD, ICON_WARN, RESET, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", RED, BOLD, ICON_ERR, RESET, msg);
}

/// Section header, e.g. above the monthly table.
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}{}== {} =={}\n", CYAN, BOLD, msg, RESET);
}

/// `label: value` line for short status output.
pub fn field<L: fmt::Display, V: fmt::Display>(label: L, value: V) {
    println!("{}• {}:{} {}", CYAN, label, RESET, value);
}
