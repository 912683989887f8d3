//! Terminal output for the `rectree` binary
//!
//! Diagnostics go to stderr, rendered trees and records to stdout.
//! `colored` honours NO_COLOR and CLICOLOR on its own; the `color` setting
//! switches it off through [`disable_color`].

use colored::Colorize;

/// Report a failed command on stderr.
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Non-fatal notice on stderr, e.g. empty input.
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "warning".yellow().bold(), msg);
}

/// Confirmation line after `check` accepts the records.
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Uncoloured stdout, so rendered output can be piped.
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Applied when the settings say `color = false`.
pub fn disable_color() {
    colored::control::set_override(false);
}
