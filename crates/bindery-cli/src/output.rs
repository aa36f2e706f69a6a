//! Formatted output helpers for CLI commands.
//!
//! Provides consistent headings, counts and interceptor lists.

use bindery_aop::Interceptor;

/// Formats a title underlined with a double rule of the same width.
#[must_use]
pub fn heading(title: &str) -> String {
    let width = title.chars().count();
    format!("{title}\n{}\n", "\u{2550}".repeat(width))
}

/// Formats `count` with `noun`, adding `s` unless the count is one.
#[must_use]
pub fn count(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Formats interceptor type identifiers as a comma separated list.
#[must_use]
pub fn format_interceptors(interceptors: &[Interceptor]) -> String {
    interceptors
        .iter()
        .map(|i| i.class().as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
