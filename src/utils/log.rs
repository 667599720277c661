// src/utils/log.rs

//! Console formatting helpers layered on the `log` facade.
//!
//! Banners and summaries go through `log::info!` so they share the
//! timestamp and level prefix of every other line.

const RULE_WIDTH: usize = 60;

/// Format a boxed header as three lines.
fn header_lines(title: &str) -> [String; 3] {
    let border = "═".repeat(RULE_WIDTH);
    [border.clone(), format!("  {title}"), border]
}

/// Format a summary block: title line followed by indented key/value pairs.
fn summary_lines(title: &str, items: &[(&str, String)]) -> Vec<String> {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(format!("[SUMMARY] {title}"));
    for (key, value) in items {
        lines.push(format!("    {key}: {value}"));
    }
    lines
}

/// Log a header
pub fn header(title: &str) {
    for line in header_lines(title) {
        log::info!("{line}");
    }
}

/// Log a sub-item (indented)
pub fn sub_item(message: &str) {
    log::info!("    {message}");
}

/// Log a sub-item at warning level (indented)
pub fn warn_item(message: &str) {
    log::warn!("    {message}");
}

/// Log a summary section
pub fn summary(title: &str, items: &[(&str, String)]) {
    for line in summary_lines(title, items) {
        log::info!("{line}");
    }
}
