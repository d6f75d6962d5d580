//! Display formatting for listing columns.

use std::fmt::Write as _;

/// Joins a command argument vector for display, quoting arguments that
/// contain whitespace or quotes.
#[must_use]
pub fn quote_cmdline(command: &[String]) -> String {
    let mut out = String::new();
    for arg in command {
        if !out.is_empty() {
            out.push(' ');
        }
        if arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
            let escaped = arg.replace('"', "\\\"");
            let _ = write!(out, "\"{escaped}\"");
        } else {
            out.push_str(arg);
        }
    }
    out
}

/// Renders fractional CPU utilization (0..1) as a percentage.
#[must_use]
pub fn format_cpu_percent(cpu: f64) -> String {
    format!("{:.1}%", cpu * 100.0)
}

/// Renders memory usage against its limit, e.g. `64.0 MiB / 1.0 GiB`.
#[must_use]
pub fn format_memory_and_limit(mem_usage: u64, mem_limit: u64) -> String {
    format!("{} / {}", format_bytes(mem_usage), format_bytes(mem_limit))
}

/// Renders a byte count in binary units with one decimal.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
