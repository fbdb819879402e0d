//! Terminal output.
//!
//! Status lines lead with a mark: `✓` done, `⚠` warning, `✗` error, `→` hint.
//! Errors and hints go to stderr; everything else to stdout. Styling is
//! dropped when NO_COLOR is set.

use console::Style;
use std::fmt::Display;

const RULE_WIDTH: usize = 56;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Done,
    Warning,
    Failure,
    Hint,
}

impl Mark {
    fn symbol(self) -> &'static str {
        match self {
            Mark::Done => "✓",
            Mark::Warning => "⚠",
            Mark::Failure => "✗",
            Mark::Hint => "→",
        }
    }

    fn style(self) -> Style {
        match self {
            Mark::Done => Style::new().green(),
            Mark::Warning => Style::new().yellow(),
            Mark::Failure => Style::new().red(),
            Mark::Hint => Style::new().cyan(),
        }
    }
}

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn paint(color: bool, style: &Style, value: impl Display) -> String {
    if color {
        style.apply_to(value).to_string()
    } else {
        value.to_string()
    }
}

fn status_line(color: bool, mark: Mark, msg: &str) -> String {
    let text = match mark {
        Mark::Hint => paint(color, &mark.style(), msg),
        _ => msg.to_string(),
    };
    format!("{} {}", paint(color, &mark.style(), mark.symbol()), text)
}

/// `✓ msg` on stdout.
pub fn success(msg: &str) {
    println!("{}", status_line(colors_enabled(), Mark::Done, msg));
}

/// `⚠ msg` on stdout. Warnings never change the exit status.
pub fn warn(msg: &str) {
    println!("{}", status_line(colors_enabled(), Mark::Warning, msg));
}

/// `✗ msg` on stderr.
pub fn error(msg: &str) {
    eprintln!("{}", status_line(colors_enabled(), Mark::Failure, msg));
}

/// `→ msg` on stderr, following an error or an unhealthy report.
pub fn hint(msg: &str) {
    eprintln!("{}", status_line(colors_enabled(), Mark::Hint, msg));
}

pub fn header(title: &str) {
    println!("{}", paint(colors_enabled(), &Style::new().bold(), title));
}

/// Blank line, bold title, dimmed rule.
pub fn section(title: &str) {
    let color = colors_enabled();
    println!();
    println!("{}", paint(color, &Style::new().bold(), title));
    println!("{}", paint(color, &Style::new().dim(), "─".repeat(RULE_WIDTH)));
}

/// Indented `label  value` with the label dimmed.
pub fn kv(label: &str, value: impl Display) {
    let color = colors_enabled();
    println!(
        "  {}  {}",
        paint(color, &Style::new().dim(), label),
        paint(color, &Style::new().bold(), value)
    );
}

pub fn list_item(item: &str) {
    println!("  • {}", item);
}

pub fn dimmed(msg: &str) {
    println!("{}", paint(colors_enabled(), &Style::new().dim(), msg));
}

/// Cyan for key names, paths and commands embedded in a message.
pub fn highlight(value: impl Display) -> String {
    paint(colors_enabled(), &Style::new().cyan(), value)
}
