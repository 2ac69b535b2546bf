//! Terminal output for the xtuml-ts CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Color palette
pub mod colors {
    use console::Color;

    pub const CYAN: Color = Color::Color256(51);
    pub const MAGENTA: Color = Color::Color256(201);
    pub const AMBER: Color = Color::Color256(214);
    pub const NEON_GREEN: Color = Color::Color256(82);
    pub const DIM: Color = Color::Color256(240);
}

pub mod symbols {
    pub const DIAMOND: &str = "\u{25C6}"; // ◆
    pub const DIAMOND_OUTLINE: &str = "\u{25C7}"; // ◇
    pub const TARGET_FILLED: &str = "\u{25C9}"; // ◉
    pub const TRIANGLE: &str = "\u{25B8}"; // ▸
    pub const DOT: &str = "\u{00B7}"; // ·
}

/// Turns styling off for stdout and stderr.
pub fn disable_colors() {
    console::set_colors_enabled(false);
    console::set_colors_enabled_stderr(false);
}

/// Print compact version header
pub fn print_compact_header(version: &str) {
    println!(
        "  {} {} {}",
        style(symbols::DIAMOND).fg(colors::CYAN),
        style("xtuml-ts").fg(colors::CYAN).bold(),
        style(version).dim()
    );
    println!();
}

/// Print a success message
pub fn success(msg: &str) {
    println!(
        "  {} {}",
        style(symbols::TARGET_FILLED).fg(colors::NEON_GREEN),
        msg
    );
}

/// Print an error message to stderr
pub fn error(msg: &str) {
    eprintln!(
        "  {} {}",
        style(symbols::DIAMOND).fg(colors::MAGENTA),
        style(msg).fg(colors::MAGENTA)
    );
}

pub fn warning(msg: &str) {
    println!(
        "  {} {}",
        style(symbols::TRIANGLE).fg(colors::AMBER),
        style(msg).fg(colors::AMBER)
    );
}

/// Print an info message
pub fn info(msg: &str) {
    println!(
        "  {} {}",
        style(symbols::DIAMOND_OUTLINE).fg(colors::CYAN),
        msg
    );
}

/// Print a dim/secondary message
pub fn dim(msg: &str) {
    println!("  {}", style(msg).fg(colors::DIM));
}

/// Create a spinner
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("\u{25CE}\u{25C9}\u{25CE}\u{25C9}") // ◎◉◎◉
        .template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(150));
    pb
}

/// Print a divider line
pub fn divider() {
    println!();
    let line = "\u{254C}".repeat(53); // ╌
    println!("  {}", style(line).fg(colors::DIM));
    println!();
}

/// Print a box header
pub fn box_header(title: &str) {
    let width: usize = 55;
    let title_padded = format!(" {} ", title);
    let title_len = title_padded.chars().count();
    let dashes = width.saturating_sub(title_len + 4);

    println!(
        "  {}{}{}{}",
        style("\u{256D}\u{2500}").fg(colors::CYAN), // ╭─
        style(title_padded).fg(colors::CYAN).bold(),
        style("\u{2500}".repeat(dashes)).fg(colors::CYAN),
        style("\u{256E}").fg(colors::CYAN) // ╮
    );
}

/// Print a box line
pub fn box_line(content: &str) {
    let width: usize = 53;
    let content_len = console::measure_text_width(content);
    let padding = width.saturating_sub(content_len);
    println!(
        "  {} {}{}{}",
        style("\u{2502}").fg(colors::CYAN), // │
        content,
        " ".repeat(padding),
        style("\u{2502}").fg(colors::CYAN)
    );
}

/// Print a box footer
pub fn box_footer() {
    let width = 55;
    println!(
        "  {}{}{}",
        style("\u{2570}").fg(colors::CYAN), // ╰
        style("\u{2500}".repeat(width - 2)).fg(colors::CYAN),
        style("\u{256F}").fg(colors::CYAN) // ╯
    );
}

/// One domain's counts, formatted for a box line.
pub fn domain_line(name: &str, classes: usize, relationships: usize, state_machines: usize) -> String {
    format!(
        "{} {}  {} classes {} {} relationships {} {} state machines",
        style(symbols::TRIANGLE).fg(colors::CYAN),
        style(name).bold(),
        classes,
        symbols::DOT,
        relationships,
        symbols::DOT,
        state_machines
    )
}
