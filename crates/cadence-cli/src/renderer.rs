//! Terminal output for the markdown that `cadence_core::display` produces.
//!
//! Rich mode colors headings and runs the rest through a termimad skin;
//! plain mode (`--no-color`) writes the markdown untouched so it can be
//! piped or compared in tests.

use std::fmt::Display;

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Writes rendered results to stdout.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Renders any value whose `Display` output is markdown.
    pub fn show<T: Display + ?Sized>(&self, value: &T) -> Result<()> {
        self.render(&value.to_string())
    }

    /// Render markdown text to the terminal.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match line_style(line) {
                LineStyle::Heading => println!("\x1b[34m{line}\x1b[0m"),
                LineStyle::Alert => println!("\x1b[31m{line}\x1b[0m"),
                LineStyle::Body => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum LineStyle {
    Heading,
    Alert,
    Body,
}

/// Headings keep their hash marks; overbooked and flagged lines are red.
fn line_style(line: &str) -> LineStyle {
    if line.starts_with('#') {
        LineStyle::Heading
    } else if line.contains("overbooked") || line.contains("Needs manual review") {
        LineStyle::Alert
    } else {
        LineStyle::Body
    }
}
