//! Terminal rendering of markdown output.
//!
//! Rich mode styles markdown with termimad, keeping the `#` of headers
//! visible and painting `>` notices (step and submission errors) red. Plain
//! mode prints the markdown unchanged, which is also what tests match on.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

const HEADER: &str = "\x1b[34m";
const NOTICE: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Renders markdown either styled or as plain text
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

    /// Styling prefix for a whole line, if it gets one.
    fn line_color(line: &str) -> Option<&'static str> {
        if line.starts_with('#') {
            Some(HEADER)
        } else if line.starts_with('>') {
            Some(NOTICE)
        } else {
            None
        }
    }

    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }
        for line in markdown.lines() {
            match Self::line_color(line) {
                Some(color) => println!("{color}{line}{RESET}"),
                None => {
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
