//! Terminal rendering for markdown output.
//!
//! Rich mode renders through termimad so parameter tables line up; plain
//! mode prints the markdown untouched.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Formats markdown for the terminal.
    pub fn format(&self, markdown: &str) -> String {
        if self.rich_enabled {
            self.skin.term_text(markdown).to_string()
        } else {
            markdown.to_string()
        }
    }

    pub fn render(&self, markdown: &str) -> Result<()> {
        print!("{}", self.format(markdown));
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer_keeps_markdown() {
        let renderer = TerminalRenderer::new(false);
        let markdown = "# Render Job (job)\n\n| Name | Type |\n";
        assert_eq!(renderer.format(markdown), markdown);
    }

    #[test]
    fn test_rich_renderer_keeps_text() {
        let renderer = TerminalRenderer::new(true);
        assert!(renderer.format("- Template: job.yml\n").contains("job.yml"));
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }
}
