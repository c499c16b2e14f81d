//! Output formatter for human-readable and JSON output
//!
//! Ensures consistent output formatting across all commands.

use comfy_table::{ContentArrangement, Table, presets};
use console::style;
use serde::Serialize;

use super::OutputConfig;

/// Formatter for CLI output
///
/// Handles both human-readable and JSON output formats based on configuration.
/// When JSON mode is enabled, all output is strict JSON without colors.
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Check if JSON output mode is enabled
    pub fn is_json(&self) -> bool {
        self.config.json
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.config.quiet
    }

    /// Check if colors are enabled
    pub fn colors_enabled(&self) -> bool {
        !self.config.no_color && !self.config.json
    }

    /// Output a success message
    pub fn success(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }

        if self.colors_enabled() {
            println!("{} {message}", style("✓").green());
        } else {
            println!("✓ {message}");
        }
    }

    /// Output an error message
    ///
    /// Errors are always printed, even in quiet mode.
    pub fn error(&self, message: &str) {
        self.emit_error(None, message);
    }

    /// Output an API error together with its wire code
    pub fn api_error(&self, code: &str, message: &str) {
        self.emit_error(Some(code), message);
    }

    fn emit_error(&self, code: Option<&str>, message: &str) {
        if self.config.json {
            let error = match code {
                Some(code) => serde_json::json!({ "error": message, "code": code }),
                None => serde_json::json!({ "error": message }),
            };
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&error).unwrap_or_else(|_| message.to_string())
            );
            return;
        }

        let text = match code {
            Some(code) => format!("{message} [{code}]"),
            None => message.to_string(),
        };
        if self.colors_enabled() {
            eprintln!("{} {text}", style("✗").red());
        } else {
            eprintln!("✗ {text}");
        }
    }

    /// Output a warning message
    pub fn warning(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }

        if self.colors_enabled() {
            eprintln!("{} {message}", style("⚠").yellow());
        } else {
            eprintln!("⚠ {message}");
        }
    }

    /// Output JSON directly
    ///
    /// JSON goes out even in quiet mode; scripts asked for it explicitly.
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing output: {e}"),
        }
    }

    /// Print a line of text (respects quiet mode)
    pub fn println(&self, message: &str) {
        if self.config.quiet {
            return;
        }
        println!("{message}");
    }

    /// Highlight an identifier or name
    pub fn style_name(&self, text: &str) -> String {
        if self.colors_enabled() {
            style(text).cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Render rows as a table
    pub fn render_table<R>(&self, header: &[&str], rows: R) -> String
    where
        R: IntoIterator<Item = Vec<String>>,
    {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if !self.colors_enabled() {
            table.force_no_tty();
        }

        table.set_header(header.to_vec());
        for row in rows {
            table.add_row(row);
        }
        table.to_string()
    }

    /// Print rows as a table (respects quiet mode)
    pub fn table<R>(&self, header: &[&str], rows: R)
    where
        R: IntoIterator<Item = Vec<String>>,
    {
        if self.config.quiet {
            return;
        }
        println!("{}", self.render_table(header, rows));
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatter_default() {
        let formatter = Formatter::default();
        assert!(!formatter.is_json());
        assert!(!formatter.is_quiet());
        assert!(formatter.colors_enabled());
    }

    #[test]
    fn test_formatter_json_mode() {
        let config = OutputConfig {
            json: true,
            ..Default::default()
        };
        let formatter = Formatter::new(config);
        assert!(formatter.is_json());
        assert!(!formatter.colors_enabled()); // Colors disabled in JSON mode
    }

    #[test]
    fn test_formatter_no_color() {
        let config = OutputConfig {
            no_color: true,
            ..Default::default()
        };
        let formatter = Formatter::new(config);
        assert!(!formatter.colors_enabled());
        assert_eq!(formatter.style_name("g-1"), "g-1");
    }

    #[test]
    fn test_render_table_contains_cells() {
        let formatter = Formatter::new(OutputConfig {
            no_color: true,
            ..Default::default()
        });
        let rendered = formatter.render_table(
            &["ID", "NAME"],
            vec![
                vec!["g-1".to_string(), "ops".to_string()],
                vec!["g-2".to_string(), "dev".to_string()],
            ],
        );

        assert!(rendered.contains("ID"));
        assert!(rendered.contains("NAME"));
        assert!(rendered.contains("g-1"));
        assert!(rendered.contains("dev"));
    }
}
