//! Message formatting and display.
//!
//! [`OutputFormatter`] is the one place user-facing text is printed from.
//! It is passed explicitly to the operations that report progress, which
//! keeps library code free of global console state and lets tests capture
//! everything an operation printed.
//!
//! # Examples
//!
//! ```
//! use pdftoolkit::output::OutputFormatter;
//!
//! let (formatter, captured) = OutputFormatter::capture(false, false);
//! formatter.info("Processing files...");
//! formatter.success("Operation completed");
//! assert!(captured.contents().contains("Operation completed"));
//! ```

use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex};

/// Level of output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
    /// Debug/verbose message.
    Debug,
}

#[derive(Debug, Clone)]
enum Sink {
    Console,
    Buffer(Arc<Mutex<Vec<u8>>>),
}

/// Text printed through a capturing formatter.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    /// Everything written so far.
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

/// Output formatter with configurable verbosity.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    /// Whether to suppress non-error output.
    quiet: bool,
    /// Whether to show verbose output.
    verbose: bool,
    /// Whether to use colored output.
    colored: bool,
    sink: Sink,
}

impl OutputFormatter {
    /// Create a formatter printing to the terminal.
    ///
    /// # Arguments
    ///
    /// * `quiet` - Suppress non-error output
    /// * `verbose` - Show verbose output
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            colored: Self::should_use_color(),
            sink: Sink::Console,
        }
    }

    /// Create a formatter that records its output instead of printing it.
    pub fn capture(quiet: bool, verbose: bool) -> (Self, CapturedOutput) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let formatter = Self {
            quiet,
            verbose,
            colored: false,
            sink: Sink::Buffer(Arc::clone(&buffer)),
        };
        (formatter, CapturedOutput { buffer })
    }

    /// Create a quiet formatter (only errors and warnings).
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    /// Create a verbose formatter.
    pub fn verbose() -> Self {
        Self::new(false, true)
    }

    /// Returns true if stdout is a TTY and TERM is set.
    fn should_use_color() -> bool {
        io::stdout().is_terminal() && std::env::var("TERM").is_ok()
    }

    /// Print an informational message. Suppressed in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Info, message);
        }
    }

    /// Print a success message. Suppressed in quiet mode.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Success, message);
        }
    }

    /// Print a warning message, even in quiet mode.
    pub fn warning(&self, message: &str) {
        self.print_message(MessageLevel::Warning, message);
    }

    /// Print an error message. Always displayed.
    pub fn error(&self, message: &str) {
        self.print_message(MessageLevel::Error, message);
    }

    /// Print a debug message. Only displayed in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            self.print_message(MessageLevel::Debug, message);
        }
    }

    fn print_message(&self, level: MessageLevel, message: &str) {
        let (prefix, color_code) = match level {
            MessageLevel::Info => ("", ""),
            MessageLevel::Success => ("✓ ", "\x1b[32m"), // Green
            MessageLevel::Warning => ("⚠ ", "\x1b[33m"), // Yellow
            MessageLevel::Error => ("✗ ", "\x1b[31m"),   // Red
            MessageLevel::Debug => ("→ ", "\x1b[36m"),   // Cyan
        };

        let line = if self.colored && !color_code.is_empty() {
            format!("{color_code}{prefix}{message}\x1b[0m")
        } else {
            format!("{prefix}{message}")
        };

        let to_stderr = matches!(level, MessageLevel::Warning | MessageLevel::Error);
        self.write_line(&line, to_stderr);
    }

    fn write_line(&self, line: &str, to_stderr: bool) {
        match &self.sink {
            Sink::Console if to_stderr => eprintln!("{line}"),
            Sink::Console => println!("{line}"),
            Sink::Buffer(buffer) => {
                let mut buffer = buffer.lock().unwrap_or_else(|e| e.into_inner());
                let _ = writeln!(buffer, "{line}");
            }
        }
    }

    /// Print plain text, such as a command's primary result. Printed even in
    /// quiet mode.
    pub fn plain(&self, text: &str) {
        self.write_line(text, false);
    }

    /// Print a section header. Suppressed in quiet mode.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            self.write_line(&format!("\n{title}"), false);
        }
    }

    /// Print a labelled value. Suppressed in quiet mode.
    pub fn field(&self, label: &str, value: &str) {
        if !self.quiet {
            self.write_line(&format!("  {label}: {value}"), false);
        }
    }

    /// Print detailed information. Only shown in verbose mode.
    pub fn detail(&self, label: &str, value: &str) {
        if self.verbose {
            self.write_line(&format!("  {label}: {value}"), false);
        }
    }

    /// Print a numbered list item. Suppressed in quiet mode.
    pub fn list_item(&self, index: usize, message: &str) {
        if !self.quiet {
            self.write_line(&format!("  {index}. {message}"), false);
        }
    }

    /// Print a blank line. Suppressed in quiet mode.
    pub fn blank_line(&self) {
        if !self.quiet {
            self.write_line("", false);
        }
    }

    /// Whether non-error output is shown.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }

    /// Check if verbose output should be shown.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if quiet mode is enabled.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_formatter() {
        let formatter = OutputFormatter::new(false, false);
        assert!(!formatter.is_quiet());
        assert!(!formatter.is_verbose());
        assert!(formatter.should_print());
    }

    #[test]
    fn test_quiet_formatter() {
        let formatter = OutputFormatter::quiet();
        assert!(formatter.is_quiet());
        assert!(!formatter.should_print());
    }

    #[test]
    fn test_verbose_formatter() {
        let formatter = OutputFormatter::verbose();
        assert!(formatter.is_verbose());
        assert!(formatter.should_print());
    }

    #[test]
    fn test_captured_prefixes() {
        let (formatter, captured) = OutputFormatter::capture(false, false);
        formatter.info("plain info");
        formatter.success("done");
        formatter.warning("careful");
        formatter.error("broken");

        let text = captured.contents();
        assert!(text.contains("plain info\n"));
        assert!(text.contains("✓ done"));
        assert!(text.contains("⚠ careful"));
        assert!(text.contains("✗ broken"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_quiet_suppresses_info_but_not_warnings() {
        let (formatter, captured) = OutputFormatter::capture(true, false);
        formatter.info("hidden");
        formatter.success("hidden too");
        formatter.list_item(1, "hidden item");
        formatter.warning("shown");
        formatter.plain("result");

        let text = captured.contents();
        assert!(!text.contains("hidden"));
        assert!(text.contains("shown"));
        assert!(text.contains("result"));
    }

    #[test]
    fn test_debug_and_detail_need_verbose() {
        let (formatter, captured) = OutputFormatter::capture(false, false);
        formatter.debug("debug line");
        formatter.detail("Pages", "3");
        assert!(captured.contents().is_empty());

        let (formatter, captured) = OutputFormatter::capture(false, true);
        formatter.debug("debug line");
        formatter.detail("Pages", "3");
        let text = captured.contents();
        assert!(text.contains("→ debug line"));
        assert!(text.contains("  Pages: 3"));
    }

    #[test]
    fn test_list_item_and_field() {
        let (formatter, captured) = OutputFormatter::capture(false, false);
        formatter.list_item(2, "second.pdf");
        formatter.field("Size", "1.0 KB");
        assert_eq!(captured.contents(), "  2. second.pdf\n  Size: 1.0 KB\n");
    }
}
