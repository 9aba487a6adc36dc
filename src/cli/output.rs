//! Colored terminal output for publish runs.
//!
//! Write failures are swallowed: losing a status line must never fail a run.

use std::io::Write;

use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output.
#[derive(Debug)]
pub struct OutputManager {
    stdout: BufferWriter,
    verbose: bool,
    quiet: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self {
            stdout: BufferWriter::stdout(ColorChoice::Auto),
            verbose: self.verbose,
            quiet: self.quiet,
        }
    }
}

impl OutputManager {
    /// Create a new output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            stdout: BufferWriter::stdout(ColorChoice::Auto),
            verbose,
            quiet,
        }
    }

    fn emit(&self, glyph: &str, color: Color, bold: bool, message: &str) {
        if self.quiet {
            return;
        }
        let mut buffer = self.stdout.buffer();
        Self::glyph_line(&mut buffer, glyph, color, bold, message);
        let _ = self.stdout.print(&buffer);
    }

    fn glyph_line(buffer: &mut Buffer, glyph: &str, color: Color, bold: bool, message: &str) {
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold));
        let _ = write!(buffer, "{glyph}");
        let _ = buffer.reset();
        let _ = writeln!(buffer, " {message}");
    }

    /// Print an info message.
    pub fn info(&self, message: &str) {
        self.emit("ℹ", Color::Cyan, false, message);
    }

    /// Print a success message.
    pub fn success(&self, message: &str) {
        self.emit("✓", Color::Green, true, message);
    }

    /// Print a warning message.
    pub fn warn(&self, message: &str) {
        self.emit("⚠", Color::Yellow, true, message);
    }

    /// Print an error message to stderr. Always shown, even in quiet mode.
    pub fn error(&self, message: &str) {
        let stderr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = stderr.buffer();
        Self::glyph_line(&mut buffer, "✗", Color::Red, true, message);
        let _ = stderr.print(&buffer);
    }

    /// Print a detail message, shown only in verbose mode.
    pub fn verbose(&self, message: &str) {
        if !self.verbose {
            return;
        }
        self.emit("→", Color::Blue, false, message);
    }

    /// Print indented text (for sub-items).
    pub fn indent(&self, message: &str) {
        if self.quiet {
            return;
        }
        let mut buffer = self.stdout.buffer();
        let _ = writeln!(&mut buffer, "    {message}");
        let _ = self.stdout.print(&buffer);
    }

    /// Print a plain message (respects quiet mode).
    pub fn println(&self, message: &str) {
        if self.quiet {
            return;
        }
        let mut buffer = self.stdout.buffer();
        let _ = writeln!(&mut buffer, "{message}");
        let _ = self.stdout.print(&buffer);
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if quiet mode is enabled.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}
