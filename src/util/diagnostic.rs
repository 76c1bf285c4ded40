//! Terminal diagnostics for fatal manifest errors and `check` findings.
//!
//! A diagnostic is a headline, the paths involved and at most one remedy:
//!
//! ```text
//! error: found overlapping annotation index file: `hudson.Extension`
//!   = generated in build/classes/java/main
//!   = generated in build/classes/groovy/main
//!   help: Use joint compilation so all plugin sources share one output directory
//! ```

use std::fmt::{self, Write as _};
use std::path::PathBuf;

/// Remedies shared by several diagnostics.
pub mod suggestions {
    /// Remedy for split compilation outputs.
    pub const JOINT_COMPILATION: &str =
        "Use joint compilation so all plugin sources share one output directory";

    /// Remedy for stale or corrupted generated resources.
    pub const CLEAN_REBUILD: &str = "Clean the build outputs and compile again";

    /// Remedy when the build description is missing.
    pub const NO_BUILD_DESCRIPTION: &str =
        "help: Pass `--build <FILE>` or create `jpi-build.toml` in the current directory";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        }
    }

    /// ANSI SGR code of the label.
    fn style(self) -> &'static str {
        match self {
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
            Severity::Note => "1;36",
        }
    }
}

/// A message for the terminal.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// File the message is about
    pub location: Option<PathBuf>,
    /// One line per involved path or fact
    pub notes: Vec<String>,
    pub help: Option<String>,
}

impl Diagnostic {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            message: message.into(),
            location: None,
            notes: Vec::new(),
            help: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Warning, message)
    }

    pub fn note(message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Note, message)
    }

    pub fn at(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Render for a terminal, with ANSI colors if `color` is set.
    pub fn render(&self, color: bool) -> String {
        let paint = |text: &str, style: &str| {
            if color {
                format!("\x1b[{}m{}\x1b[0m", style, text)
            } else {
                text.to_string()
            }
        };

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}: {}",
            paint(self.severity.label(), self.severity.style()),
            self.message
        );
        if let Some(ref path) = self.location {
            let _ = writeln!(out, "  --> {}", path.display());
        }
        for note in &self.notes {
            let _ = writeln!(out, "  = {}", note);
        }
        if let Some(ref help) = self.help {
            let _ = writeln!(out, "  {}: {}", paint("help", "1;32"), help);
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.render(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_with_notes_and_help() {
        let diag = Diagnostic::error("found overlapping annotation index file: `hudson.Extension`")
            .with_note("generated in build/classes/java/main")
            .with_note("generated in build/classes/groovy/main")
            .with_help(suggestions::JOINT_COMPILATION);

        assert_eq!(
            diag.to_string(),
            "error: found overlapping annotation index file: `hudson.Extension`\n\
             \x20 = generated in build/classes/java/main\n\
             \x20 = generated in build/classes/groovy/main\n\
             \x20 help: Use joint compilation so all plugin sources share one output directory\n"
        );
    }

    #[test]
    fn test_location_and_color() {
        let diag = Diagnostic::warning("no output directories").at("jpi-build.toml");

        let plain = diag.render(false);
        assert!(plain.starts_with("warning: no output directories"));
        assert!(plain.contains("--> jpi-build.toml"));
        assert!(!plain.contains("help"));

        assert!(diag.render(true).starts_with("\x1b[1;33mwarning\x1b[0m"));
    }
}
