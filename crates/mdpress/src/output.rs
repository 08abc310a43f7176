//! Colored terminal output utilities.

use std::path::Path;

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    bold: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter writing to stderr.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            bold: Style::new().bold(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Report a written output file: `<kind> file created: <path> (<detail>)`,
    /// with the path in bold.
    pub(crate) fn file_created(&self, kind: &str, path: &Path, detail: &str) {
        let _ = self
            .term
            .write_line(&self.file_created_line(kind, path, detail));
    }

    fn file_created_line(&self, kind: &str, path: &Path, detail: &str) -> String {
        format!(
            "{} {} {}",
            self.green.apply_to(format!("{kind} file created:")),
            self.bold.apply_to(path.display()),
            self.green.apply_to(format!("({detail})")),
        )
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a highlighted message (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        let _ = self
            .term
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_file_created_line() {
        let output = Output::new();
        let line = output.file_created_line("PDF", Path::new("out/report.pdf"), "3 pages");
        assert_eq!(
            console::strip_ansi_codes(&line),
            "PDF file created: out/report.pdf (3 pages)"
        );
    }
}
