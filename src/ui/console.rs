//! Styled step output
//!
//! Uses `anstyle` for colours. Styling is dropped when stdout is not a
//! terminal so piped output and CI logs stay readable.

use anstyle::{AnsiColor, Style};
use std::cell::RefCell;
use std::io::IsTerminal;

const STEP: Style = Style::new().bold().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Cyan)));
const DRY_RUN: Style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Blue)));
const HIGHLIGHT: Style = Style::new().bold().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Yellow)));

/// Where release output goes
///
/// Normally stdout. Tests use a capturing console that keeps the plain text
/// of every line instead.
pub struct Console {
  styled: bool,
  captured: Option<RefCell<Vec<String>>>,
}

impl Console {
  pub fn stdout() -> Self {
    Self {
      styled: std::io::stdout().is_terminal(),
      captured: None,
    }
  }

  #[cfg(test)]
  pub fn capturing() -> Self {
    Self {
      styled: false,
      captured: Some(RefCell::new(Vec::new())),
    }
  }

  /// A stage heading
  pub fn step(&self, msg: &str) {
    self.emit(STEP, msg);
  }

  /// A command that would have run
  pub fn dry_run(&self, what: &str) {
    self.emit(DRY_RUN, &format!("[dryrun] {}", what));
  }

  /// Something worth noticing (dependency rewrites, final banner)
  pub fn highlight(&self, msg: &str) {
    self.emit(HIGHLIGHT, msg);
  }

  pub fn info(&self, msg: &str) {
    self.emit(Style::new(), msg);
  }

  fn emit(&self, style: Style, msg: &str) {
    if let Some(lines) = &self.captured {
      lines.borrow_mut().push(msg.to_string());
      return;
    }

    if self.styled {
      println!("{style}{msg}{style:#}");
    } else {
      println!("{msg}");
    }
  }

  #[cfg(test)]
  pub fn lines(&self) -> Vec<String> {
    self.captured.as_ref().map(|l| l.borrow().clone()).unwrap_or_default()
  }
}
