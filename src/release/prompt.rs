//! Interactive prompts
//!
//! The resolver only sees the [`Prompter`] trait; the terminal implementation
//! uses `dialoguer` and blocks until the user answers.

use crate::core::error::ReleaseResult;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

pub trait Prompter {
  /// Pick one of `items`, returning its index
  fn select(&self, message: &str, items: &[String]) -> ReleaseResult<usize>;

  /// Free text, pre-filled with `initial`
  fn input(&self, message: &str, initial: &str) -> ReleaseResult<String>;

  /// Yes/no question
  fn confirm(&self, message: &str) -> ReleaseResult<bool>;
}

/// Prompts on the controlling terminal
pub struct TerminalPrompter {
  theme: ColorfulTheme,
  assume_yes: bool,
}

impl TerminalPrompter {
  /// `assume_yes` answers every confirmation with yes without asking
  pub fn new(assume_yes: bool) -> Self {
    Self {
      theme: ColorfulTheme::default(),
      assume_yes,
    }
  }
}

impl Prompter for TerminalPrompter {
  fn select(&self, message: &str, items: &[String]) -> ReleaseResult<usize> {
    Ok(
      Select::with_theme(&self.theme)
        .with_prompt(message)
        .items(items)
        .default(0)
        .interact()?,
    )
  }

  fn input(&self, message: &str, initial: &str) -> ReleaseResult<String> {
    Ok(
      Input::<String>::with_theme(&self.theme)
        .with_prompt(message)
        .with_initial_text(initial)
        .interact_text()?,
    )
  }

  fn confirm(&self, message: &str) -> ReleaseResult<bool> {
    if self.assume_yes {
      println!("{} yes", message);
      return Ok(true);
    }

    Ok(
      Confirm::with_theme(&self.theme)
        .with_prompt(message)
        .default(false)
        .interact()?,
    )
  }
}
