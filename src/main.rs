mod commands;
mod core;
mod release;
mod ui;

use clap::Parser;
use crate::core::error::{ReleaseError, print_error};

/// Bump, build, changelog, commit, tag and push a multi-package workspace
#[derive(Parser)]
#[command(name = "mini-release")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Version to release (e.g. 1.2.3); prompted for when omitted
  #[arg(value_name = "VERSION")]
  target: Option<String>,

  /// Print mutating commands (tests, manifest writes, commit, tag, push) instead of running them
  #[arg(long)]
  dry: bool,

  /// Pre-release identifier for the computed versions (e.g. beta)
  #[arg(long = "preId", value_name = "ID")]
  pre_id: Option<String>,

  /// Answer yes to the confirmation prompt
  #[arg(short, long)]
  yes: bool,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  if let Err(err) = commands::run_release(cli.target, cli.dry, cli.pre_id, cli.yes) {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  print_error(&err);
  std::process::exit(1);
}
