mod commands;
mod core;
mod deps;
mod gem;
mod project;
mod ui;

use clap::{Parser, Subcommand};
use crate::core::context::ProjectContext;
use crate::core::error::{SmithError, print_error};
use std::path::PathBuf;

/// Keep a Ruby gem's gemspec in step with what its sources actually use
#[derive(Parser)]
#[command(name = "gemsmith")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// More log output (-v info, -vv debug, -vvv trace); GEMSMITH_LOG overrides
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  verbose: u8,

  /// Run as if started in this directory
  #[arg(short = 'C', global = true, value_name = "DIR")]
  directory: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List the source files a dependency scan reads
  Files,

  /// Show gems, libraries and commands the sources depend on
  Dependencies {
    /// Output the full scan report in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Write <name>.gemspec from project attributes and discovered dependencies
  Gemspec {
    /// Print the gemspec instead of writing it
    #[arg(long)]
    stdout: bool,
  },

  /// Show project attributes
  Info {
    /// Fail if any attribute is undefined
    #[arg(long)]
    check: bool,
  },
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
  ui::logging::init(cli.verbose);

  let start = match cli.directory {
    Some(dir) => dir,
    None => match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => handle_error(SmithError::from(e).context("Failed to get current directory")),
    },
  };

  let ctx = match ProjectContext::build(&start) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Files => commands::run_files(&ctx),
    Commands::Dependencies { json } => commands::run_dependencies(&ctx, json),
    Commands::Gemspec { stdout } => commands::run_gemspec(&ctx, stdout),
    Commands::Info { check } => commands::run_info(&ctx, check),
  };

  ctx.end_of_run();

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: SmithError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
