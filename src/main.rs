use std::{
    io,
    path::{Path, PathBuf},
};

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use git_tint::{
    config::{self, ColorMode, Config},
    git,
    input::{for_each_line, open_input},
    output::Output,
    porcelain::StatusReport,
    render::{DEFAULT_WIDTH, LogRenderer, TagPalette, reception_time, render_report},
    uartlog::{LogFilter, classify_log_line},
};

#[derive(Parser)]
#[command(author, version, about, arg_required_else_help = true)]
struct Args {
    #[arg(long, short, global = true, help = "Enable verbose output")]
    verbose: bool,

    /// When to use colors. Overrides the config file.
    #[arg(long, global = true, value_enum)]
    color: Option<ColorMode>,

    /// Config file to use instead of the default one.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a colorized summary of `git status`, including submodule state.
    Status(StatusArgs),
    /// Colorize a `[TAG] MESSAGE` serial log stream.
    Log(LogArgs),
    /// Print a shell completion script.
    Completions { shell: clap_complete::Shell },
}

#[derive(clap::Args)]
struct StatusArgs {
    /// Show ignored files as well.
    #[arg(long)]
    ignored: bool,

    /// Read porcelain v2 output from FILE (`-` for stdin) instead of running git.
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Append a colorless copy of the output to FILE.
    #[arg(long, short, value_name = "FILE")]
    write: Option<PathBuf>,
}

#[derive(clap::Args)]
struct LogArgs {
    /// Read the log from FILE instead of stdin.
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Append a colorless copy of the output to FILE.
    #[arg(long, short, value_name = "FILE")]
    write: Option<PathBuf>,

    /// Show only records whose tag matches REGEX.
    #[arg(long, short = 'T', value_name = "REGEX")]
    tag: Option<String>,

    /// Show only records whose message matches REGEX.
    #[arg(long, short = 'M', value_name = "REGEX")]
    message: Option<String>,

    /// Show only records whose tag or message matches REGEX.
    #[arg(long, short = 'A', value_name = "REGEX")]
    any: Option<String>,

    /// Match filter expressions case-insensitively.
    #[arg(long, short)]
    ignore_case: bool,

    /// Wrap messages to COLS columns instead of the terminal width.
    #[arg(long, value_name = "COLS")]
    width: Option<usize>,

    /// Width of the tag column.
    #[arg(long, value_name = "COLS")]
    tag_width: Option<usize>,
}

fn main() {
    if let Err(e) = inner_main() {
        tracing::error!(error = ?e);
        std::process::exit(1);
    }
    std::process::exit(0);
}

fn inner_main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let config = config::load_config(args.config.as_deref())?;
    tracing::debug!(?config, "Loaded config");
    args.color.unwrap_or(config.color).apply();

    match args.command {
        Commands::Status(status_args) => status(status_args, &config),
        Commands::Log(log_args) => log(log_args, &config),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Args::command(),
                env!("CARGO_PKG_NAME"),
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}

/// Diagnostics go to stderr; stdout carries the rendered output.
fn init_tracing(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn status(args: StatusArgs, config: &Config) -> Result<()> {
    let report = match args.input {
        Some(ref path) => {
            if args.ignored {
                tracing::warn!("--ignored has no effect when reading from --input");
            }
            let mut report = StatusReport::default();
            for_each_line(open_input(path)?, |line| {
                report.push_line(line);
                Ok(())
            })?;
            report
        }
        None => {
            let show_ignored = args.ignored || config.status.show_ignored;
            let output = git::git_status_porcelain(show_ignored)?;
            StatusReport::from_lines(output.lines())
        }
    };
    tracing::debug!(entries = report.entries.len(), "Parsed status report");

    let mut output = Output::stdout(args.write.as_deref())?;
    for line in render_report(&report) {
        output.emit(&line)?;
    }
    output.flush()
}

fn log(args: LogArgs, config: &Config) -> Result<()> {
    let filter = LogFilter::new(
        args.tag.as_deref(),
        args.message.as_deref(),
        args.any.as_deref(),
        args.ignore_case,
    )?;
    let palette = TagPalette::with_presets(config.log.preset_tags()?);
    let width = args
        .width
        .or(config.log.width)
        .unwrap_or_else(terminal_width);
    let tag_width = args.tag_width.unwrap_or(config.log.tag_width);
    tracing::debug!(width, tag_width, "Rendering log");

    let mut renderer = LogRenderer::new(palette, width, tag_width);
    let mut output = Output::stdout(args.write.as_deref())?;
    let input = open_input(args.input.as_deref().unwrap_or(Path::new("-")))?;

    for_each_line(input, |line| {
        let parsed = classify_log_line(line);
        if !filter.accepts(&parsed) {
            return Ok(());
        }
        let timestamp = reception_time(chrono::Local::now());
        for rendered in renderer.render(&parsed, &timestamp) {
            output.emit(&rendered)?;
        }
        // The log is followed live, so don't hold lines back.
        output.flush()
    })
}

fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(columns, _)| usize::from(columns))
        .unwrap_or(DEFAULT_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_status_flags_parse() {
        let args = Args::parse_from([
            "git-tint", "--color", "never", "status", "--ignored", "-w", "out.txt",
        ]);
        assert_eq!(args.color, Some(ColorMode::Never));
        let Commands::Status(status) = args.command else {
            panic!("expected status");
        };
        assert!(status.ignored);
        assert_eq!(status.write, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn test_log_flags_parse() {
        let args = Args::parse_from(["git-tint", "log", "-T", "wifi", "-i", "--width", "80"]);
        let Commands::Log(log) = args.command else {
            panic!("expected log");
        };
        assert_eq!(log.tag.as_deref(), Some("wifi"));
        assert!(log.ignore_case);
        assert_eq!(log.width, Some(80));
    }
}
