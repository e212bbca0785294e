mod app;
mod cli;
mod domain;
mod infra;

use crate::cli::CliInvocation;
use crate::infra::{load_palette_or_fallback, resolve_palette_path};
use std::io::{self, Write};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum MainError {
    #[error(transparent)]
    Cli(#[from] crate::cli::CliRunError),
}

fn main() {
    init_tracing();

    if let Err(error) = run_main() {
        let mut err = io::stderr().lock();
        let _ = writeln!(err, "{error}");
        std::process::exit(1);
    }
}

// Off unless SYSTEM_COLOUR_LOG is set: stdout is sourced by the shell and
// stderr lands in the prompt.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("SYSTEM_COLOUR_LOG")
        .unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn run_main() -> Result<(), MainError> {
    let args = std::env::args().collect::<Vec<_>>();
    let invocation = match crate::cli::parse_invocation(&args) {
        Ok(invocation) => invocation,
        Err(error) => {
            let mut err = io::stderr().lock();
            let _ = writeln!(err, "{error}");
            let _ = writeln!(err);
            print_help();
            std::process::exit(2);
        }
    };

    match invocation {
        CliInvocation::PrintHelp => {
            print_help();
            Ok(())
        }
        CliInvocation::PrintVersion => {
            let mut out = io::stdout().lock();
            let _ = writeln!(out, "{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        CliInvocation::Command { palette, command } => {
            let path = match palette {
                Some(path) => Some(path),
                None => resolve_palette_path()
                    .inspect_err(|error| tracing::debug!("{error}"))
                    .ok(),
            };
            let palette = load_palette_or_fallback(path.as_deref());
            crate::cli::run(command, &palette)?;
            Ok(())
        }
    }
}

fn print_help() {
    let text = format!(
        "{name} - deterministic prompt colours for this host\n\nUSAGE:\n  {name} [--palette PATH]                      Print shell exports (same as `exports`)\n  {name} exports [--hostname NAME]             Print SYSTEM_COLOUR_FG / SYSTEM_COLOUR_BG exports\n  {name} preview [TEXT...] [--hostname NAME]   Print TEXT (default: short hostname) in its colours\n  {name} palette [ID]                          List the active palette, or show one colour\n  {name} --help | --version\n\nGLOBAL FLAGS:\n  --palette PATH  Colour map JSON (default: ~/.share/256-terminal-colour-map.json)\n\nOUTPUT:\n  exports: `export SYSTEM_COLOUR_FG=<id>` and `export SYSTEM_COLOUR_BG=0`; root gets 9, errors get 37\n  palette: id<TAB>name<TAB>#rrggbb\n\nENV:\n  SYSTEM_COLOUR_PALETTE  Override the colour map path\n  SYSTEM_COLOUR_LOG      Log filter for stderr (e.g. debug; default: off)\n",
        name = env!("CARGO_PKG_NAME")
    );
    let mut out = io::stdout().lock();
    let _ = write!(out, "{text}");
}
