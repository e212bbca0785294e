use crate::app::{ExportsError, HostContext, resolve_exports};
use crate::domain::{GetColoursError, Palette, colourise, get_colours};
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CliInvocation {
    PrintHelp,
    PrintVersion,
    Command {
        palette: Option<PathBuf>,
        command: CliCommand,
    },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CliCommand {
    Exports {
        hostname: Option<String>,
    },
    Preview {
        text: Option<String>,
        hostname: Option<String>,
    },
    Palette {
        id: Option<u8>,
    },
}

#[derive(Debug, Error)]
pub enum CliParseError {
    #[error("unknown subcommand: {0}")]
    UnknownSubcommand(String),

    #[error("unknown flag: {0}")]
    UnknownFlag(String),

    #[error("missing value for flag: {0}")]
    MissingFlagValue(String),

    #[error("invalid value for {flag}: {value}")]
    InvalidFlagValue { flag: String, value: String },

    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}

#[derive(Debug, Error)]
pub enum CliRunError {
    #[error("output error: {0}")]
    Io(#[from] io::Error),

    #[error("unknown colour id: {0}\nHint: run `system-colour palette` to list the active palette.")]
    UnknownColourId(u8),

    #[error(transparent)]
    Host(#[from] ExportsError),

    #[error(transparent)]
    Colours(#[from] GetColoursError),
}

pub fn parse_invocation(args: &[String]) -> Result<CliInvocation, CliParseError> {
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        return Ok(CliInvocation::PrintHelp);
    }
    if args.iter().any(|arg| arg == "--version" || arg == "-V") {
        return Ok(CliInvocation::PrintVersion);
    }

    let mut iter = args.iter().skip(1).peekable();
    let mut palette: Option<PathBuf> = None;
    while let Some(arg) = iter.peek() {
        match arg.as_str() {
            "--palette" | "-p" => {
                let _ = iter.next();
                let value = iter
                    .next()
                    .ok_or_else(|| CliParseError::MissingFlagValue("--palette".to_string()))?;
                palette = Some(PathBuf::from(value));
            }
            "--" => {
                let _ = iter.next();
                break;
            }
            _ => break,
        }
    }

    let Some(subcommand) = iter.next() else {
        return Ok(CliInvocation::Command {
            palette,
            command: CliCommand::Exports { hostname: None },
        });
    };

    let command = match subcommand.as_str() {
        "exports" => {
            let mut hostname: Option<String> = None;

            let mut args = iter;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--hostname" | "-H" => {
                        let value = args.next().ok_or_else(|| {
                            CliParseError::MissingFlagValue("--hostname".to_string())
                        })?;
                        hostname = Some(value.to_string());
                    }
                    _ if arg.starts_with('-') => {
                        return Err(CliParseError::UnknownFlag(arg.to_string()));
                    }
                    _ => {
                        return Err(CliParseError::UnexpectedArgument(arg.to_string()));
                    }
                }
            }

            CliCommand::Exports { hostname }
        }
        "preview" => {
            let mut hostname: Option<String> = None;
            let mut words: Vec<&str> = Vec::new();

            let mut args = iter;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--hostname" | "-H" => {
                        let value = args.next().ok_or_else(|| {
                            CliParseError::MissingFlagValue("--hostname".to_string())
                        })?;
                        hostname = Some(value.to_string());
                    }
                    _ if arg.starts_with('-') => {
                        return Err(CliParseError::UnknownFlag(arg.to_string()));
                    }
                    _ => words.push(arg.as_str()),
                }
            }

            if hostname.is_some() && !words.is_empty() {
                return Err(CliParseError::UnexpectedArgument(words.join(" ")));
            }
            let text = (!words.is_empty()).then(|| words.join(" "));
            CliCommand::Preview { text, hostname }
        }
        "palette" => {
            let mut id: Option<u8> = None;

            for arg in iter {
                if arg.starts_with('-') {
                    return Err(CliParseError::UnknownFlag(arg.to_string()));
                }
                if id.is_some() {
                    return Err(CliParseError::UnexpectedArgument(arg.to_string()));
                }
                id = Some(parse_colour_id(arg)?);
            }

            CliCommand::Palette { id }
        }
        other => return Err(CliParseError::UnknownSubcommand(other.to_string())),
    };

    Ok(CliInvocation::Command { palette, command })
}

pub fn run(command: CliCommand, palette: &Palette) -> Result<(), CliRunError> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let exports = matches!(command, CliCommand::Exports { .. });
    run_with_output(command, palette, &mut out)?;
    match out.flush() {
        Err(error) if exports => {
            tracing::debug!("failed to flush exports: {error}");
            Ok(())
        }
        result => Ok(result?),
    }
}

fn run_with_output(
    command: CliCommand,
    palette: &Palette,
    out: &mut impl Write,
) -> Result<(), CliRunError> {
    match command {
        CliCommand::Exports { hostname } => {
            // Sourced by the prompt: a failed write is dropped, never reported.
            let exports = resolve_exports(palette, hostname);
            let written = out
                .write_all(exports.to_string().as_bytes())
                .and_then(|()| out.flush());
            if let Err(error) = written {
                tracing::debug!("failed to write exports: {error}");
            }
            Ok(())
        }
        CliCommand::Preview { text, hostname } => {
            let (text, pair) = match text {
                Some(text) => {
                    let pair = get_colours(palette, &text, "")?;
                    (text, pair)
                }
                None => {
                    let host = HostContext::detect(hostname)?;
                    let pair = host.colours(palette)?;
                    (host.seed().to_string(), pair)
                }
            };
            let line = format!(
                "{}\tfg={}\tbg={}",
                colourise(&text, &pair),
                pair.fg.id,
                pair.bg.id
            );
            write_line(out, &line)?;
            Ok(())
        }
        CliCommand::Palette { id: Some(id) } => {
            let entry = palette.get(id).ok_or(CliRunError::UnknownColourId(id))?;
            write_line(
                out,
                &format!("{}\t{}\t{}", entry.id, entry.name, entry.rgb.hex()),
            )?;
            Ok(())
        }
        CliCommand::Palette { id: None } => {
            for entry in palette.entries() {
                let line = format!("{}\t{}\t{}", entry.id, entry.name, entry.rgb.hex());
                if !write_line(out, &line)? {
                    return Ok(());
                }
            }
            Ok(())
        }
    }
}

fn write_line(out: &mut impl Write, line: &str) -> io::Result<bool> {
    match writeln!(out, "{line}") {
        Ok(()) => Ok(true),
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(false),
        Err(error) => Err(error),
    }
}

fn parse_colour_id(value: &str) -> Result<u8, CliParseError> {
    value
        .parse::<u8>()
        .map_err(|_| CliParseError::InvalidFlagValue {
            flag: "colour id".to_string(),
            value: value.to_string(),
        })
}
