use clap::{Parser, Subcommand};
use qrgif::tools::{ReplayCamera, ReplayDecoder, TextFrame};
use qrgif::{AcceptAll, NullPreview, PayloadKind, ScanOutcome, parse_fragment, scan};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "qrgiftool", version, about = "qrgif CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse one decoded QR string and print its fragment fields
    Parse {
        #[arg(long, value_parser = PayloadKind::from_str)]
        kind: PayloadKind,
        raw: String,
    },
    /// Replay decoded QR texts through the full scan loop, one frame per
    /// line (blank line = frame with no code in view)
    Replay {
        #[arg(long, value_parser = PayloadKind::from_str)]
        kind: PayloadKind,
        /// Read frames from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Parse { kind, raw } => parse_cmd(kind, &raw),
        Command::Replay { kind, file } => replay_cmd(kind, file.as_deref()),
    }
}

fn parse_cmd(kind: PayloadKind, raw: &str) {
    match parse_fragment(raw, kind, &AcceptAll) {
        Ok(fragment) => {
            println!("part {} of {}", fragment.index(), fragment.total());
            println!("text: {}", fragment.text());
        }
        Err(err) => {
            eprintln!("{err}");
        }
    }
}

fn replay_cmd(kind: PayloadKind, file: Option<&Path>) {
    let frames = match read_frames(file) {
        Ok(frames) => frames,
        Err(err) => {
            eprintln!("failed to read frames: {err}");
            return;
        }
    };
    if frames.is_empty() {
        eprintln!("no frames to replay");
        return;
    }

    let camera = ReplayCamera::new(frames);
    match scan(camera, ReplayDecoder, AcceptAll, NullPreview, kind) {
        Ok(ScanOutcome::Completed(payload)) => println!("{payload}"),
        Ok(ScanOutcome::Cancelled) => eprintln!("scan cancelled"),
        Err(err) => eprintln!("scan failed: {err}"),
    }
}

fn read_frames(file: Option<&Path>) -> io::Result<Vec<TextFrame>> {
    let content = match file {
        Some(path) => fs::read_to_string(path)?,
        None => io::read_to_string(io::stdin().lock())?,
    };
    Ok(content
        .lines()
        .map(|line| {
            let line = line.trim();
            if line.is_empty() {
                Vec::new()
            } else {
                vec![line.to_string()]
            }
        })
        .collect())
}
