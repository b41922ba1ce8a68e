//! # CLI
//!
//! The command line front for the gamepack library. Given a tracking-data
//! root and a match id it converts the match's gamepack to JSON and prints
//! the four output paths (ball, home, away, metadata) in order.
use clap::Parser;
use gamepack::{Converter, Encoding, GamepackPaths};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(version, about = "Converts a msgpack gamepack to a JSON gamepack")]
struct Args {
    /// Root directory holding per-match tracking data folders
    root: PathBuf,

    /// Integer match id of the gamepack to convert
    match_id: u64,

    /// Directory to create the JSON gamepack under
    #[arg(long, default_value = "JSON")]
    out: PathBuf,

    /// Convert the reduced-frame-rate data in the 5fps subfolder
    #[arg(long)]
    fps5: bool,

    /// Emit keyed objects instead of positional arrays
    #[arg(long)]
    readable: bool,

    /// Indentation width in spaces (compact output when omitted)
    #[arg(long)]
    spacing: Option<usize>,
}

fn run(args: &Args) -> Result<GamepackPaths, gamepack::Error> {
    let encoding = if args.readable {
        Encoding::Readable
    } else {
        Encoding::Efficient
    };

    Converter::new(&args.root, &args.out)
        .fps5(args.fps5)
        .encoding(encoding)
        .spacing(args.spacing)
        .convert(args.match_id)
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(paths) => {
            println!("{}", paths.ball.display());
            println!("{}", paths.home.display());
            println!("{}", paths.away.display());
            println!("{}", paths.metadata.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
