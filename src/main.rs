//! Command line inspector for IconVG files.
//!
//! Prints a file's viewbox, or traces a full decode as one line per canvas
//! callback.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use iconvg_core::{DebugCanvas, DecodeOptions, Rect, decode, decode_viewbox};
use log::error;

#[derive(Parser, Debug)]
#[command(name = "iconvg-rs", version, about = "Inspect IconVG files")]
struct Args {
	/// IconVG file to inspect
	file: PathBuf,

	/// Print the viewbox and exit without decoding the graphic
	#[arg(long)]
	viewbox: bool,

	/// Print the viewbox as JSON
	#[arg(long)]
	json: bool,

	/// Destination width in pixels
	#[arg(long, default_value_t = 64.0)]
	width: f32,

	/// Destination height in pixels
	#[arg(long, default_value_t = 64.0)]
	height: f32,
}

fn main() -> ExitCode {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let args = Args::parse();
	match run(&args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			error!("{}: {e}", args.file.display());
			ExitCode::FAILURE
		}
	}
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
	let src = fs::read(&args.file)?;

	let viewbox = decode_viewbox(&src)?;
	if args.viewbox {
		if args.json {
			println!("{}", serde_json::to_string(&viewbox)?);
		} else {
			println!("{viewbox}");
		}
		return Ok(());
	}

	let dst_rect = Rect::new(0.0, 0.0, args.width, args.height);
	let mut canvas = DebugCanvas::new(io::stdout().lock(), "", None);
	decode(&mut canvas, dst_rect, &src, &DecodeOptions::new())?;
	Ok(())
}
