use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use eyre::{eyre, Result};
use log::debug;
use crate::global::{split_list, Settings, CONFIG};
use crate::hex2file::{write, Input};

/// Writes hex from a file or from stdin to a binary file.
#[derive(Debug, Parser)]
#[command(name = "hex2file", version, about, long_about = None)]
pub struct Cli {
	/// The path to the output file to write hex to
	pub output_path: PathBuf,

	/// Append to the file rather than overwrite it
	#[arg(long, short)]
	pub append: bool,

	/// Ignore lines starting with any of the supplied comment strings (space
	/// separated) and any content following one of them
	#[arg(long, short, allow_hyphen_values = true)]
	pub comments: Option<String>,

	/// Ignore any of the given strings (space separated) in the input
	#[arg(long, short, allow_hyphen_values = true)]
	pub ignore: Option<String>,

	/// Get the hex contents from the specified file
	#[arg(long, short)]
	pub file: Option<PathBuf>,
}

impl Cli {
	pub fn run(&self) -> Result<()> {
		let input = self.input(io::stdin().is_terminal())?;
		self.run_with(input, &CONFIG)
	}

	/// Picks the input source: `--file` first, then piped stdin.
	fn input(&self, stdin_is_terminal: bool) -> Result<Input> {
		match &self.file {
			Some(path) => Ok(Input::File(path.clone())),
			None if !stdin_is_terminal => Ok(Input::Stream(Box::new(io::stdin()))),
			None => Err(eyre!("No input provided via stdin")),
		}
	}

	fn run_with(&self, input: Input, settings: &Settings) -> Result<()> {
		let filter = settings.filter(
			self.comments.as_deref().map(split_list),
			self.ignore.as_deref().map(split_list),
		);
		let mode = settings.mode(self.append);
		debug!("Writing to {:?} ({:?}) with {:?}", self.output_path, mode, filter);

		write(input, &self.output_path, mode, &filter)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;
	use std::time::{SystemTime, UNIX_EPOCH};

	fn temp_path(name: &str) -> PathBuf {
		let nanos = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.unwrap_or_default()
			.as_nanos();
		std::env::temp_dir().join(format!("hex2file-cli-{name}-{nanos}"))
	}

	#[test]
	fn parses_all_options() {
		let cli = Cli::try_parse_from([
			"hex2file", "-a", "-c", "# //", "-i", ",", "-f", "in.txt", "out.bin",
		]).unwrap();

		assert!(cli.append);
		assert_eq!(cli.comments.as_deref(), Some("# //"));
		assert_eq!(cli.ignore.as_deref(), Some(","));
		assert_eq!(cli.file, Some(PathBuf::from("in.txt")));
		assert_eq!(cli.output_path, PathBuf::from("out.bin"));
	}

	#[test]
	fn output_path_is_required() {
		assert!(Cli::try_parse_from(["hex2file", "-a"]).is_err());
	}

	#[test]
	fn comment_markers_may_start_with_hyphen() {
		let cli = Cli::try_parse_from(["hex2file", "--comments", "-- ;", "out.bin"]).unwrap();
		assert_eq!(cli.comments.as_deref(), Some("-- ;"));
	}

	#[test]
	fn terminal_without_file_is_an_error() {
		let cli = Cli::try_parse_from(["hex2file", "out.bin"]).unwrap();
		let err = cli.input(true).err().unwrap();
		assert_eq!(err.to_string(), "No input provided via stdin");
	}

	#[test]
	fn file_wins_over_stdin() {
		let cli = Cli::try_parse_from(["hex2file", "-f", "in.txt", "out.bin"]).unwrap();
		assert!(matches!(cli.input(false).unwrap(), Input::File(p) if p == PathBuf::from("in.txt")));
	}

	#[test]
	fn runs_with_options_over_settings() {
		let out = temp_path("run");
		let cli = Cli::try_parse_from([
			"hex2file", "-c", "# //", "-i", ",", out.to_str().unwrap(),
		]).unwrap();
		let settings = Settings { comments: vec![";".to_string()], ..Settings::default() };

		cli.run_with(Input::from("# header\n0xAABB, // tail\n0xCCDD,"), &settings).unwrap();

		assert_eq!(fs::read(&out).unwrap(), vec![0xAA, 0xBB, 0xCC, 0xDD]);
		fs::remove_file(&out).unwrap();
	}

	#[test]
	fn settings_supply_defaults() {
		let out = temp_path("settings");
		fs::write(&out, [0x01u8]).unwrap();
		let cli = Cli::try_parse_from(["hex2file", out.to_str().unwrap()]).unwrap();
		let settings = Settings {
			comments: vec![";".to_string()],
			ignore: vec![",".to_string()],
			append: true,
		};

		cli.run_with(Input::from("; skipped\n02,03"), &settings).unwrap();

		assert_eq!(fs::read(&out).unwrap(), vec![0x01, 0x02, 0x03]);
		fs::remove_file(&out).unwrap();
	}

	#[test]
	fn invalid_hex_message() {
		let out = temp_path("invalid");
		let cli = Cli::try_parse_from(["hex2file", out.to_str().unwrap()]).unwrap();

		let err = cli.run_with(Input::from("0x00FF00FZ"), &Settings::default()).unwrap_err();

		assert_eq!(err.to_string(), "Invalid hex input '00FF00FZ'");
		fs::remove_file(&out).unwrap();
	}
}
