use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use log::{debug, info};
use crate::hex2file::{decode, Error, FilterConfig};

/// Where the hex text comes from.
pub enum Input {
	/// The hex text itself.
	Text(String),
	/// A file holding the hex text.
	File(PathBuf),
	/// A reader, usually stdin, read to the end before conversion.
	Stream(Box<dyn Read>),
}

impl Input {
	/// Resolves the input to the text to convert.
	///
	/// `None` means there is nothing to do and the destination must not be
	/// touched. A named file always resolves to `Some`, even when it is empty.
	pub fn resolve(self) -> Result<Option<String>, Error> {
		match self {
			Input::Text(text) => Ok(Some(text).filter(|t| !t.is_empty())),
			Input::File(path) => fs::read_to_string(&path)
				.map(Some)
				.map_err(|e| Error::io(path, e)),
			Input::Stream(mut reader) => {
				let mut text = String::new();
				reader
					.read_to_string(&mut text)
					.map_err(|e| Error::io("<stdin>", e))?;
				Ok(Some(text).filter(|t| !t.is_empty()))
			},
		}
	}
}

impl From<&str> for Input {
	fn from(text: &str) -> Self {
		Input::Text(text.to_string())
	}
}

impl From<String> for Input {
	fn from(text: String) -> Self {
		Input::Text(text)
	}
}

/// How the destination file is opened.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
	#[default]
	Overwrite,
	Append,
}

impl From<bool> for Mode {
	fn from(append: bool) -> Self {
		if append { Mode::Append } else { Mode::Overwrite }
	}
}

impl Mode {
	fn open(self, path: &Path) -> std::io::Result<File> {
		let mut options = OpenOptions::new();
		match self {
			Mode::Overwrite => options.write(true).create(true).truncate(true),
			Mode::Append => options.append(true).create(true),
		};
		options.open(path)
	}
}

/// Lines and bytes written by one call to [`write`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
	pub lines: usize,
	pub bytes: usize,
}

/// Converts hex text to binary and writes it to `path`.
///
/// Each line is filtered and decoded in order, and its bytes are written as
/// soon as it is decoded. The first invalid line aborts the call; bytes from
/// earlier lines stay in the file.
///
/// When the input resolves to nothing the destination is neither created
/// nor truncated.
pub fn write<P: AsRef<Path>>(
	input: Input,
	path: P,
	mode: Mode,
	filter: &FilterConfig,
) -> Result<Summary, Error> {
	let path = path.as_ref();

	let text = match input.resolve()? {
		Some(text) => text,
		None => {
			debug!("No input, leaving {:?} untouched", path);
			return Ok(Summary::default());
		},
	};

	let mut file = mode.open(path).map_err(|e| Error::io(path, e))?;
	let mut summary = Summary::default();

	for (number, line) in split_lines(&text).enumerate() {
		let residual = match filter.sanitize(line) {
			Some(residual) => residual,
			None => {
				debug!("Skipping line {}", number + 1);
				continue;
			},
		};

		let bytes = decode(&residual)?;
		file.write_all(&bytes).map_err(|e| Error::io(path, e))?;

		summary.lines += 1;
		summary.bytes += bytes.len();
	}

	file.flush().map_err(|e| Error::io(path, e))?;

	info!(
		"Wrote {} bytes from {} lines to {:?} ({:?})",
		summary.bytes, summary.lines, path, mode
	);

	Ok(summary)
}

fn is_line_break(c: char) -> bool {
	matches!(
		c,
		'\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
	)
}

/// Splits text on every line break, treating `\r\n` as one break.
///
/// A trailing break does not produce a final empty line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
	let mut rest = Some(text).filter(|t| !t.is_empty());
	std::iter::from_fn(move || {
		let current = rest?;
		match current.find(is_line_break) {
			Some(pos) => {
				let tail = &current[pos..];
				let width = if tail.starts_with("\r\n") {
					2
				} else {
					tail.chars().next().map_or(1, char::len_utf8)
				};
				rest = Some(&current[pos + width..]).filter(|t| !t.is_empty());
				Some(&current[..pos])
			},
			None => {
				rest = None;
				Some(current)
			},
		}
	})
}

/// Writes hex text to a file with no comment or ignore strings.
#[deprecated(since = "1.1.0", note = "use `write` with `Input::Text` instead")]
#[allow(dead_code)]
pub fn write_str<P: AsRef<Path>>(text: &str, path: P, append: bool) -> Result<Summary, Error> {
	write(Input::from(text), path, Mode::from(append), &FilterConfig::default())
}

/// Writes the hex text held in `source` to a file with no comment or ignore strings.
#[deprecated(since = "1.1.0", note = "use `write` with `Input::File` instead")]
#[allow(dead_code)]
pub fn write_from_file<S, P>(source: S, path: P, append: bool) -> Result<Summary, Error>
where
	S: Into<PathBuf>,
	P: AsRef<Path>,
{
	write(Input::File(source.into()), path, Mode::from(append), &FilterConfig::default())
}
