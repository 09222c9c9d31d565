use std::io;
use std::path::PathBuf;

/// Errors raised while converting hex text to a binary file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// A filtered line that is not well-formed hex (odd length or a non-hex digit).
	#[error("Invalid hex input '{0}'")]
	InvalidHexInput(String),

	/// Opening, reading or writing a file (or stdin) failed.
	#[error("{} '{}'", describe(.source), .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

impl Error {
	pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
		Error::Io { path: path.into(), source }
	}
}

// OS errors display as "<message> (os error <code>)"; keep the message only.
fn describe(err: &io::Error) -> String {
	let message = err.to_string();
	match (err.raw_os_error(), message.rfind(" (os error ")) {
		(Some(_), Some(pos)) => message[..pos].to_string(),
		_ => message,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn invalid_hex_message_carries_residual() {
		let err = Error::InvalidHexInput("00FF00FZ".to_string());
		assert_eq!(err.to_string(), "Invalid hex input '00FF00FZ'");
	}

	#[test]
	fn io_message_names_path() {
		let err = Error::io("/no/such/file", io::Error::new(io::ErrorKind::NotFound, "No such file or directory"));
		assert_eq!(err.to_string(), "No such file or directory '/no/such/file'");
	}

	#[test]
	fn io_message_drops_os_error_code() {
		let err = Error::io("/no/such/file", io::Error::from_raw_os_error(2));
		let message = err.to_string();

		assert!(!message.contains("os error"), "{}", message);
		assert!(message.ends_with(" '/no/such/file'"), "{}", message);
	}

	#[test]
	fn real_open_failure_has_plain_message() {
		let path = std::env::temp_dir().join("hex2file-error-missing").join("absent.txt");
		let source = std::fs::read(&path).unwrap_err();
		let err = Error::io(&path, source);

		assert!(!err.to_string().contains("(os error"), "{}", err);
	}
}
