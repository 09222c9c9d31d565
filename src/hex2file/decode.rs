use crate::hex2file::Error;

/// Decodes a residual line into raw bytes.
///
/// The residual must consist solely of an even number of hex digits. Leading
/// zero bytes are kept, so `"00ff"` decodes to two bytes.
pub fn decode(residual: &str) -> Result<Vec<u8>, Error> {
	if !residual.chars().all(|c| c.is_ascii_hexdigit()) {
		return Err(Error::InvalidHexInput(residual.to_string()));
	}

	hex::decode(residual).map_err(|_| Error::InvalidHexInput(residual.to_string()))
}
