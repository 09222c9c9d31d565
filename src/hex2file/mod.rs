mod decode;
mod error;
mod filter;
mod write;

pub use decode::decode;
pub use error::Error;
pub use filter::FilterConfig;
#[allow(deprecated, unused_imports)]
pub use write::{
	write,
	write_from_file,
	write_str,
	Input,
	Mode,
	Summary,
};
