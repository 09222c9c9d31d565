use lazy_static::lazy_static;
use std::env;
use std::path::{Path, PathBuf};
use serde::Deserialize;
use std::fs;
use eyre::Result;
use eyre::WrapErr;
use log::{debug, warn};
use crate::hex2file::{FilterConfig, Mode};

/// Defaults read from the user's configuration file.
///
/// Command line options take precedence over anything set here.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
	pub comments: Vec<String>,
	pub ignore: Vec<String>,
	pub append: bool,
}

impl Settings {

	// Path to the config file
	pub fn path() -> PathBuf {
		Self::path_with(|key| env::var(key).ok())
	}

	fn path_with<F>(var: F) -> PathBuf
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(path) = var("HEX2FILE_CONFIG") {
			return PathBuf::from(path);
		}

		let default_filename = "hex2file.toml";
		let filename = match env::current_exe() {
			Ok(path) => path.file_stem()
				.map(|name| format!("{}.toml", name.to_string_lossy()))
				.unwrap_or_else(|| default_filename.to_string()),
			Err(e) => {
				warn!("Failed to get the current executable path: {}", e);
				default_filename.to_string()
			},
		};
		CONFIG_DIR.join(filename)
	}

	pub fn from_toml(text: &str) -> Result<Self> {
		toml::from_str(text).wrap_err("Failed to parse config TOML")
	}

	// Load configuration from the TOML file and override with environment variables
	pub fn load() -> Self {
		Self::load_from(&Self::path(), |key| env::var(key).ok())
	}

	/// Loads `config_path`, then applies overrides looked up through `var`.
	pub fn load_from<F>(config_path: &Path, var: F) -> Self
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut config = if config_path.exists() {
			fs::read_to_string(&config_path)
				.wrap_err_with(|| format!("Failed to read config file at {:?}", config_path))
				.and_then(|config_str| Self::from_toml(&config_str))
				.unwrap_or_else(|err| {
					warn!("Error loading config: {:#}. Using defaults.", err);
					Self::default()
				})
		} else {
			debug!("No config file at {:?}. Using defaults.", config_path);
			Self::default()
		};

		config.override_with(var);
		config
	}

	/// Applies `HEX2FILE_*` overrides looked up through `var`.
	pub fn override_with<F>(&mut self, var: F)
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(val) = var("HEX2FILE_COMMENTS") {
			self.comments = split_list(&val);
		}
		if let Some(val) = var("HEX2FILE_IGNORE") {
			self.ignore = split_list(&val);
		}
		if let Some(val) = var("HEX2FILE_APPEND") {
			self.append = val.parse().unwrap_or(self.append);
		}
	}

	/// Builds the line filter, preferring the given lists over the configured ones.
	pub fn filter(&self, comments: Option<Vec<String>>, ignore: Option<Vec<String>>) -> FilterConfig {
		FilterConfig::new(
			comments.unwrap_or_else(|| self.comments.clone()),
			ignore.unwrap_or_else(|| self.ignore.clone()),
		)
	}

	pub fn mode(&self, append: bool) -> Mode {
		Mode::from(append || self.append)
	}
}

/// Splits a space separated option value into its strings.
pub fn split_list(value: &str) -> Vec<String> {
	value.split_whitespace().map(str::to_string).collect()
}

// Immutable global configuration
lazy_static! {
	pub static ref CONFIG: Settings = Settings::load();

	pub static ref CONFIG_DIR: PathBuf = {
		match dirs::config_dir() {
			Some(dir) => dir.join("hex2file"),
			None => {
				warn!("Config directory could not be determined. Using current directory as fallback.");
				PathBuf::from(".")
			}
		}
	};
}
