mod config;

pub use config::{split_list, Settings, CONFIG};
