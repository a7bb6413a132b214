//! Persistent storage: the TOML configuration file and word lists.

pub mod config;
pub mod dictionary;

pub use config::{load_config_from, read_config, save_config_to, AppConfig, ConfigError};
pub use dictionary::{load_word_list, DictionaryError};
