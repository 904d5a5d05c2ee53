//! Configuration management

pub mod loader;
pub mod model;

pub use loader::{ConfigLoader, ConfigSource, DEFAULT_CONFIG_FILE, load_from_file, save_to_file};
pub use model::{
    AiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, EditorConfig, LoggingConfig, PREFS_FILE_NAME,
    PyGeniusConfig, StorageConfig, TimeoutConfig, mask_api_key,
};
