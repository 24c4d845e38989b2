// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod file_store;
pub mod media_library_fs;
pub mod memory_store;
pub mod toml_config;

// Re-export adapters
pub use exec_ffmpeg::FfmpegCliAdapter;
pub use file_store::FileKeyValueStore;
pub use media_library_fs::FsMediaLibraryAdapter;
pub use memory_store::MemoryKeyValueStore;
pub use toml_config::{AppConfig, TomlConfigAdapter};
