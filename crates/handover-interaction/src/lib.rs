//! Provider layer for Handover.
//!
//! Concrete implementations of the core's directory seams: an HTTP-backed
//! client for the group listing and remote contact search, a static
//! in-memory directory for offline use and tests, and the configuration
//! plumbing the HTTP client reads its endpoint from.

pub mod config;
pub mod http_directory;
pub mod static_directory;

pub use config::{DirectoryConfig, load_directory_config};
pub use http_directory::HttpDirectoryClient;
pub use static_directory::StaticDirectory;
