// Core modules
pub mod api;
pub mod config;
pub mod error;
pub mod indicators;
pub mod judgment;
pub mod models;
pub mod notify;
pub mod scanner;
pub mod server;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::ScanError;
pub use models::*;
pub use scanner::Scanner;
