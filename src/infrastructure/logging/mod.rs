//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty stdout
//! - Optional rolling JSON log file

pub mod logger;

pub use logger::LoggerImpl;
