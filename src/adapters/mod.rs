//! Infrastructure adapters for external systems.

pub mod http;
pub mod line;
pub mod memory;
pub mod sqlite;
pub mod unavailable;

pub use unavailable::UnavailableListStore;
