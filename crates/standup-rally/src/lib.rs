pub mod client;
pub mod config;
pub mod error;
pub mod wire;

pub use client::RallyClient;
pub use config::RallyConfig;
pub use error::RallyError;
