pub mod cache;
pub mod config;
pub mod github;
pub mod http;
pub mod refresher;
pub mod runner;
pub mod status;
pub mod utils;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
