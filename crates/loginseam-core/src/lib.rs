pub mod config;
pub mod lifecycle;

pub use config::AppConfig;
