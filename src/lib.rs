pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod manager;
pub mod models;
pub mod ssh_config;
pub mod transfer;

pub use error::{Error, Result};
pub use manager::HostManager;
pub use models::{HostRecord, NewHost};
pub use ssh_config::ConfigStore;
