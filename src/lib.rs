pub mod config;
pub mod db;
pub mod error;
pub mod server;

pub use config::Config;
pub use error::ServerError;
