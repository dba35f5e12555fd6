pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpProgressService, SupabaseSessionClient};
pub use config::TomlConfig;
pub use crate::core::{AuthGateway, ProgressPipeline};
pub use server::{AppServer, AppState};
pub use utils::error::{AppError, Result};
