pub mod auth_gateway;
pub mod progress_pipeline;

pub use crate::domain::model::{Credentials, ProgressReport, ProgressUpdateResult, StudentId, User};
pub use crate::domain::ports::{ConfigProvider, ProgressService, SessionClient};
pub use crate::utils::error::Result;
pub use auth_gateway::AuthGateway;
pub use progress_pipeline::ProgressPipeline;
