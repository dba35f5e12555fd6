pub mod error;
pub mod fetch;
pub mod logger;
pub mod validation;
