pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::{config, ProjectConfig};
pub use error::{CatalogError, ProjectError, Result, ValidationError};
pub use types::{BaseId, Difficulty, OperationId, SoldierId};
