pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod project;
pub mod session;
pub mod storage;
pub mod studio;
pub mod warnings;

pub use config::StudioConfig;
pub use error::{Result, StudioError};
pub use project::Project;
pub use session::Session;
pub use studio::{Observer, Studio, StudioEvent};
