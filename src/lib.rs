pub mod action;
pub mod analyzer;
pub mod changelog;
pub mod cli;
pub mod command;
pub mod error;
pub mod forge;
pub mod orchestrator;
pub mod repo;
pub mod result;
pub mod version;

pub use error::SemtagError;
pub use orchestrator::Orchestrator;
pub use result::Result;
