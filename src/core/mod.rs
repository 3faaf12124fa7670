//! Core module - fundamental types and utilities

pub mod assign;
pub mod book;
pub mod config;
pub mod entity;
pub mod identity;
pub mod workspace;

pub use assign::RoundRobin;
pub use book::Book;
pub use config::Config;
pub use entity::Entity;
pub use identity::{EntityKind, IdParseError, RecordId};
pub use workspace::{Workspace, WorkspaceError};
