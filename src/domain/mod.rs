//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod activity;
pub mod display;
pub mod entities;
pub mod error;
pub mod registry;
pub mod traversal;
pub mod view;

pub use activity::ActivityList;
pub use display::ToTree;
pub use entities::*;
pub use error::{DomainError, DomainResult, NavigationError};
pub use registry::CategoryRegistry;
pub use traversal::{Descent, TraversalState};
pub use view::{CategoryTreeView, Expansion, Level, LevelEntry, LevelId};
