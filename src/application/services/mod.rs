//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, Console)
//! but are themselves concrete structs, not traits.

mod category;
mod picker;
mod planner;

pub use category::{CategoryDetails, CategoryService};
pub use picker::{PickerService, INSTRUCTIONS};
pub use planner::{PlannerService, MENU};
