//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{CategoryService, PickerService, PlannerService};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding application settings and I/O dependencies.
///
/// Services are cheap to build and created on demand.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
        }
    }

    pub fn category_service(&self) -> CategoryService {
        CategoryService::new(Arc::clone(&self.fs))
    }

    pub fn picker_service(&self) -> PickerService {
        PickerService::new(self.settings.back_keyword.clone())
    }

    pub fn planner_service(&self) -> PlannerService {
        PlannerService::new(self.picker_service(), self.settings.max_activities)
    }
}
