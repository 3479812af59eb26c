//! Category catalog ingestion
//!
//! The catalog is the Yelp `categories.json` export: a JSON array of objects
//! carrying `alias`, `title` and `parents`. Other fields are ignored.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::CategoryRecord;
use crate::infrastructure::traits::FileSystem;

/// Reads category records from disk.
pub struct CatalogReader {
    fs: Arc<dyn FileSystem>,
}

impl CatalogReader {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    pub fn read(&self, path: &Path) -> ApplicationResult<Vec<CategoryRecord>> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::Catalog {
                path: path.to_path_buf(),
                message: "file not found".into(),
            });
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read catalog", path)?;
        let records = parse_catalog(&content).map_err(|e| ApplicationError::Catalog {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!("read {} records from {}", records.len(), path.display());
        Ok(records)
    }
}

/// Deserialize catalog JSON into records.
pub fn parse_catalog(content: &str) -> serde_json::Result<Vec<CategoryRecord>> {
    serde_json::from_str(content)
}
