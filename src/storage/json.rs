use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::AnalyticsReport;

/// File sink for the analytics document. The dashboard reads the same
/// path, so the write is a full replace, durable until the next run.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn save_report(&self, report: &AnalyticsReport) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(report)?;
        fs::write(&self.path, json)?;
        tracing::info!("Report saved to {}", self.path.display());

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
