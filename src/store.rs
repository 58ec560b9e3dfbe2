//! Durable per-branch layout storage.
//!
//! One JSON document per branch key, named `dashboard-layout-{branch}.json`
//! under the platform data dir. Persistence is an optimization, not a
//! correctness requirement: reads fall back to the default layout on any
//! failure, and write failures are logged and swallowed.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::constants::storage;
use crate::layout::entry::is_complete;
use crate::layout::{default_layout, Layout};

pub struct LayoutStore {
    base_dir: PathBuf,
}

impl LayoutStore {
    /// Store rooted at the platform data dir (`~/.local/share/branchboard`
    /// on Linux).
    pub fn new() -> Self {
        let mut base_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        base_dir.push(storage::APP_DIR);
        Self { base_dir }
    }

    /// Store rooted at an explicit directory. Tests use this with a temp dir.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn layout_path(&self, branch_key: &str) -> PathBuf {
        self.base_dir.join(format!(
            "{}{}.{}",
            storage::LAYOUT_KEY_PREFIX,
            branch_key,
            storage::LAYOUT_EXT
        ))
    }

    /// Load the canonical layout for a branch, falling back to the default
    /// on a missing file, unparsable content, or an incomplete card set.
    pub fn load(&self, branch_key: &str) -> Layout {
        let path = self.layout_path(branch_key);
        if !path.exists() {
            info!(branch = %branch_key, "No stored layout, using default");
            return default_layout();
        }

        match self.try_load(branch_key) {
            Ok(layout) => {
                info!(branch = %branch_key, cards = layout.len(), "Loaded stored layout");
                layout
            }
            Err(err) => {
                warn!(branch = %branch_key, error = %err, "Stored layout unusable, using default");
                default_layout()
            }
        }
    }

    fn try_load(&self, branch_key: &str) -> Result<Layout> {
        let path = self.layout_path(branch_key);
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read layout from {path:?}"))?;
        let layout: Layout = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse layout JSON from {path:?}"))?;
        anyhow::ensure!(is_complete(&layout), "stored layout does not cover the card set");
        Ok(layout)
    }

    /// Persist the canonical layout for a branch. Best-effort: a failed
    /// write (full disk, unwritable dir) is logged and otherwise ignored.
    pub fn save(&self, branch_key: &str, layout: &Layout) {
        if let Err(err) = self.try_save(branch_key, layout) {
            warn!(branch = %branch_key, error = %err, "Failed to persist layout");
        }
    }

    fn try_save(&self, branch_key: &str, layout: &Layout) -> Result<()> {
        fs::create_dir_all(&self.base_dir)
            .with_context(|| format!("Failed to create layout directory {:?}", self.base_dir))?;
        let path = self.layout_path(branch_key);
        let json = serde_json::to_string_pretty(layout).context("Failed to serialize layout")?;
        fs::write(&path, json).with_context(|| format!("Failed to write layout to {path:?}"))?;
        info!(branch = %branch_key, path = ?path, "Saved layout");
        Ok(())
    }

    /// Delete the stored layout for a branch and return the default.
    pub fn reset(&self, branch_key: &str) -> Layout {
        let path = self.layout_path(branch_key);
        match fs::remove_file(&path) {
            Ok(()) => info!(branch = %branch_key, "Removed stored layout"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!(branch = %branch_key, error = %err, "Failed to remove stored layout"),
        }
        default_layout()
    }
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::new()
    }
}
