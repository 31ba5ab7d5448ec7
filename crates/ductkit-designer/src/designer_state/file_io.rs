//! File I/O operations (save, load, new) for designer state.

use super::DesignerState;
use crate::serialization::LayoutFile;
use crate::snapshot::LayoutSnapshot;

impl DesignerState {
    /// Save layout to file.
    pub fn save_to_file(&mut self, path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
        let file = LayoutFile::from_snapshot(
            self.layout_name.clone(),
            &self.snapshot,
            self.viewport.state(),
        );
        file.save_to_file(&path)?;

        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Load layout from file, replacing the current one.
    pub fn load_from_file(&mut self, path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
        let file = LayoutFile::load_from_file(&path)?;

        self.snapshot = file.to_snapshot();
        self.viewport.restore(&file.viewport);
        self.layout_name = file.metadata.name.clone();
        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Start an empty layout.
    pub fn new_layout(&mut self) {
        self.snapshot = LayoutSnapshot::default();
        self.current_file_path = None;
        self.is_modified = false;
        self.layout_name = "Untitled".to_string();
    }

    /// Title-bar name, with a trailing `*` when there are unsaved edits.
    pub fn display_name(&self) -> String {
        let name = self
            .current_file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or(&self.layout_name);

        if self.is_modified {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }
}
