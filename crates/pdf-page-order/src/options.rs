use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Source files and sheet grid an expression is evaluated against
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageOrderContext {
    // Input, concatenated in this order
    pub files: Vec<SourceFile>,

    // Slots on one sheet side
    pub grid: GridShape,
}

impl PageOrderContext {
    pub fn new(files: Vec<SourceFile>, grid: GridShape) -> Self {
        Self { files, grid }
    }

    /// Pages across all files
    pub fn total_pages(&self) -> usize {
        self.files.iter().map(|f| f.page_count).sum()
    }

    /// Load a context from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let context = serde_json::from_slice(&bytes)
            .map_err(|e| PageOrderError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(context)
    }

    /// Save the context to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PageOrderError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the context.
    ///
    /// Evaluation itself tolerates a zero grid dimension; a stored
    /// configuration should not carry one.
    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() {
            return Err(PageOrderError::NoFiles);
        }

        if self.grid.rows == 0 || self.grid.cols == 0 {
            return Err(PageOrderError::Config(format!(
                "Grid must have at least one row and column, got {}x{}",
                self.grid.rows, self.grid.cols
            )));
        }

        if let Some(file) = self.files.iter().find(|f| f.name.trim().is_empty()) {
            return Err(PageOrderError::Config(format!(
                "Source file with {} pages has no name",
                file.page_count
            )));
        }

        Ok(())
    }
}
