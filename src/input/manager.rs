//! Input manager for reading documents from disk

use crate::error::{CapabilityError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor;
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a document and extract its text.
    ///
    /// Extraction problems surface as [`CapabilityError::Extraction`] carrying
    /// the failure cause.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(CapabilityError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let mime_type = FileType::from_path(path).mime_type().ok_or_else(|| {
            CapabilityError::UnsupportedFormat(format!(
                "{} (supported: .pdf, .docx, .txt, .md)",
                path.display()
            ))
        })?;

        info!("Extracting {} from: {}", mime_type, path.display());
        let blob = fs::read(path).await?;
        let text = text_extractor::extract_detailed(&blob, mime_type)?;

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::text_extractor::ExtractionFailure;

    #[tokio::test]
    async fn test_reads_and_caches_text_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "Junior python developer").unwrap();

        let mut manager = InputManager::new();
        assert_eq!(manager.extract_text(&path).await.unwrap(), "Junior python developer");
        assert_eq!(manager.cache_size(), 1);

        std::fs::write(&path, "changed").unwrap();
        assert_eq!(manager.extract_text(&path).await.unwrap(), "Junior python developer");

        manager.clear_cache();
        assert_eq!(manager.extract_text(&path).await.unwrap(), "changed");
    }

    #[tokio::test]
    async fn test_rejects_missing_and_unsupported_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = InputManager::new().with_cache(false);

        let missing = dir.path().join("missing.txt");
        assert!(matches!(
            manager.extract_text(&missing).await,
            Err(CapabilityError::InvalidInput(_))
        ));

        let image = dir.path().join("scan.png");
        std::fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();
        assert!(matches!(
            manager.extract_text(&image).await,
            Err(CapabilityError::UnsupportedFormat(_))
        ));

        let blank = dir.path().join("blank.md");
        std::fs::write(&blank, "\n\n").unwrap();
        assert!(matches!(
            manager.extract_text(&blank).await,
            Err(CapabilityError::Extraction(ExtractionFailure::Empty))
        ));
        assert_eq!(manager.cache_size(), 0);
    }
}
