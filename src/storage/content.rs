use crate::config::OutputConfig;
use crate::HarvestError;
use std::path::{Path, PathBuf};

/// Filesystem area holding archived pages and downloaded assets
#[derive(Debug, Clone)]
pub struct ContentStore {
    html_dir: PathBuf,
    image_dir: PathBuf,
}

impl ContentStore {
    pub fn new(html_dir: impl Into<PathBuf>, image_dir: impl Into<PathBuf>) -> Self {
        Self {
            html_dir: html_dir.into(),
            image_dir: image_dir.into(),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.html_dir, &config.image_dir)
    }

    /// Creates both directories if they do not exist yet
    pub fn ensure_dirs(&self) -> Result<(), HarvestError> {
        std::fs::create_dir_all(&self.html_dir)?;
        std::fs::create_dir_all(&self.image_dir)?;
        Ok(())
    }

    pub fn html_dir(&self) -> &Path {
        &self.html_dir
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// Writes archived markup under `file_name`, replacing any previous file
    pub async fn write_page(&self, file_name: &str, body: &[u8]) -> Result<PathBuf, HarvestError> {
        let path = self.html_dir.join(file_name);
        tokio::fs::write(&path, body).await?;
        Ok(path)
    }

    /// Writes image bytes under `file_name`, replacing any previous file
    pub async fn write_image(&self, file_name: &str, body: &[u8]) -> Result<PathBuf, HarvestError> {
        let path = self.image_dir.join(file_name);
        tokio::fs::write(&path, body).await?;
        Ok(path)
    }

    /// Lists archived `.html` files sorted by file name
    pub async fn list_pages(&self) -> Result<Vec<PathBuf>, HarvestError> {
        let mut pages = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.html_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_html = path.extension().map(|ext| ext == "html").unwrap_or(false);
            if is_html && entry.file_type().await?.is_file() {
                pages.push(path);
            }
        }

        pages.sort();
        Ok(pages)
    }
}
