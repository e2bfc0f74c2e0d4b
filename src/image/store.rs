// src/image/store.rs
// Writes transformed images to <root>/<transform name>/<path mirroring the URL>.

use std::path::{Path, PathBuf};

use super::Image;

/// Directory tree that receives transformed images.
#[derive(Debug, Clone)]
pub struct OutputStore {
    root: PathBuf,
}

impl OutputStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Saves `image` under the directory of `transform` and returns its path.
    pub async fn save(&self, transform: &str, image: &Image) -> std::io::Result<PathBuf> {
        let path = self.root.join(transform).join(image.relative_path());
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(&path, image.bytes()).await?;
        Ok(path)
    }
}
