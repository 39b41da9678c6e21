//! Local filesystem storage for uploaded files.
//!
//! Result files land under `{root}/results/{experiment_id}/{filename}` and
//! source videos under `{root}/videos/{filename}`. Filenames are validated
//! before they touch a path, so a crafted name cannot escape the root.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::info;

use crate::error::{AppError, AppResult};

/// Filesystem storage rooted at the configured uploads directory.
#[derive(Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Create storage rooted at `root`, creating the base directories.
    pub async fn new(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();

        fs::create_dir_all(root.join("results"))
            .await
            .map_err(|e| AppError::Storage(format!("Failed to create results dir: {}", e)))?;
        fs::create_dir_all(root.join("videos"))
            .await
            .map_err(|e| AppError::Storage(format!("Failed to create videos dir: {}", e)))?;

        info!("Storage initialized at {}", root.display());

        Ok(Storage { root })
    }

    /// Reject filenames that are empty or could traverse out of the root.
    pub fn validate_filename(filename: &str) -> AppResult<()> {
        if filename.is_empty()
            || filename == "."
            || filename == ".."
            || filename.contains('/')
            || filename.contains('\\')
            || filename.contains('\0')
        {
            return Err(AppError::InvalidInput(format!(
                "Invalid filename: '{}'",
                filename
            )));
        }
        Ok(())
    }

    /// Path of a result file within an experiment's directory.
    pub fn result_path(&self, experiment_id: i32, filename: &str) -> PathBuf {
        self.root
            .join("results")
            .join(experiment_id.to_string())
            .join(filename)
    }

    /// Path of an uploaded source video.
    pub fn video_path(&self, filename: &str) -> PathBuf {
        self.root.join("videos").join(filename)
    }

    /// Write a result file, creating the experiment directory if needed.
    pub async fn put_result(
        &self,
        experiment_id: i32,
        filename: &str,
        data: &[u8],
    ) -> AppResult<PathBuf> {
        Self::validate_filename(filename)?;

        let path = self.result_path(experiment_id, filename);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Storage(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(&path, data)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write file: {}", e)))?;

        Ok(path)
    }

    /// Write a source video file.
    ///
    /// Video files share one directory, so a name that is already taken gets
    /// a numeric suffix (`clip.yuv` becomes `clip_1.yuv`) instead of
    /// overwriting the existing file.
    pub async fn put_video(&self, filename: &str, data: &[u8]) -> AppResult<PathBuf> {
        Self::validate_filename(filename)?;

        let path = self.unique_video_path(filename).await?;
        fs::write(&path, data)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write file: {}", e)))?;

        Ok(path)
    }

    async fn unique_video_path(&self, filename: &str) -> AppResult<PathBuf> {
        let exists = |p: PathBuf| async move {
            fs::try_exists(&p)
                .await
                .map_err(|e| AppError::Storage(format!("Failed to check file: {}", e)))
                .map(|taken| (p, taken))
        };

        let (path, taken) = exists(self.video_path(filename)).await?;
        if !taken {
            return Ok(path);
        }

        let (stem, ext) = match filename.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
            _ => (filename, None),
        };

        for n in 1..10_000u32 {
            let candidate = match ext {
                Some(ext) => format!("{}_{}.{}", stem, n, ext),
                None => format!("{}_{}", stem, n),
            };
            let (path, taken) = exists(self.video_path(&candidate)).await?;
            if !taken {
                return Ok(path);
            }
        }

        Err(AppError::Storage(format!(
            "No free filename variant for '{}'",
            filename
        )))
    }

    /// Read a stored file in full.
    pub async fn read(&self, path: &Path) -> AppResult<Vec<u8>> {
        fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::NotFound(format!("File {} not found", path.display()))
            } else {
                AppError::Storage(format!("Failed to read file: {}", e))
            }
        })
    }

    /// Remove an experiment's whole results directory; absent is not an error.
    pub async fn remove_result_dir(&self, experiment_id: i32) -> AppResult<()> {
        let dir = self.root.join("results").join(experiment_id.to_string());
        match fs::remove_dir_all(&dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to remove results dir: {}",
                e
            ))),
        }
    }

    /// Remove a stored file; missing files are not an error.
    pub async fn remove(&self, path: &Path) -> AppResult<()> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!("Failed to remove file: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_storage() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path()).await.unwrap();
        (dir, storage)
    }

    #[test]
    fn test_validate_filename() {
        assert!(Storage::validate_filename("metrics.csv").is_ok());
        assert!(Storage::validate_filename("a b (1).log").is_ok());
        assert!(Storage::validate_filename("").is_err());
        assert!(Storage::validate_filename("..").is_err());
        assert!(Storage::validate_filename("../escape.txt").is_err());
        assert!(Storage::validate_filename("a/b.txt").is_err());
        assert!(Storage::validate_filename("a\\b.txt").is_err());
    }

    #[actix_rt::test]
    async fn test_result_path_layout() {
        let (_dir, storage) = temp_storage().await;
        let path = storage.result_path(7, "psnr.csv");
        assert!(path.ends_with("results/7/psnr.csv"));
    }

    #[actix_rt::test]
    async fn test_put_and_read_result() {
        let (_dir, storage) = temp_storage().await;

        let path = storage.put_result(1, "out.log", b"hello").await.unwrap();
        let data = storage.read(&path).await.unwrap();
        assert_eq!(data, b"hello");
    }

    #[actix_rt::test]
    async fn test_read_missing_is_not_found() {
        let (_dir, storage) = temp_storage().await;

        let path = storage.result_path(1, "absent.csv");
        assert!(matches!(
            storage.read(&path).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_rt::test]
    async fn test_put_video_suffixes_on_collision() {
        let (_dir, storage) = temp_storage().await;

        let first = storage.put_video("clip.yuv", b"a").await.unwrap();
        let second = storage.put_video("clip.yuv", b"b").await.unwrap();
        let third = storage.put_video("clip.yuv", b"c").await.unwrap();

        assert!(first.ends_with("videos/clip.yuv"));
        assert!(second.ends_with("videos/clip_1.yuv"));
        assert!(third.ends_with("videos/clip_2.yuv"));
        assert_eq!(storage.read(&first).await.unwrap(), b"a");
        assert_eq!(storage.read(&second).await.unwrap(), b"b");
    }

    #[actix_rt::test]
    async fn test_remove_missing_is_ok() {
        let (_dir, storage) = temp_storage().await;

        let path = storage.video_path("absent.yuv");
        assert!(storage.remove(&path).await.is_ok());
    }
}
