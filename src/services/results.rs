//! Result file upload and bulk download.
//!
//! Uploads are stored on disk and recorded per experiment; a filename may
//! appear at most once per experiment. Download packs every recorded file
//! into one zip archive built in memory.

use std::io::{Cursor, Write};
use std::path::Path;

use tracing::{info, warn};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::db::DbPool;
use crate::entity::result_file;
use crate::error::{AppError, AppResult};
use crate::models::{Ack, AuthenticatedUser};
use crate::services::experiments::{authorize_owner, load_experiment};
use crate::services::storage::Storage;

/// Store one uploaded result file and record it against the experiment.
pub async fn upload(
    pool: &DbPool,
    storage: &Storage,
    user: &AuthenticatedUser,
    experiment_id: i32,
    filename: &str,
    data: &[u8],
) -> AppResult<Ack> {
    let exp = load_experiment(pool, experiment_id).await?;
    authorize_owner(user, &exp, "upload results for")?;

    Storage::validate_filename(filename)?;

    if pool.get_result_file(experiment_id, filename).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "result file '{}' already exists for this experiment",
            filename
        )));
    }

    let path = storage.put_result(experiment_id, filename, data).await?;

    match pool
        .insert_result_file(experiment_id, filename, &path.to_string_lossy())
        .await
    {
        Ok(_) => {}
        Err(e) => {
            // Do not leave an unrecorded file behind.
            let _ = storage.remove(&path).await;
            return Err(e);
        }
    }

    info!(
        "Result file '{}' uploaded for experiment {} by user {}",
        filename, experiment_id, user.username
    );

    Ok(Ack::new(format!("File '{}' uploaded successfully", filename)))
}

/// A zip archive ready to be sent to the client.
pub struct ResultArchive {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Read the recorded files from disk at their catalogued paths.
///
/// A file that cannot be read (deleted, or otherwise broken on disk) is
/// skipped with a warning rather than failing the whole archive.
async fn collect_entries(
    storage: &Storage,
    records: Vec<result_file::Model>,
) -> Vec<(String, Vec<u8>)> {
    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        match storage.read(Path::new(&record.path)).await {
            Ok(data) => entries.push((record.filename, data)),
            Err(e) => {
                warn!(
                    "Skipping result file '{}' of experiment {}: {}",
                    record.filename, record.experiment_id, e
                );
            }
        }
    }
    entries
}

/// Pack named files into one zip archive.
fn build_zip(entries: &[(String, Vec<u8>)]) -> AppResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, data) in entries {
        writer
            .start_file(name.as_str(), options)
            .map_err(|e| AppError::Storage(format!("Failed to add zip entry: {}", e)))?;
        writer
            .write_all(data)
            .map_err(|e| AppError::Storage(format!("Failed to write zip entry: {}", e)))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| AppError::Storage(format!("Failed to finish zip archive: {}", e)))?;

    Ok(cursor.into_inner())
}

/// Bundle all recorded result files of an experiment into one zip download.
///
/// Files recorded in the database but missing on disk are skipped with a
/// warning; if nothing remains the download is a 404.
pub async fn download(
    pool: &DbPool,
    storage: &Storage,
    user: &AuthenticatedUser,
    experiment_id: i32,
) -> AppResult<ResultArchive> {
    let exp = load_experiment(pool, experiment_id).await?;
    authorize_owner(user, &exp, "download results of")?;

    let records = pool.list_result_files(experiment_id).await?;
    if records.is_empty() {
        return Err(AppError::NotFound(format!(
            "No result files found for experiment {}",
            experiment_id
        )));
    }

    let entries = collect_entries(storage, records).await;

    if entries.is_empty() {
        return Err(AppError::NotFound(format!(
            "No result files found for experiment {}",
            experiment_id
        )));
    }

    Ok(ResultArchive {
        filename: format!("{}_results.zip", exp.name),
        data: build_zip(&entries)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn test_build_zip_round_trip() {
        let entries = vec![
            ("psnr.csv".to_string(), b"frame,psnr\n1,38.2\n".to_vec()),
            ("encode.log".to_string(), b"done\n".to_vec()),
        ];

        let data = build_zip(&entries).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut contents = String::new();
        archive
            .by_name("psnr.csv")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "frame,psnr\n1,38.2\n");
    }

    #[test]
    fn test_build_zip_empty_is_valid_archive() {
        let data = build_zip(&[]).unwrap();
        let archive = ZipArchive::new(Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 0);
    }

    fn record(id: i32, filename: &str, path: &std::path::Path) -> result_file::Model {
        result_file::Model {
            id,
            experiment_id: 1,
            filename: filename.to_string(),
            path: path.to_string_lossy().into_owned(),
        }
    }

    #[actix_rt::test]
    async fn test_collect_entries_skips_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path()).await.unwrap();

        let good = storage.put_result(1, "psnr.csv", b"data").await.unwrap();
        let missing = storage.result_path(1, "gone.log");
        // A directory where a file is expected fails the read without ENOENT
        let broken = storage.result_path(1, "broken");
        tokio::fs::create_dir_all(&broken).await.unwrap();

        let records = vec![
            record(1, "psnr.csv", &good),
            record(2, "gone.log", &missing),
            record(3, "broken", &broken),
        ];

        let entries = collect_entries(&storage, records).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "psnr.csv");
        assert_eq!(entries[0].1, b"data");
    }

    #[actix_rt::test]
    async fn test_collect_entries_reads_catalogued_path() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path()).await.unwrap();

        // The row's path wins even when it differs from the current layout
        let elsewhere = dir.path().join("legacy.bin");
        tokio::fs::write(&elsewhere, b"old layout").await.unwrap();

        let entries = collect_entries(&storage, vec![record(1, "legacy.bin", &elsewhere)]).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].1, b"old layout");
    }
}
