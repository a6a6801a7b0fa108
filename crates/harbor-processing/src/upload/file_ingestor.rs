use std::path::Path;

use futures::future::join_all;

use super::pipeline::{aggregate, file_extension, target_file_name, BatchKind};
use super::types::{IncomingFile, UploadConfiguration, UploadFiles, UploadOutcome};
use crate::validator::UploadValidator;

/// Validate an upload group and copy its files into `config.settings.location`.
///
/// Files are copied concurrently; a failed copy never aborts the others.
#[tracing::instrument(
    skip(files, config),
    fields(
        component = "file_ingestor",
        operation = "ingest_files",
        location = %config.settings.location.display()
    )
)]
pub async fn ingest_files(files: &UploadFiles, config: &UploadConfiguration) -> UploadOutcome {
    let validation = UploadValidator::new(config).validate(files);
    let vetted = match validation.vetted_files {
        Some(vetted) if validation.success => vetted,
        _ => return UploadOutcome::rejected(validation.message),
    };

    let requested = validation.sanitized_file_name.as_deref();
    let location = config.settings.location.as_path();
    let batch_size = vetted.len();

    let results = join_all(
        vetted
            .iter()
            .map(|file| store_file(file, location, batch_size, requested)),
    )
    .await;

    let outcome = aggregate(&vetted, results, BatchKind::Files);
    tracing::info!(
        total_files = outcome.total_files,
        files_uploaded = outcome.files_uploaded,
        "File upload finished"
    );
    outcome
}

async fn store_file(
    file: &IncomingFile,
    location: &Path,
    batch_size: usize,
    requested: Option<&str>,
) -> Option<String> {
    let original_name = file.original_name.as_deref().unwrap_or_default();

    let Some(extension) = file_extension(file.original_name.as_deref()) else {
        tracing::error!(
            original_name = %original_name,
            component = "file_ingestor",
            operation = "store_file",
            "Uploaded file has no extension"
        );
        return None;
    };

    let target = target_file_name(&extension, batch_size, requested);
    match tokio::fs::copy(&file.temporary_path, location.join(&target)).await {
        Ok(bytes) => {
            tracing::debug!(original_name = %original_name, target = %target, bytes, "File stored");
            Some(target)
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                original_name = %original_name,
                component = "file_ingestor",
                operation = "store_file",
                "Failed to copy uploaded file"
            );
            None
        }
    }
}
