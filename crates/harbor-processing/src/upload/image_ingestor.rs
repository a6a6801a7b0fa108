use std::path::Path;

use futures::future::join_all;

use super::pipeline::{aggregate, file_extension, target_file_name, BatchKind};
use super::types::{ImageUploadConfiguration, IncomingFile, UploadFiles, UploadOutcome};
use crate::image::{ImageTranscoder, ResizePlan};
use crate::mime::ImageMime;
use crate::validator::UploadValidator;

/// Validate an image upload group, then resize, re-encode and store each image.
///
/// Decoding and encoding run on the blocking pool, one task per image.
#[tracing::instrument(
    skip(files, config),
    fields(
        component = "image_ingestor",
        operation = "ingest_images",
        location = %config.settings.location.display()
    )
)]
pub async fn ingest_images(
    files: &UploadFiles,
    config: &ImageUploadConfiguration,
) -> UploadOutcome {
    let validation_config = config.validation_config();
    let validation = UploadValidator::new(&validation_config).validate(files);
    let vetted = match validation.vetted_files {
        Some(vetted) if validation.success => vetted,
        _ => return UploadOutcome::rejected(validation.message),
    };

    let plan = match ResizePlan::from_config(config) {
        Ok(plan) => plan,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid image dimensions");
            return UploadOutcome::rejected(e.to_string());
        }
    };

    let requested = validation.sanitized_file_name.as_deref();
    let location = config.settings.location.as_path();
    let batch_size = vetted.len();

    let results = join_all(
        vetted
            .iter()
            .map(|file| store_image(file, location, batch_size, requested, plan)),
    )
    .await;

    let outcome = aggregate(&vetted, results, BatchKind::Images);
    tracing::info!(
        total_files = outcome.total_files,
        files_uploaded = outcome.files_uploaded,
        "Image upload finished"
    );
    outcome
}

async fn store_image(
    file: &IncomingFile,
    location: &Path,
    batch_size: usize,
    requested: Option<&str>,
    plan: ResizePlan,
) -> Option<String> {
    let original_name = file.original_name.as_deref().unwrap_or_default();
    let log_failure = |reason: &str, error: Option<&dyn std::fmt::Display>| {
        tracing::error!(
            error = error.map(tracing::field::display),
            original_name = %original_name,
            component = "image_ingestor",
            operation = "store_image",
            "{}",
            reason
        );
    };

    let Some(mime) = file.declared_mime.as_deref().and_then(ImageMime::parse) else {
        log_failure("Unsupported image type", None);
        return None;
    };

    let Some(extension) = file_extension(file.original_name.as_deref()) else {
        log_failure("Uploaded image has no extension", None);
        return None;
    };

    let data = match tokio::fs::read(&file.temporary_path).await {
        Ok(data) => data,
        Err(e) => {
            log_failure("Failed to read uploaded image", Some(&e));
            return None;
        }
    };

    let encoded =
        match tokio::task::spawn_blocking(move || ImageTranscoder::transcode(&data, mime, plan))
            .await
        {
            Ok(Ok(encoded)) => encoded,
            Ok(Err(e)) => {
                log_failure("Failed to process image", Some(&e));
                return None;
            }
            Err(e) => {
                log_failure("Image processing task failed", Some(&e));
                return None;
            }
        };

    let target = target_file_name(&extension, batch_size, requested);
    match tokio::fs::write(location.join(&target), &encoded).await {
        Ok(()) => {
            tracing::debug!(
                original_name = %original_name,
                target = %target,
                bytes = encoded.len(),
                "Image stored"
            );
            Some(target)
        }
        Err(e) => {
            log_failure("Failed to write processed image", Some(&e));
            None
        }
    }
}
