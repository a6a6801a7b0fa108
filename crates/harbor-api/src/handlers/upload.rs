use std::path::Path;
use std::sync::Arc;

use axum::extract::{multipart::MultipartRejection, Multipart, State};
use harbor_core::AppError;
use harbor_processing::{
    ingest_files, ingest_images, ImageUploadConfiguration, MaxFiles, MaxSizeMb, OutOfRange,
    UploadConfiguration, UploadOutcome, UploadSettings,
};
use serde::Serialize;

use crate::error::HttpAppError;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::utils::{parse_form, FormParseError};

const FILES_FIELD: &str = "files";
const IMAGES_FIELD: &str = "images";
const FILE_NAME_FIELD: &str = "filename";

/// Status of both upload groups of a request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadTestResult {
    pub files_status: UploadOutcome,
    pub images_status: UploadOutcome,
}

/// `POST /server/file-upload-test`
///
/// Stores up to 3 plain files from `files` and up to 10 images from
/// `images`, resized to 600x250. The optional `filename` field names a
/// single uploaded file.
pub async fn file_upload_test(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ApiResponse<FileUploadTestResult>, HttpAppError> {
    let multipart = multipart.map_err(FormParseError::from).map_err(AppError::from)?;
    let form = parse_form(multipart, &state.temp_dir)
        .await
        .map_err(AppError::from)?;

    let file_name = form.field(FILE_NAME_FIELD).unwrap_or_default();
    let (files_config, images_config) =
        upload_configurations(&state.config.upload_dir, file_name).map_err(|e| {
            AppError::Internal(format!("Invalid upload configuration: {}", e))
        })?;

    let (files_status, images_status) = tokio::join!(
        ingest_files(&form.files, &files_config),
        ingest_images(&form.files, &images_config),
    );

    let success = files_status.success && images_status.success;
    let message = if success {
        "Successfully uploaded all files!"
    } else {
        "Some error has occured!"
    };

    Ok(ApiResponse::new(
        success,
        message,
        Some(FileUploadTestResult {
            files_status,
            images_status,
        }),
    ))
}

fn upload_configurations(
    location: &Path,
    file_name: &str,
) -> Result<(UploadConfiguration, ImageUploadConfiguration), OutOfRange> {
    let files = UploadConfiguration::new(
        UploadSettings::new(location, MaxFiles::try_new(3)?)
            .with_field_name(FILES_FIELD)
            .with_max_size(MaxSizeMb::try_new(100)?)
            .with_file_name(file_name),
    );

    let images = ImageUploadConfiguration::new(
        UploadSettings::new(location, MaxFiles::try_new(10)?)
            .with_field_name(IMAGES_FIELD)
            .with_file_name(file_name),
    )
    .with_preserve_ratio(true)
    .with_dimensions(700, 250)
    .with_max_width(600);

    Ok((files, images))
}
