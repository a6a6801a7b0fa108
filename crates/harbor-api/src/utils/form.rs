//! Multipart form parsing
//!
//! Text parts are collected as form fields. File parts are streamed to
//! temporary files that live as long as the returned [`ParsedForm`].

use std::path::Path;

use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use harbor_core::AppError;
use harbor_processing::{FormFields, IncomingFile, UploadFiles};
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;

#[derive(Debug, thiserror::Error)]
pub enum FormParseError {
    #[error("request is not a valid multipart form: {0}")]
    Rejected(#[from] MultipartRejection),

    #[error("failed to read multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("failed to spool uploaded file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<FormParseError> for AppError {
    fn from(err: FormParseError) -> Self {
        AppError::FormParse(err.to_string())
    }
}

/// Decoded multipart form
#[derive(Debug)]
pub struct ParsedForm {
    pub fields: FormFields,
    pub files: UploadFiles,
    // Removes the spooled files on drop
    _temp_files: Vec<TempPath>,
}

impl ParsedForm {
    /// First value of a text field
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// Read every part of `multipart`, spooling file parts into `temp_dir`.
#[tracing::instrument(skip(multipart), fields(component = "form_parser", operation = "parse_form"))]
pub async fn parse_form(
    mut multipart: Multipart,
    temp_dir: &Path,
) -> Result<ParsedForm, FormParseError> {
    let mut fields = FormFields::new();
    let mut files = UploadFiles::new();
    let mut temp_files = Vec::new();

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        let Some(file_name) = field.file_name().map(str::to_string) else {
            let value = field.text().await?;
            fields.entry(name).or_default().push(value);
            continue;
        };

        let declared_mime = field.content_type().map(str::to_string);
        let (file, path) = tempfile::Builder::new()
            .prefix("harbor-upload-")
            .tempfile_in(temp_dir)?
            .into_parts();
        let mut file = tokio::fs::File::from_std(file);

        let mut size = 0u64;
        while let Some(chunk) = field.chunk().await? {
            file.write_all(&chunk).await?;
            size += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::debug!(
            field = %name,
            file_name = %file_name,
            mime = ?declared_mime,
            size,
            "Spooled uploaded file"
        );

        files.entry(name).or_default().push(IncomingFile {
            temporary_path: path.to_path_buf(),
            original_name: Some(file_name).filter(|n| !n.is_empty()),
            declared_mime,
            declared_size: size,
        });
        temp_files.push(path);
    }

    Ok(ParsedForm {
        fields,
        files,
        _temp_files: temp_files,
    })
}
