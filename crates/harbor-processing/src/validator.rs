//! Upload validation
//!
//! Checks an upload group against its [`UploadConfiguration`]: file count,
//! per-file size, allow-listed and dangerous MIME types. The first failing
//! rule decides the rejection message.

use crate::mime::{is_dangerous, normalize_mime_type};
use crate::sanitize::sanitize_file_name;
use crate::upload::{IncomingFile, UploadConfiguration, UploadFiles, ValidationResult, VettedUpload};

pub const VALIDATION_SUCCESS_MESSAGE: &str = "All files are successfully verified!";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("No files to upload!")]
    NoFiles,

    #[error("Maximum number of files reached! The limit is {limit}")]
    TooManyFiles { limit: u32, count: usize },

    #[error("File is too large! Max size: {} MB", megabytes(.max_bytes))]
    FileTooLarge { size: u64, max_bytes: u64 },

    #[error("Invalid file format!")]
    InvalidFormat { mime: String },

    #[error("File type is not allowed!")]
    DangerousType { mime: String },
}

fn megabytes(bytes: &u64) -> String {
    format!("{:.2}", *bytes as f64 / (1024.0 * 1024.0))
}

/// Validator for one upload group
pub struct UploadValidator<'a> {
    config: &'a UploadConfiguration,
}

impl<'a> UploadValidator<'a> {
    pub fn new(config: &'a UploadConfiguration) -> Self {
        Self { config }
    }

    /// Validate and return the vetted files
    pub fn check(&self, files: &UploadFiles) -> Result<VettedUpload, ValidationError> {
        let selected = self.select(files);
        if selected.is_empty() {
            return Err(ValidationError::NoFiles);
        }

        let limit = self.config.settings.max_files.get();
        if selected.len() > limit as usize {
            return Err(ValidationError::TooManyFiles {
                limit,
                count: selected.len(),
            });
        }

        let max_bytes = self.config.settings.max_size_bytes();
        for file in &selected {
            self.check_file(file, max_bytes)?;
        }

        Ok(VettedUpload {
            files: selected,
            sanitized_file_name: self.sanitized_file_name(),
        })
    }

    /// Validate and fold the outcome into a [`ValidationResult`]
    #[tracing::instrument(
        skip(self, files),
        fields(component = "upload_validator", operation = "validate")
    )]
    pub fn validate(&self, files: &UploadFiles) -> ValidationResult {
        match self.check(files) {
            Ok(vetted) => ValidationResult {
                success: true,
                message: VALIDATION_SUCCESS_MESSAGE.to_string(),
                sanitized_file_name: vetted.sanitized_file_name,
                vetted_files: Some(vetted.files),
            },
            Err(err) => {
                match &err {
                    ValidationError::DangerousType { mime } => {
                        tracing::warn!(mime = %mime, "Rejected upload with dangerous MIME type");
                    }
                    other => {
                        tracing::debug!(reason = ?other, "Upload rejected");
                    }
                }
                ValidationResult {
                    success: false,
                    message: err.to_string(),
                    sanitized_file_name: None,
                    vetted_files: None,
                }
            }
        }
    }

    fn select(&self, files: &UploadFiles) -> Vec<IncomingFile> {
        match &self.config.settings.field_name {
            Some(field) => files.get(field).cloned().unwrap_or_default(),
            None => files.values().flatten().cloned().collect(),
        }
    }

    fn check_file(&self, file: &IncomingFile, max_bytes: u64) -> Result<(), ValidationError> {
        if file.declared_size >= max_bytes {
            return Err(ValidationError::FileTooLarge {
                size: file.declared_size,
                max_bytes,
            });
        }

        // No declared type: nothing to check against
        let Some(mime) = file
            .declared_mime
            .as_deref()
            .filter(|mime| !mime.trim().is_empty())
        else {
            return Ok(());
        };

        if let Some(allowed) = &self.config.allowed_types {
            let normalized = normalize_mime_type(mime);
            if !allowed.iter().any(|t| normalize_mime_type(t) == normalized) {
                return Err(ValidationError::InvalidFormat {
                    mime: mime.to_string(),
                });
            }
        }

        if is_dangerous(mime) {
            return Err(ValidationError::DangerousType {
                mime: mime.to_string(),
            });
        }

        Ok(())
    }

    fn sanitized_file_name(&self) -> Option<String> {
        self.config
            .settings
            .file_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(sanitize_file_name)
            .filter(|name| !name.is_empty())
    }
}

/// Validate `files` against `config`
pub fn validate_upload(files: &UploadFiles, config: &UploadConfiguration) -> ValidationResult {
    UploadValidator::new(config).validate(files)
}
