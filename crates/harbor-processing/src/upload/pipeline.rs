//! Naming and aggregation shared by the ingestors.

use std::path::Path;

use uuid::Uuid;

use super::types::{IncomingFile, UploadOutcome};

/// What a batch contains, used in outcome messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BatchKind {
    Files,
    Images,
}

impl BatchKind {
    fn label(self) -> &'static str {
        match self {
            BatchKind::Files => "file(s)",
            BatchKind::Images => "image(s)",
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            BatchKind::Files => "All files are successfully uploaded!",
            BatchKind::Images => "All images processed successfully!",
        }
    }
}

/// Extension of the original file name including the dot (`.txt`).
///
/// Dotfiles such as `.bashrc` have no extension.
pub(crate) fn file_extension(original_name: Option<&str>) -> Option<String> {
    let ext = Path::new(original_name?).extension()?.to_str()?;
    if ext.is_empty() {
        return None;
    }
    Some(format!(".{}", ext))
}

/// Final name of a stored file.
///
/// The requested name is only honored for single-file batches; every other
/// file gets a random v4 UUID.
pub(crate) fn target_file_name(
    extension: &str,
    batch_size: usize,
    requested: Option<&str>,
) -> String {
    match requested {
        Some(name) if batch_size == 1 => format!("{}{}", name, extension),
        _ => format!("{}{}", Uuid::new_v4(), extension),
    }
}

/// Fold per-file results (in input order) into an outcome
pub(crate) fn aggregate(
    files: &[IncomingFile],
    results: Vec<Option<String>>,
    kind: BatchKind,
) -> UploadOutcome {
    let total_files = files.len();
    let mut failed = Vec::new();
    let mut uploaded_file_names = Vec::new();

    for (position, (file, result)) in files.iter().zip(results).enumerate() {
        match result {
            Some(name) => uploaded_file_names.push(name),
            None => failed.push(
                file.original_name
                    .clone()
                    .unwrap_or_else(|| (position + 1).to_string()),
            ),
        }
    }

    if failed.is_empty() {
        return UploadOutcome {
            success: true,
            message: kind.success_message().to_string(),
            total_files,
            files_uploaded: total_files,
            uploaded_file_names,
        };
    }

    UploadOutcome {
        success: false,
        message: format!(
            "There was an error while uploading these {}: {}",
            kind.label(),
            failed.join(", ")
        ),
        total_files,
        files_uploaded: total_files - failed.len(),
        uploaded_file_names,
    }
}
