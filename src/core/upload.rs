//! Image upload handling.
//!
//! An upload is accepted when its filename has an extension from the configured
//! allow-list. Accepted files are written under a sanitized name into the upload
//! directory and the caller gets back the relative `image_url` to store on the
//! product. Rejections are returned as values, never as errors, so callers can
//! decide how to report them; only filesystem failures are errors.

use crate::{config::UploadSettings, errors::Result};
use std::fmt;

/// Result of handing a candidate file to [`store_image`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The file was written and can be referenced by `image_url`
    Stored {
        /// Relative path to store on the product
        image_url: String,
    },
    /// Nothing was written
    Rejected {
        /// Why the file was not accepted
        reason: RejectionReason,
    },
}

/// Why an upload was not stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// No file (or a file without a name) was submitted
    Missing,
    /// The extension is not in the allow-list
    DisallowedExtension {
        /// The submitted filename
        filename: String,
    },
    /// Nothing usable was left after sanitizing the filename
    UnsafeFilename {
        /// The submitted filename
        filename: String,
    },
}

impl UploadOutcome {
    /// The stored image path, if the upload was accepted.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        match self {
            Self::Stored { image_url } => Some(image_url),
            Self::Rejected { .. } => None,
        }
    }

    /// The rejection reason, unless nothing was submitted at all.
    ///
    /// A missing file is the normal "keep/leave the image empty" case, so it is
    /// not worth telling the user about.
    #[must_use]
    pub fn notable_rejection(&self) -> Option<&RejectionReason> {
        match self {
            Self::Rejected {
                reason: RejectionReason::Missing,
            }
            | Self::Stored { .. } => None,
            Self::Rejected { reason } => Some(reason),
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "no image was uploaded"),
            Self::DisallowedExtension { filename } => {
                write!(f, "'{filename}' is not an allowed image type")
            }
            Self::UnsafeFilename { filename } => {
                write!(f, "'{filename}' is not a usable file name")
            }
        }
    }
}

/// Checks that `filename` has an extension and that it is in `allowed`.
///
/// The comparison is case-insensitive; only the part after the last `.` counts.
#[must_use]
pub fn is_allowed(filename: &str, allowed: &[String]) -> bool {
    filename.rsplit_once('.').is_some_and(|(_, ext)| {
        let ext = ext.to_ascii_lowercase();
        allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext))
    })
}

/// Reduces a client-supplied filename to something safe to join onto the
/// upload directory.
///
/// Path separators become word breaks, non-ASCII characters are dropped,
/// whitespace runs collapse to `_`, anything outside `[A-Za-z0-9_.-]` is
/// removed and leading/trailing dots and underscores are trimmed. The result
/// can be empty.
#[must_use]
pub fn secure_filename(filename: &str) -> String {
    let spaced: String = filename
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Validates and, if accepted, writes an uploaded image to the upload directory.
///
/// # Errors
/// Returns an error only if the upload directory cannot be created or the file
/// cannot be written. Unacceptable files come back as [`UploadOutcome::Rejected`].
pub async fn store_image(
    settings: &UploadSettings,
    filename: Option<&str>,
    bytes: &[u8],
) -> Result<UploadOutcome> {
    let Some(filename) = filename.filter(|name| !name.is_empty()) else {
        return Ok(UploadOutcome::Rejected {
            reason: RejectionReason::Missing,
        });
    };

    if !is_allowed(filename, &settings.allowed_extensions) {
        tracing::warn!("Rejected upload '{}': extension not allowed", filename);
        return Ok(UploadOutcome::Rejected {
            reason: RejectionReason::DisallowedExtension {
                filename: filename.to_string(),
            },
        });
    }

    let safe_name = secure_filename(filename);
    if !is_allowed(&safe_name, &settings.allowed_extensions) {
        tracing::warn!("Rejected upload '{}': unusable after sanitizing", filename);
        return Ok(UploadOutcome::Rejected {
            reason: RejectionReason::UnsafeFilename {
                filename: filename.to_string(),
            },
        });
    }

    tokio::fs::create_dir_all(&settings.dir).await?;
    let path = settings.dir.join(&safe_name);
    tokio::fs::write(&path, bytes).await?;
    tracing::info!("Stored upload '{}' at {:?}", filename, path);

    Ok(UploadOutcome::Stored {
        image_url: format!("{}/{}", settings.url_prefix.trim_end_matches('/'), safe_name),
    })
}
