//! File storage for donation images, prescriptions and profile pictures.
//!
//! Files land under the configured upload root, segmented by role
//! subdirectory. A database update and the matching file write are not
//! transactional; a failed delete of a replaced file is logged and accepted.

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

use crate::config;

/// Placeholder image name that never corresponds to an uploaded file
pub const DEFAULT_IMAGE: &str = "default.png";

const TOKEN_LEN: usize = 12;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("unsupported file type '{0}'")]
    UnsupportedExtension(String),

    #[error("uploaded file exceeds the {0} byte limit")]
    TooLarge(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// What the upload is for; determines the extension allow-list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Prescription,
}

impl UploadKind {
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            UploadKind::Image => &["png", "jpg", "jpeg", "gif"],
            UploadKind::Prescription => &["png", "jpg", "jpeg", "gif", "pdf"],
        }
    }
}

/// Check the original filename against the allow-list, returning the
/// lowercased extension
pub fn validate_extension(kind: UploadKind, original_name: &str) -> Result<String, UploadError> {
    let ext = original_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .ok_or_else(|| UploadError::UnsupportedExtension(original_name.to_string()))?;

    if kind.allowed_extensions().contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(UploadError::UnsupportedExtension(ext))
    }
}

/// Collision-resistant stored name: owner id + random token + extension
pub fn generate_filename(owner_id: Uuid, ext: &str) -> String {
    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect();
    format!("{}_{}.{}", owner_id.simple(), token, ext)
}

/// Absolute location of a stored file under the upload root
pub fn storage_path(subdir: &str, filename: &str) -> PathBuf {
    PathBuf::from(&config::config().uploads.root_dir)
        .join(subdir)
        .join(filename)
}

/// Validate, name and persist an uploaded file. Returns the stored filename
/// to record on the owning row.
pub async fn store(
    kind: UploadKind,
    subdir: &str,
    owner_id: Uuid,
    original_name: &str,
    bytes: &[u8],
) -> Result<String, UploadError> {
    let max_bytes = config::config().uploads.max_upload_bytes;
    if bytes.len() > max_bytes {
        return Err(UploadError::TooLarge(max_bytes));
    }

    let ext = validate_extension(kind, original_name)?;
    let filename = generate_filename(owner_id, &ext);

    let dir = PathBuf::from(&config::config().uploads.root_dir).join(subdir);
    tokio::fs::create_dir_all(&dir).await?;
    tokio::fs::write(dir.join(&filename), bytes).await?;

    tracing::info!("Stored upload {}/{} ({} bytes)", subdir, filename, bytes.len());
    Ok(filename)
}

/// Best-effort removal of a replaced file. The sentinel default is never a
/// real upload; deletion failures are logged, not escalated.
pub async fn remove_previous(subdir: &str, previous: Option<&str>) {
    let Some(name) = previous else { return };
    if name == DEFAULT_IMAGE {
        return;
    }

    let path = storage_path(subdir, name);
    if let Err(e) = tokio::fs::remove_file(&path).await {
        tracing::warn!("Failed to delete replaced file {}: {}", path.display(), e);
    }
}
