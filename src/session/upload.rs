use crate::api::ApiError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Please select an audio file ({path} is {mime})")]
    NotAudio { path: String, mime: String },

    #[error("Please enter a session title")]
    EmptyTitle,

    #[error("Please select an audio file and ensure you're logged in")]
    NotAuthenticated,

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// MIME type for a file, inferred from its extension
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();

    let mime = match ext.as_str() {
        "mp3" => "audio/mpeg",
        "wav" | "wave" => "audio/wav",
        "flac" => "audio/flac",
        "ogg" | "oga" => "audio/ogg",
        "opus" => "audio/opus",
        "m4a" => "audio/mp4",
        "aac" => "audio/aac",
        "wma" => "audio/x-ms-wma",
        "aif" | "aiff" => "audio/aiff",
        "weba" => "audio/webm",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "txt" | "md" => "text/plain",
        "json" => "application/json",
        "pdf" => "application/pdf",
        _ => return None,
    };

    Some(mime)
}

/// A validated upload, checked before anything touches the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub path: PathBuf,
    pub title: String,
    pub mime: &'static str,
}

impl UploadRequest {
    /// Validate `path` as an audio file and settle the session title
    ///
    /// Without an explicit title the file name minus its extension is used.
    pub fn prepare(path: impl AsRef<Path>, title: Option<&str>) -> Result<Self, UploadError> {
        let path = path.as_ref();

        let mime = match mime_type_for(path) {
            Some(mime) if mime.starts_with("audio/") => mime,
            other => {
                return Err(UploadError::NotAudio {
                    path: path.display().to_string(),
                    mime: other.unwrap_or("application/octet-stream").to_string(),
                })
            }
        };

        let title = match title {
            Some(title) => title.trim().to_string(),
            None => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().trim().to_string())
                .unwrap_or_default(),
        };

        if title.is_empty() {
            return Err(UploadError::EmptyTitle);
        }

        Ok(Self {
            path: path.to_path_buf(),
            title,
            mime,
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string())
    }
}
