//! Files sent to the Bot API.
//!
//! A file is either already on Telegram's servers ([`InputFile::FileId`], sent
//! as a plain parameter) or local ([`InputFile::Path`], [`InputFile::Memory`]),
//! in which case the whole request switches to a multipart upload.

use std::io;
use std::path::{Path, PathBuf};

use crate::transport::Part;

/// Content type used when the file name says nothing useful.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// A file argument for `send_photo`, `send_document`, `set_webhook`, ...
#[derive(Clone, Debug, PartialEq)]
pub enum InputFile {
    /// A `file_id` of a file already stored on Telegram's servers.
    FileId(String),
    /// A local file, read when the request is built.
    Path(PathBuf),
    /// File contents already in memory. `name` drives the MIME guess.
    Memory { name: String, bytes: Vec<u8> },
}

impl InputFile {
    pub fn id(file_id: impl Into<String>) -> Self {
        Self::FileId(file_id.into())
    }

    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn memory(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::Memory { name: name.into(), bytes: bytes.into() }
    }

    /// Whether sending this file needs a multipart upload.
    pub fn is_upload(&self) -> bool {
        !matches!(self, Self::FileId(_))
    }

    /// Turns the file into a request parameter, reading local files.
    pub(crate) async fn into_part(self) -> io::Result<Part> {
        match self {
            Self::FileId(id) => Ok(Part::Text(id)),
            Self::Memory { name, bytes } => Ok(Part::File(FilePart::new(name, bytes))),
            Self::Path(path) => {
                let bytes = tokio::fs::read(&path).await?;
                Ok(Part::File(FilePart::new(file_name_of(&path), bytes)))
            }
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_owned())
}

// ─── FilePart ─────────────────────────────────────────────────────────────────

/// A file field of a multipart upload.
#[derive(Clone, Debug, PartialEq)]
pub struct FilePart {
    pub file_name: String,
    pub bytes:     Vec<u8>,
    pub mime_type: String,
}

impl FilePart {
    /// Builds a part, guessing the MIME type from `file_name`.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = guess_mime_type(&file_name);
        Self { file_name, bytes, mime_type }
    }
}

/// Best-effort MIME type from a file name's extension.
pub fn guess_mime_type(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first()
        .map(|m| m.essence_str().to_owned())
        .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_from_extension() {
        assert_eq!(guess_mime_type("cat.jpg"), "image/jpeg");
        assert_eq!(guess_mime_type("doc.pdf"), "application/pdf");
        assert_eq!(guess_mime_type("README"), DEFAULT_MIME_TYPE);
        assert_eq!(guess_mime_type("blob.unknownext"), DEFAULT_MIME_TYPE);
    }

    #[tokio::test]
    async fn file_id_stays_a_plain_parameter() {
        let file = InputFile::id("AgADBAAD");
        assert!(!file.is_upload());
        assert_eq!(file.into_part().await.unwrap(), Part::Text("AgADBAAD".into()));
    }

    #[tokio::test]
    async fn memory_file_becomes_upload() {
        let part = InputFile::memory("song.mp3", vec![1, 2, 3]).into_part().await.unwrap();
        match part {
            Part::File(f) => {
                assert_eq!(f.file_name, "song.mp3");
                assert_eq!(f.mime_type, "audio/mpeg");
                assert_eq!(f.bytes, [1, 2, 3]);
            }
            other => panic!("expected file part, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_path_is_io_error() {
        let err = InputFile::path("/definitely/not/here.png").into_part().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
