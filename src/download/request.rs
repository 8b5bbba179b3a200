//! Download request description

use std::path::PathBuf;

/// Where the download body comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// An existing file on disk
    File(PathBuf),
    /// In-memory bytes, offered to the client under `name`
    Content { name: String, bytes: Vec<u8> },
}

/// What to send and how to present it to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub source: Source,
    /// Full MIME type (contains `/`) or a short alias such as `pdf`
    pub mime_type: Option<String>,
    /// Client-facing filename for file sources (ignored for content)
    pub filename: Option<String>,
    /// Display in the browser instead of offering an attachment
    pub inline: bool,
    /// Remove a file source once it has been written out completely
    pub delete_after_send: bool,
}

impl DownloadRequest {
    fn with_source(source: Source) -> Self {
        Self {
            source,
            mime_type: None,
            filename: None,
            inline: false,
            delete_after_send: false,
        }
    }

    /// Send the file at `path`
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::with_source(Source::File(path.into()))
    }

    /// Send `bytes` as a file called `name`
    pub fn content(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::with_source(Source::Content {
            name: name.into(),
            bytes: bytes.into(),
        })
    }

    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    #[must_use]
    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    #[must_use]
    pub fn delete_after_send(mut self, delete: bool) -> Self {
        self.delete_after_send = delete;
        self
    }
}
