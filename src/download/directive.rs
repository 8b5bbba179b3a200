//! Download directive execution

use crate::error::{Error, Result};
use crate::http::sink::{HeaderList, HeaderSink};
use crate::logger;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

/// Response body of a download
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Bytes held in memory
    Content(Vec<u8>),
    /// A file streamed from disk
    File {
        path: PathBuf,
        delete_after_send: bool,
    },
}

/// Everything needed to send a download and then end the response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadDirective {
    headers: HeaderList,
    body: Body,
    filename: String,
    mime: String,
    size: u64,
}

impl DownloadDirective {
    pub(crate) fn new(
        headers: HeaderList,
        body: Body,
        filename: String,
        mime: String,
        size: u64,
    ) -> Self {
        Self {
            headers,
            body,
            filename,
            mime,
            size,
        }
    }

    pub const fn headers(&self) -> &HeaderList {
        &self.headers
    }

    pub const fn body(&self) -> &Body {
        &self.body
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Body size in bytes
    pub const fn size(&self) -> u64 {
        self.size
    }

    pub fn into_parts(self) -> (HeaderList, Body) {
        (self.headers, self.body)
    }

    /// Emit the header lines in order
    pub fn emit_headers(&self, sink: &mut impl HeaderSink) {
        self.headers.replay(sink);
    }

    /// Flush `out`, write the body, then delete the source file if asked
    ///
    /// The file is removed only after every byte has been written and
    /// flushed; any write error leaves it in place. Returns the number of
    /// body bytes written.
    pub fn write_body<W: Write>(self, out: &mut W) -> Result<u64> {
        out.flush()?;

        match self.body {
            Body::Content(bytes) => {
                out.write_all(&bytes)?;
                out.flush()?;
                Ok(bytes.len() as u64)
            }
            Body::File {
                path,
                delete_after_send,
            } => {
                let mut file = File::open(&path).map_err(|source| Error::FileNotFound {
                    path: path.clone(),
                    source,
                })?;
                let written = io::copy(&mut file, out)?;
                out.flush()?;
                drop(file);

                if delete_after_send {
                    if let Err(e) = fs::remove_file(&path) {
                        logger::log_error(&format!(
                            "Failed to remove sent file '{}': {e}",
                            path.display()
                        ));
                        return Err(e.into());
                    }
                }
                Ok(written)
            }
        }
    }

    /// Emit headers into `sink`, then write the body to `out`
    pub fn send<W: Write>(self, sink: &mut impl HeaderSink, out: &mut W) -> Result<u64> {
        self.emit_headers(sink);
        self.write_body(out)
    }
}
