//! HTTP protocol layer module
//!
//! Header sinks, MIME lookup and sniffing, header presets, and the hyper
//! adapters that turn directives into responses.

pub mod mime;
pub mod output;
pub mod request;
pub mod response;
pub mod sink;
pub mod sniff;

// Re-export commonly used types
pub use mime::{AliasTable, MimeLookup};
pub use request::environment_from_request;
pub use response::{
    build_404_response, build_500_response, build_download_response, build_error_response,
    build_redirect_response, build_redirect_response_with_code, DownloadBody,
};
pub use sink::{FnSink, HeaderList, HeaderSink};
pub use sniff::{ContentProber, MagicProber};
