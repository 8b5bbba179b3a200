//! Site URL resolution and redirects

pub mod redirect;
pub mod site;

pub use redirect::{redirect, RedirectDirective, TargetKind, UrlOptions};
pub use site::{
    current_request_uri, current_url, resolve_base_url, script_name, site_url,
    DEFAULT_HTTPS_PORT, DEFAULT_HTTP_PORT,
};
