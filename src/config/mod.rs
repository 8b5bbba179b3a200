// Configuration module entry point
// Loads site configuration and builds the collaborators it describes

mod types;

pub use types::{Config, DownloadConfig, LoggingConfig, MimeConfig, SiteConfig};

use crate::env::Environment;
use crate::http::mime::AliasTable;
use crate::http::sniff::MagicProber;
use crate::negotiation::{parse_accept_language_or, LanguagePreference};

impl Config {
    /// Load configuration from specified file path (without extension)
    /// A missing file is not an error; defaults and `SITEKIT__*` variables apply
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SITEKIT").separator("__"))
            .set_default("site.default_language", "en")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "common")?
            .set_default("download.fallback_type", "application/octet-stream")?
            .build()?;

        settings.try_deserialize()
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> crate::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Built-in MIME aliases plus the configured ones
    pub fn alias_table(&self) -> AliasTable {
        AliasTable::new().with_aliases(&self.mime.aliases)
    }

    /// Content prober using the configured fallback type
    pub fn prober(&self) -> MagicProber {
        MagicProber::new(self.download.fallback_type.clone())
    }

    /// Accept-Language of `env`, falling back to the configured language
    pub fn accept_language(&self, env: &Environment) -> Vec<LanguagePreference> {
        parse_accept_language_or(env.header("accept-language"), &self.site.default_language)
    }
}
