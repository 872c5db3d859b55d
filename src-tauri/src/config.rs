//! Application configuration loaded from `billing.toml`.
//!
//! The file is looked up in the per-user config directory
//! (`~/.config/gem-billing/billing.toml` on Linux). When it is absent the
//! built-in [`AppConfig::default`] is used. `config/default.toml` is the same
//! configuration written out as a sample to copy.

use std::path::Path;

/// [`AppConfig::default`] as TOML, compiled in as the sample file.
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// File name inside the application config directory.
pub const CONFIG_FILE: &str = "billing.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Read(String),
    #[error("config parse error: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// A named phone contact printed in the letterhead.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

/// `[letterhead]`: seller details printed on every invoice.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Letterhead {
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub web: String,
    #[serde(default)]
    pub email: String,
    /// Seller GSTIN.
    #[serde(default)]
    pub tax_id: String,
    /// Invocation lines centred above the business name.
    #[serde(default)]
    pub blessings: Vec<String>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    pub document_title: String,
    #[serde(default)]
    pub footer_note: String,
    pub signatory: String,
}

/// `[preview]`: cosmetic preview behaviour.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PreviewConfig {
    /// Delay before the frontend is told to scroll to the preview.
    pub scroll_delay_ms: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            scroll_delay_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    pub letterhead: Letterhead,
    #[serde(default)]
    pub preview: PreviewConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let contact = |name: &str, phone: &str| Contact {
            name: name.to_string(),
            phone: phone.to_string(),
        };
        Self {
            letterhead: Letterhead {
                name: "RASHMI GEMS".to_string(),
                tagline: "PRECIOUS & SEMI PRECIOUS STONES".to_string(),
                address: "2019, Pitelyon Ka Chowk, Johari Bazar, Jaipur -302003 (Raj.) INDIA"
                    .to_string(),
                web: "www.rashmigems.com".to_string(),
                email: "rashmigemsjpr@gmail.com".to_string(),
                tax_id: "08BQBPR6927D1ZP".to_string(),
                blessings: vec![
                    "|| श्रीराज श्यामा जी सदा सहायते ||".to_string(),
                    "|| प्रणामजी ||".to_string(),
                ],
                contacts: vec![
                    contact("Vimal Patel", "9351115678"),
                    contact("Dixit Patel", "9571079175"),
                ],
                document_title: "APPROVAL MEMO / TAX INVOICE".to_string(),
                footer_note: "E. & O. E.".to_string(),
                signatory: "Authorized Signatory".to_string(),
            },
            preview: PreviewConfig::default(),
        }
    }
}

/// Parse a TOML string into an [`AppConfig`], running validation.
pub fn parse(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let cfg: AppConfig = toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&cfg)?;
    Ok(cfg)
}

/// The built-in configuration.
pub fn builtin() -> AppConfig {
    AppConfig::default()
}

/// Load `<config_dir>/billing.toml`, falling back to [`builtin`] when the
/// file does not exist. A file that exists but is unreadable or invalid is
/// an error rather than being silently ignored.
pub fn load(config_dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = config_dir.join(CONFIG_FILE);
    match std::fs::read_to_string(&path) {
        Ok(text) => parse(&text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(builtin()),
        Err(e) => Err(ConfigError::Read(format!("{}: {e}", path.display()))),
    }
}

fn validate(cfg: &AppConfig) -> Result<(), ConfigError> {
    if cfg.letterhead.name.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "letterhead.name must not be empty".to_string(),
        ));
    }
    if cfg.letterhead.document_title.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "letterhead.document_title must not be empty".to_string(),
        ));
    }
    if cfg.preview.scroll_delay_ms > 5_000 {
        return Err(ConfigError::Invalid(
            "preview.scroll_delay_ms must be at most 5000".to_string(),
        ));
    }
    Ok(())
}
