// startup configuration - built once, handed to each component

use crate::{Error, Provider};
use clap::ValueEnum;

/// Module names recognised in student messages, highest priority first.
pub const DEFAULT_MODULES: [&str; 7] = [
    "sécurité informatique",
    "cloud computing",
    "gestion de projet",
    "systèmes distribués",
    "développement web",
    "langue anglaise",
    "compilation",
];

/// Frontends allowed to call the api from a browser.
pub const DEFAULT_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "http://127.0.0.1:8000",
    "https://ifagation.vercel.app",
];

pub const DEFAULT_TABLE: &str = "notes";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 200;

/// Language used for the persona, lookup summaries and fallback replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Lang {
    #[default]
    En,
    Fr,
}

// no Debug on purpose: it would print the api key
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub modules: Vec<String>,
    pub grades_table: String,
    pub origins: Vec<String>,
    pub lang: Lang,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Config with every optional setting at its default.
    pub fn new(database_url: String, provider: Provider, api_key: String) -> Self {
        Self {
            database_url,
            provider,
            api_key,
            model: provider.default_model().to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            modules: DEFAULT_MODULES.iter().map(|m| m.to_string()).collect(),
            grades_table: DEFAULT_TABLE.to_string(),
            origins: DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
            lang: Lang::default(),
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.database_url.trim().is_empty() {
            return Err(Error::MissingDatabaseUrl);
        }

        if self.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey(self.provider.api_key_vars()[0]));
        }

        if self.modules.iter().all(|m| m.trim().is_empty()) {
            return Err(Error::Config("module list is empty".to_string()));
        }

        if !is_table_name(&self.grades_table) {
            return Err(Error::Config(format!(
                "'{}' is not a valid table name",
                self.grades_table
            )));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::Config(format!(
                "temperature {} is outside 0.0..=2.0",
                self.temperature
            )));
        }

        if self.max_output_tokens == 0 {
            return Err(Error::Config("max output tokens must be positive".to_string()));
        }

        for origin in &self.origins {
            if origin.parse::<axum::http::HeaderValue>().is_err() {
                return Err(Error::Config(format!("'{origin}' is not a valid origin")));
            }
        }

        Ok(())
    }
}

/// Splits a comma separated list, dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// the table name is spliced into sql, so only plain identifiers get through
fn is_table_name(name: &str) -> bool {
    let ident = |s: &str| {
        let mut chars = s.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    };

    match name.split_once('.') {
        Some((schema, table)) => ident(schema) && ident(table),
        None => ident(name),
    }
}
