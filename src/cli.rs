// command line interface

use crate::config::{
    DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODULES, DEFAULT_ORIGINS, DEFAULT_TABLE,
    DEFAULT_TEMPERATURE, split_list,
};
use crate::{Config, Error, Lang, Provider, Server};
use clap::Parser;
use miette::Result;

#[derive(Parser)]
#[command(
    name = "ifaghelper",
    about = "Student assistant api: answers questions with grades in context"
)]
struct Cli {
    /// database connection url
    #[arg(long, short, env = "DATABASE_URL")]
    db: Option<String>,

    /// ai provider (gemini, claude)
    #[arg(long, short = 'p', default_value = "gemini")]
    provider: Provider,

    /// api key for the ai provider (default: GOOGLE_API_KEY or ANTHROPIC_API_KEY)
    #[arg(long, short = 'k')]
    api_key: Option<String>,

    /// model name (default depends on the provider)
    #[arg(long, short)]
    model: Option<String>,

    /// sampling temperature
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,

    /// cap on reply length, in tokens
    #[arg(long, default_value_t = DEFAULT_MAX_OUTPUT_TOKENS)]
    max_output_tokens: u32,

    /// known modules, comma separated, highest priority first
    #[arg(long, env = "KNOWN_MODULES")]
    modules: Option<String>,

    /// table holding module_name, grade, coefficient
    #[arg(long, env = "GRADES_TABLE", default_value = DEFAULT_TABLE)]
    grades_table: String,

    /// allowed cors origins, comma separated
    #[arg(long, env = "ALLOWED_ORIGINS")]
    origins: Option<String>,

    /// language of the persona and canned replies
    #[arg(long, env = "REPLY_LANG", default_value = "en")]
    lang: Lang,

    /// host to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// port number
    #[arg(long, default_value = "8000")]
    port: u16,
}

impl Cli {
    fn into_config(self) -> Result<Config, Error> {
        let db = self
            .db
            .filter(|d| !d.trim().is_empty())
            .ok_or(Error::MissingDatabaseUrl)?;

        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.provider.api_key_from_env())
            .ok_or(Error::MissingApiKey(self.provider.api_key_vars()[0]))?;

        let mut config = Config::new(db, self.provider, api_key);

        if let Some(model) = self.model {
            config.model = model;
        }
        config.temperature = self.temperature;
        config.max_output_tokens = self.max_output_tokens;
        config.modules = match self.modules {
            Some(raw) => split_list(&raw),
            None => DEFAULT_MODULES.iter().map(|m| m.to_string()).collect(),
        };
        config.grades_table = self.grades_table;
        config.origins = match self.origins {
            Some(raw) => split_list(&raw),
            None => DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };
        config.lang = self.lang;
        config.host = self.host;
        config.port = self.port;

        config.validate()?;
        Ok(config)
    }
}

pub async fn run() -> Result<()> {
    crate::init_logging();

    let config = Cli::parse().into_config()?;
    Ok(Server::run(config).await?)
}
