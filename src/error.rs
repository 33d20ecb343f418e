use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM API error: {0}")]
    Llm(String),

    #[error("Missing API key")]
    #[diagnostic(help("pass --api-key or set {0}"))]
    MissingApiKey(&'static str),

    #[error("Missing database url")]
    #[diagnostic(help("pass --db or set DATABASE_URL"))]
    MissingDatabaseUrl,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error: {0}")]
    Server(String),
}
