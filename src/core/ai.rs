// language model clients - prompt in, reply text out

use crate::Error;
use async_trait::async_trait;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Anything that can answer a fully assembled prompt.
#[async_trait]
pub trait Llm: Send + Sync {
    async fn reply(&self, prompt: &str) -> Result<String, Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Provider {
    #[default]
    Gemini,
    Claude,
}

impl Provider {
    pub fn default_model(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-2.5-flash-lite",
            Provider::Claude => "claude-sonnet-4-20250514",
        }
    }

    /// Env vars checked for the api key, in order.
    pub fn api_key_vars(self) -> &'static [&'static str] {
        match self {
            Provider::Gemini => &["GOOGLE_API_KEY"],
            Provider::Claude => &["ANTHROPIC_API_KEY", "CLAUDE_API_KEY", "CLAUDE_KEY"],
        }
    }

    pub fn api_key_from_env(self) -> Option<String> {
        self.api_key_vars()
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.trim().is_empty())
    }

    pub fn name(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::Claude => "claude",
        }
    }
}

// generation settings shared by both clients
#[derive(Debug, Clone, Copy)]
struct Generation {
    temperature: f32,
    max_output_tokens: u32,
}

// ---------------------------------------------------------------------------
// gemini
// ---------------------------------------------------------------------------

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

pub struct Gemini {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    generation: Generation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GeminiGeneration,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGeneration {
    temperature: f32,
    max_output_tokens: u32,
}

// what gemini sends back
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl Gemini {
    pub fn new(api_key: String, model: String, temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            base_url: GEMINI_API_URL.to_string(),
            generation: Generation {
                temperature,
                max_output_tokens,
            },
        }
    }

    /// Point the client somewhere other than the public api.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl Llm for Gemini {
    async fn reply(&self, prompt: &str) -> Result<String, Error> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GeminiGeneration {
                temperature: self.generation.temperature,
                max_output_tokens: self.generation.max_output_tokens,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error = response.text().await?;
            return Err(Error::Llm(error));
        }

        let response: GeminiResponse = response.json().await?;

        // a reply can be split over several parts
        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        non_empty(text)
    }
}

// ---------------------------------------------------------------------------
// claude
// ---------------------------------------------------------------------------

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct Claude {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    generation: Generation,
}

// what we send to claude
#[derive(Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ClaudeMessage<'a>>,
}

#[derive(Serialize)]
struct ClaudeMessage<'a> {
    role: &'static str,
    content: &'a str,
}

// what claude sends back
#[derive(Deserialize)]
struct ClaudeResponse {
    content: Vec<ClaudeContent>,
}

#[derive(Deserialize)]
struct ClaudeContent {
    #[serde(default)]
    text: String,
}

impl Claude {
    pub fn new(api_key: String, model: String, temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            base_url: ANTHROPIC_API_URL.to_string(),
            generation: Generation {
                temperature,
                max_output_tokens,
            },
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl Llm for Claude {
    async fn reply(&self, prompt: &str) -> Result<String, Error> {
        let request = ClaudeRequest {
            model: &self.model,
            max_tokens: self.generation.max_output_tokens,
            temperature: self.generation.temperature,
            messages: vec![ClaudeMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error = response.text().await?;
            return Err(Error::Llm(error));
        }

        let response: ClaudeResponse = response.json().await?;
        let text = response
            .content
            .into_iter()
            .next()
            .map(|c| c.text)
            .unwrap_or_default();

        non_empty(text)
    }
}

fn non_empty(text: String) -> Result<String, Error> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::Llm("model returned an empty reply".to_string()));
    }
    Ok(text.to_string())
}

/// Builds the client for the configured provider.
pub fn client_for(config: &crate::Config) -> Box<dyn Llm> {
    let (key, model) = (config.api_key.clone(), config.model.clone());

    match config.provider {
        Provider::Gemini => Box::new(Gemini::new(
            key,
            model,
            config.temperature,
            config.max_output_tokens,
        )),
        Provider::Claude => Box::new(Claude::new(
            key,
            model,
            config.temperature,
            config.max_output_tokens,
        )),
    }
}
