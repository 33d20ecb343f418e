// http server - the /chat endpoint the student frontend talks to

use axum::{
    Json, Router,
    extract::State,
    http::HeaderValue,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::{error, info};

use crate::core::client_for;
use crate::{Config, Error, Grades, Llm, ModuleMatcher, Prompt};

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// One stateless pass per message: match module, look up grade, ask the model.
pub struct ChatService {
    matcher: ModuleMatcher,
    grades: Grades,
    llm: Arc<dyn Llm>,
    prompt: Prompt,
}

impl ChatService {
    pub fn new(matcher: ModuleMatcher, grades: Grades, llm: Arc<dyn Llm>, prompt: Prompt) -> Self {
        Self {
            matcher,
            grades,
            llm,
            prompt,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let prompt = Prompt::new(config.lang);

        Self {
            matcher: ModuleMatcher::new(config.modules.iter().cloned()),
            grades: Grades::new(&config.database_url, &config.grades_table, prompt),
            llm: Arc::from(client_for(config)),
            prompt,
        }
    }

    /// Always produces a reply: the model's answer or the fallback string.
    pub async fn respond(&self, message: &str) -> String {
        let module = self.matcher.find(message);
        info!(module = module.unwrap_or("none"), "chat request");

        let summary = self.grades.summary(module).await;
        let prompt = self.prompt.build(&summary, message);

        match self.llm.reply(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "llm call failed");
                self.prompt.unavailable()
            }
        }
    }
}

pub struct Server;

impl Server {
    pub async fn run(config: Config) -> Result<(), Error> {
        config.validate()?;

        info!(
            provider = config.provider.name(),
            model = %config.model,
            modules = config.modules.len(),
            table = %config.grades_table,
            "starting chat service"
        );

        let service = Arc::new(ChatService::from_config(&config));
        let app = Self::router(service, &config.origins)?;

        let addr = format!("{}:{}", config.host, config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        info!("server running at http://{addr}");

        axum::serve(listener, app)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        Ok(())
    }

    pub fn router(service: Arc<ChatService>, origins: &[String]) -> Result<Router, Error> {
        Ok(Router::new()
            .route("/health", get(health))
            .route("/chat", post(chat))
            .layer(cors(origins)?)
            .with_state(service))
    }
}

// credentials rule out wildcards, so methods and headers mirror the request
fn cors(origins: &[String]) -> Result<CorsLayer, Error> {
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|_| Error::Config(format!("'{o}' is not a valid origin")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn chat(
    State(service): State<Arc<ChatService>>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatResponse> {
    Json(ChatResponse {
        reply: service.respond(&req.message).await,
    })
}
