// ifaghelper library - student chat backend with grade lookup

pub mod cli;
mod config;
mod core;
mod error;
mod logging;
mod server;

pub use config::{Config, Lang};
pub use core::{Claude, Gemini, GradeRecord, Grades, Llm, ModuleMatcher, Prompt, Provider};
pub use error::Error;
pub use logging::init_logging;
pub use server::{ChatRequest, ChatResponse, ChatService, Server};
