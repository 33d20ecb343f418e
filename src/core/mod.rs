// core logic - module matching, grade lookup, prompt assembly, llm calls

mod ai;
mod grades;
mod matcher;
mod prompt;

pub(crate) use ai::client_for;
pub use ai::{Claude, Gemini, Llm, Provider};
pub use grades::{GradeRecord, Grades};
pub use matcher::ModuleMatcher;
pub use prompt::Prompt;
