// ESG disclosure generation.
// Prompt construction and response interpretation are pure; the generator
// is the only place that talks to the completion provider or the history log.

pub mod generator;
pub mod handlers;
pub mod history;
pub mod interpreter;
pub mod prompts;
