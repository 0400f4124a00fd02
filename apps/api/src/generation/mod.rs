// Copy generation: prompt assembly, the model call with demo fallback,
// reply parsing, and batch fan-out.
// All model calls go through llm_client; no direct Gemini calls here.

pub mod batch;
pub mod channels;
pub mod client;
pub mod demo;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod prompts;
