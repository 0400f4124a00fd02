//! Copy generation client: one model call per request, demo fallback on any failure.
//!
//! Flow: build prompt → model.complete() → parse_response → GenerationResponse.
//! `generate` never fails; callers only see errors from key validation,
//! which happens before a generator is built.

use std::sync::Arc;

use reqwest::Client;
use tracing::{info, warn};

use crate::generation::demo::{demo_response, DemoFlavor};
use crate::generation::models::{GenerationRequest, GenerationResponse};
use crate::generation::parser::parse_response;
use crate::generation::prompts::build_copy_prompt;
use crate::llm_client::{is_usable_key, CopyModel, LlmClient, LlmError};

#[derive(Clone)]
pub struct CopyGenerator {
    /// `None` means demo mode: no network calls at all.
    model: Option<Arc<dyn CopyModel>>,
}

impl CopyGenerator {
    pub fn new(model: Arc<dyn CopyModel>) -> Self {
        Self { model: Some(model) }
    }

    pub fn demo() -> Self {
        Self { model: None }
    }

    /// Live generator when `api_key` is usable, demo otherwise.
    /// Blank keys and the known placeholder keys both count as absent.
    pub fn from_credential(http: Client, api_key: Option<&str>) -> Self {
        match api_key.filter(|key| is_usable_key(key)) {
            Some(key) => match LlmClient::new(http, key) {
                Ok(client) => Self::new(Arc::new(client)),
                Err(_) => Self::demo(),
            },
            None => Self::demo(),
        }
    }

    pub fn is_demo(&self) -> bool {
        self.model.is_none()
    }

    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResponse {
        let Some(model) = &self.model else {
            info!("Generating demo copy for channel {}", request.channel);
            return demo_response(request, DemoFlavor::Standard);
        };

        let prompt = build_copy_prompt(request);
        match model.complete(&prompt).await {
            Ok(raw) => parse_response(&raw, request.character_limit()),
            Err(LlmError::RateLimited { .. }) => {
                warn!("Model quota exceeded, falling back to enhanced demo copy");
                demo_response(request, DemoFlavor::Enhanced)
            }
            Err(e) => {
                warn!("Model call failed, falling back to demo copy: {}", e);
                demo_response(request, DemoFlavor::Standard)
            }
        }
    }
}
