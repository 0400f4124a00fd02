//! Multi-channel × multi-variant fan-out.
//!
//! Every (variant, channel) pair becomes its own `GenerationRequest`. Pairs
//! run concurrently and a bad pair only poisons its own slot.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::generation::channels::find_channel;
use crate::generation::client::CopyGenerator;
use crate::generation::models::{FieldIssue, GenerationRequest, GenerationResponse};
use crate::voice::matrix::VoiceMatrix;

/// Variant name used when the request carries no `variants`.
pub const DEFAULT_VARIANT: &str = "default";

/// Upper bound on channels × variants in one batch.
pub const MAX_BATCH_SLOTS: usize = 24;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchVariant {
    pub name: String,
    pub voice_matrix: Option<VoiceMatrix>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    /// Prompt, brand context, mode and the other fields shared by every slot.
    /// Its `channel` is ignored in favour of `channels`.
    #[serde(flatten)]
    pub shared: GenerationRequest,
    #[serde(default)]
    pub channels: Vec<String>,
    #[serde(default)]
    pub variants: Vec<BatchVariant>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSlot {
    pub variant: String,
    pub channel: String,
    #[serde(flatten)]
    pub response: GenerationResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResponse {
    pub results: Vec<BatchSlot>,
}

impl BatchRequest {
    /// Request-level checks. Per-slot problems are reported inside the slot instead.
    pub fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        if self.shared.prompt_text().is_empty() {
            issues.push(FieldIssue::new("prompt", "Prompt is required"));
        }
        if self.channels.iter().all(|c| c.trim().is_empty()) {
            issues.push(FieldIssue::new("channels", "At least one channel is required"));
        }
        if self.slot_count() > MAX_BATCH_SLOTS {
            issues.push(FieldIssue::new(
                "channels",
                format!("A batch may produce at most {MAX_BATCH_SLOTS} results (channels x variants)"),
            ));
        }
        issues
    }

    fn slot_count(&self) -> usize {
        self.channels.len() * self.variants.len().max(1)
    }

    fn variants(&self) -> Vec<BatchVariant> {
        if self.variants.is_empty() {
            vec![BatchVariant {
                name: DEFAULT_VARIANT.to_string(),
                voice_matrix: self.shared.voice_matrix,
            }]
        } else {
            self.variants.clone()
        }
    }

    /// Expands into one request per slot, variants outermost, in request order.
    /// A slot that cannot run carries the message for its error placeholder.
    fn slot_requests(&self) -> Vec<(String, String, Result<GenerationRequest, String>)> {
        let mut slots = Vec::new();
        for variant in self.variants() {
            for channel_key in &self.channels {
                let request = self.slot_request(&variant, channel_key);
                slots.push((variant.name.clone(), channel_key.clone(), request));
            }
        }
        slots
    }

    fn slot_request(&self, variant: &BatchVariant, channel_key: &str) -> Result<GenerationRequest, String> {
        let channel = find_channel(channel_key)
            .ok_or_else(|| format!("Unknown channel: {}", channel_key.trim()))?;

        let request = GenerationRequest {
            channel: channel.id.to_string(),
            voice_matrix: variant.voice_matrix,
            character_limit: self
                .shared
                .character_limit
                .or(Some(channel.character_limit as i64)),
            ..self.shared.clone()
        };

        let issues = request.validate();
        if issues.is_empty() {
            Ok(request)
        } else {
            Err(issues
                .iter()
                .map(|i| format!("{}: {}", i.field, i.message))
                .collect::<Vec<_>>()
                .join("; "))
        }
    }
}

/// Runs every slot concurrently and returns them in request order.
pub async fn generate_batch(generator: &CopyGenerator, request: &BatchRequest) -> BatchResponse {
    let slots = request.slot_requests();
    info!(
        "Batch generation: {} slot(s), demo={}",
        slots.len(),
        generator.is_demo()
    );

    let futures = slots.into_iter().map(|(variant, channel, slot)| async move {
        let response = match slot {
            Ok(req) => generator.generate(&req).await,
            Err(message) => GenerationResponse::error_slot(&message),
        };
        BatchSlot {
            variant,
            channel,
            response,
        }
    });

    BatchResponse {
        results: futures::future::join_all(futures).await,
    }
}
