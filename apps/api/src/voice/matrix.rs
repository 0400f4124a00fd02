//! Brand voice matrix: nine bounded sliders describing how copy should sound.
//!
//! This is the only voice schema the service accepts. The older seven-axis
//! "formal/casual" shape is not converted; callers must send these nine axes.

use serde::{Deserialize, Serialize};

/// Inclusive bound for every axis.
pub const AXIS_MIN: f64 = -1.0;
pub const AXIS_MAX: f64 = 1.0;

/// Nine-axis brand voice. Missing axes deserialize to `0.0` (the neutral band).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoiceMatrix {
    /// Straightforward (+) vs nuanced (-).
    pub directness: f64,
    /// Globally accessible (+) vs niche (-).
    pub universality: f64,
    /// Confident (+) vs humble (-).
    pub authority: f64,
    /// Elevated/juxtaposed (+) vs everyday language (-).
    pub tension: f64,
    /// Deep insight (+) vs minimal context (-).
    pub education: f64,
    /// Staccato/varied cadence (+) vs standard flow (-).
    pub rhythm: f64,
    /// Insider community language (+) vs premium language (-).
    pub sneaker_culture: f64,
    /// Traditional retail language (+) vs pure factual (-).
    pub marketplace_accuracy: f64,
    /// Candid/technical (+) vs expressive/editorial (-).
    pub expressive_candid: f64,
}

/// Names each axis so validation errors and prompts can refer to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceAxis {
    Directness,
    Universality,
    Authority,
    Tension,
    Education,
    Rhythm,
    SneakerCulture,
    MarketplaceAccuracy,
    ExpressiveCandid,
}

impl VoiceAxis {
    pub const ALL: [VoiceAxis; 9] = [
        VoiceAxis::Directness,
        VoiceAxis::Universality,
        VoiceAxis::Authority,
        VoiceAxis::Tension,
        VoiceAxis::Education,
        VoiceAxis::Rhythm,
        VoiceAxis::SneakerCulture,
        VoiceAxis::MarketplaceAccuracy,
        VoiceAxis::ExpressiveCandid,
    ];

    /// Wire name of the axis (camelCase, as it appears in request bodies).
    pub fn key(self) -> &'static str {
        match self {
            VoiceAxis::Directness => "directness",
            VoiceAxis::Universality => "universality",
            VoiceAxis::Authority => "authority",
            VoiceAxis::Tension => "tension",
            VoiceAxis::Education => "education",
            VoiceAxis::Rhythm => "rhythm",
            VoiceAxis::SneakerCulture => "sneakerCulture",
            VoiceAxis::MarketplaceAccuracy => "marketplaceAccuracy",
            VoiceAxis::ExpressiveCandid => "expressiveCandid",
        }
    }
}

impl VoiceMatrix {
    pub fn value(&self, axis: VoiceAxis) -> f64 {
        match axis {
            VoiceAxis::Directness => self.directness,
            VoiceAxis::Universality => self.universality,
            VoiceAxis::Authority => self.authority,
            VoiceAxis::Tension => self.tension,
            VoiceAxis::Education => self.education,
            VoiceAxis::Rhythm => self.rhythm,
            VoiceAxis::SneakerCulture => self.sneaker_culture,
            VoiceAxis::MarketplaceAccuracy => self.marketplace_accuracy,
            VoiceAxis::ExpressiveCandid => self.expressive_candid,
        }
    }

    /// Axes whose value is outside `[-1, 1]` (NaN counts as outside).
    pub fn out_of_range(&self) -> Vec<VoiceAxis> {
        VoiceAxis::ALL
            .into_iter()
            .filter(|&axis| !(AXIS_MIN..=AXIS_MAX).contains(&self.value(axis)))
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Presets
// ────────────────────────────────────────────────────────────────────────────

pub const EDITORIAL: VoiceMatrix = VoiceMatrix {
    directness: 0.7,
    universality: 0.4,
    authority: 0.8,
    tension: 0.9,
    education: 0.8,
    rhythm: 0.9,
    sneaker_culture: 0.3,
    marketplace_accuracy: -0.6,
    expressive_candid: -0.8,
};

pub const SOCIAL: VoiceMatrix = VoiceMatrix {
    directness: 0.6,
    universality: 0.7,
    authority: 0.6,
    tension: 0.5,
    education: 0.4,
    rhythm: 0.6,
    sneaker_culture: 0.6,
    marketplace_accuracy: -0.4,
    expressive_candid: -0.3,
};

pub const PRODUCT_DESCRIPTION: VoiceMatrix = VoiceMatrix {
    directness: 0.8,
    universality: 0.6,
    authority: 0.7,
    tension: 0.3,
    education: 0.6,
    rhythm: 0.4,
    sneaker_culture: 0.1,
    marketplace_accuracy: -0.8,
    expressive_candid: 0.2,
};

pub const TECHNICAL: VoiceMatrix = VoiceMatrix {
    directness: 0.9,
    universality: 0.5,
    authority: 0.8,
    tension: 0.1,
    education: 0.7,
    rhythm: 0.2,
    sneaker_culture: -0.3,
    marketplace_accuracy: -0.9,
    expressive_candid: 0.8,
};

/// Named presets, in display order.
pub fn presets() -> [(&'static str, VoiceMatrix); 4] {
    [
        ("editorial", EDITORIAL),
        ("social", SOCIAL),
        ("productDescription", PRODUCT_DESCRIPTION),
        ("technical", TECHNICAL),
    ]
}
