//! Voice prompt: compiles a `VoiceMatrix` into natural-language tone instructions.
//!
//! Every axis is bucketed into five bands and each band maps to a fixed phrase.
//! The phrase tables are part of the model-facing contract; change them only
//! together with the tests below.

use crate::voice::matrix::{VoiceAxis, VoiceMatrix};

/// Discrete band for a slider value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    StrongHigh,
    High,
    Neutral,
    Low,
    StrongLow,
}

impl Band {
    /// `> 0.5`, `(0, 0.5]`, `0`, `[-0.5, 0)`, `< -0.5`. Exactly zero and non-finite
    /// values are neutral.
    pub fn of(value: f64) -> Self {
        if value > 0.5 {
            Band::StrongHigh
        } else if value > 0.0 {
            Band::High
        } else if value < -0.5 {
            Band::StrongLow
        } else if value < 0.0 {
            Band::Low
        } else {
            Band::Neutral
        }
    }
}

/// One phrase per band for a single axis.
#[derive(Debug, Clone, Copy)]
pub struct AxisPhrases {
    pub label: &'static str,
    pub strong_high: &'static str,
    pub high: &'static str,
    pub neutral: &'static str,
    pub low: &'static str,
    pub strong_low: &'static str,
}

impl AxisPhrases {
    pub fn describe(&self, value: f64) -> &'static str {
        match Band::of(value) {
            Band::StrongHigh => self.strong_high,
            Band::High => self.high,
            Band::Neutral => self.neutral,
            Band::Low => self.low,
            Band::StrongLow => self.strong_low,
        }
    }
}

/// Phrase table for every banded axis. `ExpressiveCandid` has its own spectrum
/// table (see [`describe_spectrum`]) and returns `None`.
pub fn axis_phrases(axis: VoiceAxis) -> Option<AxisPhrases> {
    let phrases = match axis {
        VoiceAxis::Directness => AxisPhrases {
            label: "DIRECTNESS",
            strong_high: "Be extremely straightforward - no ambiguity, clear statements",
            high: "Be direct but allow for some nuance",
            neutral: "Balance directness with nuance appropriately",
            low: "Be somewhat indirect, let meaning emerge",
            strong_low: "Use more nuanced, layered communication",
        },
        VoiceAxis::Universality => AxisPhrases {
            label: "UNIVERSALITY",
            strong_high: "Use globally accessible language, avoid niche references",
            high: "Lean toward universal language with minimal jargon",
            neutral: "Balance accessibility with expertise",
            low: "Some specialized terms acceptable",
            strong_low: "Use specialized language, insider knowledge expected",
        },
        VoiceAxis::Authority => AxisPhrases {
            label: "AUTHORITY",
            strong_high: "Speak with complete confidence as the definitive expert",
            high: "Show confidence while remaining respectful",
            neutral: "Balance authority with approachability",
            low: "Show some humility alongside expertise",
            strong_low: "Be humble, acknowledge uncertainty where appropriate",
        },
        VoiceAxis::Tension => AxisPhrases {
            label: "TENSION",
            strong_high: "Create strong tension: pair everyday words with elevated terms, use juxtaposition",
            high: "Add some linguistic tension and unexpected word choices",
            neutral: "Moderate use of linguistic tension",
            low: "Minimize creative word play",
            strong_low: "Use straightforward language without creative tension",
        },
        VoiceAxis::Education => AxisPhrases {
            label: "EDUCATION",
            strong_high: "Provide deep insight about brands, products, and culture - be highly educational",
            high: "Include educational elements and context",
            neutral: "Balanced educational approach",
            low: "Light educational context",
            strong_low: "Minimal educational content - focus on essentials only",
        },
        VoiceAxis::Rhythm => AxisPhrases {
            label: "RHYTHM",
            strong_high: "Strong rhythmic variation: mix long/short sentences, use incomplete sentences, apply staccato punctuation",
            high: "Create some rhythmic variety in sentence structure",
            neutral: "Moderate rhythmic variation",
            low: "Minimal rhythmic variation",
            strong_low: "Use standard, consistent sentence structure",
        },
        VoiceAxis::SneakerCulture => AxisPhrases {
            label: "SNEAKER CULTURE",
            strong_high: "Use insider sneaker/hypebeast language freely - 'grail', 'heat', 'cop', 'deadstock', 'fire'",
            high: "Include some sneaker culture terms - 'colorway', 'drop', 'silhouette', 'grail'",
            neutral: "Balanced use of sneaker terminology - occasional 'colorway', 'drop', 'silhouette'",
            low: "Minimize sneaker slang - only use elevated terms like 'colorway', 'release'",
            strong_low: "Avoid all sneaker slang - use only premium fashion terminology",
        },
        VoiceAxis::MarketplaceAccuracy => AxisPhrases {
            label: "MARKETPLACE ACCURACY",
            strong_high: "AVOID: Use traditional retail language - 'limited quantities', 'get them before they're gone', 'while supplies last'",
            high: "Some retail-style language acceptable but avoid false scarcity claims",
            neutral: "Balanced - avoid false scarcity but some commercial language OK",
            low: "Accurate language - avoid retail urgency, emphasize ongoing availability without mentioning sellers",
            strong_low: "STRICT ACCURACY: Only factual language - 'available now', 'browse current selection', 'authentic pieces'",
        },
        VoiceAxis::ExpressiveCandid => return None,
    };
    Some(phrases)
}

const CORE_AXES: [VoiceAxis; 3] = [
    VoiceAxis::Directness,
    VoiceAxis::Universality,
    VoiceAxis::Authority,
];

const TONE_AXES: [VoiceAxis; 5] = [
    VoiceAxis::Tension,
    VoiceAxis::Education,
    VoiceAxis::Rhythm,
    VoiceAxis::SneakerCulture,
    VoiceAxis::MarketplaceAccuracy,
];

/// Spectrum position of the expressive/candid axis. Uses its own five bands.
pub fn describe_spectrum(value: f64) -> &'static str {
    if value > 0.6 {
        "CANDID - Technical/Product tone: Factual, precise, minimal flourish"
    } else if value > 0.2 {
        "BALANCED-CANDID - Product descriptions with some personality"
    } else if value > -0.2 || value.is_nan() {
        "CENTERED - Pure voice expression"
    } else if value > -0.6 {
        "BALANCED-EXPRESSIVE - Social content with editorial elements"
    } else {
        "EXPRESSIVE - Editorial tone: Creative, elevated, maximum personality"
    }
}

fn content_type_guideline(content_type: &str) -> Option<&'static str> {
    match content_type {
        "editorial" => Some("Use maximum expressiveness - creative language, cultural insight, personality"),
        "social" => Some("Engaging and accessible while maintaining brand voice"),
        "product" => Some("Clear, informative, with appropriate level of personality based on spectrum position"),
        "technical" => Some("Precise and candid, minimal creative flourish"),
        _ => None,
    }
}

fn content_type_guidance(content_type: &str, spectrum: f64) -> String {
    let mut guidance = String::from("CONTENT TYPE GUIDANCE:\n");
    if let Some(line) = content_type_guideline(content_type) {
        guidance.push_str(line);
        guidance.push('\n');
    }

    if spectrum > 0.3 {
        guidance.push_str("\nCANDID EXAMPLES:\n");
        guidance.push_str("- 'Available now' instead of 'limited quantities'\n");
        guidance.push_str("- 'Authentic pieces' instead of 'while supplies last'\n");
        guidance.push_str("- Focus on facts, features, and clear descriptions\n");
    } else if spectrum < -0.3 {
        guidance.push_str("\nEXPRESSIVE EXAMPLES:\n");
        guidance.push_str("- 'Out, Again' - Use unexpected juxtapositions\n");
        guidance.push_str(
            "- 'Not your traditional workwear. Classic silhouettes reimagined...' - Create tension and rhythm\n",
        );
    }

    guidance
}

fn push_axis_lines(prompt: &mut String, matrix: &VoiceMatrix, axes: &[VoiceAxis]) {
    for &axis in axes {
        if let Some(phrases) = axis_phrases(axis) {
            prompt.push_str(&format!(
                "- {}: {}\n",
                phrases.label,
                phrases.describe(matrix.value(axis))
            ));
        }
    }
}

/// Builds the VOICE AND TONE GUIDELINES block for a matrix and content-type bucket
/// (`editorial`, `social`, `product`, `technical`; anything else gets no bucket line).
pub fn build_voice_prompt(matrix: &VoiceMatrix, content_type: &str) -> String {
    let mut prompt = String::from("VOICE AND TONE GUIDELINES:\n\n");

    prompt.push_str("CORE VOICE:\n");
    push_axis_lines(&mut prompt, matrix, &CORE_AXES);
    prompt.push('\n');

    prompt.push_str("TONE APPLICATION:\n");
    push_axis_lines(&mut prompt, matrix, &TONE_AXES);
    prompt.push('\n');

    prompt.push_str(&format!(
        "TONE SPECTRUM: {}\n\n",
        describe_spectrum(matrix.expressive_candid)
    ));

    prompt.push_str(&content_type_guidance(
        &content_type.to_ascii_lowercase(),
        matrix.expressive_candid,
    ));

    prompt
}
