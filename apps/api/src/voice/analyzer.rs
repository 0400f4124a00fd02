//! Voice analyzer: scores how closely a piece of copy matches a voice matrix
//! using local word-class and punctuation heuristics. No model call.

use serde::Serialize;

use crate::voice::matrix::VoiceMatrix;

const FORMAL_WORDS: &[&str] = &[
    "utilize",
    "facilitate",
    "implement",
    "establish",
    "comprehensive",
    "subsequent",
];
const CASUAL_WORDS: &[&str] = &["awesome", "cool", "yeah", "gonna", "wanna", "gotta"];
const TECHNICAL_TERMS: &[&str] = &[
    "algorithm",
    "optimization",
    "implementation",
    "infrastructure",
    "methodology",
];
const BUZZWORDS: &[&str] = &["synergy", "leverage", "paradigm", "disrupt", "innovative"];
const CERTAINTY_WORDS: &[&str] = &["definitely", "certainly", "absolutely", "guaranteed", "proven"];
const HEDGE_WORDS: &[&str] = &["maybe", "perhaps", "might", "could", "possibly"];
const POSITIVE_WORDS: &[&str] = &["great", "excellent", "amazing", "fantastic", "wonderful"];
const NEGATIVE_WORDS: &[&str] = &["terrible", "awful", "horrible", "bad", "disappointing"];
const PERSONAL_PRONOUNS: &[&str] = &["i", "you", "we", "us", "our", "your"];
const EMOTIONAL_WORDS: &[&str] = &["feel", "emotion", "heart", "soul", "passion", "love"];

/// Result of comparing copy against a target voice.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceAnalysis {
    pub consistency_score: u8,
    pub recommendations: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Raw counts extracted from the text.
#[derive(Debug, Default, Clone, PartialEq)]
struct TextProfile {
    formal_words: usize,
    casual_words: usize,
    contractions: usize,
    statements: usize,
    questions: usize,
    technical_terms: usize,
    buzzwords: usize,
    exclamation_marks: usize,
    certainty_words: usize,
    hedge_words: usize,
    positive_words: usize,
    negative_words: usize,
    personal_pronouns: usize,
    emotional_words: usize,
}

fn count_in(words: &[String], vocabulary: &[&str]) -> usize {
    words
        .iter()
        .filter(|w| vocabulary.contains(&w.as_str()))
        .count()
}

/// Counts `'x` / `’x` where x is a lowercase ASCII letter.
fn count_contractions(content: &str) -> usize {
    content
        .chars()
        .zip(content.chars().skip(1))
        .filter(|&(a, b)| (a == '\'' || a == '\u{2019}') && b.is_ascii_lowercase())
        .count()
}

impl TextProfile {
    fn from_text(content: &str) -> Self {
        let words: Vec<String> = content
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                    .to_lowercase()
            })
            .filter(|w| !w.is_empty())
            .collect();

        let mut statements = 0;
        let mut questions = 0;
        let mut pending = false;
        for c in content.chars() {
            match c {
                '?' if pending => {
                    questions += 1;
                    pending = false;
                }
                '.' | '!' if pending => {
                    statements += 1;
                    pending = false;
                }
                c if c.is_alphanumeric() => pending = true,
                _ => {}
            }
        }

        TextProfile {
            formal_words: count_in(&words, FORMAL_WORDS),
            casual_words: count_in(&words, CASUAL_WORDS),
            contractions: count_contractions(content),
            statements,
            questions,
            technical_terms: count_in(&words, TECHNICAL_TERMS),
            buzzwords: count_in(&words, BUZZWORDS),
            exclamation_marks: content.matches('!').count(),
            certainty_words: count_in(&words, CERTAINTY_WORDS),
            hedge_words: count_in(&words, HEDGE_WORDS),
            positive_words: count_in(&words, POSITIVE_WORDS),
            negative_words: count_in(&words, NEGATIVE_WORDS),
            personal_pronouns: count_in(&words, PERSONAL_PRONOUNS),
            emotional_words: count_in(&words, EMOTIONAL_WORDS),
        }
    }

    // Each derived score lies in [-1, 1].

    fn formality(&self) -> f64 {
        let formal = ratio(self.formal_words, self.formal_words + self.casual_words + 1);
        let contracted = ratio(self.contractions, self.contractions + 10);
        (formal - contracted) * 2.0 - 1.0
    }

    fn authority(&self) -> f64 {
        centered(ratio(self.statements, self.statements + self.questions + 1))
    }

    fn professional(&self) -> f64 {
        centered(ratio(
            self.technical_terms,
            self.technical_terms + self.buzzwords + 1,
        ))
    }

    fn expressiveness(&self) -> f64 {
        centered(ratio(self.exclamation_marks, self.exclamation_marks + 5))
    }

    fn confidence(&self) -> f64 {
        centered(ratio(
            self.certainty_words,
            self.certainty_words + self.hedge_words + 1,
        ))
    }

    fn enthusiasm(&self) -> f64 {
        centered(ratio(
            self.positive_words,
            self.positive_words + self.negative_words + 1,
        ))
    }

    fn empathy(&self) -> f64 {
        let pronouns = ratio(self.personal_pronouns, self.personal_pronouns + 10);
        let emotional = ratio(self.emotional_words, self.emotional_words + 10);
        centered((pronouns + emotional) / 2.0)
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    part as f64 / whole as f64
}

fn centered(r: f64) -> f64 {
    (r - 0.5) * 2.0
}

fn consistency_score(profile: &TextProfile, target: &VoiceMatrix) -> u8 {
    let penalties = [
        ((profile.formality() - target.directness).abs(), 20.0),
        ((profile.authority() - target.authority).abs(), 20.0),
        ((profile.professional() - target.universality).abs(), 20.0),
        ((profile.expressiveness() - target.expressive_candid).abs(), 20.0),
        ((profile.confidence() - target.tension).abs(), 15.0),
        ((profile.enthusiasm() - target.education).abs(), 15.0),
        ((profile.empathy() - target.rhythm).abs(), 15.0),
    ];
    let score = penalties
        .iter()
        .fold(100.0, |acc, (distance, weight)| acc - distance * weight);
    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, 100.0) as u8
}

fn recommendations(profile: &TextProfile, target: &VoiceMatrix) -> Vec<String> {
    let mut out = Vec::new();

    if target.directness > 0.0 && profile.casual_words > profile.formal_words {
        out.push("Use more direct language and avoid contractions".to_string());
    } else if target.directness < 0.0 && profile.formal_words > profile.casual_words {
        out.push("Use more nuanced language and contractions".to_string());
    }

    if target.authority > 0.0 && profile.questions > profile.statements {
        out.push("Use more direct, authoritative statements".to_string());
    } else if target.authority < 0.0 && profile.statements > profile.questions {
        out.push("Use more questions and collaborative language".to_string());
    }

    if target.expressive_candid > 0.0 && profile.exclamation_marks > 2 {
        out.push("Reduce exclamation marks for a more candid tone".to_string());
    } else if target.expressive_candid < 0.0 && profile.exclamation_marks < 1 {
        out.push("Add more expressive language with exclamation marks".to_string());
    }

    out
}

/// Analyzes `content` against the target voice.
pub fn analyze_consistency(content: &str, target: &VoiceMatrix) -> VoiceAnalysis {
    let profile = TextProfile::from_text(content);

    let directness_gap = (profile.formality() - target.directness).abs();
    let authority_gap = (profile.authority() - target.authority).abs();

    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    if directness_gap < 0.2 {
        strengths.push("Good directness level".to_string());
    }
    if authority_gap < 0.2 {
        strengths.push("Appropriate authority level".to_string());
    }
    if directness_gap > 0.5 {
        weaknesses.push("Directness level needs adjustment".to_string());
    }
    if authority_gap > 0.5 {
        weaknesses.push("Authority level needs adjustment".to_string());
    }

    VoiceAnalysis {
        consistency_score: consistency_score(&profile, target),
        recommendations: recommendations(&profile, target),
        strengths,
        weaknesses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(value: f64) -> VoiceMatrix {
        VoiceMatrix {
            directness: value,
            universality: value,
            authority: value,
            tension: value,
            education: value,
            rhythm: value,
            sneaker_culture: value,
            marketplace_accuracy: value,
            expressive_candid: value,
        }
    }

    #[test]
    fn test_profile_counts_word_classes() {
        let p = TextProfile::from_text(
            "We definitely leverage our proven methodology. Maybe you'll love it? Great!",
        );
        assert_eq!(p.certainty_words, 2);
        assert_eq!(p.buzzwords, 1);
        assert_eq!(p.technical_terms, 1);
        assert_eq!(p.hedge_words, 1);
        assert_eq!(p.emotional_words, 1);
        assert_eq!(p.positive_words, 1);
        assert_eq!(p.contractions, 1);
        assert_eq!(p.exclamation_marks, 1);
        assert_eq!(p.statements, 2);
        assert_eq!(p.questions, 1);
        // we, our, you'll is not in the pronoun list
        assert_eq!(p.personal_pronouns, 2);
    }

    #[test]
    fn test_empty_text_matches_fully_negative_voice() {
        let analysis = analyze_consistency("", &uniform(-1.0));
        assert_eq!(analysis.consistency_score, 100);
    }

    #[test]
    fn test_empty_text_against_fully_positive_voice_clamps_to_zero() {
        let analysis = analyze_consistency("", &uniform(1.0));
        assert_eq!(analysis.consistency_score, 0);
        assert!(analysis
            .weaknesses
            .contains(&"Directness level needs adjustment".to_string()));
    }

    #[test]
    fn test_casual_copy_for_direct_voice_recommends_directness() {
        let target = VoiceMatrix {
            directness: 0.8,
            ..VoiceMatrix::default()
        };
        let analysis = analyze_consistency("This is awesome and so cool", &target);
        assert!(analysis
            .recommendations
            .contains(&"Use more direct language and avoid contractions".to_string()));
    }

    #[test]
    fn test_shouty_copy_for_candid_voice_recommends_fewer_exclamations() {
        let target = VoiceMatrix {
            expressive_candid: 0.7,
            ..VoiceMatrix::default()
        };
        let analysis = analyze_consistency("New! Now! Go!", &target);
        assert!(analysis
            .recommendations
            .contains(&"Reduce exclamation marks for a more candid tone".to_string()));
    }

    #[test]
    fn test_score_is_bounded() {
        for value in [-1.0, -0.5, 0.0, 0.5, 1.0] {
            let analysis = analyze_consistency(
                "Absolutely the best drop of the season. Do you feel it?",
                &uniform(value),
            );
            assert!(analysis.consistency_score <= 100);
        }
    }
}
