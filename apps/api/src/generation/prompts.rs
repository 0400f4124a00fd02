// All LLM prompt templates for the Generation module.
// Voice instructions come from voice::prompt; shared fragments from llm_client::prompts.

use crate::generation::models::{GenerationMode, GenerationRequest, Specifications};
use crate::llm_client::prompts::{GENERATE_NOW, RESPONSE_FORMAT_HEADER, RESPONSE_METADATA_FIELDS};
use crate::voice::prompt::build_voice_prompt;

/// One horoscope theme: the day label, its name, and the supporting keywords.
#[derive(Debug, Clone, Copy)]
pub struct HoroscopeTheme {
    pub day: u8,
    pub name: &'static str,
    pub keywords: &'static str,
}

/// The fixed 8-theme cycle. One passage is generated per theme.
pub const HOROSCOPE_THEMES: [HoroscopeTheme; 8] = [
    HoroscopeTheme { day: 0, name: "Beginnings", keywords: "freedom, originality" },
    HoroscopeTheme { day: 1, name: "Rules", keywords: "origins, techniques" },
    HoroscopeTheme { day: 2, name: "Aesthetics", keywords: "comforts, sumptuousness" },
    HoroscopeTheme { day: 3, name: "Intuition", keywords: "depth, feeling" },
    HoroscopeTheme { day: 4, name: "Creativity", keywords: "expression, doing" },
    HoroscopeTheme { day: 5, name: "Experimentation", keywords: "technology, creation" },
    HoroscopeTheme { day: 6, name: "Adventure", keywords: "newness" },
    HoroscopeTheme { day: 7, name: "Athleticism", keywords: "mastery, winning" },
];

const ZODIAC_SIGNS: [(&str, &str); 12] = [
    ("aries", "Aries"),
    ("taurus", "Taurus"),
    ("gemini", "Gemini"),
    ("cancer", "Cancer"),
    ("leo", "Leo"),
    ("virgo", "Virgo"),
    ("libra", "Libra"),
    ("scorpio", "Scorpio"),
    ("sagittarius", "Sagittarius"),
    ("capricorn", "Capricorn"),
    ("aquarius", "Aquarius"),
    ("pisces", "Pisces"),
];

/// Display name for a zodiac sign id. Unknown ids pass through unchanged.
pub fn zodiac_display_name(sign_id: &str) -> String {
    let key = sign_id.trim().to_ascii_lowercase();
    ZODIAC_SIGNS
        .iter()
        .find(|(id, _)| *id == key)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| sign_id.trim().to_string())
}

/// Copy generation prompt template.
/// Replace: {voice_prompt}, {channel_prompt}, {brand_context}, {channel},
///          {character_limit}, {response_format}, {prompt}
pub const COPY_PROMPT_TEMPLATE: &str = r#"You are an AI copywriting assistant. Generate marketing copy that matches the specified voice and tone characteristics.

{voice_prompt}

{channel_prompt}
{brand_context}
TASK: Generate copy for: "{prompt}"

REQUIREMENTS:
- Maintain the specified voice and tone characteristics
- Optimize for the {channel} channel
- Keep within {character_limit} characters
- Ensure brand voice consistency

{response_format}

{generate_now}"#;

/// Horoscope prompt template.
/// Replace: {signs}, {voice_prompt}, {themes}, {style_example}, {response_format}, {prompt}
pub const HOROSCOPE_PROMPT_TEMPLATE: &str = r#"You are an AI horoscope generator. Create 8 themed horoscope versions for {signs} based on the provided themes and user prompt.

{voice_prompt}

USER PROMPT: "{prompt}"
{style_example}
HOROSCOPE THEMES:
{themes}

TASK: Generate 8 horoscope versions for {signs} based on the themes above and following the user's prompt instructions.

REQUIREMENTS:
- Each horoscope should be 2-3 sentences
- Follow the tone, voice, and style instructions from the user prompt
- Apply the voice and tone characteristics specified above
- Each should feel unique to its theme while staying true to the zodiac sign characteristics
- Make each horoscope engaging and personalized
- If multiple signs are selected, create horoscopes that work for all selected signs
- "horoscopes" MUST be a JSON array of exactly 8 strings, one per theme, in theme order

{response_format}

{generate_now}"#;

const PLAIN_CONTENT_FORMAT: &str = r#"  "content": "Your generated copy here","#;

const EMAIL_PUSH_CONTENT_FORMAT: &str = r#"  "content": {
    "email": {
      "subjectLine": "Your subject line here",
      "preheaderText": "Your preheader text here",
      "body": {
        "primaryHeadline": "Your headline here",
        "openingParagraph": "Your opening paragraph here",
        "mainContent": "Your main content here",
        "closing": "Your closing paragraph here"
      },
      "callToAction": {
        "buttonText": "Your CTA button text here"
      }
    },
    "pushNotification": {
      "pushTitle": "Your push title here",
      "pushBody": "Your push body text here"
    }
  },"#;

fn horoscope_content_format() -> String {
    let entries = (1..=HOROSCOPE_THEMES.len())
        .map(|n| format!("      \"Horoscope {n} text here\""))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("  \"content\": {{\n    \"horoscopes\": [\n{entries}\n    ]\n  }},")
}

fn response_format(content_format: &str) -> String {
    format!("{RESPONSE_FORMAT_HEADER}\n{{\n{content_format}\n{RESPONSE_METADATA_FIELDS}\n}}")
}

/// Channels that get platform specifications instead of email/push fields
/// in email-optimized mode.
fn is_social_platform(channel: &str) -> bool {
    matches!(channel, "tiktok" | "instagram")
}

fn standard_channel_guideline(channel: &str) -> &'static str {
    match channel {
        "email" => "Email copy should be clear, actionable, and maintain professional tone while being engaging.",
        "linkedin" => "LinkedIn content should be professional, thought-provoking, and industry-relevant.",
        "instagram" => "Instagram content should be visually appealing, engaging, and use appropriate hashtags.",
        "twitter" => "Twitter content should be concise, engaging, and use relevant hashtags and mentions.",
        "web" => "Web copy should be clear, SEO-friendly, and guide users toward desired actions.",
        "facebook" => "Facebook content should be engaging, shareable, and community-focused.",
        "tiktok" => "TikTok content should be trendy, entertaining, and use popular sounds/effects.",
        _ => "Content should be appropriate for the specified channel.",
    }
}

fn or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value.as_deref().filter(|v| !v.trim().is_empty()).unwrap_or(fallback)
}

fn email_push_specifications(specs: &Specifications) -> String {
    let mut p = String::from("\nEMAIL & PUSH NOTIFICATION SPECIFICATIONS:\n");
    p.push_str("\nEMAIL COMPONENTS:\n");
    p.push_str(&format!(
        "1. Subject Line: {} (max: {})\n",
        or(&specs.subject_line.recommended, "30-50 characters"),
        or(&specs.subject_line.max, "78 characters")
    ));
    p.push_str("   - Must be compelling and action-oriented\n");
    p.push_str("   - Avoid spam trigger words\n");
    p.push_str("   - Front-load important information\n");
    p.push_str(&format!(
        "\n2. Preheader Text: {} (max: {})\n",
        or(&specs.preheader.recommended, "40-90 characters"),
        or(&specs.preheader.max, "140 characters")
    ));
    p.push_str("   - Should complement, not repeat, the subject line\n");
    p.push_str("   - Acts as secondary headline to increase open rates\n");
    p.push_str("\n3. Body Content:\n");
    p.push_str(&format!(
        "   - Primary Headline: {}\n",
        or(&specs.body_content.headline, "30-65 characters")
    ));
    p.push_str(&format!(
        "   - Opening paragraph: {}\n",
        or(&specs.body_content.opening, "50-100 words")
    ));
    p.push_str(&format!(
        "   - Main content: {}\n",
        or(&specs.body_content.main, "150-300 words")
    ));
    p.push_str(&format!(
        "   - Closing: {}\n",
        or(&specs.body_content.closing, "25-50 words")
    ));
    p.push_str("\n4. Call-to-Action:\n");
    p.push_str(&format!(
        "   - Button text: {}\n",
        or(&specs.cta.button_text, "2-5 words (25 characters max)")
    ));
    p.push_str("   - Must be action-oriented verbs\n");
    p.push_str("\nPUSH NOTIFICATION COMPONENTS:\n");
    p.push_str(&format!(
        "1. Push Title: {} (iOS: {}, Android: {})\n",
        or(&specs.push_title.recommended, "30-40 characters"),
        or(&specs.push_title.ios, "178 characters"),
        or(&specs.push_title.android, "65 characters")
    ));
    p.push_str("   - Must be attention-grabbing and relevant\n");
    p.push_str("   - Personalization highly recommended\n");
    p.push_str(&format!(
        "\n2. Push Body: {} (iOS: {}, Android: {})\n",
        or(&specs.push_body.recommended, "40-125 characters"),
        or(&specs.push_body.ios, "178 characters"),
        or(&specs.push_body.android, "240 characters")
    ));
    p.push_str("   - Should expand on title with additional context\n");
    p.push_str("   - Include clear call-to-action\n");
    p
}

fn tiktok_specifications(specs: &Specifications) -> String {
    format!(
        "\nTIKTOK SPECIFICATIONS:\n\
         - Caption: {} (max: {})\n\
         - Hashtags: {} (max: {})\n\
         - Hook: {} (max: {})\n\
         - Content should be trendy, entertaining, and use popular sounds/effects\n",
        or(&specs.caption.recommended, "100-300 characters"),
        or(&specs.caption.max, "2200 characters"),
        or(&specs.hashtags.recommended, "3-5 hashtags"),
        or(&specs.hashtags.max, "100 characters"),
        or(&specs.hook.recommended, "First 3 seconds"),
        or(&specs.hook.max, "15 words"),
    )
}

fn instagram_specifications(specs: &Specifications) -> String {
    format!(
        "\nINSTAGRAM SPECIFICATIONS:\n\
         - Caption: {} (max: {})\n\
         - Hashtags: {} (max: {})\n\
         - Stories: {} ({})\n\
         - Content should be visually appealing, engaging, and use appropriate hashtags\n",
        or(&specs.caption.recommended, "125-150 characters"),
        or(&specs.caption.max, "2200 characters"),
        or(&specs.hashtags.recommended, "5-10 hashtags"),
        or(&specs.hashtags.max, "30 hashtags"),
        or(&specs.stories.text, "Max 2 lines"),
        or(&specs.stories.recommended, "1-2 words per line"),
    )
}

/// Channel block: per-channel guidance (or field specifications in
/// email-optimized mode) followed by the character limit.
pub fn build_channel_prompt(
    channel: &str,
    character_limit: usize,
    mode: GenerationMode,
    specs: &Specifications,
) -> String {
    let channel_key = channel.trim().to_ascii_lowercase();
    let mut prompt = format!("Channel: {channel}\n");

    if mode == GenerationMode::EmailOptimized {
        let block = match channel_key.as_str() {
            "tiktok" => tiktok_specifications(specs),
            "instagram" => instagram_specifications(specs),
            _ => email_push_specifications(specs),
        };
        prompt.push_str(&block);
    } else {
        prompt.push_str(standard_channel_guideline(&channel_key));
    }

    prompt.push_str(&format!("\nCharacter Limit: {character_limit}"));
    prompt
}

fn brand_context(request: &GenerationRequest) -> String {
    let mut context = String::new();
    if let Some(guidelines) = request.brand_guidelines.as_deref().filter(|s| !s.trim().is_empty()) {
        context.push_str(&format!("\nBRAND GUIDELINES:\n{}\n", guidelines.trim()));
    }
    if let Some(samples) = request.voice_samples.as_deref().filter(|s| !s.trim().is_empty()) {
        context.push_str(&format!(
            "\nVOICE SAMPLES (match this voice):\n{}\n",
            samples.trim()
        ));
    }
    context
}

fn build_horoscope_prompt(request: &GenerationRequest, voice_prompt: &str) -> String {
    let signs = request
        .zodiac_signs()
        .iter()
        .map(|s| zodiac_display_name(s))
        .collect::<Vec<_>>()
        .join(", ");

    let themes = HOROSCOPE_THEMES
        .iter()
        .map(|t| format!("Day {}: {} ({})", t.day, t.name, t.keywords))
        .collect::<Vec<_>>()
        .join("\n");

    let style_example = match request.example_text.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(example) => format!("\nSTYLE EXAMPLE (match length and tone):\n\"{}\"\n", example.trim()),
        None => String::new(),
    };

    HOROSCOPE_PROMPT_TEMPLATE
        .replace("{voice_prompt}", voice_prompt)
        .replace("{themes}", &themes)
        .replace("{response_format}", &response_format(&horoscope_content_format()))
        .replace("{generate_now}", GENERATE_NOW)
        .replace("{signs}", &signs)
        .replace("{style_example}", &style_example)
        .replace("{prompt}", request.prompt_text())
}

/// Builds the complete model prompt for a request. Pure; never fails.
/// User-supplied text is substituted last so it cannot inject template slots.
pub fn build_copy_prompt(request: &GenerationRequest) -> String {
    let voice_prompt = build_voice_prompt(&request.voice(), request.content_type());
    let mode = request.mode();

    if mode == GenerationMode::Horoscope {
        return build_horoscope_prompt(request, &voice_prompt);
    }

    let channel = request.channel.trim();
    let character_limit = request.character_limit();
    let channel_prompt =
        build_channel_prompt(channel, character_limit, mode, &request.specifications());

    let structured = mode == GenerationMode::EmailOptimized
        && !is_social_platform(&channel.to_ascii_lowercase());
    let content_format = if structured {
        EMAIL_PUSH_CONTENT_FORMAT
    } else {
        PLAIN_CONTENT_FORMAT
    };

    COPY_PROMPT_TEMPLATE
        .replace("{voice_prompt}", &voice_prompt)
        .replace("{channel_prompt}", &channel_prompt)
        .replace("{character_limit}", &character_limit.to_string())
        .replace("{response_format}", &response_format(content_format))
        .replace("{generate_now}", GENERATE_NOW)
        .replace("{channel}", channel)
        .replace("{brand_context}", &brand_context(request))
        .replace("{prompt}", request.prompt_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(channel: &str, mode: Option<&str>) -> GenerationRequest {
        GenerationRequest {
            prompt: Some("Spring sneaker drop".to_string()),
            channel: channel.to_string(),
            mode: mode.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_standard_prompt_has_voice_channel_and_plain_format() {
        let prompt = build_copy_prompt(&request("twitter", None));
        assert!(prompt.starts_with("You are an AI copywriting assistant."));
        assert!(prompt.contains("VOICE AND TONE GUIDELINES:"));
        assert!(prompt.contains("Channel: twitter\nTwitter content should be concise"));
        assert!(prompt.contains("Character Limit: 280"));
        assert!(prompt.contains("TASK: Generate copy for: \"Spring sneaker drop\""));
        assert!(prompt.contains("- Keep within 280 characters"));
        assert!(prompt.contains(r#""content": "Your generated copy here","#));
        assert!(prompt.contains("\"voiceConsistencyScore\": 85"));
        assert!(prompt.ends_with("Generate the copy now:"));
        assert!(!prompt.contains("{prompt}"));
    }

    #[test]
    fn test_unknown_channel_gets_generic_guideline() {
        let prompt = build_channel_prompt("myspace", 100, GenerationMode::Standard, &Specifications::default());
        assert_eq!(
            prompt,
            "Channel: myspace\nContent should be appropriate for the specified channel.\nCharacter Limit: 100"
        );
    }

    #[test]
    fn test_email_optimized_without_specs_uses_default_ranges() {
        let prompt = build_copy_prompt(&request("email-pushes", Some("email-optimized")));
        assert!(prompt.contains("1. Subject Line: 30-50 characters (max: 78 characters)"));
        assert!(prompt.contains("2. Preheader Text: 40-90 characters (max: 140 characters)"));
        assert!(prompt.contains("   - Primary Headline: 30-65 characters"));
        assert!(prompt.contains("   - Button text: 2-5 words (25 characters max)"));
        assert!(prompt.contains("1. Push Title: 30-40 characters (iOS: 178 characters, Android: 65 characters)"));
        assert!(prompt.contains("2. Push Body: 40-125 characters (iOS: 178 characters, Android: 240 characters)"));
        assert!(prompt.contains("\"pushNotification\": {"));
        assert!(!prompt.contains(r#""content": "Your generated copy here""#));
    }

    #[test]
    fn test_email_optimized_specs_override_defaults() {
        let mut req = request("email-pushes", Some("email-optimized"));
        req.specifications = Some(serde_json::json!({
            "subjectLine": {"recommended": "20-30 characters", "max": "60 characters"},
            "pushBody": {"android": "200 characters"}
        }));
        let prompt = build_copy_prompt(&req);
        assert!(prompt.contains("1. Subject Line: 20-30 characters (max: 60 characters)"));
        assert!(prompt.contains("(iOS: 178 characters, Android: 200 characters)"));
    }

    #[test]
    fn test_numeric_spec_value_keeps_custom_siblings() {
        let mut req = request("email-pushes", Some("email-optimized"));
        req.specifications = Some(serde_json::json!({
            "subjectLine": {"recommended": "20-30 characters", "max": 60}
        }));
        let prompt = build_copy_prompt(&req);
        assert!(prompt.contains("1. Subject Line: 20-30 characters (max: 60)"));
    }

    #[test]
    fn test_email_optimized_tiktok_gets_platform_specs_and_plain_format() {
        let prompt = build_copy_prompt(&request("tiktok", Some("email-optimized")));
        assert!(prompt.contains("TIKTOK SPECIFICATIONS:"));
        assert!(prompt.contains("- Hook: First 3 seconds (max: 15 words)"));
        assert!(!prompt.contains("EMAIL COMPONENTS"));
        assert!(prompt.contains(r#""content": "Your generated copy here","#));
    }

    #[test]
    fn test_horoscope_enumerates_themes_once_for_many_signs() {
        let mut req = request("horoscope", Some("horoscope"));
        req.zodiac_signs = Some(vec!["aries".into(), "leo".into(), "pisces".into()]);
        let prompt = build_copy_prompt(&req);

        assert!(prompt.contains("for Aries, Leo, Pisces"));
        for theme in HOROSCOPE_THEMES {
            let label = format!("Day {}:", theme.day);
            assert_eq!(prompt.matches(&label).count(), 1, "{label} must appear once");
            assert_eq!(prompt.matches(theme.name).count(), 1, "{} must appear once", theme.name);
        }
        assert!(prompt.contains("exactly 8 strings"));
        assert_eq!(prompt.matches("text here\"").count(), 8);
        assert!(prompt.contains("USER PROMPT: \"Spring sneaker drop\""));
    }

    #[test]
    fn test_horoscope_mode_applies_on_any_channel_and_includes_example() {
        let mut req = request("email", Some("horoscope"));
        req.example_text = Some("The stars lean your way.".to_string());
        let prompt = build_copy_prompt(&req);
        assert!(prompt.starts_with("You are an AI horoscope generator."));
        assert!(prompt.contains("for Aries"));
        assert!(prompt.contains("STYLE EXAMPLE (match length and tone):\n\"The stars lean your way.\""));
    }

    #[test]
    fn test_brand_context_is_included_when_present() {
        let mut req = request("web", None);
        req.brand_guidelines = Some("Never say cheap.".to_string());
        req.voice_samples = Some("Out, Again.".to_string());
        let prompt = build_copy_prompt(&req);
        assert!(prompt.contains("BRAND GUIDELINES:\nNever say cheap."));
        assert!(prompt.contains("VOICE SAMPLES (match this voice):\nOut, Again."));
    }

    #[test]
    fn test_user_text_cannot_fill_template_slots() {
        let mut req = request("web", None);
        req.prompt = Some("Say {channel} and {voice_prompt}".to_string());
        let prompt = build_copy_prompt(&req);
        assert!(prompt.contains("TASK: Generate copy for: \"Say {channel} and {voice_prompt}\""));
    }

    #[test]
    fn test_zodiac_display_names() {
        assert_eq!(zodiac_display_name("sagittarius"), "Sagittarius");
        assert_eq!(zodiac_display_name("Leo"), "Leo");
        assert_eq!(zodiac_display_name("ophiuchus"), "ophiuchus");
    }
}
