//! Static channel catalog. Not editable at runtime.

use serde::Serialize;

/// A publishing surface with its own character budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: &'static str,
    pub display_name: &'static str,
    pub icon: &'static str,
    pub character_limit: usize,
}

pub const CHANNELS: &[Channel] = &[
    Channel { id: "email", display_name: "Email", icon: "📧", character_limit: 500 },
    Channel { id: "linkedin", display_name: "LinkedIn", icon: "💼", character_limit: 3000 },
    Channel { id: "instagram", display_name: "Instagram", icon: "📸", character_limit: 2200 },
    Channel { id: "twitter", display_name: "Twitter", icon: "🐦", character_limit: 280 },
    Channel { id: "web", display_name: "Web", icon: "🌐", character_limit: 1000 },
    Channel { id: "facebook", display_name: "Facebook", icon: "👥", character_limit: 2000 },
    Channel { id: "tiktok", display_name: "TikTok", icon: "🎵", character_limit: 300 },
    Channel { id: "email-pushes", display_name: "Email & Pushes", icon: "📨", character_limit: 2000 },
    Channel { id: "horoscope", display_name: "Horoscope", icon: "🔮", character_limit: 2000 },
];

/// Finds a channel by id or display name, ignoring case.
pub fn find_channel(key: &str) -> Option<&'static Channel> {
    let key = key.trim();
    CHANNELS
        .iter()
        .find(|c| c.id.eq_ignore_ascii_case(key) || c.display_name.eq_ignore_ascii_case(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_id_and_display_name() {
        assert_eq!(find_channel("twitter").unwrap().character_limit, 280);
        assert_eq!(find_channel("LinkedIn").unwrap().id, "linkedin");
        assert_eq!(find_channel(" TikTok ").unwrap().character_limit, 300);
        assert_eq!(find_channel("email & pushes").unwrap().id, "email-pushes");
    }

    #[test]
    fn test_unknown_channel() {
        assert!(find_channel("myspace").is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = CHANNELS.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CHANNELS.len());
    }
}
