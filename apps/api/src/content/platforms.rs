//! Platform specifications — per-destination tone, length, style and hashtag count.
//!
//! The table is built once at startup and shared read-only through `AppState`.

use serde::Serialize;

/// Content-style settings for one publishing destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformSpec {
    pub tone: &'static str,
    /// Target word range, e.g. "200-250 words".
    pub length: &'static str,
    pub style: &'static str,
    pub hashtag_count: u32,
}

/// Immutable lookup of platform key → spec. Keys are matched exactly.
#[derive(Debug, Clone)]
pub struct PlatformTable {
    entries: Vec<(&'static str, PlatformSpec)>,
}

impl PlatformTable {
    /// The four supported destinations.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                (
                    "linkedin",
                    PlatformSpec {
                        tone: "professional, authoritative, thought-leadership",
                        length: "200-250 words",
                        style: "Open with a hook or a sharp insight. Use line breaks. \
                                Cover 3-4 key points with emojis as bullets. \
                                Close with a question or a call to action.",
                        hashtag_count: 5,
                    },
                ),
                (
                    "instagram",
                    PlatformSpec {
                        tone: "aspirational, stylish, engaging, with emojis throughout",
                        length: "100-150 words",
                        style: "Punchy first line. Short sentences. Lifestyle focused. \
                                Aspirational but relatable.",
                        hashtag_count: 20,
                    },
                ),
                (
                    "facebook",
                    PlatformSpec {
                        tone: "conversational, engaging, shareable",
                        length: "150-200 words",
                        style: "Personal angle. Ask questions. Invite comments and shares. \
                                Friendly but knowledgeable.",
                        hashtag_count: 3,
                    },
                ),
                (
                    "blog",
                    PlatformSpec {
                        tone: "informative, SEO-optimized, authoritative",
                        length: "400-500 words",
                        style: "Write in markdown with H2 headers. Opening hook, \
                                three main sections, conclusion with a call to action.",
                        hashtag_count: 5,
                    },
                ),
            ],
        }
    }

    pub fn get(&self, platform: &str) -> Option<&PlatformSpec> {
        self.entries
            .iter()
            .find(|(key, _)| *key == platform)
            .map(|(_, spec)| spec)
    }

    /// Platform keys in declaration order.
    pub fn keys(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(key, _)| *key).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &PlatformSpec)> + '_ {
        self.entries.iter().map(|(key, spec)| (*key, spec))
    }
}
