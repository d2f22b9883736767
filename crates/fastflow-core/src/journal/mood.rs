//! Mood and energy extraction from free text.

/// Keyword-to-(mood, energy) table, in fixed iteration order.
///
/// When several keywords appear in one message the LAST one in table order
/// wins. That tie-break is the documented contract; changing it to "first
/// match" or an explicit priority is a product decision, not a refactor.
const MOOD_KEYWORDS: [(&str, u8); 6] = [
    ("great", 9),
    ("good", 8),
    ("okay", 6),
    ("tired", 4),
    ("bad", 3),
    ("terrible", 2),
];

/// Mood and energy detected from one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedMood {
    pub mood: String,
    /// 1-10.
    pub energy: u8,
}

impl Default for DetectedMood {
    fn default() -> Self {
        Self {
            mood: "neutral".into(),
            energy: 5,
        }
    }
}

/// Extract (mood, energy) from free text.
///
/// Case-insensitive substring match against the keyword table; the first
/// numeral in the text overrides the keyword energy when it falls in 1-10,
/// and is ignored otherwise.
pub fn detect(raw: &str) -> DetectedMood {
    let lower = raw.to_lowercase();
    let mut detected = DetectedMood::default();

    for (keyword, energy) in MOOD_KEYWORDS {
        if lower.contains(keyword) {
            detected.mood = keyword.to_string();
            detected.energy = energy;
        }
    }

    if let Some(level) = first_number(raw) {
        if (1..=10).contains(&level) {
            detected.energy = level as u8;
        }
    }

    detected
}

/// First contiguous digit run in `text`, if it parses.
fn first_number(text: &str) -> Option<u64> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
