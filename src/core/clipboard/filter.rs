use std::sync::OnceLock;
use regex::Regex;

/// Fragments of OS and tool error output that end up on the clipboard
const NOISE_FRAGMENTS: &[&str] = &[
    "nsurlerrordomain",
    "could not be found",
    "resolved 0 endpoints",
    "fatal error",
];

static NOISE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn get_noise_pattern() -> &'static Regex {
    NOISE_PATTERN.get_or_init(|| {
        let alternatives = NOISE_FRAGMENTS
            .iter()
            .map(|fragment| regex::escape(fragment))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!("(?i)(?:{})", alternatives)).expect("Invalid noise regex")
    })
}

/// Check if clipboard text is system/error output that must never be translated
pub fn is_noise(content: &str) -> bool {
    get_noise_pattern().is_match(content)
}
