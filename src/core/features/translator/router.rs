use crate::shared::types::Language;

/// Language every foreign text is translated into
pub const PIVOT_LANG: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Translate { source: String, destination: String },
    /// Source and destination coincide
    Skip,
}

/// Pick the destination for a detected language.
///
/// Foreign text always goes to English; English goes to the configured target.
pub fn route(detected: &str, target: Language) -> Route {
    let destination = if detected != PIVOT_LANG {
        PIVOT_LANG
    } else {
        target.code()
    };

    if destination == detected {
        Route::Skip
    } else {
        Route::Translate {
            source: detected.to_string(),
            destination: destination.to_string(),
        }
    }
}
