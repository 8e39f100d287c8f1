use whatlang::{Detector, Lang};

/// Guesses the dominant language of a text span
pub trait LanguageDetector: Send + Sync {
    /// ISO-639-1 style code, or `None` when the guess is not usable
    fn detect(&self, text: &str) -> Option<String>;
}

/// Trigram-based detector backed by whatlang
pub struct WhatlangDetector {
    detector: Detector,
    min_confidence: f64,
}

impl WhatlangDetector {
    pub fn new(min_confidence: f64) -> Self {
        Self {
            detector: Detector::new(),
            min_confidence,
        }
    }
}

impl Default for WhatlangDetector {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<String> {
        let info = self.detector.detect(text)?;
        if info.confidence() < self.min_confidence {
            log::debug!(
                "[Detector] {:?} below confidence threshold ({:.2} < {:.2})",
                info.lang(),
                info.confidence(),
                self.min_confidence
            );
            return None;
        }
        Some(lang_code(info.lang()))
    }
}

/// Map whatlang's ISO-639-3 code to the two-letter code the translator expects
fn lang_code(lang: Lang) -> String {
    match lang {
        // whatlang reports Mandarin, which has no 639-1 code of its own
        Lang::Cmn => "zh".to_string(),
        other => isolang::Language::from_639_3(other.code())
            .and_then(|l| l.to_639_1())
            .map(|c| c.to_string())
            .unwrap_or_else(|| other.code().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_english() {
        let detector = WhatlangDetector::default();
        let result = detector.detect("This is a longer English sentence to ensure correct detection.");
        assert_eq!(result.as_deref(), Some("en"));
    }

    #[test]
    fn test_detect_french() {
        let detector = WhatlangDetector::default();
        let result = detector.detect("Bonjour tout le monde, comment allez-vous aujourd'hui ?");
        assert_eq!(result.as_deref(), Some("fr"));
    }

    #[test]
    fn test_detect_japanese() {
        let detector = WhatlangDetector::default();
        assert_eq!(detector.detect("こんにちは、お元気ですか").as_deref(), Some("ja"));
    }

    #[test]
    fn test_detect_korean() {
        let detector = WhatlangDetector::default();
        assert_eq!(detector.detect("안녕하세요 만나서 반갑습니다").as_deref(), Some("ko"));
    }

    #[test]
    fn test_no_letters_is_inconclusive() {
        let detector = WhatlangDetector::default();
        assert_eq!(detector.detect("12345 !!!"), None);
    }

    #[test]
    fn test_confidence_threshold() {
        let detector = WhatlangDetector::new(1.1);
        assert_eq!(detector.detect("This is a longer English sentence to ensure correct detection."), None);
    }

    #[test]
    fn test_lang_code_mapping() {
        assert_eq!(lang_code(Lang::Spa), "es");
        assert_eq!(lang_code(Lang::Vie), "vi");
        assert_eq!(lang_code(Lang::Cmn), "zh");
    }
}
