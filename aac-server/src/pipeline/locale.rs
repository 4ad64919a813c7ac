//! Language code -> speech-synthesis locale mapping

/// Map a language code to the TTS locale tag used for synthesis.
/// Unknown codes default to `en-IN`. Pure lookup, no I/O.
pub fn tts_locale_for_lang(lang: &str) -> &'static str {
    match lang {
        "hi" => "hi-IN",
        "ta" => "ta-IN",
        "te" => "te-IN",
        "kn" => "kn-IN",
        "ml" => "ml-IN",
        "mr" => "mr-IN",
        "bn" => "bn-IN",
        "gu" => "gu-IN",
        "pa" => "pa-IN",
        "ur" => "ur-IN",
        "en" => "en-IN",
        _ => "en-IN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_languages_map_to_indian_locales() {
        assert_eq!(tts_locale_for_lang("hi"), "hi-IN");
        assert_eq!(tts_locale_for_lang("ta"), "ta-IN");
        assert_eq!(tts_locale_for_lang("en"), "en-IN");
    }

    #[test]
    fn unknown_language_falls_back_to_en_in() {
        assert_eq!(tts_locale_for_lang("fr"), "en-IN");
        assert_eq!(tts_locale_for_lang(""), "en-IN");
    }
}
