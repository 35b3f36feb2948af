//! Mapping from the display names clients send as `target_language` to the
//! ISO 639-1 codes the transcription provider accepts as a hint.

const LANGUAGE_CODES: &[(&str, &str)] = &[
    ("english", "en"),
    ("spanish", "es"),
    ("french", "fr"),
    ("german", "de"),
    ("italian", "it"),
    ("portuguese", "pt"),
    ("dutch", "nl"),
    ("russian", "ru"),
    ("japanese", "ja"),
    ("korean", "ko"),
    ("chinese", "zh"),
    ("mandarin", "zh"),
    ("arabic", "ar"),
    ("hindi", "hi"),
];

/// Resolve a language name to its code. `None` means the provider should
/// auto-detect.
pub fn language_code(name: &str) -> Option<&'static str> {
    let name = name.trim();
    LANGUAGE_CODES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, code)| *code)
}
