//! Supported languages and a script-based source language guess.

use anyhow::Result;

use crate::ui::Style;

/// A language offered in the language pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageTag {
    /// Canonical tag stored in the config file (e.g. "Chinese-Simplified").
    pub tag: &'static str,
    /// Short alias accepted on the command line.
    pub code: &'static str,
    /// Name written into prompts.
    pub display_name: &'static str,
}

pub const JAPANESE: LanguageTag = LanguageTag {
    tag: "Japanese",
    code: "ja",
    display_name: "Japanese",
};

pub const CHINESE_SIMPLIFIED: LanguageTag = LanguageTag {
    tag: "Chinese-Simplified",
    code: "zh",
    display_name: "Simplified Chinese",
};

pub const CHINESE_TRADITIONAL: LanguageTag = LanguageTag {
    tag: "Chinese-Traditional",
    code: "zh-TW",
    display_name: "Traditional Chinese",
};

pub const KOREAN: LanguageTag = LanguageTag {
    tag: "Korean",
    code: "ko",
    display_name: "Korean",
};

pub const ENGLISH: LanguageTag = LanguageTag {
    tag: "English",
    code: "en",
    display_name: "English",
};

pub const SUPPORTED_LANGUAGES: &[LanguageTag] = &[
    JAPANESE,
    CHINESE_SIMPLIFIED,
    CHINESE_TRADITIONAL,
    KOREAN,
    ENGLISH,
];

/// Looks up a language by tag or short code, ignoring ASCII case.
pub fn find_language(name: &str) -> Option<&'static LanguageTag> {
    let name = name.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|l| l.tag.eq_ignore_ascii_case(name) || l.code.eq_ignore_ascii_case(name))
}

/// Returns the prompt name for a language.
///
/// Unknown names are passed through unchanged so that new languages can be
/// requested without a table update.
pub fn display_name(name: &str) -> &str {
    find_language(name).map_or(name, |l| l.display_name)
}

/// Prints all supported languages to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported languages"));
    for language in SUPPORTED_LANGUAGES {
        println!(
            "  {:6} {:20} {}",
            Style::code(language.code),
            language.tag,
            Style::secondary(language.display_name)
        );
    }
}

/// Validates that the given language is in the supported table.
pub fn validate_language(name: &str) -> Result<&'static LanguageTag> {
    find_language(name).ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid language: '{name}'\n\n\
             Valid languages: {}\n\
             Run 'deepyami languages' to see all supported languages.",
            SUPPORTED_LANGUAGES
                .iter()
                .map(|l| l.tag)
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}

const fn is_kana(c: char) -> bool {
    matches!(c, '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}')
}

const fn is_hangul(c: char) -> bool {
    matches!(c, '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}' | '\u{3130}'..='\u{318F}')
}

const fn is_han(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}')
}

/// Guesses the language of `text` from the scripts it uses.
///
/// Kana wins over Han (Japanese mixes both), then Hangul, then Han, then
/// Latin letters. Returns `None` when no letters are found.
pub fn detect_language(text: &str) -> Option<&'static LanguageTag> {
    let mut han = false;
    let mut hangul = false;
    let mut latin = false;

    for c in text.chars() {
        if is_kana(c) {
            return Some(&JAPANESE);
        }
        hangul |= is_hangul(c);
        han |= is_han(c);
        latin |= c.is_ascii_alphabetic();
    }

    if hangul {
        Some(&KOREAN)
    } else if han {
        Some(&CHINESE_SIMPLIFIED)
    } else if latin {
        Some(&ENGLISH)
    } else {
        None
    }
}

/// Picks a target language for `text`.
///
/// When the text already looks like it is written in `preferred_target`,
/// the translation goes the other way, into `fallback_source`.
pub fn auto_target<'a>(text: &str, preferred_target: &'a str, fallback_source: &'a str) -> &'a str {
    let preferred = find_language(preferred_target);
    match (detect_language(text), preferred) {
        (Some(detected), Some(target)) if detected == target => fallback_source,
        _ => preferred_target,
    }
}
