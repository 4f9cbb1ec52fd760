//! Glyph sanitization for the base-14 PDF font.
//!
//! Built-in Helvetica is written with WinAnsiEncoding: printable ASCII, Latin-1
//! letters and symbols, and a handful of typographic extras (curly quotes,
//! dashes, bullet, ellipsis, euro). Those pass through untouched. A few common
//! glyphs outside that set are transliterated, tabs expand, control and
//! zero-width characters vanish, and anything else becomes `?`.

const TAB_EXPANSION: &str = "    ";

/// Characters in the 0x80..=0x9F block of WinAnsiEncoding.
const WIN_ANSI_EXTRAS: &[char] = &[
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '‘', '’', '“', '”', '•',
    '–', '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

/// True when the built-in font can draw `c` as-is.
pub fn is_win_ansi(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{00A0}'..='\u{00FF}') || WIN_ANSI_EXTRAS.contains(&c)
}

pub fn sanitize_for_pdf(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' => out.push_str(TAB_EXPANSION),
            c if is_win_ansi(c) => out.push(c),
            '\u{201B}' | '\u{2032}' => out.push('\''),
            '\u{201F}' | '\u{2033}' => out.push('"'),
            '\u{2010}'..='\u{2012}' | '\u{2015}' | '\u{2212}' => out.push('-'),
            '\u{25CF}' | '\u{25AA}' | '\u{2023}' => out.push('•'),
            '\u{2192}' => out.push_str("->"),
            '\u{2002}'..='\u{200A}' | '\u{202F}' => out.push(' '),
            // zero-width characters and BOM
            '\u{200B}'..='\u{200D}' | '\u{FEFF}' => {}
            c if c.is_control() => {}
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        let s = "Day 1: 2026-03-02 (Mon) ~ 18:00-20:00 {ok} [x] #1 @home";
        assert_eq!(sanitize_for_pdf(s), s);
    }

    #[test]
    fn test_latin1_letters_pass_through() {
        assert_eq!(
            sanitize_for_pdf("Aprender español: día, café, Ñandú, Straße, naïve"),
            "Aprender español: día, café, Ñandú, Straße, naïve"
        );
    }

    #[test]
    fn test_win_ansi_punctuation_passes_through() {
        let s = "\u{201C}Hola\u{201D} \u{2014} it\u{2019}s fine\u{2026} \u{2022} 5\u{20AC}";
        assert_eq!(sanitize_for_pdf(s), s);
    }

    #[test]
    fn test_glyphs_outside_win_ansi_are_transliterated() {
        assert_eq!(
            sanitize_for_pdf("\u{25CF} Verbs \u{2192} Nouns \u{2212}1 \u{2032}"),
            "\u{2022} Verbs -> Nouns -1 '"
        );
    }

    #[test]
    fn test_unsupported_glyphs_become_question_marks() {
        assert_eq!(sanitize_for_pdf("Learn 日本語 📚"), "Learn ??? ?");
    }

    #[test]
    fn test_controls_and_zero_width_are_dropped() {
        assert_eq!(sanitize_for_pdf("a\u{0007}b\u{200B}c\r"), "abc");
    }

    #[test]
    fn test_tab_expands() {
        assert_eq!(sanitize_for_pdf("a\tb"), "a    b");
    }

    #[test]
    fn test_output_is_win_ansi_encodable() {
        let out = sanitize_for_pdf("Ñandú – café\u{00A0}“olé” ✓ \u{1F600} Ω \u{0301}");
        assert!(out.chars().all(is_win_ansi), "{out}");
    }
}
