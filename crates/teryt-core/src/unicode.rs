//! Character-level folding for Polish names.
//!
//! Matching is done on *normalized* text: NFC-composed, lowercase, with the
//! nine Polish diacritic letters replaced by their base Latin letter. No other
//! Unicode folding is applied, so `é` or `ü` stay as they are.

use unicode_normalization::UnicodeNormalization;

/// Map a lowercase Polish diacritic letter to its base letter.
/// Any other character is returned unchanged.
pub fn fold_diacritic(c: char) -> char {
    match c {
        'ą' => 'a',
        'ć' => 'c',
        'ę' => 'e',
        'ł' => 'l',
        'ń' => 'n',
        'ó' => 'o',
        'ś' => 's',
        'ź' | 'ż' => 'z',
        _ => c,
    }
}

pub fn is_polish_diacritic(c: char) -> bool {
    fold_diacritic(c) != c
}

/// Lowercase `s` and strip Polish diacritics.
///
/// Uppercase diacritics are covered too: `Ł` lowercases to `ł` first.
/// Decomposed input (`s` + U+0301) is composed before folding.
pub fn normalize(s: &str) -> String {
    s.nfc()
        .flat_map(char::to_lowercase)
        .map(fold_diacritic)
        .collect()
}

/// Turn a name into an address-safe slug.
///
/// Normalizes, replaces each run of whitespace with a single `-`, then drops
/// everything outside `[a-z0-9-]`.
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_space = false;
    for c in normalize(s).chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
                in_space = true;
            }
            continue;
        }
        in_space = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            out.push(c);
        }
    }
    out
}
