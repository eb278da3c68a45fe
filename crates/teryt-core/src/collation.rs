//! Polish alphabetical ordering.
//!
//! Plain `str::cmp` puts every diacritic letter after `z` (`Łódź` after
//! `Zabrze`). Polish collation sorts each diacritic right after its base
//! letter: `a ą b c ć d e ę ... l ł ... n ń o ó ... s ś ... z ź ż`.
//!
//! Other accented Latin letters (`é`, `ü`) take their base letter's place,
//! so `Müller` sorts among the `m` names rather than after `ż`.
//!
//! Three levels, as in a locale-aware string compare:
//! 1. primary: character class, then alphabet position (case-insensitive)
//! 2. secondary: lowercase before uppercase
//! 3. final tie-break on code points, so the order is total

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

/// Polish alphabet with q, v, x at their Latin positions.
const POLISH_ALPHABET: &[char] = &[
    'a', 'ą', 'b', 'c', 'ć', 'd', 'e', 'ę', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'ł', 'm', 'n',
    'ń', 'o', 'ó', 'p', 'q', 'r', 's', 'ś', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'ź', 'ż',
];

/// Character classes in primary order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Class {
    Space,
    Punct,
    Digit,
    Letter,
    Other,
}

fn lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn alphabet_position(c: char) -> Option<u32> {
    POLISH_ALPHABET.iter().position(|&a| a == c).map(|p| p as u32)
}

fn primary_key(c: char) -> (Class, u32) {
    let l = lower(c);
    if l.is_whitespace() {
        return (Class::Space, 0);
    }
    if let Some(pos) = alphabet_position(l) {
        return (Class::Letter, pos);
    }
    if l.is_ascii_digit() {
        return (Class::Digit, l as u32);
    }
    if l.is_alphabetic() {
        // Base letter of a decomposable letter outside the Polish alphabet.
        if let Some(pos) = std::iter::once(l).nfd().next().and_then(alphabet_position) {
            return (Class::Letter, pos);
        }
    }
    if l.is_alphanumeric() {
        return (Class::Other, l as u32);
    }
    (Class::Punct, l as u32)
}

/// Compare two strings in Polish alphabetical order.
pub fn compare(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .map(primary_key)
        .cmp(b.chars().map(primary_key));
    if primary != Ordering::Equal {
        return primary;
    }
    // Lowercase sorts first: `false < true`.
    let case = a
        .chars()
        .map(char::is_uppercase)
        .cmp(b.chars().map(char::is_uppercase));
    case.then_with(|| a.cmp(b))
}
