//! Card name normalization shared by the index and the resolver.
//!
//! A normalized name is lowercase, free of diacritics and punctuation, has
//! single spaces between words and spells the face separator as ` // `.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Separator between face names in a multi-faced card's full name.
pub const FACE_SEPARATOR: &str = " // ";

/// Normalize a full card name, keeping every face.
pub fn normalize_name(name: &str) -> String {
    let mut folded = String::with_capacity(name.len());
    for ch in name.nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        match ch {
            'æ' | 'Æ' => folded.push_str("ae"),
            'œ' | 'Œ' => folded.push_str("oe"),
            '\'' | '’' | '‘' | '"' | '“' | '”' => {}
            '/' => folded.push_str(" / "),
            c if c.is_alphanumeric() => folded.extend(c.to_lowercase()),
            _ => folded.push(' '),
        }
    }

    let mut out = String::with_capacity(folded.len());
    let mut slashes = 0;
    for word in folded.split_whitespace() {
        if word == "/" {
            slashes += 1;
            continue;
        }
        if slashes > 0 && !out.is_empty() {
            out.push_str(FACE_SEPARATOR);
        } else if !out.is_empty() {
            out.push(' ');
        }
        slashes = 0;
        out.push_str(word);
    }
    out
}

/// Normalize only the front face: the separator and everything after it is
/// dropped.
pub fn normalize_front_face(name: &str) -> String {
    let full = normalize_name(name);
    match full.find(FACE_SEPARATOR) {
        Some(pos) => full[..pos].to_string(),
        None => full,
    }
}

/// True if the name names more than one face.
pub fn has_face_separator(name: &str) -> bool {
    normalize_name(name).contains(FACE_SEPARATOR)
}
