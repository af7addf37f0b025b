//! Reading rules-relevant facts out of mana costs and oracle text.

use crate::color::{Color, ColorSet};
use crate::models::DeckLimit;

/// Remove parenthesized reminder text.
pub fn strip_reminder_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for ch in text.chars() {
        match ch {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Contents of every `{...}` symbol in `text`, braces excluded.
pub fn mana_symbols(text: &str) -> Vec<&str> {
    let mut symbols = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                symbols.push(&after[..close]);
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    symbols
}

/// Colors contributed by mana symbols.
///
/// Hybrid (`{W/U}`, `{2/W}`) and Phyrexian (`{G/P}`) symbols contribute each
/// colored half; generic, colorless, snow and tap symbols contribute nothing.
pub fn symbol_colors(text: &str) -> ColorSet {
    let mut colors = ColorSet::COLORLESS;
    for symbol in mana_symbols(text) {
        for part in symbol.split('/') {
            let mut chars = part.chars();
            if let (Some(ch), None) = (chars.next(), chars.next()) {
                if let Some(color) = Color::from_symbol(ch) {
                    colors = colors.with(color);
                }
            }
        }
    }
    colors
}

/// Color identity contribution of one face: its cost, its rules text outside
/// reminder text, and its color indicator.
pub fn face_color_identity(mana_cost: &str, text: &str, indicator: ColorSet) -> ColorSet {
    symbol_colors(mana_cost)
        .union(symbol_colors(&strip_reminder_text(text)))
        .union(indicator)
}

/// Copy limit stated in the rules text, if any.
pub fn deck_limit_from_text(text: &str) -> Option<DeckLimit> {
    let lower = text.to_lowercase();
    if lower.contains("a deck can have any number of cards named") {
        return Some(DeckLimit::Unlimited);
    }
    let marker = "a deck can have up to ";
    let start = lower.find(marker)? + marker.len();
    let word = lower[start..].split_whitespace().next()?;
    number_word(word).map(DeckLimit::AtMost)
}

fn number_word(word: &str) -> Option<u32> {
    if let Ok(n) = word.parse() {
        return Some(n);
    }
    let n = match word {
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        _ => return None,
    };
    Some(n)
}

/// Rules-text lines with reminder text removed, trimmed and non-empty.
pub fn ability_lines(text: &str) -> Vec<String> {
    strip_reminder_text(text)
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}
