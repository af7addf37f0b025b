//! Turning free-text list lines into card records.

use crate::config::{check_fuzzy_threshold, DEFAULT_FUZZY_THRESHOLD};
use crate::error::Result;
use crate::index::CardIndex;
use crate::models::{CardId, CardRecord, DeckEntry, DeckList, FuzzyMatch};
use crate::normalize::{has_face_separator, normalize_front_face, normalize_name};

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Outcome of resolving one name. Every line ends in exactly one variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    Resolved(&'a CardRecord),
    /// Found only by similarity; callers should ask the user to confirm.
    FuzzyMatched {
        card: &'a CardRecord,
        matched_name: String,
        similarity: f64,
    },
    /// Several records share the normalized name; none is picked.
    Ambiguous(Vec<&'a CardRecord>),
    Unresolved,
}

impl<'a> Resolution<'a> {
    /// The chosen record for resolved and fuzzy-matched lines.
    pub fn card(&self) -> Option<&'a CardRecord> {
        match self {
            Resolution::Resolved(card) | Resolution::FuzzyMatched { card, .. } => Some(card),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// One input line with its parsed count and resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionResult<'a> {
    pub line: String,
    pub requested_name: String,
    pub count: u32,
    pub resolution: Resolution<'a>,
}

// ---------------------------------------------------------------------------
// Line parsing
// ---------------------------------------------------------------------------

/// A list line split into its count and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// `None` when the line had no leading count.
    pub count: Option<u32>,
    pub name: String,
}

/// Split `"2x Sol Ring (CMM) 410"` into a count of 2 and the name `"Sol Ring"`.
///
/// Set and collector annotations starting at `(` or `[` are dropped.
pub fn parse_line(line: &str) -> ParsedLine {
    let trimmed = line.trim();
    let (count, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => match parse_count(first) {
            Some(n) => (Some(n), rest),
            None => (None, trimmed),
        },
        None => (None, trimmed),
    };
    ParsedLine {
        count,
        name: strip_annotations(rest),
    }
}

fn strip_annotations(text: &str) -> String {
    let name = match text.find(['(', '[']) {
        Some(pos) => &text[..pos],
        None => text,
    };
    name.trim().to_string()
}

fn parse_count(token: &str) -> Option<u32> {
    let digits = token.strip_suffix(['x', 'X']).unwrap_or(token);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Resolves names against a borrowed [`CardIndex`].
pub struct Resolver<'a> {
    index: &'a CardIndex,
    threshold: f64,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a CardIndex) -> Self {
        Self {
            index,
            threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }

    /// Override the fuzzy similarity threshold.
    ///
    /// Fails with [`crate::DeckCheckError::InvalidArgument`] unless `0 < threshold <= 1`.
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self> {
        check_fuzzy_threshold(threshold)?;
        self.threshold = threshold;
        Ok(self)
    }

    /// For thresholds already checked when a checker was built.
    pub(crate) fn with_checked_threshold(index: &'a CardIndex, threshold: f64) -> Self {
        Self { index, threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Resolve one list line, count prefix included.
    pub fn resolve(&self, line: &str) -> ResolutionResult<'a> {
        let parsed = parse_line(line);
        let count = parsed.count.unwrap_or(1);

        if count == 0 || parsed.name.is_empty() {
            return ResolutionResult {
                line: line.to_string(),
                requested_name: parsed.name,
                count,
                resolution: Resolution::Unresolved,
            };
        }

        let mut result = ResolutionResult {
            line: line.to_string(),
            requested_name: parsed.name.clone(),
            count,
            resolution: self.resolve_name(&parsed.name),
        };

        // Names can start with a number ("1996 World Champion"); if the
        // split-off name found nothing, try the whole line as a name.
        if result.resolution == Resolution::Unresolved && parsed.count.is_some() {
            let whole = strip_annotations(line);
            let retry = self.resolve_name(&whole);
            if retry != Resolution::Unresolved {
                result.requested_name = whole;
                result.count = 1;
                result.resolution = retry;
            }
        }
        result
    }

    /// Resolve every non-blank line of a list, skipping `#` and `//` comments.
    pub fn resolve_list(&self, text: &str) -> Vec<ResolutionResult<'a>> {
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#') && !l.starts_with("//"))
            .map(|l| self.resolve(l))
            .collect()
    }

    /// Resolve a bare card name.
    ///
    /// Order: exact canonical name, normalized name (full, then front face
    /// for `A // B` input), then fuzzy matching.
    pub fn resolve_name(&self, name: &str) -> Resolution<'a> {
        let name = name.trim();
        if let Some(card) = self.index.lookup_exact(name) {
            return Resolution::Resolved(card);
        }

        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return Resolution::Unresolved;
        }
        let mut candidates = self.index.lookup_normalized(&normalized);
        if candidates.is_empty() && has_face_separator(name) {
            candidates = self.index.lookup_normalized(&normalize_front_face(name));
        }
        match candidates.len() {
            0 => {}
            1 => return Resolution::Resolved(candidates[0]),
            _ => return Resolution::Ambiguous(candidates),
        }

        self.fuzzy(&normalized)
    }

    fn fuzzy(&self, normalized: &str) -> Resolution<'a> {
        let query: Vec<char> = normalized.chars().collect();
        let mut best: Option<(CardId, &str, f64)> = None;
        let mut distinct = 0usize;

        for key in self.index.fuzzy_keys() {
            let longest = query.len().max(key.normalized.len());
            let len_gap = query.len().abs_diff(key.normalized.len());
            if (len_gap as f64) > (1.0 - self.threshold) * longest as f64 {
                continue;
            }
            let sim = similarity(&query, &key.normalized);
            if sim < self.threshold {
                continue;
            }
            match best {
                Some((id, _, best_sim)) if id == key.id => {
                    if sim > best_sim {
                        best = Some((key.id, &key.display, sim));
                    }
                }
                Some(_) => {
                    distinct += 1;
                }
                None => {
                    best = Some((key.id, &key.display, sim));
                    distinct = 1;
                }
            }
        }

        match best {
            Some((id, matched_name, sim)) if distinct == 1 => {
                tracing::debug!(query = %normalized, matched = %matched_name, similarity = sim, "fuzzy match");
                Resolution::FuzzyMatched {
                    card: self.index.get(id),
                    matched_name: matched_name.to_string(),
                    similarity: sim,
                }
            }
            Some(_) => {
                tracing::debug!(query = %normalized, candidates = distinct, "fuzzy match ambiguous");
                Resolution::Unresolved
            }
            None => Resolution::Unresolved,
        }
    }
}

// ---------------------------------------------------------------------------
// DeckList assembly
// ---------------------------------------------------------------------------

impl<'a> DeckList<'a> {
    /// Collect resolution results into a deck list.
    ///
    /// Only resolved lines become entries, and a resolved line always has a
    /// count of at least one.
    ///
    /// Fuzzy matches become entries and are also listed for confirmation;
    /// ambiguous and unresolved lines are kept by their requested name.
    pub fn from_resolutions(results: &[ResolutionResult<'a>]) -> Self {
        let mut deck = DeckList::default();
        for result in results {
            match &result.resolution {
                Resolution::Resolved(card) => {
                    deck.entries.push(DeckEntry {
                        card,
                        requested_name: result.requested_name.clone(),
                        count: result.count,
                    });
                }
                Resolution::FuzzyMatched {
                    card,
                    matched_name,
                    similarity,
                } => {
                    deck.entries.push(DeckEntry {
                        card,
                        requested_name: result.requested_name.clone(),
                        count: result.count,
                    });
                    deck.fuzzy_matches.push(FuzzyMatch {
                        requested_name: result.requested_name.clone(),
                        matched_name: matched_name.clone(),
                        similarity: *similarity,
                    });
                }
                Resolution::Ambiguous(_) | Resolution::Unresolved => {
                    let name = if result.requested_name.is_empty() {
                        result.line.clone()
                    } else {
                        result.requested_name.clone()
                    };
                    deck.unresolved.push(name);
                }
            }
        }
        deck
    }
}

// ---------------------------------------------------------------------------
// String similarity
// ---------------------------------------------------------------------------

/// 1 - distance / longest length, in [0, 1].
pub fn similarity(a: &[char], b: &[char]) -> f64 {
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    1.0 - osa_distance(a, b) as f64 / longest as f64
}

/// Optimal string alignment distance: Levenshtein plus adjacent transpositions.
fn osa_distance(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let width = b.len() + 1;
    let mut matrix = vec![0usize; (a.len() + 1) * width];
    for i in 0..=a.len() {
        matrix[i * width] = i;
    }
    for j in 0..=b.len() {
        matrix[j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut d = (matrix[(i - 1) * width + j] + 1)
                .min(matrix[i * width + j - 1] + 1)
                .min(matrix[(i - 1) * width + j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                d = d.min(matrix[(i - 2) * width + j - 2] + 1);
            }
            matrix[i * width + j] = d;
        }
    }
    matrix[a.len() * width + b.len()]
}
