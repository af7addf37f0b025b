//! Commander construction rules applied to a resolved deck list.

use std::collections::{BTreeMap, BTreeSet};

use crate::commander::{is_eligible_commander, pairing_between, CommanderSelection, Pairing};
use crate::config::COMMANDER_DECK_SIZE;
use crate::error::Result;
use crate::models::{
    CardRecord, DeckList, LegalityStatus, ValidationReport, Violation, ViolationKind,
};

/// Applies the Commander format's deck construction rules.
///
/// Every rule runs and every violation is collected; nothing short-circuits.
#[derive(Debug, Clone)]
pub struct DeckValidator {
    deck_size: usize,
}

impl Default for DeckValidator {
    fn default() -> Self {
        Self {
            deck_size: COMMANDER_DECK_SIZE,
        }
    }
}

/// Copies of one card across every line that resolved to it.
struct CardTally<'a> {
    card: &'a CardRecord,
    copies: u32,
}

impl DeckValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different total deck size (command zone included).
    pub fn with_deck_size(mut self, deck_size: usize) -> Self {
        self.deck_size = deck_size;
        self
    }

    /// Validate `deck` led by `commanders`.
    ///
    /// Fails with a precondition error when no commander, or more than two,
    /// is given. Rule violations never fail; they go into the report.
    pub fn validate(
        &self,
        deck: &DeckList<'_>,
        commanders: &[&CardRecord],
    ) -> Result<ValidationReport> {
        let selection = CommanderSelection::new(commanders.to_vec())?;
        Ok(self.validate_selection(deck, &selection))
    }

    /// Validate `deck` against an already-built selection.
    pub fn validate_selection(
        &self,
        deck: &DeckList<'_>,
        selection: &CommanderSelection<'_>,
    ) -> ValidationReport {
        let identity = selection.color_identity();
        let mut violations = self.check_commanders(selection);

        let mut tallies: BTreeMap<&str, CardTally> = BTreeMap::new();
        for entry in &deck.entries {
            let tally = tallies
                .entry(entry.card.name.as_str())
                .or_insert(CardTally {
                    card: entry.card,
                    copies: 0,
                });
            tally.copies = tally.copies.saturating_add(entry.count);
        }

        // A listed commander fills its command-zone slot.
        let main_deck: usize = tallies
            .values()
            .map(|t| {
                if selection.contains(t.card) {
                    t.copies.saturating_sub(1) as usize
                } else {
                    t.copies as usize
                }
            })
            .sum();
        let deck_size = main_deck + selection.len();
        if deck_size != self.deck_size {
            violations.push(Violation::new(
                ViolationKind::DeckSize,
                None,
                format!(
                    "deck has {} cards including {} commander(s); it must have exactly {}",
                    deck_size,
                    selection.len(),
                    self.deck_size
                ),
            ));
        }

        for tally in tallies.values() {
            let card = tally.card;
            let is_commander = selection.contains(card);
            let copies = if is_commander {
                tally.copies.max(1)
            } else {
                tally.copies
            };

            if !card.deck_limit.allows(copies) {
                violations.push(Violation::new(
                    ViolationKind::Singleton,
                    Some(card.name.as_str()),
                    format!("{} copies; limit is {}", copies, card.deck_limit),
                ));
            }

            if is_commander {
                continue;
            }

            if !identity.contains_all(card.color_identity) {
                let offending = card.color_identity.difference(identity);
                violations.push(Violation::new(
                    ViolationKind::ColorIdentity,
                    Some(card.name.as_str()),
                    format!(
                        "offending colors: {}; card identity {}, commander identity {}",
                        offending, card.color_identity, identity
                    ),
                ));
            }

            match card.commander_legality() {
                LegalityStatus::Banned => violations.push(Violation::new(
                    ViolationKind::BannedCard,
                    Some(card.name.as_str()),
                    "banned in Commander",
                )),
                LegalityStatus::NotLegal => violations.push(Violation::new(
                    ViolationKind::NotLegalCard,
                    Some(card.name.as_str()),
                    "not legal in Commander",
                )),
                LegalityStatus::Legal | LegalityStatus::Restricted => {}
            }
        }

        let card_names: BTreeSet<String> = tallies
            .keys()
            .map(|name| name.to_string())
            .chain(selection.names())
            .collect();

        ValidationReport {
            is_legal: violations.is_empty() && deck.unresolved.is_empty(),
            violations,
            deck_color_identity: identity,
            unresolved: deck.unresolved.clone(),
            fuzzy_matches: deck.fuzzy_matches.clone(),
            commanders: selection.names(),
            deck_size,
            card_names: card_names.into_iter().collect(),
        }
    }

    fn check_commanders(&self, selection: &CommanderSelection<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();
        let pairing = match selection.cards() {
            [a, b] => {
                let pairing = pairing_between(a, b);
                if pairing.is_none() {
                    violations.push(Violation::new(
                        ViolationKind::InvalidPairing,
                        Some(b.name.as_str()),
                        format!("{} and {} cannot be commanders together", a.name, b.name),
                    ));
                }
                pairing
            }
            _ => None,
        };

        for card in selection.cards() {
            match card.commander_legality() {
                LegalityStatus::Legal => {}
                LegalityStatus::Banned => violations.push(Violation::new(
                    ViolationKind::BannedCommander,
                    Some(card.name.as_str()),
                    "banned as a commander",
                )),
                status => violations.push(Violation::new(
                    ViolationKind::IneligibleCommander,
                    Some(card.name.as_str()),
                    format!("Commander legality is {status}"),
                )),
            }

            let background_partner =
                pairing == Some(Pairing::Background) && card.front_face().has_type("background");
            if !is_eligible_commander(card) && !background_partner {
                violations.push(Violation::new(
                    ViolationKind::IneligibleCommander,
                    Some(card.name.as_str()),
                    "not a legendary creature and cannot be your commander",
                ));
            }
        }
        violations
    }
}
