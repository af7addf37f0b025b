//! Commander eligibility, pairing mechanics and selection color identity.

use crate::color::ColorSet;
use crate::error::{DeckCheckError, Result};
use crate::models::CardRecord;
use crate::normalize::normalize_name;
use crate::oracle::ability_lines;

// ---------------------------------------------------------------------------
// Eligibility
// ---------------------------------------------------------------------------

/// A legendary creature front face, or rules text granting "can be your commander".
pub fn is_eligible_commander(card: &CardRecord) -> bool {
    card.front_face().is_legendary_creature()
        || card
            .oracle_text
            .to_lowercase()
            .contains("can be your commander")
}

/// Eligible records among `cards`, deduplicated and sorted by name.
pub fn eligible_commanders<'a, I>(cards: I) -> Vec<&'a CardRecord>
where
    I: IntoIterator<Item = &'a CardRecord>,
{
    let mut found: Vec<&CardRecord> = cards
        .into_iter()
        .filter(|c| is_eligible_commander(c))
        .collect();
    found.sort_by(|a, b| a.name.cmp(&b.name));
    found.dedup_by(|a, b| a.id == b.id);
    found
}

// ---------------------------------------------------------------------------
// Pairing abilities
// ---------------------------------------------------------------------------

/// Abilities that allow a second commander.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingAbility {
    /// Plain "Partner".
    Partner,
    /// "Partner with <name>".
    PartnerWith(String),
    /// "Partner—<group>" and "Friends forever"; pairs within the same group.
    PartnerGroup(String),
    ChooseBackground,
    DoctorsCompanion,
}

/// Pairing abilities printed on the front face.
pub fn pairing_abilities(card: &CardRecord) -> Vec<PairingAbility> {
    let mut abilities = Vec::new();
    for line in ability_lines(&card.front_face().text) {
        let lower = line.to_lowercase().replace('’', "'");
        if let Some(ability) = parse_pairing_line(&line, &lower) {
            abilities.push(ability);
            continue;
        }
        // Keyword lists such as "Flying, partner".
        if lower
            .split(',')
            .any(|segment| segment.trim() == "partner")
        {
            abilities.push(PairingAbility::Partner);
        }
    }
    abilities
}

fn parse_pairing_line(line: &str, lower: &str) -> Option<PairingAbility> {
    const PARTNER_WITH: &str = "partner with ";

    match lower {
        "partner" => return Some(PairingAbility::Partner),
        "friends forever" => return Some(PairingAbility::PartnerGroup("friends forever".into())),
        "choose a background" => return Some(PairingAbility::ChooseBackground),
        "doctor's companion" => return Some(PairingAbility::DoctorsCompanion),
        _ => {}
    }
    if lower.starts_with(PARTNER_WITH) {
        let named = line.get(PARTNER_WITH.len()..)?.trim();
        return Some(PairingAbility::PartnerWith(named.to_string()));
    }
    let rest = lower.strip_prefix("partner")?.trim_start();
    let group = rest.strip_prefix('—').or_else(|| rest.strip_prefix('-'))?;
    let group = group.trim();
    if group.is_empty() {
        return None;
    }
    Some(PairingAbility::PartnerGroup(group.to_string()))
}

fn is_background(card: &CardRecord) -> bool {
    card.front_face().has_type("background")
}

fn is_time_lord_doctor(card: &CardRecord) -> bool {
    let face = card.front_face();
    face.is_legendary_creature()
        && face.has_type("time")
        && face.has_type("lord")
        && face.has_type("doctor")
}

fn names_card(named: &str, card: &CardRecord) -> bool {
    let named = normalize_name(named);
    named == normalize_name(&card.name) || named == normalize_name(&card.front_face().name)
}

// ---------------------------------------------------------------------------
// Pairing
// ---------------------------------------------------------------------------

/// The way two commanders are allowed to share the command zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pairing {
    Partner,
    PartnerWith,
    PartnerGroup,
    Background,
    DoctorsCompanion,
}

/// How `a` and `b` may pair, if at all.
///
/// Plain partner and group partners pair symmetrically. "Partner with"
/// pairs only with the card it names. A Background pairs with a legendary
/// creature that says "Choose a Background", and a Doctor's companion with
/// a legendary Time Lord Doctor.
pub fn pairing_between(a: &CardRecord, b: &CardRecord) -> Option<Pairing> {
    if a.id == b.id || a.name == b.name {
        return None;
    }
    let abilities_a = pairing_abilities(a);
    let abilities_b = pairing_abilities(b);

    if let Some(chooser) = background_chooser(a, b, &abilities_a, &abilities_b) {
        if is_eligible_commander(chooser) {
            return Some(Pairing::Background);
        }
    }

    if !is_eligible_commander(a) || !is_eligible_commander(b) {
        return None;
    }

    if abilities_a.contains(&PairingAbility::Partner) && abilities_b.contains(&PairingAbility::Partner) {
        return Some(Pairing::Partner);
    }

    let names = |abilities: &[PairingAbility], other: &CardRecord| {
        abilities.iter().any(|ability| match ability {
            PairingAbility::PartnerWith(named) => names_card(named, other),
            _ => false,
        })
    };
    if names(&abilities_a, b) || names(&abilities_b, a) {
        return Some(Pairing::PartnerWith);
    }

    let shared_group = abilities_a.iter().any(|x| match x {
        PairingAbility::PartnerGroup(group) => abilities_b
            .iter()
            .any(|y| matches!(y, PairingAbility::PartnerGroup(other) if other == group)),
        _ => false,
    });
    if shared_group {
        return Some(Pairing::PartnerGroup);
    }

    let companion = |abilities: &[PairingAbility], other: &CardRecord| {
        abilities.contains(&PairingAbility::DoctorsCompanion) && is_time_lord_doctor(other)
    };
    if companion(&abilities_a, b) || companion(&abilities_b, a) {
        return Some(Pairing::DoctorsCompanion);
    }

    None
}

/// The "Choose a Background" creature when exactly one side is a Background.
fn background_chooser<'c>(
    a: &'c CardRecord,
    b: &'c CardRecord,
    abilities_a: &[PairingAbility],
    abilities_b: &[PairingAbility],
) -> Option<&'c CardRecord> {
    if abilities_a.contains(&PairingAbility::ChooseBackground) && is_background(b) {
        Some(a)
    } else if abilities_b.contains(&PairingAbility::ChooseBackground) && is_background(a) {
        Some(b)
    } else {
        None
    }
}

/// True if `a` and `b` may be played together as commanders.
pub fn can_pair_as_commanders(a: &CardRecord, b: &CardRecord) -> bool {
    pairing_between(a, b).is_some()
}

/// Cards from `candidates` that can join `commander`, sorted by name.
pub fn pairing_candidates<'a, I>(commander: &CardRecord, candidates: I) -> Vec<&'a CardRecord>
where
    I: IntoIterator<Item = &'a CardRecord>,
{
    let mut found: Vec<&CardRecord> = candidates
        .into_iter()
        .filter(|c| can_pair_as_commanders(commander, c))
        .collect();
    found.sort_by(|a, b| a.name.cmp(&b.name));
    found.dedup_by(|a, b| a.id == b.id);
    found
}

// ---------------------------------------------------------------------------
// CommanderSelection
// ---------------------------------------------------------------------------

/// The one or two cards chosen to lead a deck.
///
/// Construction only checks the count; rules are checked by the validator.
#[derive(Debug, Clone, PartialEq)]
pub struct CommanderSelection<'a> {
    cards: Vec<&'a CardRecord>,
}

impl<'a> CommanderSelection<'a> {
    pub fn new(cards: Vec<&'a CardRecord>) -> Result<Self> {
        match cards.len() {
            0 => Err(DeckCheckError::Precondition(
                "no commander selected".to_string(),
            )),
            1 | 2 => Ok(Self { cards }),
            n => Err(DeckCheckError::Precondition(format!(
                "a deck has at most two commanders, got {n}"
            ))),
        }
    }

    pub fn single(card: &'a CardRecord) -> Self {
        Self { cards: vec![card] }
    }

    pub fn pair(a: &'a CardRecord, b: &'a CardRecord) -> Self {
        Self { cards: vec![a, b] }
    }

    pub fn cards(&self) -> &[&'a CardRecord] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: &CardRecord) -> bool {
        self.cards.iter().any(|c| c.name == card.name)
    }

    pub fn names(&self) -> Vec<String> {
        self.cards.iter().map(|c| c.name.clone()).collect()
    }

    pub fn color_identity(&self) -> ColorSet {
        color_identity_of(self)
    }
}

/// Union of the selected commanders' color identities.
pub fn color_identity_of(selection: &CommanderSelection<'_>) -> ColorSet {
    selection
        .cards
        .iter()
        .fold(ColorSet::COLORLESS, |acc, c| acc.union(c.color_identity))
}
