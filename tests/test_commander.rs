//! Commander eligibility and pairing tests against the sample dataset.

mod common;

use commander_deck_check::commander::{pairing_abilities, PairingAbility};
use commander_deck_check::{
    can_pair_as_commanders, color_identity_of, eligible_commanders, is_eligible_commander,
    pairing_between, pairing_candidates, CardIndex, ColorSet, CommanderSelection,
    DeckCheckError, Pairing,
};
use commander_deck_check::models::CardRecord;

fn card<'a>(index: &'a CardIndex, name: &str) -> &'a CardRecord {
    index
        .lookup_exact(name)
        .unwrap_or_else(|| panic!("{name} missing from fixture"))
}

// ---------------------------------------------------------------------------
// Eligibility
// ---------------------------------------------------------------------------

#[test]
fn legendary_creatures_are_eligible() {
    let index = common::sample_index();

    assert!(is_eligible_commander(card(&index, "Lazav, the Multifarious")));
    assert!(is_eligible_commander(card(&index, "Golos, Tireless Pilgrim")));
}

#[test]
fn can_be_your_commander_text_makes_eligible() {
    let index = common::sample_index();
    assert!(is_eligible_commander(card(&index, "Teferi, Temporal Archmage")));
}

#[test]
fn non_creature_legends_and_plain_creatures_are_not_eligible() {
    let index = common::sample_index();

    assert!(!is_eligible_commander(card(&index, "The One Ring")));
    assert!(!is_eligible_commander(card(&index, "Candlekeep Sage")));
    assert!(!is_eligible_commander(card(&index, "Relentless Rats")));
    assert!(!is_eligible_commander(card(&index, "Sol Ring")));
}

#[test]
fn eligibility_reads_the_front_face_only() {
    let index = common::sample_index();
    // The back face is a legendary creature; the front is a land.
    assert!(!is_eligible_commander(card(
        &index,
        "Westvale Abbey // Ormendahl, Profane Prince"
    )));
}

#[test]
fn eligible_commanders_filters_sorts_and_dedups() {
    let index = common::sample_index();
    let lazav = card(&index, "Lazav, the Multifarious");
    let cards = vec![
        card(&index, "Sol Ring"),
        card(&index, "Teferi, Temporal Archmage"),
        lazav,
        card(&index, "Island"),
        lazav,
    ];

    let names: Vec<&str> = eligible_commanders(cards)
        .into_iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Lazav, the Multifarious", "Teferi, Temporal Archmage"]
    );
}

// ---------------------------------------------------------------------------
// Pairing abilities
// ---------------------------------------------------------------------------

#[test]
fn pairing_abilities_ignore_reminder_text() {
    let index = common::sample_index();

    assert_eq!(
        pairing_abilities(card(&index, "Thrasios, Triton Hero")),
        vec![PairingAbility::Partner]
    );
    assert_eq!(
        pairing_abilities(card(&index, "Pir, Imaginative Rascal")),
        vec![PairingAbility::PartnerWith("Toothy, Imaginary Friend".into())]
    );
    assert_eq!(
        pairing_abilities(card(&index, "Wilson, Refined Grizzly")),
        vec![PairingAbility::ChooseBackground]
    );
    assert!(pairing_abilities(card(&index, "Lazav, the Multifarious")).is_empty());
}

// ---------------------------------------------------------------------------
// Pairing
// ---------------------------------------------------------------------------

#[test]
fn two_partners_pair() {
    let index = common::sample_index();
    let thrasios = card(&index, "Thrasios, Triton Hero");
    let tymna = card(&index, "Tymna the Weaver");

    assert_eq!(pairing_between(thrasios, tymna), Some(Pairing::Partner));
    assert_eq!(pairing_between(tymna, thrasios), Some(Pairing::Partner));
}

#[test]
fn partner_with_pairs_only_with_named_card() {
    let index = common::sample_index();
    let pir = card(&index, "Pir, Imaginative Rascal");
    let toothy = card(&index, "Toothy, Imaginary Friend");
    let thrasios = card(&index, "Thrasios, Triton Hero");

    assert_eq!(pairing_between(pir, toothy), Some(Pairing::PartnerWith));
    assert_eq!(pairing_between(toothy, pir), Some(Pairing::PartnerWith));
    assert_eq!(pairing_between(pir, thrasios), None);
}

#[test]
fn background_pairs_with_chooser() {
    let index = common::sample_index();
    let wilson = card(&index, "Wilson, Refined Grizzly");
    let sage = card(&index, "Candlekeep Sage");
    let thrasios = card(&index, "Thrasios, Triton Hero");

    assert_eq!(pairing_between(wilson, sage), Some(Pairing::Background));
    assert_eq!(pairing_between(sage, wilson), Some(Pairing::Background));
    assert_eq!(pairing_between(thrasios, sage), None);
    assert_eq!(pairing_between(wilson, thrasios), None);
}

#[test]
fn cards_without_pairing_abilities_do_not_pair() {
    let index = common::sample_index();
    let lazav = card(&index, "Lazav, the Multifarious");
    let thrasios = card(&index, "Thrasios, Triton Hero");

    assert!(!can_pair_as_commanders(lazav, thrasios));
    assert!(!can_pair_as_commanders(thrasios, thrasios));
}

#[test]
fn pairing_candidates_lists_every_partner() {
    let index = common::sample_index();
    let thrasios = card(&index, "Thrasios, Triton Hero");

    let names: Vec<&str> = pairing_candidates(thrasios, index.iter())
        .into_iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["Tymna the Weaver"]);

    let wilson = card(&index, "Wilson, Refined Grizzly");
    let names: Vec<&str> = pairing_candidates(wilson, index.iter())
        .into_iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["Candlekeep Sage"]);
}

// ---------------------------------------------------------------------------
// Selection and color identity
// ---------------------------------------------------------------------------

#[test]
fn selection_requires_one_or_two_commanders() {
    let index = common::sample_index();
    let thrasios = card(&index, "Thrasios, Triton Hero");
    let tymna = card(&index, "Tymna the Weaver");
    let lazav = card(&index, "Lazav, the Multifarious");

    assert!(matches!(
        CommanderSelection::new(vec![]),
        Err(DeckCheckError::Precondition(_))
    ));
    assert!(matches!(
        CommanderSelection::new(vec![thrasios, tymna, lazav]),
        Err(DeckCheckError::Precondition(_))
    ));
    assert_eq!(CommanderSelection::new(vec![lazav]).unwrap().len(), 1);
}

#[test]
fn selection_identity_is_the_union() {
    let index = common::sample_index();
    let thrasios = card(&index, "Thrasios, Triton Hero");
    let tymna = card(&index, "Tymna the Weaver");

    let selection = CommanderSelection::pair(thrasios, tymna);
    assert_eq!(color_identity_of(&selection), ColorSet::from_symbols("WUBG"));

    let single = CommanderSelection::single(card(&index, "Lazav, the Multifarious"));
    assert_eq!(single.color_identity(), ColorSet::from_symbols("UB"));
}

#[test]
fn background_adds_its_colors() {
    let index = common::sample_index();
    let selection = CommanderSelection::pair(
        card(&index, "Wilson, Refined Grizzly"),
        card(&index, "Candlekeep Sage"),
    );
    assert_eq!(selection.color_identity(), ColorSet::from_symbols("GU"));
}
