//! Shared test fixtures for the deck checking integration tests.
//!
//! Provides a small AllPrintings document covering the awkward cases: cards
//! printed in several sets, accented names, split and transforming cards,
//! partner and background commanders, basic and snow lands, cards with
//! their own copy limits, banned and not-legal cards, art series and token
//! objects, and malformed entries.

#![allow(dead_code)]

use commander_deck_check::CardIndex;
use serde_json::{json, Value};
use std::io::Write;
use std::path::PathBuf;

fn legal() -> Value {
    json!({ "commander": "Legal", "vintage": "Legal", "legacy": "Legal" })
}

fn card(name: &str, type_line: &str, mana_cost: &str, text: &str, uuid: &str) -> Value {
    json!({
        "name": name,
        "type": type_line,
        "manaCost": mana_cost,
        "text": text,
        "layout": "normal",
        "uuid": uuid,
        "legalities": legal(),
    })
}

fn with(mut value: Value, key: &str, field: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        obj.insert(key.to_string(), field);
    }
    value
}

fn basic(name: &str, subtype: &str, symbol: &str) -> Value {
    card(
        name,
        &format!("Basic Land — {subtype}"),
        "",
        &format!("({{T}}: Add {{{symbol}}}.)"),
        &format!("uuid-{}", name.to_lowercase().replace(' ', "-")),
    )
}

/// The fixture dataset as JSON.
pub fn sample_all_printings() -> Value {
    let c21_cards = vec![with(
        with(
            card("Sol Ring", "Artifact", "{1}", "{T}: Add {C}{C}.", "uuid-sol-ring-c21"),
            "identifiers",
            json!({ "scryfallId": "sf-sol-ring-c21", "scryfallOracleId": "oracle-sol-ring" }),
        ),
        "setCode",
        json!("C21"),
    )];

    let cmm_cards = vec![
        with(
            card("Sol Ring", "Artifact", "{1}", "{T}: Add {C}{C}.", "uuid-sol-ring-cmm"),
            "setCode",
            json!("CMM"),
        ),
        with(
            card(
                "Brainstorm",
                "Instant",
                "{U}",
                "Draw three cards, then put two cards from your hand on top of your library in any order.",
                "uuid-brainstorm-cmm",
            ),
            "legalities",
            json!({ "commander": "Banned", "legacy": "Legal" }),
        ),
    ];

    let tst_cards = vec![
        // Same oracle card in a second set with more permissive legalities.
        with(
            card(
                "Brainstorm",
                "Instant",
                "{U}",
                "Draw three cards, then put two cards from your hand on top of your library in any order.",
                "uuid-brainstorm-tst",
            ),
            "legalities",
            json!({ "commander": "Legal", "vintage": "Restricted" }),
        ),
        card(
            "Séance",
            "Enchantment",
            "{2}{W}{W}",
            "At the beginning of each upkeep, you may exile target creature card from your graveyard.",
            "uuid-seance",
        ),
        card("Jötun Grunt", "Creature — Giant Soldier", "{1}{W}", "Cumulative upkeep—Put two cards from a single graveyard on the bottom of their owner's library.", "uuid-jotun-grunt-accented"),
        card("Jotun Grunt", "Creature — Giant Soldier", "{1}{W}", "Vigilance", "uuid-jotun-grunt-plain"),
        // Split card: one object per half.
        json!({
            "name": "Fire // Ice",
            "faceName": "Fire",
            "side": "a",
            "type": "Instant",
            "manaCost": "{1}{R}",
            "text": "Fire deals 2 damage divided as you choose among one or two targets.",
            "layout": "split",
            "uuid": "uuid-fire-ice-a",
            "legalities": legal(),
        }),
        json!({
            "name": "Fire // Ice",
            "faceName": "Ice",
            "side": "b",
            "type": "Instant",
            "manaCost": "{1}{U}",
            "text": "Tap target permanent.\nDraw a card.",
            "layout": "split",
            "uuid": "uuid-fire-ice-b",
            "legalities": legal(),
        }),
        // Transforming card with a colorless front and a black back. The back
        // object is listed first on purpose.
        json!({
            "name": "Westvale Abbey // Ormendahl, Profane Prince",
            "faceName": "Ormendahl, Profane Prince",
            "side": "b",
            "type": "Legendary Creature — Demon",
            "text": "Flying, lifelink, indestructible, haste",
            "colorIndicator": ["B"],
            "colorIdentity": ["B"],
            "layout": "transform",
            "uuid": "uuid-westvale-b",
            "legalities": legal(),
        }),
        json!({
            "name": "Westvale Abbey // Ormendahl, Profane Prince",
            "faceName": "Westvale Abbey",
            "side": "a",
            "type": "Land",
            "text": "{T}: Add {C}.\n{5}, {T}, Pay 1 life: Create a 1/1 colorless Human Cleric creature token.\n{5}, {T}, Sacrifice five creatures: Transform Westvale Abbey, then untap it.",
            "colorIdentity": ["B"],
            "layout": "transform",
            "uuid": "uuid-westvale-a",
            "legalities": legal(),
        }),
        // Commanders.
        card(
            "Lazav, the Multifarious",
            "Legendary Creature — Shapeshifter",
            "{U}{B}",
            "When Lazav, the Multifarious enters the battlefield, surveil 1.\n{X}: Lazav, the Multifarious becomes a copy of target creature card in your graveyard with mana value X.",
            "uuid-lazav",
        ),
        card(
            "Thrasios, Triton Hero",
            "Legendary Creature — Merfolk Wizard",
            "{G}{U}",
            "{4}: Scry 1, then reveal the top card of your library. If it's a land card, put it onto the battlefield tapped. Otherwise, draw a card.\nPartner (You can have two commanders if both have partner.)",
            "uuid-thrasios",
        ),
        card(
            "Tymna the Weaver",
            "Legendary Creature — Human Cleric",
            "{1}{W}{B}",
            "Lifelink\nAt the beginning of your postcombat main phase, you may pay X life, where X is the number of opponents that were dealt combat damage this turn. If you do, draw X cards.\nPartner (You can have two commanders if both have partner.)",
            "uuid-tymna",
        ),
        card(
            "Pir, Imaginative Rascal",
            "Legendary Creature — Human",
            "{2}{G}",
            "Partner with Toothy, Imaginary Friend (When this creature enters the battlefield, target player may put Toothy into their hand from their library, then shuffle.)\nIf one or more counters would be put on a permanent your team controls, that many plus one of each of those kinds of counters are put on that permanent instead.",
            "uuid-pir",
        ),
        card(
            "Toothy, Imaginary Friend",
            "Legendary Creature — Illusion",
            "{3}{U}",
            "Partner with Pir, Imaginative Rascal (When this creature enters the battlefield, target player may put Pir into their hand from their library, then shuffle.)\nWhenever you draw a card, put a +1/+1 counter on Toothy, Imaginary Friend.",
            "uuid-toothy",
        ),
        card(
            "Wilson, Refined Grizzly",
            "Legendary Creature — Bear Warrior",
            "{1}{G}",
            "Choose a Background (You can have a Background as a second commander.)\nReach, trample",
            "uuid-wilson",
        ),
        card(
            "Candlekeep Sage",
            "Legendary Enchantment — Background",
            "{2}{U}",
            "Commander creatures you own have \"When this creature enters the battlefield, draw a card.\"",
            "uuid-candlekeep-sage",
        ),
        card(
            "Teferi, Temporal Archmage",
            "Legendary Planeswalker — Teferi",
            "{4}{U}{U}",
            "+1: Look at the top two cards of your library. Put one of them into your hand and the other on the bottom of your library.\n−1: Untap up to four target permanents.\nTeferi, Temporal Archmage can be your commander.",
            "uuid-teferi",
        ),
        card("The One Ring", "Legendary Artifact", "{4}", "Indestructible", "uuid-one-ring"),
        with(
            card("Golos, Tireless Pilgrim", "Legendary Artifact Creature — Scout", "{5}", "When Golos, Tireless Pilgrim enters the battlefield, you may search your library for a land card.", "uuid-golos"),
            "legalities",
            json!({ "commander": "Banned", "vintage": "Legal" }),
        ),
        // Deck cards.
        card("Crosis's Charm", "Instant", "{U}{B}{R}", "Choose one —\n• Return target permanent to its owner's hand.\n• Destroy target nonartifact creature.", "uuid-crosis-charm"),
        with(
            card("Mana Crypt", "Artifact", "{0}", "{T}: Add {C}{C}.", "uuid-mana-crypt"),
            "legalities",
            json!({ "commander": "Banned", "vintage": "Restricted" }),
        ),
        with(
            card("Mox Lotus", "Artifact", "{15}", "{T}: Add {∞}.", "uuid-mox-lotus"),
            "legalities",
            json!({}),
        ),
        with(
            card(
                "Relentless Rats",
                "Creature — Rat",
                "{1}{B}{B}",
                "Relentless Rats gets +1/+1 for each other creature you control named Relentless Rats.\nA deck can have any number of cards named Relentless Rats.",
                "uuid-relentless-rats",
            ),
            "hasAlternativeDeckLimit",
            json!(true),
        ),
        card(
            "Seven Dwarves",
            "Creature — Dwarf",
            "{1}{R}{R}",
            "Seven Dwarves gets +1/+1 for each other creature you control named Seven Dwarves.\nA deck can have up to seven cards named Seven Dwarves.",
            "uuid-seven-dwarves",
        ),
        card("Dark Ritual", "Instant", "{B}", "Add {B}{B}{B}.", "uuid-dark-ritual"),
        card("Counterspell", "Instant", "{U}{U}", "Counter target spell.", "uuid-counterspell"),
        basic("Island", "Island", "U"),
        basic("Swamp", "Swamp", "B"),
        basic("Forest", "Forest", "G"),
        card(
            "Snow-Covered Island",
            "Basic Snow Land — Island",
            "",
            "({T}: Add {U}.)",
            "uuid-snow-covered-island",
        ),
        // Unusable entries.
        json!({ "type": "Artifact", "uuid": "uuid-nameless" }),
        json!({ "name": "Typeless Oddity", "uuid": "uuid-typeless" }),
        json!({ "name": 42, "type": "Instant" }),
        json!("not a card"),
    ];

    // Non-game objects that share names with real cards.
    let awst_cards = vec![
        json!({
            "name": "Westvale Abbey // Westvale Abbey",
            "faceName": "Westvale Abbey",
            "side": "a",
            "type": "Card // Card",
            "layout": "art_series",
            "uuid": "uuid-westvale-art",
            "legalities": {},
        }),
        json!({
            "name": "Human Cleric",
            "type": "Token Creature — Human Cleric",
            "layout": "token",
            "uuid": "uuid-human-cleric-token",
        }),
    ];

    json!({
        "meta": { "date": "2026-10-01", "version": "5.2.2+20261001" },
        "data": {
            "C21": { "code": "C21", "name": "Commander 2021", "cards": c21_cards },
            "CMM": { "code": "CMM", "name": "Commander Masters", "cards": cmm_cards },
            "TST": { "code": "TST", "name": "Test Set", "cards": tst_cards },
            "AWST": { "code": "AWST", "name": "Art Series Test", "cards": awst_cards },
        }
    })
}

/// A partner commander with the given Commander legality (`None` omits it).
pub fn partner(name: &str, mana_cost: &str, commander: Option<&str>, uuid: &str) -> Value {
    let legalities = match commander {
        Some(status) => json!({ "commander": status, "vintage": "Legal" }),
        None => json!({ "vintage": "Legal" }),
    };
    with(
        card(
            name,
            "Legendary Creature — Human Warrior",
            mana_cost,
            "Partner (You can have two commanders if both have partner.)",
            uuid,
        ),
        "legalities",
        legalities,
    )
}

/// The sample dataset with `extra` appended to the TST set, as an index.
pub fn sample_index_with(extra: Vec<Value>) -> CardIndex {
    let mut value = sample_all_printings();
    if let Some(cards) = value["data"]["TST"]["cards"].as_array_mut() {
        cards.extend(extra);
    }
    let (path, _tmp) = write_dataset(&value);
    CardIndex::from_path(&path).unwrap()
}

/// Write `value` as `AllPrintings.json` into a fresh temp dir.
///
/// Returns `(path, tempfile::TempDir)`. The caller must keep the `TempDir`
/// alive for as long as the file is needed.
pub fn write_dataset(value: &Value) -> (PathBuf, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("AllPrintings.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(serde_json::to_string(value).unwrap().as_bytes())
        .unwrap();
    (path, tmp_dir)
}

/// Write the sample dataset to disk and return its path.
pub fn sample_dataset_file() -> (PathBuf, tempfile::TempDir) {
    write_dataset(&sample_all_printings())
}

/// Build a `CardIndex` from the sample dataset, loaded through a file.
pub fn sample_index() -> CardIndex {
    let (path, _tmp) = sample_dataset_file();
    CardIndex::from_path(&path).unwrap()
}

/// A legal 100-card deck for Lazav, the Multifarious (commander not listed).
pub const LAZAV_DECK: &str = "\
1 Sol Ring
1 Brainstorm
1 Westvale Abbey
1 Dark Ritual
1 Counterspell
47 Island
47 Swamp
";
