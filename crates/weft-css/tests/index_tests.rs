//! Integration tests for the reverse rule index.

use weft_css::index::RuleIndex;
use weft_css::{DeclarationBlock, Property, PropertyRegistry, Selector, StyleValue};

fn block(width: f32) -> DeclarationBlock {
    DeclarationBlock::new().with(Property::Width, StyleValue::px(width))
}

fn insert(index: &mut RuleIndex, rule: &str, width: f32) {
    assert!(index.insert(&Selector::parse(rule).unwrap(), &block(width), None));
}

/// Selector text of every matching record, in rank order.
fn matched(index: &RuleIndex, chain: &str) -> Vec<String> {
    index
        .query(&Selector::parse(chain).unwrap())
        .into_iter()
        .map(|record| record.selector.clone())
        .collect()
}

#[test]
fn test_round_trip() {
    let mut index = RuleIndex::new();
    insert(&mut index, "div.box", 10.0);

    let records = index.query(&Selector::parse("body div.box.wide").unwrap());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].block, block(10.0));

    assert!(matched(&index, "body div.other").is_empty());
    assert!(matched(&index, "span.box").is_empty());
}

#[test]
fn test_empty_index_matches_nothing() {
    let index = RuleIndex::new();
    assert!(matched(&index, "div").is_empty());
    assert!(index.query(&Selector::new()).is_empty());
}

#[test]
fn test_ancestor_chain_must_be_satisfied() {
    let mut index = RuleIndex::new();
    insert(&mut index, ".panel .item", 1.0);

    assert_eq!(matched(&index, "div.panel ul li.item"), vec![".panel .item"]);
    assert!(matched(&index, "div ul li.item").is_empty());
    // The ancestor must be to the left of the subject.
    assert!(matched(&index, "li.item.panel").is_empty());
}

#[test]
fn test_ancestor_matched_through_any_variant() {
    let mut index = RuleIndex::new();
    insert(&mut index, ".a:hover span", 1.0);
    insert(&mut index, "div.b span", 2.0);
    insert(&mut index, "#main span", 3.0);

    let found = matched(&index, "div#main.a.b.c:focus:hover span");
    assert_eq!(found, vec!["#main span", ".a:hover span", "div.b span"]);
}

#[test]
fn test_every_branch_contributes() {
    let mut index = RuleIndex::new();
    insert(&mut index, "body .list .item", 1.0);
    insert(&mut index, "html .item", 2.0);
    insert(&mut index, "body .item", 3.0);
    insert(&mut index, ".item", 4.0);

    let found = matched(&index, "html body div.list span.item");
    assert_eq!(found.len(), 4);
    assert_eq!(found[0], "body .list .item");
}

#[test]
fn test_universal_rules_match_everything() {
    let mut index = RuleIndex::new();
    insert(&mut index, "*", 1.0);
    insert(&mut index, "* .item", 2.0);

    assert_eq!(matched(&index, "span"), vec!["*"]);
    assert_eq!(matched(&index, "div span.item"), vec!["* .item", "*"]);
}

#[test]
fn test_specificity_then_later_rule_wins() {
    let mut index = RuleIndex::new();
    insert(&mut index, "div", 1.0);
    insert(&mut index, ".box", 2.0);
    insert(&mut index, "#main", 3.0);
    insert(&mut index, ".wide", 4.0);

    let records = index.query(&Selector::parse("div#main.box.wide").unwrap());
    let widths: Vec<_> = records
        .iter()
        .map(|record| record.block.get(Property::Width).and_then(StyleValue::as_px))
        .collect();
    assert_eq!(widths, vec![Some(3.0), Some(4.0), Some(2.0), Some(1.0)]);
}

#[test]
fn test_same_selector_twice_keeps_both_records() {
    let mut index = RuleIndex::new();
    insert(&mut index, "div", 1.0);
    insert(&mut index, "div", 2.0);

    assert_eq!(index.rule_count(), 2);
    let records = index.query(&Selector::parse("div").unwrap());
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].block, block(2.0));
}

#[test]
fn test_structural_recheck_rejects_partial_match() {
    let mut index = RuleIndex::new();
    insert(&mut index, "button.primary", 1.0);

    assert!(matched(&index, "a.primary").is_empty());
    assert_eq!(matched(&index, "button.primary.large"), vec!["button.primary"]);
}

#[test]
fn test_namespace_and_describe() {
    let registry = PropertyRegistry::new();
    let mut index = RuleIndex::new();
    let rule = Selector::parse("div .box").unwrap();
    assert!(index.insert(&rule, &block(4.0), Some("widgets")));
    assert!(!index.insert(&Selector::new(), &block(1.0), None));

    let records = index.query(&Selector::parse("div span.box").unwrap());
    assert_eq!(records[0].namespace.as_deref(), Some("widgets"));

    let text = index.describe(&registry);
    assert!(text.contains("[widgets][rank: 11]"));
    assert!(text.contains("div .box {\n\twidth: 4px;\n}"));
}

#[test]
fn test_clear_drops_rules() {
    let mut index = RuleIndex::new();
    insert(&mut index, "div", 1.0);
    index.clear();
    assert!(index.is_empty());
    assert!(matched(&index, "div").is_empty());
}
