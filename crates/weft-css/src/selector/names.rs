//! Name variants of a selector node.
//!
//! The rule index is keyed by node full names. A rule written for `.a:hover`
//! must still be found for an element described as `button.a.b:focus:hover`,
//! so lookups probe every full name that a sub-pattern of the element could
//! have been written as.

use weft_common::warning::warn_once;

use super::SelectorNode;

/// Classes and pseudo-classes beyond this count are left out of the variant
/// set; the set doubles in size with each one.
pub const MAX_VARIANT_COMPONENTS: usize = 12;

/// Every full name a pattern matching `node` could have.
///
/// The result covers each combination of: no type or the type, no id or the
/// id, any subset of the classes, and any subset of the pseudo-classes,
/// except the empty combination. Every string is in canonical full-name
/// order, so it can be compared directly with rule-index keys.
///
/// For `text#btn.a.b:hover` this yields `text`, `#btn`, `text#btn`, `.a`,
/// `.b`, `.a.b`, `:hover`, `text.a:hover`, `#btn.a.b:hover` and so on:
/// 4 x 2^2 x 2^1 - 1 = 31 names.
#[must_use]
pub fn name_variants(node: &SelectorNode) -> Vec<String> {
    let mut heads = vec![String::new()];
    if let Some(type_name) = node.type_name() {
        heads.push(type_name.to_owned());
    }
    if let Some(id) = node.id() {
        let with_id: Vec<String> = heads.iter().map(|head| format!("{head}#{id}")).collect();
        heads.extend(with_id);
    }

    let classes: Vec<&str> = node.classes().iter().map(String::as_str).collect();
    let pseudo_classes: Vec<&str> = node.pseudo_classes().iter().map(String::as_str).collect();
    let class_budget = MAX_VARIANT_COMPONENTS.min(classes.len());
    let pseudo_budget = (MAX_VARIANT_COMPONENTS - class_budget).min(pseudo_classes.len());
    if class_budget + pseudo_budget < classes.len() + pseudo_classes.len() {
        warn_once(
            "CSS",
            &format!(
                "{node}: only the first {MAX_VARIANT_COMPONENTS} classes and pseudo-classes take part in rule lookup"
            ),
        );
    }

    let class_sets = subsets(&classes[..class_budget], '.');
    let pseudo_sets = subsets(&pseudo_classes[..pseudo_budget], ':');

    let mut names = Vec::with_capacity(heads.len() * class_sets.len() * pseudo_sets.len());
    for head in &heads {
        for class_set in &class_sets {
            for pseudo_set in &pseudo_sets {
                if head.is_empty() && class_set.is_empty() && pseudo_set.is_empty() {
                    continue;
                }
                names.push(format!("{head}{class_set}{pseudo_set}"));
            }
        }
    }
    names
}

/// Every subset of `items` (which are sorted), each rendered with `sigil`
/// before every item. The empty subset comes first.
fn subsets(items: &[&str], sigil: char) -> Vec<String> {
    (0..1_usize << items.len())
        .map(|mask| {
            items
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .fold(String::new(), |mut acc, (_, item)| {
                    acc.push(sigil);
                    acc.push_str(item);
                    acc
                })
        })
        .collect()
}
