//! Reverse rule index.
//!
//! Rules are filed under their rightmost node, then linked outward through
//! their ancestors, so a query starts from the element's own names and only
//! ever visits rules whose tail could match it.
//!
//! Storage is a set of arenas addressed by [`GroupId`] and [`LinkId`]:
//!
//! ```text
//! depth 0   "div.box" group ── link "*" ──parents──┐
//!                                                  │ "body"
//! depth 1   "body" group ───── link "div.box" <────┘  records: [body div.box {...}]
//! ```
//!
//! At depth `d` a group holds one link per distinct chain to its right; the
//! link's `parents` map goes one node further left, keyed by that node's full
//! name. Records live on the link reached by a selector's leftmost node.

use std::cell::OnceCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

use serde::Serialize;

use crate::declaration::DeclarationBlock;
use crate::registry::PropertyRegistry;
use crate::selector::{Selector, SelectorNode, UNIVERSAL, name_variants};

/// Handle of a [`RuleLinkGroup`] in the index arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

/// Handle of a [`RuleLink`] in the index arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(usize);

/// One inserted rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleRecord {
    /// Specificity of the rule's selector.
    pub specificity: u32,
    /// Creation batch of the rule's selector; later rules win ties.
    pub batch: u64,
    /// Where the rule came from (a stylesheet or component name).
    pub namespace: Option<String>,
    /// Canonical selector text.
    pub selector: String,
    /// The declarations.
    pub block: DeclarationBlock,
}

impl RuleRecord {
    /// Whether this record outranks `other` in cascade order.
    #[must_use]
    pub const fn outranks(&self, other: &Self) -> bool {
        self.specificity > other.specificity
            || (self.specificity == other.specificity && self.batch > other.batch)
    }
}

/// A bucket for one exact chain of nodes.
#[derive(Debug, Clone)]
pub struct RuleLink {
    group: GroupId,
    suffix: String,
    records: Vec<RuleRecord>,
    parents: BTreeMap<String, LinkId>,
}

impl RuleLink {
    /// Full names of the nodes to the right of this link's node, or `*` at depth 0.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Records of rules whose leftmost node ends here, in insertion order.
    #[must_use]
    pub fn records(&self) -> &[RuleRecord] {
        &self.records
    }

    /// Full names of the ancestor nodes linked one level further left.
    pub fn parent_names(&self) -> impl Iterator<Item = &str> {
        self.parents.keys().map(String::as_str)
    }
}

/// All links whose node at some depth has one particular full name.
#[derive(Debug, Clone)]
pub struct RuleLinkGroup {
    node: SelectorNode,
    links: BTreeMap<String, LinkId>,
}

impl RuleLinkGroup {
    /// The node every link in this group was filed under.
    #[must_use]
    pub const fn node(&self) -> &SelectorNode {
        &self.node
    }
}

/// The index.
#[derive(Debug, Clone, Default)]
pub struct RuleIndex {
    depths: Vec<HashMap<String, GroupId>>,
    groups: Vec<RuleLinkGroup>,
    links: Vec<RuleLink>,
    record_count: usize,
}

impl RuleIndex {
    /// An empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// File `block` under `selector`.
    ///
    /// Returns `false` (and stores nothing) for an empty selector.
    pub fn insert(
        &mut self,
        selector: &Selector,
        block: &DeclarationBlock,
        namespace: Option<&str>,
    ) -> bool {
        let mut suffix = String::new();
        let mut previous: Option<LinkId> = None;
        for (depth, node) in selector.nodes().iter().rev().enumerate() {
            let group = self.group_at(depth, node);
            let key = if depth == 0 { UNIVERSAL } else { suffix.as_str() };
            let link = self.link_in(group, key);
            suffix = if depth == 0 {
                node.full_name().to_owned()
            } else {
                format!("{} {suffix}", node.full_name())
            };
            if let Some(previous) = previous {
                let _ = self.links[previous.0]
                    .parents
                    .entry(node.full_name().to_owned())
                    .or_insert(link);
            }
            previous = Some(link);
        }

        let Some(link) = previous else {
            return false;
        };
        self.links[link.0].records.push(RuleRecord {
            specificity: selector.specificity(),
            batch: selector.batch(),
            namespace: namespace.map(str::to_owned),
            selector: selector.to_string(),
            block: block.clone(),
        });
        self.record_count += 1;
        true
    }

    fn group_at(&mut self, depth: usize, node: &SelectorNode) -> GroupId {
        if self.depths.len() <= depth {
            self.depths.resize_with(depth + 1, HashMap::new);
        }
        if let Some(&group) = self.depths[depth].get(node.full_name()) {
            return group;
        }
        let group = GroupId(self.groups.len());
        self.groups.push(RuleLinkGroup {
            node: node.clone(),
            links: BTreeMap::new(),
        });
        let _ = self.depths[depth].insert(node.full_name().to_owned(), group);
        group
    }

    fn link_in(&mut self, group: GroupId, suffix: &str) -> LinkId {
        if let Some(&link) = self.groups[group.0].links.get(suffix) {
            return link;
        }
        let link = LinkId(self.links.len());
        self.links.push(RuleLink {
            group,
            suffix: suffix.to_owned(),
            records: Vec::new(),
            parents: BTreeMap::new(),
        });
        let _ = self.groups[group.0].links.insert(suffix.to_owned(), link);
        link
    }

    /// Every record whose selector matches the concrete chain `selector`,
    /// highest specificity first and later batches first on ties.
    ///
    /// The walk probes each link's parent map with every name variant of
    /// every ancestor to the left, recursing into every hit. Variants are
    /// computed at most once per ancestor per query. In the worst case the
    /// walk visits each (link, ancestor position) pair once.
    #[must_use]
    pub fn query(&self, selector: &Selector) -> Vec<&RuleRecord> {
        let mut matched = Vec::new();
        let (Some(subject), Some(roots)) = (selector.subject(), self.depths.first()) else {
            return matched;
        };
        let mut walk = Walk {
            selector,
            variants: selector.nodes().iter().map(|_| OnceCell::new()).collect(),
            contributed: HashSet::new(),
            visited: HashSet::new(),
        };
        let position = selector.len() - 1;
        let names = walk.variants(position);
        for name in names.iter() {
            let Some(&group) = roots.get(name) else {
                continue;
            };
            let group = &self.groups[group.0];
            if !subject.matches(&group.node) {
                continue;
            }
            #[cfg(feature = "match-trace")]
            eprintln!("[MATCH] {selector}: subject group `{name}`");
            for &link in group.links.values() {
                self.collect(link, position, &mut walk, &mut matched);
            }
        }
        matched
    }

    fn collect<'a>(
        &'a self,
        link: LinkId,
        position: usize,
        walk: &mut Walk<'_>,
        matched: &mut Vec<&'a RuleRecord>,
    ) {
        if !walk.visited.insert((link, position)) {
            return;
        }
        let rule_link = &self.links[link.0];
        if walk.contributed.insert(link) {
            #[cfg(feature = "match-trace")]
            if !rule_link.records.is_empty() {
                eprintln!(
                    "[MATCH]   link `{}` contributes {} record(s)",
                    rule_link.suffix,
                    rule_link.records.len()
                );
            }
            for record in &rule_link.records {
                insert_ranked(matched, record);
            }
        }
        if rule_link.parents.is_empty() {
            return;
        }
        let selector = walk.selector;
        for ancestor in (0..position).rev() {
            let node = &selector.nodes()[ancestor];
            let names = walk.variants(ancestor);
            for name in names.iter() {
                let Some(&parent) = rule_link.parents.get(name) else {
                    continue;
                };
                let group = &self.groups[self.links[parent.0].group.0];
                if node.matches(&group.node) {
                    #[cfg(feature = "match-trace")]
                    eprintln!("[MATCH]   ancestor {ancestor} matched parent `{name}`");
                    self.collect(parent, ancestor, walk, matched);
                }
            }
        }
    }

    /// The group of nodes named `name` at `depth`, where depth 0 is the
    /// rightmost node of a selector.
    #[must_use]
    pub fn group(&self, depth: usize, name: &str) -> Option<&RuleLinkGroup> {
        let group = self.depths.get(depth)?.get(name)?;
        Some(&self.groups[group.0])
    }

    /// The link for `suffix` within `group`.
    #[must_use]
    pub fn link(&self, group: &RuleLinkGroup, suffix: &str) -> Option<&RuleLink> {
        group.links.get(suffix).map(|link| &self.links[link.0])
    }

    /// Number of stored records.
    #[must_use]
    pub const fn rule_count(&self) -> usize {
        self.record_count
    }

    /// Whether no rule has been inserted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Every stored record, grouped by link in creation order.
    pub fn records(&self) -> impl Iterator<Item = &RuleRecord> {
        self.links.iter().flat_map(|link| link.records.iter())
    }

    /// Render every rule as `[namespace][rank: N]` followed by its selector and block.
    #[must_use]
    pub fn describe(&self, registry: &PropertyRegistry) -> String {
        let mut out = String::new();
        for record in self.records() {
            out.push_str(&format!(
                "\n[{}][rank: {}]\n{} {}\n",
                record.namespace.as_deref().unwrap_or("<none>"),
                record.specificity,
                record.selector,
                record.block.describe(registry)
            ));
        }
        out
    }

    /// Drop every rule.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Per-query state of the ancestor walk.
struct Walk<'s> {
    selector: &'s Selector,
    /// Name variants per node position, plus `*`, computed on first use.
    variants: Vec<OnceCell<Rc<[String]>>>,
    /// Links whose records are already in the result.
    contributed: HashSet<LinkId>,
    /// (link, position) pairs already walked.
    visited: HashSet<(LinkId, usize)>,
}

impl Walk<'_> {
    /// Lookup names for the node at `position`.
    ///
    /// Returns a shared handle because the walk recurses while iterating.
    fn variants(&self, position: usize) -> Rc<[String]> {
        Rc::clone(self.variants[position].get_or_init(|| {
            let mut names = name_variants(&self.selector.nodes()[position]);
            names.push(UNIVERSAL.to_owned());
            names.into()
        }))
    }
}

/// Insert `record` before the first entry it outranks; ties keep discovery order.
fn insert_ranked<'a>(matched: &mut Vec<&'a RuleRecord>, record: &'a RuleRecord) {
    let index = matched
        .iter()
        .position(|existing| record.outranks(existing))
        .unwrap_or(matched.len());
    matched.insert(index, record);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Property;
    use crate::values::StyleValue;

    #[test]
    fn test_insert_links_chain_outward() {
        let mut index = RuleIndex::new();
        let block = DeclarationBlock::new().with(Property::Width, StyleValue::px(1.0));
        assert!(index.insert(&Selector::parse("html body div.box").unwrap(), &block, None));

        let subject = index.group(0, "div.box").unwrap();
        let root = index.link(subject, "*").unwrap();
        assert!(root.records().is_empty());
        assert_eq!(root.parent_names().collect::<Vec<_>>(), vec!["body"]);

        let body = index.group(1, "body").unwrap();
        let middle = index.link(body, "div.box").unwrap();
        assert_eq!(middle.parent_names().collect::<Vec<_>>(), vec!["html"]);

        let html = index.group(2, "html").unwrap();
        let outer = index.link(html, "body div.box").unwrap();
        assert_eq!(outer.suffix(), "body div.box");
        assert_eq!(outer.records().len(), 1);
        assert_eq!(outer.records()[0].selector, "html body div.box");
        assert!(index.group(0, "body").is_none());
    }

    #[test]
    fn test_shared_suffix_reuses_links() {
        let mut index = RuleIndex::new();
        let block = DeclarationBlock::new();
        for rule in ["a b c", "x b c", "b c"] {
            assert!(index.insert(&Selector::parse(rule).unwrap(), &block, None));
        }
        let b = index.group(1, "b").unwrap();
        let link = index.link(b, "c").unwrap();
        assert_eq!(link.records().len(), 1);
        assert_eq!(link.parent_names().collect::<Vec<_>>(), vec!["a", "x"]);
        assert_eq!(index.links.len(), 4);
    }

    #[test]
    fn test_ranked_insert_is_stable_on_ties() {
        let record = |specificity, batch| RuleRecord {
            specificity,
            batch,
            namespace: None,
            selector: String::new(),
            block: DeclarationBlock::new(),
        };
        let (a, b, c) = (record(10, 1), record(10, 1), record(20, 0));
        let mut matched = Vec::new();
        insert_ranked(&mut matched, &a);
        insert_ranked(&mut matched, &b);
        insert_ranked(&mut matched, &c);
        assert!(std::ptr::eq(matched[0], &c));
        assert!(std::ptr::eq(matched[1], &a));
        assert!(std::ptr::eq(matched[2], &b));
    }

    #[test]
    fn test_walk_variants_are_shared() {
        let selector = Selector::parse("div.a.b span").unwrap();
        let walk = Walk {
            selector: &selector,
            variants: selector.nodes().iter().map(|_| OnceCell::new()).collect(),
            contributed: HashSet::new(),
            visited: HashSet::new(),
        };
        let first = walk.variants(0);
        let second = walk.variants(0);
        assert!(Rc::ptr_eq(&first, &second));
        assert!(first.iter().any(|name| name == "div.a.b"));
        assert_eq!(first.last().map(String::as_str), Some(UNIVERSAL));
    }
}
