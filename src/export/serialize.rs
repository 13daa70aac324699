//! JSON rendering of a condensed tree.

use std::collections::BTreeMap;

use serde::ser::{
    Serialize,
    SerializeMap,
    Serializer,
};

use super::order::KeyOrder;
use super::tree::{
    TranslationTree,
    TreeNode,
};

/// Serializes a tree with siblings in [`KeyOrder`] order.
#[derive(Debug, Clone, Copy)]
pub struct OrderedTree<'a> {
    /// Tree to render.
    tree: &'a TranslationTree,
    /// Sibling order at every level.
    order: &'a KeyOrder,
}

impl<'a> OrderedTree<'a> {
    /// Pairs `tree` with the order its siblings are written in.
    #[must_use]
    pub const fn new(tree: &'a TranslationTree, order: &'a KeyOrder) -> Self {
        Self { tree, order }
    }

    /// Renders the tree as JSON with two-space indentation.
    ///
    /// # Errors
    /// Propagates serializer failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for OrderedTree<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OrderedChildren { children: self.tree.root(), order: self.order }.serialize(serializer)
    }
}

/// One level of the tree, written as a JSON object.
struct OrderedChildren<'a> {
    /// Entries of this level.
    children: &'a BTreeMap<String, TreeNode>,
    /// Sibling order.
    order: &'a KeyOrder,
}

impl Serialize for OrderedChildren<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<(&String, &TreeNode)> = self.children.iter().collect();
        entries.sort_by(|(a, _), (b, _)| self.order.compare(a, b));

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (name, node) in entries {
            match node {
                TreeNode::Leaf(value) => map.serialize_entry(name, value)?,
                TreeNode::Branch(children) => map.serialize_entry(
                    name,
                    &OrderedChildren { children, order: self.order },
                )?,
            }
        }
        map.end()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::test_utils::flat;

    #[rstest]
    fn to_json_orders_every_level() {
        let tree = TranslationTree::build(&flat(&[
            ("Second Quest.description", "Second description"),
            ("Second Quest.displayName", "Second"),
            ("First Quest.step 10.1825715479", "Step ten"),
            ("First Quest.step 2.4199161944", "Step two"),
            ("First Quest.displayName", "First"),
        ]))
        .unwrap()
        .condense()
        .unwrap();
        let order = KeyOrder::new(["First Quest", "Second Quest"]);

        let json = OrderedTree::new(&tree, &order).to_json().unwrap();

        let expected = r#"{
  "First Quest": {
    "displayName": "First",
    "step 2.4199161944": "Step two",
    "step 10.1825715479": "Step ten"
  },
  "Second Quest": {
    "displayName": "Second",
    "description": "Second description"
  }
}"#;
        assert_that!(json, eq(expected));
    }

    #[rstest]
    fn to_json_parses_back_to_same_tree() {
        let input = flat(&[("a.b", "x"), ("a.c", "y \"quoted\""), ("d.e.f", "z")]);
        let tree = TranslationTree::build(&input).unwrap().condense().unwrap();

        let json = OrderedTree::new(&tree, &KeyOrder::default()).to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_that!(
            parsed,
            eq(&serde_json::json!({ "a": { "b": "x", "c": "y \"quoted\"" }, "d.e.f": "z" }))
        );
    }

    #[rstest]
    fn empty_tree_renders_empty_object() {
        let json =
            OrderedTree::new(&TranslationTree::default(), &KeyOrder::default()).to_json().unwrap();

        assert_that!(json, eq("{}"));
    }
}
