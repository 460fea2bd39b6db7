//! Load-test plan tree.
//!
//! A [`PlanNode`] is an owned, ordered tree handed to an external execution
//! engine. Nodes are assembled with [`NodeBuilder`] and frozen by
//! [`NodeBuilder::finish`]; a finished node exposes read accessors only.

use serde::{Deserialize, Serialize};

/// Closed set of element kinds understood by the execution engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Plan,
    ThreadGroup,
    LoopController,
    DataSource,
    SessionStore,
    Defaults,
    OnceController,
    Sampler,
    TokenExtractor,
    HeaderInjector,
}

impl NodeKind {
    /// Whether a node of this kind may own a direct child of `child` kind.
    pub fn can_contain(self, child: NodeKind) -> bool {
        match self {
            NodeKind::Plan => child == NodeKind::ThreadGroup,
            NodeKind::ThreadGroup => matches!(
                child,
                NodeKind::LoopController
                    | NodeKind::DataSource
                    | NodeKind::SessionStore
                    | NodeKind::Defaults
                    | NodeKind::OnceController
                    | NodeKind::Sampler
            ),
            NodeKind::OnceController => child == NodeKind::Sampler,
            NodeKind::Sampler => {
                matches!(child, NodeKind::TokenExtractor | NodeKind::HeaderInjector)
            }
            NodeKind::LoopController
            | NodeKind::DataSource
            | NodeKind::SessionStore
            | NodeKind::Defaults
            | NodeKind::TokenExtractor
            | NodeKind::HeaderInjector => false,
        }
    }
}

/// Single configuration value on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    pub value: String,
}

/// Name/value pair in a node's ordered collection (request arguments, headers).
///
/// Unlike properties, entries are never de-duplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub value: String,
}

impl Entry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanNode {
    kind: NodeKind,
    name: String,
    #[serde(default)]
    properties: Vec<Property>,
    #[serde(default)]
    entries: Vec<Entry>,
    #[serde(default)]
    children: Vec<PlanNode>,
}

impl PlanNode {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of `key`, if set.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|prop| prop.key == key)
            .map(|prop| prop.value.as_str())
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// First entry named `name`.
    pub fn entry(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value.as_str())
    }

    pub fn children(&self) -> &[PlanNode] {
        &self.children
    }

    /// Pre-order walk over this node and all descendants.
    pub fn walk(&self) -> Vec<&PlanNode> {
        let mut out = Vec::new();
        walk_inner(self, &mut out);
        out
    }
}

fn walk_inner<'a>(node: &'a PlanNode, out: &mut Vec<&'a PlanNode>) {
    out.push(node);
    for child in &node.children {
        walk_inner(child, out);
    }
}

/// Append-only construction handle for a [`PlanNode`].
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    node: PlanNode,
}

impl NodeBuilder {
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            node: PlanNode {
                kind,
                name: name.into(),
                properties: Vec::new(),
                entries: Vec::new(),
                children: Vec::new(),
            },
        }
    }

    /// Set `key` to `value`. An existing key keeps its position.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        let key = key.into();
        let value = value.to_string();
        match self.node.properties.iter_mut().find(|prop| prop.key == key) {
            Some(existing) => existing.value = value,
            None => self.node.properties.push(Property { key, value }),
        }
        self
    }

    pub fn add_entry(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.node.entries.push(Entry::new(name, value));
        self
    }

    pub fn add_child(&mut self, child: PlanNode) -> &mut Self {
        debug_assert!(
            self.node.kind.can_contain(child.kind),
            "{:?} cannot contain {:?}",
            self.node.kind,
            child.kind
        );
        self.node.children.push(child);
        self
    }

    /// Consuming variant of [`set_property`](Self::set_property) for one-expression nodes.
    pub fn with_property(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set_property(key, value);
        self
    }

    pub fn finish(self) -> PlanNode {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_property_replaces_value_in_place() {
        let mut builder = NodeBuilder::new(NodeKind::Sampler, "s");
        builder
            .set_property("path", "/a")
            .set_property("method", "GET")
            .set_property("path", "/b");
        let node = builder.finish();

        let keys: Vec<&str> = node.properties().iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["path", "method"]);
        assert_eq!(node.property("path"), Some("/b"));
    }

    #[test]
    fn entries_keep_duplicates_in_order() {
        let mut builder = NodeBuilder::new(NodeKind::Sampler, "s");
        builder.add_entry("id", "1").add_entry("id", "2");
        let node = builder.finish();

        let values: Vec<&str> = node.entries().iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, vec!["1", "2"]);
        assert_eq!(node.entry("id"), Some("1"));
    }

    #[test]
    fn walk_visits_in_pre_order() {
        let leaf = NodeBuilder::new(NodeKind::Sampler, "leaf").finish();
        let mut once = NodeBuilder::new(NodeKind::OnceController, "once");
        once.add_child(leaf);
        let mut group = NodeBuilder::new(NodeKind::ThreadGroup, "group");
        group
            .add_child(NodeBuilder::new(NodeKind::Defaults, "defaults").finish())
            .add_child(once.finish());
        let tree = group.finish();

        let nodes = tree.walk();
        let names: Vec<&str> = nodes.iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["group", "defaults", "once", "leaf"]);
    }

    #[test]
    fn containment_rules_match_plan_shape() {
        assert!(NodeKind::Plan.can_contain(NodeKind::ThreadGroup));
        assert!(!NodeKind::Plan.can_contain(NodeKind::Sampler));
        assert!(NodeKind::Sampler.can_contain(NodeKind::HeaderInjector));
        assert!(!NodeKind::DataSource.can_contain(NodeKind::Sampler));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "DataSource cannot contain Sampler")]
    fn add_child_rejects_illegal_containment() {
        let mut source = NodeBuilder::new(NodeKind::DataSource, "csv");
        source.add_child(NodeBuilder::new(NodeKind::Sampler, "stray").finish());
    }

    #[test]
    fn serializes_kind_as_pascal_case() {
        let node = NodeBuilder::new(NodeKind::HeaderInjector, "h").finish();
        let json = serde_json::to_value(&node).expect("serialize");
        assert_eq!(json["kind"], "HeaderInjector");
    }
}
