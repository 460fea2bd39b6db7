//! Read-only lookups over a finished plan.

use crate::plan::{NodeKind, PlanNode};

/// First node of `kind` in pre-order, starting with `node` itself.
pub fn find_kind(node: &PlanNode, kind: NodeKind) -> Option<&PlanNode> {
    if node.kind() == kind {
        return Some(node);
    }
    node.children()
        .iter()
        .find_map(|child| find_kind(child, kind))
}

pub fn count_kind(node: &PlanNode, kind: NodeKind) -> usize {
    node.walk()
        .into_iter()
        .filter(|candidate| candidate.kind() == kind)
        .count()
}

/// The sampler wrapped by the thread group's once-only controller.
pub fn login_sampler(plan: &PlanNode) -> Option<&PlanNode> {
    let once = find_kind(plan, NodeKind::OnceController)?;
    once.children()
        .iter()
        .find(|child| child.kind() == NodeKind::Sampler)
}

/// The sampler attached directly to the thread group.
pub fn target_sampler(plan: &PlanNode) -> Option<&PlanNode> {
    let group = find_kind(plan, NodeKind::ThreadGroup)?;
    group
        .children()
        .iter()
        .find(|child| child.kind() == NodeKind::Sampler)
}

/// `/`-separated name path from `root` to the first node of `kind`.
pub fn node_path(root: &PlanNode, kind: NodeKind) -> Option<String> {
    let mut path = Vec::new();
    if node_path_inner(root, kind, &mut path) {
        return Some(path.join("/"));
    }
    None
}

fn node_path_inner<'a>(node: &'a PlanNode, kind: NodeKind, path: &mut Vec<&'a str>) -> bool {
    path.push(node.name());
    if node.kind() == kind {
        return true;
    }
    for child in node.children() {
        if node_path_inner(child, kind, path) {
            return true;
        }
    }
    path.pop();
    false
}
