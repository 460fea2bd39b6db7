//! Structural invariants not expressible via JSON Schema.

use crate::plan::{NodeKind, PlanNode};

/// Check the plan shape handed to the execution engine:
/// - Root is a `Plan` with exactly one `ThreadGroup`
/// - Every parent/child kind pairing is permitted
/// - The group holds one `OnceController` (login) followed by one target `Sampler`
/// - `TokenExtractor` only under the login sampler, `HeaderInjector` only under
///   the target sampler, and they appear together or not at all
/// - The data source never recycles rows and stops threads on exhaustion
pub fn validate_invariants(root: &PlanNode) -> Vec<String> {
    let mut errors = Vec::new();

    if root.kind() != NodeKind::Plan {
        errors.push(format!("root must be Plan, got {:?}", root.kind()));
    }
    check_containment(root, root.name(), &mut errors);

    let groups: Vec<&PlanNode> = children_of(root, NodeKind::ThreadGroup);
    if groups.len() != 1 {
        errors.push(format!(
            "{}: expected exactly one ThreadGroup, found {}",
            root.name(),
            groups.len()
        ));
    }
    if let Some(group) = groups.first() {
        check_group(group, &format!("{}/{}", root.name(), group.name()), &mut errors);
    }

    errors
}

fn check_containment(node: &PlanNode, path: &str, errors: &mut Vec<String>) {
    for child in node.children() {
        let child_path = format!("{}/{}", path, child.name());
        if !node.kind().can_contain(child.kind()) {
            errors.push(format!(
                "{}: {:?} cannot contain {:?}",
                child_path,
                node.kind(),
                child.kind()
            ));
        }
        check_containment(child, &child_path, errors);
    }
}

fn check_group(group: &PlanNode, path: &str, errors: &mut Vec<String>) {
    let onces = children_of(group, NodeKind::OnceController);
    let targets = children_of(group, NodeKind::Sampler);
    if onces.len() != 1 {
        errors.push(format!(
            "{path}: expected exactly one OnceController, found {}",
            onces.len()
        ));
    }
    if targets.len() != 1 {
        errors.push(format!(
            "{path}: expected exactly one target Sampler, found {}",
            targets.len()
        ));
    }
    let position = |kind: NodeKind| group.children().iter().position(|c| c.kind() == kind);
    if let (Some(once_at), Some(target_at)) = (
        position(NodeKind::OnceController),
        position(NodeKind::Sampler),
    ) && once_at > target_at
    {
        errors.push(format!("{path}: login must precede the target Sampler"));
    }

    let logins: Vec<&PlanNode> = onces
        .iter()
        .flat_map(|once| children_of(once, NodeKind::Sampler))
        .collect();
    if onces.len() == 1 && logins.len() != 1 {
        errors.push(format!(
            "{path}: OnceController must wrap exactly one Sampler, found {}",
            logins.len()
        ));
    }

    let extractors: usize = logins
        .iter()
        .map(|login| children_of(login, NodeKind::TokenExtractor).len())
        .sum();
    let injectors: usize = targets
        .iter()
        .map(|target| children_of(target, NodeKind::HeaderInjector).len())
        .sum();
    for login in &logins {
        if !children_of(login, NodeKind::HeaderInjector).is_empty() {
            errors.push(format!("{path}: HeaderInjector attached to login Sampler"));
        }
    }
    for target in &targets {
        if !children_of(target, NodeKind::TokenExtractor).is_empty() {
            errors.push(format!("{path}: TokenExtractor attached to target Sampler"));
        }
    }
    if extractors > 1 || injectors > 1 {
        errors.push(format!(
            "{path}: at most one TokenExtractor and one HeaderInjector allowed"
        ));
    }
    if extractors != injectors {
        errors.push(format!(
            "{path}: TokenExtractor and HeaderInjector must appear together"
        ));
    }

    let sources = children_of(group, NodeKind::DataSource);
    if sources.len() != 1 {
        errors.push(format!(
            "{path}: expected exactly one DataSource, found {}",
            sources.len()
        ));
    }
    for source in sources {
        if source.property("recycle") != Some("false") {
            errors.push(format!("{path}/{}: recycle must be false", source.name()));
        }
        if source.property("stop_thread") != Some("true") {
            errors.push(format!("{path}/{}: stop_thread must be true", source.name()));
        }
    }
}

fn children_of(node: &PlanNode, kind: NodeKind) -> Vec<&PlanNode> {
    node.children()
        .iter()
        .filter(|child| child.kind() == kind)
        .collect()
}
