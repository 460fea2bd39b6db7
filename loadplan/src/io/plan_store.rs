//! Plan JSON load/save helpers with schema + invariant validation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde_json::Value;

use crate::core::invariants::validate_invariants;
use crate::plan::PlanNode;

pub const PLAN_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/plan/v1.schema.json"
));

/// Serialize to pretty-printed JSON with trailing newline.
pub fn render_plan_json(plan: &PlanNode) -> Result<String> {
    let mut buf = serde_json::to_string_pretty(plan).context("serialize plan json")?;
    buf.push('\n');
    Ok(buf)
}

pub fn write_plan(path: &Path, plan: &PlanNode) -> Result<()> {
    let buf = render_plan_json(plan)?;
    fs::write(path, buf).with_context(|| format!("write plan {}", path.display()))
}

/// Load and validate a plan from disk (schema + invariants).
pub fn load_plan(path: &Path) -> Result<PlanNode> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read plan {}", path.display()))?;
    parse_plan(&contents).with_context(|| format!("load plan {}", path.display()))
}

pub fn parse_plan(raw: &str) -> Result<PlanNode> {
    let value: Value = serde_json::from_str(raw).context("parse plan json")?;
    validate_schema(&value)?;
    let plan: PlanNode = serde_json::from_value(value).context("deserialize plan")?;
    let errors = validate_invariants(&plan);
    if !errors.is_empty() {
        return Err(anyhow!("plan invariants failed: {}", errors.join("; ")));
    }
    Ok(plan)
}

fn validate_schema(plan: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(PLAN_SCHEMA).context("parse plan schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if !compiled.is_valid(plan) {
        let messages = compiled
            .iter_errors(plan)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(anyhow!(
            "plan schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}
