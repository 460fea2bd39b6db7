//! Assembles a complete load-test plan from a scenario.
//!
//! Shape of every plan:
//!
//! ```text
//! Plan
//! └── ThreadGroup
//!     ├── LoopController        (one pass per virtual user)
//!     ├── DataSource            (no recycling, stop thread on EOF)
//!     ├── SessionStore
//!     ├── Defaults
//!     ├── OnceController
//!     │   └── Sampler (login)
//!     │       └── TokenExtractor?
//!     └── Sampler (target)
//!         └── HeaderInjector?
//! ```

use tracing::{debug, warn};

use crate::core::augment::{AugmentationPlan, decide};
use crate::core::scenario::ScenarioSpec;
use crate::core::settings::BuilderSettings;
use crate::error::PlanError;
use crate::plan::{NodeBuilder, NodeKind, PlanNode};

pub const PLAN_NAME: &str = "L&P Test Plan";
pub const THREAD_GROUP_NAME: &str = "Thread Group";
pub const LOGIN_SAMPLER_NAME: &str = "Login";
pub const TARGET_SAMPLER_NAME: &str = "Test Endpoint";

/// Stateless plan factory; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct PlanBuilder {
    settings: BuilderSettings,
}

impl PlanBuilder {
    pub fn new(settings: BuilderSettings) -> Self {
        Self { settings }
    }

    /// Build the plan for `spec`. Fails before any node is created when the
    /// scenario is structurally invalid.
    pub fn build(&self, spec: &ScenarioSpec) -> Result<PlanNode, PlanError> {
        spec.validate()?;

        let augmentation = decide(spec.method, spec.raw_body());
        debug!(
            method = %spec.method,
            threads = spec.thread_count,
            ?augmentation,
            "building plan"
        );
        if spec.raw_body().is_some() && !augmentation.attaches_body() {
            warn!(method = %spec.method, "request body ignored for non-mutating method");
        }

        let mut login = self.login_sampler();
        let mut target = target_request(spec);
        if augmentation.needs_token() {
            login.add_child(self.token_extractor());
            target.add_child(self.header_injector(spec, augmentation));
        }
        if augmentation.attaches_body()
            && let Some(body) = spec.raw_body()
        {
            target
                .set_property("post_body_raw", true)
                .set_property("body", body);
        }

        let mut once = NodeBuilder::new(NodeKind::OnceController, "Once Only Login Controller");
        once.add_child(login.finish());

        let mut group = thread_group(spec);
        group
            .add_child(loop_controller())
            .add_child(self.data_source(spec))
            .add_child(session_store())
            .add_child(self.defaults())
            .add_child(once.finish())
            .add_child(target.finish());

        let mut plan = NodeBuilder::new(NodeKind::Plan, PLAN_NAME).with_property("enabled", true);
        plan.add_child(group.finish());
        Ok(plan.finish())
    }

    fn data_source(&self, spec: &ScenarioSpec) -> PlanNode {
        NodeBuilder::new(NodeKind::DataSource, "CSV Data Config")
            .with_property("filename", &spec.csv_path)
            .with_property("delimiter", &self.settings.data_source.delimiter)
            .with_property("share_mode", "all")
            .with_property("ignore_first_line", true)
            .with_property("quoted_data", true)
            // Each virtual user needs a distinct row; never wrap or reuse.
            .with_property("recycle", false)
            .with_property("stop_thread", true)
            .finish()
    }

    fn defaults(&self) -> PlanNode {
        NodeBuilder::new(NodeKind::Defaults, "HTTP Request Defaults")
            .with_property("domain", &self.settings.server.domain)
            .with_property("port", self.settings.server.port)
            .finish()
    }

    fn login_sampler(&self) -> NodeBuilder {
        NodeBuilder::new(NodeKind::Sampler, LOGIN_SAMPLER_NAME)
            .with_property("path", &self.settings.login.path)
            .with_property("method", self.settings.login.method)
            .with_property("follow_redirects", true)
            .with_property("use_keepalive", true)
    }

    fn token_extractor(&self) -> PlanNode {
        NodeBuilder::new(NodeKind::TokenExtractor, "Regular Expression Extractor")
            .with_property("source", "response_headers")
            .with_property("ref_name", &self.settings.token.variable)
            .with_property("regex", &self.settings.token.regex)
            .with_property("template", "$1$")
            .finish()
    }

    fn header_injector(&self, spec: &ScenarioSpec, augmentation: AugmentationPlan) -> PlanNode {
        let mut injector = NodeBuilder::new(NodeKind::HeaderInjector, "HTTP Header Manager");
        injector.add_entry(
            self.settings.token.header.as_str(),
            format!("${{{}}}", self.settings.token.variable),
        );
        if augmentation.attaches_body()
            && let Some(content_type) = spec.content_type()
        {
            injector.add_entry("Content-Type", content_type);
        }
        injector.finish()
    }
}

fn thread_group(spec: &ScenarioSpec) -> NodeBuilder {
    NodeBuilder::new(NodeKind::ThreadGroup, THREAD_GROUP_NAME)
        .with_property("num_threads", spec.thread_count)
        .with_property("ramp_time", spec.ramp_up_seconds)
        .with_property("on_sample_error", "continue")
}

fn loop_controller() -> PlanNode {
    NodeBuilder::new(NodeKind::LoopController, "Loop Controller")
        .with_property("loops", 1)
        .with_property("continue_forever", false)
        .finish()
}

fn session_store() -> PlanNode {
    NodeBuilder::new(NodeKind::SessionStore, "HTTP Cookie Manager")
        .with_property("clear_each_iteration", false)
        .with_property("cookie_policy", "standard")
        .finish()
}

fn target_request(spec: &ScenarioSpec) -> NodeBuilder {
    let mut sampler = NodeBuilder::new(NodeKind::Sampler, TARGET_SAMPLER_NAME)
        .with_property("path", &spec.endpoint_path)
        .with_property("method", spec.method)
        .with_property("enabled", true);
    for param in &spec.parameters {
        sampler.add_entry(param.name.as_str(), param.value.as_str());
    }
    sampler
}
