//! Load-test plan builder CLI.
//!
//! Reads a scenario TOML file, assembles the execution plan, and emits it as
//! JSON for the execution engine.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing::info;

use loadplan::core::outline::render_outline;
use loadplan::exit_codes;
use loadplan::io::config::{SETTINGS_FILE, load_settings, load_settings_required};
use loadplan::io::init::{InitOptions, init_dir};
use loadplan::io::plan_store::{load_plan, render_plan_json, write_plan};
use loadplan::io::scenario_file::load_scenario;
use loadplan::{PlanBuilder, PlanError, PlanNode, logging};

#[derive(Parser)]
#[command(
    name = "loadplan",
    version,
    about = "Build load-test execution plans from scenario files"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write sample `scenario.toml` and `loadplan.toml` if missing.
    Init {
        /// Directory to scaffold.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
    /// Build the plan for a scenario and print it as JSON.
    Build {
        scenario: PathBuf,
        /// Builder settings file; must exist. Without it, `loadplan.toml` in the
        /// current directory is used when present, else built-in defaults.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the plan here instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print an indented outline of the plan for a scenario.
    Show {
        scenario: PathBuf,
        /// Builder settings file; must exist.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Check a plan JSON file against the schema and structural invariants.
    Validate { plan: PathBuf },
}

fn main() {
    logging::init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            eprint!("{err}");
            std::process::exit(usage_exit_code(&err));
        }
    };
    if let Err(err) = run(cli) {
        eprintln!("{:#}", err);
        let code = if err.downcast_ref::<PlanError>().is_some() {
            exit_codes::CONFIGURATION
        } else {
            exit_codes::INVALID
        };
        std::process::exit(code);
    }
}

/// Help and version requests succeed; every other usage error is invalid input,
/// keeping `CONFIGURATION` reserved for rejected scenarios.
fn usage_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit_codes::OK,
        _ => exit_codes::INVALID,
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Init { dir, force } => cmd_init(&dir, force),
        Command::Build {
            scenario,
            config,
            out,
        } => cmd_build(&scenario, config.as_deref(), out.as_deref()),
        Command::Show { scenario, config } => cmd_show(&scenario, config.as_deref()),
        Command::Validate { plan } => cmd_validate(&plan),
    }
}

fn cmd_init(dir: &Path, force: bool) -> Result<()> {
    let report = init_dir(dir, &InitOptions { force })?;
    for path in &report.written {
        println!("wrote {}", path.display());
    }
    for path in &report.skipped {
        println!("kept {}", path.display());
    }
    Ok(())
}

fn cmd_build(scenario: &Path, config: Option<&Path>, out: Option<&Path>) -> Result<()> {
    let plan = build_plan(scenario, config)?;
    match out {
        Some(path) => {
            write_plan(path, &plan)?;
            info!(path = %path.display(), "plan written");
        }
        None => print!("{}", render_plan_json(&plan)?),
    }
    Ok(())
}

fn cmd_show(scenario: &Path, config: Option<&Path>) -> Result<()> {
    let plan = build_plan(scenario, config)?;
    print!("{}", render_outline(&plan));
    Ok(())
}

fn cmd_validate(path: &Path) -> Result<()> {
    load_plan(path)?;
    println!("ok");
    Ok(())
}

fn build_plan(scenario: &Path, config: Option<&Path>) -> Result<PlanNode> {
    let settings = match config {
        Some(path) => load_settings_required(path)?,
        None => load_settings(Path::new(SETTINGS_FILE))?,
    };
    let spec = load_scenario(scenario)?;
    let plan = PlanBuilder::new(settings)
        .build(&spec)
        .with_context(|| format!("build plan for {}", scenario.display()))?;
    info!(scenario = %scenario.display(), "plan built");
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init() {
        let cli = Cli::parse_from(["loadplan", "init"]);
        assert!(matches!(cli.command, Command::Init { force: false, .. }));
    }

    #[test]
    fn parse_build_with_out() {
        let cli = Cli::parse_from(["loadplan", "build", "s.toml", "--out", "plan.json"]);
        match cli.command {
            Command::Build {
                scenario,
                config,
                out,
            } => {
                assert_eq!(scenario, PathBuf::from("s.toml"));
                assert_eq!(config, None);
                assert_eq!(out, Some(PathBuf::from("plan.json")));
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn missing_positional_is_invalid_not_configuration() {
        let err = Cli::try_parse_from(["loadplan", "build"])
            .err()
            .expect("usage error");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(usage_exit_code(&err), exit_codes::INVALID);
    }

    #[test]
    fn help_and_version_exit_ok() {
        for flag in ["--help", "--version"] {
            let err = Cli::try_parse_from(["loadplan", flag])
                .err()
                .expect("display error");
            assert_eq!(usage_exit_code(&err), exit_codes::OK);
        }
    }

    #[test]
    fn parse_validate() {
        let cli = Cli::parse_from(["loadplan", "validate", "plan.json"]);
        assert!(matches!(cli.command, Command::Validate { .. }));
    }
}
