//! mdinventory - replay click scripts against stock container layouts
//!
//! Loads a JSON click script, applies every click through the engine and
//! prints the final container and cursor state as JSON.

mod click_script;
mod config;

use anyhow::{Context, Result};
use click_script::ClickScript;
use config::{ReplayConfig, DEFAULT_CONFIG_PATH};
use mdinventory_container::layouts::StandardLayout;
use mdinventory_container::{ClickEngine, ClickOutcome};
use mdinventory_testkit::{write_json_snapshot, ClickLog, ClickRecord, ContainerSnapshot};
use serde::Serialize;
use std::{env, path::PathBuf};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: mdinventory --script <file.json> [--config <file.toml>] \
[--layout <name>] [--snapshot <path>] [--click-log <path>]";

fn main() -> Result<()> {
    let cli = CliOptions::parse(env::args().skip(1))?;

    // Config warnings are emitted before the configured filter exists.
    let config = tracing::subscriber::with_default(
        tracing_subscriber::fmt()
            .with_max_level(Level::WARN)
            .finish(),
        || ReplayConfig::load_from_path(&cli.config),
    );

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    info!("Starting mdinventory v{}", env!("CARGO_PKG_VERSION"));

    let Some(script_path) = cli.script.clone() else {
        anyhow::bail!("missing --script\n{USAGE}");
    };
    let fallback_layout = cli.layout.unwrap_or(config.default_layout);
    let script = ClickScript::from_path(&script_path, fallback_layout)
        .with_context(|| format!("failed to load click script {}", script_path.display()))?;

    let mut click_log = match cli.click_log.as_ref().or(config.click_log_path.as_ref()) {
        Some(path) => Some(
            ClickLog::create(path)
                .with_context(|| format!("failed to create click log {}", path.display()))?,
        ),
        None => None,
    };

    let report = replay(&script, click_log.as_mut())?;
    println!("{}", report.to_pretty_json()?);

    if let Some(path) = cli.snapshot.as_ref().or(config.snapshot_path.as_ref()) {
        write_json_snapshot(path, &report.final_state)?;
        info!(path = %path.display(), "wrote final-state snapshot");
    }
    Ok(())
}

/// Result of replaying one script.
#[derive(Debug, Serialize)]
struct ReplayReport {
    layout: StandardLayout,
    steps: usize,
    changed: usize,
    final_state: ContainerSnapshot,
}

impl ReplayReport {
    fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to encode replay report")
    }
}

fn replay(script: &ClickScript, mut click_log: Option<&mut ClickLog>) -> Result<ReplayReport> {
    let engine = ClickEngine::standard();
    let (mut container, mut cursor) = script.open();

    let mut changed = 0;
    for (step, &event) in script.steps().iter().enumerate() {
        let outcome = engine.handle_click(&mut container, &mut cursor, event);
        if outcome == ClickOutcome::Changed {
            changed += 1;
        }
        if let Some(log) = click_log.as_deref_mut() {
            log.write(&ClickRecord {
                step,
                event,
                outcome,
            })?;
        }
    }
    info!(steps = script.steps().len(), changed, "replay finished");

    Ok(ReplayReport {
        layout: script.layout_kind(),
        steps: script.steps().len(),
        changed,
        final_state: ContainerSnapshot::capture(&container, &cursor),
    })
}

#[derive(Debug)]
struct CliOptions {
    script: Option<PathBuf>,
    config: PathBuf,
    layout: Option<StandardLayout>,
    snapshot: Option<PathBuf>,
    click_log: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Self> {
        let mut opts = CliOptions {
            script: None,
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            layout: None,
            snapshot: None,
            click_log: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--script" => opts.script = args.next().map(PathBuf::from),
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = PathBuf::from(path);
                    }
                }
                "--layout" => {
                    let name = args.next().unwrap_or_default();
                    let layout = StandardLayout::from_name(&name)
                        .with_context(|| format!("unknown layout {name:?}"))?;
                    opts.layout = Some(layout);
                }
                "--snapshot" => opts.snapshot = args.next().map(PathBuf::from),
                "--click-log" => opts.click_log = args.next().map(PathBuf::from),
                other => anyhow::bail!("unrecognised argument {other:?}\n{USAGE}"),
            }
        }
        Ok(opts)
    }
}
