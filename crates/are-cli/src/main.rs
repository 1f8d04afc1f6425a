// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `are`: runs a bundled demo scenario to completion and judges the
//! resulting trace, printing the structured JSON verdict. Loading
//! scenarios from a serialized wire format, wiring a real agent, and
//! soft (LLM-backed) checkers are out of scope for this binary — it
//! exists to make the engine runnable and demonstrable, ambient glue
//! around the `are-core`/`are-env` machinery rather than a feature of
//! its own.

mod exit_error;
mod judge_config;
mod output;
mod scenarios;

use std::path::PathBuf;

use anyhow::Context;
use are_core::EnvironmentView;
use are_env::{Environment, EnvironmentConfig, TickOutcome, ToolAugmentationConfig};
use are_judge::SoftCheckContext;
use are_scenario::Scenario;
use clap::{Parser, Subcommand};

use exit_error::ExitError;
use output::RunResult;

#[derive(Parser)]
#[command(name = "are", about = "Discrete-event agent simulation and judging engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a bundled scenario to completion and judge the resulting trace.
    Run {
        /// Scenario name, e.g. `find-image` or `extra-message-tolerance`.
        scenario: String,
        /// Number of extra `send_message_to_user` calls the judge tolerates.
        #[arg(long, default_value_t = 1)]
        extra_send_message_to_user_allowed: usize,
        /// Write the JSON result here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List every bundled scenario name.
    ListScenarios,
}

fn main() {
    tracing_subscriber::fmt::try_init().ok();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        if let Some(exit_err) = err.downcast_ref::<ExitError>() {
            eprintln!("error: {exit_err}");
            std::process::exit(exit_err.code);
        }
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::ListScenarios => {
            for scenario in scenarios::all() {
                println!("{}", scenario.name());
            }
            Ok(())
        }
        Command::Run { scenario, extra_send_message_to_user_allowed, output } => {
            let result = run_scenario(&scenario, extra_send_message_to_user_allowed)?;
            let json = serde_json::to_string_pretty(&result).context("serializing run result")?;
            match output {
                Some(path) => std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?,
                None => println!("{json}"),
            }
            Ok(())
        }
    }
}

fn run_scenario(name: &str, extra_send_message_to_user_allowed: usize) -> anyhow::Result<RunResult> {
    let scenario = scenarios::find(name)
        .ok_or_else(|| ExitError::new(2, format!("unknown scenario {name:?}; try `are list-scenarios`")))?;

    let validation = scenario.validate();
    if !validation.is_ok() {
        return Err(ExitError::new(3, format!("scenario {name:?} failed authoring validation: {:?}", validation.errors)).into());
    }

    let registry = scenario.init_and_populate_apps();
    let events = scenario.build_events_flow(&registry);
    let env = Environment::new(EnvironmentConfig::default(), ToolAugmentationConfig::none(), registry);
    for event in events {
        env.schedule(event);
    }

    let started = std::time::Instant::now();
    loop {
        match env.tick() {
            Ok(TickOutcome::Executed(_)) => continue,
            Ok(TickOutcome::Stopped) | Ok(TickOutcome::QueueEmpty) => break,
            Err(err) => return Err(ExitError::new(4, format!("scenario {name:?} loop failed: {err}")).into()),
        }
    }
    let wall_clock_seconds = started.elapsed().as_secs_f64();

    let log = env.log_entries();
    let oracle_events = scenario.oracle_events();
    let judge = judge_config::build(extra_send_message_to_user_allowed);
    let judgment = judge
        .judge(&log, &oracle_events, &SoftCheckContext::default())
        .map_err(|err| ExitError::new(5, format!("judge failed on scenario {name:?}: {err}")))?;

    Ok(RunResult {
        scenario: name.to_string(),
        success: judgment.success,
        wall_clock_seconds,
        virtual_time_span: env.time(),
        log,
        judgment,
    })
}
