// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! contractum-probe: runs one contract scenario per invocation.
//!
//! Exit status:
//! - 0: the scenario completed
//! - 2: `--catch` recovered a ContractViolation (printed as JSON on stdout)
//! - abnormal termination (SIGABRT): the abort path ran
//!
//! ```text
//! contractum-probe account --balance -3 --via abort
//! contractum-probe --catch account --balance 0 --via throw
//! contractum-probe policy
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use contractum::{ContractViolation, Policy};
use serde::Serialize;
use tracing::Level;

mod cli;
mod scenario;

use cli::{Cli, Commands};

/// Output of the `policy` subcommand.
#[derive(Serialize)]
struct PolicyReport {
    policy: Policy,
    checking: bool,
    unwind: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    tracing::debug!(policy = %Policy::ACTIVE, "probe starting");

    if let Commands::Policy = cli.command {
        let report = PolicyReport {
            policy: Policy::ACTIVE,
            checking: Policy::ACTIVE.is_checking(),
            unwind: cfg!(panic = "unwind"),
        };
        println!("{}", serde_json::to_string(&report)?);
        return Ok(ExitCode::SUCCESS);
    }

    if !cli.catch {
        run(cli.command);
        return Ok(ExitCode::SUCCESS);
    }

    quiet_violations();
    match panic::catch_unwind(AssertUnwindSafe(|| run(cli.command))) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(payload) => {
            let violation = payload
                .downcast::<ContractViolation>()
                .map_err(|_| anyhow::anyhow!("scenario panicked with a foreign payload"))?;
            tracing::info!(clause = %violation.clause(), "caught violation");
            let json = serde_json::to_string(&*violation)
                .context("failed to serialize violation")?;
            println!("{}", json);
            Ok(ExitCode::from(2))
        }
    }
}

fn run(command: Commands) {
    match command {
        Commands::Account { balance, via } => scenario::account(balance, via),
        Commands::Invariant { corrupt } => scenario::invariant(corrupt),
        Commands::Expect { outcome } => scenario::expect(outcome),
        Commands::Reconfigure => scenario::reconfigure(),
        Commands::Policy => {}
    }
}

/// Keep the default hook for every panic except the violations we catch.
fn quiet_violations() {
    let default = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if !info.payload().is::<ContractViolation>() {
            default(info);
        }
    }));
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(level)
        .with_target(false)
        .init();
}
