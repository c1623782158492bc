//! Custom cargo commands for contractum.
//!
//! Usage:
//!   cargo xtask matrix    - Run the test suite in every check configuration
//!   cargo xtask check     - Quick check (tests + clippy, default features)
//!   cargo xtask bench     - Run benchmarks

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// One build configuration of the matrix.
struct Config {
    name: &'static str,
    args: &'static [&'static str],
}

/// Disabled first, then enabled: the same tests must pass after the flags
/// flip, with nothing left over from the previous build.
const MATRIX: &[Config] = &[
    Config {
        name: "disabled",
        args: &["--features", "contractum/disabled"],
    },
    Config {
        name: "abort (default)",
        args: &[],
    },
    Config {
        name: "exceptions",
        args: &["--features", "contractum/exceptions"],
    },
    Config {
        name: "release (no debug_assertions)",
        args: &["--release", "--features", "contractum/exceptions"],
    },
];

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("matrix") => matrix()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  matrix    Run all tests under disabled, abort, exceptions and release builds
  check     Quick check (cargo test + clippy)
  bench     Run benchmarks
"#
    );
}

/// Run the workspace tests once per configuration.
fn matrix() -> Result<()> {
    println!("==========================================");
    println!("contractum configuration matrix");
    println!("==========================================\n");

    let total = MATRIX.len();
    for (i, config) in MATRIX.iter().enumerate() {
        println!("[{}/{}] {}...", i + 1, total, config.name);
        let mut args = vec!["test", "--workspace", "--quiet"];
        args.extend_from_slice(config.args);
        run_cargo(&args).with_context(|| format!("configuration `{}` failed", config.name))?;
        println!("✓ {}\n", config.name);
    }

    println!("==========================================");
    println!("✓ ALL CONFIGURATIONS PASSED");
    println!("==========================================");
    Ok(())
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/2] cargo test...");
    run_cargo(&["test", "--workspace", "--quiet"])?;

    println!("[2/2] cargo clippy...");
    run_cargo(&[
        "clippy",
        "--workspace",
        "--all-targets",
        "--quiet",
        "--",
        "-D",
        "warnings",
    ])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench", "-p", "contractum"])
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("no current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}
