use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for lifegrid")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, doc, wasm build
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the bridge crate for wasm32-unknown-unknown
    Wasm {
        /// Build without optimizations
        #[arg(long)]
        debug: bool,
    },
    /// Run the tick/randomize timing benchmarks
    Bench,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            run_fmt()?;
            run_clippy()?;
            run_tests()?;
            run_doc()?;
            run_wasm(false)?;
        }
        Commands::Fmt => run_fmt()?,
        Commands::Clippy => run_clippy()?,
        Commands::Test => run_tests()?,
        Commands::Doc => run_doc()?,
        Commands::Wasm { debug } => run_wasm(debug)?,
        Commands::Bench => run_bench()?,
    }

    Ok(())
}

/// Run `cargo` with the given arguments, failing if it exits non-zero.
fn cargo(label: &str, args: &[&str]) -> Result<()> {
    println!("==> Running cargo {label}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {label} failed");
    }
    Ok(())
}

fn run_fmt() -> Result<()> {
    cargo("fmt --check", &["fmt", "--all", "--", "--check"])
}

fn run_clippy() -> Result<()> {
    cargo(
        "clippy",
        &[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
    )
}

fn run_tests() -> Result<()> {
    cargo("test", &["test", "--workspace"])
}

fn run_doc() -> Result<()> {
    cargo("doc", &["doc", "--workspace", "--no-deps"])
}

fn run_wasm(debug: bool) -> Result<()> {
    let mut args = vec![
        "build",
        "-p",
        "lifegrid-wasm",
        "--target",
        "wasm32-unknown-unknown",
    ];
    if !debug {
        args.push("--release");
    }
    cargo("build (wasm32)", &args)
}

fn run_bench() -> Result<()> {
    cargo("bench", &["bench", "-p", "lifegrid-kernel"])
}
