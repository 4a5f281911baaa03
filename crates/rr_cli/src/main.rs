// crates/rr_cli/src/main.rs
//
// `rr round`   : roster + state → next round (JSON on stdout or --out), state rewritten.
// `rr results` : state + decisions → state rewritten.
// A failed round leaves the state file untouched.

mod args;

mod exitcodes {
    pub const OK: u8 = 0;
    pub const VALIDATION: u8 = 2;
    pub const IMPOSSIBLE: u8 = 3;
    pub const IO: u8 = 4;
}

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;

use args::{Cli, Command, ResultsArgs, RoundArgs};
use rr_core::{EngineOptions, SchedRng};
use rr_io::prelude::*;
use rr_pipeline::{apply_results_with, generate_round, PlayerInput, RoundRequest};

/// CLI failure buckets; each maps to one exit code.
#[derive(Debug)]
enum MainError {
    /// Bad arguments, malformed JSON, out-of-domain options.
    Validation(String),
    /// The engine could not build a round.
    Impossible(String),
    /// Read/write/path/limit failures.
    Io(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) | MainError::Impossible(m) | MainError::Io(m) => f.write_str(m),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = cli.validate() {
        eprintln!("rr: error: {e}");
        return ExitCode::from(exitcodes::VALIDATION);
    }

    let outcome = match &cli.command {
        Command::Round(a) => run_round(a),
        Command::Results(a) => run_results(a),
    };

    match outcome {
        Ok(()) => ExitCode::from(exitcodes::OK),
        Err(e) => {
            eprintln!("rr: error: {e}");
            ExitCode::from(map_error(&e))
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    // Only fails if a subscriber is already installed.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn map_error(e: &MainError) -> u8 {
    match e {
        MainError::Validation(_) => exitcodes::VALIDATION,
        MainError::Impossible(_) => exitcodes::IMPOSSIBLE,
        MainError::Io(_) => exitcodes::IO,
    }
}

fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Json { .. } | IoError::Invalid(_) => MainError::Validation(e.to_string()),
        IoError::Path(_) | IoError::Limit(_) => MainError::Io(e.to_string()),
    }
}

fn load_engine_options(config: Option<&Path>) -> Result<EngineOptions, MainError> {
    match config {
        Some(p) => load_options(p).map_err(map_io_err),
        None => Ok(EngineOptions::default()),
    }
}

fn run_round(a: &RoundArgs) -> Result<(), MainError> {
    let mut options = load_engine_options(a.config.as_deref())?;
    if let Some(n) = a.max_retries {
        options.max_retries = n;
    }
    if a.fit_courts {
        options.fit_courts_to_roster = true;
    }

    let roster: Vec<PlayerInput> = load_roster(&a.players).map_err(map_io_err)?;
    let prior = load_state_opt(&a.state).map_err(map_io_err)?;

    let mut rng = match a.seed {
        Some(seed) => SchedRng::from_seed_u64(seed),
        None => SchedRng::from_entropy(),
    };
    tracing::debug!(seed = ?a.seed, players = roster.len(), "generating round");

    let req = RoundRequest {
        players: &roster,
        court_count: a.courts,
        mode: a.mode.as_deref(),
        options: &options,
    };
    let result = generate_round(&req, prior, &mut rng).map_err(|e| MainError::Impossible(e.to_string()))?;

    save_state(&a.state, &result.state).map_err(map_io_err)?;

    match &a.out {
        Some(out) => write_canonical_file(out, &result).map_err(map_io_err)?,
        None => {
            let mut bytes = to_canonical_bytes(&result).map_err(map_io_err)?;
            bytes.push(b'\n');
            std::io::stdout()
                .lock()
                .write_all(&bytes)
                .map_err(|e| MainError::Io(format!("stdout: {e}")))?;
        }
    }
    Ok(())
}

fn run_results(a: &ResultsArgs) -> Result<(), MainError> {
    let options = load_engine_options(a.config.as_deref())?;
    let mut state = load_state_opt(&a.state)
        .map_err(map_io_err)?
        .ok_or_else(|| MainError::Validation(format!("no session state at {}", a.state.display())))?;
    let decisions = load_decisions(&a.decisions).map_err(map_io_err)?;

    apply_results_with(&mut state, &decisions, &options.ratings);
    save_state(&a.state, &state).map_err(map_io_err)?;
    tracing::info!(round = state.round, decisions = decisions.len(), "results recorded");
    Ok(())
}
