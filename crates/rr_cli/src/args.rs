// crates/rr_cli/src/args.rs
//
// Argument surface for `rr`. Two subcommands operate on local JSON files:
// - `round`:   roster + state (+ options) → next round on stdout/--out, state rewritten
// - `results`: state + decisions → state rewritten
// Paths must be local (no scheme://). Seeds are decimal u64 or 0x-hex.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "rr",
    disable_help_subcommand = true,
    about = "Doubles round-robin scheduler: fair byes, fresh partners, ladder and rating formats"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// More log output on stderr (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Errors only on stderr.
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate the next round and persist the updated state.
    Round(RoundArgs),
    /// Fold recorded match outcomes into the persisted state.
    Results(ResultsArgs),
}

#[derive(Debug, Args, Clone)]
pub struct RoundArgs {
    /// Roster JSON: array of names / {id, name} records, or {"players": [...]}.
    #[arg(long)]
    pub players: PathBuf,

    /// Session state JSON; created on the first round.
    #[arg(long)]
    pub state: PathBuf,

    /// Courts in play (clamped to 1..=6; default 6).
    #[arg(long)]
    pub courts: Option<u32>,

    /// random | throne | upDownRiver | gauntlet | cream. Default: the state's mode.
    #[arg(long)]
    pub mode: Option<String>,

    /// RNG seed, decimal u64 or 0x-hex. Omit for OS entropy.
    #[arg(long, value_parser = parse_seed)]
    pub seed: Option<u64>,

    /// Engine options JSON (maxRetries, fitCourtsToRoster, ratings).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the search attempt budget.
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Reduce courts so every court in play can be filled.
    #[arg(long)]
    pub fit_courts: bool,

    /// Write the round JSON here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ResultsArgs {
    /// Session state JSON written by `rr round`.
    #[arg(long)]
    pub state: PathBuf,

    /// Decisions JSON: array of {court, team1Ids, team2Ids, winnerTeam}, or {"decisions": [...]}.
    #[arg(long)]
    pub decisions: PathBuf,

    /// Engine options JSON (rating parameters).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Errors surfaced by argument validation. Messages are short and stable.
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be a local file (no scheme): {p}"),
            CliError::NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Seed parser: decimal u64 or 0x-hex (1..=16 nybbles).
pub fn parse_seed(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty seed".into());
    }
    if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if rest.is_empty() || rest.len() > 16 || !rest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err("hex seed must be 1..16 hex digits".into());
        }
        u64::from_str_radix(rest, 16).map_err(|_| "hex seed out of range".into())
    } else {
        s.parse::<u64>().map_err(|_| "decimal seed must be a valid u64".into())
    }
}

#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("file:")
}

fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    match p.to_str() {
        Some(s) if has_scheme(s) => Err(CliError::NonLocalPath(s.to_string())),
        _ => Ok(()),
    }
}

fn ensure_local_file(p: &Path, label: &str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    match fs::metadata(p) {
        Ok(m) if m.is_file() => Ok(()),
        _ => Err(CliError::NotFound(format!("{label} {}", p.display()))),
    }
}

impl Cli {
    /// Local-path and existence checks that clap cannot express.
    pub fn validate(&self) -> Result<(), CliError> {
        match &self.command {
            Command::Round(a) => {
                ensure_local_file(&a.players, "--players")?;
                ensure_local_path(&a.state)?;
                if let Some(c) = &a.config {
                    ensure_local_file(c, "--config")?;
                }
                if let Some(o) = &a.out {
                    ensure_local_path(o)?;
                }
            }
            Command::Results(a) => {
                ensure_local_file(&a.state, "--state")?;
                ensure_local_file(&a.decisions, "--decisions")?;
                if let Some(c) = &a.config {
                    ensure_local_file(c, "--config")?;
                }
            }
        }
        Ok(())
    }
}
