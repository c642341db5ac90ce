use std::io;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use self::{
    batting::BattingArg, regress::RegressArg, relation::RelationArg, simulate::SimulateArg,
    team_stats::TeamStatsArg,
};

mod batting;
mod event_season;
mod regress;
mod relation;
mod simulate;
mod team_stats;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log debug output (overridden by `RUST_LOG`)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Aggregate one season's game log into per-team batting stats
    TeamStats(#[clap(flatten)] TeamStatsArg),
    /// Regress runs on OBP and SLG for every season in a directory
    Regress(#[clap(flatten)] RegressArg),
    /// Season batting averages of eligible players
    Batting(#[clap(flatten)] BattingArg),
    /// Estimate how often sampled games rank two batters correctly
    Simulate(#[clap(flatten)] SimulateArg),
    /// Relate batting-average gaps to sample ranking success
    Relation(#[clap(flatten)] RelationArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose)?;
    match args.mode {
        Mode::TeamStats(arg) => team_stats::run(&arg)?,
        Mode::Regress(arg) => regress::run(&arg)?,
        Mode::Batting(arg) => batting::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Relation(arg) => relation::run(&arg)?,
    }
    Ok(())
}

/// Logs to stderr so reports on stdout stay clean.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_filter = if verbose {
        "diamond=debug,warn"
    } else {
        "diamond=info,warn"
    };
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;
    Ok(())
}
