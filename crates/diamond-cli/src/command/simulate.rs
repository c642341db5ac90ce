use std::path::PathBuf;

use diamond_analysis::{
    SimulationSeed,
    monte_carlo::{self, SimulationOutcome, SimulationParams},
};
use serde::Serialize;
use tracing::warn;

use super::event_season::{self, EventSeasonArg};
use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    season: EventSeasonArg,

    /// Target season average of the weaker batter
    #[arg(long)]
    low: f64,

    /// Target season average of the stronger batter
    #[arg(long)]
    high: f64,

    /// Games drawn for each batter per trial
    #[arg(long, default_value_t = 20)]
    games_per_sample: usize,

    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: usize,

    /// Seed as 32 hex digits (random if omitted)
    #[arg(long)]
    seed: Option<SimulationSeed>,

    /// Save the outcome as JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct SimulationReport<'a> {
    seed: SimulationSeed,
    #[serde(flatten)]
    outcome: &'a SimulationOutcome,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    if arg.low > arg.high {
        warn!("low target {} is above high target {}", arg.low, arg.high);
    }
    let (events, averages) = arg.season.load_season()?;
    let (seed, mut rng) = event_season::seeded_rng(arg.seed);
    let params = SimulationParams {
        games_per_sample: arg.games_per_sample,
        trials: arg.trials,
    };
    let outcome = monte_carlo::simulate(&events, &averages, arg.low, arg.high, params, &mut rng)?;
    if outcome.low.player_id == outcome.high.player_id {
        warn!(
            "both targets resolved to {}; no trial can succeed",
            outcome.low.player_id
        );
    }

    println!("Batting Average Observability");
    println!("==========================================\n");
    println!("  Seed:             {seed}");
    println!(
        "  Low batter:       {} ({:.3}, target {:.3})",
        outcome.low.player_id, outcome.low.average, arg.low
    );
    println!(
        "  High batter:      {} ({:.3}, target {:.3})",
        outcome.high.player_id, outcome.high.average, arg.high
    );
    println!("  Games per sample: {}", outcome.games_per_sample);
    println!(
        "  Success rate:     {:.1}% ({} of {} trials)",
        outcome.success_rate * 100.0,
        outcome.successes,
        outcome.trials
    );
    if outcome.oversampled {
        println!("  (some samples were drawn with replacement)");
    }

    if let Some(path) = &arg.output {
        let report = SimulationReport {
            seed,
            outcome: &outcome,
        };
        util::save_json(&report, path)?;
    }
    Ok(())
}
