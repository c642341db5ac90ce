use std::{collections::BTreeMap, path::PathBuf};

use diamond_analysis::{
    SimulationSeed,
    monte_carlo::{self, RelationFit, RelationPoint, SimulationParams},
};
use serde::Serialize;
use tracing::warn;

use super::event_season::{self, EventSeasonArg};
use crate::util;

/// Width of a difference bin in the scatter.
const BIN_WIDTH: f64 = 0.01;
/// Characters for a 100% success rate.
const BAR_WIDTH: usize = 50;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RelationArg {
    #[clap(flatten)]
    season: EventSeasonArg,

    /// Games drawn for each batter per trial
    #[arg(long, default_value_t = 20)]
    games_per_sample: usize,

    /// Trials per player pair
    #[arg(long, default_value_t = 200)]
    trials: usize,

    /// Number of random player pairs
    #[arg(long, default_value_t = 100)]
    points: usize,

    /// Seed as 32 hex digits (random if omitted)
    #[arg(long)]
    seed: Option<SimulationSeed>,

    /// Save the (difference, success rate) points as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Save the points and fitted line as JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    low: &'a str,
    high: &'a str,
    difference: f64,
    success_rate: f64,
}

#[derive(Serialize)]
struct RelationReport<'a> {
    seed: SimulationSeed,
    games_per_sample: usize,
    trials: usize,
    fit: Option<RelationFit>,
    points: &'a [RelationPoint],
}

pub(crate) fn run(arg: &RelationArg) -> anyhow::Result<()> {
    let (events, averages) = arg.season.load_season()?;
    let (seed, mut rng) = event_season::seeded_rng(arg.seed);
    let params = SimulationParams {
        games_per_sample: arg.games_per_sample,
        trials: arg.trials,
    };
    let points =
        monte_carlo::difference_relation(&events, &averages, params, arg.points, &mut rng)?;
    let fit = RelationFit::estimate(&points)
        .inspect_err(|e| warn!("cannot fit a trend line: {e}"))
        .ok();

    println!("Average Gap vs. Ranking Success");
    println!("==========================================\n");
    println!("  Seed:             {seed}");
    println!("  Games per sample: {}", arg.games_per_sample);
    println!("  Trials per pair:  {}", arg.trials);
    println!("  Pairs:            {}", points.len());
    println!();
    print_scatter(&points);
    println!();
    match &fit {
        Some(fit) => println!(
            "  Trend: success = {:.3} + {:.3} * difference",
            fit.intercept, fit.slope
        ),
        None => println!("  Trend: N/A"),
    }

    if let Some(path) = &arg.csv {
        let rows: Vec<_> = points
            .iter()
            .map(|p| CsvRow {
                low: &p.low.player_id,
                high: &p.high.player_id,
                difference: p.difference,
                success_rate: p.success_rate,
            })
            .collect();
        util::save_csv(&rows, path)?;
    }
    if let Some(path) = &arg.output {
        let report = RelationReport {
            seed,
            games_per_sample: arg.games_per_sample,
            trials: arg.trials,
            fit,
            points: &points,
        };
        util::save_json(&report, path)?;
    }
    Ok(())
}

/// Mean success rate per difference bin, drawn as horizontal bars.
fn print_scatter(points: &[RelationPoint]) {
    let mut bins = BTreeMap::<u32, (usize, f64)>::new();
    for point in points {
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bin = (point.difference / BIN_WIDTH + 1e-9).floor().max(0.0) as u32;
        let (count, sum) = bins.entry(bin).or_default();
        *count += 1;
        *sum += point.success_rate;
    }

    println!("  {:<13} {:>6} {:>8}", "Difference", "Pairs", "Success");
    println!("  {}", "-".repeat(31 + BAR_WIDTH));
    for (bin, (count, sum)) in bins {
        #[expect(clippy::cast_precision_loss)]
        let mean = sum / count as f64;
        let start = f64::from(bin) * BIN_WIDTH;
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let bar = (mean * BAR_WIDTH as f64).round() as usize;
        println!(
            "  {:<13} {:>6} {:>7.1}%  {}",
            format!("{start:.3}-{:.3}", start + BIN_WIDTH),
            count,
            mean * 100.0,
            "#".repeat(bar)
        );
    }
}
