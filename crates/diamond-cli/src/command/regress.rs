use std::path::PathBuf;

use anyhow::Context as _;
use diamond_analysis::{
    regression::CoefficientSeries,
    team_season,
    trend::{self, DecadeSummary},
};
use diamond_data::{
    game_log,
    season::{self, YearRange},
};
use serde::Serialize;
use tracing::info;

use crate::util::{self, format_optional};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RegressArg {
    /// Directory holding GL<year>.TXT game logs
    dir: PathBuf,

    /// First season to include
    #[arg(long)]
    from: Option<u16>,

    /// Last season to include
    #[arg(long)]
    to: Option<u16>,

    /// Save the coefficient series and decade summaries as JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct RegressReport<'a> {
    seasons: &'a CoefficientSeries,
    decades: &'a [DecadeSummary],
}

pub(crate) fn run(arg: &RegressArg) -> anyhow::Result<()> {
    let years = YearRange {
        from: arg.from,
        to: arg.to,
    };
    let files = season::discover_game_logs(&arg.dir, years)
        .with_context(|| format!("Failed to scan directory: {}", arg.dir.display()))?;
    if files.is_empty() {
        anyhow::bail!("No GL<year>.TXT game logs found in {}", arg.dir.display());
    }

    let mut series = CoefficientSeries::default();
    for file in &files {
        let rows = game_log::load_game_log(&file.path)
            .with_context(|| format!("Failed to read game log: {}", file.path.display()))?;
        let teams = team_season::aggregate_season(&rows);
        series.push(file.year, &teams)?;
    }
    info!("fitted {} seasons", series.len());
    let decades = trend::summarize_by_decade(&series);

    println!("Runs ~ OBP + SLG by Season");
    println!("==========================================\n");
    print_series_table(&series);
    println!();

    println!("OBP/SLG Coefficient Ratio by Decade");
    println!("==========================================\n");
    print_decade_table(&decades);

    if let Some(path) = &arg.output {
        let report = RegressReport {
            seasons: &series,
            decades: &decades,
        };
        util::save_json(&report, path)?;
    }
    Ok(())
}

fn print_series_table(series: &CoefficientSeries) {
    println!(
        "  {:<6} {:>6} {:>11} {:>10} {:>10} {:>8}",
        "Season", "Teams", "Intercept", "OBP", "SLG", "OBP/SLG"
    );
    println!("  {}", "-".repeat(56));
    for season in series.seasons() {
        let c = &season.coefficients;
        println!(
            "  {:<6} {:>6} {:>11.2} {:>10.2} {:>10.2} {:>8}",
            season.year,
            c.teams,
            c.intercept,
            c.obp,
            c.slg,
            format_optional(c.obp_slg_ratio(), 3),
        );
    }
}

fn print_decade_table(decades: &[DecadeSummary]) {
    println!(
        "  {:<9} {:>7} {:>7} {:>7} {:>7} {:>7} {:>7} {:>7} {:>8}",
        "Decade", "Seasons", "Min", "Q1", "Median", "Mean", "Q3", "Max", "Variance"
    );
    println!("  {}", "-".repeat(74));
    for decade in decades {
        let label = format!("{}-{:02}", decade.start_year, decade.end_year % 100);
        let stats = decade.stats.as_ref();
        let value = |v: Option<f64>| format_optional(v, 3);
        println!(
            "  {:<9} {:>7} {:>7} {:>7} {:>7} {:>7} {:>7} {:>7} {:>8}",
            label,
            decade.seasons,
            value(stats.map(|s| s.min)),
            value(stats.map(|s| s.first_quartile)),
            value(stats.map(|s| s.median)),
            value(stats.map(|s| s.mean)),
            value(stats.map(|s| s.third_quartile)),
            value(stats.map(|s| s.max)),
            value(stats.and_then(|s| s.variance)),
        );
    }
}
