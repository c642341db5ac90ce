use std::path::PathBuf;

use anyhow::Context as _;
use diamond_analysis::team_season::{self, TeamSeasonStat};
use diamond_data::game_log;
use tracing::info;

use crate::util::{self, format_optional};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TeamStatsArg {
    /// Path to a season game log (e.g. GL1954.TXT)
    game_log: PathBuf,

    /// Save the team stats as JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TeamStatsArg) -> anyhow::Result<()> {
    let rows = game_log::load_game_log(&arg.game_log)
        .with_context(|| format!("Failed to read game log: {}", arg.game_log.display()))?;
    let stats = team_season::aggregate_season(&rows);
    info!("aggregated {} games into {} teams", rows.len(), stats.len());

    println!("Team Batting ({})", arg.game_log.display());
    println!("==========================================\n");
    print_team_table(&stats);

    if let Some(path) = &arg.output {
        util::save_json(&stats, path)?;
    }
    Ok(())
}

fn print_team_table(stats: &[TeamSeasonStat]) {
    println!(
        "  {:<6} {:>6} {:>6} {:>6} {:>6} {:>7} {:>7} {:>7}",
        "Team", "Games", "Wins", "Runs", "RBI", "BA", "OBP", "SLG"
    );
    println!("  {}", "-".repeat(58));
    for team in stats {
        println!(
            "  {:<6} {:>6} {:>6} {:>6} {:>6} {:>7} {:>7} {:>7}",
            team.team,
            team.games,
            team.wins,
            team.runs,
            team.rbi,
            format_optional(team.batting_average, 3),
            format_optional(team.on_base_percentage, 3),
            format_optional(team.slugging, 3),
        );
    }
}
