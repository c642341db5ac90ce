use std::path::PathBuf;

use diamond_analysis::batting::{self, PlayerSeasonAverage};

use super::event_season::EventSeasonArg;
use crate::util::{self, format_optional};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BattingArg {
    #[clap(flatten)]
    season: EventSeasonArg,

    /// Also list players below the plate-appearance threshold
    #[arg(long)]
    all: bool,

    /// Save the listed players as JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &BattingArg) -> anyhow::Result<()> {
    let events = arg.season.load_events()?;
    let rule = arg.season.rule();
    let mut players = batting::aggregate_players(&events, &rule);
    if !arg.all {
        players.retain(|p| p.average.is_some());
    }
    players.sort_by(|a, b| {
        b.average
            .unwrap_or(-1.0)
            .total_cmp(&a.average.unwrap_or(-1.0))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });

    println!(
        "Season Batting ({}, PA >= {})",
        arg.season.events.display(),
        rule.min_plate_appearances()
    );
    println!("==========================================\n");
    print_player_table(&players);

    if let Some(path) = &arg.output {
        util::save_json(&players, path)?;
    }
    Ok(())
}

fn print_player_table(players: &[PlayerSeasonAverage]) {
    println!(
        "  {:<10} {:>6} {:>6} {:>6} {:>6} {:>7}",
        "Player", "Games", "PA", "AB", "H", "BA"
    );
    println!("  {}", "-".repeat(46));
    for player in players {
        println!(
            "  {:<10} {:>6} {:>6} {:>6} {:>6} {:>7}",
            player.player_id,
            player.games,
            player.plate_appearances,
            player.at_bats,
            player.hits,
            format_optional(player.average, 3),
        );
    }
    println!("\n  {} players", players.len());
}
