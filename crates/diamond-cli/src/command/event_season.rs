use std::path::PathBuf;

use anyhow::Context as _;
use diamond_analysis::{
    SimulationSeed,
    batting::{EligibilityRule, PlayerAverages},
    sampling::SeasonEvents,
};
use diamond_data::event::{self, EventRow};
use rand::Rng as _;
use rand_pcg::Pcg32;
use tracing::info;

/// Event file plus the eligibility rule applied to it.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EventSeasonArg {
    /// Path to a season's plate-appearance event file
    pub events: PathBuf,

    /// Scheduled games in the season
    #[arg(long, default_value_t = 162)]
    pub games: u32,

    /// Minimum plate appearances per scheduled game
    #[arg(long, default_value_t = 3.1)]
    pub min_pa_factor: f64,
}

impl EventSeasonArg {
    pub fn rule(&self) -> EligibilityRule {
        EligibilityRule {
            games: self.games,
            min_pa_factor: self.min_pa_factor,
        }
    }

    pub fn load_events(&self) -> anyhow::Result<Vec<EventRow>> {
        let events = event::load_events(&self.events).with_context(|| {
            format!("Failed to read event file: {}", self.events.display())
        })?;
        info!("loaded {} events from {}", events.len(), self.events.display());
        Ok(events)
    }

    /// Loads the events and indexes them for sampling.
    pub fn load_season(&self) -> anyhow::Result<(SeasonEvents, PlayerAverages)> {
        let events = self.load_events()?;
        let rule = self.rule();
        let averages = PlayerAverages::from_events(&events, &rule);
        info!(
            "{} players meet the {} plate-appearance threshold",
            averages.len(),
            rule.min_plate_appearances()
        );
        Ok((SeasonEvents::from_events(&events), averages))
    }
}

/// The given seed, or a fresh random one.
pub(crate) fn seeded_rng(seed: Option<SimulationSeed>) -> (SimulationSeed, Pcg32) {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    info!("seed: {seed}");
    (seed, seed.rng())
}
