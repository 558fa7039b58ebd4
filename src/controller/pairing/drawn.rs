use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::model::{DrawnTeam, FastMap, TeamId, WeekId};

/// Picks stand-in teams for virtual matchups. A draw already on record for a
/// week and absent team is always reused; new draws are kept until taken so
/// they can be written with the rest of the week.
pub struct TeamDrawer {
    seed: Option<u64>,
    rng: StdRng,
    known: FastMap<(WeekId, TeamId), TeamId>,
    fresh: Vec<DrawnTeam>,
}

impl TeamDrawer {
    /// With a seed, every (week, absent team) draw is reproducible on its own,
    /// independent of the order draws are made in.
    #[must_use]
    pub fn new(seed: Option<u64>, existing: &[DrawnTeam]) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            seed,
            rng,
            known: existing
                .iter()
                .map(|d| ((d.week, d.absent_team), d.drawn_team))
                .collect(),
            fresh: Vec::new(),
        }
    }

    #[must_use]
    pub fn existing(&self, week: WeekId, absent_team: TeamId) -> Option<TeamId> {
        self.known.get(&(week, absent_team)).copied()
    }

    /// Looks up or makes the draw. `None` only when nothing is on record and
    /// there are no candidates.
    pub fn draw(
        &mut self,
        week: WeekId,
        absent_team: TeamId,
        candidates: &[TeamId],
    ) -> Option<TeamId> {
        if let Some(team) = self.existing(week, absent_team) {
            return Some(team);
        }
        let mut sorted = candidates.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        let pick = match self.seed {
            Some(seed) => {
                let mixed = seed
                    ^ (week as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
                    ^ (absent_team as u64).rotate_left(32);
                let mut rng = StdRng::seed_from_u64(mixed);
                sorted.choose(&mut rng).copied()
            }
            None => sorted.choose(&mut self.rng).copied(),
        }?;
        self.known.insert((week, absent_team), pick);
        self.fresh.push(DrawnTeam {
            week,
            absent_team,
            drawn_team: pick,
        });
        Some(pick)
    }

    /// Draws made since the last call.
    pub fn take_new(&mut self) -> Vec<DrawnTeam> {
        std::mem::take(&mut self.fresh)
    }
}
