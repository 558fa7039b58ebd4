use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type GolferId = i64;
pub type WeekId = i64;
pub type TeamId = i64;
pub type HoleId = i64;
pub type MatchupId = i64;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Golfer {
    pub id: GolferId,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Season {
    pub year: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Week {
    pub id: WeekId,
    pub season: i32,
    pub number: i32,
    pub date: NaiveDate,
    pub is_front: bool,
    #[serde(default)]
    pub rained_out: bool,
    #[serde(default)]
    pub num_scores: i32,
}

/// A season's fixed pairing. Well-formed teams carry exactly two golfers;
/// anything else is skipped where it is used.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Team {
    pub id: TeamId,
    pub season: i32,
    pub golfers: Vec<GolferId>,
}

impl Team {
    #[must_use]
    pub fn pair(&self) -> Option<(GolferId, GolferId)> {
        match self.golfers.as_slice() {
            [a, b] => Some((*a, *b)),
            _ => None,
        }
    }

    #[must_use]
    pub fn has_golfer(&self, golfer: GolferId) -> bool {
        self.golfers.contains(&golfer)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Hole {
    pub id: HoleId,
    pub season: i32,
    pub number: i32,
    pub par: i32,
    pub handicap: i32,
    pub handicap9: i32,
    #[serde(default)]
    pub yards: i32,
}

impl Hole {
    #[must_use]
    pub fn is_front(&self) -> bool {
        (1..=9).contains(&self.number)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Score {
    pub golfer: GolferId,
    pub week: WeekId,
    pub hole: HoleId,
    pub score: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Sub {
    pub week: WeekId,
    pub absent_golfer: GolferId,
    #[serde(default)]
    pub sub_golfer: Option<GolferId>,
    #[serde(default)]
    pub no_sub: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Handicap {
    pub golfer: GolferId,
    pub week: WeekId,
    pub value: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Matchup {
    pub id: MatchupId,
    pub week: WeekId,
    pub teams: Vec<TeamId>,
}

impl Matchup {
    #[must_use]
    pub fn involves(&self, team: TeamId) -> bool {
        self.teams.contains(&team)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GolferMatchupKey {
    pub week: WeekId,
    pub golfer: GolferId,
    pub opponent: GolferId,
    pub is_a: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GolferMatchup {
    pub week: WeekId,
    pub golfer: GolferId,
    pub opponent: GolferId,
    pub is_a: bool,
    pub subbing_for: Option<GolferId>,
    pub is_teammate_subbing: bool,
    pub opponent_team_no_subs: bool,
}

impl GolferMatchup {
    #[must_use]
    pub fn key(&self) -> GolferMatchupKey {
        GolferMatchupKey {
            week: self.week,
            golfer: self.golfer,
            opponent: self.opponent,
            is_a: self.is_a,
        }
    }

    /// The rostered golfer whose slot this is.
    #[must_use]
    pub fn original_golfer(&self) -> GolferId {
        self.subbing_for.unwrap_or(self.golfer)
    }

    #[must_use]
    pub fn flight(&self) -> Flight {
        if self.is_a { Flight::A } else { Flight::B }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flight {
    A,
    B,
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Flight::A => "A",
            Flight::B => "B",
        };
        write!(f, "{s}")
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Points {
    pub golfer: GolferId,
    pub week: WeekId,
    pub hole: HoleId,
    pub opponent: GolferId,
    pub score: i32,
    pub points: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Round {
    pub golfer: GolferId,
    pub week: WeekId,
    pub matchup: MatchupId,
    pub golfer_matchup: GolferMatchupKey,
    pub handicap: f64,
    pub gross: i32,
    pub net: i32,
    pub round_points: f64,
    pub total_points: f64,
    pub is_sub: bool,
    pub subbing_for: Option<GolferId>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DrawnTeam {
    pub week: WeekId,
    pub absent_team: TeamId,
    pub drawn_team: TeamId,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SkinEntry {
    pub golfer: GolferId,
    pub week: WeekId,
}

/// Everything one season needs, as plain values. Stores hand this out and
/// the prefill format deserializes straight into it.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SeasonData {
    pub season: Season,
    #[serde(default)]
    pub golfers: Vec<Golfer>,
    #[serde(default)]
    pub weeks: Vec<Week>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub holes: Vec<Hole>,
    #[serde(default)]
    pub scores: Vec<Score>,
    #[serde(default)]
    pub subs: Vec<Sub>,
    #[serde(default)]
    pub matchups: Vec<Matchup>,
    #[serde(default)]
    pub skin_entries: Vec<SkinEntry>,
    #[serde(default)]
    pub handicaps: Vec<Handicap>,
    #[serde(default)]
    pub golfer_matchups: Vec<GolferMatchup>,
    #[serde(default)]
    pub points: Vec<Points>,
    #[serde(default)]
    pub rounds: Vec<Round>,
    #[serde(default)]
    pub drawn_teams: Vec<DrawnTeam>,
}

impl SeasonData {
    #[must_use]
    pub fn year(&self) -> i32 {
        self.season.year
    }

    #[must_use]
    pub fn week(&self, week: WeekId) -> Option<&Week> {
        self.weeks.iter().find(|w| w.id == week)
    }

    #[must_use]
    pub fn week_by_number(&self, number: i32) -> Option<&Week> {
        self.weeks.iter().find(|w| w.number == number)
    }

    #[must_use]
    pub fn golfer_name(&self, golfer: GolferId) -> String {
        self.golfers
            .iter()
            .find(|g| g.id == golfer)
            .map_or_else(|| format!("golfer #{golfer}"), |g| g.name.clone())
    }
}
