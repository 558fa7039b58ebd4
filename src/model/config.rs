use serde::{Deserialize, Deserializer, Serialize};

/// Knobs for one handicap population (rostered members or subs).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct HandicapRules {
    pub max_weeks: usize,
    pub required_holes: usize,
    pub establish_after: usize,
    pub drop_best: usize,
    pub drop_worst: usize,
    pub drop_threshold: usize,
    pub adjust_factor: f64,
    pub round_precision: i32,
}

impl HandicapRules {
    #[must_use]
    pub fn member() -> Self {
        Self {
            max_weeks: 10,
            required_holes: 9,
            establish_after: 3,
            drop_best: 1,
            drop_worst: 1,
            drop_threshold: 5,
            adjust_factor: 0.8,
            round_precision: 5,
        }
    }

    #[must_use]
    pub fn sub() -> Self {
        Self {
            establish_after: 1,
            drop_best: 0,
            drop_worst: 0,
            ..Self::member()
        }
    }

    #[must_use]
    pub fn drops_apply(&self, qualifying_weeks: usize) -> bool {
        qualifying_weeks >= self.drop_threshold && (self.drop_best > 0 || self.drop_worst > 0)
    }
}

impl Default for HandicapRules {
    fn default() -> Self {
        Self::member()
    }
}

/// Rules as written in a config file; unset knobs keep the population's
/// own defaults rather than the member ones.
#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct RulesOverride {
    max_weeks: Option<usize>,
    required_holes: Option<usize>,
    establish_after: Option<usize>,
    drop_best: Option<usize>,
    drop_worst: Option<usize>,
    drop_threshold: Option<usize>,
    adjust_factor: Option<f64>,
    round_precision: Option<i32>,
}

impl RulesOverride {
    fn over(self, base: HandicapRules) -> HandicapRules {
        HandicapRules {
            max_weeks: self.max_weeks.unwrap_or(base.max_weeks),
            required_holes: self.required_holes.unwrap_or(base.required_holes),
            establish_after: self.establish_after.unwrap_or(base.establish_after),
            drop_best: self.drop_best.unwrap_or(base.drop_best),
            drop_worst: self.drop_worst.unwrap_or(base.drop_worst),
            drop_threshold: self.drop_threshold.unwrap_or(base.drop_threshold),
            adjust_factor: self.adjust_factor.unwrap_or(base.adjust_factor),
            round_precision: self.round_precision.unwrap_or(base.round_precision),
        }
    }
}

fn member_rules<'de, D: Deserializer<'de>>(d: D) -> Result<HandicapRules, D::Error> {
    Ok(RulesOverride::deserialize(d)?.over(HandicapRules::member()))
}

fn sub_rules<'de, D: Deserializer<'de>>(d: D) -> Result<HandicapRules, D::Error> {
    Ok(RulesOverride::deserialize(d)?.over(HandicapRules::sub()))
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LeagueConfig {
    #[serde(deserialize_with = "member_rules")]
    pub member_rules: HandicapRules,
    #[serde(deserialize_with = "sub_rules")]
    pub sub_rules: HandicapRules,
    /// Used when a season has no hole data for a nine.
    pub default_nine_par: i32,
    /// Weeks numbered up to and including this one make up the first half.
    pub first_half_last_week: i32,
    pub playoff_slots: usize,
    /// Fixes the virtual-opponent draw; `None` draws from entropy.
    pub draw_seed: Option<u64>,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            member_rules: HandicapRules::member(),
            sub_rules: HandicapRules::sub(),
            default_nine_par: 36,
            first_half_last_week: 9,
            playoff_slots: 4,
            draw_seed: None,
        }
    }
}

impl LeagueConfig {
    /// # Errors
    ///
    /// Will return `Err` if the json does not describe a league config
    pub fn from_json(json: &serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(json.clone())
    }
}
