use serde::{Deserialize, Serialize};

use super::Region;

/// Full statistics record for one player.
///
/// Built fresh for every request and never mutated afterwards. The serialized
/// field names follow the dashboard's JSON contract (camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub username: String,
    pub region: Region,
    pub rank: String,
    pub level: u32,
    pub rank_image: String,
    pub wins: u32,
    pub losses: u32,
    /// (kills + assists) / deaths, pre-formatted with two decimals
    pub kda: String,
    pub kd_ratio: f64,
    /// Average damage per round
    pub adr: f64,
    pub headshot_percent: f64,
    pub win_rate: f64,
    /// Percentage of rounds with a kill, assist, survival or trade
    pub kast: f64,
    /// Damage delta per round
    pub dda_round: f64,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    /// Average combat score
    pub acs: f64,
    pub kad_ratio: f64,
    pub kills_round: f64,
    pub first_bloods: u32,
    pub flawless_rounds: u32,
    pub aces: u32,
    pub tracker_score: u32,
    pub round_win_percent: f64,
    pub recent_matches: Vec<MatchData>,
    pub agent_stats: Vec<AgentStat>,
    pub role_stats: Vec<RoleStat>,
    pub weapon_stats: Vec<WeaponStat>,
    pub map_stats: Vec<MapStat>,
}

impl PlayerStats {
    /// Every percentage-valued field in the record, labelled for diagnostics.
    ///
    /// All of these must lie in `[0, 100]`.
    pub fn percentage_fields(&self) -> Vec<(String, f64)> {
        let mut fields = vec![
            ("headshotPercent".to_string(), self.headshot_percent),
            ("winRate".to_string(), self.win_rate),
            ("kast".to_string(), self.kast),
            ("roundWinPercent".to_string(), self.round_win_percent),
        ];

        fields.extend(
            self.agent_stats
                .iter()
                .map(|a| (format!("agentStats[{}].winRate", a.agent), a.win_rate)),
        );
        fields.extend(
            self.role_stats
                .iter()
                .map(|r| (format!("roleStats[{}].winRate", r.role), r.win_rate)),
        );
        for w in &self.weapon_stats {
            fields.push((format!("weaponStats[{}].headPercent", w.weapon), w.head_percent));
            fields.push((format!("weaponStats[{}].bodyPercent", w.weapon), w.body_percent));
            fields.push((format!("weaponStats[{}].legPercent", w.weapon), w.leg_percent));
        }
        fields.extend(
            self.map_stats
                .iter()
                .map(|m| (format!("mapStats[{}].winRate", m.map), m.win_rate)),
        );

        fields
    }

    /// Names of percentage fields that fall outside `[0, 100]`.
    pub fn out_of_range_percentages(&self) -> Vec<String> {
        self.percentage_fields()
            .into_iter()
            .filter(|(_, value)| !(0.0..=100.0).contains(value))
            .map(|(name, _)| name)
            .collect()
    }
}

/// Outcome of one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    #[display("win")]
    Win,
    #[display("loss")]
    Loss,
}

/// One row of the recent match history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchData {
    /// Relative display date such as "1d ago"
    pub date: String,
    pub map: String,
    pub result: MatchResult,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    /// Agent played in this match, when the backend reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStat {
    pub agent: String,
    pub matches: u32,
    pub win_rate: f64,
    pub avg_kills: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleStat {
    pub role: String,
    pub win_rate: f64,
    pub kda: f64,
    /// Record label, e.g. "8W - 2L"
    pub matches: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponStat {
    pub weapon: String,
    pub kills: u32,
    pub head_percent: f64,
    pub body_percent: f64,
    pub leg_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStat {
    pub map: String,
    pub win_rate: f64,
    /// Record label, e.g. "3W - 0L"
    pub matches: String,
}
