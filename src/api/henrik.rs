//! HenrikDev API backed stats provider.
//!
//! Fetches the player's latest competitive matches and folds them into a
//! [`PlayerStats`] record. Failures are reported as tagged [`ProviderError`]s
//! and never retried.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

use super::provider::StatsProvider;
use crate::analytics::{
    kda_string, percentage, ratio, record_label, relative_date, round1, round2,
};
use crate::config::ProviderConfig;
use crate::error::{ProviderError, ProviderResult, ValidationError};
use crate::models::{
    agent_role, AgentStat, MapStat, MatchData, MatchResult, PlayerIdentity, PlayerStats, RoleStat,
    WeaponStat,
};

/// Retry-After fallback when the header is missing
const DEFAULT_RETRY_AFTER_SECONDS: u64 = 60;

#[derive(Debug, Clone)]
pub struct HenrikStatsClient {
    base_url: String,
    api_key: Option<String>,
    match_count: u32,
    http_client: reqwest::Client,
}

impl HenrikStatsClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        match_count: u32,
        timeout: Duration,
    ) -> ProviderResult<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            match_count: match_count.max(1),
            http_client,
        })
    }

    pub fn from_config(config: &ProviderConfig) -> ProviderResult<Self> {
        Self::new(
            config.henrik_base_url.clone(),
            config.api_key(),
            config.match_count,
            Duration::from_millis(config.request_timeout_ms),
        )
    }

    /// Competitive match history URL for a Riot ID.
    pub fn matches_url(&self, identity: &PlayerIdentity) -> ProviderResult<String> {
        let (name, tag) = identity
            .riot_id()
            .map_err(|e| ProviderError::invalid_response(e.to_string()))?;

        Ok(format!(
            "{}/valorant/v4/matches/{}/pc/{}/{}?mode=competitive&size={}",
            self.base_url,
            identity.region.api_segment(),
            urlencoding::encode(name),
            urlencoding::encode(tag),
            self.match_count
        ))
    }
}

#[async_trait]
impl StatsProvider for HenrikStatsClient {
    async fn player_stats(&self, identity: &PlayerIdentity) -> ProviderResult<PlayerStats> {
        let url = self.matches_url(identity)?;
        tracing::info!(
            username = %identity.username,
            region = %identity.region,
            "🌐 Fetching match history from HenrikDev"
        );

        let mut request = self.http_client.get(&url).header("Accept", "*/*");
        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", api_key);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("❌ HTTP request failed: {}", e);
            e
        })?;

        let status = response.status();
        tracing::debug!("📡 API response status: {}", status);

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok());
            let error = status_error(status, retry_after);
            tracing::error!("❌ {}", error);
            return Err(error);
        }

        let body = response.text().await.map_err(|e| {
            tracing::error!("❌ Failed to read response text: {}", e);
            e
        })?;
        tracing::debug!("📄 Response text length: {} chars", body.len());

        let matches = parse_matches(&body)?;
        summarize_matches(identity, &matches, Utc::now())
    }

    /// The match history endpoint needs a full `name#tag` Riot ID.
    fn validate(&self, identity: &PlayerIdentity) -> Result<(), ValidationError> {
        identity.riot_id().map(|_| ())
    }

    fn name(&self) -> &'static str {
        "henrik"
    }
}

/// Map a non-success status to a failure kind.
pub fn status_error(status: StatusCode, retry_after_seconds: Option<u64>) -> ProviderError {
    match status {
        StatusCode::NOT_FOUND => ProviderError::NotFound,
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited {
            retry_after_seconds: retry_after_seconds.unwrap_or(DEFAULT_RETRY_AFTER_SECONDS),
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Unauthorized,
        other => ProviderError::Status(other.as_u16()),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchesResponse {
    #[serde(default)]
    pub data: Vec<HenrikMatch>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HenrikMatch {
    pub metadata: Metadata,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub rounds: Vec<Round>,
    #[serde(default)]
    pub kills: Vec<Kill>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub match_id: String,
    #[serde(default)]
    pub map: Named,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Named {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub puuid: String,
    pub name: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub team_id: String,
    #[serde(default)]
    pub agent: Named,
    #[serde(default)]
    pub tier: Named,
    #[serde(default)]
    pub account_level: u32,
    #[serde(default)]
    pub stats: PlayerCombat,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayerCombat {
    pub score: u32,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub headshots: u32,
    pub bodyshots: u32,
    pub legshots: u32,
    pub damage: Damage,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Damage {
    pub dealt: u32,
    pub received: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Team {
    pub team_id: String,
    #[serde(default)]
    pub rounds: TeamRounds,
    #[serde(default)]
    pub won: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TeamRounds {
    pub won: u32,
    pub lost: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Round {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub winning_team: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Kill {
    pub round: u32,
    #[serde(default)]
    pub time_in_round_in_ms: u64,
    pub killer: PlayerRef,
    pub victim: PlayerRef,
    #[serde(default)]
    pub assistants: Vec<PlayerRef>,
    #[serde(default)]
    pub weapon: Option<Named>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerRef {
    #[serde(default)]
    pub puuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub team: String,
}

impl PlayerRef {
    fn is(&self, player: &Player) -> bool {
        if !self.puuid.is_empty() && !player.puuid.is_empty() {
            return self.puuid == player.puuid;
        }
        self.name.eq_ignore_ascii_case(&player.name) && self.tag.eq_ignore_ascii_case(&player.tag)
    }
}

/// Parse a raw matches response body.
pub fn parse_matches(body: &str) -> ProviderResult<Vec<HenrikMatch>> {
    let response: MatchesResponse = serde_json::from_str(body).map_err(|e| {
        tracing::error!("❌ Failed to parse JSON response: {}", e);
        tracing::debug!(
            "🔍 Response text preview: {}",
            body.chars().take(200).collect::<String>()
        );
        e
    })?;
    Ok(response.data)
}

/// Per-match facts for the looked-up player.
struct MatchLine<'a> {
    map: &'a str,
    agent: &'a str,
    won: bool,
    combat: &'a PlayerCombat,
    rounds: u32,
    round_wins: u32,
    kast_rounds: u32,
    first_bloods: u32,
    aces: u32,
    flawless_rounds: u32,
    started_at: Option<DateTime<Utc>>,
}

fn find_player<'a>(matched: &'a HenrikMatch, name: &str, tag: &str) -> Option<&'a Player> {
    matched
        .players
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name) && p.tag.eq_ignore_ascii_case(tag))
}

fn match_line<'a>(matched: &'a HenrikMatch, player: &'a Player) -> MatchLine<'a> {
    let team = matched.teams.iter().find(|t| t.team_id == player.team_id);
    let (won, rounds, round_wins) = match team {
        Some(team) => (team.won, team.rounds.won + team.rounds.lost, team.rounds.won),
        None => {
            let wins = matched
                .rounds
                .iter()
                .filter(|r| r.winning_team == player.team_id)
                .count() as u32;
            let total = matched.rounds.len() as u32;
            (wins * 2 > total, total, wins)
        }
    };

    let mut kast_rounds = 0;
    let mut first_bloods = 0;
    let mut aces = 0;
    let mut flawless_rounds = 0;

    for round_id in 0..rounds {
        let round_kills: Vec<&Kill> = matched
            .kills
            .iter()
            .filter(|k| k.round == round_id)
            .collect();

        let kills = round_kills.iter().filter(|k| k.killer.is(player)).count();
        let assisted = round_kills
            .iter()
            .any(|k| k.assistants.iter().any(|a| a.is(player)));
        let survived = !round_kills.iter().any(|k| k.victim.is(player));

        // Trades are not derivable without positional data
        if kills > 0 || assisted || survived {
            kast_rounds += 1;
        }
        if kills >= 5 {
            aces += 1;
        }
        if let Some(opening) = round_kills.iter().min_by_key(|k| k.time_in_round_in_ms) {
            if opening.killer.is(player) {
                first_bloods += 1;
            }
        }

        let round_won = matched
            .rounds
            .iter()
            .find(|r| r.id == round_id)
            .map(|r| r.winning_team == player.team_id)
            .unwrap_or(false);
        let team_lost_someone = round_kills.iter().any(|k| k.victim.team == player.team_id);
        if round_won && !team_lost_someone {
            flawless_rounds += 1;
        }
    }

    MatchLine {
        map: &matched.metadata.map.name,
        agent: &player.agent.name,
        won,
        combat: &player.stats,
        rounds,
        round_wins,
        kast_rounds,
        first_bloods,
        aces,
        flawless_rounds,
        started_at: matched.metadata.started_at,
    }
}

#[derive(Default)]
struct Tally {
    matches: u32,
    wins: u32,
    kills: u32,
    deaths: u32,
    assists: u32,
}

impl Tally {
    fn add(&mut self, line: &MatchLine<'_>) {
        self.matches += 1;
        self.wins += u32::from(line.won);
        self.kills += line.combat.kills;
        self.deaths += line.combat.deaths;
        self.assists += line.combat.assists;
    }

    fn losses(&self) -> u32 {
        self.matches - self.wins
    }
}

/// Group by key keeping first-seen order.
fn tally_by<'a, F>(lines: &[MatchLine<'a>], key: F) -> Vec<(String, Tally)>
where
    F: Fn(&MatchLine<'a>) -> Option<String>,
{
    let mut groups: Vec<(String, Tally)> = Vec::new();
    for line in lines {
        let Some(name) = key(line) else { continue };
        match groups.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, tally)) => tally.add(line),
            None => {
                let mut tally = Tally::default();
                tally.add(line);
                groups.push((name, tally));
            }
        }
    }
    groups
}

/// Fold matches into a stats record for `identity`.
///
/// Matches that do not include the player are skipped; if none do, the
/// payload is rejected. `now` anchors the relative match dates.
pub fn summarize_matches(
    identity: &PlayerIdentity,
    matches: &[HenrikMatch],
    now: DateTime<Utc>,
) -> ProviderResult<PlayerStats> {
    if matches.is_empty() {
        return Err(ProviderError::NotFound);
    }

    let (name, tag) = identity
        .riot_id()
        .map_err(|e| ProviderError::invalid_response(e.to_string()))?;

    let found: Vec<(&HenrikMatch, &Player)> = matches
        .iter()
        .filter_map(|m| find_player(m, name, tag).map(|p| (m, p)))
        .collect();

    let Some((_, latest_player)) = found.first() else {
        return Err(ProviderError::invalid_response(format!(
            "player {}#{} not present in any returned match",
            name, tag
        )));
    };

    let lines: Vec<MatchLine<'_>> = found.iter().map(|(m, p)| match_line(m, p)).collect();

    let mut overall = Tally::default();
    let (mut rounds, mut round_wins, mut kast_rounds) = (0u32, 0u32, 0u32);
    let (mut first_bloods, mut aces, mut flawless_rounds) = (0u32, 0u32, 0u32);
    let (mut headshots, mut shots) = (0u32, 0u32);
    let (mut dealt, mut received, mut score) = (0u64, 0u64, 0u64);

    for line in &lines {
        overall.add(line);
        rounds += line.rounds;
        round_wins += line.round_wins;
        kast_rounds += line.kast_rounds;
        first_bloods += line.first_bloods;
        aces += line.aces;
        flawless_rounds += line.flawless_rounds;
        headshots += line.combat.headshots;
        shots += line.combat.headshots + line.combat.bodyshots + line.combat.legshots;
        dealt += u64::from(line.combat.damage.dealt);
        received += u64::from(line.combat.damage.received);
        score += u64::from(line.combat.score);
    }

    let per_round = |total: f64| round1(total / f64::from(rounds.max(1)));

    let recent_matches = lines
        .iter()
        .map(|line| MatchData {
            date: line
                .started_at
                .map(|started| relative_date(started, now))
                .unwrap_or_else(|| "unknown".to_string()),
            map: line.map.to_string(),
            result: if line.won {
                MatchResult::Win
            } else {
                MatchResult::Loss
            },
            kills: line.combat.kills,
            deaths: line.combat.deaths,
            assists: line.combat.assists,
            agent: Some(line.agent.to_string()),
        })
        .collect();

    let mut agent_stats: Vec<AgentStat> = tally_by(&lines, |l| Some(l.agent.to_string()))
        .into_iter()
        .map(|(agent, t)| AgentStat {
            agent,
            matches: t.matches,
            win_rate: percentage(t.wins, t.matches),
            avg_kills: round1(f64::from(t.kills) / f64::from(t.matches.max(1))),
        })
        .collect();
    agent_stats.sort_by(|a, b| b.matches.cmp(&a.matches));

    let role_stats = tally_by(&lines, |l| agent_role(l.agent).map(|r| r.to_string()))
        .into_iter()
        .map(|(role, t)| RoleStat {
            role,
            win_rate: percentage(t.wins, t.matches),
            kda: ratio(f64::from(t.kills + t.assists), f64::from(t.deaths)),
            matches: record_label(t.wins, t.losses()),
        })
        .collect();

    let mut map_stats: Vec<MapStat> = tally_by(&lines, |l| Some(l.map.to_string()))
        .into_iter()
        .map(|(map, t)| MapStat {
            map,
            win_rate: percentage(t.wins, t.matches),
            matches: record_label(t.wins, t.losses()),
        })
        .collect();
    map_stats.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate));

    let weapon_stats = weapon_kills(&found);

    let stats = PlayerStats {
        username: identity.username.clone(),
        region: identity.region,
        rank: latest_player.tier.name.clone(),
        level: latest_player.account_level,
        rank_image: String::new(),
        wins: overall.wins,
        losses: overall.losses(),
        kda: kda_string(overall.kills, overall.deaths, overall.assists),
        kd_ratio: ratio(f64::from(overall.kills), f64::from(overall.deaths)),
        adr: per_round(dealt as f64),
        headshot_percent: percentage(headshots, shots),
        win_rate: percentage(overall.wins, overall.matches),
        kast: percentage(kast_rounds, rounds),
        dda_round: per_round(dealt as f64 - received as f64),
        kills: overall.kills,
        deaths: overall.deaths,
        assists: overall.assists,
        acs: per_round(score as f64),
        kad_ratio: ratio(
            f64::from(overall.kills + overall.assists),
            f64::from(overall.deaths),
        ),
        kills_round: round2(f64::from(overall.kills) / f64::from(rounds.max(1))),
        first_bloods,
        flawless_rounds,
        aces,
        tracker_score: 0,
        round_win_percent: percentage(round_wins, rounds),
        recent_matches,
        agent_stats,
        role_stats,
        weapon_stats,
        map_stats,
    };

    tracing::info!(
        username = %stats.username,
        matches = overall.matches,
        rounds = rounds,
        "✅ Summarized match history"
    );

    Ok(stats)
}

/// Kills per weapon, most used first. Hit locations are not reported per kill.
fn weapon_kills(found: &[(&HenrikMatch, &Player)]) -> Vec<WeaponStat> {
    let mut counts: Vec<(String, u32)> = Vec::new();

    for (matched, player) in found {
        for kill in matched.kills.iter().filter(|k| k.killer.is(player)) {
            let Some(weapon) = kill.weapon.as_ref().filter(|w| !w.name.is_empty()) else {
                continue;
            };
            match counts.iter_mut().find(|(name, _)| *name == weapon.name) {
                Some((_, count)) => *count += 1,
                None => counts.push((weapon.name.clone(), 1)),
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .map(|(weapon, kills)| WeaponStat {
            weapon,
            kills,
            head_percent: 0.0,
            body_percent: 0.0,
            leg_percent: 0.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;
    use chrono::TimeZone;

    const FIXTURE: &str = include_str!("../../tests/data/henrik_matches.json");

    fn identity() -> PlayerIdentity {
        PlayerIdentity::new("Swift728#OC", Region::AP).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 3, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_matches_url_encodes_riot_id() {
        let client =
            HenrikStatsClient::new("https://api.henrikdev.xyz/", None, 5, Duration::from_secs(5))
                .unwrap();
        let identity = PlayerIdentity::new("Swift 728#OC", Region::AP).unwrap();

        assert_eq!(
            client.matches_url(&identity).unwrap(),
            "https://api.henrikdev.xyz/valorant/v4/matches/ap/pc/Swift%20728/OC?mode=competitive&size=5"
        );
    }

    #[test]
    fn test_matches_url_requires_tag() {
        let client =
            HenrikStatsClient::new("https://api.henrikdev.xyz", None, 1, Duration::from_secs(5))
                .unwrap();
        let identity = PlayerIdentity::new("Swift728", Region::AP).unwrap();
        assert!(client.matches_url(&identity).is_err());
    }

    #[test]
    fn test_validate_requires_tag() {
        let client =
            HenrikStatsClient::new("https://api.henrikdev.xyz", None, 1, Duration::from_secs(5))
                .unwrap();

        assert_eq!(
            client.validate(&PlayerIdentity::new("Swift728", Region::AP).unwrap()),
            Err(ValidationError::MissingTag("Swift728".to_string()))
        );
        assert_eq!(client.validate(&identity()), Ok(()));
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, None),
            ProviderError::NotFound
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, Some(12)),
            ProviderError::RateLimited {
                retry_after_seconds: 12
            }
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, None),
            ProviderError::RateLimited {
                retry_after_seconds: 60
            }
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, None),
            ProviderError::Unauthorized
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, None),
            ProviderError::Status(502)
        ));
    }

    #[test]
    fn test_summarize_fixture() {
        let matches = parse_matches(FIXTURE).unwrap();
        let stats = summarize_matches(&identity(), &matches, now()).unwrap();

        assert_eq!(stats.username, "Swift728#OC");
        assert_eq!(stats.region, Region::AP);
        assert_eq!(stats.rank, "Diamond 2");
        assert_eq!(stats.level, 212);

        assert_eq!((stats.wins, stats.losses), (1, 1));
        assert_eq!((stats.kills, stats.deaths, stats.assists), (30, 27, 9));
        assert_eq!(stats.kda, "1.44");
        assert_eq!(stats.kd_ratio, 1.11);
        assert_eq!(stats.win_rate, 50.0);
        // 16 head / 80 shots
        assert_eq!(stats.headshot_percent, 20.0);
        // 4000 damage over 40 rounds
        assert_eq!(stats.adr, 100.0);
        assert_eq!(stats.acs, 200.0);
        assert_eq!(stats.round_win_percent, 47.5);

        assert_eq!(stats.recent_matches[0].map, "Ascent");
        assert_eq!(stats.recent_matches[0].result, MatchResult::Win);
        assert_eq!(stats.recent_matches[0].date, "2d ago");
        assert_eq!(stats.recent_matches[0].agent.as_deref(), Some("Jett"));
        assert_eq!(stats.recent_matches[1].result, MatchResult::Loss);

        assert_eq!(stats.agent_stats[0].agent, "Jett");
        assert_eq!(stats.agent_stats[0].matches, 2);
        assert_eq!(stats.role_stats[0].role, "Duelist");
        assert_eq!(stats.role_stats[0].matches, "1W - 1L");

        assert_eq!(stats.map_stats[0].map, "Ascent");
        assert_eq!(stats.map_stats[0].win_rate, 100.0);

        assert_eq!(stats.weapon_stats[0].weapon, "Vandal");
        assert_eq!(stats.weapon_stats[0].kills, 2);
        assert_eq!(stats.first_bloods, 1);

        assert!(stats.out_of_range_percentages().is_empty());
    }

    #[test]
    fn test_latest_match_keeps_its_own_agent() {
        let mut matches = parse_matches(FIXTURE).unwrap();
        // older Jett game appended so Jett stays the most played agent
        matches.push(matches[1].clone());
        for player in matches[0].players.iter_mut().filter(|p| p.puuid == "p1") {
            player.agent.name = "Sova".to_string();
        }

        let stats = summarize_matches(&identity(), &matches, now()).unwrap();

        assert_eq!(stats.agent_stats[0].agent, "Jett");
        assert_eq!(stats.recent_matches[0].agent.as_deref(), Some("Sova"));
        assert!(crate::analytics::match_summary(&stats).starts_with("Match on Ascent as Sova"));
    }

    #[test]
    fn test_missing_player_is_invalid_response() {
        let matches = parse_matches(FIXTURE).unwrap();
        let stranger = PlayerIdentity::new("Nobody#000", Region::AP).unwrap();

        assert!(matches!(
            summarize_matches(&stranger, &matches, now()),
            Err(ProviderError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn test_empty_data_is_not_found() {
        let matches = parse_matches(r#"{"status": 200, "data": []}"#).unwrap();
        assert!(matches!(
            summarize_matches(&identity(), &matches, now()),
            Err(ProviderError::NotFound)
        ));
    }

    #[test]
    fn test_garbage_body_is_serialization_error() {
        assert!(matches!(
            parse_matches("<html>"),
            Err(ProviderError::Serialization(_))
        ));
    }
}
