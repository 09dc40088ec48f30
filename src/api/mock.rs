//! Mock providers used when no real backend is configured.
//!
//! Both resolve after a simulated latency and never fail.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

use super::provider::{CoachingResponder, StatsProvider};
use crate::chat::{rules, ChatMessage};
use crate::config::ProviderConfig;
use crate::error::ProviderResult;
use crate::models::{
    AgentStat, MapStat, MatchData, MatchResult, PlayerIdentity, PlayerStats, Region, RoleStat,
    WeaponStat,
};

/// Simulated response delay: a fixed base plus optional random jitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub base: Duration,
    pub jitter: Duration,
}

impl SimulatedLatency {
    pub fn fixed(base: Duration) -> Self {
        Self {
            base,
            jitter: Duration::ZERO,
        }
    }

    pub fn with_jitter(base: Duration, jitter: Duration) -> Self {
        Self { base, jitter }
    }

    /// Delay for one call
    pub fn sample(&self) -> Duration {
        if self.jitter.is_zero() {
            return self.base;
        }
        let extra = rand::thread_rng().gen_range(0..=self.jitter.as_millis() as u64);
        self.base + Duration::from_millis(extra)
    }

    pub async fn wait(&self) {
        let delay = self.sample();
        tracing::trace!(delay_ms = delay.as_millis() as u64, "⏳ Simulating latency");
        tokio::time::sleep(delay).await;
    }
}

/// Stats provider that always returns the same fixture record.
///
/// Only `username` and `region` depend on the input.
#[derive(Debug, Clone)]
pub struct MockStatsProvider {
    latency: SimulatedLatency,
}

impl MockStatsProvider {
    pub fn new(latency: SimulatedLatency) -> Self {
        Self { latency }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(SimulatedLatency::with_jitter(
            Duration::from_millis(config.stats_delay_ms),
            Duration::from_millis(config.jitter_ms),
        ))
    }
}

impl Default for MockStatsProvider {
    fn default() -> Self {
        Self::new(SimulatedLatency::fixed(Duration::from_millis(800)))
    }
}

#[async_trait]
impl StatsProvider for MockStatsProvider {
    async fn player_stats(&self, identity: &PlayerIdentity) -> ProviderResult<PlayerStats> {
        tracing::debug!(
            username = %identity.username,
            region = %identity.region,
            "📊 Loading mock player stats"
        );

        self.latency.wait().await;

        Ok(sample_player_stats(&identity.username, identity.region))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Coach that answers from the fixed keyword rules.
///
/// The conversation history is accepted but never read: every reply depends
/// only on the latest message, the username and the region.
#[derive(Debug, Clone)]
pub struct MockCoach {
    latency: SimulatedLatency,
}

impl MockCoach {
    pub fn new(latency: SimulatedLatency) -> Self {
        Self { latency }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(SimulatedLatency::with_jitter(
            Duration::from_millis(config.reply_delay_ms),
            Duration::from_millis(config.jitter_ms),
        ))
    }
}

impl Default for MockCoach {
    fn default() -> Self {
        Self::new(SimulatedLatency::fixed(Duration::from_millis(1200)))
    }
}

#[async_trait]
impl CoachingResponder for MockCoach {
    async fn coaching_reply(
        &self,
        username: &str,
        region: &str,
        message: &str,
        history: &[ChatMessage],
    ) -> ProviderResult<String> {
        self.latency.wait().await;

        let (kind, reply) = rules::reply_for(username, region, message);
        tracing::debug!(
            reply_kind = %kind,
            history_len = history.len(),
            "🤖 Mock coach replied"
        );

        Ok(reply)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

fn recent(
    date: &str,
    map: &str,
    result: MatchResult,
    kills: u32,
    deaths: u32,
    assists: u32,
) -> MatchData {
    MatchData {
        date: date.to_string(),
        map: map.to_string(),
        result,
        kills,
        deaths,
        assists,
        agent: None,
    }
}

fn agent(name: &str, matches: u32, win_rate: f64, avg_kills: f64) -> AgentStat {
    AgentStat {
        agent: name.to_string(),
        matches,
        win_rate,
        avg_kills,
    }
}

fn role(name: &str, win_rate: f64, kda: f64, matches: &str) -> RoleStat {
    RoleStat {
        role: name.to_string(),
        win_rate,
        kda,
        matches: matches.to_string(),
    }
}

fn weapon(name: &str, kills: u32, head: f64, body: f64, leg: f64) -> WeaponStat {
    WeaponStat {
        weapon: name.to_string(),
        kills,
        head_percent: head,
        body_percent: body,
        leg_percent: leg,
    }
}

fn map(name: &str, win_rate: f64, matches: &str) -> MapStat {
    MapStat {
        map: name.to_string(),
        win_rate,
        matches: matches.to_string(),
    }
}

/// The fixture record served by [`MockStatsProvider`].
///
/// The numbers are not internally consistent (24 wins/losses against eight
/// listed matches, for example); they are display data only.
pub fn sample_player_stats(username: &str, region: Region) -> PlayerStats {
    use MatchResult::{Loss, Win};

    PlayerStats {
        username: username.to_string(),
        region,
        rank: "Immortal 1".to_string(),
        level: 328,
        rank_image: "https://images.unsplash.com/photo-1581833971358-2c8b550f87b3?w=100&h=100&fit=crop"
            .to_string(),
        wins: 12,
        losses: 12,
        kda: "1.32".to_string(),
        kd_ratio: 0.80,
        adr: 177.6,
        headshot_percent: 19.5,
        win_rate: 50.0,
        kast: 68.9,
        dda_round: -24.0,
        kills: 300,
        deaths: 375,
        assists: 123,
        acs: 179.1,
        kad_ratio: 1.13,
        kills_round: 0.6,
        first_bloods: 41,
        flawless_rounds: 19,
        aces: 1,
        tracker_score: 251,
        round_win_percent: 49.8,
        recent_matches: vec![
            recent("1d ago", "Pearl", Loss, 11, 16, 4),
            recent("1d ago", "Abyss", Loss, 9, 17, 4),
            recent("1d ago", "Sunset", Win, 7, 18, 3),
            recent("1d ago", "Abyss", Win, 11, 9, 7),
            recent("1d ago", "Sunset", Loss, 10, 17, 4),
            recent("2d ago", "Split", Win, 20, 20, 3),
            recent("2d ago", "Bind", Loss, 11, 18, 11),
            recent("3d ago", "Corrode", Win, 14, 16, 6),
        ],
        agent_stats: vec![
            agent("Clove", 6, 33.3, 18.3),
            agent("Vyse", 5, 20.0, 16.8),
            agent("Sova", 4, 100.0, 15.2),
        ],
        role_stats: vec![
            role("Initiator", 80.0, 1.35, "8W - 2L"),
            role("Controller", 28.6, 1.06, "2W - 5L"),
            role("Sentinel", 20.0, 0.92, "1W - 4L"),
            role("Duelist", 50.0, 0.97, "1W - 1L"),
        ],
        weapon_stats: vec![
            weapon("Phantom", 124, 31.0, 65.0, 5.0),
            weapon("Vandal", 75, 33.0, 64.0, 3.0),
            weapon("Classic", 24, 31.0, 66.0, 3.0),
        ],
        map_stats: vec![
            map("Haven", 100.0, "3W - 0L"),
            map("Bind", 66.7, "2W - 1L"),
            map("Pearl", 50.0, "2W - 2L"),
            map("Abyss", 50.0, "3W - 3L"),
            map("Sunset", 33.3, "1W - 2L"),
            map("Corrode", 33.3, "1W - 2L"),
            map("Split", 0.0, "0W - 2L"),
        ],
    }
}
