use crate::models::PlayerStats;

/// One-paragraph text summary of a stats record.
///
/// Leads with the most recent match (map and agent) when there is one.
/// Records without a per-match agent fall back to the top agent.
pub fn match_summary(stats: &PlayerStats) -> String {
    let mut summary = String::new();

    if let Some(latest) = stats.recent_matches.first() {
        let agent = latest
            .agent
            .as_deref()
            .or_else(|| stats.agent_stats.first().map(|a| a.agent.as_str()))
            .unwrap_or("unknown agent");
        summary.push_str(&format!(
            "Match on {} as {} ({})\n",
            latest.map, agent, stats.rank
        ));
    } else {
        summary.push_str(&format!("No recent matches ({})\n", stats.rank));
    }

    summary.push_str(&format!(
        "K/D/A: {}/{}/{}, Headshot%: {}%\n",
        stats.kills, stats.deaths, stats.assists, stats.headshot_percent
    ));
    summary.push_str(&format!(
        "Record: {}W - {}L ({}% win rate), KDA {}, ADR {}, ACS {}",
        stats.wins, stats.losses, stats.win_rate, stats.kda, stats.adr, stats.acs
    ));

    summary
}
