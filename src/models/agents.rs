use serde::{Deserialize, Serialize};

/// Agent role as shown on the dashboard
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum AgentRole {
    #[display("Duelist")]
    Duelist,
    #[display("Initiator")]
    Initiator,
    #[display("Controller")]
    Controller,
    #[display("Sentinel")]
    Sentinel,
}

const AGENT_ROLES: &[(&str, AgentRole)] = &[
    ("Iso", AgentRole::Duelist),
    ("Jett", AgentRole::Duelist),
    ("Neon", AgentRole::Duelist),
    ("Phoenix", AgentRole::Duelist),
    ("Raze", AgentRole::Duelist),
    ("Reyna", AgentRole::Duelist),
    ("Waylay", AgentRole::Duelist),
    ("Yoru", AgentRole::Duelist),
    ("Breach", AgentRole::Initiator),
    ("Fade", AgentRole::Initiator),
    ("Gekko", AgentRole::Initiator),
    ("KAY/O", AgentRole::Initiator),
    ("Skye", AgentRole::Initiator),
    ("Sova", AgentRole::Initiator),
    ("Tejo", AgentRole::Initiator),
    ("Astra", AgentRole::Controller),
    ("Brimstone", AgentRole::Controller),
    ("Clove", AgentRole::Controller),
    ("Harbor", AgentRole::Controller),
    ("Omen", AgentRole::Controller),
    ("Viper", AgentRole::Controller),
    ("Chamber", AgentRole::Sentinel),
    ("Cypher", AgentRole::Sentinel),
    ("Deadlock", AgentRole::Sentinel),
    ("Killjoy", AgentRole::Sentinel),
    ("Sage", AgentRole::Sentinel),
    ("Vyse", AgentRole::Sentinel),
];

/// Look up an agent's role by display name (case-insensitive).
pub fn agent_role(agent: &str) -> Option<AgentRole> {
    AGENT_ROLES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(agent.trim()))
        .map(|(_, role)| *role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_role_lookup() {
        assert_eq!(agent_role("Clove"), Some(AgentRole::Controller));
        assert_eq!(agent_role("sova"), Some(AgentRole::Initiator));
        assert_eq!(agent_role("KAY/O"), Some(AgentRole::Initiator));
        assert_eq!(agent_role("Unknown Agent"), None);
    }
}
