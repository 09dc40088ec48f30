pub mod analytics;
pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod utils;

// Re-export the main error types for convenience
pub use error::{ProviderError, ProviderResult, SessionError, SessionResult, ValidationError};

// Re-export provider traits and implementations
pub use api::{
    build_coach, build_stats_provider, CoachingResponder, HenrikStatsClient, MockCoach,
    MockStatsProvider, StatsProvider,
};

// Re-export data records
pub use chat::{ChatMessage, ChatRole, Transcript};
pub use models::{
    AgentStat, MapStat, MatchData, MatchResult, PlayerIdentity, PlayerStats, Region, RoleStat,
    WeaponStat,
};

// Re-export session state
pub use session::{ChatSession, DashboardSession, LoadState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_structure() {
        assert!(std::any::type_name::<api::MockStatsProvider>().contains("MockStatsProvider"));
        assert!(std::any::type_name::<session::ChatSession>().contains("ChatSession"));
    }

    #[test]
    fn test_error_types_re_exported() {
        let _validation = ValidationError::EmptyUsername;
        let _provider = ProviderError::NotFound;
        let _session = SessionError::Busy;
    }

    #[test]
    fn test_providers_are_object_safe() {
        let _stats: Box<dyn StatsProvider> = Box::new(MockStatsProvider::default());
        let _coach: Box<dyn CoachingResponder> = Box::new(MockCoach::default());
    }
}
