//! Value records handed from the providers to the presentation layer.

pub mod agents;
pub mod identity;
pub mod region;
pub mod stats;

pub use agents::{agent_role, AgentRole};
pub use identity::PlayerIdentity;
pub use region::Region;
pub use stats::{AgentStat, MapStat, MatchData, MatchResult, PlayerStats, RoleStat, WeaponStat};
