//! The provider-calling boundary.
//!
//! Surfaces talk to stats and coaching backends only through these traits, so
//! the mock and the HTTP-backed implementations are interchangeable and the
//! session layer can be tested without either.

use async_trait::async_trait;

use crate::chat::ChatMessage;
use crate::error::{ProviderResult, ValidationError};
use crate::models::{PlayerIdentity, PlayerStats};

#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Produce a fresh statistics record for `identity`.
    ///
    /// The returned `username` and `region` echo the identity exactly.
    async fn player_stats(&self, identity: &PlayerIdentity) -> ProviderResult<PlayerStats>;

    /// Backend-specific input checks, run before any call is made.
    fn validate(&self, _identity: &PlayerIdentity) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

#[async_trait]
pub trait CoachingResponder: Send + Sync {
    /// Produce the coach's reply to `message`.
    ///
    /// `history` is the transcript before `message` was added.
    async fn coaching_reply(
        &self,
        username: &str,
        region: &str,
        message: &str,
        history: &[ChatMessage],
    ) -> ProviderResult<String>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}
