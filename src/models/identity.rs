use serde::{Deserialize, Serialize};

use super::Region;
use crate::error::ValidationError;

/// The username/region pair submitted on the landing surface.
///
/// Construction is the validation step: once a `PlayerIdentity` exists the
/// providers can be called with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    /// Kept exactly as entered so providers can echo it back
    pub username: String,
    pub region: Region,
}

impl PlayerIdentity {
    pub fn new(username: impl Into<String>, region: Region) -> Result<Self, ValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        Ok(Self { username, region })
    }

    /// Validate raw form input. Username is checked first.
    pub fn parse(username: &str, region: &str) -> Result<Self, ValidationError> {
        if username.trim().is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        let region = region.parse::<Region>()?;
        Self::new(username, region)
    }

    /// Split a Riot ID (`name#tag`) into its parts.
    pub fn riot_id(&self) -> Result<(&str, &str), ValidationError> {
        match self.username.trim().rsplit_once('#') {
            Some((name, tag)) if !name.trim().is_empty() && !tag.trim().is_empty() => {
                Ok((name.trim(), tag.trim()))
            }
            _ => Err(ValidationError::MissingTag(self.username.clone())),
        }
    }
}
