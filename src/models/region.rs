use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Server locale used for player lookups.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Region {
    #[display("NA")]
    NA,
    #[display("EU")]
    EU,
    #[display("AP")]
    AP,
    #[display("KR")]
    KR,
    #[display("BR")]
    BR,
}

impl Region {
    pub const ALL: [Region; 5] = [Region::NA, Region::EU, Region::AP, Region::KR, Region::BR];

    /// Human-readable region name
    pub fn label(&self) -> &'static str {
        match self {
            Region::NA => "North America",
            Region::EU => "Europe",
            Region::AP => "Asia Pacific",
            Region::KR => "Korea",
            Region::BR => "Brazil",
        }
    }

    /// Path segment used by the HenrikDev API
    pub fn api_segment(&self) -> &'static str {
        match self {
            Region::NA => "na",
            Region::EU => "eu",
            Region::AP => "ap",
            Region::KR => "kr",
            Region::BR => "br",
        }
    }
}

impl FromStr for Region {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyRegion);
        }

        Region::ALL
            .into_iter()
            .find(|region| region.api_segment().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::UnknownRegion(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("NA".parse::<Region>(), Ok(Region::NA));
        assert_eq!("eu".parse::<Region>(), Ok(Region::EU));
        assert_eq!(" Kr ".parse::<Region>(), Ok(Region::KR));
    }

    #[test]
    fn test_parse_rejects_blank_and_unknown() {
        assert_eq!("".parse::<Region>(), Err(ValidationError::EmptyRegion));
        assert_eq!("   ".parse::<Region>(), Err(ValidationError::EmptyRegion));
        assert_eq!(
            "LATAM".parse::<Region>(),
            Err(ValidationError::UnknownRegion("LATAM".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips() {
        for region in Region::ALL {
            assert_eq!(region.to_string().parse::<Region>(), Ok(region));
        }
    }
}
