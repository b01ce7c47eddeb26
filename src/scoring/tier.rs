//! Risk tiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative bucket for a fractional loss score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskTier {
    pub const ALL: [RiskTier; 4] = [RiskTier::Low, RiskTier::Moderate, RiskTier::High, RiskTier::Critical];

    /// Classify a loss in [0.0, 1.0]. Bands are inclusive-lower,
    /// exclusive-upper; critical is open-ended.
    pub fn from_loss(loss: f64) -> Self {
        if loss < 0.15 {
            RiskTier::Low
        } else if loss < 0.35 {
            RiskTier::Moderate
        } else if loss < 0.60 {
            RiskTier::High
        } else {
            RiskTier::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Moderate => "moderate",
            RiskTier::High => "high",
            RiskTier::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RiskTier::from_loss(0.0), RiskTier::Low);
        assert_eq!(RiskTier::from_loss(0.149), RiskTier::Low);
        assert_eq!(RiskTier::from_loss(0.15), RiskTier::Moderate);
        assert_eq!(RiskTier::from_loss(0.349), RiskTier::Moderate);
        assert_eq!(RiskTier::from_loss(0.35), RiskTier::High);
        assert_eq!(RiskTier::from_loss(0.599), RiskTier::High);
        assert_eq!(RiskTier::from_loss(0.60), RiskTier::Critical);
        assert_eq!(RiskTier::from_loss(1.0), RiskTier::Critical);
    }

    #[test]
    fn test_tier_serde_name() {
        assert_eq!(serde_json::to_string(&RiskTier::Critical).unwrap(), "\"critical\"");
        assert_eq!(RiskTier::Moderate.to_string(), "moderate");
    }
}
