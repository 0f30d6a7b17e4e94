//! Daily rate table.
//!
//! Tiers are checked in order against the upper-cased designation; the first
//! tier whose keyword occurs in the designation decides the daily rate.

use serde::Deserialize;

/// One designation category and its daily rate
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RateTier {
    /// Keyword searched for in the designation, compared case-insensitively
    pub keyword: String,
    /// Amount paid per worked day
    pub daily_rate: u64,
}

/// What to do with a designation that matches no tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnrecognizedPolicy {
    /// Pay nothing for the line
    #[default]
    Zero,
    /// Reject the order with `Error::UnrecognizedDesignation`
    Reject,
}

/// Ordered rate tiers plus the fallback policy
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RateTable {
    /// Tiers, most specific first
    pub tiers: Vec<RateTier>,
    /// Behavior for designations matching no tier
    pub unrecognized: UnrecognizedPolicy,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            tiers: vec![
                RateTier {
                    keyword: "LECTURER".to_string(),
                    daily_rate: 1445,
                },
                RateTier {
                    keyword: "TGT".to_string(),
                    daily_rate: 1403,
                },
            ],
            unrecognized: UnrecognizedPolicy::Zero,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_default_tiers_in_order() {
        let table = RateTable::default();
        assert_eq!(table.tiers[0].keyword, "LECTURER");
        assert_eq!(table.tiers[0].daily_rate, 1445);
        assert_eq!(table.tiers[1].keyword, "TGT");
        assert_eq!(table.tiers[1].daily_rate, 1403);
        assert_eq!(table.unrecognized, UnrecognizedPolicy::Zero);
    }

    #[test]
    fn test_parse_reject_policy() {
        let toml_str = r#"
            unrecognized = "reject"

            [[tiers]]
            keyword = "PGT"
            daily_rate = 1500
        "#;

        let table: RateTable = toml::from_str(toml_str).unwrap();
        assert_eq!(table.unrecognized, UnrecognizedPolicy::Reject);
        assert_eq!(table.tiers.len(), 1);
        assert_eq!(table.tiers[0].daily_rate, 1500);
    }
}
