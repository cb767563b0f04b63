//! Severity classification.
//!
//! Hosts send severities either as labels (`"High"`, `"medium"`, ...) or on a
//! 1–5 scale, as numbers or numeric strings. Both collapse into three risk
//! tiers here, and the filter menu, the filter predicate and the cell tone
//! all go through these functions so they agree on what "High" means.

use std::fmt;

use crate::model::CellValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Order of tiers in the severity filter menu.
    pub const MENU_ORDER: [RiskTier; 3] = [RiskTier::High, RiskTier::Medium, RiskTier::Low];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Style class name for surfaces that style by class.
    pub const fn style_class(self) -> &'static str {
        match self {
            Self::Low => "td-risk-low",
            Self::Medium => "td-risk-medium",
            Self::High => "td-risk-high",
        }
    }

    fn from_keyword(folded: &str) -> Option<Self> {
        match folded {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    fn from_scale(n: f64) -> Option<Self> {
        if !n.is_finite() {
            return None;
        }
        Some(if n <= 2.0 {
            Self::Low
        } else if n == 3.0 {
            Self::Medium
        } else {
            Self::High
        })
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Risk tier of a raw severity value, or `None` when it is neither a tier
/// keyword nor a finite number.
pub fn classify(value: &CellValue) -> Option<RiskTier> {
    match value {
        CellValue::Number(n) => RiskTier::from_scale(*n),
        CellValue::Null => None,
        other => classify_text(&other.text()),
    }
}

fn classify_text(text: &str) -> Option<RiskTier> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    RiskTier::from_keyword(&trimmed.to_lowercase())
        .or_else(|| trimmed.parse::<f64>().ok().and_then(RiskTier::from_scale))
}

/// Canonical severity label. Unclassifiable values fall back to their
/// trimmed text, so they still dedupe in the filter menu.
pub fn severity_label(value: &CellValue) -> String {
    match classify(value) {
        Some(tier) => tier.label().to_string(),
        None => value.text().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_is_unclassified() {
        assert_eq!(classify(&CellValue::Number(f64::NAN)), None);
        assert_eq!(classify(&CellValue::from("inf")), None);
        assert_eq!(classify(&CellValue::from("NaN")), None);
    }

    #[test]
    fn test_blank_is_unclassified() {
        assert_eq!(classify(&CellValue::from("   ")), None);
        assert_eq!(severity_label(&CellValue::Null), "");
    }
}
