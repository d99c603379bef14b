use serde::{Deserialize, Serialize};

/// Result of pricing a requirements record, in whole currency units.
///
/// Constructed only through [`CostBreakdown::from_components`], which keeps
/// `total` and `monthly` consistent with the three components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub infrastructure: i64,
    pub development: i64,
    pub support: i64,
    pub total: i64,
    pub monthly: i64,
}

impl CostBreakdown {
    /// Build a breakdown from its three rounded components.
    pub fn from_components(infrastructure: i64, development: i64, support: i64) -> Self {
        let total = infrastructure + development + support;
        Self {
            infrastructure,
            development,
            support,
            total,
            monthly: (total as f64 / 12.0).round() as i64,
        }
    }

    /// An all-zero breakdown.
    pub fn zero() -> Self {
        Self::from_components(0, 0, 0)
    }

    /// Whether `total` and `monthly` agree with the components.
    pub fn is_consistent(&self) -> bool {
        self.total == self.infrastructure + self.development + self.support
            && self.monthly == (self.total as f64 / 12.0).round() as i64
    }
}

/// Format a currency amount with thousands separators, e.g. `€ 367,719`.
pub fn format_amount(symbol: &str, amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    if symbol.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{} {}", sign, symbol, grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_components_keeps_invariants() {
        let b = CostBreakdown::from_components(600, 1080, 210);
        assert_eq!(b.total, 1890);
        assert_eq!(b.monthly, 158);
        assert!(b.is_consistent());
    }

    #[test]
    fn test_tampered_breakdown_is_inconsistent() {
        let mut b = CostBreakdown::from_components(1, 2, 3);
        b.total = 7;
        assert!(!b.is_consistent());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount("€", 367719), "€ 367,719");
        assert_eq!(format_amount("$", 999), "$ 999");
        assert_eq!(format_amount("", 1000000), "1,000,000");
        assert_eq!(format_amount("€", -1500), "-€ 1,500");
        assert_eq!(format_amount("€", 0), "€ 0");
    }
}
