//! Service Catalog
//!
//! The three axes of a quote: service category, complexity tier and
//! delivery timeline. Each parses from the literal label shown on the
//! quote form; unknown labels map to the default tier instead of failing,
//! so the caller cannot distinguish "unknown, defaulted" from an explicit
//! default choice.

use serde::{Deserialize, Serialize};

/// Service categories offered on the site
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    /// WordPress builds and maintenance
    WordPress,
    /// Custom application development
    ModernWeb,
    /// Online stores and payment integration
    Ecommerce,
    /// Audits, Core Web Vitals, speed work
    Optimization,
}

impl ServiceType {
    /// Parse from the quote-form label. Unknown labels default to WordPress.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Développement Web Moderne" => ServiceType::ModernWeb,
            "E-commerce & Paiements" => ServiceType::Ecommerce,
            "Optimisation & Performance" => ServiceType::Optimization,
            _ => ServiceType::WordPress,
        }
    }

    /// Base price in whole euros
    pub fn base_price(self) -> i64 {
        match self {
            ServiceType::WordPress => 1500,
            ServiceType::ModernWeb => 2800,
            ServiceType::Ecommerce => 3500,
            ServiceType::Optimization => 800,
        }
    }
}

/// Project complexity tiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl Complexity {
    /// Parse from the quote-form label. Unknown labels default to Simple.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Moyen (x1.5)" => Complexity::Medium,
            "Complexe (x2.5)" => Complexity::Complex,
            _ => Complexity::Simple,
        }
    }

    /// Price multiplier for this tier
    pub fn multiplier(self) -> f64 {
        match self {
            Complexity::Simple => 1.0,
            Complexity::Medium => 1.5,
            Complexity::Complex => 2.5,
        }
    }
}

/// Delivery timelines. Shorter delays cost more.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeline {
    Urgent,
    Fast,
    Standard,
    Flexible,
}

impl Timeline {
    /// Parse from the quote-form label. Unknown labels default to Standard.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Urgent (1-2 semaines)" => Timeline::Urgent,
            "Rapide (2-4 semaines)" => Timeline::Fast,
            "Flexible (2+ mois)" => Timeline::Flexible,
            _ => Timeline::Standard,
        }
    }

    /// Price multiplier for this timeline
    pub fn multiplier(self) -> f64 {
        match self {
            Timeline::Urgent => 1.5,
            Timeline::Fast => 1.2,
            Timeline::Standard => 1.0,
            Timeline::Flexible => 0.9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_labels() {
        assert_eq!(
            ServiceType::from_label("Sites WordPress Expert"),
            ServiceType::WordPress
        );
        assert_eq!(
            ServiceType::from_label("E-commerce & Paiements"),
            ServiceType::Ecommerce
        );
        assert_eq!(ServiceType::Ecommerce.base_price(), 3500);
    }

    #[test]
    fn test_unknown_labels_default() {
        assert_eq!(ServiceType::from_label("???"), ServiceType::WordPress);
        assert_eq!(Complexity::from_label("???"), Complexity::Simple);
        assert_eq!(Timeline::from_label("???"), Timeline::Standard);
    }

    #[test]
    fn test_timeline_multipliers() {
        assert_eq!(Timeline::Urgent.multiplier(), 1.5);
        assert_eq!(Timeline::Flexible.multiplier(), 0.9);
    }
}
