use crate::core::invariants::Invariants;
use crate::core::scoring::{ScoreResult, score};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string does not name a known preset category.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown category '{0}' (expected human, animal, ai, altered, or pathological)")]
pub struct ParseCategoryError(pub String);

/// Error returned when a string does not name a known confidence tier.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown confidence tier '{0}' (expected high, moderate, low, or theoretical)")]
pub struct ParseConfidenceError(pub String);

/// The kind of system a preset profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Human states: waking, sleep, flow, meditation, panic.
    Human,
    /// Non-human animals, from nematodes to great apes.
    Animal,
    /// Artificial architectures.
    Ai,
    /// Pharmacologically or otherwise altered human states.
    Altered,
    /// Degraded or disputed configurations.
    Pathological,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 5] = [
        Category::Human,
        Category::Animal,
        Category::Ai,
        Category::Altered,
        Category::Pathological,
    ];

    /// The lowercase identifier used in files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Human => "human",
            Category::Animal => "animal",
            Category::Ai => "ai",
            Category::Altered => "altered",
            Category::Pathological => "pathological",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "human" => Ok(Category::Human),
            "animal" => Ok(Category::Animal),
            "ai" => Ok(Category::Ai),
            "altered" => Ok(Category::Altered),
            "pathological" => Ok(Category::Pathological),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

/// How well-grounded a preset's invariant estimates are.
///
/// Tiers follow the calibration methodology: `High` for profiles anchored in
/// direct measurement (e.g. perturbational-complexity data), `Moderate` for
/// interpolations from related measurements, `Low` for remote extrapolations,
/// and `Theoretical` for profiles with no empirical anchor at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Anchored in direct measurement.
    High,
    /// Interpolated from related measurements.
    Moderate,
    /// Extrapolated from distant data.
    Low,
    /// No empirical anchor.
    Theoretical,
}

impl Confidence {
    /// The lowercase identifier used in files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Moderate => "moderate",
            Confidence::Low => "low",
            Confidence::Theoretical => "theoretical",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Confidence {
    type Err = ParseConfidenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Confidence::High),
            "moderate" => Ok(Confidence::Moderate),
            "low" => Ok(Confidence::Low),
            "theoretical" => Ok(Confidence::Theoretical),
            other => Err(ParseConfidenceError(other.to_string())),
        }
    }
}

/// A curated reference profile: a named point in invariant space.
///
/// The name is the preset's unique key within a catalog; uniqueness is
/// enforced when a [`PresetLibrary`](super::library::PresetLibrary) is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    /// Unique display name, e.g. `"Human (Flow State)"`.
    pub name: String,
    /// The kind of system profiled.
    pub category: Category,
    /// How well-grounded the invariant estimates are.
    pub confidence: Confidence,
    /// The profiled point in invariant space.
    pub invariants: Invariants,
    /// One-sentence account of why the profile looks the way it does.
    pub description: String,
}

impl Preset {
    /// Scores this preset's invariant vector.
    pub fn score(&self) -> ScoreResult {
        score(&self.invariants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parsing_round_trips_every_variant() {
        for category in Category::ALL {
            let parsed: Category = category.name().parse().unwrap();
            assert_eq!(parsed, category);
        }
        assert!("robot".parse::<Category>().is_err());
    }

    #[test]
    fn category_parsing_is_case_insensitive() {
        assert_eq!("Human".parse::<Category>().unwrap(), Category::Human);
        assert_eq!("AI".parse::<Category>().unwrap(), Category::Ai);
    }

    #[test]
    fn confidence_parsing_round_trips_every_tier() {
        for tier in [
            Confidence::High,
            Confidence::Moderate,
            Confidence::Low,
            Confidence::Theoretical,
        ] {
            let parsed: Confidence = tier.name().parse().unwrap();
            assert_eq!(parsed, tier);
        }
        assert!("certain".parse::<Confidence>().is_err());
    }

    #[test]
    fn preset_deserializes_from_toml_table() {
        let preset: Preset = toml::from_str(
            r#"
name = "Test Subject"
category = "animal"
confidence = "low"
description = "A synthetic profile."
invariants = { phi = 0.5, tau = 0.4, rho = 0.3, entropy = 0.4, kappa = 0.5 }
"#,
        )
        .unwrap();
        assert_eq!(preset.category, Category::Animal);
        assert_eq!(preset.confidence, Confidence::Low);
        assert_eq!(preset.invariants.phi, 0.5);
    }

    #[test]
    fn preset_rejects_unknown_fields() {
        let result: Result<Preset, _> = toml::from_str(
            r#"
name = "Test Subject"
category = "animal"
confidence = "low"
description = "A synthetic profile."
weight = 12.0
invariants = { phi = 0.5, tau = 0.4, rho = 0.3, entropy = 0.4, kappa = 0.5 }
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn preset_score_matches_direct_scoring() {
        let preset = Preset {
            name: "Probe".to_string(),
            category: Category::Human,
            confidence: Confidence::Moderate,
            invariants: Invariants::BASELINE,
            description: String::new(),
        };
        assert_eq!(preset.score(), score(&Invariants::BASELINE));
    }
}
