use serde::Serialize;
use tracing::{info, instrument};

use crate::core::catalog::{Category, Confidence, Match, PresetLibrary};
use crate::core::invariants::Invariants;
use crate::core::scoring::{self, ScoreResult, Sensitivity, UncertaintyEnvelope};
use crate::engine::config::EvaluateConfig;
use crate::engine::error::EngineError;

/// An owned snapshot of a catalog match, detached from the library it came
/// from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub name: String,
    pub category: Category,
    pub confidence: Confidence,
    pub distance: f64,
    pub density: f64,
}

impl From<Match<'_>> for MatchSummary {
    fn from(matched: Match<'_>) -> Self {
        Self {
            name: matched.preset.name.clone(),
            category: matched.preset.category,
            confidence: matched.preset.confidence,
            distance: matched.distance,
            density: matched.score.density,
        }
    }
}

/// The complete report for one invariant vector.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// The sanitized vector everything below was computed from.
    pub invariants: Invariants,
    pub score: ScoreResult,
    pub sensitivity: Sensitivity,
    pub uncertainty: UncertaintyEnvelope,
    /// Nearest catalog preset under the configured category filter.
    pub closest: Option<MatchSummary>,
    /// Nearest animal preset regardless of the filter.
    pub closest_animal: Option<MatchSummary>,
}

/// Scores a vector and situates it in the preset catalog.
///
/// The input is sanitized before anything is computed, so the report is
/// always internally consistent: score, gradient, uncertainty band, and both
/// matches all describe the same clamped vector.
#[instrument(skip_all, name = "evaluate_workflow")]
pub fn run(
    invariants: &Invariants,
    library: &PresetLibrary,
    config: &EvaluateConfig,
) -> Result<Evaluation, EngineError> {
    config.validate()?;

    let sanitized = invariants.sanitized();
    let score = scoring::score(&sanitized);
    let sensitivity = scoring::sensitivity(&sanitized);
    let uncertainty = scoring::propagate(&sanitized, config.param_uncertainty);

    let closest = library
        .find_closest(&sanitized, config.match_filter)
        .map(MatchSummary::from);
    let closest_animal = library.find_closest_animal(&sanitized).map(MatchSummary::from);

    info!(
        density = score.density,
        closest = closest.as_ref().map(|summary| summary.name.as_str()),
        "Evaluation complete."
    );

    Ok(Evaluation {
        invariants: sanitized,
        score,
        sensitivity,
        uncertainty,
        closest,
        closest_animal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoring::Interpretation;

    fn baseline_report() -> Evaluation {
        run(
            &Invariants::BASELINE,
            PresetLibrary::builtin(),
            &EvaluateConfig::default(),
        )
        .expect("default evaluation succeeds")
    }

    #[test]
    fn baseline_lands_next_to_waking_human() {
        let report = baseline_report();
        let closest = report.closest.expect("builtin catalog is not empty");
        assert_eq!(closest.name, "Human (Baseline Awake)");
        assert_eq!(closest.category, Category::Human);
    }

    #[test]
    fn closest_animal_ignores_non_animal_presets() {
        let report = baseline_report();
        let animal = report.closest_animal.expect("catalog has animals");
        assert_eq!(animal.category, Category::Animal);
        assert_eq!(animal.name, "Bonobo");
    }

    #[test]
    fn report_is_internally_consistent() {
        let report = baseline_report();
        assert_eq!(report.score, scoring::score(&report.invariants));
        assert_eq!(report.sensitivity, scoring::sensitivity(&report.invariants));
        assert_eq!(
            report.uncertainty,
            scoring::propagate(&report.invariants, EvaluateConfig::default().param_uncertainty)
        );
    }

    #[test]
    fn category_filter_restricts_the_match() {
        let config = EvaluateConfig {
            match_filter: Some(Category::Ai),
            ..EvaluateConfig::default()
        };
        let report = run(&Invariants::BASELINE, PresetLibrary::builtin(), &config)
            .expect("filtered evaluation succeeds");
        let closest = report.closest.expect("catalog has AI presets");
        assert_eq!(closest.category, Category::Ai);
        assert_eq!(closest.name, "RWKV (Recurrent)");
    }

    #[test]
    fn empty_library_yields_no_matches() {
        let library = PresetLibrary::from_presets(Vec::new()).expect("empty catalog is legal");
        let report = run(&Invariants::BASELINE, &library, &EvaluateConfig::default())
            .expect("evaluation works without presets");
        assert!(report.closest.is_none());
        assert!(report.closest_animal.is_none());
    }

    #[test]
    fn input_is_sanitized_before_scoring() {
        let dirty = Invariants {
            phi: f64::NAN,
            ..Invariants::BASELINE
        };
        let report = run(&dirty, PresetLibrary::builtin(), &EvaluateConfig::default())
            .expect("sanitization makes any input scorable");
        assert_eq!(report.invariants.phi, 0.0);
        assert_eq!(report.score.density, 0.0);
        assert_eq!(report.score.interpretation, Interpretation::NoIntegration);
    }

    #[test]
    fn invalid_uncertainty_is_rejected() {
        let config = EvaluateConfig {
            param_uncertainty: 2.0,
            ..EvaluateConfig::default()
        };
        let result = run(&Invariants::BASELINE, PresetLibrary::builtin(), &config);
        assert!(matches!(result, Err(EngineError::Config { .. })));
    }
}
