use serde::Serialize;
use tracing::{debug, instrument};

use crate::core::catalog::{Category, Confidence, PresetLibrary};
use crate::core::invariants::Invariants;

/// One preset's position on the density spectrum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectrumEntry {
    pub name: String,
    pub category: Category,
    pub confidence: Confidence,
    pub density: f64,
    pub invariants: Invariants,
}

/// Ranks catalog presets by density, lowest first.
///
/// Presets with identical densities keep their catalog order, so a re-ranked
/// catalog is stable run to run.
#[instrument(skip_all, name = "spectrum_workflow")]
pub fn run(library: &PresetLibrary, filter: Option<Category>) -> Vec<SpectrumEntry> {
    let mut entries: Vec<SpectrumEntry> = library
        .iter()
        .filter(|preset| filter.is_none_or(|category| preset.category == category))
        .map(|preset| SpectrumEntry {
            name: preset.name.clone(),
            category: preset.category,
            confidence: preset.confidence,
            density: preset.score().density,
            invariants: preset.invariants,
        })
        .collect();
    entries.sort_by(|a, b| a.density.total_cmp(&b.density));

    debug!(entries = entries.len(), "Density spectrum assembled.");
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Preset;
    use crate::core::scoring;

    #[test]
    fn densities_ascend_across_the_builtin_catalog() {
        let entries = run(PresetLibrary::builtin(), None);
        assert_eq!(entries.len(), PresetLibrary::builtin().len());
        for pair in entries.windows(2) {
            assert!(pair[0].density <= pair[1].density);
        }
    }

    #[test]
    fn filter_keeps_only_the_requested_category() {
        let entries = run(PresetLibrary::builtin(), Some(Category::Animal));
        assert!(!entries.is_empty());
        assert!(entries.iter().all(|entry| entry.category == Category::Animal));
    }

    #[test]
    fn entries_carry_their_own_density() {
        let entries = run(PresetLibrary::builtin(), None);
        for entry in entries {
            let direct = scoring::score(&entry.invariants).density;
            assert_eq!(entry.density, direct);
        }
    }

    #[test]
    fn equal_densities_keep_catalog_order() {
        let library = PresetLibrary::builtin();
        let bonobo = library.get("Bonobo").expect("catalog has Bonobo");
        let chimpanzee = library.get("Chimpanzee").expect("catalog has Chimpanzee");
        assert_eq!(bonobo.invariants, chimpanzee.invariants);

        let entries = run(library, Some(Category::Animal));
        let bonobo_rank = entries
            .iter()
            .position(|entry| entry.name == "Bonobo")
            .expect("Bonobo ranked");
        let chimpanzee_rank = entries
            .iter()
            .position(|entry| entry.name == "Chimpanzee")
            .expect("Chimpanzee ranked");
        assert_eq!(chimpanzee_rank, bonobo_rank + 1);
    }

    #[test]
    fn empty_library_yields_an_empty_spectrum() {
        let library = PresetLibrary::from_presets(Vec::<Preset>::new())
            .expect("empty catalog is legal");
        assert!(run(&library, None).is_empty());
    }
}
