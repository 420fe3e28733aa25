use super::preset::{Category, Confidence, Preset};
use crate::core::invariants::{InvariantError, Invariants};
use crate::core::scoring::ScoreResult;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

/// The raw structure of a TOML catalog file: an array of `[[preset]]` tables.
#[derive(Debug, Deserialize)]
struct RawCatalogFile {
    preset: Vec<Preset>,
}

/// Flat record shape for CSV catalogs, one preset per row.
#[derive(Debug, Deserialize)]
struct PresetRecord {
    name: String,
    category: Category,
    confidence: Confidence,
    phi: f64,
    tau: f64,
    rho: f64,
    entropy: f64,
    kappa: f64,
    description: String,
}

impl From<PresetRecord> for Preset {
    fn from(record: PresetRecord) -> Self {
        Preset {
            name: record.name,
            category: record.category,
            confidence: record.confidence,
            invariants: Invariants {
                phi: record.phi,
                tau: record.tau,
                rho: record.rho,
                entropy: record.entropy,
                kappa: record.kappa,
            },
            description: record.description,
        }
    }
}

const BUILTIN_CATALOG_TOML: &str = include_str!("presets.toml");

static BUILTIN: LazyLock<PresetLibrary> = LazyLock::new(|| {
    PresetLibrary::from_toml_str(BUILTIN_CATALOG_TOML, "<builtin>")
        .expect("embedded preset catalog is valid")
});

/// Represents errors that can occur while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read from disk.
    #[error("File I/O error for '{path}': {source}")]
    Io {
        /// The path to the file that could not be read.
        path: String,
        /// The underlying I/O error that occurred.
        source: std::io::Error,
    },
    /// The catalog file content is not valid TOML.
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        /// The path to the file that could not be parsed.
        path: String,
        /// The underlying TOML parsing error that occurred.
        source: toml::de::Error,
    },
    /// The catalog file content is not valid CSV.
    #[error("CSV parsing error for '{path}': {source}")]
    Csv {
        /// The path to the file that could not be parsed.
        path: String,
        /// The underlying CSV parsing error that occurred.
        source: csv::Error,
    },
    /// Two presets share a name. Names are the unique key of a catalog, so
    /// this is rejected when the library is built rather than surfacing later
    /// as a wrong lookup.
    #[error("Duplicate preset name '{0}' in catalog")]
    DuplicateName(String),
    /// A preset's invariant vector is outside the meaningful range.
    #[error("Invalid invariants for preset '{name}': {source}")]
    InvalidPreset {
        /// The preset whose vector was rejected.
        name: String,
        /// The offending component.
        source: InvariantError,
    },
}

/// The result of a nearest-match query: the winning preset, how far away it
/// is, and its own score.
#[derive(Debug, Clone)]
pub struct Match<'a> {
    /// The closest catalog entry.
    pub preset: &'a Preset,
    /// Euclidean distance between the query and the preset in 5-D invariant
    /// space.
    pub distance: f64,
    /// The preset's own density score.
    pub score: ScoreResult,
}

/// A validated, immutable collection of reference presets.
///
/// A library is the unit of catalog integrity: it can only be constructed
/// through [`PresetLibrary::from_presets`], which rejects duplicate names and
/// out-of-range vectors up front. Every query after that point is infallible
/// or returns `Option`.
#[derive(Debug, Clone)]
pub struct PresetLibrary {
    presets: Vec<Preset>,
    index: HashMap<String, usize>,
}

impl PresetLibrary {
    /// Builds a library from presets, validating catalog integrity.
    ///
    /// Preset order is preserved and meaningful: nearest-match ties resolve
    /// to the earlier entry.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateName`] if two presets share a name,
    /// or [`CatalogError::InvalidPreset`] if any invariant component is
    /// non-finite or outside `[0, 1]`.
    pub fn from_presets(presets: Vec<Preset>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(presets.len());
        for (position, preset) in presets.iter().enumerate() {
            preset
                .invariants
                .validate()
                .map_err(|source| CatalogError::InvalidPreset {
                    name: preset.name.clone(),
                    source,
                })?;
            if index.insert(preset.name.clone(), position).is_some() {
                return Err(CatalogError::DuplicateName(preset.name.clone()));
            }
        }
        Ok(Self { presets, index })
    }

    /// The built-in reference catalog: curated profiles of human states,
    /// altered and pathological states, AI architectures, and a ladder of
    /// animals from roundworm to chimpanzee.
    pub fn builtin() -> &'static PresetLibrary {
        &BUILTIN
    }

    /// Loads a catalog from a TOML file containing `[[preset]]` tables.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read,
    /// `CatalogError::Toml` if it is not valid TOML, and the
    /// [`from_presets`](Self::from_presets) validation errors otherwise.
    pub fn from_toml_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let library = Self::from_toml_str(&content, &path.to_string_lossy())?;
        tracing::debug!(
            presets = library.len(),
            path = %path.display(),
            "Loaded preset catalog"
        );
        Ok(library)
    }

    fn from_toml_str(content: &str, path_for_error: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalogFile = toml::from_str(content).map_err(|e| CatalogError::Toml {
            path: path_for_error.to_string(),
            source: e,
        })?;
        Self::from_presets(raw.preset)
    }

    /// Loads a catalog from a CSV file with one preset per row
    /// (`name,category,confidence,phi,tau,rho,entropy,kappa,description`).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Csv` for unreadable or malformed rows, and the
    /// [`from_presets`](Self::from_presets) validation errors otherwise.
    pub fn from_csv_path(path: &Path) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| CatalogError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut presets = Vec::new();
        for result in reader.deserialize::<PresetRecord>() {
            let record = result.map_err(|e| CatalogError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
            presets.push(Preset::from(record));
        }

        let library = Self::from_presets(presets)?;
        tracing::debug!(
            presets = library.len(),
            path = %path.display(),
            "Loaded preset catalog"
        );
        Ok(library)
    }

    /// The number of presets in the catalog.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether the catalog holds no presets. Legal, if not very useful:
    /// every query on an empty library returns `None`.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Iterates presets in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Preset> {
        self.presets.iter()
    }

    /// Looks up a preset by its unique name.
    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.index.get(name).map(|&position| &self.presets[position])
    }

    /// Iterates the presets of one category, in catalog order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Preset> {
        self.presets
            .iter()
            .filter(move |preset| preset.category == category)
    }

    /// Finds the preset closest to `query` in 5-D Euclidean distance,
    /// optionally restricted to one category.
    ///
    /// The scan runs in catalog order with a strict `<` comparison, so of
    /// several equidistant presets the earliest wins — deterministically.
    /// Returns `None` only when the candidate set is empty (an empty library
    /// or a filter no preset matches); absence is not an error.
    pub fn find_closest(&self, query: &Invariants, filter: Option<Category>) -> Option<Match<'_>> {
        let query = query.sanitized();

        let mut best_position = None;
        let mut best_distance = f64::INFINITY;
        for (position, preset) in self.presets.iter().enumerate() {
            if filter.is_some_and(|category| preset.category != category) {
                continue;
            }
            let distance = query.distance(&preset.invariants);
            if distance < best_distance {
                best_distance = distance;
                best_position = Some(position);
            }
        }

        best_position.map(|position| {
            let preset = &self.presets[position];
            Match {
                preset,
                distance: best_distance,
                score: preset.score(),
            }
        })
    }

    /// Finds the closest animal profile to `query`. Convenience for the
    /// common "which creature does this feel like" comparison.
    pub fn find_closest_animal(&self, query: &Invariants) -> Option<Match<'_>> {
        self.find_closest(query, Some(Category::Animal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn make_preset(name: &str, category: Category, invariants: Invariants) -> Preset {
        Preset {
            name: name.to_string(),
            category,
            confidence: Confidence::Low,
            invariants,
            description: format!("{name} test profile"),
        }
    }

    struct TestSetup {
        library: PresetLibrary,
        temp_dir: TempDir,
    }

    fn setup() -> TestSetup {
        let presets = vec![
            make_preset(
                "Near Origin",
                Category::Human,
                Invariants::clamped(0.1, 0.1, 0.1, 0.1, 0.1),
            ),
            make_preset(
                "Mid A",
                Category::Animal,
                Invariants::clamped(0.5, 0.5, 0.5, 0.5, 0.5),
            ),
            make_preset(
                "Mid B",
                Category::Ai,
                Invariants::clamped(0.5, 0.5, 0.5, 0.5, 0.5),
            ),
            make_preset(
                "Far Corner",
                Category::Animal,
                Invariants::clamped(0.9, 0.9, 0.9, 0.9, 0.9),
            ),
        ];
        TestSetup {
            library: PresetLibrary::from_presets(presets).unwrap(),
            temp_dir: TempDir::new().unwrap(),
        }
    }

    fn write_catalog_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn from_presets_preserves_order_and_indexes_names() {
            let setup = setup();
            assert_eq!(setup.library.len(), 4);
            assert_eq!(setup.library.iter().next().unwrap().name, "Near Origin");
            assert_eq!(setup.library.get("Mid B").unwrap().category, Category::Ai);
            assert!(setup.library.get("Missing").is_none());
        }

        #[test]
        fn duplicate_names_are_rejected() {
            let presets = vec![
                make_preset("Twin", Category::Human, Invariants::BASELINE),
                make_preset("Twin", Category::Animal, Invariants::BASELINE),
            ];
            let result = PresetLibrary::from_presets(presets);
            assert!(
                matches!(result, Err(CatalogError::DuplicateName(name)) if name == "Twin"),
                "Expected DuplicateName error for Twin, but got something else or Ok."
            );
        }

        #[test]
        fn out_of_range_invariants_are_rejected_with_the_preset_name() {
            let presets = vec![make_preset(
                "Hot",
                Category::Altered,
                Invariants {
                    phi: 0.5,
                    tau: 1.3,
                    rho: 0.5,
                    entropy: 0.5,
                    kappa: 0.5,
                },
            )];
            let result = PresetLibrary::from_presets(presets);
            assert!(matches!(
                result,
                Err(CatalogError::InvalidPreset { name, source: InvariantError::OutOfRange { .. } })
                    if name == "Hot"
            ));
        }

        #[test]
        fn empty_catalog_is_legal() {
            let library = PresetLibrary::from_presets(Vec::new()).unwrap();
            assert!(library.is_empty());
            assert!(library.find_closest(&Invariants::BASELINE, None).is_none());
        }
    }

    mod builtin_tests {
        use super::*;

        #[test]
        fn builtin_catalog_loads_and_is_well_formed() {
            let library = PresetLibrary::builtin();
            assert!(library.len() >= 50);
            for category in Category::ALL {
                assert!(
                    library.by_category(category).count() > 0,
                    "builtin catalog has no {category} presets"
                );
            }
        }

        #[test]
        fn builtin_baseline_profile_scores_as_documented() {
            let preset = PresetLibrary::builtin()
                .get("Human (Baseline Awake)")
                .unwrap();
            let result = preset.score();
            assert!((result.density - 0.311).abs() < 1e-3);
        }

        #[test]
        fn builtin_tie_between_identical_profiles_resolves_to_catalog_order() {
            // Bonobo and Chimpanzee share an invariant vector; Bonobo is
            // listed first.
            let library = PresetLibrary::builtin();
            let bonobo = library.get("Bonobo").unwrap().invariants;
            assert_eq!(bonobo, library.get("Chimpanzee").unwrap().invariants);

            let closest = library.find_closest(&bonobo, None).unwrap();
            assert_eq!(closest.preset.name, "Bonobo");
            assert_eq!(closest.distance, 0.0);
        }

        #[test]
        fn builtin_unbound_architecture_scores_zero() {
            let preset = PresetLibrary::builtin()
                .get("Transformer (Feed-Forward LLM)")
                .unwrap();
            assert_eq!(preset.score().density, 0.0);
        }
    }

    mod load_tests {
        use super::*;

        #[test]
        fn load_succeeds_with_valid_toml() {
            let setup = setup();
            let content = r#"
[[preset]]
name = "File Subject"
category = "altered"
confidence = "theoretical"
description = "Loaded from disk."
invariants = { phi = 0.4, tau = 0.4, rho = 0.4, entropy = 0.4, kappa = 0.4 }
"#;
            let path = write_catalog_file(setup.temp_dir.path(), "catalog.toml", content);

            let library = PresetLibrary::from_toml_path(&path).unwrap();
            assert_eq!(library.len(), 1);
            let preset = library.get("File Subject").unwrap();
            assert_eq!(preset.confidence, Confidence::Theoretical);
        }

        #[test]
        fn load_fails_for_missing_file() {
            let setup = setup();
            let path = setup.temp_dir.path().join("absent.toml");
            let result = PresetLibrary::from_toml_path(&path);
            assert!(matches!(result, Err(CatalogError::Io { .. })));
        }

        #[test]
        fn load_fails_for_invalid_toml() {
            let setup = setup();
            let path =
                write_catalog_file(setup.temp_dir.path(), "broken.toml", "this is not toml [");
            let result = PresetLibrary::from_toml_path(&path);
            assert!(matches!(result, Err(CatalogError::Toml { .. })));
        }

        #[test]
        fn load_fails_for_duplicate_names_in_file() {
            let setup = setup();
            let content = r#"
[[preset]]
name = "Twin"
category = "human"
confidence = "low"
description = "First."
invariants = { phi = 0.4, tau = 0.4, rho = 0.4, entropy = 0.4, kappa = 0.4 }

[[preset]]
name = "Twin"
category = "human"
confidence = "low"
description = "Second."
invariants = { phi = 0.5, tau = 0.5, rho = 0.5, entropy = 0.5, kappa = 0.5 }
"#;
            let path = write_catalog_file(setup.temp_dir.path(), "twins.toml", content);
            let result = PresetLibrary::from_toml_path(&path);
            assert!(matches!(result, Err(CatalogError::DuplicateName(name)) if name == "Twin"));
        }

        #[test]
        fn load_fails_for_out_of_range_vector_in_file() {
            let setup = setup();
            let content = r#"
[[preset]]
name = "Hot"
category = "human"
confidence = "low"
description = "Out of range."
invariants = { phi = 1.4, tau = 0.4, rho = 0.4, entropy = 0.4, kappa = 0.4 }
"#;
            let path = write_catalog_file(setup.temp_dir.path(), "hot.toml", content);
            let result = PresetLibrary::from_toml_path(&path);
            assert!(matches!(
                result,
                Err(CatalogError::InvalidPreset { name, .. }) if name == "Hot"
            ));
        }

        #[test]
        fn load_succeeds_with_valid_csv() {
            let setup = setup();
            let content = "\
name,category,confidence,phi,tau,rho,entropy,kappa,description
Row One,animal,low,0.2,0.2,0.2,0.3,0.4,First row.
Row Two,ai,theoretical,0.9,0.6,0.0,0.3,0.5,Second row.
";
            let path = write_catalog_file(setup.temp_dir.path(), "catalog.csv", content);

            let library = PresetLibrary::from_csv_path(&path).unwrap();
            assert_eq!(library.len(), 2);
            assert_eq!(library.get("Row Two").unwrap().category, Category::Ai);
            assert_eq!(library.get("Row One").unwrap().invariants.kappa, 0.4);
        }

        #[test]
        fn load_fails_for_malformed_csv() {
            let setup = setup();
            let content = "\
name,category,confidence,phi,tau,rho,entropy,kappa,description
Row One,animal,low,not-a-number,0.2,0.2,0.3,0.4,First row.
";
            let path = write_catalog_file(setup.temp_dir.path(), "bad.csv", content);
            let result = PresetLibrary::from_csv_path(&path);
            assert!(matches!(result, Err(CatalogError::Csv { .. })));
        }
    }

    mod query_tests {
        use super::*;

        #[test]
        fn exact_vector_matches_at_distance_zero() {
            let setup = setup();
            let query = Invariants::clamped(0.1, 0.1, 0.1, 0.1, 0.1);
            let closest = setup.library.find_closest(&query, None).unwrap();
            assert_eq!(closest.preset.name, "Near Origin");
            assert_eq!(closest.distance, 0.0);
        }

        #[test]
        fn equidistant_presets_resolve_to_catalog_order() {
            let setup = setup();
            let query = Invariants::clamped(0.5, 0.5, 0.5, 0.5, 0.5);
            let closest = setup.library.find_closest(&query, None).unwrap();
            assert_eq!(closest.preset.name, "Mid A");
        }

        #[test]
        fn category_filter_restricts_the_candidate_set() {
            let setup = setup();
            let query = Invariants::clamped(0.5, 0.5, 0.5, 0.5, 0.5);
            let closest = setup
                .library
                .find_closest(&query, Some(Category::Ai))
                .unwrap();
            assert_eq!(closest.preset.name, "Mid B");
        }

        #[test]
        fn empty_filtered_set_yields_none() {
            let setup = setup();
            let query = Invariants::BASELINE;
            assert!(
                setup
                    .library
                    .find_closest(&query, Some(Category::Altered))
                    .is_none()
            );
        }

        #[test]
        fn closest_animal_only_considers_animals() {
            let setup = setup();
            // Nearest preset overall is "Near Origin" (human); the animal
            // convenience must skip it.
            let query = Invariants::clamped(0.2, 0.2, 0.2, 0.2, 0.2);
            let closest = setup.library.find_closest_animal(&query).unwrap();
            assert_eq!(closest.preset.name, "Mid A");
            assert_eq!(closest.preset.category, Category::Animal);
        }

        #[test]
        fn match_carries_the_presets_own_score() {
            let setup = setup();
            let closest = setup
                .library
                .find_closest(&Invariants::BASELINE, None)
                .unwrap();
            assert_eq!(closest.score, closest.preset.score());
        }

        #[test]
        fn queries_sanitize_non_finite_input() {
            let setup = setup();
            let query = Invariants {
                phi: f64::NAN,
                tau: 0.1,
                rho: 0.1,
                entropy: 0.1,
                kappa: 0.1,
            };
            // NaN collapses to zero; the query is treated as a valid point.
            let closest = setup.library.find_closest(&query, None).unwrap();
            assert_eq!(closest.preset.name, "Near Origin");
        }

        #[test]
        fn by_category_iterates_in_catalog_order() {
            let setup = setup();
            let animals: Vec<&str> = setup
                .library
                .by_category(Category::Animal)
                .map(|preset| preset.name.as_str())
                .collect();
            assert_eq!(animals, vec!["Mid A", "Far Corner"]);
        }
    }
}
