//! # Catalog Module
//!
//! This module manages the reference catalog: curated invariant profiles of
//! known systems and the queries that compare arbitrary vectors against them.
//!
//! ## Overview
//!
//! A catalog is a validated, ordered collection of [`preset::Preset`]
//! profiles. Validation is fail-fast and happens once, when a
//! [`library::PresetLibrary`] is built: duplicate names and out-of-range
//! vectors never make it into a live library, so queries stay infallible.
//! Catalogs come from three places — the embedded built-in table, TOML files,
//! and CSV files — and all three funnel through the same validation path.
//!
//! ## Key Components
//!
//! - [`preset`] - The `Preset` profile type with its `Category` and `Confidence` closed sets
//! - [`library`] - Validated storage, file loading, and nearest-match queries
//!
//! ## Usage
//!
//! ```ignore
//! use perspect::core::catalog::PresetLibrary;
//! use perspect::core::invariants::Invariants;
//!
//! let library = PresetLibrary::builtin();
//! if let Some(closest) = library.find_closest(&Invariants::BASELINE, None) {
//!     println!("{} at distance {:.3}", closest.preset.name, closest.distance);
//! }
//! ```

pub mod library;
pub mod preset;

pub use library::{CatalogError, Match, PresetLibrary};
pub use preset::{Category, Confidence, Preset};
