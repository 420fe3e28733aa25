use crate::cli::VectorArgs;
use crate::error::{CliError, Result};
use perspect::core::catalog::{Category, PresetLibrary};
use perspect::core::invariants::{Invariants, Param};
use std::path::Path;
use tracing::info;

/// Parses a category name as it appears on the command line.
pub fn parse_category(raw: &str) -> Result<Category> {
    raw.parse::<Category>()
        .map_err(|e| CliError::Argument(e.to_string()))
}

/// Parses an invariant name (`phi`, `tau`, `rho`, `entropy`/`h`, `kappa`).
pub fn parse_param(raw: &str) -> Result<Param> {
    raw.parse::<Param>()
        .map_err(|e| CliError::Argument(e.to_string()))
}

/// Loads the preset catalog a command should work against.
///
/// With no path this is the built-in catalog; otherwise the file format is
/// chosen by extension (`.toml` or `.csv`).
pub fn load_catalog(path: Option<&Path>) -> Result<PresetLibrary> {
    let Some(path) = path else {
        return Ok(PresetLibrary::builtin().clone());
    };
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);
    let library = match extension.as_deref() {
        Some("toml") => PresetLibrary::from_toml_path(path)?,
        Some("csv") => PresetLibrary::from_csv_path(path)?,
        _ => {
            return Err(CliError::Argument(format!(
                "catalog file must end in .toml or .csv, got '{}'",
                path.display()
            )));
        }
    };
    info!(
        path = %path.display(),
        presets = library.len(),
        "Loaded user catalog."
    );
    Ok(library)
}

/// Resolves the base invariant vector for a command.
///
/// Precedence: a named preset beats positional values beats the baseline
/// operating point; individual `--phi`-style overrides are applied last on
/// top of whichever base was chosen.
pub fn resolve_base(
    values: &[f64],
    overrides: &VectorArgs,
    preset: Option<&str>,
    library: &PresetLibrary,
) -> Result<Invariants> {
    let mut base = if let Some(name) = preset {
        library
            .get(name)
            .ok_or_else(|| CliError::Argument(format!("unknown preset '{name}'")))?
            .invariants
    } else if values.is_empty() {
        Invariants::BASELINE
    } else if values.len() == 5 {
        Invariants {
            phi: values[0],
            tau: values[1],
            rho: values[2],
            entropy: values[3],
            kappa: values[4],
        }
    } else {
        return Err(CliError::Argument(format!(
            "expected 5 invariant values in φ τ ρ H κ order, got {}",
            values.len()
        )));
    };

    if let Some(phi) = overrides.phi {
        base.phi = phi;
    }
    if let Some(tau) = overrides.tau {
        base.tau = tau;
    }
    if let Some(rho) = overrides.rho {
        base.rho = rho;
    }
    if let Some(entropy) = overrides.entropy {
        base.entropy = entropy;
    }
    if let Some(kappa) = overrides.kappa {
        base.kappa = kappa;
    }

    Ok(base)
}
