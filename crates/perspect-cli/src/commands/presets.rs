use crate::cli::{OutputFormat, PresetsArgs};
use crate::config::FileConfig;
use crate::error::{CliError, Result};
use crate::utils::parser;
use perspect::core::catalog::{Category, Confidence, Preset};
use perspect::core::invariants::Invariants;
use perspect::workflows::spectrum::{self, SpectrumEntry};
use serde::Serialize;
use tracing::info;

/// One flat row of the listing; kept flat so the CSV writer can serialize it.
#[derive(Debug, Serialize)]
struct Row {
    name: String,
    category: Category,
    confidence: Confidence,
    phi: f64,
    tau: f64,
    rho: f64,
    entropy: f64,
    kappa: f64,
    density: f64,
}

impl Row {
    fn from_preset(preset: &Preset) -> Self {
        let invariants = preset.invariants;
        Self {
            name: preset.name.clone(),
            category: preset.category,
            confidence: preset.confidence,
            phi: invariants.phi,
            tau: invariants.tau,
            rho: invariants.rho,
            entropy: invariants.entropy,
            kappa: invariants.kappa,
            density: preset.score().density,
        }
    }

    fn from_entry(entry: SpectrumEntry) -> Self {
        Self {
            name: entry.name,
            category: entry.category,
            confidence: entry.confidence,
            phi: entry.invariants.phi,
            tau: entry.invariants.tau,
            rho: entry.invariants.rho,
            entropy: entry.invariants.entropy,
            kappa: entry.invariants.kappa,
            density: entry.density,
        }
    }
}

pub fn run(args: PresetsArgs, file_config: &FileConfig) -> Result<()> {
    let scoring = file_config.scoring();
    let catalog_path = args.catalog.as_deref().or(scoring.catalog.as_deref());
    let library = parser::load_catalog(catalog_path)?;

    if let Some(name) = &args.show {
        let preset = library
            .get(name)
            .ok_or_else(|| CliError::Argument(format!("unknown preset '{name}'")))?;
        print_card(preset);
        return Ok(());
    }

    let filter = args
        .category
        .as_deref()
        .map(parser::parse_category)
        .transpose()?;

    let rows: Vec<Row> = if args.spectrum {
        spectrum::run(&library, filter)
            .into_iter()
            .map(Row::from_entry)
            .collect()
    } else {
        library
            .iter()
            .filter(|preset| filter.is_none_or(|category| preset.category == category))
            .map(Row::from_preset)
            .collect()
    };

    info!(rows = rows.len(), "Rendering preset listing.");
    match args.format {
        OutputFormat::Table => print_table(&rows),
        OutputFormat::Csv => write_csv(&rows)?,
    }
    Ok(())
}

fn print_table(rows: &[Row]) {
    println!(
        "{:<34} {:<13} {:<12} {:>7} {:>7} {:>7} {:>7} {:>7} {:>8}",
        "NAME", "CATEGORY", "CONFIDENCE", "φ", "τ", "ρ", "H", "κ", "DENSITY"
    );
    for row in rows {
        println!(
            "{:<34} {:<13} {:<12} {:>7.3} {:>7.3} {:>7.3} {:>7.3} {:>7.3} {:>8.4}",
            row.name,
            row.category,
            row.confidence,
            row.phi,
            row.tau,
            row.rho,
            row.entropy,
            row.kappa,
            row.density,
        );
    }
    println!("\n{} preset(s)", rows.len());
}

fn write_csv(rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_card(preset: &Preset) {
    let score = preset.score();
    println!("{}", preset.name);
    println!("  category     {}", preset.category);
    println!("  confidence   {}", preset.confidence);
    println!("  {}", format_invariants(&preset.invariants));
    println!(
        "  density      {:.4}  ({:?})",
        score.density, score.interpretation
    );
    for warning in &score.warnings {
        println!("  warning      {warning}");
    }
    println!("  {}", preset.description);
}

fn format_invariants(invariants: &Invariants) -> String {
    format!(
        "invariants   φ = {:.2}   τ = {:.2}   ρ = {:.2}   H = {:.2}   κ = {:.2}",
        invariants.phi, invariants.tau, invariants.rho, invariants.entropy, invariants.kappa
    )
}
