use crate::cli::ScoreArgs;
use crate::config::FileConfig;
use crate::error::Result;
use crate::utils::parser;
use perspect::core::invariants::{Invariants, Param};
use perspect::core::scoring::DEFAULT_PARAM_UNCERTAINTY;
use perspect::engine::config::EvaluateConfig;
use perspect::workflows::evaluate::{self, Evaluation, MatchSummary};
use tracing::{info, warn};

pub fn run(args: ScoreArgs, file_config: &FileConfig) -> Result<()> {
    let scoring = file_config.scoring();

    let catalog_path = args.catalog.as_deref().or(scoring.catalog.as_deref());
    let library = parser::load_catalog(catalog_path)?;

    let base = parser::resolve_base(&args.values, &args.vector, args.preset.as_deref(), &library)?;
    let sanitized = base.sanitized();
    if sanitized != base {
        warn!("Input vector was outside [0, 1] and has been clamped.");
    }

    let config = EvaluateConfig {
        param_uncertainty: args
            .uncertainty
            .or(scoring.param_uncertainty)
            .unwrap_or(DEFAULT_PARAM_UNCERTAINTY),
        match_filter: args
            .category
            .as_deref()
            .map(parser::parse_category)
            .transpose()?,
    };

    info!("Invoking the evaluation workflow.");
    let evaluation = evaluate::run(&base, &library, &config)?;
    print_report(&evaluation, config.param_uncertainty);
    Ok(())
}

fn print_report(evaluation: &Evaluation, uncertainty: f64) {
    println!("{}", format_vector(&evaluation.invariants));
    println!();

    let score = &evaluation.score;
    println!(
        "Density          D = {:.4}   ({:?})",
        score.density, score.interpretation
    );
    println!("  structural base      {:.4}", score.structural_base);
    println!("  entropy penalty      {:.4}", score.entropy_penalty);
    println!("  coherence recovery   {:.4}", score.coherence_recovery);
    println!("  entropy modulator    {:.4}", score.entropy_modulator);
    println!();

    let envelope = &evaluation.uncertainty;
    println!(
        "Envelope (u = {:.2})   σ = {:.4}   D ∈ [{:.4}, {:.4}]",
        uncertainty, envelope.sigma, envelope.d_min, envelope.d_max
    );
    println!();

    let gradient = &evaluation.sensitivity;
    println!(
        "Sensitivity      ∂D/∂φ = {:+.4}   ∂D/∂τ = {:+.4}   ∂D/∂ρ = {:+.4}",
        gradient.d_phi, gradient.d_tau, gradient.d_rho
    );
    println!(
        "                 ∂D/∂H = {:+.4}   ∂D/∂κ = {:+.4}",
        gradient.d_entropy, gradient.d_kappa
    );
    println!(
        "                 most sensitive to: {}",
        gradient.dominant().symbol()
    );
    println!();

    match &evaluation.closest {
        Some(summary) => println!("Closest preset   {}", format_match(summary)),
        None => println!("Closest preset   (catalog is empty)"),
    }
    if let Some(summary) = &evaluation.closest_animal {
        println!("Closest animal   {}", format_match(summary));
    }
    println!();

    if !score.warnings.is_empty() {
        println!("Warnings");
        for warning in &score.warnings {
            println!("  ! {warning}");
        }
        println!();
    }

    println!("{}", score.interpretation);
}

fn format_vector(invariants: &Invariants) -> String {
    let mut line = String::from("Invariants      ");
    for param in Param::ALL {
        line.push_str(&format!(
            " {} = {:.3}  ",
            param.symbol(),
            invariants.get(param)
        ));
    }
    line.trim_end().to_string()
}

fn format_match(summary: &MatchSummary) -> String {
    format!(
        "{:<28} [{}/{}]   Δ = {:.3}   D = {:.3}",
        summary.name, summary.category, summary.confidence, summary.distance, summary.density
    )
}
