use crate::cli::SimulateArgs;
use crate::config::{DriftSection, FileConfig};
use crate::error::Result;
use crate::utils::parser;
use crate::utils::progress::SimulationProgress;
use perspect::core::invariants::Param;
use perspect::engine::burst::BurstConfig;
use perspect::engine::config::{
    DEFAULT_DURATION_SECONDS, DEFAULT_FRAME_RATE, DriverConfig, DriverConfigBuilder,
    SimulationConfigBuilder,
};
use perspect::engine::driver::Frame;
use perspect::workflows::simulate::{self, SimulationSummary};
use std::time::Duration;
use tracing::info;

pub fn run(args: SimulateArgs, file_config: &FileConfig) -> Result<()> {
    let scoring = file_config.scoring();
    let catalog_path = args.catalog.as_deref().or(scoring.catalog.as_deref());
    let library = parser::load_catalog(catalog_path)?;

    let base = parser::resolve_base(&[], &args.vector, args.preset.as_deref(), &library)?;
    let driver = build_driver_config(&args, &file_config.drift())?;

    let duration = args.duration.unwrap_or(DEFAULT_DURATION_SECONDS);
    let frame_rate = args.fps.unwrap_or(DEFAULT_FRAME_RATE);
    let config = SimulationConfigBuilder::new()
        .base(base)
        .driver(driver)
        .duration_seconds(duration)
        .frame_rate(frame_rate)
        .build()?;

    let total_frames = (duration * frame_rate).ceil() as u64;
    let frame_interval = Duration::from_secs_f64(1.0 / frame_rate);
    info!(
        frames = total_frames,
        realtime = args.realtime,
        "Invoking the simulation workflow."
    );

    let progress = if args.watch {
        None
    } else {
        Some(SimulationProgress::new(total_frames))
    };
    let mut observer = |frame: &Frame| {
        match &progress {
            Some(progress) => progress.observe(frame),
            None => print_frame(frame),
        }
        if args.realtime {
            std::thread::sleep(frame_interval);
        }
    };

    let summary = simulate::run(&config, Some(&mut observer))?;
    if let Some(progress) = &progress {
        progress.finish();
    }

    print_summary(&summary);
    Ok(())
}

/// Merges drift settings from the config file under the CLI flags.
fn build_driver_config(args: &SimulateArgs, drift: &DriftSection) -> Result<DriverConfig> {
    let mut builder = DriverConfigBuilder::new();

    if let Some(amplitude) = args.amplitude.or(drift.amplitude) {
        builder = builder.drift_amplitude(amplitude);
    }
    if let Some(amplitude) = drift.breath_amplitude {
        builder = builder.breath_amplitude(amplitude);
    }
    if let Some(frequency) = drift.breath_frequency {
        builder = builder.breath_frequency(frequency);
    }

    let bursts_enabled = !args.no_bursts && drift.bursts.unwrap_or(true);
    if !bursts_enabled {
        builder = builder.no_bursts();
    } else if drift.mean_interval.is_some() || drift.gain.is_some() {
        let defaults = BurstConfig::default();
        builder = builder.bursts(BurstConfig {
            mean_interval: drift.mean_interval.unwrap_or(defaults.mean_interval),
            gain: drift.gain.unwrap_or(defaults.gain),
        });
    }

    if let Some(seed) = args.seed.or(drift.seed) {
        builder = builder.seed(seed);
    }

    Ok(builder.build()?)
}

fn print_frame(frame: &Frame) {
    let invariants = &frame.invariants;
    println!(
        "t = {:>7.3}s   φ = {:.3}  τ = {:.3}  ρ = {:.3}  H = {:.3}  κ = {:.3}   D = {:.4}  σ = {:.4}",
        frame.elapsed,
        invariants.phi,
        invariants.tau,
        invariants.rho,
        invariants.entropy,
        invariants.kappa,
        frame.score.density,
        frame.uncertainty.sigma,
    );
}

fn print_summary(summary: &SimulationSummary) {
    println!("\nSimulation summary");
    println!("  frames        {}", summary.frames);
    println!("  elapsed       {:.2}s", summary.elapsed);
    println!("  mean density  {:.4}", summary.mean_density);
    println!(
        "  range         [{:.4}, {:.4}]",
        summary.min_density, summary.max_density
    );
    if let Some(frame) = &summary.final_frame {
        println!("  final state   {}", format_final_state(frame));
        println!("\n{}", frame.score.interpretation);
    }
}

fn format_final_state(frame: &Frame) -> String {
    let mut parts = Vec::with_capacity(Param::ALL.len());
    for param in Param::ALL {
        parts.push(format!(
            "{} = {:.3}",
            param.symbol(),
            frame.invariants.get(param)
        ));
    }
    parts.join("  ")
}
