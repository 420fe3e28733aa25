use crate::cli::SweepArgs;
use crate::config::FileConfig;
use crate::error::Result;
use crate::utils::parser;
use perspect::workflows::sweep::{self, SweepConfig};
use tracing::info;

pub fn run(args: SweepArgs, _file_config: &FileConfig) -> Result<()> {
    let param = parser::parse_param(&args.param)?;
    let base = parser::resolve_base(
        &[],
        &args.vector,
        None,
        perspect::core::catalog::PresetLibrary::builtin(),
    )?;

    let config = SweepConfig {
        param,
        steps: args.steps,
        base,
    };
    info!(param = param.name(), steps = args.steps, "Invoking the sweep workflow.");
    let points = sweep::run(&config)?;

    println!(
        "Sweeping {} with the other invariants held at their base values\n",
        param.symbol()
    );
    println!("{:>8} {:>10} {:>12}", param.symbol(), "D", "∂D/∂value");
    for point in points {
        println!(
            "{:>8.3} {:>10.4} {:>12.4}",
            point.value, point.density, point.d_value
        );
    }
    Ok(())
}
