use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use perspect::engine::driver::Frame;

/// Progress bar wrapper for fixed-length simulation runs.
pub struct SimulationProgress {
    bar: ProgressBar,
}

impl SimulationProgress {
    pub fn new(total_frames: u64) -> Self {
        let bar = ProgressBar::new(total_frames).with_style(Self::bar_style());
        bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        Self { bar }
    }

    /// Advances the bar by one frame and shows its density.
    pub fn observe(&self, frame: &Frame) {
        self.bar.set_message(format!("D = {:.4}", frame.score.density));
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("✓ Done");
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<12} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Failed to create bar style template")
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    write!(w, "{:.1}s", state.eta().as_secs_f64()).unwrap()
                },
            )
            .progress_chars("##-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perspect::core::invariants::Invariants;
    use perspect::engine::config::DriverConfigBuilder;
    use perspect::engine::driver::PerturbationDriver;

    fn one_frame() -> Frame {
        let config = DriverConfigBuilder::new()
            .seed(1)
            .build()
            .expect("default driver config is valid");
        PerturbationDriver::new(Invariants::BASELINE, config).advance(1.0 / 30.0)
    }

    #[test]
    fn observing_a_frame_advances_the_bar() {
        let progress = SimulationProgress::new(10);
        assert_eq!(progress.bar.position(), 0);

        progress.observe(&one_frame());
        assert_eq!(progress.bar.position(), 1);
        assert_eq!(progress.bar.length(), Some(10));
        assert!(progress.bar.message().starts_with("D = "));
    }

    #[test]
    fn finish_marks_the_bar_done() {
        let progress = SimulationProgress::new(2);
        progress.observe(&one_frame());
        progress.finish();
        assert!(progress.bar.is_finished());
        assert_eq!(progress.bar.message(), "✓ Done");
    }
}
