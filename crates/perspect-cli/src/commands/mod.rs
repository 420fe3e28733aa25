pub mod presets;
pub mod score;
pub mod simulate;
pub mod sweep;
