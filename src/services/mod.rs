pub mod analysis;
pub mod batch;

pub use analysis::{analyze_file, analyze_png, palette_report, InkReport, StatsReport};
pub use batch::{BatchService, ConversionReport, QuantizeMode};
