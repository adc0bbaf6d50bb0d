use serde::Serialize;
use spectra_dither::{AdaptiveMapper, ImageStats, PaletteCatalog};
use std::path::Path;

use crate::error::RenderError;
use crate::rendering::decode_png;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeReport {
    pub min: f32,
    pub max: f32,
    pub avg: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub width: usize,
    pub height: usize,
    pub samples: usize,
    pub brightness: RangeReport,
    pub saturation: RangeReport,
    pub red: usize,
    pub yellow: usize,
    pub green: usize,
    pub blue: usize,
}

impl StatsReport {
    fn new(width: usize, height: usize, stats: ImageStats) -> Self {
        let range = |r: spectra_dither::adaptive::Range| RangeReport {
            min: r.min,
            max: r.max,
            avg: r.avg,
        };
        Self {
            width,
            height,
            samples: stats.samples,
            brightness: range(stats.brightness),
            saturation: range(stats.saturation),
            red: stats.hues.red,
            yellow: stats.hues.yellow,
            green: stats.hues.green,
            blue: stats.hues.blue,
        }
    }
}

/// Sample a PNG with the adaptive statistics pass.
pub fn analyze_png(png_data: &[u8]) -> Result<StatsReport, RenderError> {
    let pixels = decode_png(png_data)?;
    let stats = AdaptiveMapper::stats(&pixels);
    Ok(StatsReport::new(pixels.width(), pixels.height(), stats))
}

/// Read and analyze a PNG file off the async runtime.
pub async fn analyze_file(path: &Path) -> Result<StatsReport, RenderError> {
    let data = tokio::fs::read(path).await?;
    tokio::task::spawn_blocking(move || analyze_png(&data))
        .await
        .map_err(|e| RenderError::Task(format!("Analysis task failed: {e}")))?
}

/// One hardware ink as printed by the `palette` command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InkReport {
    pub name: &'static str,
    pub index: u8,
    pub hex: String,
    pub lab: [f32; 3],
}

pub fn palette_report(catalog: &PaletteCatalog) -> Vec<InkReport> {
    catalog
        .entries()
        .iter()
        .map(|e| InkReport {
            name: e.name,
            index: e.hardware_index,
            hex: e.rgb.to_string(),
            lab: [e.lab.l, e.lab.a, e.lab.b],
        })
        .collect()
}
