use spectra_dither::{
    AdaptiveMapper, DitherOptions, DitheredImage, PaletteCatalog, PaletteColor, SpectraDitherer,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::error::RenderError;
use crate::rendering::{decode_png, encode_png};

/// How each image is mapped onto the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuantizeMode {
    /// Error diffusion with CIEDE2000 matching
    #[default]
    Dither,
    /// Per-pixel weighted-RGB nearest ink, no diffusion
    Adaptive,
}

/// Result of converting one input file
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub preview: PathBuf,
    pub packed: Option<PathBuf>,
    pub width: usize,
    pub height: usize,
    /// Pixel count per ink, in [`PaletteColor::ALL`] order
    pub ink_counts: [usize; 6],
}

/// Converts PNG files concurrently, each on its own blocking thread
///
/// The palette catalog is built once and shared; every conversion gets its
/// own color cache inside the engine.
pub struct BatchService {
    ditherer: Arc<SpectraDitherer>,
    permits: Arc<Semaphore>,
    mode: QuantizeMode,
    packed: bool,
}

impl BatchService {
    pub fn new(options: DitherOptions, workers: usize) -> Self {
        Self::with_catalog(Arc::new(PaletteCatalog::new()), options, workers)
    }

    pub fn with_catalog(catalog: Arc<PaletteCatalog>, options: DitherOptions, workers: usize) -> Self {
        Self {
            ditherer: Arc::new(SpectraDitherer::with_catalog(catalog).options(options)),
            permits: Arc::new(Semaphore::new(workers.max(1))),
            mode: QuantizeMode::default(),
            packed: false,
        }
    }

    /// Also write the device's packed 4-bit buffer next to each preview.
    pub fn packed_output(mut self, enabled: bool) -> Self {
        self.packed = enabled;
        self
    }

    pub fn mode(mut self, mode: QuantizeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Decode and quantize a PNG held in memory.
    ///
    /// CPU-bound; call from a blocking context.
    pub fn convert_png(
        ditherer: &SpectraDitherer,
        mode: QuantizeMode,
        png_data: &[u8],
    ) -> Result<DitheredImage, RenderError> {
        let pixels = decode_png(png_data)?;
        Ok(match mode {
            QuantizeMode::Dither => ditherer.dither(pixels),
            QuantizeMode::Adaptive => AdaptiveMapper::quantize(pixels),
        })
    }

    /// Convert one file and write its outputs into `out_dir`.
    pub async fn convert_file(
        &self,
        input: &Path,
        out_dir: &Path,
    ) -> Result<ConversionReport, RenderError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| RenderError::Task(e.to_string()))?;

        let data = tokio::fs::read(input).await?;
        let ditherer = self.ditherer.clone();
        let mode = self.mode;
        let packed = self.packed;

        let (image, preview_png, packed_buf) = tokio::task::spawn_blocking(move || {
            let image = Self::convert_png(&ditherer, mode, &data)?;
            let preview_png = encode_png(&image)?;
            let packed_buf = packed.then(|| image.to_packed_4bpp());
            Ok::<_, RenderError>((image, preview_png, packed_buf))
        })
        .await
        .map_err(|e| RenderError::Task(format!("Conversion task failed: {e}")))??;

        let (preview, packed) = output_paths(input, out_dir);
        tokio::fs::write(&preview, &preview_png).await?;
        let packed = match packed_buf {
            Some(buf) => {
                tokio::fs::write(&packed, &buf).await?;
                Some(packed)
            }
            None => None,
        };

        let report = ConversionReport {
            input: input.to_path_buf(),
            preview,
            packed,
            width: image.width(),
            height: image.height(),
            ink_counts: PaletteColor::ALL.map(|color| image.count(color)),
        };

        tracing::info!(
            input = %report.input.display(),
            width = report.width,
            height = report.height,
            "Converted image"
        );
        Ok(report)
    }

    /// Convert every input, at most `workers` at a time.
    ///
    /// Results come back in input order; one failure does not stop the rest.
    pub async fn run(
        self: Arc<Self>,
        inputs: Vec<PathBuf>,
        out_dir: PathBuf,
    ) -> Vec<(PathBuf, Result<ConversionReport, RenderError>)> {
        let out_dir = Arc::new(out_dir);
        let handles: Vec<_> = inputs
            .into_iter()
            .map(|input| {
                let service = self.clone();
                let out_dir = out_dir.clone();
                let task_input = input.clone();
                let handle =
                    tokio::spawn(async move { service.convert_file(&task_input, &out_dir).await });
                (input, handle)
            })
            .collect();

        collect_results(handles).await
    }
}

/// Await conversion tasks in order, turning a failed task into an error entry.
async fn collect_results(
    handles: Vec<(PathBuf, JoinHandle<Result<ConversionReport, RenderError>>)>,
) -> Vec<(PathBuf, Result<ConversionReport, RenderError>)> {
    let mut results = Vec::with_capacity(handles.len());
    for (input, handle) in handles {
        let result = handle
            .await
            .unwrap_or_else(|e| Err(RenderError::Task(format!("Conversion task failed: {e}"))));
        if let Err(e) = &result {
            tracing::warn!(input = %input.display(), %e, "Conversion failed");
        }
        results.push((input, result));
    }
    results
}

/// Preview and packed-buffer paths for `input` inside `out_dir`.
pub fn output_paths(input: &Path, out_dir: &Path) -> (PathBuf, PathBuf) {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    (
        out_dir.join(format!("{stem}_spectra6.png")),
        out_dir.join(format!("{stem}_spectra6.bin")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::encode_rgb_png;

    #[test]
    fn test_output_paths() {
        let (preview, packed) = output_paths(Path::new("/in/photo.png"), Path::new("/out"));
        assert_eq!(preview, PathBuf::from("/out/photo_spectra6.png"));
        assert_eq!(packed, PathBuf::from("/out/photo_spectra6.bin"));
    }

    #[test]
    fn test_convert_png_modes_agree_on_exact_inks() {
        let rgb: Vec<u8> = PaletteColor::ALL
            .iter()
            .flat_map(|c| c.rgb().to_bytes())
            .collect();
        let png = encode_rgb_png(&rgb, 6, 1).unwrap();
        let ditherer = SpectraDitherer::new();

        let dithered = BatchService::convert_png(&ditherer, QuantizeMode::Dither, &png).unwrap();
        let adaptive = BatchService::convert_png(&ditherer, QuantizeMode::Adaptive, &png).unwrap();

        assert_eq!(dithered.colors(), &PaletteColor::ALL);
        assert_eq!(adaptive.colors(), &PaletteColor::ALL);
    }

    #[tokio::test]
    async fn test_failed_task_is_reported_in_place() {
        let finished = tokio::spawn(async {
            Err::<ConversionReport, _>(RenderError::PngDecode("bad".to_string()))
        });
        let aborted = tokio::spawn(std::future::pending::<Result<ConversionReport, RenderError>>());
        aborted.abort();

        let results = collect_results(vec![
            (PathBuf::from("a.png"), finished),
            (PathBuf::from("b.png"), aborted),
        ])
        .await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, PathBuf::from("a.png"));
        assert!(matches!(results[0].1, Err(RenderError::PngDecode(_))));
        assert_eq!(results[1].0, PathBuf::from("b.png"));
        assert!(matches!(results[1].1, Err(RenderError::Task(_))));
    }

    #[tokio::test]
    async fn test_convert_file_missing_input() {
        let service = BatchService::new(DitherOptions::default(), 1);
        let err = service
            .convert_file(Path::new("/no/such/input.png"), Path::new("/tmp"))
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }
}
