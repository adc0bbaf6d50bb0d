//! Domain-critical regression tests for spectra-dither.
//!
//! Each test names the behavior it protects. Most of them are about the
//! contract with the panel driver: output pixels must land exactly on the
//! six hardware triples, and the driver's threshold classifier must agree
//! with the ink the engine chose.

#[cfg(test)]
mod domain_tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::api::SpectraDitherer;
    use crate::buffer::PixelBuffer;
    use crate::color::Rgb;
    use crate::dither::{DitherAlgorithm, DitherOptions};
    use crate::output::{classify_rgb, DitheredImage};
    use crate::palette::{nearest_uncached, ColorMatcher, PaletteCatalog, PaletteColor};

    fn random_buffer(seed: u64, width: usize, height: usize) -> PixelBuffer {
        let mut rng = StdRng::seed_from_u64(seed);
        let data: Vec<u8> = (0..width * height * 3).map(|_| rng.gen()).collect();
        PixelBuffer::from_rgb_bytes(data, width, height).unwrap()
    }

    fn ditherer(algorithm: DitherAlgorithm) -> SpectraDitherer {
        SpectraDitherer::new().algorithm(algorithm)
    }

    fn assert_palette_closed(image: &DitheredImage) {
        for (i, (rgb, color)) in image.pixels().zip(image.colors()).enumerate() {
            assert_eq!(
                rgb,
                color.rgb(),
                "REGRESSION: pixel {i} is {rgb}, not the {color} ink triple"
            );
        }
    }

    // ========================================================================
    // Palette closure and the driver contract
    // ========================================================================

    /// If this breaks, the driver receives colors that are not one of its
    /// six triples and will re-map them with its own crude thresholds.
    #[test]
    fn test_palette_closure_on_random_input() {
        for algorithm in DitherAlgorithm::ALL {
            for seed in 0..4 {
                let image = ditherer(algorithm).dither(random_buffer(seed, 37, 23));
                assert_palette_closed(&image);
            }
        }
    }

    /// If this breaks, the engine and the driver disagree about which ink a
    /// pixel gets: the panel shows something other than what was previewed.
    #[test]
    fn test_cross_system_round_trip() {
        for algorithm in DitherAlgorithm::ALL {
            for seed in 10..14 {
                let boosted = ditherer(algorithm).saturation(1.5);
                let image = boosted.dither(random_buffer(seed, 31, 17));
                for (rgb, &color) in image.pixels().zip(image.colors()) {
                    assert_eq!(
                        classify_rgb(rgb).hardware_index(),
                        color.hardware_index(),
                        "REGRESSION: driver classifies {rgb} differently from engine ({color})"
                    );
                }
            }
        }
    }

    /// If this breaks, the packed framebuffer no longer matches the index
    /// plane the driver would compute from the RGB output.
    #[test]
    fn test_packed_buffer_matches_driver_packing() {
        let image = ditherer(DitherAlgorithm::FloydSteinberg).dither(random_buffer(99, 7, 3));
        let driver_view: Vec<PaletteColor> = image.pixels().map(classify_rgb).collect();
        assert_eq!(image.to_packed_4bpp(), crate::output::pack_4bpp(&driver_view));
        assert_eq!(image.to_packed_4bpp().len(), 11);
    }

    // ========================================================================
    // Determinism and cache transparency
    // ========================================================================

    /// If this breaks, some hidden state (cache, iteration order of a hash
    /// map, shared mutable data) leaks into the result.
    #[test]
    fn test_determinism() {
        for algorithm in DitherAlgorithm::ALL {
            let options = DitherOptions::new().algorithm(algorithm).saturation_boost(1.2);
            let a = SpectraDitherer::new().options(options.clone());
            let b = SpectraDitherer::new().options(options);
            let input = random_buffer(7, 40, 30);
            let first = a.dither(input.clone());
            assert_eq!(first, a.dither(input.clone()));
            assert_eq!(first, b.dither(input));
        }
    }

    /// If this breaks, memoized results differ from a fresh computation.
    #[test]
    fn test_cache_transparency() {
        let catalog = PaletteCatalog::new();
        let mut matcher = ColorMatcher::new(&catalog);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let rgb = Rgb::new(rng.gen(), rng.gen(), rng.gen());
            let cached_first = matcher.match_rgb(rgb);
            let cached_again = matcher.match_rgb(rgb);
            let fresh = nearest_uncached(&catalog, rgb);
            assert_eq!(cached_first, fresh);
            assert_eq!(cached_again, fresh);
        }
        assert!(matcher.cache_stats().hits >= 500);
    }

    // ========================================================================
    // Exact inputs stay exact
    // ========================================================================

    /// If this breaks, a solid palette-colored area picks up diffusion
    /// speckle even though its residue is zero everywhere.
    #[test]
    fn test_zero_residue_stability() {
        for algorithm in DitherAlgorithm::ALL {
            for color in PaletteColor::ALL {
                let input = PixelBuffer::filled(color.rgb(), 9, 7).unwrap();
                let image = ditherer(algorithm).dither(input.clone());
                assert_eq!(
                    image.as_rgb_bytes(),
                    input.as_bytes(),
                    "REGRESSION: uniform {color} changed under {algorithm}"
                );
            }
        }
    }

    /// Near-black and near-white neighbors snap to the inks; the small
    /// residue from the first pixel cannot flip the second.
    #[test]
    fn test_near_black_near_white_pair() {
        let input =
            PixelBuffer::from_pixels(&[Rgb::new(10, 10, 10), Rgb::new(245, 245, 245)], 2, 1)
                .unwrap();
        let image = ditherer(DitherAlgorithm::FloydSteinberg).dither(input);
        assert_eq!(image.as_rgb_bytes(), &[0, 0, 0, 255, 255, 255]);
    }

    // ========================================================================
    // Tie-break and mid-grey behavior
    // ========================================================================

    /// If this breaks, a single mid-grey pixel resolves to different inks
    /// across runs or algorithms. Under unit-weight ΔE00 mid grey sits
    /// closer to Red than to Black or White.
    #[test]
    fn test_single_mid_grey_pixel_is_stable() {
        let mut seen = Vec::new();
        for algorithm in DitherAlgorithm::ALL {
            for _ in 0..3 {
                let input = PixelBuffer::filled(Rgb::new(128, 128, 128), 1, 1).unwrap();
                seen.push(ditherer(algorithm).dither(input).colors()[0]);
            }
        }
        assert!(seen.iter().all(|&c| c == seen[0]));
        assert_eq!(seen[0], PaletteColor::Red);
    }

    // ========================================================================
    // Kernel behavior on realistic inputs
    // ========================================================================

    /// Uniform dark red can only be built from Red and darker inks; if any
    /// other ink appears the residue is leaking into the wrong channels.
    #[test]
    fn test_uniform_dark_red_mosaic() {
        let input = PixelBuffer::filled(Rgb::new(200, 0, 0), 100, 100).unwrap();
        let image = ditherer(DitherAlgorithm::FloydSteinberg).dither(input);

        assert_palette_closed(&image);
        for &color in image.colors() {
            assert!(
                matches!(
                    color,
                    PaletteColor::Red | PaletteColor::Black | PaletteColor::White
                ),
                "REGRESSION: {color} appeared in a uniform (200,0,0) image"
            );
        }
        assert!(image.pixels().all(|p| p != Rgb::new(200, 0, 0)));
        assert!(image.count(PaletteColor::Red) > 0);
        assert!(image.count(PaletteColor::Black) > 0);
    }

    /// Floyd-Steinberg keeps all residue, so the mean red channel of the
    /// output tracks the input level.
    #[test]
    fn test_floyd_steinberg_preserves_mean_level() {
        let input = PixelBuffer::filled(Rgb::new(200, 0, 0), 100, 100).unwrap();
        let image = ditherer(DitherAlgorithm::FloydSteinberg).dither(input);
        let mean_r = image.pixels().map(|p| p.r as f64).sum::<f64>() / image.len() as f64;
        assert!(
            (mean_r - 200.0).abs() < 5.0,
            "REGRESSION: mean red {mean_r:.1}, expected about 200"
        );
    }

    /// If this breaks, the algorithm selector is not reaching the scan.
    #[test]
    fn test_atkinson_and_floyd_steinberg_differ() {
        let input = PixelBuffer::filled(Rgb::new(200, 0, 0), 100, 100).unwrap();
        let fs = ditherer(DitherAlgorithm::FloydSteinberg).dither(input.clone());
        let atkinson = ditherer(DitherAlgorithm::Atkinson).dither(input);
        assert_ne!(fs.colors(), atkinson.colors());
        // Atkinson drops a quarter of every residue, so it uses less black
        assert!(atkinson.count(PaletteColor::Black) < fs.count(PaletteColor::Black));
    }

    /// Dimensions and byte layout are unchanged by a conversion.
    #[test]
    fn test_output_layout_matches_input() {
        let input = random_buffer(3, 13, 5);
        let image = ditherer(DitherAlgorithm::Atkinson).dither(input);
        assert_eq!(image.width(), 13);
        assert_eq!(image.height(), 5);
        assert_eq!(image.as_rgb_bytes().len(), 13 * 5 * 3);
        assert_eq!(image.hardware_indices().len(), 13 * 5);
    }
}
