use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;

/// Chart dimensions
const WIDTH: u32 = 1200;
const HEIGHT: u32 = 600;

const COLOR_PRIMARY: RGBColor = RGBColor(41, 128, 185); // blue

/// How many leading bins of the spectrum to draw. The interesting tonal
/// content sits in the low bins; drawing the whole mirrored spectrum just
/// flattens it.
const MAX_BINS: usize = 1000;

/// Render the leading portion of a magnitude spectrum to a PNG.
///
/// X axis is frequency in Hz (bin index scaled by the bin resolution),
/// Y axis is magnitude in the transform's orthonormal units.
pub fn render_spectrum(spectrum: &[f32], sample_rate: u32, output_path: &Path) -> Result<()> {
    if spectrum.is_empty() {
        anyhow::bail!("nothing to plot: empty spectrum");
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let bins = spectrum.len().min(MAX_BINS);
    let hz_per_bin = sample_rate as f32 / spectrum.len() as f32;

    let y_max = spectrum[..bins]
        .iter()
        .fold(0.0_f32, |max, &v| max.max(v))
        .max(1e-6)
        * 1.05;
    let x_max = bins as f32 * hz_per_bin;

    let root = BitMapBackend::new(output_path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).context("Failed to fill background")?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Magnitude Spectrum", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0_f32..x_max, 0.0_f32..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Frequency (Hz)")
        .y_desc("Magnitude")
        .draw()?;

    let points: Vec<(f32, f32)> = spectrum[..bins]
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f32 * hz_per_bin, v))
        .collect();
    chart.draw_series(LineSeries::new(points, &COLOR_PRIMARY))?;

    root.present().context("Failed to write chart PNG")?;

    tracing::debug!(path = %output_path.display(), bins, "rendered spectrum chart");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spectrum.png");

        let spectrum: Vec<f32> = (0..2048).map(|i| ((i % 64) as f32) / 64.0).collect();
        render_spectrum(&spectrum, 44100, &path).unwrap();

        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.len() > 0);
    }

    #[test]
    fn empty_spectrum_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        assert!(render_spectrum(&[], 44100, &path).is_err());
    }
}
