use std::f64::consts::PI;

use rustfft::{num_complex::Complex, FftPlanner};
use serde::{Deserialize, Serialize};

use super::windowing::{self, WindowKind};
use super::DspError;

/// Which frequency-domain transform to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    /// Discrete Fourier transform (rustfft). The default.
    Fft,
    /// Type-II discrete cosine transform. Real-valued by construction, so
    /// the "magnitude" is just the absolute coefficient. Direct O(N²)
    /// evaluation — fine at analysis-group sizes.
    Dct,
}

impl Default for TransformKind {
    fn default() -> Self {
        TransformKind::Fft
    }
}

/// Transform a time-domain frame into a magnitude spectrum.
///
/// The window runs first, then the transform, then the absolute value of
/// each coefficient. Both transforms use orthonormal scaling (1/sqrt(N) for
/// the FFT) so amplitude thresholds compare consistently across frame sizes.
/// The output has the same length as the input — no half-spectrum
/// truncation, so for the FFT the top half mirrors the bottom.
pub fn magnitude_spectrum(
    segment: &[f32],
    window: WindowKind,
    transform: TransformKind,
) -> Result<Vec<f32>, DspError> {
    if segment.is_empty() {
        return Err(DspError::EmptyInput("cannot transform an empty frame".into()));
    }

    let windowed = windowing::apply(window, segment);

    let spectrum = match transform {
        TransformKind::Fft => fft_magnitudes(&windowed),
        TransformKind::Dct => dct_magnitudes(&windowed),
    };

    tracing::debug!(
        frame = segment.len(),
        ?window,
        ?transform,
        "computed magnitude spectrum"
    );

    Ok(spectrum)
}

fn fft_magnitudes(windowed: &[f32]) -> Vec<f32> {
    let n = windowed.len();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);

    let mut buffer: Vec<Complex<f32>> = windowed
        .iter()
        .map(|&s| Complex { re: s, im: 0.0 })
        .collect();

    fft.process(&mut buffer);

    // rustfft leaves the transform unscaled; divide by sqrt(N) for the
    // orthonormal convention.
    let scale = 1.0 / (n as f32).sqrt();
    buffer.iter().map(|c| c.norm() * scale).collect()
}

/// Orthonormal DCT-II: X_k = s_k * Σ x_i cos(π (i + ½) k / N),
/// with s_0 = sqrt(1/N) and s_k = sqrt(2/N) otherwise.
///
/// Accumulates in f64 — the cosine argument grows with i*k and f32 loses the
/// phase long before typical frame sizes.
fn dct_magnitudes(windowed: &[f32]) -> Vec<f32> {
    let n = windowed.len();
    let nf = n as f64;
    let scale0 = (1.0 / nf).sqrt();
    let scale = (2.0 / nf).sqrt();

    (0..n)
        .map(|k| {
            let sum: f64 = windowed
                .iter()
                .enumerate()
                .map(|(i, &x)| x as f64 * (PI * (i as f64 + 0.5) * k as f64 / nf).cos())
                .sum();
            let s = if k == 0 { scale0 } else { scale };
            (s * sum).abs() as f32
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    /// A sinusoid completing exactly `cycles` periods over `n` samples, so
    /// its energy lands in a single FFT bin.
    fn sine_at_bin(cycles: usize, n: usize, amplitude: f32) -> Vec<f32> {
        (0..n)
            .map(|i| amplitude * (TAU * cycles as f32 * i as f32 / n as f32).sin())
            .collect()
    }

    fn argmax(spectrum: &[f32]) -> usize {
        spectrum
            .iter()
            .enumerate()
            .fold((0, f32::MIN), |(bi, bv), (i, &v)| {
                if v > bv {
                    (i, v)
                } else {
                    (bi, bv)
                }
            })
            .0
    }

    #[test]
    fn output_length_equals_input_length() {
        let frame = sine_at_bin(5, 256, 1.0);
        for transform in [TransformKind::Fft, TransformKind::Dct] {
            let spectrum =
                magnitude_spectrum(&frame, WindowKind::Rectangular, transform).unwrap();
            assert_eq!(spectrum.len(), 256);
        }
    }

    #[test]
    fn pure_tone_peaks_at_its_bin() {
        let frame = sine_at_bin(12, 512, 1.0);
        let spectrum =
            magnitude_spectrum(&frame, WindowKind::Rectangular, TransformKind::Fft).unwrap();
        // Bottom half only; the top half mirrors it.
        assert_eq!(argmax(&spectrum[..256]), 12);
    }

    #[test]
    fn windowed_tone_still_peaks_at_its_bin() {
        let frame = sine_at_bin(12, 512, 1.0);
        for window in [WindowKind::Hann, WindowKind::Blackman] {
            let spectrum = magnitude_spectrum(&frame, window, TransformKind::Fft).unwrap();
            assert_eq!(argmax(&spectrum[..256]), 12, "window {window:?}");
        }
    }

    #[test]
    fn fft_is_orthonormal() {
        // Parseval: with 1/sqrt(N) scaling, spectrum energy equals frame
        // energy.
        let frame = sine_at_bin(7, 256, 0.8);
        let spectrum =
            magnitude_spectrum(&frame, WindowKind::Rectangular, TransformKind::Fft).unwrap();

        let time_energy: f32 = frame.iter().map(|&x| x * x).sum();
        let freq_energy: f32 = spectrum.iter().map(|&x| x * x).sum();
        assert!(
            (time_energy - freq_energy).abs() < 1e-2 * time_energy,
            "time={time_energy} freq={freq_energy}"
        );
    }

    #[test]
    fn dct_of_constant_concentrates_in_bin_zero() {
        let frame = vec![0.5_f32; 64];
        let spectrum =
            magnitude_spectrum(&frame, WindowKind::Rectangular, TransformKind::Dct).unwrap();
        // X_0 = sqrt(1/N) * N * 0.5 = 0.5 * sqrt(N)
        let expected = 0.5 * (64.0_f32).sqrt();
        assert!((spectrum[0] - expected).abs() < 1e-4);
        assert!(spectrum[1..].iter().all(|&v| v < 1e-3));
    }

    #[test]
    fn spectrum_is_non_negative() {
        let frame = sine_at_bin(3, 128, 1.0);
        for transform in [TransformKind::Fft, TransformKind::Dct] {
            let spectrum =
                magnitude_spectrum(&frame, WindowKind::Blackman, transform).unwrap();
            assert!(spectrum.iter().all(|&v| v >= 0.0));
        }
    }

    #[test]
    fn empty_frame_is_rejected() {
        assert!(matches!(
            magnitude_spectrum(&[], WindowKind::Hann, TransformKind::Fft),
            Err(DspError::EmptyInput(_))
        ));
    }
}
