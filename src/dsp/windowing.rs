use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Window function applied to a frame before the spectral transform.
///
/// Windowing tapers the frame toward zero at both edges so the transform
/// doesn't see the discontinuity of an abruptly chopped cycle (spectral
/// leakage). It must run before the transform — windowing an already
/// transformed spectrum is meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    /// No tapering at all. Keeps the frame unchanged; useful as a baseline
    /// and for signals that are already periodic within the frame.
    Rectangular,
    /// w(n) = 0.5 * (1 - cos(2π n / (N-1))). Good general-purpose taper.
    Hann,
    /// w(n) = 0.42 - 0.5 cos(2π n / (N-1)) + 0.08 cos(4π n / (N-1)).
    /// Heavier side-lobe suppression than Hann at the cost of a wider
    /// main lobe.
    Blackman,
}

impl Default for WindowKind {
    fn default() -> Self {
        WindowKind::Blackman
    }
}

/// Apply a window to a frame, returning a new Vec.
///
/// Frames of length 0 or 1 are returned unchanged (there are no edges to
/// taper).
pub fn apply(kind: WindowKind, samples: &[f32]) -> Vec<f32> {
    let n = samples.len();
    if n <= 1 || kind == WindowKind::Rectangular {
        return samples.to_vec();
    }

    let scale = 2.0 * PI / (n - 1) as f32;

    samples
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let x = scale * i as f32;
            let w = match kind {
                WindowKind::Rectangular => 1.0,
                WindowKind::Hann => 0.5 * (1.0 - x.cos()),
                WindowKind::Blackman => 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos(),
            };
            s * w
        })
        .collect()
}
