use super::tuning::bin_to_frequency;
use super::DspError;

/// Attenuate the low-frequency bias of each per-group spectrum.
///
/// For every row, `row[i] -= row[i] / (i + 1)` — equivalently
/// `row[i] *= i / (i + 1)`. This is a multiplicative 1/(i+1) shaping, not a
/// true mean removal: it zeroes the DC bin outright and shades the next few
/// bins down, leaving the rest nearly untouched. Crude, but enough to keep
/// the argmax off the DC hump.
pub fn remove_dc_bias(spectra: &[Vec<f32>]) -> Vec<Vec<f32>> {
    spectra
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(i, &amp)| amp - amp / (i + 1) as f32)
                .collect()
        })
        .collect()
}

/// The dominant frequency of each analysis group, in group order.
///
/// Per row: take the argmax (first occurrence wins on ties) and convert that
/// bin to Hz using the row's own length as the transform length. One
/// frequency per group, same order as the input.
pub fn dominant_frequency_per_group(
    spectra: &[Vec<f32>],
    sample_rate: u32,
) -> Result<Vec<f64>, DspError> {
    if spectra.is_empty() {
        return Err(DspError::EmptyInput("no analysis groups".into()));
    }

    spectra
        .iter()
        .enumerate()
        .map(|(group, row)| {
            if row.is_empty() {
                return Err(DspError::EmptyInput(format!(
                    "analysis group {group} has an empty spectrum"
                )));
            }

            // Strictly-greater comparison keeps the first bin on ties.
            let (peak, _) = row.iter().enumerate().fold((0, row[0]), |(bi, bv), (i, &v)| {
                if v > bv {
                    (i, v)
                } else {
                    (bi, bv)
                }
            });

            let freq = bin_to_frequency(peak, row.len(), sample_rate)?;
            tracing::debug!(group, peak, freq, "dominant bin for group");
            Ok(freq)
        })
        .collect()
}
