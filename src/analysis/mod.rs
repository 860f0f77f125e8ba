use std::collections::BTreeSet;

use crate::config::AnalysisConfig;
use crate::dsp::tuning::{bin_to_frequency, NoteName, Tuning};
use crate::dsp::{detect, grouped, segment, spectrum, DspError};

/// Result of whole-buffer significance analysis: the deduplicated note names
/// judged significant, plus the raw frequencies that produced them.
#[derive(Debug, Clone)]
pub struct SignificantNotes {
    /// Deduplicated note names, in name order (the set itself is unordered).
    pub names: BTreeSet<String>,
    /// Frequencies of every bin over the threshold, in bin order.
    pub frequencies: Vec<f64>,
}

/// The dominant note of one analysis group.
#[derive(Debug, Clone)]
pub struct GroupDominant {
    pub group: usize,
    pub frequency: f64,
    /// `None` when the dominant bin is DC — a silent group has no pitch.
    pub note: Option<NoteName>,
}

/// Find every note sounding above the significance threshold across the
/// whole recording.
///
/// Windows and transforms the entire buffer in one frame, scans for bins at
/// or over the threshold, and names each one. The DC bin is excluded here —
/// it dwarfs tonal content and would clear any reasonable threshold.
pub fn significant_notes(
    samples: &[f32],
    sample_rate: u32,
    cfg: &AnalysisConfig,
) -> Result<SignificantNotes, DspError> {
    let tuning = Tuning::new(cfg.reference_pitch_hz)?;

    let spectrum = spectrum::magnitude_spectrum(samples, cfg.window, cfg.transform)?;
    let indices = detect::above_threshold(&spectrum, cfg.threshold);

    tracing::debug!(
        bins = spectrum.len(),
        over_threshold = indices.len(),
        threshold = cfg.threshold,
        "threshold scan"
    );

    let mut names = BTreeSet::new();
    let mut frequencies = Vec::new();
    for index in indices.into_iter().filter(|&i| i != 0) {
        let freq = bin_to_frequency(index, spectrum.len(), sample_rate)?;
        names.insert(tuning.frequency_to_note(freq)?.to_string());
        frequencies.push(freq);
    }

    Ok(SignificantNotes { names, frequencies })
}

/// Find the dominant note of each fixed-duration analysis group.
///
/// The recording is cut into non-overlapping groups of
/// `group_duration_secs`, each group is windowed and transformed
/// independently, the 1/(i+1) low-frequency bias correction is applied, and
/// the loudest bin per group is converted to a frequency and named.
pub fn dominant_notes(
    samples: &[f32],
    sample_rate: u32,
    cfg: &AnalysisConfig,
) -> Result<Vec<GroupDominant>, DspError> {
    let tuning = Tuning::new(cfg.reference_pitch_hz)?;

    // Truncating cast mirrors the group-size rule: 0.1 s at 44.1 kHz is
    // 4410 samples, fractional samples are dropped.
    let group_size = (cfg.group_duration_secs * sample_rate as f32) as usize;
    if group_size == 0 {
        return Err(DspError::InvalidArgument(format!(
            "group duration {} s is shorter than one sample at {} Hz",
            cfg.group_duration_secs, sample_rate
        )));
    }

    let groups = segment::segment(samples, group_size)?;
    if groups.is_empty() {
        return Err(DspError::EmptyInput(format!(
            "recording shorter than one analysis group ({group_size} samples)"
        )));
    }

    let spectra = groups
        .iter()
        .map(|g| spectrum::magnitude_spectrum(g, cfg.window, cfg.transform))
        .collect::<Result<Vec<_>, _>>()?;

    let corrected = grouped::remove_dc_bias(&spectra);
    let frequencies = grouped::dominant_frequency_per_group(&corrected, sample_rate)?;

    frequencies
        .into_iter()
        .enumerate()
        .map(|(group, frequency)| {
            let note = if frequency > 0.0 {
                Some(tuning.frequency_to_note(frequency)?)
            } else {
                None
            };
            Ok(GroupDominant {
                group,
                frequency,
                note,
            })
        })
        .collect()
}
