use std::fmt;

use super::DspError;

/// Pitch-class names in semitone order starting from the reference pitch (A).
/// Sharps only, never flats — "A#" rather than "Bb".
const NOTE_NAMES: [&str; 12] = [
    "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
];

/// Convert an FFT bin index to the audio frequency it represents.
///
/// The mapping is linear: `freq = index * sample_rate / n`, where `n` is the
/// length of the transformed buffer. Bin resolution is `sample_rate / n`, so
/// callers wanting semitone-level precision at low pitches need a buffer long
/// enough for that — the mapping itself knows nothing about pitch.
///
/// `index == n` is accepted as the (aliased) top of the range; anything past
/// it is rejected.
pub fn bin_to_frequency(index: usize, n: usize, sample_rate: u32) -> Result<f64, DspError> {
    if n == 0 {
        return Err(DspError::InvalidArgument(
            "buffer length must be positive".into(),
        ));
    }
    if sample_rate == 0 {
        return Err(DspError::InvalidArgument(
            "sample rate must be positive".into(),
        ));
    }
    if index > n {
        return Err(DspError::InvalidArgument(format!(
            "bin index {index} out of range for buffer length {n}"
        )));
    }

    Ok(index as f64 * sample_rate as f64 / n as f64)
}

/// A note name in 12-tone equal temperament: pitch class plus octave.
///
/// Octave numbering is anchored at C, so octave 4 spans C4..B4 and the
/// reference pitch A4 sits near the top of octave 4, not the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteName {
    pub pitch_class: &'static str,
    pub octave: i32,
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class, self.octave)
    }
}

/// The 12-TET tuning used to name frequencies.
///
/// Bundles the reference pitch so an alternate concert pitch (A4 = 442 Hz,
/// baroque 415 Hz, ...) is a constructor argument rather than an edit to the
/// conversion code. All semitone arithmetic is relative to the reference.
#[derive(Debug, Clone, Copy)]
pub struct Tuning {
    reference_hz: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self { reference_hz: 440.0 }
    }
}

impl Tuning {
    /// A tuning with the given reference pitch for A4.
    pub fn new(reference_hz: f64) -> Result<Self, DspError> {
        if !(reference_hz > 0.0) || !reference_hz.is_finite() {
            return Err(DspError::InvalidArgument(format!(
                "reference pitch must be a positive frequency, got {reference_hz}"
            )));
        }
        Ok(Self { reference_hz })
    }

    /// Signed distance from the reference pitch in semitones:
    /// `12 * log2(freq / reference)`.
    ///
    /// Fractional results mean the frequency falls between 12-TET pitches.
    pub fn frequency_to_semitones(&self, freq: f64) -> Result<f64, DspError> {
        if !(freq > 0.0) || !freq.is_finite() {
            return Err(DspError::InvalidArgument(format!(
                "frequency must be positive to take its logarithm, got {freq}"
            )));
        }
        Ok(12.0 * (freq / self.reference_hz).log2())
    }

    /// Inverse of [`frequency_to_semitones`](Self::frequency_to_semitones):
    /// `reference * 2^(semitones / 12)`.
    // Used by the round-trip tests and by callers synthesizing reference
    // tones; the analysis pipeline itself only goes frequency -> name.
    #[allow(dead_code)]
    pub fn semitones_to_frequency(&self, semitones: f64) -> f64 {
        self.reference_hz * (semitones / 12.0).exp2()
    }

    /// Name the nearest 12-TET note for a frequency.
    ///
    /// The fractional semitone offset (how far the frequency is detuned from
    /// the named note, in cents) is deliberately discarded: only the nearest
    /// name is reported.
    ///
    /// Quantization to the nearest semitone rounds half-to-even, so a
    /// frequency exactly at a quarter-tone boundary resolves to the even
    /// semitone count. The octave digit increments at C rather than A, hence
    /// the `+ 9` re-anchoring before the floor division.
    pub fn frequency_to_note(&self, freq: f64) -> Result<NoteName, DspError> {
        let semitones = self.frequency_to_semitones(freq)?;
        let tones = round_half_even(semitones);

        // rem_euclid keeps the table index in 0..12 even for notes below
        // the reference pitch, where `tones` is negative.
        let pitch_class = NOTE_NAMES[tones.rem_euclid(12) as usize];
        let octave = (tones + 9).div_euclid(12) as i32 + 4;

        tracing::trace!(freq, semitones, tones, %pitch_class, octave, "named frequency");

        Ok(NoteName { pitch_class, octave })
    }
}

/// Round to the nearest integer, ties to the even neighbor.
///
/// `f64::round` ties away from zero; the reference table this crate is
/// checked against was produced with banker's rounding, so exact .5 inputs
/// must go to the even side.
fn round_half_even(x: f64) -> i64 {
    let floor = x.floor();
    if x - floor == 0.5 {
        let below = floor as i64;
        if below % 2 == 0 {
            below
        } else {
            below + 1
        }
    } else {
        x.round() as i64
    }
}
