use super::tuning::{bin_to_frequency, NoteName, Tuning};
use super::DspError;

/// One detected spectral peak, viewed three ways.
///
/// The same note can be looked at as an FFT bin index, as a frequency in Hz,
/// or as a 12-TET note name. A `Note` snapshots the bin together with the
/// transform geometry (sample rate and buffer length) that gives the index
/// its meaning, plus the amplitude it was detected at.
///
/// Immutable after construction: the frequency is derived once, up front, so
/// an out-of-range bin fails here rather than in a later conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    // Part of the snapshot for debug output; the conversions themselves
    // only need the precomputed frequency.
    #[allow(dead_code)]
    sample_rate: u32,
    #[allow(dead_code)]
    len: usize,
    index: usize,
    amplitude: f32,
    frequency: f64,
}

impl Note {
    /// Build a note from an FFT bin.
    ///
    /// `len` is the length of the buffer the transform was taken over —
    /// frequency resolution is `sample_rate / len`, so the same index means
    /// a different pitch for a different buffer length.
    pub fn from_bin(
        sample_rate: u32,
        len: usize,
        index: usize,
        amplitude: f32,
    ) -> Result<Self, DspError> {
        let frequency = bin_to_frequency(index, len, sample_rate)?;
        Ok(Self {
            sample_rate,
            len,
            index,
            amplitude,
            frequency,
        })
    }

    /// The frequency this bin represents, in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// The 12-TET name of this note under the given tuning.
    ///
    /// Fails for bin 0 (0 Hz has no pitch).
    pub fn name(&self, tuning: &Tuning) -> Result<NoteName, DspError> {
        tuning.frequency_to_note(self.frequency)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_is_derived_at_construction() {
        // 1 Hz per bin geometry
        let note = Note::from_bin(44100, 44100, 440, 0.25).unwrap();
        assert_eq!(note.frequency(), 440.0);
        assert_eq!(note.index(), 440);
        assert_eq!(note.amplitude(), 0.25);
    }

    #[test]
    fn name_uses_the_supplied_tuning() {
        let note = Note::from_bin(44100, 44100, 440, 1.0).unwrap();
        assert_eq!(note.name(&Tuning::default()).unwrap().to_string(), "A4");

        let high = Tuning::new(220.0).unwrap();
        assert_eq!(note.name(&high).unwrap().to_string(), "A5");
    }

    #[test]
    fn coarse_resolution_still_names_the_nearest_note() {
        // 1000-sample buffer at 8 kHz: 8 Hz per bin. Bin 55 = 440 Hz.
        let note = Note::from_bin(8000, 1000, 55, 1.0).unwrap();
        assert_eq!(note.name(&Tuning::default()).unwrap().to_string(), "A4");
    }

    #[test]
    fn out_of_range_bin_is_rejected_up_front() {
        assert!(matches!(
            Note::from_bin(44100, 100, 101, 1.0),
            Err(DspError::InvalidArgument(_))
        ));
        assert!(matches!(
            Note::from_bin(44100, 0, 0, 1.0),
            Err(DspError::InvalidArgument(_))
        ));
    }

    #[test]
    fn dc_bin_has_no_name() {
        let dc = Note::from_bin(44100, 44100, 0, 9.0).unwrap();
        assert_eq!(dc.frequency(), 0.0);
        assert!(dc.name(&Tuning::default()).is_err());
    }

    /// Every semitone of the piano range (A0..C8), checked against the
    /// standard 12-TET reference table. One row per note; the fixture data
    /// is the oracle, the loop is the test.
    #[test]
    fn reference_table() {
        // With len == sample_rate the bin resolution is exactly 1 Hz, so
        // the bin index for a table frequency is just the rounded frequency.
        const N: usize = 441_000;

        let table = include_str!("../../tests/data/notes.csv");
        let tuning = Tuning::default();

        let mut rows = 0;
        for line in table.lines().skip(1) {
            let (expected_name, freq) = line.split_once(',').unwrap();
            let freq: f64 = freq.parse().unwrap();

            let index = freq.round() as usize;
            let note = Note::from_bin(N as u32, N, index, 0.0).unwrap();

            assert_eq!(note.index(), index);
            assert!(
                (note.frequency() - freq).abs() < 1.0,
                "expected {freq} Hz, got {} Hz",
                note.frequency()
            );
            assert_eq!(
                note.name(&tuning).unwrap().to_string(),
                expected_name,
                "at {freq} Hz"
            );
            rows += 1;
        }

        // A0 through C8 is 88 notes; make sure the fixture didn't shrink.
        assert_eq!(rows, 88);
    }
}
