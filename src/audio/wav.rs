use std::path::Path;

use anyhow::{Context, Result};
use hound::{SampleFormat, WavReader};

/// Load a WAV file as mono f32 samples in [-1.0, 1.0].
///
/// Multi-channel files are reduced to channel 0 — no mixing, the analysis
/// only ever looks at one channel. Returns (samples, sample_rate).
pub fn load_mono(path: &Path) -> Result<(Vec<f32>, u32)> {
    let mut reader = WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;

    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<hound::Result<Vec<_>>>()
                .context("Failed to read WAV samples")?
        }
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<hound::Result<Vec<_>>>()
            .context("Failed to read WAV samples")?,
    };

    let channels = spec.channels.max(1) as usize;
    let samples = if channels == 1 {
        interleaved
    } else {
        interleaved.into_iter().step_by(channels).collect()
    };

    tracing::debug!(
        path = %path.display(),
        sample_rate = spec.sample_rate,
        channels = spec.channels,
        samples = samples.len(),
        "loaded WAV"
    );

    Ok((samples, spec.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};

    fn spec(channels: u16) -> WavSpec {
        WavSpec {
            channels,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        }
    }

    #[test]
    fn loads_mono_int_samples_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.wav");

        {
            let mut writer = WavWriter::create(&path, spec(1)).unwrap();
            writer.write_sample(i16::MAX).unwrap();
            writer.write_sample(0i16).unwrap();
            writer.write_sample(i16::MIN).unwrap();
            writer.finalize().unwrap();
        }

        let (samples, rate) = load_mono(&path).unwrap();
        assert_eq!(rate, 44100);
        assert_eq!(samples.len(), 3);
        assert!((samples[0] - 1.0).abs() < 1e-3);
        assert_eq!(samples[1], 0.0);
        assert!((samples[2] + 1.0).abs() < 1e-3);
    }

    #[test]
    fn stereo_takes_the_first_channel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");

        {
            let mut writer = WavWriter::create(&path, spec(2)).unwrap();
            // Left channel counts up, right channel is constant noise
            for i in 0..4i16 {
                writer.write_sample(i * 1000).unwrap();
                writer.write_sample(-12345i16).unwrap();
            }
            writer.finalize().unwrap();
        }

        let (samples, _) = load_mono(&path).unwrap();
        assert_eq!(samples.len(), 4);
        for (i, &s) in samples.iter().enumerate() {
            let expected = (i as f32 * 1000.0) / 32768.0;
            assert!((s - expected).abs() < 1e-4, "sample {i}: {s} vs {expected}");
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_mono(Path::new("/tmp/does-not-exist-notescan.wav")).is_err());
    }
}
