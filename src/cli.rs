use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use crate::dsp::spectrum::TransformKind;
use crate::dsp::windowing::WindowKind;

#[derive(Parser)]
#[command(name = "notescan")]
#[command(about = "Identify the musical notes in a recording")]
pub struct Cli {
    /// Path to a TOML config file (default: ./notescan.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug tracing of the analysis pipeline
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every note sounding above the significance threshold
    Notes {
        /// WAV file to analyze
        file: PathBuf,

        /// Amplitude threshold override
        #[arg(long)]
        threshold: Option<f32>,

        /// Window function: rectangular, hann, or blackman
        #[arg(long)]
        window: Option<String>,

        /// Transform: fft or dct
        #[arg(long)]
        transform: Option<String>,

        /// Reference pitch for A4 in Hz
        #[arg(long)]
        reference_pitch: Option<f64>,
    },

    /// Report the dominant note of each fixed-duration analysis group
    Dominant {
        /// WAV file to analyze
        file: PathBuf,

        /// Analysis group duration in seconds
        #[arg(long)]
        group_duration: Option<f32>,

        /// Window function: rectangular, hann, or blackman
        #[arg(long)]
        window: Option<String>,

        /// Transform: fft or dct
        #[arg(long)]
        transform: Option<String>,

        /// Reference pitch for A4 in Hz
        #[arg(long)]
        reference_pitch: Option<f64>,
    },

    /// Identify the note for a single FFT bin
    Bin {
        /// Bin index into the frequency-domain output
        #[arg(long)]
        index: usize,

        /// Length of the transformed buffer
        #[arg(long)]
        len: usize,

        /// Sample rate of the source audio in Hz
        #[arg(long)]
        rate: u32,

        /// Amplitude to record alongside the note
        #[arg(long, default_value_t = 0.0)]
        amplitude: f32,

        /// Reference pitch for A4 in Hz
        #[arg(long)]
        reference_pitch: Option<f64>,
    },

    /// Render the magnitude spectrum of a recording to a PNG
    Chart {
        /// WAV file to analyze
        file: PathBuf,

        /// Output PNG path
        #[arg(short, long, default_value = "spectrum.png")]
        output: PathBuf,

        /// Window function: rectangular, hann, or blackman
        #[arg(long)]
        window: Option<String>,

        /// Transform: fft or dct
        #[arg(long)]
        transform: Option<String>,
    },
}

pub fn parse_window(name: &str) -> Result<WindowKind> {
    match name {
        "rectangular" => Ok(WindowKind::Rectangular),
        "hann" => Ok(WindowKind::Hann),
        "blackman" => Ok(WindowKind::Blackman),
        other => bail!("unknown window '{other}' (expected rectangular, hann, or blackman)"),
    }
}

pub fn parse_transform(name: &str) -> Result<TransformKind> {
    match name {
        "fft" => Ok(TransformKind::Fft),
        "dct" => Ok(TransformKind::Dct),
        other => bail!("unknown transform '{other}' (expected fft or dct)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_names_parse() {
        assert_eq!(parse_window("hann").unwrap(), WindowKind::Hann);
        assert_eq!(parse_window("blackman").unwrap(), WindowKind::Blackman);
        assert_eq!(parse_window("rectangular").unwrap(), WindowKind::Rectangular);
        assert!(parse_window("hamming").is_err());
    }

    #[test]
    fn transform_names_parse() {
        assert_eq!(parse_transform("fft").unwrap(), TransformKind::Fft);
        assert_eq!(parse_transform("dct").unwrap(), TransformKind::Dct);
        assert!(parse_transform("wavelet").is_err());
    }
}
