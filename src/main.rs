mod analysis;
mod audio;
mod cli;
mod config;
mod dsp;
mod report;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use console::style;

use cli::{parse_transform, parse_window, Cli, Command};
use config::AnalysisConfig;
use dsp::note::Note;
use dsp::spectrum;
use dsp::tuning::Tuning;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "notescan=debug".into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let app_config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Notes {
            file,
            threshold,
            window,
            transform,
            reference_pitch,
        } => {
            let mut cfg = app_config.analysis;
            if let Some(t) = threshold {
                cfg.threshold = t;
            }
            if let Some(r) = reference_pitch {
                cfg.reference_pitch_hz = r;
            }
            apply_frame_overrides(&mut cfg, window.as_deref(), transform.as_deref())?;
            run_notes(&file, &cfg)
        }

        Command::Dominant {
            file,
            group_duration,
            window,
            transform,
            reference_pitch,
        } => {
            let mut cfg = app_config.analysis;
            if let Some(d) = group_duration {
                cfg.group_duration_secs = d;
            }
            if let Some(r) = reference_pitch {
                cfg.reference_pitch_hz = r;
            }
            apply_frame_overrides(&mut cfg, window.as_deref(), transform.as_deref())?;
            run_dominant(&file, &cfg)
        }

        Command::Bin {
            index,
            len,
            rate,
            amplitude,
            reference_pitch,
        } => {
            let reference = reference_pitch.unwrap_or(app_config.analysis.reference_pitch_hz);
            run_bin(index, len, rate, amplitude, reference)
        }

        Command::Chart {
            file,
            output,
            window,
            transform,
        } => {
            let mut cfg = app_config.analysis;
            apply_frame_overrides(&mut cfg, window.as_deref(), transform.as_deref())?;
            run_chart(&file, &output, &cfg)
        }
    }
}

fn apply_frame_overrides(
    cfg: &mut AnalysisConfig,
    window: Option<&str>,
    transform: Option<&str>,
) -> Result<()> {
    if let Some(w) = window {
        cfg.window = parse_window(w)?;
    }
    if let Some(t) = transform {
        cfg.transform = parse_transform(t)?;
    }
    Ok(())
}

fn run_notes(file: &Path, cfg: &AnalysisConfig) -> Result<()> {
    let (samples, sample_rate) = audio::wav::load_mono(file)?;
    println!("Sample rate: {} Hz", style(sample_rate).cyan());

    let result = analysis::significant_notes(&samples, sample_rate, cfg)?;

    if result.names.is_empty() {
        println!("No notes over threshold {}.", style(cfg.threshold).yellow());
        return Ok(());
    }

    let names: Vec<&str> = result.names.iter().map(String::as_str).collect();
    println!(
        "Significant notes over threshold {}: {}",
        style(cfg.threshold).yellow(),
        style(names.join(" ")).green().bold()
    );

    let freqs: Vec<String> = result
        .frequencies
        .iter()
        .map(|f| format!("{f:.1}"))
        .collect();
    println!("Made of frequencies (Hz): {}", freqs.join(" "));

    Ok(())
}

fn run_dominant(file: &Path, cfg: &AnalysisConfig) -> Result<()> {
    let (samples, sample_rate) = audio::wav::load_mono(file)?;
    println!("Sample rate: {} Hz", style(sample_rate).cyan());

    let dominants = analysis::dominant_notes(&samples, sample_rate, cfg)?;
    println!(
        "{} groups of {} s:",
        dominants.len(),
        cfg.group_duration_secs
    );

    for d in &dominants {
        let name = d
            .note
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "  {:>4}  {:>9.1} Hz  {}",
            d.group,
            d.frequency,
            style(name).green().bold()
        );
    }

    Ok(())
}

fn run_bin(index: usize, len: usize, rate: u32, amplitude: f32, reference: f64) -> Result<()> {
    let tuning = Tuning::new(reference)?;
    let note = Note::from_bin(rate, len, index, amplitude)?;
    let name = note.name(&tuning)?;

    println!(
        "{}: {:.2} Hz; index={}; amplitude={}",
        style(name).green().bold(),
        note.frequency(),
        note.index(),
        note.amplitude()
    );

    Ok(())
}

fn run_chart(file: &Path, output: &Path, cfg: &AnalysisConfig) -> Result<()> {
    let (samples, sample_rate) = audio::wav::load_mono(file)?;

    let magnitudes = spectrum::magnitude_spectrum(&samples, cfg.window, cfg.transform)?;
    report::chart::render_spectrum(&magnitudes, sample_rate, output)?;

    println!("Wrote {}", style(output.display()).cyan());
    Ok(())
}
