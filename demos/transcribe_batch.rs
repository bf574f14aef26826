//! Example: Transcribe many pitch tracks in parallel
//!
//! Usage:
//!   cargo run --release --example transcribe_batch -- [--jobs N] [--tracks N] [--json]
//!
//! Builds one synthetic arpeggio per major key and transcribes them on a rayon
//! pool. Parallelism is across tracks; each transcription is single-threaded.

use std::env;
use std::time::Instant;

use tabscribe::{transcribe_batch, PitchTrack, TranscriptionConfig};

const FRAME_RATE: f64 = 100.0;

fn midi_to_hz(pitch: u8) -> f64 {
    440.0 * 2f64.powf((pitch as f64 - 69.0) / 12.0)
}

/// Two bars of a major arpeggio over `tonic`, root held longest
fn arpeggio_track(tonic: u8) -> PitchTrack {
    let pattern: [(u8, f64); 8] = [
        (0, 0.8),
        (4, 0.4),
        (7, 0.4),
        (12, 0.4),
        (7, 0.4),
        (4, 0.4),
        (2, 0.4),
        (0, 1.2),
    ];
    let mut freqs = Vec::new();
    for (interval, seconds) in pattern {
        let frames = (seconds * FRAME_RATE).round() as usize;
        freqs.extend(std::iter::repeat(midi_to_hz(60 + tonic + interval)).take(frames));
    }
    let voiced = vec![true; freqs.len()];
    let times = (0..freqs.len()).map(|i| i as f64 / FRAME_RATE).collect();
    PitchTrack::new(freqs, voiced, times, vec![]).with_tempo(90.0 + tonic as f64 * 5.0)
}

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut track_count = 12usize;

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = args.first().ok_or("--jobs requires a value")?.parse::<usize>()?;
                args.remove(0);
                jobs = Some(std::cmp::max(1, v));
            }
            "--tracks" => {
                track_count = args.first().ok_or("--tracks requires a value")?.parse::<usize>()?;
                args.remove(0);
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: transcribe_batch [--jobs N] [--tracks N] [--json]\n\
                     \n\
                     --jobs N     Parallel workers (default: CPU-1)\n\
                     --tracks N   Number of synthetic tracks (default: 12)\n\
                     --json       Emit one JSON object per line (JSONL)\n"
                );
                return Ok(());
            }
            other => return Err(format!("Unknown argument: {}", other).into()),
        }
    }

    let tracks: Vec<PitchTrack> = (0..track_count).map(|i| arpeggio_track((i % 12) as u8)).collect();
    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} tracks, jobs={}", tracks.len(), jobs);

    let config = TranscriptionConfig::default();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let t0 = Instant::now();
    let results = pool.install(|| transcribe_batch(&tracks, &config));
    let elapsed_ms = t0.elapsed().as_secs_f32() * 1000.0;

    let mut failures = 0usize;
    for (i, result) in results.iter().enumerate() {
        match result {
            Ok(t) if json => println!(
                "{{\"track\":{},\"key\":{},\"tempo\":{},\"notes\":{},\"processing_time_ms\":{:.3}}}",
                i,
                serde_json::to_string(t.key.name())?,
                t.tempo_bpm(),
                t.note_count(),
                t.metadata.processing_time_ms
            ),
            Ok(t) => println!(
                "track {:>3}: key {:<2} conf {:.2}, {:>3} BPM, {} notes, {} roots",
                i,
                t.key.name(),
                t.key_confidence,
                t.tempo_bpm(),
                t.note_count(),
                t.progression.len()
            ),
            Err(e) => {
                failures += 1;
                if json {
                    println!("{{\"track\":{},\"error\":{}}}", i, serde_json::to_string(&e.to_string())?);
                } else {
                    println!("track {:>3}: failed: {}", i, e);
                }
            }
        }
    }

    eprintln!(
        "Done: {} ok, {} failed in {:.1} ms",
        results.len() - failures,
        failures,
        elapsed_ms
    );
    Ok(())
}
