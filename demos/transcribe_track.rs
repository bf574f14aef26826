//! Example: Transcribe a synthetic pitch track and print every sheet
//!
//! Usage:
//!   cargo run --example transcribe_track -- [--kind KIND] [--tempo BPM] [--json]
//!
//! KIND is one of chord_sheet, fingerstyle_tab, piano_sheet (default: all).

use std::env;

use tabscribe::{transcribe, PitchTrack, SheetKind, TranscriptionConfig};

/// Frames per second of the synthetic pitch tracker
const FRAME_RATE: f64 = 100.0;

fn midi_to_hz(pitch: u8) -> f64 {
    440.0 * 2f64.powf((pitch as f64 - 69.0) / 12.0)
}

/// "Twinkle, Twinkle" in G with a short breath between phrases
fn demo_track() -> PitchTrack {
    let phrase: [(u8, f64); 14] = [
        (67, 0.5),
        (67, 0.5),
        (74, 0.5),
        (74, 0.5),
        (76, 0.5),
        (76, 0.5),
        (74, 0.9),
        (72, 0.5),
        (72, 0.5),
        (71, 0.5),
        (71, 0.5),
        (69, 0.5),
        (69, 0.5),
        (67, 0.9),
    ];

    let mut freqs = Vec::new();
    let mut voiced = Vec::new();
    let mut onsets = Vec::new();
    for (pitch, seconds) in phrase {
        onsets.push(freqs.len() as f64 / FRAME_RATE);
        let frames = (seconds * FRAME_RATE).round() as usize;
        freqs.extend(std::iter::repeat(midi_to_hz(pitch)).take(frames));
        voiced.extend(std::iter::repeat(true).take(frames));
    }
    // trailing silence
    freqs.extend(std::iter::repeat(f64::NAN).take(20));
    voiced.extend(std::iter::repeat(false).take(20));

    let times = (0..freqs.len()).map(|i| i as f64 / FRAME_RATE).collect();
    PitchTrack::new(freqs, voiced, times, onsets)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let mut kinds: Vec<SheetKind> = SheetKind::ALL.to_vec();
    let mut tempo = 100.0;
    let mut json = false;

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--kind" => {
                let v = args.first().ok_or("--kind requires a value")?;
                kinds = vec![v.parse::<SheetKind>()?];
                args.remove(0);
            }
            "--tempo" => {
                tempo = args.first().ok_or("--tempo requires a value")?.parse::<f64>()?;
                args.remove(0);
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: transcribe_track [--kind KIND] [--tempo BPM] [--json]\n\
                     \n\
                     --kind KIND  chord_sheet, fingerstyle_tab or piano_sheet (default: all)\n\
                     --tempo BPM  Tempo handed to the transcriber (default: 100)\n\
                     --json       Print the transcription and sheets as JSON\n"
                );
                return Ok(());
            }
            other => return Err(format!("Unknown argument: {}", other).into()),
        }
    }

    let track = demo_track().with_tempo(tempo);
    let transcription = transcribe(&track, &TranscriptionConfig::default())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&transcription)?);
        for kind in kinds {
            println!("{}", serde_json::to_string_pretty(&transcription.render(kind))?);
        }
        return Ok(());
    }

    println!(
        "{} notes, key {} major, confidence {:.2}, clarity {:.2}, tempo {} BPM",
        transcription.note_count(),
        transcription.key.name(),
        transcription.key_confidence,
        transcription.key_clarity,
        transcription.tempo_bpm()
    );
    let roots: Vec<&str> = transcription.progression.iter().map(|s| s.root_name()).collect();
    println!("Bass roots: {}", roots.join(" "));
    for warning in &transcription.metadata.warnings {
        println!("warning: {}", warning);
    }
    println!();

    for kind in kinds {
        let sheet = transcription.render(kind);
        println!("== {} ==", kind);
        match sheet.error {
            Some(e) => println!("failed: {}", e),
            None => println!("{}", sheet.content),
        }
        println!();
    }

    Ok(())
}
