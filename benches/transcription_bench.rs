//! Performance benchmarks for transcription and rendering

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tabscribe::notation::{render, SheetKind};
use tabscribe::{transcribe, PitchTrack, TranscriptionConfig};

/// Three minutes of a looping melody at 100 frames per second
fn long_track() -> PitchTrack {
    let pattern = [60u8, 62, 64, 65, 67, 69, 71, 72, 71, 69, 67, 65, 64, 62];
    let frames = 100 * 180;
    let freqs: Vec<f64> = (0..frames)
        .map(|i| {
            let pitch = pattern[(i / 25) % pattern.len()];
            440.0 * 2f64.powf((pitch as f64 - 69.0) / 12.0)
        })
        .collect();
    let voiced = vec![true; frames];
    let times = (0..frames).map(|i| i as f64 / 100.0).collect();
    PitchTrack::new(freqs, voiced, times, vec![]).with_tempo(120.0)
}

fn bench_transcribe(c: &mut Criterion) {
    let track = long_track();
    let config = TranscriptionConfig::default();

    c.bench_function("transcribe_180s", |b| {
        b.iter(|| {
            let _ = transcribe(black_box(&track), black_box(&config));
        });
    });
}

fn bench_render(c: &mut Criterion) {
    let transcription = match transcribe(&long_track(), &TranscriptionConfig::default()) {
        Ok(t) => t,
        Err(e) => panic!("benchmark track failed to transcribe: {}", e),
    };
    let notes = transcription.arrangement();
    let options = transcription.sheet_options();

    for kind in SheetKind::ALL {
        c.bench_function(&format!("render_{}", kind), |b| {
            b.iter(|| {
                let _ = render(kind, black_box(&notes), black_box(&options));
            });
        });
    }
}

criterion_group!(benches, bench_transcribe, bench_render);
criterion_main!(benches);
