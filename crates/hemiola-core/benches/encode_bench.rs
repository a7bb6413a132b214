//! Criterion benchmarks for report encoding and character lookup.
//!
//! Run with:
//! ```bash
//! cargo bench --package hemiola-core --bench encode_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hemiola_core::{char_to_event, encode, encode_string, KeyEvent, Modifiers};

/// Characters spread over both layers of the table plus one unsupported one.
const BENCH_CHARS: &[char] = &[
    'a', 'z', 'H', 'Q', '1', '0', '!', ')', ' ', '\n', '\t', '-', '_', '[', '{', '\\', '|', '?',
    '~', 'é',
];

const PANGRAM: &str = "The quick brown fox jumps over the lazy dog!\n";

// ── Benchmarks: character lookup ─────────────────────────────────────────────

fn bench_char_to_event(c: &mut Criterion) {
    let mut group = c.benchmark_group("keymap_ascii");

    group.bench_function("char_to_event_single", |b| {
        b.iter(|| char_to_event(black_box('H')))
    });

    group.bench_function("char_to_event_batch_20", |b| {
        b.iter(|| {
            BENCH_CHARS
                .iter()
                .map(|&ch| char_to_event(black_box(ch)))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

// ── Benchmarks: report encoding ──────────────────────────────────────────────

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("report_encode");

    let full = KeyEvent::new(
        Modifiers::LEFT_CTRL | Modifiers::LEFT_SHIFT,
        [0x04, 0x05, 0x06, 0x07, 0x08, 0x09],
    );
    group.bench_function("encode_six_keys", |b| b.iter(|| encode(black_box(&full))));

    for text in ["Hemiola", PANGRAM] {
        group.bench_with_input(
            BenchmarkId::new("encode_string", text.len()),
            &text,
            |b, &text| b.iter(|| encode_string(black_box(text)).count()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_char_to_event, bench_encode);
criterion_main!(benches);
