use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use readalign::align::Aligner;
use readalign::text::{tokenize, ReferenceText};

/// A paragraph-sized passage, repeated to reach the requested word count.
fn passage(words: usize) -> String {
    let base = "the quick brown fox jumps over the lazy dog while reading \
                aloud every single word of this passage with care";
    let base_words: Vec<&str> = base.split_whitespace().collect();
    (0..words)
        .map(|i| base_words[i % base_words.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Degrade a passage: drop every 7th word, misspell every 5th.
fn noisy_reading(text: &str) -> String {
    text.split_whitespace()
        .enumerate()
        .filter(|(i, _)| i % 7 != 6)
        .map(|(i, word)| {
            if i % 5 == 4 {
                let mut misread = word.to_string();
                misread.push('s');
                misread
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_alignment(c: &mut Criterion) {
    let aligner = Aligner::new();
    let mut group = c.benchmark_group("align");

    for words in [20usize, 60, 200] {
        let reference = ReferenceText::new(&passage(words));
        let hypothesis = tokenize(&noisy_reading(reference.raw()));

        group.bench_with_input(
            BenchmarkId::new("noisy", words),
            &(&reference, &hypothesis),
            |b, (reference, hypothesis)| {
                b.iter(|| black_box(aligner.align(reference, hypothesis)));
            },
        );
    }

    // Worst case for the DP: nothing matches, every cell is explored.
    let reference = ReferenceText::new(&passage(60));
    let unrelated = tokenize(
        &"zebra xylophone quartz jigsaw vortex plasma nimbus krypton"
            .split_whitespace()
            .cycle()
            .take(60)
            .collect::<Vec<_>>()
            .join(" "),
    );
    group.bench_function("disjoint_60", |b| {
        b.iter(|| black_box(aligner.align(&reference, &unrelated)));
    });

    group.finish();
}

criterion_group!(benches, bench_alignment);
criterion_main!(benches);
