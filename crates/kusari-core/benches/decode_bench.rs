use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kusari_core::{Alphabet, ExactDecoder, FeatureSet, GreedyDecoder, Label, ViterbiDecoder};

fn label_changes(_: &[String], _: usize, curr: &Label, prev: Option<&Label>) -> f64 {
    match prev {
        Some(prev) if prev != curr => 1.0,
        _ => 0.0,
    }
}

fn starts_with_t(s: &[String], i: usize, _: &Label, _: Option<&Label>) -> f64 {
    if s[i].to_lowercase().starts_with('t') {
        1.0
    } else {
        0.0
    }
}

fn bench_decoders(c: &mut Criterion) {
    let features = FeatureSet::new()
        .with_feature(label_changes, 0.75)
        .with_feature(starts_with_t, 0.25);
    let alphabet = Alphabet::new(["quantity", "unit", "name", "comment"]).unwrap();
    let tokens: Vec<String> = "This is a test sentence for the decoder"
        .split_whitespace()
        .map(str::to_string)
        .collect();

    c.bench_function("exact_decode_8x4", |b| {
        b.iter(|| {
            ExactDecoder::new()
                .decode(black_box(&tokens), &features, &alphabet)
                .unwrap()
        });
    });

    c.bench_function("viterbi_decode_8x4", |b| {
        b.iter(|| ViterbiDecoder::new().decode(black_box(&tokens), &features, &alphabet));
    });

    c.bench_function("greedy_decode_8x4", |b| {
        b.iter(|| GreedyDecoder::new().decode(black_box(&tokens), &features, &alphabet));
    });
}

criterion_group!(benches, bench_decoders);
criterion_main!(benches);
