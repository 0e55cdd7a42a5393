use std::hint::black_box;
use std::path::Path;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use uuid::Uuid;

use sift::wql::{Attribute, Condition, Operator, ParameterOptions};
use sift::{Document, LexicalResources, Locale, MemoryReverseIndex, TermPipeline};

const WORDS: &[&str] = &[
    "The", "Children", "were", "reading", "Cities,", "Boxes", "and", "Wolves.", "Café",
    "automobiles", "teh", "colours", "Über", "running", "libraries", "wolves", "quickly",
];

fn generate_text(word_count: usize) -> String {
    (0..word_count)
        .map(|i| WORDS[(i * 7 + i / 3) % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn shipped_pipeline() -> TermPipeline {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("resources");
    TermPipeline::new(&LexicalResources::load(&dir).unwrap())
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Term Pipeline");
    let pipeline = shipped_pipeline();
    let locale = Locale::new("en");

    for word_count in [100, 1000, 10000].iter() {
        let text = generate_text(*word_count);
        group.throughput(Throughput::Elements(*word_count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(word_count), &text, |b, text| {
            b.iter(|| black_box(pipeline.analyze(black_box(text), &locale).count()))
        });
    }
    group.finish();
}

fn bench_retrieve(c: &mut Criterion) {
    let mut group = c.benchmark_group("Reverse Index Retrieve");
    group.sample_size(20);

    let index = Arc::new(MemoryReverseIndex::new(Arc::new(shipped_pipeline()), Locale::new("en")));
    for i in 0..2000 {
        index.add(Uuid::new_v4(), &generate_text(20 + i % 30));
    }
    let title = Attribute::<Document>::field("Title").with_reverse_index(index);

    for distance in [0u32, 1, 2].iter() {
        let condition = Condition::new(title.clone(), Operator::Like, "wolfs")
            .with_options(ParameterOptions::distance(*distance));
        group.bench_with_input(BenchmarkId::new("like", distance), &condition, |b, condition| {
            b.iter(|| condition.apply().unwrap().map(|ids| ids.count()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_retrieve);
criterion_main!(benches);
