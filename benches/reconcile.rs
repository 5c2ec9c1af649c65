use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use hotchat::registry::MessageRegistry;
use hotchat::trigger::MemoryHost;
use std::hint::black_box;

// Reconciliation cost for a realistically large message list. The memory host
// keeps a journal, so these numbers include bookkeeping a real host would not do.

const ENTRIES: usize = 64;

fn messages(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("message number {}", i)).collect()
}

fn loaded(texts: &[String]) -> (MessageRegistry, MemoryHost) {
    let mut host = MemoryHost::new();
    let mut registry = MessageRegistry::new();
    registry
        .reconcile(texts, &mut host)
        .expect("initial load");
    host.take_journal();
    (registry, host)
}

fn reconcile_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    group.throughput(Throughput::Elements(ENTRIES as u64));

    let base = messages(ENTRIES);

    group.bench_function("unchanged", |b| {
        let (mut registry, mut host) = loaded(&base);
        b.iter(|| registry.reconcile(black_box(&base), &mut host))
    });

    let mut edited = base.clone();
    edited[ENTRIES / 2] = "edited".to_string();
    group.bench_function("single_edit", |b| {
        b.iter_batched(
            || loaded(&base),
            |(mut registry, mut host)| registry.reconcile(black_box(&edited), &mut host),
            BatchSize::SmallInput,
        )
    });

    let mut reversed = base.clone();
    reversed.reverse();
    group.bench_function("reverse", |b| {
        b.iter_batched(
            || loaded(&base),
            |(mut registry, mut host)| registry.reconcile(black_box(&reversed), &mut host),
            BatchSize::SmallInput,
        )
    });

    let grown = messages(ENTRIES * 2);
    group.bench_function("grow_double", |b| {
        b.iter_batched(
            || loaded(&base),
            |(mut registry, mut host)| registry.reconcile(black_box(&grown), &mut host),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, reconcile_benchmark);
criterion_main!(benches);
