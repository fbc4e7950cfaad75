use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use yacht_core::{scores_for_combination, Category, Combination, Roller};

fn gen_samples(n: usize) -> Vec<Combination> {
    Roller::new_deterministic(0x1234_5678).take(n).collect()
}

fn bench_scores_for_combination(c: &mut Criterion) {
    let mut g = c.benchmark_group("yacht_core_scoring");
    for &n in &[256usize, 4096usize] {
        let samples = gen_samples(n);
        g.bench_with_input(BenchmarkId::new("all_categories_batch", n), &samples, |b, s| {
            b.iter(|| {
                for hand in s.iter() {
                    black_box(scores_for_combination(black_box(hand)));
                }
            })
        });
    }
    g.finish();
}

fn bench_template_categories(c: &mut Criterion) {
    let samples = gen_samples(4096);
    let mut g = c.benchmark_group("yacht_core_template_match");
    for cat in [Category::SmallStraight, Category::LargeStraight, Category::FullHouse] {
        g.bench_with_input(BenchmarkId::new("measure", cat.label()), &samples, |b, s| {
            b.iter(|| {
                for hand in s.iter() {
                    black_box(cat.measure(black_box(hand)));
                }
            })
        });
    }
    g.finish();
}

criterion_group!(benches, bench_scores_for_combination, bench_template_categories);
criterion_main!(benches);
