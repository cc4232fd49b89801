use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use avl_insert::Tree;

const N: usize = 100_000;

pub fn benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (1..=N).map(|_| rng.gen()).collect();

    c.bench_function("tree_insert", |b| {
        b.iter(|| {
            let mut tree = Tree::new();
            for value in &values {
                tree.insert(*value);
            }
            black_box(tree)
        })
    });

    c.bench_function("tree_insert_sorted", |b| {
        b.iter(|| {
            let mut tree = Tree::new();
            for value in 0..N as i32 {
                tree.insert(value);
            }
            black_box(tree)
        })
    });

    let tree: Tree<i32> = values.iter().copied().collect();

    c.bench_function("tree_iter", |b| {
        b.iter(|| {
            for key in &tree {
                black_box(key);
            }
        })
    });

    c.bench_function("tree_render", |b| b.iter(|| black_box(tree.render())));
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
