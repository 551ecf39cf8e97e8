//! Benchmarks for tree construction and path extraction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use merkle_path::hash::{Algorithm, Digest, Md5};
use merkle_path::{Content, MerkleTree};
use rand::Rng;
use std::convert::Infallible;
use std::hash::Hasher;

#[derive(Debug, Clone)]
struct Block(Vec<u8>);

impl Content for Block {
    type Error = Infallible;

    fn digest(&self) -> Result<Digest, Infallible> {
        let mut a = Md5::new();
        a.write(&self.0);
        Ok(a.hash())
    }

    fn equals(&self, other: &Self) -> Result<bool, Infallible> {
        Ok(self.0 == other.0)
    }
}

/// Generate random blocks
fn random_blocks(count: usize, size: usize) -> Vec<Block> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| Block((0..size).map(|_| rng.gen()).collect()))
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for count in [16, 1024, 16 * 1024] {
        let blocks = random_blocks(count, 64);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &blocks, |b, blocks| {
            b.iter(|| MerkleTree::<&Block>::new(black_box(blocks).iter()).unwrap())
        });
    }

    group.finish();
}

fn bench_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("merkle_path");

    for count in [16, 1024, 16 * 1024] {
        let blocks = random_blocks(count, 64);
        let t: MerkleTree<&Block> = MerkleTree::new(blocks.iter()).unwrap();
        let last = &blocks[count - 1];
        group.bench_with_input(BenchmarkId::new("last_leaf", count), &t, |b, t| {
            b.iter(|| t.merkle_path(black_box(&last)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_path);
criterion_main!(benches);
