// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for tensor contraction and elementwise arithmetic.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndtensor::{product, product_naive, sum, Tensor};

fn filled(dims: &[usize]) -> Tensor {
    let n: usize = dims.iter().product();
    Tensor::from_vec(dims, (0..n).map(|i| (i % 17) as f64 * 0.25).collect()).unwrap()
}

fn bench_matmul(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul");
    for n in [8usize, 16, 32] {
        let a = filled(&[n, n]);
        let b = filled(&[n, n]);
        group.bench_with_input(BenchmarkId::new("single_pass", n), &n, |bench, _| {
            bench.iter(|| product(black_box(&a), black_box(&b), 1).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("naive", n), &n, |bench, _| {
            bench.iter(|| product_naive(black_box(&a), black_box(&b), 1).unwrap())
        });
    }
    group.finish();
}

fn bench_double_contraction(c: &mut Criterion) {
    let a = filled(&[6, 8, 8]);
    let b = filled(&[8, 8, 6]);
    c.bench_function("degree2_rank3/single_pass", |bench| {
        bench.iter(|| product(black_box(&a), black_box(&b), 2).unwrap())
    });
}

fn bench_sum(c: &mut Criterion) {
    let a = filled(&[64, 64]);
    let b = filled(&[64, 64]);
    let d = filled(&[64, 64]);
    c.bench_function("sum/3x64x64", |bench| {
        bench.iter(|| sum(black_box(&[&a, &b, &d])).unwrap())
    });
}

criterion_group!(benches, bench_matmul, bench_double_contraction, bench_sum);
criterion_main!(benches);
