// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use dispatch_alloc_core::time::{TimeDelta, TimePoint};
use dispatch_alloc_model::{
    generator::{InstanceGenConfig, InstanceGenerator},
    problem::Problem,
};
use dispatch_alloc_solver::{
    config::ExplorerConfig,
    eval::{evaluate, simulate},
    explorer::Explorer,
    neighbors::RelocateNeighborhood,
    state::Allocation,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

const SIZES: &[(usize, usize)] = &[(20, 3), (60, 6), (150, 10)];

fn instance(jobs: usize, operators: usize) -> Problem {
    let cfg = InstanceGenConfig::builder()
        .job_count(jobs)
        .operator_count(operators)
        .horizon(TimeDelta::from_minutes(8 * 60))
        .seed(7)
        .build()
        .expect("valid generator config");
    InstanceGenerator::new(cfg)
        .expect("valid generator")
        .generate()
        .expect("valid problem")
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    for &(jobs, operators) in SIZES {
        let problem = instance(jobs, operators);
        let allocation = Allocation::round_robin(&problem);
        group.throughput(Throughput::Elements(jobs as u64));
        group.bench_function(BenchmarkId::new("round_robin", jobs), |b| {
            b.iter(|| black_box(evaluate(black_box(&allocation), &problem)))
        });
    }
    group.finish();
}

fn bench_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbors");
    for &(jobs, operators) in SIZES {
        let problem = instance(jobs, operators);
        let allocation = Allocation::round_robin(&problem);
        let trace = simulate(&allocation, &problem);
        let neighborhood = RelocateNeighborhood::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        group.bench_function(BenchmarkId::new("relocate", jobs), |b| {
            b.iter(|| {
                black_box(neighborhood.neighbors(
                    &allocation,
                    &trace,
                    &problem,
                    TimePoint::zero(),
                    &mut rng,
                ))
            })
        });
    }
    group.finish();
}

fn bench_explore(c: &mut Criterion) {
    let mut group = c.benchmark_group("explore");
    group.sample_size(10);
    for &(jobs, operators) in SIZES {
        let problem = instance(jobs, operators);
        for parallel in [false, true] {
            let config = ExplorerConfig::default()
                .with_max_iterations(500)
                .with_parallel_evaluation(parallel);
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_function(BenchmarkId::new(label, jobs), |b| {
                b.iter_batched(
                    || {
                        (
                            Explorer::new(&problem, config.clone()).expect("valid explorer"),
                            ChaCha8Rng::seed_from_u64(3),
                        )
                    },
                    |(mut explorer, mut rng)| {
                        black_box(
                            explorer
                                .explore(&problem, TimePoint::zero(), &mut rng)
                                .expect("explore"),
                        )
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_neighbors, bench_explore);
criterion_main!(benches);
