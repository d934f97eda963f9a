//! Benchmarks for metaheuristic runs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use metaswarm::metaheuristics::benchmarks;
use metaswarm::prelude::*;

fn space(n_agents: usize) -> SearchSpace {
    SearchSpace::new(n_agents, 10, 50)
        .with_seed(42)
        .continuous(-5.0, 5.0)
        .unwrap()
}

fn bench_pso_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("pso_sphere");

    for size in [10, 50, 100].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let function = Function::new("sphere", benchmarks::sphere);
            b.iter(|| {
                let mut space = space(size);
                let mut pso = ParticleSwarm::default().with_seed(42);
                space.run(black_box(&mut pso), black_box(&function)).unwrap()
            });
        });
    }

    group.finish();
}

fn bench_hyperheuristic(c: &mut Criterion) {
    c.bench_function("hyperheuristic_rastrigin", |b| {
        let function = Function::new("rastrigin", benchmarks::rastrigin);
        b.iter(|| {
            let mut space = space(60);
            let mut metaheuristics: Vec<Box<dyn Metaheuristic>> = vec![
                Box::new(ParticleSwarm::default().with_seed(1)),
                Box::new(Firefly::default().with_seed(2)),
                Box::new(SineCosine::default().with_seed(3)),
            ];
            space.run_many(black_box(&mut metaheuristics), black_box(&function)).unwrap()
        });
    });
}

criterion_group!(benches, bench_pso_sphere, bench_hyperheuristic);
criterion_main!(benches);
