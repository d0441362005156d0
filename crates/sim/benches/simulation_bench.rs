use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use genex_sim::evolution::MutationModel;
use genex_sim::genome::Genome;
use genex_sim::simulation::{Configuration, RunConfiguration, Simulation};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

fn configuration(pop_size: usize, generations: usize, genome_length: usize) -> Configuration {
    let run = RunConfiguration::builder()
        .population_size(pop_size)
        .generations(generations)
        .genome_length(genome_length)
        .mutation_rate(0.001)
        .seed(42)
        .build()
        .unwrap();
    Configuration::new(run, MutationModel::default())
}

fn bench_propose_mutations(c: &mut Criterion) {
    let mut group = c.benchmark_group("propose_mutations");
    let model = MutationModel::default();

    for len in [1_000usize, 10_000] {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
            let genome = Genome::random(len, &mut rng);
            b.iter(|| black_box(model.propose_mutations(&genome, black_box(0.01), &mut rng)))
        });
    }

    group.finish();
}

fn bench_simulation_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_step");
    let pop_size = 100;

    group.throughput(Throughput::Elements(pop_size as u64));

    group.bench_function("step_default_model", |b| {
        b.iter_batched(
            || Simulation::new(configuration(pop_size, 10, 1_000)).unwrap(),
            |mut sim| {
                sim.step().unwrap();
                black_box(sim)
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_simulation_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_run");
    let pop_size = 100;

    for generations in [5usize, 20] {
        group.throughput(Throughput::Elements((pop_size * generations) as u64));
        group.bench_with_input(
            BenchmarkId::new("run_full", generations),
            &generations,
            |b, &gens| {
                b.iter_batched(
                    || Simulation::new(configuration(pop_size, gens, 1_000)).unwrap(),
                    |sim| black_box(sim.run()),
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_propose_mutations,
    bench_simulation_step,
    bench_simulation_run
);
criterion_main!(benches);
