use std::time::Duration;

use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use starforest::ics::sample_disk;
use starforest::mass::update_mass_moments;
use starforest::node::RootIndex;
use starforest::parameters::GalaxyParameters;
use starforest::quadtree::insert;
use starforest::registry::create_tree;
use starforest::star::Star;
use starforest::store::MemoryStore;

fn get_stars(num_stars: usize) -> Vec<Star> {
    sample_disk(&GalaxyParameters {
        num_stars,
        ..Default::default()
    })
}

fn build_tree(stars: &[Star]) -> (MemoryStore, RootIndex) {
    let mut store = MemoryStore::new();
    let tree = create_tree(&mut store, 100.0).unwrap();
    for star in stars.iter() {
        insert(&mut store, star.clone(), tree).unwrap();
    }
    (store, tree)
}

pub fn quadtree_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree");
    group
        .sample_size(50)
        .measurement_time(Duration::from_secs(5));
    for num_stars in [100, 1000, 10000] {
        let stars = get_stars(num_stars);
        group.bench_with_input(BenchmarkId::new("insert", num_stars), &stars, |b, stars| {
            b.iter(|| build_tree(stars))
        });
        let (mut store, tree) = build_tree(&stars);
        group.bench_function(BenchmarkId::new("mass_moments", num_stars), |b| {
            b.iter(|| update_mass_moments(&mut store, tree).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, quadtree_benchmark);
criterion_main!(benches);
