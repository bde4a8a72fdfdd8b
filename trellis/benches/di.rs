#![allow(missing_docs)]

use std::hint::black_box;
use std::sync::{Arc, RwLock};
use criterion::{criterion_group, criterion_main, Criterion};
use trellis::{Container, Dc, config::Configuration};

fn benchmark(c: &mut Criterion) {
    let container = Container::new();
    container.register_singleton(Counter::default()).unwrap();
    container.register_transient_default::<Transient>().unwrap();
    container.register_transient_factory(|counter: Dc<Counter>, transient: Dc<Transient>| Service {
        counter,
        transient
    }).unwrap();

    let config = Configuration::from(container.clone());
    config.configure("cache", Cache::default).unwrap();

    c.bench_function("singleton", |b| b.iter(
        || black_box(container.resolve_shared::<Counter>().unwrap())
    ));
    c.bench_function("transient", |b| b.iter(
        || black_box(container.resolve_shared::<Transient>().unwrap())
    ));
    c.bench_function("transient_with_dependencies", |b| b.iter(
        || black_box(container.resolve_shared::<Service>().unwrap())
    ));
    c.bench_function("invoke", |b| b.iter(
        || container.invoke(|c: Dc<Counter>| *c.0.write().unwrap() += 1).unwrap()
    ));
    c.bench_function("configuration", |b| b.iter(
        || black_box(config.get(black_box("cache")).unwrap())
    ));
}

criterion_group!(benches, benchmark);
criterion_main!(benches);

#[derive(Default, Clone, Debug)]
struct Counter(Arc<RwLock<i32>>);

#[derive(Default, Clone, Debug)]
struct Cache(Arc<RwLock<Vec<i32>>>);

#[derive(Default, Clone, Debug)]
struct Transient;

#[allow(dead_code)]
struct Service {
    counter: Dc<Counter>,
    transient: Dc<Transient>
}
