use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::num::NonZeroUsize;
use tabreg::{DecisionTreeOptions, DecisionTreeRegressor, LinearRegression, Regressor as _, Table};

fn columns() -> Vec<Vec<f64>> {
    let mut feature1 = Vec::new();
    let mut feature2 = Vec::new();
    let mut feature3 = Vec::new();
    let mut target = Vec::new();

    for _ in 0..200 {
        let f1: f64 = rand::random();
        let f2: f64 = rand::random();
        let f3: f64 = rand::random();
        let t = 3.0 * f1 - 2.0 * f2 + (f3 - 0.5) * (f1 - 0.5);

        feature1.push(f1);
        feature2.push(f2);
        feature3.push(f3);
        target.push(t);
    }

    vec![feature1, feature2, feature3, target]
}

fn decision_tree(c: &mut Criterion) {
    let columns = columns();
    let options = DecisionTreeOptions {
        max_depth: NonZeroUsize::new(5),
        ..DecisionTreeOptions::default()
    };

    c.bench_function("decision tree fit+predict, features=3, n=200", |b| {
        b.iter(|| {
            let table = Table::new(columns.iter().map(|c| c.as_slice()).collect(), 3).unwrap();
            let mut rng = StdRng::seed_from_u64(42);
            let regressor = DecisionTreeRegressor::fit(&mut rng, table, options.clone());
            regressor.predict(&[0.5, 0.5, 0.5])
        })
    });
}

fn linear(c: &mut Criterion) {
    let columns = columns();

    c.bench_function("linear fit+predict, features=3, n=200", |b| {
        b.iter(|| {
            let table = Table::new(columns.iter().map(|c| c.as_slice()).collect(), 3).unwrap();
            let regression = LinearRegression::fit(&table).unwrap();
            regression.predict(&[0.5, 0.5, 0.5])
        })
    });
}

criterion_group!(benches, decision_tree, linear);
criterion_main!(benches);
