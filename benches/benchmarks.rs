use numbo::driver;
use numbo::input::Input;
use numbo::rack::{Rack, URGENCY_HIGH, URGENCY_LOW};
use numbo::seed;
use numbo::slipnet::node::ACTIVATION_HIGH;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        building_seeded_slipnet,
        drawing_from_a_weighted_rack,
        activating_an_addition_concept,
        solving_a_small_instance,
}

fn building_seeded_slipnet(c: &mut criterion::Criterion) {
    c.bench_function("build the seeded slipnet", |b| {
        b.iter(seed::seed);
    });
}

fn drawing_from_a_weighted_rack(c: &mut criterion::Criterion) {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    c.bench_function("draw 100 items from a weighted rack", |b| {
        b.iter(|| {
            let mut rng = SmallRng::seed_from_u64(7);
            let mut rack = Rack::new();
            for i in 0..100u32 {
                rack.add(i, URGENCY_LOW + (i % 3) * URGENCY_HIGH);
            }
            while !rack.is_empty() {
                rack.take(&mut rng);
            }
        });
    });
}

fn activating_an_addition_concept(c: &mut criterion::Criterion) {
    c.bench_function("activate the addition concept and spread once", |b| {
        b.iter(|| {
            let mut net = seed::seed();
            let addition = net.get("addition").unwrap();
            net.activate(addition, ACTIVATION_HIGH)
        });
    });
}

fn solving_a_small_instance(c: &mut criterion::Criterion) {
    use numbo::animation::NullSink;
    c.bench_function("drive a small 4-brick instance to completion", |b| {
        b.iter(|| {
            let input = Input {
                target: 11,
                bricks: vec![2, 3, 5, 6],
            };
            let mut sink = NullSink;
            driver::run(input, driver::DEFAULT_STEP_CAP, Some(1), &mut sink)
        });
    });
}

