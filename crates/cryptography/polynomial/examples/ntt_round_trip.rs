use std::time::Instant;

use bls12_381::Scalar;
use frntt_polynomial::{Decimation, Direction, Domain, Parallelism};
use tracing_forest::{util::LevelFilter, ForestLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const LOG_SIZE: u32 = 16;

fn main() {
    let size = 1 << LOG_SIZE;
    let domain = Domain::new(size).expect("2^16 fits in the two-adicity of the field");
    let parallelism = Parallelism::default();

    let input: Vec<_> = (0..size).map(|i| -Scalar::from(i as u64)).collect();
    let mut values = input.clone();

    println!("Warming up for 3 seconds...");

    let start = Instant::now();
    while Instant::now().duration_since(start).as_secs() < 3 {
        domain
            .transform(
                &mut values,
                Direction::Forward,
                Decimation::DIF,
                true,
                &parallelism,
            )
            .expect("length matches the domain");
        domain
            .transform(
                &mut values,
                Direction::Inverse,
                Decimation::DIT,
                true,
                &parallelism,
            )
            .expect("length matches the domain");
    }

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    Registry::default()
        .with(env_filter)
        .with(ForestLayer::default())
        .init();

    domain
        .fft(&mut values, Decimation::DIF, true)
        .expect("failed to compute coset fft");
    domain
        .fft_inverse(&mut values, Decimation::DIT, true)
        .expect("failed to compute inverse coset fft");

    assert_eq!(values, input, "round trip changed the input");
    println!(
        "round trip of size 2^{LOG_SIZE} with {} workers succeeded",
        parallelism.max_workers()
    );
}
