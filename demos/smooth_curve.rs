//! Smooths a synthetic noisy animation curve the way an interactive slider
//! session would, and prints the original and filtered key values.
//!
//! cargo run --example smooth_curve -- --pass lowpass --max 150
use butter::{CurveSet, FilterSession, FilterSettings, PassType, SliderScale};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Parser, Debug)]
#[command(about = "Butterworth smoothing of a noisy curve")]
struct Args {
    /// lowpass, highpass or bandpass
    #[arg(short, long, default_value = "lowpass")]
    pass: PassType,

    /// Filter order
    #[arg(short, long, default_value_t = 4)]
    order: usize,

    /// Raw position of the minimum slider
    #[arg(long, default_value_t = 10_000.0)]
    min: f64,

    /// Raw position of the maximum slider
    #[arg(long, default_value_t = 150.0)]
    max: f64,

    /// Number of keys on the curve
    #[arg(short, long, default_value_t = 48)]
    keys: usize,

    /// Noise amplitude added to the curve
    #[arg(long, default_value_t = 0.15)]
    noise: f64,

    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let curve: Vec<f64> = (0..args.keys)
        .map(|i| (i as f64 * 0.15).sin() + args.noise * rng.gen_range(-1.0..1.0))
        .collect();

    let mut session = FilterSession::new(FilterSettings {
        order: args.order,
        scale: SliderScale::default(),
    });
    let curves: CurveSet<&str> = vec![("demo", curve.clone())].into_iter().collect();
    session.begin(curves);

    match session.update(args.min, args.max, args.pass) {
        Ok(filtered) => {
            for (_, smoothed) in filtered {
                println!("{:>5} {:>10} {:>10}", "key", "original", "filtered");
                for (i, (x, y)) in curve.iter().zip(smoothed.iter()).enumerate() {
                    println!("{:>5} {:>10.4} {:>10.4}", i, x, y);
                }
            }
        }
        Err(e) => eprintln!("{}", e),
    }

    session.end();
}
