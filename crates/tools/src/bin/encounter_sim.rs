use anyhow::{Result, ensure};
use clap::Parser;
use lanoir_core::battle::roll_encounter;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

/// Rolls the field encounter check many times and compares the hit count
/// with its binomial expectation.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 0.05)]
    rate: f64,
    #[arg(short = 'n', long, default_value_t = 100_000)]
    rolls: u64,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tally {
    hits: u64,
    longest_gap: u64,
}

fn simulate(rate: f64, rolls: u64, seed: u64) -> Tally {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut tally = Tally { hits: 0, longest_gap: 0 };
    let mut gap = 0_u64;
    for _ in 0..rolls {
        if roll_encounter(&mut rng, rate) {
            tally.hits += 1;
            gap = 0;
        } else {
            gap += 1;
            tally.longest_gap = tally.longest_gap.max(gap);
        }
    }
    tally
}

/// Expected hit count and its three-sigma band for `rolls` Bernoulli trials.
fn band(rate: f64, rolls: u64) -> (f64, f64, f64) {
    let n = rolls as f64;
    let expected = n * rate;
    let sigma = (n * rate * (1.0 - rate)).sqrt();
    (expected, expected - 3.0 * sigma, expected + 3.0 * sigma)
}

fn main() -> Result<()> {
    let args = Args::parse();
    ensure!((0.0..=1.0).contains(&args.rate), "rate {} is not a probability", args.rate);
    ensure!(args.rolls > 0, "need at least one roll");

    let tally = simulate(args.rate, args.rolls, args.seed);
    let (expected, low, high) = band(args.rate, args.rolls);
    let inside = (low..=high).contains(&(tally.hits as f64));

    println!("rate {} over {} steps (seed {})", args.rate, args.rolls, args.seed);
    println!("observed {}  expected {expected:.1}  3-sigma band [{low:.1}, {high:.1}]", tally.hits);
    println!("longest run without an encounter: {} steps", tally.longest_gap);
    println!("{}", if inside { "within band" } else { "OUTSIDE band" });
    Ok(())
}
