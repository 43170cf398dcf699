use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use corner_reversi::Strategy;
use corner_reversi::ai::SEARCH_DEPTH;
use corner_reversi::arena::{self, SimulationConfig};

#[derive(Debug, clap::Parser)]
struct Args {
    #[clap(short, long, default_value_t = 100)]
    games: u32,
    #[clap(short, long, default_value_t = Strategy::Minimax)]
    black: Strategy,
    #[clap(short, long, default_value_t = Strategy::Random)]
    white: Strategy,
    #[clap(short, long, default_value_t = SEARCH_DEPTH)]
    depth: u8,
    #[clap(short, long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = SimulationConfig {
        games: args.games,
        black: args.black,
        white: args.white,
        depth: args.depth,
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match arena::run(&config, &mut rng) {
        Ok(report) => println!("{report}"),
        Err(err) => {
            eprintln!("simulation failed: {err}");
            std::process::exit(1);
        }
    }
}
