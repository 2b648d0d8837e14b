//! `dlog_pohlig g h p f1 e1 f2 e2 ...` — Pohlig-Hellman discrete
//! logarithm given the prime factorization of `p - 1` as trailing
//! (prime, exponent) pairs. Verifies `prod(fi^ei) == p - 1` before
//! dispatching, matching the original CLI's precondition check.

use clap::Parser;
use cyclogroup::{kernel, pohlig};
use log::error;
use rug::Integer;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dlog_pohlig", about = "Pohlig-Hellman discrete logarithm via prime-power reduction")]
struct Args {
	g: String,
	h: String,
	p: String,
	/// Alternating (prime, exponent) pairs whose product is p - 1
	#[arg(trailing_var_arg = true, allow_hyphen_values = true)]
	factors: Vec<String>,
}

const USAGE: &str = "usage: dlog_pohlig <g> <h> <p> <f1> <e1> [f2 e2 ...]";

fn parse_int(name: &str, raw: &str) -> Integer {
	raw.parse::<Integer>().unwrap_or_else(|_| {
		error!("invalid decimal integer for {name}: {raw}");
		eprintln!("{USAGE}");
		std::process::exit(1);
	})
}

fn parse_factors(raw: &[String]) -> Vec<(Integer, u32)> {
	if raw.is_empty() || raw.len() % 2 != 0 {
		error!("factor list must be a nonempty sequence of (prime, exponent) pairs");
		eprintln!("{USAGE}");
		std::process::exit(1);
	}
	raw.chunks(2)
		.map(|pair| {
			let f = parse_int("f", &pair[0]);
			let e: u32 = pair[1].parse().unwrap_or_else(|_| {
				error!("invalid exponent: {}", pair[1]);
				std::process::exit(1);
			});
			(f, e)
		})
		.collect()
}

fn main() -> ExitCode {
	env_logger::init();

	if std::env::args().count() < 6 {
		println!("{USAGE}");
		return ExitCode::SUCCESS;
	}

	let args = Args::parse();
	let g = parse_int("g", &args.g);
	let h = parse_int("h", &args.h);
	let p = parse_int("p", &args.p);
	let factors = parse_factors(&args.factors);

	let product: Integer = factors
		.iter()
		.fold(Integer::from(1), |acc, (f, e)| Integer::from(acc * kernel::pow(f, *e)));
	let p_minus_1 = Integer::from(&p - 1);
	if product != p_minus_1 {
		error!("factor product {product} does not equal p - 1 ({p_minus_1})");
		println!("FAILED");
		return ExitCode::FAILURE;
	}

	match pohlig::solve(&g, &h, &p, &factors) {
		Ok(x) if kernel::mod_pow(&g, &x, &p) == h => {
			println!("X = {x}");
			ExitCode::SUCCESS
		}
		Ok(_) => {
			error!("pohlig-hellman produced a witness that fails verification");
			println!("FAILED");
			ExitCode::FAILURE
		}
		Err(e) => {
			error!("{e}");
			println!("FAILED");
			ExitCode::FAILURE
		}
	}
}
