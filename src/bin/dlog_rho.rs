//! `dlog_rho g h p [--parallel]` — Pollard rho discrete logarithm over a
//! safe prime `p = 2q + 1`. Prints `X = <x>` and exits 0 on success,
//! `FAILED` and exits 1 otherwise.

use clap::Parser;
use cyclogroup::{kernel, rho};
use log::error;
use rug::Integer;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dlog_rho", about = "Pollard rho discrete logarithm over a safe prime")]
struct Args {
	/// Generator of the group
	g: String,
	/// Target value (g^x mod p)
	h: String,
	/// Safe prime modulus p = 2q + 1
	p: String,
	/// Use the parallel distinguished-point search instead of the sequential Floyd-cycle search
	#[arg(long)]
	parallel: bool,
}

const USAGE: &str = "usage: dlog_rho <g> <h> <p> [--parallel]";

fn parse_arg(name: &str, raw: &str) -> Integer {
	raw.parse::<Integer>().unwrap_or_else(|_| {
		error!("invalid decimal integer for {name}: {raw}");
		eprintln!("{USAGE}");
		std::process::exit(1);
	})
}

fn main() -> ExitCode {
	env_logger::init();

	if std::env::args().count() < 4 {
		println!("{USAGE}");
		return ExitCode::SUCCESS;
	}

	let args = Args::parse();
	let g = parse_arg("g", &args.g);
	let h = parse_arg("h", &args.h);
	let p = parse_arg("p", &args.p);

	let solved = if args.parallel {
		rho::solve_parallel(&g, &h, &p)
	} else {
		rho::solve_sequential(&g, &h, &p)
	};

	match solved {
		Ok(x) if kernel::mod_pow(&g, &x, &p) == h => {
			println!("X = {x}");
			ExitCode::SUCCESS
		}
		Ok(_) => {
			error!("rho produced a witness that fails verification");
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
