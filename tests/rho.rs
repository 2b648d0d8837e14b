use cyclogroup::{kernel, rho};
use rug::Integer;

#[test]
fn sequential_g2_h5_p23() {
	let g = Integer::from(2);
	let h = Integer::from(5);
	let p = Integer::from(23);
	let x = rho::solve_sequential(&g, &h, &p).expect("sequential rho should solve p=23");
	assert_eq!(kernel::mod_pow(&g, &x, &p), h);
}

#[test]
fn sequential_g5_h3_p1019() {
	let g = Integer::from(5);
	let h = Integer::from(3);
	let p = Integer::from(1019);
	let x = rho::solve_sequential(&g, &h, &p).expect("sequential rho should solve p=1019");
	assert_eq!(kernel::mod_pow(&g, &x, &p), h);
}

#[test]
fn parallel_g2_h5_p23() {
	let g = Integer::from(2);
	let h = Integer::from(5);
	let p = Integer::from(23);
	let x = rho::solve_parallel(&g, &h, &p).expect("parallel rho should solve p=23");
	assert_eq!(kernel::mod_pow(&g, &x, &p), h);
}
