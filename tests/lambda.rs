use cyclogroup::{kernel, lambda};
use rug::Integer;

#[test]
fn g3_h13_p47() {
	let g = Integer::from(3);
	let h = Integer::from(13);
	let p = Integer::from(47);
	let x = lambda::solve_parallel(&g, &h, &p).expect("lambda should solve g=3 h=13 p=47");
	assert_eq!(kernel::mod_pow(&g, &x, &p), h);
}
