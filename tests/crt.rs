use cyclogroup::crt;
use rug::Integer;

#[test]
fn r_2_3_2_n_3_5_7_gives_23() {
	let residues = vec![Integer::from(2), Integer::from(3), Integer::from(2)];
	let moduli = vec![Integer::from(3), Integer::from(5), Integer::from(7)];
	let x = crt::combine(&residues, &moduli).expect("CRT should combine coprime moduli");
	assert_eq!(x, Integer::from(23));
}
