use math::automorphism::{AutoPerm, AutoPermMap};
use math::poly::Poly;
use math::ring::Ring;

#[test]
fn automorphism_u64() {
    let n: usize = 1 << 4;
    let q: u64 = 65537u64;
    let ring: Ring<u64> = Ring::new(n, q);

    sub_test("test_automorphism_native_u64", || {
        test_automorphism_native_u64(&ring)
    });
    sub_test("test_automorphism_from_perm_u64::<NTT:false>", || {
        test_automorphism_from_perm_u64::<false>(&ring)
    });
    sub_test("test_automorphism_from_perm_u64::<NTT:true>", || {
        test_automorphism_from_perm_u64::<true>(&ring)
    });
    sub_test("test_automorphism_composition_u64", || {
        test_automorphism_composition_u64(&ring)
    });
}

fn sub_test<F: FnOnce()>(name: &str, f: F) {
    println!("Running {}", name);
    f();
}

fn test_automorphism_native_u64(ring: &Ring<u64>) {
    let n: usize = ring.n();
    let q: u64 = ring.modulus.q;

    let mut p0: Poly<u64> = ring.new_poly();
    let mut p1: Poly<u64> = ring.new_poly();

    for i in 0..p0.n() {
        p0.0[i] = i as u64
    }

    // X -> X^{-1} = -X^{n-1}: a_0 - sum a_i X^{n-i}.
    let gal_el: usize = 2 * n - 1;

    ring.automorphism(&p0, gal_el, &mut p1);

    let mut want: Poly<u64> = ring.new_poly();
    for i in 1..n {
        want.0[n - i] = q - i as u64;
    }

    assert_eq!(p1, want);
}

fn test_automorphism_from_perm_u64<const NTT: bool>(ring: &Ring<u64>) {
    let mut p0: Poly<u64> = ring.new_poly();
    for i in 0..p0.n() {
        p0.0[i] = (i * i + 1) as u64
    }

    for (gen_1, gen_2) in [(1, false), (3, false), (1, true), (0, true)] {
        let perm: AutoPerm = AutoPerm::new::<NTT>(ring, gen_1, gen_2);

        let mut want: Poly<u64> = ring.new_poly();
        ring.automorphism(&p0, perm.gal_el, &mut want);

        let mut have: Poly<u64> = ring.new_poly();
        if NTT {
            let mut p0_ntt: Poly<u64> = ring.new_poly();
            ring.ntt(&p0, &mut p0_ntt);
            ring.automorphism_from_perm::<true>(&p0_ntt, &perm, &mut have);
            ring.intt_inplace(&mut have);
        } else {
            ring.automorphism_from_perm::<false>(&p0, &perm, &mut have);
        }

        assert_eq!(have, want, "gal_el={}", perm.gal_el);
    }
}

fn test_automorphism_composition_u64(ring: &Ring<u64>) {
    let mut perms: AutoPermMap = AutoPermMap::new();
    let g: usize = perms.generate::<false>(ring, 1, false);
    let g2: usize = perms.generate::<false>(ring, 2, false);
    assert_eq!(g, 5);
    assert_eq!(g2, 25 % ring.cyclotomic_order());

    let mut p0: Poly<u64> = ring.new_poly();
    for i in 0..p0.n() {
        p0.0[i] = (3 * i + 2) as u64
    }

    let mut tmp: Poly<u64> = ring.new_poly();
    let mut twice: Poly<u64> = ring.new_poly();
    let perm_g: &AutoPerm = perms.get(&g).expect("missing permutation");
    ring.automorphism_from_perm::<false>(&p0, perm_g, &mut tmp);
    ring.automorphism_from_perm::<false>(&tmp, perm_g, &mut twice);

    let mut once: Poly<u64> = ring.new_poly();
    let perm_g2: &AutoPerm = perms.get(&g2).expect("missing permutation");
    ring.automorphism_from_perm::<false>(&p0, perm_g2, &mut once);

    assert_eq!(twice, once);
}
