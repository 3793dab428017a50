use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use ntru_lattice::{
    decrypt_raw, encrypt_raw, generate_blinding_poly, generate_key_pair, EncryptionParameters,
    EncryptionPrivateKey, EncryptionPublicKey, IntegerPolynomial,
};

fn random_message(n: usize, rng: &mut impl Rng) -> IntegerPolynomial {
    IntegerPolynomial::from_coeffs((0..n).map(|_| rng.gen_range(-1..=1)).collect())
}

// h*f = 3g mod q for every parameter set flavor
fn check_key_identity(params: &EncryptionParameters, seed: u64) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let kp = generate_key_pair(params, &mut rng);

    let mut f = kp.private.t.to_integer_polynomial();
    if params.fast_fp {
        f.mult_factor(3);
        f.coeffs[0] += 1;
    }
    let mut hf = f.multiply_mod(&kp.public.h, params.q);
    hf.center0(params.q);
    for &c in &hf.coeffs {
        assert_eq!(c % 3, 0, "h*f has a coefficient not divisible by 3");
        assert!(c.abs() <= 3, "h*f is not of the form 3g with g ternary");
    }
}

#[test]
fn key_identity_simple() {
    check_key_identity(&EncryptionParameters::apr2011_439(), 1);
    check_key_identity(&EncryptionParameters::apr2011_743(), 2);
}

#[test]
fn key_identity_product_fast_fp() {
    check_key_identity(&EncryptionParameters::apr2011_439_fast(), 3);
    check_key_identity(&EncryptionParameters::apr2011_743_fast(), 4);
}

#[test]
fn key_identity_large_simple_sets() {
    check_key_identity(&EncryptionParameters::ees1087ep2(), 5);
}

#[test]
fn encrypt_decrypt_round_trip() {
    for (params, seed) in [
        (EncryptionParameters::apr2011_439(), 11u64),
        (EncryptionParameters::apr2011_439_fast(), 12),
    ] {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let kp = generate_key_pair(&params, &mut rng);

        for i in 0..10u8 {
            let m = random_message(params.n, &mut rng);
            let r = generate_blinding_poly(&[i, 42], &params);
            let e = encrypt_raw(&m, &r, &kp.public.h, params.q);
            let decrypted = decrypt_raw(&e, &kp.private, &params);
            assert_eq!(decrypted, m, "round trip failed for seed byte {}", i);
        }
    }
}

#[test]
fn public_key_serialization() {
    let params = EncryptionParameters::apr2011_743();
    let mut rng = ChaCha20Rng::seed_from_u64(21);
    let kp = generate_key_pair(&params, &mut rng);

    let bytes = kp.public.to_bytes(&params);
    assert_eq!(bytes.len(), params.n * 11 / 8 + usize::from(params.n * 11 % 8 != 0));
    let decoded = EncryptionPublicKey::from_bytes(&bytes, &params).unwrap();
    assert_eq!(decoded, kp.public);
}

#[test]
fn private_key_serialization_simple() {
    let params = EncryptionParameters::apr2011_439();
    let mut rng = ChaCha20Rng::seed_from_u64(22);
    let kp = generate_key_pair(&params, &mut rng);

    let bytes = kp.private.to_bytes(&params);
    let decoded = EncryptionPrivateKey::from_bytes(&bytes, &params).unwrap();
    assert_eq!(decoded, kp.private);
}

#[test]
fn private_key_serialization_product() {
    let params = EncryptionParameters::apr2011_743_fast();
    let mut rng = ChaCha20Rng::seed_from_u64(23);
    let kp = generate_key_pair(&params, &mut rng);

    let bytes = kp.private.to_bytes(&params);
    let decoded = EncryptionPrivateKey::from_bytes(&bytes, &params).unwrap();
    assert_eq!(decoded, kp.private);
}

#[test]
fn private_key_rejects_truncated_input() {
    let params = EncryptionParameters::apr2011_439();
    let mut rng = ChaCha20Rng::seed_from_u64(24);
    let kp = generate_key_pair(&params, &mut rng);

    let bytes = kp.private.to_bytes(&params);
    assert!(EncryptionPrivateKey::from_bytes(&bytes[..bytes.len() - 1], &params).is_err());
    assert!(EncryptionPrivateKey::from_bytes(&[], &params).is_err());
}

#[test]
fn parameter_stream_round_trip() {
    for params in [
        EncryptionParameters::ees1087ep2(),
        EncryptionParameters::apr2011_439_fast(),
    ] {
        let mut out = Vec::new();
        params.write_to(&mut out);
        let decoded = EncryptionParameters::read_from(&out).unwrap();
        assert_eq!(decoded, params);
    }
}
