//! A small end-to-end walkthrough: build a system from a message length, round-trip it through
//! encrypt/decrypt and through encapsulate/decapsulate, logging each stage. Mirrors the
//! originating prototype's interactive smoke test, but takes the message on the command line
//! instead of prompting for it.

use mersenne_sparse_kem::{BitVector, System};
use rand_core::OsRng;

fn main() {
    env_logger::init();

    let text = std::env::args().nth(1).unwrap_or_else(|| "O rato roeu a rolha.".to_string());
    log::info!("message: {text:?}");

    let k = text.len() * 8;
    let mut rng = OsRng;
    let mut system = System::new(k, &mut rng).expect("k too large for the Mersenne-exponent table");
    log::info!("k = {k}, n = {}", system.n());

    system.gen_keys(&mut rng);
    log::info!("keys generated");

    log::info!("-- encrypt/decrypt --");
    let message = BitVector::from_bytes(text.as_bytes(), k);
    let ciphertext = system.encrypt(&message, &mut rng).expect("encrypt");
    let recovered = system.decrypt(&ciphertext).expect("decrypt");
    assert_eq!(recovered.to_bytes(), text.as_bytes());
    log::info!("decrypted: {:?}", String::from_utf8_lossy(&recovered.to_bytes()));

    log::info!("-- encapsulate/decapsulate --");
    let (ct, shared_a) = system.encapsulate(&mut rng).expect("encapsulate");
    let shared_b = system.decapsulate(&ct).expect("decapsulate");
    assert_eq!(shared_a, shared_b);
    log::info!("shared secrets match, {} bits", shared_a.as_bitvector().len());

    println!("finished correctly");
}
