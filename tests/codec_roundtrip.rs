//! Reed–Solomon codec: recovery from random losses and boundary behaviour.

mod common;

use common::{choose_k_of_n, random_bytes, rng_from_env, XorShift64, DEFAULT_TEST_SEED};
use ncmt::{Codec, CodecError, Rsgf8};

fn symbols(k: usize, len: usize, rng: &mut XorShift64) -> Vec<Vec<u8>> {
    (0..k).map(|_| random_bytes(len, rng)).collect()
}

fn erase(data: &[Vec<u8>], parity: Vec<Vec<u8>>, lost: &[usize]) -> Vec<Option<Vec<u8>>> {
    let mut slots: Vec<Option<Vec<u8>>> = data.iter().cloned().chain(parity).map(Some).collect();
    for &i in lost {
        slots[i] = None;
    }
    slots
}

#[test]
fn recovers_from_any_n_losses() {
    let mut rng = XorShift64::new(DEFAULT_TEST_SEED ^ 0xEC0D_1A77);
    for k in [1usize, 2, 7, 64, 128] {
        for _ in 0..4 {
            let data = symbols(k, 48, &mut rng);
            let parity = Rsgf8.encode(&data).unwrap();
            assert_eq!(parity.len(), k);

            let losses = (rng.next_u64() as usize) % (k + 1);
            let lost = choose_k_of_n(2 * k, losses, &mut rng);
            let slots = erase(&data, parity, &lost);
            assert_eq!(Rsgf8.decode(&slots).unwrap(), data, "k={k} lost={lost:?}");
        }
    }
}

#[test]
fn too_many_losses_fail() {
    let mut rng = rng_from_env();
    let data = symbols(8, 16, &mut rng);
    let parity = Rsgf8.encode(&data).unwrap();
    let lost = choose_k_of_n(16, 9, &mut rng);
    assert_eq!(
        Rsgf8.decode(&erase(&data, parity, &lost)).unwrap_err(),
        CodecError::NotEnoughShards { need: 8, have: 7 }
    );
}

#[test]
fn symbol_limit() {
    let mut rng = rng_from_env();
    assert_eq!(Rsgf8.max_symbols(), 128);
    Rsgf8.encode(&symbols(128, 4, &mut rng)).unwrap();
    assert_eq!(
        Rsgf8.encode(&symbols(129, 4, &mut rng)).unwrap_err(),
        CodecError::TooManySymbols { got: 129, max: 128 }
    );
}

#[test]
fn malformed_inputs() {
    assert!(matches!(Rsgf8.encode(&[]), Err(CodecError::InvalidArg(_))));
    assert_eq!(
        Rsgf8.encode(&[vec![1, 2], vec![3]]).unwrap_err(),
        CodecError::ShardLenMismatch
    );
    assert_eq!(Rsgf8.encode(&[vec![], vec![]]).unwrap_err(), CodecError::ShardLenMismatch);
    assert!(matches!(
        Rsgf8.decode(&[Some(vec![1]), None, Some(vec![2])]),
        Err(CodecError::InvalidArg(_))
    ));
}

#[test]
fn parity_differs_from_data() {
    let data = vec![vec![1u8], vec![2], vec![3], vec![4]];
    let parity = Rsgf8.encode(&data).unwrap();
    assert_ne!(parity, data);
}

#[test]
fn trait_objects_forward() {
    let boxed: Box<dyn Codec> = Box::new(Rsgf8::new());
    let data = vec![vec![9u8; 8]; 3];
    assert_eq!(boxed.encode(&data).unwrap(), Rsgf8.encode(&data).unwrap());
    assert_eq!(boxed.max_symbols(), 128);
}
