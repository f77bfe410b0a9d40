// tests/test_arraycopy.rs
//
// Byte-range copy properties over many offsets and lengths

use datamap_bench::{arraycopy, arraycopy_within, CopyError};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

const LEN: usize = 97;

fn random_buffer(rng: &mut StdRng, len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rng.fill(buf.as_mut_slice());
    buf
}

#[test]
fn test_copy_matches_source_and_preserves_rest() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let source = random_buffer(&mut rng, LEN);
    let mut checked = 0;

    for src_pos in (0..=LEN).step_by(8) {
        for dest_pos in (0..=LEN).step_by(12) {
            let max = (LEN - src_pos).min(LEN - dest_pos);
            for length in [0, 1, max / 2, max] {
                let original = random_buffer(&mut rng, LEN);
                let mut target = original.clone();

                arraycopy(&source, src_pos, &mut target, dest_pos, length).unwrap();

                assert_eq!(
                    &target[dest_pos..dest_pos + length],
                    &source[src_pos..src_pos + length],
                    "src_pos={src_pos} dest_pos={dest_pos} length={length}"
                );
                assert_eq!(&target[..dest_pos], &original[..dest_pos]);
                assert_eq!(&target[dest_pos + length..], &original[dest_pos + length..]);
                checked += 1;
            }
        }
    }
    println!("checked {checked} copies");
}

#[test]
fn test_zero_length_is_noop() {
    let source = [1u8, 2, 3];
    let mut target = [9u8, 9, 9];
    for pos in 0..=3 {
        arraycopy(&source, pos, &mut target, 3 - pos, 0).unwrap();
    }
    assert_eq!(target, [9, 9, 9]);

    let mut empty: [u8; 0] = [];
    arraycopy(&[], 0, &mut empty, 0, 0).unwrap();
}

#[test]
fn test_out_of_bounds_leaves_target_untouched() {
    let source = vec![0xAAu8; 16];
    let mut target = vec![0x55u8; 16];

    let cases = [(0, 0, 17), (10, 0, 7), (0, 10, 7), (17, 0, 0), (0, 17, 0)];
    for (src_pos, dest_pos, length) in cases {
        let err = arraycopy(&source, src_pos, &mut target, dest_pos, length).unwrap_err();
        let CopyError::OutOfBounds { buffer_len, .. } = err;
        assert_eq!(buffer_len, 16);
        assert!(target.iter().all(|&b| b == 0x55));
    }
}

#[test]
fn test_within_matches_naive_forward_loop() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let len = rng.random_range(1..64usize);
        let length = rng.random_range(0..=len);
        let src_pos = rng.random_range(0..=len - length);
        let dest_pos = rng.random_range(0..=len - length);

        let original = random_buffer(&mut rng, len);
        let mut expected = original.clone();
        for i in 0..length {
            expected[dest_pos + i] = expected[src_pos + i];
        }

        let mut actual = original.clone();
        arraycopy_within(&mut actual, src_pos, dest_pos, length).unwrap();
        assert_eq!(actual, expected, "len={len} src={src_pos} dest={dest_pos} n={length}");
    }
}
