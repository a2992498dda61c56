//! Signed-digit scalar recoding shared by the precomp and Pippenger paths.

use ark_ff::{BigInteger, PrimeField};

/// Number of base-2^w windows covering a full scalar.
pub(crate) fn num_windows<F: PrimeField>(window_bits: usize) -> usize {
    64 * <F::BigInt as BigInteger>::NUM_LIMBS / window_bits
}

/// Decomposes `scalar` into base-2^w signed digits, calling `visit(window, digit)`
/// for every nonzero digit in increasing window order.
///
/// The scalar is taken out of Montgomery form first; the caller's value is not
/// mutated. A raw window value above 2^{w-1} is emitted as the negative digit
/// `raw - 2^w` and lends a carry to the next window, so every digit satisfies
/// `1 <= |digit| <= 2^{w-1}`. A raw value of exactly 2^{w-1} stays positive.
/// When the carry pushes a window to exactly 2^w the digit magnitude is zero:
/// nothing is emitted, but the carry still propagates.
///
/// Carries walk windows in increasing (limb, sub-window) order; a carry out of
/// the top window cannot occur for scalars reduced mod the group order.
pub(crate) fn signed_digits<F: PrimeField>(
    scalar: &F,
    window_bits: usize,
    mut visit: impl FnMut(usize, i64),
) {
    debug_assert!(window_bits >= 1 && window_bits <= 16 && 64 % window_bits == 0);

    let windows_per_limb = 64 / window_bits;
    let mask = (1u64 << window_bits) - 1;
    let half = 1u64 << (window_bits - 1);

    let bigint = scalar.into_bigint();
    let limbs = bigint.as_ref();

    let mut carry = 0u64;
    for (limb_idx, &limb) in limbs.iter().enumerate() {
        for w in 0..windows_per_limb {
            let raw = ((limb >> (w * window_bits)) & mask) + carry;
            if raw == 0 {
                continue;
            }
            carry = 0;

            let window = limb_idx * windows_per_limb + w;
            if raw > half {
                carry = 1;
                let magnitude = (mask + 1) - raw;
                if magnitude != 0 {
                    visit(window, -(magnitude as i64));
                }
            } else {
                visit(window, raw as i64);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use ark_ff::{Field, UniformRand};
    use ark_std::test_rng;

    fn digits(scalar: Fr, window_bits: usize) -> Vec<(usize, i64)> {
        let mut out = Vec::new();
        signed_digits(&scalar, window_bits, |window, digit| out.push((window, digit)));
        out
    }

    /// Rebuilds `Σ digit · (2^w)^window` in the field.
    fn reconstruct(digits: &[(usize, i64)], window_bits: usize) -> Fr {
        let mut acc = Fr::from(0u64);
        for &(window, digit) in digits {
            let power = Fr::from(2u64).pow([(window_bits * window) as u64]);
            let term = if digit >= 0 {
                Fr::from(digit as u64) * power
            } else {
                -(Fr::from((-digit) as u64) * power)
            };
            acc += term;
        }
        acc
    }

    #[test]
    fn random_scalars_reconstruct() {
        let mut rng = test_rng();
        for window_bits in [4, 8, 16] {
            let half = 1i64 << (window_bits - 1);
            for _ in 0..50 {
                let scalar = Fr::rand(&mut rng);
                let digits = digits(scalar, window_bits);
                for &(window, digit) in &digits {
                    assert!(window < num_windows::<Fr>(window_bits));
                    assert!(digit != 0 && digit.abs() <= half);
                }
                assert_eq!(reconstruct(&digits, window_bits), scalar);
            }
        }
    }

    #[test]
    fn zero_scalar_emits_nothing() {
        assert!(digits(Fr::from(0u64), 8).is_empty());
    }

    /// A raw window of exactly 2^{w-1} is the last positive digit, not the
    /// first negative one.
    #[test]
    fn half_window_stays_positive() {
        assert_eq!(digits(Fr::from(128u64), 8), vec![(0, 128)]);
        assert_eq!(digits(Fr::from(8u64), 4), vec![(0, 8)]);
        assert_eq!(digits(Fr::from(1u64 << 15), 16), vec![(0, 1 << 15)]);
    }

    #[test]
    fn above_half_flips_negative_with_carry() {
        assert_eq!(digits(Fr::from(129u64), 8), vec![(0, -127), (1, 1)]);
        assert_eq!(digits(Fr::from(255u64), 8), vec![(0, -1), (1, 1)]);
        assert_eq!(digits(Fr::from(9u64), 4), vec![(0, -7), (1, 1)]);
    }

    /// carry + 0xFF = 0x100: the digit magnitude is zero, so no addition is
    /// emitted for that window, but the carry must keep moving.
    #[test]
    fn saturated_window_skips_but_carries() {
        assert_eq!(digits(Fr::from(0xFFFFu64), 8), vec![(0, -1), (2, 1)]);
        assert_eq!(
            digits(Fr::from(0xFFFF_FFFF_FFFF_FFFFu64), 8),
            vec![(0, -1), (8, 1)]
        );
    }

    #[test]
    fn carry_crosses_limb_boundary() {
        // 2^64 - 1 recodes as -1 plus a carry into the second limb.
        let scalar = Fr::from(u64::MAX);
        let digits = digits(scalar, 16);
        assert_eq!(digits, vec![(0, -1), (4, 1)]);
    }
}
