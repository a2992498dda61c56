//! Bucketed Pippenger accumulation over the cold part of the basis.

use ark_ec::{AdditiveGroup, AffineRepr, CurveGroup};
use ark_ff::Zero;

use crate::recoding::{num_windows, signed_digits};

/// Power ladder for one cold basis point: `powers[j] = (2^c)^j · point`.
///
/// Pre-expanding the per-window factor lets the bucket pass drop the usual
/// doubling phase: digit `d` at window `j` contributes `d · powers[j]`
/// directly.
#[derive(Debug)]
pub(crate) struct PointPowers<G: CurveGroup> {
    powers: Vec<G::Affine>,
}

impl<G: CurveGroup> PointPowers<G> {
    pub(crate) fn new(point: G::Affine, window_bits: usize) -> Self {
        let window_count = num_windows::<G::ScalarField>(window_bits);
        let mut powers = Vec::with_capacity(window_count);
        let mut current = point;
        powers.push(current);
        for _ in 1..window_count {
            let mut next = current.into_group();
            for _ in 0..window_bits {
                next.double_in_place();
            }
            current = next.into_affine();
            powers.push(current);
        }
        Self { powers }
    }
}

/// Computes `Σ scalars[i] · points[i]` over one shard of the cold basis.
///
/// Signed digits land in one bucket per magnitude (negative digits subtract
/// the ladder point), then `Σ k · buckets[k]` falls out of the running-sum
/// scan in two additions per bucket. Skipping identity buckets in the
/// running sum is an optimization only; adding them would change nothing.
pub(crate) fn shard_msm<G: CurveGroup>(
    powers: &[PointPowers<G>],
    scalars: &[G::ScalarField],
    window_bits: usize,
) -> G {
    let mut buckets = vec![G::zero(); (1usize << (window_bits - 1)) + 1];

    for (point, scalar) in powers.iter().zip(scalars) {
        if scalar.is_zero() {
            continue;
        }
        signed_digits(scalar, window_bits, |window, digit| {
            if digit > 0 {
                buckets[digit as usize] += point.powers[window];
            } else {
                buckets[(-digit) as usize] -= point.powers[window];
            }
        });
    }

    let mut running = G::zero();
    let mut total = G::zero();
    for bucket in buckets[1..].iter().rev() {
        if !bucket.is_zero() {
            running += bucket;
        }
        total += running;
    }
    total
}
