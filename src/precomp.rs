//! Windowed precomputed tables for the hot prefix of the basis.

use ark_ec::{AdditiveGroup, AffineRepr, CurveGroup};
use rayon::prelude::*;

use crate::recoding::{num_windows, signed_digits};

/// Pre-expanded multiples of a single fixed base point.
///
/// For a window width `w` the table holds `256 / w` windows of `2^{w-1}`
/// affine points each, with `windows[j][k - 1] = k · (2^w)^j · base` for
/// `k` in `1..=2^{w-1}`. Signed-digit recoding keeps the negative half out
/// of the table; negative digits subtract the stored point instead.
///
/// Built once at engine construction, immutable and lock-free to read
/// afterwards.
#[derive(Debug)]
pub(crate) struct PrecompTable<G: CurveGroup> {
    window_bits: usize,
    windows: Vec<Vec<G::Affine>>,
}

impl<G: CurveGroup> PrecompTable<G> {
    pub(crate) fn new(base: G::Affine, window_bits: usize) -> Self {
        let window_count = num_windows::<G::ScalarField>(window_bits);
        let table_len = 1usize << (window_bits - 1);

        // Window bases form a ladder, each entry 2^w times the previous.
        let mut window_bases = Vec::with_capacity(window_count);
        let mut current = base;
        window_bases.push(current);
        for _ in 1..window_count {
            let mut next = current.into_group();
            for _ in 0..window_bits {
                next.double_in_place();
            }
            current = next.into_affine();
            window_bases.push(current);
        }

        // Filling a window is independent of every other window. The scan
        // runs in projective and converts to affine with a single batched
        // inversion per window.
        let windows = window_bases
            .into_par_iter()
            .map(|window_base| {
                let mut multiples = Vec::with_capacity(table_len);
                let mut running: G = window_base.into_group();
                for _ in 0..table_len {
                    multiples.push(running);
                    running += window_base;
                }
                G::normalize_batch(&multiples)
            })
            .collect();

        Self {
            window_bits,
            windows,
        }
    }

    /// Adds `scalar · base` into `acc`: at most one mixed addition per
    /// window and no doublings. Callers may chain several calls into the
    /// same accumulator.
    pub(crate) fn scalar_mul_into(&self, scalar: &G::ScalarField, acc: &mut G) {
        signed_digits(scalar, self.window_bits, |window, digit| {
            if digit > 0 {
                *acc += self.windows[window][digit as usize - 1];
            } else {
                *acc -= self.windows[window][(-digit) as usize - 1];
            }
        });
    }
}
