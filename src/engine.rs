//! Construction and query dispatch for the fixed-basis engine.

use ark_ec::CurveGroup;
use ark_ff::Zero;
use rayon::prelude::*;

use crate::error::MsmError;
use crate::pippenger::{shard_msm, PointPowers};
use crate::precomp::PrecompTable;
use crate::MAX_BASIS_LEN;

/// Hot points whose tables use the wide window under the default policy.
const WIDE_TABLE_POINTS: usize = 5;
const WIDE_WINDOW_BITS: usize = 16;
const NARROW_WINDOW_BITS: usize = 8;

/// Minimum active scalars a precomp-path task should own before it is worth
/// fanning out.
const MIN_SCALARS_PER_PRECOMP_TASK: usize = 4;
/// Minimum scalars a Pippenger shard should own.
const MIN_SCALARS_PER_SHARD: usize = 8;

/// Multi-scalar multiplication over a basis fixed at construction time.
///
/// The first `hot` points of the basis each carry a [`PrecompTable`]; the
/// rest are pre-expanded into power ladders consumed by the bucketed
/// Pippenger pass. A query of `k` scalars pairs them with the first `k`
/// basis points: the hot prefix goes through table lookups, the remainder
/// through the bucket pass, and the two partial sums are added.
///
/// Tables and ladders are immutable after construction; `msm` takes `&self`
/// and may be called from any number of threads concurrently.
#[derive(Debug)]
pub struct FixedBaseMsm<G: CurveGroup> {
    /// Query-path window width (`c`).
    window_bits: usize,
    tables: Vec<PrecompTable<G>>,
    powers: Vec<PointPowers<G>>,
}

impl<G: CurveGroup> FixedBaseMsm<G> {
    /// Builds an engine with the default hot policy: every basis point is
    /// hot, the first few with wide tables.
    ///
    /// `window_bits` is the query-path window width; 4 and 8 are the
    /// intended values.
    #[tracing::instrument(skip_all, name = "FixedBaseMsm::new")]
    pub fn new(bases: &[G::Affine], window_bits: usize) -> Result<Self, MsmError> {
        Self::build(bases, window_bits, bases.len(), |i| {
            if i < WIDE_TABLE_POINTS {
                WIDE_WINDOW_BITS
            } else {
                NARROW_WINDOW_BITS
            }
        })
    }

    /// Builds an engine whose hot prefix is limited to the first
    /// `hot_prefix` points, all with tables of width `hot_window_bits`
    /// (8 or 16). Scalars beyond the prefix take the Pippenger path.
    #[tracing::instrument(skip_all, name = "FixedBaseMsm::with_hot_prefix")]
    pub fn with_hot_prefix(
        bases: &[G::Affine],
        window_bits: usize,
        hot_prefix: usize,
        hot_window_bits: usize,
    ) -> Result<Self, MsmError> {
        if !matches!(hot_window_bits, 8 | 16) {
            return Err(MsmError::InvalidWindow(hot_window_bits));
        }
        let hot_len = hot_prefix.min(bases.len());
        Self::build(bases, window_bits, hot_len, |_| hot_window_bits)
    }

    fn build(
        bases: &[G::Affine],
        window_bits: usize,
        hot_len: usize,
        hot_width: impl Fn(usize) -> usize + Sync,
    ) -> Result<Self, MsmError> {
        if bases.len() > MAX_BASIS_LEN {
            return Err(MsmError::TooManyPoints(bases.len()));
        }
        if window_bits == 0 || window_bits > 16 || 64 % window_bits != 0 {
            return Err(MsmError::InvalidWindow(window_bits));
        }

        let (hot, cold) = bases.split_at(hot_len);
        let tables = hot
            .par_iter()
            .enumerate()
            .map(|(i, &base)| PrecompTable::new(base, hot_width(i)))
            .collect();
        // Ladders are a few hundred doublings each; not worth fanning out.
        let powers = cold
            .iter()
            .map(|&point| PointPowers::new(point, window_bits))
            .collect();

        Ok(Self {
            window_bits,
            tables,
            powers,
        })
    }

    /// Length of the fixed basis.
    pub fn basis_len(&self) -> usize {
        self.tables.len() + self.powers.len()
    }

    /// Computes `Σ scalars[i] · bases[i]`.
    ///
    /// Scalar vectors shorter than the basis pair with its prefix. Fails
    /// only when more scalars than basis points are supplied.
    #[tracing::instrument(skip_all, name = "FixedBaseMsm::msm")]
    pub fn msm(&self, scalars: &[G::ScalarField]) -> Result<G, MsmError> {
        if scalars.len() > self.basis_len() {
            return Err(MsmError::TooManyScalars {
                got: scalars.len(),
                basis: self.basis_len(),
            });
        }

        if scalars.len() <= self.tables.len() {
            return Ok(self.precomp_msm(scalars));
        }

        let (hot, cold) = scalars.split_at(self.tables.len());
        let (hot_sum, cold_sum) =
            rayon::join(|| self.precomp_msm(hot), || self.bucket_msm(cold));
        Ok(hot_sum + cold_sum)
    }

    /// Table-lookup path over the hot prefix.
    fn precomp_msm(&self, scalars: &[G::ScalarField]) -> G {
        let active: Vec<usize> = scalars
            .iter()
            .enumerate()
            .filter_map(|(i, s)| (!s.is_zero()).then_some(i))
            .collect();

        if active.len() <= MIN_SCALARS_PER_PRECOMP_TASK {
            let mut acc = G::zero();
            for &i in &active {
                self.tables[i].scalar_mul_into(&scalars[i], &mut acc);
            }
            return acc;
        }

        let tasks = active
            .len()
            .div_ceil(MIN_SCALARS_PER_PRECOMP_TASK)
            .min(rayon::current_num_threads());
        let task_size = active.len().div_ceil(tasks);

        // Partial sums combine by group addition, so reduction order is
        // irrelevant.
        active
            .par_chunks(task_size)
            .map(|chunk| {
                let mut acc = G::zero();
                for &i in chunk {
                    self.tables[i].scalar_mul_into(&scalars[i], &mut acc);
                }
                acc
            })
            .reduce(G::zero, |a, b| a + b)
    }

    /// Bucketed Pippenger path over the cold remainder.
    fn bucket_msm(&self, scalars: &[G::ScalarField]) -> G {
        let shards = scalars
            .len()
            .div_ceil(MIN_SCALARS_PER_SHARD)
            .min(rayon::current_num_threads());

        (0..shards)
            .into_par_iter()
            .map(|shard| {
                let start = shard * scalars.len() / shards;
                let end = (shard + 1) * scalars.len() / shards;
                shard_msm(
                    &self.powers[start..end],
                    &scalars[start..end],
                    self.window_bits,
                )
            })
            .reduce(G::zero, |a, b| a + b)
    }
}
