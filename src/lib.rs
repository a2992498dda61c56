//! Fixed-basis multi-scalar multiplication over a prime-order curve group.
//!
//! Given a basis `P_0, ..., P_{N-1}` fixed at construction time, the engine
//! computes `Σ s_i · P_i` for scalar vectors presented at call time. The
//! first points of the basis (the "hot" prefix) each carry a windowed
//! precomputed table so a scalar multiplication costs one mixed addition per
//! window and no doublings; the remainder of the basis is handled by a
//! bucketed Pippenger pass over pre-expanded point-power ladders. Both paths
//! share a carry-based signed-digit recoding of the scalars, which halves
//! the table and bucket sizes.
//!
//! Construction amortizes over many calls: building the tables for a
//! 256-point basis allocates tens of MiB and is parallelized across the
//! rayon pool, after which `msm` is read-only and callable concurrently.

mod engine;
mod error;
mod pippenger;
mod precomp;
mod recoding;

pub use engine::FixedBaseMsm;
pub use error::MsmError;

/// Maximum basis length the engine accepts.
pub const MAX_BASIS_LEN: usize = 256;
