//! hashbench — Comparative Hash Microbenchmarks
//! ============================================
//! Measures **throughput** and **per-call overhead** of hashing a small,
//! fixed-size input across many hash implementations under one methodology.
//!
//! ## Methodology
//! * Every iteration builds a **fresh** hash instance, writes the whole
//!   input buffer in one call and extracts the digest. Construction cost is
//!   part of the measurement (think hashing short keys).
//! * All cases hash the same [`HASH_BUFFER_SIZE`]‑byte, zero‑filled buffer,
//!   so bytes/sec numbers compare directly.
//! * Part of every digest is folded into an [`Accumulator`] which is checked
//!   when the case finishes. A zero sum fails the case: the optimiser most
//!   likely dropped the hashing.
//!
//! ## Adapter shapes
//!
//! | Shape        | Construction                 | Digest        |
//! |:-------------|:-----------------------------|:--------------|
//! | `Unkeyed`    | `new()`                      | bytes         |
//! | `Unkeyed64`  | `new()`                      | `u64`         |
//! | `Seeded64`   | `with_seed(u64)`             | `u64`         |
//! | `Seeded32`   | `with_seed(u32)`             | `u32`         |
//! | `Keyed`      | `try_with_key(&[u8])?`       | bytes         |
//! | `Keyed64`    | `try_with_key(&[u8])?`       | `u64`         |
//! | `Truncated`  | `new()`, top bytes of `u64`  | 1, 2, 4 bytes |
//!
//! The registered cases live in [`registry::CASES`]. criterion drives them
//! from `benches/hashing.rs`; [`Runner`] is a lighter in-process driver
//! that reports raw iteration and byte counts.

// ---------------------------------------------------------------------------
// Modules
// ---------------------------------------------------------------------------

pub mod adapter;
pub mod case;
pub mod error;
pub mod guard;
pub mod hasher;
pub mod registry;
pub mod runner;

pub use adapter::{Digest, Input, Kernel, Shape};
pub use case::{Case, Session};
pub use error::BenchError;
pub use guard::Accumulator;
pub use runner::{Measurement, Report, Runner, RunnerConfig};

// ---------------------------------------------------------------------------
// Reference parameters
// ---------------------------------------------------------------------------

/// Length of the input buffer shared by every registered case.
pub const HASH_BUFFER_SIZE: usize = 8;

/// Seed handed to the seeded shapes.
pub const SEED: u64 = 1471;

/// Key length used by the keyed cases (BLAKE2b MAC, SipHash).
pub const KEY_SIZE: usize = 16;

/// Key length of HighwayHash.
pub const HIGHWAY_KEY_SIZE: usize = 32;
