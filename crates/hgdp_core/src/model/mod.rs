//! Domain model for the HGDP genetics dataset.
//!
//! # Responsibility
//! - Define canonical entity structures mirroring the persisted schema.
//! - Own the normalization rules (name casing, sex codes) applied at
//!   construction time.
//!
//! # Invariants
//! - `Population::original_name` is always stored lowercase.
//! - `Individual::name` is always stored uppercase.
//! - `Individual::sex` is one of exactly three codes (`m`, `f`, `u`).

pub mod individual;
pub mod population;
pub mod refseq_gene;
pub mod snp;
