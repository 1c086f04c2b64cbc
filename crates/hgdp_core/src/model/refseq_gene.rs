//! RefSeqGene domain model.
//!
//! Identity-only grouping target for SNP references; carries no attributes
//! beyond its generated primary key.

use serde::{Deserialize, Serialize};

/// One reference-gene grouping record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefSeqGene {
    pub id: Option<i64>,
}

impl RefSeqGene {
    pub fn new() -> Self {
        Self::default()
    }
}
