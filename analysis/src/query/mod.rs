//! Effectiveness queries over a type catalog
//!
//! [`classify`] sorts every attacking type into a bucket for a single
//! defender; [`analyze`] folds those results across a whole roster.

mod effectiveness;
mod team;

pub use effectiveness::{
    Bucket, EffectivenessResult, MalformedTypeSet, TypeSet, classify, classify_set, exponents,
};
pub use team::{TeamMember, TeamTally, TypeCounts, analyze, analyze_with};
