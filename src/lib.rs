//! Batch preparation step for the diabetes modelling dataset.
//!
//! Loads the cleaned CSV and its feature specification, derives the
//! engineered columns, validates the result against the upstream contract,
//! and persists the model-ready dataset (Parquet, optionally CSV) together
//! with a lineage metadata document.

pub mod config;
pub mod data;
pub mod feature_spec;
pub mod features;
pub mod metadata;
pub mod pipeline;
pub mod validate;
