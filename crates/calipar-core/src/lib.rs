//! # calipar-core
//!
//! Foundation types for the Calipar draft pipeline.
//!
//! This crate provides the shared vocabulary the autosave crates depend on:
//!
//! - **Branded IDs**: [`ids::ReviewId`], [`ids::SectionKey`] as newtypes
//! - **Review workflow**: [`review::ReviewStatus`], [`review::SectionStatus`]
//! - **Draft snapshots**: [`draft::SectionDraft`], [`draft::ReviewDraft`]
//! - **Errors**: [`errors::PersistFailure`], the persist-boundary failure
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by `calipar-autosave`.

#![deny(unsafe_code)]

pub mod draft;
pub mod errors;
pub mod ids;
pub mod review;

pub use draft::{ReviewDraft, SectionDraft};
pub use errors::PersistFailure;
pub use ids::{ReviewId, SectionKey};
pub use review::{ReviewStatus, SectionStatus};
