//! # calipar-autosave
//!
//! Debounced draft autosave for the review editor.
//!
//! The editor reports every content change; this crate coalesces those
//! into infrequent, strictly serialized persistence calls against an
//! injected [`DraftStore`], while exposing synchronous save-status
//! snapshots for UI feedback ("Saving…", "Saved", "Unsaved changes").
//!
//! - **Controller**: [`AutosaveController`] — trailing-edge debounce,
//!   at-most-one-in-flight persistence, last-write-wins buffering
//! - **Persist seam**: [`DraftStore`] trait plus [`store_fn`] for closures
//! - **Observable state**: [`AutosaveState`] with [`SaveStatus`]
//! - **Configuration**: [`AutosaveConfig`] (debounce delay, enabled flag)
//! - **Session context**: [`EditorSession`] — one controller per mounted
//!   editor, gated on [`calipar_core::ReviewStatus`]
//!
//! ## Crate Position
//!
//! Depends on: calipar-core. Top of the workspace; the editor UI is the
//! (out-of-tree) consumer.

#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod errors;
pub mod persist;
pub mod session;
pub mod state;

pub use config::AutosaveConfig;
pub use controller::AutosaveController;
pub use errors::AutosaveError;
pub use persist::{DraftStore, StoreFn, store_fn};
pub use session::EditorSession;
pub use state::{AutosaveState, SaveStatus};
