//! Purpose: Library behind the `re` CLI: turn step arguments into single-line JSON records.
//! Exports: `api` (builders, helpers, dispatcher), `core` (coercion, records, probes, errors).
//! Role: Shared by the binary and by runners that embed the helpers directly.
//! Invariants: No hidden state; each call depends only on its arguments and the filesystem.
pub mod api;
pub mod core;
pub mod json;
pub mod notice;
