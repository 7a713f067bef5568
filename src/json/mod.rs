//! Purpose: JSON text boundary for emitted records.
//! Exports: `render` with the single-line record encoder.
//! Role: Single seam for output formatting so callsites never hand-assemble JSON text.

pub mod render;
