// Core modules: argument coercion, the record model, filesystem probes, errors.
pub mod error;
pub mod probe;
pub mod record;
pub mod value;
