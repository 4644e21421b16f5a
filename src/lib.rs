//! Dynamic value coercion and structural record/map mapping.

/// Value coercion, record reflection, and record/map conversion.
pub mod cast;
