// Voice Matrix: the canonical nine-axis schema, its prompt phrasing,
// and a local consistency analyzer. Nothing here calls the model.

pub mod analyzer;
pub mod handlers;
pub mod matrix;
pub mod prompt;
