//! String utilities for the domain layer.

/// Shorten a backend model identifier for display.
///
/// `"meta-llama/llama-3.2-3b-instruct:free"` becomes `"llama-3.2-3b-instruct"`.
pub fn short_model_name(model: &str) -> &str {
    let tail = model.rsplit('/').next().unwrap_or(model);
    tail.split(':').next().unwrap_or(tail)
}
