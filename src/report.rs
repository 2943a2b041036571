use itertools::Itertools as _;

/// Renders predictions as one line: default `f64` formatting (shortest
/// representation that round-trips, locale independent), single spaces, no
/// labels.
pub fn format_predictions(predictions: &[f64]) -> String {
    predictions.iter().join(" ")
}
