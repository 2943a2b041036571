/// Common inference surface for the fitted model variants.
///
/// Fitting stays on the concrete types since each variant has its own inputs
/// (the tree takes an rng and options, least squares is parameter free), but
/// everything downstream of fitting only needs this trait.
pub trait Regressor {
    /// Predicts the target value for one feature row.
    fn predict(&self, xs: &[f64]) -> f64;

    /// Predicts every row, preserving input order.
    fn predict_batch<I>(&self, rows: I) -> Vec<f64>
    where
        Self: Sized,
        I: IntoIterator<Item = Vec<f64>>,
    {
        rows.into_iter().map(|xs| self.predict(&xs)).collect()
    }
}
