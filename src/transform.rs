use ndarray::ArrayView2;

use crate::error::PcaError;

/// Contract shared by data transformers.
///
/// `fit` learns parameters from a data matrix and `transform` applies them to
/// new data; both are required operations. `fit_transform` is provided as the
/// composition of the two on the same input and is not expected to be
/// overridden.
///
/// Data matrices are n_samples x n_features views; implementors must not
/// mutate the caller's data.
pub trait Transformer {
    /// What `transform` produces.
    type Output;

    /// Learns parameters from `x` and stores them on the instance.
    /// Returns the instance so calls can be chained.
    fn fit(&mut self, x: ArrayView2<'_, f64>) -> Result<&mut Self, PcaError>;

    /// Applies previously fitted parameters to `x`.
    ///
    /// # Errors
    ///
    /// Returns [`PcaError::NotFitted`] if no successful `fit` preceded the
    /// call.
    fn transform(&self, x: ArrayView2<'_, f64>) -> Result<Self::Output, PcaError>;

    /// Fits to `x`, then transforms the same `x`. Equivalent to calling the
    /// two methods in sequence.
    fn fit_transform(&mut self, x: ArrayView2<'_, f64>) -> Result<Self::Output, PcaError> {
        self.fit(x)?;
        self.transform(x)
    }
}
