// Exact principal component analysis

use log::debug;
use ndarray::{s, Array1, Array2, ArrayView2, Axis};
use ndarray_linalg::SVDInto;

use crate::error::PcaError;
use crate::transform::Transformer;

/// Parameters learned by a successful fit, created and replaced as a unit.
#[derive(Debug, Clone)]
struct FittedModel {
    /// Per-feature mean of the training data. Shape: (n_features)
    mean: Array1<f64>,
    /// Principal directions, one unit-norm column per retained component,
    /// ordered by descending explained variance.
    /// Shape: (n_features, k_components)
    loadings: Array2<f64>,
    /// Variance of the training data along each retained direction.
    /// Shape: (k_components)
    explained_variance: Array1<f64>,
    /// Each retained variance divided by the total variance over *all*
    /// feature-space directions, so the entries remain true fractions under
    /// dimensionality reduction. Shape: (k_components)
    explained_variance_ratio: Array1<f64>,
}

/// Lifecycle of a [`Pca`] instance. `transform` requires `Fitted`; a
/// successful re-fit replaces the whole `Fitted` payload.
#[derive(Debug, Clone)]
enum ModelState {
    Unfitted,
    Fitted(FittedModel),
}

/// Output of [`Pca::transform`]: the projected scores together with the
/// basis that produced them, so callers can inspect or reuse the loadings
/// without a separate accessor call.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Projected coordinates. Shape: (n_samples, k_components)
    pub scores: Array2<f64>,
    /// The loading matrix used for the projection.
    /// Shape: (n_features, k_components)
    pub loadings: Array2<f64>,
}

/// Exact principal component analysis.
///
/// `fit` centers a copy of the input matrix, takes its full singular value
/// decomposition, and retains the leading right-singular directions as
/// loadings along with the explained variance and explained-variance-ratio
/// spectra. `transform` projects new data onto the stored basis.
///
/// The sign of each loading column is not canonical: the decomposition
/// leaves a per-column ±1 ambiguity, so two fits of the same data may return
/// loadings that differ by sign. Compare projections or orthogonality
/// invariants, never raw loading vectors.
///
/// # Examples
///
/// ```
/// use exact_pca::{Pca, Transformer};
/// use ndarray::array;
///
/// let data = array![
///     [2.0, 1.0],
///     [3.0, 4.0],
///     [5.0, 0.0],
///     [7.0, 6.0],
/// ];
///
/// let mut pca = Pca::new();
/// let projection = pca.fit_transform(data.view()).unwrap();
/// assert_eq!(projection.scores.dim(), (4, 2));
/// ```
#[derive(Debug, Clone)]
pub struct Pca {
    /// Requested component count; `None` keeps all components.
    n_components: Option<usize>,
    state: ModelState,
}

impl Default for Pca {
    fn default() -> Self {
        Self::new()
    }
}

impl Pca {
    /// Creates an unfitted PCA that keeps all components at fit time.
    pub fn new() -> Self {
        Self {
            n_components: None,
            state: ModelState::Unfitted,
        }
    }

    /// Creates an unfitted PCA that retains at most `n_components`
    /// components.
    ///
    /// The count is not checked against any data dimensionality here; that
    /// happens at fit time, when the feature count is known. A request that
    /// exceeds the feature count is clamped during `fit`.
    ///
    /// # Errors
    ///
    /// Returns [`PcaError::InvalidComponentCount`] if `n_components` is 0.
    pub fn with_components(n_components: usize) -> Result<Self, PcaError> {
        if n_components == 0 {
            return Err(PcaError::InvalidComponentCount(n_components));
        }
        Ok(Self {
            n_components: Some(n_components),
            state: ModelState::Unfitted,
        })
    }

    fn fitted(&self) -> Option<&FittedModel> {
        match &self.state {
            ModelState::Fitted(model) => Some(model),
            ModelState::Unfitted => None,
        }
    }

    /// Whether a successful `fit` has run on this instance.
    pub fn is_fitted(&self) -> bool {
        matches!(self.state, ModelState::Fitted(_))
    }

    /// The component count requested at construction (`None` = keep all).
    pub fn n_components(&self) -> Option<usize> {
        self.n_components
    }

    /// Per-feature mean of the training data, or `None` before fit.
    pub fn mean(&self) -> Option<&Array1<f64>> {
        self.fitted().map(|model| &model.mean)
    }

    /// The loading matrix, shape (n_features, k_components), or `None`
    /// before fit.
    pub fn loadings(&self) -> Option<&Array2<f64>> {
        self.fitted().map(|model| &model.loadings)
    }

    /// Variance along each retained direction, descending, or `None` before
    /// fit.
    pub fn explained_variance(&self) -> Option<&Array1<f64>> {
        self.fitted().map(|model| &model.explained_variance)
    }

    /// Fraction of the total variance captured by each retained direction,
    /// or `None` before fit. Sums to 1.0 (within floating-point tolerance)
    /// when all components are kept, and to less than 1.0 otherwise.
    pub fn explained_variance_ratio(&self) -> Option<&Array1<f64>> {
        self.fitted().map(|model| &model.explained_variance_ratio)
    }

    /// Maps scores from component space back to feature space:
    /// `scores · loadingsᵗ + mean`.
    ///
    /// With all components retained this reconstructs the original data up
    /// to floating-point error; with fewer, it yields the projection of the
    /// data onto the retained subspace.
    ///
    /// # Errors
    ///
    /// Returns [`PcaError::NotFitted`] before a successful fit, or
    /// [`PcaError::InvalidInput`] if the score dimension does not match the
    /// fitted component count.
    pub fn inverse_transform(&self, scores: ArrayView2<'_, f64>) -> Result<Array2<f64>, PcaError> {
        let model = self.fitted().ok_or(PcaError::NotFitted)?;
        let k_components = model.loadings.ncols();
        if scores.ncols() != k_components {
            return Err(PcaError::InvalidInput(format!(
                "score dimension ({}) does not match the fitted component count ({})",
                scores.ncols(),
                k_components
            )));
        }
        Ok(scores.dot(&model.loadings.t()) + &model.mean)
    }
}

impl Transformer for Pca {
    type Output = Projection;

    /// Fits the PCA model to `x` (shape: n_samples x n_features).
    ///
    /// Centers a copy of `x` with the per-feature mean (the caller's data is
    /// never mutated), decomposes it as `X_c = U · S · Vᵗ`, and stores the
    /// first k columns of V as loadings, where k is the requested component
    /// count clamped to n_features, or n_features when no count was
    /// requested. Explained variance is `sᵢ² / (n − 1)`; the ratio divides
    /// by the total variance over all feature-space directions.
    ///
    /// A re-fit replaces all previously fitted parameters wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`PcaError::InvalidInput`] for a zero-feature matrix,
    /// [`PcaError::TooFewSamples`] for fewer than 2 observations (the
    /// sample variance is undefined for a single observation, so this fails
    /// fast instead of producing non-finite values), and
    /// [`PcaError::Decomposition`] if the SVD fails.
    fn fit(&mut self, x: ArrayView2<'_, f64>) -> Result<&mut Self, PcaError> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if n_features == 0 {
            return Err(PcaError::InvalidInput(
                "input matrix has zero features".to_string(),
            ));
        }
        if n_samples < 2 {
            return Err(PcaError::TooFewSamples(n_samples));
        }

        // Resolve the component count against the data. More directions than
        // features cannot exist, so an oversized request clamps to n_features.
        let k_components = match self.n_components {
            Some(requested) if requested > n_features => {
                debug!(
                    "requested {} components but data has {} features; clamping to {}",
                    requested, n_features, n_features
                );
                n_features
            }
            Some(requested) => requested,
            None => n_features,
        };

        let mean = x.mean_axis(Axis(0)).ok_or_else(|| {
            PcaError::InvalidInput("failed to compute mean of the data".to_string())
        })?;

        // Center a copy; the caller's matrix stays untouched.
        let mut centered = x.to_owned();
        centered -= &mean;

        // Full SVD: centered = U · S · Vᵗ with singular values descending.
        // V is n_features x n_features, so keep-all stays valid even when
        // n_samples < n_features.
        let (_, singular_values, vt) = centered
            .svd_into(false, true)
            .map_err(|e| PcaError::Decomposition(format!("SVD of centered data failed: {}", e)))?;
        let vt = vt.ok_or_else(|| {
            PcaError::Decomposition("SVD did not return the Vᵗ factor".to_string())
        })?;

        let loadings = vt.slice(s![..k_components, ..]).t().to_owned();

        // min(n, p) singular values exist; directions beyond them carry
        // exactly zero variance, so this sum covers all n_features
        // directions.
        let denom = (n_samples - 1) as f64;
        let all_variances = singular_values.mapv(|s_val| s_val.powi(2) / denom);
        let total_variance = all_variances.sum();

        let mut explained_variance = Array1::<f64>::zeros(k_components);
        let available = k_components.min(all_variances.len());
        explained_variance
            .slice_mut(s![..available])
            .assign(&all_variances.slice(s![..available]));

        let explained_variance_ratio = if total_variance > 0.0 {
            explained_variance.mapv(|v| v / total_variance)
        } else {
            // All-constant data: no direction explains anything.
            Array1::zeros(k_components)
        };

        debug!(
            "fitted PCA on {} samples x {} features, retaining {} components",
            n_samples, n_features, k_components
        );

        self.state = ModelState::Fitted(FittedModel {
            mean,
            loadings,
            explained_variance,
            explained_variance_ratio,
        });
        Ok(self)
    }

    /// Projects `x` onto the fitted basis: `(x − mean) · loadings`.
    ///
    /// Pure with respect to the fitted state; repeated calls with the same
    /// input return identical output until the next `fit`.
    ///
    /// # Errors
    ///
    /// Returns [`PcaError::NotFitted`] before a successful fit, or
    /// [`PcaError::InvalidInput`] if the feature dimension of `x` does not
    /// match the fitted model's.
    fn transform(&self, x: ArrayView2<'_, f64>) -> Result<Projection, PcaError> {
        let model = self.fitted().ok_or(PcaError::NotFitted)?;
        let n_model_features = model.mean.len();

        if x.ncols() != n_model_features {
            return Err(PcaError::InvalidInput(format!(
                "input feature dimension ({}) does not match the fitted model's ({})",
                x.ncols(),
                n_model_features
            )));
        }

        let centered = &x - &model.mean;
        Ok(Projection {
            scores: centered.dot(&model.loadings),
            loadings: model.loadings.clone(),
        })
    }
}
