// Non-negative matrix factorization, X ≈ W·H, by multiplicative updates.
//
// X is documents × terms. W (documents × components) holds per-document
// topic weights; H (components × terms) holds per-topic term weights.
// Initialization is seeded so repeated runs on the same input agree.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::AnalysisError;

/// Guards the update denominators against division by zero.
const EPSILON: f64 = 1e-10;

/// Convergence is checked every this many iterations.
const CHECK_EVERY: usize = 10;

#[derive(Debug, Clone)]
pub struct Nmf {
    pub n_components: usize,
    pub max_iter: usize,
    /// Stop once the relative error improvement falls below this
    pub tol: f64,
    pub seed: u64,
}

impl Default for Nmf {
    fn default() -> Self {
        Self {
            n_components: 5,
            max_iter: 200,
            tol: 1e-4,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Factorization {
    /// Documents × components
    pub w: Array2<f64>,
    /// Components × terms
    pub h: Array2<f64>,
    pub n_iter: usize,
    /// Frobenius norm of X - W·H at the last iteration
    pub reconstruction_err: f64,
}

impl Nmf {
    pub fn with_components(n_components: usize) -> Self {
        Self {
            n_components,
            ..Self::default()
        }
    }

    pub fn fit_transform(&self, x: &Array2<f64>) -> Result<Factorization, AnalysisError> {
        let (n_rows, n_cols) = x.dim();
        if self.n_components == 0 {
            return Err(AnalysisError::Factorize(
                "n_components must be at least 1".to_string(),
            ));
        }
        if n_rows == 0 || n_cols == 0 {
            return Err(AnalysisError::Factorize(format!(
                "cannot factorize a {n_rows}x{n_cols} matrix"
            )));
        }
        if x.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(AnalysisError::Factorize(
                "input must be finite and non-negative".to_string(),
            ));
        }
        let mean = x.mean().unwrap_or(0.0);
        if mean <= 0.0 {
            return Err(AnalysisError::Factorize("input matrix is all zeros".to_string()));
        }

        // Scale random init so W·H starts near the magnitude of X
        let avg = (mean / self.n_components as f64).sqrt();
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut h = Array2::from_shape_fn((self.n_components, n_cols), |_| {
            avg * rng.random::<f64>() + EPSILON
        });
        let mut w = Array2::from_shape_fn((n_rows, self.n_components), |_| {
            avg * rng.random::<f64>() + EPSILON
        });

        let initial_err = frobenius_error(x, &w, &h);
        let mut previous_err = initial_err;
        let mut n_iter = 0;

        for iter in 1..=self.max_iter {
            n_iter = iter;

            // H ← H ∘ (Wᵀ X) / (Wᵀ W H)
            let numer = w.t().dot(x);
            let denom = w.t().dot(&w).dot(&h) + EPSILON;
            h = h * numer / denom;

            // W ← W ∘ (X Hᵀ) / (W H Hᵀ)
            let numer = x.dot(&h.t());
            let denom = w.dot(&h).dot(&h.t()) + EPSILON;
            w = w * numer / denom;

            if iter % CHECK_EVERY == 0 {
                let err = frobenius_error(x, &w, &h);
                if initial_err > 0.0 && (previous_err - err) / initial_err < self.tol {
                    break;
                }
                previous_err = err;
            }
        }

        if w.iter().chain(h.iter()).any(|v| !v.is_finite()) {
            return Err(AnalysisError::Factorize(
                "factorization diverged".to_string(),
            ));
        }

        let reconstruction_err = frobenius_error(x, &w, &h);
        Ok(Factorization {
            w,
            h,
            n_iter,
            reconstruction_err,
        })
    }
}

fn frobenius_error(x: &Array2<f64>, w: &Array2<f64>, h: &Array2<f64>) -> f64 {
    let approx = w.dot(h);
    x.iter()
        .zip(approx.iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt()
}

/// Indices of the `n` largest values, largest first. Ties keep the lower
/// index first.
pub fn top_indices(weights: &[f64], n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]).then(a.cmp(&b)));
    order.truncate(n);
    order
}
