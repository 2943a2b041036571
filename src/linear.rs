use crate::model::Regressor;
use crate::table::Table;
use ordered_float::OrderedFloat;
use thiserror::Error;

/// Ordinary least squares with an intercept term.
///
/// The coefficients are the exact minimizer of the summed squared residuals,
/// obtained by solving the normal equations with Gaussian elimination. A
/// rank-deficient feature matrix has no unique minimizer; fitting then fails
/// with [`LinearFitError::DegenerateInput`] instead of picking one.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression {
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LinearRegression {
    pub fn fit(table: &Table) -> Result<Self, LinearFitError> {
        let p = table.features_len();
        let dim = p + 1;

        // Normal equations with the intercept as an implicit leading
        // all-ones column: gram[j][k] = sum of phi_j * phi_k over the rows.
        let mut gram = vec![vec![0.0; dim]; dim];
        let mut rhs = vec![0.0; dim];

        gram[0][0] = table.rows_len() as f64;
        rhs[0] = table.target().sum();
        for j in 0..p {
            let s = table.feature(j).sum::<f64>();
            gram[0][j + 1] = s;
            gram[j + 1][0] = s;
            rhs[j + 1] = table
                .feature(j)
                .zip(table.target())
                .map(|(x, y)| x * y)
                .sum();
            for k in j..p {
                let s = table
                    .feature(j)
                    .zip(table.feature(k))
                    .map(|(a, b)| a * b)
                    .sum::<f64>();
                gram[j + 1][k + 1] = s;
                gram[k + 1][j + 1] = s;
            }
        }

        let mut theta = solve(gram, rhs)?;
        let intercept = theta.remove(0);
        Ok(Self {
            intercept,
            coefficients: theta,
        })
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

impl Regressor for LinearRegression {
    fn predict(&self, xs: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(xs.iter())
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

/// Gaussian elimination with partial pivoting.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>, LinearFitError> {
    let dim = b.len();
    let scale = a
        .iter()
        .flatten()
        .fold(1.0f64, |acc, &v| acc.max(v.abs()));

    for col in 0..dim {
        let pivot = (col..dim)
            .max_by_key(|&r| OrderedFloat(a[r][col].abs()))
            .expect("never fails");
        // Also trips on NaN entries.
        if !(a[pivot][col].abs() > scale * 1e-12) {
            return Err(LinearFitError::DegenerateInput);
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..dim {
            let factor = a[row][col] / a[col][col];
            for c in col..dim {
                a[row][c] -= factor * a[col][c];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; dim];
    for col in (0..dim).rev() {
        let mut v = b[col];
        for c in col + 1..dim {
            v -= a[col][c] * x[c];
        }
        x[col] = v / a[col][col];
    }
    Ok(x)
}

#[derive(Debug, Error, Clone)]
pub enum LinearFitError {
    #[error("feature matrix is rank deficient, the least squares solution is not unique")]
    DegenerateInput,
}
