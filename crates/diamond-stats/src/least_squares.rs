//! Ordinary least squares via the normal equations.
//!
//! Given a design matrix `X` (one row per observation, intercept column
//! included by the caller) and a response vector `Y`, [`fit`] solves
//!
//! ```text
//! (XᵗX) β = Xᵗ Y
//! ```
//!
//! by Gaussian elimination with partial pivoting. A pivot that vanishes
//! relative to the largest diagonal entry of `XᵗX` means the system has no
//! unique solution, and the solve fails with
//! [`LeastSquaresError::SingularMatrix`] instead of producing NaN or
//! arbitrarily large coefficients.

/// Relative tolerance below which a pivot is treated as zero.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Errors reported by [`fit`].
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum LeastSquaresError {
    #[display("design matrix has {rows} rows but response has {responses} values")]
    LengthMismatch { rows: usize, responses: usize },
    #[display("design matrix row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("design matrix has no columns")]
    NoColumns,
    /// `XᵗX` is not invertible: too few observations or collinear columns.
    #[display("normal equations are singular (no usable pivot for column {column})")]
    SingularMatrix { column: usize },
}

/// Fits `response ≈ rows · β` and returns the unrounded coefficients `β`.
///
/// # Arguments
///
/// * `rows` - Design matrix rows; every row must have the same length
/// * `response` - One response value per row
///
/// # Errors
///
/// * [`LeastSquaresError::SingularMatrix`] - if `XᵗX` is singular, including
///   the case of fewer rows than columns
/// * [`LeastSquaresError::LengthMismatch`], [`LeastSquaresError::RaggedRow`],
///   [`LeastSquaresError::NoColumns`] - if the inputs are not a valid system
///
/// # Examples
///
/// ```
/// use diamond_stats::least_squares::{self, LeastSquaresError};
///
/// // Two identical predictor columns cannot be separated.
/// let rows = [[1.0, 2.0, 2.0], [1.0, 3.0, 3.0], [1.0, 5.0, 5.0], [1.0, 7.0, 7.0]];
/// let response = [1.0, 2.0, 3.0, 4.0];
/// assert!(matches!(
///     least_squares::fit(&rows, &response),
///     Err(LeastSquaresError::SingularMatrix { .. })
/// ));
/// ```
pub fn fit<R>(rows: &[R], response: &[f64]) -> Result<Vec<f64>, LeastSquaresError>
where
    R: AsRef<[f64]>,
{
    if rows.len() != response.len() {
        return Err(LeastSquaresError::LengthMismatch {
            rows: rows.len(),
            responses: response.len(),
        });
    }
    let width = rows.first().map_or(0, |row| row.as_ref().len());
    if width == 0 {
        return Err(LeastSquaresError::NoColumns);
    }
    if let Some((row, found)) = rows
        .iter()
        .map(|r| r.as_ref().len())
        .enumerate()
        .find(|(_, len)| *len != width)
    {
        return Err(LeastSquaresError::RaggedRow {
            row,
            expected: width,
            found,
        });
    }
    if rows.len() < width {
        return Err(LeastSquaresError::SingularMatrix { column: rows.len() });
    }

    let (gram, moment) = normal_equations(rows, response, width);
    solve(gram, moment)
}

/// Builds `XᵗX` and `XᵗY`.
fn normal_equations<R>(rows: &[R], response: &[f64], width: usize) -> (Vec<Vec<f64>>, Vec<f64>)
where
    R: AsRef<[f64]>,
{
    let mut gram = vec![vec![0.0; width]; width];
    let mut moment = vec![0.0; width];
    for (row, &y) in rows.iter().zip(response) {
        let row = row.as_ref();
        for i in 0..width {
            moment[i] += row[i] * y;
            for j in 0..width {
                gram[i][j] += row[i] * row[j];
            }
        }
    }
    (gram, moment)
}

/// Solves `a · x = b` in place by Gaussian elimination with partial pivoting.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>, LeastSquaresError> {
    let n = b.len();
    let scale = (0..n).map(|i| a[i][i].abs()).fold(0.0, f64::max);
    let tolerance = scale * PIVOT_TOLERANCE;

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        let pivot = a[pivot_row][col];
        if !pivot.is_finite() || pivot.abs() <= tolerance {
            return Err(LeastSquaresError::SingularMatrix { column: col });
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            let (upper, lower) = a.split_at_mut(row);
            for (dst, src) in lower[0][col..].iter_mut().zip(&upper[col][col..]) {
                *dst -= factor * src;
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail = (row + 1..n).map(|k| a[row][k] * x[k]).sum::<f64>();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}
