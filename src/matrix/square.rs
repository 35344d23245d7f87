use crate::traits::FloatScalar;

use super::{Matrix, MatrixError};

/// `(-1)^(row + col)`.
#[inline]
fn checkerboard<T: FloatScalar>(row: usize, col: usize) -> T {
    if (row + col) % 2 == 0 {
        T::one()
    } else {
        -T::one()
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Sum of diagonal elements.
    ///
    /// ```
    /// use cofactor::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(m.trace().unwrap(), 5.0);
    /// assert!(Matrix::<f64>::zeros(2, 3).trace().is_err());
    /// ```
    pub fn trace(&self) -> crate::Result<T> {
        self.check_square()?;
        let mut sum = T::zero();
        for i in 0..self.nrows {
            sum = sum + self[(i, i)];
        }
        Ok(sum)
    }

    /// The matrix with row `row` and column `col` removed.
    ///
    /// Works on any shape. Fails with [`MatrixError::Index`] if either index
    /// is out of range and with [`MatrixError::Empty`] if the result would
    /// have no rows or no columns.
    ///
    /// ```
    /// use cofactor::Matrix;
    /// let m = Matrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    /// let s = m.sub_matrix(1, 0).unwrap();
    /// assert_eq!(s, Matrix::from_rows(2, 2, &[2.0, 3.0, 8.0, 9.0]));
    /// ```
    pub fn sub_matrix(&self, row: usize, col: usize) -> crate::Result<Self> {
        self.check_index(row, col)?;
        if self.nrows == 1 || self.ncols == 1 {
            return Err(MatrixError::Empty {
                nrows: self.nrows - 1,
                ncols: self.ncols - 1,
            });
        }
        Ok(self.sub_matrix_unchecked(row, col))
    }

    fn sub_matrix_unchecked(&self, row: usize, col: usize) -> Self {
        Matrix::from_fn(self.nrows - 1, self.ncols - 1, |i, j| {
            let src_i = if i < row { i } else { i + 1 };
            let src_j = if j < col { j } else { j + 1 };
            self[(src_i, src_j)]
        })
    }

    /// Determinant of the sub-matrix with `row` and `col` removed.
    ///
    /// The minor of a 1×1 matrix is the determinant of the empty matrix, 1.
    pub fn minor(&self, row: usize, col: usize) -> crate::Result<T> {
        self.check_square()?;
        self.check_index(row, col)?;
        Ok(self.minor_unchecked(row, col))
    }

    fn minor_unchecked(&self, row: usize, col: usize) -> T {
        if self.nrows == 1 {
            T::one()
        } else {
            self.sub_matrix_unchecked(row, col).det_unchecked()
        }
    }

    /// Signed minor, `(-1)^(row + col) * minor(row, col)`.
    ///
    /// ```
    /// use cofactor::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(m.cofactor(0, 0).unwrap(), 4.0);
    /// assert_eq!(m.cofactor(0, 1).unwrap(), -3.0);
    /// assert!(m.cofactor(2, 0).is_err());
    /// ```
    pub fn cofactor(&self, row: usize, col: usize) -> crate::Result<T> {
        self.check_square()?;
        self.check_index(row, col)?;
        Ok(self.cofactor_unchecked(row, col))
    }

    fn cofactor_unchecked(&self, row: usize, col: usize) -> T {
        checkerboard::<T>(row, col) * self.minor_unchecked(row, col)
    }

    /// Determinant by Laplace expansion along the first column.
    ///
    /// 1×1 and 2×2 matrices are evaluated directly. Larger matrices recurse
    /// through cofactors without pivoting or memoization, so the cost grows
    /// factorially with the dimension.
    ///
    /// ```
    /// use cofactor::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(m.determinant().unwrap(), -2.0);
    /// ```
    pub fn determinant(&self) -> crate::Result<T> {
        self.check_square()?;
        Ok(self.det_unchecked())
    }

    fn det_unchecked(&self) -> T {
        let n = self.nrows;
        match n {
            1 => self[(0, 0)],
            2 => self[(0, 0)] * self[(1, 1)] - self[(1, 0)] * self[(0, 1)],
            _ => {
                log::trace!("laplace expansion of {}x{} matrix", n, n);
                let mut det = T::zero();
                for i in 0..n {
                    det = det + self[(i, 0)] * self.cofactor_unchecked(i, 0);
                }
                det
            }
        }
    }

    /// Whether the matrix is square with a determinant that is not exactly
    /// zero.
    ///
    /// There is no tolerance: a nearly singular matrix whose determinant
    /// rounds to a tiny non-zero value counts as invertible.
    pub fn is_invertible(&self) -> bool {
        self.is_square() && self.det_unchecked() != T::zero()
    }

    /// Matrix of cofactors, `C[i][j] = cofactor(i, j)`.
    pub fn cofactor_matrix(&self) -> crate::Result<Self> {
        self.check_square()?;
        Ok(Matrix::from_fn(self.nrows, self.ncols, |i, j| {
            self.cofactor_unchecked(i, j)
        }))
    }

    /// Classical adjugate, the transpose of the cofactor matrix.
    pub fn adjugate(&self) -> crate::Result<Self> {
        self.check_square()?;
        Ok(Matrix::from_fn(self.nrows, self.ncols, |i, j| {
            self.cofactor_unchecked(j, i)
        }))
    }

    /// Inverse by the adjugate method, `A⁻¹[i][j] = cofactor(j, i) / det(A)`.
    ///
    /// Fails with [`MatrixError::NotSquare`] for non-square input and with
    /// [`MatrixError::NonInvertible`] when the determinant is exactly zero.
    ///
    /// ```
    /// use cofactor::{Matrix, MatrixError};
    /// let m = Matrix::<f64>::from_rows(2, 2, &[4.0, 7.0, 2.0, 6.0]);
    /// let inv = m.inverse().unwrap();
    /// assert!((inv[(0, 0)] - 0.6).abs() < 1e-12);
    /// assert!((inv[(0, 1)] + 0.7).abs() < 1e-12);
    ///
    /// let singular = Matrix::from_rows(2, 2, &[1.0, 2.0, 2.0, 4.0]);
    /// assert_eq!(singular.inverse().unwrap_err(), MatrixError::NonInvertible);
    /// ```
    pub fn inverse(&self) -> crate::Result<Self> {
        self.check_square()?;
        let det = self.det_unchecked();
        if det == T::zero() {
            log::debug!("inverse: {}x{} matrix has zero determinant", self.nrows, self.ncols);
            return Err(MatrixError::NonInvertible);
        }
        let inv_det = T::one() / det;
        Ok(Matrix::from_fn(self.nrows, self.ncols, |i, j| {
            inv_det * self.cofactor_unchecked(j, i)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn assert_near(a: f64, b: f64, msg: &str) {
        assert!((a - b).abs() < TOL, "{}: {} vs {}", msg, a, b);
    }

    fn example_3x3() -> Matrix {
        Matrix::from_grid(&[[1.0, 0.0, 2.0], [-1.0, 3.0, 1.0], [1.0, 1.0, 1.0]]).unwrap()
    }

    #[test]
    fn trace() {
        assert_eq!(example_3x3().trace().unwrap(), 5.0);
        assert_eq!(
            Matrix::<f64>::zeros(3, 2).trace().unwrap_err(),
            MatrixError::NotSquare { nrows: 3, ncols: 2 }
        );
    }

    #[test]
    fn sub_matrix_every_position() {
        let m = Matrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(
            m.sub_matrix(0, 0).unwrap(),
            Matrix::from_rows(2, 2, &[5.0, 6.0, 8.0, 9.0])
        );
        assert_eq!(
            m.sub_matrix(1, 1).unwrap(),
            Matrix::from_rows(2, 2, &[1.0, 3.0, 7.0, 9.0])
        );
        assert_eq!(
            m.sub_matrix(2, 2).unwrap(),
            Matrix::from_rows(2, 2, &[1.0, 2.0, 4.0, 5.0])
        );
    }

    #[test]
    fn sub_matrix_rectangular() {
        let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let s = m.sub_matrix(0, 1).unwrap();
        assert_eq!(s, Matrix::from_rows(1, 2, &[4.0, 6.0]));
    }

    #[test]
    fn sub_matrix_bounds() {
        let m = Matrix::<f64>::identity(3);
        assert_eq!(
            m.sub_matrix(3, 0).unwrap_err(),
            MatrixError::Index {
                row: 3,
                col: 0,
                nrows: 3,
                ncols: 3
            }
        );
        assert!(m.sub_matrix(0, 3).is_err());
        assert_eq!(
            Matrix::<f64>::zeros(1, 4).sub_matrix(0, 0).unwrap_err(),
            MatrixError::Empty { nrows: 0, ncols: 3 }
        );
    }

    #[test]
    fn cofactor_signs() {
        let m = example_3x3();
        let c = m.cofactor_matrix().unwrap();
        let expected = Matrix::from_rows(
            3,
            3,
            &[2.0, 2.0, -4.0, 2.0, -1.0, -1.0, -6.0, -3.0, 3.0],
        );
        assert_eq!(c, expected);
        assert_eq!(m.cofactor(2, 1).unwrap(), -3.0);
        assert_eq!(m.minor(2, 1).unwrap(), 3.0);
    }

    #[test]
    fn cofactor_errors() {
        let rect = Matrix::<f64>::zeros(2, 3);
        assert!(matches!(
            rect.cofactor(0, 0),
            Err(MatrixError::NotSquare { .. })
        ));
        assert!(matches!(
            example_3x3().cofactor(0, 5),
            Err(MatrixError::Index { .. })
        ));
    }

    #[test]
    fn cofactor_1x1() {
        let m = Matrix::from_rows(1, 1, &[7.0]);
        assert_eq!(m.cofactor(0, 0).unwrap(), 1.0);
        assert_eq!(m.minor(0, 0).unwrap(), 1.0);
    }

    #[test]
    fn adjugate_is_transposed_cofactors() {
        let m = example_3x3();
        assert_eq!(
            m.adjugate().unwrap(),
            m.cofactor_matrix().unwrap().transpose()
        );
    }

    #[test]
    fn det_1x1() {
        assert_eq!(Matrix::from_rows(1, 1, &[-3.5]).determinant().unwrap(), -3.5);
    }

    #[test]
    fn det_2x2() {
        let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(m.determinant().unwrap(), -2.0);
    }

    #[test]
    fn det_3x3() {
        assert_eq!(example_3x3().determinant().unwrap(), -6.0);
    }

    #[test]
    fn det_4x4() {
        // Upper triangular: product of the diagonal
        let m = Matrix::from_rows(
            4,
            4,
            &[
                2.0, 1.0, 3.0, 4.0, //
                0.0, 3.0, 5.0, 1.0, //
                0.0, 0.0, 4.0, 2.0, //
                0.0, 0.0, 0.0, 5.0,
            ],
        );
        assert_eq!(m.determinant().unwrap(), 120.0);

        // Swapping two rows flips the sign
        let p = Matrix::from_rows(
            4,
            4,
            &[
                0.0, 3.0, 5.0, 1.0, //
                2.0, 1.0, 3.0, 4.0, //
                0.0, 0.0, 4.0, 2.0, //
                0.0, 0.0, 0.0, 5.0,
            ],
        );
        assert_eq!(p.determinant().unwrap(), -120.0);
    }

    #[test]
    fn det_identity() {
        for n in 1..=6 {
            assert_eq!(Matrix::<f64>::identity(n).determinant().unwrap(), 1.0);
        }
    }

    #[test]
    fn det_not_square() {
        assert_eq!(
            Matrix::<f64>::zeros(2, 3).determinant().unwrap_err(),
            MatrixError::NotSquare { nrows: 2, ncols: 3 }
        );
    }

    #[test]
    fn det_matches_transpose() {
        let m = Matrix::from_fn(4, 4, |i, j| ((i * 7 + j * 3) % 5) as f64 - 2.0);
        assert_eq!(m.determinant().unwrap(), m.transpose().determinant().unwrap());
    }

    #[test]
    fn invertible() {
        assert!(example_3x3().is_invertible());
        assert!(!Matrix::from_rows(2, 2, &[1.0, 2.0, 2.0, 4.0]).is_invertible());
        assert!(!Matrix::<f64>::zeros(2, 3).is_invertible());
        assert!(!Matrix::from_rows(1, 1, &[0.0]).is_invertible());
    }

    #[test]
    fn near_singular_is_invertible() {
        // det is a few ulps, not zero: no tolerance is applied
        let m = Matrix::<f64>::from_grid(&[[1.0, 2.0], [1.0, 2.0 + 1e-15]]).unwrap();
        let det = m.determinant().unwrap();
        assert!(det != 0.0);
        assert!(det.abs() < 1e-14);
        assert!(m.is_invertible());
        assert!(m.inverse().is_ok());
    }

    #[test]
    fn inverse_3x3() {
        let inv = example_3x3().inverse().unwrap();
        let expected = [
            [-1.0 / 3.0, -1.0 / 3.0, 1.0],
            [-1.0 / 3.0, 1.0 / 6.0, 0.5],
            [2.0 / 3.0, 1.0 / 6.0, -0.5],
        ];
        for i in 0..3 {
            for j in 0..3 {
                assert_near(inv[(i, j)], expected[i][j], "inverse entry");
            }
        }
    }

    #[test]
    fn inverse_round_trip() {
        let a = example_3x3();
        let inv = a.inverse().unwrap();
        let id = Matrix::<f64>::identity(3);
        for prod in [&a * &inv, &inv * &a] {
            for i in 0..3 {
                for j in 0..3 {
                    assert_near(prod[(i, j)], id[(i, j)], "A * A^-1");
                }
            }
        }
    }

    #[test]
    fn inverse_1x1() {
        let inv = Matrix::from_rows(1, 1, &[4.0]).inverse().unwrap();
        assert_eq!(inv[(0, 0)], 0.25);
    }

    #[test]
    fn inverse_errors() {
        assert_eq!(
            Matrix::from_rows(2, 2, &[1.0, 2.0, 2.0, 4.0]).inverse().unwrap_err(),
            MatrixError::NonInvertible
        );
        assert_eq!(
            Matrix::<f64>::zeros(3, 2).inverse().unwrap_err(),
            MatrixError::NotSquare { nrows: 3, ncols: 2 }
        );
    }

    #[test]
    fn inverse_f32() {
        let m = Matrix::<f32>::from_rows(2, 2, &[2.0, 0.0, 0.0, 8.0]);
        let inv = m.inverse().unwrap();
        assert_eq!(inv, Matrix::from_rows(2, 2, &[0.5, 0.0, 0.0, 0.125]));
    }
}
