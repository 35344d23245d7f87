use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{self, Write as _};

use crate::traits::FloatScalar;

use super::{Matrix, MatrixError, Op};

// ── Map / transpose ─────────────────────────────────────────────────

impl<T: Copy> Matrix<T> {
    /// Apply a function to every element, producing a new matrix.
    ///
    /// ```
    /// use cofactor::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0_f64, -4.0, 9.0, -16.0]);
    /// let r = m.map(|x: f64| x.abs());
    /// assert_eq!(r[(0, 1)], 4.0);
    /// ```
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Matrix<U> {
        Matrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Transpose: (M×N) → (N×M).
    ///
    /// ```
    /// use cofactor::Matrix;
    /// let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let t = a.transpose();
    /// assert_eq!(t.shape(), (3, 2));
    /// assert_eq!(t[(2, 0)], 3.0);
    /// ```
    pub fn transpose(&self) -> Self {
        Matrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }

    /// Copy of row `i`. Panics if `i` is out of range.
    pub fn row(&self, i: usize) -> Vec<T> {
        (0..self.ncols).map(|j| self[(i, j)]).collect()
    }

    /// Copy of column `j`. Panics if `j` is out of range.
    pub fn col(&self, j: usize) -> Vec<T> {
        assert!(j < self.ncols, "column {} out of bounds for {} columns", j, self.ncols);
        let start = j * self.nrows;
        self.data[start..start + self.nrows].to_vec()
    }
}

// ── Row-by-column dot product ───────────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// Dot product of row `i` of `self` with column `j` of `rhs`.
    ///
    /// This is entry `(i, j)` of `self * rhs`.
    ///
    /// ```
    /// use cofactor::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let b = Matrix::from_rows(2, 2, &[5.0, 6.0, 7.0, 8.0]);
    /// assert_eq!(a.dot(&b, 1, 0).unwrap(), 43.0);
    /// ```
    pub fn dot(&self, rhs: &Self, i: usize, j: usize) -> crate::Result<T> {
        if self.ncols != rhs.nrows {
            return Err(MatrixError::Shape {
                op: Op::Dot,
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }
        self.check_index(i, 0)?;
        rhs.check_index(0, j)?;
        Ok(self.dot_unchecked(rhs, i, j))
    }

    pub(crate) fn dot_unchecked(&self, rhs: &Self, i: usize, j: usize) -> T {
        let mut sum = T::zero();
        for k in 0..self.ncols {
            sum = sum + self[(i, k)] * rhs[(k, j)];
        }
        sum
    }
}

// ── Display ─────────────────────────────────────────────────────────

/// A single rendered entry. Zero (of either sign) is always `0.0`; other
/// values use the shortest round-trip form (`1.0`, `-2.5`, `1e-7`).
struct Entry<T>(T);

impl<T: FloatScalar> fmt::Display for Entry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == T::zero() {
            f.write_str("0.0")
        } else {
            write!(f, "{:?}", self.0)
        }
    }
}

/// Left and right border glyphs for row `i` of `m` rows.
fn borders(i: usize, m: usize) -> (char, char) {
    if m == 1 {
        ('[', ']')
    } else if i == 0 {
        ('┌', '┐')
    } else if i == m - 1 {
        ('└', '┘')
    } else {
        ('│', '│')
    }
}

impl<T: FloatScalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.nrows;
        let n = self.ncols;

        // Measure column widths
        let mut widths: Vec<usize> = alloc::vec![0; n];
        for (j, width) in widths.iter_mut().enumerate() {
            for i in 0..m {
                let w = WriteCounting::count(|wc| write!(wc, "{}", Entry(self[(i, j)])));
                *width = (*width).max(w);
            }
        }

        for i in 0..m {
            let (left, right) = borders(i, m);
            write!(f, "{} ", left)?;
            for (j, &width) in widths.iter().enumerate() {
                if j > 0 {
                    f.write_str("   ")?;
                }
                let entry = Entry(self[(i, j)]);
                let w = WriteCounting::count(|wc| write!(wc, "{}", entry));
                write!(f, "{}", entry)?;
                for _ in w..width {
                    f.write_char(' ')?;
                }
            }
            write!(f, " {}", right)?;
            if i < m - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Bracketed, column-aligned text form of the matrix.
    ///
    /// Same as `to_string()`.
    ///
    /// ```
    /// use cofactor::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, 0.0, -2.5, 10.0]);
    /// assert_eq!(m.render(), "┌ 1.0    0.0  ┐\n└ -2.5   10.0 ┘");
    /// ```
    pub fn render(&self) -> String {
        self.to_string()
    }
}

struct WriteCounting {
    count: usize,
}

impl WriteCounting {
    fn count(f: impl FnOnce(&mut Self) -> fmt::Result) -> usize {
        let mut wc = WriteCounting { count: 0 };
        let _ = f(&mut wc);
        wc.count
    }
}

impl fmt::Write for WriteCounting {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count += s.chars().count();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map() {
        let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let doubled = m.map(|x| x * 2.0);
        assert_eq!(doubled, Matrix::from_rows(2, 2, &[2.0, 4.0, 6.0, 8.0]));
    }

    #[test]
    fn transpose() {
        let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let t = a.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t[(0, 0)], 1.0);
        assert_eq!(t[(1, 0)], 2.0);
        assert_eq!(t[(2, 1)], 6.0);
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn row_col() {
        let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.row(0), vec![1.0, 2.0, 3.0]);
        assert_eq!(m.col(1), vec![2.0, 5.0]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn col_out_of_bounds() {
        let _ = Matrix::<f64>::zeros(2, 2).col(2);
    }

    #[test]
    fn dot() {
        let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = Matrix::from_rows(3, 1, &[1.0, 1.0, 1.0]);
        assert_eq!(a.dot(&b, 0, 0).unwrap(), 6.0);
        assert_eq!(a.dot(&b, 1, 0).unwrap(), 15.0);
        assert!(matches!(
            a.dot(&b, 2, 0),
            Err(MatrixError::Index { row: 2, .. })
        ));
        assert!(matches!(
            a.dot(&b, 0, 1),
            Err(MatrixError::Index { col: 1, .. })
        ));
        assert!(matches!(
            b.dot(&a, 0, 0),
            Err(MatrixError::Shape { op: Op::Dot, .. })
        ));
    }

    #[test]
    fn display_2x2() {
        let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(format!("{}", m), "┌ 1.0   2.0 ┐\n└ 3.0   4.0 ┘");
    }

    #[test]
    fn display_middle_rows() {
        let m = Matrix::<f64>::identity(3);
        let s = m.render();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "┌ 1.0   0.0   0.0 ┐");
        assert_eq!(lines[1], "│ 0.0   1.0   0.0 │");
        assert_eq!(lines[2], "└ 0.0   0.0   1.0 ┘");
    }

    #[test]
    fn display_single_row() {
        let m = Matrix::from_rows(1, 3, &[1.5, -2.0, 0.0]);
        assert_eq!(m.to_string(), "[ 1.5   -2.0   0.0 ]");
    }

    #[test]
    fn display_negative_zero() {
        let m = Matrix::from_rows(1, 2, &[-0.0, 1.0]);
        assert_eq!(m.render(), "[ 0.0   1.0 ]");
    }

    #[test]
    fn display_alignment() {
        let m = Matrix::from_rows(2, 2, &[1.0, 100.0, 1000.0, 2.0]);
        let s = format!("{}", m);
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines[0].chars().count(), lines[1].chars().count());
        assert_eq!(lines[0], "┌ 1.0      100.0 ┐");
        assert_eq!(lines[1], "└ 1000.0   2.0   ┘");
    }

    #[test]
    fn render_does_not_mutate() {
        let m = Matrix::from_rows(2, 1, &[0.5, 0.25]);
        let before = m.clone();
        let _ = m.render();
        assert_eq!(m, before);
    }
}
