mod ops;
mod square;
mod util;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::traits::FloatScalar;

/// The binary operation that rejected a pair of shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    /// Row-by-column dot product ([`Matrix::dot`]).
    Dot,
}

impl core::fmt::Display for Op {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Op::Add => "add",
            Op::Sub => "subtract",
            Op::Mul => "multiply",
            Op::Div => "divide",
            Op::Dot => "dot",
        };
        f.write_str(name)
    }
}

/// Errors from matrix construction, arithmetic and decompositions.
///
/// Returned by the fallible constructors and by every `try_*` method.
/// The operator overloads panic with the same message instead.
///
/// ```
/// use cofactor::{Matrix, MatrixError};
///
/// let singular = Matrix::from_grid(&[[1.0_f64, 2.0], [2.0, 4.0]]).unwrap();
/// assert_eq!(singular.inverse().unwrap_err(), MatrixError::NonInvertible);
///
/// let wide = Matrix::<f64>::zeros(2, 3);
/// assert_eq!(
///     wide.determinant().unwrap_err(),
///     MatrixError::NotSquare { nrows: 2, ncols: 3 },
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// Operand shapes are incompatible for `op`.
    Shape {
        op: Op,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
    /// A construction grid has a row whose length differs from the first row.
    Jagged {
        row: usize,
        expected: usize,
        got: usize,
    },
    /// The operation is only defined for square matrices.
    NotSquare { nrows: usize, ncols: usize },
    /// The determinant is exactly zero.
    NonInvertible,
    /// A row or column index is out of range.
    Index {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },
    /// The input or the result would have a zero dimension.
    Empty { nrows: usize, ncols: usize },
}

impl MatrixError {
    /// Whether this is a shape error, either between two operands or in a
    /// construction grid.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, MatrixError::Shape { .. } | MatrixError::Jagged { .. })
    }
}

impl core::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            MatrixError::Shape { op, lhs, rhs } => write!(
                f,
                "{}: incompatible shapes {}x{} and {}x{}",
                op, lhs.0, lhs.1, rhs.0, rhs.1
            ),
            MatrixError::Jagged { row, expected, got } => write!(
                f,
                "jagged grid: row {} has {} entries, expected {}",
                row, got, expected
            ),
            MatrixError::NotSquare { nrows, ncols } => {
                write!(f, "matrix is not square ({}x{})", nrows, ncols)
            }
            MatrixError::NonInvertible => write!(f, "matrix is non-invertible"),
            MatrixError::Index {
                row,
                col,
                nrows,
                ncols,
            } => write!(
                f,
                "index ({}, {}) out of bounds for {}x{} matrix",
                row, col, nrows, ncols
            ),
            MatrixError::Empty { nrows, ncols } => {
                write!(f, "matrix dimensions must be positive, got {}x{}", nrows, ncols)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatrixError {}

/// Dense, heap-allocated matrix of real scalars.
///
/// Column-major `Vec<T>` storage with runtime dimensions. Both dimensions
/// are at least 1 and never change after construction; only the entries may
/// be mutated, and only through `&mut` access (`IndexMut`, [`scale_mut`],
/// the assigning operators).
///
/// [`scale_mut`]: Matrix::scale_mut
///
/// # Examples
///
/// ```
/// use cofactor::Matrix;
///
/// let a = Matrix::from_grid(&[[1.0_f64, 2.0], [3.0, 4.0]]).unwrap();
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.nrows(), 2);
/// assert_eq!(a.ncols(), 2);
///
/// let id = Matrix::<f64>::identity(3);
/// assert_eq!(id[(0, 0)], 1.0);
/// assert_eq!(id[(0, 1)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T = f64> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

/// Element count of an `nrows x ncols` matrix. Panics on a zero dimension or
/// if the count does not fit in `usize`.
fn assert_dims(nrows: usize, ncols: usize) -> usize {
    assert!(
        nrows > 0 && ncols > 0,
        "matrix dimensions must be positive, got {}x{}",
        nrows,
        ncols,
    );
    match nrows.checked_mul(ncols) {
        Some(len) => len,
        None => panic!("matrix dimensions {}x{} overflow usize", nrows, ncols),
    }
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// Create an `nrows x ncols` matrix of zeros.
    ///
    /// Panics if either dimension is zero.
    ///
    /// ```
    /// use cofactor::Matrix;
    /// let m = Matrix::<f64>::zeros(2, 3);
    /// assert_eq!(m.nrows(), 2);
    /// assert_eq!(m.ncols(), 3);
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        let len = assert_dims(nrows, ncols);
        Self {
            data: vec![T::zero(); len],
            nrows,
            ncols,
        }
    }

    /// Create an `n x n` identity matrix.
    ///
    /// Panics if `n` is zero.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Create a matrix from a grid of rows.
    ///
    /// Accepts anything that is a slice of row slices: `&[[T; N]]`,
    /// `&[Vec<T>]`, `&[&[T]]`. Every row must have the length of the first.
    ///
    /// ```
    /// use cofactor::{Matrix, MatrixError};
    ///
    /// let m = Matrix::from_grid(&[[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
    /// assert_eq!(m[(1, 0)], 4.0);
    ///
    /// let jagged = Matrix::from_grid(&[vec![1.0_f64, 2.0], vec![3.0]]);
    /// assert_eq!(
    ///     jagged.unwrap_err(),
    ///     MatrixError::Jagged { row: 1, expected: 2, got: 1 },
    /// );
    /// ```
    pub fn from_grid<R: AsRef<[T]>>(grid: &[R]) -> crate::Result<Self> {
        let nrows = grid.len();
        let ncols = grid.first().map_or(0, |r| r.as_ref().len());
        if nrows == 0 || ncols == 0 {
            return Err(MatrixError::Empty { nrows, ncols });
        }
        for (i, row) in grid.iter().enumerate().skip(1) {
            let got = row.as_ref().len();
            if got != ncols {
                return Err(MatrixError::Jagged {
                    row: i,
                    expected: ncols,
                    got,
                });
            }
        }
        Ok(Self::from_fn(nrows, ncols, |i, j| grid[i].as_ref()[j]))
    }

    /// Create a matrix from a flat slice in row-major order.
    ///
    /// Panics if `row_major.len() != nrows * ncols`, a dimension is zero or the
    /// element count overflows `usize`.
    ///
    /// ```
    /// use cofactor::Matrix;
    /// let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m[(0, 2)], 3.0);
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[T]) -> Self {
        let len = assert_dims(nrows, ncols);
        assert_eq!(
            row_major.len(),
            len,
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            nrows,
            ncols,
        );
        Self::from_fn(nrows, ncols, |i, j| row_major[i * ncols + j])
    }
}

impl<T> Matrix<T> {
    /// Create a matrix by calling `f(row, col)` for each element.
    ///
    /// Panics if either dimension is zero.
    ///
    /// ```
    /// use cofactor::Matrix;
    /// let m = Matrix::from_fn(3, 3, |i, j| (i * 3 + j) as f64);
    /// assert_eq!(m[(1, 1)], 4.0);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let len = assert_dims(nrows, ncols);
        let mut data = Vec::with_capacity(len);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// `(rows, columns)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Whether both matrices have the same number of rows and columns.
    #[inline]
    pub fn same_shape<U>(&self, other: &Matrix<U>) -> bool {
        self.nrows == other.nrows && self.ncols == other.ncols
    }

    /// Checked element access.
    ///
    /// ```
    /// use cofactor::Matrix;
    /// let m = Matrix::<f64>::identity(2);
    /// assert_eq!(m.get(1, 1), Some(&1.0));
    /// assert_eq!(m.get(2, 0), None);
    /// ```
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.nrows && col < self.ncols {
            Some(&self.data[col * self.nrows + row])
        } else {
            None
        }
    }

    /// All entries in column-major storage order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn check_index(&self, row: usize, col: usize) -> crate::Result<()> {
        if row < self.nrows && col < self.ncols {
            Ok(())
        } else {
            Err(MatrixError::Index {
                row,
                col,
                nrows: self.nrows,
                ncols: self.ncols,
            })
        }
    }

    pub(crate) fn check_square(&self) -> crate::Result<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(MatrixError::NotSquare {
                nrows: self.nrows,
                ncols: self.ncols,
            })
        }
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.nrows && col < self.ncols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.nrows,
            self.ncols,
        );
        &self.data[col * self.nrows + row]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.nrows && col < self.ncols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.nrows,
            self.ncols,
        );
        &mut self.data[col * self.nrows + row]
    }
}

// ── Conversions ─────────────────────────────────────────────────────

impl<T: FloatScalar> TryFrom<Vec<Vec<T>>> for Matrix<T> {
    type Error = MatrixError;

    /// ```
    /// use cofactor::Matrix;
    /// let m: Matrix = vec![vec![1.0, 2.0], vec![3.0, 4.0]].try_into().unwrap();
    /// assert_eq!(m[(1, 1)], 4.0);
    /// ```
    fn try_from(grid: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        Self::from_grid(&grid)
    }
}

impl<T: FloatScalar> TryFrom<&[Vec<T>]> for Matrix<T> {
    type Error = MatrixError;

    fn try_from(grid: &[Vec<T>]) -> Result<Self, Self::Error> {
        Self::from_grid(grid)
    }
}
