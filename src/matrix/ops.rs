use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::traits::FloatScalar;

use super::{Matrix, MatrixError, Op};

/// Unwrap an arithmetic result, panicking with the error message.
///
/// Operators have no way to return an error, so a failed precondition is a
/// programmer error, the same as an out-of-bounds index.
#[track_caller]
fn or_panic<T>(r: crate::Result<T>) -> T {
    match r {
        Ok(v) => v,
        Err(e) => panic!("{}", e),
    }
}

// ── Named, fallible forms ───────────────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    fn check_same_shape(&self, rhs: &Self, op: Op) -> crate::Result<()> {
        if self.same_shape(rhs) {
            Ok(())
        } else {
            Err(MatrixError::Shape {
                op,
                lhs: self.shape(),
                rhs: rhs.shape(),
            })
        }
    }

    fn zip_with(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Self {
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Matrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    pub(crate) fn mul_unchecked(&self, rhs: &Self) -> Self {
        Matrix::from_fn(self.nrows, rhs.ncols, |i, j| self.dot_unchecked(rhs, i, j))
    }

    /// Element-wise sum.
    ///
    /// ```
    /// use cofactor::{Matrix, MatrixError, Op};
    /// let a = Matrix::from_rows(1, 2, &[1.0, 2.0]);
    /// let b = Matrix::from_rows(1, 2, &[10.0, 20.0]);
    /// assert_eq!(a.try_add(&b).unwrap(), Matrix::from_rows(1, 2, &[11.0, 22.0]));
    ///
    /// let c = Matrix::<f64>::zeros(2, 1);
    /// assert_eq!(
    ///     a.try_add(&c).unwrap_err(),
    ///     MatrixError::Shape { op: Op::Add, lhs: (1, 2), rhs: (2, 1) },
    /// );
    /// ```
    pub fn try_add(&self, rhs: &Self) -> crate::Result<Self> {
        self.check_same_shape(rhs, Op::Add)?;
        Ok(self.zip_with(rhs, |a, b| a + b))
    }

    /// Element-wise difference, `self + (-rhs)`.
    pub fn try_sub(&self, rhs: &Self) -> crate::Result<Self> {
        self.check_same_shape(rhs, Op::Sub)?;
        Ok(self.zip_with(rhs, |a, b| a + -b))
    }

    /// Every entry multiplied by `k`. Returns a new matrix.
    ///
    /// ```
    /// use cofactor::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let b = a.scale(2.0);
    /// assert_eq!(b[(1, 1)], 8.0);
    /// assert_eq!(a[(1, 1)], 4.0);
    /// ```
    pub fn scale(&self, k: T) -> Self {
        self.map(|x| x * k)
    }

    /// Multiply every entry by `k` in place.
    pub fn scale_mut(&mut self, k: T) {
        for x in self.data.iter_mut() {
            *x = *x * k;
        }
    }

    /// `self` scaled by −1.
    pub fn negate(&self) -> Self {
        self.scale(-T::one())
    }

    /// Unary plus: returns the matrix unchanged.
    #[inline]
    pub fn plus(self) -> Self {
        self
    }

    /// Matrix product: `(M×N) * (N×P) → (M×P)`.
    ///
    /// ```
    /// use cofactor::Matrix;
    /// let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let b = Matrix::from_rows(3, 1, &[1.0, 0.0, -1.0]);
    /// let c = a.try_mul(&b).unwrap();
    /// assert_eq!(c.shape(), (2, 1));
    /// assert_eq!(c[(0, 0)], -2.0);
    /// assert!(b.try_mul(&a).is_err());
    /// ```
    pub fn try_mul(&self, rhs: &Self) -> crate::Result<Self> {
        if self.ncols != rhs.nrows {
            return Err(MatrixError::Shape {
                op: Op::Mul,
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }
        Ok(self.mul_unchecked(rhs))
    }

    /// `self` scaled by `1 / k`. Division by zero follows IEEE semantics.
    pub fn div_scalar(&self, k: T) -> Self {
        self.scale(T::one() / k)
    }

    /// `self * rhs⁻¹`.
    ///
    /// Fails with [`MatrixError::NonInvertible`] when `rhs` is not square or
    /// has a zero determinant. The divisor is checked first, so a singular
    /// `rhs` reports `NonInvertible` even when the inner dimensions also
    /// disagree. Only an invertible `rhs` of the wrong size gives
    /// [`MatrixError::Shape`].
    ///
    /// ```
    /// use cofactor::{Matrix, MatrixError};
    /// let a = Matrix::from_rows(2, 2, &[2.0, 4.0, 6.0, 8.0]);
    /// let b = Matrix::from_rows(2, 2, &[2.0, 0.0, 0.0, 2.0]);
    /// assert_eq!(a.try_div(&b).unwrap(), Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]));
    ///
    /// let singular = Matrix::from_rows(2, 2, &[1.0, 2.0, 2.0, 4.0]);
    /// assert_eq!(a.try_div(&singular).unwrap_err(), MatrixError::NonInvertible);
    /// ```
    pub fn try_div(&self, rhs: &Self) -> crate::Result<Self> {
        let inv = match rhs.inverse() {
            Ok(inv) => inv,
            Err(e) => {
                log::debug!("divide: {}x{} divisor rejected: {}", rhs.nrows, rhs.ncols, e);
                return Err(MatrixError::NonInvertible);
            }
        };
        if self.ncols != inv.nrows {
            return Err(MatrixError::Shape {
                op: Op::Div,
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }
        Ok(self.mul_unchecked(&inv))
    }

    /// `k / self`, i.e. `k * self⁻¹`.
    pub fn try_rdiv(&self, k: T) -> crate::Result<Self> {
        Ok(self.inverse()?.scale(k))
    }
}

// ── Element-wise addition ───────────────────────────────────────────

impl<T: FloatScalar> Add for Matrix<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        &self + &rhs
    }
}

impl<T: FloatScalar> Add<&Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;
    fn add(self, rhs: &Matrix<T>) -> Matrix<T> {
        &self + rhs
    }
}

impl<T: FloatScalar> Add<Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    fn add(self, rhs: Matrix<T>) -> Matrix<T> {
        self + &rhs
    }
}

impl<T: FloatScalar> Add<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    #[track_caller]
    fn add(self, rhs: &Matrix<T>) -> Matrix<T> {
        or_panic(self.try_add(rhs))
    }
}

impl<T: FloatScalar> AddAssign for Matrix<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.add_assign(&rhs);
    }
}

impl<T: FloatScalar> AddAssign<&Matrix<T>> for Matrix<T> {
    #[track_caller]
    fn add_assign(&mut self, rhs: &Matrix<T>) {
        or_panic(self.check_same_shape(rhs, Op::Add));
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = *a + b;
        }
    }
}

// ── Element-wise subtraction ────────────────────────────────────────

impl<T: FloatScalar> Sub for Matrix<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        &self - &rhs
    }
}

impl<T: FloatScalar> Sub<&Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;
    fn sub(self, rhs: &Matrix<T>) -> Matrix<T> {
        &self - rhs
    }
}

impl<T: FloatScalar> Sub<Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    fn sub(self, rhs: Matrix<T>) -> Matrix<T> {
        self - &rhs
    }
}

impl<T: FloatScalar> Sub<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    #[track_caller]
    fn sub(self, rhs: &Matrix<T>) -> Matrix<T> {
        or_panic(self.try_sub(rhs))
    }
}

impl<T: FloatScalar> SubAssign for Matrix<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.sub_assign(&rhs);
    }
}

impl<T: FloatScalar> SubAssign<&Matrix<T>> for Matrix<T> {
    #[track_caller]
    fn sub_assign(&mut self, rhs: &Matrix<T>) {
        or_panic(self.check_same_shape(rhs, Op::Sub));
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = *a - b;
        }
    }
}

// ── Negation ────────────────────────────────────────────────────────

impl<T: FloatScalar> Neg for Matrix<T> {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.scale_mut(-T::one());
        self
    }
}

impl<T: FloatScalar> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        self.negate()
    }
}

// ── Matrix multiplication: (M×N) * (N×P) → (M×P) ──────────────────

impl<T: FloatScalar> Mul for Matrix<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl<T: FloatScalar> Mul<&Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;
    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        &self * rhs
    }
}

impl<T: FloatScalar> Mul<Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    fn mul(self, rhs: Matrix<T>) -> Matrix<T> {
        self * &rhs
    }
}

impl<T: FloatScalar> Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    #[track_caller]
    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        or_panic(self.try_mul(rhs))
    }
}

// ── Scalar multiplication: matrix * scalar ──────────────────────────

impl<T: FloatScalar> Mul<T> for Matrix<T> {
    type Output = Self;

    fn mul(mut self, rhs: T) -> Self {
        self.scale_mut(rhs);
        self
    }
}

impl<T: FloatScalar> Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Matrix<T> {
        self.scale(rhs)
    }
}

impl<T: FloatScalar> MulAssign<T> for Matrix<T> {
    fn mul_assign(&mut self, rhs: T) {
        self.scale_mut(rhs);
    }
}

// ── Division: matrix / scalar, matrix / matrix ──────────────────────

impl<T: FloatScalar> Div<T> for Matrix<T> {
    type Output = Self;

    fn div(mut self, rhs: T) -> Self {
        self.scale_mut(T::one() / rhs);
        self
    }
}

impl<T: FloatScalar> Div<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn div(self, rhs: T) -> Matrix<T> {
        self.div_scalar(rhs)
    }
}

impl<T: FloatScalar> DivAssign<T> for Matrix<T> {
    fn div_assign(&mut self, rhs: T) {
        self.scale_mut(T::one() / rhs);
    }
}

impl<T: FloatScalar> Div for Matrix<T> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        &self / &rhs
    }
}

impl<T: FloatScalar> Div<&Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;
    fn div(self, rhs: &Matrix<T>) -> Matrix<T> {
        &self / rhs
    }
}

impl<T: FloatScalar> Div<Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    fn div(self, rhs: Matrix<T>) -> Matrix<T> {
        self / &rhs
    }
}

impl<T: FloatScalar> Div<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;
    #[track_caller]
    fn div(self, rhs: &Matrix<T>) -> Matrix<T> {
        or_panic(self.try_div(rhs))
    }
}

// ── scalar * matrix, scalar / matrix (concrete impls) ───────────────

macro_rules! impl_scalar_lhs {
    ($($t:ty),*) => {
        $(
            impl Mul<Matrix<$t>> for $t {
                type Output = Matrix<$t>;
                fn mul(self, rhs: Matrix<$t>) -> Matrix<$t> {
                    rhs * self
                }
            }

            impl Mul<&Matrix<$t>> for $t {
                type Output = Matrix<$t>;
                fn mul(self, rhs: &Matrix<$t>) -> Matrix<$t> {
                    rhs * self
                }
            }

            impl Div<Matrix<$t>> for $t {
                type Output = Matrix<$t>;
                #[track_caller]
                fn div(self, rhs: Matrix<$t>) -> Matrix<$t> {
                    self / &rhs
                }
            }

            impl Div<&Matrix<$t>> for $t {
                type Output = Matrix<$t>;
                #[track_caller]
                fn div(self, rhs: &Matrix<$t>) -> Matrix<$t> {
                    or_panic(rhs.try_rdiv(self))
                }
            }
        )*
    };
}

impl_scalar_lhs!(f32, f64);

// ── Integer scalars, converted to the element type ──────────────────

macro_rules! impl_int_scalar {
    ($i:ty => $($t:ty),*) => {
        $(
            impl Mul<$i> for Matrix<$t> {
                type Output = Matrix<$t>;
                fn mul(self, rhs: $i) -> Matrix<$t> {
                    self * rhs as $t
                }
            }

            impl Mul<$i> for &Matrix<$t> {
                type Output = Matrix<$t>;
                fn mul(self, rhs: $i) -> Matrix<$t> {
                    self * rhs as $t
                }
            }

            impl Div<$i> for Matrix<$t> {
                type Output = Matrix<$t>;
                fn div(self, rhs: $i) -> Matrix<$t> {
                    self / rhs as $t
                }
            }

            impl Div<$i> for &Matrix<$t> {
                type Output = Matrix<$t>;
                fn div(self, rhs: $i) -> Matrix<$t> {
                    self / rhs as $t
                }
            }

            impl Mul<Matrix<$t>> for $i {
                type Output = Matrix<$t>;
                fn mul(self, rhs: Matrix<$t>) -> Matrix<$t> {
                    rhs * self as $t
                }
            }

            impl Mul<&Matrix<$t>> for $i {
                type Output = Matrix<$t>;
                fn mul(self, rhs: &Matrix<$t>) -> Matrix<$t> {
                    rhs * self as $t
                }
            }

            impl Div<Matrix<$t>> for $i {
                type Output = Matrix<$t>;
                #[track_caller]
                fn div(self, rhs: Matrix<$t>) -> Matrix<$t> {
                    self as $t / &rhs
                }
            }

            impl Div<&Matrix<$t>> for $i {
                type Output = Matrix<$t>;
                #[track_caller]
                fn div(self, rhs: &Matrix<$t>) -> Matrix<$t> {
                    self as $t / rhs
                }
            }
        )*
    };
}

impl_int_scalar!(i32 => f32, f64);
