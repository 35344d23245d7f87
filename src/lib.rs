//! # cofactor
//!
//! Dense, real-valued matrix algebra with textbook algorithms. A single
//! heap-allocated [`Matrix<T>`] type with runtime dimensions, the usual
//! arithmetic operators, and the classical cofactor machinery: sub-matrices,
//! cofactors, determinants by Laplace expansion and inverses by the adjugate
//! method. `no_std` compatible (requires `alloc`).
//!
//! ## Quick start
//!
//! ```
//! use cofactor::Matrix;
//!
//! let a = Matrix::from_grid(&[
//!     [1.0_f64, 0.0, 2.0],
//!     [-1.0, 3.0, 1.0],
//!     [1.0, 1.0, 1.0],
//! ]).unwrap();
//!
//! assert_eq!(a.determinant().unwrap(), -6.0);
//!
//! let inv = a.inverse().unwrap();
//! let id = &a * &inv;
//! assert!((id[(0, 0)] - 1.0).abs() < 1e-12);
//! assert!(id[(0, 1)].abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`] — `Matrix<T>` with column-major `Vec<T>` storage. Arithmetic
//!   operators panic on incompatible shapes; every operator has a `try_*`
//!   twin returning [`MatrixError`]. Determinants and inverses are exact
//!   cofactor expansions, exponential in the dimension, so they are meant for
//!   small matrices.
//!
//! - [`traits`] — Element trait hierarchy:
//!   - [`Scalar`] — `Copy + PartialEq + Debug + Zero + One + Num`
//!   - [`FloatScalar`] — real floats (`f32`, `f64`), required by `Matrix`
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std`   | yes     | `std::error::Error` for [`MatrixError`], hardware float support in `num-traits` |
//!
//! ## Logging
//!
//! Determinant recursion and rejected inversions emit [`log`] records at
//! `trace` and `debug` level. The crate never installs a logger.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod matrix;
pub mod traits;

pub use matrix::{Matrix, MatrixError, Op};
pub use traits::{FloatScalar, Scalar};

/// Convenience alias for results carrying a [`MatrixError`].
pub type Result<T, E = MatrixError> = core::result::Result<T, E>;
