use core::fmt::Debug;
use num_traits::float::FloatCore;
use num_traits::{Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for real floating-point matrix elements.
///
/// Covers `f32` and `f64`. Uses `FloatCore` so that no `libm` or `std`
/// math is needed; the cofactor algorithms only add, multiply and divide.
pub trait FloatScalar: Scalar + FloatCore {}

impl<T: Scalar + FloatCore> FloatScalar for T {}
