use std::ops::{Add, Mul, Neg};

// custom Zero trait that doesn't require Add
pub trait Zero {
    fn zero() -> Self;
    fn is_zero(&self) -> bool;
}

// custom One trait that doesn't require Mul
pub trait One {
    fn one() -> Self;
    fn is_one(&self) -> bool;
}

/// Adjoint operation
///
/// For real coefficient rings this is the identity. For monomials it
/// reverses the word at each site, for polynomials it conjugates keys
/// and coefficients term by term.
pub trait Conjugate {
    fn conjugate(&self) -> Self;
}

/// Coefficient ring of a [Polynomial](crate::Polynomial)
///
/// Coefficients are multiplied in the order in which the terms they
/// belong to are multiplied, but the engine otherwise assumes that
/// multiplication of coefficients commutes.
pub trait Ring:
    Clone
    + PartialEq
    + Zero
    + One
    + Conjugate
    + Add<Output = Self>
    + Neg<Output = Self>
    + Mul<Output = Self>
{
}

impl<T> Ring for T where
    T: Clone
        + PartialEq
        + Zero
        + One
        + Conjugate
        + Add<Output = Self>
        + Neg<Output = Self>
        + Mul<Output = Self>
{
}

/// Format with custom site labels
pub trait WithSites<'a, S> {
    type Output;

    fn with_sites(&'a self, labels: S) -> Self::Output;
}
