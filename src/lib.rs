//! Polynomials in noncommuting dichotomic variables
//!
//! A dichotomic variable is a generator squaring to one, identified by a
//! site and an integer token. Generators at different sites commute,
//! generators at the same site do not.
//!
//! ```
//! use dichotomic::{Monomial, Polynomial};
//!
//! let a1 = Monomial::var(0, 1);
//! let a2 = Monomial::var(0, 2);
//! let p: Polynomial<i64> = &a1 + &Polynomial::from(a2.clone());
//! assert_eq!((&p * &p).to_string(), "2 Id + A1 A2 + A2 A1");
//! ```

/// Utilities for tests and benchmarks
#[doc(hidden)]
pub mod _test_util;
mod coeff;
pub mod error;
/// Products of dichotomic variables
pub mod monomial;
/// Sparse polynomials
pub mod poly;
pub mod rand;
pub mod traits;

pub use error::Error;
pub use ffnt::Z64;
pub use monomial::Monomial;
pub use poly::{Operand, Polynomial};
pub use rug::{Integer, Rational};
