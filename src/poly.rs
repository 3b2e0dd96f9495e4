use std::{
    collections::{hash_map::Entry, HashMap},
    fmt::{self, Display},
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
};

use itertools::Itertools;
use log::{debug, trace};
use num_traits::Pow;

use crate::{
    error::Error,
    monomial::Monomial,
    traits::{Conjugate, One, Ring, WithSites, Zero},
};

type TermMap<T> = HashMap<Monomial, T, ahash::RandomState>;

/// Sparse polynomial in dichotomic variables
///
/// Maps each monomial to its coefficient. Coefficients are never zero:
/// every operation removes terms that cancel.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Polynomial<T> {
    terms: TermMap<T>,
}

/// Right-hand side of polynomial arithmetic
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Operand<T> {
    Monomial(Monomial),
    Polynomial(Polynomial<T>),
    Scalar(T),
}

impl<T> From<Monomial> for Operand<T> {
    fn from(source: Monomial) -> Self {
        Self::Monomial(source)
    }
}

impl<T> From<Polynomial<T>> for Operand<T> {
    fn from(source: Polynomial<T>) -> Self {
        Self::Polynomial(source)
    }
}

impl<T: Ring> Operand<T> {
    pub fn into_poly(self) -> Polynomial<T> {
        match self {
            Self::Monomial(m) => m.into_poly(),
            Self::Polynomial(p) => p,
            Self::Scalar(c) => Polynomial::monomial(Monomial::identity(), c),
        }
    }
}

impl<T> Default for Polynomial<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Polynomial<T> {
    pub fn new() -> Self {
        Self {
            terms: TermMap::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Coefficient of `m`, `None` if it is zero
    pub fn get(&self, m: &Monomial) -> Option<&T> {
        self.terms.get(m)
    }

    /// Terms in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&Monomial, &T)> {
        self.terms.iter()
    }

    pub fn into_terms(self) -> impl Iterator<Item = (Monomial, T)> {
        self.terms.into_iter()
    }

    /// Terms in ascending monomial order
    pub fn sorted_terms(&self) -> Vec<(&Monomial, &T)> {
        self.terms
            .iter()
            .sorted_unstable_by(|a, b| a.0.cmp(b.0))
            .collect()
    }

    /// Highest order of any term, `None` for the zero polynomial
    pub fn degree(&self) -> Option<usize> {
        self.terms.keys().map(Monomial::order).max()
    }
}

impl<T: Zero> Polynomial<T> {
    /// Single-term polynomial `coeff * m`
    pub fn monomial(m: Monomial, coeff: T) -> Self {
        let mut terms = TermMap::default();
        if !coeff.is_zero() {
            terms.insert(m, coeff);
        }
        Self { terms }
    }

    fn from_raw_terms(terms: TermMap<T>) -> Self {
        debug_assert!(!terms.values().any(|c| c.is_zero()));
        Self { terms }
    }

    /// Map all coefficients through `f`, dropping those that become zero
    pub fn apply(&mut self, mut f: impl FnMut(T) -> T) {
        let terms = std::mem::take(&mut self.terms);
        self.terms = terms
            .into_iter()
            .filter_map(|(m, c)| {
                let c = f(c);
                if c.is_zero() {
                    None
                } else {
                    Some((m, c))
                }
            })
            .collect();
    }
}

impl<T: Ring> Polynomial<T> {
    /// Sum of the given terms
    ///
    /// Coefficients of repeated monomials are added up.
    pub fn from_terms(terms: impl IntoIterator<Item = (Monomial, T)>) -> Self {
        let mut res = Self::new();
        for (m, c) in terms {
            res.add_term(m, c);
        }
        res
    }

    fn add_term(&mut self, m: Monomial, coeff: T) {
        match self.terms.entry(m) {
            Entry::Occupied(mut entry) => {
                let sum = std::mem::replace(entry.get_mut(), T::zero()) + coeff;
                if sum.is_zero() {
                    entry.remove();
                } else {
                    *entry.get_mut() = sum;
                }
            }
            Entry::Vacant(entry) => {
                if !coeff.is_zero() {
                    entry.insert(coeff);
                }
            }
        }
    }

    /// Add `rhs` in place
    ///
    /// A scalar is added to the coefficient of the identity monomial.
    pub fn accumulate(&mut self, rhs: Operand<T>) -> &mut Self {
        match rhs {
            Operand::Monomial(m) => self.add_term(m, T::one()),
            Operand::Polynomial(p) => {
                for (m, c) in p.terms {
                    self.add_term(m, c)
                }
            }
            Operand::Scalar(c) => self.add_term(Monomial::identity(), c),
        }
        self
    }

    /// Multiply every coefficient on the right by `c`
    pub fn scale(&self, c: &T) -> Self {
        if c.is_zero() {
            return Self::new();
        }
        let mut res = self.clone();
        res.apply(|x| x * c.clone());
        res
    }

    pub fn mul_operand(&self, rhs: Operand<T>) -> Self {
        match rhs {
            Operand::Monomial(m) => self * &m,
            Operand::Polynomial(p) => self * &p,
            Operand::Scalar(c) => self.scale(&c),
        }
    }

    /// Raise to the power `k` by repeated squaring
    ///
    /// The accumulated result is always the left factor, so this agrees
    /// with `k`-fold multiplication even though monomials do not commute.
    pub fn powu(&self, mut k: u64) -> Self {
        let mut base = self.clone();
        let mut res = if k % 2 == 1 {
            self.clone()
        } else {
            Self::one()
        };
        k >>= 1;
        while k > 0 {
            base = &base * &base;
            trace!("Squared base has {} terms", base.len());
            if k % 2 == 1 {
                res = &res * &base;
            }
            k >>= 1;
        }
        res
    }

    pub fn try_pow(&self, k: i64) -> Result<Self, Error> {
        if k < 0 {
            return Err(Error::NegativeExponent(k));
        }
        Ok(self.powu(k as u64))
    }

    /// `conjugate(self) * self`
    pub fn sqr(&self) -> Self {
        &self.conjugate() * self
    }

    /// `conjugate(self)` multiplied on the right by each factor in turn
    pub fn conjx(&self, factors: impl IntoIterator<Item = Operand<T>>) -> Self {
        factors
            .into_iter()
            .fold(self.conjugate(), |acc, f| acc.mul_operand(f))
    }
}

impl<T: Ring> From<Monomial> for Polynomial<T> {
    fn from(source: Monomial) -> Self {
        source.into_poly()
    }
}

impl<T> Zero for Polynomial<T> {
    fn zero() -> Self {
        Self::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Zero + One> One for Polynomial<T> {
    fn one() -> Self {
        Self::monomial(Monomial::identity(), T::one())
    }

    fn is_one(&self) -> bool {
        self.len() == 1
            && matches!(self.get(&Monomial::identity()), Some(c) if c.is_one())
    }
}

impl<T: Ring> Conjugate for Polynomial<T> {
    fn conjugate(&self) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|(m, c)| (m.conjugate(), c.conjugate()))
            .collect();
        Self::from_raw_terms(terms)
    }
}

impl<T: Ring> AddAssign for Polynomial<T> {
    fn add_assign(&mut self, rhs: Polynomial<T>) {
        self.accumulate(rhs.into());
    }
}

impl<'a, T: Ring> AddAssign<&'a Polynomial<T>> for Polynomial<T> {
    fn add_assign(&mut self, rhs: &'a Polynomial<T>) {
        for (m, c) in rhs.iter() {
            self.add_term(m.clone(), c.clone())
        }
    }
}

impl<T: Ring> AddAssign<Monomial> for Polynomial<T> {
    fn add_assign(&mut self, rhs: Monomial) {
        self.accumulate(rhs.into());
    }
}

impl<'a, T: Ring> AddAssign<&'a Monomial> for Polynomial<T> {
    fn add_assign(&mut self, rhs: &'a Monomial) {
        self.add_term(rhs.clone(), T::one())
    }
}

impl<T: Ring> SubAssign for Polynomial<T> {
    fn sub_assign(&mut self, rhs: Polynomial<T>) {
        for (m, c) in rhs.terms {
            self.add_term(m, -c)
        }
    }
}

impl<'a, T: Ring> SubAssign<&'a Polynomial<T>> for Polynomial<T> {
    fn sub_assign(&mut self, rhs: &'a Polynomial<T>) {
        for (m, c) in rhs.iter() {
            self.add_term(m.clone(), -c.clone())
        }
    }
}

impl<T: Ring> SubAssign<Monomial> for Polynomial<T> {
    fn sub_assign(&mut self, rhs: Monomial) {
        self.add_term(rhs, -T::one())
    }
}

impl<'a, T: Ring> SubAssign<&'a Monomial> for Polynomial<T> {
    fn sub_assign(&mut self, rhs: &'a Monomial) {
        self.add_term(rhs.clone(), -T::one())
    }
}

macro_rules! impl_add_sub {
    ( $( $op:ident, $fn:ident, $op_assign:ident, $fn_assign:ident );* ) => {
        $(
            impl<T: Ring> $op for Polynomial<T> {
                type Output = Self;

                fn $fn(mut self, rhs: Polynomial<T>) -> Self::Output {
                    $op_assign::$fn_assign(&mut self, rhs);
                    self
                }
            }

            impl<'a, T: Ring> $op<&'a Polynomial<T>> for Polynomial<T> {
                type Output = Self;

                fn $fn(mut self, rhs: &'a Polynomial<T>) -> Self::Output {
                    $op_assign::$fn_assign(&mut self, rhs);
                    self
                }
            }

            impl<'a, 'b, T: Ring> $op<&'b Polynomial<T>> for &'a Polynomial<T> {
                type Output = Polynomial<T>;

                fn $fn(self, rhs: &'b Polynomial<T>) -> Self::Output {
                    $op::$fn(self.clone(), rhs)
                }
            }

            impl<T: Ring> $op<Monomial> for Polynomial<T> {
                type Output = Self;

                fn $fn(mut self, rhs: Monomial) -> Self::Output {
                    $op_assign::$fn_assign(&mut self, rhs);
                    self
                }
            }

            impl<'a, T: Ring> $op<&'a Monomial> for Polynomial<T> {
                type Output = Self;

                fn $fn(mut self, rhs: &'a Monomial) -> Self::Output {
                    $op_assign::$fn_assign(&mut self, rhs);
                    self
                }
            }

            impl<'a, 'b, T: Ring> $op<&'b Monomial> for &'a Polynomial<T> {
                type Output = Polynomial<T>;

                fn $fn(self, rhs: &'b Monomial) -> Self::Output {
                    $op::$fn(self.clone(), rhs)
                }
            }

            impl<T: Ring> $op<Polynomial<T>> for Monomial {
                type Output = Polynomial<T>;

                fn $fn(self, rhs: Polynomial<T>) -> Self::Output {
                    $op::$fn(self.into_poly::<T>(), rhs)
                }
            }

            impl<'a, 'b, T: Ring> $op<&'b Polynomial<T>> for &'a Monomial {
                type Output = Polynomial<T>;

                fn $fn(self, rhs: &'b Polynomial<T>) -> Self::Output {
                    $op::$fn(self.clone().into_poly::<T>(), rhs)
                }
            }
        )*
    };
}

impl_add_sub!(Add, add, AddAssign, add_assign; Sub, sub, SubAssign, sub_assign);

impl<T: Neg<Output = T>> Neg for Polynomial<T> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        let terms = self.terms.into_iter().map(|(m, c)| (m, -c)).collect();
        Self { terms }
    }
}

impl<'a, T: Ring> Neg for &'a Polynomial<T> {
    type Output = Polynomial<T>;

    fn neg(self) -> Self::Output {
        self.clone().neg()
    }
}

impl<'a, 'b, T: Ring> Mul<&'b Polynomial<T>> for &'a Polynomial<T> {
    type Output = Polynomial<T>;

    fn mul(self, rhs: &'b Polynomial<T>) -> Self::Output {
        debug!(
            "Multiplying polynomials with {} and {} terms",
            self.len(),
            rhs.len()
        );
        let mut res = Polynomial::new();
        for (lhs_m, lhs_c) in self.iter() {
            for (rhs_m, rhs_c) in rhs.iter() {
                res.add_term(lhs_m * rhs_m, lhs_c.clone() * rhs_c.clone());
            }
        }
        trace!(
            "{} products collected into {} terms",
            self.len() * rhs.len(),
            res.len()
        );
        res
    }
}

impl<'a, T: Ring> Mul<Polynomial<T>> for &'a Polynomial<T> {
    type Output = Polynomial<T>;

    fn mul(self, rhs: Polynomial<T>) -> Self::Output {
        self * &rhs
    }
}

impl<'a, T: Ring> Mul<&'a Polynomial<T>> for Polynomial<T> {
    type Output = Polynomial<T>;

    fn mul(self, rhs: &'a Polynomial<T>) -> Self::Output {
        &self * rhs
    }
}

impl<T: Ring> Mul for Polynomial<T> {
    type Output = Polynomial<T>;

    fn mul(self, rhs: Polynomial<T>) -> Self::Output {
        &self * &rhs
    }
}

impl<'a, 'b, T: Ring> Mul<&'b Monomial> for &'a Polynomial<T> {
    type Output = Polynomial<T>;

    fn mul(self, rhs: &'b Monomial) -> Self::Output {
        Polynomial::from_terms(self.iter().map(|(m, c)| (m * rhs, c.clone())))
    }
}

impl<T: Ring> Mul<Monomial> for Polynomial<T> {
    type Output = Polynomial<T>;

    fn mul(self, rhs: Monomial) -> Self::Output {
        &self * &rhs
    }
}

impl<'a, 'b, T: Ring> Mul<&'b Polynomial<T>> for &'a Monomial {
    type Output = Polynomial<T>;

    fn mul(self, rhs: &'b Polynomial<T>) -> Self::Output {
        Polynomial::from_terms(rhs.iter().map(|(m, c)| (self * m, c.clone())))
    }
}

impl<T: Ring> Mul<Polynomial<T>> for Monomial {
    type Output = Polynomial<T>;

    fn mul(self, rhs: Polynomial<T>) -> Self::Output {
        &self * &rhs
    }
}

impl<'a, T: Ring> Mul<Operand<T>> for &'a Polynomial<T> {
    type Output = Polynomial<T>;

    fn mul(self, rhs: Operand<T>) -> Self::Output {
        self.mul_operand(rhs)
    }
}

impl<T: Ring> Mul<Operand<T>> for Polynomial<T> {
    type Output = Polynomial<T>;

    fn mul(self, rhs: Operand<T>) -> Self::Output {
        self.mul_operand(rhs)
    }
}

impl<'a, T: Ring> Pow<u32> for &'a Polynomial<T> {
    type Output = Polynomial<T>;

    fn pow(self, k: u32) -> Self::Output {
        self.powu(k as u64)
    }
}

impl<'a, T: Ring> Pow<u64> for &'a Polynomial<T> {
    type Output = Polynomial<T>;

    fn pow(self, k: u64) -> Self::Output {
        self.powu(k)
    }
}

impl<T: Ring> Pow<u32> for Polynomial<T> {
    type Output = Polynomial<T>;

    fn pow(self, k: u32) -> Self::Output {
        self.powu(k as u64)
    }
}

pub struct FmtPolynomial<'a, 'b, T, S> {
    p: &'a Polynomial<T>,
    labels: &'b [S],
}

impl<'a, 'b, T: 'a, S: Display + 'b> WithSites<'a, &'b [S]> for Polynomial<T> {
    type Output = FmtPolynomial<'a, 'b, T, S>;

    fn with_sites(&'a self, labels: &'b [S]) -> Self::Output {
        FmtPolynomial { p: self, labels }
    }
}

impl<'a, 'b, T, S> Display for FmtPolynomial<'a, 'b, T, S>
where
    T: Display + One,
    S: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let terms = self.p.sorted_terms();
        if terms.is_empty() {
            return write!(f, "0");
        }
        for (n, (m, c)) in terms.into_iter().enumerate() {
            if n > 0 {
                write!(f, " + ")?;
            }
            if !c.is_one() {
                write!(f, "{c} ")?;
            }
            write!(f, "{}", m.with_sites(self.labels))?;
        }
        Ok(())
    }
}

impl<T: Display + One> Display for Polynomial<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: &[&str] = &[];
        self.with_sites(labels).fmt(f)
    }
}
