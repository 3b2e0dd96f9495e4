use std::ops::Mul;

use ffnt::Z64;
use rug::{Integer, Rational};

use crate::{
    monomial::Monomial,
    poly::Polynomial,
    traits::{Conjugate, One, Zero},
};

macro_rules! impl_real_ring {
    ( $zero:expr, $one:expr; $( $x:ty ),* ) => {
        $(
            impl Zero for $x {
                fn zero() -> Self {
                    $zero
                }

                fn is_zero(&self) -> bool {
                    *self == $zero
                }
            }

            impl One for $x {
                fn one() -> Self {
                    $one
                }

                fn is_one(&self) -> bool {
                    *self == $one
                }
            }

            impl Conjugate for $x {
                fn conjugate(&self) -> Self {
                    self.clone()
                }
            }
        )*
    };
}

impl_real_ring!(0, 1; i8, i16, i32, i64, i128, isize);
impl_real_ring!(0., 1.; f32, f64);

impl Zero for Integer {
    fn zero() -> Self {
        Integer::new()
    }

    fn is_zero(&self) -> bool {
        *self == 0
    }
}

impl One for Integer {
    fn one() -> Self {
        Integer::from(1)
    }

    fn is_one(&self) -> bool {
        *self == 1
    }
}

impl Conjugate for Integer {
    fn conjugate(&self) -> Self {
        self.clone()
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Rational::new()
    }

    fn is_zero(&self) -> bool {
        *self == 0
    }
}

impl One for Rational {
    fn one() -> Self {
        Rational::from(1)
    }

    fn is_one(&self) -> bool {
        *self == 1
    }
}

impl Conjugate for Rational {
    fn conjugate(&self) -> Self {
        self.clone()
    }
}

impl<const P: u64> Zero for Z64<P> {
    fn zero() -> Self {
        <Z64<P> as num_traits::Zero>::zero()
    }

    fn is_zero(&self) -> bool {
        num_traits::Zero::is_zero(self)
    }
}

impl<const P: u64> One for Z64<P> {
    fn one() -> Self {
        <Z64<P> as num_traits::One>::one()
    }

    fn is_one(&self) -> bool {
        num_traits::One::is_one(self)
    }
}

impl<const P: u64> Conjugate for Z64<P> {
    fn conjugate(&self) -> Self {
        *self
    }
}

// scalar multiplication from either side
macro_rules! impl_scalar_mul {
    ( $( $x:ty ),* ) => {
        $(
            impl Mul<$x> for Polynomial<$x> {
                type Output = Polynomial<$x>;

                fn mul(self, rhs: $x) -> Self::Output {
                    self.scale(&rhs)
                }
            }

            impl<'a> Mul<$x> for &'a Polynomial<$x> {
                type Output = Polynomial<$x>;

                fn mul(self, rhs: $x) -> Self::Output {
                    self.scale(&rhs)
                }
            }

            impl Mul<Polynomial<$x>> for $x {
                type Output = Polynomial<$x>;

                fn mul(self, rhs: Polynomial<$x>) -> Self::Output {
                    rhs.scale(&self)
                }
            }

            impl<'a> Mul<&'a Polynomial<$x>> for $x {
                type Output = Polynomial<$x>;

                fn mul(self, rhs: &'a Polynomial<$x>) -> Self::Output {
                    rhs.scale(&self)
                }
            }

            impl Mul<$x> for Monomial {
                type Output = Polynomial<$x>;

                fn mul(self, rhs: $x) -> Self::Output {
                    self.scale(rhs)
                }
            }

            impl<'a> Mul<$x> for &'a Monomial {
                type Output = Polynomial<$x>;

                fn mul(self, rhs: $x) -> Self::Output {
                    self.clone().scale(rhs)
                }
            }

            impl Mul<Monomial> for $x {
                type Output = Polynomial<$x>;

                fn mul(self, rhs: Monomial) -> Self::Output {
                    rhs.scale(self)
                }
            }

            impl<'a> Mul<&'a Monomial> for $x {
                type Output = Polynomial<$x>;

                fn mul(self, rhs: &'a Monomial) -> Self::Output {
                    rhs.clone().scale(self)
                }
            }
        )*
    };
}

impl_scalar_mul!(i8, i16, i32, i64, i128, isize, f32, f64, Integer, Rational);

impl<const P: u64> Mul<Z64<P>> for Polynomial<Z64<P>> {
    type Output = Polynomial<Z64<P>>;

    fn mul(self, rhs: Z64<P>) -> Self::Output {
        self.scale(&rhs)
    }
}

impl<'a, const P: u64> Mul<Z64<P>> for &'a Polynomial<Z64<P>> {
    type Output = Polynomial<Z64<P>>;

    fn mul(self, rhs: Z64<P>) -> Self::Output {
        self.scale(&rhs)
    }
}

impl<const P: u64> Mul<Polynomial<Z64<P>>> for Z64<P> {
    type Output = Polynomial<Z64<P>>;

    fn mul(self, rhs: Polynomial<Z64<P>>) -> Self::Output {
        rhs.scale(&self)
    }
}

impl<'a, const P: u64> Mul<&'a Polynomial<Z64<P>>> for Z64<P> {
    type Output = Polynomial<Z64<P>>;

    fn mul(self, rhs: &'a Polynomial<Z64<P>>) -> Self::Output {
        rhs.scale(&self)
    }
}

impl<const P: u64> Mul<Z64<P>> for Monomial {
    type Output = Polynomial<Z64<P>>;

    fn mul(self, rhs: Z64<P>) -> Self::Output {
        self.scale(rhs)
    }
}

impl<'a, const P: u64> Mul<Z64<P>> for &'a Monomial {
    type Output = Polynomial<Z64<P>>;

    fn mul(self, rhs: Z64<P>) -> Self::Output {
        self.clone().scale(rhs)
    }
}

impl<const P: u64> Mul<Monomial> for Z64<P> {
    type Output = Polynomial<Z64<P>>;

    fn mul(self, rhs: Monomial) -> Self::Output {
        rhs.scale(self)
    }
}

impl<'a, const P: u64> Mul<&'a Monomial> for Z64<P> {
    type Output = Polynomial<Z64<P>>;

    fn mul(self, rhs: &'a Monomial) -> Self::Output {
        rhs.clone().scale(self)
    }
}
