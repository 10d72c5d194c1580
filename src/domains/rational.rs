//! The field of rational numbers, backed by [rug].

use std::cmp::Ordering;

use rug::Rational;

use super::{ExpressionRing, Field, InternalOrdering, Replacements, Ring};

/// The field of rational numbers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RationalField;

/// The field of rational numbers.
pub const Q: RationalField = RationalField;

impl InternalOrdering for Rational {
    fn internal_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Ring for RationalField {
    type Element = Rational;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Rational::from(a + b)
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Rational::from(a - b)
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Rational::from(a * b)
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a += b;
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a -= b;
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a *= b;
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a += Rational::from(b * c);
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a -= Rational::from(b * c);
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        Rational::from(-a)
    }

    fn zero(&self) -> Self::Element {
        Rational::new()
    }

    fn one(&self) -> Self::Element {
        Rational::from(1)
    }

    fn nth(&self, n: i64) -> Self::Element {
        Rational::from(n)
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        // binary exponentiation; rug's Pow is only defined for u32 exponents
        let mut res = self.one();
        let mut base = b.clone();
        let mut e = e;
        while e > 0 {
            if e & 1 == 1 {
                res *= &base;
            }
            e >>= 1;
            if e > 0 {
                base = Rational::from(&base * &base);
            }
        }
        res
    }

    fn is_zero(a: &Self::Element) -> bool {
        *a == 0
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        *a == 1
    }
}

impl Field for RationalField {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Rational::from(a / b)
    }

    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a /= b;
    }

    fn inv(&self, a: &Self::Element) -> Self::Element {
        Rational::from(a.recip_ref())
    }
}

impl ExpressionRing for RationalField {
    fn expand(&self, e: &Self::Element) -> Self::Element {
        e.clone()
    }

    fn normal(&self, e: &Self::Element) -> Self::Element {
        e.clone()
    }

    fn is_numeric(&self, _e: &Self::Element) -> bool {
        true
    }

    fn is_rational_function(&self, _e: &Self::Element) -> bool {
        false
    }

    fn to_rational(
        &self,
        e: &Self::Element,
        _repl: &mut Replacements<Self>,
    ) -> (Self::Element, Self::Element) {
        (e.clone(), self.one())
    }

    fn substitute(
        &self,
        e: &Self::Element,
        _repl: &[(Self::Element, Self::Element)],
    ) -> Self::Element {
        e.clone()
    }

    fn cmp_abs(&self, a: &Self::Element, b: &Self::Element) -> Option<Ordering> {
        Some(Rational::from(a.abs_ref()).cmp(&Rational::from(b.abs_ref())))
    }

    fn to_i64(&self, e: &Self::Element) -> Option<i64> {
        if e.is_integer() {
            e.numer().to_i64()
        } else {
            None
        }
    }

    fn conjugate(&self, e: &Self::Element) -> Self::Element {
        e.clone()
    }

    fn real_part(&self, e: &Self::Element) -> Self::Element {
        e.clone()
    }

    fn imag_part(&self, _e: &Self::Element) -> Self::Element {
        self.zero()
    }
}

#[cfg(test)]
mod test {
    use super::{Q, RationalField};
    use crate::domains::{ExpressionRing, Field, Ring};
    use rug::Rational;

    #[test]
    fn arithmetic() {
        let a = Rational::from((3, 4));
        let b = Rational::from((1, 4));

        assert_eq!(Q.add(&a, &b), 1);
        assert_eq!(Q.sub(&a, &b), Rational::from((1, 2)));
        assert_eq!(Q.mul(&a, &b), Rational::from((3, 16)));
        assert_eq!(Q.div(&a, &b), 3);
        assert_eq!(Q.inv(&a), Rational::from((4, 3)));
        assert_eq!(Q.pow(&a, 3), Rational::from((27, 64)));

        let mut c = Q.zero();
        Q.add_mul_assign(&mut c, &a, &b);
        assert_eq!(c, Rational::from((3, 16)));
    }

    #[test]
    fn classification() {
        let a = Rational::from((-7, 2));
        assert!(Q.is_numeric(&a));
        assert!(!Q.is_rational_function(&a));
        assert_eq!(Q.to_i64(&a), None);
        assert_eq!(Q.to_i64(&Rational::from(-7)), Some(-7));
        assert_eq!(
            Q.cmp_abs(&a, &Rational::from(3)),
            Some(std::cmp::Ordering::Greater)
        );
        assert!(RationalField::is_zero(&Q.imag_part(&a)));
    }
}
