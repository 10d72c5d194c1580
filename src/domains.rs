//! Defines the algebraic traits that matrix entries must satisfy.
//!
//! The core trait is [Ring], which has two binary operations, addition and
//! multiplication. Each ring has an associated element type that should not be
//! confused with the ring type itself: the ring of rational numbers
//! [Q](rational::Q) has elements of type [Rational](rug::Rational), and the
//! reference expression domain [EX](expression::EX) has elements of type
//! [Expr](expression::Expr).
//!
//! Ring elements do not implement arithmetic themselves; the ring does. All
//! matrix operations are generic over the ring type.
//!
//! [Field] extends [Ring] with division and inversion. [ExpressionRing]
//! extends [Field] with the operations the elimination and determinant
//! engines need from a symbolic expression type: expansion, normalization,
//! rationalization, numeric classification, and substitution. [SymbolRing]
//! finally adds the ability to create and recognize atomic symbols, which the
//! linear solver needs for free parameters and fresh unknowns.

pub mod expression;
pub mod rational;

use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// An ordering of ring elements that is defined even for rings without a
/// total mathematical ordering, such as symbolic expressions. Used for
/// deterministic, short-circuiting comparison of matrices.
pub trait InternalOrdering {
    /// Compare two elements using an internal ordering.
    fn internal_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! impl_internal_ordering {
    ($($t:ty),*) => {
        $(
            impl InternalOrdering for $t {
                fn internal_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

impl_internal_ordering!(u32, u64, i64);

/// A set with two binary operations, addition and multiplication.
///
/// The ring object itself carries the operations; elements are plain data.
pub trait Ring: Clone + PartialEq + Eq + Hash + Debug {
    /// The elements the ring operates on.
    type Element: Clone + PartialEq + Eq + Hash + InternalOrdering + Debug + Display;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element);
    /// `a += b * c`.
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element);
    /// `a -= b * c`.
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element);
    fn neg(&self, a: &Self::Element) -> Self::Element;
    fn zero(&self) -> Self::Element;
    fn one(&self) -> Self::Element;
    /// Return the nth element by computing `n * 1`.
    fn nth(&self, n: i64) -> Self::Element;
    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element;
    fn is_zero(a: &Self::Element) -> bool;
    fn is_one(&self, a: &Self::Element) -> bool;
}

/// A ring that supports division and inversion of its elements.
pub trait Field: Ring {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn inv(&self, a: &Self::Element) -> Self::Element;
}

/// A table of `(symbol, replacement)` pairs recorded by
/// [ExpressionRing::to_rational] and undone by [ExpressionRing::substitute].
pub type Replacements<R> = Vec<(<R as Ring>::Element, <R as Ring>::Element)>;

/// The contract a symbolic expression type must satisfy for the elimination
/// and determinant engines to operate on it.
///
/// Purely numeric domains satisfy this trait trivially: expansion and
/// normalization are identities and every element is numeric.
pub trait ExpressionRing: Field {
    /// Cheaply re-expand products and powers in `e`. An un-expanded symbolic
    /// zero may not compare equal to the zero element; pivot searches expand
    /// before testing.
    fn expand(&self, e: &Self::Element) -> Self::Element;

    /// Normalize `e` to a canonical simplified form, reduced to lowest terms
    /// where the domain supports it.
    fn normal(&self, e: &Self::Element) -> Self::Element;

    /// Return true iff `e` is an explicit number.
    fn is_numeric(&self, e: &Self::Element) -> bool;

    /// Return true iff the canonical rational form of `e` is a proper
    /// quotient, i.e. a rational function that is not a polynomial.
    fn is_rational_function(&self, e: &Self::Element) -> bool;

    /// Split `e` into a numerator/denominator pair in canonical rational
    /// form. Subexpressions that are not rational in the ring's generators
    /// are replaced by temporary symbols, recorded in `repl` so that
    /// [substitute](Self::substitute) can undo the replacement later.
    fn to_rational(
        &self,
        e: &Self::Element,
        repl: &mut Replacements<Self>,
    ) -> (Self::Element, Self::Element);

    /// Substitute every `(symbol, replacement)` pair of `repl` in `e`.
    fn substitute(&self, e: &Self::Element, repl: &[(Self::Element, Self::Element)])
        -> Self::Element;

    /// Compare the absolute values of two numeric elements. Returns `None`
    /// when either element is not numeric.
    fn cmp_abs(&self, a: &Self::Element, b: &Self::Element) -> Option<Ordering>;

    /// Recognize `e` as a machine integer, if it is one.
    fn to_i64(&self, e: &Self::Element) -> Option<i64>;

    /// The complex conjugate of `e`.
    fn conjugate(&self, e: &Self::Element) -> Self::Element;

    /// The real part of `e`.
    fn real_part(&self, e: &Self::Element) -> Self::Element;

    /// The imaginary part of `e`.
    fn imag_part(&self, e: &Self::Element) -> Self::Element;

    /// Return true iff `e` commutes with every other element. Domains with
    /// non-commuting generators must override this.
    fn is_commutative(&self, _e: &Self::Element) -> bool {
        true
    }
}

/// An expression ring with atomic symbols. The linear solver uses symbols as
/// unknowns and free parameters; matrix inversion fabricates fresh ones.
pub trait SymbolRing: ExpressionRing {
    /// Return true iff `e` is a single atomic symbol.
    fn is_symbol(&self, e: &Self::Element) -> bool;

    /// Create a symbol that is distinct from every symbol created so far.
    fn new_symbol(&self) -> Self::Element;
}
