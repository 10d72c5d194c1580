//! Symmat is a dense linear-algebra engine for exact, symbolic computation.
//!
//! The central type is [Matrix](crate::matrix::Matrix), a dense row-major
//! matrix whose entries are elements of a generic expression ring. The engine
//! provides a family of elimination algorithms (Gauss, division-free, Bareiss
//! fraction-free, Markowitz full pivoting), determinant computation with
//! automatic algorithm selection, an exact linear-system solver that handles
//! underdetermined and rank-deficient systems symbolically, matrix inversion,
//! rank, and characteristic polynomials.
//!
//! The expression type is supplied through the trait tower in
//! [domains](crate::domains): any type whose operations satisfy
//! [ExpressionRing](crate::domains::ExpressionRing) can be used as a matrix
//! entry. Two implementations ship with the crate: the field of rational
//! numbers [Q](crate::domains::rational::Q) and a reference symbolic domain of
//! rational functions, [EX](crate::domains::expression::EX).
//!
//! For example:
//!
//! ```
//! use symmat::domains::expression::{symbol, EX};
//! use symmat::matrix::{DeterminantAlgo, Matrix};
//!
//! let (a, b) = (symbol("a"), symbol("b"));
//! let m = Matrix::from_nested(vec![vec![a.clone(), b.clone()], vec![b, a]], EX).unwrap();
//! let det = m.determinant(DeterminantAlgo::Automatic).unwrap();
//! println!("det = {}", det); // a^2 - b^2
//! ```

pub mod domains;
pub mod matrix;
pub mod printer;
