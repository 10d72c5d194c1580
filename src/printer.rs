//! Display plumbing for matrices.
//!
//! Serious pretty-printing (LaTeX, embedding in a surrounding expression
//! language) is a collaborator's concern; this module only renders the
//! bracketed row form used by [Display](std::fmt::Display) and the tests.

use std::fmt;

use crate::domains::Ring;
use crate::matrix::Matrix;

/// Formats a matrix as nested bracketed rows, `[[a,b],[c,d]]`.
pub struct MatrixPrinter<'a, F: Ring> {
    pub matrix: &'a Matrix<F>,
}

impl<'a, F: Ring> MatrixPrinter<'a, F> {
    pub fn new(matrix: &'a Matrix<F>) -> MatrixPrinter<'a, F> {
        MatrixPrinter { matrix }
    }
}

impl<'a, F: Ring> fmt::Display for MatrixPrinter<'a, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (r, row) in self.matrix.row_iter().enumerate() {
            if r > 0 {
                write!(f, ",")?;
            }
            write!(f, "[")?;
            for (c, e) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", e)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod test {
    use crate::domains::rational::Q;
    use crate::matrix::Matrix;
    use rug::Rational;

    #[test]
    fn bracketed_rows() {
        let m = Matrix::from_list(
            vec![
                Rational::from(1),
                Rational::from(2),
                Rational::from((1, 2)),
                Rational::from(-4),
            ],
            2,
            2,
            Q,
        );
        assert_eq!(format!("{}", m), "[[1,2],[1/2,-4]]");
    }
}
