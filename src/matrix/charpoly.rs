//! Characteristic polynomials.

use crate::domains::{ExpressionRing, Ring};

use super::{DeterminantAlgo, Matrix, MatrixError};

impl<F: ExpressionRing> Matrix<F> {
    /// The characteristic polynomial of a square matrix in the free variable
    /// `lambda`, defined as the determinant of `self - lambda * 1`.
    ///
    /// For purely numeric matrices Leverrier's recursion is used: it builds
    /// the coefficients from traces of successive matrix products,
    /// `c_i = trace(B_i) / i` with `B_{i+1} = self * (B_i - c_i * 1)`, which
    /// costs O(n) matrix multiplications instead of a symbolic determinant
    /// expansion. The recursion naturally produces the monic convention, so
    /// the result is negated for odd dimensions to match the determinant
    /// definition. Symbolic matrices fall back to the determinant.
    pub fn charpoly(&self, lambda: &F::Element) -> Result<F::Element, MatrixError> {
        if self.nrows != self.ncols {
            return Err(MatrixError::NotSquare);
        }
        let f = &self.field;
        let n = self.nrows;
        if n == 0 {
            return Ok(f.one());
        }

        if self.data.iter().all(|e| f.is_numeric(e)) {
            let mut b = self.clone();
            let mut c = b.trace()?;
            let mut poly = f.sub(
                &f.pow(lambda, n as u64),
                &f.mul(&c, &f.pow(lambda, (n - 1) as u64)),
            );
            for i in 1..n {
                for j in 0..n {
                    let e = f.sub(&b[(j, j)], &c);
                    b[(j, j)] = e;
                }
                b = self.try_mul(&b)?;
                c = f.div(&b.trace()?, &f.nth(i as i64 + 1));
                poly = f.sub(&poly, &f.mul(&c, &f.pow(lambda, (n - 1 - i) as u64)));
            }
            if n % 2 == 1 {
                Ok(f.neg(&poly))
            } else {
                Ok(poly)
            }
        } else {
            let mut m = self.clone();
            for r in 0..n {
                let e = f.sub(&m[(r, r)], lambda);
                m[(r, r)] = e;
            }
            m.determinant(DeterminantAlgo::Automatic)
        }
    }
}

#[cfg(test)]
mod test {
    use crate::domains::expression::{symbol, EX};
    use crate::domains::Ring;
    use crate::matrix::{Matrix, MatrixError};

    #[test]
    fn leverrier() {
        // charpoly([[1,2],[3,4]]) == l^2 - 5l - 2
        let a = Matrix::from_list(vec![1.into(), 2.into(), 3.into(), 4.into()], 2, 2, EX);
        let l = symbol("lambda");
        let p = a.charpoly(&l).unwrap();
        let expected = EX.sub(
            &EX.sub(&EX.pow(&l, 2), &EX.mul(&EX.nth(5), &l)),
            &EX.nth(2),
        );
        assert_eq!(p, expected);
    }

    #[test]
    fn odd_dimension_sign() {
        // det(A - l*1) for a 1x1 matrix is a - l
        let a = Matrix::from_list(vec![7.into()], 1, 1, EX);
        let l = symbol("lambda");
        assert_eq!(a.charpoly(&l).unwrap(), EX.sub(&EX.nth(7), &l));
    }

    #[test]
    fn matches_determinant_definition() {
        let a = Matrix::from_list(
            vec![
                1.into(),
                2.into(),
                3.into(),
                4.into(),
                5.into(),
                16.into(),
                7.into(),
                8.into(),
                9.into(),
            ],
            3,
            3,
            EX,
        );
        let l = symbol("lambda");

        // Leverrier against the explicit determinant of A - l*1
        let leverrier = a.charpoly(&l).unwrap();
        let mut shifted = a.clone();
        for r in 0..3 {
            let e = EX.sub(&shifted[(r, r)], &l);
            shifted.set(r, r, e).unwrap();
        }
        let det = shifted
            .determinant(crate::matrix::DeterminantAlgo::Laplace)
            .unwrap();
        assert_eq!(leverrier, det);
    }

    #[test]
    fn symbolic_fallback() {
        // a symbolic entry forces the determinant path
        let x = symbol("x");
        let a = Matrix::from_nested(
            vec![vec![x.clone(), 1.into()], vec![1.into(), x.clone()]],
            EX,
        )
        .unwrap();
        let l = symbol("lambda");
        let p = a.charpoly(&l).unwrap();
        // (x - l)^2 - 1
        let xl = EX.sub(&x, &l);
        let expected = EX.sub(&EX.mul(&xl, &xl), &EX.one());
        assert_eq!(p, expected);
    }

    #[test]
    fn requires_square() {
        let a = Matrix::new(2, 3, EX);
        assert_eq!(a.charpoly(&symbol("lambda")), Err(MatrixError::NotSquare));
    }
}
