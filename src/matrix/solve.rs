//! The linear-system solver and the operations built on top of it:
//! inversion and rank.

use tracing::debug;

use crate::domains::{ExpressionRing, Ring, SymbolRing};

use super::{EliminationAlgo, Matrix, MatrixError};

impl<F: SymbolRing> Matrix<F> {
    /// Solve `self * x = rhs` by eliminating the augmented matrix, where
    /// `self` is `m x n`, `rhs` is `m x p` and `vars` is an `n x p` matrix
    /// of distinct symbols naming the unknowns.
    ///
    /// The result is an `n x p` matrix of solutions. Underdetermined and
    /// rank-deficient systems do not fail: unknowns without a pivot are
    /// returned as free parameters, taken from `vars`, and the pivot
    /// variables are expressed in terms of them. A row with no nonzero
    /// coefficient but a nonzero residual makes the system inconsistent.
    pub fn solve(
        &self,
        vars: &Matrix<F>,
        rhs: &Matrix<F>,
        algo: EliminationAlgo,
    ) -> Result<Matrix<F>, MatrixError> {
        let m = self.nrows;
        let n = self.ncols;
        let p = rhs.ncols;

        if rhs.nrows != m || vars.nrows != n || vars.ncols != p {
            return Err(MatrixError::DimensionMismatch);
        }
        for e in &vars.data {
            if !self.field.is_symbol(e) {
                return Err(MatrixError::NotASymbol);
            }
        }

        let f = self.field.clone();

        // build the augmented matrix with rhs attached to the right
        let mut aug = Matrix::new(m, n + p, f.clone());
        for r in 0..m {
            for c in 0..n {
                aug[(r, c)] = self[(r, c)].clone();
            }
            for c in 0..p {
                aug[(r, n + c)] = rhs[(r, c)].clone();
            }
        }

        // eliminate, pivoting only within the first n columns
        let echelon = aug.echelon_form(algo, n);
        let colid = echelon.permutation;

        // back-substitute per solution column, scanning rows bottom-up
        let mut sol = Matrix::new(n, p, f.clone());
        for co in 0..p {
            // the columns between the current and the previously assigned
            // pivot are free parameters
            let mut free_end = n;
            for r in (0..m).rev() {
                // entries of the echelon form may be unsimplified zeros, so
                // the zero test goes through normalization
                let pivot = (0..n).find(|&c| !F::is_zero(&f.normal(&aug[(r, c)])));
                match pivot {
                    None => {
                        // a row of zero coefficients: the residual must
                        // vanish as well
                        if !F::is_zero(&f.normal(&aug[(r, n + co)])) {
                            return Err(MatrixError::Inconsistent);
                        }
                    }
                    Some(pc) => {
                        for c in pc + 1..free_end {
                            debug!("unknown {} is a free parameter", vars[(colid[c as usize], co)]);
                            sol[(colid[c as usize], co)] = vars[(colid[c as usize], co)].clone();
                        }
                        let mut e = aug[(r, n + co)].clone();
                        for c in pc + 1..n {
                            let s = sol[(colid[c as usize], co)].clone();
                            f.sub_mul_assign(&mut e, &aug[(r, c)], &s);
                        }
                        sol[(colid[pc as usize], co)] = f.normal(&f.div(&e, &aug[(r, pc)]));
                        free_end = pc;
                    }
                }
            }
            // a rank-deficient prefix leaves leading columns without any
            // pivot; they are free parameters as well
            for c in 0..free_end {
                sol[(colid[c as usize], co)] = vars[(colid[c as usize], co)].clone();
            }
        }

        Ok(sol)
    }

    /// Invert a square matrix by solving `self * X = 1` for a matrix `X` of
    /// fresh symbols. A matrix that turns out not to have full rank is
    /// reported as singular.
    pub fn inverse(&self, algo: EliminationAlgo) -> Result<Matrix<F>, MatrixError> {
        if self.nrows != self.ncols {
            return Err(MatrixError::NotSquare);
        }

        let identity = Matrix::identity(self.nrows, self.field.clone());
        let vars = Matrix::symbolic(self.nrows, self.ncols, self.field.clone());

        match self.solve(&vars, &identity, algo) {
            Ok(sol) => Ok(sol),
            Err(MatrixError::Inconsistent) => Err(MatrixError::Singular),
            Err(e) => Err(e),
        }
    }
}

impl<F: ExpressionRing> Matrix<F> {
    /// The rank of the matrix: echelon-reduce a working copy, bounded by the
    /// matrix's own column count, and count the nonzero rows by scanning
    /// from the last element backward.
    pub fn rank(&self, algo: EliminationAlgo) -> u32 {
        let mut tmp = self.clone();
        tmp.echelon_form(algo, self.ncols);

        for i in (0..tmp.data.len()).rev() {
            if !F::is_zero(&tmp.data[i]) {
                return 1 + i as u32 / self.ncols;
            }
        }
        0
    }
}
