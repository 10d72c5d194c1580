//! Echelon reduction: the pivoting primitive, the four elimination
//! algorithms and the heuristic that picks between them.
//!
//! All algorithms share one contract: reduce the matrix in place to upper
//! echelon form and return the accumulated sign of the row (and column)
//! swaps, or 0 when a zero pivot column was found. In determinant mode the
//! entries that can no longer influence the diagonal are dropped to save
//! memory, and a zero pivot column exits early, leaving the matrix in an
//! unspecified but discardable state.

use std::cmp::Ordering;

use tracing::debug;

use crate::domains::{ExpressionRing, Ring};

use super::{EchelonResult, EliminationAlgo, Matrix};

/// The outcome of a pivot search in one column. A swap reported here has
/// already been performed on the matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PivotOutcome {
    /// The pivot is already at the start row.
    NoSwapNeeded,
    /// The start row was exchanged with the given row.
    Swapped(u32),
    /// Every candidate entry in the column is zero.
    AllZero,
}

/// Entry statistics that drive the automatic algorithm choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MatrixStats {
    pub cells: usize,
    pub nonzero: usize,
    pub numeric: bool,
}

impl MatrixStats {
    pub fn gather<F: ExpressionRing>(m: &Matrix<F>) -> MatrixStats {
        let mut numeric = true;
        let mut nonzero = 0;
        for e in &m.data {
            if !m.field.is_numeric(e) {
                numeric = false;
            }
            if !F::is_zero(e) {
                nonzero += 1;
            }
        }
        MatrixStats {
            cells: m.data.len(),
            nonzero,
            numeric,
        }
    }
}

/// Resolve the automatic elimination choice. Gauss handles numeric matrices
/// well, with Markowitz taking over for large sparse ones. Symbolic matrices
/// default to Markowitz, except small dense ones where the fraction-free
/// scheme (or plain division-free elimination for very small matrices) wins.
/// The thresholds are tuned policy, not correctness requirements.
pub(crate) fn resolve_elimination(stats: &MatrixStats) -> EliminationAlgo {
    if stats.numeric {
        if stats.cells > 200 && 2 * stats.nonzero < stats.cells {
            EliminationAlgo::Markowitz
        } else {
            EliminationAlgo::Gauss
        }
    } else if stats.cells < 120 && 5 * stats.nonzero > 3 * stats.cells {
        if stats.cells <= 12 {
            EliminationAlgo::DivisionFree
        } else {
            EliminationAlgo::Bareiss
        }
    } else {
        EliminationAlgo::Markowitz
    }
}

impl<F: ExpressionRing> Matrix<F> {
    /// Search column `col` from `start` downward for a pivot and swap it into
    /// place. Symbolic mode takes the first entry whose re-expanded form is
    /// nonzero; an un-expanded symbolic zero may not compare equal to zero
    /// syntactically. Numeric mode takes the numeric entry of strictly
    /// maximal absolute value, falling back to the symbolic scan when no
    /// nonzero numeric candidate exists.
    pub(crate) fn pivot(&mut self, start: u32, col: u32, symbolic: bool) -> PivotOutcome {
        let mut k = self.nrows;
        if !symbolic {
            let mut best: Option<u32> = None;
            for r in start..self.nrows {
                let e = &self[(r, col)];
                if F::is_zero(e) || !self.field.is_numeric(e) {
                    continue;
                }
                match best {
                    None => best = Some(r),
                    Some(b) => {
                        if self.field.cmp_abs(e, &self[(b, col)]) == Some(Ordering::Greater) {
                            best = Some(r);
                        }
                    }
                }
            }
            if let Some(b) = best {
                k = b;
            }
        }
        if k == self.nrows {
            k = start;
            while k < self.nrows && F::is_zero(&self.field.expand(&self[(k, col)])) {
                k += 1;
            }
        }

        if k == self.nrows {
            return PivotOutcome::AllZero;
        }
        if k == start {
            return PivotOutcome::NoSwapNeeded;
        }
        self.swap_rows(start, k);
        PivotOutcome::Swapped(k)
    }

    /// Classical Gaussian elimination to upper echelon form. Updated entries
    /// that are not in simplest numeric form are re-normalized to control
    /// expression growth.
    pub(crate) fn gauss_elimination(&mut self, det: bool) -> i32 {
        let m = self.nrows;
        let n = self.ncols;
        debug_assert!(!det || m == n);
        let mut sign = 1;

        let mut r0 = 0;
        let mut c0 = 0;
        while c0 < n && r0 + 1 < m {
            match self.pivot(r0, c0, false) {
                PivotOutcome::AllZero => {
                    sign = 0;
                    if det {
                        return 0;
                    }
                    c0 += 1;
                    continue;
                }
                PivotOutcome::Swapped(_) => sign = -sign,
                PivotOutcome::NoSwapNeeded => {}
            }
            let piv = self[(r0, c0)].clone();
            for r2 in r0 + 1..m {
                if !F::is_zero(&self[(r2, c0)]) {
                    let s = self.field.div(&self[(r2, c0)], &piv);
                    for c in c0 + 1..n {
                        let above = self[(r0, c)].clone();
                        let zero = self.field.zero();
                        let mut e = std::mem::replace(&mut self[(r2, c)], zero);
                        self.field.sub_mul_assign(&mut e, &s, &above);
                        if !self.field.is_numeric(&e) {
                            e = self.field.normal(&e);
                        }
                        self[(r2, c)] = e;
                    }
                }
                // fill up the left-hand side with zeros
                for c in r0..=c0 {
                    self[(r2, c)] = self.field.zero();
                }
            }
            if det {
                for c in r0 + 1..n {
                    self[(r0, c)] = self.field.zero();
                }
            }
            r0 += 1;
            c0 += 1;
        }
        // clear remaining rows
        for r in r0 + 1..m {
            for c in 0..n {
                self[(r, c)] = self.field.zero();
            }
        }

        sign
    }

    /// Division-free elimination to upper echelon form, using
    /// `m'(r,c) = m(r0,c0)*m(r,c) - m(r,c0)*m(r0,c)`. Entry sizes grow
    /// multiplicatively with every step; only suitable for small matrices or
    /// determinant-only use.
    pub(crate) fn division_free_elimination(&mut self, det: bool) -> i32 {
        let m = self.nrows;
        let n = self.ncols;
        debug_assert!(!det || m == n);
        let mut sign = 1;

        let mut r0 = 0;
        let mut c0 = 0;
        while c0 < n && r0 + 1 < m {
            match self.pivot(r0, c0, true) {
                PivotOutcome::AllZero => {
                    sign = 0;
                    if det {
                        return 0;
                    }
                    c0 += 1;
                    continue;
                }
                PivotOutcome::Swapped(_) => sign = -sign,
                PivotOutcome::NoSwapNeeded => {}
            }
            for r2 in r0 + 1..m {
                for c in c0 + 1..n {
                    let e = self.field.sub(
                        &self.field.mul(&self[(r0, c0)], &self[(r2, c)]),
                        &self.field.mul(&self[(r2, c0)], &self[(r0, c)]),
                    );
                    self[(r2, c)] = self.field.normal(&e);
                }
                for c in r0..=c0 {
                    self[(r2, c)] = self.field.zero();
                }
            }
            if det {
                for c in r0 + 1..n {
                    self[(r0, c)] = self.field.zero();
                }
            }
            r0 += 1;
            c0 += 1;
        }
        for r in r0 + 1..m {
            for c in 0..n {
                self[(r, c)] = self.field.zero();
            }
        }

        sign
    }

    /// Bareiss one-step fraction-free elimination.
    ///
    /// Division-free elimination sets
    /// `m[k+1](r,c) = m[k](k,k)*m[k](r,c) - m[k](r,k)*m[k](k,c)`; Bareiss
    /// elimination additionally divides that entry by `m[k-1](k-1,k-1)`,
    /// which Sylvester's identity shows to divide exactly. This keeps entry
    /// growth roughly linear instead of exponential.
    ///
    /// Entries may be general rational functions, so numerators and
    /// denominators are tracked in two parallel matrices updated in lockstep
    /// (with `N{x}` the numerator of `x` and `D{x}` the denominator):
    ///
    /// ```text
    /// N{m'(r,c)} = N(r0,c0)N(r,c)D(r,c0)D(r0,c) - N(r,c0)N(r0,c)D(r0,c0)D(r,c)
    /// D{m'(r,c)} = D(r0,c0)D(r,c)D(r,c0)D(r0,c)
    /// ```
    ///
    /// where the numerator and denominator are divided by the previous
    /// pivot's numerator and denominator respectively. Entries are brought
    /// into canonical rational form up front; temporary symbols introduced by
    /// the rationalization are substituted away before every zero test and
    /// when the matrix is repopulated.
    pub(crate) fn fraction_free_elimination(&mut self, det: bool) -> i32 {
        let m = self.nrows;
        let n = self.ncols;
        debug_assert!(!det || m == n);
        let f = self.field.clone();
        let mut sign = 1;
        if m == 1 {
            return 1;
        }

        let mut divisor_n = f.one();
        let mut divisor_d = f.one();

        let mut repl = Vec::new();
        let mut tmp_n = Matrix::new(m, n, f.clone());
        let mut tmp_d = Matrix::new(m, n, f.clone());
        for (i, e) in self.data.iter().enumerate() {
            let (num, den) = f.to_rational(&f.normal(e), &mut repl);
            tmp_n.data[i] = num;
            tmp_d.data[i] = den;
        }

        let mut r0 = 0;
        let mut c0 = 0;
        while c0 < n && r0 + 1 < m {
            // Search the pivot on the numerators directly; undoing the
            // temporary substitutions before expanding catches hidden zeros.
            let mut indx = r0;
            while indx < m && F::is_zero(&f.expand(&f.substitute(&tmp_n[(indx, c0)], &repl))) {
                indx += 1;
            }
            if indx == m {
                sign = 0;
                if det {
                    return 0;
                }
            } else {
                if indx > r0 {
                    sign = -sign;
                    for c in c0..n {
                        tmp_n
                            .data
                            .swap((indx * n + c) as usize, (r0 * n + c) as usize);
                        tmp_d
                            .data
                            .swap((indx * n + c) as usize, (r0 * n + c) as usize);
                    }
                }
                for r2 in r0 + 1..m {
                    for c in c0 + 1..n {
                        let dividend_n = f.expand(&f.sub(
                            &f.mul(
                                &f.mul(&tmp_n[(r0, c0)], &tmp_n[(r2, c)]),
                                &f.mul(&tmp_d[(r2, c0)], &tmp_d[(r0, c)]),
                            ),
                            &f.mul(
                                &f.mul(&tmp_n[(r2, c0)], &tmp_n[(r0, c)]),
                                &f.mul(&tmp_d[(r0, c0)], &tmp_d[(r2, c)]),
                            ),
                        ));
                        let dividend_d = f.expand(&f.mul(
                            &f.mul(&tmp_d[(r2, c0)], &tmp_d[(r0, c)]),
                            &f.mul(&tmp_d[(r0, c0)], &tmp_d[(r2, c)]),
                        ));
                        // Sylvester's identity guarantees both divisions are exact
                        tmp_n[(r2, c)] = f.div(&dividend_n, &divisor_n);
                        tmp_d[(r2, c)] = f.div(&dividend_d, &divisor_d);
                    }
                    for c in r0..=c0 {
                        tmp_n[(r2, c)] = f.zero();
                    }
                }
                divisor_n = f.expand(&tmp_n[(r0, c0)]);
                divisor_d = f.expand(&tmp_d[(r0, c0)]);
                if det {
                    for c in 0..n {
                        tmp_n[(r0, c)] = f.zero();
                        tmp_d[(r0, c)] = f.one();
                    }
                }
                r0 += 1;
            }
            c0 += 1;
        }
        for r in r0 + 1..m {
            for c in 0..n {
                tmp_n[(r, c)] = f.zero();
            }
        }

        for i in 0..self.data.len() {
            self.data[i] = f.substitute(&f.div(&tmp_n.data[i], &tmp_d.data[i]), &repl);
        }

        sign
    }

    /// Markowitz-ordered elimination with full pivoting, restricted to the
    /// first `n` candidate columns so that an augmented right-hand side block
    /// is never chosen as a pivot column. At every step the remaining nonzero
    /// entry minimizing the fill-in estimate
    /// `(rowcount - 1) * (colcount - 1)` becomes the pivot; the per-row and
    /// per-column nonzero counts are maintained incrementally. Entries are
    /// kept normalized throughout so that hidden zeros cannot corrupt the
    /// counts. Returns the accumulated swap sign and the realized column
    /// permutation (identity outside the pivoted region).
    pub(crate) fn markowitz_elimination(&mut self, n: u32) -> (i32, Vec<u32>) {
        debug_assert!(n <= self.ncols);
        let rows = self.nrows;
        let cols = self.ncols;
        let f = self.field.clone();
        let mut sign = 1;

        let mut rowcnt = vec![0i64; rows as usize];
        let mut colcnt = vec![0i64; cols as usize];
        for r in 0..rows {
            for c in 0..cols {
                let e = f.normal(&self[(r, c)]);
                if !F::is_zero(&e) {
                    rowcnt[r as usize] += 1;
                    colcnt[c as usize] += 1;
                }
                self[(r, c)] = e;
            }
        }

        let mut colid: Vec<u32> = (0..n).collect();
        let mut ab: Vec<F::Element> = (0..rows).map(|_| f.zero()).collect();

        let mut k = 0;
        while k < cols && k + 1 < rows {
            // find the candidate minimizing the fill-in estimate
            let mut pivot_r = rows;
            let mut pivot_c = cols;
            let mut pivot_m = (rows as i64) * (cols as i64);
            for r in k..rows {
                for c in k..n {
                    if F::is_zero(&self[(r, c)]) {
                        continue;
                    }
                    let measure = (rowcnt[r as usize] - 1) * (colcnt[c as usize] - 1);
                    if measure < pivot_m {
                        pivot_m = measure;
                        pivot_r = r;
                        pivot_c = c;
                    }
                }
            }
            if pivot_r == rows {
                // the candidate region is all zero
                if k < n {
                    sign = 0;
                }
                break;
            }
            // swap the pivot into (k, k)
            if pivot_c != k {
                self.swap_cols(pivot_c, k);
                colid.swap(pivot_c as usize, k as usize);
                colcnt.swap(pivot_c as usize, k as usize);
                sign = -sign;
            }
            if pivot_r != k {
                for c in k..cols {
                    self.data
                        .swap((pivot_r * cols + c) as usize, (k * cols + c) as usize);
                }
                rowcnt.swap(pivot_r as usize, k as usize);
                sign = -sign;
            }
            let a = self[(k, k)].clone();
            for r in k + 1..rows {
                let b = &self[(r, k)];
                if !F::is_zero(b) {
                    ab[r as usize] = f.div(b, &a);
                    rowcnt[r as usize] -= 1;
                }
            }
            colcnt[k as usize] = 0;
            rowcnt[k as usize] = 0;
            // subtract the pivot row KJI-style (loop by pivot, then column,
            // then row) to maximally exploit the pivot row's zeros
            for c in k + 1..cols {
                let mr0c = self[(k, c)].clone();
                if F::is_zero(&mr0c) {
                    continue;
                }
                colcnt[c as usize] -= 1;
                for r in k + 1..rows {
                    if F::is_zero(&ab[r as usize]) {
                        continue;
                    }
                    let was_zero = F::is_zero(&self[(r, c)]);
                    let mut e = std::mem::replace(&mut self[(r, c)], f.zero());
                    f.sub_mul_assign(&mut e, &ab[r as usize], &mr0c);
                    let e = f.normal(&e);
                    let is_zero = F::is_zero(&e);
                    self[(r, c)] = e;
                    if was_zero && !is_zero {
                        rowcnt[r as usize] += 1;
                        colcnt[c as usize] += 1;
                    }
                    if !was_zero && is_zero {
                        rowcnt[r as usize] -= 1;
                        colcnt[c as usize] -= 1;
                    }
                }
            }
            for r in k + 1..rows {
                ab[r as usize] = f.zero();
                self[(r, k)] = f.zero();
            }
            k += 1;
        }

        (sign, colid)
    }

    /// Bring the matrix into upper echelon form with the given algorithm,
    /// resolving `Automatic` from the matrix statistics. Pivot choice is
    /// restricted to the first `pivot_cols` columns; the returned column
    /// permutation has that length and is the identity unless Markowitz
    /// elimination ran.
    pub fn echelon_form(&mut self, algo: EliminationAlgo, pivot_cols: u32) -> EchelonResult {
        let algo = if algo == EliminationAlgo::Automatic {
            let stats = MatrixStats::gather(self);
            let resolved = resolve_elimination(&stats);
            debug!(
                "selected {:?} elimination (cells: {}, nonzero: {}, numeric: {})",
                resolved, stats.cells, stats.nonzero, stats.numeric
            );
            resolved
        } else {
            algo
        };

        match algo {
            EliminationAlgo::Gauss => EchelonResult {
                sign: self.gauss_elimination(false),
                permutation: (0..pivot_cols).collect(),
            },
            EliminationAlgo::DivisionFree => EchelonResult {
                sign: self.division_free_elimination(false),
                permutation: (0..pivot_cols).collect(),
            },
            EliminationAlgo::Bareiss => EchelonResult {
                sign: self.fraction_free_elimination(false),
                permutation: (0..pivot_cols).collect(),
            },
            EliminationAlgo::Markowitz => {
                let (sign, permutation) = self.markowitz_elimination(pivot_cols);
                EchelonResult { sign, permutation }
            }
            EliminationAlgo::Automatic => unreachable!("resolved above"),
        }
    }
}

#[cfg(test)]
mod test {
    use rug::Rational;

    use crate::domains::expression::{symbol, EX};
    use crate::domains::rational::Q;
    use crate::domains::Ring;
    use crate::matrix::{EliminationAlgo, Matrix};

    use super::{resolve_elimination, MatrixStats, PivotOutcome};

    fn q(n: i64) -> Rational {
        Rational::from(n)
    }

    #[test]
    fn selector_decision_table() {
        // numeric, small or dense: Gauss
        let s = MatrixStats {
            cells: 9,
            nonzero: 9,
            numeric: true,
        };
        assert_eq!(resolve_elimination(&s), EliminationAlgo::Gauss);

        // numeric, large and sparse: Markowitz
        let s = MatrixStats {
            cells: 400,
            nonzero: 30,
            numeric: true,
        };
        assert_eq!(resolve_elimination(&s), EliminationAlgo::Markowitz);

        // symbolic, very small and dense: division-free
        let s = MatrixStats {
            cells: 9,
            nonzero: 9,
            numeric: false,
        };
        assert_eq!(resolve_elimination(&s), EliminationAlgo::DivisionFree);

        // symbolic, small and dense: Bareiss
        let s = MatrixStats {
            cells: 25,
            nonzero: 25,
            numeric: false,
        };
        assert_eq!(resolve_elimination(&s), EliminationAlgo::Bareiss);

        // symbolic, large or sparse: Markowitz
        let s = MatrixStats {
            cells: 144,
            nonzero: 144,
            numeric: false,
        };
        assert_eq!(resolve_elimination(&s), EliminationAlgo::Markowitz);
        let s = MatrixStats {
            cells: 100,
            nonzero: 20,
            numeric: false,
        };
        assert_eq!(resolve_elimination(&s), EliminationAlgo::Markowitz);
    }

    #[test]
    fn pivot_outcomes() {
        let mut m = Matrix::from_list(vec![q(0), q(1), q(3), q(2)], 2, 2, Q);
        // numeric pivoting picks the entry of largest absolute value
        assert_eq!(m.pivot(0, 0, false), PivotOutcome::Swapped(1));
        assert_eq!(m.data, vec![q(3), q(2), q(0), q(1)]);
        assert_eq!(m.pivot(0, 0, false), PivotOutcome::NoSwapNeeded);

        let mut m = Matrix::from_list(vec![q(0), q(1), q(0), q(2)], 2, 2, Q);
        assert_eq!(m.pivot(0, 0, true), PivotOutcome::AllZero);
        assert_eq!(m.pivot(0, 1, true), PivotOutcome::NoSwapNeeded);
    }

    #[test]
    fn pivot_numeric_mode_falls_back_to_symbolic_entries() {
        let x = symbol("x");
        let mut m = Matrix::from_list(vec![0.into(), 1.into(), x.clone(), 2.into()], 2, 2, EX);
        // no nonzero numeric candidate in the column, so the first nonzero
        // symbolic entry is pivoted
        assert_eq!(m.pivot(0, 0, false), PivotOutcome::Swapped(1));
        assert_eq!(m[(0, 0)], x);
    }

    #[test]
    fn gauss_echelon() {
        let mut m = Matrix::from_list(vec![q(1), q(2), q(2), q(4)], 2, 2, Q);
        let sign = m.gauss_elimination(false);
        // the larger entry is swapped up
        assert_eq!(sign, -1);
        assert_eq!(m.data, vec![q(2), q(4), q(0), q(0)]);

        // a zero pivot column drops the sign to 0
        let mut m = Matrix::from_list(vec![q(0), q(1), q(0), q(2)], 2, 2, Q);
        let sign = m.gauss_elimination(false);
        assert_eq!(sign, 0);
        assert_eq!(m.data, vec![q(0), q(2), q(0), q(0)]);
    }

    #[test]
    fn division_free_echelon() {
        let (a, b, c, d) = (symbol("a"), symbol("b"), symbol("c"), symbol("d"));
        let mut m =
            Matrix::from_nested(vec![vec![a.clone(), b.clone()], vec![c.clone(), d.clone()]], EX)
                .unwrap();
        let sign = m.division_free_elimination(false);
        assert_eq!(sign, 1);
        assert_eq!(m[(1, 0)], EX.zero());
        // the new corner entry is the two-product combination a*d - c*b
        assert_eq!(m[(1, 1)], EX.sub(&EX.mul(&a, &d), &EX.mul(&c, &b)));
    }

    #[test]
    fn fraction_free_echelon() {
        let mut m = Matrix::from_list(vec![q(2), q(4), q(1), q(3)], 2, 2, Q);
        let sign = m.fraction_free_elimination(false);
        assert_eq!(sign, 1);
        assert_eq!(m.data, vec![q(2), q(4), q(0), q(2)]);
    }

    #[test]
    fn markowitz_column_permutation() {
        let mut m = Matrix::from_list(vec![q(0), q(1), q(1), q(0)], 2, 2, Q);
        let (sign, colid) = m.markowitz_elimination(2);
        assert_eq!(sign, -1);
        assert_eq!(colid, vec![1, 0]);
        assert_eq!(m.data, vec![q(1), q(0), q(0), q(1)]);
    }

    #[test]
    fn markowitz_rank_deficient() {
        let mut m = Matrix::from_list(vec![q(1), q(1), q(2), q(2)], 2, 2, Q);
        let (_, colid) = m.markowitz_elimination(2);
        assert_eq!(colid, vec![0, 1]);
        assert_eq!(m.data, vec![q(1), q(1), q(0), q(0)]);
    }

    #[test]
    fn echelon_form_resolves_automatic() {
        let mut m = Matrix::from_list(vec![q(1), q(2), q(3), q(4)], 2, 2, Q);
        let r = m.echelon_form(EliminationAlgo::Automatic, 2);
        assert_eq!(r.permutation, vec![0, 1]);
        assert_ne!(r.sign, 0);
        // echelon form: the entry below the pivot is exactly zero
        assert_eq!(m[(1, 0)], q(0));
    }
}
