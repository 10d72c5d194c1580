//! The determinant engine: statistics-driven algorithm choice, determinants
//! from the elimination schemes and memoized Laplace minor expansion.

use ahash::{HashMap, HashMapExt};
use smallvec::SmallVec;
use tracing::debug;

use crate::domains::{ExpressionRing, Ring};

use super::{DeterminantAlgo, Matrix, MatrixError};

/// A cached minor is identified by the ordered set of row indices it spans.
type MinorKey = SmallVec<[u32; 8]>;

/// The parity of a permutation, given as the list of original indices.
fn permutation_sign(perm: &[u32]) -> i32 {
    let mut sign = 1;
    for i in 0..perm.len() {
        for j in i + 1..perm.len() {
            if perm[j] < perm[i] {
                sign = -sign;
            }
        }
    }
    sign
}

impl<F: ExpressionRing> Matrix<F> {
    /// Compute the determinant of a square matrix.
    ///
    /// If every entry lives in an integral domain the determinant does too
    /// and the result is only expanded; as soon as some entry is a proper
    /// quotient the result is normalized to lowest terms instead, so the
    /// determinant of `[[a/(a-b),1],[b/(a-b),1]]` comes out as unity.
    ///
    /// A zero sign reported by an elimination scheme short-circuits to the
    /// zero element; a zero determinant is an expected outcome, not an error.
    pub fn determinant(&self, algo: DeterminantAlgo) -> Result<F::Element, MatrixError> {
        if self.nrows != self.ncols {
            return Err(MatrixError::NotSquare);
        }
        let f = &self.field;
        if self.nrows == 0 {
            // the empty product
            return Ok(f.one());
        }

        // gather statistics: all entries numeric, any entry a proper
        // rational function, and the number of nonzero entries
        let mut numeric = true;
        let mut normal_flag = false;
        let mut nonzero = 0usize;
        for e in &self.data {
            if !f.is_numeric(e) {
                numeric = false;
            }
            if f.is_rational_function(e) {
                normal_flag = true;
            }
            if !F::is_zero(&f.expand(e)) {
                nonzero += 1;
            }
        }

        if self.nrows == 1 {
            return Ok(if normal_flag {
                f.normal(&self.data[0])
            } else {
                f.expand(&self.data[0])
            });
        }

        let algo = if algo == DeterminantAlgo::Automatic {
            // minor expansion is generally a good guess; fraction-free
            // elimination wins on sparse matrices and plain Gauss
            // elimination overrides everything for numeric matrices
            let mut resolved = DeterminantAlgo::Laplace;
            if self.nrows > 3 && 5 * nonzero <= self.data.len() {
                resolved = DeterminantAlgo::Bareiss;
            }
            if numeric {
                resolved = DeterminantAlgo::Gauss;
            }
            debug!(
                "selected {:?} determinant (nonzero: {}, numeric: {})",
                resolved, nonzero, numeric
            );
            resolved
        } else {
            algo
        };

        match algo {
            DeterminantAlgo::Gauss => {
                let mut tmp = self.clone();
                let sign = tmp.gauss_elimination(true);
                if sign == 0 {
                    return Ok(f.zero());
                }
                let mut det = f.one();
                for d in 0..self.nrows {
                    f.mul_assign(&mut det, &tmp[(d, d)]);
                }
                if sign < 0 {
                    det = f.neg(&det);
                }
                det = f.normal(&det);
                if !normal_flag {
                    det = f.expand(&det);
                }
                Ok(det)
            }
            DeterminantAlgo::Bareiss => {
                let mut tmp = self.clone();
                let sign = tmp.fraction_free_elimination(true);
                if sign == 0 {
                    return Ok(f.zero());
                }
                let mut det = tmp.data[tmp.data.len() - 1].clone();
                if sign < 0 {
                    det = f.neg(&det);
                }
                Ok(if normal_flag {
                    f.normal(&det)
                } else {
                    f.expand(&det)
                })
            }
            DeterminantAlgo::DivisionFree => {
                let mut tmp = self.clone();
                let sign = tmp.division_free_elimination(true);
                if sign == 0 {
                    return Ok(f.zero());
                }
                let mut det = tmp.data[tmp.data.len() - 1].clone();
                // divide out the pivot powers the scheme accumulated
                for d in 0..self.nrows.saturating_sub(2) {
                    for _ in 0..self.nrows - d - 2 {
                        det = f.normal(&f.div(&det, &tmp[(d, d)]));
                    }
                }
                if sign < 0 {
                    det = f.neg(&det);
                }
                Ok(det)
            }
            DeterminantAlgo::Laplace => {
                // Develop so that the smallest minors end up on the
                // rightmost column. Empirically the emptiest columns (most
                // zeros) should be the rightmost ones, so the columns are
                // presorted by ascending zero count and the permutation sign
                // is carried along.
                let n = self.ncols;
                let mut c_zeros: Vec<(u32, u32)> = (0..n)
                    .map(|c| {
                        let mut acc = 0;
                        for r in 0..n {
                            if F::is_zero(&self[(r, c)]) {
                                acc += 1;
                            }
                        }
                        (acc, c)
                    })
                    .collect();
                c_zeros.sort();
                let pre_sort: Vec<u32> = c_zeros.into_iter().map(|(_, c)| c).collect();
                let sign = permutation_sign(&pre_sort);

                let mut sorted = Matrix::new(n, n, f.clone());
                for (c, &orig) in pre_sort.iter().enumerate() {
                    for r in 0..n {
                        sorted[(r, c as u32)] = self[(r, orig)].clone();
                    }
                }

                let mut det = sorted.determinant_minor();
                if sign < 0 {
                    det = f.neg(&det);
                }
                Ok(if normal_flag { f.normal(&det) } else { det })
            }
            DeterminantAlgo::Automatic => unreachable!("resolved above"),
        }
    }

    /// Memoized Laplace minor expansion, proceeding column by column from
    /// right to left.
    ///
    /// A minor is identified by the ordered set of row indices it spans and
    /// cached under that key; each column reuses the minors computed for the
    /// column to its right. The bookkeeping matters: there are binomial(n,k)
    /// distinct k-row minors, and a naive expansion recomputes each of them
    /// (n-k)! times. Only two cache generations (current and next column)
    /// are alive at any time, which bounds the memory use. A column whose
    /// minors all vanish makes the whole determinant zero.
    pub(crate) fn determinant_minor(&self) -> F::Element {
        let n = self.ncols as usize;
        let f = &self.field;

        // minors used in the current and the next column
        let mut cur: HashMap<MinorKey, F::Element> = HashMap::new();
        cur.insert(MinorKey::new(), f.one());

        let mut det = f.zero();
        for c in (0..n).rev() {
            let size = n - c;
            let mut next: HashMap<MinorKey, F::Element> = HashMap::with_capacity(cur.len());
            let mut key: MinorKey = (0..size as u32).collect();
            loop {
                det = f.zero();
                for r in 0..size {
                    let e = &self[(key[r], c as u32)];
                    if F::is_zero(e) {
                        continue;
                    }
                    // the sub-key is the current key with element r removed
                    let mut sub = MinorKey::with_capacity(size - 1);
                    sub.extend_from_slice(&key[..r]);
                    sub.extend_from_slice(&key[r + 1..]);
                    // a key that is not cached belongs to a vanished minor
                    if let Some(minor) = cur.get(&sub) {
                        if r % 2 == 1 {
                            f.sub_mul_assign(&mut det, e, minor);
                        } else {
                            f.add_mul_assign(&mut det, e, minor);
                        }
                    }
                }
                // keep nested expressions from piling up
                det = f.expand(&det);
                if !F::is_zero(&det) {
                    next.insert(key.clone(), det.clone());
                }
                // advance to the next ascending row subset
                let mut fc = size;
                while fc > 0 {
                    key[fc - 1] += 1;
                    if (key[fc - 1] as usize) < fc + c {
                        break;
                    }
                    fc -= 1;
                }
                if fc == 0 {
                    break;
                }
                for j in fc..size {
                    key[j] = key[j - 1] + 1;
                }
            }
            if next.is_empty() {
                return f.zero();
            }
            cur = next;
        }

        det
    }
}
