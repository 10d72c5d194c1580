//! Dense matrices over a generic expression ring.
//!
//! A [Matrix] owns a row-major sequence of ring elements. All transforming
//! operations either mutate an exclusively owned working copy or return a new
//! matrix; the public derived operations (determinant, solve, rank, inverse)
//! copy before mutating, so matrices behave as value types.

mod charpoly;
mod determinant;
mod echelon;
mod solve;

use std::fmt::Display;
use std::io;
use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};
use std::slice::Chunks;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::domains::{ExpressionRing, InternalOrdering, Ring, SymbolRing};
use crate::printer::MatrixPrinter;

/// Errors reported by matrix operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatrixError {
    /// The shapes of the operands do not match, or a nested constructor list
    /// is not rectangular.
    DimensionMismatch,
    /// An element access outside the matrix.
    OutOfBounds { row: u32, col: u32 },
    /// A square-only operation was applied to a non-square matrix.
    NotSquare,
    /// The variable matrix passed to the solver contains a non-symbol entry.
    NotASymbol,
    /// A scalar outside the commutative sub-ring was used in a scalar product.
    NonCommutativeScalar,
    /// The matrix was found to be singular while inverting it.
    Singular,
    /// The linear system has a row with zero coefficients but a nonzero
    /// right-hand side.
    Inconsistent,
    /// The exponent of a matrix power is not an integer.
    UnsupportedExponent,
}

impl Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixError::DimensionMismatch => {
                write!(f, "The shapes of the matrices are not compatible")
            }
            MatrixError::OutOfBounds { row, col } => {
                write!(f, "The index ({},{}) is out of bounds", row, col)
            }
            MatrixError::NotSquare => write!(f, "The matrix is not square"),
            MatrixError::NotASymbol => {
                write!(f, "The variable matrix must consist of symbols")
            }
            MatrixError::NonCommutativeScalar => {
                write!(f, "The scalar does not belong to a commutative sub-ring")
            }
            MatrixError::Singular => write!(f, "The matrix is singular"),
            MatrixError::Inconsistent => write!(f, "The linear system is inconsistent"),
            MatrixError::UnsupportedExponent => {
                write!(f, "The exponent of a matrix power must be an integer")
            }
        }
    }
}

/// Selects the elimination algorithm used for echelon reduction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EliminationAlgo {
    /// Resolve the algorithm from the matrix statistics.
    #[default]
    Automatic,
    /// Classical division elimination. Fast for numeric matrices.
    Gauss,
    /// Division-free elimination. Entry sizes grow multiplicatively; only
    /// suitable for small matrices.
    DivisionFree,
    /// Bareiss one-step fraction-free elimination.
    Bareiss,
    /// Markowitz-ordered elimination with full pivoting.
    Markowitz,
}

/// Selects the determinant algorithm.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeterminantAlgo {
    /// Resolve the algorithm from the matrix statistics.
    #[default]
    Automatic,
    /// Determinant from Gauss elimination.
    Gauss,
    /// Determinant from division-free elimination.
    DivisionFree,
    /// Determinant from Bareiss fraction-free elimination.
    Bareiss,
    /// Memoized Laplace minor expansion.
    Laplace,
}

/// The outcome of an echelon reduction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EchelonResult {
    /// 1 if an even number of row and column swaps was performed, -1 for an
    /// odd number, and 0 if a zero pivot column was found.
    pub sign: i32,
    /// The realized column permutation: `permutation[c]` is the original
    /// index of the column now at position `c`. Identity unless Markowitz
    /// elimination ran, and identity outside the pivoted region.
    pub permutation: Vec<u32>,
}

/// A dense matrix with entries in the ring `F`, stored in row-major order.
#[derive(Clone, Hash, PartialEq, Eq, Debug)]
pub struct Matrix<F: Ring> {
    pub data: Vec<F::Element>,
    pub(crate) nrows: u32,
    pub(crate) ncols: u32,
    pub(crate) field: F,
}

impl<F: Ring> Matrix<F> {
    /// Create a new zeroed matrix with `nrows` rows and `ncols` columns.
    pub fn new(nrows: u32, ncols: u32, field: F) -> Matrix<F> {
        Matrix {
            data: (0..nrows as usize * ncols as usize)
                .map(|_| field.zero())
                .collect(),
            nrows,
            ncols,
            field,
        }
    }

    /// Create the `nrows` x `nrows` identity matrix.
    pub fn identity(nrows: u32, field: F) -> Matrix<F> {
        Matrix {
            data: (0..nrows as usize * nrows as usize)
                .map(|i| {
                    if i % nrows as usize == i / nrows as usize {
                        field.one()
                    } else {
                        field.zero()
                    }
                })
                .collect(),
            nrows,
            ncols: nrows,
            field,
        }
    }

    /// Create a square matrix with the elements of `diag` on the main
    /// diagonal and zeroes elsewhere.
    pub fn diag(diag: &[F::Element], field: F) -> Matrix<F> {
        let mut m = Matrix::new(diag.len() as u32, diag.len() as u32, field);
        for (i, e) in diag.iter().enumerate() {
            m[(i as u32, i as u32)] = e.clone();
        }
        m
    }

    /// Create an `nrows` x `ncols` matrix from a flat row-major list.
    /// Excessive elements are dropped and missing ones are set to zero.
    pub fn from_list(mut data: Vec<F::Element>, nrows: u32, ncols: u32, field: F) -> Matrix<F> {
        let total = nrows as usize * ncols as usize;
        data.truncate(total);
        data.resize(total, field.zero());
        Matrix {
            data,
            nrows,
            ncols,
            field,
        }
    }

    /// Create a matrix from a nested list of rows. Every row must have the
    /// same length.
    pub fn from_nested(rows: Vec<Vec<F::Element>>, field: F) -> Result<Matrix<F>, MatrixError> {
        let nrows = rows.len() as u32;
        let ncols = rows.first().map(|r| r.len()).unwrap_or(0) as u32;

        let mut data = Vec::with_capacity(nrows as usize * ncols as usize);
        for r in rows {
            if r.len() as u32 != ncols {
                return Err(MatrixError::DimensionMismatch);
            }
            data.extend(r);
        }

        Ok(Matrix {
            data,
            nrows,
            ncols,
            field,
        })
    }

    /// Return the number of rows.
    pub fn nrows(&self) -> u32 {
        self.nrows
    }

    /// Return the number of columns.
    pub fn ncols(&self) -> u32 {
        self.ncols
    }

    /// Return the ring of the matrix entries.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Read the element at `(row, col)`.
    pub fn get(&self, row: u32, col: u32) -> Result<&F::Element, MatrixError> {
        if row >= self.nrows || col >= self.ncols {
            return Err(MatrixError::OutOfBounds { row, col });
        }
        Ok(&self.data[(row * self.ncols + col) as usize])
    }

    /// Overwrite the element at `(row, col)`.
    pub fn set(&mut self, row: u32, col: u32, e: F::Element) -> Result<(), MatrixError> {
        if row >= self.nrows || col >= self.ncols {
            return Err(MatrixError::OutOfBounds { row, col });
        }
        self.data[(row * self.ncols + col) as usize] = e;
        Ok(())
    }

    /// Return an iterator over the rows of the matrix.
    pub fn row_iter(&self) -> Chunks<'_, F::Element> {
        self.data.chunks(self.ncols as usize)
    }

    /// Return true iff every entry in the matrix is zero.
    pub fn is_zero_matrix(&self) -> bool {
        self.data.iter().all(|e| F::is_zero(e))
    }

    /// Return true iff every entry off the main diagonal is zero.
    pub fn is_diagonal(&self) -> bool {
        self.data
            .iter()
            .enumerate()
            .all(|(i, e)| i as u32 % self.ncols == i as u32 / self.ncols || F::is_zero(e))
    }

    /// Transpose the matrix into a new `ncols` x `nrows` matrix.
    pub fn transpose(&self) -> Matrix<F> {
        let mut m = Matrix::new(self.ncols, self.nrows, self.field.clone());
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                m[(j, i)] = self[(i, j)].clone();
            }
        }
        m
    }

    /// Copy the `nr` x `nc` block starting at `(row, col)`.
    pub fn sub_matrix(&self, row: u32, nr: u32, col: u32, nc: u32) -> Result<Matrix<F>, MatrixError> {
        if row + nr > self.nrows || col + nc > self.ncols {
            return Err(MatrixError::OutOfBounds { row, col });
        }
        let mut m = Matrix::new(nr, nc, self.field.clone());
        for r in 0..nr {
            for c in 0..nc {
                m[(r, c)] = self[(row + r, col + c)].clone();
            }
        }
        Ok(m)
    }

    /// The matrix with row `row` and column `col` removed.
    pub fn minor_matrix(&self, row: u32, col: u32) -> Result<Matrix<F>, MatrixError> {
        if self.nrows < 2 || self.ncols < 2 {
            return Err(MatrixError::DimensionMismatch);
        }
        if row >= self.nrows || col >= self.ncols {
            return Err(MatrixError::OutOfBounds { row, col });
        }
        let mut m = Matrix::new(self.nrows - 1, self.ncols - 1, self.field.clone());
        for r in 0..self.nrows - 1 {
            for c in 0..self.ncols - 1 {
                let rr = if r < row { r } else { r + 1 };
                let cc = if c < col { c } else { c + 1 };
                m[(r, c)] = self[(rr, cc)].clone();
            }
        }
        Ok(m)
    }

    /// Add two matrices, or report a shape mismatch.
    pub fn try_add(&self, rhs: &Matrix<F>) -> Result<Matrix<F>, MatrixError> {
        if self.nrows != rhs.nrows || self.ncols != rhs.ncols {
            return Err(MatrixError::DimensionMismatch);
        }
        let mut m = Matrix::new(self.nrows, self.ncols, self.field.clone());
        for (c, (a, b)) in m.data.iter_mut().zip(self.data.iter().zip(rhs.data.iter())) {
            *c = self.field.add(a, b);
        }
        Ok(m)
    }

    /// Subtract two matrices, or report a shape mismatch.
    pub fn try_sub(&self, rhs: &Matrix<F>) -> Result<Matrix<F>, MatrixError> {
        if self.nrows != rhs.nrows || self.ncols != rhs.ncols {
            return Err(MatrixError::DimensionMismatch);
        }
        let mut m = Matrix::new(self.nrows, self.ncols, self.field.clone());
        for (c, (a, b)) in m.data.iter_mut().zip(self.data.iter().zip(rhs.data.iter())) {
            *c = self.field.sub(a, b);
        }
        Ok(m)
    }

    /// Multiply two matrices, or report a shape mismatch. Inner products
    /// skip terms whose left factor is the exact zero element.
    pub fn try_mul(&self, rhs: &Matrix<F>) -> Result<Matrix<F>, MatrixError> {
        if self.ncols != rhs.nrows {
            return Err(MatrixError::DimensionMismatch);
        }

        let mut m = Matrix::new(self.nrows, rhs.ncols, self.field.clone());
        for r in 0..self.nrows {
            for k in 0..self.ncols {
                let e = &self[(r, k)];
                if F::is_zero(e) {
                    continue;
                }
                for c in 0..rhs.ncols {
                    let mut sum = std::mem::replace(&mut m[(r, c)], self.field.zero());
                    self.field.add_mul_assign(&mut sum, e, &rhs[(k, c)]);
                    m[(r, c)] = sum;
                }
            }
        }
        Ok(m)
    }

    /// Multiply every entry by the scalar `e`.
    pub fn mul_scalar(&self, e: &F::Element) -> Matrix<F> {
        Matrix {
            data: self.data.iter().map(|ee| self.field.mul(ee, e)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
            field: self.field.clone(),
        }
    }

    /// Write the persisted representation of the matrix: the row count, the
    /// column count and then the flat row-major element sequence, encoded by
    /// `write_element`. The order is normative for reconstruction.
    pub fn write_into<W: io::Write>(
        &self,
        dest: &mut W,
        mut write_element: impl FnMut(&F::Element, &mut W) -> io::Result<()>,
    ) -> io::Result<()> {
        dest.write_u32::<LittleEndian>(self.nrows)?;
        dest.write_u32::<LittleEndian>(self.ncols)?;
        for e in &self.data {
            write_element(e, dest)?;
        }
        Ok(())
    }

    /// Reconstruct a matrix written by [write_into](Matrix::write_into).
    pub fn read_from<R: io::Read>(
        source: &mut R,
        field: F,
        mut read_element: impl FnMut(&mut R) -> io::Result<F::Element>,
    ) -> io::Result<Matrix<F>> {
        let nrows = source.read_u32::<LittleEndian>()?;
        let ncols = source.read_u32::<LittleEndian>()?;
        let mut data = Vec::with_capacity(nrows as usize * ncols as usize);
        for _ in 0..nrows as usize * ncols as usize {
            data.push(read_element(source)?);
        }
        Ok(Matrix {
            data,
            nrows,
            ncols,
            field,
        })
    }

    /// Swap two rows in place.
    pub(crate) fn swap_rows(&mut self, r1: u32, r2: u32) {
        if r1 == r2 {
            return;
        }
        for c in 0..self.ncols {
            self.data
                .swap((r1 * self.ncols + c) as usize, (r2 * self.ncols + c) as usize);
        }
    }

    /// Swap two columns in place.
    pub(crate) fn swap_cols(&mut self, c1: u32, c2: u32) {
        if c1 == c2 {
            return;
        }
        for r in 0..self.nrows {
            self.data
                .swap((r * self.ncols + c1) as usize, (r * self.ncols + c2) as usize);
        }
    }
}

impl<F: ExpressionRing> Matrix<F> {
    /// Multiply every entry by the scalar expression `e`, rejecting scalars
    /// that do not commute.
    pub fn mul_expr(&self, e: &F::Element) -> Result<Matrix<F>, MatrixError> {
        if !self.field.is_commutative(e) {
            return Err(MatrixError::NonCommutativeScalar);
        }
        Ok(self.mul_scalar(e))
    }

    /// Apply `op` to every entry, allocating a new backing store only when
    /// some entry actually changes. Expression-level operations can be
    /// costly, so the unchanged case stays a cheap clone of the original.
    fn map_entries_lazy(&self, op: impl Fn(&F, &F::Element) -> F::Element) -> Matrix<F> {
        let mut changed: Option<Vec<F::Element>> = None;
        for (i, e) in self.data.iter().enumerate() {
            let x = op(&self.field, e);
            if let Some(v) = &mut changed {
                v.push(x);
                continue;
            }
            if x == *e {
                continue;
            }
            let mut v = Vec::with_capacity(self.data.len());
            v.extend(self.data[..i].iter().cloned());
            v.push(x);
            changed = Some(v);
        }
        match changed {
            Some(v) => Matrix {
                data: v,
                nrows: self.nrows,
                ncols: self.ncols,
                field: self.field.clone(),
            },
            None => self.clone(),
        }
    }

    /// Complex-conjugate every entry.
    pub fn conjugate(&self) -> Matrix<F> {
        self.map_entries_lazy(|f, e| f.conjugate(e))
    }

    /// The real part of every entry.
    pub fn real_part(&self) -> Matrix<F> {
        self.map_entries_lazy(|f, e| f.real_part(e))
    }

    /// The imaginary part of every entry.
    pub fn imag_part(&self) -> Matrix<F> {
        self.map_entries_lazy(|f, e| f.imag_part(e))
    }

    /// Substitute the `(symbol, replacement)` pairs of `repl` in every entry.
    pub fn substitute(&self, repl: &[(F::Element, F::Element)]) -> Matrix<F> {
        Matrix {
            data: self
                .data
                .iter()
                .map(|e| self.field.substitute(e, repl))
                .collect(),
            nrows: self.nrows,
            ncols: self.ncols,
            field: self.field.clone(),
        }
    }

    /// The sum of the diagonal elements. The result is normalized if it is a
    /// proper rational function and expanded otherwise.
    pub fn trace(&self) -> Result<F::Element, MatrixError> {
        if self.nrows != self.ncols {
            return Err(MatrixError::NotSquare);
        }
        let mut tr = self.field.zero();
        for r in 0..self.nrows {
            self.field.add_assign(&mut tr, &self[(r, r)]);
        }
        if self.field.is_rational_function(&tr) {
            Ok(self.field.normal(&tr))
        } else {
            Ok(self.field.expand(&tr))
        }
    }
}

impl<F: SymbolRing> Matrix<F> {
    /// Create a matrix of fresh, distinct symbols.
    pub fn symbolic(nrows: u32, ncols: u32, field: F) -> Matrix<F> {
        Matrix {
            data: (0..nrows as usize * ncols as usize)
                .map(|_| field.new_symbol())
                .collect(),
            nrows,
            ncols,
            field,
        }
    }

    /// Raise a square matrix to an integer power by binary exponentiation,
    /// walking the base-2 digits of the exponent from the least significant
    /// end. A negative exponent inverts the matrix first.
    pub fn pow(&self, expn: &F::Element) -> Result<Matrix<F>, MatrixError> {
        if self.nrows != self.ncols {
            return Err(MatrixError::NotSquare);
        }
        let Some(n) = self.field.to_i64(expn) else {
            return Err(MatrixError::UnsupportedExponent);
        };

        let mut a = if n < 0 {
            self.inverse(EliminationAlgo::Automatic)?
        } else {
            self.clone()
        };
        let mut b = n.unsigned_abs();
        let mut c = Matrix::identity(self.nrows, self.field.clone());
        if b == 0 {
            return Ok(c);
        }
        while b != 1 {
            if b & 1 == 1 {
                c = c.try_mul(&a)?;
                b -= 1;
            }
            b /= 2;
            a = a.try_mul(&a)?;
        }
        a.try_mul(&c)
    }
}

impl<F: Ring> Index<u32> for Matrix<F> {
    type Output = [F::Element];

    /// Get the `index`th row of the matrix.
    #[inline]
    fn index(&self, index: u32) -> &Self::Output {
        &self.data[index as usize * self.ncols as usize..(index as usize + 1) * self.ncols as usize]
    }
}

impl<F: Ring> Index<(u32, u32)> for Matrix<F> {
    type Output = F::Element;

    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index(&self, index: (u32, u32)) -> &Self::Output {
        &self.data[(index.0 * self.ncols + index.1) as usize]
    }
}

impl<F: Ring> IndexMut<(u32, u32)> for Matrix<F> {
    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index_mut(&mut self, index: (u32, u32)) -> &mut F::Element {
        &mut self.data[(index.0 * self.ncols + index.1) as usize]
    }
}

impl<F: Ring> InternalOrdering for Matrix<F> {
    /// Compare the row count, then the column count, then the entries in
    /// row-major order, short-circuiting on the first difference.
    fn internal_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.nrows
            .cmp(&other.nrows)
            .then_with(|| self.ncols.cmp(&other.ncols))
            .then_with(|| {
                for (a, b) in self.data.iter().zip(&other.data) {
                    match a.internal_cmp(b) {
                        std::cmp::Ordering::Equal => {}
                        ord => return ord,
                    }
                }
                std::cmp::Ordering::Equal
            })
    }
}

impl<F: Ring> Display for Matrix<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        MatrixPrinter::new(self).fmt(f)
    }
}

impl<F: Ring> Add<&Matrix<F>> for &Matrix<F> {
    type Output = Matrix<F>;

    /// Add two matrices.
    fn add(self, rhs: &Matrix<F>) -> Self::Output {
        match self.try_add(rhs) {
            Ok(m) => m,
            Err(_) => panic!(
                "Cannot add matrices of different dimensions: ({},{}) vs ({},{})",
                self.nrows, self.ncols, rhs.nrows, rhs.ncols
            ),
        }
    }
}

impl<F: Ring> Sub<&Matrix<F>> for &Matrix<F> {
    type Output = Matrix<F>;

    /// Subtract two matrices.
    fn sub(self, rhs: &Matrix<F>) -> Self::Output {
        match self.try_sub(rhs) {
            Ok(m) => m,
            Err(_) => panic!(
                "Cannot subtract matrices of different dimensions: ({},{}) vs ({},{})",
                self.nrows, self.ncols, rhs.nrows, rhs.ncols
            ),
        }
    }
}

impl<F: Ring> Mul<&Matrix<F>> for &Matrix<F> {
    type Output = Matrix<F>;

    /// Multiply two matrices.
    fn mul(self, rhs: &Matrix<F>) -> Self::Output {
        match self.try_mul(rhs) {
            Ok(m) => m,
            Err(_) => panic!(
                "Cannot multiply matrices because of a dimension mismatch: ({},{}) vs ({},{})",
                self.nrows, self.ncols, rhs.nrows, rhs.ncols
            ),
        }
    }
}

impl<F: Ring> Neg for Matrix<F> {
    type Output = Matrix<F>;

    /// Negate each entry of the matrix.
    fn neg(mut self) -> Self::Output {
        for e in &mut self.data {
            *e = self.field.neg(e);
        }

        self
    }
}
