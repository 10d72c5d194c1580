//! A reference implementation of the expression contract.
//!
//! Expressions are canonical quotients of multivariate polynomials over the
//! rational numbers. This is deliberately the smallest representation that
//! exercises every operation the matrix engine needs: exact zero testing,
//! expansion, rationalization, substitution and fresh symbols. A full-blown
//! term rewriter with transcendental functions is a collaborator's concern
//! and plugs in through the same traits.
//!
//! Reduction to lowest terms uses rational-content extraction plus exact
//! polynomial division, which recovers the quotient whenever the denominator
//! divides the numerator. Quotients that share a proper polynomial factor may
//! stay unreduced; the zero test, which is all the engine relies on, is exact
//! regardless.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Mutex;

use ahash::{HashMap, HashMapExt};
use rug::{Integer, Rational};
use smallvec::SmallVec;

use super::{ExpressionRing, Field, InternalOrdering, Replacements, Ring, SymbolRing};

/// The exponent list of a monomial: `(symbol id, power)` pairs with positive
/// powers, sorted by symbol id.
type Exponents = SmallVec<[(u32, u32); 4]>;

static SYMBOLS: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Intern `name` in the global symbol registry and return its expression.
pub fn symbol(name: &str) -> Expr {
    let mut table = SYMBOLS.lock().unwrap();
    let id = match table.iter().position(|s| s == name) {
        Some(i) => i as u32,
        None => {
            table.push(name.to_owned());
            (table.len() - 1) as u32
        }
    };
    Expr::from_symbol_id(id)
}

fn fresh_symbol_id() -> u32 {
    let mut table = SYMBOLS.lock().unwrap();
    let mut n = table.len();
    loop {
        let name = format!("tmp{}", n);
        if !table.iter().any(|s| *s == name) {
            table.push(name);
            return (table.len() - 1) as u32;
        }
        n += 1;
    }
}

fn symbol_name(id: u32) -> String {
    let table = SYMBOLS.lock().unwrap();
    match table.get(id as usize) {
        Some(name) => name.clone(),
        None => format!("#{}", id),
    }
}

/// Compare two monomials in the lexicographic order with lower symbol ids
/// ranked higher. The order is total, multiplicative and well-founded, which
/// is what exact polynomial division needs to terminate.
fn cmp_monomials(a: &Exponents, b: &Exponents) -> Ordering {
    let mut i = 0;
    let mut j = 0;
    loop {
        match (a.get(i), b.get(j)) {
            (None, None) => return Ordering::Equal,
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (Some(&(ida, pa)), Some(&(idb, pb))) => {
                if ida < idb {
                    return Ordering::Greater;
                }
                if idb < ida {
                    return Ordering::Less;
                }
                if pa != pb {
                    return pa.cmp(&pb);
                }
                i += 1;
                j += 1;
            }
        }
    }
}

fn mul_exps(a: &Exponents, b: &Exponents) -> Exponents {
    let mut out = Exponents::new();
    let mut i = 0;
    let mut j = 0;
    while i < a.len() || j < b.len() {
        match (a.get(i), b.get(j)) {
            (Some(&(ida, pa)), Some(&(idb, pb))) => {
                if ida == idb {
                    out.push((ida, pa + pb));
                    i += 1;
                    j += 1;
                } else if ida < idb {
                    out.push((ida, pa));
                    i += 1;
                } else {
                    out.push((idb, pb));
                    j += 1;
                }
            }
            (Some(&t), None) => {
                out.push(t);
                i += 1;
            }
            (None, Some(&t)) => {
                out.push(t);
                j += 1;
            }
            (None, None) => unreachable!(),
        }
    }
    out
}

/// Divide monomial `a` by `b`, or return `None` when some power of `b` is
/// not contained in `a`.
fn div_exps(a: &Exponents, b: &Exponents) -> Option<Exponents> {
    let mut out = Exponents::new();
    let mut i = 0;
    for &(idb, pb) in b {
        loop {
            let &(ida, pa) = a.get(i)?;
            if ida < idb {
                out.push((ida, pa));
                i += 1;
                continue;
            }
            if ida > idb || pa < pb {
                return None;
            }
            if pa > pb {
                out.push((ida, pa - pb));
            }
            i += 1;
            break;
        }
    }
    out.extend(a[i..].iter().copied());
    Some(out)
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct Term {
    coeff: Rational,
    exps: Exponents,
}

/// A multivariate polynomial over Q: terms with nonzero coefficients, sorted
/// by descending monomial.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct Poly {
    terms: Vec<Term>,
}

impl Poly {
    fn zero() -> Poly {
        Poly { terms: vec![] }
    }

    fn one() -> Poly {
        Poly::constant(Rational::from(1))
    }

    fn constant(c: Rational) -> Poly {
        if c == 0 {
            Poly::zero()
        } else {
            Poly {
                terms: vec![Term {
                    coeff: c,
                    exps: Exponents::new(),
                }],
            }
        }
    }

    fn symbol(id: u32) -> Poly {
        Poly {
            terms: vec![Term {
                coeff: Rational::from(1),
                exps: SmallVec::from_slice(&[(id, 1)]),
            }],
        }
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    fn is_constant(&self) -> bool {
        self.terms.is_empty() || (self.terms.len() == 1 && self.terms[0].exps.is_empty())
    }

    /// The constant value of the polynomial, if it is constant.
    fn as_constant(&self) -> Option<Rational> {
        if self.terms.is_empty() {
            Some(Rational::new())
        } else if self.is_constant() {
            Some(self.terms[0].coeff.clone())
        } else {
            None
        }
    }

    fn merge(a: &Poly, b: &Poly, negate_b: bool) -> Poly {
        let mut out = Vec::with_capacity(a.terms.len() + b.terms.len());
        let mut i = 0;
        let mut j = 0;
        let signed = |t: &Term| {
            if negate_b {
                Term {
                    coeff: Rational::from(-&t.coeff),
                    exps: t.exps.clone(),
                }
            } else {
                t.clone()
            }
        };
        while i < a.terms.len() && j < b.terms.len() {
            match cmp_monomials(&a.terms[i].exps, &b.terms[j].exps) {
                Ordering::Greater => {
                    out.push(a.terms[i].clone());
                    i += 1;
                }
                Ordering::Less => {
                    out.push(signed(&b.terms[j]));
                    j += 1;
                }
                Ordering::Equal => {
                    let c = if negate_b {
                        Rational::from(&a.terms[i].coeff - &b.terms[j].coeff)
                    } else {
                        Rational::from(&a.terms[i].coeff + &b.terms[j].coeff)
                    };
                    if c != 0 {
                        out.push(Term {
                            coeff: c,
                            exps: a.terms[i].exps.clone(),
                        });
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend(a.terms[i..].iter().cloned());
        out.extend(b.terms[j..].iter().map(|t| signed(t)));
        Poly { terms: out }
    }

    fn add(&self, other: &Poly) -> Poly {
        Poly::merge(self, other, false)
    }

    fn sub(&self, other: &Poly) -> Poly {
        Poly::merge(self, other, true)
    }

    fn neg(&self) -> Poly {
        Poly {
            terms: self
                .terms
                .iter()
                .map(|t| Term {
                    coeff: Rational::from(-&t.coeff),
                    exps: t.exps.clone(),
                })
                .collect(),
        }
    }

    /// Multiply by a single term. The monomial order is translation
    /// invariant, so the term order is preserved.
    fn mul_term(&self, t: &Term) -> Poly {
        Poly {
            terms: self
                .terms
                .iter()
                .map(|s| Term {
                    coeff: Rational::from(&s.coeff * &t.coeff),
                    exps: mul_exps(&s.exps, &t.exps),
                })
                .collect(),
        }
    }

    fn mul(&self, other: &Poly) -> Poly {
        if self.is_zero() || other.is_zero() {
            return Poly::zero();
        }
        let mut acc: HashMap<Exponents, Rational> = HashMap::new();
        for s in &self.terms {
            for t in &other.terms {
                let e = mul_exps(&s.exps, &t.exps);
                let c = Rational::from(&s.coeff * &t.coeff);
                *acc.entry(e).or_insert_with(Rational::new) += c;
            }
        }
        let mut terms: Vec<Term> = acc
            .into_iter()
            .filter(|(_, c)| *c != 0)
            .map(|(exps, coeff)| Term { coeff, exps })
            .collect();
        terms.sort_unstable_by(|x, y| cmp_monomials(&y.exps, &x.exps));
        Poly { terms }
    }

    fn pow(&self, e: u64) -> Poly {
        let mut res = Poly::one();
        let mut base = self.clone();
        let mut e = e;
        while e > 0 {
            if e & 1 == 1 {
                res = res.mul(&base);
            }
            e >>= 1;
            if e > 0 {
                base = base.mul(&base);
            }
        }
        res
    }

    /// Exact division: the quotient `self / div` when the remainder is zero,
    /// `None` otherwise. Leading monomials strictly decrease, so the loop
    /// terminates for any monomial order.
    fn div_exact(&self, div: &Poly) -> Option<Poly> {
        if div.is_zero() {
            return None;
        }
        if self.is_zero() {
            return Some(Poly::zero());
        }
        let lead = &div.terms[0];
        let mut rem = self.clone();
        let mut quot = Vec::new();
        while !rem.is_zero() {
            let head = &rem.terms[0];
            let exps = div_exps(&head.exps, &lead.exps)?;
            let t = Term {
                coeff: Rational::from(&head.coeff / &lead.coeff),
                exps,
            };
            rem = rem.sub(&div.mul_term(&t));
            quot.push(t);
        }
        Some(Poly { terms: quot })
    }

    fn scale(&mut self, k: &Rational) {
        for t in &mut self.terms {
            t.coeff *= k;
        }
    }
}

fn cmp_poly(a: &Poly, b: &Poly) -> Ordering {
    match a.terms.len().cmp(&b.terms.len()) {
        Ordering::Equal => {}
        ord => return ord,
    }
    for (x, y) in a.terms.iter().zip(&b.terms) {
        match cmp_monomials(&x.exps, &y.exps).then_with(|| x.coeff.cmp(&y.coeff)) {
            Ordering::Equal => {}
            ord => return ord,
        }
    }
    Ordering::Equal
}

/// Scale `num` and `den` so that `den` has coprime integer coefficients and
/// a positive leading coefficient. This pins down the representation of a
/// quotient up to the (unreduced) common polynomial factors.
fn normalize_den(num: &mut Poly, den: &mut Poly) {
    let mut l = Integer::from(1);
    for t in &den.terms {
        l.lcm_mut(t.coeff.denom());
    }
    let mut k = Rational::from(l);
    let mut g = Integer::new();
    for t in &den.terms {
        g.gcd_mut(Rational::from(&t.coeff * &k).numer());
    }
    if g != 0 {
        k /= Rational::from(g);
    }
    if Rational::from(&den.terms[0].coeff * &k) < 0 {
        k = -k;
    }
    num.scale(&k);
    den.scale(&k);
}

/// A symbolic expression: a canonical quotient of two polynomials. A zero
/// numerator forces a unit denominator, and a constant denominator is always
/// folded into the numerator, so numbers and polynomials are recognizable by
/// inspection.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Expr {
    num: Poly,
    den: Poly,
}

impl Expr {
    fn make(num: Poly, den: Poly) -> Expr {
        if den.is_zero() {
            panic!("Expression division by zero");
        }
        if num.is_zero() {
            return Expr {
                num: Poly::zero(),
                den: Poly::one(),
            };
        }
        if let Some(c) = den.as_constant() {
            let mut num = num;
            num.scale(&Rational::from(c.recip_ref()));
            return Expr {
                num,
                den: Poly::one(),
            };
        }
        if let Some(q) = num.div_exact(&den) {
            return Expr {
                num: q,
                den: Poly::one(),
            };
        }
        let mut num = num;
        let mut den = den;
        normalize_den(&mut num, &mut den);
        Expr { num, den }
    }

    fn from_symbol_id(id: u32) -> Expr {
        Expr {
            num: Poly::symbol(id),
            den: Poly::one(),
        }
    }

    /// Create a constant expression.
    pub fn constant(c: Rational) -> Expr {
        Expr {
            num: Poly::constant(c),
            den: Poly::one(),
        }
    }

    /// Create a rational constant `n / d`.
    pub fn rational(n: i64, d: i64) -> Expr {
        Expr::constant(Rational::from((n, d)))
    }

    fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    fn add(&self, other: &Expr) -> Expr {
        if self.den == other.den {
            Expr::make(self.num.add(&other.num), self.den.clone())
        } else {
            Expr::make(
                self.num.mul(&other.den).add(&other.num.mul(&self.den)),
                self.den.mul(&other.den),
            )
        }
    }

    fn sub(&self, other: &Expr) -> Expr {
        if self.den == other.den {
            Expr::make(self.num.sub(&other.num), self.den.clone())
        } else {
            Expr::make(
                self.num.mul(&other.den).sub(&other.num.mul(&self.den)),
                self.den.mul(&other.den),
            )
        }
    }

    fn mul(&self, other: &Expr) -> Expr {
        Expr::make(self.num.mul(&other.num), self.den.mul(&other.den))
    }

    fn div(&self, other: &Expr) -> Expr {
        Expr::make(self.num.mul(&other.den), self.den.mul(&other.num))
    }

    fn neg(&self) -> Expr {
        Expr {
            num: self.num.neg(),
            den: self.den.clone(),
        }
    }

    fn pow(&self, e: u64) -> Expr {
        Expr::make(self.num.pow(e), self.den.pow(e))
    }

    /// The symbol id, if the expression is a single symbol.
    fn as_symbol_id(&self) -> Option<u32> {
        if !self.den.is_constant() || self.num.terms.len() != 1 {
            return None;
        }
        let t = &self.num.terms[0];
        if t.coeff == 1 && t.exps.len() == 1 && t.exps[0].1 == 1 {
            Some(t.exps[0].0)
        } else {
            None
        }
    }

    /// The numeric value, if the expression is an explicit number.
    pub fn as_rational(&self) -> Option<Rational> {
        if self.den.is_constant() {
            self.num.as_constant()
        } else {
            None
        }
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Expr {
        Expr::constant(Rational::from(n))
    }
}

impl InternalOrdering for Expr {
    fn internal_cmp(&self, other: &Self) -> Ordering {
        cmp_poly(&self.num, &other.num).then_with(|| cmp_poly(&self.den, &other.den))
    }
}

fn fmt_poly(p: &Poly, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if p.terms.is_empty() {
        return write!(f, "0");
    }
    for (i, t) in p.terms.iter().enumerate() {
        let neg = t.coeff < 0;
        if i == 0 {
            if neg {
                write!(f, "-")?;
            }
        } else if neg {
            write!(f, " - ")?;
        } else {
            write!(f, " + ")?;
        }
        let c = Rational::from(t.coeff.abs_ref());
        if t.exps.is_empty() {
            write!(f, "{}", c)?;
        } else {
            let mut sep = "";
            if c != 1 {
                write!(f, "{}", c)?;
                sep = "*";
            }
            for &(id, pw) in &t.exps {
                write!(f, "{}{}", sep, symbol_name(id))?;
                if pw > 1 {
                    write!(f, "^{}", pw)?;
                }
                sep = "*";
            }
        }
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.is_constant() {
            fmt_poly(&self.num, f)
        } else {
            write!(f, "(")?;
            fmt_poly(&self.num, f)?;
            write!(f, ")/(")?;
            fmt_poly(&self.den, f)?;
            write!(f, ")")
        }
    }
}

/// The ring of symbolic expressions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ExpressionField;

/// The ring of symbolic expressions.
pub const EX: ExpressionField = ExpressionField;

impl Ring for ExpressionField {
    type Element = Expr;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.add(b)
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.sub(b)
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.mul(b)
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = a.add(b);
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = a.sub(b);
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = a.mul(b);
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = a.add(&b.mul(c));
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = a.sub(&b.mul(c));
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        a.neg()
    }

    fn zero(&self) -> Self::Element {
        Expr {
            num: Poly::zero(),
            den: Poly::one(),
        }
    }

    fn one(&self) -> Self::Element {
        Expr {
            num: Poly::one(),
            den: Poly::one(),
        }
    }

    fn nth(&self, n: i64) -> Self::Element {
        Expr::constant(Rational::from(n))
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        b.pow(e)
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        a.as_rational().map(|r| r == 1).unwrap_or(false)
    }
}

impl Field for ExpressionField {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.div(b)
    }

    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = a.div(b);
    }

    fn inv(&self, a: &Self::Element) -> Self::Element {
        self.one().div(a)
    }
}

impl ExpressionRing for ExpressionField {
    fn expand(&self, e: &Self::Element) -> Self::Element {
        // quotients of expanded polynomials are already expanded
        e.clone()
    }

    fn normal(&self, e: &Self::Element) -> Self::Element {
        e.clone()
    }

    fn is_numeric(&self, e: &Self::Element) -> bool {
        e.as_rational().is_some()
    }

    fn is_rational_function(&self, e: &Self::Element) -> bool {
        !e.den.is_constant()
    }

    fn to_rational(
        &self,
        e: &Self::Element,
        _repl: &mut Replacements<Self>,
    ) -> (Self::Element, Self::Element) {
        // every expression of this domain is rational in its symbols, so the
        // replacement table stays empty
        (
            Expr {
                num: e.num.clone(),
                den: Poly::one(),
            },
            Expr {
                num: e.den.clone(),
                den: Poly::one(),
            },
        )
    }

    fn substitute(
        &self,
        e: &Self::Element,
        repl: &[(Self::Element, Self::Element)],
    ) -> Self::Element {
        if repl.is_empty() {
            return e.clone();
        }
        let mut map: HashMap<u32, Expr> = HashMap::new();
        for (sym, rep) in repl {
            if let Some(id) = sym.as_symbol_id() {
                map.insert(id, rep.clone());
            }
        }
        let eval = |p: &Poly| {
            let mut acc = self.zero();
            for t in &p.terms {
                let mut prod = Expr::constant(t.coeff.clone());
                for &(id, pw) in &t.exps {
                    let base = match map.get(&id) {
                        Some(r) => r.clone(),
                        None => Expr::from_symbol_id(id),
                    };
                    prod = prod.mul(&base.pow(pw as u64));
                }
                acc = acc.add(&prod);
            }
            acc
        };
        eval(&e.num).div(&eval(&e.den))
    }

    fn cmp_abs(&self, a: &Self::Element, b: &Self::Element) -> Option<Ordering> {
        let (a, b) = (a.as_rational()?, b.as_rational()?);
        Some(Rational::from(a.abs_ref()).cmp(&Rational::from(b.abs_ref())))
    }

    fn to_i64(&self, e: &Self::Element) -> Option<i64> {
        let r = e.as_rational()?;
        if r.is_integer() {
            r.numer().to_i64()
        } else {
            None
        }
    }

    fn conjugate(&self, e: &Self::Element) -> Self::Element {
        // all coefficients are rational, so every expression is real
        e.clone()
    }

    fn real_part(&self, e: &Self::Element) -> Self::Element {
        e.clone()
    }

    fn imag_part(&self, _e: &Self::Element) -> Self::Element {
        self.zero()
    }
}

impl SymbolRing for ExpressionField {
    fn is_symbol(&self, e: &Self::Element) -> bool {
        e.as_symbol_id().is_some()
    }

    fn new_symbol(&self) -> Self::Element {
        Expr::from_symbol_id(fresh_symbol_id())
    }
}

#[cfg(test)]
mod test {
    use super::{symbol, Expr, ExpressionField, EX};
    use crate::domains::{ExpressionRing, Field, InternalOrdering, Ring, SymbolRing};
    use rug::Rational;
    use std::cmp::Ordering;

    #[test]
    fn symbols() {
        let x = symbol("x");
        assert_eq!(x, symbol("x"));
        assert!(EX.is_symbol(&x));
        assert!(!EX.is_symbol(&EX.mul(&x, &x)));

        let t = EX.new_symbol();
        assert_ne!(t, x);
        assert_ne!(t, EX.new_symbol());
    }

    #[test]
    fn polynomial_arithmetic() {
        let x = symbol("x");
        let one = EX.one();

        // (x + 1) * (x - 1) == x^2 - 1
        let p = EX.mul(&EX.add(&x, &one), &EX.sub(&x, &one));
        assert_eq!(p, EX.sub(&EX.pow(&x, 2), &one));

        // x - x == 0
        assert!(ExpressionField::is_zero(&EX.sub(&x, &x)));

        let mut acc = EX.nth(3);
        EX.sub_mul_assign(&mut acc, &x, &EX.nth(2));
        assert_eq!(acc, EX.sub(&EX.nth(3), &EX.mul(&EX.nth(2), &x)));
    }

    #[test]
    fn exact_division() {
        let x = symbol("x");
        let one = EX.one();

        // (x^2 + 2x + 1) / (x + 1) == x + 1
        let num = EX.add(&EX.add(&EX.pow(&x, 2), &EX.mul(&EX.nth(2), &x)), &one);
        let q = EX.div(&num, &EX.add(&x, &one));
        assert_eq!(q, EX.add(&x, &one));
        assert!(!EX.is_rational_function(&q));

        // x / x == 1
        assert!(EX.is_one(&EX.div(&x, &x)));
    }

    #[test]
    fn proper_quotients() {
        let x = symbol("x");
        let y = symbol("y");

        let r = EX.div(&y, &x);
        assert!(EX.is_rational_function(&r));
        assert!(!EX.is_numeric(&r));

        // y/x + y/x == 2y/x
        let s = EX.add(&r, &r);
        assert_eq!(s, EX.div(&EX.mul(&EX.nth(2), &y), &x));

        // y/x * x == y
        assert_eq!(EX.mul(&r, &x), y);

        let mut repl = vec![];
        let (num, den) = EX.to_rational(&r, &mut repl);
        assert_eq!(num, y);
        assert_eq!(den, x);
        assert!(repl.is_empty());
    }

    #[test]
    fn substitution() {
        let x = symbol("x");
        let y = symbol("y");
        let one = EX.one();

        // x^2 with x -> y + 1 becomes y^2 + 2y + 1
        let e = EX.pow(&x, 2);
        let r = EX.substitute(&e, &[(x.clone(), EX.add(&y, &one))]);
        let expected = EX.add(&EX.add(&EX.pow(&y, 2), &EX.mul(&EX.nth(2), &y)), &one);
        assert_eq!(r, expected);
    }

    #[test]
    fn numeric_classification() {
        let half = Expr::rational(1, 2);
        assert!(EX.is_numeric(&half));
        assert_eq!(EX.to_i64(&half), None);
        assert_eq!(EX.to_i64(&EX.nth(-4)), Some(-4));
        assert_eq!(half.as_rational(), Some(Rational::from((1, 2))));

        assert_eq!(
            EX.cmp_abs(&EX.nth(-3), &EX.nth(2)),
            Some(Ordering::Greater)
        );
        assert_eq!(EX.cmp_abs(&symbol("x"), &EX.nth(2)), None);

        assert!(ExpressionField::is_zero(&EX.imag_part(&half)));
        assert_eq!(EX.real_part(&half), half);
        assert_eq!(EX.conjugate(&half), half);
    }

    #[test]
    fn ordering_is_total_on_distinct_values() {
        let x = symbol("x");
        let y = symbol("y");
        assert_eq!(x.internal_cmp(&x), Ordering::Equal);
        assert_ne!(x.internal_cmp(&y), Ordering::Equal);
        assert_eq!(
            x.internal_cmp(&y),
            y.internal_cmp(&x).reverse()
        );
    }

    #[test]
    fn display() {
        let x = symbol("x");
        let y = symbol("y");
        let e = EX.sub(&EX.mul(&EX.nth(3), &EX.pow(&x, 2)), &y);
        assert_eq!(format!("{}", e), "3*x^2 - y");
        assert_eq!(format!("{}", EX.div(&y, &x)), "(y)/(x)");
        assert_eq!(format!("{}", EX.zero()), "0");
    }
}
