use symmat::domains::expression::{symbol, Expr, ExpressionField, EX};
use symmat::domains::{ExpressionRing, Ring};
use symmat::matrix::{DeterminantAlgo, EliminationAlgo, Matrix};

const DET_ALGOS: [DeterminantAlgo; 5] = [
    DeterminantAlgo::Automatic,
    DeterminantAlgo::Gauss,
    DeterminantAlgo::Bareiss,
    DeterminantAlgo::DivisionFree,
    DeterminantAlgo::Laplace,
];

const ELIM_ALGOS: [EliminationAlgo; 5] = [
    EliminationAlgo::Automatic,
    EliminationAlgo::Gauss,
    EliminationAlgo::DivisionFree,
    EliminationAlgo::Bareiss,
    EliminationAlgo::Markowitz,
];

fn sym_matrix(entries: Vec<Expr>, n: u32) -> Matrix<ExpressionField> {
    Matrix::from_list(entries, n, n, EX)
}

#[test]
fn determinant_is_multiplicative() {
    let (a, b, c) = (symbol("a"), symbol("b"), symbol("c"));
    let m1 = sym_matrix(vec![a.clone(), EX.one(), EX.one(), b.clone()], 2);
    let m2 = sym_matrix(vec![b.clone(), EX.nth(2), EX.nth(3), c.clone()], 2);

    let product = m1.try_mul(&m2).unwrap();
    let det_product = product.determinant(DeterminantAlgo::Automatic).unwrap();
    let dets_multiplied = EX.mul(
        &m1.determinant(DeterminantAlgo::Automatic).unwrap(),
        &m2.determinant(DeterminantAlgo::Automatic).unwrap(),
    );
    assert_eq!(det_product, dets_multiplied);
}

#[test]
fn determinant_algorithms_agree_on_symbolic_3x3() {
    let (a, b, c) = (symbol("a"), symbol("b"), symbol("c"));
    let m = sym_matrix(
        vec![
            a.clone(),
            b.clone(),
            EX.one(),
            c.clone(),
            a.clone(),
            EX.zero(),
            EX.one(),
            EX.nth(2),
            b.clone(),
        ],
        3,
    );

    let reference = m.determinant(DeterminantAlgo::Laplace).unwrap();
    for algo in DET_ALGOS {
        assert_eq!(m.determinant(algo).unwrap(), reference, "{:?}", algo);
    }
}

#[test]
fn transpose_is_an_involution() {
    let (a, b) = (symbol("a"), symbol("b"));
    let m = Matrix::from_list(
        vec![a.clone(), b.clone(), EX.one(), EX.nth(2), a, b],
        2,
        3,
        EX,
    );
    assert_eq!(m.transpose().transpose(), m);
}

#[test]
fn inverse_multiplies_to_identity_from_both_sides() {
    let (a, b) = (symbol("a"), symbol("b"));
    let m = sym_matrix(vec![a.clone(), EX.one(), EX.one(), b.clone()], 2);

    let inv = m.inverse(EliminationAlgo::Automatic).unwrap();
    assert_eq!(m.try_mul(&inv).unwrap(), Matrix::identity(2, EX));
    assert_eq!(inv.try_mul(&m).unwrap(), Matrix::identity(2, EX));
}

#[test]
fn rank_is_elimination_algorithm_independent() {
    let x = symbol("x");
    // rank 2: the third row is the sum of the first two
    let m = sym_matrix(
        vec![
            x.clone(),
            EX.one(),
            EX.zero(),
            EX.zero(),
            x.clone(),
            EX.one(),
            x.clone(),
            EX.add(&x, &EX.one()),
            EX.one(),
        ],
        3,
    );
    for algo in ELIM_ALGOS {
        assert_eq!(m.rank(algo), 2, "{:?}", algo);
    }
}

#[test]
fn solve_reproduces_the_unique_solution() {
    let a = sym_matrix(
        vec![
            EX.nth(2),
            EX.one(),
            EX.one(),
            EX.one(),
            EX.nth(3),
            EX.nth(2),
            EX.one(),
            EX.zero(),
            EX.zero(),
        ],
        3,
    );
    // x = (1, 2, -1)
    let expected = Matrix::from_list(vec![EX.one(), EX.nth(2), EX.nth(-1)], 3, 1, EX);
    let b = a.try_mul(&expected).unwrap();
    let vars = Matrix::from_list(vec![symbol("u"), symbol("v"), symbol("w")], 3, 1, EX);

    for algo in ELIM_ALGOS {
        let sol = a.solve(&vars, &b, algo).unwrap();
        assert_eq!(sol, expected, "{:?}", algo);
    }
}

#[test]
fn solve_with_column_permutation() {
    // Markowitz elimination swaps columns; the solution must still come out
    // in the original variable order
    let a = sym_matrix(vec![EX.zero(), EX.one(), EX.one(), EX.zero()], 2);
    let b = Matrix::from_list(vec![EX.nth(2), EX.nth(3)], 2, 1, EX);
    let vars = Matrix::from_list(vec![symbol("u"), symbol("v")], 2, 1, EX);

    let sol = a.solve(&vars, &b, EliminationAlgo::Markowitz).unwrap();
    assert_eq!(sol.data, vec![EX.nth(3), EX.nth(2)]);
}

#[test]
fn solve_underdetermined_symbolically() {
    // a 1x2 system: one equation, two unknowns
    let a = Matrix::from_list(vec![EX.one(), EX.nth(2)], 1, 2, EX);
    let b = Matrix::from_list(vec![EX.nth(4)], 1, 1, EX);
    let vars = Matrix::from_list(vec![symbol("u"), symbol("v")], 2, 1, EX);
    let v = symbol("v");

    let sol = a.solve(&vars, &b, EliminationAlgo::Automatic).unwrap();
    // u = 4 - 2v with v free
    assert_eq!(sol[(0, 0)], EX.sub(&EX.nth(4), &EX.mul(&EX.nth(2), &v)));
    assert_eq!(sol[(1, 0)], v);

    // substituting the solution back satisfies the equation
    let residual = a.try_mul(&sol).unwrap();
    assert_eq!(residual[(0, 0)], EX.nth(4));
}

#[test]
fn characteristic_polynomial_at_zero_is_the_determinant() {
    let l = symbol("lambda");

    // numeric path (Leverrier)
    let a = sym_matrix(vec![1.into(), 2.into(), 3.into(), 4.into()], 2);
    let p = a.charpoly(&l).unwrap();
    assert_eq!(
        EX.substitute(&p, &[(l.clone(), EX.zero())]),
        a.determinant(DeterminantAlgo::Automatic).unwrap()
    );

    // symbolic path
    let x = symbol("x");
    let s = sym_matrix(vec![x.clone(), EX.one(), EX.nth(2), x.clone()], 2);
    let p = s.charpoly(&l).unwrap();
    assert_eq!(
        EX.substitute(&p, &[(l.clone(), EX.zero())]),
        s.determinant(DeterminantAlgo::Automatic).unwrap()
    );
}

#[test]
fn power_via_inverse_agrees_with_solve() {
    let a = sym_matrix(vec![EX.nth(2), EX.one(), EX.zero(), EX.one()], 2);
    let inv = a.inverse(EliminationAlgo::Automatic).unwrap();
    let p = a.pow(&EX.nth(-2)).unwrap();
    assert_eq!(p, inv.try_mul(&inv).unwrap());
}
