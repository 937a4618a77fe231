use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use matrica::{DenseMatrix, DiagonalMatrix, MatrixLayout, SparseMatrix, TridiagonalMatrix};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn tridiagonal(n: usize) -> TridiagonalMatrix<f64> {
    let lower: Vec<f64> = (1..n).map(|i| -1.0 / i as f64).collect();
    let diag: Vec<f64> = (0..n).map(|i| 4.0 + i as f64 * 0.01).collect();
    let upper: Vec<f64> = (1..n).map(|i| 1.0 / (i + 1) as f64).collect();
    TridiagonalMatrix::from_bands(&lower, &diag, &upper).unwrap()
}

fn diagonal(n: usize) -> DiagonalMatrix<f64> {
    DiagonalMatrix::from_diagonal((0..n).map(|i| 1.0 + (i % 7) as f64 * 0.1).collect())
}

const SIZES: [usize; 3] = [10, 50, 200];

// ---------------------------------------------------------------------------
// Determinant: structural fast path vs dense LU
// ---------------------------------------------------------------------------

fn det_diagonal(c: &mut Criterion) {
    let mut g = c.benchmark_group("det_diagonal");
    for n in SIZES {
        let d = diagonal(n);
        let dense = d.to_dense();
        g.bench_with_input(BenchmarkId::new("diagonal", n), &d, |b, d| {
            b.iter(|| std::hint::black_box(d).det())
        });
        g.bench_with_input(BenchmarkId::new("dense", n), &dense, |b, a| {
            b.iter(|| std::hint::black_box(a).det())
        });
    }
    g.finish();
}

fn det_tridiagonal(c: &mut Criterion) {
    let mut g = c.benchmark_group("det_tridiagonal");
    for n in SIZES {
        let t = tridiagonal(n);
        let dense = t.to_dense();
        let sparse = SparseMatrix::from_dense(&dense);
        g.bench_with_input(BenchmarkId::new("tridiagonal", n), &t, |b, t| {
            b.iter(|| std::hint::black_box(t).det())
        });
        g.bench_with_input(BenchmarkId::new("dense", n), &dense, |b, a| {
            b.iter(|| std::hint::black_box(a).det())
        });
        g.bench_with_input(BenchmarkId::new("sparse", n), &sparse, |b, s| {
            b.iter(|| std::hint::black_box(s).det())
        });
    }
    g.finish();
}

// ---------------------------------------------------------------------------
// Norms
// ---------------------------------------------------------------------------

fn norm_inf(c: &mut Criterion) {
    let mut g = c.benchmark_group("norm_inf");
    for n in SIZES {
        let t = tridiagonal(n);
        let dense = t.to_dense();
        let sparse = SparseMatrix::from_dense(&dense);
        g.bench_with_input(BenchmarkId::new("tridiagonal", n), &t, |b, t| {
            b.iter(|| std::hint::black_box(t).norm_inf())
        });
        g.bench_with_input(BenchmarkId::new("dense", n), &dense, |b, a| {
            b.iter(|| std::hint::black_box(a).norm_inf())
        });
        g.bench_with_input(BenchmarkId::new("sparse", n), &sparse, |b, s| {
            b.iter(|| std::hint::black_box(s).norm_inf())
        });
    }
    g.finish();
}

fn norm_frobenius(c: &mut Criterion) {
    let mut g = c.benchmark_group("norm_frobenius");
    for n in SIZES {
        let t = tridiagonal(n);
        let dense = t.to_dense();
        g.bench_with_input(BenchmarkId::new("tridiagonal", n), &t, |b, t| {
            b.iter(|| std::hint::black_box(t).norm_frobenius())
        });
        g.bench_with_input(BenchmarkId::new("dense", n), &dense, |b, a| {
            b.iter(|| std::hint::black_box(a).norm_frobenius())
        });
    }
    g.finish();
}

fn norm_operator(c: &mut Criterion) {
    let mut g = c.benchmark_group("norm_operator");
    for n in [10, 50] {
        let d = diagonal(n);
        let dense = d.to_dense();
        g.bench_with_input(BenchmarkId::new("diagonal", n), &d, |b, d| {
            b.iter(|| std::hint::black_box(d).norm_operator())
        });
        g.bench_with_input(BenchmarkId::new("dense", n), &dense, |b, a| {
            b.iter(|| std::hint::black_box(a).norm_operator())
        });
    }
    g.finish();
}

// ---------------------------------------------------------------------------
// LU
// ---------------------------------------------------------------------------

fn lu_dense(c: &mut Criterion) {
    let mut g = c.benchmark_group("lu_dense");
    for n in SIZES {
        let a = DenseMatrix::from_fn(n, n, |i, j| {
            ((i * n + j) % 17) as f64 + if i == j { n as f64 } else { 0.0 }
        });
        g.bench_with_input(BenchmarkId::from_parameter(n), &a, |b, a| {
            b.iter(|| std::hint::black_box(a).lu())
        });
    }
    g.finish();
}

criterion_group!(
    benches,
    det_diagonal,
    det_tridiagonal,
    norm_inf,
    norm_frobenius,
    norm_operator,
    lu_dense,
);
criterion_main!(benches);
