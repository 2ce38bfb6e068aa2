//! Fixed-workload arithmetic kernels.
//!
//! Each loop iteration evaluates the same 30-operation expression
//! (16 multiplications including the accumulate, 14 additions):
//!
//! ```text
//! c *= ((((d + e) + (v5 * v5)) * ((a * (v1 + v2)) + (b * (o + p)))
//!        + ((g * h) + (x * y)) * (t + u)
//!        + ((k * l) + (g * k)) * (w * l))
//!       * (((m * n) + (k + n)) + ((r * s) + (v3 * v4))))
//! ```
//!
//! The computed value is meaningless; only time-to-completion matters.

use std::hint::black_box;

/// Arithmetic operations executed per kernel loop iteration.
pub const OPS_PER_ITERATION: u64 = 30;

/// Operands `a b d e g h k l m n o p r s t u w x y v1 v2 v3 v4 v5`.
const INT_OPERANDS: [i64; 24] = [
    124_235_250_001,
    21_241_201_001,
    233_240_000_000_001,
    2_341_200_000_100_000,
    123_112_003_001,
    56_740_012_007,
    240_010_001_001,
    34_224_003_003_006,
    3_242_352_500_060_006,
    512_412_487_236,
    24_223_432,
    11_234_142_738_462,
    8_532_114_414,
    31_125_646_724,
    67_451_241_564,
    34_447_892_317,
    3_244_427_389,
    8_913_189_230,
    12_323_782_349,
    0o1000023,
    3_000_009_000_009,
    565_000_000_204,
    30_000_090_009,
    78_743_777_777,
];
const INT_SEED: i64 = 2_342_234_320_000;

const FLOAT_OPERANDS: [f64; 24] = [
    124.235250001,
    21.241201001,
    23.3240000000001,
    2.341200000100000,
    1231.12003001,
    567.40012007,
    24.0010001001,
    342.24003003006,
    324.2352500060006,
    51.2412487236,
    242.23432,
    112.34142738462,
    853.2114414,
    31.125646724,
    67.451241564,
    34.447892317,
    3.244427389,
    89.13189230,
    123.23782349,
    0.000001000023,
    3.000009000009,
    56.5000000204,
    0.00000090009,
    787.43777777,
];
const FLOAT_SEED: f64 = 2342.234320000;

/// Arithmetic kernel variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KernelKind {
    Integer,
    FloatingPoint,
}

impl KernelKind {
    /// Operation type as it appears in the result line.
    pub fn label(&self) -> &'static str {
        match self {
            KernelKind::Integer => "integer",
            KernelKind::FloatingPoint => "floating point",
        }
    }

    pub fn run(&self, iterations: u64) {
        match self {
            KernelKind::Integer => integer_kernel(iterations),
            KernelKind::FloatingPoint => floating_point_kernel(iterations),
        }
    }
}

/// Runs the integer kernel `iterations` times. Overflow wraps silently.
pub fn integer_kernel(iterations: u64) {
    let mut c = INT_SEED;
    for _ in 0..iterations {
        c = c.wrapping_mul(integer_step(black_box(&INT_OPERANDS)));
    }
    black_box(c);
}

/// Runs the floating-point kernel `iterations` times.
pub fn floating_point_kernel(iterations: u64) {
    let mut c = FLOAT_SEED;
    for _ in 0..iterations {
        c *= float_step(black_box(&FLOAT_OPERANDS));
    }
    black_box(c);
}

#[inline(always)]
fn integer_step(ops: &[i64; 24]) -> i64 {
    let [a, b, d, e, g, h, k, l, m, n, o, p, r, s, t, u, w, x, y, v1, v2, v3, v4, v5] = *ops;

    let lhs = d
        .wrapping_add(e)
        .wrapping_add(v5.wrapping_mul(v5))
        .wrapping_mul(
            a.wrapping_mul(v1.wrapping_add(v2))
                .wrapping_add(b.wrapping_mul(o.wrapping_add(p))),
        )
        .wrapping_add(
            g.wrapping_mul(h)
                .wrapping_add(x.wrapping_mul(y))
                .wrapping_mul(t.wrapping_add(u)),
        )
        .wrapping_add(
            k.wrapping_mul(l)
                .wrapping_add(g.wrapping_mul(k))
                .wrapping_mul(w.wrapping_mul(l)),
        );
    let rhs = m
        .wrapping_mul(n)
        .wrapping_add(k.wrapping_add(n))
        .wrapping_add(r.wrapping_mul(s).wrapping_add(v3.wrapping_mul(v4)));

    lhs.wrapping_mul(rhs)
}

#[inline(always)]
fn float_step(ops: &[f64; 24]) -> f64 {
    let [a, b, d, e, g, h, k, l, m, n, o, p, r, s, t, u, w, x, y, v1, v2, v3, v4, v5] = *ops;

    (((d + e) + (v5 * v5)) * ((a * (v1 + v2)) + (b * (o + p)))
        + ((g * h) + (x * y)) * (t + u)
        + ((k * l) + (g * k)) * (w * l))
        * (((m * n) + (k + n)) + ((r * s) + (v3 * v4)))
}
