//! 1D root-finding solvers.
//!
//! Both solvers need a bracket `[x_min, x_max]` on which `f` changes sign.
//! A missing bracket is a precondition failure; running out of iterations is
//! a runtime failure.

use hr_core::{ensure, fail, errors::Result, Real};

/// Default iteration cap.
pub const MAX_ITERATIONS: u32 = 100;
const DEFAULT_ACCURACY: Real = 1.0e-11;

fn effective_accuracy(accuracy: Real) -> Real {
    if accuracy > 0.0 {
        accuracy
    } else {
        DEFAULT_ACCURACY
    }
}

// ── Brent ─────────────────────────────────────────────────────────────────────

/// Brent's method for finding a root of `f(x)` in `[x_min, x_max]`.
///
/// Combines bisection, secant, and inverse quadratic interpolation.
pub fn brent<F>(f: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: Fn(Real) -> Real,
{
    let acc = effective_accuracy(accuracy);
    let (mut a, mut b) = (x_min, x_max);
    let (mut fa, mut fb) = (f(a), f(b));

    ensure!(
        fa * fb <= 0.0,
        "Brent: root not bracketed, f({a}) = {fa} and f({b}) = {fb} share a sign"
    );
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }

    let (mut c, mut fc) = (b, fb);
    let mut d = b - a;
    let mut e = d;

    for _ in 0..MAX_ITERATIONS {
        if fb * fc > 0.0 {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }
        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * acc;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol || fb == 0.0 {
            return Ok(b);
        }
        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (p, q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            let (p, q) = if p > 0.0 { (p, -q) } else { (-p, q) };
            if 2.0 * p < (3.0 * xm * q - (tol * q).abs()) && 2.0 * p < (e * q).abs() {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }
        a = b;
        fa = fb;
        b += if d.abs() > tol {
            d
        } else if xm > 0.0 {
            tol
        } else {
            -tol
        };
        fb = f(b);
    }
    fail!("Brent: no convergence after {MAX_ITERATIONS} iterations")
}

// ── Newton-Safe ──────────────────────────────────────────────────────────────

/// A safe Newton-Raphson method that falls back to bisection when the Newton
/// step would leave the bracket `[x_min, x_max]` or converge too slowly.
///
/// `f_df` returns `(f(x), f'(x))`.
pub fn newton_safe<F>(f_df: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: Fn(Real) -> (Real, Real),
{
    let acc = effective_accuracy(accuracy);
    let (flo, _) = f_df(x_min);
    let (fhi, _) = f_df(x_max);

    ensure!(
        flo * fhi <= 0.0,
        "NewtonSafe: root not bracketed, f({x_min}) = {flo} and f({x_max}) = {fhi} share a sign"
    );
    if flo == 0.0 {
        return Ok(x_min);
    }
    if fhi == 0.0 {
        return Ok(x_max);
    }

    // orient so that f(xl) < 0
    let (mut xl, mut xh) = if flo < 0.0 {
        (x_min, x_max)
    } else {
        (x_max, x_min)
    };

    let mut x = 0.5 * (xl + xh);
    let mut dx_old = (xh - xl).abs();
    let mut dx = dx_old;
    let (mut fx, mut dfx) = f_df(x);

    for _ in 0..MAX_ITERATIONS {
        let newton_out_of_range = ((x - xh) * dfx - fx) * ((x - xl) * dfx - fx) > 0.0;
        let bisection_faster = (2.0 * fx).abs() > (dx_old * dfx).abs();

        dx_old = dx;
        if newton_out_of_range || bisection_faster {
            dx = 0.5 * (xh - xl);
            x = xl + dx;
        } else {
            dx = fx / dfx;
            x -= dx;
        }

        if dx.abs() < acc {
            return Ok(x);
        }

        (fx, dfx) = f_df(x);
        if fx.abs() < acc {
            return Ok(x);
        }
        if fx < 0.0 {
            xl = x;
        } else {
            xh = x;
        }
    }
    fail!("NewtonSafe: no convergence after {MAX_ITERATIONS} iterations")
}
