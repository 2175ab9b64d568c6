//! Fixed-step classical Runge-Kutta integration.
//!
//! The derivative is any `Fn(t, &y) -> dy/dt` over a fixed-size state array;
//! the integrator itself holds no state.

/// One sample of an integrated trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<const N: usize> {
    pub t: f64,
    pub y: [f64; N],
}

/// Advance `y` at time `t` by one RK4 step of size `dt`.
pub fn rk4_step<const N: usize, F>(f: &F, t: f64, y: &[f64; N], dt: f64) -> [f64; N]
where
    F: Fn(f64, &[f64; N]) -> [f64; N],
{
    let half = dt / 2.0;
    let k1 = f(t, y);
    let k2 = f(t + half, &offset(y, &k1, half));
    let k3 = f(t + half, &offset(y, &k2, half));
    let k4 = f(t + dt, &offset(y, &k3, dt));

    std::array::from_fn(|i| y[i] + (dt / 6.0) * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]))
}

/// Integrate from `t0` to `tf` inclusive with step `dt`.
///
/// Sample times are `t0 + i·dt` rather than an accumulated sum, so the number
/// of samples is `round((tf - t0) / dt) + 1` regardless of rounding drift.
pub fn rk4_trajectory<const N: usize, F>(
    f: &F,
    y0: [f64; N],
    t0: f64,
    dt: f64,
    tf: f64,
) -> Vec<Sample<N>>
where
    F: Fn(f64, &[f64; N]) -> [f64; N],
{
    if !(dt.is_finite() && t0.is_finite() && tf.is_finite()) || dt <= 0.0 || tf < t0 {
        return vec![Sample { t: t0, y: y0 }];
    }
    let steps = ((tf - t0) / dt).round() as usize;
    let mut samples = Vec::with_capacity(steps + 1);
    let mut y = y0;
    for i in 0..=steps {
        let t = t0 + i as f64 * dt;
        samples.push(Sample { t, y });
        if i < steps {
            y = rk4_step(f, t, &y, dt);
        }
    }
    samples
}

fn offset<const N: usize>(y: &[f64; N], k: &[f64; N], h: f64) -> [f64; N] {
    std::array::from_fn(|i| y[i] + h * k[i])
}
