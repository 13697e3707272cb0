//! Easing curves over normalized progress.
//!
//! Every curve maps 0 -> 0 and 1 -> 1; the in/out variants follow the
//! classic Penner formulations.

use std::f64::consts::PI;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
pub fn linear(t: f64) -> f64 {
    t
}

#[inline]
pub fn in_quad(t: f64) -> f64 {
    t * t
}

#[inline]
pub fn out_quad(t: f64) -> f64 {
    -t * (t - 2.0)
}

pub fn in_out_quad(t: f64) -> f64 {
    let t = t * 2.0;
    if t < 1.0 {
        return 0.5 * t * t;
    }
    let t = t - 1.0;
    -0.5 * (t * (t - 2.0) - 1.0)
}

#[inline]
pub fn in_cubic(t: f64) -> f64 {
    t * t * t
}

#[inline]
pub fn out_cubic(t: f64) -> f64 {
    let t = t - 1.0;
    t * t * t + 1.0
}

pub fn in_out_cubic(t: f64) -> f64 {
    let t = t * 2.0;
    if t < 1.0 {
        return 0.5 * t * t * t;
    }
    let t = t - 2.0;
    0.5 * (t * t * t + 2.0)
}

#[inline]
pub fn in_quart(t: f64) -> f64 {
    t * t * t * t
}

#[inline]
pub fn out_quart(t: f64) -> f64 {
    let t = t - 1.0;
    -(t * t * t * t - 1.0)
}

pub fn in_out_quart(t: f64) -> f64 {
    let t = t * 2.0;
    if t < 1.0 {
        return 0.5 * t * t * t * t;
    }
    let t = t - 2.0;
    -0.5 * (t * t * t * t - 2.0)
}

#[inline]
pub fn in_quint(t: f64) -> f64 {
    t * t * t * t * t
}

#[inline]
pub fn out_quint(t: f64) -> f64 {
    let t = t - 1.0;
    t * t * t * t * t + 1.0
}

pub fn in_out_quint(t: f64) -> f64 {
    let t = t * 2.0;
    if t < 1.0 {
        return 0.5 * t * t * t * t * t;
    }
    let t = t - 2.0;
    0.5 * (t * t * t * t * t + 2.0)
}

#[inline]
pub fn in_sine(t: f64) -> f64 {
    1.0 - (t * PI / 2.0).cos()
}

#[inline]
pub fn out_sine(t: f64) -> f64 {
    (t * PI / 2.0).sin()
}

#[inline]
pub fn in_out_sine(t: f64) -> f64 {
    -0.5 * ((PI * t).cos() - 1.0)
}

// The exponential curves never reach their endpoints analytically, so pin them.
pub fn in_expo(t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    2f64.powf(10.0 * (t - 1.0))
}

pub fn out_expo(t: f64) -> f64 {
    if t >= 1.0 {
        return 1.0;
    }
    1.0 - 2f64.powf(-10.0 * t)
}

pub fn in_out_expo(t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let t = t * 2.0;
    if t < 1.0 {
        return 0.5 * 2f64.powf(10.0 * (t - 1.0));
    }
    0.5 * (2.0 - 2f64.powf(-10.0 * (t - 1.0)))
}

#[inline]
pub fn in_circ(t: f64) -> f64 {
    -((1.0 - t * t).max(0.0).sqrt() - 1.0)
}

#[inline]
pub fn out_circ(t: f64) -> f64 {
    let t = t - 1.0;
    (1.0 - t * t).max(0.0).sqrt()
}

pub fn in_out_circ(t: f64) -> f64 {
    let t = t * 2.0;
    if t < 1.0 {
        return -0.5 * ((1.0 - t * t).max(0.0).sqrt() - 1.0);
    }
    let t = t - 2.0;
    0.5 * ((1.0 - t * t).max(0.0).sqrt() + 1.0)
}
