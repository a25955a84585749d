use alloc::format;
use alloc::string::String;

/// Timing curves used for programmatic, momentum and rebound motion.
///
/// Each named curve has two equivalent forms: [`Easing::sample`] for the interpolated backend
/// and [`Easing::css`] for the timeline backend, which hands the curve to the platform.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    /// Momentum continuation: `1 - (1 - t)^5`.
    Swipe,
    /// Momentum that ends clamped at an edge: `t (2 - t)`.
    SwipeBounce,
    /// Rebound and default programmatic scroll: `1 - (1 - t)^4`.
    #[default]
    Bounce,
    /// A custom cubic Bézier through `(0, 0)`, `(x1, y1)`, `(x2, y2)`, `(1, 1)`.
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// Maps linear progress `t` (clamped to `0..=1`) to eased progress.
    pub fn sample(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Swipe => {
                let u = t - 1.0;
                1.0 + u * u * u * u * u
            }
            Self::SwipeBounce => t * (2.0 - t),
            Self::Bounce => {
                let u = t - 1.0;
                1.0 - u * u * u * u
            }
            Self::CubicBezier(x1, y1, x2, y2) => bezier_sample(x1, y1, x2, y2, t),
        }
    }

    /// The equivalent CSS timing function.
    pub fn css(self) -> String {
        let (x1, y1, x2, y2) = match self {
            Self::Linear => return String::from("linear"),
            Self::Swipe => (0.23, 1.0, 0.32, 1.0),
            Self::SwipeBounce => (0.25, 0.46, 0.45, 0.94),
            Self::Bounce => (0.165, 0.84, 0.44, 1.0),
            Self::CubicBezier(x1, y1, x2, y2) => (x1, y1, x2, y2),
        };
        format!("cubic-bezier({x1}, {y1}, {x2}, {y2})")
    }
}

fn bezier_coord(p1: f64, p2: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
}

fn bezier_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * p1 + 6.0 * u * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

fn bezier_sample(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    if t <= 0.0 || t >= 1.0 {
        return t;
    }
    let x1 = x1.clamp(0.0, 1.0);
    let x2 = x2.clamp(0.0, 1.0);

    // Newton first, bisection when the slope flattens out.
    let mut s = t;
    for _ in 0..8 {
        let err = bezier_coord(x1, x2, s) - t;
        if err.abs() < 1e-7 {
            return bezier_coord(y1, y2, s);
        }
        let d = bezier_slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s = (s - err / d).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    s = t;
    for _ in 0..32 {
        let x = bezier_coord(x1, x2, s);
        if (x - t).abs() < 1e-7 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    bezier_coord(y1, y2, s)
}
