/// Smallest iteration limit the engine accepts.
pub const MIN_ITERATION_LIMIT: u32 = 1;

/// Largest iteration limit the engine accepts.
pub const MAX_ITERATION_LIMIT: u32 = 3200;

/// `|z|²` at or above which an orbit has escaped (escape radius 2).
const ESCAPE_NORM_SQ: f64 = 4.0;

/// Upper bound on the number of iterations between periodicity checkpoints.
const MAX_CHECK_INTERVAL: u32 = 128;

/// Escape-time iteration of `z_{n+1} = z_n² + c` from `z₀ = 0`.
///
/// [`iterate`](Self::iterate) returns a count in `[0, limit]`. A result equal
/// to `limit` is the "did not escape" sentinel: the point is interior, was
/// proven periodic, or simply ran out of iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationEngine {
    limit: u32,
}

impl IterationEngine {
    /// Create an engine, clamping `limit` into
    /// `[MIN_ITERATION_LIMIT, MAX_ITERATION_LIMIT]`.
    pub fn new(limit: u32) -> Self {
        Self {
            limit: limit.clamp(MIN_ITERATION_LIMIT, MAX_ITERATION_LIMIT),
        }
    }

    #[inline]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Iteration count for the plane point `(cr, ci)`.
    ///
    /// Points inside the main cardioid or the period-2 bulb are classified
    /// without iterating.
    #[inline]
    pub fn iterate(&self, cr: f64, ci: f64) -> u32 {
        if in_cardioid(cr, ci) || in_period2_bulb(cr, ci) {
            return self.limit;
        }
        self.orbit(cr, ci)
    }

    /// Follow the orbit of `(cr, ci)` without the closed-form interior test.
    ///
    /// A checkpoint of the orbit is taken every `interval` steps, with the
    /// interval doubling after each checkpoint up to `MAX_CHECK_INTERVAL`.
    /// Returning to the checkpoint bit-for-bit means the orbit is an exact
    /// cycle and will never escape.
    pub fn orbit(&self, cr: f64, ci: f64) -> u32 {
        let limit = self.limit;

        let mut zr = 0.0_f64;
        let mut zi = 0.0_f64;
        let mut zr_sq = 0.0_f64;
        let mut zi_sq = 0.0_f64;

        let mut check_r = zr;
        let mut check_i = zi;
        let mut interval: u32 = 1;
        let mut since_check: u32 = 0;

        let mut n: u32 = 0;
        loop {
            zi = 2.0 * zr * zi + ci;
            zr = zr_sq - zi_sq + cr;
            zr_sq = zr * zr;
            zi_sq = zi * zi;
            n += 1;

            if zr_sq + zi_sq >= ESCAPE_NORM_SQ || n == limit {
                return n;
            }

            if zr == check_r && zi == check_i {
                return limit;
            }

            since_check += 1;
            if since_check == interval {
                check_r = zr;
                check_i = zi;
                since_check = 0;
                interval = (interval * 2).min(MAX_CHECK_INTERVAL);
            }
        }
    }
}

impl Default for IterationEngine {
    fn default() -> Self {
        Self::new(crate::view::INITIAL_ITERATION_LIMIT)
    }
}

/// Returns `true` if `c` lies inside the main cardioid.
#[inline]
pub fn in_cardioid(cr: f64, ci: f64) -> bool {
    let ci_sq = ci * ci;
    let q = (cr - 0.25) * (cr - 0.25) + ci_sq;
    q * (q + (cr - 0.25)) <= 0.25 * ci_sq
}

/// Returns `true` if `c` lies inside the period-2 bulb.
#[inline]
pub fn in_period2_bulb(cr: f64, ci: f64) -> bool {
    (cr + 1.0) * (cr + 1.0) + ci * ci <= 0.0625
}
