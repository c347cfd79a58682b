//! Evaluation context shared by every native function call.
//!
//! A [`Context`] carries the resource ceilings, the local time zone, the
//! clock, and the random source for one evaluation. It is configured with
//! builder methods and then passed by reference to [`Registry::call`].
//!
//! [`Registry::call`]: crate::Registry::call

use std::cell::RefCell;
use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use quill_foundation::Limits;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of the current instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Clock {
    /// Reads the system clock on every call.
    System,
    /// Always returns the same instant.
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns the current instant.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Self::System => Utc::now(),
            Self::Fixed(t) => *t,
        }
    }
}

/// Per-evaluation state for native functions.
pub struct Context {
    limits: Limits,
    zone: Tz,
    clock: Clock,
    rng: RefCell<ChaCha8Rng>,
}

impl Context {
    /// Creates a context with default ceilings, UTC as the local zone, the
    /// system clock, and an entropy-seeded random source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            limits: Limits::default(),
            zone: Tz::UTC,
            clock: Clock::System,
            rng: RefCell::new(ChaCha8Rng::from_entropy()),
        }
    }

    /// Builder method to replace the resource ceilings.
    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Builder method to set the zone that `"Local"` and local parsing use.
    #[must_use]
    pub fn with_zone(mut self, zone: Tz) -> Self {
        self.zone = zone;
        self
    }

    /// Builder method to freeze the clock at `now`.
    #[must_use]
    pub fn with_fixed_now<Z: TimeZone>(mut self, now: DateTime<Z>) -> Self {
        self.clock = Clock::Fixed(now.with_timezone(&Utc));
        self
    }

    /// Builder method to make the random source deterministic.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        self.rng.replace(ChaCha8Rng::seed_from_u64(seed));
        self
    }

    /// Returns the resource ceilings.
    #[must_use]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Returns the local time zone.
    #[must_use]
    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Returns the clock.
    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Returns the current instant in the local zone.
    #[must_use]
    pub fn now(&self) -> DateTime<Tz> {
        self.clock.now().with_timezone(&self.zone)
    }

    /// Draws a uniform integer in `[low, high)`.
    ///
    /// Callers must ensure `low < high`.
    pub(crate) fn random_in(&self, low: i64, high: i64) -> i64 {
        self.rng.borrow_mut().gen_range(low..high)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("limits", &self.limits)
            .field("zone", &self.zone)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
