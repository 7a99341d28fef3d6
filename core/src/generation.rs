//! Request generations.
//!
//! Every asynchronous call a reducer dispatches is tagged with the
//! [`Generation`] current at issue time. When the completion action comes
//! back, the reducer asks its [`RequestGeneration`] whether that tag is still
//! the latest one; if a newer call has been issued in the meantime the result
//! is stale and gets dropped instead of overwriting fresher state.
//!
//! This gives "last issued wins" ordering without cancelling in-flight work.

use std::fmt;

/// Tag identifying one dispatched request.
///
/// # Examples
///
/// ```
/// use culinary_blog_core::generation::Generation;
///
/// let first = Generation::INITIAL.next();
/// assert_eq!(first.value(), 1);
/// assert!(first > Generation::INITIAL);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// The generation before any request has been issued.
    pub const INITIAL: Self = Self(0);

    /// Create a `Generation` with the given value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the generation number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Get the next generation (current + 1).
    ///
    /// Uses wrapping arithmetic; a screen will never issue `u64::MAX` requests.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic counter owned by one request stream of a reducer.
///
/// A screen with several independent streams (for example tags and
/// ingredients on the post creation form) keeps one counter per stream so
/// that loading one never invalidates the other.
///
/// # Examples
///
/// ```
/// use culinary_blog_core::generation::RequestGeneration;
///
/// let mut requests = RequestGeneration::new();
/// let first = requests.issue();
/// let second = requests.issue();
///
/// assert!(!requests.is_current(first));
/// assert!(requests.is_current(second));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestGeneration {
    current: Generation,
}

impl RequestGeneration {
    /// Create a counter with no request issued yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Generation::INITIAL,
        }
    }

    /// Advance the counter and return the tag for a newly dispatched request.
    pub const fn issue(&mut self) -> Generation {
        self.current = self.current.next();
        self.current
    }

    /// The tag of the most recently issued request.
    #[must_use]
    pub const fn current(&self) -> Generation {
        self.current
    }

    /// Whether a completion tagged with `generation` is the latest request.
    #[must_use]
    pub const fn is_current(&self, generation: Generation) -> bool {
        self.current.0 == generation.0
    }
}
