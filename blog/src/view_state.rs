//! Screen state shared by every reducer.
//!
//! [`ViewState`] is a single tagged value, so "loading" and "error" can never
//! both be set. Data survives a refresh: while a reload is in flight the
//! previous payload stays in `Loading { previous }`, and after a failure the
//! last successful payload stays in `Error { last_good }`.

/// Load state of one piece of screen data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState<T> {
    /// Nothing requested yet
    Idle,
    /// A request is in flight
    Loading {
        /// Data shown while loading
        previous: Option<T>,
    },
    /// Last request succeeded
    Success(T),
    /// Last request failed
    Error {
        /// User-facing message
        message: String,
        /// Most recent successful payload
        last_good: Option<T>,
    },
}

// Manual impl: no `T: Default` bound
impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

/// What a screen should draw for a [`ViewState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presentation<'a> {
    /// Nothing loaded, nothing in flight
    Blank,
    /// Spinner; `stale` tells whether old content stays visible beneath it
    Spinner {
        /// Old content is still shown
        stale: bool,
    },
    /// Fresh content
    Content,
    /// Error filling the whole screen, there is nothing else to show
    FullScreenError(&'a str),
    /// Non-blocking error over the last good content
    ErrorBanner(&'a str),
}

impl<T> ViewState<T> {
    /// Enter `Loading`, carrying over whatever data is currently visible.
    pub fn begin_loading(&mut self) {
        let previous = std::mem::take(self).into_data();
        *self = Self::Loading { previous };
    }

    /// Enter `Success`.
    pub fn succeed(&mut self, data: T) {
        *self = Self::Success(data);
    }

    /// Enter `Error`, keeping the visible data as last good.
    pub fn fail(&mut self, message: impl Into<String>) {
        let last_good = std::mem::take(self).into_data();
        *self = Self::Error {
            message: message.into(),
            last_good,
        };
    }

    /// Drop an error, going back to the last good data (or `Idle`).
    ///
    /// Other states are left untouched.
    pub fn dismiss_error(&mut self) {
        if let Self::Error { last_good, .. } = self {
            *self = last_good.take().map_or(Self::Idle, Self::Success);
        }
    }

    /// Data to show, fresh or stale.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Idle => None,
            Self::Loading { previous } => previous.as_ref(),
            Self::Success(data) => Some(data),
            Self::Error { last_good, .. } => last_good.as_ref(),
        }
    }

    /// Take the data to show out of the state.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Idle => None,
            Self::Loading { previous } => previous,
            Self::Success(data) => Some(data),
            Self::Error { last_good, .. } => last_good,
        }
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Error message of a failed request.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// How the screen should render this state.
    #[must_use]
    pub fn presentation(&self) -> Presentation<'_> {
        match self {
            Self::Idle => Presentation::Blank,
            Self::Loading { previous } => Presentation::Spinner {
                stale: previous.is_some(),
            },
            Self::Success(_) => Presentation::Content,
            Self::Error {
                message,
                last_good: None,
            } => Presentation::FullScreenError(message),
            Self::Error {
                message,
                last_good: Some(_),
            } => Presentation::ErrorBanner(message),
        }
    }
}
