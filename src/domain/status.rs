//! Login state of a probed admin panel

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::infrastructure::probe_error::{ProbeError, ProbeResult};

/// Two-flag summary reported by the status probe.
///
/// `logged_in` implies `initialized` in the target application, but the current
/// detection rule has no positive signal for a logged-in session, so it is
/// always reported as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub initialized: bool,
    pub logged_in: bool,
}

impl Status {
    pub const NOT_INITIALIZED: Self = Self {
        initialized: false,
        logged_in: false,
    };

    pub const LOGIN_REQUIRED: Self = Self {
        initialized: true,
        logged_in: false,
    };

    /// Reduce the number of login password fields found on the entry page.
    ///
    /// A single field means the login form is shown; none means the app has not
    /// gone past setup. More than one breaks the detection assumption and is
    /// reported instead of picking one.
    pub fn from_password_input_count(count: usize) -> ProbeResult<Self> {
        match count {
            0 => Ok(Self::NOT_INITIALIZED),
            1 => Ok(Self::LOGIN_REQUIRED),
            count => Err(ProbeError::AmbiguousPage { count }),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{initialized: {}, loggedIn: {}}}",
            self.initialized, self.logged_in
        )
    }
}
