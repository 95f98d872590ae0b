//! Transportation system identifier.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Numeric id of a transportation system (an agency or campus deployment).
///
/// Routes, stops, alerts and vehicles refer back to their system through
/// this id rather than by holding the system itself.
///
/// # Examples
///
/// ```
/// use passiogo::domain::SystemId;
///
/// let uga: SystemId = "3994".parse().unwrap();
/// assert_eq!(uga, SystemId::new(3994));
/// assert_eq!(uga.to_string(), "3994");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SystemId(i64);

impl SystemId {
    pub const fn new(id: i64) -> Self {
        SystemId(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SystemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(SystemId)
    }
}

impl From<i64> for SystemId {
    fn from(id: i64) -> Self {
        SystemId(id)
    }
}
