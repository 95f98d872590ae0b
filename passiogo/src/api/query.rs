//! Per-endpoint tuning parameters.
//!
//! The meaning of most of these is undocumented upstream; the defaults are
//! the values known to return exactly the requested system's data. Each
//! query rejects the values the upstream is known to answer with an error.

use super::error::PassioError;

/// Parameters for `getSystems`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemsQuery {
    /// Must be at least 2.
    pub app_version: u32,
    pub sort_mode: u32,
}

impl Default for SystemsQuery {
    fn default() -> Self {
        Self {
            app_version: 2,
            sort_mode: 1,
        }
    }
}

impl SystemsQuery {
    pub(crate) fn validate(&self) -> Result<(), PassioError> {
        if self.app_version < 2 {
            return Err(PassioError::invalid("app_version", "must be at least 2"));
        }
        Ok(())
    }
}

/// Parameters for `getRoutes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutesQuery {
    pub app_version: u32,
    /// 1 returns the system's routes; larger values mix in unrelated routes.
    pub amount: u32,
}

impl Default for RoutesQuery {
    fn default() -> Self {
        Self {
            app_version: 1,
            amount: 1,
        }
    }
}

impl RoutesQuery {
    pub(crate) fn validate(&self) -> Result<(), PassioError> {
        if self.amount == 0 {
            return Err(PassioError::invalid("amount", "must be at least 1"));
        }
        Ok(())
    }
}

/// Parameters for `getStops`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopsQuery {
    pub app_version: u32,
    /// 1 returns the system's stops; larger values mix in unrelated stops.
    pub s_a: u32,
}

impl Default for StopsQuery {
    fn default() -> Self {
        Self {
            app_version: 2,
            s_a: 1,
        }
    }
}

impl StopsQuery {
    pub(crate) fn validate(&self) -> Result<(), PassioError> {
        if self.s_a == 0 {
            return Err(PassioError::invalid("s_a", "must be at least 1"));
        }
        Ok(())
    }
}

/// Parameters for `getAlertMessages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertsQuery {
    pub app_version: u32,
    pub amount: u32,
    pub routes_amount: u32,
}

impl Default for AlertsQuery {
    fn default() -> Self {
        Self {
            app_version: 1,
            amount: 1,
            routes_amount: 0,
        }
    }
}

impl AlertsQuery {
    pub(crate) fn validate(&self) -> Result<(), PassioError> {
        if self.app_version == 0 {
            return Err(PassioError::invalid("app_version", "must be at least 1"));
        }
        Ok(())
    }
}

/// Parameters for `getBuses`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehiclesQuery {
    pub app_version: u32,
}

impl Default for VehiclesQuery {
    fn default() -> Self {
        Self { app_version: 2 }
    }
}

impl VehiclesQuery {
    pub(crate) fn validate(&self) -> Result<(), PassioError> {
        if self.app_version == 0 {
            return Err(PassioError::invalid("app_version", "must be at least 1"));
        }
        Ok(())
    }
}
