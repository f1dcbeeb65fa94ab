//! Post-success navigation signals.
//!
//! A completed intake does not navigate by itself; it hands the caller a
//! [`Redirect`] naming where to go and how long to keep the success notice up.

use std::time::Duration;

use super::CustomerId;

/// Time the success acknowledgement stays visible before navigating away.
pub const SUCCESS_DISPLAY_DELAY: Duration = Duration::from_secs(2);

/// Customer listing shown after a customer is created.
pub const CUSTOMER_LIST_PATH: &str = "/dashboard/customers";

/// Main dashboard shown after a job is recorded.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Delayed navigation instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
    pub delay: Duration,
}

impl Redirect {
    /// Navigate to the customer list after the success delay.
    pub fn to_customer_list() -> Self {
        Self {
            location: CUSTOMER_LIST_PATH.to_owned(),
            delay: SUCCESS_DISPLAY_DELAY,
        }
    }

    /// Navigate to the dashboard after the success delay.
    pub fn to_dashboard() -> Self {
        Self {
            location: DASHBOARD_PATH.to_owned(),
            delay: SUCCESS_DISPLAY_DELAY,
        }
    }

    /// Navigate straight back to a customer's profile.
    pub fn to_profile(customer_id: CustomerId) -> Self {
        Self {
            location: profile_path(customer_id),
            delay: Duration::ZERO,
        }
    }
}

/// Path of a customer's profile page.
pub fn profile_path(customer_id: CustomerId) -> String {
    format!("/dashboard/profiles/{customer_id}")
}
