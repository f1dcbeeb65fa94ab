//! Driving port for creating a customer together with their units.

use async_trait::async_trait;

use crate::domain::{Customer, CustomerFieldsDraft, Error, Redirect, Unit, UnitDraft, UserId};

/// Immutable snapshot of the customer intake form taken at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerIntakeSubmission {
    pub fields: CustomerFieldsDraft,
    pub units: Vec<UnitDraft>,
}

/// Result of a successful intake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerIntakeOutcome {
    pub customer: Customer,
    pub units: Vec<Unit>,
    pub redirect: Redirect,
}

/// Customer intake use-case.
#[async_trait]
pub trait CustomerIntakeCommand: Send + Sync {
    /// Validate the snapshot and persist the customer with its complete units.
    async fn submit(
        &self,
        actor: &UserId,
        submission: CustomerIntakeSubmission,
    ) -> Result<CustomerIntakeOutcome, Error>;
}
