//! AV Moto CRM backend library.
//!
//! Customer, motorcycle unit and service job records for a repair shop,
//! organised as a hexagon: [`domain`] holds the use-cases and ports,
//! [`inbound`] the HTTP adapter and [`outbound`] the storage adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
