pub mod candidates;
pub mod enrollment;
pub mod error;
pub mod fees;
pub mod identifiers;
pub mod registration;
pub mod results;
pub mod statistics;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{BulkFailure, BulkOutcome, ServiceError};
