//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&Store` as the first argument. Every method passes through the
//! store's simulated-latency gate before touching data.

pub mod country_repo;
pub mod data_point_repo;
pub mod indicator_repo;
pub mod notification_repo;
pub mod project_repo;
pub mod user_repo;

pub use country_repo::CountryRepo;
pub use data_point_repo::DataPointRepo;
pub use indicator_repo::IndicatorRepo;
pub use notification_repo::NotificationRepo;
pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;

use melboard_core::error::CoreError;
use validator::Validate;

/// Run `validator` derive checks, mapping failures onto the domain error.
pub(crate) fn validate_dto(input: &impl Validate) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))
}
