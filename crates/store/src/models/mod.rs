//! Entity models and DTOs.

pub mod bulk;
pub mod country;
pub mod data_point;
pub mod indicator;
pub mod notification;
pub mod project;
pub mod user;

pub use bulk::{BulkError, BulkOutcome, ImportError, ImportOutcome};
pub use country::{Country, CountryStatus, CreateCountry, UpdateCountry};
pub use data_point::{
    AuditEntry, CreateDataPoint, DataPoint, DataPointQuery, DataPointView, UpdateDataPoint,
};
pub use indicator::{CreateIndicator, Indicator, IndicatorValueType, UpdateIndicator};
pub use notification::{CreateNotification, Notification};
pub use project::{CreateProject, Project, ProjectStatus, UpdateProject};
pub use user::{CreateUser, UpdateUser, User};
