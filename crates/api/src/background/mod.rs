//! Background maintenance tasks.

pub mod notification_retention;
