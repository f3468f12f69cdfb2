//! HTTP handlers.

pub mod approval;
pub mod countries;
pub mod dashboard;
pub mod data_points;
pub mod health;
pub mod indicators;
pub mod notification;
pub mod projects;
pub mod users;
