//! Persistence and form validation for employees and shipping requests.

pub mod employee;
pub mod request;
mod validation;
