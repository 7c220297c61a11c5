//! ShipDesk HTTP API.
//!
//! Endpoints:
//! - POST  /api/auth/register, /api/auth/login, /api/auth/logout
//! - GET   /api/dashboard: the logged-in employee and their requests
//! - POST  /api/requests: public shipping request submission
//! - GET   /api/requests/track?phone=: order tracking by customer phone
//! - PATCH /api/requests/{id}/status: status change by the owning employee
//! - POST  /api/admin/telegram/*: notification diagnostics

pub mod middleware;
pub mod routes;
pub mod state;
