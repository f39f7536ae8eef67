//! Route handlers, one module per resource.

pub mod appointments;
pub mod doctors;
pub mod health;
pub mod hospitals;
pub mod patients;
pub mod referrals;
pub mod users;
