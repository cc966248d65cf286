//! Business logic on top of the core queries: dashboard composition,
//! quick-create note actions, and goal/task mutations.

pub mod capture;
pub mod dashboard;
pub mod goals;
