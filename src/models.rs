pub mod applicants;
pub mod applications;
pub mod auth;
pub mod licenses;
