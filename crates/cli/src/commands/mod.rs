pub mod diag;
pub mod plays;
pub mod roles;
pub mod steps;
