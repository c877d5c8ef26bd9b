//! Typed entity repositories over the GraphQL gateway.
//!
//! One repository per entity (plays, play steps, roles), each scoping
//! every read and write by the device's owner token: reads filter on it,
//! writes stamp it on create and require a match on update/delete.

pub mod error;
pub mod models;
pub mod repositories;
mod wire;

pub use error::RepoError;
pub use models::step::{NewStep, StepPatch};
pub use repositories::play_repo::PlayRepo;
pub use repositories::role_repo::RoleRepo;
pub use repositories::step_repo::StepRepo;
