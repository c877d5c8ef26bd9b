pub mod play_repo;
pub mod role_repo;
pub mod step_repo;
