//! Collision queries and the player integrator.
pub mod collision;
pub mod handler;

pub use collision::{check_collision, collect_collisions, Collision};
pub use handler::PlayerPhysicsHandler;
