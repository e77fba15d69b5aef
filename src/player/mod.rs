pub mod controller;
pub mod input;
pub mod state;

pub use controller::{InteractAction, Interaction, PlayerController};
pub use input::PlayerInput;
pub use state::PlayerState;
