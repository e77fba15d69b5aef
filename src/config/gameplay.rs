use serde::{Deserialize, Serialize};

/// Player movement and physics constants. Speeds are units/second,
/// accelerations units/second².
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub gravity: f32,
    pub jump_force: f32,
    pub terminal_velocity: f32,
    pub movement_speed: f32,
    /// Upper bound applied to a frame's delta time before integrating.
    pub max_delta_time: f32,
    pub fixed_timestep: f32,
    pub mouse_sensitivity: f32,
    pub reach: f32,
    pub player_size: [f32; 3],
    pub spawn_point: [f32; 3],
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            gravity: -20.0,
            jump_force: 8.0,
            terminal_velocity: 54.0,
            movement_speed: 4.3,
            max_delta_time: 0.1,
            fixed_timestep: 1.0 / 60.0,
            mouse_sensitivity: 0.002,
            reach: 5.0,
            player_size: [0.6, 1.8, 0.6],
            spawn_point: [0.5, 10.0, 0.5],
        }
    }
}
