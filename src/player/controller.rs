use crate::config::GameplayConfig;
use crate::player::state::PlayerState;
use crate::utils::{Result, VoxelError, AABB};
use crate::world::{Block, BlockMaterial, RaycastHit, World};
use glam::{IVec3, Vec2};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractAction {
    Break,
    Place(BlockMaterial),
}

/// A block edit that went through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction {
    pub action: InteractAction,
    pub position: IVec3,
    pub previous: Block,
}

/// Look and block interaction on behalf of a player.
#[derive(Debug, Clone)]
pub struct PlayerController {
    pub reach: f32,
    pub mouse_sensitivity: f32,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::from_config(&GameplayConfig::default())
    }
}

impl PlayerController {
    pub fn new(reach: f32, mouse_sensitivity: f32) -> Self {
        Self {
            reach,
            mouse_sensitivity,
        }
    }

    pub fn from_config(config: &GameplayConfig) -> Self {
        Self::new(config.reach, config.mouse_sensitivity)
    }

    /// Applies a mouse delta in pixels. Moving the mouse up looks up.
    pub fn look(&self, state: &mut PlayerState, mouse_delta: Vec2) {
        state.rotate(
            -mouse_delta.y * self.mouse_sensitivity,
            -mouse_delta.x * self.mouse_sensitivity,
        );
    }

    /// Solid block under the crosshair within reach.
    pub fn target(&self, state: &PlayerState, world: &World) -> Option<RaycastHit> {
        world.raycast(state.eye_position(), state.forward(), self.reach)
    }

    /// Breaks the targeted block or places one against its struck face.
    ///
    /// Nothing in reach, or a target outside the loaded chunks, is `Ok(None)`.
    /// Placing air or placing into the player's own box is `InvalidArgument`.
    pub fn interact(
        &self,
        state: &PlayerState,
        world: &mut World,
        action: InteractAction,
    ) -> Result<Option<Interaction>> {
        let Some(hit) = self.target(state, world) else {
            return Ok(None);
        };

        let (position, outcome) = match action {
            InteractAction::Break => (hit.position, world.break_block(hit.position)),
            InteractAction::Place(material) => {
                if material.is_air() {
                    return Err(VoxelError::invalid("cannot place air, break the block instead"));
                }
                if hit.normal == IVec3::ZERO {
                    // Eye is inside the hit block; there is no face to place against.
                    return Ok(None);
                }
                let target = hit.adjacent();
                if AABB::unit_block(target).intersects(&state.aabb()) {
                    return Err(VoxelError::invalid(format!(
                        "block at {} would overlap the player",
                        target
                    )));
                }
                (target, world.place_block(target, material))
            }
        };

        match outcome {
            Ok(previous) => Ok(Some(Interaction {
                action,
                position,
                previous,
            })),
            Err(err) if err.is_recoverable() => {
                debug!("Interaction at {} had no effect: {}", position, err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
