use crate::config::GameplayConfig;
use crate::physics::collision::collect_collisions;
use crate::player::{PlayerInput, PlayerState};
use crate::utils::AABB;
use crate::world::World;
use glam::Vec3;
use log::{debug, trace, warn};
use std::time::Duration;

/// Tolerance for "already touching" when picking the blocks ahead of a move.
const CONTACT_EPSILON: f32 = 1e-4;
/// Distance probed below the feet when a tick has no vertical motion.
const GROUND_PROBE: f32 = 1e-3;

/// Fixed-step integrator for one player against a static world.
#[derive(Debug, Clone)]
pub struct PlayerPhysicsHandler {
    gravity: f32,
    jump_force: f32,
    terminal_velocity: f32,
    movement_speed: f32,
    max_delta_time: f32,
    fixed_timestep: f32,
    accumulated_time: f32,
}

impl Default for PlayerPhysicsHandler {
    fn default() -> Self {
        Self::from_config(&GameplayConfig::default())
    }
}

impl PlayerPhysicsHandler {
    pub fn from_config(config: &GameplayConfig) -> Self {
        Self {
            gravity: config.gravity,
            jump_force: config.jump_force,
            terminal_velocity: config.terminal_velocity,
            movement_speed: config.movement_speed,
            max_delta_time: config.max_delta_time,
            fixed_timestep: config.fixed_timestep,
            accumulated_time: 0.0,
        }
    }

    pub fn fixed_timestep(&self) -> f32 {
        self.fixed_timestep
    }

    /// Frame time not yet consumed by a whole fixed step.
    pub fn accumulated_time(&self) -> f32 {
        self.accumulated_time
    }

    /// Feeds one frame's wall time and runs as many fixed steps as it covers.
    ///
    /// Frame time above `max_delta_time` is dropped so a stall cannot queue
    /// an unbounded number of steps.
    pub fn advance(
        &mut self,
        frame_time: Duration,
        mut state: PlayerState,
        input: &PlayerInput,
        world: &World,
    ) -> (PlayerState, u32) {
        let mut dt = frame_time.as_secs_f32();
        if dt > self.max_delta_time {
            warn!(
                "Frame took {:.3}s, clamping to {:.3}s",
                dt, self.max_delta_time
            );
            dt = self.max_delta_time;
        }
        self.accumulated_time += dt;

        let mut steps = 0;
        while self.accumulated_time >= self.fixed_timestep {
            state = self.step(state, input, world, self.fixed_timestep);
            self.accumulated_time -= self.fixed_timestep;
            steps += 1;
        }
        (state, steps)
    }

    /// One integration step.
    ///
    /// Order: jump, gravity, X then Z against the current height, then Y.
    pub fn step(
        &self,
        state: PlayerState,
        input: &PlayerInput,
        world: &World,
        delta_time: f32,
    ) -> PlayerState {
        if delta_time.is_nan() || delta_time <= 0.0 {
            return state;
        }
        let dt = if delta_time > self.max_delta_time {
            trace!("Clamping step {:.4}s to {:.4}s", delta_time, self.max_delta_time);
            self.max_delta_time
        } else {
            delta_time
        };

        let mut next = state;
        next.jumping = input.jump;

        if next.on_ground && next.jumping {
            next.velocity.y = self.jump_force;
            next.on_ground = false;
            debug!("Jump from {:.2}", next.position);
        }

        next.velocity.y = (next.velocity.y + self.gravity * dt).max(-self.terminal_velocity);
        next.velocity.x = input.direction.x * self.movement_speed;
        next.velocity.z = input.direction.z * self.movement_speed;

        for axis in [0, 2] {
            let delta = next.velocity[axis] * dt;
            if Self::move_axis(&mut next, axis, delta, world) {
                next.velocity[axis] = 0.0;
            }
        }

        let dy = next.velocity.y * dt;
        if dy == 0.0 {
            next.on_ground = Self::has_ground_below(&next, world);
        } else if Self::move_axis(&mut next, 1, dy, world) {
            if dy < 0.0 {
                if !state.on_ground {
                    debug!(
                        "Landed at {:.2} (impact {:.2} u/s)",
                        next.position, next.velocity.y
                    );
                }
                next.on_ground = true;
            }
            next.velocity.y = 0.0;
        } else {
            next.on_ground = false;
        }

        next
    }

    /// Moves along one axis, stopping flush against the nearest block ahead.
    /// Returns whether the move was blocked.
    fn move_axis(state: &mut PlayerState, axis: usize, delta: f32, world: &World) -> bool {
        if delta == 0.0 {
            return false;
        }

        let current = state.aabb();
        let mut offset = Vec3::ZERO;
        offset[axis] = delta;
        let swept = Self::inset_across(&current.union(&current.translated(offset)), axis);

        let ahead = collect_collisions(&swept, world).into_iter().map(|c| c.aabb());
        let stop = if delta > 0.0 {
            ahead
                .map(|b| b.min[axis])
                .filter(|face| *face >= current.max[axis] - CONTACT_EPSILON)
                .reduce(f32::min)
        } else {
            ahead
                .map(|b| b.max[axis])
                .filter(|face| *face <= current.min[axis] + CONTACT_EPSILON)
                .reduce(f32::max)
        };

        match stop {
            Some(face) if delta > 0.0 => {
                state.position[axis] = face - state.size[axis];
                true
            }
            Some(face) => {
                state.position[axis] = face;
                true
            }
            None => {
                state.position[axis] += delta;
                false
            }
        }
    }

    /// Shrinks the box on the two axes it is not moving along, so resting
    /// flush against a wall does not count as overlapping it.
    fn inset_across(aabb: &AABB, axis: usize) -> AABB {
        let mut inset = Vec3::splat(CONTACT_EPSILON);
        inset[axis] = 0.0;
        AABB::new(aabb.min + inset, aabb.max - inset)
    }

    fn has_ground_below(state: &PlayerState, world: &World) -> bool {
        let feet = state.aabb();
        let probe = AABB::new(
            Vec3::new(feet.min.x, feet.min.y - GROUND_PROBE, feet.min.z),
            Vec3::new(feet.max.x, feet.min.y, feet.max.z),
        );
        !collect_collisions(&Self::inset_across(&probe, 1), world).is_empty()
    }
}
