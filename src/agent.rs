use crate::math::{heading_to_vector, vector_to_heading, Point2d, Vector2d};
use crate::trajectory::TrajectoryPoint;
use cgmath::prelude::*;

/// The kinematic state of a moving agent.
///
/// The heading is kept consistent with the velocity: it is recomputed
/// whenever the velocity changes and is never assigned on its own.
#[derive(Clone, Copy, Debug)]
pub struct AgentState {
    /// The agent's position in world space.
    position: Point2d,
    /// The agent's unit velocity.
    velocity: Vector2d,
    /// The distance the agent travels per trajectory step.
    speed: f64,
    /// The agent's heading in degrees.
    heading: f64,
}

impl AgentState {
    /// Creates an agent state.
    ///
    /// # Parameters
    /// * `position` - The agent's position in world space.
    /// * `velocity` - The agent's velocity; must be nonzero. It is
    ///   normalised and its heading derived from it.
    /// * `speed` - The distance the agent travels per trajectory step.
    pub fn new(position: Point2d, velocity: Vector2d, speed: f64) -> Self {
        let velocity = velocity.normalize();
        Self {
            position,
            velocity,
            speed,
            heading: vector_to_heading(velocity),
        }
    }

    /// The agent's position in world space.
    pub fn position(&self) -> Point2d {
        self.position
    }

    /// The agent's unit velocity.
    pub fn velocity(&self) -> Vector2d {
        self.velocity
    }

    /// The distance the agent travels per trajectory step.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// The agent's heading in degrees.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Sets the agent's position.
    pub fn set_position(&mut self, position: Point2d) {
        self.position = position;
    }

    /// Sets the agent's velocity, renormalising it and recomputing the
    /// heading. The velocity must be nonzero.
    pub fn set_velocity(&mut self, velocity: Vector2d) {
        self.velocity = velocity.normalize();
        self.heading = vector_to_heading(self.velocity);
    }

    /// Sets the distance the agent travels per trajectory step.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Places the agent on a trajectory point, deriving its velocity from
    /// the stored heading.
    pub fn apply_point(&mut self, point: &TrajectoryPoint) {
        self.position = point.position;
        self.heading = point.heading;
        self.velocity = heading_to_vector(point.heading);
    }
}
