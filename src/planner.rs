use crate::constraint::Constraint;
use crate::debug::debug_segment;
use crate::error::PlanError;
use crate::math::{vector_to_heading, Point2d, Vector2d};
use crate::trajectory::{Trajectory, TrajectoryPoint};
use cgmath::prelude::*;
use log::{debug, trace};

mod smoothing;
mod steering;

/// The maximum number of constraint corrections attempted for a single step.
const MAX_RESOLVE_STEPS: usize = 16;

/// The attributes of a trajectory planner.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerAttributes {
    /// The number of trajectory points generated after the seed point.
    pub path_points_count: usize,
    /// The distance advanced per step, in world units.
    pub speed: f64,
    /// The maximum heading change per step, in degrees.
    pub max_steering_angle: f64,
    /// The relative lateral velocity above which the push-away policy
    /// engages.
    pub push_away_threshold: f64,
    /// The distance from the target direction line within which the
    /// stabilization policies take over from attraction, in world units.
    pub attraction_distance: f64,
}

impl Default for PlannerAttributes {
    fn default() -> Self {
        Self {
            path_points_count: 40,
            speed: 10.0,
            max_steering_angle: 20.0,
            push_away_threshold: 0.15,
            attraction_distance: 60.0,
        }
    }
}

/// A steering trajectory planner.
///
/// Produces a fixed length trajectory which tracks a moving target's
/// direction line, matches its velocity and detours around obstacle
/// constraints, without exceeding the agent's steering capability.
#[derive(Clone, Debug, Default)]
pub struct Planner {
    attributes: PlannerAttributes,
}

impl Planner {
    /// Creates a new planner.
    pub fn new(attributes: PlannerAttributes) -> Self {
        Self { attributes }
    }

    /// The planner's attributes.
    pub fn attributes(&self) -> &PlannerAttributes {
        &self.attributes
    }

    /// Sets the distance advanced per step.
    pub fn set_speed(&mut self, speed: f64) {
        self.attributes.speed = speed;
    }

    /// Plans a trajectory which intercepts the target's direction line and
    /// matches its velocity, satisfying the given constraints.
    ///
    /// # Parameters
    /// * `position` - The agent's current position.
    /// * `velocity` - The agent's current velocity; must be nonzero.
    /// * `target_position` - The target's current position.
    /// * `target_velocity` - The target's unit velocity.
    /// * `constraints` - The obstacle constraints the trajectory must satisfy.
    pub fn plan(
        &self,
        position: Point2d,
        velocity: Vector2d,
        target_position: Point2d,
        target_velocity: Vector2d,
        constraints: &[Constraint],
    ) -> Result<Trajectory, PlanError> {
        let attribs = &self.attributes;
        let mut position = position;
        let mut velocity = velocity.normalize();

        let mut points = Vec::with_capacity(attribs.path_points_count + 1);
        points.push(TrajectoryPoint {
            position,
            heading: vector_to_heading(velocity),
        });

        for step in 0..attribs.path_points_count {
            trace!("step [{}]", step);

            let desired = steering::desired_velocity(
                position,
                velocity,
                target_position,
                target_velocity,
                attribs,
            )
            .normalize();

            let prev_position = position;
            let prev_velocity = velocity;
            velocity = steering::clamp_steering(velocity, desired, attribs.max_steering_angle);
            position += velocity * attribs.speed;

            let corrected = self.resolve_constraints(
                constraints,
                prev_position,
                prev_velocity,
                &mut position,
                &mut velocity,
                step,
            )?;

            debug_segment(step, prev_position, position);
            points.push(TrajectoryPoint {
                position,
                heading: vector_to_heading(velocity),
            });

            if corrected {
                debug!("constraint correction at step [{}]", step);
                smoothing::smooth_backward(&mut points, attribs.speed, attribs.max_steering_angle);
            }
        }

        Ok(Trajectory::from_points(points))
    }

    /// Repeatedly asks the violated constraints to correct the tentative
    /// point until none are violated. Returns whether the point was changed.
    fn resolve_constraints(
        &self,
        constraints: &[Constraint],
        prev_position: Point2d,
        prev_velocity: Vector2d,
        position: &mut Point2d,
        velocity: &mut Vector2d,
        step: usize,
    ) -> Result<bool, PlanError> {
        let mut corrected = false;
        for _ in 0..MAX_RESOLVE_STEPS {
            let violated = constraints
                .iter()
                .find(|constraint| constraint.will_violate(*position, *velocity));
            let Some(constraint) = violated else {
                return Ok(corrected);
            };
            let (new_position, new_velocity) = constraint
                .suggest_point(prev_position, prev_velocity, *position, *velocity)
                .ok_or(PlanError::TangentUnreachable { step })?;
            *position = new_position;
            *velocity = new_velocity;
            corrected = true;
        }
        Err(PlanError::UnresolvedConstraint { step })
    }
}
