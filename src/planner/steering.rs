use super::PlannerAttributes;
use crate::math::{approx_equal, rot90, rotate, sign, signed_line_offset, Point2d, Vector2d};
use cgmath::prelude::*;
use log::trace;

/// Decides the desired velocity for one steering step, before normalization
/// and the turning rate clamp.
///
/// Far from the target direction line the agent is attracted back towards
/// it; near the line it either damps its drift (push-away) or aims at a
/// lookahead point on the line (stick).
pub(crate) fn desired_velocity(
    position: Point2d,
    velocity: Vector2d,
    target_position: Point2d,
    target_velocity: Vector2d,
    attribs: &PlannerAttributes,
) -> Vector2d {
    let target_right = rot90(target_velocity);
    let offset = signed_line_offset(position, target_position, target_velocity);
    let side_sign = if offset > 0.0 { 1.0 } else { -1.0 };

    if offset.abs() > attribs.attraction_distance {
        trace!("attraction mode, offset {:.3}", offset);
        return velocity + rotate(target_velocity, 45.0 * side_sign);
    }

    let right_cos = velocity.dot(target_right);
    let stabilization = 1.0 - offset.abs() / attribs.attraction_distance;
    let mut stick = right_cos * side_sign < 0.1;

    if right_cos * side_sign > attribs.push_away_threshold {
        let pushed = velocity + target_right * (-side_sign * stabilization * 0.4);
        if approx_equal(sign(pushed.dot(target_right)), sign(right_cos)) {
            trace!("pushing velocity away, offset {:.3}", offset);
            return pushed;
        }
        // Pushing any further would carry the velocity across the line.
        stick = true;
    }

    if stick {
        trace!("sticking to the target direction, offset {:.3}", offset);
        // Aim at the closest point on the line, advanced two steps ahead.
        let lookahead =
            position + target_right * offset + target_velocity * (2.0 * attribs.speed);
        return (lookahead - position).normalize();
    }

    velocity
}

/// Limits the change of direction between two unit velocities to
/// `max_degrees`.
///
/// Returns `desired` untouched if the turn is within the limit; otherwise
/// `current` rotated by the maximum angle towards the desired side.
pub(crate) fn clamp_steering(current: Vector2d, desired: Vector2d, max_degrees: f64) -> Vector2d {
    let cos = current.dot(desired).clamp(-1.0, 1.0);
    let angle = cos.acos().to_degrees();
    if angle > max_degrees {
        let side = sign(rot90(current).dot(desired));
        rotate(current, max_degrees * side)
    } else {
        desired
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{heading_to_vector, vector_to_heading};
    use assert_approx_eq::assert_approx_eq;

    fn attribs() -> PlannerAttributes {
        PlannerAttributes::default()
    }

    #[test]
    fn clamp_passes_small_turns_through() {
        let current = Vector2d::new(1.0, 0.0);
        let desired = heading_to_vector(15.0);
        assert_eq!(clamp_steering(current, desired, 20.0), desired);
    }

    #[test]
    fn clamp_limits_large_turns() {
        let current = Vector2d::new(1.0, 0.0);
        let left = clamp_steering(current, heading_to_vector(60.0), 20.0);
        assert_approx_eq!(vector_to_heading(left), 20.0, 1e-9);
        let right = clamp_steering(current, heading_to_vector(-60.0), 20.0);
        assert_approx_eq!(vector_to_heading(right), -20.0, 1e-9);
    }

    #[test]
    fn sticks_to_a_lookahead_point_on_the_line() {
        let desired = desired_velocity(
            Point2d::new(0.0, 30.0),
            Vector2d::new(1.0, 0.0),
            Point2d::new(400.0, 0.0),
            Vector2d::new(1.0, 0.0),
            &attribs(),
        );
        // Aims at (20, 0), two steps ahead of the closest point on the line.
        assert_approx_eq!(
            vector_to_heading(desired),
            (-30.0f64).atan2(20.0).to_degrees(),
            1e-9
        );
    }

    #[test]
    fn attracts_towards_a_distant_line() {
        let desired = desired_velocity(
            Point2d::new(0.0, 100.0),
            Vector2d::new(1.0, 0.0),
            Point2d::new(0.0, 0.0),
            Vector2d::new(1.0, 0.0),
            &attribs(),
        );
        // The target velocity is rotated 45 degrees towards the line and
        // added to the current velocity.
        assert_approx_eq!(desired.x, 1.0 + 45.0f64.to_radians().cos(), 1e-9);
        assert_approx_eq!(desired.y, -(45.0f64.to_radians().sin()), 1e-9);
    }

    #[test]
    fn push_away_damps_drift_towards_the_line() {
        let desired = desired_velocity(
            Point2d::new(0.0, 30.0),
            heading_to_vector(-30.0),
            Point2d::new(0.0, 0.0),
            Vector2d::new(1.0, 0.0),
            &attribs(),
        );
        // Half way into the attraction band, the lateral drift is damped
        // by 0.5 * 0.4.
        assert_approx_eq!(desired.x, (-30.0f64).to_radians().cos(), 1e-9);
        assert_approx_eq!(desired.y, -0.5 + 0.2, 1e-9);
    }

    #[test]
    fn overshooting_push_falls_back_to_stick() {
        // The push would flip the lateral velocity across the line, so the
        // policy sticks to the line instead.
        let desired = desired_velocity(
            Point2d::new(0.0, 30.0),
            heading_to_vector((-0.18f64).asin().to_degrees()),
            Point2d::new(0.0, 0.0),
            Vector2d::new(1.0, 0.0),
            &attribs(),
        );
        assert_approx_eq!(
            vector_to_heading(desired),
            (-30.0f64).atan2(20.0).to_degrees(),
            1e-9
        );
    }
}
