use super::steering::clamp_steering;
use crate::math::{heading_to_vector, vector_to_heading};
use crate::trajectory::TrajectoryPoint;
use log::trace;

/// Restores turning rate feasibility after a constraint correction has
/// perturbed the last committed point.
///
/// The committed prefix is re-traversed in reverse from the corrected point:
/// at each pair the reversed velocities are put through the same turning
/// rate clamp as forward steering. When the clamp alters the velocity at the
/// earlier point of the pair, that point is re-positioned one step away from
/// its successor along the clamped direction, its heading is rewritten from
/// the negated clamped velocity, and the heading one index further back is
/// recomputed from the resulting position delta. The walk stops at the first
/// pair whose reversed turn is already within the limit, or at the
/// trajectory start.
pub(crate) fn smooth_backward(points: &mut [TrajectoryPoint], speed: f64, max_degrees: f64) {
    for j in (1..points.len()).rev() {
        let rev_current = -heading_to_vector(points[j].heading);
        let rev_previous = -heading_to_vector(points[j - 1].heading);

        let clamped = clamp_steering(rev_current, rev_previous, max_degrees);
        if clamped == rev_previous {
            // The remaining prefix is already feasible.
            break;
        }
        trace!("smoothing point [{}]", j - 1);

        points[j - 1].position = points[j].position + clamped * speed;
        points[j - 1].heading = vector_to_heading(-clamped);
        if j >= 2 {
            let delta = points[j - 1].position - points[j - 2].position;
            points[j - 2].heading = vector_to_heading(delta);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{heading_delta, Point2d};
    use assert_approx_eq::assert_approx_eq;
    use cgmath::prelude::*;

    #[test]
    fn leaves_a_feasible_prefix_untouched() {
        let mut points = vec![
            TrajectoryPoint {
                position: Point2d::new(0.0, 0.0),
                heading: 0.0,
            },
            TrajectoryPoint {
                position: Point2d::new(30.0, 0.0),
                heading: 0.0,
            },
            TrajectoryPoint {
                position: Point2d::new(60.0, 0.0),
                heading: 0.0,
            },
        ];
        let before = points.clone();
        smooth_backward(&mut points, 30.0, 20.0);
        assert_eq!(points, before);
    }

    #[test]
    fn smooths_a_corrected_point_backward() {
        // A tangent correction has swung the last velocity far beyond the
        // steering limit.
        let speed = 30.0;
        let escape_heading = (5.0f64 / 7.0).asin().to_degrees() + 2.0;
        let corrected =
            Point2d::new(30.0, 0.0) + heading_to_vector(escape_heading) * (20.0 * 6.0f64.sqrt());
        let mut points = vec![
            TrajectoryPoint {
                position: Point2d::new(0.0, 0.0),
                heading: 0.0,
            },
            TrajectoryPoint {
                position: Point2d::new(30.0, 0.0),
                heading: 0.0,
            },
            TrajectoryPoint {
                position: corrected,
                heading: escape_heading,
            },
        ];
        smooth_backward(&mut points, speed, 20.0);

        // The corrected point and the seed position are untouched.
        assert_eq!(points[2].position, corrected);
        assert_eq!(points[0].position, Point2d::new(0.0, 0.0));

        // The middle point is pulled towards the detour side and sits one
        // step before the corrected point.
        assert!(points[1].position.y > 0.0);
        assert_approx_eq!(
            (points[2].position - points[1].position).magnitude(),
            speed,
            1e-9
        );

        // Headings agree with the rewritten geometry.
        assert_approx_eq!(
            points[1].heading,
            vector_to_heading(points[2].position - points[1].position),
            1e-9
        );
        assert_approx_eq!(
            points[0].heading,
            vector_to_heading(points[1].position - points[0].position),
            1e-9
        );

        // Turning feasibility is restored across the prefix.
        assert_approx_eq!(
            heading_delta(points[1].heading, points[2].heading).abs(),
            20.0,
            1e-9
        );
        assert!(heading_delta(points[0].heading, points[1].heading).abs() <= 20.0 + 1e-9);
    }
}
