use crate::debug::debug_circle;
use crate::math::{rotate, Point2d, Vector2d};
use cgmath::prelude::*;

/// Safety margin added around every circular obstacle, in world units.
const CIRCLE_MARGIN: f64 = 20.0;

/// Extra rotation past the tangent line applied to a suggested escape
/// direction, in degrees.
const TANGENT_BUFFER: f64 = 2.0;

/// An opaque obstacle shape record, as supplied by a scene description.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum ShapeDescriptor {
    /// A circular obstacle.
    Circle {
        /// The centre of the circle.
        position: Point2d,
        /// The radius of the circle.
        radius: f64,
    },
    /// An obstacle bounded by a sequence of line segments.
    Polyline {
        /// The boundary points of the obstacle.
        points: Vec<Point2d>,
    },
}

/// An obstacle avoidance constraint a trajectory must satisfy.
///
/// A constraint can test whether a candidate position and velocity violate
/// it, and suggest a corrected position and velocity when they do.
#[derive(Clone, Debug, PartialEq)]
pub enum Constraint {
    /// Keeps the trajectory outside a circular obstacle.
    Circle(CircleConstraint),
    /// A polyline obstacle; declared but not yet enforced.
    Polyline(PolylineConstraint),
    /// A group of constraints treated as one.
    Composite(Vec<Constraint>),
}

impl Constraint {
    /// Builds a constraint from a shape descriptor.
    pub fn from_shape(shape: &ShapeDescriptor) -> Self {
        match shape {
            ShapeDescriptor::Circle { position, radius } => {
                Self::Circle(CircleConstraint::new(*position, *radius))
            }
            ShapeDescriptor::Polyline { points } => Self::Polyline(PolylineConstraint {
                points: points.clone(),
            }),
        }
    }

    /// Whether the given position and velocity violate the constraint.
    pub fn will_violate(&self, position: Point2d, velocity: Vector2d) -> bool {
        match self {
            Self::Circle(circle) => circle.will_violate(position),
            // Polyline obstacles never report a violation.
            Self::Polyline(_) => false,
            Self::Composite(members) => members
                .iter()
                .any(|member| member.will_violate(position, velocity)),
        }
    }

    /// Suggests a corrected position and velocity for a violating point,
    /// reachable from the previous committed point.
    ///
    /// Returns `None` if the previous point is not strictly outside the
    /// constraint's exclusion zone, in which case no correction exists.
    pub fn suggest_point(
        &self,
        prev_position: Point2d,
        prev_velocity: Vector2d,
        position: Point2d,
        velocity: Vector2d,
    ) -> Option<(Point2d, Vector2d)> {
        match self {
            Self::Circle(circle) => circle.suggest_point(prev_position, position),
            Self::Polyline(_) => Some((position, velocity)),
            Self::Composite(members) => {
                match members
                    .iter()
                    .find(|member| member.will_violate(position, velocity))
                {
                    Some(member) => {
                        member.suggest_point(prev_position, prev_velocity, position, velocity)
                    }
                    None => Some((position, velocity)),
                }
            }
        }
    }
}

/// Keeps a trajectory outside a circular obstacle and its safety margin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleConstraint {
    /// The centre of the obstacle.
    pub center: Point2d,
    /// The radius of the obstacle.
    pub radius: f64,
    /// The safety margin added to the radius.
    margin: f64,
}

impl CircleConstraint {
    /// Creates a circle constraint around an obstacle.
    pub fn new(center: Point2d, radius: f64) -> Self {
        Self {
            center,
            radius,
            margin: CIRCLE_MARGIN,
        }
    }

    /// The distance from the centre within which a point violates the
    /// constraint. Recomputed on read; the radius changes when constraints
    /// are joined.
    pub fn violate_distance(&self) -> f64 {
        self.radius + self.margin
    }

    fn violate_distance_sq(&self) -> f64 {
        self.violate_distance() * self.violate_distance()
    }

    /// Whether the given position lies inside the exclusion zone.
    pub fn will_violate(&self, position: Point2d) -> bool {
        (position - self.center).magnitude2() < self.violate_distance_sq()
    }

    /// Suggests a point on the tangent line from `prev_position` to the
    /// exclusion circle, on the same side of the centre line as the
    /// violating `position`, along with the velocity that reaches it.
    ///
    /// Returns `None` if `prev_position` is not strictly outside the
    /// exclusion zone.
    pub fn suggest_point(
        &self,
        prev_position: Point2d,
        position: Point2d,
    ) -> Option<(Point2d, Vector2d)> {
        let to_center = self.center - prev_position;
        let distance = to_center.magnitude();
        if distance <= self.violate_distance() {
            return None;
        }

        debug_circle("exclusion zone", self.center, self.violate_distance());

        let sin = self.violate_distance() / distance;
        let cos = (1.0 - sin * sin).sqrt();
        let tangent_angle = sin.asin().to_degrees();

        let line_offset = (position - self.center).perp_dot(to_center);
        let side_sign = if line_offset > 0.0 { -1.0 } else { 1.0 };

        let escape = rotate(
            to_center / distance,
            (tangent_angle + TANGENT_BUFFER) * side_sign,
        );
        let point = prev_position + escape * (distance * cos);
        Some((point, escape))
    }
}

/// An obstacle bounded by a sequence of line segments.
///
/// A placeholder for future line segment avoidance: it never reports a
/// violation and passes candidate points through unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct PolylineConstraint {
    /// The boundary points of the obstacle.
    pub points: Vec<Point2d>,
}

/// Tries to join two circle constraints which are within `max_spacing` of
/// touching. On success the joined circle is written into `a` and the caller
/// is expected to discard `b`.
///
/// The joined circle spans the gap between the two centres; it does not
/// necessarily contain both input circles.
pub fn try_join_circles(a: &mut CircleConstraint, b: &CircleConstraint, max_spacing: f64) -> bool {
    let distance = (a.center - b.center).magnitude();
    if distance < a.radius + b.radius + max_spacing {
        a.radius = distance / 2.0;
        a.center = a.center.midpoint(b.center);
        return true;
    }
    false
}
