use crate::math::{heading_delta, Point2d};
use itertools::Itertools;

/// A single point along a planned trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryPoint {
    /// The world space position of the point.
    pub position: Point2d,
    /// The agent's heading at the point, in degrees.
    pub heading: f64,
}

/// An ordered sequence of trajectory points produced by one planning call.
///
/// The first point is the agent's state at the time of planning; each
/// subsequent point is one steering step further along. The caller owns the
/// trajectory exclusively; the planner keeps no reference to it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    /// Creates a trajectory from a sequence of points.
    pub(crate) fn from_points(points: Vec<TrajectoryPoint>) -> Self {
        Self { points }
    }

    /// The number of points in the trajectory, including the seed point.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the trajectory contains no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Gets the point at the given step index.
    pub fn get(&self, index: usize) -> Option<&TrajectoryPoint> {
        self.points.get(index)
    }

    /// The points of the trajectory.
    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    /// Returns an iterator over the points of the trajectory.
    pub fn iter(&self) -> impl Iterator<Item = &TrajectoryPoint> {
        self.points.iter()
    }

    /// Returns an iterator over consecutive pairs of trajectory points.
    pub fn segments(&self) -> impl Iterator<Item = (&TrajectoryPoint, &TrajectoryPoint)> {
        self.points.iter().tuple_windows()
    }

    /// The largest absolute heading change between consecutive points, in degrees.
    pub fn max_turn(&self) -> f64 {
        self.segments()
            .map(|(a, b)| heading_delta(a.heading, b.heading).abs())
            .fold(0.0, f64::max)
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectoryPoint;
    type IntoIter = std::slice::Iter<'a, TrajectoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn point(x: f64, y: f64, heading: f64) -> TrajectoryPoint {
        TrajectoryPoint {
            position: Point2d::new(x, y),
            heading,
        }
    }

    #[test]
    fn measures_the_largest_turn() {
        let trajectory = Trajectory::from_points(vec![
            point(0.0, 0.0, 0.0),
            point(10.0, 0.0, 10.0),
            point(20.0, 2.0, -5.0),
        ]);
        assert_approx_eq!(trajectory.max_turn(), 15.0, 1e-9);
    }

    #[test]
    fn iterates_segments_pairwise() {
        let trajectory = Trajectory::from_points(vec![
            point(0.0, 0.0, 0.0),
            point(10.0, 0.0, 0.0),
            point(20.0, 0.0, 0.0),
        ]);
        assert_eq!(trajectory.segments().count(), 2);
        assert!(trajectory
            .segments()
            .all(|(a, b)| b.position.x - a.position.x == 10.0));
    }
}
