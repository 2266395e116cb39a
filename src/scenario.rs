use crate::agent::AgentState;
use crate::constraint::{try_join_circles, Constraint, ShapeDescriptor};
use crate::error::PlanError;
use crate::planner::Planner;
use crate::trajectory::Trajectory;
use crate::{ObstacleId, ObstacleSet};
use itertools::Itertools;
use smallvec::SmallVec;

/// A planning scenario: a pursuing agent, the target it intercepts, and the
/// obstacles between them.
///
/// The scenario owns the most recently planned trajectory and can replay it
/// point by point onto the agent.
#[derive(Clone, Debug)]
pub struct Scenario {
    /// The pursuing agent.
    agent: AgentState,
    /// The agent whose velocity is to be matched.
    target: AgentState,
    /// The obstacles in the scene.
    obstacles: ObstacleSet,
    /// The trajectory planner.
    planner: Planner,
    /// The most recently planned trajectory.
    trajectory: Trajectory,
    /// The playback position along the trajectory.
    playback_step: usize,
}

impl Scenario {
    /// Creates a scenario from the two agents' initial states.
    pub fn new(agent: AgentState, target: AgentState) -> Self {
        Self {
            agent,
            target,
            obstacles: ObstacleSet::default(),
            planner: Planner::default(),
            trajectory: Trajectory::default(),
            playback_step: 0,
        }
    }

    /// The pursuing agent.
    pub fn agent(&self) -> &AgentState {
        &self.agent
    }

    /// Gets a mutable reference to the pursuing agent.
    pub fn agent_mut(&mut self) -> &mut AgentState {
        &mut self.agent
    }

    /// The target agent.
    pub fn target(&self) -> &AgentState {
        &self.target
    }

    /// Gets a mutable reference to the target agent.
    pub fn target_mut(&mut self) -> &mut AgentState {
        &mut self.target
    }

    /// The trajectory planner.
    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    /// Gets a mutable reference to the trajectory planner.
    pub fn planner_mut(&mut self) -> &mut Planner {
        &mut self.planner
    }

    /// The most recently planned trajectory.
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Adds an obstacle to the scene.
    pub fn add_obstacle(&mut self, shape: &ShapeDescriptor) -> ObstacleId {
        self.obstacles.insert(Constraint::from_shape(shape))
    }

    /// Removes an obstacle from the scene.
    pub fn remove_obstacle(&mut self, id: ObstacleId) -> Option<Constraint> {
        self.obstacles.remove(id)
    }

    /// Gets a reference to the obstacle with the given ID.
    pub fn get_obstacle(&self, id: ObstacleId) -> Option<&Constraint> {
        self.obstacles.get(id)
    }

    /// Returns an iterator over all the obstacles in the scene.
    pub fn iter_obstacles(&self) -> impl Iterator<Item = (ObstacleId, &Constraint)> {
        self.obstacles.iter()
    }

    /// Joins pairs of circular obstacles which are within `max_spacing` of
    /// touching, until no more pairs can be joined. Each join replaces one
    /// circle of the pair and discards the other.
    pub fn merge_obstacles(&mut self, max_spacing: f64) {
        loop {
            let keys: SmallVec<[ObstacleId; 8]> = self
                .obstacles
                .iter()
                .filter(|(_, constraint)| matches!(constraint, Constraint::Circle(_)))
                .map(|(id, _)| id)
                .collect();

            let mut absorbed = None;
            for (&a, &b) in keys.iter().tuple_combinations() {
                if let Some([Constraint::Circle(circle_a), Constraint::Circle(circle_b)]) =
                    self.obstacles.get_disjoint_mut([a, b])
                {
                    if try_join_circles(circle_a, circle_b, max_spacing) {
                        absorbed = Some(b);
                        break;
                    }
                }
            }

            match absorbed {
                Some(id) => {
                    self.obstacles.remove(id);
                }
                None => break,
            }
        }
    }

    /// Plans a fresh trajectory from the agents' current states and the
    /// current obstacle set, and resets the playback position.
    pub fn recompute_path(&mut self) -> Result<&Trajectory, PlanError> {
        self.planner.set_speed(self.agent.speed());
        let constraints = self.obstacles.values().cloned().collect::<Vec<_>>();
        self.trajectory = self.planner.plan(
            self.agent.position(),
            self.agent.velocity(),
            self.target.position(),
            self.target.velocity(),
            &constraints,
        )?;
        self.playback_step = 0;
        Ok(&self.trajectory)
    }

    /// Advances the agent onto the next point of the planned trajectory.
    /// Returns `false` once the end of the trajectory is reached.
    pub fn step_playback(&mut self) -> bool {
        let point = match self.trajectory.get(self.playback_step + 1) {
            Some(point) => *point,
            None => return false,
        };
        self.playback_step += 1;
        self.agent.apply_point(&point);
        true
    }
}
