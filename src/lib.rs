pub use agent::AgentState;
pub use cgmath;
pub use constraint::{
    try_join_circles, CircleConstraint, Constraint, PolylineConstraint, ShapeDescriptor,
};
#[cfg(feature = "debug")]
pub use debug::take_debug_frame;
pub use error::PlanError;
pub use planner::{Planner, PlannerAttributes};
pub use scenario::Scenario;
use slotmap::{new_key_type, SlotMap};
pub use slotmap::{Key, KeyData};
pub use trajectory::{Trajectory, TrajectoryPoint};

mod agent;
mod constraint;
mod debug;
mod error;
pub mod math;
mod planner;
mod scenario;
mod trajectory;

new_key_type! {
    /// Unique ID of an obstacle in a [Scenario].
    pub struct ObstacleId;
}

type ObstacleSet = SlotMap<ObstacleId, Constraint>;
