use std::time::Instant;

use pursuit_sim::math::{Point2d, Vector2d};
use pursuit_sim::{AgentState, Scenario};

fn main() {
    let args = std::env::args()
        .skip(1)
        .map(|arg| arg.parse::<f64>())
        .collect::<Result<Vec<_>, _>>();
    let args = match args.as_deref() {
        Ok([x, y, vx, vy, tx, ty, tvx, tvy]) => [*x, *y, *vx, *vy, *tx, *ty, *tvx, *tvy],
        _ => {
            eprintln!("usage: pursuit-sim <x> <y> <vx> <vy> <tx> <ty> <tvx> <tvy>");
            std::process::exit(1);
        }
    };

    let agent = AgentState::new(
        Point2d::new(args[0], args[1]),
        Vector2d::new(args[2], args[3]),
        30.0,
    );
    let target = AgentState::new(
        Point2d::new(args[4], args[5]),
        Vector2d::new(args[6], args[7]),
        30.0,
    );
    let mut scenario = Scenario::new(agent, target);

    let start = Instant::now();
    match scenario.recompute_path() {
        Ok(trajectory) => {
            for (step, point) in trajectory.iter().enumerate() {
                println!(
                    "[{:2}] ({:8.2}; {:8.2}) heading {:7.2}",
                    step, point.position.x, point.position.y, point.heading
                );
            }
            println!(
                "Planned {} points in {:?}",
                trajectory.len(),
                start.elapsed()
            );
        }
        Err(err) => {
            eprintln!("Planning failed: {}", err);
            std::process::exit(1);
        }
    }
}
