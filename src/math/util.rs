use super::{Point2d, Vector2d};

/// Rotates a vector 90 degrees clockwise.
pub fn rot90(vec: Vector2d) -> Vector2d {
    Vector2d::new(-vec.y, vec.x)
}

/// Rotates a vector by the given angle in degrees.
pub fn rotate(vec: Vector2d, degrees: f64) -> Vector2d {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vector2d::new(vec.x * cos - vec.y * sin, vec.x * sin + vec.y * cos)
}

/// Converts a heading in degrees to a unit velocity vector.
pub fn heading_to_vector(degrees: f64) -> Vector2d {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vector2d::new(cos, sin)
}

/// Converts a velocity vector to its heading in degrees, in the range (-180, 180].
pub fn vector_to_heading(vec: Vector2d) -> f64 {
    vec.y.atan2(vec.x).to_degrees()
}

/// The smallest signed difference between two headings, in degrees.
pub fn heading_delta(from: f64, to: f64) -> f64 {
    let mut delta = (to - from) % 360.0;
    if delta > 180.0 {
        delta -= 360.0;
    }
    if delta <= -180.0 {
        delta += 360.0;
    }
    delta
}

/// The sign of a scalar; -1 for negative values, +1 otherwise.
pub fn sign(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Compares two scalars with a small tolerance.
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-3
}

/// Signed perpendicular offset of `point` from the infinite line through
/// `origin` along `dir`. The sign encodes which side of the line the point
/// lies on.
pub fn signed_line_offset(point: Point2d, origin: Point2d, dir: Vector2d) -> f64 {
    (point - origin).perp_dot(dir)
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::{Rng, SeedableRng};

    #[test]
    fn rotate_identity_and_inverse() {
        let mut rng = rand::rngs::StdRng::from_seed(*b"Thirty two byte seed for tests!!");
        for _ in 0..100 {
            let v = heading_to_vector(rng.gen_range(-180.0..180.0));

            let same = rotate(v, 0.0);
            assert_approx_eq!(same.x, v.x, 1e-9);
            assert_approx_eq!(same.y, v.y, 1e-9);

            let angle = rng.gen_range(-360.0..360.0);
            let back = rotate(rotate(v, angle), -angle);
            assert_approx_eq!(back.x, v.x, 1e-9);
            assert_approx_eq!(back.y, v.y, 1e-9);
        }
    }

    #[test]
    fn rot90_matches_rotate() {
        let v = Vector2d::new(3.0, -2.0);
        let r = rotate(v, 90.0);
        assert_approx_eq!(r.x, rot90(v).x, 1e-9);
        assert_approx_eq!(r.y, rot90(v).y, 1e-9);
    }

    #[test]
    fn heading_round_trip() {
        for degrees in [-179.0, -90.0, -45.0, 0.0, 30.0, 90.0, 179.0, 180.0] {
            let v = heading_to_vector(degrees);
            assert_approx_eq!(vector_to_heading(v), degrees, 1e-6);
        }
    }

    #[test]
    fn heading_delta_wraps() {
        assert_approx_eq!(heading_delta(10.0, 30.0), 20.0, 1e-9);
        assert_approx_eq!(heading_delta(170.0, -170.0), 20.0, 1e-9);
        assert_approx_eq!(heading_delta(-170.0, 170.0), -20.0, 1e-9);
    }

    #[test]
    fn sign_convention() {
        assert_eq!(sign(-3.5), -1.0);
        assert_eq!(sign(0.0), 1.0);
        assert_eq!(sign(2.0), 1.0);
    }

    #[test]
    fn line_offset_side() {
        let origin = Point2d::new(10.0, 0.0);
        let dir = Vector2d::new(1.0, 0.0);
        assert!(signed_line_offset(Point2d::new(0.0, -5.0), origin, dir) > 0.0);
        assert!(signed_line_offset(Point2d::new(0.0, 5.0), origin, dir) < 0.0);
        assert_approx_eq!(
            signed_line_offset(Point2d::new(3.0, -4.0), origin, dir),
            4.0,
            1e-9
        );
    }
}
