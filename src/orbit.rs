// -------------------- Circular orbit model --------------------
use crate::catalog::CelestialBody;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub(crate) struct Vec3 {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) z: f64,
}

impl Vec3 {
    pub(crate) const ORIGIN: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub(crate) fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub(crate) fn len(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Position of `body` after `time` units at `speed`x. Orbits are circles in the z = 0 plane.
pub(crate) fn position(body: &CelestialBody, time: f64, speed: f64) -> Vec3 {
    let angle = (time * body.orbital_rate * speed).to_radians();
    let (s, c) = angle.sin_cos();
    Vec3 { x: body.distance * c, y: body.distance * s, z: 0.0 }
}

/// Simulated time for one full revolution at `speed`, or `None` for a body that never moves.
pub(crate) fn period(body: &CelestialBody, speed: f64) -> Option<f64> {
    let deg_per_unit = body.orbital_rate * speed;
    if body.is_central() || deg_per_unit == 0.0 {
        return None;
    }
    Some(360.0 / deg_per_unit.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    const EPS: f64 = 1e-9;

    fn close(a: Vec3, b: Vec3, eps: f64) -> bool {
        (a.x - b.x).abs() < eps && (a.y - b.y).abs() < eps && (a.z - b.z).abs() < eps
    }

    #[test]
    fn sun_stays_at_origin() {
        let catalog = Catalog::solar_system();
        let sun = catalog.get("Sun").unwrap();
        for &(t, s) in &[(0.0, 1.0), (37.5, 0.1), (100.0, 10.0), (-12.0, 3.3), (1e6, 1e-3)] {
            assert_eq!(position(sun, t, s), Vec3::ORIGIN);
        }
    }

    #[test]
    fn planets_stay_on_their_circle() {
        let catalog = Catalog::solar_system();
        for b in catalog.bodies().iter().filter(|b| !b.is_central()) {
            for &(t, s) in &[(0.0, 1.0), (13.0, 0.1), (99.0, 10.0), (-4.2, 2.5)] {
                let p = position(b, t, s);
                assert!((p.len() - b.distance).abs() < EPS, "{} off circle at t={t} s={s}", b.name);
                assert_eq!(p.z, 0.0);
            }
        }
    }

    #[test]
    fn zero_time_is_on_the_x_axis() {
        let catalog = Catalog::solar_system();
        for b in catalog.bodies() {
            for s in [0.1, 1.0, 7.0] {
                assert!(close(position(b, 0.0, s), Vec3::new(b.distance, 0.0, 0.0), EPS));
            }
        }
    }

    #[test]
    fn one_revolution_returns_to_start() {
        let catalog = Catalog::solar_system();
        for b in catalog.bodies().iter().filter(|b| !b.is_central()) {
            for &(t, s) in &[(3.0, 1.0), (41.0, 0.3), (88.0, 9.5)] {
                let p = period(b, s).unwrap();
                assert!(close(position(b, t, s), position(b, t + p, s), 1e-6), "{} not periodic", b.name);
            }
        }
    }

    #[test]
    fn quarter_turn() {
        let catalog = Catalog::solar_system();
        let earth = catalog.get("Earth").unwrap();
        let quarter = 90.0 / earth.orbital_rate;
        assert!(close(position(earth, quarter, 1.0), Vec3::new(0.0, 1.0, 0.0), EPS));
    }

    #[test]
    fn sun_has_no_period() {
        let catalog = Catalog::solar_system();
        assert_eq!(period(catalog.get("Sun").unwrap(), 1.0), None);
        assert_eq!(period(catalog.get("Earth").unwrap(), 0.0), None);
    }
}
