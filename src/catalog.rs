use crate::error::{Result, SolsimError};
use serde::Serialize;

// -------------------- Display colors --------------------
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum BodyColor {
    Yellow,
    Gray,
    Orange,
    Blue,
    Red,
    Brown,
    Gold,
    LightBlue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl BodyColor {
    /// Terminal-friendly RGB for the named color.
    pub(crate) fn rgb(self) -> Rgb {
        match self {
            BodyColor::Yellow => Rgb { r: 255, g: 220, b: 90 },
            BodyColor::Gray => Rgb { r: 170, g: 170, b: 170 },
            BodyColor::Orange => Rgb { r: 255, g: 165, b: 60 },
            BodyColor::Blue => Rgb { r: 90, g: 140, b: 255 },
            BodyColor::Red => Rgb { r: 255, g: 90, b: 80 },
            BodyColor::Brown => Rgb { r: 190, g: 120, b: 70 },
            BodyColor::Gold => Rgb { r: 240, g: 200, b: 80 },
            BodyColor::LightBlue => Rgb { r: 150, g: 215, b: 240 },
        }
    }
}

// -------------------- Bodies --------------------
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CelestialBody {
    pub(crate) name: &'static str,
    /// Rendering scale factor (the info panel reports it in Earth radii).
    pub(crate) radius: f64,
    /// AU from the central body.
    pub(crate) distance: f64,
    pub(crate) color: BodyColor,
    /// Degrees per unit of simulated time.
    pub(crate) orbital_rate: f64,
}

impl CelestialBody {
    pub(crate) fn is_central(&self) -> bool {
        self.distance == 0.0
    }
}

static SOLAR_SYSTEM: [CelestialBody; 9] = [
    CelestialBody { name: "Sun", radius: 0.1, distance: 0.0, color: BodyColor::Yellow, orbital_rate: 0.0 },
    CelestialBody { name: "Mercury", radius: 0.003, distance: 0.39, color: BodyColor::Gray, orbital_rate: 47.87 },
    CelestialBody { name: "Venus", radius: 0.007, distance: 0.72, color: BodyColor::Orange, orbital_rate: 35.02 },
    CelestialBody { name: "Earth", radius: 0.0075, distance: 1.0, color: BodyColor::Blue, orbital_rate: 29.78 },
    CelestialBody { name: "Mars", radius: 0.004, distance: 1.52, color: BodyColor::Red, orbital_rate: 24.077 },
    CelestialBody { name: "Jupiter", radius: 0.08, distance: 5.20, color: BodyColor::Brown, orbital_rate: 13.07 },
    CelestialBody { name: "Saturn", radius: 0.07, distance: 9.58, color: BodyColor::Gold, orbital_rate: 9.69 },
    CelestialBody { name: "Uranus", radius: 0.03, distance: 19.22, color: BodyColor::LightBlue, orbital_rate: 6.81 },
    CelestialBody { name: "Neptune", radius: 0.03, distance: 30.05, color: BodyColor::Blue, orbital_rate: 5.43 },
];

/// Immutable body table, built once at startup and passed around by reference.
#[derive(Debug)]
pub(crate) struct Catalog {
    bodies: &'static [CelestialBody],
}

impl Catalog {
    pub(crate) fn solar_system() -> Self {
        Self { bodies: &SOLAR_SYSTEM }
    }

    pub(crate) fn bodies(&self) -> &[CelestialBody] {
        self.bodies
    }

    pub(crate) fn len(&self) -> usize {
        self.bodies.len()
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bodies.iter().map(|b| b.name)
    }

    /// Looks a body up by name. Matching ignores ASCII case so `--select earth` works.
    pub(crate) fn get(&self, name: &str) -> Result<&CelestialBody> {
        self.bodies
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| SolsimError::UnknownBody(name.to_string()))
    }

    pub(crate) fn index_of(&self, name: &str) -> Result<usize> {
        self.bodies
            .iter()
            .position(|b| b.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| SolsimError::UnknownBody(name.to_string()))
    }

    pub(crate) fn at(&self, index: usize) -> Option<&CelestialBody> {
        self.bodies.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_nine_bodies_with_unique_names() {
        let catalog = Catalog::solar_system();
        assert_eq!(catalog.len(), 9);
        let mut names: Vec<_> = catalog.names().collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 9);
    }

    #[test]
    fn central_body_is_fixed() {
        let catalog = Catalog::solar_system();
        let central: Vec<_> = catalog.bodies().iter().filter(|b| b.is_central()).collect();
        assert_eq!(central.len(), 1);
        assert_eq!(central[0].name, "Sun");
        assert_eq!(central[0].orbital_rate, 0.0);
    }

    #[test]
    fn distances_and_rates_are_non_negative() {
        for b in Catalog::solar_system().bodies() {
            assert!(b.distance >= 0.0, "{} has negative distance", b.name);
            assert!(b.orbital_rate >= 0.0, "{} has negative rate", b.name);
        }
    }

    #[test]
    fn earth_lookup() {
        let catalog = Catalog::solar_system();
        let earth = catalog.get("Earth").unwrap();
        assert_eq!(earth.radius, 0.0075);
        assert_eq!(earth.distance, 1.0);
        assert_eq!(earth.orbital_rate, 29.78);
        assert_eq!(earth.color, BodyColor::Blue);
        assert_eq!(catalog.get("earth").unwrap().name, "Earth");
        assert_eq!(catalog.index_of("Earth").unwrap(), 3);
    }

    #[test]
    fn unknown_body_is_an_error() {
        let catalog = Catalog::solar_system();
        match catalog.get("Pluto") {
            Err(SolsimError::UnknownBody(name)) => assert_eq!(name, "Pluto"),
            other => panic!("expected UnknownBody, got {other:?}"),
        }
        assert!(catalog.index_of("").is_err());
    }

    #[test]
    fn colors_serialize_lowercase() {
        let json = serde_json::to_string(&BodyColor::LightBlue).unwrap();
        assert_eq!(json, "\"lightblue\"");
    }
}
