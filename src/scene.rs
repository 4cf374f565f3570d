//! Scene assembly: one immutable frame of markers plus the session starfield.

use crate::catalog::{BodyColor, Catalog};
use crate::orbit::{position, Vec3};
use crate::starfield::Starfield;
use serde::Serialize;

/// Display radius to marker size.
pub(crate) const MARKER_SCALE: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub(crate) struct AxisRange {
    pub(crate) min: f64,
    pub(crate) max: f64,
}

impl AxisRange {
    pub(crate) fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    pub(crate) fn half_span(&self) -> f64 {
        (self.max - self.min) * 0.5
    }

    pub(crate) fn center(&self) -> f64 {
        (self.max + self.min) * 0.5
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub(crate) struct SceneLayout {
    pub(crate) axis_range: AxisRange,
    pub(crate) axis_titles: [&'static str; 3],
    pub(crate) aspect_ratio: [f64; 3],
    pub(crate) label_position: &'static str,
}

impl SceneLayout {
    pub(crate) const SOLAR: SceneLayout = SceneLayout {
        axis_range: AxisRange { min: -35.0, max: 35.0 },
        axis_titles: ["X (AU)", "Y (AU)", "Z (AU)"],
        aspect_ratio: [1.0, 1.0, 1.0],
        label_position: "top center",
    };

    pub(crate) fn in_bounds(&self, p: Vec3) -> bool {
        let r = self.axis_range;
        r.contains(p.x) && r.contains(p.y) && r.contains(p.z)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct Marker {
    pub(crate) name: &'static str,
    pub(crate) position: Vec3,
    pub(crate) size: f64,
    pub(crate) color: BodyColor,
    pub(crate) label: Option<&'static str>,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct SceneFrame<'a> {
    pub(crate) time: f64,
    pub(crate) speed: f64,
    pub(crate) show_labels: bool,
    pub(crate) layout: SceneLayout,
    pub(crate) markers: Vec<Marker>,
    pub(crate) stars: &'a Starfield,
}

impl SceneFrame<'_> {
    pub(crate) fn marker(&self, name: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.name == name)
    }
}

/// Markers come out in catalog order, which is also their draw order.
pub(crate) fn build_scene<'a>(
    catalog: &Catalog,
    stars: &'a Starfield,
    time: f64,
    speed: f64,
    show_labels: bool,
) -> SceneFrame<'a> {
    let markers = catalog
        .bodies()
        .iter()
        .map(|b| Marker {
            name: b.name,
            position: position(b, time, speed),
            size: b.radius * MARKER_SCALE,
            color: b.color,
            label: show_labels.then_some(b.name),
        })
        .collect();

    SceneFrame {
        time,
        speed,
        show_labels,
        layout: SceneLayout::SOLAR,
        markers,
        stars,
    }
}
