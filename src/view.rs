// -------------------- Orbit camera + orthographic projection --------------------
use crate::orbit::Vec3;
use crate::scene::SceneLayout;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

/// Terminal cells are roughly twice as tall as they are wide.
pub(crate) const CELL_ASPECT: f32 = 0.5;

const YAW_STEP: f32 = 0.08;
const PITCH_STEP: f32 = 0.06;
const ZOOM_STEP: f32 = 1.25;
const ZOOM_MIN: f32 = 0.5;
const ZOOM_MAX: f32 = 32.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CameraMove {
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
    ZoomIn,
    ZoomOut,
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Viewport {
    pub(crate) x: u16,
    pub(crate) y: u16,
    pub(crate) w: u16,
    pub(crate) h: u16,
}

impl Viewport {
    fn center(&self) -> (f32, f32) {
        (self.x as f32 + self.w as f32 * 0.5, self.y as f32 + self.h as f32 * 0.5)
    }

    fn contains(&self, col: i32, row: i32) -> bool {
        col >= self.x as i32
            && row >= self.y as i32
            && col < self.x as i32 + self.w as i32
            && row < self.y as i32 + self.h as i32
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Projected {
    pub(crate) col: u16,
    pub(crate) row: u16,
    /// Larger is closer to the viewer.
    pub(crate) depth: f32,
}

/// `yaw` is the eye's azimuth around the z axis, `elevation` its angle above the orbital plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Camera {
    pub(crate) yaw: f32,
    pub(crate) elevation: f32,
    pub(crate) zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self { yaw: FRAC_PI_4, elevation: 0.75, zoom: 1.0 }
    }
}

impl Camera {
    pub(crate) fn apply(&mut self, m: CameraMove) {
        match m {
            CameraMove::YawLeft => self.yaw -= YAW_STEP,
            CameraMove::YawRight => self.yaw += YAW_STEP,
            CameraMove::PitchUp => self.elevation = (self.elevation + PITCH_STEP).min(FRAC_PI_2),
            CameraMove::PitchDown => self.elevation = (self.elevation - PITCH_STEP).max(0.0),
            CameraMove::ZoomIn => self.zoom = (self.zoom * ZOOM_STEP).min(ZOOM_MAX),
            CameraMove::ZoomOut => self.zoom = (self.zoom / ZOOM_STEP).max(ZOOM_MIN),
            CameraMove::Reset => *self = Camera::default(),
        }
    }

    /// Rows per scene unit. The axis cube always fits the viewport at zoom 1 with equal aspect.
    pub(crate) fn rows_per_unit(&self, vp: Viewport, layout: &SceneLayout) -> f32 {
        let half = layout.axis_range.half_span().max(1e-6) as f32;
        let fit_rows = vp.h as f32 * 0.5 / half;
        let fit_cols = vp.w as f32 * 0.5 * CELL_ASPECT / half;
        fit_rows.min(fit_cols) * self.zoom
    }

    pub(crate) fn project(&self, vp: Viewport, layout: &SceneLayout, p: Vec3) -> Option<Projected> {
        let c = layout.axis_range.center();
        let (x, y, z) = ((p.x - c) as f32, (p.y - c) as f32, (p.z - c) as f32);

        let (sy, cy) = self.yaw.sin_cos();
        let x1 = x * cy + y * sy;
        let y1 = -x * sy + y * cy;

        let (se, ce) = self.elevation.sin_cos();
        let up = z * ce + y1 * se;
        let depth = -y1 * ce + z * se;

        let scale = self.rows_per_unit(vp, layout);
        let (cx, cy) = vp.center();
        let col = (cx + x1 * scale / CELL_ASPECT).floor() as i32;
        let row = (cy - up * scale).floor() as i32;
        if !vp.contains(col, row) {
            return None;
        }
        Some(Projected { col: col as u16, row: row as u16, depth })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport { x: 0, y: 0, w: 120, h: 40 };

    fn top_down() -> Camera {
        Camera { yaw: 0.0, elevation: FRAC_PI_2, zoom: 1.0 }
    }

    #[test]
    fn origin_maps_to_center() {
        let p = Camera::default().project(VP, &SceneLayout::SOLAR, Vec3::ORIGIN).unwrap();
        assert_eq!((p.col, p.row), (60, 20));
    }

    #[test]
    fn top_down_axes() {
        let cam = top_down();
        let layout = SceneLayout::SOLAR;
        let right = cam.project(VP, &layout, Vec3::new(10.0, 0.0, 0.0)).unwrap();
        let up = cam.project(VP, &layout, Vec3::new(0.0, 10.0, 0.0)).unwrap();
        assert!(right.col > 60 && right.row == 20);
        assert!(up.row < 20 && up.col == 60);
    }

    #[test]
    fn equal_aspect_on_screen() {
        // one unit across is two columns for every row up
        let cam = top_down();
        let layout = SceneLayout::SOLAR;
        let right = cam.project(VP, &layout, Vec3::new(35.0, 0.0, 0.0)).unwrap();
        let up = cam.project(VP, &layout, Vec3::new(0.0, 34.0, 0.0)).unwrap();
        let dx = right.col as f32 - 60.0;
        let dy = 20.0 - up.row as f32;
        assert!((dx / 2.0 - dy).abs() <= 1.5, "dx={dx} dy={dy}");
    }

    #[test]
    fn zoom_pushes_outer_orbits_off_screen() {
        let mut cam = top_down();
        let layout = SceneLayout::SOLAR;
        let neptune = Vec3::new(30.05, 0.0, 0.0);
        assert!(cam.project(VP, &layout, neptune).is_some());
        for _ in 0..4 {
            cam.apply(CameraMove::ZoomIn);
        }
        assert!(cam.project(VP, &layout, neptune).is_none());
        cam.apply(CameraMove::Reset);
        assert_eq!(cam, Camera::default());
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = Camera::default();
        for _ in 0..100 {
            cam.apply(CameraMove::PitchUp);
        }
        assert_eq!(cam.elevation, FRAC_PI_2);
        for _ in 0..100 {
            cam.apply(CameraMove::PitchDown);
        }
        assert_eq!(cam.elevation, 0.0);
    }

    #[test]
    fn nearer_points_have_greater_depth() {
        let cam = Camera { yaw: 0.0, elevation: 0.5, zoom: 1.0 };
        let layout = SceneLayout::SOLAR;
        let near = cam.project(VP, &layout, Vec3::new(0.0, -5.0, 0.0)).unwrap();
        let far = cam.project(VP, &layout, Vec3::new(0.0, 5.0, 0.0)).unwrap();
        assert!(near.depth > far.depth);
    }
}
