use crate::catalog::Catalog;
use crate::config::Settings;
use crate::error::Result;
use crate::view::CameraMove;
use std::ops::RangeInclusive;

pub(crate) const SPEED_RANGE: RangeInclusive<f64> = 0.1..=10.0;
pub(crate) const TIME_RANGE: RangeInclusive<f64> = 0.0..=100.0;
const SPEED_STEP: f64 = 0.1;
const TIME_STEP: f64 = 1.0;

// -------------------- Slider --------------------
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Slider {
    value: f64,
    min: f64,
    max: f64,
    step: f64,
}

impl Slider {
    pub(crate) fn new(range: RangeInclusive<f64>, step: f64, value: f64) -> Self {
        let (min, max) = range.into_inner();
        Self { value: value.clamp(min, max), min, max, step }
    }

    pub(crate) fn value(&self) -> f64 {
        self.value
    }

    /// Returns true when the value moved.
    pub(crate) fn set(&mut self, v: f64) -> bool {
        if !v.is_finite() {
            return false;
        }
        let v = v.clamp(self.min, self.max);
        let changed = v != self.value;
        self.value = v;
        changed
    }

    pub(crate) fn nudge(&mut self, steps: f64) -> bool {
        self.set(self.value + self.step * steps)
    }

    pub(crate) fn at_min(&self) -> bool {
        self.value <= self.min
    }

    pub(crate) fn at_max(&self) -> bool {
        self.value >= self.max
    }

    pub(crate) fn to_min(&mut self) -> bool {
        self.set(self.min)
    }

    pub(crate) fn to_max(&mut self) -> bool {
        self.set(self.max)
    }

    /// Position along the track in 0..=1, for drawing.
    pub(crate) fn fraction(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        (self.value - self.min) / span
    }
}

// -------------------- Actions --------------------
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ControlAction {
    ToggleLabels,
    Faster,
    Slower,
    StepForward,
    StepBack,
    Rewind,
    JumpToEnd,
    NextBody,
    PrevBody,
    SelectBody(usize),
    TogglePlay,
    Camera(CameraMove),
    ToggleHelp,
    Quit,
}

/// The three values a scene is derived from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SceneInputs {
    pub(crate) time: f64,
    pub(crate) speed: f64,
    pub(crate) show_labels: bool,
}

// -------------------- Control state --------------------
#[derive(Clone, Debug)]
pub(crate) struct Controls {
    pub(crate) show_labels: bool,
    pub(crate) speed: Slider,
    pub(crate) time: Slider,
    pub(crate) playing: bool,
    selected: usize,
    body_count: usize,
}

impl Controls {
    pub(crate) fn from_settings(settings: &Settings, catalog: &Catalog) -> Result<Self> {
        Ok(Self {
            show_labels: settings.show_labels,
            speed: Slider::new(SPEED_RANGE, SPEED_STEP, settings.speed),
            time: Slider::new(TIME_RANGE, TIME_STEP, settings.time),
            playing: false,
            selected: catalog.index_of(&settings.selected)?,
            body_count: catalog.len(),
        })
    }

    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    pub(crate) fn scene_inputs(&self) -> SceneInputs {
        SceneInputs {
            time: self.time.value(),
            speed: self.speed.value(),
            show_labels: self.show_labels,
        }
    }

    /// Applies a control action. Camera, help and quit belong to the shell and are ignored here.
    pub(crate) fn apply(&mut self, action: ControlAction) -> bool {
        match action {
            ControlAction::ToggleLabels => {
                self.show_labels = !self.show_labels;
                true
            }
            ControlAction::Faster => self.speed.nudge(1.0),
            ControlAction::Slower => self.speed.nudge(-1.0),
            ControlAction::StepForward => self.time.nudge(1.0),
            ControlAction::StepBack => self.time.nudge(-1.0),
            ControlAction::Rewind => self.time.to_min(),
            ControlAction::JumpToEnd => self.time.to_max(),
            ControlAction::NextBody => {
                self.selected = (self.selected + 1) % self.body_count;
                true
            }
            ControlAction::PrevBody => {
                self.selected = (self.selected + self.body_count - 1) % self.body_count;
                true
            }
            ControlAction::SelectBody(i) => {
                if i >= self.body_count || i == self.selected {
                    return false;
                }
                self.selected = i;
                true
            }
            ControlAction::TogglePlay => {
                self.playing = !self.playing;
                if self.playing && self.time.at_max() {
                    self.time.to_min();
                }
                true
            }
            ControlAction::Camera(_) | ControlAction::ToggleHelp | ControlAction::Quit => false,
        }
    }

    /// Moves the time slider while playing; playback stops at the end of the track.
    pub(crate) fn advance(&mut self, dt_secs: f64, rate: f64) -> bool {
        if !self.playing {
            return false;
        }
        let changed = self.time.set(self.time.value() + rate * dt_secs);
        if self.time.at_max() {
            self.playing = false;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls() -> Controls {
        Controls::from_settings(&Settings::default(), &Catalog::solar_system()).unwrap()
    }

    #[test]
    fn slider_clamps() {
        let mut s = Slider::new(SPEED_RANGE, SPEED_STEP, 42.0);
        assert_eq!(s.value(), 10.0);
        assert!(!s.nudge(1.0));
        assert!(s.set(-3.0));
        assert_eq!(s.value(), 0.1);
        assert!(s.at_min());
        assert!(!s.set(f64::INFINITY));
    }

    #[test]
    fn slider_fraction() {
        let mut s = Slider::new(TIME_RANGE, TIME_STEP, 25.0);
        assert!((s.fraction() - 0.25).abs() < 1e-12);
        s.to_max();
        assert_eq!(s.fraction(), 1.0);
    }

    #[test]
    fn speed_steps_by_a_tenth() {
        let mut c = controls();
        assert!(c.apply(ControlAction::Faster));
        assert!((c.speed.value() - 1.1).abs() < 1e-9);
        c.apply(ControlAction::Slower);
        c.apply(ControlAction::Slower);
        assert!((c.speed.value() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn time_stops_at_the_ends() {
        let mut c = controls();
        assert!(!c.apply(ControlAction::StepBack));
        assert_eq!(c.time.value(), 0.0);
        c.apply(ControlAction::JumpToEnd);
        assert_eq!(c.time.value(), 100.0);
        assert!(!c.apply(ControlAction::StepForward));
    }

    #[test]
    fn selection_wraps_in_catalog_order() {
        let mut c = controls();
        assert_eq!(c.selected(), 0);
        c.apply(ControlAction::PrevBody);
        assert_eq!(c.selected(), 8);
        c.apply(ControlAction::NextBody);
        assert_eq!(c.selected(), 0);
        for _ in 0..9 {
            c.apply(ControlAction::NextBody);
        }
        assert_eq!(c.selected(), 0);
        assert!(!c.apply(ControlAction::SelectBody(9)));
        assert!(c.apply(ControlAction::SelectBody(3)));
        assert_eq!(c.selected(), 3);
    }

    #[test]
    fn label_toggle_changes_scene_inputs() {
        let mut c = controls();
        let before = c.scene_inputs();
        c.apply(ControlAction::ToggleLabels);
        assert_ne!(before, c.scene_inputs());
        assert!(!c.scene_inputs().show_labels);
    }

    #[test]
    fn playback_stops_at_the_end() {
        let mut c = controls();
        assert!(!c.advance(1.0, 5.0));
        c.apply(ControlAction::TogglePlay);
        assert!(c.advance(1.0, 5.0));
        assert_eq!(c.time.value(), 5.0);
        c.advance(100.0, 5.0);
        assert_eq!(c.time.value(), 100.0);
        assert!(!c.playing);
    }

    #[test]
    fn play_at_the_end_restarts() {
        let mut c = controls();
        c.apply(ControlAction::JumpToEnd);
        c.apply(ControlAction::TogglePlay);
        assert!(c.playing);
        assert_eq!(c.time.value(), 0.0);
    }

    #[test]
    fn shell_actions_leave_inputs_alone() {
        let mut c = controls();
        assert!(!c.apply(ControlAction::Quit));
        assert!(!c.apply(ControlAction::ToggleHelp));
        assert!(!c.apply(ControlAction::Camera(CameraMove::Reset)));
    }

    #[test]
    fn unknown_initial_selection_fails() {
        let s = Settings { selected: "Ceres".into(), ..Settings::default() };
        assert!(Controls::from_settings(&s, &Catalog::solar_system()).is_err());
    }
}
