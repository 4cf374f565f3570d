use crate::catalog::Catalog;
use crate::config::Settings;
use crate::controls::{ControlAction, Controls, SceneInputs};
use crate::input::{collect_input_nonblocking, map_event_to_action};
use crate::render::{draw_help, draw_hud, draw_scene, split_layout, Terminal};
use crate::scene::{build_scene, SceneFrame};
use crate::starfield::{Starfield, StarfieldCache};
use crate::view::Camera;
use anyhow::Context;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub(crate) struct App<'a> {
    settings: &'a Settings,
    catalog: &'a Catalog,
    stars: &'a Starfield,
    controls: Controls,
    camera: Camera,
    scene: SceneFrame<'a>,
    built_from: SceneInputs,
    show_help: bool,
    should_quit: bool,
}

impl<'a> App<'a> {
    fn new(settings: &'a Settings, catalog: &'a Catalog, stars: &'a Starfield) -> anyhow::Result<Self> {
        let controls = Controls::from_settings(settings, catalog)?;
        let inputs = controls.scene_inputs();
        let scene = build_scene(catalog, stars, inputs.time, inputs.speed, inputs.show_labels);
        Ok(Self {
            settings,
            catalog,
            stars,
            controls,
            camera: Camera::default(),
            scene,
            built_from: inputs,
            show_help: false,
            should_quit: false,
        })
    }

    fn handle(&mut self, action: ControlAction) {
        match action {
            ControlAction::Quit => self.should_quit = true,
            ControlAction::ToggleHelp => self.show_help = !self.show_help,
            ControlAction::Camera(m) => self.camera.apply(m),
            _ => {
                if self.controls.apply(action) {
                    debug!(?action, "control changed");
                }
            }
        }
    }

    /// Rebuilds the scene only when one of its inputs moved.
    fn refresh_scene(&mut self) -> bool {
        let inputs = self.controls.scene_inputs();
        if inputs == self.built_from {
            return false;
        }
        self.scene = build_scene(self.catalog, self.stars, inputs.time, inputs.speed, inputs.show_labels);
        self.built_from = inputs;
        debug!(time = inputs.time, speed = inputs.speed, labels = inputs.show_labels, "scene rebuilt");
        true
    }

    fn run(&mut self, term: &mut Terminal) -> anyhow::Result<()> {
        let fps = self.settings.fps_cap.clamp(1, 240);
        let frame_dt = Duration::from_secs_f32(1.0 / fps as f32);
        let mut last_frame = Instant::now();

        while !self.should_quit {
            if term.resize_if_needed()? {
                debug!(cols = term.cols, rows = term.rows, "terminal resized");
            }

            for ev in collect_input_nonblocking(frame_dt)? {
                if let Some(action) = map_event_to_action(ev) {
                    self.handle(action);
                }
            }
            if self.should_quit {
                break;
            }

            let now = Instant::now();
            let dt = now.saturating_duration_since(last_frame).as_secs_f64().min(0.25);
            last_frame = now;
            let was_playing = self.controls.playing;
            self.controls.advance(dt, self.settings.play_rate);
            if was_playing && !self.controls.playing {
                info!("playback reached the end of the time range");
            }
            self.refresh_scene();

            self.render_frame(term)?;
            spin_sleep(frame_dt, now);
        }
        Ok(())
    }

    fn render_frame(&self, term: &mut Terminal) -> anyhow::Result<()> {
        term.cur.clear();
        let (vp, hud_x, hud_w) = split_layout(term.cols, term.rows);
        let selected = self.catalog.at(self.controls.selected()).map(|b| b.name).unwrap_or_default();

        draw_scene(&mut term.cur, vp, &self.camera, &self.scene, selected);
        draw_hud(
            &mut term.cur,
            hud_x,
            hud_w,
            self.catalog,
            &self.controls,
            &self.scene,
            self.settings.chat_url.as_deref(),
        );
        if self.show_help {
            draw_help(&mut term.cur, vp);
        }
        term.present()
    }
}

/// Interactive session. The terminal is restored even when the loop fails.
pub(crate) fn run(settings: &Settings, catalog: &Catalog) -> anyhow::Result<()> {
    let cache = StarfieldCache::new(settings.star_count, settings.star_seed);
    let mut app = App::new(settings, catalog, cache.get())?;

    let mut term = Terminal::begin().context("could not initialise the terminal")?;
    info!(cols = term.cols, rows = term.rows, "session started");
    let res = app.run(&mut term);
    term.end()?;
    info!("session ended");
    res
}

/// Headless mode: one scene from the configured inputs, as pretty JSON.
pub(crate) fn snapshot<W: Write>(settings: &Settings, catalog: &Catalog, out: &mut W) -> anyhow::Result<()> {
    let cache = StarfieldCache::new(settings.star_count, settings.star_seed);
    let scene = build_scene(catalog, cache.get(), settings.time, settings.speed, settings.show_labels);
    info!(markers = scene.markers.len(), stars = scene.stars.len(), "writing snapshot");
    serde_json::to_writer_pretty(&mut *out, &scene).context("could not serialise scene")?;
    writeln!(out)?;
    Ok(())
}

/* -----------------------------
   Frame pacing helper
------------------------------ */

fn spin_sleep(target: Duration, now: Instant) {
    let end = now + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
