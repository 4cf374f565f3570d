use crate::catalog::{Catalog, Rgb};
use crate::controls::{Controls, Slider};
use crate::orbit::{period, Vec3};
use crate::scene::SceneFrame;
use crate::view::{Camera, Viewport};
use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::f64::consts::TAU;
use std::io::{self, Write};

const BG: Color = Color::Black;
const FG: Color = Color::Rgb { r: 220, g: 220, b: 220 };
const DIM: Color = Color::Rgb { r: 120, g: 120, b: 120 };
const EDGE: Color = Color::Rgb { r: 80, g: 95, b: 120 };
const AXIS: Color = Color::Rgb { r: 70, g: 80, b: 90 };
const HUD_W: u16 = 36;

fn to_color(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// -------------------- Cell buffer --------------------
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
}

impl Cell {
    fn blank(bg: Color) -> Self {
        Self { ch: ' ', fg: Color::Reset, bg }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self { w, h, cells: vec![Cell::blank(BG); (w as usize) * (h as usize)] }
    }

    fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }

    pub(crate) fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.cells.fill(Cell::blank(BG));
    }

    fn write_str(&mut self, x: u16, y: u16, s: &str, fg: Color) {
        for (i, ch) in s.chars().enumerate() {
            let xx = x as usize + i;
            if xx >= self.w as usize {
                break;
            }
            self.set(xx as u16, y, Cell { ch, fg, bg: BG });
        }
    }

    /// Word-wraps `s` into `max_w` columns; returns the number of rows used.
    fn write_wrapped(&mut self, x: u16, y: u16, max_w: u16, s: &str, fg: Color) -> u16 {
        if max_w == 0 {
            return 0;
        }
        let max_w = max_w as usize;
        let mut line = String::new();
        let mut row = y;
        for word in s.split_whitespace() {
            let word_len = word.chars().count();
            if word_len > max_w {
                if !line.is_empty() {
                    self.write_str(x, row, &line, fg);
                    row = row.saturating_add(1);
                    line.clear();
                }
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(max_w) {
                    let chunk: String = chunk.iter().collect();
                    self.write_str(x, row, &chunk, fg);
                    row = row.saturating_add(1);
                }
                continue;
            }
            let line_len = line.chars().count();
            let need = if line.is_empty() { word_len } else { line_len + 1 + word_len };
            if need > max_w && !line.is_empty() {
                self.write_str(x, row, &line, fg);
                row = row.saturating_add(1);
                line.clear();
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        if !line.is_empty() {
            self.write_str(x, row, &line, fg);
            row = row.saturating_add(1);
        }
        row.saturating_sub(y)
    }

    fn box_draw(&mut self, x0: u16, y0: u16, bw: u16, bh: u16, fg: Color) {
        if bw < 2 || bh < 2 {
            return;
        }
        let x1 = x0.saturating_add(bw - 1);
        let y1 = y0.saturating_add(bh - 1);
        let c = |ch| Cell { ch, fg, bg: BG };
        for x in x0 + 1..x1 {
            self.set(x, y0, c('─'));
            self.set(x, y1, c('─'));
        }
        for y in y0 + 1..y1 {
            self.set(x0, y, c('│'));
            self.set(x1, y, c('│'));
        }
        self.set(x0, y0, c('┌'));
        self.set(x1, y0, c('┐'));
        self.set(x0, y1, c('└'));
        self.set(x1, y1, c('┘'));
    }

    fn fill_rect(&mut self, x0: u16, y0: u16, bw: u16, bh: u16) {
        for y in y0..y0.saturating_add(bh) {
            for x in x0..x0.saturating_add(bw) {
                self.set(x, y, Cell::blank(BG));
            }
        }
    }
}

// -------------------- Terminal --------------------
pub(crate) struct Terminal {
    out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    prev: CellBuffer,
    pub(crate) cur: CellBuffer,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, cursor::Hide, DisableLineWrap, Clear(ClearType::All))?;
        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            prev: CellBuffer::new(cols, rows),
            cur: CellBuffer::new(cols, rows),
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            EndSynchronizedUpdate,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        execute!(self.out, Clear(ClearType::All))?;
        Ok(true)
    }

    /// Writes only the cells that changed since the previous frame.
    pub(crate) fn present(&mut self) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;
        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if c == self.prev.cells[i] {
                    continue;
                }
                queue!(self.out, cursor::MoveTo(x, y))?;
                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(self.out, SetBackgroundColor(c.bg))?;
                    last_bg = Some(c.bg);
                }
                queue!(self.out, Print(c.ch))?;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}

// -------------------- Layout --------------------
/// Scene viewport on the left, HUD column on the right.
pub(crate) fn split_layout(w: u16, h: u16) -> (Viewport, u16, u16) {
    let hud_w = HUD_W.min(w / 2);
    let main_w = w.saturating_sub(hud_w);
    (Viewport { x: 0, y: 0, w: main_w, h }, main_w, hud_w)
}

// -------------------- Scene --------------------
fn marker_glyph(size: f64) -> char {
    if size >= 6.0 {
        '●'
    } else if size >= 2.0 {
        'o'
    } else {
        '•'
    }
}

fn draw_axes(buf: &mut CellBuffer, vp: Viewport, cam: &Camera, scene: &SceneFrame<'_>) {
    let r = scene.layout.axis_range;
    let steps = 140;
    let axes = [
        (Vec3::new(1.0, 0.0, 0.0), 'X'),
        (Vec3::new(0.0, 1.0, 0.0), 'Y'),
        (Vec3::new(0.0, 0.0, 1.0), 'Z'),
    ];
    for (dir, name) in axes {
        for s in 0..=steps {
            let t = r.min + (r.max - r.min) * (s as f64 / steps as f64);
            let p = Vec3::new(dir.x * t, dir.y * t, dir.z * t);
            if let Some(pp) = cam.project(vp, &scene.layout, p) {
                if s % 2 == 0 {
                    buf.set(pp.col, pp.row, Cell { ch: '·', fg: AXIS, bg: BG });
                }
            }
        }
        let end = Vec3::new(dir.x * r.max, dir.y * r.max, dir.z * r.max);
        if let Some(pp) = cam.project(vp, &scene.layout, end) {
            buf.set(pp.col, pp.row, Cell { ch: name, fg: DIM, bg: BG });
        }
    }
}

fn draw_stars(buf: &mut CellBuffer, vp: Viewport, cam: &Camera, scene: &SceneFrame<'_>) {
    // depth spans roughly ±half_span·√3 inside the axis cube
    let depth_span = (scene.layout.axis_range.half_span() * 3f64.sqrt()) as f32;
    for p in scene.stars.points() {
        if !scene.layout.in_bounds(*p) {
            continue;
        }
        let Some(pp) = cam.project(vp, &scene.layout, *p) else {
            continue;
        };
        let t = ((pp.depth / depth_span.max(1e-6)) * 0.5 + 0.5).clamp(0.0, 1.0);
        let b = lerp(60.0, 235.0, t) as u8;
        let ch = if t > 0.8 { '•' } else { '·' };
        buf.set(
            pp.col,
            pp.row,
            Cell { ch, fg: Color::Rgb { r: b, g: b, b: b.saturating_add(20) }, bg: BG },
        );
    }
}

fn draw_orbits(buf: &mut CellBuffer, vp: Viewport, cam: &Camera, scene: &SceneFrame<'_>) {
    for m in scene.markers.iter() {
        let radius = (m.position.x * m.position.x + m.position.y * m.position.y).sqrt();
        if radius <= 0.0 {
            continue;
        }
        let steps = 96;
        for s in 0..steps {
            if s % 2 == 1 {
                continue;
            }
            let a = TAU * (s as f64 / steps as f64);
            let p = Vec3::new(radius * a.cos(), radius * a.sin(), 0.0);
            if let Some(pp) = cam.project(vp, &scene.layout, p) {
                buf.set(pp.col, pp.row, Cell { ch: '·', fg: EDGE, bg: BG });
            }
        }
    }
}

pub(crate) fn draw_scene(
    buf: &mut CellBuffer,
    vp: Viewport,
    cam: &Camera,
    scene: &SceneFrame<'_>,
    selected: &str,
) {
    draw_stars(buf, vp, cam, scene);
    draw_axes(buf, vp, cam, scene);
    draw_orbits(buf, vp, cam, scene);

    for m in &scene.markers {
        if !scene.layout.in_bounds(m.position) {
            continue;
        }
        let Some(pp) = cam.project(vp, &scene.layout, m.position) else {
            continue;
        };
        let fg = to_color(m.color.rgb());
        let is_selected = m.name == selected;
        let ch = if is_selected && m.size < 6.0 { '◆' } else { marker_glyph(m.size) };
        buf.set(pp.col, pp.row, Cell { ch, fg, bg: BG });

        if let Some(label) = m.label {
            // "top center": one row up, centered on the marker
            if pp.row > vp.y {
                let half = (label.chars().count() / 2) as u16;
                let x = pp.col.saturating_sub(half).max(vp.x);
                let label_fg = if is_selected { fg } else { DIM };
                for (i, ch) in label.chars().enumerate() {
                    let xx = x as usize + i;
                    if xx >= (vp.x + vp.w) as usize {
                        break;
                    }
                    buf.set(xx as u16, pp.row - 1, Cell { ch, fg: label_fg, bg: BG });
                }
            }
        }
    }
}

// -------------------- HUD --------------------
fn bar(value01: f64, width: usize) -> String {
    let v = value01.clamp(0.0, 1.0);
    let fill = (v * width as f64 + 0.5) as usize;
    let mut s = String::with_capacity(width + 2);
    s.push('[');
    for i in 0..width {
        s.push(if i < fill { '█' } else { '─' });
    }
    s.push(']');
    s
}

fn slider_line(name: &str, s: &Slider, width: usize, value: String) -> String {
    format!("{name:<6}{} {value}", bar(s.fraction(), width))
}

fn on_off(b: bool) -> &'static str {
    if b {
        "on"
    } else {
        "off"
    }
}

pub(crate) fn draw_hud(
    buf: &mut CellBuffer,
    x0: u16,
    hud_w: u16,
    catalog: &Catalog,
    controls: &Controls,
    scene: &SceneFrame<'_>,
    chat_url: Option<&str>,
) {
    let h = buf.h;
    if hud_w < 12 || h < 8 {
        return;
    }
    for y in 0..h {
        buf.set(x0, y, Cell { ch: '│', fg: EDGE, bg: BG });
    }

    let px = x0 + 2;
    let pw = hud_w.saturating_sub(4);
    let track = (pw as usize).saturating_sub(14).max(4);
    let limit = h.saturating_sub(2);

    // controls
    let top_h = 8u16.min(h);
    buf.box_draw(x0, 0, hud_w, top_h, EDGE);
    buf.write_str(px, 1, "Solar System Simulation", FG);
    let state = if controls.playing {
        "playing"
    } else if controls.time.at_max() {
        "end"
    } else if controls.time.at_min() {
        "start"
    } else {
        "paused"
    };
    let lines = [
        slider_line("Time", &controls.time, track, format!("{:.0}", controls.time.value())),
        slider_line("Speed", &controls.speed, track, format!("{:.1}x", controls.speed.value())),
        format!("Labels: {}   State: {}", on_off(controls.show_labels), state),
        format!("Stars: {}", scene.stars.len()),
    ];
    for (i, line) in lines.iter().enumerate() {
        buf.write_str(px, 2 + i as u16, line, DIM);
    }

    // planet information, by direct catalog lookup
    let mut y = top_h;
    let Some(body) = catalog.at(controls.selected()) else {
        return;
    };
    if y + 3 > limit {
        return;
    }
    y += 1;
    buf.write_str(px, y, "Planet Information", FG);
    y += 1;
    let fg = to_color(body.color.rgb());
    buf.write_str(px, y, body.name, fg);
    y += 1;

    let mut info = vec![
        format!("Radius: {:?} Earth radii", body.radius),
        format!("Distance from Sun: {:?} AU", body.distance),
        format!("Orbital Speed: {:?} km/s", body.orbital_rate),
    ];
    if let Some(m) = scene.marker(body.name) {
        info.push(format!("Position: ({:.2}, {:.2}) AU", m.position.x, m.position.y));
        info.push(format!("r(sun): {:.3} AU", m.position.len()));
    }
    if let Some(p) = period(body, controls.speed.value()) {
        info.push(format!("Period: {p:.1} time units"));
    }
    for line in &info {
        if y > limit {
            return;
        }
        y += buf.write_wrapped(px, y, pw, line, DIM);
    }

    // chat link; a terminal can only show where the widget lives
    if let Some(url) = chat_url {
        if y + 2 <= limit {
            y += 1;
            buf.write_str(px, y, "Chat with Us", FG);
            y += 1;
            y += buf.write_wrapped(px, y, pw, url, Color::Cyan);
        }
    }

    let footer = "h help · q quit";
    if y < h.saturating_sub(1) {
        buf.write_str(px, h - 1, footer, DIM);
    }
}

pub(crate) fn draw_help(buf: &mut CellBuffer, area: Viewport) {
    let lines = [
        "Controls",
        "",
        "←/→      time -/+ 1",
        "Home/End time start/end",
        "+/-      speed -/+ 0.1",
        "space    play / pause",
        "l        labels on/off",
        "↑/↓ tab  select body",
        "0-8      select by index",
        "a/d      rotate view",
        "w/s      tilt view",
        "z/x      zoom in/out",
        "r        reset view",
        "h        close help",
        "q        quit",
    ];
    let bw = 30u16.min(area.w);
    let bh = (lines.len() as u16 + 2).min(area.h);
    let x0 = area.x + area.w.saturating_sub(bw) / 2;
    let y0 = area.y + area.h.saturating_sub(bh) / 2;
    buf.fill_rect(x0, y0, bw, bh);
    buf.box_draw(x0, y0, bw, bh, EDGE);
    for (i, line) in lines.iter().enumerate() {
        let y = y0 + 1 + i as u16;
        if y + 1 >= y0 + bh {
            break;
        }
        buf.write_str(x0 + 2, y, line, if i == 0 { FG } else { DIM });
    }
}
