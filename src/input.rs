use crate::controls::ControlAction;
use crate::view::CameraMove;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

#[derive(Clone, Copy, Debug)]
pub(crate) struct InputEvent {
    pub(crate) key: KeyCode,
    pub(crate) mods: KeyModifiers,
}

pub(crate) fn collect_input_nonblocking(max_frame_time: Duration) -> anyhow::Result<Vec<InputEvent>> {
    let mut out = Vec::new();

    let timeout = std::cmp::min(Duration::from_millis(1), max_frame_time);
    while event::poll(timeout)? {
        if let Event::Key(k) = event::read()? {
            if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat {
                out.push(InputEvent { key: k.code, mods: k.modifiers });
                if out.len() >= 32 {
                    break;
                }
            }
        }
    }
    Ok(out)
}

pub(crate) fn map_event_to_action(ev: InputEvent) -> Option<ControlAction> {
    if ev.mods.contains(KeyModifiers::CONTROL) {
        return match ev.key {
            KeyCode::Char('c') => Some(ControlAction::Quit),
            _ => None,
        };
    }

    let action = match ev.key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ControlAction::Quit,
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => ControlAction::ToggleHelp,
        KeyCode::Char('l') | KeyCode::Char('L') => ControlAction::ToggleLabels,
        KeyCode::Char(' ') => ControlAction::TogglePlay,

        KeyCode::Char('+') | KeyCode::Char('=') => ControlAction::Faster,
        KeyCode::Char('-') | KeyCode::Char('_') => ControlAction::Slower,
        KeyCode::Right => ControlAction::StepForward,
        KeyCode::Left => ControlAction::StepBack,
        KeyCode::Home => ControlAction::Rewind,
        KeyCode::End => ControlAction::JumpToEnd,

        KeyCode::Tab | KeyCode::Down => ControlAction::NextBody,
        KeyCode::BackTab | KeyCode::Up => ControlAction::PrevBody,
        KeyCode::Char(c @ '0'..='8') => ControlAction::SelectBody((c as u8 - b'0') as usize),

        KeyCode::Char('a') | KeyCode::Char('A') => ControlAction::Camera(CameraMove::YawLeft),
        KeyCode::Char('d') | KeyCode::Char('D') => ControlAction::Camera(CameraMove::YawRight),
        KeyCode::Char('w') | KeyCode::Char('W') => ControlAction::Camera(CameraMove::PitchUp),
        KeyCode::Char('s') | KeyCode::Char('S') => ControlAction::Camera(CameraMove::PitchDown),
        KeyCode::Char('z') | KeyCode::Char('Z') => ControlAction::Camera(CameraMove::ZoomIn),
        KeyCode::Char('x') | KeyCode::Char('X') => ControlAction::Camera(CameraMove::ZoomOut),
        KeyCode::Char('r') | KeyCode::Char('R') => ControlAction::Camera(CameraMove::Reset),
        _ => return None,
    };
    Some(action)
}
