//! Scene building: game state -> vertex list in screen pixels
//!
//! Pure and GPU-free so every frontend (and the tests) can use it. The
//! pipeline maps screen pixels to clip space at upload time.

use glam::Vec2;

use super::shapes::{number, number_width, quad};
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::{Avatar, GamePhase, GameState, ObstaclePair, Rect};

/// Height of the lip drawn at the open end of each pipe
const PIPE_CAP_HEIGHT: f32 = 24.0;
/// Extra width of the lip on each side
const PIPE_CAP_OVERHANG: f32 = 4.0;

/// HUD score digits
const HUD_DIGIT: Vec2 = Vec2::new(18.0, 32.0);
/// Big score on the game over screen
const BIG_DIGIT: Vec2 = Vec2::new(36.0, 64.0);
const DIGIT_GAP: f32 = 6.0;

/// Ticks per on/off phase of the blinking start prompt
const BLINK_TICKS: u64 = 15;

/// Build the full frame for the current state
pub fn build(state: &GameState) -> Vec<Vertex> {
    let settings = &state.settings;
    let mut vertices = Vec::with_capacity(256);

    background(settings, &mut vertices);

    match state.phase {
        GamePhase::Home => {
            home_screen(settings, state.time_ticks, &mut vertices);
        }
        GamePhase::Playing => {
            if let Some(session) = &state.session {
                world(&session.obstacles, &session.avatar, &mut vertices);
                vertices.extend(number(
                    session.score,
                    Vec2::new(10.0, 10.0),
                    HUD_DIGIT,
                    DIGIT_GAP,
                    colors::TEXT,
                ));
            }
        }
        GamePhase::GameOver => {
            if let Some(session) = &state.session {
                world(&session.obstacles, &session.avatar, &mut vertices);
            }
            game_over_screen(settings, state.score(), &mut vertices);
        }
        GamePhase::Terminated => {}
    }

    vertices
}

fn background(settings: &Settings, out: &mut Vec<Vertex>) {
    let screen = Rect::new(0.0, 0.0, settings.screen_width, settings.screen_height);
    out.extend_from_slice(&quad(&screen, colors::SKY));
}

fn world(obstacles: &[ObstaclePair], avatar: &Avatar, out: &mut Vec<Vertex>) {
    for pair in obstacles {
        pipe_pair(pair, out);
    }
    avatar_sprite(avatar, out);
}

/// Top pipe with its lip at the bottom, bottom pipe flipped with its lip on top
fn pipe_pair(pair: &ObstaclePair, out: &mut Vec<Vertex>) {
    out.extend_from_slice(&quad(&pair.top, colors::PIPE));
    let top_cap = Rect::new(
        pair.top.left() - PIPE_CAP_OVERHANG,
        pair.top.bottom() - PIPE_CAP_HEIGHT,
        pair.top.w + 2.0 * PIPE_CAP_OVERHANG,
        PIPE_CAP_HEIGHT,
    );
    out.extend_from_slice(&quad(&top_cap, colors::PIPE_CAP));

    out.extend_from_slice(&quad(&pair.bottom, colors::PIPE));
    let bottom_cap = Rect::new(
        pair.bottom.left() - PIPE_CAP_OVERHANG,
        pair.bottom.top(),
        pair.bottom.w + 2.0 * PIPE_CAP_OVERHANG,
        PIPE_CAP_HEIGHT,
    );
    out.extend_from_slice(&quad(&bottom_cap, colors::PIPE_CAP));
}

fn avatar_sprite(avatar: &Avatar, out: &mut Vec<Vertex>) {
    let body = avatar.rect();
    out.extend_from_slice(&quad(&body, colors::AVATAR));

    let eye_size = body.w * 0.3;
    let eye = Rect::new(
        body.right() - eye_size - body.w * 0.1,
        body.top() + body.h * 0.15,
        eye_size,
        eye_size,
    );
    out.extend_from_slice(&quad(&eye, colors::AVATAR_EYE));
    let pupil = Rect::from_center(
        eye.center() + Vec2::new(eye_size * 0.2, 0.0),
        Vec2::splat(eye_size * 0.4),
    );
    out.extend_from_slice(&quad(&pupil, colors::AVATAR_PUPIL));
}

fn home_screen(settings: &Settings, time_ticks: u64, out: &mut Vec<Vertex>) {
    let (w, h) = (settings.screen_width, settings.screen_height);

    // Title banner at a quarter height
    let banner = Rect::from_center(Vec2::new(w / 2.0, h / 4.0), Vec2::new(w * 0.7, h * 0.1));
    out.extend_from_slice(&quad(&banner, colors::PANEL));

    avatar_sprite(&Avatar::spawn(settings), out);

    // Blinking start prompt at three quarters height
    if (time_ticks / BLINK_TICKS) % 2 == 0 {
        let prompt =
            Rect::from_center(Vec2::new(w / 2.0, h * 0.75), Vec2::new(w * 0.5, h * 0.03));
        out.extend_from_slice(&quad(&prompt, colors::TEXT));
    }
}

fn game_over_screen(settings: &Settings, score: u32, out: &mut Vec<Vertex>) {
    let (w, h) = (settings.screen_width, settings.screen_height);

    let screen = Rect::new(0.0, 0.0, w, h);
    out.extend_from_slice(&quad(&screen, colors::OVERLAY));

    let panel = Rect::from_center(Vec2::new(w / 2.0, h / 2.0), Vec2::new(w * 0.6, h * 0.25));
    out.extend_from_slice(&quad(&panel, colors::PANEL));

    let width = number_width(score, BIG_DIGIT, DIGIT_GAP);
    let origin = Vec2::new((w - width) / 2.0, (h - BIG_DIGIT.y) / 2.0);
    out.extend(number(score, origin, BIG_DIGIT, DIGIT_GAP, colors::TEXT));
}
