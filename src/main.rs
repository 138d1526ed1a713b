// What you SEE:
// • One-shot (default): the photo is framed with --style/--color/--width and written as PNG.
// • --preview: a window shows the framed photo and updates on every key press:
//     1-9 pick a style, Up/Down width ±1 (PgUp/PgDn ±10), C next color swatch,
//     H type a hex color (Enter applies, Backspace on an empty field cancels),
//     S save PNG, R reset, L (re)load the input photo. ESC quits.

use clap::Parser;
use log::{info, warn};
use minifb::Key;

use photo_framer::cli::Cli;
use photo_framer::color::PRESET_SWATCHES;
use photo_framer::draw::{draw_text_5x7, flatten_for_display, hex_digit, Drawer, HexEntry};
use photo_framer::error::Result;
use photo_framer::frames::FrameStyle;
use photo_framer::session::Session;
use photo_framer::types::FrameBuffer;

const STYLE_KEYS: [Key; 9] = [
    Key::Key1, Key::Key2, Key::Key3, Key::Key4, Key::Key5, Key::Key6, Key::Key7, Key::Key8, Key::Key9,
];

// Shown before any photo is loaded (and after a reset)
const EMPTY_W: usize = 360;
const EMPTY_H: usize = 120;

// Largest initial window; bigger renders are scaled down to fit (aspect kept)
const MAX_WINDOW_W: usize = 1280;
const MAX_WINDOW_H: usize = 900;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut session = Session::new(cli.frame_config());

    if cli.preview {
        return run_preview(&cli, session);
    }

    // required_unless_present guarantees an input here
    if let Some(input) = &cli.input {
        session.load(input)?;
        session.export(&cli.output)?;
    }
    Ok(())
}

fn run_preview(cli: &Cli, mut session: Session) -> Result<()> {
    /* --- Initial upload (optional) ---
       Visual: if a photo was given it shows framed right away. */
    if let Some(input) = &cli.input {
        if let Err(e) = session.load(input) {
            warn!("{e}");
        }
    }

    let (w, h) = session.output().map_or((EMPTY_W, EMPTY_H), FrameBuffer::dimensions);
    let (win_w, win_h) = window_size(w.max(EMPTY_W), h.max(EMPTY_H));
    let mut drawer = Drawer::new("Photo Framer", win_w, win_h)?;

    let mut swatch = PRESET_SWATCHES.iter().position(|&c| c == session.config().color).unwrap_or(0);
    let mut status = String::new();
    let mut hex: Option<HexEntry> = None;
    let mut screen = compose_screen(&session, &status);

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        // Typed hex color: while the field is open, keys go to it and not to the other controls
        if let Some(entry) = hex.as_mut() {
            let keys = drawer.keys_pressed();
            if !keys.is_empty() {
                let mut done = false;
                for key in keys {
                    match key {
                        Key::Enter | Key::NumPadEnter => {
                            if let Some(color) = entry.color() {
                                session.set_color(color);
                            }
                            done = true;
                        }
                        Key::Backspace => done = !entry.backspace(),
                        _ => {
                            if let Some(ch) = hex_digit(key) {
                                entry.push(ch);
                            }
                        }
                    }
                    if done {
                        break;
                    }
                }
                status = if done { String::new() } else { entry.prompt() };
                if done {
                    hex = None;
                }
                screen = compose_screen(&session, &status);
            }
            drawer.present(&screen)?;
            continue;
        }

        let mut dirty = false;

        // Open the hex field
        if drawer.pressed_once(Key::H) {
            let entry = HexEntry::default();
            status = entry.prompt();
            hex = Some(entry);
            dirty = true;
        }

        // Style buttons
        for (key, style) in STYLE_KEYS.iter().zip(FrameStyle::ALL) {
            if drawer.pressed_once(*key) {
                session.set_style(style);
                dirty = true;
            }
        }

        // Width "slider"
        let width = session.config().width_px;
        let step: i64 = if drawer.pressed_repeating(Key::Up) {
            1
        } else if drawer.pressed_repeating(Key::Down) {
            -1
        } else if drawer.pressed_repeating(Key::PageUp) {
            10
        } else if drawer.pressed_repeating(Key::PageDown) {
            -10
        } else {
            0
        };
        if step != 0 {
            session.set_width((width as i64 + step).max(0) as u32);
            dirty = true;
        }

        // Quick color swatches
        if drawer.pressed_once(Key::C) {
            swatch = (swatch + 1) % PRESET_SWATCHES.len();
            session.set_swatch(swatch);
            dirty = true;
        }

        // Download
        if drawer.pressed_once(Key::S) {
            status = match session.export(&cli.output) {
                Ok(true) => "SAVED".to_string(),
                Ok(false) => String::new(),
                Err(e) => {
                    warn!("{e}");
                    "SAVE FAILED".to_string()
                }
            };
            dirty = true;
        }

        // Reset
        if drawer.pressed_once(Key::R) {
            session.reset();
            swatch = 0;
            status.clear();
            dirty = true;
        }

        // Upload (re-read the input path)
        if drawer.pressed_once(Key::L) {
            if let Some(input) = &cli.input {
                status = match session.load(input) {
                    Ok(()) => String::new(),
                    Err(e) => {
                        warn!("{e}");
                        "LOAD FAILED".to_string()
                    }
                };
                dirty = true;
            }
        }

        if dirty {
            screen = compose_screen(&session, &status);
        }

        /* Present (this is when the on-screen image updates). */
        drawer.present(&screen)?;
    }

    info!("preview closed");
    Ok(())
}

/// Shrink (w, h) to fit the maximum window size, keeping the aspect ratio.
fn window_size(w: usize, h: usize) -> (usize, usize) {
    let scale = (MAX_WINDOW_W as f32 / w as f32).min(MAX_WINDOW_H as f32 / h as f32).min(1.0);
    (((w as f32 * scale) as usize).max(1), ((h as f32 * scale) as usize).max(1))
}

/// What the window shows: the render flattened for display plus a HUD line,
/// or a hint card when there is no photo. The exported PNG never carries the HUD.
fn compose_screen(session: &Session, status: &str) -> FrameBuffer {
    let cfg = session.config();
    match session.output() {
        Some(fb) => {
            let mut screen = flatten_for_display(fb);
            let hud = format!("{} | W:{} | {} {}", cfg.style, cfg.width_px, cfg.color, status);
            draw_text_5x7(&mut screen, 4, 4, &hud, 0x00_FF_FF_FF);
            screen
        }
        None => {
            let mut screen = FrameBuffer::new(EMPTY_W, EMPTY_H);
            draw_text_5x7(&mut screen, 8, 8, "NO IMAGE - PRESS L TO LOAD", 0x00_FF_FF_FF);
            draw_text_5x7(&mut screen, 8, 24, "1-9 STYLE  UP/DN WIDTH  C/H COLOR", 0x00_CC_CC_CC);
            draw_text_5x7(&mut screen, 8, 36, "S SAVE  R RESET  ESC QUIT", 0x00_CC_CC_CC);
            draw_text_5x7(&mut screen, 8, 56, &format!("{} | W:{} | {} {}", cfg.style, cfg.width_px, cfg.color, status), 0x00_FF_FF_FF);
            screen
        }
    }
}
