//! Survival Circuit entry point
//!
//! Terminal front-end: raw-mode keyboard events feed the game session, the
//! scene is projected onto character cells every frame.
//!
//! Usage: `survival-circuit [settings.json]`

mod display;

use std::io::{BufWriter, Write, stdout};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};

use survival_circuit::input::{HeldKeys, Key};
use survival_circuit::{Game, Settings};

/// How long a movement key stays held without a fresh press or repeat event.
/// Only used on terminals that never report key releases.
///
/// Shorter than the usual OS auto-repeat delay (250-600 ms), so on those
/// terminals a held key moves the car briefly, pauses until the first
/// repeat arrives, then moves steadily. A window covering the full delay
/// would instead keep the car sliding that long after every tap.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        _ => None,
    }
}

fn main() -> std::io::Result<()> {
    env_logger::init();

    let settings = match std::env::args_os().nth(1) {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    log::info!("Survival Circuit starting ({}x{} canvas)", settings.canvas_width, settings.canvas_height);

    let mut game = Game::new(&settings);
    let frame = Duration::from_secs(1) / settings.fps;

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key-release events only where the terminal answers the capability query
    let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
        && out
            .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
            .is_ok();
    if !keyboard_enhanced {
        log::info!("Terminal reports no key releases; holding movement keys for {HOLD_WINDOW:?}");
    }

    // Blocking reads live on their own thread so the tick loop never stalls
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let held = HeldKeys::with_duration(HOLD_WINDOW, settings.fps);
    let result = run(&mut out, &mut game, &rx, frame, held, keyboard_enhanced);

    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("High score this session: {} (seed {})", game.state.high_score, game.seed());
    result
}

/// Tick loop; returns when the player quits (Esc / Ctrl-C)
fn run<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
    frame: Duration,
    mut held: HeldKeys,
    keyboard_enhanced: bool,
) -> std::io::Result<()> {
    let mut frame_no: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame_no += 1;

        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            if code == KeyCode::Esc || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL)) {
                return Ok(());
            }
            let Some(key) = to_key(code) else {
                continue;
            };
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    game.key_down(key);
                    held.refresh(key, frame_no);
                }
                KeyEventKind::Release => {
                    held.release(key);
                    game.key_up(key);
                }
            }
        }

        if !keyboard_enhanced {
            for key in held.expire(frame_no) {
                game.key_up(key);
            }
        }

        game.update();
        display::render(out, &game.scene())?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}
