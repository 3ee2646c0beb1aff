mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing_subscriber::filter::EnvFilter;

use blitzframe::config::{ConfigTables, Difficulty};
use blitzframe::enemy::EnemyKind;
use blitzframe::events::GameEvent;
use blitzframe::geometry::Rect;
use blitzframe::player::MoveInput;
use blitzframe::weapon::{AimInput, WeaponKind};
use blitzframe::world::{FrameInput, World};
use blitzframe::Vec2;

use display::Viewport;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS
const DT: f32 = 1.0 / 30.0;

/// World size in simulation units.
const ARENA: Vec2 = Vec2::new(1280.0, 720.0);
const WALL: f32 = 32.0;

/// A key counts as held if it was seen within this many frames.  Covers
/// terminals that never report key releases.
const HOLD_WINDOW: u64 = 4;

/// Every fifth wave is the boss.
const BOSS_WAVE_EVERY: u32 = 5;

/// Camera shake is shown for this many frames per unit of magnitude.
const SHAKE_FRAMES_PER_UNIT: f32 = 0.5;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(d: DifficultyArg) -> Self {
        match d {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

/// Terminal demo driving the simulation core.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(long, value_enum, default_value = "medium")]
    difficulty: DifficultyArg,

    /// RNG seed; the same seed and inputs replay the same game.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// JSON tuning tables (`{"enemies": {...}, "weapons": {...}}`).
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn held_any(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Level ─────────────────────────────────────────────────────────────────────

fn arena_walls() -> Vec<Rect> {
    vec![
        Rect::new(0.0, 0.0, ARENA.x, WALL),
        Rect::new(0.0, ARENA.y - WALL, ARENA.x, WALL),
        Rect::new(0.0, 0.0, WALL, ARENA.y),
        Rect::new(ARENA.x - WALL, 0.0, WALL, ARENA.y),
        // pillars
        Rect::new(300.0, 180.0, 96.0, 96.0),
        Rect::new(880.0, 180.0, 96.0, 96.0),
        Rect::new(300.0, 450.0, 96.0, 96.0),
        Rect::new(880.0, 450.0, 96.0, 96.0),
        Rect::new(600.0, 100.0, 80.0, 24.0),
    ]
}

fn spawn_wave(world: &mut World, wave: u32) -> anyhow::Result<()> {
    let corners = [
        Vec2::new(120.0, 120.0),
        Vec2::new(ARENA.x - 120.0, 120.0),
        Vec2::new(120.0, ARENA.y - 120.0),
        Vec2::new(ARENA.x - 120.0, ARENA.y - 120.0),
    ];
    if wave % BOSS_WAVE_EVERY == 0 {
        world.spawn_enemy(EnemyKind::Boss, Vec2::new(ARENA.x / 2.0, 200.0))?;
        return Ok(());
    }
    let count = 2 + wave as usize;
    for i in 0..count {
        let kind = match i % 4 {
            0 | 1 => EnemyKind::Normal,
            2 => EnemyKind::Fast,
            _ => EnemyKind::Heavy,
        };
        world.spawn_enemy(kind, corners[i % corners.len()])?;
    }
    tracing::info!(wave, count, "wave spawned");
    Ok(())
}

fn new_world(args: &Args) -> anyhow::Result<World> {
    let tables = match &args.config {
        Some(path) => ConfigTables::load(path)?,
        None => ConfigTables::default(),
    };
    let mut world = World::new(
        tables,
        args.difficulty.into(),
        ARENA / 2.0,
        arena_walls(),
        args.seed,
    )
    .context("invalid tuning tables")?;
    // The demo has no shop; everything is unlocked from the start.
    for kind in WeaponKind::ALL {
        world.unlock_weapon(kind);
    }
    Ok(world)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → restart.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut World,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<bool> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut wave: u32 = 0;
    let mut shake_frames: u32 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(true),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if !world.player.is_alive() => {
                            return Ok(false);
                        }
                        KeyCode::Char(c @ '1'..='4') => {
                            let kind = WeaponKind::ALL[(c as u8 - b'1') as usize];
                            world.change_weapon(kind.name());
                        }
                        KeyCode::Char('+') => world.stats.damage_upgrade += 2.0,
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Sample held keys into this tick's input ───────────────────────────
        let movement = MoveInput {
            up: held_any(&key_frame, &[KeyCode::Char('w'), KeyCode::Char('W')], frame),
            down: held_any(&key_frame, &[KeyCode::Char('s'), KeyCode::Char('S')], frame),
            left: held_any(&key_frame, &[KeyCode::Char('a'), KeyCode::Char('A')], frame),
            right: held_any(&key_frame, &[KeyCode::Char('d'), KeyCode::Char('D')], frame),
        };
        let aim_dir = Vec2::new(
            is_held(&key_frame, &KeyCode::Right, frame) as i8 as f32
                - is_held(&key_frame, &KeyCode::Left, frame) as i8 as f32,
            is_held(&key_frame, &KeyCode::Down, frame) as i8 as f32
                - is_held(&key_frame, &KeyCode::Up, frame) as i8 as f32,
        );
        // The player sits at "screen centre"; the pointer is offset from it.
        let centre = world.player.center();
        let input = FrameInput {
            movement,
            aim: AimInput {
                pointer: centre + aim_dir * 100.0,
                screen_center: centre,
                trigger: aim_dir != Vec2::ZERO,
            },
        };

        if world.player.is_alive() {
            if world.enemies().all(|(_, e)| !e.is_alive()) {
                wave += 1;
                spawn_wave(world, wave)?;
            }
            world.update(&input, DT);
        }

        for event in world.drain_events() {
            match event {
                GameEvent::CameraShake(magnitude) => {
                    shake_frames = shake_frames.max((magnitude * SHAKE_FRAMES_PER_UNIT) as u32);
                }
                GameEvent::PlaySound(sound) => tracing::trace!(sound = sound.id(), "sound"),
                other => tracing::debug!(?other, "event"),
            }
        }
        shake_frames = shake_frames.saturating_sub(1);

        let (width, height) = terminal::size()?;
        let view = Viewport::new(ARENA, width, height);
        display::render(out, world, &view, width, height, shake_frames > 0)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Fail on bad tuning data before touching the terminal.
    new_world(&args)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicated thread for blocking reads so the game loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &rx, &args);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, args: &Args) -> anyhow::Result<()> {
    loop {
        let mut world = new_world(args)?;
        if game_loop(out, &mut world, rx)? {
            break;
        }
    }
    Ok(())
}
