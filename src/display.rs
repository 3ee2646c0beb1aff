//! Rendering layer: all terminal I/O lives here.
//!
//! The simulation runs in world units; this module squeezes the arena into
//! the terminal grid and draws it.  No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use blitzframe::config::Difficulty;
use blitzframe::enemy::{Enemy, EnemyKind};
use blitzframe::geometry::Rect;
use blitzframe::projectile::{Projectile, ProjectileOwner};
use blitzframe::world::World;
use blitzframe::Vec2;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_BORDER_SHAKE: Color = Color::Red;
const C_WALL: Color = Color::DarkGrey;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_PLAYER_HURT: Color = Color::DarkRed;
const C_ENEMY_NORMAL: Color = Color::Green;
const C_ENEMY_FAST: Color = Color::Cyan;
const C_ENEMY_HEAVY: Color = Color::Magenta;
const C_ENEMY_BOSS: Color = Color::Red;
const C_ENEMY_DYING: Color = Color::White;
const C_SHOT_PLAYER: Color = Color::Yellow;
const C_SHOT_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps the world rectangle onto the terminal cells inside the border.
pub struct Viewport {
    world: Vec2,
    cols: u16,
    rows: u16,
}

impl Viewport {
    pub fn new(world: Vec2, width: u16, height: u16) -> Self {
        Self {
            world,
            cols: width.saturating_sub(2).max(1),
            rows: height.saturating_sub(4).max(1),
        }
    }

    /// Terminal cell for a world point; the play area starts at (1, 2).
    fn cell(&self, p: Vec2) -> (u16, u16) {
        let cx = (p.x / self.world.x * self.cols as f32).clamp(0.0, self.cols as f32 - 1.0);
        let cy = (p.y / self.world.y * self.rows as f32).clamp(0.0, self.rows as f32 - 1.0);
        (cx as u16 + 1, cy as u16 + 2)
    }

    fn cells_of(&self, r: &Rect) -> ((u16, u16), (u16, u16)) {
        let a = self.cell(Vec2::new(r.left(), r.top()));
        let b = self.cell(Vec2::new(r.right() - 0.01, r.bottom() - 0.01));
        (a, b)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    world: &World,
    view: &Viewport,
    width: u16,
    height: u16,
    shaking: bool,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height, shaking)?;
    for wall in world.obstacles() {
        draw_wall(out, view, wall)?;
    }
    for (_, projectile) in world.projectiles() {
        draw_projectile(out, view, projectile)?;
    }
    for (_, enemy) in world.enemies() {
        draw_enemy(out, view, enemy)?;
    }
    draw_player(out, view, world)?;
    draw_hud(out, world, width)?;
    draw_controls_hint(out, height)?;

    if !world.player.is_alive() {
        draw_game_over(out, world, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16, shaking: bool) -> std::io::Result<()> {
    let w = width as usize;
    out.queue(style::SetForegroundColor(if shaking { C_BORDER_SHAKE } else { C_BORDER }))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

fn draw_wall<W: Write>(out: &mut W, view: &Viewport, wall: &Rect) -> std::io::Result<()> {
    let ((x0, y0), (x1, y1)) = view.cells_of(wall);
    out.queue(style::SetForegroundColor(C_WALL))?;
    for row in y0..=y1 {
        out.queue(cursor::MoveTo(x0, row))?;
        out.queue(Print("▓".repeat((x1.saturating_sub(x0) + 1) as usize)))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &World, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>6}  Kills:{:>3}  {}",
        world.stats.score,
        world.stats.kills,
        world.player.weapon.kind.name()
    )))?;

    // Boss bar takes the centre while a boss is on the field
    if let Some(boss) = world.boss() {
        let bar = health_bar(boss.health_ratio(), 20);
        let label = format!("BOSS {}", bar);
        let lx = (width / 2).saturating_sub(label.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(lx, 0))?;
        out.queue(style::SetForegroundColor(C_ENEMY_BOSS))?;
        out.queue(Print(label))?;
    } else {
        let (label, color) = match world.difficulty() {
            Difficulty::Easy => ("[ EASY ]", Color::Green),
            Difficulty::Medium => ("[ MEDIUM ]", Color::Yellow),
            Difficulty::Hard => ("[ HARD ]", Color::Red),
        };
        let lx = (width / 2).saturating_sub(label.len() as u16 / 2);
        out.queue(cursor::MoveTo(lx, 0))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(label))?;
    }

    let hp = format!("HP {} {:>3}", health_bar(world.player.health_ratio(), 10), world.player.health.max(0.0) as u32);
    let rx = width.saturating_sub(hp.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(hp))?;
    Ok(())
}

fn health_bar(ratio: f32, cells: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * cells as f32).round() as usize).min(cells);
    format!("{}{}", "█".repeat(filled), "░".repeat(cells - filled))
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, view: &Viewport, world: &World) -> std::io::Result<()> {
    let p = &world.player;
    let (x, y) = view.cell(p.center());
    let color = if p.is_invulnerable() { C_PLAYER_HURT } else { C_PLAYER };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(x, y))?;
    out.queue(Print(if p.is_alive() { "@" } else { "✝" }))?;

    // Aim marker one cell along the weapon direction
    let aim = p.weapon.aim;
    let (ax, ay) = (
        (x as i32 + aim.x.round() as i32).max(1) as u16,
        (y as i32 + aim.y.round() as i32).max(2) as u16,
    );
    if (ax, ay) != (x, y) {
        out.queue(cursor::MoveTo(ax, ay))?;
        out.queue(Print("+"))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, view: &Viewport, enemy: &Enemy) -> std::io::Result<()> {
    let (glyph, color) = match enemy.kind {
        EnemyKind::Normal => ("n", C_ENEMY_NORMAL),
        EnemyKind::Fast => ("f", C_ENEMY_FAST),
        EnemyKind::Heavy => ("H", C_ENEMY_HEAVY),
        EnemyKind::Boss => ("B", C_ENEMY_BOSS),
    };
    // Dying enemies are drawn as a plain silhouette
    let (glyph, color) = if enemy.mask_visual { ("x", C_ENEMY_DYING) } else { (glyph, color) };

    if enemy.kind.is_boss() {
        let ((x0, y0), (x1, y1)) = view.cells_of(&enemy.hitbox);
        out.queue(style::SetForegroundColor(color))?;
        for row in y0..=y1 {
            out.queue(cursor::MoveTo(x0, row))?;
            out.queue(Print(glyph.repeat((x1.saturating_sub(x0) + 1) as usize)))?;
        }
        return Ok(());
    }

    let (x, y) = view.cell(enemy.center());
    out.queue(cursor::MoveTo(x, y))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_projectile<W: Write>(out: &mut W, view: &Viewport, shot: &Projectile) -> std::io::Result<()> {
    let (x, y) = view.cell(shot.pos);
    out.queue(cursor::MoveTo(x, y))?;
    match shot.owner {
        ProjectileOwner::Player => {
            out.queue(style::SetForegroundColor(C_SHOT_PLAYER))?;
            out.queue(Print("·"))?;
        }
        ProjectileOwner::Enemy => {
            out.queue(style::SetForegroundColor(C_SHOT_ENEMY))?;
            out.queue(Print("*"))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("WASD : Move   ←↑→↓ : Aim + Fire   1-4 : Weapon   + : Upgrade   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, world: &World, width: u16, height: u16) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", world.stats.score);
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(3);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let hint = "R - Play Again  Q - Quit";
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;
    Ok(())
}
