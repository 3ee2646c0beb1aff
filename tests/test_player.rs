use blitzframe::animation::Facing;
use blitzframe::config::ConfigTables;
use blitzframe::events::{EventQueue, GameEvent, Sound};
use blitzframe::geometry::Rect;
use blitzframe::player::*;
use blitzframe::weapon::{Weapon, WeaponKind};
use blitzframe::Vec2;

fn make_player() -> Player {
    let weapon = Weapon::from_tables(WeaponKind::Pistol, &ConfigTables::default(), 10.0).unwrap();
    Player::new(Vec2::new(200.0, 200.0), weapon)
}

fn idle() -> MoveInput {
    MoveInput::default()
}

fn right() -> MoveInput {
    MoveInput { right: true, ..MoveInput::default() }
}

// ── Input & movement ──────────────────────────────────────────────────────────

#[test]
fn diagonal_input_is_normalized() {
    let dir = MoveInput { up: true, right: true, ..MoveInput::default() }.direction();
    assert!((dir.length() - 1.0).abs() < 1e-6);
    assert!(dir.x > 0.0 && dir.y < 0.0);
    assert_eq!(MoveInput { left: true, right: true, ..MoveInput::default() }.direction(), Vec2::ZERO);
}

#[test]
fn moves_at_speed_times_dt() {
    let mut p = make_player();
    let mut events = EventQueue::new();
    p.update(&right(), 0.5, &[], &mut events);
    assert!((p.center().x - (200.0 + PLAYER_SPEED * 0.5)).abs() < 1e-3);
    assert_eq!(p.center().y, 200.0);
}

#[test]
fn walls_block_movement() {
    let mut p = make_player();
    let mut events = EventQueue::new();
    let wall = Rect::new(p.hitbox.right() + 1.0, 0.0, 50.0, 400.0);
    for _ in 0..10 {
        p.update(&right(), 0.1, &[wall], &mut events);
    }
    assert_eq!(p.hitbox.right(), wall.left());
    assert_eq!(p.rect.center(), p.hitbox.center());
}

#[test]
fn step_sound_every_step_interval() {
    let mut p = make_player();
    let mut events = EventQueue::new();
    for _ in 0..4 {
        p.update(&right(), 0.125, &[], &mut events);
    }
    assert_eq!(events.count_sound(Sound::Step), 1);
    p.update(&right(), 0.125, &[], &mut events);
    assert_eq!(events.count_sound(Sound::Step), 2);
}

#[test]
fn standing_still_makes_no_step_sound() {
    let mut p = make_player();
    let mut events = EventQueue::new();
    p.update(&idle(), 1.0, &[], &mut events);
    assert_eq!(events.count_sound(Sound::Step), 0);
}

// ── Animation ─────────────────────────────────────────────────────────────────

#[test]
fn facing_follows_movement_and_sticks_when_idle() {
    let mut p = make_player();
    let mut events = EventQueue::new();
    let up_right = MoveInput { up: true, right: true, ..MoveInput::default() };
    p.update(&up_right, 0.1, &[], &mut events);
    assert_eq!(p.facing, Facing::RightUp);
    assert!(p.frames.index > 1.0);

    p.update(&idle(), 0.1, &[], &mut events);
    assert_eq!(p.facing, Facing::RightUp);
    assert_eq!(p.frames.index, 1.0);
}

// ── Damage ────────────────────────────────────────────────────────────────────

#[test]
fn direct_damage_then_invulnerable() {
    let mut p = make_player();
    let mut events = EventQueue::new();
    assert!(p.take_direct_damage(10.0, &mut events));
    assert!(p.is_invulnerable());
    assert!(!p.take_direct_damage(10.0, &mut events));
    assert_eq!(p.health, 90.0);
    assert_eq!(events.count_sound(Sound::PlayerDamage), 1);
}

#[test]
fn invulnerability_lasts_damage_delay() {
    let mut p = make_player();
    let mut events = EventQueue::new();
    p.take_direct_damage(10.0, &mut events);
    for _ in 0..3 {
        p.update(&idle(), 0.25, &[], &mut events);
    }
    assert!(p.is_invulnerable());
    p.update(&idle(), 0.25, &[], &mut events);
    assert!(!p.is_invulnerable());
    assert!(p.take_direct_damage(10.0, &mut events));
    assert_eq!(p.health, 80.0);
}

#[test]
fn shake_scales_with_remaining_health() {
    assert_eq!(shake_magnitude(100.0), 5.0);
    assert_eq!(shake_magnitude(80.0), 10.0);
    assert_eq!(shake_magnitude(50.0), 15.0);
    assert_eq!(shake_magnitude(20.0), 20.0);

    let mut p = make_player();
    let mut events = EventQueue::new();
    p.take_direct_damage(85.0, &mut events);
    assert!(events.iter().any(|e| *e == GameEvent::CameraShake(20.0)));
    assert!(events
        .iter()
        .any(|e| *e == GameEvent::PlayerDamaged { amount: 85.0, health: 15.0 }));
}

#[test]
fn lethal_damage_kills() {
    let mut p = make_player();
    let mut events = EventQueue::new();
    assert!(p.take_direct_damage(150.0, &mut events));
    assert!(!p.is_alive());
    assert_eq!(p.health, 0.0);
    assert_eq!(p.health_ratio(), 0.0);
    assert!(events.iter().any(|e| *e == GameEvent::PlayerDied));

    // Dead players stay put
    let before = p.center();
    p.update(&right(), 1.0, &[], &mut events);
    assert_eq!(p.center(), before);
    assert_eq!(events.count_sound(Sound::Step), 0);
}

#[test]
fn dead_player_ignores_damage_after_delay() {
    let mut p = make_player();
    let mut events = EventQueue::new();
    p.take_direct_damage(100.0, &mut events);
    let queued = events.len();
    // The invulnerability window would have run out by now if ticked
    assert!(!p.take_direct_damage(10.0, &mut events));
    assert_eq!(events.len(), queued);
}

// ── Knockback ─────────────────────────────────────────────────────────────────

#[test]
fn contact_damage_knocks_away_from_source() {
    let mut p = make_player();
    let mut events = EventQueue::new();
    let start = p.center();
    let source = ContactSource { center: start - Vec2::new(30.0, 0.0), damage: 10.0 };

    assert!(p.take_contact_damage(source, &mut events));
    let kb = p.knockback().expect("knockback started");
    assert_eq!(kb.direction, Vec2::X);
    assert_eq!(kb.speed, KNOCKBACK_SPEED);

    p.update(&idle(), 0.05, &[], &mut events);
    p.update(&idle(), 0.05, &[], &mut events);
    assert!(p.knockback().is_none());

    // 400 units/s for 0.1 s
    let moved = p.center() - start;
    assert!((moved.x - KNOCKBACK_SPEED * KNOCKBACK_DURATION).abs() < 0.5, "moved {moved:?}");
    assert!(moved.y.abs() < 1e-3);
}

#[test]
fn knockback_stops_at_walls() {
    let mut p = make_player();
    let mut events = EventQueue::new();
    let wall = Rect::new(p.hitbox.right() + 5.0, 0.0, 4.0, 400.0);
    let source = ContactSource { center: p.center() - Vec2::new(30.0, 0.0), damage: 10.0 };
    p.take_contact_damage(source, &mut events);
    p.apply_knockback(0.1, &[wall]);
    assert_eq!(p.hitbox.right(), wall.left());
}

#[test]
fn wall_contact_suppresses_next_knockback() {
    let mut p = make_player();
    let mut events = EventQueue::new();
    let wall = Rect::new(p.hitbox.right() + 1.0, 0.0, 50.0, 400.0);
    p.update(&right(), 0.05, &[wall], &mut events);

    let source = ContactSource { center: p.center() + Vec2::new(30.0, 0.0), damage: 10.0 };
    assert!(p.take_contact_damage(source, &mut events));
    assert_eq!(p.health, 90.0);
    assert!(p.knockback().is_none());
}

#[test]
fn contact_from_same_point_deals_damage_without_knockback() {
    let mut p = make_player();
    let mut events = EventQueue::new();
    let source = ContactSource { center: p.center(), damage: 10.0 };
    assert!(p.take_contact_damage(source, &mut events));
    assert!(p.knockback().is_none());
}
