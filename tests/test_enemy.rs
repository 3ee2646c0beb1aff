use blitzframe::config::{Difficulty, DifficultyMultipliers, EntityConfig};
use blitzframe::enemy::*;
use blitzframe::events::{EventQueue, Sound};
use blitzframe::geometry::Rect;
use blitzframe::projectile::Projectile;
use blitzframe::Vec2;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn normal_config() -> EntityConfig {
    EntityConfig { speed: 100.0, health: 50.0, damage: 10.0 }
}

fn make_enemy(center: Vec2) -> Enemy {
    Enemy::new(
        EnemyKind::Normal,
        center,
        &normal_config(),
        DifficultyMultipliers::default(),
        &mut seeded_rng(),
    )
}

/// Tick `enemy` with no walls and nothing else going on.
fn tick(enemy: &mut Enemy, target: Vec2, dt: f32, obstacles: &[Rect]) -> EventQueue {
    let mut events = EventQueue::new();
    let mut spawned: Vec<Projectile> = Vec::new();
    enemy.update(target, dt, obstacles, &mut seeded_rng(), &mut spawned, &mut events);
    events
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[test]
fn kind_names_round_trip() {
    for kind in EnemyKind::ALL {
        assert_eq!(EnemyKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(EnemyKind::Boss.name(), "first_boss");
    assert_eq!(EnemyKind::from_name("dragon"), None);
}

#[test]
fn speed_is_jittered_around_config() {
    let mut rng = seeded_rng();
    for _ in 0..50 {
        let e = Enemy::new(
            EnemyKind::Normal,
            Vec2::ZERO,
            &normal_config(),
            DifficultyMultipliers::default(),
            &mut rng,
        );
        assert!((90.0..=110.0).contains(&e.base_speed), "speed {}", e.base_speed);
        assert_eq!(e.speed, e.base_speed);
    }
}

#[test]
fn difficulty_scales_stats() {
    let m = Difficulty::Hard.multipliers();
    let e = Enemy::new(EnemyKind::Normal, Vec2::ZERO, &normal_config(), m, &mut seeded_rng());
    assert_eq!(e.max_health, 75.0);
    assert_eq!(e.health, 75.0);
    assert_eq!(e.damage, 15.0);
    assert!((108.0..=132.0).contains(&e.base_speed));
}

#[test]
fn only_the_boss_carries_attacks() {
    let boss = Enemy::new(
        EnemyKind::Boss,
        Vec2::ZERO,
        &normal_config(),
        DifficultyMultipliers::default(),
        &mut seeded_rng(),
    );
    assert!(boss.attacks().is_some());
    assert!(make_enemy(Vec2::ZERO).attacks().is_none());
}

#[test]
fn hitbox_is_shrunk_sprite_box() {
    let e = make_enemy(Vec2::new(100.0, 100.0));
    let size = EnemyKind::Normal.size();
    assert_eq!(e.hitbox.w, size.x - HITBOX_SHRINK.x);
    assert_eq!(e.hitbox.h, size.y - HITBOX_SHRINK.y);
    assert_eq!(e.hitbox.center(), e.rect.center());
}

// ── Pursuit ───────────────────────────────────────────────────────────────────

#[test]
fn pursues_the_target() {
    let mut e = make_enemy(Vec2::new(100.0, 100.0));
    tick(&mut e, Vec2::new(500.0, 100.0), 0.5, &[]);
    assert!((e.center().x - (100.0 + e.base_speed * 0.5)).abs() < 1e-3);
    assert_eq!(e.direction, Vec2::X);
    assert!(e.flip_x());
}

#[test]
fn stands_still_on_top_of_target() {
    let mut e = make_enemy(Vec2::new(100.0, 100.0));
    tick(&mut e, Vec2::new(100.0, 100.0), 0.5, &[]);
    assert_eq!(e.center(), Vec2::new(100.0, 100.0));
}

#[test]
fn blocked_enemy_bumps_sideways_toward_player() {
    let mut e = make_enemy(Vec2::new(100.0, 100.0));
    let wall = Rect::new(e.hitbox.right() + 1.0, 0.0, 20.0, 300.0);
    let target = Vec2::new(400.0, 150.0);

    tick(&mut e, target, 0.1, &[wall]);
    assert!(e.is_bumping());
    assert_eq!(e.direction, Vec2::new(0.0, 1.0));
    assert_eq!(e.hitbox.right(), wall.left());

    // Keeps sliding down the wall while the bump lasts
    let y = e.center().y;
    tick(&mut e, target, 0.1, &[wall]);
    assert!(e.center().y > y);
    assert_eq!(e.direction, Vec2::new(0.0, 1.0));
}

#[test]
fn bump_lasts_in_proportion_to_obstacle() {
    let mut e = make_enemy(Vec2::new(100.0, 100.0));
    let wall = Rect::new(e.hitbox.right() + 1.0, 50.0, 20.0, 100.0); // 1.1 s of bump
    let target = Vec2::new(400.0, 50.0);
    tick(&mut e, target, 0.1, &[wall]);
    assert!(e.is_bumping());
    for _ in 0..4 {
        tick(&mut e, target, 0.25, &[wall]);
    }
    assert!(e.is_bumping());
    tick(&mut e, target, 0.25, &[wall]);
    assert!(!e.is_bumping());
}

// ── Contact damage ────────────────────────────────────────────────────────────

#[test]
fn dealing_damage_staggers() {
    let mut e = make_enemy(Vec2::new(100.0, 100.0));
    assert!(e.deal_damage());
    assert!(e.is_staggered());
    assert_eq!(e.speed, STAGGER_SPEED);
    assert_eq!(e.damage, 0.0);
    assert_eq!(e.contact_source().damage, 0.0);
    assert!(!e.deal_damage());
}

#[test]
fn stagger_wears_off_after_cooldown() {
    let mut e = make_enemy(Vec2::new(100.0, 100.0));
    e.deal_damage();
    let here = e.center();
    for _ in 0..3 {
        tick(&mut e, here, 0.25, &[]);
    }
    assert!(e.is_staggered());
    tick(&mut e, here, 0.25, &[]);
    assert!(!e.is_staggered());
    assert_eq!(e.speed, e.base_speed);
    assert_eq!(e.damage, 10.0);
}

// ── Taking damage ─────────────────────────────────────────────────────────────

#[test]
fn dies_on_the_hit_that_empties_health() {
    let mut e = make_enemy(Vec2::new(100.0, 100.0));
    let mut events = EventQueue::new();

    assert!(!e.take_damage(30.0, &mut events));
    assert!(e.is_alive());
    assert_eq!(e.health, 20.0);

    assert!(e.take_damage(30.0, &mut events));
    assert_eq!(e.state(), EnemyState::Dying);
    assert!(!e.is_alive());
    assert!(!e.collision_active());
    assert!(e.mask_visual);
    assert_eq!(events.count_sound(Sound::EnemyKill), 1);

    // Further hits on a dying enemy are ignored
    assert!(!e.take_damage(30.0, &mut events));
    assert_eq!(events.count_sound(Sound::EnemyKill), 1);
}

#[test]
fn dying_enemy_is_removed_after_death_animation() {
    let mut e = make_enemy(Vec2::new(100.0, 100.0));
    let mut events = EventQueue::new();
    e.take_damage(100.0, &mut events);
    let here = e.center();

    tick(&mut e, Vec2::new(500.0, 100.0), 0.125, &[]);
    assert_eq!(e.state(), EnemyState::Dying);
    assert_eq!(e.center(), here); // no movement while dying
    tick(&mut e, Vec2::new(500.0, 100.0), 0.125, &[]);
    assert!(e.is_removed());
}

#[test]
fn dying_enemy_cannot_deal_damage() {
    let mut e = make_enemy(Vec2::new(100.0, 100.0));
    let mut events = EventQueue::new();
    e.take_damage(100.0, &mut events);
    assert!(!e.deal_damage());
}
