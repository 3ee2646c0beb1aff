//! The entry point collaborators drive: spawn entities, step the simulation
//! once per tick, ask whether something is still alive, collect events.

use generational_arena::{Arena, Index};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{ConfigTables, Difficulty};
use crate::enemy::{Enemy, EnemyKind};
use crate::error::ConfigResult;
use crate::events::{EventQueue, GameEvent};
use crate::geometry::Rect;
use crate::player::{MoveInput, Player};
use crate::projectile::{Projectile, ProjectileOwner, PROJECTILE_SIZE};
use crate::weapon::{AimInput, Arsenal, Weapon, WeaponKind};

/// Input sampled once at the start of a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub movement: MoveInput,
    pub aim: AimInput,
}

/// Run-wide progress.  `damage_upgrade` is bought in the shop and read by
/// the equipped weapon every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct GameStats {
    pub damage_upgrade: f32,
    pub score: u32,
    pub kills: u32,
}

impl Default for GameStats {
    fn default() -> Self {
        Self { damage_upgrade: 10.0, score: 0, kills: 0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityHandle {
    Enemy(Index),
    Projectile(Index),
}

pub struct World {
    pub player: Player,
    pub stats: GameStats,
    pub arsenal: Arsenal,
    enemies: Arena<Enemy>,
    projectiles: Arena<Projectile>,
    obstacles: Vec<Rect>,
    tables: ConfigTables,
    difficulty: Difficulty,
    events: EventQueue,
    rng: StdRng,
    spawned: Vec<Projectile>,
    tick: u64,
}

impl World {
    /// Validates the tuning tables up front so that no lookup can fail
    /// once the game is running.
    pub fn new(
        tables: ConfigTables,
        difficulty: Difficulty,
        player_spawn: Vec2,
        obstacles: Vec<Rect>,
        seed: u64,
    ) -> ConfigResult<Self> {
        tables.require(
            EnemyKind::ALL.map(EnemyKind::name),
            WeaponKind::ALL.map(WeaponKind::name),
        )?;
        let stats = GameStats::default();
        let weapon = Weapon::from_tables(WeaponKind::Pistol, &tables, stats.damage_upgrade)?;
        tracing::info!(?difficulty, obstacles = obstacles.len(), seed, "world created");

        Ok(Self {
            player: Player::new(player_spawn, weapon),
            stats,
            arsenal: Arsenal::new(),
            enemies: Arena::new(),
            projectiles: Arena::new(),
            obstacles,
            tables,
            difficulty,
            events: EventQueue::new(),
            rng: StdRng::seed_from_u64(seed),
            spawned: Vec::new(),
            tick: 0,
        })
    }

    // ── Spawning ─────────────────────────────────────────────────────────────

    pub fn spawn_enemy(&mut self, kind: EnemyKind, center: Vec2) -> ConfigResult<EntityHandle> {
        let enemy = Enemy::from_tables(
            kind,
            center,
            &self.tables,
            self.difficulty.multipliers(),
            &mut self.rng,
        )?;
        let id = self.enemies.insert(enemy);
        tracing::debug!(kind = kind.name(), x = center.x, y = center.y, "enemy spawned");
        Ok(EntityHandle::Enemy(id))
    }

    pub fn spawn_projectile(&mut self, projectile: Projectile) -> EntityHandle {
        EntityHandle::Projectile(self.projectiles.insert(projectile))
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    /// Dying enemies are no longer alive even though they are still drawn.
    pub fn is_alive(&self, handle: EntityHandle) -> bool {
        match handle {
            EntityHandle::Enemy(id) => self.enemies.get(id).is_some_and(Enemy::is_alive),
            EntityHandle::Projectile(id) => self.projectiles.get(id).is_some_and(Projectile::is_alive),
        }
    }

    pub fn enemy(&self, id: Index) -> Option<&Enemy> {
        self.enemies.get(id)
    }

    pub fn enemy_mut(&mut self, id: Index) -> Option<&mut Enemy> {
        self.enemies.get_mut(id)
    }

    pub fn enemies(&self) -> impl Iterator<Item = (Index, &Enemy)> {
        self.enemies.iter()
    }

    pub fn projectiles(&self) -> impl Iterator<Item = (Index, &Projectile)> {
        self.projectiles.iter()
    }

    pub fn boss(&self) -> Option<&Enemy> {
        self.enemies.iter().map(|(_, e)| e).find(|e| e.kind.is_boss())
    }

    pub fn obstacles(&self) -> &[Rect] {
        &self.obstacles
    }

    pub fn tables(&self) -> &ConfigTables {
        &self.tables
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    // ── Weapons ──────────────────────────────────────────────────────────────

    pub fn unlock_weapon(&mut self, kind: WeaponKind) -> bool {
        self.arsenal.unlock(kind)
    }

    /// Swap to an unlocked weapon; anything else is ignored.
    pub fn change_weapon(&mut self, name: &str) -> bool {
        self.arsenal.equip(
            name,
            &mut self.player,
            &self.tables,
            self.stats.damage_upgrade,
            true,
            &mut self.events,
        )
    }

    // ── Tick ─────────────────────────────────────────────────────────────────

    /// Advance everything by `dt` seconds, in a fixed order: player, weapon,
    /// enemies, projectiles and their hits, contact damage, cleanup.
    pub fn update(&mut self, input: &FrameInput, dt: f32) {
        self.tick += 1;

        self.player
            .update(&input.movement, dt, &self.obstacles, &mut self.events);
        self.player.update_weapon(
            &input.aim,
            self.stats.damage_upgrade,
            dt,
            &mut self.rng,
            &mut self.spawned,
            &mut self.events,
        );

        let target = self.player.center();
        for (_, enemy) in self.enemies.iter_mut() {
            enemy.update(
                target,
                dt,
                &self.obstacles,
                &mut self.rng,
                &mut self.spawned,
                &mut self.events,
            );
        }

        self.resolve_projectiles(dt);
        self.resolve_contact();
        self.remove_finished();

        for projectile in self.spawned.drain(..) {
            self.projectiles.insert(projectile);
        }
    }

    /// Move every shot and walk its path in order: the first wall, enemy
    /// (for player shots) or player (for enemy shots) it touches stops it.
    fn resolve_projectiles(&mut self, dt: f32) {
        let Self { player, enemies, projectiles, obstacles, events, stats, .. } = self;

        for (_, projectile) in projectiles.iter_mut() {
            projectile.update(dt);
            if !projectile.is_alive() {
                continue;
            }
            for center in projectile.path() {
                let hitbox = Rect::from_center(center, Vec2::splat(PROJECTILE_SIZE));
                if obstacles.iter().any(|o| o.overlaps(&hitbox)) {
                    projectile.stop_at(center);
                    break;
                }
                match projectile.owner {
                    ProjectileOwner::Player => {
                        let nearest = enemies
                            .iter_mut()
                            .filter(|(_, e)| e.collision_active() && e.hitbox.overlaps(&hitbox))
                            .min_by(|(_, a), (_, b)| {
                                let da = a.center().distance_squared(center);
                                da.total_cmp(&b.center().distance_squared(center))
                            });
                        let Some((id, enemy)) = nearest else {
                            continue;
                        };
                        projectile.stop_at(center);
                        if enemy.take_damage(projectile.damage, events) {
                            stats.kills += 1;
                            stats.score += enemy.kind.score();
                            events.push(GameEvent::EnemyKilled {
                                id,
                                kind: enemy.kind,
                                pos: enemy.center(),
                            });
                        }
                        break;
                    }
                    ProjectileOwner::Enemy => {
                        if player.is_alive() && player.hitbox.overlaps(&hitbox) {
                            // Spent even if the player is invulnerable
                            player.take_direct_damage(projectile.damage, events);
                            projectile.stop_at(center);
                            break;
                        }
                    }
                }
            }
        }
    }

    fn resolve_contact(&mut self) {
        for (_, enemy) in self.enemies.iter_mut() {
            if !self.player.is_alive() {
                return;
            }
            if !enemy.collision_active() || enemy.is_staggered() {
                continue;
            }
            if !enemy.hitbox.overlaps(&self.player.hitbox) {
                continue;
            }
            if self
                .player
                .take_contact_damage(enemy.contact_source(), &mut self.events)
            {
                enemy.deal_damage();
            }
        }
    }

    fn remove_finished(&mut self) {
        let events = &mut self.events;
        self.enemies.retain(|id, enemy| {
            let keep = !enemy.is_removed();
            if !keep {
                events.push(GameEvent::EnemyRemoved { id });
            }
            keep
        });
        self.projectiles.retain(|_, p| p.is_alive());
    }
}
