//! Archetype behavior routines
//!
//! Each routine advances one enemy by `dt` after the shared gates in
//! [`Enemy::update`] have passed. Routines compose a handful of idioms:
//! grid wander, timed idle/act toggles, jump arcs, teleports, homing and
//! charges.

use glam::Vec2;
use rand::Rng;

use super::{AiContext, Enemy, EnemyKind, EnemyState, JumpArc};
use crate::consts::*;
use crate::sim::weapons::{Boomerang, BoomerangOwner, Projectile, ProjectileKind};

impl Enemy {
    pub(super) fn run_behavior(&mut self, dt: f32, ctx: &mut AiContext) {
        match self.kind {
            EnemyKind::OctorokRed | EnemyKind::OctorokBlue => self.octorok(dt, ctx),
            EnemyKind::TektiteRed | EnemyKind::TektiteBlue => self.tektite(dt, ctx),
            EnemyKind::MoblinRed | EnemyKind::MoblinBlue => self.moblin(dt, ctx),
            EnemyKind::DarknutRed | EnemyKind::DarknutBlue => self.wander(dt, ctx, 0.02),
            EnemyKind::Stalfos | EnemyKind::Digdogger | EnemyKind::Vire => {
                self.wander(dt, ctx, 0.02)
            }
            EnemyKind::Zol | EnemyKind::Gibdo => self.wander(dt, ctx, 0.01),
            EnemyKind::Dodongo => self.dodongo(dt, ctx),
            EnemyKind::Gohma => self.gohma(dt, ctx),
            EnemyKind::Keese => self.keese(dt, ctx),
            EnemyKind::Gel => self.gel(dt, ctx),
            EnemyKind::WizzrobeRed => self.wizzrobe_red(dt, ctx),
            EnemyKind::WizzrobeBlue => self.wizzrobe_blue(dt, ctx),
            EnemyKind::Aquamentus => self.aquamentus(dt, ctx),
            EnemyKind::Ganon => self.ganon(dt, ctx),
            EnemyKind::LeeverRed | EnemyKind::LeeverBlue => self.leever(dt, ctx),
            EnemyKind::Peahat => self.peahat(dt, ctx),
            EnemyKind::LynelRed | EnemyKind::LynelBlue => self.lynel(dt, ctx),
            EnemyKind::Zola => self.zola(dt, ctx),
            EnemyKind::Armos => self.armos(dt, ctx),
            EnemyKind::Ghini => self.ghini(dt, ctx),
            EnemyKind::Rope => self.rope(dt, ctx),
            EnemyKind::GoriyaRed | EnemyKind::GoriyaBlue => self.goriya(dt, ctx),
            EnemyKind::Wallmaster | EnemyKind::LikeLike => self.home_on_foot(dt, ctx),
            EnemyKind::PolsVoice => self.pols_voice(dt, ctx),
            EnemyKind::Moldorm => self.moldorm(dt, ctx),
            EnemyKind::Bubble => self.bubble(dt, ctx),
            EnemyKind::Manhandla => self.manhandla(dt, ctx),
            EnemyKind::Gleeok => self.gleeok(dt, ctx),
        }
    }

    /// Grid wander with a per-frame chance of turning
    fn wander(&mut self, dt: f32, ctx: &mut AiContext, turn_chance: f32) {
        if self.state != EnemyState::Moving {
            self.state = EnemyState::Moving;
            return;
        }
        self.move_grid(dt, ctx.tiles, ctx.rng);
        if ctx.rng.random::<f32>() < turn_chance {
            self.change_direction(ctx.rng);
        }
    }

    fn octorok(&mut self, dt: f32, ctx: &mut AiContext) {
        match self.state {
            EnemyState::Moving => {
                self.move_grid(dt, ctx.tiles, ctx.rng);
                if ctx.rng.random::<f32>() < 0.01 {
                    self.state = EnemyState::Idle;
                    self.move_timer = 0.5 + ctx.rng.random::<f32>();
                }
            }
            EnemyState::Idle => {
                self.move_timer -= dt;
                if self.move_timer <= 0.0 {
                    if ctx.rng.random::<f32>() < 0.3 {
                        self.shoot_rock(ctx);
                    } else {
                        self.change_direction(ctx.rng);
                    }
                    self.state = EnemyState::Moving;
                }
            }
            _ => self.state = EnemyState::Moving,
        }
    }

    fn tektite(&mut self, dt: f32, ctx: &mut AiContext) {
        match self.state {
            EnemyState::Jumping => {
                let Some(mut arc) = self.jump else {
                    self.state = EnemyState::Idle;
                    return;
                };
                arc.timer += dt;
                let progress = if arc.duration > 0.0 {
                    (arc.timer / arc.duration).min(1.0)
                } else {
                    1.0
                };

                let delta = arc.target - self.pos;
                let dist = delta.length();
                let step = self.speed * dt;
                if dist > step {
                    self.pos += delta / dist * step;
                } else {
                    self.pos = arc.target;
                }
                self.z = 4.0 * JUMP_HEIGHT * progress * (1.0 - progress);

                if progress >= 1.0 {
                    self.z = 0.0;
                    self.jump = None;
                    self.state = EnemyState::Idle;
                    let wait = if self.kind == EnemyKind::TektiteRed { 0.5 } else { 1.5 };
                    self.move_timer = wait + ctx.rng.random::<f32>() * 0.5;
                } else {
                    self.jump = Some(arc);
                }
            }
            _ => {
                self.state = EnemyState::Idle;
                self.move_timer -= dt;
                if self.move_timer <= 0.0 {
                    self.start_jump(ctx);
                }
            }
        }
    }

    fn start_jump(&mut self, ctx: &mut AiContext) {
        let angle = ctx.rng.random::<f32>() * std::f32::consts::TAU;
        let dist = 30.0 + ctx.rng.random::<f32>() * 30.0;
        let raw = self.pos + Vec2::new(angle.cos(), angle.sin()) * dist;

        let min = ctx.room.pos() + Vec2::splat(TILE_SIZE);
        let max = ctx.room.pos() + ctx.room.size() - Vec2::splat(TILE_SIZE) - self.size;
        let target = raw.clamp(min, max);

        let duration = if self.speed > 0.0 {
            target.distance(self.pos) / self.speed
        } else {
            0.0
        };
        self.jump = Some(JumpArc {
            target,
            duration,
            timer: 0.0,
        });
        self.state = EnemyState::Jumping;
    }

    fn moblin(&mut self, dt: f32, ctx: &mut AiContext) {
        if self.state != EnemyState::Moving {
            self.state = EnemyState::Moving;
            return;
        }
        self.move_grid(dt, ctx.tiles, ctx.rng);

        let gap = self.alignment(&ctx.player);
        let aligned_x = gap.x < ALIGN_TOLERANCE;
        let aligned_y = gap.y < ALIGN_TOLERANCE;
        if (aligned_x || aligned_y) && ctx.rng.random::<f32>() < 0.05 {
            let to_player = ctx.player.center() - self.center();
            let mut dir = Vec2::ZERO;
            if aligned_x {
                dir.y = if to_player.y > 0.0 { 1.0 } else { -1.0 };
            }
            if aligned_y {
                dir.x = if to_player.x > 0.0 { 1.0 } else { -1.0 };
            }
            ctx.projectiles.push(Projectile::new(
                ProjectileKind::Spear,
                self.center(),
                dir,
                ROCK_SPEED,
                1.0,
            ));
        }

        if ctx.rng.random::<f32>() < 0.01 {
            self.change_direction(ctx.rng);
        }
    }

    fn dodongo(&mut self, dt: f32, ctx: &mut AiContext) {
        if self.state == EnemyState::Stunned {
            // Recovering from a bomb
            self.stun_timer -= dt;
            if self.stun_timer <= 0.0 {
                self.stun_timer = 0.0;
                self.state = EnemyState::Moving;
            }
            return;
        }
        self.wander(dt, ctx, 0.01);
    }

    fn gohma(&mut self, dt: f32, ctx: &mut AiContext) {
        self.move_timer -= dt;
        if self.move_timer <= 0.0 {
            if self.state == EnemyState::EyeClosed {
                self.state = EnemyState::EyeOpen;
                self.move_timer = 1.5;
            } else {
                self.state = EnemyState::EyeClosed;
                self.move_timer = 2.0;
                if ctx.rng.random::<f32>() < 0.5 {
                    self.shoot_rock(ctx);
                }
            }
        }

        // Crawls sideways only while the eye is shut
        if self.state == EnemyState::EyeClosed {
            let next_x = self.pos.x + self.direction.x * self.speed * dt;
            let min_x = ctx.room.x + TILE_SIZE;
            let max_x = ctx.room.right() - TILE_SIZE - self.size.x;
            if next_x < min_x {
                self.direction.x = self.direction.x.abs();
            } else if next_x > max_x {
                self.direction.x = -self.direction.x.abs();
            }
            self.pos.x += self.direction.x * self.speed * dt;
        }
    }

    fn keese(&mut self, dt: f32, ctx: &mut AiContext) {
        match self.state {
            EnemyState::Flying => {
                self.move_timer -= dt;
                let step = self.speed * dt;
                let min = ctx.room.pos() + Vec2::splat(TILE_SIZE);
                let max = ctx.room.pos() + ctx.room.size() - Vec2::splat(TILE_SIZE) - self.size;

                // Flies over walls but stays inside the room
                let mut next = self.pos + self.direction * step;
                if next.x < min.x || next.x > max.x {
                    self.direction.x = -self.direction.x;
                    next.x = self.pos.x + self.direction.x * step;
                }
                if next.y < min.y || next.y > max.y {
                    self.direction.y = -self.direction.y;
                    next.y = self.pos.y + self.direction.y * step;
                }
                self.pos = next;

                if self.move_timer <= 0.0 {
                    self.state = EnemyState::Resting;
                    self.move_timer = 0.5 + ctx.rng.random::<f32>();
                }
            }
            _ => {
                self.state = EnemyState::Resting;
                self.move_timer -= dt;
                if self.move_timer <= 0.0 {
                    self.state = EnemyState::Flying;
                    self.move_timer = 1.0 + ctx.rng.random::<f32>() * 2.0;
                    self.change_direction(ctx.rng);
                    self.speed = 40.0 + ctx.rng.random::<f32>() * 40.0;
                }
            }
        }
    }

    fn gel(&mut self, dt: f32, ctx: &mut AiContext) {
        self.move_timer -= dt;
        match self.state {
            EnemyState::Moving => {
                self.move_grid(dt, ctx.tiles, ctx.rng);
                if self.move_timer <= 0.0 {
                    self.state = EnemyState::Idle;
                    self.move_timer = 0.5 + ctx.rng.random::<f32>() * 0.5;
                }
            }
            _ => {
                if self.move_timer <= 0.0 {
                    self.state = EnemyState::Moving;
                    self.move_timer = 0.5 + ctx.rng.random::<f32>() * 0.5;
                    self.change_direction(ctx.rng);
                }
            }
        }
    }

    fn wizzrobe_red(&mut self, dt: f32, ctx: &mut AiContext) {
        self.move_timer -= dt;
        if self.move_timer > 0.0 {
            return;
        }
        match self.state {
            EnemyState::TeleportIn => {
                self.shoot_magic(ctx);
                self.state = EnemyState::TeleportOut;
            }
            _ => {
                self.teleport(ctx.room, ctx.tiles, ctx.rng);
                self.state = EnemyState::TeleportIn;
            }
        }
        self.move_timer = 1.0;
    }

    fn wizzrobe_blue(&mut self, dt: f32, ctx: &mut AiContext) {
        self.move_timer -= dt;
        match self.state {
            EnemyState::Attacking => {
                if self.move_timer <= 0.0 {
                    self.shoot_magic(ctx);
                    self.state = EnemyState::Moving;
                    self.move_timer = 1.0 + ctx.rng.random::<f32>() * 2.0;
                    self.change_direction(ctx.rng);
                }
            }
            _ => {
                self.state = EnemyState::Moving;
                // Phases through walls
                self.pos += self.direction * self.speed * dt;

                let min = ctx.room.pos() + Vec2::splat(TILE_SIZE);
                let max = ctx.room.pos() + ctx.room.size() - Vec2::splat(TILE_SIZE) - self.size;
                if self.pos.cmplt(min).any() || self.pos.cmpgt(max).any() {
                    self.change_direction(ctx.rng);
                    self.pos = self.pos.clamp(min, max);
                }

                if self.move_timer <= 0.0 {
                    self.state = EnemyState::Attacking;
                    self.move_timer = 0.5;
                }
            }
        }
    }

    fn aquamentus(&mut self, dt: f32, ctx: &mut AiContext) {
        self.move_timer -= dt;

        let min_y = ctx.room.y + TILE_SIZE * 3.0;
        let max_y = ctx.room.bottom() - TILE_SIZE * 3.0 - self.size.y;
        self.pos.y += self.direction.y * self.speed * dt;
        if self.pos.y < min_y {
            self.direction.y = self.direction.y.abs();
        } else if self.pos.y > max_y {
            self.direction.y = -self.direction.y.abs();
        }

        if self.move_timer <= 0.0 {
            self.shoot_fireball_fan(ctx);
            self.move_timer = 2.0 + ctx.rng.random::<f32>();
        }
    }

    fn ganon(&mut self, dt: f32, ctx: &mut AiContext) {
        match self.state {
            EnemyState::Invisible => {
                self.move_timer -= dt;
                self.move_grid(dt, ctx.tiles, ctx.rng);
                if self.move_timer <= 0.0 {
                    if ctx.rng.random::<f32>() < 0.3 {
                        self.shoot_fireball(ctx);
                    }
                    self.change_direction(ctx.rng);
                    self.move_timer = 0.5 + ctx.rng.random::<f32>();
                }
            }
            EnemyState::Stunned => {
                self.stun_timer -= dt;
                if self.stun_timer <= 0.0 {
                    self.stun_timer = 0.0;
                    self.state = EnemyState::Invisible;
                    self.invulnerability_timer = 0.0;
                }
            }
            _ => self.state = EnemyState::Invisible,
        }
    }

    fn leever(&mut self, dt: f32, ctx: &mut AiContext) {
        self.move_timer -= dt;
        match self.state {
            EnemyState::Idle => {
                // Buried
                if self.move_timer <= 0.0 {
                    self.state = EnemyState::Moving;
                    self.move_timer = 2.0 + ctx.rng.random::<f32>() * 2.0;
                }
            }
            _ => {
                if self.move_timer <= 0.0 {
                    self.state = EnemyState::Idle;
                    self.move_timer = 2.0 + ctx.rng.random::<f32>() * 2.0;
                    return;
                }
                if self.kind == EnemyKind::LeeverBlue {
                    self.direction = self.cardinal_toward(&ctx.player);
                } else if ctx.rng.random::<f32>() < 0.05 {
                    self.change_direction(ctx.rng);
                }
                self.move_grid(dt, ctx.tiles, ctx.rng);
            }
        }
    }

    fn peahat(&mut self, dt: f32, ctx: &mut AiContext) {
        self.move_timer -= dt;
        match self.state {
            EnemyState::Flying => {
                self.pos += self.direction * self.speed * dt;
                self.bounce_inside_room(ctx);
                if self.move_timer <= 0.0 {
                    self.state = EnemyState::Idle;
                    self.move_timer = 1.0 + ctx.rng.random::<f32>() * 2.0;
                }
            }
            _ => {
                if self.move_timer <= 0.0 {
                    self.state = EnemyState::Flying;
                    self.move_timer = 3.0 + ctx.rng.random::<f32>() * 3.0;
                    let angle = ctx.rng.random::<f32>() * std::f32::consts::TAU;
                    self.direction = Vec2::new(angle.cos(), angle.sin());
                }
            }
        }
    }

    /// Point the direction back inward when past the room's inner margin
    fn bounce_inside_room(&mut self, ctx: &AiContext) {
        let min = ctx.room.pos() + Vec2::splat(TILE_SIZE);
        let max = ctx.room.pos() + ctx.room.size() - Vec2::splat(TILE_SIZE) - self.size;
        if self.pos.x < min.x {
            self.direction.x = self.direction.x.abs();
        }
        if self.pos.x > max.x {
            self.direction.x = -self.direction.x.abs();
        }
        if self.pos.y < min.y {
            self.direction.y = self.direction.y.abs();
        }
        if self.pos.y > max.y {
            self.direction.y = -self.direction.y.abs();
        }
    }

    fn lynel(&mut self, dt: f32, ctx: &mut AiContext) {
        match self.state {
            EnemyState::Attacking => {
                self.move_timer -= dt;
                if self.move_timer <= 0.0 {
                    self.state = EnemyState::Moving;
                }
            }
            _ => {
                self.state = EnemyState::Moving;
                self.move_grid(dt, ctx.tiles, ctx.rng);
                if ctx.rng.random::<f32>() < 0.01 {
                    self.change_direction(ctx.rng);
                }

                let gap = self.alignment(&ctx.player);
                if (gap.x < ALIGN_TOLERANCE || gap.y < ALIGN_TOLERANCE)
                    && ctx.rng.random::<f32>() < 0.02
                {
                    // Sword beam
                    self.shoot_magic(ctx);
                    self.state = EnemyState::Attacking;
                    self.move_timer = 0.5;
                }
            }
        }
    }

    fn zola(&mut self, dt: f32, ctx: &mut AiContext) {
        self.move_timer -= dt;
        if self.move_timer > 0.0 {
            return;
        }
        match self.state {
            EnemyState::Idle => {
                // Surface and fire
                self.state = EnemyState::Attacking;
                self.move_timer = 2.0;
                self.shoot_magic(ctx);
            }
            _ => {
                self.state = EnemyState::Idle;
                self.move_timer = 2.0 + ctx.rng.random::<f32>() * 3.0;
            }
        }
    }

    fn armos(&mut self, dt: f32, ctx: &mut AiContext) {
        if self.state == EnemyState::Idle {
            // Statue until touched
            if self.bounds().overlaps(&ctx.player) {
                self.state = EnemyState::Moving;
                self.speed = 60.0;
                log::debug!("Armos {:?} woke up", self.id);
            }
            return;
        }
        self.move_grid(dt, ctx.tiles, ctx.rng);
        if ctx.rng.random::<f32>() < 0.05 {
            self.change_direction(ctx.rng);
        }
    }

    fn ghini(&mut self, dt: f32, ctx: &mut AiContext) {
        if ctx.rng.random::<f32>() < 0.02 {
            if ctx.rng.random::<f32>() < 0.5 {
                self.direction = self.aim_at(&ctx.player);
            } else {
                let angle = ctx.rng.random::<f32>() * std::f32::consts::TAU;
                self.direction = Vec2::new(angle.cos(), angle.sin());
            }
        }
        // Ghosts ignore walls
        self.pos += self.direction * self.speed * dt;
        self.bounce_inside_room(ctx);
    }

    fn rope(&mut self, dt: f32, ctx: &mut AiContext) {
        if self.state == EnemyState::Attacking {
            let next = self.pos + self.direction * CHARGE_SPEED * dt;
            let c = next + self.size / 2.0;
            if ctx.tiles.is_solid(c.x, c.y) {
                self.state = EnemyState::Moving;
                self.speed = 30.0;
                self.change_direction(ctx.rng);
            } else {
                self.pos = next;
            }
            return;
        }

        self.state = EnemyState::Moving;
        self.move_grid(dt, ctx.tiles, ctx.rng);

        let gap = self.alignment(&ctx.player);
        let to_player = ctx.player.center() - self.center();
        if gap.x < ALIGN_TOLERANCE {
            self.state = EnemyState::Attacking;
            self.direction = Vec2::new(0.0, if to_player.y > 0.0 { 1.0 } else { -1.0 });
        } else if gap.y < ALIGN_TOLERANCE {
            self.state = EnemyState::Attacking;
            self.direction = Vec2::new(if to_player.x > 0.0 { 1.0 } else { -1.0 }, 0.0);
        } else if ctx.rng.random::<f32>() < 0.02 {
            self.change_direction(ctx.rng);
        }
    }

    fn goriya(&mut self, dt: f32, ctx: &mut AiContext) {
        if self.state == EnemyState::Attacking {
            self.move_timer -= dt;
            if self.move_timer <= 0.0 {
                self.state = EnemyState::Moving;
            }
            return;
        }

        self.state = EnemyState::Moving;
        self.move_grid(dt, ctx.tiles, ctx.rng);
        if ctx.rng.random::<f32>() < 0.01 {
            self.change_direction(ctx.rng);
        }

        let gap = self.alignment(&ctx.player);
        if (gap.x < ALIGN_TOLERANCE || gap.y < ALIGN_TOLERANCE) && ctx.rng.random::<f32>() < 0.02 {
            let owner = BoomerangOwner::Enemy(self.id);
            if ctx.boomerangs.iter().any(|b| b.owner == owner) {
                return;
            }

            let dir = if self.direction.y < 0.0 {
                Vec2::new(0.0, -1.0)
            } else if self.direction.y > 0.0 {
                Vec2::new(0.0, 1.0)
            } else if self.direction.x < 0.0 {
                Vec2::new(-1.0, 0.0)
            } else if self.direction.x > 0.0 {
                Vec2::new(1.0, 0.0)
            } else {
                return;
            };
            let pos = self.center() - Vec2::splat(BOOMERANG_SIZE / 2.0) + dir * 8.0;
            ctx.boomerangs.push(Boomerang::new(owner, pos, dir));
            self.state = EnemyState::Attacking;
            self.move_timer = 0.5;
        }
    }

    /// Walk straight at the player, refusing steps into walls
    fn home_on_foot(&mut self, dt: f32, ctx: &mut AiContext) {
        let to_player = ctx.player.center() - self.center();
        let len = to_player.length();
        if len <= 0.0 {
            return;
        }
        let next = self.pos + to_player / len * self.speed * dt;
        let c = next + self.size / 2.0;
        if !ctx.tiles.is_solid(c.x, c.y) {
            self.pos = next;
        }
    }

    fn pols_voice(&mut self, dt: f32, ctx: &mut AiContext) {
        self.move_timer -= dt;
        match self.state {
            EnemyState::Jumping => {
                let next = self.pos + self.direction * self.speed * dt;
                let c = next + self.size / 2.0;
                if ctx.tiles.is_solid(c.x, c.y) {
                    self.change_direction(ctx.rng);
                } else {
                    self.pos = next;
                }
                if self.move_timer <= 0.0 {
                    self.state = EnemyState::Idle;
                    self.move_timer = 0.5 + ctx.rng.random::<f32>() * 0.5;
                }
            }
            _ => {
                if self.move_timer <= 0.0 {
                    self.state = EnemyState::Jumping;
                    self.move_timer = 1.0 + ctx.rng.random::<f32>();
                    self.change_direction(ctx.rng);
                    if ctx.rng.random::<f32>() < 0.5 {
                        self.direction = self.cardinal_toward(&ctx.player);
                    }
                }
            }
        }
    }

    fn moldorm(&mut self, dt: f32, ctx: &mut AiContext) {
        self.move_timer -= dt;
        if self.move_timer <= 0.0 {
            self.move_timer = 0.5 + ctx.rng.random::<f32>();
            let angle = self.direction.y.atan2(self.direction.x);
            let turned = angle + (ctx.rng.random::<f32>() - 0.5) * 2.0;
            self.direction = Vec2::new(turned.cos(), turned.sin());
        }

        let step = self.speed * dt;
        let mut next = self.pos + self.direction * step;
        let c = next + self.size / 2.0;
        if ctx.tiles.is_solid(c.x, c.y) {
            self.direction = -self.direction;
            next = self.pos + self.direction * step;
        }
        self.pos = next;
    }

    fn bubble(&mut self, dt: f32, ctx: &mut AiContext) {
        let step = self.speed * dt;
        let mut next = self.pos + self.direction * step;

        let lead_x = if self.direction.x > 0.0 { self.size.x } else { 0.0 };
        if ctx.tiles.is_solid(next.x + lead_x, self.pos.y + self.size.y / 2.0) {
            self.direction.x = -self.direction.x;
            next.x = self.pos.x + self.direction.x * step;
        }
        let lead_y = if self.direction.y > 0.0 { self.size.y } else { 0.0 };
        if ctx.tiles.is_solid(next.x + self.size.x / 2.0, next.y + lead_y) {
            self.direction.y = -self.direction.y;
            next.y = self.pos.y + self.direction.y * step;
        }
        self.pos = next;

        // Always diagonal
        if self.direction.x == 0.0 || self.direction.y == 0.0 {
            self.direction = Vec2::new(
                if self.direction.x < 0.0 { -1.0 } else { 1.0 },
                if self.direction.y < 0.0 { -1.0 } else { 1.0 },
            )
            .normalize();
        }
    }

    fn manhandla(&mut self, dt: f32, ctx: &mut AiContext) {
        // Faster as it loses health
        let base = self.speed;
        self.speed *= 1.0 + (16.0 - self.health) * 0.1;
        self.move_grid(dt, ctx.tiles, ctx.rng);
        self.speed = base;

        if ctx.rng.random::<f32>() < 0.02 {
            self.change_direction(ctx.rng);
        }
        if ctx.rng.random::<f32>() < 0.02 {
            self.shoot_fireball_fan(ctx);
        }
    }

    fn gleeok(&mut self, dt: f32, ctx: &mut AiContext) {
        self.move_timer -= dt;
        if self.move_timer <= 0.0 {
            self.shoot_fireball(ctx);
            self.move_timer = 1.0 + ctx.rng.random::<f32>();
        }
    }
}
