// Player: invulnerability window and weapon rig on top of a character
//
// The player is a character with two extra capabilities:
// - an invulnerability timer armed by enemy contact, which also fades the sprite
// - a weapon rig, a second state machine ticked before the body machine

use glam::Vec2;

use crate::core::math::in_cubic;
use crate::engine::{palette, RandomSource, RenderContext, SoundCue};

use super::config::CoreConfig;
use super::damage::DamageColor;
use super::definitions::EntityDefinition;
use super::entity::{Entity, EntityCore, EntityKind};
use super::error::CoreError;
use super::state_machine::StateInput;
use super::states::{self, WeaponMachine, WeaponState};
use super::stats::Stat;

/// Post-hit grace period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvulnerabilityTimer {
    remaining: f32,
    window: f32,
    min_alpha: f32,
}

impl InvulnerabilityTimer {
    pub fn new(window: f32, min_alpha: f32) -> Self {
        Self {
            remaining: 0.0,
            window,
            min_alpha,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    /// Start a fresh window
    pub fn arm(&mut self) {
        self.remaining = self.window;
    }

    pub fn is_vulnerable(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Draw opacity: `min_alpha` right after a hit, easing back to 1.0
    pub fn opacity(&self) -> f32 {
        if self.window <= 0.0 {
            return 1.0;
        }
        in_cubic(self.remaining, 1.0, self.min_alpha - 1.0, self.window)
    }
}

/// Weapon machine carried by the player
#[derive(Debug)]
pub struct WeaponRig {
    machine: WeaponMachine,
}

impl WeaponRig {
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            machine: states::blaster(config),
        }
    }

    pub fn current_name(&self) -> Option<WeaponState> {
        self.machine.current_name()
    }

    pub fn change(
        &mut self,
        name: WeaponState,
        core: &mut EntityCore,
        input: Option<StateInput>,
    ) -> Result<(), CoreError> {
        self.machine.change(name, core, input)
    }

    pub fn update(&mut self, core: &mut EntityCore, dt: f32) -> Result<(), CoreError> {
        self.machine.update(core, dt)
    }
}

impl Entity {
    /// Level-1 player with an aimed blaster
    pub fn player(
        def: &EntityDefinition,
        position: Vec2,
        config: &CoreConfig,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, CoreError> {
        let mut entity = Self::character(EntityKind::Player, def, position, 1, config, rng)?;
        entity.core.collidable = true;
        entity.core.invulnerability = Some(InvulnerabilityTimer::new(
            config.invulnerability_window,
            config.invulnerable_min_alpha,
        ));

        let mut rig = WeaponRig::new(config);
        rig.change(WeaponState::Aim, &mut entity.core, None)?;
        entity.weapon = Some(rig);

        Ok(entity)
    }

    pub fn is_vulnerable(&self) -> bool {
        self.core
            .invulnerability
            .map_or(true, |timer| timer.is_vulnerable())
    }

    /// Contact damage from `enemy`, ignored during the invulnerability window
    pub(crate) fn absorb_hit(&mut self, enemy: &Entity) -> Result<(), CoreError> {
        if !self.is_vulnerable() {
            return Ok(());
        }

        let damage = enemy.core.combat()?.get(Stat::Attack);
        if let Some(timer) = &mut self.core.invulnerability {
            timer.arm();
        }

        let at = self.core.center();
        self.take_damage(damage, at, DamageColor::Hurt)?;
        self.core.cue(SoundCue::Hit);
        Ok(())
    }

    /// Character sprite faded by the invulnerability timer
    pub(crate) fn render_player(&self, target: &mut dyn RenderContext) {
        let alpha = self
            .core
            .invulnerability
            .map_or(1.0, |timer| timer.opacity());

        target.set_color(palette::WHITE, alpha);
        self.render_character(target);
        target.set_color(palette::WHITE, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CommandRecorder, DrawCommand};
    use crate::game::definitions::{PLAYER, SLIME};
    use crate::game::entity::{ControlInput, Spawn};
    use crate::game::states::BodyState;
    use crate::game::stats::tests::Scripted;
    use approx::assert_abs_diff_eq;

    fn setup() -> (Entity, Entity) {
        let config = CoreConfig::default();
        let mut rng = Scripted::always(0);
        let player = Entity::player(&PLAYER, Vec2::ZERO, &config, &mut rng).unwrap();
        let enemy = Entity::enemy(&SLIME, Vec2::ZERO, 1, &config, &mut rng).unwrap();
        (player, enemy)
    }

    #[test]
    fn test_timer_decays_to_zero() {
        let mut timer = InvulnerabilityTimer::new(1.0, 0.3);
        assert!(timer.is_vulnerable());

        timer.arm();
        assert!(!timer.is_vulnerable());
        timer.tick(0.75);
        assert_abs_diff_eq!(timer.remaining(), 0.25);
        timer.tick(0.75);
        assert_eq!(timer.remaining(), 0.0);
        assert!(timer.is_vulnerable());
    }

    #[test]
    fn test_opacity_eases_back() {
        let mut timer = InvulnerabilityTimer::new(1.0, 0.3);
        assert_abs_diff_eq!(timer.opacity(), 1.0);

        timer.arm();
        assert_abs_diff_eq!(timer.opacity(), 0.3, epsilon = 1e-6);

        timer.tick(0.5);
        // 1 - 0.7 * 0.5^3
        assert_abs_diff_eq!(timer.opacity(), 0.9125, epsilon = 1e-6);
    }

    #[test]
    fn test_player_starts_aimed_and_vulnerable() {
        let (player, _) = setup();
        assert_eq!(player.kind, EntityKind::Player);
        assert_eq!(player.body_state(), Some(BodyState::Idle));
        assert_eq!(player.weapon_state(), Some(WeaponState::Aim));
        assert!(player.is_vulnerable());
        assert!(player.core.collidable);
    }

    #[test]
    fn test_contact_hurts_once_per_window() {
        let (mut player, mut enemy) = setup();
        let hp = player.combat().unwrap().hp();

        player.collided(&mut enemy).unwrap();
        assert_eq!(player.combat().unwrap().hp(), hp - 2);
        assert!(!player.is_vulnerable());
        assert_eq!(player.core.outbox.cues, vec![SoundCue::Hit]);
        assert_eq!(
            player.core.outbox.spawns,
            vec![Spawn::DamageNumber {
                at: player.core.center(),
                amount: 2,
                color: DamageColor::Hurt
            }]
        );

        // Still inside the window: no damage and the timer keeps running
        player.update(0.25).unwrap();
        player.collided(&mut enemy).unwrap();
        assert_eq!(player.combat().unwrap().hp(), hp - 2);
        assert_eq!(player.core.outbox.cues.len(), 1);
        assert_abs_diff_eq!(
            player.core.invulnerability.unwrap().remaining(),
            0.75,
            epsilon = 1e-6
        );

        player.update(0.5).unwrap();
        player.collided(&mut enemy).unwrap();
        assert_eq!(player.combat().unwrap().hp(), hp - 2);

        player.update(0.25).unwrap();
        player.collided(&mut enemy).unwrap();
        assert_eq!(player.combat().unwrap().hp(), hp - 4);
    }

    #[test]
    fn test_enemy_is_not_hurt_by_contact() {
        let (mut player, mut enemy) = setup();
        enemy.collided(&mut player).unwrap();
        assert_eq!(player.combat().unwrap().hp(), 20);
        assert_eq!(enemy.combat().unwrap().hp(), 8);
    }

    #[test]
    fn test_fatal_contact_kills_player() {
        let (mut player, mut enemy) = setup();
        player.core.combat_mut().unwrap().set(Stat::Hp, 1);
        player.collided(&mut enemy).unwrap();
        assert!(player.is_dead());
        assert!(!player.core.collidable);
    }

    #[test]
    fn test_update_fires_when_trigger_held() {
        let (mut player, _) = setup();
        player.set_input(ControlInput {
            movement: Vec2::ZERO,
            fire: true,
        });

        player.update(0.016).unwrap();
        assert_eq!(player.weapon_state(), Some(WeaponState::Fire));
        assert_eq!(player.core.outbox.cues, vec![SoundCue::Shoot]);
        assert!(matches!(
            player.core.outbox.spawns[..],
            [Spawn::Shot { damage: 4, .. }]
        ));

        player.update(0.016).unwrap();
        assert_eq!(player.weapon_state(), Some(WeaponState::Cooldown));
    }

    #[test]
    fn test_dead_player_cannot_fire() {
        let (mut player, mut enemy) = setup();
        player.core.combat_mut().unwrap().set(Stat::Hp, 1);
        player.collided(&mut enemy).unwrap();

        player.set_input(ControlInput {
            movement: Vec2::ZERO,
            fire: true,
        });
        player.update(0.016).unwrap();
        assert_eq!(player.weapon_state(), Some(WeaponState::Aim));
    }

    #[test]
    fn test_get_exp_plays_powerup() {
        let (mut player, _) = setup();
        let mut rng = Scripted::always(5);
        assert!(!player.get_exp(1, &mut rng).unwrap());
        assert_eq!(player.core.outbox.cues, vec![SoundCue::Powerup]);
    }

    #[test]
    fn test_render_fades_while_invulnerable() {
        let (mut player, mut enemy) = setup();
        player.collided(&mut enemy).unwrap();

        let mut recorder = CommandRecorder::new();
        player.render(&mut recorder);
        let commands = recorder.commands();

        match commands[0] {
            DrawCommand::Color { rgb, alpha } => {
                assert_eq!(rgb, palette::WHITE);
                assert_abs_diff_eq!(alpha, 0.3, epsilon = 1e-6);
            }
            ref other => panic!("expected color, got {:?}", other),
        }
        assert_eq!(recorder.tile_count(), 1);
        assert_eq!(
            commands.last(),
            Some(&DrawCommand::Color {
                rgb: palette::WHITE,
                alpha: 1.0
            })
        );
    }
}
