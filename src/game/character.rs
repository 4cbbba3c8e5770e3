// Character behaviour: combat, levelling, death
//
// Any entity with a `CombatStats` capability and a character body machine is
// a character. Players and enemies are both built here.

use glam::Vec2;

use crate::engine::{palette, RandomSource, RenderContext, SoundCue};

use super::config::CoreConfig;
use super::damage::DamageColor;
use super::definitions::EntityDefinition;
use super::entity::{Entity, EntityCore, EntityKind, Spawn};
use super::error::CoreError;
use super::state_machine::StateInput;
use super::states::{self, BodyState};
use super::stats::CombatStats;

/// Opacity used to draw dead characters
pub const DEATH_ALPHA: f32 = 0.5;

impl Entity {
    /// Character of `kind` at `level`, standing idle
    pub(crate) fn character(
        kind: EntityKind,
        def: &EntityDefinition,
        position: Vec2,
        level: u32,
        config: &CoreConfig,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, CoreError> {
        let template = def.stats.ok_or(CoreError::MissingCapability("combat"))?;

        let mut core = EntityCore::from_definition(def, position)?;
        core.solid = true;
        core.combat = Some(CombatStats::new(template, level, rng));

        let mut entity = Self::new(kind, core);
        entity.body = Some(states::character_body(config));
        entity.change_state(BodyState::Idle, None)?;
        Ok(entity)
    }

    /// Enemy character
    pub fn enemy(
        def: &EntityDefinition,
        position: Vec2,
        level: u32,
        config: &CoreConfig,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, CoreError> {
        Self::character(EntityKind::Enemy, def, position, level, config, rng)
    }

    pub fn combat(&self) -> Option<&CombatStats> {
        self.core.combat.as_ref()
    }

    pub fn is_dead(&self) -> bool {
        self.body_state() == Some(BodyState::Death)
    }

    /// Subtract `amount` from Hp and queue a damage number at `at`.
    ///
    /// Death is entered the first time Hp drops to 0 or below; later fatal
    /// hits leave the Death state alone. The damage number is queued
    /// regardless.
    pub fn take_damage(&mut self, amount: i32, at: Vec2, color: DamageColor) -> Result<(), CoreError> {
        if self.is_dead() {
            log::warn!("{} {} damaged after death", self.kind.name(), self.id());
        }

        let hp = self.core.combat_mut()?.wound(amount);
        log::debug!("{} {} took {} damage, hp {}", self.kind.name(), self.id(), amount, hp);

        if hp <= 0 && !self.is_dead() {
            log::info!("{} {} died", self.kind.name(), self.id());
            self.change_state(BodyState::Death, None)?;
        }

        self.core.spawn(Spawn::DamageNumber { at, amount, color });
        Ok(())
    }

    /// Grant experience; returns true if a level was gained
    pub fn get_exp(&mut self, amount: u32, rng: &mut dyn RandomSource) -> Result<bool, CoreError> {
        let combat = self.core.combat_mut()?;
        let leveled = combat.gain_exp(amount, rng);
        let level = combat.level();

        if leveled {
            log::info!("{} {} reached level {}", self.kind.name(), self.id(), level);
        }

        if self.kind == EntityKind::Player {
            self.core.cue(SoundCue::Powerup);
        }

        Ok(leveled)
    }

    /// Roll stat growth once without changing the level
    #[allow(dead_code)]
    pub fn level_up(&mut self, rng: &mut dyn RandomSource) -> Result<(), CoreError> {
        self.core.combat_mut()?.level_up(rng);
        Ok(())
    }

    /// Freeze the character for `duration` seconds
    pub fn stun(&mut self, duration: f32) -> Result<(), CoreError> {
        if self.is_dead() {
            return Ok(());
        }
        self.change_state(BodyState::Stunned, Some(StateInput::Duration(duration)))
    }

    /// Dead characters are drawn dimmed
    pub(crate) fn render_character(&self, target: &mut dyn RenderContext) {
        if self.is_dead() {
            target.set_color(palette::WHITE, DEATH_ALPHA);
            self.render_sprite(target);
            target.set_color(palette::WHITE, 1.0);
            return;
        }

        self.render_sprite(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CommandRecorder, DrawCommand};
    use crate::game::definitions::{CRATE, SLIME};
    use crate::game::stats::tests::Scripted;
    use crate::game::stats::{exp_to_level, Stat};

    fn slime(level: u32) -> Entity {
        let mut rng = Scripted::always(0);
        Entity::enemy(&SLIME, Vec2::ZERO, level, &CoreConfig::default(), &mut rng).unwrap()
    }

    fn with_hp(hp: i32) -> Entity {
        let mut enemy = slime(1);
        enemy.core.combat_mut().unwrap().set(Stat::Hp, hp);
        enemy
    }

    #[test]
    fn test_enemy_starts_idle_with_template_stats() {
        let enemy = slime(1);
        assert_eq!(enemy.kind, EntityKind::Enemy);
        assert_eq!(enemy.body_state(), Some(BodyState::Idle));
        assert_eq!(enemy.combat().unwrap().block(), &SLIME.stats.unwrap());
        // Idle facing bottom
        assert_eq!(enemy.core.animation.as_ref().unwrap().current_clip(), 6);
    }

    #[test]
    fn test_higher_level_grows_stats() {
        let enemy = slime(3);
        let combat = enemy.combat().unwrap();
        assert_eq!(combat.level(), 3);
        // Two level-ups, three guaranteed successes each
        assert_eq!(combat.get(Stat::Attack), 2 + 6);
    }

    #[test]
    fn test_definition_without_stats_is_rejected() {
        let mut rng = Scripted::always(0);
        let result = Entity::enemy(&CRATE, Vec2::ZERO, 1, &CoreConfig::default(), &mut rng);
        assert_eq!(result.unwrap_err(), CoreError::MissingCapability("combat"));
    }

    #[test]
    fn test_fatal_damage_scenario() {
        let mut enemy = with_hp(10);
        enemy
            .take_damage(12, Vec2::new(5.0, 5.0), DamageColor::Neutral)
            .unwrap();

        assert_eq!(enemy.combat().unwrap().hp(), -2);
        assert_eq!(enemy.body_state(), Some(BodyState::Death));
        assert_eq!(
            enemy.core.outbox.spawns,
            vec![Spawn::DamageNumber {
                at: Vec2::new(5.0, 5.0),
                amount: 12,
                color: DamageColor::Neutral
            }]
        );
    }

    #[test]
    fn test_exactly_zero_hp_is_fatal() {
        let mut enemy = with_hp(4);
        enemy.take_damage(4, Vec2::ZERO, DamageColor::Dealt).unwrap();
        assert!(enemy.is_dead());
    }

    #[test]
    fn test_survivable_damage_still_spawns_number() {
        let mut enemy = with_hp(10);
        enemy.take_damage(3, Vec2::ZERO, DamageColor::Dealt).unwrap();

        assert_eq!(enemy.combat().unwrap().hp(), 7);
        assert_eq!(enemy.body_state(), Some(BodyState::Idle));
        assert_eq!(enemy.core.outbox.spawns.len(), 1);
    }

    #[test]
    fn test_repeated_fatal_damage_is_idempotent() {
        let mut enemy = with_hp(1);
        enemy.take_damage(5, Vec2::ZERO, DamageColor::Dealt).unwrap();
        // Mark the live Death instance so a re-entry would be visible
        enemy.core.collidable = true;

        enemy.take_damage(5, Vec2::ZERO, DamageColor::Dealt).unwrap();
        assert!(enemy.is_dead());
        assert!(enemy.core.collidable, "Death state was entered twice");
        assert_eq!(enemy.combat().unwrap().hp(), -9);
        assert_eq!(enemy.core.outbox.spawns.len(), 2);
    }

    #[test]
    fn test_get_exp_levels_once() {
        let mut enemy = slime(1);
        let mut rng = Scripted::always(5);

        assert!(!enemy.get_exp(2, &mut rng).unwrap());
        assert!(enemy.get_exp(500, &mut rng).unwrap());

        let combat = enemy.combat().unwrap();
        assert_eq!(combat.level(), 2);
        assert_eq!(combat.exp_to_level(), exp_to_level(2));
        // Enemies make no sound
        assert!(enemy.core.outbox.cues.is_empty());
    }

    #[test]
    fn test_level_up_grows_without_levelling() {
        let mut enemy = slime(1);
        let mut rng = Scripted::always(0);
        enemy.level_up(&mut rng).unwrap();

        let combat = enemy.combat().unwrap();
        assert_eq!(combat.level(), 1);
        assert_eq!(combat.exp_to_level(), exp_to_level(1));
        assert_eq!(combat.get(Stat::Attack), 2 + 3);
    }

    #[test]
    fn test_level_up_needs_combat() {
        let mut crate_box = Entity::obstacle(&CRATE, Vec2::ZERO).unwrap();
        let mut rng = Scripted::always(0);
        assert_eq!(
            crate_box.level_up(&mut rng),
            Err(CoreError::MissingCapability("combat"))
        );
    }

    #[test]
    fn test_stun_then_recover() {
        let mut enemy = slime(1);
        enemy.stun(0.2).unwrap();
        assert_eq!(enemy.body_state(), Some(BodyState::Stunned));

        enemy.update(0.25).unwrap();
        assert_eq!(enemy.body_state(), Some(BodyState::Idle));
    }

    #[test]
    fn test_dead_cannot_be_stunned() {
        let mut enemy = with_hp(1);
        enemy.take_damage(1, Vec2::ZERO, DamageColor::Dealt).unwrap();
        enemy.stun(1.0).unwrap();
        assert!(enemy.is_dead());
    }

    #[test]
    fn test_dead_render_is_dimmed() {
        let mut enemy = with_hp(1);
        enemy.take_damage(1, Vec2::ZERO, DamageColor::Dealt).unwrap();

        let mut recorder = CommandRecorder::new();
        enemy.render(&mut recorder);
        let commands = recorder.commands();

        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[0],
            DrawCommand::Color {
                rgb: palette::WHITE,
                alpha: DEATH_ALPHA
            }
        );
        assert!(matches!(commands[1], DrawCommand::Tile { .. }));
        assert_eq!(
            commands[2],
            DrawCommand::Color {
                rgb: palette::WHITE,
                alpha: 1.0
            }
        );
    }

    #[test]
    fn test_living_render_has_no_tint() {
        let enemy = slime(1);
        let mut recorder = CommandRecorder::new();
        enemy.render(&mut recorder);
        assert_eq!(
            recorder.commands(),
            &[DrawCommand::Tile {
                tile: 12,
                position: SLIME.tile_offset
            }]
        );
    }
}
