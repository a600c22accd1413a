//! Visual Effect and Camera Shake Requests
//!
//! The encounter core never draws anything. It raises fire-and-forget
//! [`EffectRequest`] and [`CameraShakeRequest`] events; a presentation layer
//! (not part of this crate) is free to consume them. Each request also
//! materializes as a lifetime-tracked [`EncounterEffect`] entity so that death
//! can cancel every in-flight cosmetic routine in one pass.

use bevy::prelude::*;

use crate::log::{EncounterLog, EncounterLogEventType};

use super::components::Phase;

/// What kind of visual the core is asking for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectKind {
    /// Radial slam cue at the boss position
    SlamCue,
    /// Expanding shockwave ring
    Shockwave,
    /// Ground wave projectile (a short-lived external entity)
    WaveProjectile,
    /// Pulsing dash-path warning indicator
    RushPath,
    /// Trail following the boss during a dash
    RushTrail,
    /// Dust cloud during the post-dash descent
    Descent,
    /// Impact ring on touching down after a descent
    Landing,
    /// Pulsing aura shown while the boss is enraged
    RageAura,
    /// Recolor of the boss body itself while enraged
    RageTint,
    /// White burst where a hit landed on the boss
    HitBurst,
    /// One explosion of the death sequence
    DeathExplosion,
}

impl EffectKind {
    pub fn name(self) -> &'static str {
        match self {
            EffectKind::SlamCue => "SlamCue",
            EffectKind::Shockwave => "Shockwave",
            EffectKind::WaveProjectile => "WaveProjectile",
            EffectKind::RushPath => "RushPath",
            EffectKind::RushTrail => "RushTrail",
            EffectKind::Descent => "Descent",
            EffectKind::Landing => "Landing",
            EffectKind::RageAura => "RageAura",
            EffectKind::RageTint => "RageTint",
            EffectKind::HitBurst => "HitBurst",
            EffectKind::DeathExplosion => "DeathExplosion",
        }
    }
}

/// Fire-and-forget request for a visual effect.
#[derive(Event)]
pub struct EffectRequest {
    pub kind: EffectKind,
    pub position: Vec2,
    /// Size parameter; meaning depends on the kind (radius for cues, length
    /// for path indicators)
    pub scale: f32,
    /// How long the visual should live. The core tracks this so the effect
    /// can be cancelled at death.
    pub lifetime: f32,
    /// Which tier requested it (rage effects render larger/recolored)
    pub phase: Phase,
}

/// Fire-and-forget request for a camera shake.
#[derive(Event)]
pub struct CameraShakeRequest {
    pub intensity: f32,
    pub duration: f32,
}

/// Lifetime-tracked cosmetic entity spawned for each effect request.
///
/// These are the encounter's detached feedback timers: unordered relative to
/// the pattern flow, despawned at expiry, and mass-despawned at death.
#[derive(Component)]
pub struct EncounterEffect {
    pub kind: EffectKind,
    pub remaining: f32,
}

/// Decaying camera shake state for the presentation layer to read.
///
/// The core only owns the countdown; rendering the shake is external.
#[derive(Resource, Default)]
pub struct CameraShake {
    pub intensity: f32,
    pub remaining: f32,
}

/// The externally-owned laser beam emitter. The Laser pattern toggles it;
/// beam collision is the emitter's own responsibility.
#[derive(Resource, Default)]
pub struct BeamEmitter {
    pub active: bool,
}

/// Materialize effect requests as lifetime-tracked entities and log them.
pub fn materialize_effect_requests(
    mut commands: Commands,
    mut requests: EventReader<EffectRequest>,
    mut log: ResMut<EncounterLog>,
) {
    for request in requests.read() {
        commands.spawn((
            EncounterEffect {
                kind: request.kind,
                remaining: request.lifetime,
            },
            Transform::from_translation(request.position.extend(0.0)),
        ));
        log.log(
            EncounterLogEventType::Effect,
            format!(
                "Effect {} requested at ({:.1}, {:.1})",
                request.kind.name(),
                request.position.x,
                request.position.y
            ),
        );
    }
}

/// Tick effect lifetimes and despawn expired ones.
pub fn tick_effects(
    time: Res<Time>,
    mut commands: Commands,
    mut effects: Query<(Entity, &mut EncounterEffect)>,
) {
    let dt = time.delta_secs();
    for (entity, mut effect) in effects.iter_mut() {
        effect.remaining -= dt;
        if effect.remaining <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

/// Apply shake requests and decay the shake state over time.
pub fn update_camera_shake(
    time: Res<Time>,
    mut requests: EventReader<CameraShakeRequest>,
    mut shake: ResMut<CameraShake>,
) {
    for request in requests.read() {
        // A stronger request overrides a fading one
        if request.intensity >= shake.intensity {
            shake.intensity = request.intensity;
            shake.remaining = request.duration;
        }
    }

    if shake.remaining > 0.0 {
        shake.remaining -= time.delta_secs();
        if shake.remaining <= 0.0 {
            shake.intensity = 0.0;
            shake.remaining = 0.0;
        }
    }
}
