//! Follow AI and motion integration
//!
//! Between patterns the boss drifts horizontally toward the player. The chase
//! only runs while the follow AI holds the motion owner token; patterns and
//! the death teardown both take it away, so there is never a tick where two
//! writers fight over the velocity.

use bevy::prelude::*;

use super::components::{BossEncounter, MotionOwner, Player, Velocity};
use super::config::EncounterConfig;
use super::spatial::position_of;

/// Steer the boss toward the player while the follow AI owns motion.
///
/// The chase is horizontal only; vertical position is left to descents.
pub fn follow_player(
    config: Res<EncounterConfig>,
    mut bosses: Query<(&BossEncounter, &Transform, &mut Velocity)>,
    players: Query<(&Transform, &Player), Without<BossEncounter>>,
) {
    for (boss, transform, mut velocity) in bosses.iter_mut() {
        if boss.motion_owner != MotionOwner::FollowAi
            || boss.is_rushing
            || boss.is_descending
            || boss.dying
        {
            continue;
        }

        let Ok((player_transform, player)) = players.get_single() else {
            velocity.0 = Vec2::ZERO;
            continue;
        };
        if player.dead {
            velocity.0 = Vec2::ZERO;
            continue;
        }

        let boss_pos = position_of(transform);
        let player_pos = position_of(player_transform);
        let delta_x = player_pos.x - boss_pos.x;

        if delta_x.abs() <= config.follow_stop_distance {
            velocity.0 = Vec2::ZERO;
        } else {
            velocity.0 = Vec2::new(delta_x.signum() * config.follow_speed, 0.0);
        }
    }
}

/// Integrate velocity into position. Runs for every moving entity after the
/// behavior systems have written their velocities for the tick.
pub fn apply_velocity(time: Res<Time>, mut movers: Query<(&Velocity, &mut Transform)>) {
    let dt = time.delta_secs();
    for (velocity, mut transform) in movers.iter_mut() {
        transform.translation.x += velocity.0.x * dt;
        transform.translation.y += velocity.0.y * dt;
    }
}
