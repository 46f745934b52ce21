//! Countdown of temporary objects.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::fuse::Fuse;
use crate::components::objectid::ObjectId;
use crate::resources::worldtime::WorldTime;

/// Burn the frame's delta off every fuse. Expired objects are reaped by the
/// render pass, not here.
pub fn fuse_system(mut query: Query<(&ObjectId, &mut Fuse)>, time: Res<WorldTime>) {
    for (id, mut fuse) in query.iter_mut() {
        if fuse.tick(time.delta) {
            debug!("Fuse of {} expired", id);
        }
    }
}
