//! Static collision world built from half-space surfaces.
//!
//! This is the collision backend used by the Bevy host and the demo binary.
//! Each [`Surface`] is an infinite plane with solid space behind it, which is
//! enough for floors, ramps and walls without a full physics engine.
//!
//! A surface blocks every channel except the one given to
//! [`Surface::passable_by`].

use bevy::prelude::Resource;
use glam::Vec3;
use log::trace;

use crate::collision::{CollisionChannel, CollisionShape, HitResult, PawnId, SweepQuery};
use crate::host::{HostWorld, WorldBounds};
use crate::vector_math::safe_normal;
use crate::{PENETRATION_TOLERANCE, SWEEP_PULLBACK};

/// Infinite plane; everything behind `normal` is solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    /// Unit normal pointing out of the solid side.
    pub normal: Vec3,
    /// Plane offset: points `p` on the surface satisfy `normal · p == offset`.
    pub offset: f32,
    /// Pawn this surface belongs to, ignored by that pawn's own queries.
    pub owner: Option<PawnId>,
    /// Channel whose queries pass straight through.
    pub passable_channel: Option<CollisionChannel>,
}

impl Surface {
    /// A surface through `point` facing `normal`.
    ///
    /// `normal` is normalised; a zero normal yields a degenerate surface that
    /// never blocks.
    #[must_use]
    pub fn new(normal: Vec3, point: Vec3) -> Self {
        let unit = safe_normal(normal);
        Self {
            normal: unit,
            offset: unit.dot(point),
            owner: None,
            passable_channel: None,
        }
    }

    /// A flat floor at height `z`.
    #[must_use]
    pub fn floor(z: f32) -> Self {
        Self::new(Vec3::Z, Vec3::new(0.0, 0.0, z))
    }

    /// Marks the surface as belonging to `owner`.
    #[must_use]
    pub const fn owned_by(mut self, owner: PawnId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Lets queries on `channel` pass through the surface.
    #[must_use]
    pub const fn passable_by(mut self, channel: CollisionChannel) -> Self {
        self.passable_channel = Some(channel);
        self
    }

    /// Gap between `shape` centred at `centre` and this surface.
    ///
    /// Negative values mean the shape overlaps the solid side.
    #[must_use]
    pub fn clearance(&self, centre: Vec3, shape: &CollisionShape) -> f32 {
        self.normal.dot(centre) - self.offset - shape.support_distance(self.normal)
    }

    fn blocks(&self, ignored: Option<PawnId>, channel: CollisionChannel) -> bool {
        self.normal != Vec3::ZERO
            && (self.owner.is_none() || self.owner != ignored)
            && self.passable_channel != Some(channel)
    }
}

/// Collection of static surfaces answering sweep and overlap queries.
#[derive(Resource, Debug, Clone, Default)]
pub struct CollisionWorld {
    surfaces: Vec<Surface>,
}

impl CollisionWorld {
    /// An empty world where nothing ever blocks.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            surfaces: Vec::new(),
        }
    }

    /// Adds `surface`, builder style.
    #[must_use]
    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surfaces.push(surface);
        self
    }

    /// Adds `surface`.
    pub fn add_surface(&mut self, surface: Surface) {
        self.surfaces.push(surface);
    }

    /// All surfaces in insertion order.
    #[must_use]
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Earliest blocking hit for `query`, if any.
    ///
    /// A shape that starts overlapping a surface reports a start-penetrating
    /// hit unless its motion leads away from that surface. Hit locations are
    /// backed off along the path by [`SWEEP_PULLBACK`].
    #[must_use]
    pub fn sweep(&self, query: &SweepQuery) -> Option<HitResult> {
        let delta = query.end - query.start;
        let length = delta.length();
        let direction = safe_normal(delta);
        let mut best: Option<HitResult> = None;

        let blocking = self
            .surfaces
            .iter()
            .filter(|s| s.blocks(query.ignored, query.channel));
        for surface in blocking {
            let start_clearance = surface.clearance(query.start, &query.shape);
            let approach = surface.normal.dot(delta);
            if approach >= 0.0 && start_clearance >= -PENETRATION_TOLERANCE {
                continue;
            }

            let candidate = if start_clearance < -PENETRATION_TOLERANCE {
                if approach >= 0.0 {
                    continue;
                }
                HitResult::penetrating(query.start, surface.normal, -start_clearance)
            } else {
                if start_clearance + approach >= 0.0 {
                    continue;
                }
                let time = (start_clearance.max(0.0) / -approach).clamp(0.0, 1.0);
                let travelled = (time * length - SWEEP_PULLBACK).max(0.0);
                HitResult::blocking(
                    time,
                    time * length,
                    query.start + direction * travelled,
                    surface.normal,
                )
            };

            if best.is_none_or(|current| is_earlier(&candidate, &current)) {
                best = Some(candidate);
            }
        }

        best
    }

    /// Where `shape` ends up when moved from `start` by `delta`.
    ///
    /// With `sweep` unset the shape teleports. The returned hit's `location`
    /// is always the final position.
    #[must_use]
    pub fn move_shape(
        &self,
        start: Vec3,
        delta: Vec3,
        shape: CollisionShape,
        channel: CollisionChannel,
        ignored: Option<PawnId>,
        sweep: bool,
    ) -> HitResult {
        let unobstructed = HitResult {
            distance: delta.length(),
            ..HitResult::no_hit(start + delta)
        };
        if !sweep {
            return unobstructed;
        }
        let query = SweepQuery {
            start,
            end: start + delta,
            rotation: glam::Quat::IDENTITY,
            channel,
            shape,
            ignored,
        };
        self.sweep(&query).unwrap_or(unobstructed)
    }

    /// Deepest surface `shape` overlaps when centred at `centre`.
    #[must_use]
    pub fn penetration(
        &self,
        centre: Vec3,
        shape: CollisionShape,
        channel: CollisionChannel,
        ignored: Option<PawnId>,
    ) -> Option<HitResult> {
        self.surfaces
            .iter()
            .filter(|s| s.blocks(ignored, channel))
            .map(|s| (s, s.clearance(centre, &shape)))
            .filter(|(_, clearance)| *clearance < -PENETRATION_TOLERANCE)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(s, clearance)| HitResult::penetrating(centre, s.normal, -clearance))
    }

    /// Pushes `shape` out of any overlap by `adjustment`.
    ///
    /// Teleports when the adjusted position is clear, otherwise sweeps along
    /// the adjustment. Returns the new centre, or `None` if it did not move.
    #[must_use]
    pub fn depenetrate(
        &self,
        centre: Vec3,
        adjustment: Vec3,
        shape: CollisionShape,
        channel: CollisionChannel,
        ignored: Option<PawnId>,
    ) -> Option<Vec3> {
        let target = centre + adjustment;
        if self.penetration(target, shape, channel, ignored).is_none() {
            trace!("depenetrated from {centre:?} to {target:?}");
            return Some(target);
        }
        let swept = self.move_shape(centre, adjustment, shape, channel, ignored, true);
        (swept.location != centre).then_some(swept.location)
    }
}

fn is_earlier(candidate: &HitResult, current: &HitResult) -> bool {
    candidate.time < current.time
        || (candidate.time <= current.time
            && candidate.penetration_depth > current.penetration_depth)
}

/// A [`CollisionWorld`] paired with the pause and bounds state of a scene.
#[derive(Debug, Clone, Copy)]
pub struct SceneQueries<'a> {
    /// Static geometry.
    pub collision: &'a CollisionWorld,
    /// Bounds settings.
    pub bounds: WorldBounds,
    /// Whether movement is paused.
    pub paused: bool,
}

impl HostWorld for SceneQueries<'_> {
    fn should_skip_update(&self, delta_time: f32) -> bool {
        self.paused || !delta_time.is_finite() || delta_time < 0.0
    }

    fn world_bounds(&self) -> WorldBounds {
        self.bounds
    }

    fn sweep_single(&self, query: &SweepQuery) -> Option<HitResult> {
        self.collision.sweep(query)
    }
}
