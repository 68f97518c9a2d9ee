//! Collision query records shared between the integrator and its host.
//!
//! These types describe what a host reports back from sweeps and moves. They
//! carry no behaviour beyond small conveniences so any physics backend can
//! fill them in.

use glam::{Quat, Vec3};

use crate::PENETRATION_PULLBACK;

/// Identifies a pawn so queries can ignore the pawn's own geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PawnId(pub u64);

impl From<u64> for PawnId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Object channel a primitive sweeps and responds on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollisionChannel {
    /// Static level geometry.
    WorldStatic,
    /// Moving props.
    WorldDynamic,
    /// Characters and other pawns.
    #[default]
    Pawn,
    /// Project-specific channel.
    Custom(u8),
}

/// Primitive shape swept by collision queries.
///
/// Capsules are aligned with world Z and their `half_height` includes the
/// hemispherical caps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionShape {
    /// Sphere of the given radius.
    Sphere {
        /// Sphere radius.
        radius: f32,
    },
    /// Upright capsule.
    Capsule {
        /// Radius of the cylinder and caps.
        radius: f32,
        /// Distance from the centre to the tip of a cap.
        half_height: f32,
    },
    /// Axis-aligned box.
    Box {
        /// Half the box size on each axis.
        half_extents: Vec3,
    },
}

impl CollisionShape {
    /// Distance from the shape's centre to its furthest point along `direction`.
    ///
    /// `direction` is expected to be a unit vector.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use pawn_movement::CollisionShape;
    /// let capsule = CollisionShape::Capsule { radius: 30.0, half_height: 90.0 };
    /// assert_eq!(capsule.support_distance(Vec3::Z), 90.0);
    /// assert_eq!(capsule.support_distance(Vec3::X), 30.0);
    /// ```
    #[must_use]
    pub fn support_distance(&self, direction: Vec3) -> f32 {
        match *self {
            Self::Sphere { radius } => radius,
            Self::Capsule {
                radius,
                half_height,
            } => radius + (half_height - radius).max(0.0) * direction.z.abs(),
            Self::Box { half_extents } => direction.abs().dot(half_extents),
        }
    }
}

/// Outcome of a sweep or a swept move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    /// Whether the sweep struck a solid surface.
    pub blocking_hit: bool,
    /// Whether the shape already overlapped the surface at the start.
    pub start_penetrating: bool,
    /// Fraction of the requested motion completed before the hit, in `[0, 1]`.
    pub time: f32,
    /// Distance travelled before the hit.
    pub distance: f32,
    /// Where the shape's centre ended up.
    pub location: Vec3,
    /// Unit normal of the surface that was hit.
    pub normal: Vec3,
    /// Overlap depth when `start_penetrating` is set.
    pub penetration_depth: f32,
}

impl Default for HitResult {
    fn default() -> Self {
        Self::no_hit(Vec3::ZERO)
    }
}

impl HitResult {
    /// A result for a motion that completed without touching anything.
    #[must_use]
    pub const fn no_hit(location: Vec3) -> Self {
        Self {
            blocking_hit: false,
            start_penetrating: false,
            time: 1.0,
            distance: 0.0,
            location,
            normal: Vec3::ZERO,
            penetration_depth: 0.0,
        }
    }

    /// A blocking hit part-way through a motion.
    #[must_use]
    pub const fn blocking(time: f32, distance: f32, location: Vec3, normal: Vec3) -> Self {
        Self {
            blocking_hit: true,
            start_penetrating: false,
            time,
            distance,
            location,
            normal,
            penetration_depth: 0.0,
        }
    }

    /// A hit that began inside a surface.
    #[must_use]
    pub const fn penetrating(location: Vec3, normal: Vec3, depth: f32) -> Self {
        Self {
            blocking_hit: true,
            start_penetrating: true,
            time: 0.0,
            distance: 0.0,
            location,
            normal,
            penetration_depth: depth,
        }
    }

    /// A blocking hit that did not start inside the surface.
    #[must_use]
    pub const fn is_valid_blocking_hit(&self) -> bool {
        self.blocking_hit && !self.start_penetrating
    }

    /// Offset that moves a start-penetrating shape clear of the surface.
    ///
    /// Zero for hits that did not start penetrating.
    #[must_use]
    pub fn penetration_adjustment(&self) -> Vec3 {
        if !self.start_penetrating {
            return Vec3::ZERO;
        }
        self.normal * (self.penetration_depth + PENETRATION_PULLBACK)
    }
}

/// Parameters for a single shape sweep against the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepQuery {
    /// Centre of the shape at the start of the sweep.
    pub start: Vec3,
    /// Centre of the shape at the end of the sweep.
    pub end: Vec3,
    /// Orientation of the shape.
    pub rotation: Quat,
    /// Channel the sweep runs on.
    pub channel: CollisionChannel,
    /// Swept shape.
    pub shape: CollisionShape,
    /// Pawn whose own geometry is ignored.
    pub ignored: Option<PawnId>,
}
