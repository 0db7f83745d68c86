//! Collider shape volume and inertia functions.

use std::f32::consts::PI;

use glam::Vec3;
use thiserror::Error;

use crate::ecs::components::physics::ColliderShape;

/// Reason a collider shape was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ShapeError {
    #[error("sphere radius must be finite and positive, got {0}")]
    SphereRadius(f32),
    #[error("box half extents must be finite and positive, got {0}")]
    BoxExtents(Vec3),
    #[error("capsule radius must be finite and positive, got {0}")]
    CapsuleRadius(f32),
    #[error("capsule height must be finite and non-negative, got {0}")]
    CapsuleHeight(f32),
}

#[inline]
fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

impl ColliderShape {
    /// Check that every dimension of the shape is usable for mass derivation.
    pub fn validate(&self) -> Result<(), ShapeError> {
        match *self {
            ColliderShape::Sphere { radius } => {
                if !positive(radius) {
                    return Err(ShapeError::SphereRadius(radius));
                }
            }
            ColliderShape::Box { half_extents } => {
                if !(positive(half_extents.x) && positive(half_extents.y) && positive(half_extents.z))
                {
                    return Err(ShapeError::BoxExtents(half_extents));
                }
            }
            ColliderShape::Capsule { radius, height } => {
                if !positive(radius) {
                    return Err(ShapeError::CapsuleRadius(radius));
                }
                if !(height.is_finite() && height >= 0.0) {
                    return Err(ShapeError::CapsuleHeight(height));
                }
            }
        }
        Ok(())
    }

    /// Apply a (possibly non-uniform) scale to the shape.
    ///
    /// Spheres cannot represent non-uniform scale, so the radius is scaled by
    /// the mean of the three factors. Capsules scale their radius by the mean
    /// of X and Y and their height by Y.
    pub fn scaled(&self, scale: Vec3) -> ColliderShape {
        match *self {
            ColliderShape::Sphere { radius } => ColliderShape::Sphere {
                radius: radius * (scale.x + scale.y + scale.z) / 3.0,
            },
            ColliderShape::Box { half_extents } => ColliderShape::Box {
                half_extents: half_extents * scale,
            },
            ColliderShape::Capsule { radius, height } => ColliderShape::Capsule {
                radius: radius * (scale.x + scale.y) / 2.0,
                height: height * scale.y,
            },
        }
    }

    /// Volume of the shape in its own frame.
    pub fn volume(&self) -> f32 {
        match *self {
            ColliderShape::Sphere { radius } => sphere_volume(radius),
            ColliderShape::Box { half_extents } => {
                let extents = half_extents * 2.0;
                extents.x * extents.y * extents.z
            }
            ColliderShape::Capsule { radius, height } => {
                PI * radius * radius * height + sphere_volume(radius)
            }
        }
    }

    /// Principal moments of inertia of a solid shape of the given mass,
    /// about its own centre and axes.
    pub fn inertia(&self, mass: f32) -> Vec3 {
        match *self {
            ColliderShape::Sphere { radius } => Vec3::splat(0.4 * mass * radius * radius),
            ColliderShape::Box { half_extents } => {
                let l2 = (half_extents * 2.0).powf(2.0);
                mass / 12.0 * Vec3::new(l2.y + l2.z, l2.x + l2.z, l2.x + l2.y)
            }
            ColliderShape::Capsule { radius, height } => capsule_inertia(radius, height, mass),
        }
    }
}

#[inline]
fn sphere_volume(radius: f32) -> f32 {
    4.0 / 3.0 * PI * radius * radius * radius
}

/// Cylinder plus two hemispherical caps, mass split by volume.
fn capsule_inertia(radius: f32, height: f32, mass: f32) -> Vec3 {
    let r2 = radius * radius;
    let cylinder_volume = PI * r2 * height;
    let caps_volume = sphere_volume(radius);
    let total = cylinder_volume + caps_volume;
    if total <= 0.0 {
        return Vec3::ZERO;
    }

    let m_cyl = mass * cylinder_volume / total;
    let m_caps = mass * caps_volume / total;

    let axial = m_cyl * r2 / 2.0 + m_caps * 2.0 * r2 / 5.0;
    let transverse = m_cyl * (height * height / 12.0 + r2 / 4.0)
        + m_caps * (2.0 * r2 / 5.0 + height * height / 4.0 + 3.0 * height * radius / 8.0);

    Vec3::new(transverse, axial, transverse)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_sphere_volume_and_inertia() {
        let shape = ColliderShape::Sphere { radius: 2.0 };
        assert!((shape.volume() - 4.0 / 3.0 * PI * 8.0).abs() < EPS);
        let inertia = shape.inertia(3.0);
        assert!((inertia - Vec3::splat(0.4 * 3.0 * 4.0)).length() < EPS);
    }

    #[test]
    fn test_box_volume_and_inertia() {
        let shape = ColliderShape::Box {
            half_extents: Vec3::new(0.5, 1.0, 1.5),
        };
        // Full extents 1 x 2 x 3
        assert!((shape.volume() - 6.0).abs() < EPS);

        let inertia = shape.inertia(12.0);
        assert!((inertia.x - (4.0 + 9.0)).abs() < EPS);
        assert!((inertia.y - (1.0 + 9.0)).abs() < EPS);
        assert!((inertia.z - (1.0 + 4.0)).abs() < EPS);
    }

    #[test]
    fn test_capsule_without_cylinder_is_sphere() {
        let capsule = ColliderShape::Capsule {
            radius: 0.75,
            height: 0.0,
        };
        let sphere = ColliderShape::Sphere { radius: 0.75 };
        assert!((capsule.volume() - sphere.volume()).abs() < EPS);
        assert!((capsule.inertia(2.0) - sphere.inertia(2.0)).length() < EPS);
    }

    #[test]
    fn test_capsule_is_longer_than_wide() {
        let inertia = ColliderShape::Capsule {
            radius: 0.5,
            height: 2.0,
        }
        .inertia(1.0);
        assert!(inertia.x > inertia.y);
        assert_eq!(inertia.x, inertia.z);
    }

    #[test]
    fn test_sphere_scale_is_averaged() {
        let shape = ColliderShape::Sphere { radius: 1.0 }.scaled(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(shape, ColliderShape::Sphere { radius: 2.0 });
    }

    #[test]
    fn test_box_scale_is_per_axis() {
        let shape = ColliderShape::Box {
            half_extents: Vec3::ONE,
        }
        .scaled(Vec3::new(1.0, 2.0, 3.0));
        assert!((shape.volume() - 2.0 * 4.0 * 6.0).abs() < EPS);
    }

    #[test]
    fn test_capsule_scale() {
        let shape = ColliderShape::Capsule {
            radius: 1.0,
            height: 2.0,
        }
        .scaled(Vec3::new(2.0, 4.0, 100.0));
        assert_eq!(
            shape,
            ColliderShape::Capsule {
                radius: 3.0,
                height: 8.0
            }
        );
    }

    #[test]
    fn test_validate() {
        assert!(ColliderShape::Sphere { radius: 1.0 }.validate().is_ok());
        assert_eq!(
            ColliderShape::Sphere { radius: 0.0 }.validate(),
            Err(ShapeError::SphereRadius(0.0))
        );
        assert!(ColliderShape::Box {
            half_extents: Vec3::new(1.0, -1.0, 1.0)
        }
        .validate()
        .is_err());
        assert!(ColliderShape::Capsule {
            radius: 0.5,
            height: f32::NAN
        }
        .validate()
        .is_err());
        assert!(ColliderShape::Capsule {
            radius: 0.5,
            height: 0.0
        }
        .validate()
        .is_ok());
    }
}
