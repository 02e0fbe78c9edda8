use bevy::prelude::*;

/// Ray against an oriented box: transform the ray into box-local space and
/// run the slab test against the centred AABB.
pub fn ray_hits_obb(origin: Vec3, dir: Vec3, xf: GlobalTransform, size: Vec3) -> Option<f32> {
    let inv = xf.compute_matrix().inverse();
    let local_origin = inv.transform_point3(origin);
    let local_dir = inv.transform_vector3(dir);
    let half = size * 0.5;
    ray_aabb_hit_t(local_origin, local_dir, -half, half)
}

// Slab-method ray-AABB intersection, returns the entry distance or None.
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = Vec3::new(
        if ray_direction.x != 0.0 { 1.0 / ray_direction.x } else { f32::INFINITY },
        if ray_direction.y != 0.0 { 1.0 / ray_direction.y } else { f32::INFINITY },
        if ray_direction.z != 0.0 { 1.0 / ray_direction.z } else { f32::INFINITY },
    );

    let (mut tmin, mut tmax) = ((min.x - ray_origin.x) * inv.x, (max.x - ray_origin.x) * inv.x);
    if tmin > tmax {
        std::mem::swap(&mut tmin, &mut tmax);
    }

    let (mut tymin, mut tymax) = ((min.y - ray_origin.y) * inv.y, (max.y - ray_origin.y) * inv.y);
    if tymin > tymax {
        std::mem::swap(&mut tymin, &mut tymax);
    }

    if (tmin > tymax) || (tymin > tmax) {
        return None;
    }
    if tymin > tmin {
        tmin = tymin;
    }
    if tymax < tmax {
        tmax = tymax;
    }

    let (mut tzmin, mut tzmax) = ((min.z - ray_origin.z) * inv.z, (max.z - ray_origin.z) * inv.z);
    if tzmin > tzmax {
        std::mem::swap(&mut tzmin, &mut tzmax);
    }

    if (tmin > tzmax) || (tzmin > tmax) {
        return None;
    }
    if tzmin > tmin {
        tmin = tzmin;
    }
    if tzmax < tmax {
        tmax = tzmax;
    }

    if tmax < 0.0 {
        return None;
    }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_unit_box_head_on() {
        let t = ray_aabb_hit_t(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::splat(-0.5),
            Vec3::splat(0.5),
        );
        assert!((t.unwrap() - 4.5).abs() < 1e-5);
    }

    #[test]
    fn ray_misses_offset_box() {
        let t = ray_aabb_hit_t(
            Vec3::new(3.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::splat(-0.5),
            Vec3::splat(0.5),
        );
        assert!(t.is_none());
    }

    #[test]
    fn obb_test_respects_the_box_transform() {
        let xf = GlobalTransform::from(Transform::from_xyz(0.0, 0.0, -2.0));
        let hit = ray_hits_obb(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            xf,
            Vec3::splat(1.0),
        );
        assert!((hit.unwrap() - 1.5).abs() < 1e-5);

        let rotated = GlobalTransform::from(
            Transform::from_xyz(0.0, 0.0, -2.0)
                .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_4)),
        );
        // A thin plate edge-on to the ray still intersects through its middle.
        assert!(
            ray_hits_obb(
                Vec3::ZERO,
                Vec3::new(0.0, 0.0, -1.0),
                rotated,
                Vec3::new(1.0, 1.0, 0.01),
            )
            .is_some()
        );
    }
}
