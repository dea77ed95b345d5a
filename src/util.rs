/// A module of utility functions
use nalgebra_glm as glm;

/// Past this value of the rotation matrix's (0, 2) term the XYZ
/// decomposition is treated as gimbal locked
const GIMBAL_THRESHOLD: f32 = 0.999_999_9;

/// Builds a quaternion from intrinsic XYZ Euler angles in radians. This is
/// the default rotation order used by three.js and most DCC exports.
#[must_use]
pub fn quat_from_euler_xyz(x: f32, y: f32, z: f32) -> glm::Quat {
    let qx = glm::quat_angle_axis(x, &glm::vec3(1.0, 0.0, 0.0));
    let qy = glm::quat_angle_axis(y, &glm::vec3(0.0, 1.0, 0.0));
    let qz = glm::quat_angle_axis(z, &glm::vec3(0.0, 0.0, 1.0));
    qx * qy * qz
}

/// Decomposes a rotation into intrinsic XYZ Euler angles in radians. Near
/// gimbal lock the Z angle is folded into X and returned as 0.
#[must_use]
pub fn euler_xyz_from_quat(q: &glm::Quat) -> glm::Vec3 {
    let m = glm::quat_to_mat3(&glm::quat_normalize(q));
    let m13 = m[(0, 2)];
    let y = m13.clamp(-1.0, 1.0).asin();
    if m13.abs() < GIMBAL_THRESHOLD {
        glm::vec3(
            (-m[(1, 2)]).atan2(m[(2, 2)]),
            y,
            (-m[(0, 1)]).atan2(m[(0, 0)]),
        )
    } else {
        glm::vec3(m[(2, 1)].atan2(m[(1, 1)]), y, 0.0)
    }
}

/// Transforms a point by a matrix
#[cfg(test)]
#[must_use]
pub(crate) fn transform(
    position: &glm::Vec3,
    matrix: &glm::Mat4,
) -> glm::Vec3 {
    let v = matrix * glm::vec4(position.x, position.y, position.z, 1.0);
    glm::vec3(v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use nalgebra_glm as glm;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    #[test]
    fn euler_keeps_roll() {
        let q = super::quat_from_euler_xyz(0.3, -0.6, 1.1);
        let e = super::euler_xyz_from_quat(&q);
        let c = glm::equal_eps(&e, &glm::vec3(0.3, -0.6, 1.1), EPSILON);
        assert!(c.x && c.y && c.z);
    }

    #[test]
    fn euler_gimbal_lock() {
        let q = super::quat_from_euler_xyz(0.2, FRAC_PI_2, 0.0);
        let e = super::euler_xyz_from_quat(&q);
        assert!((e.y - FRAC_PI_2).abs() < 0.001);
        // Same rotation even though the angles may be redistributed
        let r = super::quat_from_euler_xyz(e.x, e.y, e.z);
        let v = glm::vec3(0.3, 0.5, 0.7);
        let c = glm::equal_eps(
            &glm::quat_rotate_vec3(&q, &v),
            &glm::quat_rotate_vec3(&r, &v),
            0.001,
        );
        assert!(c.x && c.y && c.z);
    }

    #[test]
    fn transform_point() {
        let m = glm::translate(
            &glm::Mat4::identity(), //
            &glm::vec3(1.0, 2.0, 3.0),
        );
        let p = super::transform(&glm::vec3(1.0, 1.0, 1.0), &m);
        let c = glm::equal_eps(&p, &glm::vec3(2.0, 3.0, 4.0), EPSILON);
        assert!(c.x && c.y && c.z);
    }
}
