//! Fixed change of basis between the runtime's tracking space and the
//! application space.
//!
//! Native tracking space is +x right, +y up, +z backward (meters).
//! Application space is +x forward, +y left, +z up, so
//! `app = (-native.z, -native.x, native.y)`.
//!
//! Every position, orientation and direction handed to the application goes
//! through exactly one of these functions.

use crate::utils;

/// Column major native -> application matrix.
pub const NATIVE_TO_APP: [f32; 16] = [0.0, -1.0, 0.0, 0.0,
                                      0.0, 0.0, 1.0, 0.0,
                                      -1.0, 0.0, 0.0, 0.0,
                                      0.0, 0.0, 0.0, 1.0];

/// Column major application -> native matrix, the inverse of `NATIVE_TO_APP`.
pub const APP_TO_NATIVE: [f32; 16] = [0.0, 0.0, -1.0, 0.0,
                                      -1.0, 0.0, 0.0, 0.0,
                                      0.0, 1.0, 0.0, 0.0,
                                      0.0, 0.0, 0.0, 1.0];

#[inline]
pub fn to_app(v: [f32; 4]) -> [f32; 4] {
    utils::transform_vector4(&NATIVE_TO_APP, v)
}

#[inline]
pub fn to_native(v: [f32; 4]) -> [f32; 4] {
    utils::transform_vector4(&APP_TO_NATIVE, v)
}

#[inline]
pub fn point_to_app(p: [f32; 3]) -> [f32; 3] {
    utils::transform_point(&NATIVE_TO_APP, p)
}

#[inline]
pub fn point_to_native(p: [f32; 3]) -> [f32; 3] {
    utils::transform_point(&APP_TO_NATIVE, p)
}

#[inline]
pub fn direction_to_app(d: [f32; 3]) -> [f32; 3] {
    utils::transform_direction(&NATIVE_TO_APP, d)
}

#[inline]
pub fn direction_to_native(d: [f32; 3]) -> [f32; 3] {
    utils::transform_direction(&APP_TO_NATIVE, d)
}

/// Re-expresses an `[x, y, z, w]` orientation in application axes.
///
/// The basis change is a proper rotation, so mapping the vector part and
/// keeping `w` yields the same rotation seen from the other frame.
#[inline]
pub fn orientation_to_app(q: [f32; 4]) -> [f32; 4] {
    let v = direction_to_app([q[0], q[1], q[2]]);
    [v[0], v[1], v[2], q[3]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{self, assert_close};

    #[test]
    fn matrices_are_inverse() {
        let identity: [f32; 16] = identity_matrix!();
        assert_close(&utils::multiplied(&NATIVE_TO_APP, &APP_TO_NATIVE), &identity, 1e-6);
        assert_close(&utils::multiplied(&APP_TO_NATIVE, &NATIVE_TO_APP), &identity, 1e-6);
    }

    #[test]
    fn roundtrip_homogeneous_vectors() {
        let samples = [[0.0, 0.0, 0.0, 1.0],
                       [1.0, -2.0, 3.5, 1.0],
                       [-0.25, 1.75, 0.001, 0.0],
                       [100.0, 0.5, -42.0, 1.0]];
        for v in samples.iter() {
            assert_close(&to_app(to_native(*v)), v, 1e-5);
            assert_close(&to_native(to_app(*v)), v, 1e-5);
        }
    }

    #[test]
    fn axis_mapping() {
        // native forward (-z) is application +x, native up is application +z
        assert_close(&point_to_app([0.0, 0.0, -1.0]), &[1.0, 0.0, 0.0], 1e-6);
        assert_close(&point_to_app([0.0, 1.0, 0.0]), &[0.0, 0.0, 1.0], 1e-6);
        assert_close(&point_to_app([-1.0, 0.0, 0.0]), &[0.0, 1.0, 0.0], 1e-6);
        assert_close(&point_to_native([1.0, 0.0, 0.0]), &[0.0, 0.0, -1.0], 1e-6);
    }

    #[test]
    fn directions_match_points_without_translation() {
        let d = [0.3, -0.4, 0.5];
        assert_close(&direction_to_app(d), &point_to_app(d), 1e-6);
        assert_close(&direction_to_native(direction_to_app(d)), &d, 1e-6);
    }

    #[test]
    fn orientation_is_the_same_rotation_in_app_space() {
        // 90 degrees about native +y (up) is 90 degrees about application +z (up)
        let half = std::f32::consts::FRAC_PI_4;
        let q = [0.0, half.sin(), 0.0, half.cos()];
        assert_close(&orientation_to_app(q), &[0.0, 0.0, half.sin(), half.cos()], 1e-6);

        // R_app == NATIVE_TO_APP * R_native * APP_TO_NATIVE
        let r_native = utils::quat_to_matrix(&[0.2, -0.3, 0.1, 0.927]);
        let expected = utils::multiplied(&utils::multiplied(&NATIVE_TO_APP, &r_native), &APP_TO_NATIVE);
        let r_app = utils::quat_to_matrix(&orientation_to_app([0.2, -0.3, 0.1, 0.927]));
        assert_close(&r_app, &expected, 1e-5);
    }
}
