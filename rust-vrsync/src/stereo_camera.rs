use rust_vrsync_api::utils;
use rust_vrsync_api::vr_coordinate_transform::{self as coords, APP_TO_NATIVE};
use rust_vrsync_api::{VREye, VRService, VRStereoFrame};

/// Per-eye camera matrices captured from the runtime at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VRStereoCamera {
    left_projection: [f32; 16],
    right_projection: [f32; 16],
    // inverse(eye to head)
    left_head_to_eye: [f32; 16],
    right_head_to_eye: [f32; 16],
}

impl VRStereoCamera {
    pub fn new(service: &dyn VRService, near: f32, far: f32) -> VRStereoCamera {
        VRStereoCamera::from_matrices(service.projection_matrix(VREye::Left, near, far),
                                      service.projection_matrix(VREye::Right, near, far),
                                      service.eye_to_head_transform(VREye::Left),
                                      service.eye_to_head_transform(VREye::Right))
    }

    pub fn from_matrices(left_projection: [f32; 16],
                         right_projection: [f32; 16],
                         left_eye_to_head: [f32; 16],
                         right_eye_to_head: [f32; 16])
                         -> VRStereoCamera {
        VRStereoCamera {
            left_projection,
            right_projection,
            left_head_to_eye: utils::inverted(&left_eye_to_head),
            right_head_to_eye: utils::inverted(&right_eye_to_head),
        }
    }

    pub fn projection(&self, eye: VREye) -> [f32; 16] {
        match eye {
            VREye::Left => self.left_projection,
            VREye::Right => self.right_projection,
        }
    }

    // `hmd_transform` is the native HMD transform, offset included. Callers
    // pass the last known transform when the HMD is not tracked.
    pub fn derive(&self, hmd_transform: &[f32; 16]) -> VRStereoFrame {
        let world_to_head = utils::inverted(hmd_transform);
        let (left_view, left_camera_position) = eye_view(&self.left_head_to_eye, &world_to_head);
        let (right_view, right_camera_position) = eye_view(&self.right_head_to_eye, &world_to_head);

        VRStereoFrame {
            timestamp: utils::timestamp(),
            left_projection_matrix: self.left_projection,
            right_projection_matrix: self.right_projection,
            left_view_matrix: left_view,
            right_view_matrix: right_view,
            left_camera_position,
            right_camera_position,
        }
    }
}

fn eye_view(head_to_eye: &[f32; 16], world_to_head: &[f32; 16]) -> ([f32; 16], [f32; 3]) {
    let view = utils::multiplied(head_to_eye, world_to_head);
    let camera_to_world = utils::inverted(&view);
    let camera_position = coords::point_to_app(utils::matrix_position(&camera_to_world));

    // The renderer feeds application space vertices straight into the view
    let view = utils::multiplied(&view, &APP_TO_NATIVE);
    (utils::transpose_matrix(&view), camera_position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translation(position: [f32; 3]) -> [f32; 16] {
        let mut m: [f32; 16] = identity_matrix!();
        utils::set_matrix_position(&mut m, position);
        m
    }

    fn assert_close(a: &[f32], b: &[f32]) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-5, "{:?} != {:?}", a, b);
        }
    }

    fn camera() -> VRStereoCamera {
        let mut left_projection: [f32; 16] = identity_matrix!();
        left_projection[0] = 0.75;
        let mut right_projection: [f32; 16] = identity_matrix!();
        right_projection[0] = 0.76;
        VRStereoCamera::from_matrices(left_projection,
                                      right_projection,
                                      translation([-0.032, 0.0, 0.015]),
                                      translation([0.032, 0.0, 0.015]))
    }

    #[test]
    fn identity_hmd_view() {
        let camera = camera();
        let frame = camera.derive(&identity_matrix!());

        let expected = utils::transpose_matrix(&utils::multiplied(&translation([0.032, 0.0, -0.015]), &APP_TO_NATIVE));
        assert_close(&frame.left_view_matrix, &expected);
        assert_eq!(frame.left_projection_matrix, camera.projection(VREye::Left));
        assert_eq!(frame.right_projection_matrix[0], 0.76);

        // native (-0.032, 0, 0.015) in application space
        assert_close(&frame.left_camera_position, &[-0.015, 0.032, 0.0]);
        assert_close(&frame.right_camera_position, &[-0.015, -0.032, 0.0]);
    }

    #[test]
    fn camera_follows_hmd() {
        let frame = camera().derive(&translation([1.0, 1.5, -2.0]));
        // native (0.968, 1.5, -1.985)
        assert_close(&frame.left_camera_position, &[1.985, -0.968, 1.5]);
        assert_close(&frame.right_camera_position, &[1.985, -1.032, 1.5]);
    }

    #[test]
    fn view_maps_application_points_into_eye_space() {
        let frame = camera().derive(&translation([0.0, 1.6, 0.0]));
        let view = utils::transpose_matrix(&frame.left_view_matrix);
        // The left eye itself lands on the eye space origin
        let eye = utils::transform_point(&view, frame.left_camera_position);
        assert_close(&eye, &[0.0, 0.0, 0.0]);
    }
}
