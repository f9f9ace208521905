// Returns the current time in milliseconds
pub fn timestamp() -> f64 {
    let timespec = time::get_time();
    timespec.sec as f64 * 1000.0 + (timespec.nsec as f64 * 1e-6)
}

// All 4x4 matrices are column major: element (row r, column c) lives at m[c * 4 + r].

// Multiply 4x4 matrices, out = a * b
pub fn multiply_matrix(a: &[f32; 16], b: &[f32; 16], out: &mut [f32; 16]) {
    let mut tmp = [0f32; 16];

    tmp[0] = b[0] * a[0] + b[1] * a[4] + b[2] * a[8] + b[3] * a[12];
    tmp[1] = b[0] * a[1] + b[1] * a[5] + b[2] * a[9] + b[3] * a[13];
    tmp[2] = b[0] * a[2] + b[1] * a[6] + b[2] * a[10] + b[3] * a[14];
    tmp[3] = b[0] * a[3] + b[1] * a[7] + b[2] * a[11] + b[3] * a[15];

    tmp[4] = b[4] * a[0] + b[5] * a[4] + b[6] * a[8] + b[7] * a[12];
    tmp[5] = b[4] * a[1] + b[5] * a[5] + b[6] * a[9] + b[7] * a[13];
    tmp[6] = b[4] * a[2] + b[5] * a[6] + b[6] * a[10] + b[7] * a[14];
    tmp[7] = b[4] * a[3] + b[5] * a[7] + b[6] * a[11] + b[7] * a[15];

    tmp[8] = b[8] * a[0] + b[9] * a[4] + b[10] * a[8] + b[11] * a[12];
    tmp[9] = b[8] * a[1] + b[9] * a[5] + b[10] * a[9] + b[11] * a[13];
    tmp[10] = b[8] * a[2] + b[9] * a[6] + b[10] * a[10] + b[11] * a[14];
    tmp[11] = b[8] * a[3] + b[9] * a[7] + b[10] * a[11] + b[11] * a[15];

    tmp[12] = b[12] * a[0] + b[13] * a[4] + b[14] * a[8] + b[15] * a[12];
    tmp[13] = b[12] * a[1] + b[13] * a[5] + b[14] * a[9] + b[15] * a[13];
    tmp[14] = b[12] * a[2] + b[13] * a[6] + b[14] * a[10] + b[15] * a[14];
    tmp[15] = b[12] * a[3] + b[13] * a[7] + b[14] * a[11] + b[15] * a[15];

    *out = tmp;
}

// Convenience wrapper returning a * b by value
pub fn multiplied(a: &[f32; 16], b: &[f32; 16]) -> [f32; 16] {
    let mut out = [0f32; 16];
    multiply_matrix(a, b, &mut out);
    out
}

// Returns false when the matrix is singular, `out` then holds the adjoint
pub fn inverse_matrix(m: &[f32; 16], out: &mut [f32; 16]) -> bool {
    adjoint_matrix(m, out);

    let det = determinant4x4(m);
    if det == 0f32 {
        return false;
    }

    for value in out.iter_mut() {
        *value /= det;
    }
    true
}

// Inverse by value. Singular matrices fall back to identity.
pub fn inverted(m: &[f32; 16]) -> [f32; 16] {
    let mut out = [0f32; 16];
    if inverse_matrix(m, &mut out) {
        out
    } else {
        identity_matrix!()
    }
}

pub fn adjoint_matrix(m: &[f32; 16], out: &mut [f32; 16]) {
    let mut tmp = [0f32; 16];

    tmp[0]  =   determinant3x3(m[5], m[9], m[13], m[6], m[10], m[14], m[7], m[11], m[15]);
    tmp[4]  = - determinant3x3(m[4], m[8], m[12], m[6], m[10], m[14], m[7], m[11], m[15]);
    tmp[8]  =   determinant3x3(m[4], m[8], m[12], m[5], m[9], m[13], m[7], m[11], m[15]);
    tmp[12] = - determinant3x3(m[4], m[8], m[12], m[5], m[9], m[13], m[6], m[10], m[14]);

    tmp[1]  = - determinant3x3(m[1], m[9], m[13], m[2], m[10], m[14], m[3], m[11], m[15]);
    tmp[5]  =   determinant3x3(m[0], m[8], m[12], m[2], m[10], m[14], m[3], m[11], m[15]);
    tmp[9]  = - determinant3x3(m[0], m[8], m[12], m[1], m[9], m[13], m[3], m[11], m[15]);
    tmp[13] =   determinant3x3(m[0], m[8], m[12], m[1], m[9], m[13], m[2], m[10], m[14]);

    tmp[2]  =   determinant3x3(m[1], m[5], m[13], m[2], m[6], m[14], m[3], m[7], m[15]);
    tmp[6]  = - determinant3x3(m[0], m[4], m[12], m[2], m[6], m[14], m[3], m[7], m[15]);
    tmp[10] =   determinant3x3(m[0], m[4], m[12], m[1], m[5], m[13], m[3], m[7], m[15]);
    tmp[14] = - determinant3x3(m[0], m[4], m[12], m[1], m[5], m[13], m[2], m[6], m[14]);

    tmp[3]  = - determinant3x3(m[1], m[5], m[9], m[2], m[6], m[10], m[3], m[7], m[11]);
    tmp[7]  =   determinant3x3(m[0], m[4], m[8], m[2], m[6], m[10], m[3], m[7], m[11]);
    tmp[11] = - determinant3x3(m[0], m[4], m[8], m[1], m[5], m[9], m[3], m[7], m[11]);
    tmp[15] =   determinant3x3(m[0], m[4], m[8], m[1], m[5], m[9], m[2], m[6], m[10]);

    *out = tmp;
}

pub fn determinant4x4(m: &[f32; 16]) -> f32 {
    m[0] * determinant3x3(m[5], m[9], m[13], m[6], m[10], m[14], m[7], m[11], m[15])
    - m[1] * determinant3x3(m[4], m[8], m[12], m[6], m[10], m[14], m[7], m[11], m[15])
    + m[2] * determinant3x3(m[4], m[8], m[12], m[5], m[9], m[13], m[7], m[11], m[15])
    - m[3] * determinant3x3(m[4], m[8], m[12], m[5], m[9], m[13], m[6], m[10], m[14])
}

fn determinant3x3(a1: f32, a2: f32, a3: f32, b1: f32, b2: f32, b3: f32, c1: f32, c2: f32, c3: f32) -> f32 {
    a1 * determinant2x2(b2, b3, c2, c3)
    - b1 * determinant2x2(a2, a3, c2, c3)
    + c1 * determinant2x2(a2, a3, b2, b3)
}

#[inline]
fn determinant2x2(a: f32, b: f32, c: f32, d: f32) -> f32 {
    a * d - b * c
}

pub fn transpose_matrix(m: &[f32; 16]) -> [f32; 16] {
    let mut out = [0f32; 16];
    for c in 0..4 {
        for r in 0..4 {
            out[r * 4 + c] = m[c * 4 + r];
        }
    }
    out
}

// Runtimes hand out poses as row major 3x4 matrices (rotation | translation)
#[inline]
pub fn matrix34_to_array(m: &[[f32; 4]; 3]) -> [f32; 16] {
    [m[0][0], m[1][0], m[2][0], 0.0,
     m[0][1], m[1][1], m[2][1], 0.0,
     m[0][2], m[1][2], m[2][2], 0.0,
     m[0][3], m[1][3], m[2][3], 1.0]
}

#[inline]
pub fn array_to_matrix34(m: &[f32; 16]) -> [[f32; 4]; 3] {
    [[m[0], m[4], m[8], m[12]],
     [m[1], m[5], m[9], m[13]],
     [m[2], m[6], m[10], m[14]]]
}

#[inline]
pub fn matrix_position(m: &[f32; 16]) -> [f32; 3] {
    [m[12], m[13], m[14]]
}

#[inline]
pub fn set_matrix_position(m: &mut [f32; 16], position: [f32; 3]) {
    m[12] = position[0];
    m[13] = position[1];
    m[14] = position[2];
}

// Column `index` of the upper 3x3 block
#[inline]
pub fn matrix_column(m: &[f32; 16], index: usize) -> [f32; 3] {
    [m[index * 4], m[index * 4 + 1], m[index * 4 + 2]]
}

// m * (v, 1)
pub fn transform_point(m: &[f32; 16], v: [f32; 3]) -> [f32; 3] {
    [m[0] * v[0] + m[4] * v[1] + m[8] * v[2] + m[12],
     m[1] * v[0] + m[5] * v[1] + m[9] * v[2] + m[13],
     m[2] * v[0] + m[6] * v[1] + m[10] * v[2] + m[14]]
}

// m * (v, 0), the translation column is ignored
pub fn transform_direction(m: &[f32; 16], v: [f32; 3]) -> [f32; 3] {
    [m[0] * v[0] + m[4] * v[1] + m[8] * v[2],
     m[1] * v[0] + m[5] * v[1] + m[9] * v[2],
     m[2] * v[0] + m[6] * v[1] + m[10] * v[2]]
}

pub fn transform_vector4(m: &[f32; 16], v: [f32; 4]) -> [f32; 4] {
    let mut out = [0f32; 4];
    for (r, value) in out.iter_mut().enumerate() {
        *value = m[r] * v[0] + m[4 + r] * v[1] + m[8 + r] * v[2] + m[12 + r] * v[3];
    }
    out
}

pub fn normalize(v: [f32; 3]) -> [f32; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length == 0.0 {
        return v;
    }
    [v[0] / length, v[1] / length, v[2] / length]
}

// Adapted from http://www.euclideanspace.com/maths/geometry/rotations/conversions/matrixToQuaternion/index.htm
// Returns [x, y, z, w]
#[inline]
pub fn matrix_to_quat(m: &[f32; 16]) -> [f32; 4] {
    let (m00, m11, m22) = (m[0], m[5], m[10]);
    let w = f32::max(0.0, 1.0 + m00 + m11 + m22).sqrt() * 0.5;
    let mut x = f32::max(0.0, 1.0 + m00 - m11 - m22).sqrt() * 0.5;
    let mut y = f32::max(0.0, 1.0 - m00 + m11 - m22).sqrt() * 0.5;
    let mut z = f32::max(0.0, 1.0 - m00 - m11 + m22).sqrt() * 0.5;

    // m21 - m12, m02 - m20, m10 - m01
    x = x.copysign(m[6] - m[9]);
    y = y.copysign(m[8] - m[2]);
    z = z.copysign(m[1] - m[4]);

    [x, y, z, w]
}

// Rotation-only matrix for a unit quaternion [x, y, z, w]
pub fn quat_to_matrix(q: &[f32; 4]) -> [f32; 16] {
    let (x, y, z, w) = (q[0], q[1], q[2], q[3]);
    let (xx, yy, zz) = (x * x, y * y, z * z);
    let (xy, xz, yz) = (x * y, x * z, y * z);
    let (xw, yw, zw) = (x * w, y * w, z * w);

    [1.0 - 2.0 * (yy + zz), 2.0 * (xy + zw), 2.0 * (xz - yw), 0.0,
     2.0 * (xy - zw), 1.0 - 2.0 * (xx + zz), 2.0 * (yz + xw), 0.0,
     2.0 * (xz + yw), 2.0 * (yz - xw), 1.0 - 2.0 * (xx + yy), 0.0,
     0.0, 0.0, 0.0, 1.0]
}

#[cfg(test)]
pub(crate) fn assert_close(a: &[f32], b: &[f32], epsilon: f32) {
    assert_eq!(a.len(), b.len());
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        assert!((x - y).abs() <= epsilon, "element {}: {} != {} ({:?} vs {:?})", i, x, y, a, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotation_x(angle: f32) -> [f32; 16] {
        let (s, c) = angle.sin_cos();
        [1.0, 0.0, 0.0, 0.0,
         0.0, c, s, 0.0,
         0.0, -s, c, 0.0,
         0.0, 0.0, 0.0, 1.0]
    }

    fn rotation_y(angle: f32) -> [f32; 16] {
        let (s, c) = angle.sin_cos();
        [c, 0.0, -s, 0.0,
         0.0, 1.0, 0.0, 0.0,
         s, 0.0, c, 0.0,
         0.0, 0.0, 0.0, 1.0]
    }

    fn rotation_z(angle: f32) -> [f32; 16] {
        let (s, c) = angle.sin_cos();
        [c, s, 0.0, 0.0,
         -s, c, 0.0, 0.0,
         0.0, 0.0, 1.0, 0.0,
         0.0, 0.0, 0.0, 1.0]
    }

    #[test]
    fn multiply_by_identity() {
        let m = rotation_y(0.4);
        let identity: [f32; 16] = identity_matrix!();
        assert_close(&multiplied(&m, &identity), &m, 1e-6);
        assert_close(&multiplied(&identity, &m), &m, 1e-6);
    }

    #[test]
    fn multiply_applies_right_operand_first() {
        let mut translate: [f32; 16] = identity_matrix!();
        set_matrix_position(&mut translate, [1.0, 0.0, 0.0]);
        let rotate = rotation_z(std::f32::consts::FRAC_PI_2);

        // rotate * translate moves first, then rotates +x onto +y
        let m = multiplied(&rotate, &translate);
        assert_close(&transform_point(&m, [0.0, 0.0, 0.0]), &[0.0, 1.0, 0.0], 1e-6);
    }

    #[test]
    fn inverse_of_rigid_transform() {
        let mut m = multiplied(&rotation_y(0.7), &rotation_x(-0.3));
        set_matrix_position(&mut m, [0.5, 1.6, -2.0]);

        let mut inv = [0f32; 16];
        assert!(inverse_matrix(&m, &mut inv));
        let identity: [f32; 16] = identity_matrix!();
        assert_close(&multiplied(&m, &inv), &identity, 1e-5);
        assert_close(&multiplied(&inv, &m), &identity, 1e-5);
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let m = [0f32; 16];
        let mut out = [0f32; 16];
        assert!(!inverse_matrix(&m, &mut out));
        let identity: [f32; 16] = identity_matrix!();
        assert_eq!(inverted(&m), identity);
    }

    #[test]
    fn matrix34_layout() {
        let pose = [[1.0, 2.0, 3.0, 10.0],
                    [4.0, 5.0, 6.0, 11.0],
                    [7.0, 8.0, 9.0, 12.0]];
        let m = matrix34_to_array(&pose);
        assert_eq!(matrix_position(&m), [10.0, 11.0, 12.0]);
        assert_eq!(matrix_column(&m, 0), [1.0, 4.0, 7.0]);
        assert_eq!(array_to_matrix34(&m), pose);
    }

    #[test]
    fn quaternion_extraction_roundtrips_rotations() {
        let angles = [-1.2f32, -0.3, 0.0, 0.25, 0.9];
        for &a in angles.iter() {
            for &b in angles.iter() {
                let r = multiplied(&multiplied(&rotation_y(a), &rotation_x(b)), &rotation_z(a * 0.5 - b));
                let q = matrix_to_quat(&r);
                let length = (q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3]).sqrt();
                assert!((length - 1.0).abs() < 1e-4, "non unit quaternion {:?}", q);
                assert_close(&quat_to_matrix(&q), &r, 1e-3);
            }
        }
    }

    #[test]
    fn quaternion_extraction_recovers_source_quaternion() {
        let axes = [[1.0f32, 0.0, 0.0], [0.0, -1.0, 0.0], [0.3, 0.5, -0.8], [-0.6, 0.1, 0.4]];
        let angles = [0.2f32, 1.0, 2.1, -1.4];
        for axis in axes.iter() {
            let axis = normalize(*axis);
            for &angle in angles.iter() {
                let (s, c) = (angle * 0.5).sin_cos();
                let mut q = [axis[0] * s, axis[1] * s, axis[2] * s, c];
                if q[3] < 0.0 {
                    q = [-q[0], -q[1], -q[2], -q[3]];
                }
                let r = quat_to_matrix(&q);
                assert_close(&matrix_to_quat(&r), &q, 1e-3);
            }
        }
    }

    #[test]
    fn quaternion_of_identity() {
        let identity: [f32; 16] = identity_matrix!();
        assert_close(&matrix_to_quat(&identity), &[0.0, 0.0, 0.0, 1.0], 1e-6);
    }

    #[test]
    fn quaternion_extraction_survives_rounding_noise() {
        // Diagonal slightly outside the valid range must not produce NaN
        let mut r = rotation_x(std::f32::consts::PI);
        r[0] = 1.000_001;
        r[5] = -1.000_001;
        r[10] = -1.000_001;
        let q = matrix_to_quat(&r);
        assert!(q.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn transform_direction_ignores_translation() {
        let mut m = rotation_z(std::f32::consts::FRAC_PI_2);
        set_matrix_position(&mut m, [5.0, 5.0, 5.0]);
        assert_close(&transform_direction(&m, [1.0, 0.0, 0.0]), &[0.0, 1.0, 0.0], 1e-6);
        assert_close(&transform_point(&m, [1.0, 0.0, 0.0]), &[5.0, 6.0, 5.0], 1e-6);
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let mut m: [f32; 16] = identity_matrix!();
        set_matrix_position(&mut m, [1.0, 2.0, 3.0]);
        let t = transpose_matrix(&m);
        assert_eq!([t[3], t[7], t[11]], [1.0, 2.0, 3.0]);
        assert_eq!(transpose_matrix(&t), m);
    }

    #[test]
    fn normalize_keeps_zero_vector() {
        assert_eq!(normalize([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
        assert_close(&normalize([3.0, 0.0, 4.0]), &[0.6, 0.0, 0.8], 1e-6);
    }
}
