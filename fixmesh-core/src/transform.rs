/// Pure fixed-point pose transforms over the XZ plane
///
/// Every function here derives a new pose from a canonical one; nothing keeps
/// state between calls. Arithmetic wraps at 32 bits and the final shift is
/// arithmetic, so results match the client's integer math bit for bit.
use crate::trig::{TrigTable, ANGLE_MASK};

/// Normalize an entity orientation into the angle unit used for projection.
///
/// Entity orientations are 14-bit and face the opposite way to the model's
/// rest pose, hence the half-turn offset.
pub fn normalize_orientation(orientation: i32) -> i32 {
    ((orientation & 0x3FFF) + 1024) % 2048
}

/// Rotate canonical X/Z into `out_x`/`out_z` around the vertical axis.
///
/// Angle unit 0 is the identity and copies the canonical arrays untouched.
pub fn orient(
    table: &TrigTable,
    angle: i32,
    canonical_x: &[i32],
    canonical_z: &[i32],
    out_x: &mut [i32],
    out_z: &mut [i32],
) {
    if angle & ANGLE_MASK == 0 {
        out_x.copy_from_slice(canonical_x);
        out_z.copy_from_slice(canonical_z);
        return;
    }

    let sin = table.sin(angle);
    let cos = table.cos(angle);
    for i in 0..canonical_x.len() {
        let (x, z) = (canonical_x[i], canonical_z[i]);
        out_x[i] = x.wrapping_mul(cos).wrapping_add(z.wrapping_mul(sin)) >> 16;
        out_z[i] = z.wrapping_mul(cos).wrapping_sub(x.wrapping_mul(sin)) >> 16;
    }
}

/// Apply `turns` quarter turns in place: `(x, z) -> (z, -x)` per turn.
pub fn quarter_turns(xs: &mut [i32], zs: &mut [i32], turns: u32) {
    for _ in 0..turns % 4 {
        for (x, z) in xs.iter_mut().zip(zs.iter_mut()) {
            let old_x = *x;
            *x = *z;
            *z = old_x.wrapping_neg();
        }
    }
}

/// Reflect across the Z axis: `out_z = -canonical_z`.
pub fn mirror_z(canonical_z: &[i32], out_z: &mut [i32]) {
    for (out, z) in out_z.iter_mut().zip(canonical_z) {
        *out = z.wrapping_neg();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trig::ANGLE_UNITS;

    #[test]
    fn test_normalize_orientation() {
        assert_eq!(normalize_orientation(0), 1024);
        assert_eq!(normalize_orientation(1024), 0);
        assert_eq!(normalize_orientation(3072), 0);
        assert_eq!(normalize_orientation(0x4000 + 5), 1029);
        assert_eq!(normalize_orientation(-1), 1023);
    }

    #[test]
    fn test_orient_zero_is_identity() {
        let table = TrigTable::new();
        let (cx, cz) = (vec![40_000, -3, 7], vec![-40_000, 11, 0]);
        let (mut x, mut z) = (vec![0; 3], vec![0; 3]);
        orient(&table, 2048, &cx, &cz, &mut x, &mut z);
        assert_eq!((x, z), (cx, cz));
    }

    #[test]
    fn test_orient_quarter_turn() {
        let table = TrigTable::new();
        let (mut x, mut z) = (vec![0; 2], vec![0; 2]);
        orient(&table, 512, &[10, 0], &[0, 10], &mut x, &mut z);
        assert_eq!(x, vec![0, 10]);
        assert_eq!(z, vec![-10, 0]);
    }

    #[test]
    fn test_orient_truncates_toward_negative_infinity() {
        // sin = cos = 0.5 in 16.16
        let table =
            TrigTable::from_columns(vec![32768; ANGLE_UNITS], vec![32768; ANGLE_UNITS]).unwrap();
        let (mut x, mut z) = (vec![0; 1], vec![0; 1]);
        orient(&table, 1, &[1], &[0], &mut x, &mut z);
        // x: 32768 >> 16 = 0, z: -32768 >> 16 = -1
        assert_eq!((x[0], z[0]), (0, -1));
    }

    #[test]
    fn test_orient_wraps_on_overflow() {
        let table = TrigTable::new();
        let (mut x, mut z) = (vec![0; 1], vec![0; 1]);
        orient(&table, 1024, &[40_000], &[0], &mut x, &mut z);
        let expected = 40_000i32.wrapping_mul(-65536) >> 16;
        assert_eq!(x[0], expected);
    }

    #[test]
    fn test_quarter_turns_cycle() {
        let (mut xs, mut zs) = (vec![1, -5, 9], vec![2, 6, -8]);
        quarter_turns(&mut xs, &mut zs, 1);
        assert_eq!((xs.clone(), zs.clone()), (vec![2, 6, -8], vec![-1, 5, -9]));
        quarter_turns(&mut xs, &mut zs, 3);
        assert_eq!((xs, zs), (vec![1, -5, 9], vec![2, 6, -8]));
    }

    #[test]
    fn test_mirror_z() {
        let mut out = vec![0; 3];
        mirror_z(&[3, -4, 0], &mut out);
        assert_eq!(out, vec![-3, 4, 0]);
    }
}
