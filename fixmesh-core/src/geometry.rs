/// Fixed-point model geometry: canonical pose, working pose and face indices
use std::sync::Arc;

use nalgebra::Vector3;
use tracing::{debug, warn};

use crate::error::{ModelError, Result};
use crate::record::MeshRecord;
use crate::transform;
use crate::trig::TrigTable;

/// A rigid model held in the client's integer local space.
///
/// The canonical arrays are the rest pose; the working arrays are what gets
/// projected and are always re-derived from the canonical ones. Y is height
/// and never rotates, so it has no canonical copy.
///
/// Orientation, mirroring and rotation mutate the working pose in place, so
/// an instance must not be shared across threads without a lock.
#[derive(Debug, Clone)]
pub struct ModelGeometry {
    vertices_x: Vec<i32>,
    vertices_y: Vec<i32>,
    vertices_z: Vec<i32>,
    indices_x: Vec<u32>,
    indices_y: Vec<u32>,
    indices_z: Vec<u32>,

    original_vertices_x: Vec<i32>,
    original_vertices_z: Vec<i32>,
    original_indices_x: Vec<u32>,
    original_indices_z: Vec<u32>,

    trig: Arc<TrigTable>,
}

impl ModelGeometry {
    /// Take ownership of decoded arrays.
    ///
    /// Vertex arrays must agree in length and every face index must address
    /// an existing vertex. Index arrays of unequal length are accepted here
    /// and reported as [`ModelError::RaggedGeometry`] by the queries.
    pub fn new(
        vertices_x: Vec<i32>,
        vertices_y: Vec<i32>,
        vertices_z: Vec<i32>,
        indices_x: Vec<u32>,
        indices_y: Vec<u32>,
        indices_z: Vec<u32>,
    ) -> Result<Self> {
        let vertex_count = vertices_x.len();
        if vertices_y.len() != vertex_count || vertices_z.len() != vertex_count {
            return Err(ModelError::MismatchedVertices {
                x: vertex_count,
                y: vertices_y.len(),
                z: vertices_z.len(),
            });
        }

        for indices in [&indices_x, &indices_y, &indices_z] {
            if let Some(face) = indices.iter().position(|&i| i as usize >= vertex_count) {
                return Err(ModelError::IndexOutOfRange {
                    face,
                    index: indices[face],
                    vertex_count,
                });
            }
        }

        if indices_y.len() != indices_x.len() || indices_z.len() != indices_x.len() {
            warn!(
                x = indices_x.len(),
                y = indices_y.len(),
                z = indices_z.len(),
                "model constructed with ragged face indices"
            );
        }

        debug!(
            vertices = vertex_count,
            faces = indices_x.len(),
            "model geometry constructed"
        );

        Ok(Self {
            original_vertices_x: vertices_x.clone(),
            original_vertices_z: vertices_z.clone(),
            original_indices_x: indices_x.clone(),
            original_indices_z: indices_z.clone(),
            vertices_x,
            vertices_y,
            vertices_z,
            indices_x,
            indices_y,
            indices_z,
            trig: TrigTable::shared(),
        })
    }

    /// Copy the arrays out of a decoded record; the record stays untouched.
    pub fn from_record(record: &MeshRecord) -> Result<Self> {
        Self::new(
            record.vertices_x.clone(),
            record.vertices_y.clone(),
            record.vertices_z.clone(),
            record.indices_x.clone(),
            record.indices_y.clone(),
            record.indices_z.clone(),
        )
    }

    /// Replace the process-wide trig table, e.g. with fixed test values.
    pub fn with_trig_table(mut self, trig: Arc<TrigTable>) -> Self {
        self.trig = trig;
        self
    }

    pub fn vertices_x(&self) -> &[i32] {
        &self.vertices_x
    }

    pub fn vertices_y(&self) -> &[i32] {
        &self.vertices_y
    }

    pub fn vertices_z(&self) -> &[i32] {
        &self.vertices_z
    }

    pub fn indices_x(&self) -> &[u32] {
        &self.indices_x
    }

    pub fn indices_y(&self) -> &[u32] {
        &self.indices_y
    }

    pub fn indices_z(&self) -> &[u32] {
        &self.indices_z
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices_x.len()
    }

    pub fn face_count(&self) -> usize {
        self.indices_x.len()
    }

    /// Rotate the working pose to `angle` units from the canonical pose.
    pub fn set_orientation(&mut self, angle: i32) {
        transform::orient(
            &self.trig,
            angle,
            &self.original_vertices_x,
            &self.original_vertices_z,
            &mut self.vertices_x,
            &mut self.vertices_z,
        );
    }

    /// Working vertex indices of every face, or an error if the index arrays
    /// disagree on the face count.
    pub(crate) fn faces(&self) -> Result<Vec<[usize; 3]>> {
        let (x, y, z) = (
            self.indices_x.len(),
            self.indices_y.len(),
            self.indices_z.len(),
        );
        if x != y || x != z {
            debug!(x, y, z, "ragged face indices, no geometry produced");
            return Err(ModelError::RaggedGeometry { x, y, z });
        }

        Ok((0..x)
            .map(|i| {
                [
                    self.indices_x[i] as usize,
                    self.indices_y[i] as usize,
                    self.indices_z[i] as usize,
                ]
            })
            .collect())
    }

    /// Per face, the working coordinates of its three corners grouped by
    /// channel: `[xs, ys, zs]`.
    pub fn vectors(&self) -> Result<Vec<[Vector3<i32>; 3]>> {
        let faces = self.faces()?;
        let (vx, vy, vz) = (&self.vertices_x, &self.vertices_y, &self.vertices_z);
        Ok(faces
            .into_iter()
            .map(|[a, b, c]| {
                [
                    Vector3::new(vx[a], vx[b], vx[c]),
                    Vector3::new(vy[a], vy[b], vy[c]),
                    Vector3::new(vz[a], vz[b], vz[c]),
                ]
            })
            .collect())
    }

    /// Reflect the canonical pose across the Z axis into the working pose.
    ///
    /// Working Z becomes the negated canonical Z and the X/Z index roles are
    /// swapped, reversing the winding. Always starts from the canonical
    /// arrays, so calling it twice is the same as calling it once.
    pub fn mirror_model(&mut self) {
        transform::mirror_z(&self.original_vertices_z, &mut self.vertices_z);

        let faces = self.original_indices_x.len().min(self.original_indices_z.len());
        for i in 0..faces.min(self.indices_x.len()).min(self.indices_z.len()) {
            self.indices_x[i] = self.original_indices_z[i];
            self.indices_z[i] = self.original_indices_x[i];
        }
    }

    /// Permanently turn the rest pose by `turns` quarter turns, then reset
    /// the working pose to it.
    pub fn rotate(&mut self, turns: u32) {
        transform::quarter_turns(
            &mut self.original_vertices_x,
            &mut self.original_vertices_z,
            turns,
        );
        self.vertices_x.copy_from_slice(&self.original_vertices_x);
        self.vertices_z.copy_from_slice(&self.original_vertices_z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trig::ANGLE_UNITS;

    fn square() -> ModelGeometry {
        ModelGeometry::new(
            vec![10, -10, -10, 10],
            vec![0, 0, -20, -20],
            vec![10, 10, -10, -10],
            vec![0, 0],
            vec![1, 2],
            vec![2, 3],
        )
        .unwrap()
    }

    #[test]
    fn test_mismatched_vertices_fail_fast() {
        let err = ModelGeometry::new(vec![0, 1], vec![0], vec![0, 1], vec![], vec![], vec![])
            .unwrap_err();
        assert_eq!(err, ModelError::MismatchedVertices { x: 2, y: 1, z: 2 });
    }

    #[test]
    fn test_out_of_range_index_fails_fast() {
        let err = ModelGeometry::new(vec![0; 3], vec![0; 3], vec![0; 3], vec![0], vec![1], vec![3])
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::IndexOutOfRange {
                face: 0,
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_ragged_indices_are_accepted_then_reported() {
        let model = ModelGeometry::new(
            vec![0; 3],
            vec![0; 3],
            vec![0; 3],
            vec![0, 1, 2],
            vec![1, 2, 0],
            vec![2, 0],
        )
        .unwrap();
        assert_eq!(
            model.vectors().unwrap_err(),
            ModelError::RaggedGeometry { x: 3, y: 3, z: 2 }
        );
    }

    #[test]
    fn test_from_record_copies() {
        let record = MeshRecord::cube(5);
        let mut model = ModelGeometry::from_record(&record).unwrap();
        model.rotate(1);
        assert_eq!(record, MeshRecord::cube(5));
        assert_eq!(model.face_count(), 12);
        assert_eq!(model.vertex_count(), 8);
    }

    #[test]
    fn test_orientation_zero_restores_canonical() {
        let mut model = square();
        let (x0, z0) = (model.vertices_x().to_vec(), model.vertices_z().to_vec());
        model.set_orientation(300);
        assert_ne!(model.vertices_x(), &x0[..]);
        model.set_orientation(0);
        assert_eq!(model.vertices_x(), &x0[..]);
        assert_eq!(model.vertices_z(), &z0[..]);
    }

    #[test]
    fn test_orientation_does_not_drift() {
        let mut model = square();
        model.set_orientation(700);
        let (x1, z1) = (model.vertices_x().to_vec(), model.vertices_z().to_vec());
        model.set_orientation(123);
        model.set_orientation(700);
        model.set_orientation(700);
        assert_eq!(model.vertices_x(), &x1[..]);
        assert_eq!(model.vertices_z(), &z1[..]);
    }

    #[test]
    fn test_orientation_never_touches_height() {
        let mut model = square();
        model.set_orientation(1000);
        assert_eq!(model.vertices_y(), &[0, 0, -20, -20]);
    }

    #[test]
    fn test_injected_table_is_used() {
        // Every angle behaves like a half turn
        let table =
            TrigTable::from_columns(vec![0; ANGLE_UNITS], vec![-65536; ANGLE_UNITS]).unwrap();
        let mut model = square().with_trig_table(Arc::new(table));
        model.set_orientation(5);
        assert_eq!(model.vertices_x(), &[-10, 10, 10, -10]);
        assert_eq!(model.vertices_z(), &[-10, -10, 10, 10]);
    }

    #[test]
    fn test_vectors_group_by_channel() {
        let model = square();
        let vectors = model.vectors().unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[1][0], Vector3::new(10, -10, 10));
        assert_eq!(vectors[1][1], Vector3::new(0, -20, -20));
        assert_eq!(vectors[1][2], Vector3::new(10, -10, -10));
    }

    #[test]
    fn test_mirror_reflects_canonical() {
        let mut model = square();
        model.mirror_model();
        assert_eq!(model.vertices_z(), &[-10, -10, 10, 10]);
        assert_eq!(model.indices_x(), &[2, 3]);
        assert_eq!(model.indices_z(), &[0, 0]);
        assert_eq!(model.indices_y(), &[1, 2]);
        assert_eq!(model.vertices_y(), &[0, 0, -20, -20]);
    }

    #[test]
    fn test_mirror_twice_is_mirror_once() {
        let mut once = square();
        once.mirror_model();
        let mut twice = square();
        twice.mirror_model();
        twice.mirror_model();
        assert_eq!(once.vertices_z(), twice.vertices_z());
        assert_eq!(once.indices_x(), twice.indices_x());
        assert_eq!(once.indices_z(), twice.indices_z());
    }

    #[test]
    fn test_rotate_changes_rest_pose() {
        let mut model = square();
        model.rotate(1);
        assert_eq!(model.vertices_x(), &[10, 10, -10, -10]);
        assert_eq!(model.vertices_z(), &[-10, 10, 10, -10]);
        // orientation 0 now resets to the rotated rest pose
        model.set_orientation(400);
        model.set_orientation(0);
        assert_eq!(model.vertices_x(), &[10, 10, -10, -10]);
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let mut model = square();
        for _ in 0..4 {
            model.rotate(1);
        }
        assert_eq!(model.vertices_x(), &[10, -10, -10, 10]);
        assert_eq!(model.vertices_z(), &[10, 10, -10, -10]);
    }
}
