/// Error types shared by the geometry store, projector and record reader
use thiserror::Error;

/// Result type alias using [`ModelError`].
pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Vertex coordinate arrays disagree on the vertex count.
    #[error("vertex arrays have mismatched lengths (x: {x}, y: {y}, z: {z})")]
    MismatchedVertices { x: usize, y: usize, z: usize },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index} but the model has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    /// Face index arrays disagree on the face count.
    #[error("face index arrays are ragged (x: {x}, y: {y}, z: {z})")]
    RaggedGeometry { x: usize, y: usize, z: usize },

    /// An injected trig table does not cover a full turn.
    #[error("trig table must hold 2048 sine and cosine entries (got {sin} and {cos})")]
    InvalidTrigTable { sin: usize, cos: usize },

    /// The plain-text mesh record could not be read.
    #[error("failed to parse mesh record: {0}")]
    Parse(String),
}
