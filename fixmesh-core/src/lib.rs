/// fixmesh Core Library - Fixed-point model geometry and projection
///
/// This library holds a rigid model in the client's integer local space,
/// orients it with a fixed-point trig table, projects its faces through a
/// host-supplied scene view and derives screen polygons, centroids and a
/// single center point from them.

pub mod error;
pub mod geometry;
pub mod polygon;
pub mod projection;
pub mod projector;
pub mod record;
pub mod transform;
pub mod trig;

// Re-export commonly used types
pub use error::{ModelError, Result};
pub use geometry::ModelGeometry;
pub use polygon::{Polygon, ScreenPoint};
pub use projection::{Camera, Canvas, SceneView, Viewport};
pub use record::MeshRecord;
pub use trig::TrigTable;
