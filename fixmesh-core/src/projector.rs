/// Projection of model geometry onto the screen, and the queries built on it
use tracing::trace;

use crate::error::Result;
use crate::geometry::ModelGeometry;
use crate::polygon::{Polygon, ScreenPoint};
use crate::projection::{Canvas, SceneView};
use crate::transform;

impl ModelGeometry {
    /// Screen-space triangles of every face fully inside the viewport, in face
    /// order.
    ///
    /// `local_x`/`local_y` is the entity's local position and `orientation`
    /// its raw orientation in any range. A face with any corner outside the
    /// viewport is dropped whole, never clipped. Ragged index arrays fail the
    /// whole call.
    pub fn polygons<V: SceneView + ?Sized>(
        &mut self,
        view: &V,
        local_x: i32,
        local_y: i32,
        orientation: i32,
    ) -> Result<Vec<Polygon>> {
        let angle = transform::normalize_orientation(orientation);
        self.set_orientation(0);
        if angle != 0 {
            self.set_orientation(angle);
        }

        let faces = self.faces()?;
        let resizable = view.resizable();
        let (vx, vy, vz) = (self.vertices_x(), self.vertices_y(), self.vertices_z());
        let project = |v: usize| {
            view.world_to_screen(
                local_x.wrapping_sub(vx[v]),
                local_y.wrapping_sub(vz[v]),
                vy[v].wrapping_neg(),
                resizable,
            )
        };

        let mut polygons = Vec::with_capacity(faces.len());
        for [a, b, c] in faces.iter().copied() {
            let (pa, pb, pc) = (project(a), project(b), project(c));
            if view.in_viewport_mode(pa, resizable)
                && view.in_viewport_mode(pb, resizable)
                && view.in_viewport_mode(pc, resizable)
            {
                polygons.push(Polygon::triangle(pa, pb, pc));
            }
        }

        trace!(
            faces = faces.len(),
            visible = polygons.len(),
            angle,
            "projected model"
        );
        Ok(polygons)
    }

    /// Centroid of every visible polygon.
    pub fn points<V: SceneView + ?Sized>(
        &mut self,
        view: &V,
        local_x: i32,
        local_y: i32,
        orientation: i32,
    ) -> Result<Vec<ScreenPoint>> {
        Ok(self
            .polygons(view, local_x, local_y, orientation)?
            .iter()
            .filter_map(Polygon::centroid)
            .collect())
    }

    /// The in-viewport centroid closest to the mean of all centroids.
    ///
    /// Returns [`ScreenPoint::NONE`] when no centroid is in the viewport.
    /// Among equally close centroids the first in face order wins.
    pub fn center_point<V: SceneView + ?Sized>(
        &mut self,
        view: &V,
        local_x: i32,
        local_y: i32,
        orientation: i32,
    ) -> Result<ScreenPoint> {
        let points = self.points(view, local_x, local_y, orientation)?;
        if points.is_empty() {
            return Ok(ScreenPoint::NONE);
        }

        let n = points.len() as i32;
        let (sx, sy) = points.iter().fold((0i32, 0i32), |(sx, sy), p| {
            (sx.wrapping_add(p.x), sy.wrapping_add(p.y))
        });
        let central = ScreenPoint::new(sx / n, sy / n);

        // min_by_key keeps the first of equal keys
        Ok(points
            .into_iter()
            .filter(|p| view.in_viewport(*p))
            .min_by_key(|p| p.distance_squared(&central))
            .unwrap_or(ScreenPoint::NONE))
    }

    /// Stroke every visible polygon onto `canvas`, returning how many were
    /// drawn.
    pub fn draw<V: SceneView + ?Sized, C: Canvas + ?Sized>(
        &mut self,
        view: &V,
        canvas: &mut C,
        local_x: i32,
        local_y: i32,
        orientation: i32,
    ) -> Result<usize> {
        let polygons = self.polygons(view, local_x, local_y, orientation)?;
        for polygon in &polygons {
            canvas.stroke_polygon(polygon);
        }
        Ok(polygons.len())
    }
}
