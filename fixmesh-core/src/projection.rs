/// Scene/view capability consumed by the projector, and a reference camera
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

use crate::polygon::{Polygon, ScreenPoint};

/// Host-supplied conversion from entity-local 3D offsets to the screen.
///
/// The projector only ever talks to the scene through this trait, so a game
/// client, a test fake or [`Camera`] can stand behind it.
pub trait SceneView {
    /// Whether the client is in the wide ("resizable") layout.
    fn resizable(&self) -> bool;

    /// Project a local offset (`x`, `y` on the ground plane, `z` height).
    fn world_to_screen(&self, x: i32, y: i32, z: i32, resizable: bool) -> ScreenPoint;

    /// Visibility test against the viewport of the given layout.
    fn in_viewport_mode(&self, point: ScreenPoint, resizable: bool) -> bool;

    /// Visibility test against the current layout's viewport.
    fn in_viewport(&self, point: ScreenPoint) -> bool {
        self.in_viewport_mode(point, self.resizable())
    }
}

/// Anything polygons can be stroked onto.
pub trait Canvas {
    fn stroke_polygon(&mut self, polygon: &Polygon);
}

/// Axis-aligned on-screen rectangle, half-open on the far edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x + self.width
            && point.y < self.y + self.height
    }
}

/// Perspective camera over a canvas of `width` x `height` cells.
///
/// The fixed layout renders into an inset viewport, the resizable layout
/// uses the whole canvas.
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, -600.0, 400.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 0.0, 1.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            near: 1.0,
            far: 10_000.0,
            width,
            height,
            resizable: false,
        }
    }

    /// Place the camera `distance` units from the target, looking down at it.
    pub fn with_distance(mut self, distance: i32) -> Self {
        let d = distance as f32;
        self.position = Point3::new(0.0, -d, d * 2.0 / 3.0);
        self
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect(), self.fov, self.near, self.far)
    }

    pub fn viewport(&self, resizable: bool) -> Viewport {
        let (w, h) = (self.width as i32, self.height as i32);
        if resizable {
            Viewport::new(0, 0, w, h)
        } else {
            let (ix, iy) = (w / 8, h / 8);
            Viewport::new(ix, iy, w - 2 * ix, h - 2 * iy)
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl SceneView for Camera {
    fn resizable(&self) -> bool {
        self.resizable
    }

    fn world_to_screen(&self, x: i32, y: i32, z: i32, resizable: bool) -> ScreenPoint {
        let clip = self.projection_matrix()
            * self.view_matrix()
            * Vector4::new(x as f32, y as f32, z as f32, 1.0);

        // Behind the eye or degenerate (NaN included): never on screen
        if clip.w.is_nan() || clip.w < 1e-6 || !clip.x.is_finite() || !clip.y.is_finite() {
            return ScreenPoint::NONE;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let viewport = self.viewport(resizable);
        let screen_x = viewport.x as f32 + (ndc_x + 1.0) * 0.5 * viewport.width as f32;
        let screen_y = viewport.y as f32 + (1.0 - ndc_y) * 0.5 * viewport.height as f32;

        ScreenPoint::new(screen_x.floor() as i32, screen_y.floor() as i32)
    }

    fn in_viewport_mode(&self, point: ScreenPoint, resizable: bool) -> bool {
        self.viewport(resizable).contains(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_contains() {
        let vp = Viewport::new(10, 10, 20, 20);
        assert!(vp.contains(ScreenPoint::new(10, 10)));
        assert!(vp.contains(ScreenPoint::new(29, 29)));
        assert!(!vp.contains(ScreenPoint::new(30, 15)));
        assert!(!vp.contains(ScreenPoint::NONE));
    }

    #[test]
    fn test_fixed_viewport_is_inset() {
        let camera = Camera::new(80, 24);
        assert_eq!(camera.viewport(true), Viewport::new(0, 0, 80, 24));
        assert_eq!(camera.viewport(false), Viewport::new(10, 3, 60, 18));
    }

    #[test]
    fn test_target_projects_to_viewport_center() {
        let camera = Camera::new(80, 24);
        let p = camera.world_to_screen(0, 0, 0, true);
        assert!((p.x - 40).abs() <= 1, "{:?}", p);
        assert!((p.y - 12).abs() <= 1, "{:?}", p);
        assert!(camera.in_viewport(camera.world_to_screen(0, 0, 0, false)));
    }

    #[test]
    fn test_point_behind_camera_is_off_screen() {
        let camera = Camera::new(80, 24);
        let p = camera.world_to_screen(0, -5000, 0, true);
        assert!(!camera.in_viewport_mode(p, true));
    }

    #[test]
    fn test_degenerate_camera_is_off_screen() {
        // eye on the target gives a NaN view matrix
        let mut camera = Camera::new(80, 24).with_distance(0);
        camera.resizable = true;
        let p = camera.world_to_screen(500, -900, 30, true);
        assert_eq!(p, ScreenPoint::NONE);
        assert!(!camera.in_viewport(p));
    }

    #[test]
    fn test_in_viewport_follows_layout() {
        let mut camera = Camera::new(80, 24);
        let corner = ScreenPoint::new(1, 1);
        assert!(!camera.in_viewport(corner));
        camera.resizable = true;
        assert!(camera.in_viewport(corner));
    }
}
