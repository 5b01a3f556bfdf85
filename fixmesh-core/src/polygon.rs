/// Screen-space points and polygons produced by the projector

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    /// Reported by center-point queries when nothing is in view.
    pub const NONE: ScreenPoint = ScreenPoint { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Exact squared euclidean distance to `other`.
    pub fn distance_squared(&self, other: &ScreenPoint) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        dx * dx + dy * dy
    }
}

/// A closed screen-space polygon; the projector only ever emits triangles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polygon {
    pub points: Vec<ScreenPoint>,
}

impl Polygon {
    pub fn new(points: Vec<ScreenPoint>) -> Self {
        Self { points }
    }

    pub fn triangle(a: ScreenPoint, b: ScreenPoint, c: ScreenPoint) -> Self {
        Self::new(vec![a, b, c])
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Integer mean of the vertex coordinates, `None` for an empty polygon.
    ///
    /// Sums wrap at 32 bits and the division truncates toward zero.
    pub fn centroid(&self) -> Option<ScreenPoint> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as i32;
        let (sx, sy) = self.points.iter().fold((0i32, 0i32), |(sx, sy), p| {
            (sx.wrapping_add(p.x), sy.wrapping_add(p.y))
        });
        Some(ScreenPoint::new(sx / n, sy / n))
    }

    /// Edges as consecutive point pairs, closing back to the first point.
    pub fn edges(&self) -> impl Iterator<Item = (ScreenPoint, ScreenPoint)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}
