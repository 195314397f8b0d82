//! 2D geometry for wedge rasterization: points, rotation, triangles

/// A point in image-pixel space (origin top-left, x right, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Rotate `p` by `angle` radians around `pivot`
///
/// With y pointing down, a positive angle turns clockwise on screen.
#[inline]
pub fn rotate_around(p: Point2D, pivot: Point2D, angle: f32) -> Point2D {
    let (sin_a, cos_a) = angle.sin_cos();
    let dx = p.x - pivot.x;
    let dy = p.y - pivot.y;
    Point2D::new(
        cos_a * dx - sin_a * dy + pivot.x,
        sin_a * dx + cos_a * dy + pivot.y,
    )
}

/// Cross product of (b - a) and (p - a); its sign tells which side of `ab` the point is on
#[inline]
fn edge_function(a: Point2D, b: Point2D, p: Point2D) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Axis-aligned bounding box as (min_x, min_y, max_x, max_y)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

/// A triangle; for kaleidoscope wedges vertex 0 is the apex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point2D; 3],
}

impl Triangle {
    pub const fn new(a: Point2D, b: Point2D, c: Point2D) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    #[inline]
    pub fn apex(&self) -> Point2D {
        self.vertices[0]
    }

    /// Twice the signed area; positive when the vertices turn clockwise on screen
    #[inline]
    pub fn orientation(&self) -> f32 {
        let [a, b, c] = self.vertices;
        edge_function(a, b, c)
    }

    /// Boundary-inclusive point-in-triangle test
    ///
    /// Each edge function is multiplied by the triangle's own orientation, so
    /// the test works for either winding. Points exactly on an edge give zero
    /// and count as inside; a pixel on an edge shared by two wedges belongs to both.
    pub fn contains(&self, p: Point2D) -> bool {
        let [a, b, c] = self.vertices;
        let det = self.orientation();

        det * edge_function(a, b, p) >= 0.0
            && det * edge_function(b, c, p) >= 0.0
            && det * edge_function(c, a, p) >= 0.0
    }

    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds {
            min_x: f32::MAX,
            min_y: f32::MAX,
            max_x: f32::MIN,
            max_y: f32::MIN,
        };
        for v in &self.vertices {
            bounds.min_x = bounds.min_x.min(v.x);
            bounds.min_y = bounds.min_y.min(v.y);
            bounds.max_x = bounds.max_x.max(v.x);
            bounds.max_y = bounds.max_y.max(v.y);
        }
        bounds
    }
}
