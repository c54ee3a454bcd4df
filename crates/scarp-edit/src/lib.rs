//! Brush stencils: state mutation plus boundary-crossing recomputation.
#![forbid(unsafe_code)]

use scarp_geom::Vec2;
use scarp_voxel::{NO_CROSSING, Voxel};

/// Brush footprint shape. Square fills its whole bounding box; Circle fills
/// by squared distance and places crossings on the circle itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StencilShape {
    Square,
    Circle,
}

/// A brush: shape, world-space center, radius, and the material state it
/// writes. Besides mutating states, the stencil knows how to (re)derive the
/// boundary crossings along its own silhouette, which is what keeps sharp
/// features faithful to the brush that carved them.
#[derive(Clone, Copy, Debug)]
pub struct Stencil {
    pub shape: StencilShape,
    pub center: Vec2,
    pub radius: f32,
    pub fill: i32,
}

impl Stencil {
    pub fn square(center: Vec2, radius: f32, fill: i32) -> Self {
        Self {
            shape: StencilShape::Square,
            center,
            radius,
            fill,
        }
    }

    pub fn circle(center: Vec2, radius: f32, fill: i32) -> Self {
        Self {
            shape: StencilShape::Circle,
            center,
            radius,
            fill,
        }
    }

    /// Re-centers the stencil, e.g. into another tile's local space.
    pub fn with_center(mut self, center: Vec2) -> Self {
        self.center = center;
        self
    }

    #[inline]
    pub fn x_start(&self) -> f32 {
        self.center.x - self.radius
    }

    #[inline]
    pub fn x_end(&self) -> f32 {
        self.center.x + self.radius
    }

    #[inline]
    pub fn y_start(&self) -> f32 {
        self.center.y - self.radius
    }

    #[inline]
    pub fn y_end(&self) -> f32 {
        self.center.y + self.radius
    }

    /// Overwrites the voxel's state when its position is covered.
    pub fn apply_to(&self, voxel: &mut Voxel) {
        let p = voxel.position;
        match self.shape {
            StencilShape::Square => {
                if p.x >= self.x_start()
                    && p.x <= self.x_end()
                    && p.y >= self.y_start()
                    && p.y <= self.y_end()
                {
                    voxel.state = self.fill;
                }
            }
            StencilShape::Circle => {
                let d = p - self.center;
                if d.dot(d) <= self.radius * self.radius {
                    voxel.state = self.fill;
                }
            }
        }
    }

    /// Refreshes the crossing record on the edge from `x_min` toward its +X
    /// neighbor `x_max`. Equal states always clear the crossing; differing
    /// states near the stencil silhouette get a crossing on it.
    pub fn set_horizontal_crossing(&self, x_min: &mut Voxel, x_max: &Voxel) {
        if x_min.state != x_max.state {
            self.find_horizontal_crossing(x_min, x_max);
        } else {
            x_min.x_edge = NO_CROSSING;
        }
    }

    /// Vertical counterpart of `set_horizontal_crossing`.
    pub fn set_vertical_crossing(&self, y_min: &mut Voxel, y_max: &Voxel) {
        if y_min.state != y_max.state {
            self.find_vertical_crossing(y_min, y_max);
        } else {
            y_min.y_edge = NO_CROSSING;
        }
    }

    fn find_horizontal_crossing(&self, x_min: &mut Voxel, x_max: &Voxel) {
        match self.shape {
            StencilShape::Square => self.find_horizontal_crossing_square(x_min, x_max),
            StencilShape::Circle => self.find_horizontal_crossing_circle(x_min, x_max),
        }
    }

    fn find_vertical_crossing(&self, y_min: &mut Voxel, y_max: &Voxel) {
        match self.shape {
            StencilShape::Square => self.find_vertical_crossing_square(y_min, y_max),
            StencilShape::Circle => self.find_vertical_crossing_circle(y_min, y_max),
        }
    }

    fn find_horizontal_crossing_square(&self, x_min: &mut Voxel, x_max: &Voxel) {
        if x_min.position.y < self.y_start() || x_min.position.y > self.y_end() {
            return;
        }

        if x_min.state == self.fill {
            if x_min.position.x <= self.x_end() && x_max.position.x >= self.x_end() {
                if x_min.x_edge <= NO_CROSSING || x_min.x_edge < self.x_end() {
                    x_min.x_edge = self.x_end();
                    x_min.x_normal = Vec2::new(if self.fill > x_max.state { 1.0 } else { -1.0 }, 0.0);
                } else {
                    validate_horizontal_normal(x_min, x_max);
                }
            }
        } else if x_max.state == self.fill
            && x_min.position.x <= self.x_start()
            && x_max.position.x >= self.x_start()
        {
            if x_min.x_edge <= NO_CROSSING || x_min.x_edge > self.x_start() {
                x_min.x_edge = self.x_start();
                x_min.x_normal = Vec2::new(if self.fill > x_min.state { -1.0 } else { 1.0 }, 0.0);
            } else {
                validate_horizontal_normal(x_min, x_max);
            }
        }
    }

    fn find_vertical_crossing_square(&self, y_min: &mut Voxel, y_max: &Voxel) {
        if y_min.position.x < self.x_start() || y_min.position.x > self.x_end() {
            return;
        }

        if y_min.state == self.fill {
            if y_min.position.y <= self.y_end() && y_max.position.y >= self.y_end() {
                if y_min.y_edge <= NO_CROSSING || y_min.y_edge < self.y_end() {
                    y_min.y_edge = self.y_end();
                    y_min.y_normal = Vec2::new(0.0, if self.fill > y_max.state { 1.0 } else { -1.0 });
                } else {
                    validate_vertical_normal(y_min, y_max);
                }
            }
        } else if y_max.state == self.fill
            && y_min.position.y <= self.y_start()
            && y_max.position.y >= self.y_start()
        {
            if y_min.y_edge <= NO_CROSSING || y_min.y_edge > self.y_start() {
                y_min.y_edge = self.y_start();
                y_min.y_normal = Vec2::new(0.0, if self.fill > y_min.state { -1.0 } else { 1.0 });
            } else {
                validate_vertical_normal(y_min, y_max);
            }
        }
    }

    fn find_horizontal_crossing_circle(&self, x_min: &mut Voxel, x_max: &Voxel) {
        let dy = x_min.position.y - self.center.y;
        let y2 = dy * dy;
        let sqr_radius = self.radius * self.radius;

        if x_min.state == self.fill {
            let dx = x_min.position.x - self.center.x;
            if dx * dx + y2 <= sqr_radius {
                let x = self.center.x + (sqr_radius - y2).sqrt();
                if x <= x_max.position.x {
                    if x_min.x_edge <= NO_CROSSING || x_min.x_edge < x {
                        x_min.x_edge = x;
                        x_min.x_normal =
                            self.radial_normal(Vec2::new(x, x_min.position.y), x_max.state);
                    } else {
                        validate_horizontal_normal(x_min, x_max);
                    }
                }
            }
        } else if x_max.state == self.fill {
            let dx = x_max.position.x - self.center.x;
            if dx * dx + y2 <= sqr_radius {
                let x = self.center.x - (sqr_radius - y2).sqrt();
                if x >= x_min.position.x {
                    if x_min.x_edge <= NO_CROSSING || x_min.x_edge > x {
                        x_min.x_edge = x;
                        x_min.x_normal =
                            self.radial_normal(Vec2::new(x, x_min.position.y), x_min.state);
                    } else {
                        validate_horizontal_normal(x_min, x_max);
                    }
                }
            }
        }
    }

    fn find_vertical_crossing_circle(&self, y_min: &mut Voxel, y_max: &Voxel) {
        let dx = y_min.position.x - self.center.x;
        let x2 = dx * dx;
        let sqr_radius = self.radius * self.radius;

        if y_min.state == self.fill {
            let dy = y_min.position.y - self.center.y;
            if dy * dy + x2 <= sqr_radius {
                let y = self.center.y + (sqr_radius - x2).sqrt();
                if y <= y_max.position.y {
                    if y_min.y_edge <= NO_CROSSING || y_min.y_edge < y {
                        y_min.y_edge = y;
                        y_min.y_normal =
                            self.radial_normal(Vec2::new(y_min.position.x, y), y_max.state);
                    } else {
                        validate_vertical_normal(y_min, y_max);
                    }
                }
            }
        } else if y_max.state == self.fill {
            let dy = y_max.position.y - self.center.y;
            if dy * dy + x2 <= sqr_radius {
                let y = self.center.y - (sqr_radius - x2).sqrt();
                if y >= y_min.position.y {
                    if y_min.y_edge <= NO_CROSSING || y_min.y_edge > y {
                        y_min.y_edge = y;
                        y_min.y_normal =
                            self.radial_normal(Vec2::new(y_min.position.x, y), y_min.state);
                    } else {
                        validate_vertical_normal(y_min, y_max);
                    }
                }
            }
        }
    }

    /// Boundary normal at a point on the circle, oriented from the higher
    /// state toward the lower one.
    fn radial_normal(&self, at: Vec2, other_state: i32) -> Vec2 {
        let outward = (at - self.center).normalized();
        if self.fill > other_state {
            outward
        } else {
            -outward
        }
    }
}

/// Restores the invariant that a crossing normal points from the higher
/// state toward the lower, for crossings kept from an earlier edit.
fn validate_horizontal_normal(x_min: &mut Voxel, x_max: &Voxel) {
    if x_min.state < x_max.state {
        if x_min.x_normal.x > 0.0 {
            x_min.x_normal = -x_min.x_normal;
        }
    } else if x_min.x_normal.x < 0.0 {
        x_min.x_normal = -x_min.x_normal;
    }
}

fn validate_vertical_normal(y_min: &mut Voxel, y_max: &Voxel) {
    if y_min.state < y_max.state {
        if y_min.y_normal.y > 0.0 {
            y_min.y_normal = -y_min.y_normal;
        }
    } else if y_min.y_normal.y < 0.0 {
        y_min.y_normal = -y_min.y_normal;
    }
}
