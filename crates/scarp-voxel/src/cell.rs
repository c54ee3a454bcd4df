use scarp_geom::{Rect, Vec2};

use crate::point::FeaturePoint;
use crate::voxel::Voxel;

/// Two boundary normals whose lines meet at an angle sharper than this
/// epsilon short of exact opposition are treated as smooth, not sharp.
const OPPOSITION_EPS: f32 = 1e-4;

/// Denominator floor for the two-line intersection; below it the boundary
/// lines are effectively parallel and carry no stable corner.
const INTERSECT_EPS: f32 = 1e-6;

/// The 2x2 voxel neighborhood processed as one triangulation unit:
/// `a`=SW, `b`=SE, `c`=NW, `d`=NE. Rebuilt by value for every cell visited;
/// the two limits are cosine thresholds shared across the grid.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    pub a: Voxel,
    pub b: Voxel,
    pub c: Voxel,
    pub d: Voxel,
    /// Column index of this cell within its row, used by the mesh caches.
    pub index: usize,
    pub sharp_feature_limit: f32,
    pub parallel_limit: f32,
}

impl Cell {
    pub fn new(
        index: usize,
        a: Voxel,
        b: Voxel,
        c: Voxel,
        d: Voxel,
        sharp_feature_limit: f32,
        parallel_limit: f32,
    ) -> Self {
        Self {
            a,
            b,
            c,
            d,
            index,
            sharp_feature_limit,
            parallel_limit,
        }
    }

    /// Mean of the four edge crossings, the last-resort center for merged
    /// diagonal quads.
    pub fn average_nesw(&self) -> Vec2 {
        (self.a.x_edge_point()
            + self.a.y_edge_point()
            + self.b.y_edge_point()
            + self.c.x_edge_point())
            * 0.25
    }

    pub fn feature_sw(&self) -> FeaturePoint {
        self.sharp_feature(
            self.a.x_edge_point(),
            self.a.x_normal,
            self.a.y_edge_point(),
            self.a.y_normal,
        )
    }

    pub fn feature_se(&self) -> FeaturePoint {
        self.sharp_feature(
            self.a.x_edge_point(),
            self.a.x_normal,
            self.b.y_edge_point(),
            self.b.y_normal,
        )
    }

    pub fn feature_nw(&self) -> FeaturePoint {
        self.sharp_feature(
            self.a.y_edge_point(),
            self.a.y_normal,
            self.c.x_edge_point(),
            self.c.x_normal,
        )
    }

    pub fn feature_ne(&self) -> FeaturePoint {
        self.sharp_feature(
            self.c.x_edge_point(),
            self.c.x_normal,
            self.b.y_edge_point(),
            self.b.y_normal,
        )
    }

    /// Opposite-pair query across the two horizontal-edge crossings.
    pub fn feature_ns(&self) -> FeaturePoint {
        self.sharp_feature(
            self.a.x_edge_point(),
            self.a.x_normal,
            self.c.x_edge_point(),
            self.c.x_normal,
        )
    }

    /// Opposite-pair query across the two vertical-edge crossings.
    pub fn feature_ew(&self) -> FeaturePoint {
        self.sharp_feature(
            self.a.y_edge_point(),
            self.a.y_normal,
            self.b.y_edge_point(),
            self.b.y_normal,
        )
    }

    /// Tri-material point for the north/east/west edges. Always exists: when
    /// no pairwise feature survives, the raw crossing midpoint stands in.
    pub fn feature_new(&self) -> FeaturePoint {
        let mut f = FeaturePoint::average(&[self.feature_ew(), self.feature_ne(), self.feature_nw()]);
        if !f.exists {
            f.position =
                (self.a.y_edge_point() + self.b.y_edge_point() + self.c.x_edge_point()) / 3.0;
            f.exists = true;
        }
        f
    }

    pub fn feature_nse(&self) -> FeaturePoint {
        let mut f = FeaturePoint::average(&[self.feature_ns(), self.feature_se(), self.feature_ne()]);
        if !f.exists {
            f.position =
                (self.a.x_edge_point() + self.b.y_edge_point() + self.c.x_edge_point()) / 3.0;
            f.exists = true;
        }
        f
    }

    pub fn feature_nsw(&self) -> FeaturePoint {
        let mut f = FeaturePoint::average(&[self.feature_ns(), self.feature_nw(), self.feature_sw()]);
        if !f.exists {
            f.position =
                (self.a.x_edge_point() + self.a.y_edge_point() + self.c.x_edge_point()) / 3.0;
            f.exists = true;
        }
        f
    }

    pub fn feature_sew(&self) -> FeaturePoint {
        let mut f = FeaturePoint::average(&[self.feature_ew(), self.feature_se(), self.feature_sw()]);
        if !f.exists {
            f.position =
                (self.a.x_edge_point() + self.a.y_edge_point() + self.b.y_edge_point()) / 3.0;
            f.exists = true;
        }
        f
    }

    /// Saddle resolution: do the A and D corners connect through the cell
    /// interior? Decided by the parallel-normal test first, then half-plane
    /// tests over the corner features and the opposite edge crossings.
    pub fn has_connection_ad(&self, f_a: FeaturePoint, f_d: FeaturePoint) -> bool {
        let flip = (self.a.state < self.b.state) == (self.a.state < self.c.state);
        if self.is_parallel(self.a.x_normal, self.a.y_normal, flip)
            || self.is_parallel(self.c.x_normal, self.b.y_normal, flip)
        {
            return true;
        }

        if f_a.exists {
            if f_d.exists {
                if is_below_line(f_a.position, self.b.y_edge_point(), f_d.position) {
                    if is_below_line(f_a.position, f_d.position, self.c.x_edge_point())
                        || is_below_line(f_d.position, f_a.position, self.a.x_edge_point())
                    {
                        return true;
                    }
                } else if is_below_line(f_a.position, f_d.position, self.c.x_edge_point())
                    && is_below_line(f_d.position, self.a.y_edge_point(), f_a.position)
                {
                    return true;
                }

                return false;
            }

            return is_below_line(f_a.position, self.b.y_edge_point(), self.c.x_edge_point());
        }

        f_d.exists && is_below_line(f_d.position, self.a.y_edge_point(), self.a.x_edge_point())
    }

    /// Mirror of `has_connection_ad` for the B and C corners.
    pub fn has_connection_bc(&self, f_b: FeaturePoint, f_c: FeaturePoint) -> bool {
        let flip = (self.b.state < self.a.state) == (self.b.state < self.d.state);
        if self.is_parallel(self.a.x_normal, self.b.y_normal, flip)
            || self.is_parallel(self.c.x_normal, self.a.y_normal, flip)
        {
            return true;
        }

        if f_b.exists {
            if f_c.exists {
                if is_below_line(f_c.position, self.a.x_edge_point(), f_b.position) {
                    if is_below_line(f_c.position, f_b.position, self.b.y_edge_point())
                        || is_below_line(f_b.position, f_c.position, self.a.y_edge_point())
                    {
                        return true;
                    }
                } else if is_below_line(f_c.position, f_b.position, self.b.y_edge_point())
                    && is_below_line(f_b.position, self.c.x_edge_point(), f_c.position)
                {
                    return true;
                }

                return false;
            }

            return is_below_line(f_b.position, self.c.x_edge_point(), self.a.y_edge_point());
        }

        f_c.exists && is_below_line(f_c.position, self.a.x_edge_point(), self.b.y_edge_point())
    }

    pub fn is_inside_abd(&self, point: Vec2) -> bool {
        is_below_line(point, self.a.position, self.d.position)
    }

    pub fn is_inside_acd(&self, point: Vec2) -> bool {
        is_below_line(point, self.d.position, self.a.position)
    }

    pub fn is_inside_abc(&self, point: Vec2) -> bool {
        is_below_line(point, self.c.position, self.b.position)
    }

    pub fn is_inside_bcd(&self, point: Vec2) -> bool {
        is_below_line(point, self.b.position, self.c.position)
    }

    fn sharp_feature(&self, p1: Vec2, n1: Vec2, p2: Vec2, n2: Vec2) -> FeaturePoint {
        if !self.is_sharp_feature(n1, n2) {
            return FeaturePoint::NONE;
        }
        match intersect(p1, n1, p2, n2) {
            Some(position) => FeaturePoint {
                position,
                exists: self.bounds().contains_strict(position),
            },
            None => FeaturePoint::NONE,
        }
    }

    fn is_sharp_feature(&self, n1: Vec2, n2: Vec2) -> bool {
        let dot = n1.dot(-n2);
        dot >= self.sharp_feature_limit && dot < 1.0 - OPPOSITION_EPS
    }

    fn is_parallel(&self, n1: Vec2, n2: Vec2, flip: bool) -> bool {
        n1.dot(if flip { -n2 } else { n2 }) > self.parallel_limit
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.a.position, self.d.position)
    }
}

/// Half-plane test: negative determinant puts `p` on the clockwise side of
/// the directed line `start -> end`.
fn is_below_line(p: Vec2, start: Vec2, end: Vec2) -> bool {
    (end - start).cross(p - start) < 0.0
}

/// Intersection of the two lines through `p1`/`p2` with normals `n1`/`n2`.
/// `None` when the lines are near parallel; callers fall back to the smooth
/// case instead of propagating unstable geometry.
fn intersect(p1: Vec2, n1: Vec2, p2: Vec2, n2: Vec2) -> Option<Vec2> {
    let d2 = n2.perp();
    let denom = n1.dot(d2);
    if denom.abs() < INTERSECT_EPS {
        return None;
    }
    let u2 = -n1.dot(p2 - p1) / denom;
    Some(p2 + d2 * u2)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Unit cell with a filled SW corner: crossings on A's two edges.
    fn corner_cell(sharp_limit_deg: f32) -> Cell {
        let mut a = Voxel::new(0, 0, 1.0);
        let b = Voxel::new(1, 0, 1.0);
        let c = Voxel::new(0, 1, 1.0);
        let d = Voxel::new(1, 1, 1.0);
        a.state = 1;
        a.x_edge = 0.9;
        a.x_normal = Vec2::new(1.0, 0.0);
        a.y_edge = 1.2;
        a.y_normal = Vec2::new(0.0, 1.0);
        Cell::new(
            0,
            a,
            b,
            c,
            d,
            (sharp_limit_deg.to_radians()).cos(),
            (8.0f32.to_radians()).cos(),
        )
    }

    #[test]
    fn perpendicular_normals_form_a_sharp_corner() {
        let cell = corner_cell(135.0);
        let f = cell.feature_sw();
        assert!(f.exists);
        // Lines x = 0.9 and y = 1.2 meet at the preserved corner.
        assert!((f.position.x - 0.9).abs() < 1e-5);
        assert!((f.position.y - 1.2).abs() < 1e-5);
    }

    #[test]
    fn accepted_features_lie_strictly_inside_the_cell() {
        let mut cell = corner_cell(135.0);
        // Push the crossing lines so they meet outside the cell bounds.
        cell.a.x_edge = 1.4;
        cell.a.y_edge = 1.6;
        let f = cell.feature_sw();
        assert!(!f.exists);
    }

    #[test]
    fn opposed_normals_are_not_sharp() {
        let mut cell = corner_cell(135.0);
        // Exactly opposing normals: dot(n1, -n2) == 1, excluded by the upper
        // bound so the smooth path takes over.
        cell.a.x_normal = Vec2::new(1.0, 0.0);
        cell.a.y_normal = Vec2::new(-1.0, 0.0);
        assert!(!cell.feature_sw().exists);
    }

    #[test]
    fn shallow_angles_are_not_sharp() {
        // 170-degree limit admits near-opposed normals only; a 90-degree pair
        // is below the cosine threshold.
        let mut cell = corner_cell(170.0);
        cell.sharp_feature_limit = (20.0f32.to_radians()).cos();
        assert!(!cell.feature_sw().exists);
    }

    #[test]
    fn parallel_boundary_lines_yield_no_feature() {
        let mut cell = corner_cell(135.0);
        // Same-direction normals on both crossings: the intersection is
        // undefined and must degrade to "no feature", never NaN.
        cell.a.x_normal = Vec2::new(0.0, 1.0);
        cell.a.y_normal = Vec2::new(0.0, 1.0);
        let f = cell.feature_sw();
        assert!(!f.exists);
        assert!(f.position.x.is_finite() && f.position.y.is_finite());
    }

    #[test]
    fn tri_material_points_always_exist() {
        let mut cell = corner_cell(135.0);
        // Erase normals so every pairwise query fails; the fallback midpoint
        // must still produce a point.
        cell.a.x_normal = Vec2::ZERO;
        cell.a.y_normal = Vec2::ZERO;
        cell.b.y_edge = 1.1;
        cell.c.x_edge = 0.4;
        assert!(cell.feature_nsw().exists);
        assert!(cell.feature_sew().exists);
    }

    #[test]
    fn below_line_matches_determinant_sign() {
        let start = Vec2::new(0.0, 0.0);
        let end = Vec2::new(1.0, 0.0);
        assert!(is_below_line(Vec2::new(0.5, -0.1), start, end));
        assert!(!is_below_line(Vec2::new(0.5, 0.1), start, end));
    }
}
