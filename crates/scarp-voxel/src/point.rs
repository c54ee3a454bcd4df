use scarp_geom::Vec2;

/// A candidate contour vertex produced by a feature query. The point only
/// participates in triangulation when `exists` is set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FeaturePoint {
    pub position: Vec2,
    pub exists: bool,
}

impl FeaturePoint {
    pub const NONE: FeaturePoint = FeaturePoint {
        position: Vec2::ZERO,
        exists: false,
    };

    #[inline]
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            exists: true,
        }
    }

    /// Mean of the candidates that exist; does not exist if none do.
    pub fn average(points: &[FeaturePoint]) -> FeaturePoint {
        let mut sum = Vec2::ZERO;
        let mut features = 0.0f32;
        for p in points {
            if p.exists {
                sum += p.position;
                features += 1.0;
            }
        }
        if features > 0.0 {
            FeaturePoint::at(sum / features)
        } else {
            FeaturePoint::NONE
        }
    }
}
