use proptest::prelude::*;
use scarp_geom::Vec2;
use scarp_voxel::{Cell, Voxel};

fn unit_normal() -> impl Strategy<Value = Vec2> {
    (0.0f32..std::f32::consts::TAU).prop_map(|a| Vec2::new(a.cos(), a.sin()))
}

/// A unit cell with crossings on A's two edges at arbitrary offsets and
/// arbitrary unit normals.
fn arb_corner_cell() -> impl Strategy<Value = Cell> {
    (0.5f32..1.5, 0.5f32..1.5, unit_normal(), unit_normal()).prop_map(|(xe, ye, xn, yn)| {
        let mut a = Voxel::new(0, 0, 1.0);
        a.state = 1;
        a.x_edge = xe;
        a.x_normal = xn;
        a.y_edge = ye;
        a.y_normal = yn;
        Cell::new(
            0,
            a,
            Voxel::new(1, 0, 1.0),
            Voxel::new(0, 1, 1.0),
            Voxel::new(1, 1, 1.0),
            (135.0f32.to_radians()).cos(),
            (8.0f32.to_radians()).cos(),
        )
    })
}

proptest! {
    // Accepted features always lie strictly inside the cell's bounds, no
    // matter where the boundary lines intersect.
    #[test]
    fn accepted_features_are_strictly_contained(cell in arb_corner_cell()) {
        let f = cell.feature_sw();
        if f.exists {
            prop_assert!(f.position.x > cell.a.position.x);
            prop_assert!(f.position.y > cell.a.position.y);
            prop_assert!(f.position.x < cell.d.position.x);
            prop_assert!(f.position.y < cell.d.position.y);
        }
    }

    // No query may ever produce non-finite coordinates, even for parallel or
    // opposed normals where the intersection is undefined.
    #[test]
    fn features_are_always_finite(cell in arb_corner_cell()) {
        for f in [cell.feature_sw(), cell.feature_ns(), cell.feature_ew()] {
            prop_assert!(f.position.x.is_finite());
            prop_assert!(f.position.y.is_finite());
        }
    }

    // Averaging existing candidates keeps the result inside their bounding
    // box, so merged diagonal centers cannot escape the cell either.
    #[test]
    fn average_stays_in_bounding_box(
        ax in -2.0f32..2.0, ay in -2.0f32..2.0,
        bx in -2.0f32..2.0, by in -2.0f32..2.0,
    ) {
        use scarp_voxel::FeaturePoint;
        let a = FeaturePoint::at(Vec2::new(ax, ay));
        let b = FeaturePoint::at(Vec2::new(bx, by));
        let avg = FeaturePoint::average(&[a, b]);
        prop_assert!(avg.exists);
        prop_assert!(avg.position.x >= ax.min(bx) - 1e-6);
        prop_assert!(avg.position.x <= ax.max(bx) + 1e-6);
        prop_assert!(avg.position.y >= ay.min(by) - 1e-6);
        prop_assert!(avg.position.y <= ay.max(by) + 1e-6);
    }
}
