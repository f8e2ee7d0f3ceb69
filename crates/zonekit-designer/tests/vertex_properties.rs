//! Property tests for the coordinate round trip and anchor-preserving drags.

use proptest::prelude::*;
use zonekit_core::{Point, PolygonId};
use zonekit_designer::{
    anchored_action, to_normalized, to_pixel, EditableShape, ImageScale, PolygonShape,
    VertexControl,
};

fn point() -> impl Strategy<Value = Point> {
    (0.0f64..1000.0, 0.0f64..1000.0).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #[test]
    fn normalized_round_trip_is_off_by_at_most_one(
        x in 0u32..20_000,
        y in 0u32..20_000,
        sw in 0.05f64..20.0,
        sh in 0.05f64..20.0,
    ) {
        let scale = ImageScale::new(sw, sh).unwrap();
        let p = Point::new(f64::from(x), f64::from(y));
        let back = to_normalized(to_pixel(p, &scale), &scale);
        prop_assert!((back.x - p.x).abs() <= 1.0, "x: {} -> {}", p.x, back.x);
        prop_assert!((back.y - p.y).abs() <= 1.0, "y: {} -> {}", p.y, back.y);
    }

    #[test]
    fn anchor_stays_put_across_drags(
        vertices in prop::collection::vec(point(), 3..8),
        targets in prop::collection::vec((point(), 0usize..8), 1..6),
        scale_x in 0.25f64..4.0,
        scale_y in 0.25f64..4.0,
        angle in -180.0f64..180.0,
        uniform in any::<bool>(),
    ) {
        let mut shape =
            PolygonShape::new(PolygonId::from("p"), vertices, "red", 3.0).unwrap();
        shape.set_scale(scale_x, scale_y);
        shape.set_angle(angle);
        shape.set_stroke_uniform(uniform);

        for (target, index) in targets {
            let control = VertexControl::new(index % shape.vertex_count(), shape.vertex_count());
            let before = shape.absolute_vertex(control.anchor_index).unwrap();
            prop_assert!(anchored_action(&control, &mut shape, target));
            let after = shape.absolute_vertex(control.anchor_index).unwrap();
            prop_assert!(
                before.distance_to(&after) < 1e-6,
                "anchor moved from {:?} to {:?}", before, after
            );
        }
    }
}
