use strata::sizing::shape_extent;
use strata::{DeterministicSizer, EdgeAttrs, Shape, SizeProvider, VertexAttrs};

const EPS: f64 = 1e-9;

#[test]
fn unlabeled_vertices_are_measured_by_id() {
    let sizer = DeterministicSizer::default();
    let by_id = sizer.vertex_size("abc", &VertexAttrs::default());
    let by_label = sizer.vertex_size("zz", &VertexAttrs::with_label("abc"));
    assert_eq!(by_id, by_label);
    assert!((by_id.width - (3.0 * 14.0 * 0.6 + 24.0)).abs() < EPS);
}

#[test]
fn shapes_grow_around_the_label_box() {
    let circle = shape_extent(Shape::Circle, 30.0, 40.0);
    assert_eq!((circle.width, circle.height), (50.0, 50.0));
    let square = shape_extent(Shape::Square, 30.0, 40.0);
    assert_eq!((square.width, square.height), (40.0, 40.0));
    let diamond = shape_extent(Shape::Diamond, 30.0, 40.0);
    assert_eq!((diamond.width, diamond.height), (60.0, 80.0));
    let ellipse = shape_extent(Shape::Ellipse, 10.0, 10.0);
    assert!((ellipse.width - 10.0 * std::f64::consts::SQRT_2).abs() < EPS);
    let plain = shape_extent(Shape::Plaintext, 30.0, 40.0);
    assert_eq!((plain.width, plain.height), (30.0, 40.0));
}

#[test]
fn font_size_and_margins_scale_vertices() {
    let sizer = DeterministicSizer::default();
    let mut attrs = VertexAttrs::with_label("ab\ncd");
    attrs.render.font_size = 20.0;
    attrs.layout.margins.x = 0.0;
    attrs.layout.margins.y = 0.0;
    let s = sizer.vertex_size("v", &attrs);
    assert!((s.width - 2.0 * 20.0 * 0.6).abs() < EPS);
    assert!((s.height - 2.0 * 20.0 * 1.2).abs() < EPS);
}

#[test]
fn edge_labels_are_padded_and_empty_labels_take_no_space() {
    let sizer = DeterministicSizer::default();
    let none = sizer.edge_label_size(&EdgeAttrs::default());
    assert_eq!((none.width, none.height), (0.0, 0.0));
    let empty = sizer.edge_label_size(&EdgeAttrs::with_label(""));
    assert_eq!((empty.width, empty.height), (0.0, 0.0));

    let s = sizer.edge_label_size(&EdgeAttrs::with_label("go"));
    assert!((s.width - (2.0 * 14.0 * 0.6 + 8.0)).abs() < EPS);
    assert!((s.height - (14.0 * 1.2 + 8.0)).abs() < EPS);
}
