use approx::assert_relative_eq;
use rayon::prelude::*;

use super::*;
use crate::hand::{Connection, Handedness};
use crate::test::{frame, full_hand, hand, noise_image, solid_image};

const GREEN: Color = Color::from_rgb8(0x30, 0xff, 0x30);
const RED: Color = Color::from_rgb8(0xff, 0x30, 0x30);

static SINGLE: &[Connection] = &[Connection::new(0, 1)];

fn single_connection() -> OverlayRenderer {
    OverlayRenderer::new().with_connections(SINGLE)
}

#[test]
fn default_style() {
    let style = OverlayStyle::default();
    assert_eq!(style.left_connection_color, "#30FF30".parse().unwrap());
    assert_eq!(style.right_connection_color, "#FF3030".parse().unwrap());
    assert_eq!(style.left_ring_color, "#30FF30".parse().unwrap());
    assert_eq!(style.right_ring_color, "#FF3030".parse().unwrap());
    assert_eq!(style.left_landmark_color, "#FF3030".parse().unwrap());
    assert_eq!(style.right_landmark_color, "#30FF30".parse().unwrap());
    assert_eq!(style.connection_width, 8);
    assert_eq!(style.landmark_radius, 10);
    assert_eq!(style.ring_width, 5);
    assert_eq!(style.ring_radius(), 15);
}

#[test]
fn colors_by_handedness() {
    let style = OverlayStyle::default();

    assert_eq!(style.connection_color(Handedness::Left), GREEN);
    assert_eq!(style.ring_color(Handedness::Left), GREEN);
    assert_eq!(style.landmark_color(Handedness::Left), RED);

    assert_eq!(style.connection_color(Handedness::Right), RED);
    assert_eq!(style.ring_color(Handedness::Right), RED);
    assert_eq!(style.landmark_color(Handedness::Right), GREEN);
}

#[test]
fn no_hands_is_exact_copy() {
    let input = noise_image(200, 100, 7);
    let result = frame(input.clone(), Vec::new());

    let output = render(&result);
    assert_eq!(output.resolution(), Resolution::new(200, 100));
    assert!(output == input);
}

#[test]
fn input_is_not_modified() {
    let input = solid_image(100, 100, Color::BLACK);
    let result = frame(input.clone(), vec![full_hand(Handedness::Left, 0.0)]);

    let output = render(&result);
    assert!(**result.image() == input);
    assert!(output != input);
}

#[test]
fn draw_calls_for_single_connection() {
    let result = frame(
        Image::new(100, 100),
        vec![hand(Handedness::Left, &[(0.5, 0.5), (0.6, 0.5)])],
    );
    let mut list = DrawList::new();
    single_connection().render_into(&mut list, &result);

    let a = Point2::new(0.5 * 100.0, 0.5 * 100.0);
    let b = Point2::new(0.6 * 100.0, 0.5 * 100.0);
    assert_relative_eq!(a, Point2::new(50.0, 50.0));
    assert_relative_eq!(b, Point2::new(60.0, 50.0));

    assert_eq!(
        list.commands(),
        &[
            DrawCommand::Line {
                start: a,
                end: b,
                color: GREEN,
                width: 8
            },
            DrawCommand::FillCircle {
                center: a,
                radius: 10,
                color: RED
            },
            DrawCommand::FillCircle {
                center: b,
                radius: 10,
                color: RED
            },
            DrawCommand::StrokeCircle {
                center: a,
                radius: 15,
                width: 5,
                color: GREEN
            },
            DrawCommand::StrokeCircle {
                center: b,
                radius: 15,
                width: 5,
                color: GREEN
            },
        ]
    );
}

#[test]
fn draw_calls_per_full_hand() {
    let result = frame(
        Image::new(320, 240),
        vec![
            full_hand(Handedness::Left, -0.1),
            full_hand(Handedness::Right, 0.3),
        ],
    );
    let mut list = DrawList::new();
    OverlayRenderer::new().render_into(&mut list, &result);

    let per_hand = HAND_CONNECTIONS.len() + 2 * crate::hand::NUM_LANDMARKS;
    assert_eq!(list.len(), 2 * per_hand);

    let (left, right) = list.commands().split_at(per_hand);
    for (cmds, ring_color) in [(left, GREEN), (right, RED)] {
        for cmd in cmds {
            match *cmd {
                DrawCommand::Line { color, width, .. } => {
                    assert_eq!(color, ring_color);
                    assert_eq!(width, 8);
                }
                DrawCommand::FillCircle { radius, color, .. } => {
                    assert_ne!(color, ring_color);
                    assert_eq!(radius, 10);
                }
                DrawCommand::StrokeCircle {
                    radius,
                    width,
                    color,
                    ..
                } => {
                    assert_eq!(color, ring_color);
                    assert_eq!(radius, 15);
                    assert_eq!(width, 5);
                }
            }
        }
    }
}

#[test]
fn landmarks_map_to_pixels() {
    let mut rng = fastrand::Rng::with_seed(3);
    let res = Resolution::new(640, 480);
    for _ in 0..100 {
        let lm = NormalizedLandmark::new(rng.f32(), rng.f32(), 0.0);
        let pos = denormalize(&lm, res);
        assert_eq!(pos.x, lm.x() * 640.0);
        assert_eq!(pos.y, lm.y() * 480.0);
    }
}

#[test]
fn left_hand_pixels() {
    let result = frame(
        solid_image(100, 100, Color::BLACK),
        vec![hand(Handedness::Left, &[(0.5, 0.5), (0.6, 0.5)])],
    );
    let out = single_connection().render(&result);

    // Markers on top of the connection.
    assert_eq!(out.get(50, 50), RED);
    assert_eq!(out.get(55, 50), RED);
    assert_eq!(out.get(60, 50), RED);
    assert_eq!(out.get(50, 45), RED);
    // Rings, 15px from one landmark and far from the other.
    assert_eq!(out.get(35, 50), GREEN);
    assert_eq!(out.get(75, 50), GREEN);
    // Gap between marker and ring.
    assert_eq!(out.get(39, 50), Color::BLACK);
    // Far away.
    assert_eq!(out.get(5, 5), Color::BLACK);
}

#[test]
fn right_hand_pixels() {
    let result = frame(
        solid_image(100, 100, Color::BLACK),
        vec![hand(Handedness::Right, &[(0.5, 0.5), (0.6, 0.5)])],
    );
    let out = single_connection().render(&result);

    assert_eq!(out.get(50, 50), GREEN);
    assert_eq!(out.get(60, 50), GREEN);
    assert_eq!(out.get(35, 50), RED);
    assert_eq!(out.get(75, 50), RED);
}

#[test]
fn connection_pixels() {
    let result = frame(
        solid_image(100, 100, Color::BLACK),
        vec![hand(Handedness::Left, &[(0.1, 0.5), (0.9, 0.5)])],
    );
    let out = single_connection().render(&result);

    for y in 48..=52 {
        assert_eq!(out.get(50, y), GREEN, "y={y}");
    }
    assert_eq!(out.get(50, 40), Color::BLACK);
    assert_eq!(out.get(50, 60), Color::BLACK);
}

#[test]
fn later_hands_draw_on_top() {
    let result = frame(
        solid_image(100, 100, Color::BLACK),
        vec![
            hand(Handedness::Left, &[(0.5, 0.5), (0.5, 0.5)]),
            hand(Handedness::Right, &[(0.5, 0.5), (0.5, 0.5)]),
        ],
    );
    let out = single_connection().render(&result);
    assert_eq!(out.get(50, 50), GREEN);
    assert_eq!(out.get(35, 50), RED);
}

#[test]
fn render_is_idempotent() {
    let result = frame(
        noise_image(160, 120, 1),
        vec![
            full_hand(Handedness::Right, 0.0),
            full_hand(Handedness::Left, 0.4),
        ],
    );
    let renderer = OverlayRenderer::new();

    let first = renderer.render(&result);
    let second = renderer.render(&result);
    assert_eq!(first.data(), second.data());

    // Rendering from many threads at once produces the same output.
    let outputs = (0..8)
        .into_par_iter()
        .map(|_| renderer.render(&result))
        .collect::<Vec<_>>();
    for out in outputs {
        assert_eq!(out.data(), first.data());
    }
}

#[test]
fn replayed_draw_list_matches_raster() {
    let result = frame(
        noise_image(160, 120, 2),
        vec![full_hand(Handedness::Left, 0.1)],
    );
    let renderer = OverlayRenderer::new();

    let mut list = DrawList::new();
    renderer.render_into(&mut list, &result);
    let mut replayed = Image::clone(result.image());
    list.replay(&mut replayed);

    assert!(replayed == renderer.render(&result));
}

#[test]
#[should_panic]
fn connection_out_of_range() {
    // The full topology needs 21 landmarks.
    let result = frame(
        Image::new(100, 100),
        vec![hand(Handedness::Left, &[(0.5, 0.5), (0.6, 0.5)])],
    );
    render(&result);
}
