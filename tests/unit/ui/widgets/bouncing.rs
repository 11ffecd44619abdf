use super::*;
use crate::scheduler::{TaskError, VirtualClock};
use crate::ui::core::border::BorderStyle;
use crate::ui::core::style::Style;
use crate::ui::widget::WidgetOptions;
use std::rc::Rc;

fn ball_in(height: i32, width: i32) -> (Widget, Widget) {
    let root = Widget::new_root(height, width, 0, Style::default());
    let ball = root.new_widget(WidgetOptions::new().size(1, 1)).unwrap();
    (root, ball)
}

#[test]
fn moves_diagonally_and_reflects_off_edges() {
    let (_root, ball) = ball_in(5, 6);
    let mut b = Bouncing::default();
    let mut trail = Vec::new();
    for _ in 0..6 {
        b.step(&ball);
        trail.push((ball.top(), ball.left()));
    }
    assert_eq!(trail, [(1, 1), (2, 2), (3, 3), (4, 4), (3, 5), (2, 4)]);
    assert_eq!(b.vel, Vec2::new(-1.0, -1.0));
}

#[test]
fn a_bordered_parent_shrinks_the_arena() {
    let (root, ball) = ball_in(5, 5);
    root.border(BorderStyle::Light, None);
    let mut b = Bouncing::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0));
    b.step(&ball);
    b.step(&ball);
    assert_eq!((ball.top(), ball.left()), (3, 1));
    b.step(&ball);
    assert_eq!((ball.top(), ball.left()), (2, 1));
    assert_eq!(b.vel.row, -1.0);
}

#[test]
fn orphans_do_not_move() {
    let ball = Widget::new(WidgetOptions::new().size(1, 1));
    let mut b = Bouncing::default();
    b.step(&ball);
    assert_eq!((ball.top(), ball.left()), (0, 0));
    assert_eq!(b, Bouncing::default());
}

#[test]
fn scheduled_bounce_ticks_until_canceled() {
    let (_root, ball) = ball_in(10, 10);
    let sched = Scheduler::with_clock(Rc::new(VirtualClock::new()));
    let handle = schedule_bounce(&ball, &sched, Bouncing::default(), Duration::from_millis(100));

    let s = sched.clone();
    sched
        .run([async move {
            s.sleep(Duration::from_millis(350)).await;
            handle.cancel();
            Ok::<(), TaskError>(())
        }])
        .unwrap();

    assert_eq!((ball.top(), ball.left()), (4, 4));
}
