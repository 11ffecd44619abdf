use super::*;
use crate::core::event::KeyCode;
use crate::error::Error;
use crate::ui::core::geom::Hint;
use crate::ui::core::style::Color;
use std::cell::RefCell;
use std::rc::Rc;

fn root(height: i32, width: i32) -> Widget {
    Widget::new_root(height, width, 0, Style::default())
}

fn child(parent: &Widget, options: WidgetOptions) -> Widget {
    parent.new_widget(options).unwrap()
}

fn screen(w: &Widget) -> Vec<String> {
    (0..w.height() as usize).map(|r| w.row_text(r)).collect()
}

#[test]
fn hints_resolve_against_the_parent() {
    let root = root(10, 20);
    let w = child(
        &root,
        WidgetOptions::new()
            .pos_hint(Hint::Fraction(0.5), Hint::Fraction(0.25))
            .size_hint(Hint::Fraction(0.5), Hint::Fraction(0.5)),
    );
    assert_eq!((w.top(), w.left(), w.height(), w.width()), (5, 5, 5, 10));
    assert_eq!((w.bottom(), w.right()), (10, 15));
    assert_eq!((w.surface().height(), w.surface().width()), (5, 10));
}

#[test]
fn missing_size_defaults_to_parent_minus_reserved_columns() {
    let root = Widget::new_root(10, 20, 1, Style::default());
    let w = child(&root, WidgetOptions::new().at(2, 3));
    assert_eq!((w.top(), w.left(), w.height(), w.width()), (2, 3, 10, 19));
    assert_eq!(w.surface().stride(), 20);
}

#[test]
fn negative_positional_values_count_from_the_far_edge() {
    let root = root(10, 20);
    let w = child(&root, WidgetOptions::new().at(-3, -5).size(3, 5));
    assert_eq!((w.top(), w.left()), (7, 15));
    assert_eq!(w.pos_hint().top, Some(Hint::Cells(-3)));

    root.resize(20, 40);
    assert_eq!((w.top(), w.left()), (17, 35));
}

#[test]
fn absolute_setters_clear_the_matching_hint() {
    let root = root(10, 20);
    let w = child(&root, WidgetOptions::new().size_hint(Hint::Fraction(0.5), Hint::Fraction(0.5)));
    w.set_height(3);
    assert_eq!(w.size_hint().height, None);
    assert_eq!(w.size_hint().width, Some(Hint::Fraction(0.5)));

    root.resize(20, 40);
    assert_eq!((w.height(), w.width()), (3, 20));

    w.set_pos_hint(PosHint::new(Hint::Fraction(0.5), None));
    assert_eq!(w.top(), 10);
    w.set_top(1);
    assert!(w.pos_hint().top.is_none());
    root.update_geometry();
    assert_eq!(w.top(), 1);
}

#[test]
fn geometry_resolution_is_idempotent() {
    let root = root(13, 37);
    let w = child(
        &root,
        WidgetOptions::new()
            .pos_hint(Hint::Fraction(0.3), Hint::Cells(-4))
            .size_hint(Hint::Fraction(0.6), None),
    );
    let first = (w.top(), w.left(), w.height(), w.width());
    w.update_geometry();
    root.update_geometry();
    assert_eq!((w.top(), w.left(), w.height(), w.width()), first);
}

#[test]
fn detached_widgets_are_not_resolved() {
    let w = Widget::new(WidgetOptions::new().size_hint(Hint::Fraction(1.0), None));
    w.update_geometry();
    assert!(!w.has_root());
    assert_eq!((w.height(), w.width()), (0, 0));

    let sized = Widget::new(WidgetOptions::new().size(2, 3));
    assert_eq!((sized.surface().height(), sized.surface().width()), (2, 3));
}

#[test]
fn opaque_child_overwrites_exactly_its_rectangle() {
    let root = root(5, 5);
    let w = child(&root, WidgetOptions::new().at(1, 1).size(3, 3));
    w.write(.., '#').unwrap();
    root.refresh();
    assert_eq!(screen(&root), ["     ", " ### ", " ### ", " ### ", "     "]);
}

#[test]
fn transparent_child_changes_only_its_visible_cells() {
    let root = root(3, 3);
    let back = child(&root, WidgetOptions::new().size(3, 3));
    back.write(.., '.').unwrap();
    let front = child(&root, WidgetOptions::new().size(3, 3).transparent(true));
    front.write((0, 0), 'X').unwrap();
    root.refresh();
    assert_eq!(screen(&root), ["X..", "...", "..."]);
}

#[test]
fn child_above_the_top_edge_loses_its_first_row() {
    let root = root(3, 3);
    let w = child(&root, WidgetOptions::new().at(0, 0).size(3, 3));
    w.write(.., "abc\ndef\nghi").unwrap();
    w.set_top(-1);
    root.refresh();
    assert_eq!(screen(&root), ["def", "ghi", "   "]);
}

#[test]
fn plain_widgets_keep_content_while_layouts_are_cleared() {
    let root = root(2, 4);
    let panel = child(&root, WidgetOptions::new().size(2, 4));
    let dot = child(&panel, WidgetOptions::new().size(1, 1));
    dot.write(.., '*').unwrap();
    root.refresh();
    dot.set_left(2);
    root.refresh();
    // The plain panel still shows where the dot used to be.
    assert_eq!(panel.row_text(0), "* * ");

    let layout = child(&root, WidgetOptions::new().create_with("Layout"));
    assert!(layout.is_layout());
    assert_eq!((layout.height(), layout.width()), (2, 4));
    let dot = child(&layout, WidgetOptions::new().size(1, 1));
    dot.write(.., '*').unwrap();
    root.refresh();
    dot.set_left(2);
    root.refresh();
    assert_eq!(layout.row_text(0), "  * ");
}

#[test]
fn front_handler_stops_dispatch() {
    let root = root(4, 4);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let back = child(&root, WidgetOptions::new());
    let front = child(&root, WidgetOptions::new());
    let front_child = child(&front, WidgetOptions::new());

    for (name, widget, handles) in [
        ("back", &back, true),
        ("front", &front, true),
        ("front_child", &front_child, true),
    ] {
        let seen = seen.clone();
        widget.set_on_press(move |_, _| {
            seen.borrow_mut().push(name);
            handles
        });
    }

    assert!(root.dispatch(&Key::from('a')));
    assert_eq!(*seen.borrow(), ["front"]);
}

#[test]
fn unhandled_keys_walk_front_to_back_depth_first() {
    let root = root(4, 4);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let back = child(&root, WidgetOptions::new());
    let front = child(&root, WidgetOptions::new());
    let front_child = child(&front, WidgetOptions::new());

    for (name, widget) in [("back", &back), ("front", &front), ("front_child", &front_child)] {
        let seen = seen.clone();
        widget.set_on_press(move |_, key| {
            seen.borrow_mut().push(name);
            name == "back" && key.code == KeyCode::Enter
        });
    }

    assert!(!root.dispatch(&Key::from('x')));
    assert_eq!(*seen.borrow(), ["front", "front_child", "back"]);

    seen.borrow_mut().clear();
    assert!(root.dispatch(&Key::simple(KeyCode::Enter)));
    assert_eq!(*seen.borrow(), ["front", "front_child", "back"]);
}

#[test]
fn handler_receives_its_own_widget() {
    let root = root(2, 2);
    let w = child(&root, WidgetOptions::new().size(1, 2));
    w.set_on_press(|me, key| {
        if let Some(ch) = key.as_char() {
            me.write((0, 0), ch).unwrap();
            return true;
        }
        false
    });
    assert!(root.dispatch(&Key::from('k')));
    assert_eq!(w.row_text(0), "k ");
    assert!(w.on_press(&Key::from('z')));
    assert_eq!(w.row_text(0), "z ");
}

#[test]
fn z_order_operations() {
    let root = root(4, 4);
    let a = child(&root, WidgetOptions::new());
    let b = child(&root, WidgetOptions::new());
    let c = child(&root, WidgetOptions::new());
    assert!(c.is_in_front());
    assert!(a.is_in_back());

    assert!(root.pull_to_front(&a));
    assert_eq!(root.children(), [b.clone(), c.clone(), a.clone()]);

    assert!(root.push_to_back(-1));
    assert_eq!(root.children(), [a.clone(), b.clone(), c.clone()]);

    assert!(root.pull_to_front(1));
    assert_eq!(root.children(), [a.clone(), c.clone(), b.clone()]);

    assert!(!root.pull_to_front(7));
    let stranger = Widget::new(WidgetOptions::new());
    assert!(!root.push_to_back(&stranger));
    assert!(!stranger.is_in_front());
}

#[test]
fn groups_collect_widgets_created_under_a_key() {
    let root = root(4, 4);
    let a = child(&root, WidgetOptions::new().group("stars"));
    let _other = child(&root, WidgetOptions::new());
    let b = child(&root, WidgetOptions::new().group("stars"));
    assert_eq!(root.group("stars"), [a, b]);
    assert!(root.group("planets").is_empty());
}

#[test]
fn remove_and_reparent() {
    let root = root(4, 4);
    let a = child(&root, WidgetOptions::new());
    let b = child(&root, WidgetOptions::new());
    let inner = child(&a, WidgetOptions::new());
    assert_eq!(inner.root(), Some(root.clone()));

    assert!(root.remove_widget(&a));
    assert!(!root.remove_widget(&a));
    assert!(a.parent().is_none());
    assert!(!inner.has_root());

    b.add_widget(&inner);
    assert_eq!(inner.parent(), Some(b.clone()));
    assert!(a.children().is_empty());
    assert!(inner.has_root());
}

#[test]
fn adding_an_ancestor_is_refused() {
    let root = root(4, 4);
    let a = child(&root, WidgetOptions::new());
    let b = child(&a, WidgetOptions::new());
    b.add_widget(&a);
    b.add_widget(&b);
    assert_eq!(a.parent(), Some(root.clone()));
    assert!(b.children().is_empty());
}

#[test]
fn walk_is_post_order() {
    let root = root(4, 4);
    let a = child(&root, WidgetOptions::new());
    let a1 = child(&a, WidgetOptions::new());
    let b = child(&root, WidgetOptions::new());
    assert_eq!(root.walk(), [a1, a, b, root.clone()]);
}

#[test]
fn set_color_restyles_default_cells() {
    let root = root(1, 3);
    let w = child(&root, WidgetOptions::new().size(1, 3));
    let red = Style::new().fg(Color::RED);
    let blue = Style::new().bg(Color::BLUE);
    w.write((0, 0), red).unwrap();
    w.set_color(blue);
    assert_eq!(w.color(), blue);
    assert_eq!(w.cell(0, 0).unwrap().style, red);
    assert_eq!(w.cell(0, 1).unwrap().style, blue);
}

#[test]
fn border_marks_the_widget() {
    let root = root(3, 3);
    let w = child(&root, WidgetOptions::new().size(3, 3));
    assert!(!w.has_border());
    w.border(BorderStyle::Double, None);
    assert!(w.has_border());
    assert_eq!(w.row_text(0), "╔═╗");
}

#[test]
fn unknown_widget_type_is_reported() {
    let root = root(3, 3);
    let err = root
        .new_widget(WidgetOptions::new().create_with("Clock"))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownWidgetType(tag) if tag == "Clock"));
    assert_eq!(root.child_count(), 0);
}

#[test]
fn reserved_columns_are_inherited() {
    let root = Widget::new_root(4, 8, 2, Style::default());
    let w = child(&root, WidgetOptions::new().size(2, 3));
    let detached = Widget::new(WidgetOptions::new().size(1, 1));
    w.add_widget(&detached);
    assert_eq!(w.surface().stride(), 5);
    assert_eq!(detached.surface().stride(), 3);
}

#[test]
fn new_root_is_its_own_root() {
    let root = root(3, 4);
    assert_eq!(root.root(), Some(root.clone()));
    assert!(root.has_root());
    assert!(!Widget::new(WidgetOptions::new()).has_root());
}

#[test]
fn split_gives_the_second_child_the_rest() {
    let root = root(10, 7);
    let split = Widget::layout(WidgetOptions::new());
    split.set_split(Axis::Horizontal, Hint::Fraction(0.5));
    root.add_widget(&split);
    let a = child(&split, WidgetOptions::new().at(4, 4).size(1, 1));
    let b = child(&split, WidgetOptions::new());
    assert_eq!((a.top(), a.left(), a.height(), a.width()), (0, 0, 10, 4));
    assert_eq!((b.top(), b.left(), b.height(), b.width()), (0, 4, 10, 3));
    assert!(a.pos_hint().top.is_none());

    root.resize(6, 5);
    assert_eq!((a.height(), a.width()), (6, 2));
    assert_eq!((b.left(), b.height(), b.width()), (2, 6, 3));
}

#[test]
fn split_share_rounding_to_nothing_leaves_everything_to_the_second_child() {
    let root = root(10, 20);
    let split = Widget::layout(WidgetOptions::new());
    split.set_split(Axis::Vertical, Hint::Fraction(0.01));
    root.add_widget(&split);
    let a = child(&split, WidgetOptions::new());
    let b = child(&split, WidgetOptions::new());
    assert_eq!(a.height(), 0);
    assert_eq!((b.top(), b.height(), b.width()), (0, 10, 20));

    split.set_split(Axis::Vertical, Hint::Cells(30));
    assert_eq!((a.height(), b.top(), b.height()), (10, 10, 0));
}
