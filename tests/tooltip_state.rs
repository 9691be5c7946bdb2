use tvchart::ChartConfig;
use tvchart::models::Row;
use tvchart::tooltip::{HoverState, PointerEvent, TooltipController};

fn controller() -> TooltipController {
    let rows = vec![
        Row::new("A", 9.0, "Drama"),
        Row::new("B", 8.5, "Comedy"),
    ];
    TooltipController::new(&rows, &ChartConfig::default())
}

#[test]
fn starts_idle() {
    let tc = controller();
    assert_eq!(tc.state(), HoverState::Idle);
    assert_eq!(tc.bar_opacity(0), 0.5);
    assert_eq!(tc.view().tooltip_opacity, 0.0);
}

#[test]
fn hover_then_leave() {
    let mut tc = controller();

    let v = tc.handle(PointerEvent::Enter { bar: 1 });
    assert_eq!(v.tooltip_opacity, 1.0);
    assert_eq!(tc.bar_opacity(1), 1.0);
    assert_eq!(tc.bar_opacity(0), 0.5);
    let content = v.content.unwrap();
    assert_eq!(content.html(), "<u>B</u><br>Rating: 8.5<br>Genre: Comedy");

    let v = tc.handle(PointerEvent::Move {
        page_x: 200.0,
        page_y: 50.0,
    });
    assert_eq!(v.position, Some((210.0, 60.0)));
    let v = tc.handle(PointerEvent::Move {
        page_x: 205.0,
        page_y: 52.5,
    });
    assert_eq!(v.position, Some((215.0, 62.5)));

    let v = tc.handle(PointerEvent::Leave);
    assert_eq!(tc.state(), HoverState::Idle);
    assert_eq!(v.tooltip_opacity, 0.0);
    assert!(v.content.is_none());
    assert_eq!(tc.bar_opacity(1), 0.5);
}

#[test]
fn entering_another_bar_moves_the_highlight() {
    let mut tc = controller();
    tc.handle(PointerEvent::Enter { bar: 0 });
    tc.handle(PointerEvent::Enter { bar: 1 });
    assert_eq!(tc.bar_opacity(0), 0.5);
    assert_eq!(tc.bar_opacity(1), 1.0);
}

#[test]
fn unknown_bar_is_ignored() {
    let mut tc = controller();
    let v = tc.handle(PointerEvent::Enter { bar: 7 });
    assert_eq!(tc.state(), HoverState::Idle);
    assert_eq!(v.tooltip_opacity, 0.0);
}
