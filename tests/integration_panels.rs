use std::cell::RefCell;
use std::rc::Rc;

use float_panels::{
    Document, EventOutcome, Indicator, InputEvent, Key, KeyEvent, Modifiers, NodeId,
    PanelBlueprint, PanelConfig, PanelError, PanelHost, PanelManager, PanelNodes, PointerEvent,
    Position,
};

fn desk(count: usize) -> (PanelManager<Document>, Vec<PanelNodes>) {
    let mut doc = Document::new();
    let nodes: Vec<PanelNodes> = (0..count)
        .map(|i| doc.build_panel(&PanelBlueprint::new(format!("panel {i}"))))
        .collect();
    let mut pm = PanelManager::new(doc);
    for n in &nodes {
        pm.init(n.root, PanelConfig::new()).unwrap();
    }
    (pm, nodes)
}

fn key(
    pm: &mut PanelManager<Document>,
    target: PanelNodes,
    key: Key,
    mods: Modifiers,
) -> EventOutcome {
    pm.handle_event(InputEvent::KeyDown(
        KeyEvent::new(target.handle, key).with_modifiers(mods),
    ))
}

#[test]
fn two_panels_tile_diagonally() {
    let (pm, nodes) = desk(2);
    assert_eq!(pm.host().position(nodes[0].root), Position::new(20, 220));
    assert_eq!(pm.host().position(nodes[1].root), Position::new(40, 240));
}

#[test]
fn shift_right_then_tab_then_right_is_ignored() {
    let (mut pm, nodes) = desk(1);
    let p = nodes[0];
    key(&mut pm, p, Key::Enter, Modifiers::NONE);
    key(&mut pm, p, Key::Right, Modifiers::SHIFT);
    assert_eq!(pm.host().position(p.root), Position::new(20, 320));

    let tab = key(&mut pm, p, Key::Tab, Modifiers::NONE);
    assert!(!tab.prevent_default);
    assert_eq!(pm.host().grabbed(p.handle), Some(false));

    let right = key(&mut pm, p, Key::Right, Modifiers::NONE);
    assert!(!right.prevent_default);
    assert_eq!(pm.host().position(p.root), Position::new(20, 320));
}

#[test]
fn ctrl_up_from_three_clamps_after_third_press() {
    let (mut pm, nodes) = desk(1);
    let p = nodes[0];
    pm.host_mut().set_position(p.root, Position::new(3, 220));
    key(&mut pm, p, Key::Space, Modifiers::NONE);
    let tops: Vec<i32> = (0..5)
        .map(|_| {
            key(&mut pm, p, Key::Up, Modifiers::CTRL);
            pm.host().position(p.root).top
        })
        .collect();
    assert_eq!(tops, vec![2, 1, 0, 0, 0]);
}

#[test]
fn pointer_drag_end_to_end() {
    let (mut pm, nodes) = desk(2);
    let (a, b) = (nodes[0], nodes[1]);

    let down = pm.handle_event(InputEvent::PointerDown(PointerEvent::at(a.handle, 100, 100)));
    assert!(down.prevent_default);
    assert!(pm.host().stacking(a.root) > pm.host().stacking(b.root));

    for (x, y) in [(110, 90), (150, 95), (40, 300)] {
        pm.handle_event(InputEvent::PointerMove(PointerEvent::nowhere(x, y)));
    }
    pm.handle_event(InputEvent::PointerUp(PointerEvent::nowhere(40, 300)));

    assert_eq!(pm.host().position(a.root), Position::new(220, 160));
    assert!(!pm.host().has_indicator(a.root, Indicator::Moving));

    // stray moves after release do nothing
    pm.handle_event(InputEvent::PointerMove(PointerEvent::nowhere(0, 0)));
    assert_eq!(pm.host().position(a.root), Position::new(220, 160));
}

#[test]
fn body_press_does_not_prevent_default() {
    let (mut pm, nodes) = desk(1);
    let out = pm.handle_event(InputEvent::PointerDown(PointerEvent::at(nodes[0].body, 5, 5)));
    assert!(out.consumed);
    assert!(!out.prevent_default);
    assert!(!pm.is_dragging());
}

#[test]
fn lifecycle_callbacks_fire_in_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut doc = Document::new();
    let nodes = doc.build_panel(&PanelBlueprint::new("logged"));
    let mut pm = PanelManager::new(doc);

    let push = |name: &'static str| {
        let log = log.clone();
        move |_: &dyn PanelHost, _: NodeId| {
            log.borrow_mut().push(name);
            true
        }
    };
    let config = PanelConfig::new()
        .on_init(push("init"))
        .on_minimize(push("minimize"))
        .on_restore(push("restore"))
        .on_close(push("close"));
    pm.init(nodes.root, config).unwrap();

    pm.minimize(nodes.root).unwrap();
    pm.minimize(nodes.root).unwrap();
    pm.restore(nodes.root).unwrap();
    pm.handle_event(InputEvent::Click {
        target: nodes.close.unwrap(),
    });

    assert_eq!(
        *log.borrow(),
        vec!["init", "minimize", "minimize", "restore", "close"]
    );
    assert_eq!(pm.restore(nodes.root), Err(PanelError::NotFound(nodes.root)));
    assert_eq!(pm.close(nodes.root), Err(PanelError::NotFound(nodes.root)));
    assert_eq!(log.borrow().len(), 5);
}

#[test]
fn invoke_by_name() {
    let (mut pm, nodes) = desk(1);
    let root = nodes[0].root;
    pm.invoke(root, "minimize").unwrap();
    assert!(pm.is_minimized(root));
    pm.invoke(root, "restore").unwrap();
    assert!(!pm.is_minimized(root));
    assert_eq!(
        pm.invoke(root, "maximize"),
        Err(PanelError::InvalidOperation("maximize".to_string()))
    );
    pm.invoke(root, "close").unwrap();
    assert!(!pm.host().contains(root));
}

#[test]
fn panels_without_controls_still_drag() {
    let mut doc = Document::new();
    let blueprint = PanelBlueprint::new("bare").closable(false).minimizable(false);
    let nodes = doc.build_panel(&blueprint);
    let mut pm = PanelManager::new(doc);
    pm.init(nodes.root, PanelConfig::new()).unwrap();

    assert_eq!(
        pm.handle_event(InputEvent::Click { target: nodes.body }),
        EventOutcome::IGNORED
    );
    pm.handle_event(InputEvent::TouchStart(PointerEvent::at(nodes.handle, 0, 0)));
    pm.handle_event(InputEvent::TouchMove(PointerEvent::nowhere(1, 1)));
    pm.handle_event(InputEvent::TouchEnd(PointerEvent::nowhere(1, 1)));
    assert_eq!(pm.host().position(nodes.root), Position::new(21, 221));
}

#[test]
fn explicit_focus_order_is_kept() {
    let mut doc = Document::new();
    let nodes = doc.build_panel(&PanelBlueprint::new("ordered").focus_order(7));
    let mut pm = PanelManager::new(doc);
    pm.init(nodes.root, PanelConfig::new()).unwrap();
    assert_eq!(pm.host().focus_order(nodes.handle), Some(7));
}
