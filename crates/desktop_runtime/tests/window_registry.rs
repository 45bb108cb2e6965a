use desktop_runtime::config::DesktopConfig;
use desktop_runtime::event_bus::{DesktopEvent, DesktopTopic, EventBus};
use desktop_runtime::{
    reduce_desktop, DesktopAction, DesktopState, OpenWindowRequest, WindowId, WindowPosition,
    WindowSize,
};
use pretty_assertions::assert_eq;

struct Desktop {
    config: DesktopConfig,
    state: DesktopState,
}

impl Desktop {
    fn new() -> Self {
        Self {
            config: DesktopConfig::builtin().expect("embedded desktop config"),
            state: DesktopState::default(),
        }
    }

    fn apply(&mut self, action: DesktopAction) {
        reduce_desktop(&mut self.state, &self.config, action);
    }

    fn open(&mut self, title: &str) -> WindowId {
        self.apply(DesktopAction::OpenWindow(OpenWindowRequest::new(title)));
        self.state.windows.last().expect("window opened").id
    }

    fn active_title(&self) -> Option<&str> {
        self.state
            .windows
            .iter()
            .find(|win| win.is_active)
            .map(|win| win.title.as_str())
    }

    fn assert_invariants(&self) {
        let active = self.state.active_count();
        if self.state.visible_windows().next().is_some() {
            assert_eq!(active, 1, "exactly one active window: {:?}", self.state);
        } else {
            assert_eq!(active, 0, "no active window without visible ones: {:?}", self.state);
        }
        let layout = self.config.window;
        for pair in self.state.windows.windows(2) {
            assert!(pair[0].id.0 < pair[1].id.0, "ids increase in opening order");
        }
        for win in &self.state.windows {
            assert!(!(win.is_active && win.is_minimized), "active window is minimized");
            assert!(win.position.x >= 0 && win.position.y >= 0);
            assert!(win.size.width >= layout.min_width && win.size.height >= layout.min_height);
            assert!(win.id.0 < self.state.next_window_id);
        }
    }
}

#[test]
fn closing_the_active_window_hands_off_to_the_last_survivor() {
    let mut desktop = Desktop::new();
    let a = desktop.open("A");
    let b = desktop.open("B");
    assert_eq!(desktop.active_title(), Some("B"));
    assert!(!desktop.state.window(a).expect("A").is_active);

    desktop.apply(DesktopAction::CloseWindow { window_id: b });
    assert_eq!(desktop.active_title(), Some("A"));
    desktop.assert_invariants();
}

#[test]
fn minimizing_follows_last_non_minimized_tie_break() {
    let mut desktop = Desktop::new();
    desktop.open("A");
    let b = desktop.open("B");
    let c = desktop.open("C");

    desktop.apply(DesktopAction::MinimizeWindow { window_id: b });
    assert_eq!(desktop.active_title(), Some("C"));

    desktop.apply(DesktopAction::MinimizeWindow { window_id: c });
    assert_eq!(desktop.active_title(), Some("A"));
    desktop.assert_invariants();
}

#[test]
fn minimizing_a_background_window_still_reselects_the_last_survivor() {
    let mut desktop = Desktop::new();
    let a = desktop.open("A");
    let b = desktop.open("B");
    desktop.open("C");
    desktop.apply(DesktopAction::ActivateWindow { window_id: a });
    assert_eq!(desktop.active_title(), Some("A"));

    desktop.apply(DesktopAction::MinimizeWindow { window_id: b });
    assert_eq!(desktop.active_title(), Some("C"));
    desktop.assert_invariants();
}

#[test]
fn geometry_is_clamped_whatever_the_input() {
    let mut desktop = Desktop::new();
    let id = desktop.open("Notepad");
    desktop.apply(DesktopAction::MoveWindow {
        window_id: id,
        position: WindowPosition { x: -400, y: 25 },
    });
    desktop.apply(DesktopAction::ResizeWindow {
        window_id: id,
        size: WindowSize {
            width: -10,
            height: 250,
        },
    });

    let win = desktop.state.window(id).expect("window");
    assert_eq!(win.position, WindowPosition { x: 0, y: 25 });
    assert_eq!(
        win.size,
        WindowSize {
            width: 300,
            height: 250
        }
    );
}

#[test]
fn close_all_keeps_the_id_counter() {
    let mut desktop = Desktop::new();
    desktop.open("A");
    let last = desktop.open("B");
    desktop.apply(DesktopAction::CloseAllWindows);
    assert!(desktop.state.windows.is_empty());

    let x = desktop.open("X");
    assert_eq!(desktop.state.windows.len(), 1);
    assert_eq!(desktop.active_title(), Some("X"));
    assert!(x.0 > last.0);
}

#[test]
fn unknown_ids_leave_the_registry_untouched() {
    let mut desktop = Desktop::new();
    desktop.open("A");
    let before = desktop.state.clone();
    let ghost = WindowId(999);
    for action in [
        DesktopAction::CloseWindow { window_id: ghost },
        DesktopAction::MinimizeWindow { window_id: ghost },
        DesktopAction::RestoreWindow { window_id: ghost },
        DesktopAction::ActivateWindow { window_id: ghost },
        DesktopAction::MoveWindow {
            window_id: ghost,
            position: WindowPosition { x: 5, y: 5 },
        },
    ] {
        desktop.apply(action);
    }
    assert_eq!(desktop.state, before);
}

#[test]
fn minimize_then_restore_touches_only_the_target() {
    let mut desktop = Desktop::new();
    let a = desktop.open("A");
    let b = desktop.open("B");
    desktop.open("C");
    desktop.apply(DesktopAction::MinimizeWindow { window_id: a });

    desktop.apply(DesktopAction::MinimizeWindow { window_id: b });
    desktop.apply(DesktopAction::RestoreWindow { window_id: b });

    let minimized = desktop
        .state
        .windows
        .iter()
        .map(|win| (win.title.as_str(), win.is_minimized))
        .collect::<Vec<_>>();
    assert_eq!(minimized, vec![("A", true), ("B", false), ("C", false)]);
    assert_eq!(desktop.active_title(), Some("B"));
}

#[test]
fn bus_requests_reach_the_registry_owner() {
    let bus = EventBus::new();
    let desktop = std::rc::Rc::new(std::cell::RefCell::new(Desktop::new()));
    let owner = desktop.clone();
    bus.subscribe(DesktopTopic::OpenWindow, move |event| {
        if let DesktopEvent::OpenWindow(request) = event {
            owner
                .borrow_mut()
                .apply(DesktopAction::OpenWindow(request.clone()));
        }
    });

    let delivered = bus
        .publish_wire("openWindow", serde_json::json!({ "title": "Calculator" }))
        .expect("well-formed request");
    assert_eq!(delivered, 1);
    assert_eq!(desktop.borrow().active_title(), Some("Calculator"));
}

/// Deterministic linear congruential generator so the sequence below is reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }

    fn delta(&mut self) -> i32 {
        self.below(1_201) as i32 - 600
    }
}

#[test]
fn invariants_hold_across_arbitrary_action_sequences() {
    let mut desktop = Desktop::new();
    let mut rng = Lcg(0x5eed);
    let mut highest_id = 0;

    for step in 0..2_000 {
        let pick = |desktop: &Desktop, rng: &mut Lcg| {
            let ids = desktop.state.windows.iter().map(|win| win.id).collect::<Vec<_>>();
            if ids.is_empty() || rng.below(10) == 0 {
                WindowId(rng.below(64))
            } else {
                ids[rng.below(ids.len() as u64) as usize]
            }
        };

        let action = match rng.below(10) {
            0 | 1 => DesktopAction::OpenWindow(OpenWindowRequest::new(format!("Window {step}"))),
            2 => DesktopAction::CloseWindow {
                window_id: pick(&desktop, &mut rng),
            },
            3 => DesktopAction::MinimizeWindow {
                window_id: pick(&desktop, &mut rng),
            },
            4 => DesktopAction::RestoreWindow {
                window_id: pick(&desktop, &mut rng),
            },
            5 => DesktopAction::ActivateWindow {
                window_id: pick(&desktop, &mut rng),
            },
            6 => DesktopAction::MoveWindow {
                window_id: pick(&desktop, &mut rng),
                position: WindowPosition {
                    x: rng.delta(),
                    y: rng.delta(),
                },
            },
            7 => DesktopAction::ResizeWindow {
                window_id: pick(&desktop, &mut rng),
                size: WindowSize {
                    width: rng.delta(),
                    height: rng.delta(),
                },
            },
            8 => DesktopAction::SelectTaskbarWindow {
                window_id: pick(&desktop, &mut rng),
            },
            _ if rng.below(20) == 0 => DesktopAction::CloseAllWindows,
            _ => DesktopAction::ToggleStartMenu,
        };

        let opening = matches!(action, DesktopAction::OpenWindow(_));
        desktop.apply(action);
        desktop.assert_invariants();

        if opening {
            let id = desktop.state.windows.last().expect("opened").id.0;
            assert!(id > highest_id, "ids are never reused");
            highest_id = id;
        }
    }
}
