use crate::api::config::AppConfig;
use crate::api::types::{AppEvent, Viewport, EVENT_CANCELLED, EVENT_CONFIRMED};
use crate::input::queue::{InputEvent, InputQueue, Key};
use crate::modal::controller::{ModalOutcome, ModalState};
use crate::modal::defaults::DefaultsTable;
use crate::modal::draw::draw_modal;
use crate::modal::layout::ModalLayout;
use crate::modal::session::ModalSession;
use crate::render::canvas::Canvas;
use crate::render::text::FixedAdvance;
use crate::scene::OrbitScene;

enum Phase {
    Modal(ModalState),
    Running(OrbitScene),
}

/// The whole toy: parameter modal and animation, alternating until the
/// modal is cancelled. The host pushes input, calls [`update`] then
/// [`draw`] every frame, and watches [`events`] / [`is_closed`].
///
/// [`update`]: OrbitalApp::update
/// [`draw`]: OrbitalApp::draw
/// [`events`]: OrbitalApp::events
/// [`is_closed`]: OrbitalApp::is_closed
pub struct OrbitalApp {
    viewport: Viewport,
    session: ModalSession,
    defaults: DefaultsTable,
    phase: Phase,
    events: Vec<AppEvent>,
    max_events: usize,
    metrics: FixedAdvance,
    closed: bool,
}

fn push_event(events: &mut Vec<AppEvent>, max: usize, event: AppEvent) {
    if events.len() < max {
        events.push(event);
    }
}

impl OrbitalApp {
    pub fn new(config: &AppConfig) -> Self {
        let viewport = config.viewport();
        let session = ModalSession::default();
        let defaults = DefaultsTable::builtin();
        let phase = Phase::Modal(ModalState::open(&session, defaults.clone(), viewport));
        log::info!("modal opened at {}x{}", viewport.w, viewport.h);
        Self {
            viewport,
            session,
            defaults,
            phase,
            events: Vec::with_capacity(config.max_events),
            max_events: config.max_events,
            metrics: FixedAdvance::default(),
            closed: false,
        }
    }

    /// Replace the defaults table used for grid fills, including in the
    /// currently open modal. An empty table restores the built-ins.
    pub fn set_defaults(&mut self, table: DefaultsTable) {
        self.defaults = table.clone();
        if let Phase::Modal(state) = &mut self.phase {
            state.set_defaults(table);
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Events emitted during the most recent `update`.
    pub fn events(&self) -> &[AppEvent] {
        &self.events
    }

    /// True once the modal has been cancelled; the host should stop
    /// ticking and tear down.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    /// The open modal's state, when in the modal phase.
    pub fn modal(&self) -> Option<&ModalState> {
        match &self.phase {
            Phase::Modal(state) => Some(state),
            Phase::Running(_) => None,
        }
    }

    /// The animated bodies, when in the running phase.
    pub fn bodies(&self) -> Option<&[crate::api::types::Body]> {
        match &self.phase {
            Phase::Running(scene) => Some(scene.bodies()),
            Phase::Modal(_) => None,
        }
    }

    /// One frame of logic: drain pending input against the frame's layout,
    /// apply any phase transition, advance the animation.
    pub fn update(&mut self, input: &mut InputQueue, dt: f32) {
        self.events.clear();
        let events = input.drain();
        let mut next: Option<Phase> = None;

        match &mut self.phase {
            Phase::Modal(state) => {
                let layout =
                    ModalLayout::compute(self.viewport, state.grid().len(), state.scroll());
                for event in &events {
                    let Some(outcome) = state.handle_event(event, &layout) else {
                        continue;
                    };
                    state.save_into(&mut self.session);
                    match outcome {
                        ModalOutcome::Confirmed { bodies, count } => {
                            log::info!("confirmed {count} bodies, starting animation");
                            push_event(
                                &mut self.events,
                                self.max_events,
                                AppEvent {
                                    kind: EVENT_CONFIRMED,
                                    a: count as f32,
                                    ..AppEvent::default()
                                },
                            );
                            next = Some(Phase::Running(OrbitScene::new(bodies, self.viewport)));
                        }
                        ModalOutcome::Cancelled => {
                            log::info!("modal cancelled");
                            push_event(
                                &mut self.events,
                                self.max_events,
                                AppEvent {
                                    kind: EVENT_CANCELLED,
                                    ..AppEvent::default()
                                },
                            );
                            self.closed = true;
                        }
                    }
                    break;
                }
            }
            Phase::Running(scene) => {
                let leave = events.iter().any(|event| {
                    matches!(
                        event,
                        InputEvent::Quit
                            | InputEvent::KeyDown {
                                key: Key::Escape,
                                ..
                            }
                    )
                });
                if leave {
                    // reopen the modal seeded with the last-run values
                    self.defaults =
                        DefaultsTable::from_bodies(scene.bodies(), self.viewport.base_radius());
                    next = Some(Phase::Modal(ModalState::open(
                        &self.session,
                        self.defaults.clone(),
                        self.viewport,
                    )));
                } else {
                    scene.advance(dt);
                }
            }
        }

        if let Some(phase) = next {
            self.phase = phase;
        }
    }

    /// Emit the current frame into `canvas` (cleared by the caller).
    pub fn draw(&self, canvas: &mut Canvas) {
        match &self.phase {
            Phase::Modal(state) => {
                let layout =
                    ModalLayout::compute(self.viewport, state.grid().len(), state.scroll());
                draw_modal(state, &layout, &self.metrics, canvas);
            }
            Phase::Running(scene) => scene.draw(canvas),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::MAX_BODIES;
    use crate::modal::defaults::BodyDefaults;

    fn app() -> OrbitalApp {
        OrbitalApp::new(&AppConfig::default())
    }

    fn press_ok(app: &mut OrbitalApp, input: &mut InputQueue) {
        let state = app.modal().expect("modal open");
        let layout =
            ModalLayout::compute(app.viewport(), state.grid().len(), state.scroll());
        let p = layout.ok_btn.center();
        input.push(InputEvent::PointerDown { x: p.x, y: p.y });
        app.update(input, 0.0);
    }

    #[test]
    fn confirm_starts_animation_and_emits_event() {
        let mut app = app();
        let mut input = InputQueue::new();
        press_ok(&mut app, &mut input);
        assert!(app.is_animating());
        assert_eq!(app.bodies().unwrap().len(), 9);
        let events = app.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EVENT_CONFIRMED);
        assert_eq!(events[0].a, 9.0);
    }

    #[test]
    fn animation_advances_bodies() {
        let mut app = app();
        let mut input = InputQueue::new();
        press_ok(&mut app, &mut input);
        let before: Vec<f64> = app.bodies().unwrap().iter().map(|b| b.ang).collect();
        app.update(&mut input, 1.0 / 60.0);
        let after: Vec<f64> = app.bodies().unwrap().iter().map(|b| b.ang).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn escape_returns_to_modal_with_session_intact() {
        let mut app = app();
        let mut input = InputQueue::new();
        press_ok(&mut app, &mut input);
        input.push(InputEvent::KeyDown {
            key: Key::Escape,
            shift: false,
        });
        app.update(&mut input, 0.0);
        assert!(!app.is_animating());
        assert!(!app.is_closed());
        let state = app.modal().unwrap();
        assert!(state.use_defaults());
        assert_eq!(state.grid().len(), 9);
        assert_eq!(state.grid().cell(0, 0).text, "0.12");
    }

    #[test]
    fn reopened_modal_is_seeded_from_previous_bodies() {
        let mut app = app();
        let mut input = InputQueue::new();
        press_ok(&mut app, &mut input);
        input.push(InputEvent::KeyDown {
            key: Key::Escape,
            shift: false,
        });
        app.update(&mut input, 0.0);

        // confirming again reproduces the previous run's geometry
        press_ok(&mut app, &mut input);
        let bodies = app.bodies().unwrap();
        let base = app.viewport().base_radius();
        assert!((bodies[0].rx / base - 0.15).abs() < 1e-9);
        assert!((bodies[0].ry / base - 0.12).abs() < 1e-9);
    }

    #[test]
    fn cancel_emits_event_and_closes() {
        let mut app = app();
        let mut input = InputQueue::new();
        input.push(InputEvent::KeyDown {
            key: Key::Escape,
            shift: false,
        });
        app.update(&mut input, 0.0);
        assert!(app.is_closed());
        assert_eq!(app.events()[0].kind, EVENT_CANCELLED);
    }

    #[test]
    fn set_defaults_reaches_the_open_modal() {
        let mut app = app();
        let table = DefaultsTable::new(vec![BodyDefaults {
            rel_rx: 0.5,
            rel_ry: 0.4,
            rel_omega: 2.0,
            grid_size: 5,
        }]);
        app.set_defaults(table);
        let mut input = InputQueue::new();
        press_ok(&mut app, &mut input);
        let bodies = app.bodies().unwrap();
        let base = app.viewport().base_radius();
        assert!((bodies[0].rx / base - 0.5).abs() < 1e-9);
        // indices beyond the 1-entry table use the fallback formulas
        assert!((bodies[1].rx / base - (0.1 + 0.08)).abs() < 1e-9);
        assert_eq!(bodies.len(), 9);
        assert!(bodies.len() <= MAX_BODIES);
    }

    #[test]
    fn draw_dispatches_by_phase() {
        let mut app = app();
        let mut canvas = Canvas::new(4096);
        app.draw(&mut canvas);
        assert!(canvas.cmd_count() > 0, "modal frame has commands");

        let mut input = InputQueue::new();
        press_ok(&mut app, &mut input);
        canvas.clear();
        app.draw(&mut canvas);
        assert!(canvas.cmd_count() > 0, "animation frame has commands");
    }
}
