use std::time::Instant;

use lapvis_engine::animation::{FrameLoop, LoopHandle, LoopState};
use lapvis_engine::coords::{Vec2, Viewport};
use lapvis_engine::core::{App, AppControl, FrameCtx};
use lapvis_engine::input::{InputFrame, InputState, Key, MouseButton};
use lapvis_engine::paint::Color;
use lapvis_engine::render::{GridFloorRenderer, QuadRenderer};
use lapvis_engine::scene::{GridScene, OverlayList};
use lapvis_engine::window::CursorIcon;

use crate::browser::Opener;
use crate::config::LandingConfig;
use crate::enter::EnterButton;
use crate::hud::{self, ButtonVisual, HudLayout};
use crate::telemetry::TelemetryFeed;

/// Near-black blue behind the grid.
const CLEAR: Color = Color { r: 0.004, g: 0.008, b: 0.016, a: 1.0 };

/// Loading pulse frequency in rad/s.
const PULSE_RATE: f32 = 6.0;

/// What a frame decided, before anything is drawn.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameOutcome {
    pub control: AppControl,
    pub button: ButtonVisual,
    /// Set when the window title must change.
    pub title: Option<&'static str>,
    pub cursor: CursorIcon,
}

/// The landing window: animated floor, telemetry HUD and enter button.
pub struct Landing {
    config: LandingConfig,
    frame_loop: FrameLoop,
    handle: LoopHandle,
    scene: GridScene,
    grid: GridFloorRenderer,
    quads: QuadRenderer,
    overlay: OverlayList,
    telemetry: TelemetryFeed,
    enter: EnterButton,
    opener: Box<dyn Opener>,
    shown_title: &'static str,
}

impl Landing {
    pub fn new(config: LandingConfig, opener: Box<dyn Opener>, now: Instant) -> Self {
        let scene = GridScene::new(config.width.round() as u32, config.height.round() as u32);
        let telemetry = TelemetryFeed::new(config.telemetry_interval, now, config.seed);
        let enter = EnterButton::new(config.redirect_delay);
        let frame_loop = FrameLoop::new();
        let handle = frame_loop.handle();

        Self {
            shown_title: enter.title(),
            config,
            frame_loop,
            handle,
            scene,
            grid: GridFloorRenderer::default(),
            quads: QuadRenderer::default(),
            overlay: OverlayList::new(),
            telemetry,
            enter,
            opener,
        }
    }

    /// Advances all state for the frame at `now`. Does not touch the GPU.
    pub fn update(
        &mut self,
        now: Instant,
        input: &InputState,
        input_frame: &InputFrame,
        viewport: Viewport,
    ) -> FrameOutcome {
        if self.frame_loop.state() == LoopState::Idle {
            self.frame_loop.start(now);
        }
        let Some(elapsed) = self.frame_loop.poll(now) else {
            return self.closing();
        };

        self.scene.advance(elapsed);
        self.telemetry.poll(now);

        let layout = HudLayout::new(viewport);
        let hovered = input
            .pointer_pos
            .is_some_and(|p| layout.button.contains(Vec2::from(p)));

        if input_frame.key_pressed(Key::Escape) {
            log::info!("escape pressed; closing");
            self.handle.cancel();
        }

        let clicked = hovered && input_frame.button_released(MouseButton::Left);
        let keyed = input_frame.key_pressed(Key::Enter) || input_frame.key_pressed(Key::Space);
        if (clicked || keyed) && self.enter.activate(now) {
            log::info!("loading dashboard {}", self.config.dashboard_url);
        }

        if self.enter.poll(now) {
            self.redirect();
        }

        if self.handle.is_cancelled() {
            return self.closing();
        }

        let button = if self.enter.is_loading() {
            let pulse = 0.5 + 0.5 * (elapsed.as_secs_f32() * PULSE_RATE).sin();
            ButtonVisual::Loading { progress: self.enter.progress(now), pulse }
        } else if hovered {
            ButtonVisual::Hover
        } else {
            ButtonVisual::Idle
        };

        let cursor = if hovered && !self.enter.is_loading() {
            CursorIcon::Pointer
        } else {
            CursorIcon::Default
        };

        FrameOutcome {
            control: AppControl::Continue,
            button,
            title: self.take_title_change(),
            cursor,
        }
    }

    fn redirect(&mut self) {
        let url = self.config.dashboard_url.as_str();
        match self.opener.open(url) {
            Ok(()) => {
                log::info!("opened {url}");
                self.handle.cancel();
            }
            Err(err) => {
                log::error!("could not open {url}: {err:#}");
                self.enter.reset();
            }
        }
    }

    fn take_title_change(&mut self) -> Option<&'static str> {
        let title = self.enter.title();
        if title == self.shown_title {
            return None;
        }
        self.shown_title = title;
        Some(title)
    }

    fn closing(&mut self) -> FrameOutcome {
        FrameOutcome {
            control: AppControl::Exit,
            button: ButtonVisual::Idle,
            title: self.take_title_change(),
            cursor: CursorIcon::Default,
        }
    }
}

impl App for Landing {
    fn on_resize(&mut self, width: u32, height: u32) {
        self.scene.on_resize(width, height);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (w, h) = ctx.window.logical_size();
        let viewport = Viewport::new(w, h);
        let outcome = self.update(ctx.now, ctx.input, ctx.input_frame, viewport);

        if let Some(title) = outcome.title {
            ctx.runtime.set_title(title);
        }
        if outcome.control == AppControl::Exit {
            return AppControl::Exit;
        }
        ctx.window.set_cursor(outcome.cursor);

        self.overlay.clear();
        if viewport.is_valid() {
            let readout = self.telemetry.current().readout();
            hud::build(&mut self.overlay, &HudLayout::new(viewport), &readout, outcome.button);
        }

        let (scene, grid, quads, overlay) = (&self.scene, &mut self.grid, &mut self.quads, &mut self.overlay);
        ctx.render(CLEAR, |rctx, target| {
            grid.render(rctx, target, scene);
            quads.render(rctx, target, overlay);
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use lapvis_engine::input::{InputEvent, KeyState, MouseButtonState};

    use super::*;
    use crate::browser::OpenError;

    #[derive(Clone, Default)]
    struct Recorder {
        opened: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl Opener for Recorder {
        fn open(&mut self, url: &str) -> Result<(), OpenError> {
            self.opened.borrow_mut().push(url.to_string());
            if self.fail {
                Err(OpenError::UnsupportedScheme(url.to_string()))
            } else {
                Ok(())
            }
        }
    }

    const VIEW: Viewport = Viewport::new(1280.0, 720.0);

    fn landing(rec: &Recorder) -> (Landing, Instant) {
        let t0 = Instant::now();
        let config = LandingConfig { seed: Some(1), ..LandingConfig::default() };
        (Landing::new(config, Box::new(rec.clone()), t0), t0)
    }

    fn press(key: Key) -> (InputState, InputFrame) {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::Key { key, state: KeyState::Pressed, repeat: false });
        (state, frame)
    }

    fn click_button() -> (InputState, InputFrame) {
        let c = HudLayout::new(VIEW).button.center();
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        for ev in [
            InputEvent::PointerMoved { x: c.x, y: c.y },
            InputEvent::PointerButton { button: MouseButton::Left, state: MouseButtonState::Pressed, x: c.x, y: c.y },
            InputEvent::PointerButton { button: MouseButton::Left, state: MouseButtonState::Released, x: c.x, y: c.y },
        ] {
            state.apply_event(&mut frame, ev);
        }
        (state, frame)
    }

    fn idle(l: &mut Landing, now: Instant) -> FrameOutcome {
        l.update(now, &InputState::default(), &InputFrame::default(), VIEW)
    }

    #[test]
    fn first_frame_starts_animation_at_zero() {
        let rec = Recorder::default();
        let (mut l, t0) = landing(&rec);
        let out = idle(&mut l, t0);
        assert_eq!(out.control, AppControl::Continue);
        assert_eq!(out.title, None);
        assert_eq!(l.scene.params().time, 0.0);
        assert_eq!(l.scene.params().scan, 0.0);

        idle(&mut l, t0 + Duration::from_millis(2500));
        assert!((l.scene.params().scan - 0.5).abs() < 1e-6);
    }

    #[test]
    fn enter_key_redirects_after_delay() {
        let rec = Recorder::default();
        let (mut l, t0) = landing(&rec);
        idle(&mut l, t0);

        let (s, f) = press(Key::Enter);
        let out = l.update(t0 + Duration::from_millis(16), &s, &f, VIEW);
        assert_eq!(out.title, Some(crate::enter::LOADING_TITLE));
        assert!(matches!(out.button, ButtonVisual::Loading { .. }));

        let out = idle(&mut l, t0 + Duration::from_millis(1000));
        assert_eq!(out.control, AppControl::Continue);
        assert!(rec.opened.borrow().is_empty());

        let out = idle(&mut l, t0 + Duration::from_millis(1216));
        assert_eq!(out.control, AppControl::Exit);
        assert_eq!(*rec.opened.borrow(), vec![crate::config::DEFAULT_DASHBOARD_URL.to_string()]);

        // Cancelled loops stay down.
        assert_eq!(idle(&mut l, t0 + Duration::from_secs(3)).control, AppControl::Exit);
        assert_eq!(rec.opened.borrow().len(), 1);
    }

    #[test]
    fn loop_starts_once() {
        let rec = Recorder::default();
        let (mut l, t0) = landing(&rec);
        idle(&mut l, t0);
        assert_eq!(l.frame_loop.state(), LoopState::Running { started: t0 });

        idle(&mut l, t0 + Duration::from_millis(500));
        assert_eq!(l.frame_loop.state(), LoopState::Running { started: t0 });
        assert!((l.scene.params().time - 0.5).abs() < 1e-6);
    }

    #[test]
    fn space_key_activates_button() {
        let rec = Recorder::default();
        let (mut l, t0) = landing(&rec);
        let (s, f) = press(Key::Space);
        let out = l.update(t0, &s, &f, VIEW);
        assert!(matches!(out.button, ButtonVisual::Loading { .. }));

        let out = idle(&mut l, t0 + Duration::from_millis(1200));
        assert_eq!(out.control, AppControl::Exit);
        assert_eq!(rec.opened.borrow().len(), 1);
    }

    #[test]
    fn click_inside_button_activates() {
        let rec = Recorder::default();
        let (mut l, t0) = landing(&rec);
        let (s, f) = click_button();
        let out = l.update(t0, &s, &f, VIEW);
        assert!(matches!(out.button, ButtonVisual::Loading { .. }));
        assert_eq!(out.cursor, CursorIcon::Default);
    }

    #[test]
    fn click_elsewhere_is_ignored() {
        let rec = Recorder::default();
        let (mut l, t0) = landing(&rec);
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        for ev in [
            InputEvent::PointerMoved { x: 5.0, y: 5.0 },
            InputEvent::PointerButton { button: MouseButton::Left, state: MouseButtonState::Pressed, x: 5.0, y: 5.0 },
            InputEvent::PointerButton { button: MouseButton::Left, state: MouseButtonState::Released, x: 5.0, y: 5.0 },
        ] {
            s.apply_event(&mut f, ev);
        }
        assert!(f.button_released(MouseButton::Left));
        let out = l.update(t0, &s, &f, VIEW);
        assert_eq!(out.button, ButtonVisual::Idle);
    }

    #[test]
    fn hover_shows_pointer() {
        let rec = Recorder::default();
        let (mut l, t0) = landing(&rec);
        let c = HudLayout::new(VIEW).button.center();
        let s = InputState { pointer_pos: Some((c.x, c.y)), ..InputState::default() };
        let out = l.update(t0, &s, &InputFrame::default(), VIEW);
        assert_eq!(out.button, ButtonVisual::Hover);
        assert_eq!(out.cursor, CursorIcon::Pointer);
    }

    #[test]
    fn failed_launch_returns_to_idle() {
        let rec = Recorder { fail: true, ..Recorder::default() };
        let (mut l, t0) = landing(&rec);
        let (s, f) = press(Key::Enter);
        l.update(t0, &s, &f, VIEW);

        let out = idle(&mut l, t0 + Duration::from_millis(1200));
        assert_eq!(out.control, AppControl::Continue);
        assert_eq!(out.button, ButtonVisual::Idle);
        assert_eq!(out.title, Some(crate::enter::IDLE_TITLE));
        assert_eq!(rec.opened.borrow().len(), 1);
    }

    #[test]
    fn escape_closes_without_redirect() {
        let rec = Recorder::default();
        let (mut l, t0) = landing(&rec);
        let (s, f) = press(Key::Escape);
        assert_eq!(l.update(t0, &s, &f, VIEW).control, AppControl::Exit);
        assert!(rec.opened.borrow().is_empty());
    }

    #[test]
    fn telemetry_ticks_with_frames() {
        let rec = Recorder::default();
        let (mut l, t0) = landing(&rec);
        let before = *l.telemetry.current();
        for i in 0..=60 {
            idle(&mut l, t0 + Duration::from_millis(i * 16));
        }
        assert_ne!(*l.telemetry.current(), before);
    }
}
