use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlCanvasElement, HtmlElement, KeyboardEvent, WheelEvent};
use yew::prelude::*;

use crate::model::Tile;
use crate::session::{InputCommand, Phase, Session};
use crate::state::{PointerRelease, PointerState};
use crate::util::clog;

use super::{
    camera_controls::CameraControls, canvas::CanvasSurface, legend_panel::LegendPanel,
    menu_overlay::MenuOverlay, stats_panel::StatsPanel, tile_info_panel::TileInfoPanel,
};

/// Shared session owned by the app; compared by identity.
#[derive(Clone)]
pub struct SessionHandle(pub Rc<RefCell<Session>>);

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self(Rc::new(RefCell::new(session)))
    }

    pub fn push(&self, cmd: InputCommand) {
        self.0.borrow_mut().push(cmd);
    }
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// What the HTML overlays show; refreshed after each frame when it changes.
#[derive(Clone, Debug, PartialEq)]
struct HudSnapshot {
    in_menu: bool,
    has_map: bool,
    selected: Option<Tile>,
    scale: f64,
    run_id: u32,
    columns: u32,
    rows: u32,
}

impl HudSnapshot {
    fn of(session: &Session) -> Self {
        let (columns, rows) = session
            .grid()
            .map(|g| (g.columns(), g.rows()))
            .unwrap_or((session.config().columns, session.config().rows));
        Self {
            in_menu: session.phase() == Phase::Menu,
            has_map: session.grid().is_some(),
            selected: session.selected_tile().cloned(),
            scale: session.viewport().scale(),
            run_id: session.run_id(),
            columns,
            rows,
        }
    }
}

type EventClosure = Closure<dyn FnMut(web_sys::Event)>;

/// DOM listeners and the animation frame loop for one mounted canvas.
/// Dropping it detaches everything.
struct CanvasBindings {
    window: web_sys::Window,
    listeners: Vec<(EventTarget, &'static str, EventClosure)>,
    raf_id: Rc<Cell<Option<i32>>>,
    frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl CanvasBindings {
    fn listen(
        &mut self,
        target: EventTarget,
        kind: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
        if target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .is_err()
        {
            clog(&format!("failed to attach {} listener", kind));
            return;
        }
        self.listeners.push((target, kind, closure));
    }
}

impl Drop for CanvasBindings {
    fn drop(&mut self) {
        for (target, kind, closure) in &self.listeners {
            let _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // breaks the frame closure's reference to itself
        self.frame.borrow_mut().take();
    }
}

fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0);
    canvas.set_width(width.max(0.0) as u32);
    canvas.set_height(height.max(0.0) as u32);
    (canvas.width() as f64, canvas.height() as f64)
}

/// Pixels per wheel "line" for browsers that report `DOM_DELTA_LINE`.
const WHEEL_LINE_HEIGHT: f64 = 16.0;

/// Zoom factor for one wheel event, with the delta normalized to pixels.
fn wheel_zoom_factor(delta_y: f64, delta_mode: u32, page_height: f64, sensitivity: f64) -> f64 {
    let pixels = match delta_mode {
        WheelEvent::DOM_DELTA_LINE => delta_y * WHEEL_LINE_HEIGHT,
        WheelEvent::DOM_DELTA_PAGE => delta_y * page_height,
        _ => delta_y,
    };
    (-pixels * sensitivity).exp()
}

fn key_command(key: &str, session: &Session) -> Option<InputCommand> {
    let cfg = session.config();
    let step = cfg.pan_step;
    match key {
        "Enter" => Some(InputCommand::Start),
        "Escape" => Some(InputCommand::ToggleMenu),
        "+" | "=" => Some(InputCommand::Zoom {
            factor: cfg.zoom_step,
            pivot: None,
        }),
        "-" | "_" => Some(InputCommand::Zoom {
            factor: 1.0 / cfg.zoom_step,
            pivot: None,
        }),
        "ArrowLeft" => Some(InputCommand::Pan { dx: -step, dy: 0.0 }),
        "ArrowRight" => Some(InputCommand::Pan { dx: step, dy: 0.0 }),
        "ArrowUp" => Some(InputCommand::Pan { dx: 0.0, dy: -step }),
        "ArrowDown" => Some(InputCommand::Pan { dx: 0.0, dy: step }),
        _ => None,
    }
}

fn bind_canvas(
    canvas: HtmlCanvasElement,
    session: SessionHandle,
    hud: UseStateHandle<HudSnapshot>,
) -> Option<CanvasBindings> {
    let window = web_sys::window()?;
    let mut bindings = CanvasBindings {
        window: window.clone(),
        listeners: Vec::new(),
        raf_id: Rc::new(Cell::new(None)),
        frame: Rc::new(RefCell::new(None)),
    };
    let pointer = Rc::new(RefCell::new(PointerState::default()));

    let (w, h) = fit_canvas(&window, &canvas);
    session.push(InputCommand::Resize {
        width: w,
        height: h,
    });

    // Mouse: left click selects, any drag pans
    {
        let pointer = pointer.clone();
        bindings.listen(canvas.clone().into(), "mousedown", move |e| {
            let Some(e) = e.dyn_ref::<web_sys::MouseEvent>() else {
                return;
            };
            pointer
                .borrow_mut()
                .press(e.offset_x() as f64, e.offset_y() as f64, e.button());
        });
    }
    {
        let pointer = pointer.clone();
        let session = session.clone();
        bindings.listen(canvas.clone().into(), "mousemove", move |e| {
            let Some(e) = e.dyn_ref::<web_sys::MouseEvent>() else {
                return;
            };
            let delta = pointer
                .borrow_mut()
                .move_to(e.offset_x() as f64, e.offset_y() as f64);
            if let Some((dx, dy)) = delta {
                session.push(InputCommand::Drag { dx, dy });
            }
        });
    }
    {
        let pointer = pointer.clone();
        let session = session.clone();
        bindings.listen(window.clone().into(), "mouseup", move |_e| {
            if let PointerRelease::Click { x, y } = pointer.borrow_mut().release() {
                session.push(InputCommand::Click { x, y });
            }
        });
    }
    bindings.listen(canvas.clone().into(), "contextmenu", |e| e.prevent_default());
    {
        let session = session.clone();
        bindings.listen(canvas.clone().into(), "wheel", move |e| {
            let Some(e) = e.dyn_ref::<WheelEvent>() else {
                return;
            };
            e.prevent_default();
            let factor = {
                let s = session.0.borrow();
                let (_, page_height) = s.viewport().size();
                wheel_zoom_factor(
                    e.delta_y(),
                    e.delta_mode(),
                    page_height,
                    s.config().wheel_sensitivity,
                )
            };
            session.push(InputCommand::Zoom {
                factor,
                pivot: Some((e.offset_x() as f64, e.offset_y() as f64)),
            });
        });
    }
    {
        let session = session.clone();
        bindings.listen(window.clone().into(), "keydown", move |e| {
            let Some(e) = e.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let cmd = key_command(&e.key(), &session.0.borrow());
            if let Some(cmd) = cmd {
                e.prevent_default();
                session.push(cmd);
            }
        });
    }
    {
        let session = session.clone();
        let canvas = canvas.clone();
        let window_resize = window.clone();
        bindings.listen(window.clone().into(), "resize", move |_e| {
            let (width, height) = fit_canvas(&window_resize, &canvas);
            session.push(InputCommand::Resize { width, height });
        });
    }

    // Frame loop: apply queued input, draw, then refresh the overlays
    {
        let raf_id = bindings.raf_id.clone();
        let frame_cell = bindings.frame.clone();
        let frame_self = bindings.frame.clone();
        let window_loop = window.clone();
        let last_hud = RefCell::new((*hud).clone());
        *frame_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let snapshot = {
                let mut s = session.0.borrow_mut();
                s.update();
                if canvas.is_connected() {
                    if let Some(mut surface) = CanvasSurface::from_canvas(&canvas) {
                        s.render(&mut surface);
                    }
                }
                HudSnapshot::of(&s)
            };
            if *last_hud.borrow() != snapshot {
                *last_hud.borrow_mut() = snapshot.clone();
                hud.set(snapshot);
            }
            if let Some(next) = frame_self.borrow().as_ref() {
                if let Ok(id) = window_loop.request_animation_frame(next.as_ref().unchecked_ref()) {
                    raf_id.set(Some(id));
                }
            }
        }) as Box<dyn FnMut()>));
        if let Some(first) = frame_cell.borrow().as_ref() {
            if let Ok(id) = window.request_animation_frame(first.as_ref().unchecked_ref()) {
                bindings.raf_id.set(Some(id));
            }
        }
    }

    Some(bindings)
}

#[derive(Properties, PartialEq, Clone)]
pub struct GameViewProps {
    pub session: SessionHandle,
}

#[function_component(GameView)]
pub fn game_view(props: &GameViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let hud = use_state(|| HudSnapshot::of(&props.session.0.borrow()));

    {
        let canvas_ref = canvas_ref.clone();
        let session = props.session.clone();
        let hud = hud.clone();
        use_effect_with(props.session.clone(), move |_| {
            let bindings = match canvas_ref.cast::<HtmlCanvasElement>() {
                Some(canvas) => bind_canvas(canvas, session, hud),
                None => {
                    clog("game canvas not mounted");
                    None
                }
            };
            move || drop(bindings)
        });
    }

    let push_cb = |cmd: InputCommand| {
        let session = props.session.clone();
        Callback::from(move |()| session.push(cmd.clone()))
    };
    let (zoom_step, pan_step) = {
        let s = props.session.0.borrow();
        (s.config().zoom_step, s.config().pan_step)
    };
    // keep keyboard focus on the page after clicking overlay buttons
    let blur_active = Callback::from(|_: MouseEvent| {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.active_element())
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.blur();
        }
    });

    html! {<div style="position:relative; width:100vw; height:100vh;" onclick={blur_active}>
        <canvas ref={canvas_ref.clone()} id="game-canvas" style="display:block; width:100%; height:100%;"></canvas>
        { if hud.has_map && !hud.in_menu { html!{ <>
            <StatsPanel run_id={hud.run_id} columns={hud.columns} rows={hud.rows} scale={hud.scale} />
            <TileInfoPanel tile={hud.selected.clone()} />
            <CameraControls
                on_zoom_in={push_cb(InputCommand::Zoom { factor: zoom_step, pivot: None })}
                on_zoom_out={push_cb(InputCommand::Zoom { factor: 1.0 / zoom_step, pivot: None })}
                on_pan_left={push_cb(InputCommand::Pan { dx: -pan_step, dy: 0.0 })}
                on_pan_right={push_cb(InputCommand::Pan { dx: pan_step, dy: 0.0 })}
                on_pan_up={push_cb(InputCommand::Pan { dx: 0.0, dy: -pan_step })}
                on_pan_down={push_cb(InputCommand::Pan { dx: 0.0, dy: pan_step })}
                on_center={push_cb(InputCommand::Center)} />
            <LegendPanel highlight={hud.selected.as_ref().map(|t| t.kind)} />
        </> } } else { html!{} } }
        <MenuOverlay show={hud.in_menu} has_map={hud.has_map} on_start={push_cb(InputCommand::Start)} />
    </div> }
}
