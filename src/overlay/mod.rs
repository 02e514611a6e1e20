//! Browser overlay: builds the game container, canvas, speed slider and restart
//! button on top of the host page and wires their events to the [`Session`].
//!
//! The session lives in a thread-local slot because DOM and timer callbacks
//! have no other way to reach it. Every callback goes through [`with_session`].

mod canvas;
mod timer;

use std::cell::RefCell;

use log::error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlButtonElement, HtmlCanvasElement, HtmlInputElement,
    Window,
};

use crate::config::{
    CANVAS_HEIGHT, CANVAS_ID, CANVAS_WIDTH, CONTAINER_ID, CONTAINER_STYLE, RESTART_ID,
    RESTART_LABEL, RESTART_STYLE, SLIDER_ID, SLIDER_STYLE, SPEED_MAX, SPEED_MIN, SpeedSetting,
};
use crate::error::GameError;
use crate::game::{Command, GameState};
use crate::input::{command_for_key, command_for_slider};
use crate::piece::PieceGenerator;
use crate::session::Session;
use canvas::CanvasHost;

thread_local! {
    static SESSION: RefCell<Option<Session<CanvasHost>>> = const { RefCell::new(None) };
}

/// Run `f` against the live session, logging any host error it reports.
pub(crate) fn with_session<F>(f: F)
where
    F: FnOnce(&mut Session<CanvasHost>) -> Result<(), GameError>,
{
    SESSION.with_borrow_mut(|slot| {
        if let Some(session) = slot.as_mut() {
            if let Err(err) = f(session) {
                error!("game loop: {err}");
            }
        }
    });
}

pub(crate) fn is_mounted() -> bool {
    SESSION.with_borrow(|slot| slot.is_some())
}

/// Elements created by [`mount`].
struct Overlay {
    host: CanvasHost,
    slider: HtmlInputElement,
    button: HtmlButtonElement,
}

/// Mount the overlay and start playing. Calling this again restarts the
/// running game instead of mounting a second overlay.
pub fn start() -> Result<(), GameError> {
    if is_mounted() {
        with_session(Session::restart);
        return Ok(());
    }
    let window = web_sys::window().ok_or(GameError::NoWindow)?;
    let document = window.document().ok_or(GameError::NoDocument)?;
    let state = GameState::new(PieceGenerator::from_entropy()?);

    let overlay = attach(&window, &document, install_listeners)?;

    let session = Session::new(state, overlay.host);
    SESSION.with_borrow_mut(|slot| *slot = Some(session));
    with_session(Session::start);
    Ok(())
}

pub fn restart() {
    with_session(Session::restart);
}

/// Change the fall speed from script, keeping the slider in sync.
pub fn set_speed(speed: SpeedSetting) {
    with_session(|session| {
        session.host().show_speed(speed);
        session.dispatch(Command::SetSpeed(speed))
    });
}

#[cfg(feature = "serde_json")]
pub fn snapshot_json() -> Option<String> {
    SESSION.with_borrow(|slot| {
        let snapshot = slot.as_ref()?.state().snapshot();
        match serde_json::to_string(&snapshot) {
            Ok(json) => Some(json),
            Err(err) => {
                error!("snapshot: {err}");
                None
            }
        }
    })
}

/// Mount the overlay and `wire` it up. If either step fails the elements are
/// taken off the page again, so a later start mounts a single overlay.
fn attach<F>(window: &Window, document: &Document, wire: F) -> Result<Overlay, GameError>
where
    F: FnOnce(&Document, &Overlay) -> Result<(), GameError>,
{
    let attached = mount(window, document).and_then(|overlay| {
        wire(document, &overlay)?;
        Ok(overlay)
    });
    if attached.is_err() {
        unmount(document);
    }
    attached
}

fn unmount(document: &Document) {
    for id in [CONTAINER_ID, SLIDER_ID, RESTART_ID] {
        if let Some(element) = document.get_element_by_id(id) {
            element.remove();
        }
    }
}

fn mount(window: &Window, document: &Document) -> Result<Overlay, GameError> {
    let body = document.body().ok_or(GameError::NoBody)?;

    let container = document.create_element("div")?;
    container.set_id(CONTAINER_ID);
    container.set_attribute("style", CONTAINER_STYLE)?;
    body.append_child(&container)?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| GameError::WrongElement(CANVAS_ID))?;
    canvas.set_id(CANVAS_ID);
    canvas.set_width(CANVAS_WIDTH);
    canvas.set_height(CANVAS_HEIGHT);
    container.append_child(&canvas)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(GameError::NoContext)?
        .dyn_into()
        .map_err(|_| GameError::NoContext)?;

    let slider: HtmlInputElement = document
        .create_element("input")?
        .dyn_into()
        .map_err(|_| GameError::WrongElement(SLIDER_ID))?;
    slider.set_id(SLIDER_ID);
    slider.set_type("range");
    slider.set_min(&SPEED_MIN.to_string());
    slider.set_max(&SPEED_MAX.to_string());
    slider.set_value(&SpeedSetting::default().value().to_string());
    slider.set_attribute("style", SLIDER_STYLE)?;
    body.append_child(&slider)?;

    let button: HtmlButtonElement = document
        .create_element("button")?
        .dyn_into()
        .map_err(|_| GameError::WrongElement(RESTART_ID))?;
    button.set_id(RESTART_ID);
    button.set_text_content(Some(RESTART_LABEL));
    button.set_attribute("style", RESTART_STYLE)?;
    body.append_child(&button)?;

    Ok(Overlay {
        host: CanvasHost::new(window.clone(), ctx, slider.clone()),
        slider,
        button,
    })
}

fn install_listeners(document: &Document, overlay: &Overlay) -> Result<(), GameError> {
    // Speed slider
    {
        let slider = overlay.slider.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            if let Some(command) = command_for_slider(&slider.value()) {
                with_session(|session| session.dispatch(command));
            }
        }) as Box<dyn FnMut(_)>);
        overlay
            .slider
            .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Restart button
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            with_session(Session::restart);
        }) as Box<dyn FnMut(_)>);
        overlay
            .button
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Arrow keys
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if let Some(command) = command_for_key(&evt.key()) {
                with_session(|session| session.dispatch(command));
            }
        }) as Box<dyn FnMut(_)>);
        document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}
