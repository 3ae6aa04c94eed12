use super::game_view::{GameView, SessionHandle};
use crate::config::GameConfig;
use crate::session::Session;
use crate::util::{clog, random_seed};
use yew::prelude::*;

const CONFIG_KEY: &str = "rts_config";

/// Reads config overrides from localStorage, falling back to defaults.
fn load_config() -> GameConfig {
    let raw = web_sys::window()
        .and_then(|win| win.local_storage().ok().flatten())
        .and_then(|store| store.get_item(CONFIG_KEY).ok().flatten());
    match raw {
        Some(raw) => GameConfig::from_json(&raw).unwrap_or_else(|err| {
            clog(&format!("ignoring stored {}: {}", CONFIG_KEY, err));
            tracing::warn!(%err, "stored config rejected");
            GameConfig::default()
        }),
        None => GameConfig::default(),
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let session = use_state(|| {
        Session::new(load_config(), random_seed())
            .map(SessionHandle::new)
            .map_err(|err| err.to_string())
    });

    match &*session {
        Ok(handle) => html! { <GameView session={handle.clone()} /> },
        Err(msg) => html! {
            <div style="padding:24px; color:#f85149;">{ format!("Cannot start: {}", msg) }</div>
        },
    }
}
