use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct MenuOverlayProps {
    pub show: bool,
    /// A map already exists; starting again replaces it.
    pub has_map: bool,
    pub on_start: Callback<()>,
}

#[function_component(MenuOverlay)]
pub fn menu_overlay(props: &MenuOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let start_btn = {
        let cb = props.on_start.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let label = if props.has_map { "New Map" } else { "Start" };
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); text-align:center; color:#fff; max-width:520px; width:90%;">
            <h2 style="margin:0 0 16px 0; font-size:36px;">{"Homebrew RTS"}</h2>
            <p style="margin:0 0 18px 0; font-size:20px; opacity:0.9;">{"Press ENTER to Start / ESC to Toggle Menu"}</p>
            <ul style="margin:0 auto 16px auto; padding:0; list-style:none; font-size:14px; opacity:0.75; display:flex; flex-direction:column; gap:4px;">
                <li>{"Click a tile to select it."}</li>
                <li>{"Drag to pan; wheel or +/- to zoom; arrow keys to scroll."}</li>
            </ul>
            <button onclick={start_btn}>{ label }</button>
        </div>
    }
}
