use crate::model::Tile;
use crate::render::kind_color;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TileInfoPanelProps {
    pub tile: Option<Tile>,
}

fn kind_blurb(tile: &Tile) -> &'static str {
    use crate::model::TileKind::*;
    match tile.kind {
        Water => "Open sea. Nothing can be built here.",
        Grass => "Island land.",
        Gold => "Island land with a gold deposit.",
        Plain => "Unassigned terrain.",
    }
}

#[function_component]
pub fn TileInfoPanel(props: &TileInfoPanelProps) -> Html {
    let Some(tile) = &props.tile else {
        return html! {};
    };

    let panel_style = "position:absolute; right:12px; top:12px; \
        background:rgba(22,27,34,0.95); border:1px solid #30363d; border-radius:8px; \
        padding:12px 16px; min-width:200px; max-width:260px; font-size:13px; color:#c9d1d9;";
    let header_style = "font-weight:600; font-size:15px; margin-bottom:8px; display:flex; align-items:center; gap:8px;";
    let stat_row_style = "display:flex; justify-content:space-between; margin:4px 0; font-size:12px;";

    html! {
        <div style={panel_style}>
            <div style={header_style}>
                <span style={format!("display:inline-block; width:14px; height:14px; background:{}; border:1px solid #30363d; border-radius:3px;", kind_color(tile.kind))}></span>
                <span>{ tile.kind.label() }</span>
            </div>
            <div style={stat_row_style}>
                <span style="color:#8b949e;">{"Tile"}</span>
                <span>{ format!("({}, {})", tile.pos.x, tile.pos.y) }</span>
            </div>
            <div style="margin-top:8px; font-size:12px; opacity:0.8;">{ kind_blurb(tile) }</div>
        </div>
    }
}
