use super::legend::LegendRow;
use crate::model::TileKind;
use crate::render::{kind_color, SELECTED_COLOR};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LegendPanelProps {
    /// Kind of the selected tile, highlighted in the list.
    #[prop_or_default]
    pub highlight: Option<TileKind>,
}

#[function_component]
pub fn LegendPanel(props: &LegendPanelProps) -> Html {
    let row = |kind: TileKind| {
        html! { <LegendRow color={kind_color(kind)} label={kind.label()} highlight={props.highlight == Some(kind)} /> }
    };
    html! {<div style="position:absolute; right:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:150px;">
        <div style="font-weight:600; margin-bottom:4px;">{"Legend"}</div>
        { row(TileKind::Water) }
        { row(TileKind::Grass) }
        { row(TileKind::Gold) }
        { row(TileKind::Plain) }
        <LegendRow color={SELECTED_COLOR} label="Selected" />
    </div>}
}
