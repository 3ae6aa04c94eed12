use crate::util::format_zoom;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub run_id: u32,
    pub columns: u32,
    pub rows: u32,
    pub scale: f64,
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;";
    let label_style = "flex:1; font-weight:500; color:#8b949e;";
    let value_style = "min-width:70px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    html! {
        <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:180px; display:flex; flex-direction:column; gap:6px; font-size:14px;">
            <div style={row_style}>
                <span style={label_style}>{"Map"}</span>
                <span style={value_style}>{ format!("#{}", props.run_id) }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Size"}</span>
                <span style={value_style}>{ format!("{}×{}", props.columns, props.rows) }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Zoom"}</span>
                <span style={value_style}>{ format_zoom(props.scale) }</span>
            </div>
        </div>
    }
}
