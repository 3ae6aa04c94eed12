use homebrew_rts::components::App;

fn main() {
    homebrew_rts::logging::init();
    yew::Renderer::<App>::new().render();
}
