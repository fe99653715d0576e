use crate::app::App;

mod app;
mod files;
mod gateway;
mod pages;
mod toasts;

fn main() {
    yew::Renderer::<App>::new().render();
}
