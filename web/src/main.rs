#[cfg(target_arch = "wasm32")]
mod app;

fn main() {
    dioxus::logger::initialize_default();

    #[cfg(target_arch = "wasm32")]
    app::launch();

    #[cfg(not(target_arch = "wasm32"))]
    tracing::error!("playfluence-web runs in the browser only; build for wasm32-unknown-unknown");
}
