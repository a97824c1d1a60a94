mod app;
mod config;
mod constants;
mod debounce;
mod error;
mod field;
mod frame_loop;
mod rng;
mod starfield;
mod surface;

fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
