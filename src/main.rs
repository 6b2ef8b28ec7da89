mod app;
mod config;
mod image_loader;
mod layout;
mod models;
mod showcase;
mod ui;

use app::BrandwallApp;

fn main() {
    // Prefer C numeric locale up-front so CSS numbers parse the same everywhere.
    std::env::set_var("LC_NUMERIC", "C");
    unsafe {
        libc::setlocale(libc::LC_NUMERIC, b"C\0".as_ptr().cast());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("brandwall=info".parse().expect("static directive")),
        )
        .init();

    let app = BrandwallApp::new();
    std::process::exit(app.run());
}
