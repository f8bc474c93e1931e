//! Window and OpenGL ES context host for the triangle renderer, with desktop
//! and Android entry points.

mod app;
mod gl_context;

pub use app::App;
pub use gl_context::GlContext;

use anyhow::Result;
use renderer::Config;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

/// Installs the `fmt` subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Android may start the library twice in one process.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub fn run(event_loop: EventLoop<()>, config: Config) -> Result<()> {
    tracing::info!(?config, "starting");
    let app = App::new(&event_loop, &config)?;
    app.run(event_loop)
}

#[cfg(target_os = "android")]
#[no_mangle]
fn android_main(app: winit::platform::android::activity::AndroidApp) {
    use winit::{event_loop::EventLoopBuilder, platform::android::EventLoopBuilderExtAndroid};

    init_logging();
    let result = EventLoopBuilder::new()
        .with_android_app(app)
        .build()
        .map_err(anyhow::Error::from)
        .and_then(|event_loop| run(event_loop, Config::default()));
    if let Err(err) = result {
        tracing::error!("{err:#}");
    }
}
