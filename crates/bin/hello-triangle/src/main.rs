use anyhow::Result;
use renderer::Config;
use winit::event_loop::EventLoop;

fn main() -> Result<()> {
    hello_triangle::init_logging();
    let config = Config::load_or_default(Config::path_from_env())?;
    let event_loop = EventLoop::new()?;
    hello_triangle::run(event_loop, config)
}
