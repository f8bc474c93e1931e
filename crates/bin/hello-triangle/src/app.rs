use crate::gl_context::GlContext;
use anyhow::Result;
use renderer::{Config, GlBackend, SurfaceView, TriangleRenderer};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
};

pub struct App {
    // Dropped before `gl` so GL objects go while the context still exists.
    view: SurfaceView<GlBackend, TriangleRenderer<GlBackend>>,
    gl: GlContext,
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(event_loop: &EventLoop<()>, config: &Config) -> Result<Self> {
        let gl = GlContext::new(event_loop, &config.window)?;
        let view = SurfaceView::new(
            TriangleRenderer::new(config.renderer),
            config.window.render_mode,
        );
        Ok(Self {
            view,
            gl,
            error: None,
        })
    }

    pub fn run(mut self, event_loop: EventLoop<()>) -> Result<()> {
        event_loop.set_control_flow(ControlFlow::Wait);
        event_loop.run(|event, target| {
            if let Err(err) = self.handle_event(event, target) {
                tracing::error!("{err:#}");
                self.error.get_or_insert(err);
                target.exit();
            }
        })?;
        self.error.map_or(Ok(()), Err)
    }

    fn handle_event(&mut self, event: Event<()>, target: &EventLoopWindowTarget<()>) -> Result<()> {
        match event {
            Event::Resumed => {
                let backend = self.gl.resume(target)?;
                self.view.surface_created(backend)?;
                if let Some(size) = self.gl.window().map(|window| window.inner_size()) {
                    self.view.surface_changed(size.width, size.height);
                }
                self.request_redraw();
            }
            Event::Suspended => {
                self.view.surface_destroyed();
                self.gl.suspend()?;
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(size) => {
                    self.gl.resize(size.width, size.height);
                    self.view.surface_changed(size.width, size.height);
                }
                WindowEvent::Focused(focused) => {
                    self.view.set_focused(focused);
                    self.request_redraw();
                }
                WindowEvent::RedrawRequested => {
                    if self.view.draw_frame() {
                        self.gl.swap_buffers()?;
                    }
                }
                WindowEvent::CloseRequested => target.exit(),
                _ => {}
            },
            Event::AboutToWait => self.request_redraw(),
            Event::LoopExiting => self.view.surface_destroyed(),
            _ => {}
        }
        Ok(())
    }

    fn request_redraw(&self) {
        if !self.view.wants_redraw() {
            return;
        }
        if let Some(window) = self.gl.window() {
            window.request_redraw();
        }
    }
}
