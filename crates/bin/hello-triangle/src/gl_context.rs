use anyhow::{anyhow, bail, Context as _, Result};
use glutin::{
    config::{Config, ConfigTemplateBuilder, GlConfig},
    context::{
        ContextApi, ContextAttributesBuilder, NotCurrentContext, NotCurrentGlContext,
        PossiblyCurrentContext, PossiblyCurrentGlContext, Version,
    },
    display::{GetGlDisplay, GlDisplay},
    surface::{GlSurface, Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasRawWindowHandle;
use renderer::{GlBackend, WindowConfig};
use std::num::NonZeroU32;
use winit::{
    dpi::PhysicalSize,
    event_loop::EventLoopWindowTarget,
    window::{Window, WindowBuilder},
};

pub(crate) fn window_builder(config: &WindowConfig) -> WindowBuilder {
    WindowBuilder::new()
        .with_title(&config.title)
        .with_inner_size(PhysicalSize::new(config.width, config.height))
}

enum ContextState {
    NotCurrent(NotCurrentContext),
    Current {
        context: PossiblyCurrentContext,
        surface: Surface<WindowSurface>,
    },
    Lost,
}

/// Window, GL context and window surface for one on-screen view.
///
/// The context outlives surfaces: on platforms that take the native window
/// away (Android) the surface and window are dropped on suspend and rebuilt on
/// resume, while the context object is kept.
pub struct GlContext {
    config: Config,
    window_builder: WindowBuilder,
    window: Option<Window>,
    state: ContextState,
    vsync: bool,
}

impl GlContext {
    pub fn new(target: &EventLoopWindowTarget<()>, window_config: &WindowConfig) -> Result<Self> {
        let window_builder = window_builder(window_config);

        // WGL needs a window to pick a config; everywhere else the window is
        // created on resume.
        let display_builder =
            DisplayBuilder::new().with_window_builder(cfg!(windows).then(|| window_builder.clone()));
        let (window, config) = display_builder
            .build(target, ConfigTemplateBuilder::new(), |configs| {
                configs
                    .reduce(|best, config| {
                        if config.num_samples() > best.num_samples() {
                            config
                        } else {
                            best
                        }
                    })
                    .expect("display reported no GL configs")
            })
            .map_err(|err| anyhow!("could not create GL display: {err}"))?;

        let raw_window_handle = window.as_ref().map(|window| window.raw_window_handle());
        let attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(Version::new(3, 0))))
            .build(raw_window_handle);
        let context = unsafe { config.display().create_context(&config, &attributes) }
            .context("could not create an OpenGL ES 3.0 context")?;

        tracing::info!(
            samples = config.num_samples(),
            vsync = window_config.vsync,
            "created GL context"
        );

        Ok(Self {
            config,
            window_builder,
            window,
            state: ContextState::NotCurrent(context),
            vsync: window_config.vsync,
        })
    }

    /// Creates the window surface, makes the context current on it and loads
    /// a backend from it.
    pub fn resume(&mut self, target: &EventLoopWindowTarget<()>) -> Result<GlBackend> {
        let window = match self.window.take() {
            Some(window) => window,
            None => glutin_winit::finalize_window(target, self.window_builder.clone(), &self.config)
                .context("could not create window")?,
        };

        let surface_attributes = window.build_surface_attributes(Default::default());
        let surface = unsafe {
            self.config
                .display()
                .create_window_surface(&self.config, &surface_attributes)
        }
        .context("could not create window surface")?;
        self.window = Some(window);

        let context = match std::mem::replace(&mut self.state, ContextState::Lost) {
            ContextState::NotCurrent(context) => context
                .make_current(&surface)
                .context("could not make GL context current")?,
            state @ ContextState::Current { .. } => {
                self.state = state;
                bail!("GL context is already current");
            }
            ContextState::Lost => bail!("GL context was lost"),
        };

        if self.vsync {
            if let Err(err) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
                tracing::warn!("could not enable vsync: {err}");
            }
        }

        let display = self.config.display();
        let backend = unsafe { GlBackend::from_loader(|symbol| display.get_proc_address(symbol)) }?;
        self.state = ContextState::Current { context, surface };
        Ok(backend)
    }

    /// Releases the surface. Every GL object that needs the context must be
    /// gone before this is called.
    pub fn suspend(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, ContextState::Lost) {
            ContextState::Current { context, surface } => {
                let context = context
                    .make_not_current()
                    .context("could not release GL context")?;
                drop(surface);
                self.state = ContextState::NotCurrent(context);
            }
            state => self.state = state,
        }
        if cfg!(target_os = "android") {
            self.window = None;
        }
        Ok(())
    }

    pub fn resize(&self, width: u32, height: u32) {
        let ContextState::Current { context, surface } = &self.state else {
            return;
        };
        if let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            surface.resize(context, width, height);
        }
    }

    pub fn swap_buffers(&self) -> Result<()> {
        let ContextState::Current { context, surface } = &self.state else {
            bail!("swap without a current surface");
        };
        surface
            .swap_buffers(context)
            .context("could not swap buffers")
    }

    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::Size;

    #[test]
    fn window_matches_config() {
        let config = WindowConfig {
            title: "tri".to_owned(),
            width: 320,
            height: 240,
            ..Default::default()
        };
        let builder = window_builder(&config);
        let attributes = builder.window_attributes();
        assert_eq!(attributes.title, "tri");
        assert_eq!(
            attributes.inner_size,
            Some(Size::Physical(PhysicalSize::new(320, 240)))
        );
    }
}
