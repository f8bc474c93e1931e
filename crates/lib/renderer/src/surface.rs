use crate::backend::{Backend, BackendError};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// When the host should ask for a new frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Redraw on every event-loop iteration while the window has focus.
    #[default]
    Continuously,
    /// Redraw only after a resize or an explicit [`SurfaceView::request_render`].
    WhenDirty,
}

/// Callbacks a [`SurfaceView`] drives, all on the thread owning the context.
pub trait SurfaceRenderer<B: Backend> {
    fn on_surface_created(&mut self, backend: &mut B) -> Result<(), RenderError>;
    fn on_surface_changed(&mut self, backend: &mut B, width: u32, height: u32);
    fn on_draw_frame(&mut self, backend: &mut B);
    fn on_surface_destroyed(&mut self, _backend: &mut B) {}
}

/// Owns a renderer and, while a surface exists, the backend drawing into it.
///
/// Callbacks are only forwarded in lifecycle order: created, then changed,
/// then any number of draws. Requests that arrive out of order are dropped.
pub struct SurfaceView<B: Backend, R: SurfaceRenderer<B>> {
    renderer: R,
    backend: Option<B>,
    size: Option<(u32, u32)>,
    render_mode: RenderMode,
    dirty: bool,
    paused: bool,
    frames: u64,
}

impl<B, R> SurfaceView<B, R>
where
    B: Backend,
    R: SurfaceRenderer<B>,
{
    pub fn new(renderer: R, render_mode: RenderMode) -> Self {
        Self {
            renderer,
            backend: None,
            size: None,
            render_mode,
            dirty: false,
            paused: false,
            frames: 0,
        }
    }

    pub fn surface_created(&mut self, mut backend: B) -> Result<(), RenderError> {
        if self.backend.is_some() {
            self.surface_destroyed();
        }
        self.renderer.on_surface_created(&mut backend)?;
        tracing::info!("surface created");
        self.backend = Some(backend);
        self.size = None;
        self.dirty = true;
        Ok(())
    }

    pub fn surface_changed(&mut self, width: u32, height: u32) -> bool {
        let Some(backend) = self.backend.as_mut() else {
            tracing::debug!(width, height, "size change without a surface");
            return false;
        };
        self.renderer.on_surface_changed(backend, width, height);
        tracing::info!(width, height, "surface changed");
        self.size = Some((width, height));
        self.dirty = true;
        true
    }

    /// Draws one frame; returns whether anything was drawn (and should be
    /// presented).
    pub fn draw_frame(&mut self) -> bool {
        let Some(backend) = self.backend.as_mut() else {
            tracing::debug!("draw requested without a surface");
            return false;
        };
        if self.size.is_none() {
            tracing::debug!("draw requested before the surface was sized");
            return false;
        }
        self.renderer.on_draw_frame(backend);
        self.dirty = false;
        self.frames += 1;
        true
    }

    pub fn surface_destroyed(&mut self) {
        if let Some(mut backend) = self.backend.take() {
            self.renderer.on_surface_destroyed(&mut backend);
            tracing::info!(frames = self.frames, "surface destroyed");
        }
        self.size = None;
        self.dirty = false;
    }

    pub fn request_render(&mut self) {
        self.dirty = true;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.paused = !focused;
    }

    pub fn wants_redraw(&self) -> bool {
        if self.backend.is_none() || self.size.is_none() {
            return false;
        }
        self.dirty || (self.render_mode == RenderMode::Continuously && !self.paused)
    }

    pub fn has_surface(&self) -> bool {
        self.backend.is_some()
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.backend.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Call, TraceBackend};

    #[derive(Default)]
    struct Recorder {
        events: Vec<&'static str>,
    }

    impl SurfaceRenderer<TraceBackend> for Recorder {
        fn on_surface_created(&mut self, _backend: &mut TraceBackend) -> Result<(), RenderError> {
            self.events.push("created");
            Ok(())
        }

        fn on_surface_changed(&mut self, _backend: &mut TraceBackend, _width: u32, _height: u32) {
            self.events.push("changed");
        }

        fn on_draw_frame(&mut self, backend: &mut TraceBackend) {
            backend.clear();
            self.events.push("draw");
        }

        fn on_surface_destroyed(&mut self, _backend: &mut TraceBackend) {
            self.events.push("destroyed");
        }
    }

    fn new_view(render_mode: RenderMode) -> SurfaceView<TraceBackend, Recorder> {
        SurfaceView::new(Recorder::default(), render_mode)
    }

    #[test]
    fn callbacks_before_creation_are_dropped() {
        let mut view = new_view(RenderMode::Continuously);
        assert!(!view.surface_changed(10, 10));
        assert!(!view.draw_frame());
        assert!(!view.wants_redraw());
        assert!(view.renderer().events.is_empty());
    }

    #[test]
    fn draw_waits_for_a_size() {
        let mut view = new_view(RenderMode::Continuously);
        view.surface_created(TraceBackend::new()).unwrap();
        assert!(!view.draw_frame(), "no size yet");
        assert!(view.surface_changed(640, 480));
        assert!(view.draw_frame());
        assert_eq!(view.renderer().events, ["created", "changed", "draw"]);
        assert_eq!(view.backend().unwrap().calls(), vec![Call::Clear]);
        assert_eq!(view.frame_count(), 1);
        assert_eq!(view.size(), Some((640, 480)));
    }

    #[test]
    fn recreated_surface_starts_over() {
        let mut view = new_view(RenderMode::Continuously);
        view.surface_created(TraceBackend::new()).unwrap();
        view.surface_changed(1, 1);
        view.surface_destroyed();
        assert!(!view.has_surface());
        assert!(!view.draw_frame());

        view.surface_created(TraceBackend::new()).unwrap();
        assert_eq!(view.size(), None);
        assert_eq!(
            view.renderer().events,
            ["created", "changed", "destroyed", "created"]
        );
    }

    #[test]
    fn when_dirty_mode_only_redraws_on_request() {
        let mut view = new_view(RenderMode::WhenDirty);
        view.surface_created(TraceBackend::new()).unwrap();
        view.surface_changed(8, 8);
        assert!(view.wants_redraw(), "resize marks the view dirty");
        view.draw_frame();
        assert!(!view.wants_redraw());
        view.request_render();
        assert!(view.wants_redraw());
    }

    #[test]
    fn losing_focus_pauses_continuous_rendering() {
        let mut view = new_view(RenderMode::Continuously);
        view.surface_created(TraceBackend::new()).unwrap();
        view.surface_changed(8, 8);
        view.draw_frame();
        view.set_focused(false);
        assert!(!view.wants_redraw());
        view.set_focused(true);
        assert!(view.wants_redraw());
    }
}
