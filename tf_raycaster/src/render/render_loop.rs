use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use log::debug;

use crate::{
    camera::Camera,
    editor::Editor,
    transfer_function::{Lookup, LookupRasterizer},
    volumetric::Volume,
};

use super::Renderer;

/// Report of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Index of the frame, starting at 0
    pub index: u64,
    /// Lookup was rebuilt for this frame
    pub lookup_regenerated: bool,
    pub hit_rays: usize,
    pub truncated_rays: usize,
    pub duration: Duration,
}

/// Per-frame driver.
///
/// Each [`RenderLoop::frame`] first brings the lookup up to date with the edited
/// transfer function (only if it changed), then runs one compositing pass.
pub struct RenderLoop<V, C>
where
    V: Volume,
{
    editor: Editor,
    rasterizer: LookupRasterizer,
    renderer: Renderer<V>,
    camera: C,
    frame_buffer: Vec<u8>,
    frame_index: u64,
}

impl<V, C> RenderLoop<V, C>
where
    V: Volume + Sync,
    C: Camera + Sync,
{
    pub fn new(editor: Editor, rasterizer: LookupRasterizer, renderer: Renderer<V>, camera: C) -> Self {
        Self {
            editor,
            rasterizer,
            renderer,
            camera,
            frame_buffer: vec![],
            frame_index: 0,
        }
    }

    pub fn frame(&mut self) -> FrameStats {
        let start = Instant::now();

        let lookup_regenerated = self.rasterizer.sync(self.editor.transfer_function());
        let lookup = self.rasterizer.lookup();

        let pass = self
            .renderer
            .render(&self.camera, &lookup, &mut self.frame_buffer);

        let stats = FrameStats {
            index: self.frame_index,
            lookup_regenerated,
            hit_rays: pass.hit_rays,
            truncated_rays: pass.truncated_rays,
            duration: start.elapsed(),
        };
        self.frame_index += 1;

        debug!(
            "Frame {} rendered in {:?} (lookup regenerated: {})",
            stats.index, stats.duration, stats.lookup_regenerated
        );
        stats
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    pub fn renderer(&self) -> &Renderer<V> {
        &self.renderer
    }

    pub fn rasterizer(&self) -> &LookupRasterizer {
        &self.rasterizer
    }

    /// Lookup used by the last frame
    pub fn lookup(&self) -> Arc<Lookup> {
        self.rasterizer.lookup()
    }

    /// RGBA8 pixels of the last frame
    pub fn frame_buffer(&self) -> &[u8] {
        &self.frame_buffer
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frame_index
    }
}
