use log::warn;

use crate::{camera::Camera, color, transfer_function::Lookup, volumetric::Volume};

use super::{compositor::Compositor, RenderOptions};

/// Bytes per pixel of the frame buffer, RGBA
pub const PIXEL_BYTES: usize = 4;

/// Outcome of one compositing pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Rays that hit the volume
    pub hit_rays: usize,
    /// Rays cut short by the marching step limit
    pub truncated_rays: usize,
}

impl std::ops::Add for PassStats {
    type Output = PassStats;

    fn add(self, rhs: PassStats) -> PassStats {
        PassStats {
            hit_rays: self.hit_rays + rhs.hit_rays,
            truncated_rays: self.truncated_rays + rhs.truncated_rays,
        }
    }
}

/// Renders volume into RGBA8 buffer.
/// Every pixel gets one ray through its center.
pub struct Renderer<V>
where
    V: Volume,
{
    pub volume: V,
    render_options: RenderOptions,
    compositor: Compositor,
}

impl<V> Renderer<V>
where
    V: Volume + Sync,
{
    pub fn new(volume: V, render_options: RenderOptions) -> Renderer<V> {
        Renderer {
            volume,
            compositor: Compositor::from_options(&render_options),
            render_options,
        }
    }

    pub fn set_render_options(&mut self, opts: RenderOptions) {
        self.compositor = Compositor::from_options(&opts);
        self.render_options = opts;
    }

    pub fn render_options(&self) -> &RenderOptions {
        &self.render_options
    }

    /// Render one frame.
    ///
    /// `buffer` is resized to `width * height * 4` bytes, row-major, y = 0 is the top row.
    /// Color channels are premultiplied by alpha; pixels missing the volume are `(0,0,0,0)`.
    pub fn render<C>(&self, camera: &C, lookup: &Lookup, buffer: &mut Vec<u8>) -> PassStats
    where
        C: Camera + Sync,
    {
        buffer.resize(self.render_options.pixel_count() * PIXEL_BYTES, 0);
        if buffer.is_empty() {
            return PassStats::default();
        }

        let stats = if self.render_options.multi_thread {
            self.render_parallel(camera, lookup, buffer)
        } else {
            self.render_rows(camera, lookup, 0, buffer)
        };

        if stats.truncated_rays > 0 {
            warn!(
                "{} rays hit the limit of {} marching steps",
                stats.truncated_rays, self.compositor.max_steps
            );
        }
        stats
    }

    // Rows are split into contiguous bands, one per worker
    fn render_parallel<C>(&self, camera: &C, lookup: &Lookup, buffer: &mut [u8]) -> PassStats
    where
        C: Camera + Sync,
    {
        let height = self.render_options.resolution.y as usize;
        let row_bytes = self.render_options.resolution.x as usize * PIXEL_BYTES;

        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(height)
            .max(1);
        let band_rows = (height + workers - 1) / workers;

        // Scope assures threads will be joined before exiting the scope
        let result = crossbeam::scope(|s| {
            let handles: Vec<_> = buffer
                .chunks_mut(band_rows * row_bytes)
                .enumerate()
                .map(|(band, chunk)| {
                    s.builder()
                        .name(format!("Ren{band}"))
                        .spawn(move |_| self.render_rows(camera, lookup, band * band_rows, chunk))
                })
                .collect();

            let mut stats = PassStats::default();
            for handle in handles {
                match handle {
                    Ok(handle) => match handle.join() {
                        Ok(band_stats) => stats = stats + band_stats,
                        Err(panic) => std::panic::resume_unwind(panic),
                    },
                    Err(e) => {
                        warn!("Cannot spawn render worker: {e}");
                    }
                }
            }
            stats
        });

        match result {
            Ok(stats) => stats,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    /// Render rows starting with `first_row` into `chunk`
    fn render_rows<C>(&self, camera: &C, lookup: &Lookup, first_row: usize, chunk: &mut [u8]) -> PassStats
    where
        C: Camera,
    {
        let width = self.render_options.resolution.x as usize;
        let (img_w, img_h) = (
            self.render_options.resolution.x as f32,
            self.render_options.resolution.y as f32,
        );

        let mut stats = PassStats::default();

        for (row, row_pixels) in chunk.chunks_mut(width * PIXEL_BYTES).enumerate() {
            let y_norm = ((first_row + row) as f32 + 0.5) / img_h;
            for (x, pixel) in row_pixels.chunks_mut(PIXEL_BYTES).enumerate() {
                let pixel_coord = ((x as f32 + 0.5) / img_w, y_norm);
                let ray = camera.get_ray(pixel_coord);

                let res = self.compositor.march(&self.volume, lookup, &ray);
                if res.steps > 0 {
                    stats.hit_rays += 1;
                }
                if res.truncated {
                    stats.truncated_rays += 1;
                }

                pixel.copy_from_slice(&color::to_rgba8(&res.color));
            }
        }
        stats
    }
}

#[cfg(test)]
mod test {

    use nalgebra::{point, vector};

    use super::*;
    use crate::{
        camera::PerspectiveCamera,
        test_helpers::*,
        transfer_function::{Lookup, DEFAULT_LOOKUP_SIZE},
        volumetric::LinearVolume,
    };

    fn options(multi_thread: bool) -> RenderOptions {
        RenderOptions::builder()
            .resolution(vector![24, 16])
            .multi_thread(multi_thread)
            .build_unchecked()
    }

    fn camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::look_at(point![0.5, 0.5, 2.5], point![0.5, 0.5, 0.5]);
        camera.set_aspect(24.0 / 16.0);
        camera
    }

    #[test]
    fn frame_layout() {
        let vol: LinearVolume = uniform_volume(vector![4, 4, 4], 255);
        let renderer = Renderer::new(vol, options(false));
        let lookup = Lookup::rasterize(&white_tf(), DEFAULT_LOOKUP_SIZE);

        let mut buffer = vec![];
        let stats = renderer.render(&camera(), &lookup, &mut buffer);
        assert_eq!(buffer.len(), 24 * 16 * 4);
        assert!(stats.hit_rays > 0);
        assert_eq!(stats.truncated_rays, 0);

        // corner misses, center hits
        assert_eq!(&buffer[0..4], &[0, 0, 0, 0]);
        let center = (8 * 24 + 12) * 4;
        assert_eq!(&buffer[center..center + 4], &[255, 255, 255, 255]);
    }

    #[test]
    fn uniform_field_same_chromaticity() {
        let vol: LinearVolume = uniform_volume(vector![8, 8, 8], 128);
        let renderer = Renderer::new(vol, options(false));
        let lookup = Lookup::rasterize(&ramp_step_tf(), DEFAULT_LOOKUP_SIZE);

        let mut buffer = vec![];
        renderer.render(&camera(), &lookup, &mut buffer);

        let mut hits = 0;
        for px in buffer.chunks(4) {
            if px[3] == 0 {
                continue;
            }
            hits += 1;
            assert_eq!(px[1], 0);
            assert_eq!(px[2], 0);
            assert!((px[0] as i32 - px[3] as i32).abs() <= 1);
        }
        assert!(hits > 0);
    }

    #[test]
    fn half_field_through_step_tf() {
        let renderer = Renderer::new(constant_field(vector![8, 8, 8], 0.5), options(true));
        let lookup = Lookup::rasterize(&step_tf(), DEFAULT_LOOKUP_SIZE);

        let mut buffer = vec![];
        let stats = renderer.render(&camera(), &lookup, &mut buffer);
        assert!(stats.hit_rays > 0);

        for px in buffer.chunks(4).filter(|px| px[3] > 0) {
            assert_eq!(px[1], 0);
            assert_eq!(px[2], 0);
            assert!((px[0] as i32 - px[3] as i32).abs() <= 1);
        }

        // center ray crosses the full depth of the cube
        let center = (8 * 24 + 12) * 4;
        assert!(buffer[center + 3] >= 250);
    }

    #[test]
    fn empty_frame_renders_nothing() {
        let lookup = Lookup::rasterize(&white_tf(), DEFAULT_LOOKUP_SIZE);
        for resolution in [vector![24, 0], vector![0, 16]] {
            let opts = RenderOptions::builder()
                .resolution(resolution)
                .multi_thread(true)
                .build_unchecked();
            let vol: LinearVolume = uniform_volume(vector![4, 4, 4], 255);
            let renderer = Renderer::new(vol, opts);

            let mut buffer = vec![1, 2, 3];
            let stats = renderer.render(&camera(), &lookup, &mut buffer);
            assert!(buffer.is_empty());
            assert_eq!(stats, PassStats::default());
        }
    }

    #[test]
    fn parallel_matches_serial() {
        let vol: LinearVolume = sphere_volume(12);
        let lookup = Lookup::rasterize(&spectrum_tf(), DEFAULT_LOOKUP_SIZE);

        let serial = Renderer::new(vol, options(false));
        let mut expected = vec![];
        serial.render(&camera(), &lookup, &mut expected);

        let vol: LinearVolume = sphere_volume(12);
        let parallel = Renderer::new(vol, options(true));
        let mut actual = vec![];
        parallel.render(&camera(), &lookup, &mut actual);

        assert_eq!(expected, actual);
    }

    #[test]
    fn truncated_rays_counted() {
        let vol: LinearVolume = uniform_volume(vector![8, 8, 8], 128);
        let opts = RenderOptions::builder()
            .resolution(vector![4, 4])
            .max_steps(1)
            .build_unchecked();
        let renderer = Renderer::new(vol, opts);
        let lookup = Lookup::rasterize(&ramp_step_tf(), DEFAULT_LOOKUP_SIZE);

        let mut buffer = vec![];
        let stats = renderer.render(&camera(), &lookup, &mut buffer);
        assert!(stats.truncated_rays > 0);
        assert_eq!(stats.truncated_rays, stats.hit_rays);
    }
}
