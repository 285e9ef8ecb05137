use anyhow::{anyhow, bail, Context};
use log::info;
use nalgebra::{point, vector, Point2, Point3, Vector2, Vector3};
use tf_raycaster::{
    editor::{Editor, QueuedDialog},
    premade::PaletteTable,
    render::{FrameStats, RenderLoop, RenderOptions, Renderer},
    transfer_function::LookupRasterizer,
    volumetric::{from_file, parse, LinearVolume},
    PerspectiveCamera,
};

use crate::config::{AppConfig, VolumeConfig, VolumeFormat};

use super::ScriptStep;

/// Everything the headless app works with
pub struct AppState {
    pub render_loop: RenderLoop<LinearVolume, PerspectiveCamera>,
    pub palettes: PaletteTable,
    resolution: Vector2<u16>,
    // Color requests land here, answered by the script
    dialog: QueuedDialog,
}

impl AppState {
    pub fn from_config(cfg: &AppConfig) -> anyhow::Result<AppState> {
        let mut palettes = PaletteTable::builtin();
        palettes.merge(cfg.palettes.clone());

        let tf = palettes
            .transfer_function(&cfg.palette)
            .with_context(|| format!("cannot use palette '{}'", cfg.palette))?;
        let editor = Editor::new(tf, cfg.editor);

        let volume = load_volume(&cfg.volume)?;

        let resolution = vector![cfg.render.resolution[0], cfg.render.resolution[1]];
        let render_options = RenderOptions::builder()
            .resolution(resolution)
            .multi_thread(cfg.render.multi_thread)
            .early_ray_termination(cfg.render.early_ray_termination)
            .max_steps(cfg.render.max_steps)
            .opacity_source(cfg.render.opacity_source)
            .build()
            .ok_or_else(|| anyhow!("invalid render settings {:?}", cfg.render))?;

        let mut camera = PerspectiveCamera::look_at(
            Point3::from(cfg.camera.position),
            Point3::from(cfg.camera.target),
        );
        camera.set_aspect(resolution.x as f32 / resolution.y as f32);

        let render_loop = RenderLoop::new(
            editor,
            LookupRasterizer::new(cfg.render.lookup_size),
            Renderer::new(volume, render_options),
            camera,
        );

        Ok(AppState {
            render_loop,
            palettes,
            resolution,
            dialog: QueuedDialog::new(),
        })
    }

    pub fn resolution(&self) -> Vector2<u16> {
        self.resolution
    }

    pub fn apply_palette(&mut self, name: &str) -> anyhow::Result<()> {
        self.render_loop
            .editor_mut()
            .apply_palette(&self.palettes, name)?;
        info!("Palette {name} applied");
        Ok(())
    }

    /// Replay step through editor pointer events
    pub fn run_step(&mut self, step: &ScriptStep) -> anyhow::Result<()> {
        let editor = self.render_loop.editor_mut();

        match step {
            ScriptStep::Drag { stop, offset } => {
                let center = marker_center(editor, *stop)?;
                let layout = *editor.layout();
                let target = point![
                    layout.offset + offset.clamp(0.0, 1.0) * layout.width,
                    center.y
                ];

                editor.pointer_move(center);
                editor.pointer_down(center);
                editor.pointer_move(target);
                editor.pointer_up(target);
                // Dialog opens only if the stop did not move
                editor.click(target, &mut self.dialog);
                if self.dialog.pop().is_some() {
                    editor.color_picked(None)?;
                }
                info!("Stop {stop} dragged to {offset}");
            }
            ScriptStep::Recolor { stop, color } => {
                let center = marker_center(editor, *stop)?;
                editor.pointer_move(center);
                editor.click(center, &mut self.dialog);
                let request = self
                    .dialog
                    .pop()
                    .ok_or_else(|| anyhow!("no color requested for stop {stop}"))?;
                editor
                    .color_picked(Some(color.as_str()))
                    .with_context(|| format!("cannot recolor stop {stop}"))?;
                info!("Stop {} recolored {} -> {color}", request.stop, request.initial);
            }
            ScriptStep::Dismiss { stop } => {
                let center = marker_center(editor, *stop)?;
                editor.pointer_move(center);
                editor.click(center, &mut self.dialog);
                self.dialog
                    .pop()
                    .ok_or_else(|| anyhow!("no color requested for stop {stop}"))?;
                editor.color_picked(None)?;
            }
        }
        Ok(())
    }

    pub fn run_script(&mut self, steps: &[ScriptStep]) -> anyhow::Result<()> {
        steps.iter().try_for_each(|step| self.run_step(step))
    }

    /// Render `frames` frames, returns stats of each
    pub fn render(&mut self, frames: usize) -> Vec<FrameStats> {
        (0..frames).map(|_| self.render_loop.frame()).collect()
    }
}

/// Center of stop's marker, the stop must be the first hit there
fn marker_center(editor: &Editor, stop: usize) -> anyhow::Result<Point2<f32>> {
    let tf = editor.transfer_function();
    let offset = match tf.stops().get(stop) {
        Some(s) => s.offset,
        None => bail!("stop {stop} does not exist ({} stops)", tf.stop_count()),
    };
    let center = editor.layout().marker_center(offset);

    match editor.hit_test(center) {
        Some(hit) if hit == stop => Ok(center),
        Some(hit) => bail!("stop {stop} is covered by stop {hit}"),
        None => bail!("stop {stop} cannot be hit"),
    }
}

fn load_volume(cfg: &VolumeConfig) -> anyhow::Result<LinearVolume> {
    let path = match &cfg.path {
        Some(path) => path,
        None => {
            info!("No volume file configured, generating sphere {:?}", cfg.dims);
            return generated_sphere(Vector3::from(cfg.dims));
        }
    };

    let volume: Result<LinearVolume, _> = match cfg.format {
        VolumeFormat::Raw => from_file(path, parse::raw_parser(Vector3::from(cfg.dims))),
        VolumeFormat::Header => from_file(path, parse::header_parser),
    };
    volume.with_context(|| format!("cannot load volume {path:?}"))
}

/// Density falling from 1 in the center to 0 at the surface of a ball
fn generated_sphere(size: Vector3<usize>) -> anyhow::Result<LinearVolume> {
    let count = size
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| anyhow!("volume dims {size:?} are too large"))?;
    let size_f = size.cast::<f32>();
    let radius = 0.45;
    let mut data = Vec::with_capacity(count);
    for z in 0..size.z {
        for y in 0..size.y {
            for x in 0..size.x {
                let p = vector![x as f32 + 0.5, y as f32 + 0.5, z as f32 + 0.5]
                    .component_div(&size_f);
                let d = (p - vector![0.5, 0.5, 0.5]).norm();
                data.push((1.0 - d / radius).clamp(0.0, 1.0));
            }
        }
    }
    Ok(LinearVolume::from_samples(size, data)?)
}
