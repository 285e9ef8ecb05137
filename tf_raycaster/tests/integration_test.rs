use std::sync::atomic::{AtomicUsize, Ordering};

use nalgebra::{point, vector, Point3, Vector2};
use tf_raycaster::{
    editor::{Editor, EditorLayout, EditorState, QueuedDialog},
    premade::PaletteTable,
    render::{RenderLoop, RenderOptions, Renderer},
    transfer_function::{LookupRasterizer, DEFAULT_LOOKUP_SIZE},
    volumetric::{from_file, parse, LinearVolume},
    PerspectiveCamera, TfError,
};

pub const WIDTH: u16 = 32;
pub const HEIGHT: u16 = 24;
pub const RESOLUTION: Vector2<u16> = vector![WIDTH, HEIGHT];

pub const POSITION: Point3<f32> = point![1.8, 1.5, 2.2];
pub const TARGET: Point3<f32> = point![0.5, 0.5, 0.5];

static FILE_ID: AtomicUsize = AtomicUsize::new(0);

// Ball of 255 in 16^3 volume, written with TFVOL header
fn write_volume_file() -> std::path::PathBuf {
    let side = 16u32;
    let mut bytes = parse::write_header(vector![side, side, side]);
    for z in 0..side {
        for y in 0..side {
            for x in 0..side {
                let p = vector![x as f32 + 0.5, y as f32 + 0.5, z as f32 + 0.5] / side as f32;
                let inside = (p - vector![0.5, 0.5, 0.5]).norm() < 0.4;
                bytes.push(if inside { 255 } else { 0 });
            }
        }
    }

    let mut path = std::env::temp_dir();
    let id = FILE_ID.fetch_add(1, Ordering::SeqCst);
    path.push(format!("tf_session_{}_{id}.tfvol", std::process::id()));
    std::fs::write(&path, bytes).unwrap();
    path
}

fn session(multi_thread: bool) -> RenderLoop<LinearVolume, PerspectiveCamera> {
    let path = write_volume_file();
    let volume: LinearVolume = from_file(&path, parse::header_parser).unwrap();
    std::fs::remove_file(&path).unwrap();

    let render_options = RenderOptions::builder()
        .resolution(RESOLUTION)
        .early_ray_termination(true)
        .multi_thread(multi_thread)
        .build()
        .unwrap();

    let mut camera = PerspectiveCamera::look_at(POSITION, TARGET);
    camera.set_aspect(WIDTH as f32 / HEIGHT as f32);

    let tf = PaletteTable::builtin().transfer_function("spectrum").unwrap();
    let editor = Editor::new(tf, EditorLayout::new(200.0, 30.0));

    RenderLoop::new(
        editor,
        LookupRasterizer::new(DEFAULT_LOOKUP_SIZE),
        Renderer::new(volume, render_options),
        camera,
    )
}

#[test]
fn editing_session() {
    let mut rl = session(false);

    let first = rl.frame();
    assert!(first.lookup_regenerated);
    assert!(first.hit_rays > 0);
    let first_frame = rl.frame_buffer().to_vec();

    // drag the green stop (x = 110) towards the end
    rl.editor_mut().pointer_down(point![110.0, 25.0]);
    rl.editor_mut().pointer_move(point![170.0, 25.0]);
    rl.editor_mut().pointer_up(point![170.0, 25.0]);
    assert_eq!(rl.editor().state(), EditorState::Idle);

    // click closing the drag is swallowed
    let mut dialog = QueuedDialog::new();
    rl.editor_mut().click(point![170.0, 25.0], &mut dialog);
    assert!(dialog.requests().is_empty());
    let offsets: Vec<f32> = rl
        .editor()
        .transfer_function()
        .stops()
        .iter()
        .map(|s| s.offset)
        .collect();
    assert_eq!(offsets, vec![0.0, 0.25, 0.75, 0.8, 1.0]);

    // recolor the last stop, green moved to index 3
    rl.editor_mut().click(point![210.0, 25.0], &mut dialog);
    let request = dialog.pop().unwrap();
    assert_eq!(request.stop, 4);
    assert_eq!(request.initial, "#000000");
    rl.editor_mut().color_picked(Some("#ffffff")).unwrap();

    let second = rl.frame();
    assert!(second.lookup_regenerated);
    assert_ne!(first_frame, rl.frame_buffer());

    // nothing changed since
    assert!(!rl.frame().lookup_regenerated);
    assert_eq!(rl.rasterizer().regenerations(), 2);
}

#[test]
fn palette_switch_and_errors() {
    let mut rl = session(false);
    let palettes = PaletteTable::builtin();

    rl.editor_mut().apply_palette(&palettes, "grayscale").unwrap();
    assert_eq!(rl.editor().transfer_function().stop_count(), 2);

    let before = rl.editor().transfer_function().clone();
    assert_eq!(
        rl.editor_mut().set_colors(&["#FFFFFF"]),
        Err(TfError::InvalidArgument { got: 1 })
    );
    assert!(matches!(
        rl.editor_mut().set_colors(&["#FFFFFF", "blue-ish"]),
        Err(TfError::InvalidColor(_))
    ));
    assert_eq!(rl.editor().transfer_function(), &before);

    rl.frame();
    assert_eq!(
        rl.frame_buffer().len(),
        WIDTH as usize * HEIGHT as usize * 4
    );
}

#[test]
fn multi_thread_same_image() {
    let mut st = session(false);
    let mut mt = session(true);
    st.frame();
    mt.frame();
    assert_eq!(st.frame_buffer(), mt.frame_buffer());
}
