use log::debug;
use nalgebra::Point2;

use crate::{
    color::{self, RGBA},
    error::TfError,
    premade::PaletteTable,
    transfer_function::TransferFunction,
};

use super::{
    color_dialog::ColorDialog,
    marker::{EditorLayout, Marker},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    Hovering(usize),
    /// `moved` is set once the stop actually changed offset
    Dragging {
        stop: usize,
        moved: bool,
    },
    AwaitingColorPick(usize),
}

/// Interaction flags of one stop, recomputed on every hit-test pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StopFlags {
    pub hovered: bool,
    pub selected: bool,
}

/// Everything needed to draw one stop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerView {
    pub marker: Marker,
    pub color: RGBA,
    pub flags: StopFlags,
}

/// Interactive editor of a transfer function.
///
/// Pointer events are in the coordinate space of [`EditorLayout`].
/// Every mutation goes through the owned [`TransferFunction`], so its revision
/// tells lookup consumers when to regenerate.
#[derive(Debug, Clone)]
pub struct Editor {
    tf: TransferFunction,
    layout: EditorLayout,
    state: EditorState,
    flags: Vec<StopFlags>,
    // Release point of a drag which moved a stop. The next click is swallowed
    // unless the pointer left this point first.
    suppress_click: Option<Point2<f32>>,
}

impl Editor {
    pub fn new(tf: TransferFunction, layout: EditorLayout) -> Editor {
        let flags = vec![StopFlags::default(); tf.stop_count()];
        Editor {
            tf,
            layout,
            state: EditorState::Idle,
            flags,
            suppress_click: None,
        }
    }

    pub fn transfer_function(&self) -> &TransferFunction {
        &self.tf
    }

    pub fn layout(&self) -> &EditorLayout {
        &self.layout
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn flags(&self) -> &[StopFlags] {
        &self.flags
    }

    /// Index of the selected stop, if any
    pub fn selected(&self) -> Option<usize> {
        self.flags.iter().position(|f| f.selected)
    }

    pub fn markers(&self) -> Vec<MarkerView> {
        self.tf
            .stops()
            .iter()
            .zip(self.flags.iter())
            .map(|(stop, flags)| MarkerView {
                marker: self.layout.marker(stop.offset),
                color: stop.color,
                flags: *flags,
            })
            .collect()
    }

    /// First stop, in index order, whose marker contains `p`
    pub fn hit_test(&self, p: Point2<f32>) -> Option<usize> {
        self.tf
            .stops()
            .iter()
            .position(|stop| self.layout.marker(stop.offset).contains(p))
    }

    pub fn pointer_move(&mut self, p: Point2<f32>) {
        if let EditorState::Dragging { stop, .. } = self.state {
            let offset = self.layout.offset_from_x(p.x);
            let unchanged = self.tf.stops().get(stop).map(|s| s.offset) == Some(offset);
            if unchanged {
                return;
            }
            match self.tf.set_offset_at(stop, offset) {
                Ok(index) => {
                    self.reset_flags();
                    self.flags[index] = StopFlags {
                        hovered: true,
                        selected: true,
                    };
                    self.state = EditorState::Dragging {
                        stop: index,
                        moved: true,
                    };
                }
                Err(e) => {
                    debug!("Drag lost its stop: {e}");
                    self.state = EditorState::Idle;
                }
            }
            return;
        }

        if self.suppress_click.map_or(false, |release| release != p) {
            self.suppress_click = None;
        }

        let hit = self.hit_test(p);
        for (i, f) in self.flags.iter_mut().enumerate() {
            f.hovered = hit == Some(i);
        }

        if let EditorState::AwaitingColorPick(_) = self.state {
            return;
        }
        self.state = match hit {
            Some(i) => EditorState::Hovering(i),
            None => EditorState::Idle,
        };
    }

    pub fn pointer_down(&mut self, p: Point2<f32>) {
        self.suppress_click = None;
        if let Some(i) = self.hit_test(p) {
            self.select(Some(i));
            self.flags[i].hovered = true;
            self.state = EditorState::Dragging {
                stop: i,
                moved: false,
            };
        }
    }

    /// Ends a drag wherever the pointer is
    pub fn pointer_up(&mut self, p: Point2<f32>) {
        if let EditorState::Dragging { moved, .. } = self.state {
            self.suppress_click = moved.then_some(p);
            self.state = EditorState::Idle;
        }
    }

    /// Click on a stop asks `dialog` for its new color.
    /// Click elsewhere clears the selection.
    pub fn click(&mut self, p: Point2<f32>, dialog: &mut dyn ColorDialog) {
        if self.suppress_click.take().is_some() {
            return;
        }

        match self.hit_test(p) {
            Some(i) => {
                self.select(Some(i));
                self.state = EditorState::AwaitingColorPick(i);
                let initial = color::to_hex(&self.tf.stops()[i].color);
                debug!("Color requested for stop {i}, current {initial}");
                dialog.request_color(i, &initial);
            }
            None => {
                self.select(None);
                self.state = EditorState::Idle;
            }
        }
    }

    /// Deliver result of a color request. `None` means the dialog was dismissed.
    ///
    /// Unparsable colors are rejected and the editor keeps waiting.
    /// Ignored unless a color was requested.
    pub fn color_picked(&mut self, color: Option<&str>) -> Result<(), TfError> {
        let stop = match self.state {
            EditorState::AwaitingColorPick(stop) => stop,
            _ => return Ok(()),
        };

        if let Some(color) = color {
            let parsed = color::parse(color)?;
            self.tf.set_color_at(stop, parsed)?;
        }
        self.state = EditorState::Idle;
        Ok(())
    }

    /// Replace the transfer function with equally spaced colors
    pub fn set_colors<S: AsRef<str>>(&mut self, colors: &[S]) -> Result<(), TfError> {
        self.tf.replace_with_equal_spacing(colors)?;
        self.reset_after_replace();
        Ok(())
    }

    pub fn apply_palette(&mut self, palettes: &PaletteTable, name: &str) -> Result<(), TfError> {
        let palette = palettes
            .get(name)
            .ok_or_else(|| TfError::UnknownPalette(name.to_owned()))?;
        self.set_colors(palette.colors.as_slice())
    }

    fn reset_after_replace(&mut self) {
        self.flags = vec![StopFlags::default(); self.tf.stop_count()];
        self.state = EditorState::Idle;
        self.suppress_click = None;
    }

    fn reset_flags(&mut self) {
        self.flags.iter_mut().for_each(|f| *f = StopFlags::default());
    }

    fn select(&mut self, index: Option<usize>) {
        for (i, f) in self.flags.iter_mut().enumerate() {
            f.selected = index == Some(i);
        }
    }
}
