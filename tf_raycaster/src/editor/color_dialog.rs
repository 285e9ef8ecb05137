/// Capability to ask the user for a color.
///
/// The answer does not come back through this call; whoever owns the dialog
/// delivers it later with [`super::Editor::color_picked`].
pub trait ColorDialog {
    /// `initial` is the stop's current color, `#rrggbb`, or `#rrggbbaa` when not opaque
    fn request_color(&mut self, stop: usize, initial: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRequest {
    pub stop: usize,
    pub initial: String,
}

/// Dialog which only records requests.
/// Used by headless drivers and tests.
#[derive(Debug, Default)]
pub struct QueuedDialog {
    requests: Vec<ColorRequest>,
}

impl QueuedDialog {
    pub fn new() -> QueuedDialog {
        QueuedDialog::default()
    }

    pub fn requests(&self) -> &[ColorRequest] {
        &self.requests
    }

    pub fn pop(&mut self) -> Option<ColorRequest> {
        self.requests.pop()
    }
}

impl ColorDialog for QueuedDialog {
    fn request_color(&mut self, stop: usize, initial: &str) {
        self.requests.push(ColorRequest {
            stop,
            initial: initial.to_owned(),
        });
    }
}
