use crate::{
    color::{self, RGBA},
    error::TfError,
};

/// Control point of a transfer function
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position in `<0;1>`
    pub offset: f32,
    pub color: RGBA,
}

impl ColorStop {
    pub fn new(offset: f32, color: RGBA) -> ColorStop {
        ColorStop { offset, color }
    }
}

/// Gradient mapping scalar value in `<0;1>` to color and opacity.
///
/// Holds at least two stops, sorted by offset.
/// Every mutation bumps [`TransferFunction::revision`], consumers compare it
/// with the revision they saw last to find out whether they are dirty.
#[derive(Debug, Clone)]
pub struct TransferFunction {
    stops: Vec<ColorStop>,
    revision: u64,
}

impl PartialEq for TransferFunction {
    fn eq(&self, other: &Self) -> bool {
        self.stops == other.stops
    }
}

impl TransferFunction {
    /// Construct from stops in any order.
    /// Offsets are clamped to `<0;1>`.
    pub fn new(mut stops: Vec<ColorStop>) -> Result<TransferFunction, TfError> {
        if stops.len() < 2 {
            return Err(TfError::InvalidArgument { got: stops.len() });
        }
        for stop in stops.iter_mut() {
            stop.offset = if stop.offset.is_nan() {
                0.0
            } else {
                stop.offset.clamp(0.0, 1.0)
            };
        }
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Ok(TransferFunction { stops, revision: 0 })
    }

    /// Construct from equally spaced colors, see [`TransferFunction::replace_with_equal_spacing`]
    pub fn from_colors<S: AsRef<str>>(colors: &[S]) -> Result<TransferFunction, TfError> {
        let stops = equal_spacing(&parse_colors(colors)?)?;
        Ok(TransferFunction { stops, revision: 0 })
    }

    /// Construct from equally spaced, already parsed colors
    pub fn from_rgba(colors: &[RGBA]) -> Result<TransferFunction, TfError> {
        let stops = equal_spacing(colors)?;
        Ok(TransferFunction { stops, revision: 0 })
    }

    /// Replace all stops, stop `i` of `n` gets offset `i/(n-1)`.
    ///
    /// Fails with [`TfError::InvalidArgument`] for less than two colors and with
    /// [`TfError::InvalidColor`] if any color cannot be parsed.
    /// The function is unchanged on failure.
    pub fn replace_with_equal_spacing<S: AsRef<str>>(&mut self, colors: &[S]) -> Result<(), TfError> {
        let parsed = parse_colors(colors)?;
        self.replace_with_rgba(&parsed)
    }

    /// Same as [`TransferFunction::replace_with_equal_spacing`], colors already parsed
    pub fn replace_with_rgba(&mut self, colors: &[RGBA]) -> Result<(), TfError> {
        self.stops = equal_spacing(colors)?;
        self.revision += 1;
        Ok(())
    }

    /// Change color of stop, offset is kept
    pub fn set_color_at(&mut self, index: usize, color: RGBA) -> Result<(), TfError> {
        let len = self.stops.len();
        let stop = self
            .stops
            .get_mut(index)
            .ok_or(TfError::IndexOutOfRange { index, len })?;
        stop.color = color;
        self.revision += 1;
        Ok(())
    }

    /// Move stop to `offset` (clamped to `<0;1>`).
    ///
    /// Collisions with neighbours are not resolved, stops may share an offset.
    /// The stop keeps its color, stops are re-sorted and the new index of the moved stop
    /// is returned. NaN offset is ignored.
    pub fn set_offset_at(&mut self, index: usize, offset: f32) -> Result<usize, TfError> {
        let len = self.stops.len();
        if index >= len {
            return Err(TfError::IndexOutOfRange { index, len });
        }
        if offset.is_nan() {
            return Ok(index);
        }

        let mut stop = self.stops.remove(index);
        stop.offset = offset.clamp(0.0, 1.0);

        // Behind all stops with lower or equal offset
        let new_index = self.stops.partition_point(|s| s.offset <= stop.offset);
        self.stops.insert(new_index, stop);
        self.revision += 1;
        Ok(new_index)
    }

    /// Color at `scalar`, linearly interpolated between the two bracketing stops.
    ///
    /// Values at or outside the first/last offset get the color of that stop.
    /// Total function, NaN maps to the first stop.
    pub fn lookup_color(&self, scalar: f32) -> RGBA {
        let first = &self.stops[0];
        let last = &self.stops[self.stops.len() - 1];

        if scalar.is_nan() || scalar <= first.offset {
            return first.color;
        }
        if scalar >= last.offset {
            return last.color;
        }

        // first.offset < scalar < last.offset, so 1 <= upper <= len - 1
        let upper = self.stops.partition_point(|s| s.offset <= scalar);
        let lo = &self.stops[upper - 1];
        let hi = &self.stops[upper];

        let t = (scalar - lo.offset) / (hi.offset - lo.offset);
        color::lerp(&lo.color, &hi.color, t)
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Mutation counter
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

fn parse_colors<S: AsRef<str>>(colors: &[S]) -> Result<Vec<RGBA>, TfError> {
    if colors.len() < 2 {
        return Err(TfError::InvalidArgument { got: colors.len() });
    }
    colors.iter().map(|c| color::parse(c.as_ref())).collect()
}

fn equal_spacing(colors: &[RGBA]) -> Result<Vec<ColorStop>, TfError> {
    let n = colors.len();
    if n < 2 {
        return Err(TfError::InvalidArgument { got: n });
    }
    let last = (n - 1) as f32;
    Ok(colors
        .iter()
        .enumerate()
        .map(|(i, &color)| ColorStop::new(i as f32 / last, color))
        .collect())
}
