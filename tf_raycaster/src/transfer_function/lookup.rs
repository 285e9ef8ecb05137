use std::sync::Arc;

use log::debug;

use crate::color::{self, RGBA};

use super::TransferFunction;

/// Sample count of lookups, unless configured otherwise
pub const DEFAULT_LOOKUP_SIZE: usize = 256;

/// Transfer function sampled at `size` equally spaced points.
///
/// Sample `i` holds the color at `i / (size - 1)`.
/// Immutable once built, shared between renderers behind [`Arc`].
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    samples: Vec<RGBA>,
}

impl Lookup {
    /// Rasterize transfer function, `size` is at least 2
    pub fn rasterize(tf: &TransferFunction, size: usize) -> Lookup {
        let size = size.max(2);
        let last = (size - 1) as f32;
        let samples = (0..size)
            .map(|i| tf.lookup_color(i as f32 / last))
            .collect();
        Lookup { samples }
    }

    /// Fully transparent lookup
    pub fn transparent(size: usize) -> Lookup {
        Lookup {
            samples: vec![color::zero(); size.max(2)],
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[RGBA] {
        &self.samples
    }

    /// Color for scalar value, linear filtering between neighbouring samples.
    /// `scalar` is clamped to `<0;1>`.
    pub fn sample(&self, scalar: f32) -> RGBA {
        let last = self.samples.len() - 1;
        let scalar = if scalar.is_nan() {
            0.0
        } else {
            scalar.clamp(0.0, 1.0)
        };

        let pos = scalar * last as f32;
        let lower = (pos.floor() as usize).min(last);
        let upper = (lower + 1).min(last);
        let t = pos - lower as f32;

        if t == 0.0 {
            return self.samples[lower];
        }
        color::lerp(&self.samples[lower], &self.samples[upper], t)
    }

    /// Samples quantized to bytes, RGBA order.
    /// Layout of a `len x 1` texture.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.samples.iter().flat_map(color::to_rgba8).collect()
    }
}

/// Keeps lookup in sync with a transfer function.
///
/// Regeneration is lazy: [`LookupRasterizer::sync`] rebuilds only when the transfer function
/// was mutated since the last rebuild. The new lookup replaces the published one as a whole,
/// readers holding the previous [`Arc`] keep a consistent copy.
#[derive(Debug)]
pub struct LookupRasterizer {
    size: usize,
    lookup: Arc<Lookup>,
    synced_revision: Option<u64>,
    regenerations: usize,
}

impl LookupRasterizer {
    pub fn new(size: usize) -> LookupRasterizer {
        LookupRasterizer {
            size: size.max(2),
            lookup: Arc::new(Lookup::transparent(size)),
            synced_revision: None,
            regenerations: 0,
        }
    }

    /// Pure rasterization, does not touch the published lookup
    pub fn regenerate(&self, tf: &TransferFunction) -> Lookup {
        Lookup::rasterize(tf, self.size)
    }

    /// Transfer function changed since the last regeneration
    pub fn is_dirty(&self, tf: &TransferFunction) -> bool {
        self.synced_revision != Some(tf.revision())
    }

    /// Regenerate lookup if dirty.
    /// Returns `true` if a new lookup was published.
    pub fn sync(&mut self, tf: &TransferFunction) -> bool {
        if !self.is_dirty(tf) {
            return false;
        }
        self.lookup = Arc::new(self.regenerate(tf));
        self.synced_revision = Some(tf.revision());
        self.regenerations += 1;
        debug!(
            "Lookup regenerated (revision {}, {} samples)",
            tf.revision(),
            self.size
        );
        true
    }

    /// Force regeneration on next [`LookupRasterizer::sync`]
    pub fn invalidate(&mut self) {
        self.synced_revision = None;
    }

    /// Handle to the published lookup
    pub fn lookup(&self) -> Arc<Lookup> {
        self.lookup.clone()
    }

    /// Borrow the published lookup.
    /// Avoids incrementing atomic reference counter.
    pub fn current(&self) -> &Lookup {
        &self.lookup
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of regenerations so far
    pub fn regenerations(&self) -> usize {
        self.regenerations
    }
}

#[cfg(test)]
mod test {

    use super::*;

    fn black_to_white() -> TransferFunction {
        TransferFunction::from_colors(&["#000000", "#ffffff"]).unwrap()
    }

    #[test]
    fn rasterize_samples() {
        let tf = black_to_white();
        let lookup = Lookup::rasterize(&tf, 5);

        assert_eq!(lookup.len(), 5);
        assert_eq!(lookup.samples()[0], color::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(lookup.samples()[2], color::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(lookup.samples()[4], color::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn rasterize_is_deterministic() {
        let a = TransferFunction::from_colors(&["#000000", "#FF0000", "#00FF00", "#0000FF"]).unwrap();
        let b = TransferFunction::from_colors(&["#000000", "#FF0000", "#00FF00", "#0000FF"]).unwrap();

        let la = Lookup::rasterize(&a, DEFAULT_LOOKUP_SIZE);
        let lb = Lookup::rasterize(&b, DEFAULT_LOOKUP_SIZE);
        assert_eq!(la.to_rgba8(), lb.to_rgba8());
        for (sa, sb) in la.samples().iter().zip(lb.samples()) {
            for c in 0..4 {
                assert_eq!(sa[c].to_bits(), sb[c].to_bits());
            }
        }
    }

    #[test]
    fn sample_filters_linearly() {
        let lookup = Lookup::rasterize(&black_to_white(), 3);

        assert_eq!(lookup.sample(0.0), lookup.samples()[0]);
        assert_eq!(lookup.sample(1.0), lookup.samples()[2]);
        assert_eq!(lookup.sample(0.5), lookup.samples()[1]);
        assert_eq!(lookup.sample(-1.0), lookup.samples()[0]);
        assert_eq!(lookup.sample(2.0), lookup.samples()[2]);
        assert_eq!(lookup.sample(f32::NAN), lookup.samples()[0]);

        let quarter = lookup.sample(0.25);
        assert!((quarter.x - 0.25).abs() < 1e-6);
        assert_eq!(quarter.w, 1.0);
    }

    #[test]
    fn rgba8_layout() {
        let tf = TransferFunction::from_colors(&["#ff000000", "#0000ffff"]).unwrap();
        let bytes = Lookup::rasterize(&tf, 2).to_rgba8();
        assert_eq!(bytes, vec![255, 0, 0, 0, 0, 0, 255, 255]);
    }

    #[test]
    fn sync_only_when_dirty() {
        let mut tf = black_to_white();
        let mut rasterizer = LookupRasterizer::new(16);

        assert!(rasterizer.is_dirty(&tf));
        assert!(rasterizer.sync(&tf));
        assert!(!rasterizer.sync(&tf));
        assert_eq!(rasterizer.regenerations(), 1);

        // Several mutations between frames, one regeneration
        tf.set_color_at(0, color::new(1.0, 0.0, 0.0, 1.0)).unwrap();
        tf.set_color_at(1, color::new(0.0, 1.0, 0.0, 1.0)).unwrap();
        assert!(rasterizer.is_dirty(&tf));
        assert!(rasterizer.sync(&tf));
        assert!(!rasterizer.sync(&tf));
        assert_eq!(rasterizer.regenerations(), 2);

        assert_eq!(rasterizer.current().samples()[0], color::new(1.0, 0.0, 0.0, 1.0));

        rasterizer.invalidate();
        assert!(rasterizer.sync(&tf));
        assert_eq!(rasterizer.regenerations(), 3);
    }

    #[test]
    fn previous_lookup_survives_regeneration() {
        let mut tf = black_to_white();
        let mut rasterizer = LookupRasterizer::new(8);
        rasterizer.sync(&tf);

        let held = rasterizer.lookup();
        tf.set_color_at(1, color::zero()).unwrap();
        rasterizer.sync(&tf);

        assert_eq!(held.samples()[7], color::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(rasterizer.current().samples()[7], color::zero());
    }

    #[test]
    fn initial_lookup_is_transparent() {
        let rasterizer = LookupRasterizer::new(4);
        assert!(rasterizer.current().samples().iter().all(|c| *c == color::zero()));
    }
}
