mod band;
mod compositor;
mod noise;
mod surface;

pub use band::{rasterize_band, rotate_band, BandSet, Raster};
pub use compositor::{compose, recolor_whites, TINT_PRIMARY, TINT_SECONDARY};
pub use noise::{NoiseGrid, NoiseSource};
pub use surface::{PixelSurface, Surface};

/// Edge length of one display quadrant; the full canvas is a 2x2 grid of
/// panels. Engine constructors take the panel size so tests can run small
/// geometries, but the display constant is this.
pub const PANEL: usize = 384;

/// Largest bar count that still yields a band height of at least one pixel.
pub fn max_bars(panel: usize) -> usize {
    (panel / 2).max(1)
}

/// The full parameter set read once per frame. Values arrive pre-clamped
/// through the engine setters; the struct itself is plain data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StimulusParams {
    /// Stripe/gap pairs per quadrant side.
    pub num_bars: usize,
    /// Frames between stripe-only regenerations when random static is on.
    pub static_rate: f32,
    /// Noise block edge length in full-resolution pixels.
    pub pixel_size: f32,
    /// Opacity of the white-over-stripe / black-over-gap overlay.
    pub blend: f32,
    /// Opacity of the per-quadrant color overlay on stripe regions.
    pub color_str: f32,
    /// Pixels of scroll per frame.
    pub speed: f32,
    pub motion_enabled: bool,
    pub random_static_enabled: bool,
    pub recolor_whites_enabled: bool,
}

impl Default for StimulusParams {
    fn default() -> Self {
        Self {
            num_bars: 16,
            static_rate: 1.0,
            pixel_size: 1.0,
            blend: 0.0,
            color_str: 0.0,
            speed: 1.0,
            motion_enabled: true,
            random_static_enabled: false,
            recolor_whites_enabled: false,
        }
    }
}

/// The explicit render context: parameters, the band collection, the noise
/// source and the frame buffer, owned together so a single `render_frame`
/// call is the whole per-tick pipeline. No wall-clock state; only the frame
/// index passed in drives animation.
pub struct StimulusEngine {
    panel: usize,
    params: StimulusParams,
    bands: BandSet,
    noise: NoiseSource,
    surface: PixelSurface,
    last_regen: u64,
}

impl StimulusEngine {
    pub fn new(panel: usize, params: StimulusParams, noise: NoiseSource) -> Self {
        let panel = panel.max(2);
        let mut engine = Self {
            panel,
            params: sanitize(params, panel),
            bands: BandSet::empty(),
            noise,
            surface: PixelSurface::new(panel * 2, panel * 2),
            last_regen: 0,
        };
        engine.regenerate();
        engine
    }

    pub fn panel(&self) -> usize {
        self.panel
    }

    /// Full canvas dimensions (2x2 panels).
    pub fn canvas_size(&self) -> (usize, usize) {
        (self.panel * 2, self.panel * 2)
    }

    pub fn params(&self) -> &StimulusParams {
        &self.params
    }

    pub fn bands(&self) -> &BandSet {
        &self.bands
    }

    // ── Parameter channel ───────────────────────────────────────────────────

    /// Changing the bar count rebuilds the whole band set immediately, before
    /// the next frame reads it.
    pub fn set_num_bars(&mut self, n: usize) {
        let n = n.clamp(1, max_bars(self.panel));
        if n != self.params.num_bars {
            self.params.num_bars = n;
            self.regenerate();
        }
    }

    pub fn set_static_rate(&mut self, v: f32) {
        self.params.static_rate = v.max(0.1);
    }

    /// Takes effect at the next regeneration; live bands keep their blocks.
    pub fn set_pixel_size(&mut self, v: f32) {
        self.params.pixel_size = v.max(1.0);
    }

    pub fn set_blend(&mut self, v: f32) {
        self.params.blend = v.clamp(0.0, 1.0);
    }

    pub fn set_color_str(&mut self, v: f32) {
        self.params.color_str = v.clamp(0.0, 1.0);
    }

    pub fn set_speed(&mut self, v: f32) {
        self.params.speed = v;
    }

    pub fn set_motion_enabled(&mut self, on: bool) {
        self.params.motion_enabled = on;
    }

    pub fn toggle_motion(&mut self) {
        self.params.motion_enabled = !self.params.motion_enabled;
    }

    pub fn set_random_static_enabled(&mut self, on: bool) {
        self.params.random_static_enabled = on;
    }

    pub fn toggle_random_static(&mut self) {
        self.params.random_static_enabled = !self.params.random_static_enabled;
    }

    pub fn set_recolor_whites_enabled(&mut self, on: bool) {
        self.params.recolor_whites_enabled = on;
    }

    pub fn toggle_recolor_whites(&mut self) {
        self.params.recolor_whites_enabled = !self.params.recolor_whites_enabled;
    }

    /// Explicit full rebuild of all four band sequences.
    pub fn regenerate(&mut self) {
        self.bands.regenerate_all(
            self.panel,
            self.params.num_bars,
            self.params.pixel_size,
            &mut self.noise,
        );
    }

    // ── Frame entry ─────────────────────────────────────────────────────────

    /// Scroll offset for a frame index, shared by both axes. Always zero in
    /// random-static mode (regeneration substitutes for motion) and when
    /// motion is disabled.
    pub fn scroll_offset(&self, frame: u64) -> usize {
        if self.params.random_static_enabled || !self.params.motion_enabled {
            return 0;
        }
        let raw = (frame as f64 * self.params.speed as f64).floor() as i64;
        raw.rem_euclid(self.panel as i64) as usize
    }

    /// The whole per-tick pipeline: regeneration check, four-quadrant
    /// compositing, optional white recolor. Returns the finished RGBA canvas.
    pub fn render_frame(&mut self, frame: u64) -> &[u8] {
        let rate = (self.params.static_rate.round() as u64).max(1);
        if self.bands.len() != self.params.num_bars {
            self.regenerate();
            self.last_regen = frame;
        } else if self.params.random_static_enabled
            && frame.saturating_sub(self.last_regen) >= rate
        {
            self.bands
                .regenerate_stripes(self.panel, self.params.pixel_size, &mut self.noise);
            self.last_regen = frame;
        }

        let offset = self.scroll_offset(frame);
        self.surface.clear([0, 0, 0]);
        compose(
            &mut self.surface,
            &self.bands,
            self.panel,
            offset,
            self.params.blend,
            self.params.color_str,
        );
        if self.params.recolor_whites_enabled {
            recolor_whites(&mut self.surface, self.panel);
        }
        self.surface.data()
    }
}

fn sanitize(mut p: StimulusParams, panel: usize) -> StimulusParams {
    p.num_bars = p.num_bars.clamp(1, max_bars(panel));
    p.static_rate = p.static_rate.max(0.1);
    p.pixel_size = p.pixel_size.max(1.0);
    p.blend = p.blend.clamp(0.0, 1.0);
    p.color_str = p.color_str.clamp(0.0, 1.0);
    p
}
