use crate::stimulus::noise::{NoiseGrid, NoiseSource};

/// One full-resolution band strip: RGBA8, row-major, alpha always 255.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Raster {
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let mut data = vec![0u8; width * height * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, px: [u8; 4]) {
        let i = (y * self.width + x) * 4;
        self.data[i..i + 4].copy_from_slice(&px);
    }
}

/// Nearest-neighbor magnification of a noise grid into a `width x height`
/// band. Pixel `(x, y)` takes cell `(floor(y/pixel_size), floor(x/pixel_size))`;
/// hard edges between blocks are the point, not an artifact.
pub fn rasterize_band(grid: &NoiseGrid, width: usize, height: usize, pixel_size: f32) -> Raster {
    let mut out = Raster::new(width, height);
    let inv = 1.0 / pixel_size.max(1.0);
    for y in 0..out.height {
        let row = (y as f32 * inv).floor() as usize;
        for x in 0..out.width {
            let col = (x as f32 * inv).floor() as usize;
            let v = if grid.cell(row, col) { 255 } else { 0 };
            out.set_pixel(x, y, [v, v, v, 255]);
        }
    }
    out
}

/// Exact quarter-turn: a `w x h` band becomes `h x w`, pixel values copied
/// verbatim. Scrolling the result along its long axis matches scrolling the
/// source along its long axis; four applications are the identity.
pub fn rotate_band(src: &Raster) -> Raster {
    let mut dst = Raster::new(src.height, src.width);
    for dy in 0..dst.height {
        let sx = src.width - 1 - dy;
        for dx in 0..dst.width {
            dst.set_pixel(dx, dy, src.pixel(sx, dx));
        }
    }
    dst
}

/// The complete collection of bands backing one rendering configuration:
/// stripe and gap roles, horizontal and vertical orientations, all indices.
///
/// Vertical bands are always quarter-turns of their horizontal counterparts.
/// Full regeneration replaces all four sequences; static regeneration
/// resynthesizes only the stripes so the gaps stay fixed across the flicker.
pub struct BandSet {
    h_stripe: Vec<Raster>,
    h_gap: Vec<Raster>,
    v_stripe: Vec<Raster>,
    v_gap: Vec<Raster>,
    band_height: usize,
}

impl BandSet {
    pub fn empty() -> Self {
        Self {
            h_stripe: Vec::new(),
            h_gap: Vec::new(),
            v_stripe: Vec::new(),
            v_gap: Vec::new(),
            band_height: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.h_gap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.h_gap.is_empty()
    }

    pub fn band_height(&self) -> usize {
        self.band_height
    }

    pub fn h_stripe(&self, i: usize) -> &Raster {
        &self.h_stripe[i]
    }

    pub fn h_gap(&self, i: usize) -> &Raster {
        &self.h_gap[i]
    }

    pub fn v_stripe(&self, i: usize) -> &Raster {
        &self.v_stripe[i]
    }

    pub fn v_gap(&self, i: usize) -> &Raster {
        &self.v_gap[i]
    }

    pub fn h_gaps(&self) -> &[Raster] {
        &self.h_gap
    }

    pub fn v_gaps(&self) -> &[Raster] {
        &self.v_gap
    }

    pub fn h_stripes(&self) -> &[Raster] {
        &self.h_stripe
    }

    pub fn v_stripes(&self) -> &[Raster] {
        &self.v_stripe
    }

    /// Rebuild every sequence for `num_bars` indices. Derived dimensions are
    /// clamped to 1 so the set stays renderable for any accepted parameters.
    pub fn regenerate_all(
        &mut self,
        panel: usize,
        num_bars: usize,
        pixel_size: f32,
        noise: &mut NoiseSource,
    ) {
        let num_bars = num_bars.max(1);
        self.band_height = (panel / (2 * num_bars)).max(1);
        self.h_stripe.clear();
        self.h_gap.clear();
        self.v_stripe.clear();
        self.v_gap.clear();

        let (low_h, low_w) = low_dims(self.band_height, panel, pixel_size);
        for _ in 0..num_bars {
            let stripe = rasterize_band(
                &NoiseGrid::generate(low_h, low_w, noise),
                panel,
                self.band_height,
                pixel_size,
            );
            let gap = rasterize_band(
                &NoiseGrid::generate(low_h, low_w, noise),
                panel,
                self.band_height,
                pixel_size,
            );
            self.v_stripe.push(rotate_band(&stripe));
            self.v_gap.push(rotate_band(&gap));
            self.h_stripe.push(stripe);
            self.h_gap.push(gap);
        }
    }

    /// Rebuild only the stripe sequences (both orientations) with fresh
    /// noise; gap bands persist untouched.
    pub fn regenerate_stripes(&mut self, panel: usize, pixel_size: f32, noise: &mut NoiseSource) {
        let count = self.len();
        self.h_stripe.clear();
        self.v_stripe.clear();

        let (low_h, low_w) = low_dims(self.band_height, panel, pixel_size);
        for _ in 0..count {
            let stripe = rasterize_band(
                &NoiseGrid::generate(low_h, low_w, noise),
                panel,
                self.band_height,
                pixel_size,
            );
            self.v_stripe.push(rotate_band(&stripe));
            self.h_stripe.push(stripe);
        }
    }
}

fn low_dims(band_height: usize, panel: usize, pixel_size: f32) -> (usize, usize) {
    let ps = pixel_size.max(1.0);
    let low_h = ((band_height as f32 / ps).floor() as usize).max(1);
    let low_w = ((panel as f32 / ps).floor() as usize).max(1);
    (low_h, low_w)
}
