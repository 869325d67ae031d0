use crate::stimulus::band::BandSet;
use crate::stimulus::surface::Surface;

/// Stripe tint and white-recolor target for the top-left / bottom-right pair.
pub const TINT_PRIMARY: [u8; 3] = [255, 0, 0];
/// Same for the top-right / bottom-left pair; the diagonal split is the
/// binocular-rivalry color cue.
pub const TINT_SECONDARY: [u8; 3] = [0, 255, 0];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Orientation {
    Horizontal,
    Vertical,
}

struct Quadrant {
    x: usize,
    y: usize,
    orientation: Orientation,
    tint: [u8; 3],
}

fn quadrants(panel: usize) -> [Quadrant; 4] {
    [
        Quadrant {
            x: 0,
            y: 0,
            orientation: Orientation::Horizontal,
            tint: TINT_PRIMARY,
        },
        Quadrant {
            x: panel,
            y: 0,
            orientation: Orientation::Vertical,
            tint: TINT_SECONDARY,
        },
        Quadrant {
            x: 0,
            y: panel,
            orientation: Orientation::Vertical,
            tint: TINT_SECONDARY,
        },
        Quadrant {
            x: panel,
            y: panel,
            orientation: Orientation::Horizontal,
            tint: TINT_PRIMARY,
        },
    ]
}

/// Draw all four quadrants. Stripes are drawn twice, `panel` apart, so any
/// offset in `[0, panel)` leaves no seam; gaps sit `band_height` further
/// along the perpendicular axis and never scroll.
pub fn compose<S: Surface>(
    surface: &mut S,
    bands: &BandSet,
    panel: usize,
    offset: usize,
    blend: f32,
    color_str: f32,
) {
    if bands.is_empty() {
        return;
    }
    let ph = bands.band_height();
    let off = offset as isize;
    let panel_i = panel as isize;

    for q in quadrants(panel) {
        surface.set_clip(q.x, q.y, panel, panel);
        let qx = q.x as isize;
        let qy = q.y as isize;

        for i in 0..bands.len() {
            let pos = (i * 2 * ph) as isize;
            match q.orientation {
                Orientation::Horizontal => {
                    let y0 = qy + pos;
                    surface.blit(bands.h_stripe(i), qx - off, y0);
                    surface.blit(bands.h_stripe(i), qx + panel_i - off, y0);
                    surface.blit(bands.h_gap(i), qx, y0 + ph as isize);

                    if blend > 0.0 {
                        surface.fill_rect(qx, y0, panel, ph, [255, 255, 255], blend);
                        surface.fill_rect(qx, y0 + ph as isize, panel, ph, [0, 0, 0], blend);
                    }
                    if color_str > 0.0 {
                        surface.fill_rect(qx, y0, panel, ph, q.tint, color_str);
                    }
                }
                Orientation::Vertical => {
                    let x0 = qx + pos;
                    surface.blit(bands.v_stripe(i), x0, qy - off);
                    surface.blit(bands.v_stripe(i), x0, qy + panel_i - off);
                    surface.blit(bands.v_gap(i), x0 + ph as isize, qy);

                    if blend > 0.0 {
                        surface.fill_rect(x0, qy, ph, panel, [255, 255, 255], blend);
                        surface.fill_rect(x0 + ph as isize, qy, ph, panel, [0, 0, 0], blend);
                    }
                    if color_str > 0.0 {
                        surface.fill_rect(x0, qy, ph, panel, q.tint, color_str);
                    }
                }
            }
        }
    }
    surface.clear_clip();
}

/// Saturation-threshold recolor: every pixel whose R, G and B are exactly 255
/// takes its quadrant's tint; everything else (and all alpha) is untouched.
pub fn recolor_whites<S: Surface>(surface: &mut S, panel: usize) {
    let w = surface.width();
    let h = surface.height();
    for y in 0..h {
        for x in 0..w {
            let px = surface.pixel(x, y);
            if px[0] == 255 && px[1] == 255 && px[2] == 255 {
                let tint = if (x < panel) == (y < panel) {
                    TINT_PRIMARY
                } else {
                    TINT_SECONDARY
                };
                surface.set_pixel(x, y, [tint[0], tint[1], tint[2], px[3]]);
            }
        }
    }
}
