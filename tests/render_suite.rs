use quadstim::app::fit_canvas;
use quadstim::render::{Frame, HalfBlockRenderer, KittyRenderer, Renderer};

/// Build a solid-color RGBA pixel buffer.
fn solid_pixels(w: usize, h: usize, r: u8, g: u8, b: u8) -> Vec<u8> {
    let mut buf = vec![0u8; w * h * 4];
    for px in buf.chunks_exact_mut(4) {
        px[0] = r;
        px[1] = g;
        px[2] = b;
        px[3] = 255;
    }
    buf
}

fn make_frame<'a>(
    cols: u16,
    visual_rows: u16,
    pw: usize,
    ph: usize,
    pixels: &'a [u8],
    sync: bool,
) -> Frame<'a> {
    Frame {
        term_cols: cols,
        term_rows: visual_rows + 2,
        visual_rows,
        pixel_width: pw,
        pixel_height: ph,
        pixels_rgba: pixels,
        hud: "bars 16 | px 1.0 | speed 1.0",
        hud_rows: 1,
        overlay: None,
        sync_updates: sync,
    }
}

// ── HalfBlock renderer ──────────────────────────────────────────────────────

#[test]
fn halfblock_renders_solid_frame() {
    let cols = 8u16;
    let rows = 4u16;
    let pw = cols as usize;
    let ph = (rows as usize) * 2;
    let pixels = solid_pixels(pw, ph, 200, 100, 50);
    let frame = make_frame(cols, rows, pw, ph, &pixels, true);
    let mut out = Vec::new();
    let mut renderer = HalfBlockRenderer::new();
    renderer.render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("\x1b[?2026h"), "missing sync-begin");
    assert!(s.contains("\x1b[?2026l"), "missing sync-end");
    assert!(s.contains("\x1b[H"), "missing home cursor");
    assert!(s.contains("\x1b[?7l"), "missing autowrap-off");
    assert!(s.contains("\x1b[?7h"), "missing autowrap-on");
    assert!(s.contains("\u{2580}"), "missing half-block char");
    assert!(s.contains("38;2;200;100;50"), "missing FG color");
    assert!(s.contains("48;2;200;100;50"), "missing BG color");
    assert!(s.contains("bars 16"), "HUD text missing");
}

#[test]
fn halfblock_name() {
    assert_eq!(HalfBlockRenderer::new().name(), "halfblock");
}

#[test]
fn halfblock_skips_zero_size() {
    let pixels = solid_pixels(1, 1, 0, 0, 0);
    let frame = make_frame(0, 0, 0, 0, &pixels, false);
    let mut out = Vec::new();
    HalfBlockRenderer::new().render(&frame, &mut out).unwrap();
    assert!(out.is_empty(), "expected empty output for zero-size frame");
}

#[test]
fn halfblock_skips_dimension_mismatch() {
    // pixel_height must be visual_rows*2.
    let pixels = solid_pixels(4, 4, 100, 100, 100);
    let frame = make_frame(4, 4, 4, 4, &pixels, false);
    let mut out = Vec::new();
    HalfBlockRenderer::new().render(&frame, &mut out).unwrap();
    assert!(out.is_empty(), "expected empty output for dimension mismatch");
}

#[test]
fn halfblock_resets_color_cache_each_frame() {
    let pixels1 = solid_pixels(4, 4, 255, 0, 0);
    let frame1 = make_frame(4, 2, 4, 4, &pixels1, false);
    let mut out1 = Vec::new();
    let mut renderer = HalfBlockRenderer::new();
    renderer.render(&frame1, &mut out1).unwrap();
    assert!(String::from_utf8_lossy(&out1).contains("38;2;255;0;0"));

    let pixels2 = solid_pixels(4, 4, 0, 0, 255);
    let frame2 = make_frame(4, 2, 4, 4, &pixels2, false);
    let mut out2 = Vec::new();
    renderer.render(&frame2, &mut out2).unwrap();
    assert!(String::from_utf8_lossy(&out2).contains("38;2;0;0;255"));
}

#[test]
fn halfblock_renders_overlay_popup() {
    let cols = 40u16;
    let rows = 10u16;
    let pw = cols as usize;
    let ph = (rows as usize) * 2;
    let pixels = solid_pixels(pw, ph, 50, 50, 50);
    let mut frame = make_frame(cols, rows, pw, ph, &pixels, false);
    frame.overlay = Some("quadstim controls\nsecond line");
    let mut out = Vec::new();
    HalfBlockRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("quadstim controls"), "overlay text missing");
}

// ── Kitty renderer ──────────────────────────────────────────────────────────

#[test]
fn kitty_name() {
    assert_eq!(KittyRenderer::new().name(), "kitty");
}

#[test]
fn kitty_emits_graphics_escape() {
    let pixels = solid_pixels(4, 4, 10, 20, 30);
    let frame = make_frame(4, 2, 4, 4, &pixels, false);
    let mut out = Vec::new();
    KittyRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("\x1b_G"), "missing APC introducer");
    assert!(s.contains("a=T,f=32"), "missing transmit-and-place keys");
    assert!(s.contains("s=4,v=4"), "missing pixel dimensions");
    assert!(s.contains("\x1b\\"), "missing APC terminator");
    assert!(s.contains("bars 16"), "HUD text missing");
}

#[test]
fn kitty_chunks_large_payloads() {
    // 64x64 RGBA encodes to ~21k base64 chars, several 4096-byte chunks.
    let pixels = solid_pixels(64, 64, 1, 2, 3);
    let frame = make_frame(8, 4, 64, 64, &pixels, false);
    let mut out = Vec::new();
    KittyRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("m=1;"), "missing continuation chunk");
    assert!(s.contains("\x1b_Gm=0;"), "missing final chunk");
}

#[test]
fn kitty_skips_zero_size() {
    let pixels = solid_pixels(1, 1, 0, 0, 0);
    let frame = make_frame(0, 0, 0, 0, &pixels, false);
    let mut out = Vec::new();
    KittyRenderer::new().render(&frame, &mut out).unwrap();
    assert!(out.is_empty());
}

// ── Viewport fitting ────────────────────────────────────────────────────────

#[test]
fn fit_canvas_letterboxes_and_centers() {
    let src = solid_pixels(4, 4, 255, 0, 0);
    let mut dst = Vec::new();
    fit_canvas(&src, 4, 4, 8, 4, &mut dst);
    assert_eq!(dst.len(), 8 * 4 * 4);
    let px = |x: usize, y: usize| {
        let i = (y * 8 + x) * 4;
        [dst[i], dst[i + 1], dst[i + 2], dst[i + 3]]
    };
    // 4x4 box centered in 8x4: columns 2..6 carry the image.
    assert_eq!(px(1, 1), [0, 0, 0, 255], "letterbox should stay black");
    assert_eq!(px(2, 1), [255, 0, 0, 255]);
    assert_eq!(px(5, 2), [255, 0, 0, 255]);
    assert_eq!(px(6, 1), [0, 0, 0, 255]);
}

#[test]
fn fit_canvas_downscales_nearest_neighbor() {
    // Left half white, right half black; downscaled output keeps the split.
    let mut src = solid_pixels(8, 8, 0, 0, 0);
    for y in 0..8 {
        for x in 0..4 {
            let i = (y * 8 + x) * 4;
            src[i] = 255;
            src[i + 1] = 255;
            src[i + 2] = 255;
        }
    }
    let mut dst = Vec::new();
    fit_canvas(&src, 8, 8, 4, 4, &mut dst);
    let px = |x: usize, y: usize| dst[(y * 4 + x) * 4];
    assert_eq!(px(0, 0), 255);
    assert_eq!(px(1, 1), 255);
    assert_eq!(px(2, 2), 0);
    assert_eq!(px(3, 3), 0);
}

#[test]
fn fit_canvas_handles_empty_input() {
    let mut dst = Vec::new();
    fit_canvas(&[], 0, 0, 4, 4, &mut dst);
    assert_eq!(dst.len(), 4 * 4 * 4);
    assert!(dst.chunks_exact(4).all(|px| px[0] == 0 && px[3] == 255));
}
