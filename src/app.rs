use crate::capability::{probe_runtime, CapabilityReport};
use crate::config::{Config, RendererMode};
use crate::render::{Frame, HalfBlockRenderer, KittyRenderer, Renderer};
use crate::stimulus::{NoiseSource, StimulusEngine, PANEL};
use crate::terminal::TerminalGuard;
use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::io::BufWriter;
use std::time::{Duration, Instant};

pub fn run(cfg: Config) -> anyhow::Result<()> {
    let report = probe_runtime(cfg.renderer, cfg.auto_probe);

    let noise = match cfg.seed {
        Some(seed) => NoiseSource::seeded(seed),
        None => NoiseSource::from_entropy(),
    };
    let mut engine = StimulusEngine::new(PANEL, cfg.stimulus_params(), noise);

    let _term = TerminalGuard::new()?;
    let mut out = BufWriter::new(TerminalGuard::stdout());

    let mut renderer: Box<dyn Renderer> = match report.renderer {
        RendererMode::HalfBlock => Box::new(HalfBlockRenderer::new()),
        RendererMode::Kitty => Box::new(KittyRenderer::new()),
    };

    let (cols, rows) = crossterm::terminal::size().context("get terminal size")?;
    if cols < 4 || rows < 2 {
        return Err(anyhow::anyhow!(
            "terminal too small (need at least 4x2, got {}x{})",
            cols,
            rows
        ));
    }

    let mut show_hud = true;
    let mut show_help = false;
    let mut fps = FpsCounter::new();
    let mut viewport = Vec::new();
    let mut frame_index: u64 = 0;

    loop {
        let now = Instant::now();

        // Drain input events (non-blocking); this is the parameter channel.
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(k) = event::read()? {
                if k.kind != KeyEventKind::Release
                    && handle_key(k.code, k.modifiers, &mut engine, &mut show_hud, &mut show_help)
                {
                    return Ok(());
                }
            }
        }

        let (term_cols, term_rows) = crossterm::terminal::size().context("get terminal size")?;
        let hud_rows: u16 = if show_hud { 2 } else { 0 };
        let visual_rows = term_rows.saturating_sub(hud_rows).max(1);

        let (canvas_w, canvas_h) = engine.canvas_size();
        let hud = if show_hud {
            build_hud(&engine, &report, renderer.name(), fps.fps(), frame_index)
        } else {
            String::new()
        };
        let overlay = show_help.then(help_popup_text);

        let pixels = engine.render_frame(frame_index);

        // Half-block maps one pixel per cell column and two per row, so the
        // canvas is fitted into the cell-derived pixel grid; kitty scales the
        // raw canvas itself.
        let frame = match report.renderer {
            RendererMode::HalfBlock => {
                let vw = term_cols as usize;
                let vh = (visual_rows as usize) * 2;
                fit_canvas(pixels, canvas_w, canvas_h, vw, vh, &mut viewport);
                Frame {
                    term_cols,
                    term_rows,
                    visual_rows,
                    pixel_width: vw,
                    pixel_height: vh,
                    pixels_rgba: &viewport,
                    hud: &hud,
                    hud_rows,
                    overlay,
                    sync_updates: cfg.sync_updates,
                }
            }
            RendererMode::Kitty => Frame {
                term_cols,
                term_rows,
                visual_rows,
                pixel_width: canvas_w,
                pixel_height: canvas_h,
                pixels_rgba: pixels,
                hud: &hud,
                hud_rows,
                overlay,
                sync_updates: cfg.sync_updates,
            },
        };

        renderer.render(&frame, &mut out)?;
        fps.tick();
        frame_index = frame_index.wrapping_add(1);

        // Frame pacing.
        let target = Duration::from_secs_f32(1.0 / cfg.fps.max(1) as f32);
        let elapsed = now.elapsed();
        if elapsed < target {
            std::thread::sleep(target - elapsed);
        }
    }
}

/// Nearest-neighbor fit of the canvas into a `dw x dh` pixel viewport,
/// centered and letterboxed with black. Aspect is preserved assuming square
/// pixels.
pub fn fit_canvas(src: &[u8], sw: usize, sh: usize, dw: usize, dh: usize, dst: &mut Vec<u8>) {
    dst.clear();
    dst.resize(dw * dh * 4, 0);
    for px in dst.chunks_exact_mut(4) {
        px[3] = 255;
    }
    if sw == 0 || sh == 0 || dw == 0 || dh == 0 || src.len() < sw * sh * 4 {
        return;
    }

    let scale = (dw as f32 / sw as f32).min(dh as f32 / sh as f32);
    let box_w = ((sw as f32 * scale) as usize).clamp(1, dw);
    let box_h = ((sh as f32 * scale) as usize).clamp(1, dh);
    let x0 = (dw - box_w) / 2;
    let y0 = (dh - box_h) / 2;

    for dy in 0..box_h {
        let sy = (dy * sh / box_h).min(sh - 1);
        for dx in 0..box_w {
            let sx = (dx * sw / box_w).min(sw - 1);
            let si = (sy * sw + sx) * 4;
            let di = ((y0 + dy) * dw + (x0 + dx)) * 4;
            dst[di..di + 4].copy_from_slice(&src[si..si + 4]);
        }
    }
}

fn handle_key(
    code: KeyCode,
    mods: KeyModifiers,
    engine: &mut StimulusEngine,
    show_hud: &mut bool,
    show_help: &mut bool,
) -> bool {
    if mods.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c')) {
        return true;
    }

    let p = *engine.params();
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        KeyCode::Up => engine.set_num_bars(p.num_bars + 1),
        KeyCode::Down => engine.set_num_bars(p.num_bars.saturating_sub(1).max(1)),
        KeyCode::Right => engine.set_speed(p.speed + 0.5),
        KeyCode::Left => engine.set_speed(p.speed - 0.5),
        KeyCode::Char('b') => engine.set_blend(p.blend + 0.05),
        KeyCode::Char('B') => engine.set_blend(p.blend - 0.05),
        KeyCode::Char('c') => engine.set_color_str(p.color_str + 0.05),
        KeyCode::Char('C') => engine.set_color_str(p.color_str - 0.05),
        KeyCode::Char('p') => engine.set_pixel_size(p.pixel_size + 1.0),
        KeyCode::Char('P') => engine.set_pixel_size(p.pixel_size - 1.0),
        KeyCode::Char('r') => engine.set_static_rate(p.static_rate + 1.0),
        KeyCode::Char('R') => engine.set_static_rate(p.static_rate - 1.0),
        KeyCode::Char('m') | KeyCode::Char('M') => engine.toggle_motion(),
        KeyCode::Char('s') | KeyCode::Char('S') => engine.toggle_random_static(),
        KeyCode::Char('w') | KeyCode::Char('W') => engine.toggle_recolor_whites(),
        KeyCode::Char('n') | KeyCode::Char('N') => engine.regenerate(),
        KeyCode::Char('i') | KeyCode::Char('I') => *show_hud = !*show_hud,
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => {
            *show_help = !*show_help;
        }
        _ => {}
    }
    false
}

fn build_hud(
    engine: &StimulusEngine,
    report: &CapabilityReport,
    renderer_name: &str,
    fps: f32,
    frame_index: u64,
) -> String {
    let p = engine.params();
    let on = |b: bool| if b { "on" } else { "off" };
    let mut hud = format!(
        "bars {} | px {:.1} | speed {:.1} | blend {:.2} | color {:.2} | rate {:.1}\n",
        p.num_bars, p.pixel_size, p.speed, p.blend, p.color_str, p.static_rate
    );
    hud.push_str(&format!(
        "motion {} | static {} | whites {} | {:.1} fps | frame {} | {} | probe {}",
        on(p.motion_enabled),
        on(p.random_static_enabled),
        on(p.recolor_whites_enabled),
        fps,
        frame_index,
        renderer_name,
        report.status_label()
    ));
    hud
}

fn help_popup_text() -> &'static str {
    "quadstim controls\n\
     up/down    bars +/-\n\
     left/right speed -/+\n\
     b/B        blend +/-\n\
     c/C        color +/-\n\
     p/P        pixel size +/-\n\
     r/R        static rate +/-\n\
     m          toggle motion\n\
     s          toggle random static\n\
     w          toggle white recolor\n\
     n          regenerate noise\n\
     i          toggle hud\n\
     h or ?     toggle this help\n\
     q or esc   quit"
}

struct FpsCounter {
    frames: u32,
    window_start: Instant,
    fps: f32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frames: 0,
            window_start: Instant::now(),
            fps: 0.0,
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let elapsed = self.window_start.elapsed().as_secs_f32();
        if elapsed >= 0.5 {
            self.fps = self.frames as f32 / elapsed;
            self.frames = 0;
            self.window_start = Instant::now();
        }
    }

    fn fps(&self) -> f32 {
        self.fps
    }
}
