use std::time::Instant;

use anyhow::Result;
use quadstim::stimulus::{NoiseSource, StimulusEngine, StimulusParams, PANEL};

struct Args {
    frames: usize,
    panel: usize,
    num_bars: usize,
    pixel_size: f32,
    random_static: bool,
    recolor_whites: bool,
    seed: u64,
}

fn parse_args() -> Args {
    let mut args = Args {
        frames: 300,
        panel: PANEL,
        num_bars: 16,
        pixel_size: 1.0,
        random_static: false,
        recolor_whites: false,
        seed: 1,
    };

    let argv = std::env::args().skip(1).collect::<Vec<_>>();
    let mut i = 0usize;
    while i < argv.len() {
        let k = argv[i].as_str();
        let v = argv.get(i + 1).map(|s| s.as_str());
        match (k, v) {
            ("--frames", Some(x)) => {
                if let Ok(n) = x.parse::<usize>() {
                    args.frames = n.max(1);
                }
                i += 2;
            }
            ("--panel", Some(x)) => {
                if let Ok(n) = x.parse::<usize>() {
                    args.panel = n.max(2);
                }
                i += 2;
            }
            ("--num-bars", Some(x)) => {
                if let Ok(n) = x.parse::<usize>() {
                    args.num_bars = n.max(1);
                }
                i += 2;
            }
            ("--pixel-size", Some(x)) => {
                if let Ok(n) = x.parse::<f32>() {
                    args.pixel_size = n.max(1.0);
                }
                i += 2;
            }
            ("--seed", Some(x)) => {
                if let Ok(n) = x.parse::<u64>() {
                    args.seed = n;
                }
                i += 2;
            }
            ("--random-static", _) => {
                args.random_static = true;
                i += 1;
            }
            ("--recolor-whites", _) => {
                args.recolor_whites = true;
                i += 1;
            }
            _ => {
                i += 1;
            }
        }
    }
    args
}

fn main() -> Result<()> {
    let args = parse_args();

    let params = StimulusParams {
        num_bars: args.num_bars,
        pixel_size: args.pixel_size,
        random_static_enabled: args.random_static,
        recolor_whites_enabled: args.recolor_whites,
        ..StimulusParams::default()
    };
    let mut engine = StimulusEngine::new(args.panel, params, NoiseSource::seeded(args.seed));
    let (w, h) = engine.canvas_size();

    // Warm-up outside the timed window.
    for f in 0..10u64 {
        engine.render_frame(f);
    }

    let mut total_ms = 0.0f64;
    let mut worst_ms = 0.0f64;
    let mut best_ms = f64::MAX;
    for f in 0..args.frames as u64 {
        let t = Instant::now();
        engine.render_frame(10 + f);
        let ms = t.elapsed().as_secs_f64() * 1000.0;
        total_ms += ms;
        worst_ms = worst_ms.max(ms);
        best_ms = best_ms.min(ms);
    }

    let avg_ms = total_ms / args.frames as f64;
    let mpix = (w * h) as f64 / 1.0e6;
    println!(
        "quadstim benchmark: {} frames @ {}x{} (bars={}, px={}, static={}, whites={})",
        args.frames, w, h, args.num_bars, args.pixel_size, args.random_static, args.recolor_whites
    );
    println!(
        "avg {:.3} ms | best {:.3} ms | worst {:.3} ms | {:.1} fps | {:.1} Mpx/s",
        avg_ms,
        best_ms,
        worst_ms,
        1000.0 / avg_ms,
        mpix * 1000.0 / avg_ms
    );
    Ok(())
}
