use crate::stimulus::StimulusParams;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(name = "quadstim", version, about = "Four-quadrant motion/pattern perception stimulus display for the terminal")]
pub struct Config {
    /// Stripe/gap pairs per quadrant side.
    #[arg(long, default_value_t = 16)]
    pub num_bars: usize,

    /// Frames between stripe regenerations in random-static mode.
    #[arg(long, default_value_t = 1.0)]
    pub static_rate: f32,

    /// Noise block edge length in pixels.
    #[arg(long, default_value_t = 1.0)]
    pub pixel_size: f32,

    /// Opacity of the flat black/white band overlay (0-1).
    #[arg(long, default_value_t = 0.0)]
    pub blend: f32,

    /// Opacity of the per-quadrant color overlay (0-1).
    #[arg(long, default_value_t = 0.0)]
    pub color_str: f32,

    /// Scroll speed in pixels per frame.
    #[arg(long, default_value_t = 1.0)]
    pub speed: f32,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub motion: bool,

    #[arg(long, default_value_t = false)]
    pub random_static: bool,

    #[arg(long, default_value_t = false)]
    pub recolor_whites: bool,

    /// Seed for the noise source; omit for a fresh stimulus every run.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    #[arg(long, value_enum, default_value_t = RendererMode::HalfBlock)]
    pub renderer: RendererMode,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub auto_probe: bool,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub sync_updates: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RendererMode {
    #[value(name = "half-block", alias = "halfblock", alias = "half_block", alias = "hb")]
    HalfBlock,
    Kitty,
}

impl Config {
    pub fn stimulus_params(&self) -> StimulusParams {
        StimulusParams {
            num_bars: self.num_bars,
            static_rate: self.static_rate,
            pixel_size: self.pixel_size,
            blend: self.blend,
            color_str: self.color_str,
            speed: self.speed,
            motion_enabled: self.motion,
            random_static_enabled: self.random_static,
            recolor_whites_enabled: self.recolor_whites,
        }
    }
}
