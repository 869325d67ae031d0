use crate::render::{draw_overlay_popup, write_hud, Frame, Renderer};
use base64::Engine;
use std::io::Write;

// Kitty caps a single APC payload at 4096 bytes.
const CHUNK: usize = 4096;

/// Kitty graphics protocol backend, direct (base64-in-escape) transport.
/// Each frame retransmits under the same image id, which replaces the
/// previous placement without an explicit delete.
pub struct KittyRenderer {
    image_id: u32,
    b64: String,
}

impl KittyRenderer {
    pub fn new() -> Self {
        Self {
            image_id: 1,
            b64: String::new(),
        }
    }
}

impl Default for KittyRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for KittyRenderer {
    fn name(&self) -> &'static str {
        "kitty"
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let w = frame.pixel_width;
        let h = frame.pixel_height;
        if w == 0 || h == 0 || frame.term_cols == 0 || frame.visual_rows == 0 {
            return Ok(());
        }
        let need = w.saturating_mul(h).saturating_mul(4);
        if frame.pixels_rgba.len() < need {
            return Ok(());
        }

        if frame.sync_updates {
            out.write_all(b"\x1b[?2026h")?;
        }
        out.write_all(b"\x1b[H\x1b[0m")?;

        self.b64.clear();
        base64::engine::general_purpose::STANDARD
            .encode_string(&frame.pixels_rgba[..need], &mut self.b64);

        // Cell box sized to keep the image aspect, assuming 1:2 cell pixels.
        let rows = frame.visual_rows as usize;
        let mut c = ((2 * rows * w) / h.max(1)).clamp(1, frame.term_cols as usize);
        let r = ((c * h) / (2 * w).max(1)).clamp(1, rows);
        c = ((2 * r * w) / h.max(1)).clamp(1, frame.term_cols as usize);

        // First chunk carries the control keys; q=2 suppresses replies so the
        // response never races the input loop.
        let mut chunks = self.b64.as_bytes().chunks(CHUNK).peekable();
        let mut first = true;
        while let Some(chunk) = chunks.next() {
            let more = if chunks.peek().is_some() { 1 } else { 0 };
            if first {
                write!(
                    out,
                    "\x1b_Ga=T,f=32,i={},s={},v={},c={},r={},q=2,m={};",
                    self.image_id, w, h, c, r, more
                )?;
                first = false;
            } else {
                write!(out, "\x1b_Gm={};", more)?;
            }
            out.write_all(chunk)?;
            out.write_all(b"\x1b\\")?;
        }

        write_hud(out, frame)?;
        if let Some(text) = frame.overlay {
            draw_overlay_popup(out, frame.term_cols, frame.term_rows, text)?;
        }

        if frame.sync_updates {
            out.write_all(b"\x1b[?2026l")?;
        }
        out.flush()?;
        Ok(())
    }
}
