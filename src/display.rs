//! Terminal renderer - all terminal output lives here.
//!
//! Projects a `Scene` from canvas units onto character cells. No game logic
//! is performed; this module only translates the snapshot into terminal
//! commands.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};
use glam::Vec2;
use survival_circuit::scene::{Rect, Scene};
use survival_circuit::sim::{GamePhase, ObstacleKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::White;
const C_PLAYER_GHOST: Color = Color::DarkCyan;
const C_HUD: Color = Color::Yellow;
const C_OVERLAY: Color = Color::White;

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb { r, g, b }
}

fn obstacle_style(kind: ObstacleKind) -> (char, Color) {
    match kind {
        ObstacleKind::Oil => ('~', Color::Black),
        ObstacleKind::Tire => ('o', Color::DarkGrey),
        ObstacleKind::Cone => ('^', Color::Red),
    }
}

/// Maps canvas coordinates onto the terminal grid
struct Viewport {
    cols: u16,
    rows: u16,
    scale: Vec2,
}

impl Viewport {
    fn new(scene: &Scene, cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            scale: Vec2::new(cols as f32 / scene.width, rows as f32 / scene.height),
        }
    }

    /// Cell range covered by a rect, clipped to the screen
    fn cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let min = (rect.center - rect.size / 2.0) * self.scale;
        let max = (rect.center + rect.size / 2.0) * self.scale;
        if max.x < 0.0 || max.y < 0.0 || min.x >= self.cols as f32 || min.y >= self.rows as f32 {
            return None;
        }
        let x0 = min.x.max(0.0) as u16;
        let y0 = min.y.max(0.0) as u16;
        let x1 = (max.x.ceil() as u16).clamp(x0 + 1, self.cols);
        let y1 = (max.y.ceil() as u16).clamp(y0 + 1, self.rows);
        Some((x0, y0, x1, y1))
    }

    fn fill<W: Write>(&self, out: &mut W, rect: &Rect, ch: char, color: Color) -> std::io::Result<()> {
        let Some((x0, y0, x1, y1)) = self.cells(rect) else {
            return Ok(());
        };
        out.queue(style::SetForegroundColor(color))?;
        let row: String = std::iter::repeat_n(ch, (x1 - x0) as usize).collect();
        for y in y0..y1 {
            out.queue(cursor::MoveTo(x0, y))?;
            out.queue(Print(&row))?;
        }
        Ok(())
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, scene: &Scene) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(scene, cols, rows);

    out.queue(style::SetBackgroundColor(rgb(scene.background)))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    if scene.phase != GamePhase::Home {
        for obstacle in &scene.obstacles {
            let (ch, color) = obstacle_style(obstacle.kind);
            view.fill(out, &obstacle.rect, ch, color)?;
        }
        for power_up in &scene.power_ups {
            let rect = Rect {
                center: power_up.center,
                size: Vec2::splat(power_up.diameter),
            };
            view.fill(out, &rect, power_up.glyph, rgb(power_up.color))?;
        }
        let player_color = if scene.player_intangible {
            C_PLAYER_GHOST
        } else {
            C_PLAYER
        };
        view.fill(out, &scene.player, '#', player_color)?;

        draw_lines(out, &scene.hud, 0, 0, C_HUD)?;
    }

    if !scene.overlay.is_empty() {
        let top = (rows / 2).saturating_sub(scene.overlay.len() as u16 / 2);
        for (i, line) in scene.overlay.iter().enumerate() {
            let x = (cols / 2).saturating_sub(line.chars().count() as u16 / 2);
            draw_lines(out, std::slice::from_ref(line), x, top + i as u16, C_OVERLAY)?;
        }
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn draw_lines<W: Write>(out: &mut W, lines: &[String], x: u16, y: u16, color: Color) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    for (i, line) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(x, y + i as u16))?;
        out.queue(Print(line))?;
    }
    Ok(())
}
