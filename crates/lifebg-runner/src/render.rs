//! Draw sinks: ANSI terminal frames and SVG snapshots.

use lifebg_core::{Shape, GRID_LINE_COLOR, GRID_LINE_WIDTH, SPECIES_A_COLOR, SPECIES_B_COLOR};
use lifebg_world::Background;
use std::fmt::Write;

const PAGE_BACKGROUND: &str = "#1a1a2e";
const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";
const RESET: &str = "\x1b[0m";

/// Parse `#rrggbb` into components
fn hex_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn ansi_fg(color: &str) -> String {
    match hex_rgb(color) {
        Some((r, g, b)) => format!("\x1b[38;2;{};{};{}m", r, g, b),
        None => String::new(),
    }
}

/// One terminal frame: a glyph per cell plus a status line
pub fn terminal_frame(background: &Background, status: &str) -> String {
    let simulation = background.simulation();
    let dims = simulation.dimensions();
    let mut out = String::with_capacity(dims.cell_count() * 8 + status.len() + 16);
    out.push_str(CLEAR_SCREEN);

    simulation.for_each_cell(|pos, state| {
        match state.fill_color() {
            Some(color) => {
                out.push_str(&ansi_fg(color));
                out.push('●');
                out.push_str(RESET);
            }
            None => out.push('·'),
        }
        if pos.col == dims.cols - 1 {
            out.push('\n');
        }
    });

    out.push_str(status);
    out.push('\n');
    out
}

/// Terminal frame whose status line describes the same generation as the board
pub fn board_frame(background: &Background, progress: f64) -> String {
    let simulation = background.simulation();
    let census = simulation.census();
    let status = status_line(
        simulation.generation(),
        simulation.competition_mode(),
        census.species_a,
        census.species_b,
        progress,
    );
    terminal_frame(background, &status)
}

/// Status line shown under each terminal frame
pub fn status_line(generation: u64, competition: bool, a: u32, b: u32, progress: f64) -> String {
    let mut line = format!(
        "gen {:>5} | {}A {:>5}{}",
        generation,
        ansi_fg(SPECIES_A_COLOR),
        a,
        RESET
    );
    if competition {
        let _ = write!(
            line,
            " {}B {:>5}{} | competition",
            ansi_fg(SPECIES_B_COLOR),
            b,
            RESET
        );
    }
    let _ = write!(line, " | page {:>3.0}%", progress);
    line
}

/// Standalone SVG of the current board, drawn from the canvas shapes
pub fn svg_document(background: &Background) -> String {
    let viewport = background.viewport();
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = viewport.width,
        h = viewport.height
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="{}"/>"#, PAGE_BACKGROUND);
    let _ = writeln!(
        svg,
        r#"<g stroke="{}" stroke-width="{}">"#,
        GRID_LINE_COLOR, GRID_LINE_WIDTH
    );

    background.render(|shape| {
        let fill = shape.fill().unwrap_or("none");
        match shape {
            Shape::Rect { x, y, width, height, .. } => {
                let _ = writeln!(
                    svg,
                    r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                    x, y, width, height, fill
                );
            }
            Shape::Hexagon { vertices, .. } => {
                let points: Vec<String> = vertices
                    .iter()
                    .map(|p| format!("{:.2},{:.2}", p.x, p.y))
                    .collect();
                let _ = writeln!(
                    svg,
                    r#"<polygon points="{}" fill="{}"/>"#,
                    points.join(" "),
                    fill
                );
            }
        }
    });

    svg.push_str("</g>\n</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifebg_core::Viewport;
    use lifebg_world::BackgroundConfig;

    fn background(config: BackgroundConfig) -> Background {
        Background::new(config.with_seed(Some(21)), Viewport::new(200.0, 100.0)).unwrap()
    }

    #[test]
    fn test_hex_rgb() {
        assert_eq!(hex_rgb("#6eb5ff"), Some((0x6e, 0xb5, 0xff)));
        assert_eq!(hex_rgb("66cc88"), None);
        assert_eq!(hex_rgb("#zzzzzz"), None);
    }

    #[test]
    fn test_terminal_frame_has_one_line_per_row() {
        let bg = background(BackgroundConfig::conway_page());
        let frame = terminal_frame(&bg, "status");
        let dims = bg.simulation().dimensions();

        let lines: Vec<&str> = frame.trim_end().lines().collect();
        assert_eq!(lines.len(), dims.rows as usize + 1);
        assert_eq!(lines.last(), Some(&"status"));
        assert_eq!(frame.matches('●').count() as u32, bg.simulation().census().alive());
    }

    #[test]
    fn test_board_frame_matches_drawn_generation() {
        let mut bg = background(BackgroundConfig::conway_page());
        bg.on_toggle_competition();
        for y in [0.0, 60.0, 120.0, 180.0] {
            bg.on_scroll(y);
        }

        let frame = board_frame(&bg, 42.0);
        let census = bg.simulation().census();
        let status = frame.trim_end().lines().last().unwrap();
        assert!(status.starts_with(&format!("gen {:>5}", bg.simulation().generation())));
        assert!(status.contains(&format!("A {:>5}", census.species_a)));
        assert!(status.contains(&format!("B {:>5}", census.species_b)));
        assert_eq!(frame.matches('●').count() as u32, census.alive());
    }

    #[test]
    fn test_svg_square_board() {
        let bg = background(BackgroundConfig::conway_page());
        let svg = svg_document(&bg);
        let cells = bg.simulation().dimensions().cell_count();

        // one page background rect plus one per cell
        assert_eq!(svg.matches("<rect").count(), cells + 1);
        assert_eq!(
            svg.matches("#6eb5ff").count() as u32,
            bg.simulation().census().species_a
        );
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_svg_hex_board() {
        let bg = background(BackgroundConfig::hex_cv_page(Viewport::new(200.0, 100.0)));
        let svg = svg_document(&bg);
        assert_eq!(
            svg.matches("<polygon").count(),
            bg.simulation().dimensions().cell_count()
        );
    }

    #[test]
    fn test_status_line_mentions_competition() {
        let line = status_line(12, true, 40, 7, 33.3);
        assert!(line.contains("competition"));
        assert!(line.contains("33%"));
        assert!(!status_line(12, false, 40, 0, 0.0).contains("competition"));
    }
}
