//! Top-level UI layout: navigation bar, scrolling page body, status bar.

pub mod sections;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, PlacedBlock, Visibility};
use crate::theme;

/// Rows taken by the navigation and status bars.
pub const CHROME_ROWS: u16 = 2;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    f.render_widget(Block::default().style(theme::background()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_nav(f, chunks[0], app);
    draw_body(f, chunks[1], app);
    draw_status(f, chunks[2], app);
}

fn draw_nav(f: &mut Frame, area: Rect, app: &AppState) {
    let style = theme::nav_bar(app.nav.is_scrolled());
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled("NEURAL SWARM", theme::gold_bold()),
        ]))
        .style(style),
        area,
    );
    f.render_widget(
        Paragraph::new(Span::styled("Acquire → ", theme::gold()))
            .alignment(Alignment::Right)
            .style(style),
        area,
    );
}

fn draw_body(f: &mut Frame, area: Rect, app: &AppState) {
    for block in app.visible_blocks() {
        let visibility = app.visibility(block);
        if visibility == Visibility::Hidden {
            continue;
        }
        let Some((rect, skip)) = block_rect(block, app.offset, area) else {
            continue;
        };

        let mut para = Paragraph::new(block.lines.clone()).scroll((skip, 0));
        if visibility == Visibility::Fading {
            para = para.style(theme::fading());
        }
        f.render_widget(para, rect);
    }
}

/// Screen rect for the on-screen part of `block`, and how many of its rows
/// are scrolled off the top.
fn block_rect(block: &PlacedBlock, offset: u16, area: Rect) -> Option<(Rect, u16)> {
    let top = i32::from(block.top()) - i32::from(offset);
    let skip = (-top).max(0) as u16;
    let y = area.y + top.max(0) as u16;
    let bottom = area.y + area.height;
    if y >= bottom || skip >= block.height() || block.left() >= area.width {
        return None;
    }

    let height = (block.height() - skip).min(bottom - y);
    let width = block.width().min(area.width - block.left());
    Some((Rect::new(area.x + block.left(), y, width, height), skip))
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState) {
    let line = Line::from(vec![
        Span::styled(
            " j/k scroll · PgUp/PgDn page · g/G top/bottom · q quit",
            theme::muted(),
        ),
        Span::raw(" | "),
        Span::styled(format!("{:>3}%", app.progress_pct()), theme::gold()),
        Span::raw(" | "),
        Span::styled(
            format!("revealed {}/{}", app.revealed_count(), app.blocks.len()),
            theme::gold_dim(),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use swarm_core::reveal::ObservationSupport;
    use swarm_core::PageConfig;

    fn app(width: u16, height: u16) -> AppState {
        AppState::new(
            &PageConfig::default(),
            width,
            height - CHROME_ROWS,
            ObservationSupport::Available,
        )
        .unwrap()
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn first_frame_shows_hero_and_chrome() {
        let app = app(120, 30);
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("NEURAL SWARM"));
        assert!(text.contains("Acquire"));
        assert!(text.contains("N E U R A L"));
        assert!(text.contains("q quit"));
        assert!(!text.contains("Not financial advice"));
    }

    #[test]
    fn footer_appears_once_scrolled_into_view() {
        let mut app = app(120, 30);
        app.scroll_to_bottom();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
        assert!(screen_text(&terminal).contains("Not financial advice"));
    }

    #[test]
    fn block_rect_clips_both_edges() {
        let app = app(100, 20);
        let body = Rect::new(0, 1, 100, 18);
        let block = &app.blocks[0];

        let (rect, skip) = block_rect(block, 0, body).unwrap();
        assert_eq!((rect.y, skip), (1, 0));

        let (rect, skip) = block_rect(block, 2, body).unwrap();
        assert_eq!((rect.y, skip), (1, 2));
        assert_eq!(rect.height, (block.height() - 2).min(18));

        assert!(block_rect(block, block.height(), body).is_none());
    }
}
