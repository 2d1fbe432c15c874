use blockfall::core::{EngineConfig, GameEngine, GameSnapshot};
use blockfall::term::{AnchorY, FrameBuffer, GameView, Viewport};
use blockfall::types::{GameStatus, PieceKind};

fn snapshot() -> GameSnapshot {
    GameEngine::new(EngineConfig {
        seed: Some(1),
        ..EngineConfig::default()
    })
    .unwrap()
    .snapshot()
}

fn text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            all.push(fb.get(x, y).unwrap().ch);
        }
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    // 10x20 board at 2x1 per cell plus border => 22x22
    let fb = GameView::default().render(&snapshot(), Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_settled_cell_two_chars_wide() {
    let mut snap = snapshot();
    snap.cells[19 * 10] = Some(PieceKind::I);
    snap.current = None;
    snap.ghost_y = None;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn term_view_draws_ghost_below_current_piece() {
    let snap = snapshot();
    let current = snap.current.clone().unwrap();
    let ghost_y = snap.ghost_y.unwrap();
    assert!(ghost_y > current.y);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    let ghost_row = 1 + ghost_y as u16 + current.matrix.len() as u16 - 1;
    let row: String = (0..22).map(|x| fb.get(x, ghost_row).unwrap().ch).collect();
    assert!(row.contains('░'), "row {:?}", row);
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snapshot(), Viewport::new(60, 24));
    let all = text(&fb);
    assert!(all.contains("SCORE"));
    assert!(all.contains("LEVEL"));
    assert!(all.contains("LINES"));
    assert!(all.contains("NEXT"));
}

#[test]
fn term_view_overlays_status() {
    let mut snap = snapshot();
    snap.status = GameStatus::Paused;
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert!(text(&fb).contains("PAUSED"));

    snap.status = GameStatus::GameOver;
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert!(text(&fb).contains("GAME OVER"));
}

#[test]
fn term_view_centers_board_on_tall_viewports() {
    let fb = GameView::default().render(&snapshot(), Viewport::new(22, 30));
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');

    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snapshot(), Viewport::new(22, 30));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}
