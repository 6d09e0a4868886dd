//! Piece registry tests: masks, insets and spawn data

use tui_blocks::core::pieces::{definition, insets, is_tile, spawn_column, spawn_row, COLOR_MAX, COLOR_MIN};
use tui_blocks::core::Board;
use tui_blocks::types::{PieceKind, Rotation};

#[test]
fn test_insets_match_bitmask() {
    for kind in PieceKind::ALL {
        let dim = definition(kind).dimension() as i8;
        for rotation in Rotation::ALL {
            let cells: Vec<(i8, i8)> = definition(kind).cells(rotation).collect();
            let min_col = cells.iter().map(|c| c.0).min().unwrap();
            let max_col = cells.iter().map(|c| c.0).max().unwrap();
            let min_row = cells.iter().map(|c| c.1).min().unwrap();
            let max_row = cells.iter().map(|c| c.1).max().unwrap();

            let ins = insets(kind, rotation);
            assert_eq!(ins.left as i8, min_col, "{:?} {:?} left", kind, rotation);
            assert_eq!(ins.right as i8, dim - 1 - max_col, "{:?} {:?} right", kind, rotation);
            assert_eq!(ins.top as i8, min_row, "{:?} {:?} top", kind, rotation);
            assert_eq!(ins.bottom as i8, dim - 1 - max_row, "{:?} {:?} bottom", kind, rotation);
        }
    }
}

#[test]
fn test_canonical_size_matches_rotation_zero() {
    for kind in PieceKind::ALL {
        let def = definition(kind);
        let ins = def.insets(Rotation::R0);
        assert_eq!(def.cols(), def.dimension() - ins.left - ins.right, "{:?}", kind);
        assert_eq!(def.rows(), def.dimension() - ins.top - ins.bottom, "{:?}", kind);
    }
    assert_eq!((definition(PieceKind::I).cols(), definition(PieceKind::I).rows()), (4, 1));
    assert_eq!((definition(PieceKind::O).cols(), definition(PieceKind::O).rows()), (2, 2));
    assert_eq!((definition(PieceKind::T).cols(), definition(PieceKind::T).rows()), (3, 2));
}

#[test]
fn test_i_piece_masks() {
    let horizontal: Vec<(i8, i8)> = definition(PieceKind::I).cells(Rotation::R0).collect();
    assert_eq!(horizontal, vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
    let vertical: Vec<(i8, i8)> = definition(PieceKind::I).cells(Rotation::R1).collect();
    assert_eq!(vertical, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
}

#[test]
fn test_o_piece_is_rotation_invariant() {
    let base: Vec<(i8, i8)> = definition(PieceKind::O).cells(Rotation::R0).collect();
    for rotation in Rotation::ALL {
        let cells: Vec<(i8, i8)> = definition(PieceKind::O).cells(rotation).collect();
        assert_eq!(cells, base);
    }
}

#[test]
fn test_is_tile_outside_mask() {
    assert!(!is_tile(PieceKind::O, -1, 0, Rotation::R0));
    assert!(!is_tile(PieceKind::O, 2, 0, Rotation::R0));
    assert!(!is_tile(PieceKind::I, 0, 4, Rotation::R1));
    assert!(is_tile(PieceKind::O, 1, 1, Rotation::R0));
}

#[test]
fn test_spawn_positions() {
    for kind in PieceKind::ALL {
        let dim = definition(kind).dimension() as i8;
        assert_eq!(spawn_column(kind), 5 - dim / 2, "{:?}", kind);
        assert_eq!(spawn_row(kind), insets(kind, Rotation::R0).top as i8, "{:?}", kind);
    }
    assert_eq!((spawn_column(PieceKind::I), spawn_row(PieceKind::I)), (3, 1));
    assert_eq!((spawn_column(PieceKind::O), spawn_row(PieceKind::O)), (4, 0));
}

#[test]
fn test_spawn_is_valid_on_empty_board() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        assert!(
            board.is_valid_and_empty(kind, spawn_column(kind), spawn_row(kind), Rotation::R0),
            "{:?}",
            kind
        );
    }
}

#[test]
fn test_colors_leave_room_for_shading() {
    for kind in PieceKind::ALL {
        for channel in definition(kind).base_color() {
            assert!((COLOR_MIN..=COLOR_MAX).contains(&channel), "{:?}", kind);
        }
    }
}
