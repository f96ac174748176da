use Direction::*;
use crate::core::*;
use crate::test::test_util::{GameTestState, parse_test_level};

#[test]
fn when_move_right_observes_move_right() {
    let level = r#"
#@ #
"#;
    let mut game = GameTestState::new(level);
    game.assert_move(Right);

    let expected_level = r#"
# @#
"#;
    game.assert_matches(expected_level);
}

#[test]
fn when_push_pushes() {
    let level = r#"
#@$ #
"#;
    let mut game = GameTestState::new(level);
    let record = game.assert_move(Right);

    let expected_level = r#"
# @$#
"#;
    game.assert_matches(expected_level);
    assert_eq!(record, MoveRecord::push(Right));
    assert_eq!(game.player, Vec2::new(0, 2));
}

#[test]
fn when_block_pushed_into_block_remains_two_blocks() {
    let level = r#"
#@$$ #
"#;
    let mut game = GameTestState::new(level);
    game.assert_blocked(Right);

    game.assert_matches(level);
    assert!(game.history.is_empty());
}

#[test]
fn when_block_pushed_into_box_on_target_is_blocked() {
    let level = r#"
#@$* #
"#;
    let mut game = GameTestState::new(level);
    game.assert_blocked(Right);
    game.assert_matches(level);
}

#[test]
fn when_block_pushed_into_wall_is_blocked() {
    let level = r#"
#@$#
"#;
    let mut game = GameTestState::new(level);
    game.assert_blocked(Right);
}

#[test]
fn walking_into_wall_leaves_grid_identical() {
    let level = r#"
#####
#.@$#
# * #
#####
"#;
    let mut game = GameTestState::new(level);
    game.assert_blocked(Up);
    game.assert_matches(level);
}

#[test]
fn moving_off_the_board_is_blocked() {
    let mut game = GameTestState::new("@ \n  \n");
    game.assert_blocked(Up);
    game.assert_blocked(Left);
}

#[test]
fn step_is_blocked_when_two_cells_ahead_is_off_the_board() {
    let mut game = GameTestState::new("@ \n");
    game.assert_blocked(Right);
}

#[test]
fn box_cannot_be_pushed_off_the_board() {
    let level = r#"
 @$
"#;
    let mut game = GameTestState::new(level);
    game.assert_blocked(Right);
}

#[test]
fn stepping_onto_floor_changes_exactly_two_cells() {
    let level = r#"
#####
#   #
# @ #
#   #
#####
"#;
    for dir in Direction::ALL {
        let mut game = GameTestState::new(level);
        let before = game.grid.clone();
        game.assert_move(dir);

        let changed: Vec<Vec2> = before
            .iter()
            .filter(|(pos, tile)| game.grid[pos] != **tile)
            .map(|(pos, _)| pos)
            .collect();
        let start = Vec2::new(2, 2);
        assert_eq!(changed.len(), 2, "{dir:?}");
        assert!(changed.contains(&start));
        assert!(changed.contains(&(start + dir.offset())));
        assert_eq!(game.history.len(), 1);
    }
}

#[test]
fn player_on_target_leaves_target_behind() {
    let level = r#"
#+ #
"#;
    let mut game = GameTestState::new(level);
    game.assert_move(Right);
    game.assert_matches(r#"
#.@#
"#);
    game.assert_move(Left);
    game.assert_matches(level);
}

#[test]
fn pushing_onto_target_gives_box_on_target_and_off_gives_box() {
    let level = r#"
#@$. #
"#;
    let mut game = GameTestState::new(level);
    game.assert_move(Right);
    assert_eq!(game.grid[&Vec2::new(0, 3)], Tile::BoxOnTarget);
    game.assert_matches(r#"
# @* #
"#);

    game.assert_move(Right);
    assert_eq!(game.grid[&Vec2::new(0, 4)], Tile::Box);
    game.assert_matches(r#"
#  +$#
"#);
}

#[test]
fn push_moves_player_one_cell_only() {
    let level = r#"
#####
#@$ #
#####
"#;
    let mut game = GameTestState::new(level);
    game.assert_move(Right);
    assert_eq!(game.player, Vec2::new(1, 2));
}

#[test]
fn pushing_box_right_onto_target_wins() {
    let (mut grid, base) = parse_test_level("#####\n#@$.#\n#####\n");
    let player = locate_player(&grid).unwrap();
    assert!(!is_won(&grid, &base));

    let outcome = resolve(&mut grid, &base, player, Right);

    assert_eq!(
        outcome,
        MoveOutcome::Moved {
            record: MoveRecord::push(Right),
            player: Vec2::new(1, 2),
        }
    );
    assert_eq!(grid[&Vec2::new(1, 2)], Tile::Player);
    assert_eq!(grid[&Vec2::new(1, 3)], Tile::BoxOnTarget);
    assert!(is_won(&grid, &base));
}

#[test]
fn level_without_targets_is_won() {
    let game = GameTestState::new(r#"
#@$ #
"#);
    assert!(game.is_won());
}

#[test]
fn win_needs_every_target_covered() {
    let level = r#"
#######
#@$ . #
# $ . #
#######
"#;
    let mut game = GameTestState::new(level);
    assert!(!game.is_won());
    game.assert_moves(&[Right, Right]);
    assert!(!game.is_won());
    assert_eq!(count_boxes_on_targets(&game.grid), 1);

    game.assert_moves(&[Left, Left, Down, Right, Right]);
    assert_eq!(count_boxes_on_targets(&game.grid), 2);
    assert!(game.is_won());
}

#[test]
fn extra_boxes_do_not_matter_once_targets_are_covered() {
    let game = GameTestState::new(r#"
#@* $#
"#);
    assert!(game.is_won());
}

#[test]
fn when_player_moves_back_game_is_equal() {
    let level = r#"
#@ $#
"#;
    let mut game = GameTestState::new(level);
    let original = game.grid.clone();
    game.assert_move(Right);
    game.assert_move(Left);

    game.assert_matches(level);
    assert_eq!(original, game.grid);
}

#[test]
fn when_blocks_swap_game_remains_equal() {
    let level = r#"
######
#    #
#@$  #
# $  #
#    #
######
"#;
    let mut game = GameTestState::new(level);
    let original = game.grid.clone();
    game.assert_moves(&[
        Right, Left,
        Down, Down,
        Right, Up,
        Right, Right, Up, Up,
        Left, Down, Right, Down, Left,]);
    game.assert_matches(r#"
######
#    #
# $  #
# $@ #
#    #
######
"#);
    game.assert_moves(&[
        Down, Left, Left, Up, Up,]);

    game.assert_matches(level);
    assert_eq!(original, game.grid);
}
