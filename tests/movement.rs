/*
movement.rs

Copyright 2026 The Shroomhop developers

This file is part of Shroomhop.

Shroomhop is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Shroomhop is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Shroomhop. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

use shroomhop::board::{Direction, Position};
use shroomhop::events::{AudioCue, GameEvent};
use shroomhop::game::{Game, GameplayState, MoveOutcome};
use shroomhop::level::Level;
use shroomhop::rules::TidePhase;
use shroomhop::tiles::TileType;

fn game(art: &str) -> Game {
    Game::new(Level::from_ascii(art).expect("valid level"))
}

/// Landing of the last step of an accepted move.
fn landing(outcome: &MoveOutcome) -> Option<Position> {
    match outcome {
        MoveOutcome::Accepted { steps, .. } => steps.last().map(|s| s.landing),
        MoveOutcome::Rejected => None,
    }
}

#[test]
fn a_corridor_is_won_after_four_moves() {
    let mut g: Game = game("@....");
    for i in 0..4 {
        let outcome: MoveOutcome = g.move_in(Direction::Right);
        assert_eq!(landing(&outcome), Some(Position::new(i + 1, 0)));
        assert!(matches!(outcome, MoveOutcome::Accepted { won, .. } if won == (i == 3)));
    }
    assert!(g.is_won());
    for direction in Direction::ALL {
        assert_eq!(g.move_in(direction), MoveOutcome::Rejected);
    }

    let events: Vec<GameEvent> = g.take_events();
    assert!(events.contains(&GameEvent::Won));
    assert!(events.contains(&GameEvent::MushroomCountChanged(4)));
    assert!(events.contains(&GameEvent::MoveCompleted {
        from: Position::new(3, 0),
        to: Position::new(4, 0),
        moves: 4
    }));
    assert!(g.take_events().is_empty());
}

#[test]
fn jumps_over_a_bramble() {
    let mut g: Game = game("@#.\n...\n.#.");
    assert!(g.can_reach(Position::new(2, 0)));
    assert!(!g.can_reach(Position::new(1, 0)));

    match g.move_in(Direction::Right) {
        MoveOutcome::Accepted { steps, won } => {
            assert_eq!(steps.len(), 1);
            assert!(steps[0].jumped);
            assert_eq!(steps[0].landing, Position::new(2, 0));
            assert!(!won);
        }
        MoveOutcome::Rejected => panic!("the jump was rejected"),
    }
    assert_eq!(
        g.state().board.get(Position::new(0, 0)),
        Some(TileType::Mushroom)
    );
    assert!(g.take_events().contains(&GameEvent::Cue(AudioCue::Jump)));
}

#[test]
fn undo_restores_the_previous_state() {
    let mut g: Game = game("@..\n...");
    let initial: GameplayState = g.state().clone();
    assert!(!g.undo());
    assert_eq!(g.state(), &initial);

    assert!(g.move_in(Direction::Right).is_accepted());
    assert!(g.can_undo());
    assert!(g.undo());
    assert_eq!(g.state(), &initial);
    assert!(!g.can_undo());
}

#[test]
fn restart_goes_back_to_the_start() {
    let mut g: Game = game("@..\n...");
    assert!(g.move_in(Direction::Right).is_accepted());
    assert!(g.move_in(Direction::Down).is_accepted());
    g.restart();
    assert_eq!(g.player(), Position::new(0, 0));
    assert_eq!(g.state().mushroom_count(), 0);
    assert!(!g.can_undo());
}

#[test]
fn dirt_needs_two_visits() {
    let mut g: Game = game("@d.");
    assert!(g.move_in(Direction::Right).is_accepted());
    assert!(g.move_in(Direction::Right).is_accepted());
    assert_eq!(g.state().board.get(Position::new(1, 0)), Some(TileType::Grass));
    assert!(!g.is_won());
    let outcome: MoveOutcome = g.move_in(Direction::Left);
    assert_eq!(landing(&outcome), Some(Position::new(1, 0)));
    assert!(g.is_won());
}

#[test]
fn flooded_sand_cannot_be_entered() {
    let mut g: Game = game("@....s\n......");
    for _ in 0..4 {
        assert!(g.move_in(Direction::Right).is_accepted());
    }
    assert_eq!(g.state().tide, TidePhase::High);
    assert_eq!(g.move_in(Direction::Right), MoveOutcome::Rejected);
    assert!(!g.can_reach(Position::new(5, 0)));

    let mut g: Game = game("@s");
    assert!(g.move_in(Direction::Right).is_accepted());
    assert!(g.is_won());
}

#[test]
fn honey_prevents_jumping() {
    let mut g: Game = game("@h#.\n....");
    assert!(g.move_in(Direction::Right).is_accepted());
    assert_eq!(g.move_in(Direction::Right), MoveOutcome::Rejected);
    assert!(g.move_in(Direction::Down).is_accepted());
    assert_eq!(
        g.state().board.get(Position::new(1, 0)),
        Some(TileType::HoneyMushroom)
    );
}

#[test]
fn acorns_leave_a_squirrel() {
    let mut g: Game = game("@a.");
    assert!(g.move_in(Direction::Right).is_accepted());
    assert!(g.move_in(Direction::Right).is_accepted());
    assert_eq!(
        g.state().board.get(Position::new(1, 0)),
        Some(TileType::Squirrel)
    );
    assert!(g.is_won());
}

#[test]
fn portals_teleport_the_player() {
    let mut g: Game = game("@1..\n....\n..1.");
    match g.move_in(Direction::Right) {
        MoveOutcome::Accepted { steps, .. } => {
            assert_eq!(
                steps[0].teleport,
                Some((Position::new(1, 0), Position::new(2, 2)))
            );
            assert_eq!(steps[0].landing, Position::new(2, 2));
        }
        MoveOutcome::Rejected => panic!("the move was rejected"),
    }
    assert!(g.take_events().contains(&GameEvent::Cue(AudioCue::Warp)));
}

#[test]
fn slides_on_ice_and_water() {
    let mut g: Game = game("@II.");
    let outcome: MoveOutcome = g.move_in(Direction::Right);
    assert_eq!(landing(&outcome), Some(Position::new(3, 0)));

    for _ in 0..2 {
        let mut g: Game = game("@>S.\n....");
        let outcome: MoveOutcome = g.move_in(Direction::Right);
        assert_eq!(landing(&outcome), Some(Position::new(2, 0)));
    }
}

#[test]
fn bounce_pads_launch_the_player() {
    let mut g: Game = game("@B.....");
    match g.move_in(Direction::Right) {
        MoveOutcome::Accepted { steps, .. } => {
            assert!(steps[0].bounced);
            assert_eq!(steps[0].landing, Position::new(4, 0));
            assert_eq!(steps[0].trail.len(), 3);
        }
        MoveOutcome::Rejected => panic!("the move was rejected"),
    }
}

#[test]
fn moves_to_a_far_tile_across_bridges() {
    let mut g: Game = game("@S..");
    assert!(g.can_reach(Position::new(1, 0)));
    assert!(g.can_reach(Position::new(2, 0)));
    assert!(!g.can_reach(Position::new(3, 0)));

    match g.move_to_position(Position::new(2, 0)) {
        MoveOutcome::Accepted { steps, .. } => assert_eq!(steps.len(), 2),
        MoveOutcome::Rejected => panic!("the move was rejected"),
    }
    assert_eq!(g.player(), Position::new(2, 0));
    assert_eq!(g.state().move_count, 2);

    // The whole request is undone at once
    assert!(g.undo());
    assert_eq!(g.player(), Position::new(0, 0));
    assert_eq!(g.move_to_position(Position::new(3, 0)), MoveOutcome::Rejected);
    assert_eq!(g.move_to_position(Position::new(0, 0)), MoveOutcome::Rejected);
}

#[test]
fn reports_a_stuck_player() {
    let mut g: Game = game(".@.\n#.#");
    assert!(g.move_in(Direction::Left).is_accepted());
    assert!(!g.take_events().contains(&GameEvent::Stuck));
    assert!(g.move_in(Direction::Right).is_accepted());
    assert_eq!(g.player(), Position::new(2, 0));
    assert!(g.take_events().contains(&GameEvent::Stuck));
}
