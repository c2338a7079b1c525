//! End-to-end tests: load or generate a board, solve it, report it.

use std::fs;

use tubes::report::{self, SolutionReport};
use tubes::solver::is_pointless_pour;
use tubes::{
    read_board, solve, ActionLog, Board, DestinationPolicy, GameConfig, LoadError, SolverConfig,
};

fn replay(board: &mut Board, solution: &ActionLog) {
    let mut log = ActionLog::new();
    for action in solution {
        board
            .pour(action.src, action.dst, &mut log)
            .expect("solution move must be legal");
    }
}

#[test]
fn solutions_replay_to_a_solved_board() {
    let config = GameConfig {
        num_colors: 3,
        num_extra: 2,
        num_slots: 3,
    };
    for seed in 0..25 {
        let mut board = Board::generate(&config, seed).unwrap();
        let initial = board.clone();
        let result = solve(&mut board, &SolverConfig::default());

        match result.solution {
            Some(solution) => {
                assert!(board.is_solved(), "seed {}", seed);
                let mut fresh = initial.clone();
                replay(&mut fresh, &solution);
                assert!(fresh.is_solved(), "seed {}", seed);

                report::rewind(&mut board, &solution);
                assert_eq!(board, initial, "seed {}", seed);
            }
            None => assert_eq!(board, initial, "seed {}", seed),
        }
    }
}

#[test]
fn exhaustive_search_solves_whatever_first_fit_solves() {
    let config = GameConfig {
        num_colors: 3,
        num_extra: 2,
        num_slots: 2,
    };
    let exhaustive = SolverConfig {
        policy: DestinationPolicy::Exhaustive,
        max_depth: None,
    };
    for seed in 0..25 {
        let mut first = Board::generate(&config, seed).unwrap();
        let mut second = first.clone();

        let first_fit = solve(&mut first, &SolverConfig::default());
        let full = solve(&mut second, &exhaustive);
        if first_fit.is_solved() {
            assert!(full.is_solved(), "seed {}", seed);
        }
        if let Some(solution) = full.solution {
            let mut fresh = Board::generate(&config, seed).unwrap();
            replay(&mut fresh, &solution);
            assert!(fresh.is_solved(), "seed {}", seed);
        }
    }
}

#[test]
fn solver_never_makes_pointless_pours() {
    let config = GameConfig {
        num_colors: 4,
        num_extra: 2,
        num_slots: 3,
    };
    for seed in 0..10 {
        let start = Board::generate(&config, seed).unwrap();
        let mut board = start.clone();
        let Some(solution) = solve(&mut board, &SolverConfig::default()).solution else {
            continue;
        };

        let mut replayed = start;
        let mut log = ActionLog::new();
        for action in &solution {
            assert!(!is_pointless_pour(&replayed, action.src, action.dst));
            replayed.pour(action.src, action.dst, &mut log).unwrap();
        }
    }
}

#[test]
fn load_solve_and_write_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("level.txt");
    fs::write(
        &path,
        "# two colors, one spare tube\n0, 1\n1, 0\n\n-1, -1   # spare\n",
    )
    .unwrap();

    let raw = read_board(&path).unwrap();
    assert_eq!((raw.num_tubes, raw.num_colors, raw.num_slots), (3, 2, 2));

    let mut board = Board::load(&raw, &path);
    let solution = solve(&mut board, &SolverConfig::default())
        .solution
        .unwrap();
    report::rewind(&mut board, &solution);
    let written = report::write_text(&board, &solution).unwrap();

    assert_eq!(written, dir.path().join("level.txt.solution"));
    let text = fs::read_to_string(&written).unwrap();
    let (board_part, moves_part) = text.split_once("\n\n").unwrap();
    assert_eq!(board_part.lines().count(), 3);
    assert_eq!(moves_part.lines().count(), solution.len());

    let json = SolutionReport::new(&board, &solution);
    assert_eq!(json.moves.len(), solution.len());
    assert!(json.source.ends_with("level.txt"));
}

#[test]
fn malformed_files_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let cases: [(&str, fn(&LoadError) -> bool); 4] = [
        ("0 1\n1 0 -1\n", |e| {
            matches!(e, LoadError::InconsistentElementCount { line: 2, .. })
        }),
        ("0 1\nred blue\n", |e| matches!(e, LoadError::Parse { line: 2, .. })),
        ("0 0\n1 1\n", |e| matches!(e, LoadError::Validation { .. })),
        ("\n# empty\n", |e| matches!(e, LoadError::Empty { .. })),
    ];

    for (i, (text, check)) in cases.iter().enumerate() {
        let path = dir.path().join(format!("bad{}.txt", i));
        fs::write(&path, text).unwrap();
        let err = read_board(&path).unwrap_err();
        assert!(check(&err), "case {}: {}", i, err);
    }
}
