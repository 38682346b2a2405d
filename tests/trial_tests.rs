//! Trial runner behaviour across whole batches.

use the_game_sim::core::{GameConfig, GameError, PlayerId, TieBreak};
use the_game_sim::game::Outcome;
use the_game_sim::sim::{FaultPolicy, RunConfig, TrialRunner, TrialStats};

#[test]
fn test_serial_and_parallel_batches_agree() {
    let base = RunConfig::default().with_trials(64).with_seed(7);
    let serial = TrialRunner::new(base.clone()).unwrap().run().unwrap();
    let parallel = TrialRunner::new(base.with_parallel(true)).unwrap().run().unwrap();

    assert_eq!(serial, parallel);
    assert_eq!(serial.trials, 64);
}

#[test]
fn test_batch_equals_sum_of_trials() {
    let runner = TrialRunner::new(RunConfig::default().with_trials(10).with_seed(3)).unwrap();

    let mut expected = TrialStats::new();
    for index in 0..10 {
        expected.record(&runner.run_trial(index).unwrap());
    }
    assert_eq!(runner.run().unwrap(), expected);
}

#[test]
fn test_different_seeds_play_different_games() {
    let a = TrialRunner::new(RunConfig::default().with_seed(1)).unwrap();
    let b = TrialRunner::new(RunConfig::default().with_seed(2)).unwrap();

    let deck_a = a.table_for(0).unwrap().deck().remaining().to_vec();
    let deck_b = b.table_for(0).unwrap().deck().remaining().to_vec();
    assert_ne!(deck_a, deck_b);
}

#[test]
fn test_single_player_generous_rules_always_win() {
    // One seat holding the whole deck: the lowest card on UP always scores
    // 1, so the policy walks the ascending stack upward and never sticks.
    let game = GameConfig::new()
        .with_player_count(1)
        .with_stack_pairs(1)
        .with_deck_range(2, 20)
        .with_hand_size(19)
        .with_min_plays(1, 1);
    let runner = TrialRunner::new(RunConfig::new(game).with_trials(5)).unwrap();

    let stats = runner.run().unwrap();
    assert_eq!(stats.wins, 5);
    assert_eq!(stats.win_rate(), 1.0);
}

#[test]
fn test_reports_carry_turns_and_branching() {
    let runner = TrialRunner::new(RunConfig::default()).unwrap();
    let report = runner.run_trial(0).unwrap();

    assert!(report.turns > 0);
    assert!(report.branching_samples > 0);
    match report.outcome {
        Outcome::Win => assert_eq!(report.cards_left, 0),
        Outcome::Loss => assert!(report.cards_left > 0),
    }
}

#[test]
fn test_skip_policy_on_clean_run_reports_no_faults() {
    let config = RunConfig::new(GameConfig::default().with_tie_break(TieBreak::Seeded))
        .with_trials(25)
        .with_fault_policy(FaultPolicy::SkipTrial);
    let stats = TrialRunner::new(config).unwrap().run().unwrap();

    assert_eq!(stats.faulted, 0);
    assert_eq!(stats.wins + stats.losses, 25);
}

#[test]
fn test_skipped_fault_leaves_other_trials_intact() {
    let config = RunConfig::default()
        .with_trials(12)
        .with_seed(5)
        .with_fault_policy(FaultPolicy::SkipTrial);
    let runner = TrialRunner::new(config).unwrap();

    let full = runner.run().unwrap();
    let faulty = runner
        .run_with(|index| {
            if index == 4 {
                Err(GameError::HandBoundViolation {
                    player: PlayerId::new(1),
                    size: 7,
                    reason: "exceeds hand size 6".to_string(),
                    dump: String::new(),
                })
            } else {
                runner.run_trial(index)
            }
        })
        .unwrap();

    let mut expected = TrialStats::new();
    for index in (0..12).filter(|&i| i != 4) {
        expected.record(&runner.run_trial(index).unwrap());
    }
    expected.record_fault();

    assert_eq!(faulty, expected);
    assert_eq!(faulty.trials, full.trials);
    assert_eq!(faulty.faulted, 1);
    assert_eq!(faulty.wins + faulty.losses, 11);
}

#[test]
fn test_abort_policy_stops_on_fault() {
    let runner = TrialRunner::new(RunConfig::default().with_trials(12)).unwrap();
    let result = runner.run_with(|index| {
        if index == 4 {
            Err(GameError::ConservationViolation {
                expected: 98,
                actual: 99,
                dump: String::new(),
            })
        } else {
            runner.run_trial(index)
        }
    });

    assert!(matches!(result, Err(GameError::ConservationViolation { actual: 99, .. })));
}
