//! Playback engine integration tests over real traces

use algotty::algorithms::sorting::bubble_sort;
use algotty::highlight::{effect_of, HighlightState};
use algotty::trace::playback::{PlaybackState, Player, DEFAULT_DELAY_MS};
use algotty::trace::snapshot::{ArraySnapshot, Snapshot};
use algotty::trace::Event;
use std::time::{Duration, Instant};

fn drain(player: &mut Player, mut now: Instant) -> Vec<String> {
    let mut texts = Vec::new();
    let delay = Duration::from_millis(player.delay_ms());
    loop {
        match player.tick(now).cloned() {
            Some(step) => {
                texts.push(step.text);
                now += delay;
            }
            None => {
                if player.state() == PlaybackState::Done {
                    return texts;
                }
                now += delay;
            }
        }
        if texts.len() > 10_000 {
            panic!("playback never finished");
        }
    }
}

#[test]
fn delivers_every_step_in_order() {
    let values = vec![1, 5, 7, 2, 2, 3];
    let trace = bubble_sort(&values);
    let total = trace.len();
    let expected: Vec<String> = trace.steps.iter().map(|s| s.text.clone()).collect();

    let mut player = Player::new();
    player.set_delay_ms(100);
    let t0 = Instant::now();
    player.start(trace, t0).unwrap();
    assert_eq!(player.state(), PlaybackState::Running);

    let texts = drain(&mut player, t0);
    assert_eq!(texts.len(), total);
    assert_eq!(texts, expected);
    assert_eq!(player.cursor(), total);
}

#[test]
fn replaying_delivered_steps_rebuilds_the_sorted_array() {
    let values = vec![4, 9, 1, 7];
    let trace = bubble_sort(&values);

    let mut player = Player::new();
    player.set_delay_ms(100);
    let t0 = Instant::now();
    player.start(trace, t0).unwrap();

    let mut snap = ArraySnapshot::new(values);
    let mut highlights = HighlightState::default();
    let mut now = t0;
    while player.state() != PlaybackState::Done {
        if let Some(step) = player.tick(now).cloned() {
            highlights.apply(&effect_of(&step, None));
            if let Event::Array(event) = &step.event {
                snap.apply(event);
            }
        }
        now += Duration::from_millis(100);
    }

    assert_eq!(snap.values, vec![1, 4, 7, 9]);
    // the final step marks the whole array sorted
    assert!(highlights.all_indices);
}

#[test]
fn default_delay_is_within_the_supported_range() {
    let player = Player::new();
    assert_eq!(player.delay_ms(), DEFAULT_DELAY_MS);
    assert!((100..=3000).contains(&player.delay_ms()));
}

#[test]
fn reset_then_restart_replays_from_the_top() {
    let values = vec![3, 1, 2];
    let mut player = Player::new();
    player.set_delay_ms(100);
    let t0 = Instant::now();
    player.start(bubble_sort(&values), t0).unwrap();
    assert!(player.tick(t0).is_some());
    assert!(player.cursor() > 0);

    player.reset();
    assert_eq!(player.state(), PlaybackState::Idle);
    assert_eq!(player.cursor(), 0);

    let t1 = t0 + Duration::from_secs(5);
    player.start(bubble_sort(&values), t1).unwrap();
    let texts = drain(&mut player, t1);
    assert_eq!(texts.len(), bubble_sort(&values).len());
}

#[test]
fn pause_holds_the_cursor_still() {
    let values = vec![5, 4, 3, 2, 1];
    let mut player = Player::new();
    player.set_delay_ms(100);
    let t0 = Instant::now();
    player.start(bubble_sort(&values), t0).unwrap();
    assert!(player.tick(t0).is_some());
    let cursor = player.cursor();

    player.pause();
    for i in 1..50 {
        assert!(player.tick(t0 + Duration::from_millis(i * 100)).is_none());
    }
    assert_eq!(player.cursor(), cursor);

    let t1 = t0 + Duration::from_secs(10);
    player.resume(t1);
    assert!(player.tick(t1 + Duration::from_millis(100)).is_some());
    assert_eq!(player.cursor(), cursor + 1);
}

#[test]
fn snapshot_enum_replay_matches_direct_replay() {
    let values = vec![2, 1];
    let trace = bubble_sort(&values);
    let mut direct = ArraySnapshot::new(values.clone());
    let mut wrapped = Snapshot::Array(ArraySnapshot::new(values));
    for step in &trace.steps {
        if let Event::Array(event) = &step.event {
            direct.apply(event);
        }
        wrapped.apply(step, None);
    }
    assert_eq!(wrapped, Snapshot::Array(direct));
}
