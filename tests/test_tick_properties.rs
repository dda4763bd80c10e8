use proptest::prelude::*;

use stopwatch::state::{Phase, TimerEngine};

proptest! {
    #[test]
    fn counters_match_tick_count(n in 0u64..20_000) {
        let mut engine = TimerEngine::default();
        engine.start();
        let generation = engine.generation();

        for _ in 0..n {
            engine.tick(generation);
        }

        let state = engine.state();
        prop_assert_eq!(u64::from(state.seconds), n % 60);
        prop_assert_eq!(u64::from(state.minutes), (n / 60) % 60);
        prop_assert_eq!(state.hours, n / 3600);
        prop_assert_eq!(state.elapsed_seconds(), n);
    }

    #[test]
    fn pause_and_resume_lose_nothing(before in 0u64..500, after in 0u64..500) {
        let mut engine = TimerEngine::default();
        engine.start();
        let first = engine.generation();
        for _ in 0..before {
            engine.tick(first);
        }

        engine.pause();
        // Ticks from the paused session are dropped
        engine.tick(first);
        prop_assert_eq!(engine.phase(), Phase::Paused);

        engine.start();
        let second = engine.generation();
        for _ in 0..after {
            engine.tick(second);
        }

        prop_assert_eq!(engine.state().elapsed_seconds(), before + after);
    }
}
