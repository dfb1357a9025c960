use plant_duel_core::{Event, SideEffects};
use plant_duel_system_special::{Config, Special};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn ready_events(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, Event::SpecialReady))
        .count()
}

#[test]
fn meter_is_capped_at_max() {
    let mut special = Special::new(Config::default());
    let mut out = Vec::new();

    for _ in 0..20 {
        special.increment(1, &mut out);
        assert!(special.meter() <= 7);
    }
    special.increment(u32::MAX, &mut out);

    assert_eq!(special.meter(), 7);
    assert!(special.is_ready());
}

#[test]
fn became_ready_fires_once_per_fill() {
    let mut special = Special::new(Config::default());
    let mut out = Vec::new();

    for _ in 0..6 {
        special.increment(1, &mut out);
    }
    assert_eq!(ready_events(&out), 0);
    assert!(!special.is_ready());

    special.increment(1, &mut out);
    special.increment(1, &mut out);
    special.increment(1, &mut out);
    assert_eq!(ready_events(&out), 1, "edge trigger must not repeat at capacity");

    special.consume(&mut out);
    assert_eq!(special.meter(), 0);
    special.increment(7, &mut out);
    assert_eq!(ready_events(&out), 2, "trigger re-arms after consuming");
}

#[test]
fn every_change_reports_the_meter() {
    let mut special = Special::new(Config::default());
    let mut out = Vec::new();

    special.increment(2, &mut out);
    special.consume(&mut out);

    assert_eq!(
        out,
        vec![
            Event::SpecialMeterChanged { value: 2, max: 7 },
            Event::SpecialMeterChanged { value: 0, max: 7 },
        ]
    );
}

#[test]
fn damage_adds_situational_bonuses() {
    let special = Special::new(Config::default());

    assert_eq!(special.calculate_damage(&SideEffects::default()), 5);

    let soaked = SideEffects {
        soaked: true,
        ..SideEffects::default()
    };
    assert_eq!(special.calculate_damage(&soaked), 7);

    let everything = SideEffects {
        soaked: true,
        sun_locked: true,
        burn_turns: 1,
    };
    assert_eq!(special.calculate_damage(&everything), 9);
}

#[test]
fn consuming_keeps_the_streak_but_reset_clears_it() {
    let mut special = Special::new(Config::default());
    let mut out = Vec::new();
    special.increment(7, &mut out);
    special.record_hit();
    special.record_hit();

    special.consume(&mut out);
    assert_eq!(special.meter(), 0);
    assert_eq!(special.hit_streak(), 2);

    special.increment(3, &mut out);
    special.reset(&mut out);
    assert_eq!(special.meter(), 0);
    assert_eq!(special.hit_streak(), 0);
}

#[test]
fn always_hit_connects_regardless_of_chance() {
    let special = Special::new(Config {
        base_hit_chance: 0.0,
        max_hit_chance: 0.0,
        ..Config::default()
    });
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    assert!((0..100).all(|_| special.roll_hit(&mut rng)));
}

#[test]
fn rolled_hits_respect_the_chance_bounds() {
    let never = Special::new(Config {
        always_hit: false,
        base_hit_chance: 0.0,
        max_hit_chance: 0.0,
        ..Config::default()
    });
    let certain = Special::new(Config {
        always_hit: false,
        base_hit_chance: 1.0,
        max_hit_chance: 1.0,
        ..Config::default()
    });
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    assert!((0..100).all(|_| !never.roll_hit(&mut rng)));
    assert!((0..100).all(|_| certain.roll_hit(&mut rng)));
}

#[test]
fn snapshot_mirrors_the_meter() {
    let mut special = Special::new(Config::default());
    let mut out = Vec::new();
    special.increment(7, &mut out);

    let snapshot = special.snapshot();
    assert_eq!(snapshot.value, 7);
    assert_eq!(snapshot.max, 7);
    assert!(snapshot.ready);
}
