use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use plant_duel_core::{Command, Event, Move};
use plant_duel_world::{self as world, query, BattleConfig, World};

#[test]
fn battle_events_are_deterministic_for_scripted_session() {
    let script = scripted_session();
    let first = replay(7, script.clone());
    let second = replay(7, script);

    assert_eq!(first, second, "battle replay diverged");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert!(
        first
            .events
            .iter()
            .any(|event| matches!(event, Event::RoundResolved { .. })),
        "script must resolve rounds"
    );
}

#[test]
fn different_seeds_diverge() {
    let first = replay(1, scripted_session());
    let second = replay(2, scripted_session());

    assert_ne!(first.fingerprint(), second.fingerprint());
}

fn replay(seed: u64, commands: Vec<Command>) -> ReplayOutcome {
    let config = BattleConfig {
        seed: Some(seed),
        ..BattleConfig::default()
    };
    let mut events = Vec::new();
    let mut world = World::new(config, &mut events);
    let mut health = Vec::new();

    for command in commands {
        world::apply(&mut world, command, &mut events);
        health.push((
            query::player_health(&world),
            query::enemy(&world).health(),
            query::special(&world).value,
        ));
    }

    ReplayOutcome { events, health }
}

/// Forty rounds at the default beat, each fed in uneven ticks.
fn scripted_session() -> Vec<Command> {
    let mut commands = Vec::new();
    for round in 0..40 {
        let chosen = Move::ALL[round % Move::ALL.len()];
        commands.push(Command::ChooseMove { chosen });
        commands.push(Command::UnleashSpecial);
        for step in [250, 400, 16, 900, 434] {
            commands.push(Command::Tick {
                dt: Duration::from_millis(step),
            });
        }
        if round % 8 == 7 {
            commands.push(Command::UnleashSpecial);
            commands.push(Command::Tick {
                dt: Duration::from_secs(3),
            });
        }
    }
    commands
}

#[derive(Debug, PartialEq, Eq)]
struct ReplayOutcome {
    events: Vec<Event>,
    health: Vec<(u32, u32, u32)>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.events.len().hash(&mut hasher);
        for event in &self.events {
            format!("{event:?}").hash(&mut hasher);
        }
        self.health.hash(&mut hasher);
        hasher.finish()
    }
}
