#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Plant Duel battle in the terminal.

mod config;
mod input;
mod terminal;

use std::{
    io::{self, BufRead},
    path::PathBuf,
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::Parser;
use plant_duel_core::{Command, Event};
use plant_duel_presentation::Director;
use plant_duel_world::{self as world, query, World};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    config::AppConfig,
    input::{parse_input, rejection_text, Input, HELP},
    terminal::{TerminalAnimator, TerminalAudio, TerminalHud},
};

/// Wall-clock interval between simulation ticks.
const FRAME: Duration = Duration::from_millis(16);

/// Sun, Water and Soil duel against a rotation of plant bosses.
#[derive(Debug, Parser)]
#[command(name = "plant-duel", version, about)]
struct Args {
    /// TOML file with optional `[battle]` and `[presentation]` tables.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for the boss rotation and enemy picks; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Length of one countdown beat in milliseconds.
    #[arg(long, value_name = "MS")]
    beat_ms: Option<u64>,
}

/// Entry point for the Plant Duel command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.battle.seed = Some(seed);
    }
    if config.battle.seed.is_none() {
        config.battle.seed = Some(rand::random());
    }
    if let Some(beat_ms) = args.beat_ms {
        config.battle.timing.beat_ms = beat_ms;
    }

    info!(
        seed = config.battle.seed(),
        beat_ms = config.battle.timing.beat_ms,
        "starting battle"
    );
    run(config);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(config: AppConfig) {
    let mut events = Vec::new();
    let mut world = World::new(config.battle, &mut events);
    let mut director = Director::new(config.presentation)
        .with_hud(Box::new(TerminalHud::default()))
        .with_audio(Box::new(TerminalAudio))
        .with_animator(Box::new(TerminalAnimator));

    println!("{}", query::welcome_banner(&world));
    println!("{HELP}");
    director.present(&query::snapshot(&world), &events);

    let lines = spawn_stdin_reader();
    let mut stdin_closed = false;
    let mut last_tick = Instant::now();

    loop {
        events.clear();

        if stdin_closed {
            if !query::is_input_locked(&world) {
                break;
            }
            thread::sleep(FRAME);
        } else {
            match lines.recv_timeout(FRAME) {
                Ok(line) => match parse_input(&line) {
                    Some(Input::Battle(command)) => world::apply(&mut world, command, &mut events),
                    Some(Input::Help) => println!("{HELP}"),
                    Some(Input::Quit) => break,
                    None => println!("Unknown input {:?}. {HELP}", line.trim()),
                },
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => stdin_closed = true,
            }
        }

        let now = Instant::now();
        world::apply(
            &mut world,
            Command::Tick {
                dt: now.saturating_duration_since(last_tick),
            },
            &mut events,
        );
        last_tick = now;

        if events.is_empty() {
            continue;
        }
        for event in &events {
            if let Event::CommandRejected { reason } = event {
                println!("{}", rejection_text(*reason));
            }
        }
        director.present(&query::snapshot(&world), &events);
    }

    println!("Thanks for playing.");
}

/// Forwards stdin lines over a channel so the battle clock keeps running.
fn spawn_stdin_reader() -> Receiver<String> {
    let (sender, receiver) = mpsc::channel();
    let _ = thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if sender.send(line).is_err() {
                break;
            }
        }
    });
    receiver
}
