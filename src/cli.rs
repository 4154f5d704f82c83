// Copyright 2026 The Lapse Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use serde::Serialize;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::config::DeckConfig;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::report;
use crate::session::ReviewSession;
use crate::stats::DeckStatistics;
use crate::stats::MAX_RANGE;
use crate::store::SqliteStore;
use crate::store::Store;
use crate::strategy::Strategy;
use crate::types::deck::Deck;
use crate::types::direction::Direction;

const CONFIG_FILE: &str = "deck.toml";
const DATABASE_FILE: &str = "lapse.db";

#[derive(ValueEnum, Clone, Copy)]
enum Policy {
    /// Two grades; multiplies a base interval up or down.
    ConstantCoefficient,
    /// Five grades; the SM-2 easiness recurrence.
    Sm2,
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Create a deck in a directory.
    Init {
        /// The deck's name.
        name: String,
        /// The scheduling policy to bind the deck to.
        #[arg(long, value_enum, default_value = "constant-coefficient")]
        policy: Policy,
        /// Optional path to the deck directory.
        directory: Option<String>,
    },
    /// Add a card to the deck.
    Add {
        /// The front text.
        front: String,
        /// The back text.
        back: String,
        /// Optional path to the deck directory.
        directory: Option<String>,
    },
    /// Review the cards due today.
    Drill {
        /// The review direction.
        #[arg(long, value_enum, default_value = "regular")]
        direction: Direction,
        /// Optional path to the deck directory.
        directory: Option<String>,
    },
    /// Print review statistics as JSON.
    Stats {
        /// How many days each series covers.
        #[arg(long, default_value_t = MAX_RANGE)]
        range: usize,
        /// Optional path to the deck directory.
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    let clock = SystemClock;
    match cli {
        Command::Init {
            name,
            policy,
            directory,
        } => init(name, policy, directory),
        Command::Add {
            front,
            back,
            directory,
        } => add(front, back, directory, &clock),
        Command::Drill {
            direction,
            directory,
        } => drill(direction, directory, &clock),
        Command::Stats { range, directory } => stats(range, directory, &clock),
    }
}

fn deck_directory(directory: Option<String>) -> Fallible<PathBuf> {
    let directory: PathBuf = match directory {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    if !directory.exists() {
        return fail("directory does not exist.");
    }
    Ok(directory)
}

fn open_deck(directory: &Path) -> Fallible<(Deck, SqliteStore)> {
    let config_path = directory.join(CONFIG_FILE);
    if !config_path.exists() {
        return fail(format!("no {CONFIG_FILE} here; run `lapse init` first."));
    }
    let config = DeckConfig::load(&config_path)?;
    let db_path = directory.join(DATABASE_FILE);
    let db_path = db_path
        .to_str()
        .ok_or_else(|| ErrorReport::new("invalid path"))?;
    let store = SqliteStore::open(db_path)?;
    Ok((config.into_deck(), store))
}

fn init(name: String, policy: Policy, directory: Option<String>) -> Fallible<()> {
    let directory = deck_directory(directory)?;
    let config_path = directory.join(CONFIG_FILE);
    if config_path.exists() {
        return fail(format!("{CONFIG_FILE} already exists here."));
    }
    let config = match policy {
        Policy::ConstantCoefficient => DeckConfig::constant_default(name),
        Policy::Sm2 => DeckConfig::sm2_default(name),
    };
    std::fs::write(&config_path, config.to_toml()?)?;
    let db_path = directory.join(DATABASE_FILE);
    let db_path = db_path
        .to_str()
        .ok_or_else(|| ErrorReport::new("invalid path"))?;
    let _ = SqliteStore::open(db_path)?;
    println!("Created deck {} in {}.", config.name(), directory.display());
    Ok(())
}

fn add(front: String, back: String, directory: Option<String>, clock: &dyn Clock) -> Fallible<()> {
    let directory = deck_directory(directory)?;
    let (deck, mut store) = open_deck(&directory)?;
    let card = deck.new_card(front, back, clock.today());
    let existing = store.load_cards(deck.name())?;
    if existing.iter().any(|c| c.id() == card.id()) {
        return fail("an identical card already exists in this deck.");
    }
    store.save_card(&card)?;
    println!("Added card {}.", card.id());
    Ok(())
}

fn drill(direction: Direction, directory: Option<String>, clock: &dyn Clock) -> Fallible<()> {
    let directory = deck_directory(directory)?;
    let (deck, mut store) = open_deck(&directory)?;
    let today = clock.today();
    let strategy = Strategy::for_direction(direction);
    let mut session = ReviewSession::start(&deck, strategy, &store, today)?;
    if session.is_finished() {
        println!("No cards due today.");
        return Ok(());
    }
    println!("{} cards due.", session.remaining());
    loop {
        let (prompt, answer) = match session.current() {
            Some(card) => (
                strategy.prompt(card).to_string(),
                strategy.answer(card).to_string(),
            ),
            None => break,
        };
        println!();
        println!("Q: {prompt}");
        println!("[press enter to reveal]");
        wait_for_enter();
        println!("A: {answer}");
        let action_index = read_action(session.actions());
        session.answer(action_index, &mut store, today)?;
    }
    println!();
    println!("Session done.");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport {
    deck: String,
    range: usize,
    first_time_reviewed: Vec<u32>,
    regular_reviews: Vec<u32>,
    reverse_reviews: Vec<u32>,
    cards_created: Vec<u32>,
    regular_due: Vec<u32>,
    reverse_due: Vec<u32>,
}

fn stats(range: usize, directory: Option<String>, clock: &dyn Clock) -> Fallible<()> {
    if range < 1 || range > MAX_RANGE {
        return fail(format!("range must be between 1 and {MAX_RANGE}."));
    }
    let directory = deck_directory(directory)?;
    let (deck, store) = open_deck(&directory)?;
    let today = clock.today();
    let cards = store.load_cards(deck.name())?;
    let mut stats = store
        .load_statistics(deck.name())?
        .unwrap_or_else(|| DeckStatistics::new(deck.name().to_string(), today));
    stats.roll_to(today);
    let report = StatsReport {
        deck: deck.name().to_string(),
        range,
        first_time_reviewed: report::first_time_series(&stats, range),
        regular_reviews: report::strategy_series(
            &stats,
            Strategy::for_direction(Direction::Regular).index(),
            range,
        ),
        reverse_reviews: report::strategy_series(
            &stats,
            Strategy::for_direction(Direction::Reverse).index(),
            range,
        ),
        cards_created: report::cards_created_series(&cards, range, today),
        regular_due: report::cards_due_series(&cards, Direction::Regular, range, today),
        reverse_due: report::cards_due_series(&cards, Direction::Reverse, range, today),
    };
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

fn wait_for_enter() {
    let mut input = String::new();
    let _ = std::io::stdin().read_line(&mut input);
}

fn read_action(labels: &[&str]) -> usize {
    let menu = labels
        .iter()
        .enumerate()
        .map(|(i, label)| format!("{} = {}", i + 1, label))
        .collect::<Vec<_>>()
        .join(", ");
    loop {
        println!("Grade: ({menu})");
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).unwrap();
        match input.trim().parse::<usize>() {
            Ok(n) if n >= 1 && n <= labels.len() => return n - 1,
            _ => println!(
                "Invalid input. Please enter a number between 1 and {}.",
                labels.len()
            ),
        }
    }
}
