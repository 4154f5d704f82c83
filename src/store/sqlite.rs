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

use rusqlite::Connection;
use rusqlite::Row;
use rusqlite::ToSql;
use rusqlite::Transaction;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::stats::DeckStatistics;
use crate::store::Store;
use crate::types::card::Card;
use crate::types::card::CardState;
use crate::types::card::ConstantState;
use crate::types::card::Sm2State;
use crate::types::card_id::CardId;
use crate::types::date::Date;
use crate::types::direction::Direction;
use crate::types::direction::PerDirection;

/// A SQLite-backed store, one database file per collection of decks.
pub struct SqliteStore {
    conn: Connection,
}

/// Storage tag for the card's scheduling state variant.
enum StateKind {
    Constant,
    Sm2,
}

impl StateKind {
    fn as_str(&self) -> &str {
        match self {
            StateKind::Constant => "constant",
            StateKind::Sm2 => "sm2",
        }
    }
}

impl TryFrom<String> for StateKind {
    type Error = ErrorReport;

    fn try_from(value: String) -> Fallible<Self> {
        match value.as_str() {
            "constant" => Ok(StateKind::Constant),
            "sm2" => Ok(StateKind::Sm2),
            _ => fail(format!("invalid state kind: {}", value)),
        }
    }
}

impl ToSql for StateKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for StateKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        StateKind::try_from(string).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

impl SqliteStore {
    pub fn open(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }
}

impl Store for SqliteStore {
    fn load_cards(&self, deck_name: &str) -> Fallible<Vec<Card>> {
        let mut cards = Vec::new();
        let mut stmt = self.conn.prepare(
            "select deck_name, front, back, created_at, is_new, regular_due, reverse_due, \
             state_kind, regular_base_time, reverse_base_time, regular_repetition, \
             regular_interval, regular_easiness, reverse_repetition, reverse_interval, \
             reverse_easiness, regular_incorrect_count, reverse_incorrect_count \
             from cards where deck_name = ? order by created_at, card_id;",
        )?;
        let mut rows = stmt.query([deck_name])?;
        while let Some(row) = rows.next()? {
            cards.push(card_from_row(row)?);
        }
        Ok(cards)
    }

    fn save_card(&mut self, card: &Card) -> Fallible<()> {
        log::debug!("Saving card {}", card.id());
        let row = CardRow::from_card(card);
        self.conn.execute(
            "insert or replace into cards (card_id, deck_name, front, back, created_at, is_new, \
             regular_due, reverse_due, state_kind, regular_base_time, reverse_base_time, \
             regular_repetition, regular_interval, regular_easiness, reverse_repetition, \
             reverse_interval, reverse_easiness, regular_incorrect_count, reverse_incorrect_count) \
             values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19);",
            rusqlite::params![
                card.id(),
                card.deck_name(),
                card.front(),
                card.back(),
                card.created_at(),
                card.is_new(),
                card.due(Direction::Regular),
                card.due(Direction::Reverse),
                row.state_kind,
                row.regular_base_time,
                row.reverse_base_time,
                row.regular_repetition,
                row.regular_interval,
                row.regular_easiness,
                row.reverse_repetition,
                row.reverse_interval,
                row.reverse_easiness,
                row.regular_incorrect_count,
                row.reverse_incorrect_count,
            ],
        )?;
        Ok(())
    }

    fn delete_card(&mut self, id: CardId) -> Fallible<()> {
        let affected = self
            .conn
            .execute("delete from cards where card_id = ?;", [id])?;
        if affected == 0 {
            return fail(format!("no card with id {id}"));
        }
        Ok(())
    }

    fn load_statistics(&self, deck_name: &str) -> Fallible<Option<DeckStatistics>> {
        let mut stmt = self
            .conn
            .prepare("select payload from statistics where deck_name = ?;")?;
        let mut rows = stmt.query([deck_name])?;
        match rows.next()? {
            Some(row) => {
                let payload: String = row.get(0)?;
                let stats: DeckStatistics = serde_json::from_str(&payload)?;
                Ok(Some(stats))
            }
            None => Ok(None),
        }
    }

    fn save_statistics(&mut self, stats: &DeckStatistics) -> Fallible<()> {
        log::debug!("Saving statistics for deck {}", stats.deck_name());
        let payload = serde_json::to_string(stats)?;
        self.conn.execute(
            "insert or replace into statistics (deck_name, payload) values (?1, ?2);",
            rusqlite::params![stats.deck_name(), payload],
        )?;
        Ok(())
    }

    fn delete_statistics(&mut self, deck_name: &str) -> Fallible<()> {
        let affected = self
            .conn
            .execute("delete from statistics where deck_name = ?;", [deck_name])?;
        if affected == 0 {
            return fail(format!("no statistics for deck {deck_name}"));
        }
        Ok(())
    }
}

/// The flattened column values of a card's scheduling state. Columns of
/// the variant the card does not carry are stored as zeroes.
struct CardRow {
    state_kind: StateKind,
    regular_base_time: f64,
    reverse_base_time: f64,
    regular_repetition: u32,
    regular_interval: u32,
    regular_easiness: f64,
    reverse_repetition: u32,
    reverse_interval: u32,
    reverse_easiness: f64,
    regular_incorrect_count: u32,
    reverse_incorrect_count: u32,
}

impl CardRow {
    fn from_card(card: &Card) -> Self {
        match card.state() {
            CardState::ConstantCoefficient(states) => Self {
                state_kind: StateKind::Constant,
                regular_base_time: states.regular.base_time(),
                reverse_base_time: states.reverse.base_time(),
                regular_repetition: 0,
                regular_interval: 0,
                regular_easiness: 0.0,
                reverse_repetition: 0,
                reverse_interval: 0,
                reverse_easiness: 0.0,
                regular_incorrect_count: states.regular.incorrect_count(),
                reverse_incorrect_count: states.reverse.incorrect_count(),
            },
            CardState::Sm2(states) => Self {
                state_kind: StateKind::Sm2,
                regular_base_time: 0.0,
                reverse_base_time: 0.0,
                regular_repetition: states.regular.repetition(),
                regular_interval: states.regular.interval(),
                regular_easiness: states.regular.easiness(),
                reverse_repetition: states.reverse.repetition(),
                reverse_interval: states.reverse.interval(),
                reverse_easiness: states.reverse.easiness(),
                regular_incorrect_count: states.regular.incorrect_count(),
                reverse_incorrect_count: states.reverse.incorrect_count(),
            },
        }
    }
}

fn card_from_row(row: &Row) -> Fallible<Card> {
    let deck_name: String = row.get(0)?;
    let front: String = row.get(1)?;
    let back: String = row.get(2)?;
    let created_at: Date = row.get(3)?;
    let is_new: bool = row.get(4)?;
    let regular_due: Date = row.get(5)?;
    let reverse_due: Date = row.get(6)?;
    let kind: StateKind = row.get(7)?;
    let state = match kind {
        StateKind::Constant => CardState::ConstantCoefficient(PerDirection {
            regular: ConstantState::restore(row.get(8)?, row.get(16)?),
            reverse: ConstantState::restore(row.get(9)?, row.get(17)?),
        }),
        StateKind::Sm2 => CardState::Sm2(PerDirection {
            regular: Sm2State::restore(row.get(10)?, row.get(11)?, row.get(12)?, row.get(16)?),
            reverse: Sm2State::restore(row.get(13)?, row.get(14)?, row.get(15)?, row.get(17)?),
        }),
    };
    Ok(Card::restore(
        deck_name,
        front,
        back,
        created_at,
        is_new,
        PerDirection {
            regular: regular_due,
            reverse: reverse_due,
        },
        state,
    ))
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' and name=?;";
    let count: i64 = tx.query_row(sql, ["cards"], |row| row.get(0))?;
    Ok(count > 0)
}
