//! Ticket record, field table and unvalidated drafts.
//!
//! # Responsibility
//! - Hold the five ticket fields behind validating accessors.
//! - Provide validate-or-default construction for UI input.
//! - Carry raw form input (`TicketDraft`) until it is validated.
//!
//! # Invariants
//! - Every field of a `Ticket` matches its rule at every observable instant.
//! - A rejected setter leaves the previous value in place.
//! - Deserialization never produces an invalid `Ticket`.

use crate::validation::{self, Pattern};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

macro_rules! key_prefix {
    () => {
        "ticket."
    };
}

/// Namespace prefix shared by all ticket storage keys.
pub const KEY_PREFIX: &str = key_prefix!();

pub const DEFAULT_NUMBER: &str = "00000";
pub const DEFAULT_SERIES: &str = "0";
pub const DEFAULT_FRACTION: &str = "0";
pub const DEFAULT_PRICE: &str = "0";

/// One of the five ticket fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TicketField {
    Number,
    Series,
    Fraction,
    Date,
    Price,
}

impl TicketField {
    /// All fields in storage order.
    pub const ALL: [TicketField; 5] = [
        Self::Number,
        Self::Series,
        Self::Fraction,
        Self::Date,
        Self::Price,
    ];

    /// Short field name, also used as the serialized field name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Series => "series",
            Self::Fraction => "fraction",
            Self::Date => "date",
            Self::Price => "price",
        }
    }

    /// Namespaced storage key, e.g. `ticket.number`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Number => concat!(key_prefix!(), "number"),
            Self::Series => concat!(key_prefix!(), "series"),
            Self::Fraction => concat!(key_prefix!(), "fraction"),
            Self::Date => concat!(key_prefix!(), "date"),
            Self::Price => concat!(key_prefix!(), "price"),
        }
    }

    /// Value a field falls back to when no valid candidate is given.
    ///
    /// The date default is evaluated against the local clock on each call.
    pub fn default_value(self) -> String {
        match self {
            Self::Number => DEFAULT_NUMBER.to_string(),
            Self::Series => DEFAULT_SERIES.to_string(),
            Self::Fraction => DEFAULT_FRACTION.to_string(),
            Self::Date => validation::today(),
            Self::Price => DEFAULT_PRICE.to_string(),
        }
    }

    /// Returns whether `value` satisfies this field's rule.
    pub fn is_valid(self, value: &str) -> bool {
        match self {
            Self::Number => validation::matches(value, Pattern::Number),
            Self::Series => validation::matches(value, Pattern::Series),
            Self::Fraction => validation::matches(value, Pattern::Fraction),
            Self::Date => validation::is_valid_date(value),
            Self::Price => validation::matches(value, Pattern::Price),
        }
    }

    /// Checks `value` and returns a typed error on rejection.
    pub fn check(self, value: &str) -> Result<(), TicketValidationError> {
        if self.is_valid(value) {
            Ok(())
        } else {
            Err(TicketValidationError {
                field: self,
                value: value.to_string(),
            })
        }
    }
}

impl Display for TicketField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A candidate value rejected by its field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketValidationError {
    pub field: TicketField,
    pub value: String,
}

impl Display for TicketValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: `{}`", self.field, self.value)
    }
}

impl Error for TicketValidationError {}

/// Canonical lottery ticket record.
///
/// Fields are private; reads go through getters and writes through
/// validating setters so the record cannot drift into an invalid state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TicketDraft")]
pub struct Ticket {
    number: String,
    series: String,
    fraction: String,
    date: String,
    price: String,
}

impl Default for Ticket {
    fn default() -> Self {
        Self {
            number: TicketField::Number.default_value(),
            series: TicketField::Series.default_value(),
            fraction: TicketField::Fraction.default_value(),
            date: TicketField::Date.default_value(),
            price: TicketField::Price.default_value(),
        }
    }
}

impl Ticket {
    /// Creates a ticket with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ticket from raw candidates, falling back to the default of
    /// each field whose candidate is invalid.
    ///
    /// Never fails. Fields are resolved independently.
    pub fn from_candidates(
        number: &str,
        series: &str,
        fraction: &str,
        date: &str,
        price: &str,
    ) -> Self {
        Self {
            number: resolve(TicketField::Number, number),
            series: resolve(TicketField::Series, series),
            fraction: resolve(TicketField::Fraction, fraction),
            date: resolve(TicketField::Date, date),
            price: resolve(TicketField::Price, price),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn series(&self) -> &str {
        &self.series
    }

    pub fn fraction(&self) -> &str {
        &self.fraction
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn set_number(&mut self, candidate: &str) -> Result<(), TicketValidationError> {
        self.set(TicketField::Number, candidate)
    }

    pub fn set_series(&mut self, candidate: &str) -> Result<(), TicketValidationError> {
        self.set(TicketField::Series, candidate)
    }

    pub fn set_fraction(&mut self, candidate: &str) -> Result<(), TicketValidationError> {
        self.set(TicketField::Fraction, candidate)
    }

    pub fn set_date(&mut self, candidate: &str) -> Result<(), TicketValidationError> {
        self.set(TicketField::Date, candidate)
    }

    pub fn set_price(&mut self, candidate: &str) -> Result<(), TicketValidationError> {
        self.set(TicketField::Price, candidate)
    }

    /// Returns the current value of `field`.
    pub fn get(&self, field: TicketField) -> &str {
        match field {
            TicketField::Number => &self.number,
            TicketField::Series => &self.series,
            TicketField::Fraction => &self.fraction,
            TicketField::Date => &self.date,
            TicketField::Price => &self.price,
        }
    }

    /// Replaces `field` with `candidate` when it passes the field rule.
    ///
    /// # Errors
    /// - Returns `TicketValidationError` and keeps the previous value when
    ///   `candidate` is rejected. Callers that want the legacy silent
    ///   behavior can discard the result.
    pub fn set(
        &mut self,
        field: TicketField,
        candidate: &str,
    ) -> Result<(), TicketValidationError> {
        field.check(candidate)?;
        *self.slot_mut(field) = candidate.to_string();
        Ok(())
    }

    /// Iterates `(field, value)` pairs in storage order.
    pub fn fields(&self) -> impl Iterator<Item = (TicketField, &str)> + '_ {
        TicketField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }

    fn slot_mut(&mut self, field: TicketField) -> &mut String {
        match field {
            TicketField::Number => &mut self.number,
            TicketField::Series => &mut self.series,
            TicketField::Fraction => &mut self.fraction,
            TicketField::Date => &mut self.date,
            TicketField::Price => &mut self.price,
        }
    }
}

fn resolve(field: TicketField, candidate: &str) -> String {
    if field.is_valid(candidate) {
        candidate.to_string()
    } else {
        field.default_value()
    }
}

/// Unvalidated field input as collected by a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketDraft {
    pub number: String,
    pub series: String,
    pub fraction: String,
    pub date: String,
    pub price: String,
}

impl TicketDraft {
    /// Returns the raw input for `field`.
    pub fn get(&self, field: TicketField) -> &str {
        match field {
            TicketField::Number => &self.number,
            TicketField::Series => &self.series,
            TicketField::Fraction => &self.fraction,
            TicketField::Date => &self.date,
            TicketField::Price => &self.price,
        }
    }

    /// Replaces the raw input for `field` without validating it.
    pub fn set(&mut self, field: TicketField, value: impl Into<String>) {
        let slot = match field {
            TicketField::Number => &mut self.number,
            TicketField::Series => &mut self.series,
            TicketField::Fraction => &mut self.fraction,
            TicketField::Date => &mut self.date,
            TicketField::Price => &mut self.price,
        };
        *slot = value.into();
    }

    /// Lists every field whose input fails its rule, in storage order.
    pub fn invalid_fields(&self) -> Vec<TicketField> {
        TicketField::ALL
            .into_iter()
            .filter(|field| !field.is_valid(self.get(*field)))
            .collect()
    }

    /// Converts the draft into a ticket, reporting all rejected fields.
    pub fn validate(&self) -> Result<Ticket, Vec<TicketValidationError>> {
        let errors: Vec<TicketValidationError> = TicketField::ALL
            .into_iter()
            .filter_map(|field| field.check(self.get(field)).err())
            .collect();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Ticket {
            number: self.number.clone(),
            series: self.series.clone(),
            fraction: self.fraction.clone(),
            date: self.date.clone(),
            price: self.price.clone(),
        })
    }
}

impl From<&Ticket> for TicketDraft {
    fn from(ticket: &Ticket) -> Self {
        Self {
            number: ticket.number.clone(),
            series: ticket.series.clone(),
            fraction: ticket.fraction.clone(),
            date: ticket.date.clone(),
            price: ticket.price.clone(),
        }
    }
}

impl TryFrom<TicketDraft> for Ticket {
    type Error = TicketValidationError;

    fn try_from(draft: TicketDraft) -> Result<Self, Self::Error> {
        draft
            .validate()
            .map_err(|mut errors| errors.swap_remove(0))
    }
}
