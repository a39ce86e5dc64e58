use crate::error::Error;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A signed monetary balance.
///
/// Wrapper around `rust_decimal::Decimal` to keep financial arithmetic
/// type-safe. A balance may legitimately be negative (e.g. tracked losses in
/// `profit`); positivity is enforced on [`Amount`], not here.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Balance(pub Decimal);

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }
}

impl Add for Balance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Balance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Balance {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Balance {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// A validated, strictly positive monetary amount.
///
/// Every withdraw/transfer magnitude passes through this type, so the
/// processor never has to re-check the sign downstream.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, Error> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(Error::InvalidAmount)
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The amount in integer minor units (paise), truncated toward zero.
    /// Saturates on amounts too large for the payout wire format.
    pub fn minor_units(&self) -> i64 {
        (self.0 * Decimal::ONE_HUNDRED)
            .trunc()
            .to_i64()
            .unwrap_or(i64::MAX)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = Error;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

/// A brokerage client and its tracked capital.
///
/// `id` and `created_at` are stamped by the store on insert. Clients are
/// never deleted; `capital` is only mutated through the store's
/// credit/debit primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub capital: Balance,
    pub profit: Balance,
    pub created_at: DateTime<Utc>,
}

/// Write model for client creation. The store assigns identity and the
/// creation timestamp.
#[derive(Debug, Clone, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub capital: Balance,
    #[serde(default)]
    pub profit: Balance,
}

/// Partial update for a client's tracked figures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientPatch {
    pub capital: Option<Decimal>,
    pub profit: Option<Decimal>,
}

impl ClientPatch {
    pub fn is_empty(&self) -> bool {
        self.capital.is_none() && self.profit.is_none()
    }
}
