//! Synthetic Table Data
//!
//! Deterministic record generation. Every field is a pure function of the
//! record's position, so two calls with the same arguments produce equal
//! sequences.

use serde::{Deserialize, Serialize};

/// Constant price carried by every generated record
pub const ITEM_PRICE: f64 = 100.01;

/// Modulus applied to the index for the `count` field
pub const COUNT_CYCLE: u64 = 100;

/// Shape of the generated records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ItemShape {
    /// Flat record without a nested customer
    Plain,
    /// Record embedding a [`Customer`] sub-record
    #[default]
    WithCustomer,
}

impl ItemShape {
    /// Stable name used in configuration and reports
    pub fn as_str(self) -> &'static str {
        match self {
            ItemShape::Plain => "plain",
            ItemShape::WithCustomer => "with-customer",
        }
    }
}

impl std::fmt::Display for ItemShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "flat" => Ok(ItemShape::Plain),
            "with-customer" | "customer" => Ok(ItemShape::WithCustomer),
            other => Err(format!("Unknown item shape: {}", other)),
        }
    }
}

/// Customer sub-record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// `Customer {i}`
    pub name: String,
    /// `Customer Street {i}`
    pub address: String,
    /// `City {i}`
    pub city: String,
    /// The index as text
    pub zip: String,
    /// `Cust.omer{i}@email.com`
    pub email: String,
    /// The index as text
    pub phone: String,
}

impl Customer {
    fn for_index(i: u64) -> Self {
        Self {
            name: format!("Customer {}", i),
            address: format!("Customer Street {}", i),
            city: format!("City {}", i),
            zip: i.to_string(),
            email: format!("Cust.omer{}@email.com", i),
            phone: i.to_string(),
        }
    }
}

/// One row of the rendered table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Position in the generated sequence
    pub id: u64,
    /// `item {i}`
    pub name: String,
    /// Always true
    pub valid: bool,
    /// `Description {i}`
    pub description: String,
    /// `id % 100`
    pub count: u64,
    /// Always [`ITEM_PRICE`]
    pub price: f64,
    /// Present for [`ItemShape::WithCustomer`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
}

impl Record {
    /// Build the record at position `i`
    pub fn for_index(i: u64, shape: ItemShape) -> Self {
        Self {
            id: i,
            name: format!("item {}", i),
            valid: true,
            description: format!("Description {}", i),
            count: i % COUNT_CYCLE,
            price: ITEM_PRICE,
            customer: match shape {
                ItemShape::Plain => None,
                ItemShape::WithCustomer => Some(Customer::for_index(i)),
            },
        }
    }
}

/// Generate `n` records with ids `0..n` in order
pub fn generate_range(n: usize, shape: ItemShape) -> Vec<Record> {
    (0..n as u64).map(|i| Record::for_index(i, shape)).collect()
}
