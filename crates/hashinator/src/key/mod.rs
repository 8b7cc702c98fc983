//! Partitioning key model.
//!
//! A [`PartitionKey`] is the value of a row's partitioning column, tagged
//! with its storage type. Null is carried as `None` inside the variant so a
//! null integer can never be confused with a zero or a sentinel value.

pub mod nullable;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use nullable::{IntoPartitionKey, TypedNull, NULL_BIGINT, NULL_INTEGER, NULL_SMALLINT, NULL_TINYINT};

/// Storage type of a partitioning column.
///
/// The set is closed: these are the only column types a table may be
/// partitioned on.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Varchar,
}

impl KeyType {
    /// Every supported key type, in wire-code order.
    pub const ALL: [KeyType; 5] = [
        KeyType::TinyInt,
        KeyType::SmallInt,
        KeyType::Integer,
        KeyType::BigInt,
        KeyType::Varchar,
    ];

    /// Numeric type code used by the storage format.
    pub fn code(self) -> u8 {
        match self {
            KeyType::TinyInt => 3,
            KeyType::SmallInt => 4,
            KeyType::Integer => 5,
            KeyType::BigInt => 6,
            KeyType::Varchar => 9,
        }
    }

    /// Lowercase SQL name of the type.
    pub fn name(self) -> &'static str {
        match self {
            KeyType::TinyInt => "tinyint",
            KeyType::SmallInt => "smallint",
            KeyType::Integer => "integer",
            KeyType::BigInt => "bigint",
            KeyType::Varchar => "varchar",
        }
    }

    /// True for the integer types, which share one hash path.
    pub fn is_integer(self) -> bool {
        !matches!(self, KeyType::Varchar)
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for KeyType {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        KeyType::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or_else(|| Error::UnsupportedType(format!("type code {}", code)))
    }
}

impl FromStr for KeyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "tinyint" => Ok(KeyType::TinyInt),
            "smallint" => Ok(KeyType::SmallInt),
            "integer" | "int" => Ok(KeyType::Integer),
            "bigint" => Ok(KeyType::BigInt),
            "varchar" | "string" => Ok(KeyType::Varchar),
            _ => Err(Error::UnsupportedType(s.to_string())),
        }
    }
}

/// Value of a partitioning column.
///
/// Immutable once built. `None` is the typed null for that column type.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PartitionKey {
    TinyInt(Option<i8>),
    SmallInt(Option<i16>),
    Integer(Option<i32>),
    BigInt(Option<i64>),
    Varchar(Option<String>),
}

impl PartitionKey {
    /// The typed null of `key_type`.
    pub fn null(key_type: KeyType) -> Self {
        match key_type {
            KeyType::TinyInt => PartitionKey::TinyInt(None),
            KeyType::SmallInt => PartitionKey::SmallInt(None),
            KeyType::Integer => PartitionKey::Integer(None),
            KeyType::BigInt => PartitionKey::BigInt(None),
            KeyType::Varchar => PartitionKey::Varchar(None),
        }
    }

    /// Shorthand for a non-null `VARCHAR` key.
    pub fn varchar(value: impl Into<String>) -> Self {
        PartitionKey::Varchar(Some(value.into()))
    }

    /// Parses `text` as a non-null value of `key_type`.
    ///
    /// Integer text must fit the column width; `VARCHAR` accepts any text
    /// verbatim.
    pub fn parse(key_type: KeyType, text: &str) -> Result<Self> {
        fn int<T: FromStr>(key_type: KeyType, text: &str) -> Result<T>
        where
            T::Err: fmt::Display,
        {
            text.trim().parse::<T>().map_err(|e| Error::InvalidKey {
                key_type: key_type.to_string(),
                reason: format!("{:?}: {}", text, e),
            })
        }

        Ok(match key_type {
            KeyType::TinyInt => PartitionKey::TinyInt(Some(int(key_type, text)?)),
            KeyType::SmallInt => PartitionKey::SmallInt(Some(int(key_type, text)?)),
            KeyType::Integer => PartitionKey::Integer(Some(int(key_type, text)?)),
            KeyType::BigInt => PartitionKey::BigInt(Some(int(key_type, text)?)),
            KeyType::Varchar => PartitionKey::varchar(text),
        })
    }

    /// Type tag of this key.
    pub fn key_type(&self) -> KeyType {
        match self {
            PartitionKey::TinyInt(_) => KeyType::TinyInt,
            PartitionKey::SmallInt(_) => KeyType::SmallInt,
            PartitionKey::Integer(_) => KeyType::Integer,
            PartitionKey::BigInt(_) => KeyType::BigInt,
            PartitionKey::Varchar(_) => KeyType::Varchar,
        }
    }

    pub fn is_null(&self) -> bool {
        self.value().is_none()
    }

    /// Normalized hashable form of the key, or `None` for a typed null.
    ///
    /// Integers of every width are sign-extended to 64 bits, so
    /// `TinyInt(Some(-5))` and `BigInt(Some(-5))` land on the same partition.
    pub fn value(&self) -> Option<KeyValue<'_>> {
        match self {
            PartitionKey::TinyInt(v) => v.map(|v| KeyValue::Int(i64::from(v))),
            PartitionKey::SmallInt(v) => v.map(|v| KeyValue::Int(i64::from(v))),
            PartitionKey::Integer(v) => v.map(|v| KeyValue::Int(i64::from(v))),
            PartitionKey::BigInt(v) => v.map(KeyValue::Int),
            PartitionKey::Varchar(v) => v.as_deref().map(|s| KeyValue::Bytes(s.as_bytes())),
        }
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionKey::Varchar(Some(s)) => write!(f, "{}({:?})", self.key_type(), s),
            _ => match self.value() {
                Some(KeyValue::Int(v)) => write!(f, "{}({})", self.key_type(), v),
                _ => write!(f, "{}(NULL)", self.key_type()),
            },
        }
    }
}

/// Borrowed, width-independent view of a non-null key.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum KeyValue<'a> {
    /// Any integer column, sign-extended.
    Int(i64),
    /// UTF-8 bytes of a string column.
    Bytes(&'a [u8]),
}
