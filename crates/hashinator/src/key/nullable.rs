//! Typed convenience surface for nullable columns.
//!
//! The storage format encodes integer nulls in-band as the minimum value of
//! the column width. Values handed over from a nullable column go through
//! [`IntoPartitionKey`], which decodes those sentinels into typed nulls so
//! callers never build a [`PartitionKey`] by hand.

use super::{KeyType, PartitionKey};

/// In-band null of a `TINYINT` column.
pub const NULL_TINYINT: i8 = i8::MIN;
/// In-band null of a `SMALLINT` column.
pub const NULL_SMALLINT: i16 = i16::MIN;
/// In-band null of an `INTEGER` column.
pub const NULL_INTEGER: i32 = i32::MIN;
/// In-band null of a `BIGINT` column.
pub const NULL_BIGINT: i64 = i64::MIN;

/// Explicit null marker for each key type.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TypedNull {
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Varchar,
}

impl TypedNull {
    pub const ALL: [TypedNull; 5] = [
        TypedNull::TinyInt,
        TypedNull::SmallInt,
        TypedNull::Integer,
        TypedNull::BigInt,
        TypedNull::Varchar,
    ];

    pub fn key_type(self) -> KeyType {
        match self {
            TypedNull::TinyInt => KeyType::TinyInt,
            TypedNull::SmallInt => KeyType::SmallInt,
            TypedNull::Integer => KeyType::Integer,
            TypedNull::BigInt => KeyType::BigInt,
            TypedNull::Varchar => KeyType::Varchar,
        }
    }
}

/// Conversion from a raw column value into a [`PartitionKey`].
///
/// Raw integers equal to the width's `NULL_*` sentinel become typed nulls.
/// To hash the literal minimum value, build the `PartitionKey` variant
/// directly instead.
pub trait IntoPartitionKey {
    fn into_partition_key(self) -> PartitionKey;
}

impl IntoPartitionKey for PartitionKey {
    fn into_partition_key(self) -> PartitionKey {
        self
    }
}

impl IntoPartitionKey for &PartitionKey {
    fn into_partition_key(self) -> PartitionKey {
        self.clone()
    }
}

impl IntoPartitionKey for TypedNull {
    fn into_partition_key(self) -> PartitionKey {
        PartitionKey::null(self.key_type())
    }
}

macro_rules! impl_sentinel_int {
    ($($ty:ty => $variant:ident, $null:ident;)*) => {
        $(
            impl IntoPartitionKey for $ty {
                fn into_partition_key(self) -> PartitionKey {
                    PartitionKey::$variant((self != $null).then_some(self))
                }
            }

            impl IntoPartitionKey for Option<$ty> {
                fn into_partition_key(self) -> PartitionKey {
                    match self {
                        Some(v) => v.into_partition_key(),
                        None => PartitionKey::$variant(None),
                    }
                }
            }
        )*
    };
}

impl_sentinel_int! {
    i8 => TinyInt, NULL_TINYINT;
    i16 => SmallInt, NULL_SMALLINT;
    i32 => Integer, NULL_INTEGER;
    i64 => BigInt, NULL_BIGINT;
}

impl IntoPartitionKey for &str {
    fn into_partition_key(self) -> PartitionKey {
        PartitionKey::varchar(self)
    }
}

impl IntoPartitionKey for String {
    fn into_partition_key(self) -> PartitionKey {
        PartitionKey::Varchar(Some(self))
    }
}

impl IntoPartitionKey for Option<&str> {
    fn into_partition_key(self) -> PartitionKey {
        PartitionKey::Varchar(self.map(str::to_owned))
    }
}

impl IntoPartitionKey for Option<String> {
    fn into_partition_key(self) -> PartitionKey {
        PartitionKey::Varchar(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_decode_to_typed_nulls() {
        assert_eq!(NULL_TINYINT.into_partition_key(), PartitionKey::TinyInt(None));
        assert_eq!(NULL_SMALLINT.into_partition_key(), PartitionKey::SmallInt(None));
        assert_eq!(NULL_INTEGER.into_partition_key(), PartitionKey::Integer(None));
        assert_eq!(NULL_BIGINT.into_partition_key(), PartitionKey::BigInt(None));
    }

    #[test]
    fn test_plain_values_keep_their_width() {
        assert_eq!(7i8.into_partition_key(), PartitionKey::TinyInt(Some(7)));
        assert_eq!((-1i16).into_partition_key(), PartitionKey::SmallInt(Some(-1)));
        assert_eq!(Some(0i32).into_partition_key(), PartitionKey::Integer(Some(0)));
        assert_eq!(
            (i64::MIN + 1).into_partition_key(),
            PartitionKey::BigInt(Some(i64::MIN + 1))
        );
    }

    #[test]
    fn test_string_nulls() {
        assert_eq!(None::<&str>.into_partition_key(), PartitionKey::Varchar(None));
        assert_eq!(TypedNull::Varchar.into_partition_key(), PartitionKey::Varchar(None));
        assert_eq!("abc".into_partition_key(), PartitionKey::varchar("abc"));
    }

    #[test]
    fn test_typed_null_markers_cover_every_type() {
        let types: Vec<KeyType> = TypedNull::ALL.iter().map(|n| n.key_type()).collect();
        assert_eq!(types, KeyType::ALL.to_vec());
    }
}
