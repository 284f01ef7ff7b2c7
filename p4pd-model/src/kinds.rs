//! # Closed Enumerations for the PD model
//!
//! Match kinds, table kinds and meter kinds are closed categories. Each
//! member carries a stable integer value (its declaration index) and a
//! lowercase name. Parsing is case-insensitive and fails with
//! [`ModelError::InvalidValue`] when no member matches.
//!
//! | Category    | Members (value: name)                          |
//! |-------------|------------------------------------------------|
//! | match type  | 0: exact, 1: lpm, 2: ternary, 3: range         |
//! | table type  | 0: simple, 1: indirect, 2: indirect_ws         |
//! | meter type  | 0: packets, 1: bytes                           |

use crate::error::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bidirectional name/integer mapping shared by every closed category
pub trait EnumCategory: Copy + Sized + 'static {
    /// Human-readable category name used in diagnostics
    const CATEGORY: &'static str;

    /// Every member, in value order
    const MEMBERS: &'static [Self];

    /// Lowercase member name
    fn as_str(self) -> &'static str;

    /// Integer value of this member
    fn to_u8(self) -> u8;

    /// Member for an integer value
    fn from_u8(value: u8) -> Result<Self> {
        Self::MEMBERS
            .iter()
            .copied()
            .find(|member| member.to_u8() == value)
            .ok_or(ModelError::InvalidDiscriminant {
                category: Self::CATEGORY,
                value,
            })
    }

    /// Case-insensitive lookup by name
    fn parse(text: &str) -> Result<Self> {
        Self::MEMBERS
            .iter()
            .copied()
            .find(|member| member.as_str().eq_ignore_ascii_case(text))
            .ok_or_else(|| ModelError::InvalidValue {
                category: Self::CATEGORY,
                value: text.to_string(),
            })
    }

    /// Lowercase name for an integer value
    fn name_of(value: u8) -> Result<&'static str> {
        Self::from_u8(value).map(Self::as_str)
    }

    /// `(name, value)` pairs in value order
    fn pairs() -> Vec<(&'static str, u8)> {
        Self::MEMBERS
            .iter()
            .map(|member| (member.as_str(), member.to_u8()))
            .collect()
    }
}

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $category:tt {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:tt => $text:tt,
            )+
        }
    ) => {
        $(#[$meta])*
        #[repr(u8)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant = $value,
            )+
        }

        impl EnumCategory for $name {
            const CATEGORY: &'static str = $category;
            const MEMBERS: &'static [Self] = &[$($name::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            #[inline]
            fn to_u8(self) -> u8 {
                self as u8
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self> {
                <$name as EnumCategory>::parse(s)
            }
        }
    };
}

closed_enum! {
    /// Table lookup semantics
    pub enum MatchType as "match type" {
        /// Exact value
        Exact = 0 => "exact",
        /// Longest prefix
        Lpm = 1 => "lpm",
        /// Value and mask
        Ternary = 2 => "ternary",
        /// Inclusive numeric range
        Range = 3 => "range",
    }
}

closed_enum! {
    /// How a table reaches its actions
    pub enum TableType as "table type" {
        /// Actions stored in the table entry
        Simple = 0 => "simple",
        /// Entries point at action profile members
        Indirect = 1 => "indirect",
        /// Entries point at members or weighted groups
        IndirectWs = 2 => "indirect_ws",
    }
}

closed_enum! {
    /// Unit a meter counts in
    pub enum MeterType as "meter type" {
        Packets = 0 => "packets",
        Bytes = 1 => "bytes",
    }
}

impl TableType {
    /// Check if entries of this table go through an action profile
    #[inline]
    pub const fn is_indirect(self) -> bool {
        matches!(self, TableType::Indirect | TableType::IndirectWs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_follow_declaration_order() {
        assert_eq!(MatchType::Exact.to_u8(), 0);
        assert_eq!(MatchType::Lpm.to_u8(), 1);
        assert_eq!(MatchType::Ternary.to_u8(), 2);
        assert_eq!(MatchType::Range.to_u8(), 3);
        assert_eq!(TableType::IndirectWs.to_u8(), 2);
        assert_eq!(MeterType::Bytes.to_u8(), 1);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(MatchType::parse("LPM").unwrap(), MatchType::Lpm);
        assert_eq!(MatchType::parse("ternary").unwrap(), MatchType::Ternary);
        assert_eq!("Indirect_WS".parse::<TableType>().unwrap(), TableType::IndirectWs);
        assert_eq!("PACKETS".parse::<MeterType>().unwrap(), MeterType::Packets);
    }

    #[test]
    fn test_parse_unknown_value() {
        let err = MatchType::parse("valid").unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidValue {
                category: "match type",
                value: "valid".to_string(),
            }
        );
        assert!(TableType::parse("").is_err());
    }

    #[test]
    fn test_name_of() {
        assert_eq!(MatchType::name_of(3).unwrap(), "range");
        assert_eq!(TableType::name_of(2).unwrap(), "indirect_ws");
        assert_eq!(MeterType::name_of(0).unwrap(), "packets");
        assert!(MeterType::name_of(2).is_err());
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(MatchType::Exact.to_string(), "exact");
        assert_eq!(TableType::IndirectWs.to_string(), "indirect_ws");
    }

    #[test]
    fn test_pairs() {
        assert_eq!(
            TableType::pairs(),
            vec![("simple", 0), ("indirect", 1), ("indirect_ws", 2)]
        );
    }

    #[test]
    fn test_is_indirect() {
        assert!(!TableType::Simple.is_indirect());
        assert!(TableType::Indirect.is_indirect());
        assert!(TableType::IndirectWs.is_indirect());
    }
}
