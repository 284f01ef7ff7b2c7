//! # Parameter Derivation
//!
//! Pure functions that turn bit widths into generated-code parameter
//! layouts. The order of the returned parameters is the positional layout
//! of the generated calls and must follow declaration order exactly.
//!
//! ## Match parameter layout
//!
//! ```text
//! Match type  Parameters for key field `f` (byte width w)
//! ──────────────────────────────────────────────────────
//! exact       f: w
//! lpm         f: w, f_prefix_length: 2
//! ternary     f: w, f_mask: w
//! range       f_start: w, f_end: w
//! ```

use crate::action::RuntimeParam;
use crate::kinds::MatchType;
use crate::table::KeyField;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of an LPM prefix length parameter in bytes
pub const PREFIX_LENGTH_BYTES: u32 = 2;

/// Prefix prepended to every action parameter name
pub const ACTION_PARAM_PREFIX: &str = "action_";

/// Named parameter with its width in bytes
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub byte_width: u32,
}

impl Param {
    pub fn new(name: impl Into<String>, byte_width: u32) -> Self {
        Self {
            name: name.into(),
            byte_width,
        }
    }
}

/// Number of bytes needed to hold `bits` bits
#[inline]
pub const fn bits_to_bytes(bits: u32) -> u32 {
    bits.div_ceil(8)
}

/// Native C type used for a value of `byte_width` bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CType {
    U8,
    U16,
    U32,
    /// Pointer to a byte buffer
    Bytes,
}

impl CType {
    pub fn for_width(byte_width: u32) -> Self {
        match byte_width {
            1 => CType::U8,
            2 => CType::U16,
            w if w <= 4 => CType::U32,
            _ => CType::Bytes,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CType::U8 => "uint8_t",
            CType::U16 => "uint16_t",
            CType::U32 => "uint32_t",
            CType::Bytes => "uint8_t *",
        }
    }
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Thrift (wire) type used for a value of `byte_width` bytes
///
/// Widths of exactly 6 and 16 bytes are tagged as MAC and IPv6 addresses.
/// This is a width heuristic: any other 6- or 16-byte field gets the same
/// tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThriftType {
    Byte,
    I16,
    I32,
    MacAddr,
    Ipv6,
    Binary,
}

impl ThriftType {
    pub fn for_width(byte_width: u32) -> Self {
        match byte_width {
            1 => ThriftType::Byte,
            2 => ThriftType::I16,
            w if w <= 4 => ThriftType::I32,
            6 => ThriftType::MacAddr,
            16 => ThriftType::Ipv6,
            _ => ThriftType::Binary,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ThriftType::Byte => "byte",
            ThriftType::I16 => "i16",
            ThriftType::I32 => "i32",
            ThriftType::MacAddr => "MacAddr_t",
            ThriftType::Ipv6 => "IPv6_t",
            ThriftType::Binary => "binary",
        }
    }
}

impl fmt::Display for ThriftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameters of a match spec, in key order
pub fn match_params(key: &[KeyField]) -> Vec<Param> {
    let mut params = Vec::with_capacity(key.len() * 2);
    for field in key {
        let width = bits_to_bytes(field.bitwidth);
        match field.match_type {
            MatchType::Exact => {
                params.push(Param::new(field.name.as_str(), width));
            }
            MatchType::Lpm => {
                params.push(Param::new(field.name.as_str(), width));
                params.push(Param::new(
                    format!("{}_prefix_length", field.name),
                    PREFIX_LENGTH_BYTES,
                ));
            }
            MatchType::Ternary => {
                params.push(Param::new(field.name.as_str(), width));
                params.push(Param::new(format!("{}_mask", field.name), width));
            }
            MatchType::Range => {
                params.push(Param::new(format!("{}_start", field.name), width));
                params.push(Param::new(format!("{}_end", field.name), width));
            }
        }
    }
    params
}

/// Parameters of an action spec, in declaration order
pub fn action_params(runtime_data: &[RuntimeParam]) -> Vec<Param> {
    runtime_data
        .iter()
        .map(|p| {
            Param::new(
                format!("{}{}", ACTION_PARAM_PREFIX, p.name),
                bits_to_bytes(p.bitwidth),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_and_widths(params: &[Param]) -> Vec<(&str, u32)> {
        params
            .iter()
            .map(|p| (p.name.as_str(), p.byte_width))
            .collect()
    }

    #[test]
    fn test_bits_to_bytes() {
        assert_eq!(bits_to_bytes(0), 0);
        assert_eq!(bits_to_bytes(1), 1);
        assert_eq!(bits_to_bytes(8), 1);
        assert_eq!(bits_to_bytes(9), 2);
        assert_eq!(bits_to_bytes(48), 6);
        assert_eq!(bits_to_bytes(128), 16);
    }

    #[test]
    fn test_c_type() {
        assert_eq!(CType::for_width(1), CType::U8);
        assert_eq!(CType::for_width(2), CType::U16);
        assert_eq!(CType::for_width(3), CType::U32);
        assert_eq!(CType::for_width(4), CType::U32);
        assert_eq!(CType::for_width(5), CType::Bytes);
        assert_eq!(CType::for_width(6).to_string(), "uint8_t *");
    }

    #[test]
    fn test_thrift_type() {
        assert_eq!(ThriftType::for_width(1), ThriftType::Byte);
        assert_eq!(ThriftType::for_width(2), ThriftType::I16);
        assert_eq!(ThriftType::for_width(3), ThriftType::I32);
        assert_eq!(ThriftType::for_width(6), ThriftType::MacAddr);
        assert_eq!(ThriftType::for_width(16), ThriftType::Ipv6);
        assert_eq!(ThriftType::for_width(5), ThriftType::Binary);
        assert_eq!(ThriftType::for_width(6).to_string(), "MacAddr_t");
        assert_eq!(ThriftType::for_width(16).to_string(), "IPv6_t");
    }

    #[test]
    fn test_match_params_exact() {
        let key = [KeyField::new("ip_proto", MatchType::Exact, 8)];
        assert_eq!(names_and_widths(&match_params(&key)), vec![("ip_proto", 1)]);
    }

    #[test]
    fn test_match_params_lpm() {
        let key = [KeyField::new("ip_dst", MatchType::Lpm, 32)];
        assert_eq!(
            names_and_widths(&match_params(&key)),
            vec![("ip_dst", 4), ("ip_dst_prefix_length", 2)]
        );
    }

    #[test]
    fn test_match_params_range() {
        let key = [KeyField::new("port", MatchType::Range, 16)];
        assert_eq!(
            names_and_widths(&match_params(&key)),
            vec![("port_start", 2), ("port_end", 2)]
        );
    }

    #[test]
    fn test_match_params_ternary() {
        let key = [KeyField::new("mac_src", MatchType::Ternary, 48)];
        assert_eq!(
            names_and_widths(&match_params(&key)),
            vec![("mac_src", 6), ("mac_src_mask", 6)]
        );
    }

    #[test]
    fn test_match_params_keep_key_order() {
        let key = [
            KeyField::new("vrf", MatchType::Exact, 12),
            KeyField::new("dst", MatchType::Lpm, 32),
            KeyField::new("sport", MatchType::Range, 16),
            KeyField::new("tos", MatchType::Ternary, 8),
        ];
        assert_eq!(
            names_and_widths(&match_params(&key)),
            vec![
                ("vrf", 2),
                ("dst", 4),
                ("dst_prefix_length", 2),
                ("sport_start", 2),
                ("sport_end", 2),
                ("tos", 1),
                ("tos_mask", 1),
            ]
        );
    }

    #[test]
    fn test_action_params() {
        let data = [RuntimeParam::new("ttl", 8), RuntimeParam::new("dmac", 48)];
        assert_eq!(
            names_and_widths(&action_params(&data)),
            vec![("action_ttl", 1), ("action_dmac", 6)]
        );
        assert!(action_params(&[]).is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_match_type() -> impl Strategy<Value = MatchType> {
        prop_oneof![
            Just(MatchType::Exact),
            Just(MatchType::Lpm),
            Just(MatchType::Ternary),
            Just(MatchType::Range),
        ]
    }

    fn arb_key() -> impl Strategy<Value = Vec<KeyField>> {
        prop::collection::vec(
            ("[a-z][a-z0-9_]{0,8}", arb_match_type(), 1u32..=128)
                .prop_map(|(name, kind, bits)| KeyField::new(name, kind, bits)),
            0..6,
        )
    }

    proptest! {
        #[test]
        fn test_bits_to_bytes_is_ceiling(bits in 0u32..=1_000_000) {
            let bytes = bits_to_bytes(bits);
            prop_assert!(bytes * 8 >= bits);
            prop_assert!(bytes == 0 || (bytes - 1) * 8 < bits);
        }

        #[test]
        fn test_match_params_count(key in arb_key()) {
            let expected: usize = key
                .iter()
                .map(|f| if f.match_type == MatchType::Exact { 1 } else { 2 })
                .sum();
            prop_assert_eq!(match_params(&key).len(), expected);
        }

        #[test]
        fn test_match_params_follow_key_order(key in arb_key()) {
            let params = match_params(&key);
            let mut offset = 0;
            for field in &key {
                let width = bits_to_bytes(field.bitwidth);
                let first = &params[offset];
                match field.match_type {
                    MatchType::Range => {
                        prop_assert_eq!(&first.name, &format!("{}_start", field.name));
                    }
                    _ => {
                        prop_assert_eq!(&first.name, &field.name);
                    }
                }
                prop_assert_eq!(first.byte_width, width);
                offset += if field.match_type == MatchType::Exact { 1 } else { 2 };
            }
            prop_assert_eq!(offset, params.len());
        }

        #[test]
        fn test_action_params_preserve_order(widths in prop::collection::vec(1u32..=256, 0..8)) {
            let data: Vec<RuntimeParam> = widths
                .iter()
                .enumerate()
                .map(|(i, bits)| RuntimeParam::new(format!("p{}", i), *bits))
                .collect();
            let params = action_params(&data);
            prop_assert_eq!(params.len(), data.len());
            for (param, source) in params.iter().zip(&data) {
                prop_assert_eq!(&param.name, &format!("action_{}", source.name));
                prop_assert_eq!(param.byte_width, bits_to_bytes(source.bitwidth));
            }
        }
    }
}
