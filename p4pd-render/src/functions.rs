//! # Template Functions
//!
//! Parameter derivation exposed to templates. Tera functions take named
//! arguments only:
//!
//! ```text
//! {{ bits_to_bytes(bits=9) }}                       -> 2
//! {{ get_c_type(byte_width=4) }}                    -> uint32_t
//! {{ get_thrift_type(byte_width=6) }}               -> MacAddr_t
//! {{ get_c_name(name="ingress.fib") }}              -> ingress_fib
//! {{ gen_match_params(key=table.key) }}             -> [{name, byte_width}, ...]
//! {{ gen_action_params(runtime_data=a.runtime_data) }}
//! {{ enum_to_str(category="MatchType", value=1) }}  -> lpm
//! {{ enum_from_str(category="MatchType", name="LPM") }} -> 1
//! ```

use p4pd_model::{
    action_params, bits_to_bytes as byte_width_of, c_name, match_params, CType, EnumCategory,
    KeyField, MatchType, MeterType, RuntimeParam, TableType, ThriftType,
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tera::{Tera, Value};

type Args = HashMap<String, Value>;

/// Register every derivation function on `tera`
pub fn register_functions(tera: &mut Tera) {
    tera.register_function("bits_to_bytes", bits_to_bytes);
    tera.register_function("get_c_type", get_c_type);
    tera.register_function("get_thrift_type", get_thrift_type);
    tera.register_function("get_c_name", get_c_name);
    tera.register_function("gen_match_params", gen_match_params);
    tera.register_function("gen_action_params", gen_action_params);
    tera.register_function("enum_to_str", enum_to_str);
    tera.register_function("enum_from_str", enum_from_str);
}

fn arg<T: DeserializeOwned>(args: &Args, function: &str, name: &str) -> tera::Result<T> {
    let value = args.get(name).ok_or_else(|| {
        tera::Error::msg(format!("{}: missing argument '{}'", function, name))
    })?;
    tera::from_value(value.clone()).map_err(|e| {
        tera::Error::msg(format!("{}: invalid argument '{}': {}", function, name, e))
    })
}

fn to_value<T: serde::Serialize>(value: T) -> tera::Result<Value> {
    tera::to_value(value).map_err(|e| tera::Error::msg(e.to_string()))
}

pub fn bits_to_bytes(args: &Args) -> tera::Result<Value> {
    let bits: u32 = arg(args, "bits_to_bytes", "bits")?;
    Ok(Value::from(byte_width_of(bits)))
}

pub fn get_c_type(args: &Args) -> tera::Result<Value> {
    let byte_width: u32 = arg(args, "get_c_type", "byte_width")?;
    Ok(Value::from(CType::for_width(byte_width).as_str()))
}

pub fn get_thrift_type(args: &Args) -> tera::Result<Value> {
    let byte_width: u32 = arg(args, "get_thrift_type", "byte_width")?;
    Ok(Value::from(ThriftType::for_width(byte_width).as_str()))
}

pub fn get_c_name(args: &Args) -> tera::Result<Value> {
    let name: String = arg(args, "get_c_name", "name")?;
    Ok(Value::from(c_name(&name)))
}

pub fn gen_match_params(args: &Args) -> tera::Result<Value> {
    let key: Vec<KeyField> = arg(args, "gen_match_params", "key")?;
    to_value(match_params(&key))
}

pub fn gen_action_params(args: &Args) -> tera::Result<Value> {
    let runtime_data: Vec<RuntimeParam> = arg(args, "gen_action_params", "runtime_data")?;
    to_value(action_params(&runtime_data))
}

fn enum_name<K: EnumCategory>(value: u8) -> tera::Result<Value> {
    K::name_of(value)
        .map(Value::from)
        .map_err(|e| tera::Error::msg(e.to_string()))
}

fn enum_value<K: EnumCategory>(name: &str) -> tera::Result<Value> {
    K::parse(name)
        .map(|member| Value::from(member.to_u8()))
        .map_err(|e| tera::Error::msg(e.to_string()))
}

fn unknown_category(function: &str, category: &str) -> tera::Error {
    tera::Error::msg(format!("{}: unknown enum category '{}'", function, category))
}

pub fn enum_to_str(args: &Args) -> tera::Result<Value> {
    let category: String = arg(args, "enum_to_str", "category")?;
    let value: u8 = arg(args, "enum_to_str", "value")?;
    match category.as_str() {
        "MatchType" => enum_name::<MatchType>(value),
        "TableType" => enum_name::<TableType>(value),
        "MeterType" => enum_name::<MeterType>(value),
        other => Err(unknown_category("enum_to_str", other)),
    }
}

pub fn enum_from_str(args: &Args) -> tera::Result<Value> {
    let category: String = arg(args, "enum_from_str", "category")?;
    let name: String = arg(args, "enum_from_str", "name")?;
    match category.as_str() {
        "MatchType" => enum_value::<MatchType>(&name),
        "TableType" => enum_value::<TableType>(&name),
        "MeterType" => enum_value::<MeterType>(&name),
        other => Err(unknown_category("enum_from_str", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tera::Context;

    fn render(template: &str, context: &Context) -> tera::Result<String> {
        let mut tera = Tera::default();
        register_functions(&mut tera);
        tera.add_raw_template("t", template)?;
        tera.render("t", context)
    }

    fn args(pairs: &[(&str, Value)]) -> Args {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_scalar_functions() {
        assert_eq!(bits_to_bytes(&args(&[("bits", Value::from(9))])).unwrap(), 2);
        assert_eq!(
            get_c_type(&args(&[("byte_width", Value::from(2))])).unwrap(),
            "uint16_t"
        );
        assert_eq!(
            get_thrift_type(&args(&[("byte_width", Value::from(16))])).unwrap(),
            "IPv6_t"
        );
        assert_eq!(
            get_c_name(&args(&[("name", Value::from("a.b[1]"))])).unwrap(),
            "a_b_1_"
        );
    }

    #[test]
    fn test_missing_argument() {
        let err = get_c_type(&Args::new()).unwrap_err();
        assert!(err.to_string().contains("missing argument 'byte_width'"));
    }

    #[test]
    fn test_enum_functions() {
        let to_str = args(&[("category", Value::from("TableType")), ("value", Value::from(2))]);
        assert_eq!(enum_to_str(&to_str).unwrap(), "indirect_ws");

        let from_str = args(&[("category", Value::from("MeterType")), ("name", Value::from("BYTES"))]);
        assert_eq!(enum_from_str(&from_str).unwrap(), 1);

        let bad = args(&[("category", Value::from("Color")), ("value", Value::from(0))]);
        assert!(enum_to_str(&bad).is_err());

        let bad = args(&[("category", Value::from("MatchType")), ("value", Value::from(9))]);
        assert!(enum_to_str(&bad).is_err());
    }

    #[test]
    fn test_match_params_in_template() {
        let mut context = Context::new();
        context.insert(
            "key",
            &vec![
                KeyField::new("ip_dst", MatchType::Lpm, 32),
                KeyField::new("port", MatchType::Range, 16),
            ],
        );
        let out = render(
            "{% for p in gen_match_params(key=key) %}{{ p.name }}:{{ p.byte_width }} {% endfor %}",
            &context,
        )
        .unwrap();
        assert_eq!(out, "ip_dst:4 ip_dst_prefix_length:2 port_start:2 port_end:2 ");
    }

    #[test]
    fn test_action_params_in_template() {
        let mut context = Context::new();
        context.insert("runtime_data", &vec![RuntimeParam::new("ttl", 8)]);
        let out = render(
            "{% for p in gen_action_params(runtime_data=runtime_data) %}\
             {{ get_c_type(byte_width=p.byte_width) }} {{ p.name }};{% endfor %}",
            &context,
        )
        .unwrap();
        assert_eq!(out, "uint8_t action_ttl;");
    }
}
