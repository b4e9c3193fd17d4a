//! Block-style YAML encoder that double-quotes every string scalar, the
//! shape the block-literal pass has to recognise.

use ghaflow::FlowResult;
use serde_yaml::{Mapping, Value};

pub fn quoted_yaml(value: &Value, _indent: usize) -> FlowResult<String> {
    let mut out = String::new();
    match value {
        Value::Mapping(map) => emit_mapping(map, 0, &mut out),
        other => {
            out.push_str(&scalar(other));
            out.push('\n');
        }
    }
    Ok(out)
}

fn emit_mapping(map: &Mapping, pad: usize, out: &mut String) {
    for (key, value) in map {
        let key = key.as_str().expect("string keys");
        let prefix = format!("{}{}:", " ".repeat(pad), key);
        match value {
            Value::Mapping(child) if !child.is_empty() => {
                out.push_str(&prefix);
                out.push('\n');
                emit_mapping(child, pad + 2, out);
            }
            Value::Sequence(items) if !items.is_empty() => {
                out.push_str(&prefix);
                out.push('\n');
                emit_sequence(items, pad + 2, out);
            }
            other => out.push_str(&format!("{} {}\n", prefix, scalar(other))),
        }
    }
}

fn emit_sequence(items: &[Value], pad: usize, out: &mut String) {
    let dash = format!("{}- ", " ".repeat(pad));
    for item in items {
        match item {
            Value::Mapping(child) if !child.is_empty() => {
                let mut nested = String::new();
                emit_mapping(child, pad + 2, &mut nested);
                out.push_str(&dash);
                out.push_str(&nested[pad + 2..]);
            }
            Value::Sequence(inner) if !inner.is_empty() => {
                out.push_str(&" ".repeat(pad));
                out.push_str("-\n");
                emit_sequence(inner, pad + 2, out);
            }
            other => out.push_str(&format!("{}{}\n", dash, scalar(other))),
        }
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => serde_json::to_string(text).expect("string encodes"),
        Value::Sequence(_) => "[]".to_string(),
        Value::Mapping(_) => "{}".to_string(),
        Value::Tagged(_) => panic!("tagged values are not produced by workflows"),
    }
}
