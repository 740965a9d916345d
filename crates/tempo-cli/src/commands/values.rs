use anyhow::{bail, Result};
use serde_json::{Map, Value as JsonValue};
use tempo::core::{
    codec::nested,
    prelude::{Arguments, Value},
};

/// Parse a JSON array into positional arguments. Arrays of numbers
/// become tensors; everything else is passed as an opaque value.
pub(super) fn parse_arguments(text: &str) -> Result<Arguments> {
    let items = match serde_json::from_str::<JsonValue>(text)? {
        JsonValue::Array(items) => items,
        other => bail!("arguments must be a JSON array, got {}", other),
    };

    let values = items
        .iter()
        .enumerate()
        .map(|(index, item)| to_value(item, index))
        .collect::<Result<Vec<_>>>()?;

    Ok(Arguments::positional(values))
}

fn to_value(item: &JsonValue, index: usize) -> Result<Value> {
    if is_numeric_array(item) {
        Ok(Value::Tensor(nested::from_nested(
            item,
            &format!("argument {}", index),
        )?))
    } else {
        Ok(Value::Opaque(item.clone()))
    }
}

fn is_numeric_array(value: &JsonValue) -> bool {
    match value {
        JsonValue::Array(items) => {
            !items.is_empty()
                && items
                    .iter()
                    .all(|item| item.is_number() || is_numeric_array(item))
        }
        _ => false,
    }
}

/// Render values for printing: an array for positional values and an
/// object for named ones.
pub(super) fn render(args: &Arguments) -> Result<JsonValue> {
    let mut positional = vec![];
    let mut named = Map::new();

    for (index, (name, value)) in args.iter().enumerate() {
        let label = name.map_or_else(|| index.to_string(), str::to_owned);
        let rendered = match value {
            Value::Tensor(tensor) => nested::to_nested(tensor, &label)?,
            Value::Opaque(value) => value.clone(),
            Value::Bytes(bytes) => JsonValue::from(bytes.clone()),
        };

        match name {
            Some(name) => {
                named.insert(name.to_owned(), rendered);
            }
            None => positional.push(rendered),
        }
    }

    if named.is_empty() {
        Ok(JsonValue::Array(positional))
    } else {
        Ok(JsonValue::Object(named))
    }
}
