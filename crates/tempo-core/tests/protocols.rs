// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

use serde_json::json;
use tempo_core::prelude::*;

#[path = "./helpers.rs"]
mod helpers;

#[test]
fn test_every_protocol_carries_a_tensor() {
    for kind in [ProtocolKind::V2, ProtocolKind::Seldon, ProtocolKind::KfServingV1] {
        let protocol = kind.protocol();
        let args = Arguments::single(helpers::row(2.0));
        let declared = DeclaredType::new().with(Kind::Tensor);

        let request = protocol.encode_request(&args).unwrap();
        let decoded = protocol.decode_request(&request, &declared).unwrap();
        assert_eq!(
            decoded.as_single(),
            Some(&Value::Tensor(helpers::row(2.0))),
            "{} request",
            kind
        );

        let response = protocol.encode_response("m", &args).unwrap();
        let decoded = protocol.decode_response(&response, &declared).unwrap();
        assert_eq!(
            decoded.as_single(),
            Some(&Value::Tensor(helpers::row(2.0))),
            "{} response",
            kind
        );
    }
}

#[test]
fn test_v2_many_named_inputs() {
    let protocol = ProtocolKind::V2.protocol();
    let args = Arguments::named([
        ("features", Value::from(helpers::row(0.0))),
        ("label", Value::from("cat")),
        ("options", Value::from(json!({"top_k": 3}))),
    ]);
    let declared = DeclaredType::new()
        .with_named("features", Kind::Tensor)
        .with_named("label", Kind::Str)
        .with_named("options", Kind::Dict);

    let body = protocol.encode_request(&args).unwrap();
    let decoded = protocol.decode_request(&body, &declared).unwrap();

    assert_eq!(decoded.into_arguments(), args);
}

#[test]
fn test_single_value_protocols_reject_pairs() {
    let args = Arguments::positional([helpers::row(0.0), helpers::row(1.0)]);

    for kind in [ProtocolKind::Seldon, ProtocolKind::KfServingV1] {
        assert!(matches!(
            kind.protocol().encode_request(&args),
            Err(ProtocolError::UnsupportedArity { count: 2, .. })
        ));
    }
}

#[test]
fn test_seldon_json_data() {
    let protocol = ProtocolKind::Seldon.protocol();
    let value = json!({"text": "hello", "n": [1, 2]});

    let body = protocol.encode_request(&Arguments::single(value.clone())).unwrap();
    assert_eq!(body, json!({ "jsonData": value }));

    let decoded = protocol.decode_request(&body, &DeclaredType::new().with(Kind::Json)).unwrap();
    assert_eq!(decoded, Decoded::Single(Value::Opaque(value)));
}
