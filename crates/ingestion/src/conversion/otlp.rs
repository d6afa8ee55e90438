//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! OTLP body decoding
//!
//! OTLP/HTTP bodies are either binary protobuf or OTLP/JSON. Both decode into
//! the same generated request type.

use collector_core::{CollectorError, CollectorResult, SignalPayload};
use prost::Message;
use serde::de::DeserializeOwned;

use crate::receivers::context::ContentEncoding;

/// Decode a request body into the OTLP request type for its signal kind
pub fn decode_payload<P>(body: &[u8], encoding: ContentEncoding) -> CollectorResult<P>
where
    P: SignalPayload + Message + Default + DeserializeOwned,
{
    match encoding {
        ContentEncoding::Json => serde_json::from_slice(body).map_err(|e| {
            CollectorError::decode_with_source(
                format!("invalid OTLP/JSON {} payload: {}", P::KIND, e),
                e,
            )
        }),
        ContentEncoding::Protobuf => P::decode(body).map_err(|e| {
            CollectorError::decode_with_source(
                format!("invalid OTLP/protobuf {} payload: {}", P::KIND, e),
                e,
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collector_core::{LogsPayload, TracesPayload};
    use opentelemetry_proto::tonic::trace::v1::{ResourceSpans, ScopeSpans, Span};

    fn traces(span_count: usize) -> TracesPayload {
        let spans = (0..span_count)
            .map(|i| Span {
                trace_id: vec![1; 16],
                span_id: vec![i as u8 + 1; 8],
                name: format!("span-{i}"),
                ..Default::default()
            })
            .collect();

        TracesPayload {
            resource_spans: vec![ResourceSpans {
                scope_spans: vec![ScopeSpans {
                    spans,
                    ..Default::default()
                }],
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_protobuf_and_json_decode_to_same_payload() {
        let payload = traces(3);

        let binary = payload.encode_to_vec();
        let json = serde_json::to_vec(&payload).unwrap();

        let from_binary: TracesPayload =
            decode_payload(&binary, ContentEncoding::Protobuf).unwrap();
        let from_json: TracesPayload = decode_payload(&json, ContentEncoding::Json).unwrap();

        assert_eq!(from_binary.item_count(), 3);
        assert_eq!(from_json.item_count(), 3);
        assert_eq!(from_binary, from_json);
    }

    #[test]
    fn test_empty_protobuf_body_is_empty_request() {
        let payload: LogsPayload = decode_payload(&[], ContentEncoding::Protobuf).unwrap();
        assert_eq!(payload.item_count(), 0);
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let err = decode_payload::<TracesPayload>(&[0xff, 0xff, 0xff], ContentEncoding::Protobuf)
            .unwrap_err();
        assert!(matches!(err, CollectorError::Decode { .. }));

        let err = decode_payload::<LogsPayload>(b"{not json", ContentEncoding::Json).unwrap_err();
        assert!(matches!(err, CollectorError::Decode { .. }));
    }

    #[test]
    fn test_json_64_bit_fields_use_string_form() {
        let quoted = br#"{"resourceSpans":[{"scopeSpans":[{"spans":[
            {"name":"checkout","startTimeUnixNano":"1544712660000000000"}
        ]}]}]}"#;
        let payload: TracesPayload = decode_payload(quoted, ContentEncoding::Json).unwrap();
        let span = &payload.resource_spans[0].scope_spans[0].spans[0];
        assert_eq!(span.start_time_unix_nano, 1_544_712_660_000_000_000);

        let bare = br#"{"resourceSpans":[{"scopeSpans":[{"spans":[
            {"name":"checkout","startTimeUnixNano":1544712660000000000}
        ]}]}]}"#;
        let err = decode_payload::<TracesPayload>(bare, ContentEncoding::Json).unwrap_err();
        assert!(matches!(err, CollectorError::Decode { .. }));
    }
}
