/*!

# Tempo Core

This crate contains the wire protocols and type marshalling used by
Tempo models: converting typed arguments into inference request and
response envelopes, and reconstructing typed values from them.

```no_run
use tempo_core::prelude::*;
use tempo_core::tract_core::prelude::Tensor;

let tensor = Tensor::from_shape(&[1, 4], &[1.0f64, 2.0, 3.0, 4.0])?;
let request = build_request(&Arguments::single(tensor))?;

let declared = DeclaredType::new().with(Kind::Tensor);
let decoded = parse_request(&request, &declared)?;
# Ok::<(), Box<dyn std::error::Error>>(())
```

 */

#![warn(rust_2018_idioms)]

pub use tract_core;

pub mod assembler;
pub mod codec;
mod declared;
pub mod dispatcher;
mod error;
pub mod payload;
pub mod protocol;
pub mod registry;
mod value;

#[doc(inline)]
pub use crate::error::ProtocolError;

/// Most core utilities are re-exported here.
pub mod prelude {
    pub use super::assembler::{build_request, build_response};
    pub use super::declared::{DeclaredType, Kind, Slot};
    pub use super::dispatcher::{parse_request, parse_response};
    pub use super::error::ProtocolError;
    pub use super::payload::{
        InferenceRequest, InferenceResponse, OpaquePayload, Parameters, Payload, TensorPayload,
    };
    pub use super::protocol::{Protocol, ProtocolKind};
    pub use super::registry::{element_type_for, tag_for, ElementType, WireTypeTag};
    pub use super::value::{Arguments, Decoded, Value};
}
