/*!
Codecs turning in-memory values into payloads and back.

* [`tensor`] handles numeric arrays, flattened in row-major order.
* [`opaque`] handles everything else as UTF-8 text: strings as-is, other
  values as JSON. Decoding also accepts the older literal syntax with
  single-quoted strings, `True`/`False`/`None` and tuples.
* [`nested`] converts tensors to and from nested JSON arrays, for the
  protocols that carry them that way.
 */

mod literal;
pub mod nested;
pub mod opaque;
pub mod tensor;

pub use literal::parse_literal;
