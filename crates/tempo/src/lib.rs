/*!

# Tempo

Tempo is a toolkit for wrapping machine learning models behind the
inference protocols of common serving platforms, composing them into
pipelines and calling them wherever they are deployed.

## Tempo Core

The core crate handles marshalling: typed arguments become request and
response envelopes for the V2, Seldon and KFServing V1 protocols, and
come back out again according to each model's declared types.

```no_run
use tempo::core::prelude::*;
use tempo::core::tract_core::prelude::Tensor;

let tensor = Tensor::from_shape(&[1, 4], &[1.0f64, 2.0, 3.0, 4.0])?;
let request = build_request(&Arguments::single(tensor))?;
assert_eq!(request.inputs[0].datatype(), "FP64");
# Ok::<(), Box<dyn std::error::Error>>(())
```

## Tempo Runtime

The runtime builds models out of functions, composes them into
pipelines and talks to deployed models over HTTP.

```no_run
use tempo::runtime::prelude::*;

let config = ProjectConfig::load("tempo.toml")?;
let classifier = config.remote("classifier")?;

let outputs = classifier.invoke(
    &RequestContext::new("classifier"),
    Arguments::single("a sentence to classify"),
)?;
# Ok::<(), Box<dyn std::error::Error>>(())
```

*/

#![warn(rust_2018_idioms)]

pub use tempo_core as core;
pub use tempo_runtime as runtime;
