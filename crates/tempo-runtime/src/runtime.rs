// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

/*!
Where deployed models live and how to reach them.

| Kind       | Endpoint                                               |
| ---------- | ------------------------------------------------------ |
| docker     | `http://{host}:{port}`                                 |
| kubernetes | `http://{ingress}/seldon/{namespace}/{model}`          |
| kfserving  | `http://{ingress}`, `Host: {model}.{namespace}.{domain}` |
| enterprise | as kubernetes, with a bearer token                     |
 */

use serde::{Deserialize, Serialize};
use std::{str::FromStr, time::Duration};

use crate::error::TempoError;

/// The closed set of deployment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeKind {
    #[default]
    Docker,
    Kubernetes,
    KfServing,
    Enterprise,
}

impl FromStr for RuntimeKind {
    type Err = TempoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "docker" => Ok(RuntimeKind::Docker),
            "kubernetes" => Ok(RuntimeKind::Kubernetes),
            "kfserving" => Ok(RuntimeKind::KfServing),
            "enterprise" => Ok(RuntimeKind::Enterprise),
            _ => Err(TempoError::UnknownRuntimeKind(s.to_owned())),
        }
    }
}

impl std::fmt::Display for RuntimeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeKind::Docker => f.pad("docker"),
            RuntimeKind::Kubernetes => f.pad("kubernetes"),
            RuntimeKind::KfServing => f.pad("kfserving"),
            RuntimeKind::Enterprise => f.pad("enterprise"),
        }
    }
}

/// Settings shared by every model deployed on one runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeOptions {
    pub kind: RuntimeKind,
    pub host: String,
    pub port: u16,
    pub namespace: String,
    pub ingress: String,
    pub domain: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    pub timeout_secs: u64,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            kind: RuntimeKind::Docker,
            host: "localhost".to_owned(),
            port: 8080,
            namespace: "default".to_owned(),
            ingress: "localhost:8080".to_owned(),
            domain: "example.com".to_owned(),
            auth_token: None,
            timeout_secs: 30,
        }
    }
}

impl RuntimeOptions {
    pub fn new(kind: RuntimeKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve where `model` is reachable on this runtime.
    pub fn endpoint(&self, model: &str) -> Result<Endpoint, TempoError> {
        let seldon = || format!("http://{}/seldon/{}/{}", self.ingress, self.namespace, model);

        let endpoint = match self.kind {
            RuntimeKind::Docker => Endpoint::new(format!("http://{}:{}", self.host, self.port)),
            RuntimeKind::Kubernetes => Endpoint::new(seldon()),
            RuntimeKind::KfServing => Endpoint {
                base_url: format!("http://{}", self.ingress),
                host_header: Some(format!("{}.{}.{}", model, self.namespace, self.domain)),
                bearer_token: None,
            },
            RuntimeKind::Enterprise => {
                let token = self.auth_token.clone().ok_or_else(|| {
                    TempoError::Config("the enterprise runtime requires an auth_token".to_owned())
                })?;

                Endpoint {
                    base_url: seldon(),
                    host_header: None,
                    bearer_token: Some(token),
                }
            }
        };

        Ok(endpoint)
    }
}

/// The resolved address of one deployed model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub base_url: String,

    /// Virtual host to route through a shared ingress.
    pub host_header: Option<String>,

    pub bearer_token: Option<String>,
}

impl Endpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            host_header: None,
            bearer_token: None,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse() {
        for kind in [
            RuntimeKind::Docker,
            RuntimeKind::Kubernetes,
            RuntimeKind::KfServing,
            RuntimeKind::Enterprise,
        ] {
            assert_eq!(kind.to_string().parse::<RuntimeKind>().unwrap(), kind);
        }

        assert!(matches!(
            "swarm".parse::<RuntimeKind>(),
            Err(TempoError::UnknownRuntimeKind(kind)) if kind == "swarm"
        ));
    }

    #[test]
    fn docker_endpoint() {
        let options = RuntimeOptions {
            port: 9000,
            ..RuntimeOptions::default()
        };

        let endpoint = options.endpoint("iris").unwrap();
        assert_eq!(endpoint.url("/v2/models/iris/infer"), "http://localhost:9000/v2/models/iris/infer");
        assert!(endpoint.host_header.is_none());
    }

    #[test]
    fn kubernetes_endpoint() {
        let options = RuntimeOptions {
            ingress: "ingress.local".to_owned(),
            namespace: "models".to_owned(),
            ..RuntimeOptions::new(RuntimeKind::Kubernetes)
        };

        assert_eq!(
            options.endpoint("iris").unwrap().base_url,
            "http://ingress.local/seldon/models/iris"
        );
    }

    #[test]
    fn kfserving_endpoint() {
        let options = RuntimeOptions {
            ingress: "ingress.local".to_owned(),
            ..RuntimeOptions::new(RuntimeKind::KfServing)
        };

        let endpoint = options.endpoint("iris").unwrap();
        assert_eq!(endpoint.base_url, "http://ingress.local");
        assert_eq!(endpoint.host_header.as_deref(), Some("iris.default.example.com"));
    }

    #[test]
    fn enterprise_needs_a_token() {
        let mut options = RuntimeOptions::new(RuntimeKind::Enterprise);
        assert!(matches!(options.endpoint("iris"), Err(TempoError::Config(_))));

        options.auth_token = Some("secret".to_owned());
        let endpoint = options.endpoint("iris").unwrap();
        assert_eq!(endpoint.bearer_token.as_deref(), Some("secret"));
        assert_eq!(endpoint.base_url, "http://localhost:8080/seldon/default/iris");
    }
}
