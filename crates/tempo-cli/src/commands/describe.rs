// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

use anyhow::Result;
use clap::Parser;
use std::{fmt::Write, path::PathBuf};
use tempo::runtime::prelude::{DeclaredType, ProjectConfig, RuntimeKind};

/// Print the runtime and the API of every model in a project.
#[derive(Parser, Debug)]
#[clap()]
pub(crate) struct Args {
    /// The project file.
    project: PathBuf,
}

pub(super) fn describe(config: Args) -> Result<()> {
    let project = ProjectConfig::load(&config.project)?;
    print!("{}", describe_project(&project)?);
    Ok(())
}

fn describe_project(project: &ProjectConfig) -> Result<String> {
    let mut out = String::new();
    let runtime = &project.runtime;

    match runtime.kind {
        RuntimeKind::Docker => {
            writeln!(out, "Runtime: docker at {}:{}", runtime.host, runtime.port)?
        }
        kind => writeln!(
            out,
            "Runtime: {} through {} in namespace {}",
            kind, runtime.ingress, runtime.namespace
        )?,
    }

    for model in &project.models {
        writeln!(
            out,
            "\nModel {} ({}, {} protocol)",
            model.name, model.platform, model.protocol
        )?;

        if !model.description.is_empty() {
            writeln!(out, "\t{}", model.description)?;
        }

        if let Some(uri) = &model.uri {
            writeln!(out, "\tArtifact: {}", uri)?;
        }

        writeln!(out, "\tEndpoint: {}", runtime.endpoint(&model.name)?.base_url)?;
        write_declared(&mut out, "Inputs", &model.inputs)?;
        write_declared(&mut out, "Outputs", &model.outputs)?;
    }

    Ok(out)
}

fn write_declared(out: &mut String, title: &str, declared: &DeclaredType) -> Result<()> {
    writeln!(out, "\t{}:", title)?;
    if declared.is_empty() {
        writeln!(out, "\t\t{:20}: tensor", "*")?;
    }

    for (index, slot) in declared.iter().enumerate() {
        let name = slot.name.clone().unwrap_or_else(|| index.to_string());
        writeln!(out, "\t\t{:20}: {}", name, slot.kind)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_models() {
        let project = ProjectConfig::from_toml(
            r#"
            [runtime]
            kind = "kfserving"
            ingress = "gateway:80"

            [[models]]
            name = "classifier"
            platform = "xgboost"
            protocol = "kfserving-v1"
            uri = "s3://models/classifier"
            outputs = [{ name = "label", kind = "str" }]
            "#,
        )
        .unwrap();

        let text = describe_project(&project).unwrap();
        assert!(text.starts_with("Runtime: kfserving through gateway:80"));
        assert!(text.contains("Model classifier (xgboost, kfserving-v1 protocol)"));
        assert!(text.contains("Artifact: s3://models/classifier"));
        assert!(text.contains("Endpoint: http://gateway:80"));
        assert!(text.contains("label"));
    }
}
