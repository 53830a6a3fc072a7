use std::fmt::Write as _;
use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use vigil_aws::{AutoScalingConfig, register_default_backend};
use vigil_core::ScalingGroupState;
use vigil_probe::ScalingGroupProbe;
use vigil_provider::BackendFactory;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct AsgArgs {
    /// Name of the Auto Scaling group.
    #[arg(conflicts_with = "params")]
    pub name: Option<String>,

    /// Probe parameters as JSON (string or @file path), e.g. '{"name": "web"}'.
    #[arg(long)]
    pub params: Option<String>,

    /// Exit with status 1 when the group does not exist.
    #[arg(long)]
    pub require_exists: bool,
}

fn parse_json_data(input: &str) -> anyhow::Result<serde_json::Value> {
    if let Some(path) = input.strip_prefix('@') {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(serde_json::from_str(input)?)
    }
}

fn probe_params(args: &AsgArgs) -> anyhow::Result<serde_json::Value> {
    match (&args.name, &args.params) {
        (_, Some(data)) => parse_json_data(data),
        (Some(name), None) => Ok(serde_json::json!({ "name": name })),
        (None, None) => Ok(serde_json::json!({})),
    }
}

pub async fn run(
    args: &AsgArgs,
    aws: AutoScalingConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    // Parameters are validated before any backend is built.
    let factory = Arc::new(BackendFactory::new());
    let probe = ScalingGroupProbe::from_value(&probe_params(args)?, factory.clone())?;

    register_default_backend(&factory, aws).await?;

    let state = probe.resolve().await?;
    match format {
        OutputFormat::Json => println!("{}", render_json(&probe, state)?),
        OutputFormat::Text => print!("{}", render_text(&probe, state)),
    }

    if state.is_none() && args.require_exists {
        eprintln!("{probe} does not exist.");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Serialize)]
struct Report<'a> {
    resource: String,
    requested_name: &'a str,
    exists: bool,
    attributes: Option<&'a ScalingGroupState>,
}

fn render_json(
    probe: &ScalingGroupProbe,
    state: Option<&ScalingGroupState>,
) -> anyhow::Result<String> {
    let report = Report {
        resource: probe.to_string(),
        requested_name: probe.requested_name(),
        exists: state.is_some(),
        attributes: state,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn render_text(probe: &ScalingGroupProbe, state: Option<&ScalingGroupState>) -> String {
    let mut out = format!("{probe}\n");
    let Some(state) = state else {
        out.push_str("  exists:                    false\n");
        return out;
    };

    let _ = writeln!(out, "  exists:                    true");
    let _ = writeln!(
        out,
        "  name:                      {}",
        state.name.as_deref().unwrap_or("-")
    );
    let _ = writeln!(out, "  min_size:                  {}", state.min_size);
    let _ = writeln!(out, "  max_size:                  {}", state.max_size);
    let _ = writeln!(out, "  desired_capacity:          {}", state.desired_capacity);
    let _ = writeln!(
        out,
        "  health_check_type:         {}",
        state.health_check_type.as_deref().unwrap_or("-")
    );
    let _ = writeln!(
        out,
        "  vpc_zone_identifier:       {}",
        state.vpc_zone_identifier.join(", ")
    );
    let _ = writeln!(
        out,
        "  launch_configuration_name: {}",
        state.launch_configuration_name.as_deref().unwrap_or("-")
    );
    if state.tags.is_empty() {
        out.push_str("  tags:                      (none)\n");
    } else {
        out.push_str("  tags:\n");
        for tag in &state.tags {
            let _ = writeln!(
                out,
                "    - {}={} (propagate_at_launch: {}, resource: {}/{})",
                tag.key, tag.value, tag.propagate_at_launch, tag.resource_type, tag.resource_id
            );
        }
    }
    out
}
