use std::path::PathBuf;
use std::process::ExitCode;

use f2h_lib::output::F2H_OUTPUT_VERSION;
use f2h_lib::{
    embed_url, parse_design_url, render_embed, EmbedOutput, F2hError, F2hOutput, SystemClock,
};

use crate::cli::{ArtifactArgs, OutputFormat};
use crate::commands::{deliver_artifact, log_config};
use crate::formatting::{render_error, write_output};
use crate::settings::{load_config, resolve_artifact_target, ArtifactTarget};

/// Run the embed command.
pub fn run_embed(
    config_path: Option<PathBuf>,
    verbose: bool,
    url: String,
    artifact: ArtifactArgs,
    format: OutputFormat,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format),
    };
    log_config(verbose, &config, config_path.as_deref());

    let design = match parse_design_url(&url) {
        Ok(design) => design,
        Err(err) => return render_error(F2hError::from(err), format),
    };
    tracing::debug!(file_key = %design.file_key, "parsed figma url");

    let clock = SystemClock;
    let html = render_embed(&design, &clock);
    let target = resolve_artifact_target(&artifact, &config);
    let output_path = match deliver_artifact(&html, &target, &clock) {
        Ok(path) => path,
        Err(err) => return render_error(err, format),
    };
    if target == ArtifactTarget::Stdout {
        return ExitCode::SUCCESS;
    }

    let body = F2hOutput::Embed(EmbedOutput {
        version: F2H_OUTPUT_VERSION.to_string(),
        embed_url: embed_url(&design),
        file_key: design.file_key,
        output_path,
        bytes: html.len(),
    });
    if let Err(err) = write_output(&body, format) {
        return render_error(F2hError::Config(err.to_string()), format);
    }
    ExitCode::SUCCESS
}
