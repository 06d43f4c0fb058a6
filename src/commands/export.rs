use std::path::PathBuf;
use std::process::ExitCode;

use f2h_lib::figma::map_figma_error;
use f2h_lib::output::F2H_OUTPUT_VERSION;
use f2h_lib::{
    export_design, parse_design_url, resolve_file_key, ExportOutput, ExportRequest, F2hError,
    F2hOutput, FigmaAuth, FigmaClient, SystemClock,
};

use crate::cli::{ArtifactArgs, OutputFormat};
use crate::commands::{deliver_artifact, log_config};
use crate::formatting::{render_error, write_output};
use crate::settings::{load_config, resolve_artifact_target, resolve_image_options, ArtifactTarget};

/// Run the export command.
#[allow(clippy::too_many_arguments)]
pub async fn run_export(
    config_path: Option<PathBuf>,
    verbose: bool,
    file: String,
    node_ids: Option<Vec<String>>,
    scale: Option<f32>,
    artifact: ArtifactArgs,
    format: OutputFormat,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format),
    };
    log_config(verbose, &config, config_path.as_deref());

    let options = match resolve_image_options(scale, &config) {
        Ok(options) => options,
        Err(err) => return render_error(err, format),
    };

    // A URL's node-id is the default selection.
    let (file_key, url_node) = match parse_design_url(&file) {
        Ok(design) => (design.file_key, design.node_id),
        Err(_) => match resolve_file_key(&file) {
            Ok(key) => (key, None),
            Err(err) => return render_error(F2hError::from(err), format),
        },
    };
    let node_ids = node_ids
        .filter(|ids| !ids.is_empty())
        .or_else(|| url_node.map(|id| vec![id]))
        .unwrap_or_default();

    let Some(auth) = FigmaAuth::from_env() else {
        return render_error(
            F2hError::Config(
                "FIGMA_TOKEN environment variable is required (or FIGMA_OAUTH_TOKEN)".to_string(),
            ),
            format,
        );
    };

    let client =
        match FigmaClient::with_base_url_and_timeout(&config.figma.api_base, config.figma.timeout)
        {
            Ok(client) => client,
            Err(err) => return render_error(map_figma_error(err), format),
        };

    let request = ExportRequest::new(file_key, node_ids).with_options(options);
    tracing::debug!(
        file_key = %request.file_key,
        nodes = request.node_ids.len(),
        scale = request.options.scale,
        "exporting design"
    );
    let document = match export_design(&client, &auth, &request).await {
        Ok(document) => document,
        Err(err) => return render_error(err, format),
    };

    let clock = SystemClock;
    let target = resolve_artifact_target(&artifact, &config);
    let output_path = match deliver_artifact(&document.html, &target, &clock) {
        Ok(path) => path,
        Err(err) => return render_error(err, format),
    };
    if target == ArtifactTarget::Stdout {
        return ExitCode::SUCCESS;
    }

    let body = F2hOutput::Export(ExportOutput {
        version: F2H_OUTPUT_VERSION.to_string(),
        file_key: request.file_key,
        node_ids: request.node_ids,
        bytes: document.html.len(),
        images: document.images,
        output_path,
    });
    if let Err(err) = write_output(&body, format) {
        return render_error(F2hError::Config(err.to_string()), format);
    }
    ExitCode::SUCCESS
}
