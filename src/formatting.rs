use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use f2h_lib::output::F2H_OUTPUT_VERSION;
use f2h_lib::{ErrorOutput, F2hError, F2hOutput};

use crate::cli::OutputFormat;

/// Write output in the requested format.
pub fn write_output(body: &F2hOutput, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(body)?),
        OutputFormat::Pretty => write_pretty_output(body)?,
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: F2hError, format: OutputFormat) -> ExitCode {
    tracing::debug!(kind = ?err.kind(), "command failed");
    let error_payload = err.to_payload();
    let payload = F2hOutput::Error(ErrorOutput {
        version: F2H_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            println!("{content}");
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    ExitCode::from(2)
}

/// Write pretty output to stdout.
fn write_pretty_output(body: &F2hOutput) -> io::Result<()> {
    if io::stdout().is_terminal() {
        println!("{}", format_pretty(body, true));
        return Ok(());
    }

    // Non-tty: keep JSON shape for pipelines.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    println!("{content}");
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &F2hOutput, colorize: bool) -> String {
    let mut buf = String::new();
    match body {
        F2hOutput::Embed(out) => {
            writeln!(buf, "{} Embed page generated", color("OK", "32", colorize)).ok();
            writeln!(buf, "File key: {}", out.file_key).ok();
            writeln!(buf, "Embed URL: {}", out.embed_url).ok();
            write_destination(&mut buf, out.output_path.as_deref(), out.bytes);
        }
        F2hOutput::Export(out) => {
            let rendered = out.images.values().filter(|url| url.is_some()).count();
            writeln!(buf, "{} Design exported", color("OK", "32", colorize)).ok();
            writeln!(buf, "File key: {}", out.file_key).ok();
            if out.node_ids.is_empty() {
                writeln!(buf, "Nodes: top-level frames").ok();
            } else {
                writeln!(buf, "Nodes: {}", out.node_ids.join(", ")).ok();
            }
            writeln!(buf, "Images: {rendered}/{} rendered", out.images.len()).ok();
            let missing: Vec<&str> = out
                .images
                .iter()
                .filter(|(_, url)| url.is_none())
                .map(|(id, _)| id.as_str())
                .collect();
            if !missing.is_empty() {
                writeln!(
                    buf,
                    "{} no render for {}",
                    color("warning:", "33", colorize),
                    missing.join(", ")
                )
                .ok();
            }
            write_destination(&mut buf, out.output_path.as_deref(), out.bytes);
        }
        F2hOutput::Error(out) => {
            writeln!(
                buf,
                "{} {}",
                color("error:", "31", colorize),
                out.error.message
            )
            .ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "hint: {remediation}").ok();
            }
        }
    }
    buf.trim_end().to_string()
}

fn write_destination(buf: &mut String, path: Option<&std::path::Path>, bytes: usize) {
    match path {
        Some(path) => writeln!(buf, "Wrote {bytes} bytes to {}", path.display()).ok(),
        None => writeln!(buf, "Generated {bytes} bytes").ok(),
    };
}

fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\u{1b}[{code}m{text}\u{1b}[0m")
    } else {
        text.to_string()
    }
}
