use clap::{Args, Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "f2h")]
#[command(
    version,
    about = "Figma to HTML - Turn Figma design URLs into standalone HTML documents",
    long_about = "Figma to HTML (f2h)\n\nModes:\n- serve: run the browser UI and JSON API.\n- embed: write an HTML page embedding a Figma file through Figma's viewer (no token needed).\n- export: build positioned HTML/CSS from the Figma REST API (needs FIGMA_TOKEN or FIGMA_OAUTH_TOKEN).\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) for server, Figma API and artifact defaults; CLI flags override config"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value = "json",
        help = "Output format for the command summary"
    )]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the browser UI and the /api/figma endpoints
    Serve {
        #[arg(long, value_name = "HOST:PORT", help = "Address to listen on (default 127.0.0.1:3000)")]
        bind: Option<SocketAddr>,
    },

    /// Generate an embed page for a Figma URL
    Embed {
        #[arg(long, help = "Figma file URL (/file/<KEY>/... or /design/<KEY>/...)")]
        url: String,

        #[command(flatten)]
        artifact: ArtifactArgs,
    },

    /// Export Figma nodes as positioned HTML/CSS using the REST API
    Export {
        #[arg(long, help = "Figma file URL or bare file key")]
        file: String,

        #[arg(
            long,
            value_delimiter = ',',
            help = "Node ids to export (comma-separated, e.g. 1:2,1:3); defaults to the URL's node-id or every top-level frame"
        )]
        node_ids: Option<Vec<String>>,

        #[arg(long, help = "Image render scale (0 < scale <= 4); overrides figma.image_scale")]
        scale: Option<f32>,

        #[command(flatten)]
        artifact: ArtifactArgs,
    },
}

/// Where the generated HTML goes.
#[derive(Args, Debug, Clone, Default)]
pub struct ArtifactArgs {
    #[arg(long, short, value_name = "PATH", help = "Write the HTML to this file")]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        value_name = "DIR",
        conflicts_with = "output",
        help = "Write figma-export-<unix-ms>.html into this directory (created if missing)"
    )]
    pub out_dir: Option<PathBuf>,

    #[arg(
        long,
        conflicts_with_all = ["output", "out_dir"],
        help = "Print the raw HTML to stdout instead of a JSON summary"
    )]
    pub stdout: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn export_splits_node_ids_on_commas() {
        let cli = Cli::try_parse_from([
            "f2h",
            "export",
            "--file",
            "ABC123",
            "--node-ids",
            "1:2,1:3",
            "--out-dir",
            "out",
        ])
        .unwrap();

        match cli.command {
            Commands::Export {
                file,
                node_ids,
                artifact,
                ..
            } => {
                assert_eq!(file, "ABC123");
                assert_eq!(node_ids, Some(vec!["1:2".to_string(), "1:3".to_string()]));
                assert_eq!(artifact.out_dir, Some(PathBuf::from("out")));
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "f2h",
            "embed",
            "--url",
            "https://www.figma.com/file/ABC123/Name",
            "--stdout",
            "--format",
            "pretty",
            "--verbose",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Pretty);
    }

    #[test]
    fn stdout_conflicts_with_output() {
        let result = Cli::try_parse_from([
            "f2h",
            "embed",
            "--url",
            "https://www.figma.com/file/ABC123/Name",
            "--stdout",
            "--output",
            "page.html",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn serve_accepts_bind_address() {
        let cli = Cli::try_parse_from(["f2h", "serve", "--bind", "0.0.0.0:8080"]).unwrap();
        match cli.command {
            Commands::Serve { bind } => assert_eq!(bind.unwrap().port(), 8080),
            _ => panic!("expected serve command"),
        }
    }
}
