use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use oab_core::codec::{self, Format};
use oab_core::config::{self, CONFIG_FILE_NAME, OabConfig};
use oab_core::model::{ComponentKind, Document};
use oab_core::{LoadOptions, load_project_with, split_document, write_document};

#[derive(Parser)]
#[command(name = "oab", about = "Bundle OpenAPI fragment trees into one document", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bundle a project directory into one OpenAPI file
    Bundle {
        /// Output file; a `.json` extension writes JSON, anything else YAML
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Project directory holding `openapi_version`, `info.yml`, `paths/`, ...
        #[arg(short, long)]
        project_dir: Option<PathBuf>,

        /// Treat missing servers.yml, security.yml, tags.yml and paths/ as empty
        #[arg(long)]
        lenient: bool,
    },

    /// Split a bundled OpenAPI file into a project directory
    Split {
        /// Bundled OpenAPI file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Directory to write the fragments into
        #[arg(short, long)]
        project_dir: Option<PathBuf>,

        /// Write into a non-empty directory
        #[arg(long)]
        force: bool,
    },

    /// Print the oab version
    Version,

    /// Initialize a new oab configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bundle {
            output,
            project_dir,
            lenient,
        } => cmd_bundle(output, project_dir, lenient),

        Commands::Split {
            input,
            project_dir,
            force,
        } => cmd_split(input, project_dir, force),

        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "oab", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<OabConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn cmd_bundle(output: Option<PathBuf>, project_dir: Option<PathBuf>, lenient: bool) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let project_dir = project_dir.unwrap_or_else(|| PathBuf::from(&cfg.project_dir));
    let output = output.unwrap_or_else(|| PathBuf::from(&cfg.output));

    let options = if lenient {
        LoadOptions::lenient()
    } else {
        LoadOptions::from(&cfg)
    };
    log::debug!("bundling {} with {:?}", project_dir.display(), options);

    let document = load_project_with(&project_dir, &options)?;
    write_document(&output, &document)?;

    eprintln!("Bundled {} → {}", project_dir.display(), output.display());
    print_summary(&document);
    Ok(())
}

fn print_summary(document: &Document) {
    eprintln!("  OpenAPI: {}", document.openapi);
    eprintln!("  Title: {} ({})", document.info.title, document.info.version);
    eprintln!("  Paths: {}", document.paths.len());
    eprintln!("  Operations: {}", document.operation_count());
    for kind in ComponentKind::ALL {
        let count = document.components.len_of(kind);
        if count > 0 {
            eprintln!("  {}: {}", kind, count);
        }
    }
}

fn cmd_split(input: PathBuf, project_dir: Option<PathBuf>, force: bool) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let project_dir = project_dir.unwrap_or_else(|| PathBuf::from(&cfg.project_dir));

    if !force && is_non_empty_dir(&project_dir)? {
        anyhow::bail!(
            "{} is not empty. Use --force to write into it.",
            project_dir.display()
        );
    }

    let file =
        fs::File::open(&input).with_context(|| format!("failed to read {}", input.display()))?;
    let format = Format::from_path(&input).unwrap_or_default();
    let document: Document = codec::decode(std::io::BufReader::new(file), format)
        .with_context(|| format!("failed to parse {}", input.display()))?;

    split_document(&document, &project_dir)?;

    eprintln!("Split {} → {}", input.display(), project_dir.display());
    print_summary(&document);
    Ok(())
}

fn is_non_empty_dir(dir: &Path) -> Result<bool> {
    if !dir.exists() {
        return Ok(false);
    }
    let mut entries =
        fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;
    Ok(entries.next().is_some())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_table_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bundle_flags() {
        let cli = Cli::try_parse_from(["oab", "bundle", "-o", "out.json", "-p", "api"]).unwrap();
        match cli.command {
            Commands::Bundle {
                output,
                project_dir,
                lenient,
            } => {
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert_eq!(project_dir, Some(PathBuf::from("api")));
                assert!(!lenient);
            }
            _ => panic!("expected bundle"),
        }
    }

    #[test]
    fn test_bundle_defaults_come_from_config() {
        let cli = Cli::try_parse_from(["oab", "bundle"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Bundle {
                output: None,
                project_dir: None,
                lenient: false,
            }
        ));
    }

    #[test]
    fn test_split_requires_input() {
        assert!(Cli::try_parse_from(["oab", "split"]).is_err());
    }

    #[test]
    fn test_is_non_empty_dir() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(!is_non_empty_dir(&tmp.path().join("missing")).unwrap());
        assert!(!is_non_empty_dir(tmp.path()).unwrap());
        fs::write(tmp.path().join("info.yml"), "title: x\n").unwrap();
        assert!(is_non_empty_dir(tmp.path()).unwrap());
    }
}
