use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing::{info, Level};

use create_html::config::find_config_file;
use create_html::env::{generate_env_docs, EnvConfig};
use create_html::{
    load_manifest, print_error_message, CreateHtmlResult, DirectorySink, HtmlTemplate,
    HtmlTemplateOptions, OutputFormat,
};

#[derive(Parser, Debug)]
#[command(
    name = "create-html",
    version,
    about = "Generate the HTML page for a bundle from a template",
    after_help = generate_env_docs()
)]
struct Cli {
    /// TOML or JSON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON manifest describing the bundle outputs
    #[arg(short, long, value_name = "FILE")]
    bundle: PathBuf,

    /// Output module format of the bundle
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Output directory of the bundle
    #[arg(short, long, value_name = "DIR", conflicts_with = "file")]
    dir: Option<PathBuf>,

    /// Output file of a single-file bundle
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Template file path or HTML string
    #[arg(short, long)]
    template: Option<String>,

    /// Document title
    #[arg(long)]
    title: Option<String>,

    /// Prefix for injected and copied asset references
    #[arg(short, long)]
    prefix: Option<String>,

    /// Name of the generated HTML file
    #[arg(long)]
    file_name: Option<String>,

    /// Only report errors
    #[arg(short, long)]
    silent: bool,
}

impl Cli {
    fn overrides(&self) -> HtmlTemplateOptions {
        HtmlTemplateOptions {
            template: self.template.clone(),
            title: self.title.clone(),
            prefix: self.prefix.clone(),
            file_name: self.file_name.clone(),
            ..HtmlTemplateOptions::default()
        }
    }

    fn output_dir(&self) -> PathBuf {
        match (&self.dir, &self.file) {
            (Some(dir), _) => dir.clone(),
            (None, Some(file)) => file
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
            (None, None) => PathBuf::from("."),
        }
    }
}

fn main() {
    load_dotenv();
    let cli = Cli::parse();

    let env_config = match EnvConfig::from_env() {
        Ok(env_config) => env_config,
        Err(error) => {
            print_error_message(&error.to_string(), true);
            process::exit(1);
        }
    };

    let level = if cli.silent {
        Level::ERROR
    } else {
        env_config.log_level
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(!env_config.no_color)
        .with_target(false)
        .init();

    if let Err(error) = run(&cli, &env_config) {
        print_error_message(&error.to_string(), !env_config.no_color);
        process::exit(1);
    }
}

fn run(cli: &Cli, env_config: &EnvConfig) -> CreateHtmlResult<()> {
    let config_path = cli
        .config
        .clone()
        .or_else(|| env_config.config_path.clone())
        .or_else(find_config_file);

    let mut options = match &config_path {
        Some(path) => HtmlTemplateOptions::load(path)?,
        None => HtmlTemplateOptions::default(),
    };
    options.apply_env_overrides();
    options.merge(cli.overrides());

    let manifest = load_manifest(&cli.bundle)?;
    let format = cli.format.or(manifest.format).unwrap_or_default();

    let mut template = HtmlTemplate::new(options)?;
    template.output_options(cli.dir.as_deref(), cli.file.as_deref())?;

    let mut sink = DirectorySink::new(cli.output_dir());
    template.generate_bundle(&manifest.outputs, format, &mut sink)?;
    info!(
        "generated {} in {}",
        template.output_file_name().unwrap_or_default(),
        sink.dir().display()
    );

    Ok(())
}

/// 加载 .env 文件
fn load_dotenv() {
    for env_file in [".env.local", ".env"] {
        if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
            break;
        }
    }
}
