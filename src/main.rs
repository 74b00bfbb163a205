use clap::{Parser, Subcommand};
use iconsass::directory::DirectoryEncoder;
use iconsass::{config, output, scan};
use std::path::PathBuf;

/// Flags that override values from the config file.
#[derive(clap::Args, Clone, Default)]
struct InputArgs {
    /// Icon directory (overrides `input`)
    #[arg(long)]
    input: Option<PathBuf>,
}

#[derive(clap::Args, Clone, Default)]
struct EncodeArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Stylesheet to write (overrides `output`)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory with the companion SVG of each PNG (overrides `temp_dir`)
    #[arg(long)]
    temp_dir: Option<PathBuf>,

    /// Also emit one class rule per icon
    #[arg(long)]
    classes: bool,

    /// Class prefix (overrides `css.prefix`)
    #[arg(long)]
    prefix: Option<String>,
}

#[derive(Parser)]
#[command(name = "iconsass")]
#[command(about = "Encode an icon directory into a Sass mixin with data-URI fallbacks")]
#[command(long_about = "\
Encode an icon directory into a Sass mixin with data-URI fallbacks

Every .svg/.png file in the input directory becomes a branch of the
`grunticon` mixin (and, with --classes, a `<prefix><name>:before` rule):

  icons/
  ├── home.png          # icon \"home\"
  └── settings.png      # icon \"settings\"
  tmp/
  ├── home.svg          # companion SVG of home.png
  └── settings.svg

  @include grunticon(\"home\", center center, true);

Fallback tiers:
  SVG browsers:        SVG data URI
  .no-svg:             PNG data URI
  .no-js, .ie6, .ie7:  PNG file at <pngpath>/<name>.png

Run 'iconsass gen-config' to generate a documented iconsass.toml.")]
#[command(version)]
struct Cli {
    /// Config file (missing file = defaults)
    #[arg(long, default_value = "iconsass.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the stylesheet
    Encode(EncodeArgs),
    /// List icons and duplicate names without writing anything
    Check(InputArgs),
    /// Print a stock iconsass.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Encode(args) => {
            let config = config::load_config(&cli.config, Some(encode_overrides(&args)))?;
            let encoder = DirectoryEncoder::from_config(&config)?;
            println!(
                "==> Encoding {} → {}",
                config.input.display(),
                config.output.display()
            );
            let report = encoder.encode()?;
            output::print_encode_output(&report, &config.output);
        }
        Command::Check(args) => {
            let config = config::load_config(&cli.config, Some(input_overrides(&args)))?;
            println!("==> Checking {}", config.input.display());
            let files = scan::list_icon_files(&config.input)?;
            output::print_check_output(&files);
            let duplicates = scan::duplicate_names(&files);
            if duplicates.is_empty() {
                println!("==> Icons are valid");
            } else {
                let names: Vec<&str> = duplicates.keys().map(String::as_str).collect();
                return Err(format!("duplicate icon names: {}", names.join(", ")).into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// CLI flags as a TOML overlay for [`config::load_config`].
fn input_table(args: &InputArgs) -> toml::Table {
    let mut table = toml::Table::new();
    if let Some(input) = &args.input {
        table.insert("input".into(), path_value(input));
    }
    table
}

fn input_overrides(args: &InputArgs) -> toml::Value {
    toml::Value::Table(input_table(args))
}

fn encode_overrides(args: &EncodeArgs) -> toml::Value {
    let mut table = input_table(&args.input);
    if let Some(output) = &args.output {
        table.insert("output".into(), path_value(output));
    }
    if let Some(temp_dir) = &args.temp_dir {
        table.insert("temp_dir".into(), path_value(temp_dir));
    }
    if args.classes {
        table.insert("generate_classes".into(), toml::Value::Boolean(true));
    }
    if let Some(prefix) = &args.prefix {
        let mut css = toml::Table::new();
        css.insert("prefix".into(), toml::Value::String(prefix.clone()));
        table.insert("css".into(), toml::Value::Table(css));
    }
    toml::Value::Table(table)
}

fn path_value(path: &std::path::Path) -> toml::Value {
    toml::Value::String(path.to_string_lossy().to_string())
}
