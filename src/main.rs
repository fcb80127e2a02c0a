use batch_resize::scan::ScanError;
use batch_resize::types::BatchResult;
use batch_resize::{config, output, process, scan};
use clap::Parser;
use std::path::PathBuf;

mod logging;

#[derive(Parser)]
#[command(name = "batch-resize")]
#[command(about = "Batch image resizer and converter")]
#[command(long_about = "\
Batch image resizer and converter

Every image directly inside the input folder (jpg, jpeg, png, webp, bmp,
tiff) is resized to the target box and re-encoded into the output folder.
Files that fail to decode or encode are reported and skipped; the rest of
the batch carries on.

Sizing:
  default            stretch to exactly WIDTH x HEIGHT
  --keep-aspect      fit inside WIDTH x HEIGHT, keeping proportions
  --auto-orientation with --keep-aspect, portrait images use HEIGHT x WIDTH

Naming:
  default            photo.png → photo_resized.jpg
  --rename-prefix p  p_001.jpg, p_002.jpg, ... in filename order

Settings can also come from a TOML file (--config). Flags given on the
command line win over the file. Run 'batch-resize --gen-config' for a
documented template.")]
#[command(version)]
struct Cli {
    /// Input folder with images [default: input_images]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output folder for resized images [default: output_images]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Target width in pixels [default: 800]
    #[arg(short = 'W', long, value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,

    /// Target height in pixels [default: 800]
    #[arg(short = 'H', long, value_parser = clap::value_parser!(u32).range(1..))]
    height: Option<u32>,

    /// Output format: JPEG, PNG, WEBP, BMP, or another extension [default: JPEG]
    #[arg(short, long)]
    format: Option<String>,

    /// Output quality 0-100, used for JPEG and WEBP [default: 85]
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=100))]
    quality: Option<u32>,

    /// Keep the aspect ratio (fit inside the box)
    #[arg(long)]
    keep_aspect: bool,

    /// Swap the box for portrait images (with --keep-aspect)
    #[arg(long)]
    auto_orientation: bool,

    /// Bulk rename prefix ('photo' → photo_001.jpg)
    #[arg(long)]
    rename_prefix: Option<String>,

    /// Parallel workers, capped at the number of CPU cores [default: sequential]
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    jobs: Option<u32>,

    /// TOML config file with defaults for any of the options above
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a stock config file with all options documented, then exit
    #[arg(long)]
    gen_config: bool,

    /// Debug-level diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Diagnostics on stderr as JSON lines
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    /// Explicitly given flags as a TOML overlay. Unset flags are left out
    /// so they don't mask values from the config file.
    fn overrides(&self) -> toml::Value {
        let mut root = toml::Table::new();
        let mut processing = toml::Table::new();

        if let Some(input) = &self.input {
            root.insert("input".into(), path_value(input));
        }
        if let Some(output) = &self.output {
            root.insert("output".into(), path_value(output));
        }
        if let Some(width) = self.width {
            processing.insert("width".into(), toml::Value::Integer(width.into()));
        }
        if let Some(height) = self.height {
            processing.insert("height".into(), toml::Value::Integer(height.into()));
        }
        if let Some(format) = &self.format {
            processing.insert("format".into(), toml::Value::String(format.clone()));
        }
        if let Some(quality) = self.quality {
            processing.insert("quality".into(), toml::Value::Integer(quality.into()));
        }
        if self.keep_aspect {
            processing.insert("keep_aspect".into(), toml::Value::Boolean(true));
        }
        if self.auto_orientation {
            processing.insert("auto_orientation".into(), toml::Value::Boolean(true));
        }
        if let Some(prefix) = &self.rename_prefix {
            processing.insert("rename_prefix".into(), toml::Value::String(prefix.clone()));
        }
        if let Some(jobs) = self.jobs {
            processing.insert("jobs".into(), toml::Value::Integer(jobs.into()));
        }

        if !processing.is_empty() {
            root.insert("processing".into(), toml::Value::Table(processing));
        }
        toml::Value::Table(root)
    }
}

fn path_value(path: &std::path::Path) -> toml::Value {
    toml::Value::String(path.to_string_lossy().into_owned())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    logging::init(cli.verbose, cli.json_logs);
    let config = config::load_config(cli.config.as_deref(), cli.overrides())?;
    tracing::debug!(?config, "resolved config");

    let sources = match scan::list_images(&config.input) {
        Ok(sources) => sources,
        Err(ScanError::DirectoryNotFound(path)) => {
            print_lines(output::format_missing_input(&path));
            print_lines(output::format_summary(&BatchResult::default()));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if sources.is_empty() {
        print_lines(output::format_no_images());
        // Still creates the output folder
        let result = process::process(&sources, &config.output, &config.processing, None)?;
        print_lines(output::format_summary(&result));
        return Ok(());
    }

    print_lines(output::format_run_header(sources.len(), &config));

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            print_lines(output::format_process_event(&event));
        }
    });
    let result = process::process(&sources, &config.output, &config.processing, Some(tx));
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;

    print_lines(output::format_summary(&result?));
    Ok(())
}
