//! ongkit CLI - CPF/CNPJ validation and banner normalization

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use ongkit::banner::{cover_placement, BannerOptions, ImageAsset};
use ongkit::document::{format_document, inspect, DocumentKind, JsonFormat};
use ongkit::ResampleFilter;

#[derive(Parser)]
#[command(name = "ongkit")]
#[command(version)]
#[command(about = "Validate CPF/CNPJ numbers and normalize banner images", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a (possibly partial) CPF or CNPJ
    #[command(alias = "fmt")]
    Format {
        /// Value as typed by the user
        #[arg(value_name = "VALUE")]
        value: String,

        /// Document kind (inferred from the digit count if omitted)
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Validate one or more CPF/CNPJ numbers
    Validate {
        /// Values to check
        #[arg(value_name = "VALUE", required = true)]
        values: Vec<String>,

        /// Document kind (inferred from the digit count if omitted)
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,

        /// Print a JSON report per value
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,
    },

    /// Normalize images into fixed-size JPEG banners
    Banner {
        /// Input image files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Banner width in pixels
        #[arg(long, default_value_t = ongkit::banner::DEFAULT_WIDTH)]
        width: u32,

        /// Banner height in pixels
        #[arg(long, default_value_t = ongkit::banner::DEFAULT_HEIGHT)]
        height: u32,

        /// JPEG quality (0.0-1.0)
        #[arg(short, long, default_value_t = ongkit::banner::DEFAULT_QUALITY)]
        quality: f32,

        /// Resampling filter
        #[arg(long, value_enum, default_value = "triangle")]
        filter: FilterArg,
    },

    /// Show image information and its banner crop
    Info {
        /// Input image file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum KindArg {
    /// Individual taxpayer number (11 digits)
    Cpf,
    /// Organization taxpayer number (14 digits)
    Cnpj,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Cpf => DocumentKind::Cpf,
            KindArg::Cnpj => DocumentKind::Cnpj,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FilterArg {
    /// Nearest neighbour (fastest)
    Nearest,
    /// Bilinear (default)
    Triangle,
    /// Bicubic
    CatmullRom,
    /// Lanczos3 (sharpest)
    Lanczos3,
}

impl From<FilterArg> for ResampleFilter {
    fn from(filter: FilterArg) -> Self {
        match filter {
            FilterArg::Nearest => ResampleFilter::Nearest,
            FilterArg::Triangle => ResampleFilter::Triangle,
            FilterArg::CatmullRom => ResampleFilter::CatmullRom,
            FilterArg::Lanczos3 => ResampleFilter::Lanczos3,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Format { value, kind }) => cmd_format(&value, kind),
        Some(Commands::Validate {
            values,
            kind,
            json,
            compact,
        }) => cmd_validate(&values, kind, json, compact),
        Some(Commands::Banner {
            inputs,
            output,
            width,
            height,
            quality,
            filter,
        }) => {
            let options = BannerOptions::new()
                .with_size(width, height)
                .with_quality(quality)
                .with_filter(filter.into());
            cmd_banner(&inputs, output.as_deref(), &options)
        }
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: ongkit <COMMAND>".yellow());
            println!("       ongkit --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Kind to use for a value: the explicit one, else by digit count.
///
/// Partial values longer than a CPF are masked as CNPJ.
fn resolve_kind(value: &str, kind: Option<KindArg>) -> DocumentKind {
    if let Some(kind) = kind {
        return kind.into();
    }
    DocumentKind::infer(value).unwrap_or_else(|| {
        if ongkit::strip_formatting(value).len() > ongkit::document::CPF_LEN {
            DocumentKind::Cnpj
        } else {
            DocumentKind::Cpf
        }
    })
}

fn cmd_format(value: &str, kind: Option<KindArg>) -> Result<(), Box<dyn std::error::Error>> {
    let kind = resolve_kind(value, kind);
    println!("{}", format_document(value, kind));
    Ok(())
}

fn cmd_validate(
    values: &[String],
    kind: Option<KindArg>,
    json: bool,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let mut invalid = 0;
    for value in values {
        let report = inspect(value, resolve_kind(value, kind));
        if !report.valid {
            invalid += 1;
        }

        if json {
            println!("{}", report.to_json(format)?);
            continue;
        }

        let verdict = if report.valid {
            "valid".green().bold()
        } else if report.complete {
            "invalid".red().bold()
        } else {
            "incomplete".yellow().bold()
        };
        println!("{} {} {}", report.kind.to_string().cyan(), report.formatted, verdict);
    }

    if invalid > 0 {
        return Err(format!("{} of {} values are not valid", invalid, values.len()).into());
    }
    Ok(())
}

fn cmd_banner(
    inputs: &[PathBuf],
    output: Option<&Path>,
    options: &BannerOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    options.validate()?;
    log::debug!("normalizing {} images with {:?}", inputs.len(), options);

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let pb = if inputs.len() > 1 {
        let pb = ProgressBar::new(inputs.len() as u64 + 1);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    // Unreadable files fail their own slot, like undecodable ones.
    let mut read_errors = Vec::with_capacity(inputs.len());
    let mut sources = Vec::with_capacity(inputs.len());
    for input in inputs {
        if let Some(ref pb) = pb {
            pb.set_message(format!("Reading {}", input.display()));
            pb.inc(1);
        }
        match ImageAsset::from_path(input) {
            Ok(source) => {
                sources.push(source);
                read_errors.push(None);
            }
            Err(e) => read_errors.push(Some(e)),
        }
    }

    if let Some(ref pb) = pb {
        pb.set_message("Normalizing...");
    }
    let mut normalized = ongkit::normalize_banners(&sources, options).into_iter();
    let results = read_errors.into_iter().filter_map(|read_error| match read_error {
        Some(e) => Some(Err(e)),
        None => normalized.next(),
    });
    if let Some(ref pb) = pb {
        pb.inc(1);
        pb.finish_with_message("Done!");
    }

    let mut failed = 0;
    let mut taken = HashSet::new();
    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok(banner) => {
                let suggested = banner.suggested_filename();
                let name = unique_filename(&suggested, &mut taken);
                if name != suggested {
                    log::warn!(
                        "{} already written in this run, saving {} as {}",
                        suggested,
                        input.display(),
                        name
                    );
                }
                let path = output_dir.join(name);
                banner.save(&path)?;
                println!(
                    "{} {} ({}x{}, {} bytes)",
                    "Saved".green(),
                    path.display(),
                    banner.width,
                    banner.height,
                    banner.size()
                );
            }
            Err(e) => {
                failed += 1;
                eprintln!("{} {}: {}", "Failed".red(), input.display(), e);
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} images failed", failed, inputs.len()).into());
    }
    Ok(())
}

/// First free name in this run: `logo.jpg`, then `logo-1.jpg`, `logo-2.jpg`...
fn unique_filename(name: &str, taken: &mut HashSet<String>) -> String {
    let path = Path::new(name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path.extension().map(|e| e.to_string_lossy().into_owned());

    let mut candidate = name.to_string();
    let mut n = 1;
    while !taken.insert(candidate.clone()) {
        candidate = match extension {
            Some(ref ext) => format!("{}-{}.{}", stem, n, ext),
            None => format!("{}-{}", stem, n),
        };
        n += 1;
    }
    candidate
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let asset = ImageAsset::from_path(input)?;
    let info = asset.probe()?;
    let options = BannerOptions::default();
    let placement = cover_placement(info.width, info.height, options.width, options.height);

    if json {
        let value = serde_json::json!({
            "file": input.to_string_lossy(),
            "format": info.kind,
            "mime_type": info.kind.mime_type(),
            "width": info.width,
            "height": info.height,
            "size_bytes": asset.size(),
            "banner": placement,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "Image Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {} ({})", "Format".bold(), info.kind, info.kind.mime_type());
    println!("{}: {}x{}", "Dimensions".bold(), info.width, info.height);
    println!("{}: {} bytes", "Size".bold(), asset.size());

    if let Some(p) = placement {
        println!();
        println!(
            "{}",
            format!("Banner Crop ({}x{})", options.width, options.height)
                .cyan()
                .bold()
        );
        println!("{}", "─".repeat(40).dimmed());

        println!("{}: {:.4}", "Scale".bold(), p.scale);
        println!("{}: ({:.1}, {:.1})", "Offset".bold(), p.offset_x, p.offset_y);
        println!(
            "{}: {}x{} at ({}, {})",
            "Visible region".bold(),
            p.crop_width,
            p.crop_height,
            p.crop_x,
            p.crop_y
        );
        println!(
            "{}: {}",
            "Content loss".bold(),
            if p.is_lossless() { "No" } else { "Yes" }
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "ongkit".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("CPF/CNPJ validation and banner normalization tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_kind_explicit() {
        assert_eq!(resolve_kind("529", Some(KindArg::Cnpj)), DocumentKind::Cnpj);
    }

    #[test]
    fn test_resolve_kind_by_length() {
        assert_eq!(resolve_kind("529.982.247-25", None), DocumentKind::Cpf);
        assert_eq!(resolve_kind("11.222.333/0001-81", None), DocumentKind::Cnpj);
        assert_eq!(resolve_kind("5299", None), DocumentKind::Cpf);
        assert_eq!(resolve_kind("112223330", None), DocumentKind::Cpf);
        assert_eq!(resolve_kind("112223330001", None), DocumentKind::Cnpj);
    }

    #[test]
    fn test_unique_filename_suffixes_repeats() {
        let mut taken = HashSet::new();
        assert_eq!(unique_filename("logo.jpg", &mut taken), "logo.jpg");
        assert_eq!(unique_filename("logo.jpg", &mut taken), "logo-1.jpg");
        assert_eq!(unique_filename("capa.jpg", &mut taken), "capa.jpg");
        assert_eq!(unique_filename("logo.jpg", &mut taken), "logo-2.jpg");
    }

    #[test]
    fn test_unique_filename_skips_names_already_taken() {
        let mut taken = HashSet::new();
        assert_eq!(unique_filename("logo.jpg", &mut taken), "logo.jpg");
        assert_eq!(unique_filename("logo-1.jpg", &mut taken), "logo-1.jpg");
        assert_eq!(unique_filename("logo.jpg", &mut taken), "logo-2.jpg");
    }

    fn write_png(path: &Path, width: u32, height: u32) {
        image::RgbImage::new(width, height).save(path).unwrap();
    }

    #[test]
    fn test_banner_keeps_same_stem_outputs_apart() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        let first = dir.path().join("a").join("logo.png");
        let second = dir.path().join("b").join("logo.png");
        write_png(&first, 60, 20);
        write_png(&second, 20, 60);
        let out = dir.path().join("out");

        let options = BannerOptions::new().with_size(60, 20);
        cmd_banner(&[first, second], Some(&out), &options).unwrap();

        assert!(out.join("logo.jpg").is_file());
        assert!(out.join("logo-1.jpg").is_file());
    }

    #[test]
    fn test_banner_unreadable_file_fails_only_its_slot() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        let present = dir.path().join("capa.png");
        write_png(&present, 30, 10);
        let out = dir.path().join("out");

        let options = BannerOptions::new().with_size(30, 10);
        let result = cmd_banner(&[missing, present], Some(&out), &options);

        let message = result.unwrap_err().to_string();
        assert_eq!(message, "1 of 2 images failed");
        assert!(out.join("capa.jpg").is_file());
    }

    #[test]
    fn test_cli_parses_banner_defaults() {
        let cli = Cli::parse_from(["ongkit", "banner", "a.png", "b.png"]);
        match cli.command {
            Some(Commands::Banner {
                inputs,
                width,
                height,
                quality,
                ..
            }) => {
                assert_eq!(inputs.len(), 2);
                assert_eq!((width, height), (1200, 400));
                assert_eq!(quality, 0.85);
            }
            _ => panic!("expected banner command"),
        }
    }
}
