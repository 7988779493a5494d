use std::env;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use textbound::Segmenter;
use textbound_config::{CONFIG_FILE, TextboundConfig};

const USAGE: &str = "Usage: textbound [--kind <character|word|sentence|line>] [--locale <name>] \
[--mask <expr>] [--full-select] [--breaks] [--config <file>] [TEXT...]";

#[derive(Debug, Default)]
struct Options {
    kind: Option<String>,
    locale: Option<String>,
    mask: Option<String>,
    full_select: bool,
    breaks: bool,
    config: Option<PathBuf>,
    text: Vec<String>,
}

fn parse_args(args: Vec<String>) -> Result<Options> {
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--kind" | "-k" => {
                options.kind = Some(args.next().context("--kind expects a boundary kind")?);
            }
            "--locale" | "-l" => {
                options.locale = Some(args.next().context("--locale expects a locale name")?);
            }
            "--mask" | "-m" => {
                options.mask = Some(args.next().context("--mask expects a mask expression")?);
            }
            "--config" => {
                let path = args.next().context("--config expects a path")?;
                options.config = Some(PathBuf::from(path));
            }
            "--full-select" => options.full_select = true,
            "--breaks" => options.breaks = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            "--" => options.text.extend(args.by_ref()),
            flag if flag.starts_with("--") => {
                eprintln!("{USAGE}");
                bail!("unknown option {flag}");
            }
            text => options.text.push(text.to_string()),
        }
    }
    Ok(options)
}

/// Read the explicit config file, or `fallback` when it exists. Only a
/// missing fallback means defaults; a file that fails to parse is an error.
fn read_config(explicit: Option<&Path>, fallback: &Path) -> Result<TextboundConfig> {
    let path = match explicit {
        Some(path) => path,
        None if fallback.exists() => fallback,
        None => return Ok(TextboundConfig::default()),
    };
    TextboundConfig::load_from_file(path)
        .with_context(|| format!("failed to load config from {}", path.display()))
}

fn load_config(options: &Options) -> Result<TextboundConfig> {
    let mut config = read_config(options.config.as_deref(), Path::new(CONFIG_FILE))?;
    config.merge_with_env();

    // Command-line flags win over the file and the environment.
    if let Some(kind) = &options.kind {
        config.segmentation.boundary = kind.clone();
    }
    if let Some(locale) = &options.locale {
        config.locale.name = Some(locale.clone());
    }
    if let Some(mask) = &options.mask {
        config.segmentation.mask = Some(mask.clone());
    }
    if options.full_select {
        config.segmentation.full_select = true;
    }
    Ok(config)
}

fn init_logging(config: &TextboundConfig) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(filter) = config.logging.filter.as_deref() {
        builder.parse_filters(filter);
    }
    let _ = builder.try_init();
}

fn main() -> Result<()> {
    let options = parse_args(env::args().skip(1).collect())?;
    let config = load_config(&options)?;
    init_logging(&config);

    let segmenter = Segmenter::from_config(&config)?;
    log::debug!(
        "segmenting as {} under {} (mask {:#x})",
        segmenter.kind(),
        segmenter.locale(),
        segmenter.mask()
    );

    let text = if options.text.is_empty() {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read text from stdin")?;
        input
    } else {
        options.text.join(" ")
    };

    let mapping = segmenter.map_default(text.as_str())?;
    let kind = mapping.kind();
    log::info!("{} {} breaks in {} bytes", mapping.index().len(), kind, text.len());

    let mut out = BufWriter::new(io::stdout().lock());
    if options.breaks {
        for point in mapping.breaks() {
            writeln!(out, "{}\t{}", point.offset, kind.describe_mark(point.mark))?;
        }
    } else {
        for token in mapping.tokens().full_select(segmenter.full_select()) {
            writeln!(
                out,
                "{}..{}\t{}\t{:?}",
                token.range.start,
                token.range.end,
                kind.describe_mark(token.mark),
                token.text
            )?;
        }
    }
    out.flush()?;
    Ok(())
}
