use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hanlex_core::{Level, MemoryEntry, MemorySink};
use hanlex_pinyin::{diacritic, sortkey, tokenizer, Engine, EngineConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hanlex", about = "Pinyin consistency checks and sort keys over a word dictionary")]
struct Args {
    /// Directory holding wordlist.u8 and chardb.bin/chardb.u8
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Optional TOML config overriding the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the batch checks over a tab-separated entry dump
    Check {
        /// Input file: one entry per line, <Hanzi>\t<Tonenum>[\t<SortKey>]
        input: PathBuf,
        /// Print every entry, not only the changed ones
        #[arg(long)]
        all: bool,
    },
    /// Render a tone-numbered string as diacritic Pinyin
    Render { tonenum: String },
    /// Compute the sort key for one (hanzi, tonenum) pair
    Sortkey { hanzi: String, tonenum: String },
    /// Show the syllable tokens of a tone-numbered string
    Tokenize { tonenum: String },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EngineConfig::load_toml(path)
            .map_err(|e| anyhow::anyhow!("load config {}: {}", path.display(), e))?,
        None => EngineConfig::default(),
    };

    match args.command {
        Command::Check { input, all } => check(&args.data_dir, config, &input, all),
        Command::Render { tonenum } => {
            if tonenum.contains('|') || tonenum.contains('[') {
                anyhow::bail!("cannot render an ambiguous or error-carrying tonenum: {}", tonenum);
            }
            println!("{}", diacritic::tonenum_to_pinyin(&tonenum));
            Ok(())
        }
        Command::Sortkey { hanzi, tonenum } => {
            let engine = Engine::from_data_dir(&args.data_dir, config)?;
            println!("{}", sortkey::sort_string(&hanzi, &tonenum, engine.table()));
            Ok(())
        }
        Command::Tokenize { tonenum } => {
            for token in tokenizer::tokenize(&tonenum) {
                println!("{}", token);
            }
            Ok(())
        }
    }
}

fn check(data_dir: &PathBuf, config: EngineConfig, input: &PathBuf, all: bool) -> Result<()> {
    let ws_hanzi = config.ws_hanzi.clone();
    let ws_tonenum = config.ws_tonenum.clone();
    let ws_pinyin = config.ws_pinyin.clone();
    let ws_sort = config.ws_sort.clone();

    let engine = Engine::from_data_dir(data_dir, config)?;
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("read entry dump {}", input.display()))?;

    let mut summary = hanlex_pinyin::BatchSummary::default();
    let mut sink = MemorySink::new();

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split('\t');
        let hanzi = fields.next().unwrap_or_default();
        let tonenum = fields.next().unwrap_or_default();
        let sort = fields.next().unwrap_or_default();

        let mut entry = MemoryEntry::new(format!("line {}", lineno + 1))
            .with_field(&ws_hanzi, hanzi)
            .with_field(&ws_tonenum, tonenum)
            .with_field(&ws_sort, sort);

        let changes = engine.check_entry(&mut entry, &mut sink);
        summary.record(&changes);

        if all || changes.any() {
            println!(
                "{}\t{}\t{}\t{}",
                entry.field(&ws_hanzi).unwrap_or_default(),
                entry.field(&ws_tonenum).unwrap_or_default(),
                entry.field(&ws_pinyin).unwrap_or_default(),
                entry.field(&ws_sort).unwrap_or_default(),
            );
        }
    }

    for report in sink.reports() {
        let reference = report.reference.as_deref().unwrap_or("");
        eprintln!("{}: {} ({})", report.level, report.message, reference);
    }
    eprintln!("{}", summary);
    if sink.count(Level::Error) > 0 {
        std::process::exit(1);
    }
    Ok(())
}
