use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hanlex_core::CharTable;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chardb", about = "Character sort table tooling")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert the legacy text table to the binary form
    Convert {
        /// Input text table (.u8/.txt/.tsv)
        input: PathBuf,
        /// Output binary table
        #[arg(long, default_value = "chardb.bin")]
        output: PathBuf,
    },
    /// Regenerate the legacy text table from the binary form
    Export {
        /// Input binary table
        input: PathBuf,
        /// Output text table
        #[arg(long, default_value = "chardb.u8")]
        output: PathBuf,
    },
    /// Print one record, or whole-table statistics, as JSON
    Inspect {
        /// Table in either format (chosen by extension)
        input: PathBuf,
        /// Character to look up; statistics when omitted
        #[arg(long)]
        hanzi: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    match args.command {
        Command::Convert { input, output } => {
            let ext = input.extension().and_then(|s| s.to_str()).unwrap_or("");
            if !matches!(ext, "u8" | "txt" | "tsv") {
                bail!("expected a text table (.u8/.txt/.tsv), got {}", input.display());
            }
            if !input.exists() {
                bail!("text table {} not found", input.display());
            }
            let table = CharTable::load_text(&input)?;
            table.save_binary(&output)?;
            eprintln!("{} records -> {}", table.len(), output.display());
        }
        Command::Export { input, output } => {
            let table = CharTable::load_binary(&input)?;
            table.export_text(&output)?;
            eprintln!("{} records -> {}", table.len(), output.display());
        }
        Command::Inspect { input, hanzi } => {
            let table = CharTable::load(&input)?;
            match hanzi {
                Some(hanzi) => {
                    let record = table
                        .get(&hanzi)
                        .with_context(|| format!("{} not in {}", hanzi, input.display()))?;
                    println!("{}", serde_json::to_string_pretty(record)?);
                }
                None => {
                    let pronunciations: usize =
                        table.iter().map(|r| r.pronunciations.len()).sum();
                    let stats = serde_json::json!({
                        "records": table.len(),
                        "pronunciations": pronunciations,
                        "composed": table.iter().filter(|r| r.hanzi.chars().count() > 1).count(),
                    });
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                }
            }
        }
    }
    Ok(())
}
