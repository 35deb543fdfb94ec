//! Loadout Forge - CLI entry point
//!
//! One-shot inspection tool for the resolution engine: feed it a default
//! loadout, option sentences, a quantity and optionally saved `w2|` lines,
//! and it prints the parsed operations and the resolved weapon counts.

use clap::Parser;
use loadout_forge::core::error::Result;
use loadout_forge::core::{ParsedOption, UnitContext};
use loadout_forge::grammar::parse_option;
use loadout_forge::loadout::{parse_loadout, project_base_counts};
use loadout_forge::resolver::resolve;
use loadout_forge::selection::codec;
use loadout_forge::summary::counts_summary;

#[derive(Parser, Debug)]
#[command(name = "loadout-forge", about = "Resolve tabletop wargear loadouts")]
struct Args {
    /// Default loadout sentence(s), e.g. "The Boss Nob is equipped with: slugga; big choppa."
    #[arg(long, default_value = "")]
    loadout: String,

    /// Wargear option sentence; repeat for multiple options
    #[arg(long = "option")]
    options: Vec<String>,

    /// Number of models in the unit
    #[arg(long, default_value_t = 10)]
    quantity: u32,

    /// Persisted selection line in w2|... format; repeat for multiple
    #[arg(long = "selection")]
    selections: Vec<String>,

    /// Emit machine-readable JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loadout_forge=info".into()),
        )
        .init();

    let args = Args::parse();
    let unit = UnitContext::new(args.quantity);

    let lines = parse_loadout(&args.loadout);
    let base = project_base_counts(&lines, unit.quantity);

    let options: Vec<ParsedOption> = args
        .options
        .iter()
        .map(|text| ParsedOption::new(text.clone(), parse_option(text)))
        .collect();
    let selections = codec::decode(&args.selections, &options);
    let final_counts = resolve(&base, &options, &selections, unit.quantity);

    if args.json {
        let out = serde_json::json!({
            "loadout": lines,
            "operations": options,
            "selections": selections,
            "base_counts": base,
            "final_counts": final_counts,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if !options.is_empty() {
        println!("Options:");
        for (idx, opt) in options.iter().enumerate() {
            println!("  [{idx}] {:?}", opt.op);
        }
    }
    println!("Base:  {}", counts_summary(&base));
    println!("Final: {}", counts_summary(&final_counts));
    Ok(())
}
