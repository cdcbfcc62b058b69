use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use mendelian_inference_core as core;
use core::{compatible_modes, genotype_distribution, GenotypeReport, Mode, Pedigree};

#[derive(Parser)]
#[command(name = "mendel")]
#[command(version)]
#[command(about = "Exact genotype inference on pedigrees under Mendelian modes of inheritance")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer genotype distributions under one mode of inheritance
    Infer {
        /// Pedigree file: a CSV (columns: id, phenotype, father, mother)
        /// or an ASCII diagram
        #[arg(short, long)]
        pedigree: String,

        /// Mode of inheritance (e.g. "autosomal-recessive" or "ar")
        #[arg(short, long)]
        mode: String,

        /// Only report this individual (default: everyone)
        #[arg(short, long)]
        individual: Option<String>,

        /// Output format: "text" (default) or "json"
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List the modes of inheritance consistent with a pedigree
    Modes {
        /// Pedigree file (CSV or ASCII diagram)
        #[arg(short, long)]
        pedigree: String,
    },

    /// Print the individuals of a pedigree and their relations
    Show {
        /// Pedigree file (CSV or ASCII diagram)
        #[arg(short, long)]
        pedigree: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Infer {
            pedigree,
            mode,
            individual,
            format,
        } => cmd_infer(&pedigree, &mode, individual.as_deref(), &format),
        Commands::Modes { pedigree } => cmd_modes(&pedigree),
        Commands::Show { pedigree } => cmd_show(&pedigree),
    }
}

fn load_pedigree(path: &str) -> Result<Pedigree> {
    let is_csv = Path::new(path)
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));
    let ped = if is_csv {
        Pedigree::from_csv(path)
    } else {
        Pedigree::from_diagram_file(path)
    }
    .with_context(|| format!("Failed to load pedigree from '{}'", path))?;

    log::debug!("{} pedigree loader used for '{}'", if is_csv { "CSV" } else { "diagram" }, path);
    eprintln!(
        "Loaded pedigree with {} individuals ({} roots) from '{}'",
        ped.n_individuals(),
        ped.roots().len(),
        path
    );
    Ok(ped)
}

fn cmd_infer(
    pedigree_path: &str,
    mode: &str,
    individual: Option<&str>,
    output_format: &str,
) -> Result<()> {
    let ped = load_pedigree(pedigree_path)?;
    let mode: Mode = mode.parse()?;

    let indices: Vec<usize> = match individual {
        Some(id) => match ped.index_of(id) {
            Some(index) => vec![index],
            None => anyhow::bail!("Unknown individual '{}' in '{}'", id, pedigree_path),
        },
        None => (0..ped.n_individuals()).collect(),
    };

    eprintln!("Inferring {} genotype distributions under {}", indices.len(), mode);

    let mut reports = Vec::with_capacity(indices.len());
    for index in indices {
        let distribution = genotype_distribution(&ped, mode, index)
            .with_context(|| format!("Inference failed for {}", ped.label(index)))?;
        reports.push(GenotypeReport::new(&ped, index, mode, distribution));
    }

    match output_format.to_lowercase().as_str() {
        "json" => print_json(&reports)?,
        "text" => print_text(&reports),
        other => anyhow::bail!("Unknown format '{}'. Use 'text' (default) or 'json'.", other),
    }

    Ok(())
}

fn print_text(reports: &[GenotypeReport]) {
    for report in reports {
        println!("{}", report.summary());
    }
}

fn print_json(reports: &[GenotypeReport]) -> Result<()> {
    let individuals: Vec<serde_json::Value> = reports
        .iter()
        .map(|r| {
            let genotypes: Vec<serde_json::Value> = r
                .distribution
                .iter()
                .map(|(g, p)| {
                    serde_json::json!({
                        "genotype": g.to_string(),
                        "probability": p.to_string(),
                        "value": r.probability_f64(g),
                    })
                })
                .collect();
            serde_json::json!({
                "id": r.id,
                "phenotype": r.phenotype.symbol().to_string(),
                "mode": r.mode.name(),
                "carrier_probability": r.carrier_probability().to_string(),
                "genotypes": genotypes,
            })
        })
        .collect();

    let json_str = serde_json::to_string_pretty(&serde_json::json!({ "individuals": individuals }))?;
    println!("{}", json_str);
    Ok(())
}

fn cmd_modes(pedigree_path: &str) -> Result<()> {
    let ped = load_pedigree(pedigree_path)?;
    let modes = compatible_modes(&ped).context("Mode screening failed")?;

    if modes.is_empty() {
        println!("No Mendelian mode of inheritance is consistent with this pedigree");
    }
    for mode in Mode::ALL {
        let verdict = if modes.contains(&mode) {
            "compatible"
        } else {
            "ruled out"
        };
        println!("  {:<20} {}", mode.name(), verdict);
    }
    Ok(())
}

fn cmd_show(pedigree_path: &str) -> Result<()> {
    let ped = load_pedigree(pedigree_path)?;
    let id_of = |index: Option<usize>| {
        index.map_or_else(|| "-".to_string(), |i| ped.individual(i).id().to_string())
    };

    println!(
        "{:<8} {:<20} {:<8} {:<8} {:<8} children",
        "id", "phenotype", "mother", "father", "partner"
    );
    for (index, ind) in ped.individuals().enumerate() {
        let children: Vec<&str> = ped
            .children(index)
            .iter()
            .map(|&c| ped.individual(c).id())
            .collect();
        println!(
            "{:<8} {:<20} {:<8} {:<8} {:<8} {}",
            ind.id(),
            ind.phenotype().describe(),
            id_of(ind.mother()),
            id_of(ind.father()),
            id_of(ind.partner()),
            children.join(" ")
        );
    }
    Ok(())
}
