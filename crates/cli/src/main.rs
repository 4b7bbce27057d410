use anyhow::Context;
use cds_core::{
    config::load_interaction_codes, constants::DEFAULT_BASE_URL, constants::DEFAULT_CARE_PLAN_TITLE,
    create_card, create_preferences_card, parse_preferences, translate, validate, CardOptions,
    MedicationCatalogue, PreferenceCardOptions, TranslatorConfig,
};
use cds_types::PatientId;
use clap::{Parser, Subcommand};
use fhir::InteractionCodeTable;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cds")]
#[command(about = "TMR to FHIR clinical decision support CLI")]
struct Cli {
    /// Namespace for resource full URLs (must end in '/')
    #[arg(long, global = true, env = "CDS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// YAML file replacing the built-in interaction code table
    #[arg(long, global = true, env = "CDS_INTERACTION_CODES")]
    interaction_codes: Option<PathBuf>,
    /// Implicate unknown recommendations as medication requests instead of failing
    #[arg(long, global = true)]
    relaxed_references: bool,
    /// Add fullUrl to card bundle entries
    #[arg(long, global = true)]
    full_urls: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a TMR document against every validation gate
    Validate {
        /// TMR document (`-` for stdin)
        file: PathBuf,
    },
    /// Translate a TMR document into FHIR resources
    Translate {
        /// TMR document (`-` for stdin)
        file: PathBuf,
        /// Patient identifier
        #[arg(long)]
        patient: String,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Translate a TMR document and wrap it into an advisory card
    Card {
        /// TMR document (`-` for stdin)
        file: PathBuf,
        /// Patient identifier
        #[arg(long)]
        patient: String,
        /// Guideline group id used as the suggestion uuid
        #[arg(long)]
        cig_id: Option<String>,
        /// Care plan title
        #[arg(long)]
        title: Option<String>,
        /// Patient date of birth (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Build the COPD medication-preference card
    Preferences {
        /// Preferences per COPD group: `{ groupA, groupB, groupC, groupD }` (`-` for stdin)
        file: PathBuf,
        /// Patient identifier
        #[arg(long)]
        patient: String,
        /// SNOMED CT code of the assessed GOLD 2017 group
        #[arg(long)]
        assessed_group: u64,
        /// Guideline group id used as the suggestion uuid
        #[arg(long)]
        cig_id: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the active interaction code table as YAML
    Codes,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cds_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    tracing::debug!(
        "Resolved config: base_url={}, strict_references={}, full_urls={}",
        config.base_url(),
        config.strict_references(),
        config.emit_full_urls()
    );

    match cli.command {
        Commands::Validate { file } => {
            let document = read_document(&file)?;
            let summary = validate(&document, &config)?;
            println!(
                "valid: {} recommendations, {} interactions, {} resources",
                summary.recommendations, summary.interactions, summary.resources
            );
        }
        Commands::Translate {
            file,
            patient,
            pretty,
        } => {
            let document = read_document(&file)?;
            let patient = PatientId::new(&patient).context("invalid --patient")?;
            let translation = translate(&patient, &document, &config)?;
            print_json(&translation, pretty)?;
        }
        Commands::Card {
            file,
            patient,
            cig_id,
            title,
            birth_date,
            pretty,
        } => {
            let document = read_document(&file)?;
            let patient = PatientId::new(&patient).context("invalid --patient")?;
            let options = CardOptions {
                care_plan_title: title,
                birth_date,
                ..CardOptions::default()
            };
            let card = create_card(&patient, cig_id.as_deref(), &document, &options, &config)?;
            print_json(&card, pretty)?;
        }
        Commands::Preferences {
            file,
            patient,
            assessed_group,
            cig_id,
            pretty,
        } => {
            let preferences = parse_preferences(&read_document(&file)?)?;
            let patient = PatientId::new(&patient).context("invalid --patient")?;
            let card = create_preferences_card(
                &patient,
                cig_id.as_deref(),
                assessed_group,
                &preferences,
                &PreferenceCardOptions::default(),
                &MedicationCatalogue::default(),
            )?;
            print_json(&card, pretty)?;
        }
        Commands::Codes => {
            print!("{}", config.interaction_codes().to_yaml()?);
        }
    }

    Ok(())
}

fn build_config(cli: &Cli) -> anyhow::Result<TranslatorConfig> {
    let interaction_codes = match &cli.interaction_codes {
        Some(path) => load_interaction_codes(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => InteractionCodeTable::default(),
    };

    Ok(TranslatorConfig::new(
        cli.base_url.clone(),
        interaction_codes,
        !cli.relaxed_references,
        cli.full_urls,
        DEFAULT_CARE_PLAN_TITLE.into(),
    )?)
}

fn read_document(file: &Path) -> anyhow::Result<serde_json::Value> {
    tracing::debug!("Reading {}", file.display());
    let text = if file == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).context("reading stdin")?
    } else {
        std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("parsing {} as JSON", file.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_reach_config() {
        let cli = Cli::try_parse_from([
            "cds",
            "translate",
            "group.json",
            "--patient",
            "dummy",
            "--relaxed-references",
            "--base-url",
            "https://cds.example.org/",
        ])
        .expect("parse");
        let config = build_config(&cli).expect("config");
        assert!(!config.strict_references());
        assert_eq!(config.base_url(), "https://cds.example.org/");
    }

    #[test]
    fn preferences_takes_assessed_group_code() {
        let cli = Cli::try_parse_from([
            "cds",
            "preferences",
            "-",
            "--patient",
            "dummy",
            "--assessed-group",
            "1097901000000101",
        ])
        .expect("parse");
        let Commands::Preferences {
            file,
            assessed_group,
            cig_id,
            ..
        } = cli.command
        else {
            panic!("expected the preferences command");
        };
        assert_eq!(file, PathBuf::from("-"));
        assert_eq!(assessed_group, 1097901000000101);
        assert!(cig_id.is_none());

        assert!(Cli::try_parse_from([
            "cds",
            "preferences",
            "-",
            "--patient",
            "dummy",
            "--assessed-group",
            "group-d",
        ])
        .is_err());
    }

    #[test]
    fn card_requires_patient() {
        assert!(Cli::try_parse_from(["cds", "card", "group.json"]).is_err());
    }
}
