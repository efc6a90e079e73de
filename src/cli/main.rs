use clap::{Args, Parser, Subcommand};
use health_risk_screener::{
    config::{Config, ValidationConfig},
    ml::{ArtifactSet, ScreeningService},
    models::{BreastInputs, Condition, FeatureSpec, FieldDomain, HeartInputs, LungInputs, RawInput},
    DISCLAIMER,
};
use reqwest::Client;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hrs-cli")]
#[command(about = "Health risk screening CLI", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    endpoint: String,

    /// Screen locally against artifacts in this directory instead of calling the server
    #[arg(short, long, env = "HRS_ARTIFACTS__DIR")]
    artifacts: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lung cancer screening
    Lung(LungArgs),

    /// Heart disease screening
    Heart(HeartArgs),

    /// Breast cancer screening
    Breast(BreastArgs),

    /// Print the questionnaire for a condition
    Fields {
        #[arg(value_name = "CONDITION")]
        condition: Condition,
    },

    /// Check server health
    Health,
}

#[derive(Args)]
struct LungArgs {
    /// 0 = Female, 1 = Male
    #[arg(long)]
    gender: u8,
    #[arg(long)]
    age: f64,
    #[arg(long)]
    smoking: u8,
    #[arg(long)]
    chronic_disease: u8,
    #[arg(long)]
    wheezing: u8,
    #[arg(long)]
    coughing: u8,
    #[arg(long)]
    shortness_of_breath: u8,
    #[arg(long)]
    chest_pain: u8,
}

impl From<LungArgs> for LungInputs {
    fn from(args: LungArgs) -> Self {
        Self {
            gender: args.gender,
            age: args.age,
            smoking: args.smoking,
            chronic_disease: args.chronic_disease,
            wheezing: args.wheezing,
            coughing: args.coughing,
            shortness_of_breath: args.shortness_of_breath,
            chest_pain: args.chest_pain,
        }
    }
}

#[derive(Args)]
struct HeartArgs {
    #[arg(long)]
    age: f64,
    /// 0 = Female, 1 = Male
    #[arg(long)]
    sex: u8,
    /// 0 = No pain, 1 = Mild, 2 = Moderate, 3 = Severe
    #[arg(long)]
    chest_pain_severity: u8,
    #[arg(long)]
    exercise_induced_pain: u8,
}

impl From<HeartArgs> for HeartInputs {
    fn from(args: HeartArgs) -> Self {
        Self {
            age: args.age,
            sex: args.sex,
            chest_pain_severity: args.chest_pain_severity,
            exercise_induced_pain: args.exercise_induced_pain,
        }
    }
}

#[derive(Args)]
struct BreastArgs {
    #[arg(long)]
    age: f64,
    #[arg(long)]
    family_history: u8,
    #[arg(long)]
    pain: u8,
    #[arg(long)]
    lump_felt: u8,
    #[arg(long)]
    nipple_discharge: u8,
    #[arg(long)]
    skin_changes: u8,
}

impl From<BreastArgs> for BreastInputs {
    fn from(args: BreastArgs) -> Self {
        Self {
            age: args.age,
            family_history: args.family_history,
            pain: args.pain,
            lump_felt: args.lump_felt,
            nipple_discharge: args.nipple_discharge,
            skin_changes: args.skin_changes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let (condition, raw) = match cli.command {
        Commands::Lung(args) => (Condition::Lung, RawInput::from(&LungInputs::from(args))),
        Commands::Heart(args) => (Condition::Heart, RawInput::from(&HeartInputs::from(args))),
        Commands::Breast(args) => (Condition::Breast, RawInput::from(&BreastInputs::from(args))),

        Commands::Fields { condition } => {
            print_questionnaire(&FeatureSpec::for_condition(condition));
            return Ok(());
        }

        Commands::Health => {
            let response = Client::new()
                .get(format!("{}/health", cli.endpoint))
                .send()
                .await?;

            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
            return Ok(());
        }
    };

    let result = match cli.artifacts {
        Some(dir) => screen_local(dir, condition, &raw)?,
        None => screen_remote(&cli.endpoint, condition, &raw).await?,
    };

    println!("{}", result);
    println!("{}", DISCLAIMER);
    Ok(())
}

fn screen_local(dir: PathBuf, condition: Condition, raw: &RawInput) -> Result<String, Box<dyn Error>> {
    let config = Config::load()?;
    let service = local_service(dir, &config.validation)?;
    Ok(service.screen(condition, raw)?.formatted())
}

/// Same age bounds as the server so both accept the same answers
fn local_service(dir: PathBuf, validation: &ValidationConfig) -> Result<ScreeningService, Box<dyn Error>> {
    Ok(ScreeningService::new(
        ArtifactSet::load_from_dir(dir)?,
        validation.age_range()?,
    )?)
}

async fn screen_remote(
    endpoint: &str,
    condition: Condition,
    raw: &RawInput,
) -> Result<String, Box<dyn Error>> {
    let response = Client::new()
        .post(format!("{}/v1/screenings/{}", endpoint, condition))
        .json(raw)
        .send()
        .await?;

    let status = response.status();
    let body: serde_json::Value = response.json().await?;

    if !status.is_success() {
        let message = body["error"]["message"]
            .as_str()
            .unwrap_or("screening request failed");
        return Err(format!("{} ({})", message, status).into());
    }

    body["result"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| "response did not contain a result".into())
}

fn print_questionnaire(spec: &FeatureSpec) {
    println!("{}", spec.title);
    for field in &spec.fields {
        let domain = match field.domain {
            FieldDomain::Binary => "0-1".to_string(),
            FieldDomain::Ordinal { levels } => format!("0-{}", levels.saturating_sub(1)),
            FieldDomain::Age => "years".to_string(),
        };
        println!("  --{:<24} {:<28} {}", field.name.replace('_', "-"), field.label, domain);
        for option in field.options {
            println!("      {}", option);
        }
    }
}
