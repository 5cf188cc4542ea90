//! Insurance premium prediction CLI
//!
//! Serves the prediction API and offers local and remote one-shot queries.

use clap::{Args, Parser, Subcommand};
use premium::features::UserAttributes;
use premium::{Config, Occupation, Result};

#[derive(Parser)]
#[command(name = "premium")]
#[command(about = "Insurance premium category prediction", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the model and serve the prediction API
    Serve {
        /// Override listen port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Ask a running server for a premium category
    Quote {
        #[command(flatten)]
        person: PersonArgs,
        /// Override server URL
        #[arg(long)]
        url: Option<String>,
    },
    /// Predict locally without going through HTTP
    Predict {
        #[command(flatten)]
        person: PersonArgs,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Show the derived features only
    Features {
        #[command(flatten)]
        person: PersonArgs,
    },
    /// Model management commands
    Model {
        #[command(subcommand)]
        action: ModelCommands,
    },
    /// Initialize a new project with default config
    Init,
}

#[derive(Subcommand)]
enum ModelCommands {
    /// Show model configuration and check the artifact loads
    Info,
}

#[derive(Args)]
struct PersonArgs {
    /// Age in years (1-100)
    #[arg(long)]
    age: u32,
    /// Weight in kg (30-200)
    #[arg(long)]
    weight: f64,
    /// Height in cm (120-220)
    #[arg(long)]
    height: u32,
    /// Annual income in lakhs (>= 0.5)
    #[arg(long)]
    income_lpa: f64,
    #[arg(long)]
    city: String,
    /// retired, freelancer, government_job, student, unemployed, business_owner, private_job
    #[arg(long)]
    occupation: Occupation,
    #[arg(long)]
    smoker: bool,
}

impl From<PersonArgs> for UserAttributes {
    fn from(p: PersonArgs) -> Self {
        UserAttributes {
            age: p.age,
            weight: p.weight,
            height: p.height,
            income_lpa: p.income_lpa,
            smoker: p.smoker,
            city: p.city,
            occupation: p.occupation,
        }
    }
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use table or json.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Serve { port } => commands::serve(config, port),
        Commands::Quote { person, url } => commands::quote(&config, person.into(), url),
        Commands::Predict { person, format } => commands::predict(&config, person.into(), format),
        Commands::Features { person } => commands::features(person.into()),
        Commands::Model { action } => match action {
            ModelCommands::Info => commands::model_info(&config),
        },
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use premium::api;
    use premium::client::PremiumClient;
    use premium::features::{DerivedFeatures, FeatureRow};
    use premium::predict::inference::format_prediction;
    use premium::predict::Predictor;
    use premium::PremiumError;

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        std::fs::create_dir_all("model")?;
        println!("Created model/ directory");

        println!("\nNext steps:");
        println!("  1. Place the trained model record at {}.mpk", config.model.path);
        println!("  2. Set [features] scaling to match the trained model");
        println!("  3. Run 'premium serve' to start the API");

        Ok(())
    }

    pub fn serve(mut config: Config, port: Option<u16>) -> Result<()> {
        if let Some(p) = port {
            config.server.port = p;
        }

        let predictor = Predictor::load(&config)?;

        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(api::serve(&config.server, predictor))
    }

    pub fn quote(config: &Config, attrs: UserAttributes, url: Option<String>) -> Result<()> {
        let mut client_config = config.client.clone();
        if let Some(u) = url {
            client_config.url = u;
        }

        let client = PremiumClient::from_config(&client_config)?;
        let category = client.quote(&attrs)?;

        println!("Predicted Insurance Premium Category: {}", category);
        println!("{}", category.explanation());
        Ok(())
    }

    pub fn predict(config: &Config, attrs: UserAttributes, format: OutputFormat) -> Result<()> {
        let predictor = Predictor::load(config)?;
        let prediction = predictor.predict(&attrs)?;

        match format {
            OutputFormat::Table => print!("{}", format_prediction(&prediction)),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&prediction)
                    .map_err(|e| PremiumError::Parse(e.to_string()))?;
                println!("{}", json);
            }
        }
        Ok(())
    }

    pub fn features(attrs: UserAttributes) -> Result<()> {
        attrs.validate().map_err(PremiumError::Validation)?;

        let derived = DerivedFeatures::derive(&attrs);
        let row = FeatureRow::new(derived, attrs.occupation, attrs.income_lpa);

        println!("Derived Features");
        println!("───────────────────────────────");
        println!("  BMI:             {:.2}", row.bmi);
        println!("  Age group:       {}", row.age_group.as_str());
        println!("  Lifestyle risk:  {}", row.lifestyle_risk.as_str());
        println!("  City tier:       {}", row.city_tier.number());
        println!("  Occupation:      {}", row.occupation);
        println!("  Income (LPA):    {}", row.income_lpa);

        Ok(())
    }

    pub fn model_info(config: &Config) -> Result<()> {
        println!("Model");
        println!("───────────────────────────────");
        println!("  Path:        {}.mpk", config.model.path);
        println!("  Input dim:   {}", FeatureRow::DIM);
        println!("  Hidden dims: {:?}", config.model.hidden_dims);
        let labels: Vec<_> = config.model.labels.iter().map(|l| l.as_str()).collect();
        println!("  Labels:      {}", labels.join(", "));

        match Predictor::load(config) {
            Ok(_) => println!("  Status:      loaded OK"),
            Err(e) => println!("  Status:      {}", e),
        }

        Ok(())
    }
}
