use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use callsift::classifier::{DEFAULT_SCORE_THRESHOLD, DEFAULT_TIE_BREAK_THRESHOLD};
use callsift::text::normalize_with;
use callsift::{
    BatchConfig, BatchReport, Category, ClassifierConfig, FuzzyStrategy, InterestClassifier,
    LexiconSet, PunctuationMode, Utterance, classify_campaign, parse_campaign_file,
    parse_transcript_file,
};

#[derive(Parser)]
#[command(name = "callsift")]
#[command(author, version, about = "Customer-interest classification for sales call transcripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single transcript
    Classify {
        /// Transcript file (JSON array of turns, or an object with `transcript`)
        #[arg(short, long, required_unless_present = "text", conflicts_with = "text")]
        input: Option<PathBuf>,

        /// Classify this text as a single customer turn
        #[arg(long)]
        text: Option<String>,

        /// Print the full classification as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        classifier: ClassifierArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Classify every lead of a campaign from its latest conversation
    Batch {
        /// Campaign file (JSON with `leads` and `conversations`)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the machine-readable report (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for the human-readable summary (text)
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Maximum number of transcripts classified at once
        #[arg(long, default_value = "10")]
        workers: usize,

        #[command(flatten)]
        classifier: ClassifierArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show how text is normalized before matching
    Normalize {
        /// Raw customer text
        #[arg(long)]
        text: String,

        /// How punctuation is removed
        #[arg(long, value_enum, default_value_t = PunctuationArg::Delete)]
        punctuation: PunctuationArg,
    },

    /// Print lexicon tables as `phrase<TAB>weight`
    Lexicons {
        /// Only print this table
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,

        /// Directory with lexicon overrides
        #[arg(long)]
        lexicons: Option<PathBuf>,
    },
}

/// Options shared by every command that classifies
#[derive(Args)]
struct ClassifierArgs {
    /// Directory with `interested.tsv`, `not_interested.tsv` and `maybe.tsv` overrides
    #[arg(long)]
    lexicons: Option<PathBuf>,

    /// Similarity (0-100) a phrase needs to add its weight
    #[arg(long, default_value_t = DEFAULT_SCORE_THRESHOLD, value_parser = clap::value_parser!(u8).range(0..=100))]
    score_threshold: u8,

    /// Similarity (0-100) a phrase needs to be located when breaking a tie
    #[arg(long, default_value_t = DEFAULT_TIE_BREAK_THRESHOLD, value_parser = clap::value_parser!(u8).range(0..=100))]
    tie_break_threshold: u8,

    /// Fuzzy similarity used for non-exact matches
    #[arg(long, value_enum, default_value_t = FuzzyArg::Word)]
    fuzzy: FuzzyArg,

    /// How punctuation is removed
    #[arg(long, value_enum, default_value_t = PunctuationArg::Delete)]
    punctuation: PunctuationArg,
}

impl ClassifierArgs {
    fn build(&self) -> Result<InterestClassifier> {
        let lexicons = load_lexicons(self.lexicons.as_ref())?;
        let config = ClassifierConfig {
            score_threshold: self.score_threshold,
            tie_break_threshold: self.tie_break_threshold,
            fuzzy: self.fuzzy.into(),
            punctuation: self.punctuation.into(),
        };
        Ok(InterestClassifier::new(lexicons, config))
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PunctuationArg {
    /// Drop punctuation
    Delete,
    /// Replace punctuation with a space
    Space,
}

impl From<PunctuationArg> for PunctuationMode {
    fn from(arg: PunctuationArg) -> Self {
        match arg {
            PunctuationArg::Delete => PunctuationMode::Delete,
            PunctuationArg::Space => PunctuationMode::Space,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FuzzyArg {
    /// Word-aligned windows
    Word,
    /// Character windows
    Char,
}

impl From<FuzzyArg> for FuzzyStrategy {
    fn from(arg: FuzzyArg) -> Self {
        match arg {
            FuzzyArg::Word => FuzzyStrategy::WordWindow,
            FuzzyArg::Char => FuzzyStrategy::CharWindow,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Interested,
    NotInterested,
    Maybe,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Interested => Category::Interested,
            CategoryArg::NotInterested => Category::NotInterested,
            CategoryArg::Maybe => Category::Maybe,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Classify {
            input,
            text,
            json,
            classifier,
            verbose,
        } => {
            setup_logging(verbose);
            classify_transcript(input, text, json, &classifier)
        }
        Commands::Batch {
            input,
            output,
            summary,
            workers,
            classifier,
            verbose,
        } => {
            setup_logging(verbose);
            classify_leads(input, output, summary, workers, &classifier).await
        }
        Commands::Normalize { text, punctuation } => {
            println!("{}", normalize_with(&text, punctuation.into()));
            Ok(())
        }
        Commands::Lexicons { category, lexicons } => {
            setup_logging(false);
            print_lexicons(category, lexicons)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_lexicons(dir: Option<&PathBuf>) -> Result<LexiconSet> {
    match dir {
        Some(dir) => {
            info!("Loading lexicon overrides from {:?}", dir);
            LexiconSet::load_dir(dir).context("Failed to load lexicons")
        }
        None => Ok(LexiconSet::builtin()),
    }
}

fn classify_transcript(
    input: Option<PathBuf>,
    text: Option<String>,
    json: bool,
    args: &ClassifierArgs,
) -> Result<()> {
    let utterances = match (input, text) {
        (Some(path), _) => {
            info!("Loading transcript from {:?}", path);
            parse_transcript_file(&path).context("Failed to parse input transcript")?
        }
        (None, Some(text)) => vec![Utterance::user(text)],
        (None, None) => bail!("Either --input or --text is required"),
    };

    let classifier = args.build()?;
    let result = classifier.classify_detailed(&utterances);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let label = if result.label.is_determined() {
        result.label.as_str()
    } else {
        "(undetermined)"
    };
    println!("Customer interest: {}", label);
    println!(
        "Scores: not interested {}, interested {}, maybe {}",
        result.scores.not_interested, result.scores.interested, result.scores.maybe
    );
    if result.tie_broken {
        println!("Tie broken by first occurrence");
    }

    Ok(())
}

async fn classify_leads(
    input: PathBuf,
    output: Option<PathBuf>,
    summary: Option<PathBuf>,
    workers: usize,
    args: &ClassifierArgs,
) -> Result<()> {
    info!("Loading campaign from {:?}", input);
    let campaign = parse_campaign_file(&input).context("Failed to parse campaign")?;
    info!(
        "Loaded {} leads, {} conversations",
        campaign.leads.len(),
        campaign.conversations.len()
    );

    let classifier = Arc::new(args.build()?);
    let lexicons = classifier.lexicons();
    let settings = classifier.config();
    info!(
        "Scoring against {} not interested, {} interested, {} maybe phrases (thresholds {}/{})",
        lexicons.not_interested.len(),
        lexicons.interested.len(),
        lexicons.maybe.len(),
        settings.score_threshold,
        settings.tie_break_threshold
    );
    let config = BatchConfig {
        max_workers: workers,
    };
    let outcomes = classify_campaign(classifier, &campaign, &config).await?;
    let report = BatchReport::from_outcomes(&outcomes);

    match &output {
        Some(path) => {
            report.write_json(path)?;
            info!("Report written to {:?}", path);
        }
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(path) = &summary {
        report.human().write_file(path)?;
        info!("Summary written to {:?}", path);
    } else if output.is_some() {
        print!("{}", report.human().format());
    }

    Ok(())
}

fn print_lexicons(category: Option<CategoryArg>, dir: Option<PathBuf>) -> Result<()> {
    let lexicons = load_lexicons(dir.as_ref())?;

    let categories: Vec<Category> = match category {
        Some(category) => vec![category.into()],
        None => Category::ALL.to_vec(),
    };

    for (index, category) in categories.iter().enumerate() {
        let lexicon = lexicons.get(*category);
        if categories.len() > 1 {
            if index > 0 {
                println!();
            }
            println!("# {} ({} phrases)", category, lexicon.len());
        }
        print!("{}", lexicon.to_tsv());
    }

    Ok(())
}
