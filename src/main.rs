use anyhow::{bail, Context};
use clap::{Args as ClapArgs, Parser, Subcommand};
use dotenv::dotenv;
use rulegate_rs::expression::{Lexer, Statement, Variables};
use rulegate_rs::rules::{Gate, RuleLoader};
use rulegate_rs::{EngineConfig, LexError};

use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a single rule expression
    Eval {
        /// The expression, e.g. '$BRANCH == "main"'
        expression: String,

        #[command(flatten)]
        vars: VarArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the lexemes of an expression
    Lex {
        expression: String,

        #[command(flatten)]
        budget: BudgetArgs,
    },
    /// Decide which jobs of a rule file run
    Plan {
        /// Path to the rule file
        file: PathBuf,

        #[command(flatten)]
        vars: VarArgs,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(ClapArgs, Debug)]
struct VarArgs {
    /// Variable binding NAME=VALUE, may be repeated
    #[arg(short, long = "var", value_parser = parse_binding)]
    vars: Vec<(String, String)>,

    /// YAML file with variable bindings
    #[arg(long)]
    vars_file: Option<PathBuf>,

    /// Start from the process environment
    #[arg(long)]
    env: bool,

    #[command(flatten)]
    budget: BudgetArgs,
}

#[derive(ClapArgs, Debug)]
struct BudgetArgs {
    /// Engine configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Token budget, overrides the configuration
    #[arg(long)]
    max_tokens: Option<usize>,
}

impl VarArgs {
    fn variables(&self) -> anyhow::Result<Variables> {
        let mut variables = if self.env {
            Variables::from_env()
        } else {
            Variables::new()
        };

        if let Some(path) = &self.vars_file {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            variables = variables.merge(Variables::from_yaml(&content)?);
        }

        let cli: Variables = self.vars.iter().cloned().collect();
        Ok(variables.merge(cli))
    }
}

impl BudgetArgs {
    fn config(&self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => EngineConfig::default(),
        }
        .apply_env_overrides()?;

        if let Some(max_tokens) = self.max_tokens {
            if max_tokens == 0 {
                bail!("--max-tokens must be greater than zero");
            }
            config.max_tokens = max_tokens;
        }
        Ok(config)
    }
}

fn lex(expression: &str, config: &EngineConfig) -> Result<Vec<&'static str>, LexError> {
    Lexer::new(expression)
        .with_max_tokens(config.max_tokens)
        .lexeme_names()
}

fn parse_binding(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", raw)),
    }
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Eval {
            expression,
            vars,
            json,
        } => {
            let config = vars.budget.config()?;
            let statement =
                Statement::new(expression, vars.variables()?).with_max_tokens(config.max_tokens);

            let value = statement.evaluate()?;
            let truthful = value.is_truthful();
            if json {
                let out = serde_json::json!({ "value": value, "truthful": truthful });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("Value: {}", value);
                println!("Truthful: {}", truthful);
            }
        }
        Commands::Lex { expression, budget } => {
            let names = lex(&expression, &budget.config()?)?;
            println!("{}", names.join(" "));
        }
        Commands::Plan { file, vars, json } => {
            let rules = RuleLoader::new()
                .load(&file)
                .with_context(|| format!("Failed to load rules {}", file.display()))?;
            let gate = Gate::new(vars.budget.config()?);

            log::info!("Planning {} job(s) from {}", rules.jobs.len(), file.display());
            let plan = gate.plan(&rules, &vars.variables()?);

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                for job in plan {
                    match job.error {
                        Some(error) => println!("{}: {} ({})", job.name, job.decision, error),
                        None => println!("{}: {}", job.name, job.decision),
                    }
                }
            }
        }
    }

    Ok(())
}
