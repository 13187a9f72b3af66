use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use filter_engine::{CompilerSettings, FilterCompiler, NamingConvention};
use model::{
    records::record::Record,
    schema::{EntitySchema, SchemaRegistry},
};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(name = "rsql", version = "0.1.0", about = "RSQL filter compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Ast { filter } => {
            let tree = rsql_syntax::parse(&filter)?;
            output::print_json(&tree)?;
        }
        Commands::Check {
            schema,
            entity,
            filter,
            naming,
            settings,
        } => {
            let session = Session::load(&schema, &entity, settings.as_deref(), naming)?;
            let predicate = session.compile(&filter)?;
            info!(
                "Filter compiles for '{}' ({}): {}",
                entity, session.convention, predicate
            );
        }
        Commands::Filter {
            schema,
            entity,
            filter,
            input,
            naming,
            settings,
            output,
        } => {
            let session = Session::load(&schema, &entity, settings.as_deref(), naming)?;
            let predicate = session.compile(&filter)?;

            let source = std::fs::read_to_string(&input)?;
            let documents: serde_json::Value = serde_json::from_str(&source)?;
            let documents = documents.as_array().ok_or(CliError::NotAnArray)?;

            let mut matched = Vec::new();
            for document in documents {
                let record = Record::from_json(&session.schema, document)?;
                if predicate.evaluate(&record) {
                    matched.push(document);
                }
            }
            info!("{} of {} record(s) matched", matched.len(), documents.len());

            match output {
                Some(path) => output::write_json(&matched, &path)?,
                None => output::print_json(&matched)?,
            }
        }
    }

    Ok(())
}

/// Compiler plus the entity a command works on.
struct Session {
    compiler: FilterCompiler,
    schema: Arc<EntitySchema>,
    convention: NamingConvention,
}

impl Session {
    fn load(
        schema_path: &str,
        entity: &str,
        settings_path: Option<&str>,
        naming: Option<NamingConvention>,
    ) -> Result<Self, CliError> {
        let settings = match settings_path {
            Some(path) => CompilerSettings::from_file(path)?,
            None => CompilerSettings::default(),
        };
        let convention = naming.unwrap_or(settings.default_naming);

        let source = std::fs::read_to_string(schema_path)?;
        let registry = SchemaRegistry::from_json_str(&source)?;
        let schema = registry
            .get(entity)
            .ok_or_else(|| CliError::UnknownEntity(entity.to_string()))?;
        debug!(
            "Loaded {} entity schema(s) from {}",
            registry.len(),
            schema_path
        );

        Ok(Self {
            compiler: FilterCompiler::with_settings(registry, settings),
            schema,
            convention,
        })
    }

    fn compile(
        &self,
        filter: &str,
    ) -> Result<filter_engine::CompiledPredicate<Record>, CliError> {
        Ok(self
            .compiler
            .compile::<Record>(&self.schema.name, filter, self.convention)?)
    }
}
