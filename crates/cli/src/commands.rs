use clap::Subcommand;
use filter_engine::NamingConvention;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the parsed filter tree as JSON
    Ast {
        #[arg(long, help = "Filter expression")]
        filter: String,
    },
    /// Compile a filter against an entity schema and report the result
    Check {
        #[arg(long, help = "Schema document path (JSON)")]
        schema: String,

        #[arg(long, help = "Entity name within the schema document")]
        entity: String,

        #[arg(long, help = "Filter expression")]
        filter: String,

        /// Field naming convention: as_is, camel_case or snake_case
        #[arg(long)]
        naming: Option<NamingConvention>,

        #[arg(long, help = "Compiler settings file path (JSON)")]
        settings: Option<String>,
    },
    /// Print the records of a JSON array that match a filter
    Filter {
        #[arg(long, help = "Schema document path (JSON)")]
        schema: String,

        #[arg(long, help = "Entity name within the schema document")]
        entity: String,

        #[arg(long, help = "Filter expression")]
        filter: String,

        #[arg(long, help = "Records file path (JSON array of objects)")]
        input: String,

        /// Field naming convention: as_is, camel_case or snake_case
        #[arg(long)]
        naming: Option<NamingConvention>,

        #[arg(long, help = "Compiler settings file path (JSON)")]
        settings: Option<String>,

        #[arg(
            long,
            help = "If specified, writes the matching records to this file instead of stdout"
        )]
        output: Option<String>,
    },
}
