//! schema-introspect CLI - Dialect-aware schema introspection of metadata dumps.

use clap::{Parser, Subcommand};
use schema_introspect::reader::read_column;
use schema_introspect::{
    DialectPlugin, DialectRegistry, FixtureSource, IntrospectError, MetadataRow, ReaderConfig,
    SchemaReader, SchemaSnapshot, TypeCode,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, Level};

/// Exit code when the snapshot was produced but some tables failed.
const EXIT_PARTIAL: u8 = 3;

#[derive(Parser)]
#[command(name = "schema-introspect")]
#[command(about = "Dialect-aware database schema introspection")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to a metadata fixture (YAML or JSON); overrides the configuration
    #[arg(short, long)]
    fixture: Option<PathBuf>,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "warn")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read the schema and print the normalized model
    Inspect {
        /// Override schema
        #[arg(long)]
        schema: Option<String>,

        /// Force a dialect instead of detecting it from the product
        #[arg(long)]
        dialect: Option<String>,

        /// Only read these tables (repeatable)
        #[arg(long = "table")]
        tables: Vec<String>,

        /// Skip these tables (repeatable, case-insensitive)
        #[arg(long = "exclude")]
        exclude: Vec<String>,
    },

    /// List registered dialects
    Dialects,

    /// Show how a dialect normalizes one reported column default
    NormalizeDefault {
        /// Dialect to apply
        #[arg(long, default_value = "derby")]
        dialect: String,

        /// Vendor type code of the column (default: 12, VARCHAR)
        #[arg(long, default_value = "12", allow_hyphen_values = true)]
        type_code: i32,

        /// Default value as the driver reports it
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, IntrospectError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format);

    let registry = DialectRegistry::with_builtins();

    match cli.command {
        Commands::Inspect {
            schema,
            dialect,
            tables,
            exclude,
        } => {
            let mut config = match cli.config {
                Some(ref path) => {
                    let config = ReaderConfig::load(path)?;
                    info!("Loaded configuration from {:?}", path);
                    config
                }
                None => ReaderConfig::default(),
            };

            // Apply overrides
            if let Some(path) = cli.fixture {
                config.fixture = Some(path);
            }
            if let Some(schema) = schema {
                config.schema = Some(schema);
            }
            if let Some(dialect) = dialect {
                config.dialect = Some(dialect);
            }
            if !tables.is_empty() {
                config.tables = tables;
            }
            config.exclude_tables.extend(exclude);

            let fixture = config.fixture.clone().ok_or_else(|| {
                IntrospectError::Config(
                    "no metadata fixture given (use --fixture or set `fixture`)".to_string(),
                )
            })?;
            let source = Arc::new(FixtureSource::load(&fixture)?);

            let reader = SchemaReader::from_config(source, registry, config)?;
            let snapshot = reader.read_schema().await?;

            if cli.output_json {
                println!("{}", snapshot.to_json()?);
            } else {
                print_summary(&snapshot);
            }

            if snapshot.is_complete() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(EXIT_PARTIAL))
            }
        }

        Commands::Dialects => {
            let names = registry.names();
            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&names)?);
            } else {
                println!("Registered dialects:");
                for name in names {
                    println!("  {}", name);
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::NormalizeDefault {
            dialect,
            type_code,
            value,
        } => {
            let plugin = registry.require(&dialect)?;
            let row = MetadataRow::new()
                .with("COLUMN_NAME", "VALUE")
                .with("DATA_TYPE", type_code)
                .with("COLUMN_DEF", value.as_str());
            let column = read_column(plugin, "-", &row)?;

            if cli.output_json {
                let result = serde_json::json!({
                    "dialect": plugin.name(),
                    "type": TypeCode(type_code).to_string(),
                    "reported": value,
                    "default_value": column.default_value,
                    "is_auto_increment": column.is_auto_increment,
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Dialect: {}", plugin.name());
                println!("  Type: {}", TypeCode(type_code));
                println!("  Reported: {}", value);
                match column.default_value {
                    Some(ref default_value) => println!("  Default: {}", default_value),
                    None => println!("  Default: (none)"),
                }
                println!(
                    "  Auto-increment: {}",
                    if column.is_auto_increment { "yes" } else { "no" }
                );
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_summary(snapshot: &SchemaSnapshot) {
    match snapshot.product.version {
        Some(ref version) => println!("Product: {} {}", snapshot.product.name, version),
        None => println!("Product: {}", snapshot.product.name),
    }
    println!("  Dialect: {}", snapshot.dialect);
    println!(
        "  Tables: {} read, {} failed",
        snapshot.tables.len(),
        snapshot.failures.len()
    );

    for table in &snapshot.tables {
        println!("\n{}", table.full_name());
        for column in &table.columns {
            let mut flags = Vec::new();
            if column.is_primary_key {
                flags.push("pk".to_string());
            }
            if column.is_auto_increment {
                flags.push("auto-increment".to_string());
            }
            if !column.is_nullable {
                flags.push("not null".to_string());
            }
            if let Some(ref default_value) = column.default_value {
                flags.push(format!("default '{}'", default_value));
            }
            println!("  {} {} {}", column.name, column.type_name, flags.join(", "));
        }
        for index in &table.indexes {
            println!(
                "  {} {} ({})",
                if index.is_unique { "unique index" } else { "index" },
                index.name.as_deref().unwrap_or("<unnamed>"),
                index.columns.join(", ")
            );
        }
        for fk in &table.foreign_keys {
            println!(
                "  foreign key {} ({}) -> {} ({})",
                fk.name.as_deref().unwrap_or("<unnamed>"),
                fk.local_columns().join(", "),
                fk.foreign_table,
                fk.foreign_columns().join(", ")
            );
        }
    }

    if !snapshot.failures.is_empty() {
        println!("\nFailed tables:");
        for failure in &snapshot.failures {
            println!("  {}: {}", failure.table, failure.reason);
        }
    }
}

fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    // Logs go to stderr so stdout stays parseable
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
