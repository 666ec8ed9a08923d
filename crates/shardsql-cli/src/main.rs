use anyhow::Result;
use clap::{Parser, Subcommand};
use shardsql_parser::parse_dcl;

#[derive(Parser)]
#[command(name = "shardsql")]
#[command(about = "SQL Server DCL statement normalizer and inspection tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a DCL statement and print the normalized AST as JSON
    Parse {
        /// Statement to parse
        #[arg(short, long)]
        sql: String,
    },
    /// List the tables a DCL statement references
    Tables {
        /// Statement to inspect
        #[arg(short, long)]
        sql: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { sql } => {
            let statement = parse_dcl(&sql)?;
            println!("{}", serde_json::to_string_pretty(&statement)?);
        }
        Commands::Tables { sql } => {
            let statement = parse_dcl(&sql)?;
            let tables = statement.referenced_tables();
            if tables.is_empty() {
                println!("(no table references)");
            } else {
                for table in tables {
                    println!("{}", table.qualified_name());
                }
            }
        }
    }

    Ok(())
}
