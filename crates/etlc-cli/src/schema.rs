//! # Schema Subcommand
//!
//! Prints the JSON Schema a contract is checked against, exactly as embedded
//! in the validator.

use anyhow::Result;
use clap::Args;

use etlc_schema::ContractKind;

/// Arguments for the `etlc schema` subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Contract whose schema to print (request, result or manifest).
    #[arg(value_name = "KIND")]
    pub kind: ContractKind,
}

/// Execute the schema subcommand.
pub fn run_schema(args: &SchemaArgs) -> Result<u8> {
    print!("{}", args.kind.schema_source());
    Ok(crate::EXIT_OK)
}
