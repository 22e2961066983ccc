use std::io::{self, Write};

use structfield::Record;

use crate::domain::User;
use crate::error::CliError;

/// Print `ident  name  options` for each declared field.
pub fn run() -> Result<(), CliError> {
    let schema = User::default().schema();
    let mut out = io::stdout().lock();
    for field in &schema.fields {
        writeln!(
            out,
            "{:<16}{:<16}{}",
            field.ident,
            field.name.as_deref().unwrap_or("-"),
            if field.omit_empty { "omitempty" } else { "" },
        )?;
    }
    Ok(())
}
