use std::{fs, io::Read};

use anyhow::{Context, Result};
use serde_json::Value;

use energymap::echo_event;

use crate::cli::{Cli, EchoArgs};

pub fn run(_cli: &Cli, args: &EchoArgs) -> Result<()> {
    let text = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("[echo] Failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).context("[echo] Failed to read stdin")?;
            text
        }
    };

    // An empty input stands for "no event yet".
    let payload: Option<Value> = if text.trim().is_empty() {
        None
    } else {
        Some(serde_json::from_str(&text).context("[echo] payload is not valid JSON")?)
    };

    println!("{}", echo_event(payload.as_ref())?);
    Ok(())
}
