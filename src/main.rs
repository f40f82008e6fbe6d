use anyhow::{Context, Result};
use log::{error, info};
use crate::initialization::init;
use crate::worker::run;

mod config;
mod csv_output;
mod errors;
mod extraction;
mod initialization;
mod manager_forecast;
mod models;
mod worker;

fn main() -> Result<()> {
    let mgr = init().context("initialization failed")?;

    match run(&mgr) {
        Ok(rows) => {
            info!("done, {} rows in {}", rows, mgr.config.files.output);
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e).context("forecast run failed")
        }
    }
}
