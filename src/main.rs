mod api;
mod aqi;
mod cli;
mod config;
mod error;
mod logging;
mod models;
mod store;

use clap::Parser;
use cli::{App, Commands, ConvertArgs, InvertArgs, ReadArgs, SensorDataArgs};
use colored::*;
use config::Config;
use dialoguer::{theme::ColorfulTheme, Select};
use error::Result;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    let _log_guard = logging::init(config.log_dir.as_deref());

    info!("Initializing air quality dashboard...");

    let app = match App::new(&config) {
        Ok(app) => {
            info!("Application initialized successfully.");
            app
        },
        Err(e) => {
            error!("Failed to initialize application: {:?}", e);
            println!(
                "{}",
                "Error: Failed to initialize application. Check logs.".red()
            );
            return Err(e);
        },
    };

    if let Some(command) = args.command {
        return app.run_command(command).await;
    }

    println!("{}", "Welcome to the Air Quality Dashboard!".cyan().bold());

    // Main interactive loop
    loop {
        let options = &[
            "Read a Sensor URL",
            "Get Sensor Data for a Customer",
            "List Customers",
            "Poll All Customers",
            "Convert PM2.5 to AQI",
            "Estimate PM2.5 from an IQAir Index",
            "Exit",
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What would you like to do?")
            .items(options)
            .default(0)
            .interact_opt()?
            .unwrap_or(options.len() - 1); // Default to Exit if cancelled

        println!("\n---\n");

        let command = match selection {
            0 => cli::prompt_url().map(|url| Commands::Read(ReadArgs { url })),
            1 => cli::prompt_key().map(|key| Commands::SensorData(SensorDataArgs { key })),
            2 => Ok(Commands::Customers),
            3 => Ok(Commands::PollAll),
            4 => cli::prompt_number("PM2.5 (µg/m³)").map(|pm25| {
                Commands::Convert(ConvertArgs {
                    pm25,
                    full_scale: false,
                })
            }),
            5 => cli::prompt_number("IQAir US AQI")
                .map(|aqius| Commands::Invert(InvertArgs { aqius })),
            6 => {
                println!("{}", "Exiting application. Goodbye!".green());
                break;
            },
            _ => unreachable!(),
        };

        let command = match command {
            Ok(command) => command,
            Err(e) => {
                println!("{} {}", "Failed to get input:".red(), e);
                continue;
            },
        };

        if let Err(e) = app.run_command(command).await {
            error!("Command execution failed: {:?}", e);
            println!(
                "{} {}",
                "Error executing command:".red(),
                e.to_string().red()
            );
        }

        println!("\n---\n");
    }

    Ok(())
}
