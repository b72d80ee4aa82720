use crate::api::SensorClient;
use crate::aqi::{aqius_to_pm25, pm25_to_aqi, pm25_to_aqi_epa};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    AirQualityReport, CustomerReading, HealthLabel, PollResult, SensorDataResponse, Sentinel,
    Vendor,
};
use crate::store::CustomerDirectory;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Table};
use dialoguer::{theme::ColorfulTheme, Input};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

/// CLI tool for customer air quality sensors
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Runs the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a sensor API URL and show the derived air quality
    Read(ReadArgs),

    /// Produce the sensor-data JSON response for a customer access key
    SensorData(SensorDataArgs),

    /// Convert a PM2.5 concentration (µg/m³) to AQI
    Convert(ConvertArgs),

    /// Estimate the PM2.5 concentration behind an IQAir US AQI value
    Invert(InvertArgs),

    /// List registered customers and their sensor vendors
    Customers,

    /// Read every customer's sensor and show the results
    PollAll,
}

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Vendor API URL (AirGradient, PurpleAir or IQAir)
    #[arg(short, long)]
    pub url: String,
}

#[derive(Args, Debug)]
pub struct SensorDataArgs {
    /// Customer access key
    #[arg(short, long)]
    pub key: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// PM2.5 concentration in µg/m³
    #[arg(short, long, allow_negative_numbers = true)]
    pub pm25: f64,

    /// Use the full EPA scale instead of the dashboard's simplified one
    #[arg(long)]
    pub full_scale: bool,
}

#[derive(Args, Debug)]
pub struct InvertArgs {
    /// US AQI value as reported by IQAir
    #[arg(short, long, allow_negative_numbers = true)]
    pub aqius: f64,
}

/// CLI application
pub struct App {
    sensor_client: SensorClient,
    directory: CustomerDirectory,
}

impl App {
    /// Create a new CLI application from the runtime configuration.
    ///
    /// A missing or unreadable customer file is not fatal: commands that only
    /// read URLs or convert values still work, and customer lookups behave as if
    /// nobody is registered.
    pub fn new(config: &Config) -> Result<Self> {
        let sensor_client = SensorClient::new(config.sensor_timeout)?;

        let directory = if config.customers_file.exists() {
            CustomerDirectory::load(&config.customers_file).unwrap_or_else(|e| {
                warn!(
                    "Ignoring customer file {}: {}",
                    config.customers_file.display(),
                    e
                );
                CustomerDirectory::default()
            })
        } else {
            warn!(
                "Customer file {} not found, starting with no customers",
                config.customers_file.display()
            );
            CustomerDirectory::default()
        };

        Ok(Self::with_parts(sensor_client, directory))
    }

    pub fn with_parts(sensor_client: SensorClient, directory: CustomerDirectory) -> Self {
        Self {
            sensor_client,
            directory,
        }
    }

    /// Run a single command
    pub async fn run_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Read(args) => self.read(&args.url).await,
            Commands::SensorData(args) => {
                let response = self.sensor_data(args.key.as_deref()).await;
                debug!("sensor-data responded with aqi {}", response.aqi());
                println!("{}", serde_json::to_string_pretty(&response)?);
                Ok(())
            },
            Commands::Convert(args) => convert(args.pm25, args.full_scale),
            Commands::Invert(args) => invert(args.aqius),
            Commands::Customers => {
                self.list_customers();
                Ok(())
            },
            Commands::PollAll => {
                let results = self.poll_all().await?;
                print_poll_table(&results);
                Ok(())
            },
        }
    }

    /// Reads one URL and prints the report.
    async fn read(&self, url: &str) -> Result<()> {
        let vendor = Vendor::display_label(url);
        match self.sensor_client.read_pm25(url).await {
            Ok(pm25) => {
                print_report(vendor, &AirQualityReport::from_pm25(pm25));
                Ok(())
            },
            Err(e) => Err(AppError::Cli(format!(
                "Could not read {} sensor: {}",
                vendor, e
            ))),
        }
    }

    /// Builds the response a customer's display receives for its access key.
    ///
    /// Never fails: a missing key, an unknown key and an unreadable sensor are
    /// reported as the `-3`, `-2` and `-1` sentinels respectively.
    pub async fn sensor_data(&self, key: Option<&str>) -> SensorDataResponse {
        let Some(key) = key.filter(|k| !k.is_empty()) else {
            return SensorDataResponse::sentinel(Sentinel::MissingKey);
        };

        let Some(customer) = self.directory.find_by_password(key) else {
            info!("Sensor data requested with an unknown access key");
            return SensorDataResponse::sentinel(Sentinel::UnknownCustomer);
        };

        let pm25 = self.sensor_client.fetch_pm25(&customer.api_url).await;
        if pm25 < 0.0 {
            return SensorDataResponse::sentinel(Sentinel::ReadingFailed);
        }

        let report = AirQualityReport::from_pm25(pm25);
        let sensor_name = customer.sensor_label();

        info!(
            "Customer {} reading: pm2.5 {} -> AQI {} ({})",
            customer.id, report.pm25, report.aqi, report.health_label
        );
        SensorDataResponse::Reading(CustomerReading::new(customer.id, sensor_name, report))
    }

    /// Reads every customer's sensor in turn.
    pub async fn poll_all(&self) -> Result<Vec<PollResult>> {
        let customers = self.directory.customers();
        info!("Polling {} customer sensors", customers.len());

        let progress = ProgressBar::new(customers.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")?
                .progress_chars("=> "),
        );

        let mut results = Vec::with_capacity(customers.len());
        for customer in customers {
            progress.set_message(customer.name.clone());

            let report = match self.sensor_client.read_pm25(&customer.api_url).await {
                Ok(pm25) => Some(AirQualityReport::from_pm25(pm25)),
                Err(e) => {
                    warn!("Reading for customer {} failed: {}", customer.id, e);
                    None
                },
            };

            results.push(PollResult {
                customer_name: customer.name.clone(),
                sensor_name: customer.sensor_label(),
                report,
                fetched_at: Utc::now(),
            });
            progress.inc(1);
        }

        progress.finish_and_clear();
        Ok(results)
    }

    fn list_customers(&self) {
        if self.directory.is_empty() {
            println!("{}", "No customers registered.".yellow());
            return;
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["ID", "Name", "Sensor", "Location", "API URL"]);

        for customer in self.directory.customers() {
            table.add_row(vec![
                customer.id.to_string(),
                customer.name.clone(),
                customer.sensor_label(),
                customer.sensor_location.clone().unwrap_or_default(),
                customer.api_url.clone(),
            ]);
        }

        println!("{table}");
    }
}

fn convert(pm25: f64, full_scale: bool) -> Result<()> {
    let aqi = if full_scale {
        pm25_to_aqi_epa(pm25).ok_or_else(|| {
            AppError::Cli(format!(
                "{} µg/m³ is outside the EPA table (0.0 to 500.4)",
                pm25
            ))
        })?
    } else {
        pm25_to_aqi(pm25)
    };

    println!("PM2.5 {} µg/m³ -> AQI {}", pm25, aqi.to_string().bold());
    Ok(())
}

fn invert(aqius: f64) -> Result<()> {
    let pm25 = aqius_to_pm25(aqius).ok_or_else(|| {
        AppError::Cli(format!("AQI {} does not fall in any breakpoint range", aqius))
    })?;

    println!("US AQI {} -> PM2.5 ~{:.2} µg/m³", aqius, pm25);
    Ok(())
}

fn colored_label(label: HealthLabel) -> ColoredString {
    match label {
        HealthLabel::Good => label.to_string().green(),
        HealthLabel::Moderate => label.to_string().yellow(),
        HealthLabel::Unhealthy => label.to_string().red(),
    }
}

fn print_report(vendor: Vendor, report: &AirQualityReport) {
    println!("Sensor: {}", vendor);
    println!("------------------------------------------");
    println!("PM2.5: {:.2} µg/m³", report.pm25);
    println!("AQI: {}", report.aqi);
    println!("Cigarettes per day: {:.2}", report.cigars);
    println!("Health: {}", colored_label(report.health_label));
}

fn print_poll_table(results: &[PollResult]) {
    if results.is_empty() {
        println!("{}", "No customers registered.".yellow());
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Customer",
        "Sensor",
        "PM2.5",
        "AQI",
        "Cigarettes/day",
        "Health",
        "Fetched at",
    ]);

    for result in results {
        let fetched_at = result.fetched_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();
        let row = match &result.report {
            Some(report) => vec![
                result.customer_name.clone(),
                result.sensor_name.clone(),
                format!("{:.2}", report.pm25),
                report.aqi.to_string(),
                format!("{:.2}", report.cigars),
                report.health_label.to_string(),
                fetched_at,
            ],
            None => vec![
                result.customer_name.clone(),
                result.sensor_name.clone(),
                "-".to_string(),
                Sentinel::ReadingFailed.code().to_string(),
                "-".to_string(),
                "unavailable".to_string(),
                fetched_at,
            ],
        };
        table.add_row(row);
    }

    println!("{table}");
}

/// Prompts for a sensor API URL.
pub fn prompt_url() -> Result<String> {
    let url: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Sensor API URL")
        .interact_text()?;
    Ok(url.trim().to_string())
}

/// Prompts for a customer access key; an empty answer means "no key".
pub fn prompt_key() -> Result<Option<String>> {
    let key: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Customer access key")
        .allow_empty(true)
        .interact_text()?;
    let key = key.trim();
    Ok((!key.is_empty()).then(|| key.to_string()))
}

/// Prompts for a number.
pub fn prompt_number(prompt: &str) -> Result<f64> {
    let value: f64 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Customer;
    use mockito::Server;
    use serde_json::json;

    fn customer(id: i64, password: &str, api_url: String, sensor_name: Option<&str>) -> Customer {
        Customer {
            id,
            name: format!("Customer {}", id),
            password: password.to_string(),
            api_url,
            email: None,
            phone_number: None,
            sensor_location: Some("Lobby".to_string()),
            sensor_name: sensor_name.map(str::to_string),
            notes: None,
        }
    }

    fn app_with(customers: Vec<Customer>) -> App {
        App::with_parts(
            SensorClient::new(None).unwrap(),
            CustomerDirectory::new(customers),
        )
    }

    #[tokio::test]
    async fn test_sensor_data_missing_key() {
        let app = app_with(vec![]);
        assert_eq!(app.sensor_data(None).await.aqi(), -3);
        assert_eq!(app.sensor_data(Some("")).await.aqi(), -3);
    }

    #[tokio::test]
    async fn test_sensor_data_unknown_customer() {
        let app = app_with(vec![customer(
            1,
            "known",
            "http://127.0.0.1:1/airgradient.com".to_string(),
            None,
        )]);
        assert_eq!(
            app.sensor_data(Some("unknown")).await,
            SensorDataResponse::Sentinel { aqi: -2 }
        );
    }

    #[tokio::test]
    async fn test_sensor_data_reading_failure() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/purpleair.com/v1/sensors/1")
            .with_status(500)
            .create_async()
            .await;

        let url = format!("{}/purpleair.com/v1/sensors/1", server.url());
        let app = app_with(vec![customer(1, "key", url, Some("PurpleAir"))]);

        assert_eq!(
            app.sensor_data(Some("key")).await,
            SensorDataResponse::Sentinel { aqi: -1 }
        );
    }

    #[tokio::test]
    async fn test_sensor_data_uses_stored_sensor_name() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/purpleair.com/v1/sensors/1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "sensor": { "pm2.5": 10 } }).to_string())
            .create_async()
            .await;

        let url = format!("{}/purpleair.com/v1/sensors/1", server.url());
        let app = app_with(vec![customer(7, "key", url, Some("Rooftop PA-II"))]);

        let response = app.sensor_data(Some("key")).await;
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "customer_id": 7,
                "aqi": 41,
                "pm25": 10.0,
                "sensor_name": "Rooftop PA-II",
                "cigars": 0.82,
                "health_label": "good",
            })
        );
    }

    #[tokio::test]
    async fn test_sensor_data_falls_back_to_vendor_label() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/airgradient.com/current")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "pm02": 0 }).to_string())
            .create_async()
            .await;

        let url = format!("{}/airgradient.com/current", server.url());
        let app = app_with(vec![customer(3, "key", url, None)]);

        match app.sensor_data(Some("key")).await {
            SensorDataResponse::Reading(reading) => {
                assert_eq!(reading.sensor_name, "AirGradient");
                // A zero score is reported as 1.
                assert_eq!(reading.aqi, 1);
                assert_eq!(reading.health_label, HealthLabel::Good);
            },
            other => panic!("Expected a reading, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_poll_all_reports_each_customer() -> Result<()> {
        let mut server = Server::new_async().await;
        let _ok = server
            .mock("GET", "/airgradient.com/ok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "pm02": 40 }).to_string())
            .create_async()
            .await;
        let _broken = server
            .mock("GET", "/airgradient.com/broken")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let app = app_with(vec![
            customer(1, "a", format!("{}/airgradient.com/ok", server.url()), None),
            customer(2, "b", format!("{}/airgradient.com/broken", server.url()), None),
        ]);

        let results = app.poll_all().await?;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].customer_name, "Customer 1");
        assert_eq!(results[0].sensor_name, "AirGradient");
        assert_eq!(results[0].report.as_ref().map(|r| r.aqi), Some(100));
        assert!(results[1].report.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_app_starts_with_malformed_customer_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"[{\"id\": \"not-a-number\"").unwrap();

        let config = Config {
            customers_file: file.path().to_path_buf(),
            sensor_timeout: None,
            log_dir: None,
        };
        let app = App::new(&config)?;

        assert!(app.directory.is_empty());
        assert_eq!(app.sensor_data(Some("any")).await.aqi(), -2);
        app.run_command(Commands::Convert(ConvertArgs {
            pm25: 10.0,
            full_scale: false,
        }))
        .await?;

        Ok(())
    }

    #[test]
    fn test_convert_and_invert() {
        assert!(convert(10.0, false).is_ok());
        assert!(convert(40.0, true).is_ok());
        assert!(matches!(convert(600.0, true), Err(AppError::Cli(_))));
        assert!(invert(75.0).is_ok());
        assert!(matches!(invert(-1.0), Err(AppError::Cli(_))));
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["aqi-dashboard", "convert", "--pm25", "12.5", "--full-scale"])
            .unwrap();
        match cli.command {
            Some(Commands::Convert(args)) => {
                assert_eq!(args.pm25, 12.5);
                assert!(args.full_scale);
            },
            other => panic!("Expected convert, got {:?}", other),
        }

        let cli = Cli::try_parse_from(["aqi-dashboard", "sensor-data"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::SensorData(SensorDataArgs { key: None }))
        ));

        let cli = Cli::try_parse_from(["aqi-dashboard"]).unwrap();
        assert!(cli.command.is_none());
    }
}
