use anyhow::Context;
use clap::{Parser, Subcommand};
use iss_core::{
    Config, GeoResolver as _, IpResolver as _, Pipeline,
    resolver::{IpVigilanteClient, IpifyClient},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "iss", version, about = "When will the ISS pass over you?")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve your location from your public IP and list upcoming ISS passes.
    Report {
        /// How many passes to request (defaults to the configured count).
        #[arg(short = 'n', long)]
        count: Option<u32>,
    },

    /// Print your public IPv4 address.
    Ip,

    /// Geolocate a given IPv4 address.
    Locate {
        /// Dotted-quad IPv4 address, e.g. "8.8.8.8".
        ip: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load().context("Could not load configuration")?;

        match self.command {
            Command::Report { count } => {
                let pipeline = Pipeline::from_config(&config);
                let count = count.unwrap_or(config.default_count);

                let report = pipeline.visibility_report(Some(count)).await?;
                print!("{report}");
            }
            Command::Ip => {
                let client = IpifyClient::with_endpoint(config.endpoints.ip_echo.clone());
                let ip = client.fetch_my_ip().await?;
                println!("{ip}");
            }
            Command::Locate { ip } => {
                let client =
                    IpVigilanteClient::with_endpoint(config.endpoints.geolocation.clone());
                let location = client.fetch_coords(&ip).await?;

                let city = location.city.as_deref().unwrap_or("unknown");
                let country = location.country.as_deref().unwrap_or("unknown");
                println!(
                    "{city}, {country} (latitude {}, longitude {})",
                    location.latitude, location.longitude
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_parses_short_and_long_count() {
        let cli = Cli::parse_from(["iss", "report", "-n", "3"]);
        match cli.command {
            Command::Report { count } => assert_eq!(count, Some(3)),
            other => panic!("expected Report, got {other:?}"),
        }

        let cli = Cli::parse_from(["iss", "report", "--count", "7"]);
        assert!(matches!(cli.command, Command::Report { count: Some(7) }));
    }

    #[test]
    fn report_count_is_optional() {
        let cli = Cli::parse_from(["iss", "report"]);
        assert!(matches!(cli.command, Command::Report { count: None }));
    }

    #[test]
    fn locate_takes_a_positional_address() {
        let cli = Cli::parse_from(["iss", "locate", "8.8.8.8"]);
        match cli.command {
            Command::Locate { ip } => assert_eq!(ip, "8.8.8.8"),
            other => panic!("expected Locate, got {other:?}"),
        }
    }
}
