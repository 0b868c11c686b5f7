use crate::{
    config::Config,
    error::{PipelineError, Stage},
    report,
    resolver::{
        DEFAULT_PASS_COUNT, GeoResolver, IpResolver, IpVigilanteClient, IpifyClient,
        OpenNotifyClient, PassTimeResolver,
    },
};

/// The sequential resolution chain: public IP → coordinates → pass times →
/// rendered report.
///
/// Each stage's output is the next stage's sole input and the chain
/// short-circuits on the first failure, tagging it with the stage it came
/// from. There is no shared state across invocations, so one `Pipeline` can
/// serve concurrent callers.
#[derive(Debug)]
pub struct Pipeline {
    ip: Box<dyn IpResolver>,
    geo: Box<dyn GeoResolver>,
    passes: Box<dyn PassTimeResolver>,
}

impl Pipeline {
    pub fn new(
        ip: Box<dyn IpResolver>,
        geo: Box<dyn GeoResolver>,
        passes: Box<dyn PassTimeResolver>,
    ) -> Self {
        Self { ip, geo, passes }
    }

    /// Wire up the real upstream clients, honoring endpoint overrides.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Box::new(IpifyClient::with_endpoint(config.endpoints.ip_echo.clone())),
            Box::new(IpVigilanteClient::with_endpoint(config.endpoints.geolocation.clone())),
            Box::new(OpenNotifyClient::with_endpoint(config.endpoints.pass_times.clone())),
        )
    }

    /// Run the full chain and format the result.
    ///
    /// `count` bounds the number of passes requested upstream and defaults
    /// to [`DEFAULT_PASS_COUNT`].
    pub async fn visibility_report(&self, count: Option<u32>) -> Result<String, PipelineError> {
        let count = count.unwrap_or(DEFAULT_PASS_COUNT);

        let ip = self
            .ip
            .fetch_my_ip()
            .await
            .map_err(|e| e.at(Stage::ResolveIp))?;
        log::debug!("resolved public IP {ip}");

        let location = self
            .geo
            .fetch_coords(&ip)
            .await
            .map_err(|e| e.at(Stage::ResolveLocation))?;
        log::debug!(
            "resolved location lat {} lon {}",
            location.latitude,
            location.longitude
        );

        let passes = self
            .passes
            .fetch_pass_times(&location, count)
            .await
            .map_err(|e| e.at(Stage::ResolvePassTimes))?;
        log::debug!("resolved {} pass windows", passes.len());

        report::render(&ip, &location, &passes).map_err(|e| e.at(Stage::Format))
    }
}
