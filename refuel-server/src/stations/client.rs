//! Spanish Ministry fuel price feed client.
//!
//! The feed lists every road fuel station in Spain with its current prices.
//! Field names are in Spanish and numbers use a comma decimal separator, so
//! the DTOs keep everything as text and conversion happens separately.

use serde::{Deserialize, Serialize};

use super::error::StationError;

/// Default URL of the land station price list.
const DEFAULT_BASE_URL: &str = "https://sedeaplicaciones.minetur.gob.es/ServiciosRESTCarburantes/PreciosCarburantes/EstacionesTerrestres/";

/// Full feed response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedDto {
    /// Publication time, `dd/mm/yyyy HH:MM:SS` (Spanish local time).
    #[serde(rename = "Fecha", default)]
    pub published: String,

    #[serde(rename = "ListaEESSPrecio", default)]
    pub stations: Vec<StationDto>,

    /// `OK` on success.
    #[serde(rename = "ResultadoConsulta", default)]
    pub result: String,
}

/// One station record, as published.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationDto {
    #[serde(rename = "IDEESS", default)]
    pub id: String,
    #[serde(rename = "Rótulo", default)]
    pub brand: String,
    #[serde(rename = "Latitud", default)]
    pub latitude: String,
    #[serde(rename = "Longitud (WGS84)", default)]
    pub longitude: String,
    #[serde(rename = "Precio Gasolina 95 E5", default)]
    pub gasoline_95_e5: String,
    #[serde(rename = "Precio Gasolina 98 E5", default)]
    pub gasoline_98_e5: String,
    #[serde(rename = "Precio Gasoleo A", default)]
    pub diesel_a: String,
    #[serde(rename = "Precio Gasoleo Premium", default)]
    pub diesel_premium: String,
    #[serde(rename = "Precio Gases licuados del petróleo", default)]
    pub lpg: String,
    #[serde(rename = "Horario", default)]
    pub opening_hours: String,
    #[serde(rename = "Dirección", default)]
    pub address: String,
    #[serde(rename = "Localidad", default)]
    pub locality: String,
    #[serde(rename = "Provincia", default)]
    pub province: String,
}

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct StationClientConfig {
    /// Feed URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StationClientConfig {
    /// Create a config for the public feed.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 60,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for StationClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the fuel price feed.
#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    base_url: String,
}

impl StationClient {
    /// Create a new feed client.
    pub fn new(config: StationClientConfig) -> Result<Self, StationError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the whole feed.
    pub async fn fetch_feed(&self) -> Result<FeedDto, StationError> {
        let response = self.http.get(&self.base_url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_feed(&body)
    }
}

/// Parse a feed body.
pub fn parse_feed(body: &str) -> Result<FeedDto, StationError> {
    serde_json::from_str(body).map_err(|e| StationError::Json {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Fecha": "14/03/2025 10:25:41",
        "ListaEESSPrecio": [{
            "C.P.": "02250",
            "Dirección": "AVENIDA CASTILLA LA MANCHA, 26",
            "Horario": "L-D: 07:00-22:00",
            "Latitud": "39,211417",
            "Localidad": "ABENGIBRE",
            "Longitud (WGS84)": "-1,539167",
            "Precio Gasoleo A": "1,479",
            "Precio Gasoleo Premium": "",
            "Precio Gasolina 95 E5": "1,559",
            "Precio Gasolina 98 E5": "",
            "Precio Gases licuados del petróleo": "",
            "Provincia": "ALBACETE",
            "Rótulo": "Nº 10.935",
            "IDEESS": "4375"
        }],
        "Nota": "Archivo de todos los productos en todas las estaciones de servicio.",
        "ResultadoConsulta": "OK"
    }"#;

    #[test]
    fn config_defaults() {
        let config = StationClientConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_with_base_url() {
        let config = StationClientConfig::new()
            .with_base_url("http://localhost:8080")
            .with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn parse_sample_feed() {
        let feed = parse_feed(SAMPLE).unwrap();

        assert_eq!(feed.published, "14/03/2025 10:25:41");
        assert_eq!(feed.result, "OK");
        assert_eq!(feed.stations.len(), 1);

        let station = &feed.stations[0];
        assert_eq!(station.id, "4375");
        assert_eq!(station.brand, "Nº 10.935");
        assert_eq!(station.latitude, "39,211417");
        assert_eq!(station.longitude, "-1,539167");
        assert_eq!(station.diesel_a, "1,479");
        assert_eq!(station.lpg, "");
        assert_eq!(station.locality, "ABENGIBRE");
    }

    #[test]
    fn malformed_feed_is_json_error() {
        assert!(matches!(
            parse_feed("<html>maintenance</html>"),
            Err(StationError::Json { .. })
        ));
    }
}
