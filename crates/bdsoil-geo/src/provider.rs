//! Geocoding providers.
//!
//! Two provider roles:
//!
//! - [`ReverseGeocoder`]: coordinates to a single address string
//!   (Nominatim in production).
//! - [`ForwardGeocoder`]: no input to coordinates plus address, from the
//!   caller's network location (ipapi.co, then ipinfo.io).
//!
//! The traits use return-position `impl Future + Send` so the resolver can
//! run providers inside spawned debounce tasks. Production forward
//! providers are dispatched through the [`ForwardBackend`] enum so the
//! fallback chain is a plain `Vec` of one concrete type.

use std::future::Future;
use std::time::Duration;

use bdsoil_types::GeoLocation;
use serde::Deserialize;

use crate::error::GeoError;

/// Resolves coordinates to a human-readable address.
pub trait ReverseGeocoder: Send + Sync + 'static {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Look up the address at a coordinate pair.
    fn reverse(&self, lat: f64, lng: f64)
    -> impl Future<Output = Result<String, GeoError>> + Send;
}

/// Resolves the caller's current location with no input.
pub trait ForwardGeocoder: Send + Sync + 'static {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Look up the current location.
    fn locate(&self) -> impl Future<Output = Result<GeoLocation, GeoError>> + Send;
}

/// Endpoints and client settings for the HTTP providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Nominatim reverse endpoint.
    pub reverse_url: String,
    /// First forward provider (ipapi.co payload shape).
    pub primary_forward_url: String,
    /// Second forward provider (ipinfo.io payload shape).
    pub secondary_forward_url: String,
    /// User agent sent with every request. Nominatim rejects anonymous clients.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

fn http_client(config: &ProviderConfig) -> Result<reqwest::Client, GeoError> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .build()
        .map_err(|e| GeoError::Client(e.to_string()))
}

/// GET a URL and decode the JSON body, failing on any non-success status.
async fn get_json<T>(
    request: reqwest::RequestBuilder,
    provider: &'static str,
) -> Result<T, GeoError>
where
    T: for<'de> Deserialize<'de>,
{
    let failed = |message: String| GeoError::Provider { provider, message };

    let response = request
        .send()
        .await
        .map_err(|e| failed(format!("request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(failed(format!("returned {status}")));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| failed(format!("response parse failed: {e}")))
}

/// Join address parts with `, `, dropping blank parts and stray separators.
pub fn join_address(parts: &[Option<&str>]) -> String {
    let joined = parts
        .iter()
        .flatten()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    joined
        .trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_owned()
}

/// Coordinates as `lat, lng` text, used wherever an address is unavailable.
pub fn coords_fallback(lat: f64, lng: f64) -> String {
    format!("{lat}, {lng}")
}

// ---------------------------------------------------------------------------
// Nominatim (reverse)
// ---------------------------------------------------------------------------

/// Reverse geocoder backed by an OpenStreetMap Nominatim endpoint.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct NominatimReply {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl NominatimClient {
    /// Create a client for the configured reverse endpoint.
    pub fn new(config: &ProviderConfig) -> Result<Self, GeoError> {
        Ok(Self {
            client: http_client(config)?,
            url: config.reverse_url.clone(),
        })
    }
}

impl ReverseGeocoder for NominatimClient {
    fn name(&self) -> &'static str {
        "nominatim"
    }

    async fn reverse(&self, lat: f64, lng: f64) -> Result<String, GeoError> {
        let request = self.client.get(&self.url).query(&[
            ("format", "jsonv2".to_owned()),
            ("lat", lat.to_string()),
            ("lon", lng.to_string()),
        ]);
        let reply: NominatimReply = get_json(request, "nominatim").await?;
        address_from_nominatim(reply)
    }
}

fn address_from_nominatim(reply: NominatimReply) -> Result<String, GeoError> {
    match reply.display_name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(GeoError::Provider {
            provider: "nominatim",
            message: reply.error.unwrap_or_else(|| "no address found".to_owned()),
        }),
    }
}

// ---------------------------------------------------------------------------
// ipapi.co (forward, primary)
// ---------------------------------------------------------------------------

/// Forward geocoder using the ipapi.co payload shape.
#[derive(Debug, Clone)]
pub struct IpApiClient {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct IpApiReply {
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    country_name: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

impl IpApiClient {
    /// Create a client for the configured primary forward endpoint.
    pub fn new(config: &ProviderConfig) -> Result<Self, GeoError> {
        Ok(Self {
            client: http_client(config)?,
            url: config.primary_forward_url.clone(),
        })
    }

    async fn locate(&self) -> Result<GeoLocation, GeoError> {
        let reply: IpApiReply = get_json(self.client.get(&self.url), "ipapi").await?;
        location_from_ipapi(reply)
    }
}

fn location_from_ipapi(reply: IpApiReply) -> Result<GeoLocation, GeoError> {
    let (Some(lat), Some(lng)) = (reply.latitude, reply.longitude) else {
        return Err(GeoError::Provider {
            provider: "ipapi",
            message: reply
                .reason
                .unwrap_or_else(|| "response has no coordinates".to_owned()),
        });
    };
    let address = join_address(&[
        reply.city.as_deref(),
        reply.region.as_deref(),
        reply.country_name.as_deref(),
    ]);
    Ok(GeoLocation {
        lat,
        lng,
        address: if address.is_empty() {
            coords_fallback(lat, lng)
        } else {
            address
        },
    })
}

// ---------------------------------------------------------------------------
// ipinfo.io (forward, secondary)
// ---------------------------------------------------------------------------

/// Forward geocoder using the ipinfo.io payload shape, where coordinates
/// arrive as a single `"lat,lng"` string.
#[derive(Debug, Clone)]
pub struct IpInfoClient {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct IpInfoReply {
    #[serde(default)]
    loc: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl IpInfoClient {
    /// Create a client for the configured secondary forward endpoint.
    pub fn new(config: &ProviderConfig) -> Result<Self, GeoError> {
        Ok(Self {
            client: http_client(config)?,
            url: config.secondary_forward_url.clone(),
        })
    }

    async fn locate(&self) -> Result<GeoLocation, GeoError> {
        let reply: IpInfoReply = get_json(self.client.get(&self.url), "ipinfo").await?;
        location_from_ipinfo(reply)
    }
}

fn location_from_ipinfo(reply: IpInfoReply) -> Result<GeoLocation, GeoError> {
    let bad_loc = |loc: &str| GeoError::Provider {
        provider: "ipinfo",
        message: format!("unusable loc field {loc:?}"),
    };
    let loc = reply.loc.unwrap_or_default();
    let (lat, lng) = loc.split_once(',').ok_or_else(|| bad_loc(&loc))?;
    let lat = lat.trim().parse::<f64>().map_err(|_| bad_loc(&loc))?;
    let lng = lng.trim().parse::<f64>().map_err(|_| bad_loc(&loc))?;

    let address = join_address(&[
        reply.city.as_deref(),
        reply.region.as_deref(),
        reply.country.as_deref(),
    ]);
    Ok(GeoLocation {
        lat,
        lng,
        address: if address.is_empty() {
            coords_fallback(lat, lng)
        } else {
            address
        },
    })
}

// ---------------------------------------------------------------------------
// Forward backend dispatch
// ---------------------------------------------------------------------------

/// A production forward provider.
#[derive(Debug, Clone)]
pub enum ForwardBackend {
    /// ipapi.co.
    IpApi(IpApiClient),
    /// ipinfo.io.
    IpInfo(IpInfoClient),
}

impl ForwardBackend {
    /// The production chain: ipapi.co first, then ipinfo.io.
    pub fn chain(config: &ProviderConfig) -> Result<Vec<Self>, GeoError> {
        Ok(vec![
            Self::IpApi(IpApiClient::new(config)?),
            Self::IpInfo(IpInfoClient::new(config)?),
        ])
    }
}

impl ForwardGeocoder for ForwardBackend {
    fn name(&self) -> &'static str {
        match self {
            Self::IpApi(_) => "ipapi",
            Self::IpInfo(_) => "ipinfo",
        }
    }

    async fn locate(&self) -> Result<GeoLocation, GeoError> {
        match self {
            Self::IpApi(client) => client.locate().await,
            Self::IpInfo(client) => client.locate().await,
        }
    }
}
