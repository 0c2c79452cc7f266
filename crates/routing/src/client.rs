use tracing::{debug, error, info};
use transport::{HttpRequest, HttpTransport};

use crate::config::RouteConfig;
use crate::error::RouteError;
use crate::wire::{RouteData, RouteRequest, ServiceHealth};

/// Issues route and health requests. One request per call: no retry, no
/// timeout, no cancellation.
#[derive(Debug)]
pub struct RouteClient<T> {
    transport: T,
    config: RouteConfig,
}

impl<T: HttpTransport> RouteClient<T> {
    pub fn new(transport: T, config: RouteConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn calculate(&self, request: &RouteRequest) -> Result<RouteData, RouteError> {
        let body = serde_json::to_string(request).map_err(|e| RouteError::Encode(e.to_string()))?;
        debug!(departure = %request.departure_time, "requesting route");

        let resp = self
            .transport
            .send(HttpRequest::post_json(self.config.endpoint.as_str(), body))
            .await
            .inspect_err(|err| error!(%err, "route request failed before a response"))?;

        if !resp.is_success() {
            let err = RouteError::from_status(resp.status, &resp.status_text, &resp.body);
            error!(status = resp.status, %err, body = %resp.body, "route service rejected request");
            return Err(err);
        }

        let route: RouteData = serde_json::from_str(&resp.body).map_err(|e| {
            error!(error = %e, "route response did not decode");
            RouteError::Decode(e.to_string())
        })?;
        info!(
            distance_km = route.properties.distance_km,
            travel_min = route.properties.predicted_travel_time_min,
            vertices = route.geometry.coordinates.len(),
            "route received"
        );
        Ok(route)
    }

    pub async fn health(&self) -> Result<ServiceHealth, RouteError> {
        let resp = self
            .transport
            .send(HttpRequest::get(self.config.health_endpoint.as_str()))
            .await?;
        if !resp.is_success() {
            return Err(RouteError::from_status(resp.status, &resp.status_text, &resp.body));
        }
        serde_json::from_str(&resp.body).map_err(|e| RouteError::Decode(e.to_string()))
    }
}
