//! Request/response shapes of the consumed services.
//!
//! Every reply carries `ok`; on `ok: false` an optional `error` message
//! explains why. Decoding maps both transport and application failures to
//! [`ServiceError`].

use crate::error::ServiceError;
use crate::points::CalibrationPoint;
use crate::selection::WireHemisphere;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const UPLOAD_PATH: &str = "/upload";
pub const RENDER_PATH: &str = "/render";
pub const SEGMENT_PATH: &str = "/segment";
pub const FORECAST_PATH: &str = "/forecast";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderRequest {
    pub upload_id: String,
    pub azimuth: i32,
    pub zenith: i32,
    pub roll: i32,
    pub hemisphere: WireHemisphere,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SegmentRequest {
    pub upload_id: String,
    pub points: Vec<CalibrationPoint>,
    pub hemisphere: WireHemisphere,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ForecastRequest {
    pub upload_id: String,
    pub azimuth: i32,
    pub zenith: i32,
    pub roll: i32,
    pub points: Vec<CalibrationPoint>,
    pub hemisphere: WireHemisphere,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadAccepted {
    pub upload_id: String,
    pub upload_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedView {
    pub view_id: String,
    pub view_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkyMask {
    pub sky_url: String,
    pub sky_id: Option<String>,
}

/// A reply envelope that can be turned into its success payload.
pub trait Reply: DeserializeOwned {
    type Output;
    fn into_result(self) -> Result<Self::Output, ServiceError>;
}

fn rejected(error: Option<String>, what: &str) -> ServiceError {
    ServiceError::Rejected(error.unwrap_or_else(|| format!("{what} failed")))
}

fn required(field: Option<String>, name: &str) -> Result<String, ServiceError> {
    field.ok_or_else(|| ServiceError::Malformed(format!("missing {name}")))
}

#[derive(Clone, Debug, Deserialize)]
pub struct UploadReply {
    pub ok: bool,
    #[serde(default)]
    pub upload_id: Option<String>,
    #[serde(default)]
    pub upload_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Reply for UploadReply {
    type Output = UploadAccepted;

    fn into_result(self) -> Result<UploadAccepted, ServiceError> {
        if !self.ok {
            return Err(rejected(self.error, "Upload"));
        }
        Ok(UploadAccepted {
            upload_id: required(self.upload_id, "upload_id")?,
            upload_url: required(self.upload_url, "upload_url")?,
        })
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RenderReply {
    pub ok: bool,
    #[serde(default)]
    pub view_id: Option<String>,
    #[serde(default)]
    pub view_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Reply for RenderReply {
    type Output = RenderedView;

    fn into_result(self) -> Result<RenderedView, ServiceError> {
        if !self.ok {
            return Err(rejected(self.error, "Render"));
        }
        Ok(RenderedView {
            view_id: required(self.view_id, "view_id")?,
            view_url: self.view_url,
        })
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct SegmentReply {
    pub ok: bool,
    #[serde(default)]
    pub sky_url: Option<String>,
    #[serde(default)]
    pub sky_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Reply for SegmentReply {
    type Output = SkyMask;

    fn into_result(self) -> Result<SkyMask, ServiceError> {
        if !self.ok {
            return Err(rejected(self.error, "Segmentation"));
        }
        Ok(SkyMask {
            sky_url: required(self.sky_url, "sky_url")?,
            sky_id: self.sky_id,
        })
    }
}

/// Forecast payload is opaque to the engine.
#[derive(Clone, Debug, Deserialize)]
pub struct ForecastReply {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Reply for ForecastReply {
    type Output = serde_json::Value;

    fn into_result(self) -> Result<serde_json::Value, ServiceError> {
        if !self.ok {
            return Err(rejected(self.error, "Forecast"));
        }
        Ok(self.result.unwrap_or(serde_json::Value::Null))
    }
}

/// Decode a raw HTTP reply. A JSON body wins over the status code so that
/// `{ok: false, error}` messages on 4xx/5xx are preserved; a non-JSON body
/// falls back to the status.
pub fn decode<R: Reply>(status: u16, body: &str) -> Result<R::Output, ServiceError> {
    match serde_json::from_str::<R>(body) {
        Ok(reply) => {
            let out = reply.into_result();
            match out {
                Ok(_) if status >= 400 => Err(ServiceError::Http(status)),
                other => other,
            }
        }
        Err(_) if status >= 400 => Err(ServiceError::Http(status)),
        Err(e) => Err(ServiceError::Malformed(e.to_string())),
    }
}

pub fn encode<T: Serialize>(request: &T) -> Result<String, ServiceError> {
    serde_json::to_string(request).map_err(|e| ServiceError::Malformed(e.to_string()))
}

/// Append a cache-busting query so a reused URL is fetched again.
pub fn cache_busted(url: &str, stamp: u64) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}v={stamp}")
}
