use crate::adapters::api::{self, ApiError, PlantGuideQuery, SolarTermQuery, STATUS_OK};
use crate::core::service::GuideService;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// API 閘道觸發事件中用得到的欄位。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

impl GatewayRequest {
    fn query(&self, key: &str) -> Option<String> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(key))
            .cloned()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub is_base64_encoded: bool,
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl GatewayResponse {
    fn json<T: Serialize>(status_code: u16, payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self::with_body(status_code, body),
            Err(e) => {
                tracing::error!("Failed to serialize response: {}", e);
                Self::from(ApiError::internal("Failed to serialize response"))
            }
        }
    }

    fn with_body(status_code: u16, body: String) -> Self {
        let headers = HashMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ]);

        Self {
            is_base64_encoded: false,
            status_code,
            headers,
            body,
        }
    }
}

impl From<ApiError> for GatewayResponse {
    fn from(err: ApiError) -> Self {
        Self::with_body(err.status, err.body().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Health,
    SolarTerm,
    PlantGuides,
}

impl Route {
    /// 以路徑最後一段判斷，例如 `/release/api/plantGuides`。
    pub fn from_path(path: &str) -> Option<Self> {
        let last_segment = path.trim_end_matches('/').rsplit('/').next()?;
        Self::from_name(last_segment)
    }

    /// 單一函數部署時以名稱固定路由。
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "health" => Some(Self::Health),
            "getSolarTerm" => Some(Self::SolarTerm),
            "plantGuides" => Some(Self::PlantGuides),
            _ => None,
        }
    }
}

/// 依事件路徑分派；`fixed_route` 優先於路徑。
pub async fn handle(
    service: &GuideService,
    request: &GatewayRequest,
    fixed_route: Option<Route>,
) -> GatewayResponse {
    let route = fixed_route.or_else(|| request.path.as_deref().and_then(Route::from_path));

    tracing::info!("Gateway request path={:?} route={:?}", request.path, route);

    match route {
        Some(Route::Health) => GatewayResponse::json(STATUS_OK, &api::health()),
        Some(Route::SolarTerm) => {
            let query = SolarTermQuery {
                date: request.query("date"),
            };
            match api::solar_term(service, &query) {
                Ok(response) => GatewayResponse::json(STATUS_OK, &response),
                Err(err) => err.into(),
            }
        }
        Some(Route::PlantGuides) => {
            let query = PlantGuideQuery {
                term: request.query("term"),
                season: request.query("season"),
                limit: request.query("limit"),
            };
            match api::plant_guides(service, &query).await {
                Ok(guides) => GatewayResponse::json(STATUS_OK, &guides),
                Err(err) => err.into(),
            }
        }
        None => ApiError::not_found("Unknown route").into(),
    }
}
