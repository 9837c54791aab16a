use actix_web::error::JsonPayloadError;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer};
use actix_cors::Cors;
use netpath_core::{Network, NewHost, NewLink, Rule, Violations};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::info;

use crate::ApiError;

/// Network store shared between actix workers. The lock is the only
/// serialization point: reads take it shared, mutations exclusively.
pub type SharedNetwork = Arc<RwLock<Network>>;

type ApiResult = Result<HttpResponse, ApiError>;

pub struct RestApi;

impl RestApi {
    pub async fn start(
        network: SharedNetwork,
        bind: &str,
        port: u16,
    ) -> std::io::Result<()> {
        info!("Binding HTTP API to {}:{}", bind, port);

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .wrap(middleware::Logger::default())
                .app_data(web::Data::new(network.clone()))
                .configure(RestApi::configure)
        })
        .bind((bind, port))?
        .run()
        .await
    }

    /// Register the routes. Expects a `web::Data<SharedNetwork>` on the app.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.route("/hosts", web::get().to(list_hosts))
            .route("/host", web::post().to(add_host))
            .route("/link", web::post().to(add_link))
            .route("/links", web::get().to(list_links))
            .route("/path/{source}/to/{target}", web::get().to(find_path))
            .default_service(web::to(route_not_found));
    }
}

fn added() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "added"
    }))
}

async fn list_hosts(network: web::Data<SharedNetwork>) -> HttpResponse {
    let hosts = network.read().hosts();
    HttpResponse::Ok().json(hosts)
}

/// Decode a request record from a raw body.
///
/// An empty body reads as an empty record and `null` as no record at all.
/// Anything else must be a JSON object; field shapes are left to the store's
/// validation. Only bytes that do not parse as JSON are a payload error.
fn parse_record<T: DeserializeOwned + Default>(body: &[u8]) -> Result<Option<T>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Some(T::default()));
    }

    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(JsonPayloadError::Deserialize)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Object(_) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| ApiError::from(JsonPayloadError::Deserialize(e))),
        _ => Err(netpath_core::Error::ValidationFailed(Violations::single(
            "value",
            Rule::NotObject,
        ))
        .into()),
    }
}

async fn add_host(network: web::Data<SharedNetwork>, body: web::Bytes) -> ApiResult {
    let host: Option<NewHost> = parse_record(&body)?;
    network.write().add_host(host.as_ref())?;
    Ok(added())
}

async fn add_link(network: web::Data<SharedNetwork>, body: web::Bytes) -> ApiResult {
    let link: Option<NewLink> = parse_record(&body)?;
    network.write().add_link(link.as_ref())?;
    Ok(added())
}

async fn list_links(network: web::Data<SharedNetwork>) -> HttpResponse {
    let links = network.read().links();
    HttpResponse::Ok().json(links)
}

async fn find_path(
    network: web::Data<SharedNetwork>,
    path: web::Path<(String, String)>,
) -> ApiResult {
    let (source, target) = path.into_inner();
    let hops = network.read().path(Some(source.as_str()), Some(target.as_str()))?;
    Ok(HttpResponse::Ok().json(hops))
}

async fn route_not_found(req: HttpRequest) -> ApiResult {
    Err(ApiError::RouteNotFound {
        method: req.method().to_string(),
        path: req.path().to_string(),
    })
}
