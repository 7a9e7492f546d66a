//! The Herbal Chicken storefront.
//!
//! Streams the storefront page shell-first:
//! - Header, category row and a skeleton product grid in the shell
//! - Banners, products and offers loaded concurrently and filled into
//!   their slots as each one settles
//! - A browser-side session cart driven by the product "Add" buttons
//! - `?fragment=products`: only the product grid, fetched by the in-page
//!   category switch so the page and its cart stay loaded

pub mod app;
pub mod page;
pub mod sections;

use futures::SinkExt;
use spin_sdk::http::{Fields, IncomingRequest, Method, OutgoingResponse, ResponseOutparam};
use spin_sdk::http_component;

use herbal_sdk::herbal_core::{
    Method as HttpMethod, RenderError, RequestContext, RequestId, StoreConfig,
};
use herbal_sdk::herbal_data::{ApiClient, SpinTransport};
use herbal_sdk::herbal_observability::{install_tracing, MetricsCollector, StructuredLogger};
use herbal_sdk::herbal_streaming::StreamingSink;

use app::{resolve_category, Storefront};
use page::View;

const WORKLOAD: &str = "herbal-storefront";

#[http_component]
async fn handle(req: IncomingRequest, response_out: ResponseOutparam) {
    let path = req.path_with_query().unwrap_or_else(|| "/".to_string());

    let method = req.method();
    if !matches!(method, Method::Get) {
        let logger = StructuredLogger::new(RequestId::generate())
            .with_workload(WORKLOAD)
            .with_route(&path);
        logger
            .warn_builder("method not allowed")
            .field("method", format!("{:?}", method))
            .emit();
        if let Err(e) = respond_empty(response_out, 405, &[("allow", "GET")]).await {
            logger
                .error_builder("failed to send 405")
                .field("error", e.to_string())
                .emit();
        }
        return;
    }

    let ctx = RequestContext::new(HttpMethod::GET, &path);
    let request_id = ctx.request_id.clone();

    let (config, config_error) = match StoreConfig::from_env() {
        Ok(config) => (config, None),
        Err(e) => (StoreConfig::default(), Some(e)),
    };

    let logger = StructuredLogger::new(request_id.clone())
        .with_workload(WORKLOAD)
        .with_route(&ctx.path)
        .configured(&config.log_level, &config.log_format);
    install_tracing(logger.min_level(), logger.format());

    let mut metrics = MetricsCollector::new(request_id.clone());
    metrics.set_workload(WORKLOAD);
    metrics.set_route(&ctx.path);

    if let Some(e) = config_error {
        logger
            .error_builder("invalid configuration, using defaults")
            .field("error", e.to_string())
            .emit();
    }

    let Some(view) = View::from_query(ctx.query_param("fragment")) else {
        logger
            .warn_builder("unknown fragment")
            .field("fragment", ctx.query_param("fragment").unwrap_or_default())
            .emit();
        if let Err(e) = respond_empty(response_out, 404, &[]).await {
            logger
                .error_builder("failed to send 404")
                .field("error", e.to_string())
                .emit();
        }
        return;
    };

    let (category, category_error) = resolve_category(ctx.query_param("category"), &config);
    if let Some(e) = category_error {
        logger
            .warn_builder("unknown category, using default")
            .field("error", e.to_string())
            .field("category", category.name())
            .emit();
    }

    logger
        .info_builder("storefront request started")
        .field("category", category.name())
        .field("view", format!("{:?}", view))
        .emit();

    let response = match html_response(&request_id) {
        Ok(response) => response,
        Err(e) => {
            logger
                .error_builder("failed to build response")
                .field("error", e.to_string())
                .emit();
            return;
        }
    };
    let mut body = response.take_body();
    response_out.set(response);

    let store = Storefront::from_config(&config, category);
    let client = ApiClient::from_config(&config, SpinTransport);

    let result = match view {
        View::Page => {
            let mut sink = StreamingSink::new(body);
            page::stream_page(
                &store,
                &client,
                &mut sink,
                sections::current_year(),
                &logger,
                &mut metrics,
            )
            .await
        }
        View::ProductsFragment => {
            let html = page::products_fragment(&store, &client, &logger, &mut metrics).await;
            send_fragment(&mut body, html).await
        }
    };

    match result {
        Ok(()) => {
            let report = metrics.finalize(Some(200));
            logger
                .info_builder("storefront request complete")
                .field_u64("total_us", report.total_duration_us)
                .emit();
            logger.debug(&report.to_json());
        }
        Err(e) => logger
            .error_builder("streaming failed")
            .field("error", e.to_string())
            .emit(),
    }
}

/// 200 response headers for the streamed page.
fn html_response(request_id: &RequestId) -> anyhow::Result<OutgoingResponse> {
    let headers = Fields::from_list(&[
        (
            "content-type".to_owned(),
            b"text/html; charset=utf-8".to_vec(),
        ),
        ("x-request-id".to_owned(), request_id.to_string().into_bytes()),
    ])
    .map_err(|e| anyhow::anyhow!("invalid headers: {:?}", e))?;

    let response = OutgoingResponse::new(headers);
    response
        .set_status_code(200)
        .map_err(|()| anyhow::anyhow!("invalid status code"))?;
    Ok(response)
}

/// Write the product grid as the whole body and close it.
async fn send_fragment<S>(body: &mut S, html: String) -> Result<(), RenderError>
where
    S: futures::Sink<Vec<u8>> + Unpin,
    S::Error: std::fmt::Display,
{
    body.send(html.into_bytes())
        .await
        .map_err(|e| RenderError::StreamError(e.to_string()))?;
    body.close()
        .await
        .map_err(|e| RenderError::StreamError(e.to_string()))
}

/// Respond with `status`, the given headers and an empty body.
async fn respond_empty(
    response_out: ResponseOutparam,
    status: u16,
    headers: &[(&str, &str)],
) -> anyhow::Result<()> {
    let fields: Vec<(String, Vec<u8>)> = headers
        .iter()
        .map(|(name, value)| (name.to_string(), value.as_bytes().to_vec()))
        .collect();
    let headers = Fields::from_list(&fields)
        .map_err(|e| anyhow::anyhow!("invalid headers: {:?}", e))?;
    let response = OutgoingResponse::new(headers);
    response
        .set_status_code(status)
        .map_err(|()| anyhow::anyhow!("invalid status code"))?;

    let mut body = response.take_body();
    response_out.set(response);
    body.close()
        .await
        .map_err(|e| anyhow::anyhow!("closing body: {}", e))?;
    Ok(())
}
