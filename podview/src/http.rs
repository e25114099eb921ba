//! The HTTP surface of the status page.
use std::net::SocketAddr;

use anyhow::Context as _;
use tracing::info;
use warp::{
    http::{
        header::{HeaderValue, CACHE_CONTROL, CONTENT_TYPE, EXPIRES, PRAGMA},
        Response,
    },
    Filter, Rejection, Reply,
};

use crate::{context::SharedContext, sections};

const TEXT_PLAIN: &str = "text/plain";
const TEXT_CSS: &str = "text/css";
const TEXT_JAVASCRIPT: &str = "text/javascript";
const TEXT_HTML: &str = "text/html";

fn reply_with(body: Vec<u8>, content_type: &'static str) -> Response<Vec<u8>> {
    let mut response = Response::new(body);
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

fn no_cache(mut response: Response<Vec<u8>>) -> Response<Vec<u8>> {
    let headers = response.headers_mut();
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));
    response
}

async fn data_handler(ctx: SharedContext) -> Response<Vec<u8>> {
    let sections = sections::assemble(&ctx).await;
    tracing::trace!("Assembled {} sections", sections.len());
    let body = ctx.renderer.data(
        &sections,
        &ctx.config.background_color,
        &ctx.config.foreground_color,
    );
    reply_with(body, TEXT_HTML)
}

/// All routes of the service. Only GET is accepted, and only the exact paths
/// are served: `/` is the page shell, not a catch-all, so unknown paths get 404.
pub fn routes(
    ctx: SharedContext,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let with_ctx = warp::any().map(move || ctx.clone());

    let health = warp::path("health")
        .and(warp::path::end())
        .map(|| reply_with(b"OK".to_vec(), TEXT_PLAIN));

    let style = warp::path("style")
        .and(warp::path::end())
        .and(with_ctx.clone())
        .map(|ctx: SharedContext| {
            let body = ctx
                .renderer
                .style(&ctx.config.background_color, &ctx.config.foreground_color);
            no_cache(reply_with(body, TEXT_CSS))
        });

    let script = warp::path("script")
        .and(warp::path::end())
        .and(with_ctx.clone())
        .map(|ctx: SharedContext| reply_with(ctx.renderer.script(), TEXT_JAVASCRIPT));

    let data = warp::path("data")
        .and(warp::path::end())
        .and(with_ctx.clone())
        .then(data_handler);

    let index = warp::path::end()
        .and(with_ctx)
        .map(|ctx: SharedContext| reply_with(ctx.renderer.index(&ctx.config.title), TEXT_HTML));

    warp::get()
        .and(health.or(style).or(script).or(data).or(index))
        .with(warp::trace::request())
}

/// Serve until Ctrl+C is received.
pub async fn serve(ctx: SharedContext) -> anyhow::Result<()> {
    let addr: SocketAddr = ([0, 0, 0, 0], ctx.config.port).into();

    let (addr, server) = warp::serve(routes(ctx))
        .try_bind_with_graceful_shutdown(addr, async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {:?}", err);
            }
        })
        .with_context(|| format!("Failed binding to {}", addr))?;

    info!("Starting status page server on {}", addr);
    server.await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use warp::http::StatusCode;

    use super::*;
    use crate::{config::Config, context::AppContext, render::Renderer};

    fn test_context() -> SharedContext {
        let config = Config::try_parse_from([
            "podview",
            "--hostname",
            "web-0",
            "--podinfo-path",
            "/nonexistent/podview/podinfo",
            "--background-color",
            "black",
            "--foreground-color",
            "lime",
        ])
        .unwrap();
        AppContext::new(config, Renderer::new().unwrap(), None).into_shared()
    }

    #[tokio::test]
    async fn test_health() {
        let res = warp::test::request()
            .path("/health")
            .reply(&routes(test_context()))
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[CONTENT_TYPE], "text/plain");
        assert_eq!(&res.body()[..], b"OK");
    }

    #[tokio::test]
    async fn test_style_is_not_cached() {
        let res = warp::test::request()
            .path("/style")
            .reply(&routes(test_context()))
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[CONTENT_TYPE], "text/css");
        assert_eq!(
            res.headers()[CACHE_CONTROL],
            "no-cache, no-store, must-revalidate"
        );
        assert_eq!(res.headers()[PRAGMA], "no-cache");
        assert_eq!(res.headers()[EXPIRES], "0");

        let css = String::from_utf8(res.body().to_vec()).unwrap();
        assert!(css.contains("background-color: black;"));
        assert!(css.contains("color: lime;"));
    }

    #[tokio::test]
    async fn test_script() {
        let res = warp::test::request()
            .path("/script")
            .reply(&routes(test_context()))
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[CONTENT_TYPE], "text/javascript");
        assert!(!res.body().is_empty());
    }

    #[tokio::test]
    async fn test_index() {
        let res = warp::test::request()
            .path("/")
            .reply(&routes(test_context()))
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[CONTENT_TYPE], "text/html");
        let html = String::from_utf8(res.body().to_vec()).unwrap();
        assert!(html.contains("<title>k8s-test</title>"));
    }

    #[tokio::test]
    async fn test_data() {
        let res = warp::test::request()
            .path("/data")
            .reply(&routes(test_context()))
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[CONTENT_TYPE], "text/html");
        let html = String::from_utf8(res.body().to_vec()).unwrap();
        for id in [
            "basic",
            "pod-info",
            "configmap-data",
            "api-info",
            "binary-version",
            "environment-variables",
        ] {
            assert!(html.contains(&format!(r#"<section id="{id}">"#)), "{id}");
        }
        assert!(html.contains("web-0"));
    }

    #[tokio::test]
    async fn test_only_get_is_served() {
        let routes = routes(test_context());

        let res = warp::test::request()
            .method("POST")
            .path("/health")
            .reply(&routes)
            .await;
        assert!(res.status().is_client_error());

        let res = warp::test::request()
            .path("/unknown")
            .reply(&routes)
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
