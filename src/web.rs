use crate::{
    config::Config,
    download::{sanitize_filename, DownloadError, Downloader},
    errors::AppError,
    i18n::{self, Language, LanguageInfo},
    links::{LinkDeriver, LinkSet, Variant},
    video_id::{ExtractError, Platform},
};
use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::{sync::Arc, time::Duration};
use tokio::signal;
use tower_http::set_header::SetResponseHeaderLayer;

const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="320" height="180" viewBox="0 0 320 180"><rect width="320" height="180" fill="#e5e7eb"/><path d="M140 70l40 20-40 20z" fill="#9ca3af"/></svg>"##;

pub struct SharedState {
    pub config: Config,
    pub platform: Platform,
    pub deriver: LinkDeriver,
}

impl SharedState {
    pub fn new(config: Config) -> Self {
        Self {
            platform: config.platform(),
            deriver: config.link_deriver(),
            config,
        }
    }
}

pub fn router(state: Arc<SharedState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/placeholder.svg", get(placeholder))
        .route("/api/languages", get(languages))
        .route("/api/links", post(links))
        .route("/api/download", get(download))
        .route("/:lang", get(page))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(
                    tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO),
                )
                .on_response(
                    tower_http::trace::DefaultOnResponse::new().level(tracing::Level::INFO),
                ),
        )
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            log::error!("failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                log::error!("failed to install signal handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::warn!("shutting down");
}

async fn start_app(config: Config, addr: String) -> anyhow::Result<()> {
    let state = Arc::new(SharedState::new(config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    log::info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub fn start_daemon(config: Config, addr: Option<String>) -> anyhow::Result<()> {
    let addr = addr.unwrap_or_else(|| config.listen_addr.clone());

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async { start_app(config, addr).await })
}

// Make our own error that wraps `AppError`.
#[derive(Debug)]
struct HttpError(AppError);

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::Extract(_) => StatusCode::BAD_REQUEST,
            AppError::Download(DownloadError::Forbidden(_)) => {
                log::warn!("{self:?}");
                StatusCode::FORBIDDEN
            }
            AppError::Download(_) => {
                log::error!("{self:?}");
                StatusCode::BAD_GATEWAY
            }
            AppError::IO(_) | AppError::Other(_) => {
                log::error!("{self:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({"error": self.0.to_string()}))).into_response()
    }
}

impl<E> From<E> for HttpError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

async fn index(State(state): State<Arc<SharedState>>) -> Redirect {
    Redirect::temporary(&format!("/{}", state.config.default_language))
}

async fn placeholder() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], PLACEHOLDER_SVG)
}

async fn languages() -> Json<Vec<LanguageInfo>> {
    Json(i18n::supported_languages())
}

#[derive(Debug, Deserialize)]
pub struct LinksRequest {
    pub url: String,
}

async fn links(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<LinksRequest>,
) -> Result<Json<LinkSet>, HttpError> {
    log::debug!("payload: {payload:?}");

    let link_set = crate::links::resolve(&state.platform, &state.deriver, &payload.url)?;
    Ok(Json(link_set))
}

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub url: String,
    pub filename: Option<String>,
}

async fn download(
    State(state): State<Arc<SharedState>>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, HttpError> {
    log::debug!("query: {query:?}");

    let DownloadQuery { url, filename } = query;
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let image_base = state.deriver.image_base().to_string();

    // the blocking client must not be created or dropped on an async worker
    let fetched = tokio::task::block_in_place(move || {
        Downloader::new(&image_base, timeout)?.fetch(&url)
    })?;

    let filename = filename
        .as_deref()
        .map(sanitize_filename)
        .unwrap_or_else(|| "thumbnail.jpg".to_string());

    Ok((
        [
            (header::CONTENT_TYPE, fetched.mime_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        fetched.bytes,
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub url: Option<String>,
}

async fn page(
    State(state): State<Arc<SharedState>>,
    Path(lang): Path<String>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let lang = Language::from_code_or_default(&lang);

    let input = query.url.unwrap_or_default();
    let outcome = if input.trim().is_empty() {
        None
    } else {
        Some(crate::links::resolve(
            &state.platform,
            &state.deriver,
            &input,
        ))
    };

    Html(render_page(lang, &state.deriver, &input, outcome.as_ref()))
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn download_href(url: &str, filename: &str) -> String {
    let url: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
    let filename: String = url::form_urlencoded::byte_serialize(filename.as_bytes()).collect();
    format!("/api/download?url={url}&filename={filename}")
}

fn image_tag(src: &str, alt: &str, width: u32, height: u32) -> String {
    format!(
        r#"<img src="{}" alt="{}" width="{width}" height="{height}" loading="lazy" onerror="this.onerror=null;this.src='/placeholder.svg'">"#,
        escape(src),
        escape(alt),
    )
}

pub fn render_page(
    lang: Language,
    deriver: &LinkDeriver,
    input: &str,
    outcome: Option<&Result<LinkSet, ExtractError>>,
) -> String {
    let t = lang.labels();

    let language_options = Language::ALL
        .into_iter()
        .map(|l| {
            let info = l.info();
            format!(
                r#"<a href="/{code}"{current}>{flag} {name}</a>"#,
                code = info.code,
                current = if l == lang { r#" aria-current="page""# } else { "" },
                flag = info.flag,
                name = escape(info.name),
            )
        })
        .collect::<Vec<_>>()
        .join(" ");

    let error = match outcome {
        Some(Err(ExtractError::NotRecognizable)) => Some(t.errors.invalid_url),
        Some(Err(ExtractError::NoIdentifier)) => Some(t.errors.extract_id),
        _ => None,
    }
    .map(|msg| format!(r#"<p class="error" role="alert">{}</p>"#, escape(msg)))
    .unwrap_or_default();

    let results = match outcome {
        Some(Ok(link_set)) => render_results(lang, deriver, link_set),
        _ => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="{code}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<nav class="languages">{language_options}</nav>
<header>
<h1>{title}</h1>
<p>{description}</p>
</header>
<main>
<section class="form">
<h2>{form_title}</h2>
<p>{form_description}</p>
<form method="get" action="/{code}" onsubmit="var b=this.querySelector('button');b.disabled=true;b.textContent=b.dataset.processing">
<input type="url" name="url" placeholder="{placeholder}" value="{input}" required>
<button type="submit" data-processing="{processing}">{button}</button>
</form>
{error}
</section>
{results}
</main>
<footer>
<p>{copyright}</p>
<p>{disclaimer}</p>
</footer>
</body>
</html>
"#,
        code = lang.code(),
        title = escape(t.title),
        description = escape(t.description),
        form_title = escape(t.form.title),
        form_description = escape(t.form.description),
        placeholder = escape(t.form.placeholder),
        input = escape(input),
        button = escape(t.form.button),
        processing = escape(t.form.processing),
        copyright = escape(t.copyright),
        disclaimer = escape(t.disclaimer),
    )
}

// Download anchors carry `download` so a failed fetch never replaces the page.
fn download_button(url: &str, filename: &str, text: &str) -> String {
    format!(
        r#"<a class="button" href="{}" download>{}</a>"#,
        escape(&download_href(url, filename)),
        escape(text),
    )
}

fn render_results(lang: Language, deriver: &LinkDeriver, link_set: &LinkSet) -> String {
    let t = lang.labels();

    let main_img = link_set
        .get(Variant::MaxRes)
        .map(|main| image_tag(&main.url, link_set.video_id.as_str(), main.width, main.height))
        .unwrap_or_default();

    let gallery = link_set
        .links()
        .iter()
        .map(|link| {
            format!(
                r#"<figure>{img}<figcaption>{key} {w}x{h} <a href="{href}" download>{download}</a></figcaption></figure>"#,
                img = image_tag(&link.url, link.variant.key(), link.width, link.height),
                key = link.variant.key(),
                w = link.width,
                h = link.height,
                href = escape(&download_href(&link.url, &link.filename)),
                download = escape(t.download),
            )
        })
        .collect::<String>();

    let by_size = Variant::BY_SIZE
        .into_iter()
        .filter_map(|variant| link_set.get(variant))
        .map(|link| download_button(&link.url, &link.filename, &link.variant.size_label()))
        .collect::<String>();

    let tile = |class: &str, title: &str, variant: Variant, label: &str, (w, h): (u32, u32)| {
        link_set
            .get(variant)
            .map(|link| {
                format!(
                    r#"<div class="{class}"><h3>{title}</h3>{img}<p>{label}</p>{button}</div>"#,
                    title = escape(title),
                    img = image_tag(&link.url, title, w, h),
                    button = download_button(
                        &link.url,
                        &deriver.labelled_filename(&format!("{class}-{label}")),
                        t.download
                    ),
                )
            })
            .unwrap_or_default()
    };

    let profile = tile("profile", t.profile, Variant::Default, "120x120", (120, 120));
    let cover = tile("cover", t.cover, Variant::MaxRes, "1280x720", (320, 180));

    format!(
        r#"<section class="results">
<h2>{results_title}</h2>
<p>{video_id_label}: {video_id}</p>
<div class="main-thumbnail">{main_img}</div>
<div class="gallery">{gallery}</div>
<h3>{download_by_size}</h3>
<div class="by-size">{by_size}</div>
<div class="additional">
{profile}
{cover}
</div>
</section>"#,
        results_title = escape(t.results_title),
        video_id_label = escape(t.video_id),
        video_id = escape(link_set.video_id.as_str()),
        download_by_size = escape(t.download_by_size),
    )
}
