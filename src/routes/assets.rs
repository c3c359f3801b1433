use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;

/// Files bundled into the binary. Only the generated stylesheet ships; the
/// Tailwind source it is compiled from stays out of the embed.
#[derive(Embed)]
#[folder = "assets/"]
#[exclude = "css/input.css"]
struct Assets;

pub async fn serve(Path(path): Path<String>) -> Response {
    let Some(file) = Assets::get(&path) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    // The stylesheet is regenerated on every build, so cache it briefly;
    // anything else embedded alongside it can be cached for a day.
    let cache_control = if path.ends_with(".css") {
        "public, max-age=3600"
    } else {
        "public, max-age=86400"
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime.as_ref().to_string()),
            (header::CACHE_CONTROL, cache_control.to_string()),
        ],
        file.data.to_vec(),
    )
        .into_response()
}
