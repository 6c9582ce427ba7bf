use dioxus::document::eval;
use serde_json::Value;
use tracing::debug;

pub const VIEWER_CONTAINER_ID: &str = "document-viewer";

fn js_string(raw: &str) -> String {
    Value::from(raw).to_string()
}

#[must_use]
pub fn fullscreen_script(element_id: &str, enter: bool) -> String {
    if enter {
        format!(
            r"
            const el = document.getElementById({id});
            if (el && el.requestFullscreen) {{ await el.requestFullscreen(); }}
            ",
            id = js_string(element_id)
        )
    } else {
        r"
        if (document.fullscreenElement && document.exitFullscreen) {
            await document.exitFullscreen();
        }
        "
        .to_string()
    }
}

#[must_use]
pub fn download_script(url: &str, filename: &str) -> String {
    format!(
        r"
        const link = document.createElement('a');
        link.href = {url};
        link.download = {name};
        document.body.appendChild(link);
        link.click();
        link.remove();
        ",
        url = js_string(url),
        name = js_string(filename)
    )
}

pub async fn set_fullscreen(element_id: &str, enter: bool) {
    if let Err(err) = eval(&fullscreen_script(element_id, enter)).await {
        debug!(?err, enter, "fullscreen request failed");
    }
}

pub async fn trigger_download(url: &str, filename: &str) {
    if let Err(err) = eval(&download_script(url, filename)).await {
        debug!(?err, "download request failed");
    }
}
