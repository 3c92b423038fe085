use ar_core::{NamedPart, OrganCatalog, PartScene, ViewerError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// One-shot GET of a static text resource. No retry.
pub async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    if !resp.ok() {
        anyhow::bail!("{} returned HTTP {}", url, resp.status());
    }
    let text = JsFuture::from(resp.text().map_err(|e| anyhow::anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    text.as_string()
        .ok_or_else(|| anyhow::anyhow!("{} body is not text", url))
}

pub async fn load_catalog(url: &str) -> Result<OrganCatalog, ViewerError> {
    let text = fetch_text(url)
        .await
        .map_err(|e| ViewerError::MetadataUnavailable(e.to_string()))?;
    OrganCatalog::from_json(&text)
}

pub async fn load_parts(url: &str, named: &[NamedPart]) -> Result<PartScene, ViewerError> {
    let text = fetch_text(url)
        .await
        .map_err(|e| ViewerError::Manifest(e.to_string()))?;
    PartScene::from_manifest_json(&text, named)
}
