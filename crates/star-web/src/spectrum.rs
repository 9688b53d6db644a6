use star_core::Spectrum;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub fn spectrum_url(id: &str) -> String {
    format!("/fft/{id}.json")
}

/// Fetch and parse the analysis output for one song.
pub async fn fetch_spectrum(id: &str) -> anyhow::Result<Spectrum> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let url = spectrum_url(id);

    let resp_value = JsFuture::from(window.fetch_with_str(&url))
        .await
        .map_err(|e| anyhow::anyhow!(format!("fetch {url} failed: {:?}", e)))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    if !resp.ok() {
        anyhow::bail!("failed to load json from {url} (status {})", resp.status());
    }

    let content_type = resp.headers().get("content-type").ok().flatten();
    if !content_type
        .as_deref()
        .is_some_and(|ct| ct.contains("application/json"))
    {
        anyhow::bail!("expected JSON from {url} but got {:?}", content_type);
    }

    let text = JsFuture::from(resp.text().map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?)
        .await
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .as_string()
        .ok_or_else(|| anyhow::anyhow!("response body is not text"))?;

    let spectrum = Spectrum::from_json(&text)?;
    log::info!("[spectrum] {} frames loaded from {url}", spectrum.len());
    Ok(spectrum)
}
