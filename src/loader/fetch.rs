use std::error::Error;

/// Reads a dataset from a local path or an http(s) URL.
pub fn fetch_dataset(source: &str) -> Result<String, Box<dyn Error>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let mut response = ureq::get(source).call()?;
        Ok(response.body_mut().read_to_string()?)
    } else {
        Ok(std::fs::read_to_string(source)?)
    }
}
