use serde::Deserialize;

/// Top-level `photos.get` envelope. VK returns either `response` or `error`,
/// never both.
#[derive(Debug, Deserialize)]
pub struct PhotosEnvelope {
    pub response: Option<PhotosPage>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct PhotosPage {
    #[allow(dead_code)] // Present in every response; only items are consumed.
    pub count: u64,
    #[serde(default)]
    pub items: Vec<PhotoItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoItem {
    #[allow(dead_code)] // Present in every item; naming does not use it.
    pub id: i64,
    /// Unix timestamp of publication.
    pub date: i64,
    #[serde(default)]
    pub sizes: Vec<SizeVariant>,
    /// Present only when the request was made with `extended=1`.
    pub likes: Option<Likes>,
}

/// One resolution rendering of a photo.
#[derive(Debug, Clone, Deserialize)]
pub struct SizeVariant {
    pub height: u32,
    #[serde(rename = "type")]
    pub size_type: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Likes {
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub error_code: i64,
    pub error_msg: String,
}
