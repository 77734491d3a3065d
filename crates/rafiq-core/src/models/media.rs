use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    Square,
    Landscape,
    Portrait,
    FourThree,
    ThreeFour,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Landscape,
        AspectRatio::Portrait,
        AspectRatio::FourThree,
        AspectRatio::ThreeFour,
    ];

    /// Wire form expected by the endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::FourThree => "4:3",
            AspectRatio::ThreeFour => "3:4",
        }
    }

    /// Video generation only supports landscape and portrait; everything
    /// else falls back to landscape.
    pub fn for_video(&self) -> &'static str {
        match self {
            AspectRatio::Portrait => "9:16",
            _ => "16:9",
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Square
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    OneK,
    TwoK,
    FourK,
}

impl ImageSize {
    pub const ALL: [ImageSize; 3] = [ImageSize::OneK, ImageSize::TwoK, ImageSize::FourK];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::OneK => "1K",
            ImageSize::TwoK => "2K",
            ImageSize::FourK => "4K",
        }
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        ImageSize::OneK
    }
}

/// Output of a generation request. Images arrive inline; videos arrive as a
/// download URL (keyed for retrieval).
#[derive(Debug, Clone)]
pub enum MediaArtifact {
    Image { bytes: Vec<u8>, mime: String },
    VideoUrl(String),
}

impl MediaArtifact {
    pub fn describe(&self) -> String {
        match self {
            MediaArtifact::Image { bytes, mime } => {
                format!("{} image, {} bytes", mime, bytes.len())
            }
            MediaArtifact::VideoUrl(url) => format!("video: {url}"),
        }
    }
}
