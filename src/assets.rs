use crate::types::MoonPhase;

const DEFAULT_IMAGES: [&str; 8] = [
    "/img/new-moon.jpg",
    "/img/waxing-crescent.jpg",
    "/img/first-quarter.jpg",
    "/img/waxing-gibbous.jpg",
    "/img/full.webp",
    "/img/waning-gibbous.webp",
    "/img/third-quarter.webp",
    "/img/waning-crescent.webp",
];

/// Display asset reference for each phase, indexed in cyclic order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCatalog {
    images: [String; 8],
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self {
            images: DEFAULT_IMAGES.map(str::to_string),
        }
    }
}

impl AssetCatalog {
    pub fn new(images: [String; 8]) -> Self {
        Self { images }
    }

    /// Default paths served from `base_url` instead of the local root.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            images: DEFAULT_IMAGES.map(|path| format!("{}{}", base, path)),
        }
    }

    pub fn image_for(&self, phase: MoonPhase) -> &str {
        &self.images[phase.index()]
    }

    /// Unrecognized names resolve to the Full Moon asset.
    pub fn image_for_name(&self, name: &str) -> &str {
        let phase = name.parse().unwrap_or(MoonPhase::FullMoon);
        self.image_for(phase)
    }
}
