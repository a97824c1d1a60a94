use serde::Deserialize;
use crate::constants::*;
use crate::error::{Result, StarfieldError};

/// Tunables read from `<body data-starfield='{...}'>`; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub max_stars: usize,
    pub min_area: f64,
    pub area_per_star: f64,
    pub resize_debounce_ms: u32,
    // None seeds from Math.random
    pub seed: Option<u64>,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            max_stars: MAX_STARS,
            min_area: MIN_PAGE_AREA,
            area_per_star: AREA_PER_STAR,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            seed: None,
        }
    }
}

impl StarfieldConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: StarfieldConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.area_per_star > 0.0) {
            return Err(StarfieldError::InvalidConfig(format!(
                "area_per_star must be positive, got {}",
                self.area_per_star
            )));
        }
        if !(self.min_area >= 0.0) {
            return Err(StarfieldError::InvalidConfig(format!(
                "min_area must not be negative, got {}",
                self.min_area
            )));
        }
        Ok(())
    }

    // Broken JSON is logged and falls back to the defaults
    pub fn from_document(document: &web_sys::Document) -> Self {
        let raw = document
            .body()
            .and_then(|body| body.dataset().get(CONFIG_DATA_KEY));
        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw).unwrap_or_else(|e| {
                web_sys::console::warn_1(&format!("starfield: {}, using defaults", e).into());
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    pub fn star_count(&self, width: f64, height: f64) -> usize {
        let page_area = (width * height).max(self.min_area);
        let count = (page_area / self.area_per_star).floor() as usize;
        count.min(self.max_stars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = StarfieldConfig::from_json("{}").unwrap();
        assert_eq!(config, StarfieldConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = StarfieldConfig::from_json(r#"{"max_stars": 200, "seed": 7}"#).unwrap();
        assert_eq!(config.max_stars, 200);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.area_per_star, AREA_PER_STAR);
        assert_eq!(config.resize_debounce_ms, RESIZE_DEBOUNCE_MS);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = StarfieldConfig::from_json("{max_stars:").unwrap_err();
        assert!(matches!(err, StarfieldError::Config(_)));
    }

    #[test]
    fn rejects_zero_density() {
        let err = StarfieldConfig::from_json(r#"{"area_per_star": 0}"#).unwrap_err();
        assert!(matches!(err, StarfieldError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_negative_min_area() {
        let err = StarfieldConfig::from_json(r#"{"min_area": -1}"#).unwrap_err();
        assert!(matches!(err, StarfieldError::InvalidConfig(_)));
    }

    #[test]
    fn count_for_small_page() {
        let config = StarfieldConfig::default();
        // 1000×800 = 800000 px², above the floor
        assert_eq!(config.star_count(1000.0, 800.0), 66);
    }

    #[test]
    fn count_uses_area_floor() {
        let config = StarfieldConfig::default();
        // 320×480 is below 500000 px², so the floor decides
        assert_eq!(config.star_count(320.0, 480.0), 41);
        assert_eq!(config.star_count(0.0, 0.0), 41);
    }

    #[test]
    fn count_is_capped() {
        let config = StarfieldConfig::default();
        assert_eq!(config.star_count(1920.0, 20_000.0), MAX_STARS);
    }

    #[test]
    fn count_matches_density_rule() {
        let config = StarfieldConfig::default();
        let pages: [(f64, f64); 4] = [(375.0, 3000.0), (1280.0, 4200.0), (1440.0, 900.0), (768.0, 1024.0)];
        for (w, h) in pages {
            let area = (w * h).max(MIN_PAGE_AREA);
            let expected = ((area / AREA_PER_STAR).floor() as usize).min(MAX_STARS);
            assert_eq!(config.star_count(w, h), expected, "{}x{}", w, h);
        }
    }
}
