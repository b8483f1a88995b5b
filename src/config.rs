//! Scene configuration: design resolution, asset naming and element ids.

/// Virtual canvas all layout math is computed against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignResolution {
    pub width: f64,
    pub height: f64,
}

impl DesignResolution {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Reads a `data-design-width` / `data-design-height` pair. `Ok(None)`
    /// when neither is set; `Err` describes an override that was dropped.
    pub fn parse_override(
        width: Option<&str>,
        height: Option<&str>,
    ) -> Result<Option<Self>, String> {
        fn dim(raw: &str, name: &str) -> Result<f64, String> {
            match raw.trim().parse::<f64>() {
                Ok(v) if v > 0.0 && v.is_finite() => Ok(v),
                _ => Err(format!("data-{name}={raw:?} is not a positive number")),
            }
        }

        match (width, height) {
            (None, None) => Ok(None),
            (Some(w), Some(h)) => {
                Ok(Some(Self::new(dim(w, "design-width")?, dim(h, "design-height")?)))
            }
            (Some(_), None) => Err("data-design-width set without data-design-height".into()),
            (None, Some(_)) => Err("data-design-height set without data-design-width".into()),
        }
    }
}

impl Default for DesignResolution {
    fn default() -> Self {
        Self::new(2560.0, 1440.0)
    }
}

/// The three images every index expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Person,
    Background,
    Shadow,
}

impl AssetKind {
    pub fn stem(self) -> &'static str {
        match self {
            AssetKind::Person => "person",
            AssetKind::Background => "bg",
            AssetKind::Shadow => "shadow",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub design: DesignResolution,
    /// Number of image sets; indices cycle through `1..=max_index`.
    pub max_index: u32,
    pub asset_dir: String,
    pub container_id: String,
    pub canvas_id: String,
    pub person_id: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            design: DesignResolution::default(),
            max_index: 8,
            asset_dir: "./assets".to_string(),
            container_id: "container".to_string(),
            canvas_id: "bg-canvas".to_string(),
            person_id: "person".to_string(),
        }
    }
}

impl SceneConfig {
    pub fn with_asset_dir(mut self, dir: impl Into<String>) -> Self {
        let dir = dir.into();
        self.asset_dir = dir.trim_end_matches('/').to_string();
        self
    }

    pub fn with_design_resolution(mut self, width: f64, height: f64) -> Self {
        if width > 0.0 && height > 0.0 {
            self.design = DesignResolution::new(width, height);
        }
        self
    }

    /// `{asset_dir}/{stem}{idx}.png`
    pub fn asset_path(&self, kind: AssetKind, idx: u32) -> String {
        format!("{}/{}{}.png", self.asset_dir, kind.stem(), idx)
    }
}
