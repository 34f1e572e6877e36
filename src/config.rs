use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_ASCENT, DEFAULT_CELL_WIDTH, DEFAULT_DESCENT,
};
use crate::font::{BitmapFace, FaceError, FaceSlot, LimitedFace, MultiFace};
use crate::renderer::Color;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid face configuration: {0}")]
    Face(#[from] FaceError),
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Baseline-to-baseline distance; the composed face's line height if unset.
    pub line_spacing: Option<f32>,
    /// Faces in resolution order. The last one is the fallback.
    #[serde(default = "default_faces")]
    pub faces: Vec<FaceSettings>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FaceSettings {
    pub name: String,
    #[serde(default = "default_cell_width")]
    pub cell_width: u32,
    #[serde(default = "default_ascent")]
    pub ascent: f32,
    #[serde(default = "default_descent")]
    pub descent: f32,
    #[serde(default)]
    pub line_gap: f32,
    /// Inclusive code point ranges the face has glyphs for.
    #[serde(default)]
    pub covers: Vec<[u32; 2]>,
    /// If set, the face is wrapped in a `LimitedFace` accepting only these.
    #[serde(default)]
    pub limit: Option<Vec<[u32; 2]>>,
    #[serde(default)]
    pub kerning: Vec<KerningPair>,
    /// Draws pre-colored glyphs in this 0xRRGGBB color instead of the
    /// draw color.
    #[serde(default)]
    pub color: Option<u32>,
    /// Keeps the slot in the chain but leaves it empty.
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct KerningPair {
    pub left: char,
    pub right: char,
    pub adjust: f32,
}

/// Faces built from a `Config`, kept alongside their names.
#[derive(Debug)]
pub struct FaceChain {
    pub names: Vec<String>,
    pub slots: Vec<FaceSlot>,
    pub face: MultiFace,
    pub line_spacing: Option<f32>,
}

impl FaceChain {
    pub fn name(&self, index: usize) -> &str {
        self.names.get(index).map(String::as_str).unwrap_or("?")
    }
}

fn default_cell_width() -> u32 {
    DEFAULT_CELL_WIDTH
}

fn default_ascent() -> f32 {
    DEFAULT_ASCENT
}

fn default_descent() -> f32 {
    DEFAULT_DESCENT
}

fn default_faces() -> Vec<FaceSettings> {
    vec![
        FaceSettings::new("latin", vec![[0x20, 0x7E], [0xA0, 0x17F]]),
        FaceSettings::new("cjk", vec![[0x3000, 0x30FF], [0x4E00, 0x9FFF], [0xFF00, 0xFF60]]),
    ]
}

impl FaceSettings {
    pub fn new(name: &str, covers: Vec<[u32; 2]>) -> Self {
        Self {
            name: name.to_string(),
            cell_width: DEFAULT_CELL_WIDTH,
            ascent: DEFAULT_ASCENT,
            descent: DEFAULT_DESCENT,
            line_gap: 0.0,
            covers,
            limit: None,
            kerning: Vec::new(),
            color: None,
            disabled: false,
        }
    }

    fn build(&self) -> Result<FaceSlot, FaceError> {
        if self.disabled {
            log::debug!("Face '{}' is disabled", self.name);
            return Ok(FaceSlot::absent());
        }

        let mut builder = BitmapFace::builder(self.cell_width, self.ascent, self.descent)
            .line_gap(self.line_gap);
        for &[start, end] in &self.covers {
            builder = builder.cover(start, end);
        }
        for pair in &self.kerning {
            builder = builder.kern(pair.left, pair.right, pair.adjust);
        }
        if let Some(rgb) = self.color {
            builder = builder.color(Color::from_rgb(rgb));
        }
        let face = builder.build()?;

        match &self.limit {
            Some(ranges) => {
                let limited = LimitedFace::new(FaceSlot::new(face));
                for &[start, end] in ranges {
                    limited.add_unicode_range(start, end)?;
                }
                Ok(FaceSlot::new(limited))
            }
            None => Ok(FaceSlot::new(face)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_spacing: None,
            faces: default_faces(),
        }
    }
}

impl Config {
    /// Loads the user config, falling back to the defaults on any problem.
    pub fn load() -> Self {
        let config_path = match config_file_path() {
            Some(path) => path,
            None => return Config::default(),
        };

        if !config_path.exists() {
            return Config::default();
        }

        match Self::from_path(&config_path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}", e);
                Config::default()
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn build(&self) -> Result<FaceChain, ConfigError> {
        let slots = self
            .faces
            .iter()
            .map(FaceSettings::build)
            .collect::<Result<Vec<_>, _>>()?;
        let face = MultiFace::new(slots.clone())?;
        log::info!(
            "Built face chain: {}",
            self.faces
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(" -> ")
        );

        Ok(FaceChain {
            names: self.faces.iter().map(|f| f.name.clone()).collect(),
            slots,
            face,
            line_spacing: self.line_spacing,
        })
    }
}

pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Face;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.line_spacing, None);
        assert_eq!(config.faces.len(), 2);
        assert_eq!(config.faces[0].name, "latin");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            line_spacing = 16.0

            [[faces]]
            name = "ascii"
            cell_width = 7
            covers = [[0x20, 0x7E]]
            kerning = [{ left = "A", right = "V", adjust = -1.5 }]

            [[faces]]
            name = "wide"
            covers = [[0x0, 0xFFFF]]
            limit = [[0x80, 0xFFFF]]
        "#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.line_spacing, Some(16.0));
        assert_eq!(config.faces.len(), 2);
        assert_eq!(config.faces[0].cell_width, 7);
        assert_eq!(config.faces[0].ascent, DEFAULT_ASCENT);
        assert_eq!(
            config.faces[0].kerning,
            vec![KerningPair {
                left: 'A',
                right: 'V',
                adjust: -1.5
            }]
        );
        assert_eq!(config.faces[1].limit, Some(vec![[0x80, 0xFFFF]]));
    }

    #[test]
    fn test_parse_partial_config() {
        let config = Config::parse("line_spacing = 20.0").unwrap();
        assert_eq!(config.line_spacing, Some(20.0));
        assert_eq!(config.faces, default_faces());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Config::parse("faces = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_path(Path::new("/nonexistent/text-faces.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/text-faces.toml"));
    }

    #[test]
    fn test_build_default_chain() {
        let chain = Config::default().build().unwrap();
        assert_eq!(chain.name(0), "latin");
        assert_eq!(chain.name(1), "cjk");
        assert_eq!(chain.name(7), "?");
        assert_eq!(chain.face.resolve('a'), 0);
        assert_eq!(chain.face.resolve('漢'), 1);
        assert_eq!(chain.face.advance("a漢"), 18.0);
    }

    #[test]
    fn test_build_limited_and_disabled_faces() {
        let mut limited = FaceSettings::new("limited", vec![[0x0, 0xFFFF]]);
        limited.limit = Some(vec![[0x80, 0xFFFF]]);
        let mut disabled = FaceSettings::new("off", vec![[0x0, 0x7F]]);
        disabled.disabled = true;

        let config = Config {
            line_spacing: None,
            faces: vec![disabled, limited],
        };
        let chain = config.build().unwrap();
        assert!(chain.slots[0].is_absent());
        assert!(!chain.face.has_glyph('a'));
        assert!(chain.face.has_glyph('é'));
        assert_eq!(chain.face.resolve('a'), 1, "falls back to the last face");
    }

    #[test]
    fn test_build_rejects_bad_ranges() {
        let config = Config {
            line_spacing: None,
            faces: vec![FaceSettings::new("bad", vec![[0x7F, 0x20]])],
        };
        assert!(matches!(
            config.build(),
            Err(ConfigError::Face(FaceError::InvalidRange { .. }))
        ));
    }

    #[test]
    fn test_build_rejects_oversized_cell_width() {
        let config = Config::parse(
            r#"
            [[faces]]
            name = "huge"
            cell_width = 3000000000
            covers = [[0x0, 0xFFFF]]
            "#,
        )
        .unwrap();
        let err = config.build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Face(FaceError::InvalidCellWidth(3_000_000_000))
        ));
        assert!(err.to_string().contains("3000000000"));
    }

    #[test]
    fn test_build_rejects_negative_descent() {
        let mut face = FaceSettings::new("bad", vec![[0x20, 0x7E]]);
        face.descent = -3.0;
        let config = Config {
            line_spacing: None,
            faces: vec![face],
        };
        assert!(matches!(
            config.build(),
            Err(ConfigError::Face(FaceError::InvalidMetrics { .. }))
        ));
    }

    #[test]
    fn test_build_colored_face() {
        let config = Config::parse(
            r#"
            [[faces]]
            name = "emoji"
            color = 0xFF8000
            covers = [[0x20, 0x7E]]
            "#,
        )
        .unwrap();
        assert_eq!(config.faces[0].color, Some(0xFF8000));

        let chain = config.build().unwrap();
        let mut glyphs = Vec::new();
        chain.face.append_glyphs(&mut glyphs, "a", 0, Default::default());
        let image = glyphs[0].image.as_ref().unwrap();
        assert!(image.buffer.is_colored());
    }

    // XDG_CONFIG_HOME is process-wide, so every load case lives in this test.
    #[cfg(target_os = "linux")]
    #[test]
    fn test_load_from_config_dir() {
        let home = std::env::temp_dir().join(format!("text-faces-xdg-{}", std::process::id()));
        let dir = home.join(CONFIG_DIR_NAME);
        fs::create_dir_all(&dir).unwrap();
        std::env::set_var("XDG_CONFIG_HOME", &home);
        assert_eq!(config_file_path(), Some(dir.join(CONFIG_FILE_NAME)));

        // No file yet
        assert_eq!(Config::load(), Config::default());

        fs::write(dir.join(CONFIG_FILE_NAME), "faces = [[[").unwrap();
        assert_eq!(Config::load(), Config::default());

        fs::write(
            dir.join(CONFIG_FILE_NAME),
            "line_spacing = 9.0\n[[faces]]\nname = \"solo\"\n",
        )
        .unwrap();
        let config = Config::load();
        assert_eq!(config.line_spacing, Some(9.0));
        assert_eq!(config.faces.len(), 1);
        assert_eq!(config.faces[0].name, "solo");

        std::env::remove_var("XDG_CONFIG_HOME");
        fs::remove_dir_all(&home).unwrap();
    }

    #[test]
    fn test_build_rejects_empty_chain() {
        let config = Config::parse("faces = []").unwrap();
        assert!(matches!(
            config.build(),
            Err(ConfigError::Face(FaceError::NoFaces))
        ));
    }
}
