//! Renderer configuration
//!
//! Construction-time settings for the pipeline: viewport size, projection
//! parameters, animation speed, and frame pacing. Loadable from a RON file;
//! anything missing falls back to the defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// How surviving triangles are drawn. `Solid` picks textured or flat fill
/// depending on whether a texture is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawMode {
    Solid,
    Wireframe,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub fov_degrees: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Mesh spin rate in radians per second. Zero freezes the animation.
    pub spin_rate: f32,
    /// Minimum interval between rendered frames, in milliseconds.
    pub min_frame_ms: f32,
    /// Overrides the texture-coordinate normalization derived from the mesh.
    pub texture_scale: Option<f32>,
    pub draw_mode: DrawMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 640,
            fov_degrees: 90.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            spin_rate: 1.0,
            min_frame_ms: 1000.0 / 60.0,
            texture_scale: None,
            draw_mode: DrawMode::Solid,
        }
    }
}

/// Load a configuration from a RON file.
pub fn load_config(path: &Path) -> Result<RenderConfig, String> {
    let contents =
        fs::read_to_string(path).map_err(|e| format!("Failed to read config: {}", e))?;
    ron::from_str(&contents).map_err(|e| format!("Failed to parse config: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg: RenderConfig = ron::from_str("(width: 320, height: 240)").unwrap();
        assert_eq!(cfg.width, 320);
        assert_eq!(cfg.height, 240);
        assert_eq!(cfg.fov_degrees, 90.0);
        assert_eq!(cfg.draw_mode, DrawMode::Solid);
    }

    #[test]
    fn test_round_trip_through_ron() {
        let cfg = RenderConfig {
            spin_rate: 0.0,
            draw_mode: DrawMode::Wireframe,
            texture_scale: Some(0.25),
            ..RenderConfig::default()
        };
        let text = ron::to_string(&cfg).unwrap();
        let back: RenderConfig = ron::from_str(&text).unwrap();
        assert_eq!(back.spin_rate, 0.0);
        assert_eq!(back.draw_mode, DrawMode::Wireframe);
        assert_eq!(back.texture_scale, Some(0.25));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(fov_degrees: 60.0, draw_mode: Wireframe)").unwrap();
        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.fov_degrees, 60.0);
        assert_eq!(cfg.draw_mode, DrawMode::Wireframe);
    }

    #[test]
    fn test_bad_config_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(width: \"wat\")").unwrap();
        assert!(load_config(file.path()).is_err());
        assert!(load_config(Path::new("missing.ron")).is_err());
    }
}
