use std::path::PathBuf;

use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    #[serde(default)]
    pub resolution: Resolution,
    #[serde(default)]
    pub present_mode: PresentModeSetting,
    #[serde(default = "RenderSettings::default_albedo_path")]
    pub albedo_path: PathBuf,
    #[serde(default = "RenderSettings::default_clear_color")]
    pub clear_color: [f64; 3],
    #[serde(default)]
    pub camera: CameraSettings,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            present_mode: PresentModeSetting::default(),
            albedo_path: Self::default_albedo_path(),
            clear_color: Self::default_clear_color(),
            camera: CameraSettings::default(),
        }
    }
}

impl RenderSettings {
    pub fn load() -> Self {
        Self::load_from_path("settings.json")
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Self {
        use std::fs;

        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RenderSettings>(&contents) {
                Ok(settings) => {
                    info!("Loaded render settings from {:?}", path);
                    settings.validate()
                }
                Err(err) => {
                    warn!(
                        "Failed to parse {:?} ({}). Falling back to default render settings.",
                        path, err
                    );
                    RenderSettings::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "Render settings file {:?} not found. Using default settings.",
                    path
                );
                RenderSettings::default()
            }
            Err(err) => {
                warn!(
                    "Failed to read {:?} ({}). Falling back to default render settings.",
                    path, err
                );
                RenderSettings::default()
            }
        }
    }

    fn validate(mut self) -> Self {
        if self.resolution.width == 0 || self.resolution.height == 0 {
            warn!("Resolution must be greater than zero. Using default resolution.");
            self.resolution = Resolution::default();
        }

        if self.clear_color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            warn!("Clear color channels must lie in [0, 1]. Using default clear color.");
            self.clear_color = Self::default_clear_color();
        }

        self.camera = self.camera.validate();
        self
    }

    /// Requested present mode if the surface supports it, else FIFO, else
    /// whatever the surface lists first.
    pub fn present_mode(&self, available: &[wgpu::PresentMode]) -> wgpu::PresentMode {
        let desired = self.present_mode.to_wgpu();
        if available.contains(&desired) {
            return desired;
        }

        let fallback = [wgpu::PresentMode::Fifo]
            .into_iter()
            .chain(available.iter().copied())
            .find(|mode| available.contains(mode))
            .unwrap_or(wgpu::PresentMode::Fifo);
        warn!("Present mode {desired:?} unsupported by this surface; using {fallback:?}.");
        fallback
    }

    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b] = self.clear_color;
        wgpu::Color { r, g, b, a: 1.0 }
    }

    fn default_albedo_path() -> PathBuf {
        PathBuf::from("assets/albedo.png")
    }

    const fn default_clear_color() -> [f64; 3] {
        [0.2, 0.2, 0.2]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Camera motion and projection tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// World units travelled per key press.
    pub move_step: f32,
    /// Pointer travel, in pixels, per degree of rotation.
    pub pixels_per_degree: f32,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            move_step: 0.1,
            pixels_per_degree: 5.0,
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl CameraSettings {
    fn validate(mut self) -> Self {
        let defaults = CameraSettings::default();

        if !(self.move_step > 0.0) {
            warn!("Camera move step must be positive. Using default value.");
            self.move_step = defaults.move_step;
        }

        if !(self.pixels_per_degree > 0.0) {
            warn!("Camera drag sensitivity must be positive. Using default value.");
            self.pixels_per_degree = defaults.pixels_per_degree;
        }

        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            warn!("Field of view must lie in (0, 180) degrees. Using default value.");
            self.fov_y_degrees = defaults.fov_y_degrees;
        }

        if !(self.near > 0.0 && self.far > self.near) {
            warn!("Clip planes must satisfy 0 < near < far. Using default planes.");
            self.near = defaults.near;
            self.far = defaults.far;
        }

        self
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentModeSetting {
    #[default]
    Fifo,
    FifoRelaxed,
    Immediate,
    Mailbox,
    AutoVsync,
    AutoNoVsync,
}

impl PresentModeSetting {
    fn to_wgpu(self) -> wgpu::PresentMode {
        use wgpu::PresentMode as Mode;
        match self {
            Self::Fifo => Mode::Fifo,
            Self::FifoRelaxed => Mode::FifoRelaxed,
            Self::Immediate => Mode::Immediate,
            Self::Mailbox => Mode::Mailbox,
            Self::AutoVsync => Mode::AutoVsync,
            Self::AutoNoVsync => Mode::AutoNoVsync,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn invalid_settings() -> RenderSettings {
        RenderSettings {
            resolution: Resolution {
                width: 0,
                height: 0,
            },
            present_mode: PresentModeSetting::Immediate,
            albedo_path: PathBuf::from("missing.png"),
            clear_color: [2.0, 0.0, -1.0],
            camera: CameraSettings {
                move_step: 0.0,
                pixels_per_degree: -1.0,
                fov_y_degrees: 200.0,
                near: 5.0,
                far: 1.0,
            },
        }
    }

    #[test]
    fn validate_replaces_invalid_values_with_defaults() {
        let validated = invalid_settings().validate();
        let defaults = RenderSettings::default();

        assert_eq!(validated.resolution.width, Resolution::default().width);
        assert_eq!(validated.resolution.height, Resolution::default().height);
        assert_eq!(validated.clear_color, defaults.clear_color);
        assert_eq!(validated.camera.move_step, defaults.camera.move_step);
        assert_eq!(
            validated.camera.pixels_per_degree,
            defaults.camera.pixels_per_degree
        );
        assert_eq!(validated.camera.fov_y_degrees, defaults.camera.fov_y_degrees);
        assert_eq!(validated.camera.near, defaults.camera.near);
        assert_eq!(validated.camera.far, defaults.camera.far);
        assert_eq!(validated.albedo_path, PathBuf::from("missing.png"));
    }

    #[test]
    fn validate_preserves_valid_values() {
        let valid = RenderSettings {
            resolution: Resolution {
                width: 1920,
                height: 1080,
            },
            camera: CameraSettings {
                move_step: 0.25,
                ..CameraSettings::default()
            },
            ..RenderSettings::default()
        };

        let validated = valid.clone().validate();

        assert_eq!(validated.resolution.width, valid.resolution.width);
        assert_eq!(validated.resolution.height, valid.resolution.height);
        assert_eq!(validated.camera.move_step, 0.25);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "albedo_path": "textures/wood.png", "camera": {{ "move_step": 0.5 }} }}"#
        )
        .unwrap();

        let settings = RenderSettings::load_from_path(file.path());

        assert_eq!(settings.albedo_path, PathBuf::from("textures/wood.png"));
        assert_eq!(settings.camera.move_step, 0.5);
        assert_eq!(settings.camera.pixels_per_degree, 5.0);
        assert_eq!(settings.resolution.width, 1280);
        assert_eq!(settings.clear_color, [0.2, 0.2, 0.2]);
    }

    #[test]
    fn missing_or_broken_file_falls_back_to_defaults() {
        let missing = RenderSettings::load_from_path("definitely/not/here.json");
        assert_eq!(missing.albedo_path, PathBuf::from("assets/albedo.png"));

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        write!(broken, "{{ not json").unwrap();
        let fallback = RenderSettings::load_from_path(broken.path());
        assert_eq!(fallback.camera.fov_y_degrees, 60.0);
    }

    #[test]
    fn present_mode_fallback_chain() {
        use wgpu::PresentMode as Mode;

        let settings = RenderSettings {
            present_mode: PresentModeSetting::Mailbox,
            ..RenderSettings::default()
        };

        let cases: [(&[Mode], Mode); 4] = [
            (&[Mode::Fifo, Mode::Mailbox, Mode::Immediate], Mode::Mailbox),
            (&[Mode::Immediate, Mode::Fifo], Mode::Fifo),
            (&[Mode::Immediate], Mode::Immediate),
            (&[], Mode::Fifo),
        ];
        for (available, expected) in cases {
            assert_eq!(settings.present_mode(available), expected, "{available:?}");
        }
    }

    #[test]
    fn present_mode_parses_snake_case() {
        let settings: RenderSettings =
            serde_json::from_str(r#"{ "present_mode": "auto_no_vsync" }"#).unwrap();
        assert_eq!(
            settings.present_mode.to_wgpu(),
            wgpu::PresentMode::AutoNoVsync
        );
    }
}
