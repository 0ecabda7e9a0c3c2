use crate::infrastructure::bluetooth::protocol;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_level")]
    pub level: String, // "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_false")]
    pub file_logging_enabled: bool,
    #[serde(default = "default_true")]
    pub console_logging_enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_prefix")]
    pub file_name_prefix: String,
    #[serde(default = "default_false")]
    pub show_file_line: bool,
    #[serde(default = "default_false")]
    pub show_thread_ids: bool,
    #[serde(default = "default_true")]
    pub show_target: bool,
    #[serde(default = "default_true")]
    pub ansi_colors: bool,
    #[serde(default = "default_rotation")]
    pub rotation: String, // "daily", "hourly", "minutely", "never"
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            file_logging_enabled: default_false(),
            console_logging_enabled: default_true(),
            log_dir: default_log_dir(),
            file_name_prefix: default_prefix(),
            show_file_line: default_false(),
            show_thread_ids: default_false(),
            show_target: default_true(),
            ansi_colors: default_true(),
            rotation: default_rotation(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_log_dir() -> String {
    "logs".to_string()
}
fn default_prefix() -> String {
    "kano_sensor".to_string()
}
fn default_rotation() -> String {
    "daily".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Substring the advertised device name must contain
    #[serde(default = "default_device_name_filter")]
    pub device_name_filter: String,

    // Sensor & gesture tuning
    #[serde(default = "default_activation_threshold")]
    pub activation_threshold: u8,
    #[serde(default = "default_far_cutoff")]
    pub far_cutoff: u8,
    #[serde(default = "default_swipe_timeout_ms")]
    pub swipe_timeout_ms: u64,

    // LED output
    #[serde(default = "default_initial_brightness")]
    pub initial_brightness: u8,
    #[serde(default = "default_led_refresh_interval_ms")]
    pub led_refresh_interval_ms: u64,
    #[serde(default = "default_swipe_flash_ms")]
    pub swipe_flash_ms: u64,

    // Connection
    #[serde(default = "default_connect_settle_delay_ms")]
    pub connect_settle_delay_ms: u64,

    // Advanced BLE Settings
    #[serde(default = "default_io_service_uuid")]
    pub ble_io_service_uuid: String,
    #[serde(default = "default_led_uuid")]
    pub ble_led_char_uuid: String,
    #[serde(default = "default_brightness_uuid")]
    pub ble_brightness_char_uuid: String,
    #[serde(default = "default_sensor_service_uuid")]
    pub ble_sensor_service_uuid: String,
    #[serde(default = "default_sensor_uuid")]
    pub ble_sensor_char_uuid: String,

    // Logging Settings
    #[serde(default)]
    pub log_settings: LogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device_name_filter: default_device_name_filter(),
            activation_threshold: default_activation_threshold(),
            far_cutoff: default_far_cutoff(),
            swipe_timeout_ms: default_swipe_timeout_ms(),
            initial_brightness: default_initial_brightness(),
            led_refresh_interval_ms: default_led_refresh_interval_ms(),
            swipe_flash_ms: default_swipe_flash_ms(),
            connect_settle_delay_ms: default_connect_settle_delay_ms(),
            ble_io_service_uuid: default_io_service_uuid(),
            ble_led_char_uuid: default_led_uuid(),
            ble_brightness_char_uuid: default_brightness_uuid(),
            ble_sensor_service_uuid: default_sensor_service_uuid(),
            ble_sensor_char_uuid: default_sensor_uuid(),
            log_settings: LogSettings::default(),
        }
    }
}

impl Settings {
    pub fn swipe_timeout(&self) -> Duration {
        Duration::from_millis(self.swipe_timeout_ms)
    }

    pub fn led_refresh_interval(&self) -> Duration {
        Duration::from_millis(self.led_refresh_interval_ms.max(1))
    }

    pub fn connect_settle_delay(&self) -> Duration {
        Duration::from_millis(self.connect_settle_delay_ms)
    }
}

fn default_device_name_filter() -> String {
    "Kano".to_string()
}
fn default_activation_threshold() -> u8 {
    30
}
fn default_far_cutoff() -> u8 {
    220
}
fn default_swipe_timeout_ms() -> u64 {
    1000
}
fn default_initial_brightness() -> u8 {
    255
}
fn default_led_refresh_interval_ms() -> u64 {
    50
}
fn default_swipe_flash_ms() -> u64 {
    200
}
fn default_connect_settle_delay_ms() -> u64 {
    500
}
fn default_io_service_uuid() -> String {
    protocol::IO_SERVICE_UUID.to_string()
}
fn default_led_uuid() -> String {
    protocol::LED_CHAR_UUID.to_string()
}
fn default_brightness_uuid() -> String {
    protocol::BRIGHTNESS_CHAR_UUID.to_string()
}
fn default_sensor_service_uuid() -> String {
    protocol::SENSOR_SERVICE_UUID.to_string()
}
fn default_sensor_uuid() -> String {
    protocol::SENSOR_CHAR_UUID.to_string()
}

pub struct SettingsService {
    settings: Settings,
    settings_path: PathBuf,
}

impl SettingsService {
    pub fn new() -> anyhow::Result<Self> {
        let settings_path = Self::get_settings_path()?;
        Ok(Self::with_path(settings_path))
    }

    /// Load from an explicit file, falling back to defaults
    pub fn with_path(settings_path: PathBuf) -> Self {
        let settings = match Self::load_from_file(&settings_path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::debug!(
                    "Using default settings ({}): {}",
                    settings_path.display(),
                    e
                );
                Settings::default()
            }
        };

        Self {
            settings,
            settings_path,
        }
    }

    fn get_settings_path() -> anyhow::Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        path.push("KanoSensor");
        fs::create_dir_all(&path)?;
        path.push("settings.json");
        Ok(path)
    }

    fn load_from_file(path: &Path) -> anyhow::Result<Settings> {
        let contents = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents)?;
        Ok(settings)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.settings_path, json)?;
        Ok(())
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    pub fn get_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn path(&self) -> &Path {
        &self.settings_path
    }
}
