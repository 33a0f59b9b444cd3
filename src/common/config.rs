use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

/// Batch size for workspace icon delivery.
pub const DEFAULT_ITEMS_CHUNK: usize = 6;

/// Grid geometry of the device. Read-only; queried once per bind pass.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct DeviceProfile {
    pub columns: u32,
    pub rows: u32,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        DeviceProfile { columns: 5, rows: 5 }
    }
}

impl DeviceProfile {
    pub fn cells_per_screen(&self) -> u64 {
        u64::from(self.columns) * u64::from(self.rows)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Upper bound on the number of icons delivered per batch.
    pub chunk_size: usize,
    pub device: DeviceProfile,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            chunk_size: DEFAULT_ITEMS_CHUNK,
            device: DeviceProfile::default(),
        }
    }
}

impl Settings {
    pub fn from_toml(contents: &str) -> anyhow::Result<Settings> {
        let settings: Settings =
            toml::from_str(contents).context("failed to parse settings")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.chunk_size == 0 {
            bail!("chunk_size must be at least 1");
        }
        if self.device.columns == 0 || self.device.rows == 0 {
            bail!("device grid must have at least one column and one row");
        }
        Ok(())
    }
}
