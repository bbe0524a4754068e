use serde::{Deserialize, Serialize};

/// Packing configuration.
///
/// Every canvas produced in one run is a `max_size` x `max_size` square;
/// closed pages report dimensions rounded up to `alignment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackerConfig {
    /// Canvas capacity in pixels (both width and height).
    pub max_size: u32,
    /// Closed page width and height are independently rounded up to the next
    /// multiple of this. Affects reported dimensions only, never in-tracker
    /// coordinates.
    #[serde(default = "default_alignment")]
    pub alignment: u32,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            max_size: 2048,
            alignment: default_alignment(),
        }
    }
}

impl PackerConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if the canvas capacity or the alignment is zero.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::SpritePackerError;

        if self.max_size == 0 {
            return Err(SpritePackerError::InvalidConfig(
                "max_size must be positive".into(),
            ));
        }
        if self.alignment == 0 {
            return Err(SpritePackerError::InvalidConfig(
                "alignment must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}

fn default_alignment() -> u32 {
    4
}

/// Builder for `PackerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn max_size(mut self, v: u32) -> Self {
        self.cfg.max_size = v;
        self
    }
    pub fn alignment(mut self, v: u32) -> Self {
        self.cfg.alignment = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}
