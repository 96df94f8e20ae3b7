use crate::foundation::core::DEFAULT_TOLERANCE;
use crate::foundation::error::{SpriteError, SpriteResult};

/// Options controlling sprite comparisons and style restoration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpriteOpts {
    /// Maximum per-component difference (CSS px) for two bounds to count as equal.
    pub tolerance: f64,
    /// Remove a style attribute that only exists because `lock()` created it.
    pub prune_empty_style: bool,
}

impl Default for SpriteOpts {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            prune_empty_style: true,
        }
    }
}

impl SpriteOpts {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> SpriteResult<Self> {
        let opts: Self = serde_json::from_str(s)
            .map_err(|e| SpriteError::serde(format!("parse sprite options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Reject tolerances that would make every comparison meaningless.
    pub fn validate(&self) -> SpriteResult<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(SpriteError::serde(
                "tolerance must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/opts.rs"]
mod tests;
