//! Chart rendering port trait.

use crate::domain::chart::ChartSpec;
use crate::domain::error::TikrscopeError;

/// Turns a composed chart into some output medium (JSON, HTML, image...).
pub trait ChartRenderer {
    fn render(&self, spec: &ChartSpec) -> Result<String, TikrscopeError>;
}
