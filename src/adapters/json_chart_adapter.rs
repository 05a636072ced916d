//! JSON chart renderer.
//!
//! Emits the composed [`ChartSpec`] as JSON for a front end that draws it.

use crate::domain::chart::ChartSpec;
use crate::domain::error::TikrscopeError;
use crate::ports::render_port::ChartRenderer;

pub struct JsonChartAdapter {
    pretty: bool,
}

impl JsonChartAdapter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonChartAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer for JsonChartAdapter {
    fn render(&self, spec: &ChartSpec) -> Result<String, TikrscopeError> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(spec)
        } else {
            serde_json::to_string(spec)
        };
        rendered.map_err(|e| TikrscopeError::Render {
            reason: format!("failed to serialise chart for {}: {}", spec.symbol, e),
        })
    }
}
