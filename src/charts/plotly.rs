//! plotly.js figure JSON for chart descriptors.

use serde_json::{Value, json};

use crate::domain::{AxisSpec, ChartDescriptor, ChartKind};

impl ChartDescriptor {
    /// Render as a plotly.js `{data, layout}` figure.
    ///
    /// Line charts become `scatter` traces with `mode: "lines"`; missing
    /// values are emitted as `null` so plotly leaves a gap.
    pub fn to_plotly(&self) -> Value {
        let data: Vec<Value> = self
            .series
            .iter()
            .map(|s| {
                let mut trace = json!({ "x": s.x, "y": s.y });
                match self.kind {
                    ChartKind::Line => {
                        trace["type"] = json!("scatter");
                        trace["mode"] = json!("lines");
                    }
                    ChartKind::Bar => trace["type"] = json!("bar"),
                }
                if let Some(name) = &s.name {
                    trace["name"] = json!(name);
                }
                trace
            })
            .collect();

        json!({
            "data": data,
            "layout": {
                "title": self.layout.title,
                "xaxis": axis_json(&self.layout.x_axis),
                "yaxis": axis_json(&self.layout.y_axis),
                "autosize": false,
                "width": self.layout.width,
                "height": self.layout.height,
            }
        })
    }
}

fn axis_json(axis: &AxisSpec) -> Value {
    let mut out = json!({ "title": axis.title });
    if let Some(ticks) = axis.ticks {
        out["autotick"] = json!(false);
        out["tick0"] = json!(ticks.tick0);
        out["dtick"] = json!(ticks.dtick);
    }
    out
}
