//! Declarative chart descriptions.
//!
//! A [`ChartSpec`] serializes to a Vega-Lite document with inline data, so
//! any Vega-Lite runtime can draw it.

use serde::Serialize;
use serde_json::Value;

use crate::core::constants::charts;
use crate::core::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    Bar,
    Tick,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: MarkKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
}

impl Mark {
    pub fn new(kind: MarkKind) -> Self {
        Self {
            kind,
            color: None,
            size: None,
            thickness: None,
        }
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn thickness(mut self, thickness: f64) -> Self {
        self.thickness = Some(thickness);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Quantitative,
    Nominal,
    Ordinal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Order a discrete axis by another field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortField {
    pub field: String,
    pub order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scale {
    pub domain: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDef {
    pub field: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl FieldDef {
    pub fn new(field: &str, kind: FieldType) -> Self {
        Self {
            field: field.to_string(),
            kind,
            title: None,
            sort: None,
            scale: None,
            format: None,
        }
    }

    pub fn quantitative(field: &str) -> Self {
        Self::new(field, FieldType::Quantitative)
    }

    pub fn nominal(field: &str) -> Self {
        Self::new(field, FieldType::Nominal)
    }

    pub fn ordinal(field: &str) -> Self {
        Self::new(field, FieldType::Ordinal)
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn sort_by(mut self, field: &str, order: SortOrder) -> Self {
        self.sort = Some(SortField {
            field: field.to_string(),
            order,
        });
        self
    }

    pub fn domain(mut self, low: f64, high: f64) -> Self {
        self.scale = Some(Scale {
            domain: [low, high],
        });
        self
    }

    pub fn format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Encoding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<FieldDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x2: Option<FieldDef>,
    #[serde(rename = "xOffset", skip_serializing_if = "Option::is_none")]
    pub x_offset: Option<FieldDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<FieldDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<FieldDef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tooltip: Vec<FieldDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub mark: Mark,
    pub encoding: Encoding,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InlineData {
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub width: String,
    pub height: u32,
    pub data: InlineData,
    pub layer: Vec<Layer>,
}

impl ChartSpec {
    /// Chart over `rows`, stretched to the width of its container
    pub fn new<T: Serialize>(rows: &[T], height: u32) -> Result<Self> {
        let values = rows
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            schema: charts::VEGA_LITE_SCHEMA.to_string(),
            width: "container".to_string(),
            height,
            data: InlineData { values },
            layer: Vec::new(),
        })
    }

    pub fn with_layer(mut self, mark: Mark, encoding: Encoding) -> Self {
        self.layer.push(Layer { mark, encoding });
        self
    }

    pub fn rows(&self) -> &[Value] {
        &self.data.values
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A table with display-ready cells and no index column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub height: u32,
}
