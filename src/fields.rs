//! # Field Storage and Unit Rendering
//!
//! Generic named-field storage for decoded meter values. A driver declares
//! its field schema once (name, quantity, default unit, description), then
//! writes values through the [`ReadingSink`] trait during decoding and asks
//! the store to render a default-unit JSON form for annotation text.
//!
//! Fields stay unset until a value is stored; a partially decoded payload
//! therefore leaves the trailing fields at `None` rather than zero.

use serde::Serialize;

use crate::error::DriverError;

/// Physical quantity a field measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Quantity {
    /// Dimensionless heat-cost-allocation indication
    Hca,
    Temperature,
}

impl Quantity {
    /// Unit a quantity is rendered in when no explicit unit is requested
    pub fn default_unit(&self) -> Unit {
        match self {
            Quantity::Hca => Unit::Hca,
            Quantity::Temperature => Unit::Celsius,
        }
    }
}

/// Physical unit of a stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    /// Heat-cost-allocation index
    Hca,
    /// Degrees Celsius
    Celsius,
}

impl Unit {
    /// Suffix appended to field names in rendered output ("_hca", "_c")
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Hca => "hca",
            Unit::Celsius => "c",
        }
    }

    /// Short display name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Unit::Hca => "HCA",
            Unit::Celsius => "C",
        }
    }
}

/// Sink a driver writes decoded values into
///
/// Implemented by [`FieldStore`]; a trait seam so hosts can route readings
/// into their own storage.
pub trait ReadingSink {
    /// Store a numeric value into a declared field
    fn set_numeric_value(&mut self, field: &str, unit: Unit, value: f64)
        -> Result<(), DriverError>;

    /// Store the device clock timestamp string
    fn set_device_date_time(&mut self, value: &str);

    /// Render `"name_unit":value` for the field's default unit, `null` when
    /// the field is unset
    fn render_json_only_default_unit(&self, field: &str, quantity: Quantity) -> String;
}

/// One declared numeric field
#[derive(Debug, Clone, Serialize)]
pub struct NumericField {
    pub name: &'static str,
    pub quantity: Quantity,
    pub unit: Unit,
    pub description: &'static str,
    pub value: Option<f64>,
}

/// Declared-schema store for decoded readings
#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldStore {
    fields: Vec<NumericField>,
    device_date_time: Option<String>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a numeric field; values may only be stored into declared
    /// fields
    pub fn add_numeric_field(
        &mut self,
        name: &'static str,
        quantity: Quantity,
        unit: Unit,
        description: &'static str,
    ) {
        self.fields.push(NumericField {
            name,
            quantity,
            unit,
            description,
            value: None,
        });
    }

    /// Stored value of a field, `None` when undeclared or unset
    pub fn numeric_value(&self, field: &str) -> Option<f64> {
        self.field(field).and_then(|f| f.value)
    }

    /// Device clock timestamp, when the payload reached the date segment
    pub fn device_date_time(&self) -> Option<&str> {
        self.device_date_time.as_deref()
    }

    /// Declared fields in declaration order
    pub fn fields(&self) -> &[NumericField] {
        &self.fields
    }

    fn field(&self, name: &str) -> Option<&NumericField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl ReadingSink for FieldStore {
    fn set_numeric_value(
        &mut self,
        field: &str,
        unit: Unit,
        value: f64,
    ) -> Result<(), DriverError> {
        let Some(slot) = self.fields.iter_mut().find(|f| f.name == field) else {
            return Err(DriverError::UnknownField(field.to_string()));
        };
        if slot.unit != unit {
            return Err(DriverError::UnitMismatch {
                field: field.to_string(),
                expected: slot.unit.name(),
                got: unit.name(),
            });
        }
        slot.value = Some(value);
        Ok(())
    }

    fn set_device_date_time(&mut self, value: &str) {
        self.device_date_time = Some(value.to_string());
    }

    fn render_json_only_default_unit(&self, field: &str, quantity: Quantity) -> String {
        let suffix = quantity.default_unit().suffix();
        let value = self
            .numeric_value(field)
            .and_then(serde_json::Number::from_f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null);
        format!("\"{field}_{suffix}\":{value}")
    }
}
