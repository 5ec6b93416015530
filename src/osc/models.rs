use std::fmt;

use rosc::{OscMessage, OscType};

/// A single positional OSC argument, narrowed to the value kinds a Muse stream carries.
///
/// Argument kinds outside of numbers, booleans, strings and nil are kept as
/// [`OscArg::Unsupported`] so routed events still preserve argument positions.
#[derive(Debug, Clone, PartialEq)]
pub enum OscArg {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Nil,
    /// An OSC type tag this crate does not interpret, e.g. `"blob"` or `"midi"`.
    Unsupported(&'static str),
}

impl OscArg {
    /// Returns the numeric value of the argument, if it has one.
    ///
    /// Booleans are read as `1.0`/`0.0`. Strings, nil and unsupported kinds yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
            Self::Str(_) | Self::Nil | Self::Unsupported(_) => None,
        }
    }

    /// Coerces the argument to a boolean.
    ///
    /// Any non-zero, non-NaN number is `true`, as are `true` and non-empty strings.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Int(value) => *value != 0,
            Self::Float(value) => *value != 0.0 && !value.is_nan(),
            Self::Bool(value) => *value,
            Self::Str(value) => !value.is_empty(),
            Self::Nil | Self::Unsupported(_) => false,
        }
    }
}

impl From<OscType> for OscArg {
    fn from(value: OscType) -> Self {
        match value {
            OscType::Int(v) => Self::Int(v as i64),
            OscType::Long(v) => Self::Int(v),
            OscType::Float(v) => Self::Float(v as f64),
            OscType::Double(v) => Self::Float(v),
            OscType::Bool(v) => Self::Bool(v),
            OscType::String(v) => Self::Str(v),
            OscType::Char(v) => Self::Str(v.to_string()),
            OscType::Inf => Self::Float(f64::INFINITY),
            OscType::Nil => Self::Nil,
            OscType::Blob(_) => Self::Unsupported("blob"),
            OscType::Time(_) => Self::Unsupported("time"),
            OscType::Color(_) => Self::Unsupported("color"),
            OscType::Midi(_) => Self::Unsupported("midi"),
            OscType::Array(_) => Self::Unsupported("array"),
        }
    }
}

impl fmt::Display for OscArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{value:?}"),
            Self::Nil => write!(f, "nil"),
            Self::Unsupported(kind) => write!(f, "<{kind}>"),
        }
    }
}

/// An inbound OSC message as delivered by an [`OscTransport`](super::OscTransport).
#[derive(Debug, Clone, PartialEq)]
pub struct RawMessage {
    pub address: String,
    pub args: Vec<OscArg>,
}

impl RawMessage {
    pub fn new(address: impl Into<String>, args: Vec<OscArg>) -> Self {
        Self {
            address: address.into(),
            args,
        }
    }

    /// Returns the argument at `index`, or `None` if the device sent fewer arguments.
    pub fn arg(&self, index: usize) -> Option<&OscArg> {
        self.args.get(index)
    }
}

impl From<OscMessage> for RawMessage {
    fn from(value: OscMessage) -> Self {
        Self {
            address: value.addr,
            args: value.args.into_iter().map(OscArg::from).collect(),
        }
    }
}

impl fmt::Display for RawMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
