//! Feature values and enumerations.
//!
//! [`Value`] is the uniform currency of the generic feature interface: `get`
//! returns one, `set` takes one, notifications carry two. Enumerations are
//! described statically by [`EnumDef`] and referenced at runtime through the
//! copyable [`EnumValue`].

use std::fmt::{self, Debug, Display, Formatter};

use crate::errors::{ModelError, ModelResult};
use crate::node::NodeId;

/// One literal of an enumeration.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumLiteral {
    /// Symbolic name, e.g. `PUBLIC`.
    pub name: &'static str,
    /// Serialized form, e.g. `public`.
    pub literal: &'static str,
    pub value: i32,
}

/// Static description of an enumeration. The first literal is the default of
/// any optional attribute typed by it.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumDef {
    pub name: &'static str,
    pub literals: &'static [EnumLiteral],
}

impl EnumDef {
    /// Looks a literal up by its serialized form first, then by its name.
    pub fn parse(&'static self, text: &str) -> ModelResult<EnumValue> {
        self.literals
            .iter()
            .position(|lit| lit.literal == text)
            .or_else(|| self.literals.iter().position(|lit| lit.name == text))
            .map(|ordinal| EnumValue { def: self, ordinal })
            .ok_or_else(|| ModelError::UnknownLiteral {
                enumeration: self.name,
                literal: text.to_string(),
            })
    }

    #[must_use]
    pub fn by_value(&'static self, value: i32) -> Option<EnumValue> {
        self.literals
            .iter()
            .position(|lit| lit.value == value)
            .map(|ordinal| EnumValue { def: self, ordinal })
    }

    #[must_use]
    pub fn first(&'static self) -> Option<EnumValue> {
        EnumValue::new(self, 0)
    }
}

#[derive(Clone, Copy)]
pub struct EnumValue {
    def: &'static EnumDef,
    ordinal: usize,
}

impl EnumValue {
    #[must_use]
    pub fn new(def: &'static EnumDef, ordinal: usize) -> Option<Self> {
        (ordinal < def.literals.len()).then_some(Self { def, ordinal })
    }

    #[must_use]
    pub fn def(&self) -> &'static EnumDef {
        self.def
    }

    #[must_use]
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    fn entry(&self) -> &'static EnumLiteral {
        &self.def.literals[self.ordinal]
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.entry().name
    }

    #[must_use]
    pub fn literal(&self) -> &'static str {
        self.entry().literal
    }

    #[must_use]
    pub fn value(&self) -> i32 {
        self.entry().value
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.def, other.def) && self.ordinal == other.ordinal
    }
}

impl Eq for EnumValue {}

impl Debug for EnumValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.def.name, self.name())
    }
}

impl Display for EnumValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

/// Value of a feature as seen through the generic interface.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum Value {
    /// Null attribute or empty single reference.
    #[default]
    None,
    Str(String),
    Int(i64),
    UInt(u64),
    Bool(bool),
    Enum(EnumValue),
    Node(NodeId),
    /// Snapshot of a containment list, in order.
    List(Vec<NodeId>),
}

impl Value {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::UInt(u) => Some(*u),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_enum(&self) -> Option<EnumValue> {
        match self {
            Value::Enum(e) => Some(*e),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Value::Node(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[NodeId]> {
        match self {
            Value::List(ids) => Some(ids),
            _ => None,
        }
    }

    /// Short name of the value's shape, used in error messages.
    #[must_use]
    pub fn shape_name(&self) -> String {
        match self {
            Value::None => "null".to_string(),
            Value::Str(_) => "string".to_string(),
            Value::Int(_) => "integer".to_string(),
            Value::UInt(_) => "unsignedLong".to_string(),
            Value::Bool(_) => "boolean".to_string(),
            Value::Enum(e) => e.def().name.to_string(),
            Value::Node(_) => "node".to_string(),
            Value::List(_) => "list".to_string(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("null"),
            Value::Str(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::UInt(u) => write!(f, "{u}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Enum(e) => write!(f, "{e}"),
            Value::Node(id) => write!(f, "{id}"),
            Value::List(ids) => {
                f.write_str("[")?;
                for (i, id) in ids.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{id}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::UInt(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Self {
        Value::Enum(value)
    }
}

impl From<NodeId> for Value {
    fn from(value: NodeId) -> Self {
        Value::Node(value)
    }
}

impl From<Option<NodeId>> for Value {
    fn from(value: Option<NodeId>) -> Self {
        value.map_or(Value::None, Value::Node)
    }
}

impl From<Vec<NodeId>> for Value {
    fn from(value: Vec<NodeId>) -> Self {
        Value::List(value)
    }
}
