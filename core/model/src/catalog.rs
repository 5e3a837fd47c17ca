//! Feature Catalog
//!
//! Static, per-node-kind metadata. A [`Catalog`] is an immutable `'static` table
//! supplied by a schema crate: it lists every node kind, the ordered features of
//! each kind and the enumerations its attributes draw from. The document engine
//! never generates or mutates a catalog; it only reads it.
//!
//! Feature ids are small integers equal to the feature's position in its kind's
//! feature list. Structural mixins (a source position carried by many kinds, for
//! example) are modelled as supertypes whose features are repeated at the head
//! of every inheriting kind, so ids stay positional.

use std::fmt::{self, Display, Formatter};

use crate::errors::{ModelError, ModelResult};
use crate::value::{EnumDef, EnumValue, Value};

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct KindId(pub u16);

impl KindId {
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct FeatureId(pub u16);

impl FeatureId {
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl Display for FeatureId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cardinality {
    Single,
    Many,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Ownership {
    Attribute,
    Containment,
    Reference,
}

/// Scalar type of an attribute feature.
#[derive(Clone, Copy, Debug)]
pub enum DataType {
    String,
    Integer,
    UnsignedLong,
    Boolean,
    Enum(&'static EnumDef),
}

impl DataType {
    /// Whether `value` has the shape of this data type. `Value::None` is the
    /// null value and is accepted by every data type.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::None)
            | (DataType::String, Value::Str(_))
            | (DataType::Integer, Value::Int(_))
            | (DataType::UnsignedLong, Value::UInt(_))
            | (DataType::Boolean, Value::Bool(_)) => true,
            (DataType::Enum(def), Value::Enum(v)) => std::ptr::eq(v.def(), *def),
            _ => false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Integer => "integer",
            DataType::UnsignedLong => "unsignedLong",
            DataType::Boolean => "boolean",
            DataType::Enum(def) => def.name,
        }
    }
}

/// Default value of an attribute, in a form that can live in a `static`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Str(&'static str),
    /// Ordinal into the attribute's enumeration.
    EnumOrdinal(u16),
}

#[derive(Clone, Copy, Debug)]
pub enum Shape {
    Attribute {
        data_type: DataType,
        default: Literal,
        /// Optional attribute with an explicit is-set flag.
        unsettable: bool,
        required: bool,
    },
    Containment {
        target: KindId,
        many: bool,
        required: bool,
    },
    /// Non-owned single reference to a node elsewhere in the document.
    Reference { target: KindId },
}

/// One named, typed, numbered slot of a node kind.
#[derive(Clone, Copy, Debug)]
pub struct Feature {
    pub id: FeatureId,
    pub name: &'static str,
    pub shape: Shape,
}

impl Feature {
    /// Plain attribute without a default.
    #[must_use]
    pub const fn attribute(id: u16, name: &'static str, data_type: DataType, required: bool) -> Self {
        Self {
            id: FeatureId(id),
            name,
            shape: Shape::Attribute {
                data_type,
                default: Literal::Null,
                unsettable: false,
                required,
            },
        }
    }

    /// Optional attribute: carries a default and an explicit is-set flag.
    #[must_use]
    pub const fn unsettable(id: u16, name: &'static str, data_type: DataType, default: Literal) -> Self {
        Self {
            id: FeatureId(id),
            name,
            shape: Shape::Attribute {
                data_type,
                default,
                unsettable: true,
                required: true,
            },
        }
    }

    #[must_use]
    pub const fn child(id: u16, name: &'static str, target: KindId, required: bool) -> Self {
        Self {
            id: FeatureId(id),
            name,
            shape: Shape::Containment {
                target,
                many: false,
                required,
            },
        }
    }

    #[must_use]
    pub const fn children(id: u16, name: &'static str, target: KindId, required: bool) -> Self {
        Self {
            id: FeatureId(id),
            name,
            shape: Shape::Containment {
                target,
                many: true,
                required,
            },
        }
    }

    #[must_use]
    pub const fn reference(id: u16, name: &'static str, target: KindId) -> Self {
        Self {
            id: FeatureId(id),
            name,
            shape: Shape::Reference { target },
        }
    }

    #[must_use]
    pub fn cardinality(&self) -> Cardinality {
        match self.shape {
            Shape::Containment { many: true, .. } => Cardinality::Many,
            _ => Cardinality::Single,
        }
    }

    #[must_use]
    pub fn ownership(&self) -> Ownership {
        match self.shape {
            Shape::Attribute { .. } => Ownership::Attribute,
            Shape::Containment { .. } => Ownership::Containment,
            Shape::Reference { .. } => Ownership::Reference,
        }
    }

    #[must_use]
    pub fn is_unsettable(&self) -> bool {
        matches!(self.shape, Shape::Attribute { unsettable: true, .. })
    }

    #[must_use]
    pub fn is_many(&self) -> bool {
        self.cardinality() == Cardinality::Many
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        match self.shape {
            Shape::Attribute { required, .. } | Shape::Containment { required, .. } => required,
            Shape::Reference { .. } => false,
        }
    }

    /// Kind of node this feature holds, for containment and references.
    #[must_use]
    pub fn target(&self) -> Option<KindId> {
        match self.shape {
            Shape::Containment { target, .. } | Shape::Reference { target } => Some(target),
            Shape::Attribute { .. } => None,
        }
    }

    #[must_use]
    pub fn data_type(&self) -> Option<DataType> {
        match self.shape {
            Shape::Attribute { data_type, .. } => Some(data_type),
            _ => None,
        }
    }

    /// Value a freshly created node holds for this feature.
    #[must_use]
    pub fn default_value(&self) -> Value {
        match self.shape {
            Shape::Attribute {
                data_type, default, ..
            } => match (default, data_type) {
                (Literal::Null, _) => Value::None,
                (Literal::Bool(b), _) => Value::Bool(b),
                (Literal::Int(i), _) => Value::Int(i),
                (Literal::UInt(u), _) => Value::UInt(u),
                (Literal::Str(s), _) => Value::Str(s.to_string()),
                (Literal::EnumOrdinal(ordinal), DataType::Enum(def)) => {
                    EnumValue::new(def, usize::from(ordinal)).map_or(Value::None, Value::Enum)
                }
                (Literal::EnumOrdinal(_), _) => Value::None,
            },
            Shape::Containment { many: true, .. } => Value::List(Vec::new()),
            Shape::Containment { .. } | Shape::Reference { .. } => Value::None,
        }
    }

    /// Human-readable shape, used in type mismatch messages.
    #[must_use]
    pub fn expected(&self, catalog: &Catalog) -> String {
        match self.shape {
            Shape::Attribute { data_type, .. } => data_type.name().to_string(),
            Shape::Containment { target, many, .. } => {
                if many {
                    format!("list of {}", catalog.kind_name(target))
                } else {
                    catalog.kind_name(target).to_string()
                }
            }
            Shape::Reference { target } => format!("reference to {}", catalog.kind_name(target)),
        }
    }
}

/// Catalog entry of one node kind.
#[derive(Debug)]
pub struct KindDef {
    pub name: &'static str,
    /// Structural mixins; their features head this kind's feature list.
    pub supertypes: &'static [KindId],
    pub features: &'static [Feature],
    pub is_abstract: bool,
}

#[derive(Debug)]
pub struct Catalog {
    pub name: &'static str,
    pub namespace_uri: &'static str,
    pub kinds: &'static [KindDef],
    pub enums: &'static [&'static EnumDef],
}

impl Catalog {
    #[must_use]
    pub fn kind(&self, kind: KindId) -> Option<&KindDef> {
        self.kinds.get(kind.index())
    }

    #[must_use]
    pub fn kind_name(&self, kind: KindId) -> &'static str {
        self.kinds.get(kind.index()).map_or("<unknown>", |def| def.name)
    }

    /// Ordered features of `kind`.
    pub fn features_of(&self, kind: KindId) -> ModelResult<&'static [Feature]> {
        self.kinds
            .get(kind.index())
            .map(|def| def.features)
            .ok_or_else(|| ModelError::UnknownKind(format!("#{}", kind.0)))
    }

    pub fn feature(&self, kind: KindId, feature: FeatureId) -> ModelResult<&'static Feature> {
        let def = self.kinds.get(kind.index());
        def.and_then(|def| def.features.get(feature.index()))
            .ok_or(ModelError::UnsupportedFeature {
                kind: self.kind_name(kind),
                feature,
            })
    }

    pub fn default_of(&self, kind: KindId, feature: FeatureId) -> ModelResult<Value> {
        Ok(self.feature(kind, feature)?.default_value())
    }

    #[must_use]
    pub fn kind_by_name(&self, name: &str) -> Option<KindId> {
        self.kinds
            .iter()
            .position(|def| def.name == name)
            .and_then(|idx| u16::try_from(idx).ok())
            .map(KindId)
    }

    #[must_use]
    pub fn feature_by_name(&self, kind: KindId, name: &str) -> Option<&'static Feature> {
        self.kinds
            .get(kind.index())
            .and_then(|def| def.features.iter().find(|f| f.name == name))
    }

    /// `kind` equals `ancestor` or inherits it through supertypes.
    #[must_use]
    pub fn is_a(&self, kind: KindId, ancestor: KindId) -> bool {
        if kind == ancestor {
            return true;
        }
        self.kinds
            .get(kind.index())
            .is_some_and(|def| def.supertypes.iter().any(|sup| self.is_a(*sup, ancestor)))
    }

    #[must_use]
    pub fn enum_by_name(&self, name: &str) -> Option<&'static EnumDef> {
        self.enums.iter().copied().find(|def| def.name == name)
    }

    /// Checks the structural rules every catalog must obey: feature ids equal
    /// positions, supertype features head the inheriting kind in the same
    /// order, and every target names a kind of this catalog.
    pub fn validate(&self) -> ModelResult<()> {
        let invalid = |reason: String| ModelError::InvalidCatalog {
            catalog: self.name,
            reason,
        };
        for def in self.kinds {
            for (position, feature) in def.features.iter().enumerate() {
                if feature.id.index() != position {
                    return Err(invalid(format!(
                        "`{}.{}` has id {} but sits at position {position}",
                        def.name, feature.name, feature.id
                    )));
                }
                if let Some(target) = feature.target() {
                    if self.kind(target).is_none() {
                        return Err(invalid(format!(
                            "`{}.{}` targets unknown kind {}",
                            def.name, feature.name, target.0
                        )));
                    }
                }
            }
            let mut offset = 0;
            for sup in def.supertypes {
                let Some(sup_def) = self.kind(*sup) else {
                    return Err(invalid(format!(
                        "`{}` extends unknown kind {}",
                        def.name, sup.0
                    )));
                };
                for inherited in sup_def.features {
                    let own = def.features.get(offset + inherited.id.index());
                    if own.is_none_or(|own| own.name != inherited.name) {
                        return Err(invalid(format!(
                            "`{}` does not start with the features of `{}`",
                            def.name, sup_def.name
                        )));
                    }
                }
                offset += sup_def.features.len();
            }
        }
        Ok(())
    }
}
