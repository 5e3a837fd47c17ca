//! Enumerations of the SPL source-code schema.
//!
//! Each enumeration exists twice: as a static [`EnumDef`] the catalog and the
//! generic interface work with, and as a plain Rust enum for callers that
//! know the schema. The two convert into each other.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use spldoc_model::{EnumDef, EnumLiteral, EnumValue, ModelError, ModelResult, Value};

macro_rules! code_enums {
    (
        $(
            $(#[$outer:meta])*
            $name:ident => $def:ident ($def_name:literal) {
                $( $variant:ident = $value:literal ($symbol:literal, $literal:literal) ),+ $(,)?
            }
        )+
    ) => {
        $(
            pub static $def: EnumDef = EnumDef {
                name: $def_name,
                literals: &[
                    $( EnumLiteral { name: $symbol, literal: $literal, value: $value } ),+
                ],
            };

            $(#[$outer])*
            #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
            pub enum $name {
                $( $variant = $value ),+
            }

            impl $name {
                pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

                #[must_use]
                pub fn def() -> &'static EnumDef {
                    &$def
                }

                #[must_use]
                pub fn value(self) -> i32 {
                    self as i32
                }

                #[must_use]
                pub fn literal(self) -> &'static str {
                    match self {
                        $( $name::$variant => $literal ),+
                    }
                }

                #[must_use]
                pub fn symbol(self) -> &'static str {
                    match self {
                        $( $name::$variant => $symbol ),+
                    }
                }
            }

            impl Display for $name {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    f.write_str(self.literal())
                }
            }

            impl FromStr for $name {
                type Err = ModelError;

                fn from_str(text: &str) -> ModelResult<Self> {
                    $def.parse(text).and_then(Self::try_from)
                }
            }

            impl TryFrom<EnumValue> for $name {
                type Error = ModelError;

                fn try_from(value: EnumValue) -> ModelResult<Self> {
                    if !std::ptr::eq(value.def(), &$def) {
                        return Err(ModelError::UnknownLiteral {
                            enumeration: $def_name,
                            literal: value.literal().to_string(),
                        });
                    }
                    Self::ALL
                        .iter()
                        .copied()
                        .find(|variant| variant.value() == value.value())
                        .ok_or_else(|| ModelError::UnknownLiteral {
                            enumeration: $def_name,
                            literal: value.literal().to_string(),
                        })
                }
            }

            impl From<$name> for Value {
                fn from(variant: $name) -> Self {
                    $def.by_value(variant.value()).map_or(Value::None, Value::Enum)
                }
            }
        )+
    };
}

code_enums! {
    /// Modifier of a composite operator definition.
    CompositeModifier => COMPOSITE_MODIFIER_ENUM ("CompositeModifierEnumType") {
        Public = 0 ("PUBLIC", "public"),
    }

    /// How a composite parameter is passed in.
    CompositeParameterExpressionMode => COMPOSITE_PARAMETER_EXPRESSION_MODE_ENUM ("CompositeParameterExpressionModeEnumType") {
        Operator = 0 ("OPERATOR", "operator"),
        Function = 1 ("FUNCTION", "function"),
        Attribute = 2 ("ATTRIBUTE", "attribute"),
        Expression = 3 ("EXPRESSION", "expression"),
        Type = 4 ("TYPE", "type"),
    }

    FunctionModifier => FUNCTION_MODIFIER_ENUM ("FunctionModifierEnumType") {
        Public = 0 ("PUBLIC", "public"),
        Stateful = 1 ("STATEFUL", "stateful"),
    }

    FunctionParameterModifier => FUNCTION_PARAMETER_MODIFIER_ENUM ("FunctionParameterModifierEnumType") {
        Mutable = 0 ("MUTABLE", "mutable"),
    }

    TypeModifier => TYPE_MODIFIER_ENUM ("TypeModifierEnumType") {
        Public = 0 ("PUBLIC", "public"),
        Static = 1 ("STATIC", "static"),
    }

    /// Eviction or trigger policy of an operator window.
    WindowPolicyKind => WINDOW_POLICY_KIND_ENUM ("WindowPolicyKindEnumType") {
        Count = 0 ("COUNT", "count"),
        Time = 1 ("TIME", "time"),
        Delta = 2 ("DELTA", "delta"),
        Punct = 3 ("PUNCT", "punct"),
    }

    WindowType => WINDOW_TYPE_ENUM ("WindowTypeEnumType") {
        Tumbling = 0 ("TUMBLING", "tumbling"),
        Sliding = 1 ("SLIDING", "sliding"),
    }
}

/// Every enumeration of the schema, in catalog order.
pub static ENUMS: [&EnumDef; 7] = [
    &COMPOSITE_MODIFIER_ENUM,
    &COMPOSITE_PARAMETER_EXPRESSION_MODE_ENUM,
    &FUNCTION_MODIFIER_ENUM,
    &FUNCTION_PARAMETER_MODIFIER_ENUM,
    &TYPE_MODIFIER_ENUM,
    &WINDOW_POLICY_KIND_ENUM,
    &WINDOW_TYPE_ENUM,
];
