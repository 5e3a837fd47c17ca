/// Declares the node kinds of the schema in one place.
///
/// Each entry names the kind, its catalog name, the module holding its
/// feature-id constants and its visitor method. A kind declared with
/// `mixin Kind(...);` takes its features from `mixin_features!`. A kind
/// written `Kind(...): Mixin { ... }` gets the mixin's features spliced in
/// ahead of its own, whose ids continue after them. From this the macro
/// generates [`crate::NodeKind`], the `features::*` constant modules, the
/// static [`crate::CATALOG`] and the [`crate::CodeVisitor`] trait.
///
/// The invoking module must define `mixin_features!`, which expands
/// `mixin_features! { Mixin => code_kinds! { @splice ... } }` into
/// `code_kinds! { @splice [<features of Mixin>] ... }`.
macro_rules! code_kinds {
    (catalog $catalog_name:literal, $namespace_uri:expr, $enums:expr; $($kinds:tt)+) => {
        code_kinds! { @munch [$catalog_name, $namespace_uri, $enums] [] $($kinds)+ }
    };

    (@munch $header:tt [$($done:tt)*]
        $(#[$outer:meta])* mixin $kind:ident ($kind_name:literal, $module:ident, $visit:ident);
        $($rest:tt)*
    ) => {
        mixin_features! { $kind => code_kinds! {
            @splice $header [$($done)*] [$(#[$outer])* $kind ($kind_name, $module, $visit) []] {} $($rest)*
        } }
    };

    (@munch $header:tt [$($done:tt)*]
        $(#[$outer:meta])* $kind:ident ($kind_name:literal, $module:ident, $visit:ident): $mixin:ident { $($own:tt)* }
        $($rest:tt)*
    ) => {
        mixin_features! { $mixin => code_kinds! {
            @splice $header [$($done)*] [$(#[$outer])* $kind ($kind_name, $module, $visit) [$mixin]] { $($own)* } $($rest)*
        } }
    };

    (@munch $header:tt [$($done:tt)*]
        $(#[$outer:meta])* $kind:ident ($kind_name:literal, $module:ident, $visit:ident) { $($own:tt)* }
        $($rest:tt)*
    ) => {
        code_kinds! {
            @munch $header [$($done)* { [$(#[$outer])* $kind ($kind_name, $module, $visit) []] { $($own)* } }] $($rest)*
        }
    };

    (@splice [$($inherited:tt)*] $header:tt [$($done:tt)*] [$($head:tt)*] { $($own:tt)* } $($rest:tt)*) => {
        code_kinds! {
            @munch $header [$($done)* { [$($head)*] { $($inherited)* $($own)* } }] $($rest)*
        }
    };

    (@munch [$catalog_name:literal, $namespace_uri:expr, $enums:expr] [$(
        {
            [$(#[$outer:meta])* $kind:ident ($kind_name:literal, $module:ident, $visit:ident) [$($mixin:ident),*]]
            { $( $fid:literal $fconst:ident $fname:literal => $ctor:ident ( $($arg:expr),* ) ),+ $(,)? }
        }
    )+]) => {
        /// Node kinds of the SPL source-code schema. The discriminant is the
        /// kind's position in [`CATALOG`].
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[repr(u16)]
        pub enum NodeKind {
            $( $(#[$outer])* $kind ),+
        }

        impl NodeKind {
            pub const ALL: &'static [NodeKind] = &[ $( NodeKind::$kind ),+ ];

            #[must_use]
            pub const fn id(self) -> KindId {
                KindId(self as u16)
            }

            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $( NodeKind::$kind => $kind_name ),+
                }
            }

            #[must_use]
            pub fn from_id(kind: KindId) -> Option<Self> {
                Self::ALL.get(kind.index()).copied()
            }

            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|kind| kind.name() == name)
            }

            /// Direct mixins of this kind.
            #[must_use]
            pub fn mixins(self) -> &'static [NodeKind] {
                match self {
                    $( NodeKind::$kind => &[ $( NodeKind::$mixin ),* ] ),+
                }
            }
        }

        /// Feature ids, one module per node kind.
        pub mod features {
            $(
                #[doc = concat!("Features of `", $kind_name, "`.")]
                pub mod $module {
                    use spldoc_model::FeatureId;

                    $( pub const $fconst: FeatureId = FeatureId($fid); )+
                }
            )+
        }

        pub static CATALOG: Catalog = Catalog {
            name: $catalog_name,
            namespace_uri: $namespace_uri,
            kinds: &[
                $(
                    KindDef {
                        name: $kind_name,
                        supertypes: &[ $( NodeKind::$mixin.id() ),* ],
                        features: &[ $( $ctor($fid, $fname, $($arg),*) ),+ ],
                        is_abstract: false,
                    }
                ),+
            ],
            enums: $enums,
        };

        /// Per-kind callbacks over a code document.
        ///
        /// Every method returns `None` by default, meaning "not handled". The
        /// dispatcher in [`crate::visitor`] then falls back to the methods of
        /// the node's mixins and finally to [`CodeVisitor::default_case`].
        pub trait CodeVisitor {
            type Output;

            $(
                fn $visit(&mut self, _doc: &Document, _node: NodeId) -> Option<Self::Output> {
                    None
                }
            )+

            fn default_case(&mut self, _doc: &Document, _node: NodeId) -> Option<Self::Output> {
                None
            }

            /// Calls the method of exactly `kind`, without fallback.
            fn case(&mut self, kind: NodeKind, doc: &Document, node: NodeId) -> Option<Self::Output> {
                match kind {
                    $( NodeKind::$kind => self.$visit(doc, node) ),+
                }
            }
        }
    };
}
