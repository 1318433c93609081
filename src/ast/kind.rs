//! ESTree node kinds and the walk-order table

use std::fmt;
use std::str::FromStr;

macro_rules! node_kinds {
    ($($variant:ident),* $(,)?) => {
        /// Tag identifying the shape of an ESTree node.
        ///
        /// Every tag the walker knows how to descend into has its own variant.
        /// Tags outside that set are preserved as [`NodeKind::Unknown`].
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeKind {
            $($variant,)*
            Unknown(String),
        }

        impl NodeKind {
            /// All kinds covered by the walk-order table.
            pub const KNOWN: &'static [NodeKind] = &[$(NodeKind::$variant,)*];

            pub fn as_str(&self) -> &str {
                match self {
                    $(NodeKind::$variant => stringify!($variant),)*
                    NodeKind::Unknown(tag) => tag,
                }
            }
        }

        impl FromStr for NodeKind {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(match s {
                    $(stringify!($variant) => NodeKind::$variant,)*
                    other => NodeKind::Unknown(other.to_string()),
                })
            }
        }
    };
}

node_kinds! {
    AwaitExpression,
    ArrayExpression,
    ArrayPattern,
    ArrowFunctionExpression,
    AssignmentExpression,
    AssignmentPattern,
    BinaryExpression,
    BlockStatement,
    BreakStatement,
    CallExpression,
    CatchClause,
    ClassBody,
    ClassDeclaration,
    ClassExpression,
    ChainExpression,
    ConditionalExpression,
    ContinueStatement,
    DebuggerStatement,
    DoWhileStatement,
    EmptyStatement,
    ExpressionStatement,
    ForInStatement,
    ForOfStatement,
    ForStatement,
    FunctionDeclaration,
    FunctionExpression,
    // Root wrapper emitted by `@babel/parser` with the estree plugin.
    File,
    Identifier,
    ImportDeclaration,
    ImportDefaultSpecifier,
    ImportNamespaceSpecifier,
    ImportSpecifier,
    ImportExpression,
    ExportAllDeclaration,
    ExportDefaultDeclaration,
    ExportNamedDeclaration,
    ExportSpecifier,
    IfStatement,
    LabeledStatement,
    Literal,
    LogicalExpression,
    MemberExpression,
    MetaProperty,
    MethodDefinition,
    NewExpression,
    ObjectExpression,
    ObjectPattern,
    ParenthesizedExpression,
    Program,
    Property,
    RestElement,
    ReturnStatement,
    SequenceExpression,
    SpreadElement,
    Super,
    SwitchCase,
    SwitchStatement,
    TaggedTemplateExpression,
    TemplateElement,
    TemplateLiteral,
    ThisExpression,
    ThrowStatement,
    TryStatement,
    UnaryExpression,
    UpdateExpression,
    VariableDeclaration,
    VariableDeclarator,
    WhileStatement,
    WithStatement,
    YieldExpression,
}

impl NodeKind {
    pub fn is_unknown(&self) -> bool {
        matches!(self, NodeKind::Unknown(_))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Child-bearing fields of `kind`, in the order the walker visits them.
///
/// Returns `None` only for [`NodeKind::Unknown`]. `TemplateLiteral` lists
/// its fields here for completeness, but the walker interleaves them.
pub fn walk_order(kind: &NodeKind) -> Option<&'static [&'static str]> {
    use NodeKind::*;

    let fields: &'static [&'static str] = match kind {
        AwaitExpression => &["argument"],
        ArrayExpression => &["elements"],
        ArrayPattern => &["elements"],
        ArrowFunctionExpression => &["params", "body"],
        AssignmentExpression => &["left", "right"],
        AssignmentPattern => &["left", "right"],
        BinaryExpression => &["left", "right"],
        BlockStatement => &["body"],
        BreakStatement => &["label"],
        CallExpression => &["callee", "arguments"],
        CatchClause => &["param", "body"],
        ClassBody => &["body"],
        ClassDeclaration => &["id", "superClass", "body"],
        ClassExpression => &["id", "superClass", "body"],
        ChainExpression => &["expression"],
        ConditionalExpression => &["test", "consequent", "alternate"],
        ContinueStatement => &["label"],
        DebuggerStatement => &[],
        DoWhileStatement => &["body", "test"],
        EmptyStatement => &[],
        ExpressionStatement => &["expression"],
        ForInStatement => &["left", "right", "body"],
        ForOfStatement => &["left", "right", "body"],
        ForStatement => &["init", "test", "update", "body"],
        FunctionDeclaration => &["id", "params", "body"],
        File => &["program"],
        FunctionExpression => &["id", "params", "body"],
        Identifier => &[],
        ImportDeclaration => &["specifiers", "source"],
        ImportDefaultSpecifier => &["local"],
        ImportNamespaceSpecifier => &["local"],
        ImportSpecifier => &["imported", "local"],
        ImportExpression => &["source"],
        ExportAllDeclaration => &["source"],
        ExportDefaultDeclaration => &["declaration"],
        ExportNamedDeclaration => &["specifiers", "source", "declaration"],
        ExportSpecifier => &["exported", "local"],
        IfStatement => &["test", "consequent", "alternate"],
        LabeledStatement => &["label", "body"],
        Literal => &[],
        LogicalExpression => &["left", "right"],
        MemberExpression => &["object", "property"],
        MetaProperty => &["meta", "property"],
        MethodDefinition => &["key", "value"],
        NewExpression => &["callee", "arguments"],
        ObjectExpression => &["properties"],
        ObjectPattern => &["properties"],
        ParenthesizedExpression => &["expression"],
        Program => &["body"],
        Property => &["key", "value"],
        RestElement => &["argument"],
        ReturnStatement => &["argument"],
        SequenceExpression => &["expressions"],
        SpreadElement => &["argument"],
        Super => &[],
        SwitchCase => &["test", "consequent"],
        SwitchStatement => &["discriminant", "cases"],
        TaggedTemplateExpression => &["tag", "quasi"],
        TemplateElement => &[],
        TemplateLiteral => &["quasis", "expressions"],
        ThisExpression => &[],
        ThrowStatement => &["argument"],
        TryStatement => &["block", "handler", "finalizer"],
        UnaryExpression => &["argument"],
        UpdateExpression => &["argument"],
        VariableDeclaration => &["declarations"],
        VariableDeclarator => &["id", "init"],
        WhileStatement => &["test", "body"],
        WithStatement => &["object", "body"],
        YieldExpression => &["argument"],
        Unknown(_) => return None,
    };
    Some(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kind() {
        let kind: NodeKind = "TemplateLiteral".parse().unwrap();
        assert_eq!(kind, NodeKind::TemplateLiteral);
        assert_eq!(kind.as_str(), "TemplateLiteral");
    }

    #[test]
    fn test_parse_unknown_kind_keeps_tag() {
        let kind: NodeKind = "JSXElement".parse().unwrap();
        assert_eq!(kind, NodeKind::Unknown("JSXElement".to_string()));
        assert_eq!(kind.to_string(), "JSXElement");
        assert!(kind.is_unknown());
        assert!(walk_order(&kind).is_none());
    }

    #[test]
    fn test_every_known_kind_has_walk_order() {
        assert_eq!(NodeKind::KNOWN.len(), 70);
        for kind in NodeKind::KNOWN {
            assert!(walk_order(kind).is_some(), "{} has no walk order", kind);
            let reparsed: NodeKind = kind.as_str().parse().unwrap();
            assert_eq!(&reparsed, kind);
        }
    }

    #[test]
    fn test_walk_order_field_sequence() {
        assert_eq!(
            walk_order(&NodeKind::ForStatement),
            Some(&["init", "test", "update", "body"][..])
        );
        assert_eq!(walk_order(&NodeKind::Identifier), Some(&[] as &[&str]));
    }

    #[test]
    fn test_babel_file_root_descends_into_program() {
        let kind: NodeKind = "File".parse().unwrap();
        assert_eq!(kind, NodeKind::File);
        assert_eq!(walk_order(&kind), Some(&["program"][..]));
    }
}
