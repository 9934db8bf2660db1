//! Mapping from SourceKit kind identifiers to component kinds.

use crate::component::ComponentType;

const PREFIX: &str = "source.lang.swift.";

/// Classifies a SourceKit kind string. Unknown kinds become [`ComponentType::Other`].
#[must_use]
pub fn component_type(uid: &str) -> ComponentType {
    let Some(kind) = uid.strip_prefix(PREFIX) else {
        return ComponentType::Other;
    };

    match kind {
        "decl.function.free"
        | "ref.function.free"
        | "decl.function.method.instance"
        | "ref.function.method.instance"
        | "decl.function.method.static"
        | "ref.function.method.static"
        | "decl.function.method.class"
        | "ref.function.method.class"
        | "decl.function.constructor"
        | "ref.function.constructor"
        | "decl.function.destructor"
        | "ref.function.destructor" => ComponentType::Function,

        "decl.var.global"
        | "ref.var.global"
        | "decl.var.instance"
        | "ref.var.instance"
        | "decl.var.static"
        | "ref.var.static"
        | "decl.var.class"
        | "ref.var.class"
        | "decl.var.local"
        | "ref.var.local" => ComponentType::Variable,

        "decl.class" | "ref.class" => ComponentType::Class,
        "decl.struct" | "ref.struct" => ComponentType::Struct,
        "decl.enum" | "ref.enum" => ComponentType::Enum,
        "decl.protocol" | "ref.protocol" => ComponentType::Protocol,
        "decl.extension"
        | "decl.extension.struct"
        | "decl.extension.class"
        | "decl.extension.enum"
        | "decl.extension.protocol" => ComponentType::Extension,

        "decl.var.parameter" | "ref.generic_type_param" => ComponentType::Parameter,

        "stmt.foreach" | "stmt.for" => ComponentType::For,
        "stmt.while" => ComponentType::While,
        "stmt.repeatwhile" => ComponentType::Repeat,
        "stmt.if" => ComponentType::If,
        "stmt.guard" => ComponentType::Guard,
        "stmt.switch" => ComponentType::Switch,
        "stmt.case" => ComponentType::Case,
        "stmt.brace" => ComponentType::Brace,
        "expr.call" | "expr.closure" => ComponentType::Closure,

        "syntaxtype.comment" | "syntaxtype.doccomment" => ComponentType::Comment,

        _ => ComponentType::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declarations() {
        assert_eq!(
            component_type("source.lang.swift.decl.function.method.instance"),
            ComponentType::Function
        );
        assert_eq!(
            component_type("source.lang.swift.decl.function.constructor"),
            ComponentType::Function
        );
        assert_eq!(component_type("source.lang.swift.decl.var.local"), ComponentType::Variable);
        assert_eq!(
            component_type("source.lang.swift.decl.extension.class"),
            ComponentType::Extension
        );
        assert_eq!(
            component_type("source.lang.swift.ref.generic_type_param"),
            ComponentType::Parameter
        );
    }

    #[test]
    fn test_statements_and_expressions() {
        assert_eq!(component_type("source.lang.swift.stmt.foreach"), ComponentType::For);
        assert_eq!(component_type("source.lang.swift.stmt.repeatwhile"), ComponentType::Repeat);
        assert_eq!(component_type("source.lang.swift.stmt.brace"), ComponentType::Brace);
        assert_eq!(component_type("source.lang.swift.expr.call"), ComponentType::Closure);
        assert_eq!(
            component_type("source.lang.swift.syntaxtype.doccomment"),
            ComponentType::Comment
        );
    }

    #[test]
    fn test_unknown_kinds_are_other() {
        assert_eq!(component_type("source.lang.swift.expr.array"), ComponentType::Other);
        assert_eq!(
            component_type("source.lang.swift.decl.enumelement"),
            ComponentType::Other
        );
        assert_eq!(component_type("source.lang.swift.syntaxtype.keyword"), ComponentType::Other);
        assert_eq!(component_type("not a kind"), ComponentType::Other);
        assert_eq!(component_type(""), ComponentType::Other);
    }
}
