//! Per-language tables of tree-sitter node-kind names, so the generic
//! extraction walkers don't hard-code one grammar's vocabulary.

use crate::features::parsing::LanguageId;

#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolKinds {
    pub import: &'static [&'static str],
    pub class: &'static [&'static str],
    pub interface: &'static [&'static str],
    pub function: &'static [&'static str],
    pub method: &'static [&'static str],
    pub field: &'static [&'static str],
    pub variable: &'static [&'static str],
    pub constant: &'static [&'static str],
    pub enum_decl: &'static [&'static str],
    pub enum_member: &'static [&'static str],
    pub constructor: &'static [&'static str],
    pub decorator: &'static [&'static str],
    pub package: &'static [&'static str],
    pub call: &'static [&'static str],
    /// Node kinds that each add one to cyclomatic complexity.
    pub decision_points: &'static [&'static str],
    /// Node kind whose first identifier-shaped child is the declared name.
    pub name_child_kinds: &'static [&'static str],
    /// Child node kind(s) of a class/interface declaration holding its
    /// superclass reference(s) (e.g. TypeScript's `extends_clause`, Java's
    /// `superclass`, Python's base-class `argument_list`).
    pub heritage_extends: &'static [&'static str],
    /// Child node kind(s) holding implemented-interface references (e.g.
    /// TypeScript's `implements_clause`, Java's `super_interfaces`).
    pub heritage_implements: &'static [&'static str],
}

pub fn symbol_kinds(language: LanguageId) -> SymbolKinds {
    match language {
        LanguageId::TypeScript | LanguageId::Tsx | LanguageId::JavaScript => SymbolKinds {
            import: &["import_statement"],
            class: &["class_declaration"],
            interface: &["interface_declaration"],
            function: &["function_declaration"],
            method: &["method_definition"],
            field: &["public_field_definition", "property_signature"],
            variable: &["variable_declarator"],
            constant: &[],
            enum_decl: &["enum_declaration"],
            enum_member: &["enum_assignment", "property_identifier"],
            constructor: &[],
            decorator: &["decorator"],
            package: &[],
            call: &["call_expression"],
            decision_points: &[
                "if_statement",
                "for_statement",
                "for_in_statement",
                "while_statement",
                "do_statement",
                "switch_case",
                "catch_clause",
                "ternary_expression",
                "binary_expression",
            ],
            name_child_kinds: &["identifier", "type_identifier", "property_identifier"],
            heritage_extends: &["extends_clause"],
            heritage_implements: &["implements_clause"],
        },
        LanguageId::Java => SymbolKinds {
            import: &["import_declaration"],
            class: &["class_declaration"],
            interface: &["interface_declaration"],
            function: &[],
            method: &["method_declaration"],
            field: &["field_declaration"],
            variable: &["local_variable_declaration"],
            constant: &[],
            enum_decl: &["enum_declaration"],
            enum_member: &["enum_constant"],
            constructor: &["constructor_declaration"],
            decorator: &["annotation", "marker_annotation"],
            package: &["package_declaration"],
            call: &["method_invocation"],
            decision_points: &[
                "if_statement",
                "for_statement",
                "enhanced_for_statement",
                "while_statement",
                "do_statement",
                "switch_label",
                "catch_clause",
                "ternary_expression",
            ],
            name_child_kinds: &["identifier", "type_identifier"],
            heritage_extends: &["superclass"],
            heritage_implements: &["super_interfaces"],
        },
        LanguageId::Python => SymbolKinds {
            import: &["import_statement", "import_from_statement"],
            class: &["class_definition"],
            interface: &[],
            function: &["function_definition"],
            method: &[],
            field: &[],
            variable: &["assignment"],
            constant: &[],
            enum_decl: &[],
            enum_member: &[],
            constructor: &[],
            decorator: &["decorator"],
            package: &[],
            call: &["call"],
            decision_points: &[
                "if_statement",
                "for_statement",
                "while_statement",
                "except_clause",
                "conditional_expression",
                "boolean_operator",
            ],
            name_child_kinds: &["identifier"],
            heritage_extends: &["argument_list"],
            heritage_implements: &[],
        },
        LanguageId::Go => SymbolKinds {
            import: &["import_spec"],
            class: &["type_spec"],
            interface: &["type_spec"],
            function: &["function_declaration"],
            method: &["method_declaration"],
            field: &["field_declaration"],
            variable: &["var_spec"],
            constant: &["const_spec"],
            enum_decl: &[],
            enum_member: &[],
            constructor: &[],
            decorator: &[],
            package: &["package_clause"],
            call: &["call_expression"],
            decision_points: &[
                "if_statement",
                "for_statement",
                "expression_case",
                "type_case",
                "communication_case",
            ],
            name_child_kinds: &["identifier", "package_identifier", "type_identifier"],
            heritage_extends: &[],
            heritage_implements: &[],
        },
        LanguageId::Markdown | LanguageId::External | LanguageId::Unknown => SymbolKinds::default(),
    }
}
