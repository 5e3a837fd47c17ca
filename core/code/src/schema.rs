//! The SPL source-code catalog.
//!
//! Three kinds act as structural mixins: `SourceLocation` (a line/column
//! position), `ExtendedSourceLocation` (a start/end span) and
//! `SplDocDescription` (a documentation text). They are instantiable like any
//! other kind, and their features head the feature list of every kind that
//! mixes them in.

use spldoc_model::{Catalog, DataType, Document, EnumDef, Feature, KindDef, KindId, Literal, NodeId};

use crate::enums::{
    COMPOSITE_MODIFIER_ENUM, COMPOSITE_PARAMETER_EXPRESSION_MODE_ENUM, ENUMS, FUNCTION_MODIFIER_ENUM,
    FUNCTION_PARAMETER_MODIFIER_ENUM, TYPE_MODIFIER_ENUM, WINDOW_POLICY_KIND_ENUM, WINDOW_TYPE_ENUM,
};

pub const NAMESPACE_URI: &str = "http://www.ibm.com/xmlns/prod/streams/spl/sourceCode";

const fn string(id: u16, name: &'static str, required: bool) -> Feature {
    Feature::attribute(id, name, DataType::String, required)
}

const fn integer(id: u16, name: &'static str, required: bool) -> Feature {
    Feature::attribute(id, name, DataType::Integer, required)
}

const fn unsigned_long(id: u16, name: &'static str, required: bool) -> Feature {
    Feature::attribute(id, name, DataType::UnsignedLong, required)
}

/// Optional boolean, `false` until set.
const fn flag(id: u16, name: &'static str) -> Feature {
    Feature::unsettable(id, name, DataType::Boolean, Literal::Bool(false))
}

/// Optional enumeration, defaulting to its first literal.
const fn choice(id: u16, name: &'static str, def: &'static EnumDef) -> Feature {
    Feature::unsettable(id, name, DataType::Enum(def), Literal::EnumOrdinal(0))
}

const fn child(id: u16, name: &'static str, kind: NodeKind, required: bool) -> Feature {
    Feature::child(id, name, kind.id(), required)
}

const fn children(id: u16, name: &'static str, kind: NodeKind, required: bool) -> Feature {
    Feature::children(id, name, kind.id(), required)
}

/// Features every kind mixing in the named kind starts with, handed back to
/// `code_kinds!` for splicing.
macro_rules! mixin_features {
    (SourceLocation => code_kinds! { @splice $($args:tt)* }) => {
        code_kinds! { @splice [
            0 COLUMN "column" => integer(true),
            1 LINE "line" => integer(true),
        ] $($args)* }
    };
    (ExtendedSourceLocation => code_kinds! { @splice $($args:tt)* }) => {
        code_kinds! { @splice [
            0 END_COLUMN "endColumn" => integer(true),
            1 END_LINE "endLine" => integer(true),
            2 START_COLUMN "startColumn" => integer(true),
            3 START_LINE "startLine" => integer(true),
        ] $($args)* }
    };
    (SplDocDescription => code_kinds! { @splice $($args:tt)* }) => {
        code_kinds! { @splice [
            0 DESCRIPTION "description" => string(false),
        ] $($args)* }
    };
}

code_kinds! {
    catalog "code", NAMESPACE_URI, &ENUMS;

    mixin SourceLocation("SourceLocationType", source_location, visit_source_location);
    mixin ExtendedSourceLocation("ExtendedSourceLocationType", extended_source_location, visit_extended_source_location);
    mixin SplDocDescription("SplDocDescriptionType", spl_doc_description, visit_spl_doc_description);

    /// Root of a loaded source model: one entry per source file.
    SourceModel("SourceModelType", source_model, visit_source_model) {
        0 SOURCE_FILE "sourceFile" => children(NodeKind::SourceFile, false),
    }

    SourceFile("SourceFileType", source_file, visit_source_file) {
        0 COMPILATION_UNIT "compilationUnit" => child(NodeKind::CompilationUnit, true),
        1 URI "uri" => string(true),
    }

    CompilationUnit("CompilationUnitType", compilation_unit, visit_compilation_unit) {
        0 SPL_DOC "splDoc" => child(NodeKind::SplDoc, false),
        1 SPL_NAMESPACE "splNamespace" => child(NodeKind::SplNamespace, false),
        2 USE_DIRECTIVES "useDirectives" => child(NodeKind::UseDirectives, false),
        3 DEFINITIONS "definitions" => child(NodeKind::Definitions, false),
    }

    SplNamespace("SplNamespaceType", spl_namespace, visit_spl_namespace): SourceLocation {
        2 SPL_DOC "splDoc" => child(NodeKind::SplDoc, false),
        3 NAME "name" => string(true),
    }

    UseDirectives("UseDirectivesType", use_directives, visit_use_directives) {
        0 USE_DIRECTIVE "useDirective" => children(NodeKind::UseDirective, true),
    }

    UseDirective("UseDirectiveType", use_directive, visit_use_directive): SourceLocation {
        2 NAMESPACE_NAME "namespaceName" => string(true),
        3 TAIL "tail" => string(true),
    }

    Definitions("DefinitionsType", definitions, visit_definitions) {
        0 TYPE_DEFINITION "typeDefinition" => children(NodeKind::TypeDefinition, false),
        1 FUNCTION_DEFINITION "functionDefinition" => children(NodeKind::FunctionDefinition, false),
        2 COMPOSITE_DEFINITION "compositeDefinition" => children(NodeKind::CompositeDefinition, false),
    }

    TypeDefinition("TypeDefinitionType", type_definition, visit_type_definition): ExtendedSourceLocation {
        4 SPL_DOC "splDoc" => child(NodeKind::SplDoc, false),
        5 MODIFIERS "modifiers" => child(NodeKind::TypeModifiers, false),
        6 NAME "name" => string(true),
        7 VALUE "value" => string(true),
    }

    TypeModifiers("TypeModifiersType", type_modifiers, visit_type_modifiers) {
        0 MODIFIER "modifier" => children(NodeKind::TypeModifier, false),
    }

    TypeModifier("TypeModifierType", type_modifier, visit_type_modifier) {
        0 NAME "name" => choice(&TYPE_MODIFIER_ENUM),
    }

    FunctionDefinition("FunctionDefinitionType", function_definition, visit_function_definition): ExtendedSourceLocation {
        4 FUNCTION_HEAD "functionHead" => child(NodeKind::FunctionHead, true),
        5 FUNCTION_BODY "functionBody" => string(false),
    }

    FunctionHead("FunctionHeadType", function_head, visit_function_head): SourceLocation {
        2 SPL_DOC "splDoc" => child(NodeKind::SplDoc, false),
        3 MODIFIERS "modifiers" => child(NodeKind::FunctionModifiers, false),
        4 PARAMETERS "parameters" => child(NodeKind::FunctionParameters, false),
        5 NAME "name" => string(true),
        6 RETURN_TYPE "returnType" => string(true),
    }

    FunctionModifiers("FunctionModifiersType", function_modifiers, visit_function_modifiers) {
        0 MODIFIER "modifier" => children(NodeKind::FunctionModifier, false),
    }

    FunctionModifier("FunctionModifierType", function_modifier, visit_function_modifier) {
        0 NAME "name" => choice(&FUNCTION_MODIFIER_ENUM),
    }

    FunctionParameters("FunctionParametersType", function_parameters, visit_function_parameters) {
        0 PARAMETER "parameter" => children(NodeKind::FunctionParameter, false),
    }

    FunctionParameter("FunctionParameterType", function_parameter, visit_function_parameter): SourceLocation {
        2 MODIFIERS "modifiers" => child(NodeKind::FunctionParameterModifiers, false),
        3 NAME "name" => string(true),
        4 TYPE "type" => string(true),
    }

    FunctionParameterModifiers("FunctionParameterModifiersType", function_parameter_modifiers, visit_function_parameter_modifiers) {
        0 MODIFIER "modifier" => children(NodeKind::FunctionParameterModifier, false),
    }

    FunctionParameterModifier("FunctionParameterModifierType", function_parameter_modifier, visit_function_parameter_modifier) {
        0 NAME "name" => choice(&FUNCTION_PARAMETER_MODIFIER_ENUM),
    }

    CompositeDefinition("CompositeDefinitionType", composite_definition, visit_composite_definition): ExtendedSourceLocation {
        4 COMPOSITE_HEAD "compositeHead" => child(NodeKind::CompositeHead, true),
        5 COMPOSITE_BODY "compositeBody" => child(NodeKind::CompositeBody, true),
    }

    CompositeHead("CompositeHeadType", composite_head, visit_composite_head): SourceLocation {
        2 SPL_DOC "splDoc" => child(NodeKind::SplDoc, false),
        3 MODIFIERS "modifiers" => child(NodeKind::CompositeModifiers, false),
        4 INPUTS "inputs" => child(NodeKind::CompositeInputs, false),
        5 OUTPUTS "outputs" => child(NodeKind::CompositeOutputs, false),
        6 NAME "name" => string(true),
    }

    CompositeModifiers("CompositeModifiersType", composite_modifiers, visit_composite_modifiers) {
        0 MODIFIER "modifier" => children(NodeKind::CompositeModifier, true),
    }

    CompositeModifier("CompositeModifierType", composite_modifier, visit_composite_modifier) {
        0 NAME "name" => choice(&COMPOSITE_MODIFIER_ENUM),
    }

    CompositeInputs("CompositeInputsType", composite_inputs, visit_composite_inputs) {
        0 IPORT "iport" => children(NodeKind::CompositePort, false),
    }

    CompositeOutputs("CompositeOutputsType", composite_outputs, visit_composite_outputs) {
        0 OPORT "oport" => children(NodeKind::CompositePort, false),
    }

    CompositePort("CompositePortType", composite_port, visit_composite_port): SourceLocation {
        2 INDEX "index" => unsigned_long(true),
        3 NAME "name" => string(true),
        4 TYPE "type" => string(false),
    }

    CompositeBody("CompositeBodyType", composite_body, visit_composite_body) {
        0 TYPES "types" => child(NodeKind::CompositeTypes, false),
        1 PARAMETERS "parameters" => child(NodeKind::CompositeParameters, false),
        2 GRAPH "graph" => child(NodeKind::CompositeGraph, false),
        3 CONFIGS "configs" => child(NodeKind::Configs, false),
    }

    CompositeTypes("CompositeTypesType", composite_types, visit_composite_types): SourceLocation {
        2 TYPE "type" => children(NodeKind::TypeDefinition, true),
    }

    CompositeParameters("CompositeParametersType", composite_parameters, visit_composite_parameters) {
        0 PARAMETER "parameter" => children(NodeKind::CompositeParameter, true),
    }

    CompositeParameter("CompositeParameterType", composite_parameter, visit_composite_parameter): SourceLocation {
        2 EXPRESSION_MODE "expressionMode" => child(NodeKind::CompositeParameterExpressionMode, true),
        3 DEFAULT_VALUE "defaultValue" => string(false),
        4 NAME "name" => string(true),
    }

    CompositeParameterExpressionMode("CompositeParameterExpressionModeType", composite_parameter_expression_mode, visit_composite_parameter_expression_mode) {
        0 MODE "mode" => choice(&COMPOSITE_PARAMETER_EXPRESSION_MODE_ENUM),
        1 TYPE "type" => string(false),
    }

    CompositeGraph("CompositeGraphType", composite_graph, visit_composite_graph) {
        0 OPERATOR_INVOCATION "operatorInvocation" => children(NodeKind::OperatorInvocation, true),
    }

    OperatorInvocation("OperatorInvocationType", operator_invocation, visit_operator_invocation) {
        0 OPERATOR_INVOCATION_HEAD "operatorInvocationHead" => child(NodeKind::OperatorInvocationHead, true),
        1 OPERATOR_INVOCATION_BODY "operatorInvocationBody" => child(NodeKind::OperatorInvocationBody, true),
    }

    OperatorInvocationHead("OperatorInvocationHeadType", operator_invocation_head, visit_operator_invocation_head): SourceLocation {
        2 SPL_DOC "splDoc" => child(NodeKind::SplDoc, false),
        3 OUTPUTS "outputs" => child(NodeKind::OperatorInvocationOutputs, false),
        4 INPUTS "inputs" => child(NodeKind::OperatorInvocationInputs, false),
        5 INVOCATION_ALIAS "invocationAlias" => string(false),
        6 OPERATOR_NAME "operatorName" => string(true),
    }

    OperatorInvocationInputs("OperatorInvocationInputsType", operator_invocation_inputs, visit_operator_invocation_inputs) {
        0 INPUT "input" => children(NodeKind::OperatorInvocationInput, true),
    }

    OperatorInvocationInput("OperatorInvocationInputType", operator_invocation_input, visit_operator_invocation_input): SourceLocation {
        2 ISTREAM "istream" => children(NodeKind::OperatorInvocationInputStream, true),
        3 ALIAS "alias" => string(false),
        4 INDEX "index" => unsigned_long(true),
    }

    OperatorInvocationInputStream("OperatorInvocationInputStreamType", operator_invocation_input_stream, visit_operator_invocation_input_stream): SourceLocation {
        2 NAME "name" => string(false),
    }

    OperatorInvocationOutputs("OperatorInvocationOutputsType", operator_invocation_outputs, visit_operator_invocation_outputs) {
        0 OUTPUT "output" => children(NodeKind::OperatorInvocationOutput, true),
    }

    OperatorInvocationOutput("OperatorInvocationOutputType", operator_invocation_output, visit_operator_invocation_output): SourceLocation {
        2 ALIAS "alias" => string(false),
        3 INDEX "index" => unsigned_long(true),
        4 STREAM_NAME "streamName" => string(true),
        5 TYPE "type" => string(true),
    }

    OperatorInvocationBody("OperatorInvocationBodyType", operator_invocation_body, visit_operator_invocation_body) {
        0 LOGIC "logic" => child(NodeKind::OperatorInvocationLogic, false),
        1 WINDOWS "windows" => child(NodeKind::OperatorInvocationWindows, false),
        2 PARAMETERS "parameters" => child(NodeKind::OperatorInvocationParameters, false),
        3 OUTPUT_ASSIGNMENTS "outputAssignments" => child(NodeKind::OperatorInvocationOutputAssignments, false),
        4 CONFIGS "configs" => child(NodeKind::Configs, false),
    }

    OperatorInvocationLogic("OperatorInvocationLogicType", operator_invocation_logic, visit_operator_invocation_logic) {
        0 ON_PROCESS "onProcess" => child(NodeKind::OnProcess, false),
        1 ON_TUPLE "onTuple" => children(NodeKind::OnTuple, false),
        2 ON_PUNCT "onPunct" => children(NodeKind::OnPunct, false),
        3 HAS_STATE "hasState" => flag(),
    }

    OnProcess("OnProcessType", on_process, visit_on_process): SourceLocation {
    }

    OnTuple("OnTupleType", on_tuple, visit_on_tuple): SourceLocation {
        2 PORT_NAME "portName" => string(true),
    }

    OnPunct("OnPunctType", on_punct, visit_on_punct): SourceLocation {
        2 PORT_NAME "portName" => string(true),
    }

    OperatorInvocationWindows("OperatorInvocationWindowsType", operator_invocation_windows, visit_operator_invocation_windows) {
        0 WINDOW "window" => children(NodeKind::OperatorInvocationWindow, true),
    }

    OperatorInvocationWindow("OperatorInvocationWindowType", operator_invocation_window, visit_operator_invocation_window): SourceLocation {
        2 EVICTION_POLICY "evictionPolicy" => child(NodeKind::WindowPolicy, true),
        3 TRIGGER_POLICY "triggerPolicy" => child(NodeKind::WindowPolicy, false),
        4 PARTITIONED "partitioned" => flag(),
        5 PORT_NAME "portName" => string(true),
        6 WINDOW_TYPE "windowType" => choice(&WINDOW_TYPE_ENUM),
    }

    WindowPolicy("WindowPolicyType", window_policy, visit_window_policy): SourceLocation {
        2 ATTRIBUTE "attribute" => string(false),
        3 KIND "kind" => choice(&WINDOW_POLICY_KIND_ENUM),
        4 SIZE "size" => string(false),
    }

    OperatorInvocationParameters("OperatorInvocationParametersType", operator_invocation_parameters, visit_operator_invocation_parameters) {
        0 PARAMETER "parameter" => children(NodeKind::OperatorInvocationParameter, true),
    }

    OperatorInvocationParameter("OperatorInvocationParameterType", operator_invocation_parameter, visit_operator_invocation_parameter): SourceLocation {
        2 VALUE "value" => children(NodeKind::Expression, true),
        3 NAME "name" => string(true),
    }

    Expression("ExpressionType", expression, visit_expression) {
        0 EXPR "expr" => string(true),
    }

    OperatorInvocationOutputAssignments("OperatorInvocationOutputAssignmentsType", operator_invocation_output_assignments, visit_operator_invocation_output_assignments) {
        0 OUTPUT_ASSIGNMENT "outputAssignment" => children(NodeKind::OperatorInvocationOutputAssignment, false),
    }

    OperatorInvocationOutputAssignment("OperatorInvocationOutputAssignmentType", operator_invocation_output_assignment, visit_operator_invocation_output_assignment): SourceLocation {
        2 ATTRIBUTE_ASSIGNMENT "attributeAssignment" => children(NodeKind::OperatorInvocationAttributeAssignment, true),
        3 PORT_NAME "portName" => string(true),
    }

    OperatorInvocationAttributeAssignment("OperatorInvocationAttributeAssignmentType", operator_invocation_attribute_assignment, visit_operator_invocation_attribute_assignment): SourceLocation {
        2 VALUE "value" => children(NodeKind::Expression, true),
        3 NAME "name" => string(true),
        4 OUTPUT_FUNCTION "outputFunction" => string(false),
    }

    Configs("ConfigsType", configs, visit_configs) {
        0 CONFIG "config" => children(NodeKind::Config, true),
    }

    Config("ConfigType", config, visit_config): SourceLocation {
        2 OPTION "option" => children(NodeKind::ConfigOption, true),
        3 NAME "name" => string(true),
    }

    ConfigOption("ConfigOptionType", config_option, visit_config_option): SourceLocation {
        2 PARAMETER "parameter" => children(NodeKind::ConfigValueParameter, false),
        3 VALUE "value" => string(true),
    }

    ConfigValueParameter("ConfigValueParameterType", config_value_parameter, visit_config_value_parameter) {
        0 VALUE "value" => string(true),
    }

    SplDoc("SplDocType", spl_doc, visit_spl_doc) {
        0 DESCRIPTION "description" => child(NodeKind::SplDocDescription, false),
        1 ANNOTATION "annotation" => children(NodeKind::SplDocAnnotation, false),
    }

    SplDocAnnotation("SplDocAnnotationType", spl_doc_annotation, visit_spl_doc_annotation): SplDocDescription {
        1 NAME "name" => string(false),
        2 TARGET "target" => string(false),
    }
}
