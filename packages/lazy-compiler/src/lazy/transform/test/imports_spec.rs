use crate::config::options::ModuleConvention;
use crate::lazy::transform::*;
use oxc_allocator::Allocator;
use oxc_codegen::Codegen;
use oxc_parser::Parser;
use oxc_span::SourceType;

fn squash(code: &str) -> String {
    code.chars().filter(|c| !c.is_whitespace()).collect::<String>().replace('\'', "\"")
}

#[test]
fn builds_combined_core_import() {
    let apis = CoreRuntimeApis::REGISTER_INSTANCE | CoreRuntimeApis::GET_ELEMENT;

    assert_eq!(
        core_runtime_statement(ModuleConvention::Esm, "@stencil/core", apis).unwrap(),
        "import { registerInstance as __stencil_registerInstance, getElement as __stencil_getElement } from \"@stencil/core\";"
    );
    assert_eq!(
        core_runtime_statement(ModuleConvention::Cjs, "@stencil/core", CoreRuntimeApis::REGISTER_INSTANCE).unwrap(),
        "const { registerInstance: __stencil_registerInstance } = require(\"@stencil/core\");"
    );
    assert!(core_runtime_statement(ModuleConvention::Esm, "@stencil/core", CoreRuntimeApis::empty()).is_none());
}

#[test]
fn finds_insertion_point_after_imports() {
    let allocator = Allocator::default();
    let source = "import a from 'a'; import { b } from 'b'; const c = 1;";
    let program = Parser::new(&allocator, source, SourceType::mjs()).parse().program;
    assert_eq!(after_last_import(&program), 2);

    let source = "const c = 1;";
    let program = Parser::new(&allocator, source, SourceType::mjs()).parse().program;
    assert_eq!(after_last_import(&program), 0);
}

#[test]
fn prunes_unused_decorator_specifiers() {
    let allocator = Allocator::default();
    let source = r#"
        import { Component, Element, h, Prop } from '@stencil/core';
        import { Element as Other } from 'elsewhere';
        class CmpA { @Prop() value; }
    "#;
    let source_type = SourceType::default().with_typescript(true).with_module(true);
    let mut program = Parser::new(&allocator, source, source_type).parse().program;

    let removed = prune_erased_decorator_imports(&mut program, "@stencil/core");
    let code = squash(&Codegen::new().build(&program).code);

    assert_eq!(removed, 2);
    assert!(code.starts_with("import{h,Prop}from\"@stencil/core\";"));
    assert!(code.contains("import{ElementasOther}from\"elsewhere\";"));
}

#[test]
fn keeps_specifiers_still_used_by_skipped_classes() {
    let allocator = Allocator::default();
    let source = r#"
        import { Component } from '@stencil/core';
        @Component({ styleUrls: ['a.css'] }) class Broken {}
    "#;
    let source_type = SourceType::default().with_typescript(true).with_module(true);
    let mut program = Parser::new(&allocator, source, source_type).parse().program;

    assert_eq!(prune_erased_decorator_imports(&mut program, "@stencil/core"), 0);
    assert_eq!(program.body.len(), 2);
}

#[test]
fn drops_imports_left_empty() {
    let allocator = Allocator::default();
    let source = "import { Component, AttachInternals } from '@my/core'; import '@my/core'; const x = 1;";
    let mut program = Parser::new(&allocator, source, SourceType::mjs()).parse().program;

    assert_eq!(prune_erased_decorator_imports(&mut program, "@my/core"), 2);
    let code = squash(&Codegen::new().build(&program).code);
    assert_eq!(code, "import\"@my/core\";constx=1;");
}

#[test]
fn collects_module_binding_names() {
    let allocator = Allocator::default();
    let source = r#"
        import def, { a, b as c } from "x";
        import * as ns from "y";
        const { d, e: [f] } = g;
        export let h = 1;
        function i() {}
        export class J {}
        export default function K() {}
        if (z) { const inner = 1; }
    "#;
    let program = Parser::new(&allocator, source, SourceType::mjs()).parse().program;

    assert_eq!(
        module_binding_names(&program),
        vec!["def", "a", "c", "ns", "d", "f", "h", "i", "J", "K"]
    );
}
