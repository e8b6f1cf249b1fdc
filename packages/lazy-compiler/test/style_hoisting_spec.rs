//! Style hoisting through the full pass.

use lazy_compiler::lazy::logging::NullLogger;
use lazy_compiler::{transform_module, ModuleConvention, StyleMode, TransformOptions};

fn squash(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .replace('\'', "\"")
}

fn transform(source: &str, options: &TransformOptions) -> String {
    let output = transform_module(source, "cmp.ts", options, &NullLogger).expect("transform");
    squash(&output.code)
}

const CLASS_BODY: &str =
    "constCmpA=class{constructor(hostRef){__stencil_registerInstance(this,hostRef);}};";

#[test]
fn imports_each_style_and_concatenates() {
    let source = r#"
        import { Component } from '@stencil/core';
        @Component({ tag: 'cmp-a', styleUrls: ['./foo/bar.css', './bar/foo.css'] })
        export class CmpA {}
    "#;
    let code = transform(source, &TransformOptions::default());

    assert_eq!(
        code,
        format!(
            "import{{registerInstanceas__stencil_registerInstance}}from\"@stencil/core\";\
             importCMP_A__foo_bar_cssfrom\"./foo/bar.css\";\
             importCMP_A__bar_foo_cssfrom\"./bar/foo.css\";\
             export{}\
             CmpA.style=CMP_A__foo_bar_css+CMP_A__bar_foo_css;",
            CLASS_BODY
        )
    );
}

#[test]
fn collapses_duplicate_paths() {
    let source = r#"
        @Component({ tag: 'cmp-a', styleUrls: ['./foo/bar.css', './foo/bar.css'] })
        export class CmpA {}
    "#;
    let code = transform(source, &TransformOptions::default());

    assert_eq!(code.matches("from\"./foo/bar.css\"").count(), 1);
    assert!(code.ends_with("CmpA.style=CMP_A__foo_bar_css;"));
}

#[test]
fn orders_mapping_keys_and_shares_identifiers() {
    let source = r#"
        @Component({ tag: 'cmp-a', styleUrls: { foo: './a.css', bar: './b.css', loo: './b.css' } })
        export class CmpA {}
    "#;
    let code = transform(source, &TransformOptions::default());

    assert_eq!(code.matches("from\"./b.css\"").count(), 1);
    assert_eq!(code.matches("from\"./a.css\"").count(), 1);
    assert!(code.contains("importCMP_A_bar__b_cssfrom\"./b.css\";importCMP_A_foo__a_cssfrom\"./a.css\";"));
    assert!(code.ends_with(
        "CmpA.style={bar:CMP_A_bar__b_css,foo:CMP_A_foo__a_css,loo:CMP_A_bar__b_css};"
    ));
}

#[test]
fn places_style_imports_after_existing_imports() {
    let source = r#"
        import { h } from '@stencil/core';
        import { helper } from './helper';
        @Component({ tag: 'cmp-a', styleUrl: './a.css' })
        class CmpA {}
    "#;
    let code = transform(source, &TransformOptions::default());

    assert!(code.starts_with(
        "import{registerInstanceas__stencil_registerInstance}from\"@stencil/core\";\
         import{h}from\"@stencil/core\";\
         import{helper}from\"./helper\";\
         importCMP_A__a_cssfrom\"./a.css\";"
    ));
}

#[test]
fn requires_styles_before_core_for_commonjs() {
    let source = r#"
        @Component({ tag: 'cmp-a', styleUrls: { ios: './ios.css', md: './md.css' } })
        class CmpA {}
    "#;
    let code = transform(source, &TransformOptions::default().with_module(ModuleConvention::Cjs));

    assert_eq!(
        code,
        "constCMP_A_ios__ios_css=require(\"./ios.css\");\
         constCMP_A_md__md_css=require(\"./md.css\");\
         const{registerInstance:__stencil_registerInstance}=require(\"@stencil/core\");\
         classCmpA{constructor(hostRef){__stencil_registerInstance(this,hostRef);}}\
         CmpA.style={ios:CMP_A_ios__ios_css,md:CMP_A_md__md_css};"
    );
}

#[test]
fn assigns_style_right_after_each_class() {
    let source = r#"
        @Component({ tag: 'cmp-a', styleUrl: './shared.css' })
        export class CmpA {}
        export const between = 1;
        @Component({ tag: 'cmp-b', styleUrl: './shared.css' })
        export class CmpB {}
    "#;
    let code = transform(source, &TransformOptions::default());

    assert!(code.contains("importCMP_A__shared_cssfrom\"./shared.css\";importCMP_B__shared_cssfrom\"./shared.css\";"));
    assert!(code.contains("};CmpA.style=CMP_A__shared_css;exportconstbetween=1;"));
    assert!(code.ends_with("};CmpB.style=CMP_B__shared_css;"));
}

#[test]
fn skips_styles_when_disabled() {
    let source = r#"
        @Component({ tag: 'cmp-a', styleUrls: ['./foo/bar.css'] })
        class CmpA {}
    "#;
    let options = TransformOptions {
        style: StyleMode::None,
        ..TransformOptions::default()
    };
    let code = transform(source, &options);

    assert!(!code.contains("bar.css"));
    assert!(!code.contains(".style="));
    assert!(code.ends_with(CLASS_BODY));
}

#[test]
fn emits_nothing_without_style_refs() {
    let source = "@Component({ tag: 'cmp-a' }) class CmpA {}";
    let code = transform(source, &TransformOptions::default());

    assert_eq!(
        code,
        format!(
            "import{{registerInstanceas__stencil_registerInstance}}from\"@stencil/core\";{}",
            CLASS_BODY
        )
    );
}

#[test]
fn avoids_names_already_bound_by_the_module() {
    let source = r#"
        import { Component } from '@stencil/core';
        import CMP_A__a_css from './legacy.css';
        const CMP_A__b_css = 1;
        @Component({ tag: 'cmp-a', styleUrls: ['./a.css', './b.css'] })
        export class CmpA {}
    "#;
    let code = transform(source, &TransformOptions::default());

    assert!(code.contains("importCMP_A__a_cssfrom\"./legacy.css\";"));
    assert!(code.contains("importCMP_A__a_css_1from\"./a.css\";"));
    assert!(code.contains("importCMP_A__b_css_1from\"./b.css\";"));
    assert!(code.contains("constCMP_A__b_css=1;"));
    assert!(code.contains("CmpA.style=CMP_A__a_css_1+CMP_A__b_css_1;"));
}
